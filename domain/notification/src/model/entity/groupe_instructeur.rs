use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Team of instructors sharing a set of dossiers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GroupeInstructeur {
    pub id: Uuid,
    pub procedure_id: Uuid,
    pub instructor_ids: BTreeSet<Uuid>,
}
