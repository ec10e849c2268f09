use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::vo::NotificationPreferences;

/// Notification subscription of an instructor on a procedure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstructorProcedure {
    pub instructor_id: Uuid,
    pub procedure_id: Uuid,
    pub preferences: NotificationPreferences,
}
