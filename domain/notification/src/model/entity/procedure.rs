use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Read-only view of a procedure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Procedure {
    pub id: Uuid,
    /// Submission is the decision, there is nothing to review.
    pub declarative: bool,
    /// Silence vaut accord / silence vaut rejet timer is enabled.
    pub sva_svr: bool,
}

impl Procedure {
    /// Procedures deciding on their own never announce new dossiers.
    pub fn announces_new_dossiers(&self) -> bool {
        !self.declarative && !self.sva_svr
    }
}
