use serde::{Deserialize, Serialize};

/// Tabs of the instructor's procedure dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DossierBucket {
    /// In progress and followed by nobody.
    #[serde(rename = "a-suivre")]
    ASuivre,
    /// In progress and followed by the instructor.
    #[serde(rename = "suivis")]
    Suivis,
    /// Decided.
    #[serde(rename = "traites")]
    Traites,
}
