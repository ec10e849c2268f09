use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Procedures having news in the "suivis" and "traites" tabs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcedureStickers {
    pub followed: BTreeSet<Uuid>,
    pub treated: BTreeSet<Uuid>,
}

/// Whether the "suivis" and "traites" tabs of one procedure have news.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketStickers {
    pub followed: bool,
    pub treated: bool,
}

/// News flags of the tabs of a single dossier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DossierStickers {
    /// "demande" tab, from `dossier_modifie`.
    pub fields_modified: bool,
    /// "annotations privées" tab, from `annotation_instructeur`.
    pub private_annotations: bool,
    /// "avis externes" tab, from `avis_externe`.
    pub external_opinion: bool,
    /// "messagerie" tab, from `message`.
    pub messages: bool,
}
