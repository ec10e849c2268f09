use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::vo::{NotificationKind, PreferenceLevel};

/// An instructor changed its preference level for one kind on one procedure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferenceChangeCommand {
    pub instructor_id: Uuid,
    pub kind: NotificationKind,
    pub old_preference: PreferenceLevel,
    pub new_preference: PreferenceLevel,
    /// Every dossier of the procedure the instructor can see.
    pub all_dossier_ids: Vec<Uuid>,
    /// Subset of `all_dossier_ids` the instructor follows.
    pub followed_dossier_ids: Vec<Uuid>,
    /// Subset of `all_dossier_ids` the instructor doesn't follow.
    pub non_followed_dossier_ids: Vec<Uuid>,
}

/// Something happened that may change the notifications of a dossier.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum DossierEvent {
    /// The user submitted the dossier.
    #[serde(rename_all = "camelCase")]
    DossierSubmitted { dossier_id: Uuid },
    /// The user edited fields after submission.
    #[serde(rename_all = "camelCase")]
    DossierModified {
        dossier_id: Uuid,
        by_instructor_id: Option<Uuid>,
    },
    #[serde(rename_all = "camelCase")]
    MessagePosted {
        dossier_id: Uuid,
        by_instructor_id: Option<Uuid>,
    },
    #[serde(rename_all = "camelCase")]
    PrivateAnnotationUpdated {
        dossier_id: Uuid,
        by_instructor_id: Option<Uuid>,
    },
    #[serde(rename_all = "camelCase")]
    AvisRequested { dossier_id: Uuid },
    #[serde(rename_all = "camelCase")]
    AvisAnswered { dossier_id: Uuid },
    #[serde(rename_all = "camelCase")]
    CorrectionRequested { dossier_id: Uuid },
    /// The instructor was explicitly addressed in a message.
    #[serde(rename_all = "camelCase")]
    InstructorMentioned {
        dossier_id: Uuid,
        instructor_id: Uuid,
    },
    #[serde(rename_all = "camelCase")]
    Followed {
        dossier_id: Uuid,
        instructor_id: Uuid,
    },
    #[serde(rename_all = "camelCase")]
    Unfollowed {
        dossier_id: Uuid,
        instructor_id: Uuid,
    },
    PreferenceChanged(PreferenceChangeCommand),
    /// Dossiers of `from_group_id` moved to `to_group_id`.
    #[serde(rename_all = "camelCase")]
    GroupReassigned { from_group_id: Uuid, to_group_id: Uuid },
    #[serde(rename_all = "camelCase")]
    InstructorRemovedFromGroup { group_id: Uuid, instructor_id: Uuid },
    /// The condition behind a notification was handled, e.g. the instructor read the messages.
    #[serde(rename_all = "camelCase")]
    ConditionResolved {
        dossier_id: Uuid,
        kind: NotificationKind,
        instructor_id: Option<Uuid>,
    },
}
