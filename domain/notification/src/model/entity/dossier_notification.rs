use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    exception::NotificationResult,
    model::vo::{NotificationKind, Recipient},
};

/// One pending notification of a dossier for an instructor or a groupe instructeur.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DossierNotification {
    /// Id.
    pub id: Uuid,
    /// The dossier it is about.
    pub dossier_id: Uuid,
    pub kind: NotificationKind,
    pub recipient: Recipient,
    /// Hidden until this time.
    pub display_at: DateTime<Utc>,
}

/// Unique key of the notification table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NotificationKey {
    pub dossier_id: Uuid,
    pub kind: NotificationKind,
    pub recipient: Recipient,
}

impl DossierNotification {
    pub fn new(
        dossier_id: Uuid,
        kind: NotificationKind,
        recipient: Recipient,
        display_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            dossier_id,
            kind,
            recipient,
            display_at,
        }
    }

    /// Rebuild a row stored with two nullable recipient columns.
    pub fn from_columns(
        id: Uuid,
        dossier_id: Uuid,
        kind: NotificationKind,
        instructor_id: Option<Uuid>,
        group_id: Option<Uuid>,
        display_at: DateTime<Utc>,
    ) -> NotificationResult<Self> {
        Ok(Self {
            id,
            dossier_id,
            kind,
            recipient: Recipient::from_parts(instructor_id, group_id)?,
            display_at,
        })
    }

    pub fn key(&self) -> NotificationKey {
        NotificationKey {
            dossier_id: self.dossier_id,
            kind: self.kind,
            recipient: self.recipient,
        }
    }

    pub fn is_displayable(&self, now: DateTime<Utc>) -> bool {
        self.display_at <= now
    }
}
