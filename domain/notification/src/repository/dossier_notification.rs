use async_trait::async_trait;

use crate::model::{
    entity::DossierNotification,
    vo::{ChangeSet, ChangeSummary, NotificationFilter},
};

#[async_trait]
pub trait DossierNotificationRepo: Send + Sync {
    /// Apply every change in one transaction: either all of them are visible afterwards,
    /// or none is.
    ///
    /// Creating a row whose unique key already exists is a no-op, not an error.
    async fn apply(&self, changes: ChangeSet) -> anyhow::Result<ChangeSummary>;

    /// Get all rows matching the filter.
    async fn get_all(&self, filter: &NotificationFilter)
        -> anyhow::Result<Vec<DossierNotification>>;
}
