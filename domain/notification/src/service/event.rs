use async_trait::async_trait;

use crate::{command::DossierEvent, exception::NotificationResult, model::vo::ChangeSummary};

/// Receive dossier events and turn them into notification changes.
#[async_trait]
pub trait DossierEventService: Send + Sync {
    async fn handle(&self, event: DossierEvent) -> NotificationResult<ChangeSummary>;
}
