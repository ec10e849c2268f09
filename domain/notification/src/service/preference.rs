use std::collections::HashMap;

use async_trait::async_trait;
use uuid::Uuid;

use crate::{exception::NotificationResult, model::vo::NotificationPreferences};

/// Resolve the notification preferences of instructors on a procedure.
#[async_trait]
pub trait PreferenceResolveService: Send + Sync {
    /// Stored preferences completed with the default table, or the default table itself
    /// when the instructor never saved any.
    async fn resolve(
        &self,
        instructor_id: Uuid,
        procedure_id: Uuid,
    ) -> NotificationResult<NotificationPreferences>;

    /// Same as `resolve` for several instructors at once; every instructor is in the result.
    async fn resolve_many(
        &self,
        instructor_ids: &[Uuid],
        procedure_id: Uuid,
    ) -> NotificationResult<HashMap<Uuid, NotificationPreferences>>;
}
