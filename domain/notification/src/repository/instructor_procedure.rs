use std::collections::HashMap;

use async_trait::async_trait;
use uuid::Uuid;

use crate::model::vo::NotificationPreferences;

#[async_trait]
pub trait InstructorProcedureRepo: Send + Sync {
    /// Stored preferences, `None` when the instructor never saved any on the procedure.
    async fn get_preferences(
        &self,
        instructor_id: Uuid,
        procedure_id: Uuid,
    ) -> anyhow::Result<Option<NotificationPreferences>>;

    /// Stored preferences of several instructors; instructors without a row are absent.
    async fn get_preferences_for_instructors(
        &self,
        instructor_ids: &[Uuid],
        procedure_id: Uuid,
    ) -> anyhow::Result<HashMap<Uuid, NotificationPreferences>>;
}
