use std::collections::HashMap;

use async_trait::async_trait;
use dashmap::DashMap;
use domain_notification::{
    model::{entity::InstructorProcedure, vo::NotificationPreferences},
    repository::InstructorProcedureRepo,
};
use uuid::Uuid;

/// Stored preferences keyed by (instructor, procedure).
#[derive(Debug, Default)]
pub struct MemoryInstructorProcedureRepo {
    preferences: DashMap<(Uuid, Uuid), NotificationPreferences>,
}

impl MemoryInstructorProcedureRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn save(&self, instructor_procedure: InstructorProcedure) {
        let InstructorProcedure {
            instructor_id,
            procedure_id,
            preferences,
        } = instructor_procedure;
        self.preferences.insert((instructor_id, procedure_id), preferences);
    }
}

#[async_trait]
impl InstructorProcedureRepo for MemoryInstructorProcedureRepo {
    async fn get_preferences(
        &self,
        instructor_id: Uuid,
        procedure_id: Uuid,
    ) -> anyhow::Result<Option<NotificationPreferences>> {
        Ok(self
            .preferences
            .get(&(instructor_id, procedure_id))
            .map(|preferences| preferences.clone()))
    }

    async fn get_preferences_for_instructors(
        &self,
        instructor_ids: &[Uuid],
        procedure_id: Uuid,
    ) -> anyhow::Result<HashMap<Uuid, NotificationPreferences>> {
        Ok(instructor_ids
            .iter()
            .filter_map(|instructor_id| {
                self.preferences
                    .get(&(*instructor_id, procedure_id))
                    .map(|preferences| (*instructor_id, preferences.clone()))
            })
            .collect())
    }
}
