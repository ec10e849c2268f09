use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use domain_notification::{
    exception::NotificationResult, model::vo::NotificationPreferences,
    repository::InstructorProcedureRepo, service::PreferenceResolveService,
};
use typed_builder::TypedBuilder;
use uuid::Uuid;

#[derive(TypedBuilder)]
pub struct PreferenceResolveServiceImpl {
    instructor_procedure_repo: Arc<dyn InstructorProcedureRepo>,
    /// Used for instructors without stored preferences, and for kinds they never set.
    #[builder(default)]
    default_preferences: NotificationPreferences,
}

#[async_trait]
impl PreferenceResolveService for PreferenceResolveServiceImpl {
    async fn resolve(
        &self,
        instructor_id: Uuid,
        procedure_id: Uuid,
    ) -> NotificationResult<NotificationPreferences> {
        let stored = self
            .instructor_procedure_repo
            .get_preferences(instructor_id, procedure_id)
            .await?;
        Ok(self.complete(stored))
    }

    async fn resolve_many(
        &self,
        instructor_ids: &[Uuid],
        procedure_id: Uuid,
    ) -> NotificationResult<HashMap<Uuid, NotificationPreferences>> {
        let mut stored = self
            .instructor_procedure_repo
            .get_preferences_for_instructors(instructor_ids, procedure_id)
            .await?;
        Ok(instructor_ids
            .iter()
            .map(|id| (*id, self.complete(stored.remove(id))))
            .collect())
    }
}

impl PreferenceResolveServiceImpl {
    fn complete(&self, stored: Option<NotificationPreferences>) -> NotificationPreferences {
        match stored {
            Some(preferences) => preferences.merged_over(&self.default_preferences),
            None => self.default_preferences.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use domain_notification::{
        exception::NotificationException,
        mock::MockInstructorProcedureRepo,
        model::vo::{NotificationKind, PreferenceLevel},
    };

    use super::*;

    #[tokio::test]
    async fn missing_row_resolves_to_injected_defaults() {
        let mut repo = MockInstructorProcedureRepo::new();
        repo.expect_get_preferences().returning(|_, _| Ok(None));
        let defaults = NotificationPreferences::system_default()
            .with_level(NotificationKind::Message, PreferenceLevel::All);
        let service = PreferenceResolveServiceImpl::builder()
            .instructor_procedure_repo(Arc::new(repo))
            .default_preferences(defaults.clone())
            .build();

        let resolved = service.resolve(Uuid::new_v4(), Uuid::new_v4()).await.unwrap();
        assert_eq!(resolved, defaults);
    }

    #[tokio::test]
    async fn stored_row_is_completed_with_defaults() {
        let mut repo = MockInstructorProcedureRepo::new();
        repo.expect_get_preferences().returning(|_, _| {
            Ok(Some(
                NotificationPreferences::empty()
                    .with_level(NotificationKind::DossierDepose, PreferenceLevel::None),
            ))
        });
        let service = PreferenceResolveServiceImpl::builder()
            .instructor_procedure_repo(Arc::new(repo))
            .build();

        let resolved = service.resolve(Uuid::new_v4(), Uuid::new_v4()).await.unwrap();
        assert_eq!(resolved.level(NotificationKind::DossierDepose), PreferenceLevel::None);
        assert_eq!(resolved.level(NotificationKind::Message), PreferenceLevel::Followed);
    }

    #[tokio::test]
    async fn resolve_many_covers_every_instructor() {
        let with_row = Uuid::new_v4();
        let without_row = Uuid::new_v4();
        let mut repo = MockInstructorProcedureRepo::new();
        repo.expect_get_preferences_for_instructors()
            .returning(move |_, _| {
                Ok(HashMap::from([(
                    with_row,
                    NotificationPreferences::empty()
                        .with_level(NotificationKind::Message, PreferenceLevel::None),
                )]))
            });
        let service = PreferenceResolveServiceImpl::builder()
            .instructor_procedure_repo(Arc::new(repo))
            .build();

        let resolved = service
            .resolve_many(&[with_row, without_row], Uuid::new_v4())
            .await
            .unwrap();
        assert_eq!(resolved.len(), 2);
        assert_eq!(resolved[&with_row].level(NotificationKind::Message), PreferenceLevel::None);
        assert_eq!(
            resolved[&without_row].level(NotificationKind::Message),
            PreferenceLevel::Followed
        );
    }

    #[tokio::test]
    async fn repository_failure_is_internal_error() {
        let mut repo = MockInstructorProcedureRepo::new();
        repo.expect_get_preferences()
            .returning(|_, _| Err(anyhow::anyhow!("connection reset")));
        let service = PreferenceResolveServiceImpl::builder()
            .instructor_procedure_repo(Arc::new(repo))
            .build();

        let result = service.resolve(Uuid::new_v4(), Uuid::new_v4()).await;
        assert!(matches!(result, Err(NotificationException::InternalError { .. })));
    }
}
