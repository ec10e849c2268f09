use std::collections::HashMap;

use async_trait::async_trait;
use mockall::mock;
use uuid::Uuid;

use crate::{
    command::PreferenceChangeCommand,
    exception::NotificationResult,
    model::{
        entity::{Dossier, DossierNotification, GroupeInstructeur, Procedure},
        vo::{
            ChangeSet, ChangeSummary, NotificationFilter, NotificationKind,
            NotificationPreferences,
        },
    },
    repository::{
        DossierNotificationRepo, DossierRepo, GroupeInstructeurRepo, InstructorProcedureRepo,
        ProcedureRepo,
    },
    service::NotificationLifecycleService,
};

mock! {
    pub DossierNotificationRepo {}
    #[async_trait]
    impl DossierNotificationRepo for DossierNotificationRepo {
        async fn apply(&self, changes: ChangeSet) -> anyhow::Result<ChangeSummary>;
        async fn get_all(&self, filter: &NotificationFilter) -> anyhow::Result<Vec<DossierNotification>>;
    }
}

mock! {
    pub DossierRepo {}
    #[async_trait]
    impl DossierRepo for DossierRepo {
        async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Dossier>;
        async fn get_by_ids(&self, ids: &[Uuid]) -> anyhow::Result<Vec<Dossier>>;
        async fn get_by_group_ids(&self, group_ids: &[Uuid]) -> anyhow::Result<Vec<Dossier>>;
    }
}

mock! {
    pub ProcedureRepo {}
    #[async_trait]
    impl ProcedureRepo for ProcedureRepo {
        async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Procedure>;
    }
}

mock! {
    pub GroupeInstructeurRepo {}
    #[async_trait]
    impl GroupeInstructeurRepo for GroupeInstructeurRepo {
        async fn get_by_id(&self, id: Uuid) -> anyhow::Result<GroupeInstructeur>;
    }
}

mock! {
    pub InstructorProcedureRepo {}
    #[async_trait]
    impl InstructorProcedureRepo for InstructorProcedureRepo {
        async fn get_preferences(
            &self,
            instructor_id: Uuid,
            procedure_id: Uuid,
        ) -> anyhow::Result<Option<NotificationPreferences>>;
        async fn get_preferences_for_instructors(
            &self,
            instructor_ids: &[Uuid],
            procedure_id: Uuid,
        ) -> anyhow::Result<HashMap<Uuid, NotificationPreferences>>;
    }
}

mock! {
    pub NotificationLifecycleService {}
    #[async_trait]
    impl NotificationLifecycleService for NotificationLifecycleService {
        async fn create_notification(
            &self,
            dossier_id: Uuid,
            kind: NotificationKind,
            instructor_id: Option<Uuid>,
            except_instructor_id: Option<Uuid>,
        ) -> NotificationResult<ChangeSummary>;
        async fn update_group(
            &self,
            from_group_id: Uuid,
            to_group_id: Uuid,
        ) -> NotificationResult<ChangeSummary>;
        async fn refresh_for_newly_followed(
            &self,
            instructor_id: Uuid,
            dossier_id: Uuid,
        ) -> NotificationResult<ChangeSummary>;
        async fn cleanup_for_unfollowed(
            &self,
            instructor_id: Uuid,
            dossier_id: Uuid,
        ) -> NotificationResult<ChangeSummary>;
        async fn reconcile_preference_change(
            &self,
            command: PreferenceChangeCommand,
        ) -> NotificationResult<ChangeSummary>;
        async fn destroy_by_dossier_and_kind(
            &self,
            dossier_id: Uuid,
            kind: NotificationKind,
        ) -> NotificationResult<ChangeSummary>;
        async fn destroy_by_dossier_kind_instructor(
            &self,
            dossier_id: Uuid,
            kind: NotificationKind,
            instructor_id: Uuid,
        ) -> NotificationResult<ChangeSummary>;
        async fn destroy_for_instructor_leaving_group(
            &self,
            group_id: Uuid,
            instructor_id: Uuid,
        ) -> NotificationResult<ChangeSummary>;
    }
}
