use std::sync::Arc;

use async_trait::async_trait;
use domain_notification::{
    command::DossierEvent,
    exception::NotificationResult,
    model::vo::{ChangeSummary, NotificationKind},
    service::{DossierEventService, NotificationLifecycleService},
};
use typed_builder::TypedBuilder;

#[derive(TypedBuilder)]
pub struct DossierEventServiceImpl {
    lifecycle_service: Arc<dyn NotificationLifecycleService>,
}

#[async_trait]
impl DossierEventService for DossierEventServiceImpl {
    #[tracing::instrument(skip(self))]
    async fn handle(&self, event: DossierEvent) -> NotificationResult<ChangeSummary> {
        let lifecycle = &self.lifecycle_service;
        match event {
            DossierEvent::DossierSubmitted { dossier_id } => {
                lifecycle
                    .create_notification(dossier_id, NotificationKind::DossierDepose, None, None)
                    .await
            }
            DossierEvent::DossierModified {
                dossier_id,
                by_instructor_id,
            } => {
                lifecycle
                    .create_notification(
                        dossier_id,
                        NotificationKind::DossierModifie,
                        None,
                        by_instructor_id,
                    )
                    .await
            }
            DossierEvent::MessagePosted {
                dossier_id,
                by_instructor_id,
            } => {
                lifecycle
                    .create_notification(dossier_id, NotificationKind::Message, None, by_instructor_id)
                    .await
            }
            DossierEvent::PrivateAnnotationUpdated {
                dossier_id,
                by_instructor_id,
            } => {
                lifecycle
                    .create_notification(
                        dossier_id,
                        NotificationKind::AnnotationInstructeur,
                        None,
                        by_instructor_id,
                    )
                    .await
            }
            DossierEvent::AvisRequested { dossier_id } => {
                lifecycle
                    .create_notification(dossier_id, NotificationKind::AttenteAvis, None, None)
                    .await
            }
            DossierEvent::AvisAnswered { dossier_id } => {
                lifecycle
                    .create_notification(dossier_id, NotificationKind::AvisExterne, None, None)
                    .await
            }
            DossierEvent::CorrectionRequested { dossier_id } => {
                lifecycle
                    .create_notification(dossier_id, NotificationKind::AttenteCorrection, None, None)
                    .await
            }
            DossierEvent::InstructorMentioned {
                dossier_id,
                instructor_id,
            } => {
                lifecycle
                    .create_notification(
                        dossier_id,
                        NotificationKind::Message,
                        Some(instructor_id),
                        None,
                    )
                    .await
            }
            DossierEvent::Followed {
                dossier_id,
                instructor_id,
            } => lifecycle.refresh_for_newly_followed(instructor_id, dossier_id).await,
            DossierEvent::Unfollowed {
                dossier_id,
                instructor_id,
            } => lifecycle.cleanup_for_unfollowed(instructor_id, dossier_id).await,
            DossierEvent::PreferenceChanged(command) => {
                lifecycle.reconcile_preference_change(command).await
            }
            DossierEvent::GroupReassigned {
                from_group_id,
                to_group_id,
            } => lifecycle.update_group(from_group_id, to_group_id).await,
            DossierEvent::InstructorRemovedFromGroup {
                group_id,
                instructor_id,
            } => {
                lifecycle
                    .destroy_for_instructor_leaving_group(group_id, instructor_id)
                    .await
            }
            DossierEvent::ConditionResolved {
                dossier_id,
                kind,
                instructor_id: Some(instructor_id),
            } => {
                lifecycle
                    .destroy_by_dossier_kind_instructor(dossier_id, kind, instructor_id)
                    .await
            }
            DossierEvent::ConditionResolved {
                dossier_id,
                kind,
                instructor_id: None,
            } => lifecycle.destroy_by_dossier_and_kind(dossier_id, kind).await,
        }
    }
}
