use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use domain_notification::{
    command::PreferenceChangeCommand,
    exception::NotificationResult,
    model::{
        entity::{Dossier, DossierNotification},
        vo::{
            ChangeSet, ChangeSummary, NotificationFilter, NotificationKind, PreferenceLevel,
            Recipient,
        },
    },
    repository::{DossierNotificationRepo, DossierRepo, GroupeInstructeurRepo, ProcedureRepo},
    rule,
    service::{Clock, NotificationLifecycleService, PreferenceResolveService},
};
use typed_builder::TypedBuilder;
use uuid::Uuid;

#[derive(TypedBuilder)]
pub struct NotificationLifecycleServiceImpl {
    notification_repo: Arc<dyn DossierNotificationRepo>,
    dossier_repo: Arc<dyn DossierRepo>,
    procedure_repo: Arc<dyn ProcedureRepo>,
    group_repo: Arc<dyn GroupeInstructeurRepo>,
    preference_service: Arc<dyn PreferenceResolveService>,
    clock: Arc<dyn Clock>,
    /// How long a `dossier_depose` notification stays hidden after submission.
    #[builder(default = Duration::days(7))]
    dossier_depose_delay: Duration,
}

#[async_trait]
impl NotificationLifecycleService for NotificationLifecycleServiceImpl {
    #[tracing::instrument(skip(self))]
    async fn create_notification(
        &self,
        dossier_id: Uuid,
        kind: NotificationKind,
        instructor_id: Option<Uuid>,
        except_instructor_id: Option<Uuid>,
    ) -> NotificationResult<ChangeSummary> {
        let dossier = self.dossier_repo.get_by_id(dossier_id).await?;
        let mut changes = ChangeSet::new();

        if let Some(instructor_id) = instructor_id {
            changes.create(self.notification(&dossier, kind, instructor_id));
            return self.commit(changes).await;
        }

        if kind == NotificationKind::DossierDepose {
            let procedure = self.procedure_repo.get_by_id(dossier.procedure_id).await?;
            if !procedure.announces_new_dossiers() {
                tracing::debug!("Procedure {} decides on its own, no dossier_depose.", procedure.id);
                return Ok(ChangeSummary::default());
            }
        }

        for instructor_id in self.audience(&dossier, kind, except_instructor_id).await? {
            changes.create(self.notification(&dossier, kind, instructor_id));
        }
        self.commit(changes).await
    }

    #[tracing::instrument(skip(self))]
    async fn update_group(
        &self,
        from_group_id: Uuid,
        to_group_id: Uuid,
    ) -> NotificationResult<ChangeSummary> {
        let mut changes = ChangeSet::new();
        changes.reassign_group(from_group_id, to_group_id);
        self.commit(changes).await
    }

    #[tracing::instrument(skip(self))]
    async fn refresh_for_newly_followed(
        &self,
        instructor_id: Uuid,
        dossier_id: Uuid,
    ) -> NotificationResult<ChangeSummary> {
        let dossier = self.dossier_repo.get_by_id(dossier_id).await?;
        let preferences = self
            .preference_service
            .resolve(instructor_id, dossier.procedure_id)
            .await?;

        let mut changes = ChangeSet::new();
        changes.delete(NotificationFilter::dossier(dossier_id).kind(NotificationKind::DossierDepose));
        for kind in preferences.kinds_with(PreferenceLevel::Followed) {
            if rule::is_eligible(kind, &dossier, instructor_id) {
                changes.create(self.notification(&dossier, kind, instructor_id));
            }
        }
        self.commit(changes).await
    }

    #[tracing::instrument(skip(self))]
    async fn cleanup_for_unfollowed(
        &self,
        instructor_id: Uuid,
        dossier_id: Uuid,
    ) -> NotificationResult<ChangeSummary> {
        let dossier = self.dossier_repo.get_by_id(dossier_id).await?;
        let preferences = self
            .preference_service
            .resolve(instructor_id, dossier.procedure_id)
            .await?;

        let kinds = NotificationKind::ALL
            .into_iter()
            .filter(|kind| preferences.level(*kind) != PreferenceLevel::All);
        let mut changes = ChangeSet::new();
        changes.delete(
            NotificationFilter::dossier(dossier_id)
                .kinds(kinds)
                .instructor(instructor_id),
        );
        self.commit(changes).await
    }

    #[tracing::instrument(skip(self, command), fields(instructor_id = %command.instructor_id, kind = %command.kind))]
    async fn reconcile_preference_change(
        &self,
        command: PreferenceChangeCommand,
    ) -> NotificationResult<ChangeSummary> {
        use PreferenceLevel::{All, Followed};

        let PreferenceChangeCommand {
            instructor_id,
            kind,
            old_preference,
            new_preference,
            all_dossier_ids,
            followed_dossier_ids,
            non_followed_dossier_ids,
        } = command;
        let mut changes = ChangeSet::new();

        match (old_preference, new_preference) {
            (All | Followed, PreferenceLevel::None) => {
                changes.delete(
                    NotificationFilter::dossiers(all_dossier_ids)
                        .kind(kind)
                        .instructor(instructor_id),
                );
            }
            (All, Followed) => {
                changes.delete(
                    NotificationFilter::dossiers(non_followed_dossier_ids)
                        .kind(kind)
                        .instructor(instructor_id),
                );
            }
            (PreferenceLevel::None, All) => {
                self.catch_up(&mut changes, &all_dossier_ids, kind, instructor_id).await?;
            }
            (Followed, All) => {
                self.catch_up(&mut changes, &non_followed_dossier_ids, kind, instructor_id)
                    .await?;
            }
            (PreferenceLevel::None, Followed) => {
                self.catch_up(&mut changes, &followed_dossier_ids, kind, instructor_id).await?;
            }
            (old, new) => {
                tracing::debug!("Nothing to reconcile from {old} to {new}.");
            }
        }
        self.commit(changes).await
    }

    #[tracing::instrument(skip(self))]
    async fn destroy_by_dossier_and_kind(
        &self,
        dossier_id: Uuid,
        kind: NotificationKind,
    ) -> NotificationResult<ChangeSummary> {
        let mut changes = ChangeSet::new();
        changes.delete(NotificationFilter::dossier(dossier_id).kind(kind));
        self.commit(changes).await
    }

    #[tracing::instrument(skip(self))]
    async fn destroy_by_dossier_kind_instructor(
        &self,
        dossier_id: Uuid,
        kind: NotificationKind,
        instructor_id: Uuid,
    ) -> NotificationResult<ChangeSummary> {
        let mut changes = ChangeSet::new();
        changes.delete(
            NotificationFilter::dossier(dossier_id)
                .kind(kind)
                .instructor(instructor_id),
        );
        self.commit(changes).await
    }

    #[tracing::instrument(skip(self))]
    async fn destroy_for_instructor_leaving_group(
        &self,
        group_id: Uuid,
        instructor_id: Uuid,
    ) -> NotificationResult<ChangeSummary> {
        let dossiers = self.dossier_repo.get_by_group_ids(&[group_id]).await?;
        let mut changes = ChangeSet::new();
        changes.delete(
            NotificationFilter::dossiers(dossiers.iter().map(|dossier| dossier.id))
                .instructor(instructor_id),
        );
        self.commit(changes).await
    }
}

impl NotificationLifecycleServiceImpl {
    fn notification(
        &self,
        dossier: &Dossier,
        kind: NotificationKind,
        instructor_id: Uuid,
    ) -> DossierNotification {
        DossierNotification::new(
            dossier.id,
            kind,
            Recipient::Instructor(instructor_id),
            self.display_at(dossier, kind),
        )
    }

    fn display_at(&self, dossier: &Dossier, kind: NotificationKind) -> DateTime<Utc> {
        match (kind, dossier.depose_at) {
            (NotificationKind::DossierDepose, Some(depose_at)) => depose_at
                .checked_add_signed(self.dossier_depose_delay)
                .unwrap_or_else(|| {
                    tracing::warn!(
                        "dossier_depose delay overflows for dossier {}, never displayed.",
                        dossier.id
                    );
                    DateTime::<Utc>::MAX_UTC
                }),
            _ => self.clock.now(),
        }
    }

    /// Instructors of the dossier's group whose preference asks for this kind, given
    /// whether they follow the dossier.
    async fn audience(
        &self,
        dossier: &Dossier,
        kind: NotificationKind,
        except_instructor_id: Option<Uuid>,
    ) -> NotificationResult<Vec<Uuid>> {
        let group = self.group_repo.get_by_id(dossier.groupe_instructeur_id).await?;
        let instructor_ids: Vec<Uuid> = group
            .instructor_ids
            .into_iter()
            .filter(|id| Some(*id) != except_instructor_id)
            .collect();
        let preferences = self
            .preference_service
            .resolve_many(&instructor_ids, dossier.procedure_id)
            .await?;

        Ok(instructor_ids
            .into_iter()
            .filter(|id| {
                preferences.get(id).is_some_and(|preferences| {
                    preferences
                        .level(kind)
                        .notifies(dossier.is_followed_by(*id))
                })
            })
            .collect())
    }

    /// Create the notifications of `kind` that are due on the dossiers but missing.
    async fn catch_up(
        &self,
        changes: &mut ChangeSet,
        dossier_ids: &[Uuid],
        kind: NotificationKind,
        instructor_id: Uuid,
    ) -> NotificationResult<()> {
        let dossiers = self.dossier_repo.get_by_ids(dossier_ids).await?;
        for dossier in dossiers
            .iter()
            .filter(|dossier| rule::is_eligible(kind, dossier, instructor_id))
        {
            changes.create(self.notification(dossier, kind, instructor_id));
        }
        Ok(())
    }

    async fn commit(&self, changes: ChangeSet) -> NotificationResult<ChangeSummary> {
        if changes.is_empty() {
            return Ok(ChangeSummary::default());
        }
        let summary = self.notification_repo.apply(changes).await?;
        tracing::debug!(
            created = summary.created,
            deleted = summary.deleted,
            reassigned = summary.reassigned,
            "Notification changes applied."
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use domain_notification::{
        exception::NotificationException,
        mock::{
            MockDossierNotificationRepo, MockDossierRepo, MockGroupeInstructeurRepo,
            MockProcedureRepo,
        },
        model::{
            entity::DossierState,
            vo::{NotificationChange, NotificationPreferences},
        },
        service::SystemClock,
    };

    use super::*;

    struct NoPreferences;

    #[async_trait]
    impl PreferenceResolveService for NoPreferences {
        async fn resolve(&self, _: Uuid, _: Uuid) -> NotificationResult<NotificationPreferences> {
            Ok(Default::default())
        }

        async fn resolve_many(
            &self,
            instructor_ids: &[Uuid],
            _: Uuid,
        ) -> NotificationResult<HashMap<Uuid, NotificationPreferences>> {
            Ok(instructor_ids.iter().map(|id| (*id, Default::default())).collect())
        }
    }

    fn service(
        notification_repo: MockDossierNotificationRepo,
        dossier_repo: MockDossierRepo,
    ) -> NotificationLifecycleServiceImpl {
        NotificationLifecycleServiceImpl::builder()
            .notification_repo(Arc::new(notification_repo))
            .dossier_repo(Arc::new(dossier_repo))
            .procedure_repo(Arc::new(MockProcedureRepo::new()))
            .group_repo(Arc::new(MockGroupeInstructeurRepo::new()))
            .preference_service(Arc::new(NoPreferences))
            .clock(Arc::new(SystemClock))
            .build()
    }

    #[tokio::test]
    async fn explicit_instructor_skips_audience() {
        let dossier = Dossier {
            id: Uuid::new_v4(),
            state: DossierState::EnInstruction,
            ..Default::default()
        };
        let instructor_id = Uuid::new_v4();
        let mut dossier_repo = MockDossierRepo::new();
        let returned = dossier.clone();
        dossier_repo
            .expect_get_by_id()
            .return_once(move |_| Ok(returned));
        let mut notification_repo = MockDossierNotificationRepo::new();
        notification_repo
            .expect_apply()
            .withf(move |changes| {
                matches!(
                    changes.changes(),
                    [NotificationChange::Create(n)]
                        if n.recipient == Recipient::Instructor(instructor_id)
                            && n.kind == NotificationKind::Message
                )
            })
            .times(1)
            .returning(|_| {
                Ok(ChangeSummary {
                    created: 1,
                    ..Default::default()
                })
            });

        let summary = service(notification_repo, dossier_repo)
            .create_notification(dossier.id, NotificationKind::Message, Some(instructor_id), None)
            .await
            .unwrap();
        assert_eq!(summary.created, 1);
    }

    #[tokio::test]
    async fn overflowing_depose_delay_saturates() {
        let dossier = Dossier {
            id: Uuid::new_v4(),
            state: DossierState::EnConstruction,
            depose_at: Some(Utc::now()),
            ..Default::default()
        };
        let mut dossier_repo = MockDossierRepo::new();
        let returned = dossier.clone();
        dossier_repo
            .expect_get_by_id()
            .return_once(move |_| Ok(returned));
        let mut notification_repo = MockDossierNotificationRepo::new();
        notification_repo
            .expect_apply()
            .withf(|changes| {
                matches!(
                    changes.changes(),
                    [NotificationChange::Create(n)] if n.display_at == DateTime::<Utc>::MAX_UTC
                )
            })
            .times(1)
            .returning(|_| {
                Ok(ChangeSummary {
                    created: 1,
                    ..Default::default()
                })
            });

        let service = NotificationLifecycleServiceImpl::builder()
            .notification_repo(Arc::new(notification_repo))
            .dossier_repo(Arc::new(dossier_repo))
            .procedure_repo(Arc::new(MockProcedureRepo::new()))
            .group_repo(Arc::new(MockGroupeInstructeurRepo::new()))
            .preference_service(Arc::new(NoPreferences))
            .clock(Arc::new(SystemClock))
            .dossier_depose_delay(Duration::days(1_000_000_000))
            .build();
        let summary = service
            .create_notification(
                dossier.id,
                NotificationKind::DossierDepose,
                Some(Uuid::new_v4()),
                None,
            )
            .await
            .unwrap();
        assert_eq!(summary.created, 1);
    }

    #[tokio::test]
    async fn unchanged_preference_writes_nothing() {
        let mut notification_repo = MockDossierNotificationRepo::new();
        notification_repo.expect_apply().never();

        let summary = service(notification_repo, MockDossierRepo::new())
            .reconcile_preference_change(PreferenceChangeCommand {
                instructor_id: Uuid::new_v4(),
                kind: NotificationKind::Message,
                old_preference: PreferenceLevel::Followed,
                new_preference: PreferenceLevel::Followed,
                all_dossier_ids: vec![Uuid::new_v4()],
                followed_dossier_ids: vec![],
                non_followed_dossier_ids: vec![],
            })
            .await
            .unwrap();
        assert!(summary.is_noop());
    }

    #[tokio::test]
    async fn store_failure_is_surfaced() {
        let mut notification_repo = MockDossierNotificationRepo::new();
        notification_repo
            .expect_apply()
            .returning(|_| Err(anyhow::anyhow!("serialization failure")));

        let result = service(notification_repo, MockDossierRepo::new())
            .update_group(Uuid::new_v4(), Uuid::new_v4())
            .await;
        assert!(matches!(result, Err(NotificationException::InternalError { .. })));
    }
}
