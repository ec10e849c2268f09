use std::sync::Arc;

use domain_notification::{
    command::DossierEvent,
    model::vo::ChangeSummary,
    service::{
        Clock, DossierEventService, NotificationLifecycleService, NotificationQueryService,
        PreferenceResolveService,
    },
};
use getset::Getters;
use infrastructure_store::{
    MemoryDossierNotificationRepo, MemoryDossierRepo, MemoryGroupeInstructeurRepo,
    MemoryInstructorProcedureRepo, MemoryProcedureRepo,
};
use service_notification::{
    DossierEventServiceImpl, NotificationLifecycleServiceImpl, NotificationQueryServiceImpl,
    PreferenceResolveServiceImpl,
};

use crate::config::NotificationConfig;

/// Repositories and services of the notification center, wired together.
#[derive(Getters)]
#[getset(get = "pub")]
pub struct ServiceProvider {
    notification_repo: Arc<MemoryDossierNotificationRepo>,
    dossier_repo: Arc<MemoryDossierRepo>,
    procedure_repo: Arc<MemoryProcedureRepo>,
    group_repo: Arc<MemoryGroupeInstructeurRepo>,
    instructor_procedure_repo: Arc<MemoryInstructorProcedureRepo>,
    preference_service: Arc<dyn PreferenceResolveService>,
    lifecycle_service: Arc<dyn NotificationLifecycleService>,
    query_service: Arc<dyn NotificationQueryService>,
    event_service: Arc<dyn DossierEventService>,
}

impl ServiceProvider {
    /// Wire the services on the in-memory store.
    pub fn in_memory(config: &NotificationConfig, clock: Arc<dyn Clock>) -> anyhow::Result<Self> {
        let notification_repo = Arc::new(MemoryDossierNotificationRepo::new());
        let dossier_repo = Arc::new(MemoryDossierRepo::new());
        let procedure_repo = Arc::new(MemoryProcedureRepo::new());
        let group_repo = Arc::new(MemoryGroupeInstructeurRepo::new());
        let instructor_procedure_repo = Arc::new(MemoryInstructorProcedureRepo::new());

        let preference_service: Arc<dyn PreferenceResolveService> = Arc::new(
            PreferenceResolveServiceImpl::builder()
                .instructor_procedure_repo(instructor_procedure_repo.clone())
                .default_preferences(config.default_preferences()?)
                .build(),
        );
        let lifecycle_service: Arc<dyn NotificationLifecycleService> = Arc::new(
            NotificationLifecycleServiceImpl::builder()
                .notification_repo(notification_repo.clone())
                .dossier_repo(dossier_repo.clone())
                .procedure_repo(procedure_repo.clone())
                .group_repo(group_repo.clone())
                .preference_service(preference_service.clone())
                .clock(clock.clone())
                .dossier_depose_delay(config.dossier_depose_delay()?)
                .build(),
        );
        let query_service: Arc<dyn NotificationQueryService> = Arc::new(
            NotificationQueryServiceImpl::builder()
                .notification_repo(notification_repo.clone())
                .dossier_repo(dossier_repo.clone())
                .clock(clock)
                .build(),
        );
        let event_service: Arc<dyn DossierEventService> = Arc::new(
            DossierEventServiceImpl::builder()
                .lifecycle_service(lifecycle_service.clone())
                .build(),
        );
        tracing::info!(
            "Notification center ready, dossier_depose delay is {} days.",
            config.dossier_depose_delay_days()
        );

        Ok(Self {
            notification_repo,
            dossier_repo,
            procedure_repo,
            group_repo,
            instructor_procedure_repo,
            preference_service,
            lifecycle_service,
            query_service,
            event_service,
        })
    }

    /// Decode a JSON dossier event and handle it.
    pub async fn dispatch(&self, payload: &str) -> anyhow::Result<ChangeSummary> {
        let event: DossierEvent = serde_json::from_str(payload)?;
        Ok(self.event_service.handle(event).await?)
    }
}
