#![allow(dead_code)]

use std::{collections::BTreeSet, sync::Arc};

use chrono::{DateTime, TimeZone, Utc};
use domain_notification::model::{
    entity::{
        CommentAuthor, Commentaire, Dossier, DossierState, GroupeInstructeur, InstructorProcedure,
        Procedure,
    },
    vo::NotificationPreferences,
};
use infrastructure_store::{
    ManualClock, MemoryDossierNotificationRepo, MemoryDossierRepo, MemoryGroupeInstructeurRepo,
    MemoryInstructorProcedureRepo, MemoryProcedureRepo,
};
use service_notification::{
    NotificationLifecycleServiceImpl, NotificationQueryServiceImpl, PreferenceResolveServiceImpl,
};
use uuid::Uuid;

pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 4, 9, 0, 0).unwrap()
}

/// Services wired on the in-memory store, with one procedure and one group of two
/// instructors.
pub struct Harness {
    pub clock: Arc<ManualClock>,
    pub notifications: Arc<MemoryDossierNotificationRepo>,
    pub dossiers: Arc<MemoryDossierRepo>,
    pub procedures: Arc<MemoryProcedureRepo>,
    pub groups: Arc<MemoryGroupeInstructeurRepo>,
    pub preferences: Arc<MemoryInstructorProcedureRepo>,
    pub lifecycle: NotificationLifecycleServiceImpl,
    pub query: NotificationQueryServiceImpl,
    pub procedure_id: Uuid,
    pub group_id: Uuid,
    pub instructor_1: Uuid,
    pub instructor_2: Uuid,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_procedure(false, false)
    }

    pub fn with_procedure(declarative: bool, sva_svr: bool) -> Self {
        let clock = Arc::new(ManualClock::new(t0()));
        let notifications = Arc::new(MemoryDossierNotificationRepo::new());
        let dossiers = Arc::new(MemoryDossierRepo::new());
        let procedures = Arc::new(MemoryProcedureRepo::new());
        let groups = Arc::new(MemoryGroupeInstructeurRepo::new());
        let preferences = Arc::new(MemoryInstructorProcedureRepo::new());

        let (procedure_id, group_id) = (Uuid::new_v4(), Uuid::new_v4());
        let (instructor_1, instructor_2) = (Uuid::new_v4(), Uuid::new_v4());
        procedures.save(Procedure {
            id: procedure_id,
            declarative,
            sva_svr,
        });
        groups.save(GroupeInstructeur {
            id: group_id,
            procedure_id,
            instructor_ids: BTreeSet::from([instructor_1, instructor_2]),
        });

        let preference_service = Arc::new(
            PreferenceResolveServiceImpl::builder()
                .instructor_procedure_repo(preferences.clone())
                .build(),
        );
        let lifecycle = NotificationLifecycleServiceImpl::builder()
            .notification_repo(notifications.clone())
            .dossier_repo(dossiers.clone())
            .procedure_repo(procedures.clone())
            .group_repo(groups.clone())
            .preference_service(preference_service)
            .clock(clock.clone())
            .build();
        let query = NotificationQueryServiceImpl::builder()
            .notification_repo(notifications.clone())
            .dossier_repo(dossiers.clone())
            .clock(clock.clone())
            .build();

        Self {
            clock,
            notifications,
            dossiers,
            procedures,
            groups,
            preferences,
            lifecycle,
            query,
            procedure_id,
            group_id,
            instructor_1,
            instructor_2,
        }
    }

    /// Save a dossier of the harness group, submitted at `t0`.
    pub fn dossier(&self, state: DossierState, follower_ids: &[Uuid]) -> Dossier {
        let dossier = Dossier {
            id: Uuid::new_v4(),
            procedure_id: self.procedure_id,
            groupe_instructeur_id: self.group_id,
            state,
            depose_at: Some(t0()),
            follower_ids: follower_ids.iter().copied().collect(),
            ..Default::default()
        };
        self.dossiers.save(dossier.clone());
        dossier
    }

    /// Save a dossier with a message from the user the instructors haven't seen.
    pub fn dossier_with_message(&self, follower_ids: &[Uuid]) -> Dossier {
        let mut dossier = self.dossier(DossierState::EnInstruction, follower_ids);
        dossier.commentaires.push(Commentaire {
            id: Uuid::new_v4(),
            author: CommentAuthor::Usager,
            created_at: t0(),
        });
        self.dossiers.save(dossier.clone());
        dossier
    }

    pub fn set_preferences(&self, instructor_id: Uuid, preferences: NotificationPreferences) {
        self.preferences.save(InstructorProcedure {
            instructor_id,
            procedure_id: self.procedure_id,
            preferences,
        });
    }
}
