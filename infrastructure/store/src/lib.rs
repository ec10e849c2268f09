//! In-memory store for dossier notifications and the collaborators they read.

mod clock;
mod dossier;
mod exception;
mod groupe_instructeur;
mod instructor_procedure;
mod notification;
mod procedure;

#[rustfmt::skip]
pub use {
    clock::ManualClock,
    dossier::MemoryDossierRepo,
    exception::{StoreException, StoreResult},
    groupe_instructeur::MemoryGroupeInstructeurRepo,
    instructor_procedure::MemoryInstructorProcedureRepo,
    notification::MemoryDossierNotificationRepo,
    procedure::MemoryProcedureRepo,
};
