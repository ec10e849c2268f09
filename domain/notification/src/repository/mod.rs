mod dossier;
mod dossier_notification;
mod groupe_instructeur;
mod instructor_procedure;
mod procedure;

#[rustfmt::skip]
pub use {
    dossier::DossierRepo,
    dossier_notification::DossierNotificationRepo,
    groupe_instructeur::GroupeInstructeurRepo,
    instructor_procedure::InstructorProcedureRepo,
    procedure::ProcedureRepo,
};
