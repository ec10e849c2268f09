mod dossier;
mod dossier_notification;
mod groupe_instructeur;
mod instructor_procedure;
mod procedure;

#[rustfmt::skip]
pub use {
    dossier::{Avis, CommentAuthor, Commentaire, Dossier, DossierState},
    dossier_notification::{DossierNotification, NotificationKey},
    groupe_instructeur::GroupeInstructeur,
    instructor_procedure::InstructorProcedure,
    procedure::Procedure,
};
