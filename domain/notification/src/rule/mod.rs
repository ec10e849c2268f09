//! Conditions under which a notification kind should exist for a dossier.
//!
//! Every condition reads the dossier as given, so callers must pass live state.

use uuid::Uuid;

use crate::model::{
    entity::{Dossier, DossierState},
    vo::NotificationKind,
};

/// Whether a notification of one kind is due on `dossier` for the instructor.
pub type EligibilityRule = fn(&Dossier, Uuid) -> bool;

/// One rule per kind, in [`NotificationKind::ALL`] order.
pub const RULES: [(NotificationKind, EligibilityRule); 7] = [
    (NotificationKind::DossierDepose, dossier_depose),
    (NotificationKind::DossierModifie, dossier_modifie),
    (NotificationKind::Message, message),
    (NotificationKind::AnnotationInstructeur, annotation_instructeur),
    (NotificationKind::AvisExterne, avis_externe),
    (NotificationKind::AttenteCorrection, attente_correction),
    (NotificationKind::AttenteAvis, attente_avis),
];

pub fn rule(kind: NotificationKind) -> EligibilityRule {
    RULES[kind as usize].1
}

pub fn is_eligible(kind: NotificationKind, dossier: &Dossier, instructor_id: Uuid) -> bool {
    rule(kind)(dossier, instructor_id)
}

fn dossier_depose(dossier: &Dossier, _: Uuid) -> bool {
    dossier.state == DossierState::EnConstruction && dossier.follower_ids.is_empty()
}

fn dossier_modifie(dossier: &Dossier, _: Uuid) -> bool {
    match (dossier.last_champ_updated_at, dossier.depose_at) {
        (Some(updated_at), Some(depose_at)) => updated_at > depose_at,
        _ => false,
    }
}

fn message(dossier: &Dossier, instructor_id: Uuid) -> bool {
    dossier.has_message_to_notify(instructor_id)
}

fn annotation_instructeur(dossier: &Dossier, _: Uuid) -> bool {
    dossier.last_champ_private_updated_at.is_some()
}

fn avis_externe(dossier: &Dossier, _: Uuid) -> bool {
    dossier.has_avis_with_answer()
}

fn attente_correction(dossier: &Dossier, _: Uuid) -> bool {
    dossier.pending_correction
}

fn attente_avis(dossier: &Dossier, _: Uuid) -> bool {
    dossier.has_avis_without_answer()
}
