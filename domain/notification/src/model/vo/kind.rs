use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::exception::NotificationException;

/// Kind of a dossier notification.
///
/// Declaration order is the display rank: the first variant is the most important one,
/// so sorting by kind sorts by importance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// The dossier was submitted and nobody picked it up yet.
    DossierDepose,
    /// The user edited the form after submission.
    DossierModifie,
    /// A message is waiting in the messagerie.
    Message,
    /// A private annotation was updated.
    AnnotationInstructeur,
    /// An expert answered an opinion request.
    AvisExterne,
    /// A correction was requested from the user.
    AttenteCorrection,
    /// An opinion request is still unanswered.
    AttenteAvis,
}

impl NotificationKind {
    pub const ALL: [NotificationKind; 7] = [
        NotificationKind::DossierDepose,
        NotificationKind::DossierModifie,
        NotificationKind::Message,
        NotificationKind::AnnotationInstructeur,
        NotificationKind::AvisExterne,
        NotificationKind::AttenteCorrection,
        NotificationKind::AttenteAvis,
    ];

    /// Kinds shown as "news" stickers and counted in the email digest.
    pub const NEWS: [NotificationKind; 4] = [
        NotificationKind::DossierModifie,
        NotificationKind::Message,
        NotificationKind::AnnotationInstructeur,
        NotificationKind::AvisExterne,
    ];

    pub fn is_news(self) -> bool {
        Self::NEWS.contains(&self)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            NotificationKind::DossierDepose => "dossier_depose",
            NotificationKind::DossierModifie => "dossier_modifie",
            NotificationKind::Message => "message",
            NotificationKind::AnnotationInstructeur => "annotation_instructeur",
            NotificationKind::AvisExterne => "avis_externe",
            NotificationKind::AttenteCorrection => "attente_correction",
            NotificationKind::AttenteAvis => "attente_avis",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NotificationKind {
    type Err = NotificationException;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| NotificationException::UnknownKind { name: s.to_owned() })
    }
}
