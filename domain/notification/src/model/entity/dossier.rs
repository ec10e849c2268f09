use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::vo::DossierBucket;

/// Read-only view of a dossier, limited to what notifications need.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dossier {
    pub id: Uuid,
    pub procedure_id: Uuid,
    pub groupe_instructeur_id: Uuid,
    pub state: DossierState,
    pub archived: bool,
    pub hidden_by_administration: bool,
    /// Submission time.
    pub depose_at: Option<DateTime<Utc>>,
    /// Last update of a public field.
    pub last_champ_updated_at: Option<DateTime<Utc>>,
    /// Last update of a private annotation.
    pub last_champ_private_updated_at: Option<DateTime<Utc>>,
    /// A correction was asked and the user hasn't resolved it yet.
    pub pending_correction: bool,
    /// Instructors currently following the dossier.
    pub follower_ids: BTreeSet<Uuid>,
    pub commentaires: Vec<Commentaire>,
    /// Last time each instructor opened the messagerie.
    pub messagerie_seen_at: BTreeMap<Uuid, DateTime<Utc>>,
    pub avis: Vec<Avis>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DossierState {
    #[default]
    Brouillon,
    EnConstruction,
    EnInstruction,
    Accepte,
    Refuse,
    SansSuite,
}

impl DossierState {
    pub fn is_en_cours(self) -> bool {
        matches!(self, DossierState::EnConstruction | DossierState::EnInstruction)
    }

    pub fn is_termine(self) -> bool {
        matches!(
            self,
            DossierState::Accepte | DossierState::Refuse | DossierState::SansSuite
        )
    }
}

/// A message of the messagerie.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Commentaire {
    pub id: Uuid,
    pub author: CommentAuthor,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type", content = "id")]
pub enum CommentAuthor {
    Usager,
    Instructor(Uuid),
    Expert(Uuid),
}

/// An opinion requested from an expert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Avis {
    pub id: Uuid,
    pub answered_at: Option<DateTime<Utc>>,
}

impl Avis {
    pub fn is_answered(&self) -> bool {
        self.answered_at.is_some()
    }
}

impl Dossier {
    pub fn is_followed_by(&self, instructor_id: Uuid) -> bool {
        self.follower_ids.contains(&instructor_id)
    }

    pub fn is_visible_by_administration(&self) -> bool {
        self.state != DossierState::Brouillon && !self.hidden_by_administration
    }

    /// Messages the instructor hasn't seen, excluding its own.
    pub fn has_message_to_notify(&self, instructor_id: Uuid) -> bool {
        let seen_at = self.messagerie_seen_at.get(&instructor_id);
        self.commentaires.iter().any(|commentaire| {
            commentaire.author != CommentAuthor::Instructor(instructor_id)
                && seen_at.map_or(true, |seen_at| commentaire.created_at > *seen_at)
        })
    }

    pub fn has_avis_with_answer(&self) -> bool {
        self.avis.iter().any(Avis::is_answered)
    }

    pub fn has_avis_without_answer(&self) -> bool {
        self.avis.iter().any(|avis| !avis.is_answered())
    }

    /// Dashboard tab the dossier shows up in for this instructor.
    pub fn bucket(&self, instructor_id: Uuid) -> Option<DossierBucket> {
        if self.archived || !self.is_visible_by_administration() {
            return None;
        }
        if self.state.is_termine() {
            return Some(DossierBucket::Traites);
        }
        if !self.state.is_en_cours() {
            return None;
        }
        if self.follower_ids.is_empty() {
            Some(DossierBucket::ASuivre)
        } else if self.is_followed_by(instructor_id) {
            Some(DossierBucket::Suivis)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    #[test]
    fn buckets() {
        let instructor_id = Uuid::new_v4();
        let mut dossier = Dossier {
            state: DossierState::EnConstruction,
            ..Default::default()
        };
        assert_eq!(dossier.bucket(instructor_id), Some(DossierBucket::ASuivre));

        dossier.follower_ids.insert(Uuid::new_v4());
        assert_eq!(dossier.bucket(instructor_id), None);

        dossier.follower_ids.insert(instructor_id);
        assert_eq!(dossier.bucket(instructor_id), Some(DossierBucket::Suivis));

        dossier.state = DossierState::Refuse;
        assert_eq!(dossier.bucket(instructor_id), Some(DossierBucket::Traites));

        dossier.archived = true;
        assert_eq!(dossier.bucket(instructor_id), None);

        let brouillon = Dossier::default();
        assert_eq!(brouillon.bucket(instructor_id), None);
    }

    #[test]
    fn messages_to_notify() {
        let instructor_id = Uuid::new_v4();
        let now = Utc::now();
        let mut dossier = Dossier {
            commentaires: vec![Commentaire {
                id: Uuid::new_v4(),
                author: CommentAuthor::Instructor(instructor_id),
                created_at: now,
            }],
            ..Default::default()
        };
        assert!(!dossier.has_message_to_notify(instructor_id));

        dossier.commentaires.push(Commentaire {
            id: Uuid::new_v4(),
            author: CommentAuthor::Usager,
            created_at: now,
        });
        assert!(dossier.has_message_to_notify(instructor_id));

        dossier.messagerie_seen_at.insert(instructor_id, now);
        assert!(!dossier.has_message_to_notify(instructor_id));

        dossier.messagerie_seen_at.insert(instructor_id, now - Duration::minutes(1));
        assert!(dossier.has_message_to_notify(instructor_id));
    }

    #[test]
    fn avis_partition() {
        let mut dossier = Dossier::default();
        assert!(!dossier.has_avis_with_answer());
        assert!(!dossier.has_avis_without_answer());

        dossier.avis.push(Avis {
            id: Uuid::new_v4(),
            answered_at: None,
        });
        assert!(dossier.has_avis_without_answer());
        assert!(!dossier.has_avis_with_answer());

        dossier.avis[0].answered_at = Some(Utc::now());
        assert!(dossier.has_avis_with_answer());
        assert!(!dossier.has_avis_without_answer());
    }
}
