use std::{
    collections::{BTreeMap, HashMap, HashSet},
    sync::Arc,
};

use async_trait::async_trait;
use domain_notification::{
    exception::NotificationResult,
    model::{
        entity::{Dossier, DossierNotification},
        vo::{
            BucketStickers, DossierBucket, DossierStickers, NotificationFilter, NotificationKind,
            ProcedureStickers, Recipient,
        },
    },
    repository::{DossierNotificationRepo, DossierRepo},
    service::{Clock, NotificationQueryService},
};
use typed_builder::TypedBuilder;
use uuid::Uuid;

#[derive(TypedBuilder)]
pub struct NotificationQueryServiceImpl {
    notification_repo: Arc<dyn DossierNotificationRepo>,
    dossier_repo: Arc<dyn DossierRepo>,
    clock: Arc<dyn Clock>,
}

#[async_trait]
impl NotificationQueryService for NotificationQueryServiceImpl {
    async fn for_instructor_and_dossier(
        &self,
        instructor_id: Uuid,
        dossier_id: Uuid,
    ) -> NotificationResult<Vec<DossierNotification>> {
        let dossier = self.dossier_repo.get_by_id(dossier_id).await?;
        if dossier.archived {
            return Ok(vec![]);
        }
        let group = Recipient::Group(dossier.groupe_instructeur_id);
        let now = self.clock.now();
        let notifications = self
            .notification_repo
            .get_all(&NotificationFilter::dossier(dossier_id))
            .await?
            .into_iter()
            .filter(|n| n.is_displayable(now))
            .filter(|n| n.recipient == group || n.recipient.is_instructor(instructor_id))
            .collect();
        Ok(sort_by_importance(unify_dossier_depose(notifications)))
    }

    async fn for_instructor_and_dossiers(
        &self,
        instructor_id: Uuid,
        dossier_ids: &[Uuid],
    ) -> NotificationResult<HashMap<Uuid, Vec<DossierNotification>>> {
        let live_ids = self
            .dossier_repo
            .get_by_ids(dossier_ids)
            .await?
            .into_iter()
            .filter(|dossier| !dossier.archived)
            .map(|dossier| dossier.id);
        let now = self.clock.now();
        let notifications = self
            .notification_repo
            .get_all(&NotificationFilter::dossiers(live_ids))
            .await?
            .into_iter()
            .filter(|n| n.is_displayable(now))
            .filter(|n| n.recipient.is_group() || n.recipient.is_instructor(instructor_id));

        Ok(group_by_dossier(notifications)
            .into_iter()
            .map(|(dossier_id, notifications)| {
                (dossier_id, sort_by_importance(unify_dossier_depose(notifications)))
            })
            .collect())
    }

    async fn counts_by_procedure(
        &self,
        group_ids: &[Uuid],
        instructor_id: Uuid,
    ) -> NotificationResult<HashMap<Uuid, BTreeMap<NotificationKind, usize>>> {
        let dossiers: Vec<Dossier> = self
            .dossier_repo
            .get_by_group_ids(group_ids)
            .await?
            .into_iter()
            .filter(|dossier| dossier.is_visible_by_administration() && !dossier.archived)
            .collect();
        let mut by_dossier = self.scoped(&dossiers, group_ids, instructor_id).await?;

        let mut counts: HashMap<Uuid, BTreeMap<NotificationKind, usize>> = HashMap::new();
        for dossier in &dossiers {
            let procedure_counts = counts.entry(dossier.procedure_id).or_default();
            for notification in by_dossier.remove(&dossier.id).unwrap_or_default() {
                *procedure_counts.entry(notification.kind).or_default() += 1;
            }
        }
        Ok(counts)
    }

    async fn by_bucket(
        &self,
        group_ids: &[Uuid],
        instructor_id: Uuid,
    ) -> NotificationResult<BTreeMap<DossierBucket, BTreeMap<NotificationKind, Vec<DossierNotification>>>>
    {
        let dossiers = self.dossier_repo.get_by_group_ids(group_ids).await?;
        let mut by_dossier = self.scoped(&dossiers, group_ids, instructor_id).await?;

        let mut buckets: BTreeMap<DossierBucket, BTreeMap<NotificationKind, Vec<DossierNotification>>> =
            BTreeMap::new();
        for dossier in &dossiers {
            let Some(bucket) = dossier.bucket(instructor_id) else {
                continue;
            };
            let Some(notifications) = by_dossier.remove(&dossier.id) else {
                continue;
            };
            let by_kind = buckets.entry(bucket).or_default();
            for notification in notifications {
                by_kind.entry(notification.kind).or_default().push(notification);
            }
        }
        Ok(buckets)
    }

    async fn procedure_stickers(
        &self,
        group_ids: &[Uuid],
        instructor_id: Uuid,
    ) -> NotificationResult<ProcedureStickers> {
        let dossiers = self.dossier_repo.get_by_group_ids(group_ids).await?;
        let with_news = self.with_news(&dossiers, instructor_id).await?;

        let mut stickers = ProcedureStickers::default();
        for dossier in dossiers.iter().filter(|dossier| with_news.contains(&dossier.id)) {
            match dossier.bucket(instructor_id) {
                Some(DossierBucket::Suivis) => {
                    stickers.followed.insert(dossier.procedure_id);
                }
                Some(DossierBucket::Traites) => {
                    stickers.treated.insert(dossier.procedure_id);
                }
                _ => {}
            }
        }
        Ok(stickers)
    }

    async fn bucket_stickers(
        &self,
        group_ids: &[Uuid],
        instructor_id: Uuid,
    ) -> NotificationResult<BucketStickers> {
        let dossiers = self.dossier_repo.get_by_group_ids(group_ids).await?;
        let with_news = self.with_news(&dossiers, instructor_id).await?;

        let buckets: HashSet<DossierBucket> = dossiers
            .iter()
            .filter(|dossier| with_news.contains(&dossier.id))
            .filter_map(|dossier| dossier.bucket(instructor_id))
            .collect();
        Ok(BucketStickers {
            followed: buckets.contains(&DossierBucket::Suivis),
            treated: buckets.contains(&DossierBucket::Traites),
        })
    }

    async fn dossier_stickers(
        &self,
        instructor_id: Uuid,
        dossier_id: Uuid,
    ) -> NotificationResult<DossierStickers> {
        let dossier = self.dossier_repo.get_by_id(dossier_id).await?;
        if dossier.archived {
            return Ok(DossierStickers::default());
        }
        let now = self.clock.now();
        let kinds: HashSet<NotificationKind> = self
            .notification_repo
            .get_all(&NotificationFilter::dossier(dossier_id).instructor(instructor_id))
            .await?
            .into_iter()
            .filter(|n| n.is_displayable(now))
            .map(|n| n.kind)
            .collect();

        Ok(DossierStickers {
            fields_modified: kinds.contains(&NotificationKind::DossierModifie),
            private_annotations: kinds.contains(&NotificationKind::AnnotationInstructeur),
            external_opinion: kinds.contains(&NotificationKind::AvisExterne),
            messages: kinds.contains(&NotificationKind::Message),
        })
    }

    async fn digest_count(
        &self,
        group_ids: &[Uuid],
        instructor_id: Uuid,
    ) -> NotificationResult<usize> {
        let dossiers: Vec<Dossier> = self
            .dossier_repo
            .get_by_group_ids(group_ids)
            .await?
            .into_iter()
            .filter(|dossier| dossier.is_visible_by_administration() && !dossier.archived)
            .collect();
        Ok(self.with_news(&dossiers, instructor_id).await?.len())
    }
}

impl NotificationQueryServiceImpl {
    /// Displayable notifications of the dossiers owned by one of the groups or by the
    /// instructor, keyed by dossier.
    async fn scoped(
        &self,
        dossiers: &[Dossier],
        group_ids: &[Uuid],
        instructor_id: Uuid,
    ) -> NotificationResult<HashMap<Uuid, Vec<DossierNotification>>> {
        let now = self.clock.now();
        let notifications = self
            .notification_repo
            .get_all(&NotificationFilter::dossiers(dossiers.iter().map(|d| d.id)))
            .await?
            .into_iter()
            .filter(|n| n.is_displayable(now))
            .filter(|n| match n.recipient {
                Recipient::Group(id) => group_ids.contains(&id),
                Recipient::Instructor(id) => id == instructor_id,
            });

        Ok(group_by_dossier(notifications)
            .into_iter()
            .map(|(dossier_id, notifications)| (dossier_id, unify_dossier_depose(notifications)))
            .collect())
    }

    /// Ids of the dossiers with a displayable news notification for the instructor.
    async fn with_news(
        &self,
        dossiers: &[Dossier],
        instructor_id: Uuid,
    ) -> NotificationResult<HashSet<Uuid>> {
        let now = self.clock.now();
        let filter = NotificationFilter::dossiers(dossiers.iter().map(|d| d.id))
            .kinds(NotificationKind::NEWS)
            .instructor(instructor_id);
        Ok(self
            .notification_repo
            .get_all(&filter)
            .await?
            .into_iter()
            .filter(|n| n.is_displayable(now))
            .map(|n| n.dossier_id)
            .collect())
    }
}

/// Keep a single `dossier_depose` notification per dossier.
///
/// Older code wrote one `dossier_depose` per groupe instructeur and newer code one per
/// instructor, so a dossier may carry both until the old rows are gone.
pub fn unify_dossier_depose(notifications: Vec<DossierNotification>) -> Vec<DossierNotification> {
    let mut seen = HashSet::new();
    notifications
        .into_iter()
        .filter(|n| n.kind != NotificationKind::DossierDepose || seen.insert(n.dossier_id))
        .collect()
}

fn sort_by_importance(mut notifications: Vec<DossierNotification>) -> Vec<DossierNotification> {
    notifications.sort_by_key(|n| n.kind);
    notifications
}

fn group_by_dossier(
    notifications: impl IntoIterator<Item = DossierNotification>,
) -> HashMap<Uuid, Vec<DossierNotification>> {
    let mut by_dossier: HashMap<Uuid, Vec<DossierNotification>> = HashMap::new();
    for notification in notifications {
        by_dossier.entry(notification.dossier_id).or_default().push(notification);
    }
    by_dossier
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn notification(dossier_id: Uuid, kind: NotificationKind) -> DossierNotification {
        DossierNotification::new(dossier_id, kind, Recipient::Group(Uuid::new_v4()), Utc::now())
    }

    #[test]
    fn unify_keeps_first_dossier_depose_per_dossier() {
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        let first = notification(a, NotificationKind::DossierDepose);
        let notifications = vec![
            first.clone(),
            notification(a, NotificationKind::Message),
            notification(a, NotificationKind::DossierDepose),
            notification(b, NotificationKind::DossierDepose),
        ];

        let unified = unify_dossier_depose(notifications);
        assert_eq!(unified.len(), 3);
        assert_eq!(unified[0], first);
        assert_eq!(
            unified
                .iter()
                .filter(|n| n.kind == NotificationKind::DossierDepose)
                .count(),
            2
        );
    }

    #[test]
    fn sort_is_by_kind_rank() {
        let dossier_id = Uuid::new_v4();
        let sorted = sort_by_importance(vec![
            notification(dossier_id, NotificationKind::AttenteAvis),
            notification(dossier_id, NotificationKind::DossierDepose),
            notification(dossier_id, NotificationKind::Message),
        ]);
        let kinds: Vec<_> = sorted.iter().map(|n| n.kind).collect();
        assert_eq!(
            kinds,
            vec![
                NotificationKind::DossierDepose,
                NotificationKind::Message,
                NotificationKind::AttenteAvis
            ]
        );
    }
}
