use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    exception::NotificationResult,
    model::{
        entity::DossierNotification,
        vo::{BucketStickers, DossierBucket, DossierStickers, NotificationKind, ProcedureStickers},
    },
};

/// Read side of dossier notifications.
///
/// Only displayable notifications are returned, and several `dossier_depose` rows of one
/// dossier count as one.
#[async_trait]
pub trait NotificationQueryService: Send + Sync {
    /// Notifications of one dossier for the instructor, most important first.
    async fn for_instructor_and_dossier(
        &self,
        instructor_id: Uuid,
        dossier_id: Uuid,
    ) -> NotificationResult<Vec<DossierNotification>>;

    /// Notifications of several dossiers, keyed by dossier id.
    async fn for_instructor_and_dossiers(
        &self,
        instructor_id: Uuid,
        dossier_ids: &[Uuid],
    ) -> NotificationResult<HashMap<Uuid, Vec<DossierNotification>>>;

    /// Number of notifications per kind and per procedure, for the procedure badges.
    async fn counts_by_procedure(
        &self,
        group_ids: &[Uuid],
        instructor_id: Uuid,
    ) -> NotificationResult<HashMap<Uuid, BTreeMap<NotificationKind, usize>>>;

    /// Notifications per dashboard tab and kind.
    async fn by_bucket(
        &self,
        group_ids: &[Uuid],
        instructor_id: Uuid,
    ) -> NotificationResult<BTreeMap<DossierBucket, BTreeMap<NotificationKind, Vec<DossierNotification>>>>;

    /// Procedures having news in the "suivis" and "traites" tabs.
    async fn procedure_stickers(
        &self,
        group_ids: &[Uuid],
        instructor_id: Uuid,
    ) -> NotificationResult<ProcedureStickers>;

    /// Whether the "suivis" and "traites" tabs have news.
    async fn bucket_stickers(
        &self,
        group_ids: &[Uuid],
        instructor_id: Uuid,
    ) -> NotificationResult<BucketStickers>;

    /// News flags of the tabs of one dossier.
    async fn dossier_stickers(
        &self,
        instructor_id: Uuid,
        dossier_id: Uuid,
    ) -> NotificationResult<DossierStickers>;

    /// Number of dossiers with news, for the email digest.
    async fn digest_count(&self, group_ids: &[Uuid], instructor_id: Uuid)
        -> NotificationResult<usize>;
}
