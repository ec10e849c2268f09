use async_trait::async_trait;
use uuid::Uuid;

use crate::model::entity::Dossier;

#[async_trait]
pub trait DossierRepo: Send + Sync {
    async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Dossier>;

    /// Unknown ids are skipped.
    async fn get_by_ids(&self, ids: &[Uuid]) -> anyhow::Result<Vec<Dossier>>;

    /// Dossiers assigned to any of the groups.
    async fn get_by_group_ids(&self, group_ids: &[Uuid]) -> anyhow::Result<Vec<Dossier>>;
}
