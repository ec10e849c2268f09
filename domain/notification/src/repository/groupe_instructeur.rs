use async_trait::async_trait;
use uuid::Uuid;

use crate::model::entity::GroupeInstructeur;

#[async_trait]
pub trait GroupeInstructeurRepo: Send + Sync {
    async fn get_by_id(&self, id: Uuid) -> anyhow::Result<GroupeInstructeur>;
}
