use async_trait::async_trait;
use uuid::Uuid;

use crate::model::entity::Procedure;

#[async_trait]
pub trait ProcedureRepo: Send + Sync {
    async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Procedure>;
}
