use async_trait::async_trait;
use dashmap::DashMap;
use domain_notification::{model::entity::Procedure, repository::ProcedureRepo};
use uuid::Uuid;

use crate::exception::StoreException;

#[derive(Debug, Default)]
pub struct MemoryProcedureRepo {
    procedures: DashMap<Uuid, Procedure>,
}

impl MemoryProcedureRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn save(&self, procedure: Procedure) {
        self.procedures.insert(procedure.id, procedure);
    }
}

#[async_trait]
impl ProcedureRepo for MemoryProcedureRepo {
    async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Procedure> {
        self.procedures
            .get(&id)
            .map(|procedure| procedure.clone())
            .ok_or_else(|| StoreException::NotFound { entity: "procedure", id }.into())
    }
}
