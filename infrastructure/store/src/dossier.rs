use async_trait::async_trait;
use dashmap::DashMap;
use domain_notification::{model::entity::Dossier, repository::DossierRepo};
use uuid::Uuid;

use crate::exception::StoreException;

#[derive(Debug, Default)]
pub struct MemoryDossierRepo {
    dossiers: DashMap<Uuid, Dossier>,
}

impl MemoryDossierRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn save(&self, dossier: Dossier) {
        self.dossiers.insert(dossier.id, dossier);
    }

    /// Change a stored dossier in place. Returns false when it doesn't exist.
    pub fn update(&self, id: Uuid, f: impl FnOnce(&mut Dossier)) -> bool {
        match self.dossiers.get_mut(&id) {
            Some(mut dossier) => {
                f(dossier.value_mut());
                true
            }
            None => false,
        }
    }
}

#[async_trait]
impl DossierRepo for MemoryDossierRepo {
    async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Dossier> {
        self.dossiers
            .get(&id)
            .map(|dossier| dossier.clone())
            .ok_or_else(|| StoreException::NotFound { entity: "dossier", id }.into())
    }

    async fn get_by_ids(&self, ids: &[Uuid]) -> anyhow::Result<Vec<Dossier>> {
        Ok(ids
            .iter()
            .filter_map(|id| self.dossiers.get(id).map(|dossier| dossier.clone()))
            .collect())
    }

    async fn get_by_group_ids(&self, group_ids: &[Uuid]) -> anyhow::Result<Vec<Dossier>> {
        let mut dossiers: Vec<Dossier> = self
            .dossiers
            .iter()
            .filter(|dossier| group_ids.contains(&dossier.groupe_instructeur_id))
            .map(|dossier| dossier.clone())
            .collect();
        dossiers.sort_by_key(|dossier| dossier.id);
        Ok(dossiers)
    }
}
