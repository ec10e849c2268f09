use async_trait::async_trait;
use dashmap::DashMap;
use domain_notification::{model::entity::GroupeInstructeur, repository::GroupeInstructeurRepo};
use uuid::Uuid;

use crate::exception::StoreException;

#[derive(Debug, Default)]
pub struct MemoryGroupeInstructeurRepo {
    groups: DashMap<Uuid, GroupeInstructeur>,
}

impl MemoryGroupeInstructeurRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn save(&self, group: GroupeInstructeur) {
        self.groups.insert(group.id, group);
    }

    pub fn remove_instructor(&self, group_id: Uuid, instructor_id: Uuid) {
        if let Some(mut group) = self.groups.get_mut(&group_id) {
            group.instructor_ids.remove(&instructor_id);
        }
    }
}

#[async_trait]
impl GroupeInstructeurRepo for MemoryGroupeInstructeurRepo {
    async fn get_by_id(&self, id: Uuid) -> anyhow::Result<GroupeInstructeur> {
        self.groups
            .get(&id)
            .map(|group| group.clone())
            .ok_or_else(|| StoreException::NotFound { entity: "groupe instructeur", id }.into())
    }
}
