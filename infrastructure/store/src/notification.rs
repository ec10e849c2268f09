use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;
use domain_notification::{
    model::{
        entity::{DossierNotification, NotificationKey},
        vo::{ChangeSet, ChangeSummary, NotificationChange, NotificationFilter, Recipient},
    },
    repository::DossierNotificationRepo,
};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::exception::{StoreException, StoreResult};

/// Notification table kept in memory.
///
/// A change set is applied under the write lock and rolled back on the first failing
/// change, so readers only ever see whole change sets.
#[derive(Debug, Default)]
pub struct MemoryDossierNotificationRepo {
    table: RwLock<NotificationTable>,
}

impl MemoryDossierNotificationRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.table.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Insert a row as is, bypassing the unique key.
    ///
    /// Only meant to seed rows written by older code, like duplicated `dossier_depose`.
    pub async fn insert_raw(&self, notification: DossierNotification) {
        self.table.write().await.legacy.push(notification);
    }
}

#[async_trait]
impl DossierNotificationRepo for MemoryDossierNotificationRepo {
    async fn apply(&self, changes: ChangeSet) -> anyhow::Result<ChangeSummary> {
        let mut table = self.table.write().await;
        let mut undo = Vec::new();
        match table.apply(changes, &mut undo) {
            Ok(summary) => Ok(summary),
            Err(e) => {
                table.rollback(undo);
                tracing::warn!("Notification change set rolled back: {e}");
                Err(e.into())
            }
        }
    }

    async fn get_all(
        &self,
        filter: &NotificationFilter,
    ) -> anyhow::Result<Vec<DossierNotification>> {
        let table = self.table.read().await;
        let mut rows: Vec<DossierNotification> = match &filter.dossier_ids {
            Some(dossier_ids) => dossier_ids
                .iter()
                .filter_map(|id| table.by_dossier.get(id))
                .flatten()
                .filter_map(|key| table.rows.get(key))
                .filter(|row| filter.matches(row))
                .cloned()
                .collect(),
            None => table.rows.values().filter(|row| filter.matches(row)).cloned().collect(),
        };
        rows.sort_by_key(DossierNotification::key);
        rows.extend(table.legacy.iter().filter(|row| filter.matches(row)).cloned());
        Ok(rows)
    }
}

#[derive(Debug, Default)]
struct NotificationTable {
    rows: HashMap<NotificationKey, DossierNotification>,
    ids: HashMap<Uuid, NotificationKey>,
    by_dossier: HashMap<Uuid, BTreeSet<NotificationKey>>,
    /// Rows outside the unique key.
    legacy: Vec<DossierNotification>,
}

enum Undo {
    Remove(NotificationKey),
    Restore(DossierNotification),
    RestoreLegacy(Vec<DossierNotification>),
}

impl NotificationTable {
    fn apply(&mut self, changes: ChangeSet, undo: &mut Vec<Undo>) -> StoreResult<ChangeSummary> {
        let mut summary = ChangeSummary::default();
        for change in changes {
            match change {
                NotificationChange::Create(notification) => {
                    if self.create(notification, undo)? {
                        summary.created += 1;
                    }
                }
                NotificationChange::Delete(filter) => {
                    summary.deleted += self.delete(&filter, undo);
                }
                NotificationChange::ReassignGroup { from, to } => {
                    let (moved, merged) = self.reassign_group(from, to, undo);
                    summary.reassigned += moved;
                    summary.deleted += merged;
                }
            }
        }
        Ok(summary)
    }

    fn rollback(&mut self, undo: Vec<Undo>) {
        for step in undo.into_iter().rev() {
            match step {
                Undo::Remove(key) => {
                    self.remove(&key);
                }
                Undo::Restore(row) => self.insert(row),
                Undo::RestoreLegacy(rows) => self.legacy = rows,
            }
        }
    }

    fn create(&mut self, notification: DossierNotification, undo: &mut Vec<Undo>) -> StoreResult<bool> {
        let key = notification.key();
        if self.rows.contains_key(&key) {
            return Ok(false);
        }
        if self.ids.contains_key(&notification.id) {
            return Err(StoreException::IdConflict {
                id: notification.id,
            });
        }
        self.insert(notification);
        undo.push(Undo::Remove(key));
        Ok(true)
    }

    fn delete(&mut self, filter: &NotificationFilter, undo: &mut Vec<Undo>) -> usize {
        let keys = self.matching_keys(filter);
        let mut deleted = 0;
        for key in keys {
            if let Some(row) = self.remove(&key) {
                undo.push(Undo::Restore(row));
                deleted += 1;
            }
        }
        if self.legacy.iter().any(|row| filter.matches(row)) {
            let before = self.legacy.clone();
            self.legacy.retain(|row| !filter.matches(row));
            deleted += before.len() - self.legacy.len();
            undo.push(Undo::RestoreLegacy(before));
        }
        deleted
    }

    /// Returns the number of moved rows and of rows dropped because the target group
    /// already had the same notification.
    fn reassign_group(&mut self, from: Uuid, to: Uuid, undo: &mut Vec<Undo>) -> (usize, usize) {
        let keys: Vec<NotificationKey> = self
            .rows
            .keys()
            .filter(|key| key.recipient == Recipient::Group(from))
            .copied()
            .collect();
        let (mut moved, mut merged) = (0, 0);
        if self.legacy.iter().any(|row| row.recipient == Recipient::Group(from)) {
            undo.push(Undo::RestoreLegacy(self.legacy.clone()));
            for row in self.legacy.iter_mut().filter(|row| row.recipient == Recipient::Group(from)) {
                row.recipient = Recipient::Group(to);
                moved += 1;
            }
        }
        for key in keys {
            let Some(row) = self.remove(&key) else {
                continue;
            };
            undo.push(Undo::Restore(row.clone()));
            let moved_row = DossierNotification {
                recipient: Recipient::Group(to),
                ..row
            };
            let moved_key = moved_row.key();
            if self.rows.contains_key(&moved_key) {
                merged += 1;
            } else {
                self.insert(moved_row);
                undo.push(Undo::Remove(moved_key));
                moved += 1;
            }
        }
        (moved, merged)
    }

    fn matching_keys(&self, filter: &NotificationFilter) -> Vec<NotificationKey> {
        match &filter.dossier_ids {
            Some(dossier_ids) => dossier_ids
                .iter()
                .filter_map(|id| self.by_dossier.get(id))
                .flatten()
                .filter(|key| self.rows.get(*key).is_some_and(|row| filter.matches(row)))
                .copied()
                .collect(),
            None => self
                .rows
                .iter()
                .filter(|(_, row)| filter.matches(row))
                .map(|(key, _)| *key)
                .collect(),
        }
    }

    fn insert(&mut self, row: DossierNotification) {
        let key = row.key();
        self.ids.insert(row.id, key);
        self.by_dossier.entry(row.dossier_id).or_default().insert(key);
        self.rows.insert(key, row);
    }

    fn remove(&mut self, key: &NotificationKey) -> Option<DossierNotification> {
        let row = self.rows.remove(key)?;
        self.ids.remove(&row.id);
        if let Some(keys) = self.by_dossier.get_mut(&row.dossier_id) {
            keys.remove(key);
            if keys.is_empty() {
                self.by_dossier.remove(&row.dossier_id);
            }
        }
        Some(row)
    }
}
