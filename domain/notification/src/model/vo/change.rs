use std::collections::BTreeSet;

use uuid::Uuid;

use super::{NotificationKind, Recipient};
use crate::model::entity::DossierNotification;

/// Selects stored notifications.
///
/// `None` criteria match everything; an empty set matches nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationFilter {
    pub dossier_ids: Option<BTreeSet<Uuid>>,
    pub kinds: Option<BTreeSet<NotificationKind>>,
    pub recipient: Option<Recipient>,
}

impl NotificationFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn dossier(dossier_id: Uuid) -> Self {
        Self::dossiers([dossier_id])
    }

    pub fn dossiers(dossier_ids: impl IntoIterator<Item = Uuid>) -> Self {
        Self {
            dossier_ids: Some(dossier_ids.into_iter().collect()),
            ..Default::default()
        }
    }

    pub fn kind(self, kind: NotificationKind) -> Self {
        self.kinds([kind])
    }

    pub fn kinds(mut self, kinds: impl IntoIterator<Item = NotificationKind>) -> Self {
        self.kinds = Some(kinds.into_iter().collect());
        self
    }

    pub fn recipient(mut self, recipient: Recipient) -> Self {
        self.recipient = Some(recipient);
        self
    }

    pub fn instructor(self, instructor_id: Uuid) -> Self {
        self.recipient(Recipient::Instructor(instructor_id))
    }

    pub fn matches(&self, notification: &DossierNotification) -> bool {
        self.dossier_ids
            .as_ref()
            .map_or(true, |ids| ids.contains(&notification.dossier_id))
            && self.kinds.as_ref().map_or(true, |kinds| kinds.contains(&notification.kind))
            && self.recipient.map_or(true, |recipient| recipient == notification.recipient)
    }

    /// Whether the filter can't match anything.
    pub fn is_void(&self) -> bool {
        self.dossier_ids.as_ref().is_some_and(BTreeSet::is_empty)
            || self.kinds.as_ref().is_some_and(BTreeSet::is_empty)
    }
}

/// One write against the notification table.
#[derive(Debug, Clone, PartialEq)]
pub enum NotificationChange {
    /// Insert unless a row with the same unique key exists.
    Create(DossierNotification),
    /// Delete every matching row.
    Delete(NotificationFilter),
    /// Re-point every row of group `from` to group `to`.
    ReassignGroup { from: Uuid, to: Uuid },
}

/// Writes applied by the store in a single transaction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChangeSet {
    changes: Vec<NotificationChange>,
}

impl ChangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&mut self, notification: DossierNotification) -> &mut Self {
        self.changes.push(NotificationChange::Create(notification));
        self
    }

    pub fn delete(&mut self, filter: NotificationFilter) -> &mut Self {
        if !filter.is_void() {
            self.changes.push(NotificationChange::Delete(filter));
        }
        self
    }

    pub fn reassign_group(&mut self, from: Uuid, to: Uuid) -> &mut Self {
        if from != to {
            self.changes.push(NotificationChange::ReassignGroup { from, to });
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn changes(&self) -> &[NotificationChange] {
        &self.changes
    }
}

impl IntoIterator for ChangeSet {
    type Item = NotificationChange;
    type IntoIter = std::vec::IntoIter<NotificationChange>;

    fn into_iter(self) -> Self::IntoIter {
        self.changes.into_iter()
    }
}

/// What a change set did once applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChangeSummary {
    pub created: usize,
    pub deleted: usize,
    pub reassigned: usize,
}

impl ChangeSummary {
    pub fn is_noop(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn notification(dossier_id: Uuid, kind: NotificationKind, recipient: Recipient) -> DossierNotification {
        DossierNotification::new(dossier_id, kind, recipient, Utc::now())
    }

    #[test]
    fn filter_criteria() {
        let dossier_id = Uuid::new_v4();
        let instructor_id = Uuid::new_v4();
        let row = notification(dossier_id, NotificationKind::Message, Recipient::Instructor(instructor_id));

        assert!(NotificationFilter::all().matches(&row));
        assert!(NotificationFilter::dossier(dossier_id)
            .kind(NotificationKind::Message)
            .instructor(instructor_id)
            .matches(&row));
        assert!(!NotificationFilter::dossier(dossier_id)
            .kind(NotificationKind::AvisExterne)
            .matches(&row));
        assert!(!NotificationFilter::all()
            .recipient(Recipient::Group(instructor_id))
            .matches(&row));
        assert!(!NotificationFilter::dossiers([]).matches(&row));
    }

    #[test]
    fn void_changes_are_skipped() {
        let mut changes = ChangeSet::new();
        let group_id = Uuid::new_v4();
        changes
            .delete(NotificationFilter::dossiers([]))
            .delete(NotificationFilter::all().kinds([]))
            .reassign_group(group_id, group_id);
        assert!(changes.is_empty());

        changes.delete(NotificationFilter::dossier(Uuid::new_v4()));
        assert_eq!(changes.len(), 1);
    }
}
