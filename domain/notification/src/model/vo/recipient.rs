use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::exception::{NotificationException, NotificationResult};

/// Owner of a notification: a single instructor or a whole groupe instructeur.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type", content = "id")]
pub enum Recipient {
    Instructor(Uuid),
    Group(Uuid),
}

impl Recipient {
    /// Build a recipient from the two nullable columns of a stored row.
    pub fn from_parts(
        instructor_id: Option<Uuid>,
        group_id: Option<Uuid>,
    ) -> NotificationResult<Self> {
        match (instructor_id, group_id) {
            (Some(id), None) => Ok(Recipient::Instructor(id)),
            (None, Some(id)) => Ok(Recipient::Group(id)),
            (None, None) => Err(NotificationException::MissingRecipient),
            (Some(instructor_id), Some(group_id)) => {
                Err(NotificationException::AmbiguousRecipient {
                    instructor_id,
                    group_id,
                })
            }
        }
    }

    pub fn instructor_id(&self) -> Option<Uuid> {
        match self {
            Recipient::Instructor(id) => Some(*id),
            Recipient::Group(_) => None,
        }
    }

    pub fn group_id(&self) -> Option<Uuid> {
        match self {
            Recipient::Group(id) => Some(*id),
            Recipient::Instructor(_) => None,
        }
    }

    pub fn is_instructor(&self, instructor_id: Uuid) -> bool {
        self.instructor_id() == Some(instructor_id)
    }

    pub fn is_group(&self) -> bool {
        matches!(self, Recipient::Group(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exactly_one_part() {
        let id = Uuid::new_v4();
        assert_eq!(Recipient::from_parts(Some(id), None).unwrap(), Recipient::Instructor(id));
        assert_eq!(Recipient::from_parts(None, Some(id)).unwrap(), Recipient::Group(id));
        assert!(matches!(
            Recipient::from_parts(None, None),
            Err(NotificationException::MissingRecipient)
        ));
        assert!(matches!(
            Recipient::from_parts(Some(id), Some(Uuid::new_v4())),
            Err(NotificationException::AmbiguousRecipient { instructor_id, .. }) if instructor_id == id
        ));
    }

    #[test]
    fn accessors() {
        let id = Uuid::new_v4();
        let recipient = Recipient::Group(id);
        assert!(recipient.is_group());
        assert_eq!(recipient.group_id(), Some(id));
        assert_eq!(recipient.instructor_id(), None);
        assert!(!recipient.is_instructor(id));
    }
}
