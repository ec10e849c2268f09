use thiserror::Error;

pub type NotificationResult<T> = Result<T, NotificationException>;

#[derive(Error, Debug)]
pub enum NotificationException {
    #[error("A notification must belong to an instructor or to a groupe instructeur, but neither was given.")]
    MissingRecipient,

    #[error("A notification can't belong both to instructor: {instructor_id} and to groupe instructeur: {group_id}.")]
    AmbiguousRecipient {
        instructor_id: uuid::Uuid,
        group_id: uuid::Uuid,
    },

    #[error("There is no notification kind named: {name}.")]
    UnknownKind { name: String },

    #[error("There is no preference level named: {name}.")]
    UnknownPreferenceLevel { name: String },

    #[error("Notification internal error: {source}")]
    InternalError {
        #[source]
        source: anyhow::Error,
    },
}

impl From<anyhow::Error> for NotificationException {
    fn from(e: anyhow::Error) -> Self {
        NotificationException::InternalError { source: e }
    }
}
