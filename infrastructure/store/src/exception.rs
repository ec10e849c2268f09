use uuid::Uuid;

pub type StoreResult<T> = Result<T, StoreException>;

#[derive(Debug, thiserror::Error)]
pub enum StoreException {
    #[error("Notification with id: {id} already exists under another unique key.")]
    IdConflict { id: Uuid },

    #[error("There is no {entity} with id: {id}.")]
    NotFound { entity: &'static str, id: Uuid },
}
