use crate::types::AlertId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: AlertId },

    #[error("Unauthorized: {0}")]
    Unauthorized(String),
}
