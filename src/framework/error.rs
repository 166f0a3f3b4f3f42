//! # Framework Errors
//!
//! What a [`ResourceClient`](crate::framework::ResourceClient) call can fail with. Entity
//! hooks report their own error type, which travels boxed inside [`FrameworkError::EntityError`]
//! and is downcast again by the typed clients.

#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    /// The actor has stopped and no longer accepts requests.
    #[error("Actor closed")]
    ActorClosed,
    /// The actor dropped the reply channel before answering.
    #[error("Actor dropped response channel")]
    ActorDropped,
    /// No entity is stored under this id.
    #[error("Item not found: {0}")]
    NotFound(String),
    /// Every id the counter can hand out has been used.
    #[error("Id space exhausted")]
    IdsExhausted,
    #[error("Entity error: {0}")]
    EntityError(Box<dyn std::error::Error + Send + Sync>),
}
