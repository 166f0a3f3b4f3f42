//! # Generic Messages
//!
//! Requests a [`ResourceClient`](crate::framework::ResourceClient) sends to its
//! [`ResourceActor`](crate::framework::ResourceActor). Timer messages travel on a separate
//! internal channel and are not part of this enum, so clients cannot forge them.

use crate::framework::entity::ActorEntity;
use crate::framework::error::FrameworkError;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Client request to an actor.
///
/// The variants are the CRUD lifecycle plus `Action` for resource-specific operations.
/// Generic over `T: ActorEntity`, so the payload types are fixed by the entity.
#[derive(Debug)]
pub enum ResourceRequest<T: ActorEntity> {
    /// Answered with the entity as stored, before any timer can move it on.
    Create {
        params: T::Create,
        respond_to: Response<T>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
}
