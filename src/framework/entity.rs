//! # ActorEntity Trait
//!
//! The contract every resource managed by a [`ResourceActor`](crate::framework::ResourceActor)
//! implements. Associated types pin down the id, the DTOs, the custom actions, the injected
//! context and the error type, so an `Order` actor can only ever receive order payloads.
//!
//! Besides the CRUD hooks, an entity can ask its actor to fire one of its own actions later
//! through [`ActorEntity::next_timer`]. The actor keeps at most one pending timer per entity
//! and re-evaluates `next_timer` after every mutation.

use crate::framework::timer::Timer;
use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any resource entity must implement to be managed by `ResourceActor`.
///
/// # Async & Context
/// Hooks are `async` so they can await other actors. The `Context` type is injected into
/// every hook by [`ResourceActor::run`](crate::framework::ResourceActor::run) rather than at
/// construction time, so dependencies and settings can be wired after the actor exists.
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// The unique identifier for this entity.
    /// Must be convertible from `u32` for automatic ID generation.
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug + From<u32> + 'static;

    /// The data required to create a new instance.
    type Create: Send + Sync + Debug;

    /// The data required to update an existing instance.
    type Update: Send + Sync + Debug;

    /// Resource-specific operations. Timer-driven actions use the same type.
    type Action: Send + Sync + Debug + 'static;

    /// The result type returned by custom actions.
    type ActionResult: Send + Sync + Debug;

    /// The runtime context injected into the actor. Use `()` if nothing is needed.
    type Context: Send + Sync;

    /// One error enum for the whole entity.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Construct the full entity from the ID and payload.
    /// Called synchronously before `on_create`.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    // --- Lifecycle Hooks (Async) ---

    /// Called right after the entity is constructed, before it is stored.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called when an update request is received.
    async fn on_update(
        &mut self,
        update: Self::Update,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Called immediately before the entity is removed from the store.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    // --- Action Handler (Async) ---

    /// Handle a resource-specific action, whether sent by a client or fired by a timer.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        _ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;

    // --- Scheduling ---

    /// The action this entity wants fired on its own, if any.
    ///
    /// [`Timer::after`] is measured from the entity's creation instant, not from now.
    /// Returning `None` disarms whatever timer is pending for the entity.
    fn next_timer(&self, _ctx: &Self::Context) -> Option<Timer<Self::Action>> {
        None
    }
}
