//! # Generic Actor Server
//!
//! [`ResourceActor`] owns the entity store, processes client requests one at a time, and
//! drives entity timers. Both client requests and fired timers are applied inside the same
//! sequential loop, so entity state never needs a lock.

use crate::framework::client::ResourceClient;
use crate::framework::entity::ActorEntity;
use crate::framework::error::FrameworkError;
use crate::framework::message::ResourceRequest;
use crate::framework::timer::{Fired, TimerTable};
use std::collections::HashMap;
use tokio::sync::{broadcast, mpsc};
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// A stored entity plus the instant it was created. Timer offsets are measured from it.
struct Slot<T> {
    entity: T,
    created_at: Instant,
}

/// The generic actor that manages a collection of entities.
///
/// # Usage Pattern
///
/// 1. **Create**: `ResourceActor::new()` returns the actor (server) and its client.
/// 2. **Wire**: pass the context into `actor.run(context)`.
/// 3. **Run**: spawn the run loop in a background task.
///
/// # Timers
///
/// After every mutation (create, update, action, fired timer) the actor asks the entity for
/// its [`next_timer`](ActorEntity::next_timer) and arms it, replacing whatever was pending for
/// that entity. Deleting an entity disarms its timer; stopping the actor disarms all of them.
///
/// # Change Feed
///
/// Every resulting entity state is published on a broadcast channel, reachable through
/// [`ResourceClient::subscribe`].
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: HashMap<T::Id, Slot<T>>,
    next_id: u32,
    timers: TimerTable<T::Id, T::Action>,
    fired: mpsc::UnboundedReceiver<Fired<T::Id, T::Action>>,
    changes: broadcast::Sender<T>,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates a new `ResourceActor` and its associated `ResourceClient`.
    ///
    /// `buffer_size` bounds both the request channel and the change feed. A full request
    /// channel makes callers wait; a lagging feed subscriber skips the oldest changes.
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let (changes, _) = broadcast::channel(buffer_size.max(1));
        let (timers, fired) = TimerTable::new();
        let actor = Self {
            receiver,
            store: HashMap::new(),
            next_id: 1,
            timers,
            fired,
            changes: changes.clone(),
        };
        let client = ResourceClient::new(sender, changes);
        (actor, client)
    }

    /// Runs the actor's event loop until every client has been dropped.
    ///
    /// The `context` is handed to every entity hook and to `next_timer`.
    pub async fn run(mut self, context: T::Context) {
        // e.g. "Order" instead of "order_tracker::model::order::Order"
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Actor started");

        loop {
            tokio::select! {
                // Timers that are already due go before newer client requests.
                biased;
                Some(fired) = self.fired.recv() => {
                    self.on_timer(fired, &context, entity_type).await;
                }
                request = self.receiver.recv() => match request {
                    Some(request) => self.on_request(request, &context, entity_type).await,
                    None => break,
                },
            }
        }

        let aborted = self.timers.clear();
        info!(entity_type, size = self.store.len(), aborted, "Shutdown");
    }

    async fn on_request(
        &mut self,
        request: ResourceRequest<T>,
        context: &T::Context,
        entity_type: &str,
    ) {
        match request {
            ResourceRequest::Create { params, respond_to } => {
                debug!(entity_type, ?params, "Create");
                let Some(following) = self.next_id.checked_add(1) else {
                    warn!(entity_type, next_id = self.next_id, "Id space exhausted");
                    let _ = respond_to.send(Err(FrameworkError::IdsExhausted));
                    return;
                };
                let id = T::Id::from(self.next_id);
                self.next_id = following;

                let mut item = match T::from_create_params(id.clone(), params) {
                    Ok(item) => item,
                    Err(e) => {
                        warn!(entity_type, error = %e, "Create failed");
                        let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        return;
                    }
                };
                if let Err(e) = item.on_create(context).await {
                    warn!(entity_type, error = %e, "on_create failed");
                    let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                    return;
                }

                let snapshot = item.clone();
                self.publish(&item);
                self.store.insert(
                    id.clone(),
                    Slot {
                        entity: item,
                        created_at: Instant::now(),
                    },
                );
                self.reschedule(&id, context);
                info!(entity_type, %id, size = self.store.len(), "Created");
                let _ = respond_to.send(Ok(snapshot));
            }
            ResourceRequest::Get { id, respond_to } => {
                let item = self.store.get(&id).map(|slot| slot.entity.clone());
                debug!(entity_type, %id, found = item.is_some(), "Get");
                let _ = respond_to.send(Ok(item));
            }
            ResourceRequest::Update {
                id,
                update,
                respond_to,
            } => {
                debug!(entity_type, %id, ?update, "Update");
                let Some(slot) = self.store.get_mut(&id) else {
                    warn!(entity_type, %id, "Not found");
                    let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                    return;
                };
                if let Err(e) = slot.entity.on_update(update, context).await {
                    warn!(entity_type, %id, error = %e, "Update failed");
                    let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                    return;
                }
                let item = slot.entity.clone();
                self.publish(&item);
                self.reschedule(&id, context);
                info!(entity_type, %id, "Updated");
                let _ = respond_to.send(Ok(item));
            }
            ResourceRequest::Delete { id, respond_to } => {
                debug!(entity_type, %id, "Delete");
                let Some(slot) = self.store.get(&id) else {
                    warn!(entity_type, %id, "Not found");
                    let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                    return;
                };
                if let Err(e) = slot.entity.on_delete(context).await {
                    warn!(entity_type, %id, error = %e, "on_delete failed");
                    let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                    return;
                }
                self.store.remove(&id);
                let disarmed = self.timers.disarm(&id);
                info!(entity_type, %id, disarmed, size = self.store.len(), "Deleted");
                let _ = respond_to.send(Ok(()));
            }
            ResourceRequest::Action {
                id,
                action,
                respond_to,
            } => {
                debug!(entity_type, %id, ?action, "Action");
                let Some(slot) = self.store.get_mut(&id) else {
                    warn!(entity_type, %id, "Not found");
                    let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                    return;
                };
                let result = slot
                    .entity
                    .handle_action(action, context)
                    .await
                    .map_err(|e| FrameworkError::EntityError(Box::new(e)));
                match &result {
                    Ok(_) => {
                        let item = slot.entity.clone();
                        self.publish(&item);
                        self.reschedule(&id, context);
                        info!(entity_type, %id, "Action ok");
                    }
                    Err(e) => warn!(entity_type, %id, error = %e, "Action failed"),
                }
                let _ = respond_to.send(result);
            }
        }
    }

    async fn on_timer(
        &mut self,
        fired: Fired<T::Id, T::Action>,
        context: &T::Context,
        entity_type: &str,
    ) {
        let Fired {
            id,
            generation,
            action,
        } = fired;

        if !self.timers.settle(&id, generation) {
            debug!(entity_type, %id, generation, "Stale timer dropped");
            return;
        }
        let Some(slot) = self.store.get_mut(&id) else {
            debug!(entity_type, %id, "Timer for removed entity dropped");
            return;
        };

        debug!(entity_type, %id, ?action, "Timer fired");
        match slot.entity.handle_action(action, context).await {
            Ok(result) => {
                let item = slot.entity.clone();
                self.publish(&item);
                info!(entity_type, %id, ?result, "Timer action ok");
            }
            Err(e) => warn!(entity_type, %id, error = %e, "Timer action failed"),
        }
        self.reschedule(&id, context);
    }

    /// Arms the entity's next timer, or disarms it when the entity wants none.
    fn reschedule(&mut self, id: &T::Id, context: &T::Context) {
        let Some(slot) = self.store.get(id) else {
            self.timers.disarm(id);
            return;
        };
        match slot.entity.next_timer(context) {
            Some(timer) => {
                let deadline = slot.created_at + timer.after;
                debug!(%id, after = ?timer.after, action = ?timer.action, "Timer armed");
                self.timers.arm(id.clone(), deadline, timer.action);
            }
            None => {
                if self.timers.disarm(id) {
                    debug!(%id, pending = self.timers.len(), "Timer disarmed");
                }
            }
        }
    }

    fn publish(&self, item: &T) {
        // No subscribers is fine.
        let _ = self.changes.send(item.clone());
    }
}
