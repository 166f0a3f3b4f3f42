//! # Entity Timers
//!
//! Delayed, self-directed actions for entities held by a [`ResourceActor`](crate::framework::ResourceActor).
//!
//! A timer task never touches entity state. It sleeps until its deadline and then posts a
//! [`Fired`] message back to the owning actor, which applies the action inside its normal
//! sequential loop. Each armed timer carries a generation number; arming a new timer for the
//! same entity aborts the old task and bumps the generation, so a message that was already in
//! flight is recognised as stale and dropped.
//!
//! Timer tasks hold only the internal sender. They never keep the client-facing channel
//! open, so dropping every client still shuts the actor down.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// A delayed action requested by an entity.
#[derive(Debug, Clone, PartialEq)]
pub struct Timer<A> {
    /// Offset from the entity's creation instant.
    pub after: Duration,
    pub action: A,
}

impl<A> Timer<A> {
    pub fn new(after: Duration, action: A) -> Self {
        Self { after, action }
    }
}

/// Message posted by a timer task once its deadline passes.
#[derive(Debug)]
pub(crate) struct Fired<Id, A> {
    pub id: Id,
    pub generation: u64,
    pub action: A,
}

struct Armed {
    generation: u64,
    handle: JoinHandle<()>,
}

/// At most one pending timer per entity id.
pub(crate) struct TimerTable<Id, A> {
    armed: HashMap<Id, Armed>,
    next_generation: u64,
    sender: mpsc::UnboundedSender<Fired<Id, A>>,
}

impl<Id, A> TimerTable<Id, A>
where
    Id: Eq + Hash + Clone + Send + Debug + 'static,
    A: Send + 'static,
{
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Fired<Id, A>>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let table = Self {
            armed: HashMap::new(),
            next_generation: 1,
            sender,
        };
        (table, receiver)
    }

    /// Arms a timer for `id`, replacing (and aborting) any timer already pending for it.
    /// Returns the generation of the new timer.
    pub fn arm(&mut self, id: Id, deadline: Instant, action: A) -> u64 {
        self.disarm(&id);

        let generation = self.next_generation;
        self.next_generation += 1;

        let sender = self.sender.clone();
        let fired_id = id.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            // The actor may already be gone; nothing left to notify then.
            let _ = sender.send(Fired {
                id: fired_id,
                generation,
                action,
            });
        });

        self.armed.insert(id, Armed { generation, handle });
        generation
    }

    /// Aborts the pending timer for `id`. Returns whether one was pending.
    pub fn disarm(&mut self, id: &Id) -> bool {
        match self.armed.remove(id) {
            Some(armed) => {
                armed.handle.abort();
                true
            }
            None => false,
        }
    }

    /// Consumes the pending slot for `id` if `generation` is still the current one.
    ///
    /// Returns `false` for a stale message: the timer was re-armed or disarmed after
    /// this message had already been sent.
    pub fn settle(&mut self, id: &Id, generation: u64) -> bool {
        match self.armed.get(id) {
            Some(armed) if armed.generation == generation => {
                self.armed.remove(id);
                true
            }
            _ => false,
        }
    }

    /// Aborts every pending timer. Returns how many were aborted.
    pub fn clear(&mut self) -> usize {
        let count = self.armed.len();
        for (_, armed) in self.armed.drain() {
            armed.handle.abort();
        }
        count
    }

    #[cfg(test)]
    pub fn is_armed(&self, id: &Id) -> bool {
        self.armed.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.armed.len()
    }
}

impl<Id, A> Drop for TimerTable<Id, A> {
    fn drop(&mut self) {
        for (_, armed) in self.armed.drain() {
            armed.handle.abort();
        }
    }
}
