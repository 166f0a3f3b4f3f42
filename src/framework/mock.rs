//! # Mock Clients
//!
//! Test doubles for [`ResourceClient`] that answer requests without running a real
//! [`ResourceActor`](crate::framework::ResourceActor).
//!
//! | | `MockClient` | `create_mock_client` | Real actor |
//! |---|---|---|---|
//! | **Style** | Scripted expectations | Inspect raw requests | Real state |
//! | **Timers** | None | None | Yes |
//! | **Error injection** | `return_err` | Respond with any `Err` | Needs real state |
//!
//! ## Scripted expectations
//!
//! ```rust,ignore
//! let mut mock = MockClient::<Order>::new();
//! mock.expect_get(OrderId::from(1)).return_ok(Some(order));
//! let client = OrderClient::new(mock.client());
//! // ... exercise the client ...
//! mock.verify();
//! ```
//!
//! Expectations are consumed in order. A request that does not match the next expectation
//! (wrong kind or wrong id) is answered with [`FrameworkError::NotFound`] and recorded, and
//! [`MockClient::verify`] reports it.
//!
//! ## Change feed
//!
//! [`MockClient::publish`] pushes an entity onto the client's change feed, as if the actor had
//! just applied a change. Use it to drive watchers.

use crate::framework::client::ResourceClient;
use crate::framework::entity::ActorEntity;
use crate::framework::error::FrameworkError;
use crate::framework::message::ResourceRequest;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::{broadcast, mpsc};

enum Expectation<T: ActorEntity> {
    Get {
        id: T::Id,
        response: Result<Option<T>, FrameworkError>,
    },
    Create {
        response: Result<T, FrameworkError>,
    },
    Delete {
        id: T::Id,
        response: Result<(), FrameworkError>,
    },
    Action {
        id: T::Id,
        response: Result<T::ActionResult, FrameworkError>,
    },
}

struct Script<T: ActorEntity> {
    expected: VecDeque<Expectation<T>>,
    unexpected: Vec<String>,
}

type Shared<T> = Arc<Mutex<Script<T>>>;

fn lock<T: ActorEntity>(script: &Shared<T>) -> MutexGuard<'_, Script<T>> {
    script.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// A mock client with expectation tracking for fluent testing.
pub struct MockClient<T: ActorEntity> {
    client: ResourceClient<T>,
    changes: broadcast::Sender<T>,
    script: Shared<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ActorEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ActorEntity> MockClient<T> {
    /// Creates a new mock client with no expectations. Must be called inside a Tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let (changes, _) = broadcast::channel(100);
        let script: Shared<T> = Arc::new(Mutex::new(Script {
            expected: VecDeque::new(),
            unexpected: Vec::new(),
        }));
        let task_script = script.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let next = lock(&task_script).expected.pop_front();
                if let Some(miss) = answer(request, next) {
                    lock(&task_script).unexpected.push(miss);
                }
            }
        });

        Self {
            client: ResourceClient::new(sender, changes.clone()),
            changes,
            script,
            _handle: handle,
        }
    }

    /// Returns a client wired to this mock.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    /// Expects a `get` for `id`.
    pub fn expect_get(&mut self, id: T::Id) -> GetExpectationBuilder<T> {
        GetExpectationBuilder {
            id,
            script: self.script.clone(),
        }
    }

    /// Expects a `create`.
    pub fn expect_create(&mut self) -> CreateExpectationBuilder<T> {
        CreateExpectationBuilder {
            script: self.script.clone(),
        }
    }

    /// Expects a `delete` for `id`.
    pub fn expect_delete(&mut self, id: T::Id) -> DeleteExpectationBuilder<T> {
        DeleteExpectationBuilder {
            id,
            script: self.script.clone(),
        }
    }

    /// Expects an `action` on `id`.
    pub fn expect_action(&mut self, id: T::Id) -> ActionExpectationBuilder<T> {
        ActionExpectationBuilder {
            id,
            script: self.script.clone(),
        }
    }

    /// Publishes `item` on the change feed. Returns how many subscribers received it.
    pub fn publish(&self, item: T) -> usize {
        self.changes.send(item).unwrap_or(0)
    }

    /// Panics unless every expectation was consumed and no request went unmatched.
    pub fn verify(&self) {
        let script = lock(&self.script);
        if !script.unexpected.is_empty() {
            panic!("Unexpected requests: {:?}", script.unexpected);
        }
        if !script.expected.is_empty() {
            panic!(
                "Not all expectations were met. {} remaining",
                script.expected.len()
            );
        }
    }
}

/// Answers `request` from `next`. Returns a description of the mismatch, if any.
fn answer<T: ActorEntity>(
    request: ResourceRequest<T>,
    next: Option<Expectation<T>>,
) -> Option<String> {
    match (request, next) {
        (ResourceRequest::Get { id, respond_to }, Some(Expectation::Get { id: want, response }))
            if id == want =>
        {
            let _ = respond_to.send(response);
            None
        }
        (ResourceRequest::Create { respond_to, .. }, Some(Expectation::Create { response })) => {
            let _ = respond_to.send(response);
            None
        }
        (
            ResourceRequest::Delete { id, respond_to },
            Some(Expectation::Delete { id: want, response }),
        ) if id == want => {
            let _ = respond_to.send(response);
            None
        }
        (
            ResourceRequest::Action { id, respond_to, .. },
            Some(Expectation::Action { id: want, response }),
        ) if id == want => {
            let _ = respond_to.send(response);
            None
        }
        (request, _) => {
            let (kind, id, reply) = match request {
                ResourceRequest::Get { id, respond_to } => {
                    ("get", id.to_string(), respond_to.send(Err(not_found(&id))).is_ok())
                }
                ResourceRequest::Create { respond_to, .. } => (
                    "create",
                    String::new(),
                    respond_to
                        .send(Err(FrameworkError::NotFound("create".into())))
                        .is_ok(),
                ),
                ResourceRequest::Update { id, respond_to, .. } => {
                    ("update", id.to_string(), respond_to.send(Err(not_found(&id))).is_ok())
                }
                ResourceRequest::Delete { id, respond_to } => {
                    ("delete", id.to_string(), respond_to.send(Err(not_found(&id))).is_ok())
                }
                ResourceRequest::Action { id, respond_to, .. } => {
                    ("action", id.to_string(), respond_to.send(Err(not_found(&id))).is_ok())
                }
            };
            Some(format!("{kind} {id} (answered: {reply})"))
        }
    }
}

fn not_found<Id: std::fmt::Display>(id: &Id) -> FrameworkError {
    FrameworkError::NotFound(id.to_string())
}

/// Builder for `get` expectations.
pub struct GetExpectationBuilder<T: ActorEntity> {
    id: T::Id,
    script: Shared<T>,
}

impl<T: ActorEntity> GetExpectationBuilder<T> {
    pub fn return_ok(self, value: Option<T>) {
        lock(&self.script).expected.push_back(Expectation::Get {
            id: self.id,
            response: Ok(value),
        });
    }

    pub fn return_err(self, error: FrameworkError) {
        lock(&self.script).expected.push_back(Expectation::Get {
            id: self.id,
            response: Err(error),
        });
    }
}

/// Builder for `create` expectations.
pub struct CreateExpectationBuilder<T: ActorEntity> {
    script: Shared<T>,
}

impl<T: ActorEntity> CreateExpectationBuilder<T> {
    pub fn return_ok(self, created: T) {
        lock(&self.script).expected.push_back(Expectation::Create {
            response: Ok(created),
        });
    }

    pub fn return_err(self, error: FrameworkError) {
        lock(&self.script).expected.push_back(Expectation::Create {
            response: Err(error),
        });
    }
}

/// Builder for `delete` expectations.
pub struct DeleteExpectationBuilder<T: ActorEntity> {
    id: T::Id,
    script: Shared<T>,
}

impl<T: ActorEntity> DeleteExpectationBuilder<T> {
    pub fn return_ok(self) {
        lock(&self.script).expected.push_back(Expectation::Delete {
            id: self.id,
            response: Ok(()),
        });
    }

    pub fn return_err(self, error: FrameworkError) {
        lock(&self.script).expected.push_back(Expectation::Delete {
            id: self.id,
            response: Err(error),
        });
    }
}

/// Builder for `action` expectations.
pub struct ActionExpectationBuilder<T: ActorEntity> {
    id: T::Id,
    script: Shared<T>,
}

impl<T: ActorEntity> ActionExpectationBuilder<T> {
    pub fn return_ok(self, result: T::ActionResult) {
        lock(&self.script).expected.push_back(Expectation::Action {
            id: self.id,
            response: Ok(result),
        });
    }

    pub fn return_err(self, error: FrameworkError) {
        lock(&self.script).expected.push_back(Expectation::Action {
            id: self.id,
            response: Err(error),
        });
    }
}

// =============================================================================
// RAW REQUEST HELPERS
// =============================================================================

/// Creates a client and the receiver its requests land on.
///
/// Use this when a test needs to look at the request payload (for example which action a
/// client sent) before choosing the reply.
pub fn create_mock_client<T: ActorEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    let (changes, _) = broadcast::channel(buffer_size.max(1));
    (ResourceClient::new(sender, changes), receiver)
}

/// Waits for the next request and returns it if it is an `Action`.
pub async fn expect_action<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(
    T::Id,
    T::Action,
    tokio::sync::oneshot::Sender<Result<T::ActionResult, FrameworkError>>,
)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action {
            id,
            action,
            respond_to,
        }) => Some((id, action, respond_to)),
        _ => None,
    }
}

/// Waits for the next request and returns it if it is a `Create`.
pub async fn expect_create<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(
    T::Create,
    tokio::sync::oneshot::Sender<Result<T, FrameworkError>>,
)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}
