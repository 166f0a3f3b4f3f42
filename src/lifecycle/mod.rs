//! # System Lifecycle & Orchestration
//!
//! Starting, wiring and stopping the order tracker.
//!
//! ## The DeliverySystem
//!
//! [`DeliverySystem`] spawns the order actor with its [`DeliverySchedule`] injected as the
//! actor context, owns the order history, and offers the operations a storefront needs:
//! place an order from a checkout, track it, cancel it.
//!
//! ```rust,ignore
//! let config = TrackerConfig::from_env()?;
//! let mut system = DeliverySystem::new(config);
//!
//! let order = system.place_order(&cart, "The Pizza Place", &form).await?;
//! let mut watch = system.order_client.watch(order.order_id.clone());
//! while let Some(order) = watch.next().await {
//!     if order.status.is_terminal() {
//!         break;
//!     }
//! }
//!
//! system.shutdown().await?;
//! ```
//!
//! ## Context Injection
//!
//! The schedule is handed to the actor at `run(context)`, not at construction, so the same
//! actor code runs with production delays or with the short delays tests use:
//!
//! ```rust,ignore
//! impl ActorEntity for Order {
//!     type Context = DeliverySchedule;
//! }
//! ```
//!
//! ## Graceful Shutdown
//!
//! 1. **Drop the client**: closes the sender side of the request channel
//! 2. **Actor detects closure**: `receiver.recv()` returns `None`
//! 3. **Actor cleans up**: aborts every pending timer and logs its final size
//! 4. **Await completion**: the actor task finishes
//!
//! Timer tasks only hold the actor's internal sender, so pending deliveries never keep the
//! actor alive.
//!
//! [`DeliverySchedule`]: crate::order_actor::DeliverySchedule

pub mod delivery_system;
pub mod tracing;

pub use delivery_system::*;
pub use tracing::*;
