//! # Order Actor
//!
//! The order lifecycle tracker: one [`ResourceActor`] owning every placed order and its
//! single pending timer.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](crate::framework::ActorEntity) implementation for [`Order`]
//! - [`actions`] - [`OrderAction`] (`Advance`, `Cancel`) and [`OrderActionResult`]
//! - [`schedule`] - [`DeliverySchedule`], the per-edge delays injected as the actor context
//! - [`error`] - [`OrderError`]
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Usage
//!
//! ```rust
//! use order_tracker::order_actor::{self, DeliverySchedule};
//! use order_tracker::model::{LineItem, OrderCreate, OrderStatus};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, client) = order_actor::new(32);
//!     tokio::spawn(actor.run(DeliverySchedule::default()));
//!
//!     let params = OrderCreate::new(
//!         vec![LineItem::new("Margherita Pizza", 12.99, 1)],
//!         12.99,
//!         "The Pizza Place",
//!         None,
//!     );
//!     let order = client.create_order(params).await?;
//!     assert_eq!(order.status, OrderStatus::OrderConfirmed);
//!
//!     client.cancel(order.order_id.clone()).await?;
//!     Ok(())
//! }
//! ```

pub mod actions;
pub mod entity;
pub mod error;
pub mod schedule;

pub use actions::*;
pub use entity::OrderUpdate;
pub use error::*;
pub use schedule::*;

use crate::clients::OrderClient;
use crate::framework::ResourceActor;
use crate::model::Order;

/// Creates a new Order actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Order>, OrderClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, OrderClient::new(generic_client))
}
