use crate::checkout::{Cart, CheckoutError, CheckoutForm};
use crate::clients::OrderClient;
use crate::config::TrackerConfig;
use crate::framework::ActorClient;
use crate::history::OrderHistory;
use crate::model::{steps, Order, OrderId, OrderStatus, OrderStep};
use crate::order_actor::OrderError;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error, info, instrument};

/// Errors from placing an order end to end.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum DeliveryError {
    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    #[error(transparent)]
    Order(#[from] OrderError),
}

/// An order together with its step indicator, as the tracking view shows it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackedOrder {
    pub order: Order,
    pub steps: [OrderStep; 4],
}

impl From<Order> for TrackedOrder {
    fn from(order: Order) -> Self {
        let steps = steps(order.status);
        Self { order, steps }
    }
}

/// The runtime orchestrator for the delivery tracker.
///
/// `DeliverySystem` is responsible for:
/// - **Lifecycle Management**: starting the order actor with its delivery schedule and
///   stopping it again
/// - **Checkout**: turning a validated cart and form into a placed order
/// - **History**: keeping the newest-first list of orders in sync with live status
///
/// # Example
///
/// ```ignore
/// let mut system = DeliverySystem::new(TrackerConfig::from_env()?);
///
/// let order = system.place_order(&cart, "The Pizza Place", &form).await?;
/// let tracked = system.track(order.order_id.clone()).await?;
///
/// system.shutdown().await?;
/// ```
pub struct DeliverySystem {
    /// Client for interacting with the Order actor
    pub order_client: OrderClient,

    history: OrderHistory,
    estimated_delivery: String,

    /// Task handle for the order actor (used for graceful shutdown)
    handle: tokio::task::JoinHandle<()>,
}

impl DeliverySystem {
    /// Spawns the order actor and returns a system ready to take orders.
    ///
    /// Must be called inside a Tokio runtime. The history starts with the sample past orders.
    pub fn new(config: TrackerConfig) -> Self {
        let (order_actor, order_client) = crate::order_actor::new(config.channel_capacity);
        let handle = tokio::spawn(order_actor.run(config.schedule));

        Self {
            order_client,
            history: OrderHistory::seeded(),
            estimated_delivery: config.estimated_delivery,
            handle,
        }
    }

    /// Validates the checkout, places the order and records it in the history.
    #[instrument(skip(self, cart, form))]
    pub async fn place_order(
        &mut self,
        cart: &Cart,
        restaurant_name: &str,
        form: &CheckoutForm,
    ) -> Result<Order, DeliveryError> {
        let params = form
            .submit(cart, restaurant_name)?
            .with_estimated_delivery(self.estimated_delivery.clone());
        let order = self.order_client.create_order(params).await?;
        info!(
            order_id = %order.order_id,
            total = order.total_amount,
            "Order Placed Successfully"
        );
        self.history.upsert(order.clone());
        Ok(order)
    }

    /// Live order and steps, or the history entry for orders the tracker does not hold.
    #[instrument(skip(self))]
    pub async fn track(&self, id: OrderId) -> Result<Option<TrackedOrder>, OrderError> {
        if let Some(order) = self.order_client.get(id.clone()).await? {
            return Ok(Some(order.into()));
        }
        debug!(order_id = %id, "Not tracked, looking in history");
        Ok(self.history.find(&id).cloned().map(TrackedOrder::from))
    }

    /// Cancels the order and updates its history entry.
    #[instrument(skip(self))]
    pub async fn cancel(&mut self, id: OrderId) -> Result<Option<OrderStatus>, OrderError> {
        let status = self.order_client.cancel(id.clone()).await?;
        if let Some(order) = self.order_client.get(id).await? {
            self.history.replace(order);
        }
        Ok(status)
    }

    /// Re-reads live status for every history entry the tracker still holds.
    /// Returns how many entries were refreshed.
    #[instrument(skip(self))]
    pub async fn refresh_history(&mut self) -> Result<usize, OrderError> {
        let ids: Vec<OrderId> = self.history.iter().map(|o| o.order_id.clone()).collect();
        let mut refreshed = 0;
        for id in ids {
            if let Some(order) = self.order_client.get(id).await? {
                refreshed += usize::from(self.history.replace(order));
            }
        }
        debug!(refreshed, "History refreshed");
        Ok(refreshed)
    }

    pub fn history(&self) -> &OrderHistory {
        &self.history
    }

    /// Gracefully shuts down the system.
    ///
    /// Drops the client, which closes the actor's channel, then waits for the actor task.
    /// The actor aborts every pending timer on its way out, so this does not wait for
    /// in-flight deliveries.
    ///
    /// Returns `Err` if the actor task panicked. Other clones of the order client keep the
    /// actor alive, so drop them first.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");

        // Dropping the last sender makes the actor's `recv()` return `None`.
        drop(self.order_client);

        if let Err(e) = self.handle.await {
            error!("Actor task failed: {:?}", e);
            return Err(format!("Actor task failed: {:?}", e));
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
