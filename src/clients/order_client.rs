//! # Order Client
//!
//! High-level API for the order lifecycle tracker. Wraps a `ResourceClient<Order>` and turns
//! the generic CRUD + Action surface into `create_order`, `steps`, `cancel` and `watch`.

use crate::framework::{ActorClient, FrameworkError, ResourceClient};
use crate::model::{steps, Order, OrderCreate, OrderId, OrderStatus, OrderStep};
use crate::order_actor::{OrderAction, OrderError};
use async_trait::async_trait;
use tokio::sync::broadcast;
use tracing::{debug, info, instrument, warn};

/// Client for interacting with the Order actor.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
}

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>) -> Self {
        Self { inner }
    }

    /// Places an order. It starts in `OrderConfirmed` and its timer chain is already running.
    #[instrument(skip(self, params), fields(restaurant = %params.restaurant_name))]
    pub async fn create_order(&self, params: OrderCreate) -> Result<Order, OrderError> {
        debug!(?params, "create_order called");
        let order = self.inner.create(params).await.map_err(Self::map_error)?;
        info!(order_id = %order.order_id, "Order placed");
        Ok(order)
    }

    #[instrument(skip(self))]
    pub async fn status(&self, id: OrderId) -> Result<Option<OrderStatus>, OrderError> {
        Ok(self.get(id).await?.map(|order| order.status))
    }

    /// The step-indicator projection of the order's current status.
    #[instrument(skip(self))]
    pub async fn steps(&self, id: OrderId) -> Result<Option<[OrderStep; 4]>, OrderError> {
        Ok(self.get(id).await?.map(|order| steps(order.status)))
    }

    /// Cancels the order and drops its pending timer.
    ///
    /// Returns the status afterwards. Terminal orders are left as they are, and an unknown id
    /// yields `Ok(None)`; neither is an error.
    #[instrument(skip(self))]
    pub async fn cancel(&self, id: OrderId) -> Result<Option<OrderStatus>, OrderError> {
        match self.inner.perform_action(id, OrderAction::Cancel).await {
            Ok(result) => Ok(Some(result.status())),
            Err(FrameworkError::NotFound(id)) => {
                debug!(order_id = %id, "Cancel for unknown order ignored");
                Ok(None)
            }
            Err(e) => Err(Self::map_error(e)),
        }
    }

    /// Removes the order from the tracker and aborts its timer.
    /// Returns `false` if there was no such order.
    #[instrument(skip(self))]
    pub async fn discard(&self, id: OrderId) -> Result<bool, OrderError> {
        match self.inner.delete(id).await {
            Ok(()) => Ok(true),
            Err(FrameworkError::NotFound(_)) => Ok(false),
            Err(e) => Err(Self::map_error(e)),
        }
    }

    /// Follows one order's changes from now on.
    pub fn watch(&self, id: OrderId) -> OrderWatch {
        OrderWatch {
            id,
            changes: self.inner.subscribe(),
        }
    }
}

#[async_trait]
impl ActorClient<Order> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &ResourceClient<Order> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e {
            FrameworkError::NotFound(id) => OrderError::NotFound(id),
            FrameworkError::EntityError(inner) => match inner.downcast::<OrderError>() {
                Ok(order_error) => *order_error,
                Err(other) => OrderError::ActorCommunicationError(other.to_string()),
            },
            other => OrderError::ActorCommunicationError(other.to_string()),
        }
    }
}

/// Change stream for a single order.
pub struct OrderWatch {
    id: OrderId,
    changes: broadcast::Receiver<Order>,
}

impl OrderWatch {
    /// Waits for the next state of the watched order.
    ///
    /// Returns `None` once the tracker has shut down. If this watcher fell behind, the
    /// skipped states are lost and the next available one is returned.
    pub async fn next(&mut self) -> Option<Order> {
        loop {
            match self.changes.recv().await {
                Ok(order) if order.order_id == self.id => return Some(order),
                Ok(_) => continue,
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(order_id = %self.id, skipped, "Watcher lagged");
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}
