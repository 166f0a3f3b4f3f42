use crate::model::OrderStatus;
use crate::order_actor::OrderError;
use std::time::Duration;

/// When each automatic transition happens, measured from order creation.
///
/// Every offset counts from the moment the order was placed, not from entering the previous
/// state, so the total time to `Delivered` is fixed no matter how late earlier advances
/// were observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeliverySchedule {
    preparing_after: Duration,
    out_for_delivery_after: Duration,
    delivered_after: Duration,
}

impl Default for DeliverySchedule {
    fn default() -> Self {
        Self {
            preparing_after: Duration::from_secs(5),
            out_for_delivery_after: Duration::from_secs(10),
            delivered_after: Duration::from_secs(15),
        }
    }
}

impl DeliverySchedule {
    /// Offsets must be strictly increasing.
    pub fn new(
        preparing_after: Duration,
        out_for_delivery_after: Duration,
        delivered_after: Duration,
    ) -> Result<Self, OrderError> {
        if preparing_after >= out_for_delivery_after || out_for_delivery_after >= delivered_after
        {
            return Err(OrderError::ValidationError(format!(
                "schedule offsets must increase: {preparing_after:?} < {out_for_delivery_after:?} < {delivered_after:?}"
            )));
        }
        Ok(Self {
            preparing_after,
            out_for_delivery_after,
            delivered_after,
        })
    }

    /// Offset from creation at which an order enters `status`.
    /// `None` for the initial state and for `Cancelled`, which no timer produces.
    pub fn offset(&self, status: OrderStatus) -> Option<Duration> {
        match status {
            OrderStatus::PreparingFood => Some(self.preparing_after),
            OrderStatus::OutForDelivery => Some(self.out_for_delivery_after),
            OrderStatus::Delivered => Some(self.delivered_after),
            OrderStatus::OrderConfirmed | OrderStatus::Cancelled => None,
        }
    }

    pub fn delivered_after(&self) -> Duration {
        self.delivered_after
    }
}
