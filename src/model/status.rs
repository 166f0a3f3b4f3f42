use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Where an order is in its lifecycle.
///
/// The happy path is a total order:
/// `OrderConfirmed → PreparingFood → OutForDelivery → Delivered`.
/// `Cancelled` is reachable from any non-terminal state by an external event only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    #[serde(rename = "Order Confirmed")]
    OrderConfirmed,
    #[serde(rename = "Preparing Food")]
    PreparingFood,
    #[serde(rename = "Out for Delivery")]
    OutForDelivery,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// The happy path, in order.
    pub const LIFECYCLE: [OrderStatus; 4] = [
        OrderStatus::OrderConfirmed,
        OrderStatus::PreparingFood,
        OrderStatus::OutForDelivery,
        OrderStatus::Delivered,
    ];

    /// No further transitions, automatic or manual, leave a terminal state.
    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    /// The state an automatic advance leads to, or `None` once terminal.
    pub fn next(self) -> Option<OrderStatus> {
        match self {
            OrderStatus::OrderConfirmed => Some(OrderStatus::PreparingFood),
            OrderStatus::PreparingFood => Some(OrderStatus::OutForDelivery),
            OrderStatus::OutForDelivery => Some(OrderStatus::Delivered),
            OrderStatus::Delivered | OrderStatus::Cancelled => None,
        }
    }

    /// Index on the happy path. `None` for `Cancelled`.
    pub fn position(self) -> Option<usize> {
        Self::LIFECYCLE.iter().position(|s| *s == self)
    }

    /// The human-readable label shown to customers.
    pub fn label(self) -> &'static str {
        match self {
            OrderStatus::OrderConfirmed => "Order Confirmed",
            OrderStatus::PreparingFood => "Preparing Food",
            OrderStatus::OutForDelivery => "Out for Delivery",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
        }
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
