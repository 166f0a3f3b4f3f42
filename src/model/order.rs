use crate::model::OrderStatus;
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Opaque order identifier, e.g. `ORD-000042`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub String);

impl From<u32> for OrderId {
    fn from(id: u32) -> Self {
        Self(format!("ORD-{id:06}"))
    }
}

impl From<&str> for OrderId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One line of an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub name: String,
    /// Unit price.
    pub price: f64,
    pub quantity: u32,
}

impl LineItem {
    pub fn new(name: impl Into<String>, price: f64, quantity: u32) -> Self {
        Self {
            name: name.into(),
            price,
            quantity,
        }
    }

    pub fn line_total(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}

/// Delivery address captured at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryAddress {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub country: String,
}

impl Display for DeliveryAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}, {} {}", self.street, self.city, self.state, self.zip)
    }
}

/// Represents a placed order.
///
/// # Actor Framework
/// This struct implements the [`ActorEntity`](crate::framework::ActorEntity) trait,
/// allowing it to be managed by a [`ResourceActor`](crate::framework::ResourceActor).
///
/// See [`impl ActorEntity for Order`](#impl-ActorEntity-for-Order) for details on:
/// - Creation parameters ([`OrderCreate`])
/// - Custom actions ([`OrderAction`](crate::order_actor::OrderAction))
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub order_id: OrderId,
    pub restaurant_name: String,
    pub items: Vec<LineItem>,
    /// Fixed at creation. Not recomputed from `items`.
    pub total_amount: f64,
    pub order_date: String,
    pub estimated_delivery: String,
    pub status: OrderStatus,
    pub delivery_address: Option<DeliveryAddress>,
}

impl Order {
    /// Builds a freshly placed order in [`OrderStatus::OrderConfirmed`].
    pub fn new(order_id: OrderId, params: OrderCreate) -> Self {
        Self {
            order_id,
            restaurant_name: params.restaurant_name,
            items: params.items,
            total_amount: params.total_amount,
            order_date: params.order_date,
            estimated_delivery: params.estimated_delivery,
            status: OrderStatus::OrderConfirmed,
            delivery_address: params.delivery_address,
        }
    }

    /// `"Margherita Pizza (x1), Garlic Bread (x2)"`, as shown in order history.
    pub fn item_summary(&self) -> String {
        self.items
            .iter()
            .map(|i| format!("{} (x{})", i.name, i.quantity))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Payload for placing a new order.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderCreate {
    pub restaurant_name: String,
    pub items: Vec<LineItem>,
    pub total_amount: f64,
    pub delivery_address: Option<DeliveryAddress>,
    pub order_date: String,
    pub estimated_delivery: String,
}

impl OrderCreate {
    pub const DEFAULT_ESTIMATED_DELIVERY: &'static str = "30-45 minutes";

    /// Order placed today with the default delivery estimate.
    pub fn new(
        items: Vec<LineItem>,
        total_amount: f64,
        restaurant_name: impl Into<String>,
        delivery_address: Option<DeliveryAddress>,
    ) -> Self {
        Self {
            restaurant_name: restaurant_name.into(),
            items,
            total_amount,
            delivery_address,
            order_date: today(),
            estimated_delivery: Self::DEFAULT_ESTIMATED_DELIVERY.to_string(),
        }
    }

    pub fn with_estimated_delivery(mut self, estimate: impl Into<String>) -> Self {
        self.estimated_delivery = estimate.into();
        self
    }
}

/// Today's local date as `YYYY-MM-DD`.
pub fn today() -> String {
    Local::now().date_naive().format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_padded() {
        assert_eq!(OrderId::from(42).to_string(), "ORD-000042");
    }

    #[test]
    fn test_new_order_starts_confirmed() {
        let params = OrderCreate::new(
            vec![LineItem::new("Margherita Pizza", 12.99, 1)],
            12.99,
            "The Pizza Place",
            None,
        );
        let order = Order::new(OrderId::from(1), params);
        assert_eq!(order.status, OrderStatus::OrderConfirmed);
        assert_eq!(order.estimated_delivery, "30-45 minutes");
        assert_eq!(order.item_summary(), "Margherita Pizza (x1)");
    }

    #[test]
    fn test_order_date_is_iso_calendar_date() {
        let date = today();
        assert_eq!(date.len(), 10);
        assert!(chrono::NaiveDate::parse_from_str(&date, "%Y-%m-%d").is_ok());
        assert_eq!(OrderCreate::new(vec![], 0.0, "Cafe", None).order_date, date);
    }

    #[test]
    fn test_order_serializes_camel_case() {
        let order = Order::new(
            OrderId::from(7),
            OrderCreate::new(vec![LineItem::new("Pad Thai", 14.5, 2)], 29.0, "Thai Garden", None),
        );
        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["orderId"], "ORD-000007");
        assert_eq!(json["restaurantName"], "Thai Garden");
        assert_eq!(json["totalAmount"], 29.0);
        assert_eq!(json["estimatedDelivery"], "30-45 minutes");
        assert!(json.get("orderDate").is_some());
        assert!(json["deliveryAddress"].is_null());
        assert_eq!(json["items"][0]["quantity"], 2);

        let back: Order = serde_json::from_value(json).unwrap();
        assert_eq!(back, order);
    }

    #[test]
    fn test_address_display() {
        let address = DeliveryAddress {
            street: "123 Main St".into(),
            city: "Anytown".into(),
            state: "CA".into(),
            zip: "90210".into(),
            country: "USA".into(),
        };
        assert_eq!(address.to_string(), "123 Main St, Anytown, CA 90210");
    }
}
