//! Placeholder orders shown in the history before anything has been placed.

use crate::model::{LineItem, Order, OrderId, OrderStatus};

fn delivered(
    id: &str,
    restaurant_name: &str,
    item: LineItem,
    total_amount: f64,
    order_date: &str,
) -> Order {
    Order {
        order_id: OrderId::from(id),
        restaurant_name: restaurant_name.to_string(),
        items: vec![item],
        total_amount,
        order_date: order_date.to_string(),
        estimated_delivery: "N/A".to_string(),
        status: OrderStatus::Delivered,
        delivery_address: None,
    }
}

/// Two delivered past orders, newest first.
pub fn sample_past_orders() -> Vec<Order> {
    vec![
        delivered(
            "ORD-PAST01",
            "Sushi Express",
            LineItem::new("Salmon Sushi Set", 18.99, 1),
            18.99,
            "2023-10-15",
        ),
        delivered(
            "ORD-PAST02",
            "Burger Hub",
            LineItem::new("Classic Cheeseburger", 9.50, 2),
            19.00,
            "2023-10-10",
        ),
    ]
}
