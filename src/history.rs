//! In-memory order history, newest first, keyed by `order_id`.

use crate::fixtures::sample_past_orders;
use crate::model::{Order, OrderId};

#[derive(Debug, Clone, Default)]
pub struct OrderHistory {
    orders: Vec<Order>,
}

impl OrderHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// History pre-filled with the sample past orders.
    pub fn seeded() -> Self {
        Self {
            orders: sample_past_orders(),
        }
    }

    /// Puts `order` at the front, replacing any entry with the same id.
    pub fn upsert(&mut self, order: Order) {
        self.orders.retain(|o| o.order_id != order.order_id);
        self.orders.insert(0, order);
    }

    /// Replaces the entry with the same id in place. Returns `false` if there is none.
    pub fn replace(&mut self, order: Order) -> bool {
        match self.orders.iter_mut().find(|o| o.order_id == order.order_id) {
            Some(slot) => {
                *slot = order;
                true
            }
            None => false,
        }
    }

    pub fn find(&self, id: &OrderId) -> Option<&Order> {
        self.orders.iter().find(|o| &o.order_id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Order> {
        self.orders.iter()
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LineItem, OrderCreate, OrderStatus};

    fn placed(id: u32) -> Order {
        let params = OrderCreate::new(
            vec![LineItem::new("Margherita Pizza", 12.99, 1)],
            12.99,
            "The Pizza Place",
            None,
        );
        Order::new(OrderId::from(id), params)
    }

    #[test]
    fn test_seeded_fixtures() {
        let history = OrderHistory::seeded();
        assert_eq!(history.len(), 2);

        let sushi = history.find(&OrderId::from("ORD-PAST01")).unwrap();
        assert_eq!(sushi.restaurant_name, "Sushi Express");
        assert_eq!(sushi.status, OrderStatus::Delivered);
        assert_eq!(sushi.estimated_delivery, "N/A");

        let burger = history.find(&OrderId::from("ORD-PAST02")).unwrap();
        assert_eq!(burger.item_summary(), "Classic Cheeseburger (x2)");
        assert_eq!(burger.total_amount, 19.00);
    }

    #[test]
    fn test_upsert_moves_to_front_without_duplicates() {
        let mut history = OrderHistory::seeded();
        history.upsert(placed(1));
        history.upsert(placed(2));

        let mut again = placed(1);
        again.status = OrderStatus::Cancelled;
        history.upsert(again);

        let ids: Vec<_> = history.iter().map(|o| o.order_id.to_string()).collect();
        assert_eq!(ids, ["ORD-000001", "ORD-000002", "ORD-PAST01", "ORD-PAST02"]);
        assert_eq!(
            history.find(&OrderId::from(1)).unwrap().status,
            OrderStatus::Cancelled
        );
    }

    #[test]
    fn test_replace_keeps_position() {
        let mut history = OrderHistory::new();
        assert!(history.is_empty());
        history.upsert(placed(1));
        history.upsert(placed(2));

        let mut moved = placed(1);
        moved.status = OrderStatus::PreparingFood;
        assert!(history.replace(moved));
        assert!(!history.replace(placed(3)));

        let order = history.iter().nth(1).unwrap();
        assert_eq!(order.order_id, OrderId::from(1));
        assert_eq!(order.status, OrderStatus::PreparingFood);
    }
}
