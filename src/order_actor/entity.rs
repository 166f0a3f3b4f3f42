//! ActorEntity trait implementation for the Order domain type.
//!
//! This is where the lifecycle state machine lives: [`Order::next_timer`] asks the actor for
//! exactly one pending advance, tagged with the state it was scheduled from, and
//! [`Order::handle_action`] applies it only if the order is still in that state.

use super::actions::{OrderAction, OrderActionResult};
use super::schedule::DeliverySchedule;
use super::OrderError;
use crate::framework::{ActorEntity, Timer};
use crate::model::{Order, OrderCreate, OrderId, OrderStatus};
use async_trait::async_trait;
use tracing::debug;

/// Orders have no update payload; they are immutable apart from their status.
#[derive(Debug, Clone)]
pub enum OrderUpdate {}

#[async_trait]
impl ActorEntity for Order {
    type Id = OrderId;
    type Create = OrderCreate;
    type Update = OrderUpdate;
    type Action = OrderAction;
    type ActionResult = OrderActionResult;
    type Context = DeliverySchedule;
    type Error = OrderError;

    /// Creates a new Order in `OrderConfirmed`.
    ///
    /// Rejects totals and unit prices that are negative or not finite.
    fn from_create_params(id: OrderId, params: OrderCreate) -> Result<Self, Self::Error> {
        if !params.total_amount.is_finite() || params.total_amount < 0.0 {
            return Err(OrderError::ValidationError(format!(
                "invalid total amount: {}",
                params.total_amount
            )));
        }
        if let Some(item) = params
            .items
            .iter()
            .find(|i| !i.price.is_finite() || i.price < 0.0)
        {
            return Err(OrderError::ValidationError(format!(
                "invalid price for {}: {}",
                item.name, item.price
            )));
        }
        Ok(Order::new(id, params))
    }

    async fn on_update(
        &mut self,
        update: OrderUpdate,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error> {
        match update {}
    }

    /// # Actions
    /// - `Advance { from }`: moves to `from.next()` when the order is still in `from`.
    /// - `Cancel`: moves any non-terminal order to `Cancelled`.
    async fn handle_action(
        &mut self,
        action: OrderAction,
        _ctx: &Self::Context,
    ) -> Result<OrderActionResult, Self::Error> {
        match action {
            OrderAction::Advance { from } => {
                let next = match from.next() {
                    Some(next) if self.status == from => next,
                    _ => {
                        debug!(order_id = %self.order_id, ?from, status = ?self.status, "Stale advance ignored");
                        return Ok(OrderActionResult::Advance {
                            status: self.status,
                            applied: false,
                        });
                    }
                };
                self.status = next;
                Ok(OrderActionResult::Advance {
                    status: next,
                    applied: true,
                })
            }
            OrderAction::Cancel => {
                if self.status.is_terminal() {
                    return Ok(OrderActionResult::Cancel {
                        status: self.status,
                        changed: false,
                    });
                }
                self.status = OrderStatus::Cancelled;
                Ok(OrderActionResult::Cancel {
                    status: OrderStatus::Cancelled,
                    changed: true,
                })
            }
        }
    }

    /// One pending advance while non-terminal, due at the schedule offset of the next state.
    fn next_timer(&self, schedule: &DeliverySchedule) -> Option<Timer<OrderAction>> {
        let next = self.status.next()?;
        let after = schedule.offset(next)?;
        Some(Timer::new(after, OrderAction::Advance { from: self.status }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LineItem;
    use std::time::Duration;

    fn pizza() -> Order {
        let params = OrderCreate::new(
            vec![LineItem::new("Margherita Pizza", 12.99, 1)],
            12.99,
            "The Pizza Place",
            None,
        );
        Order::from_create_params(OrderId::from(1), params).unwrap()
    }

    #[tokio::test]
    async fn test_advance_applies_only_from_matching_state() {
        let schedule = DeliverySchedule::default();
        let mut order = pizza();

        let stale = order
            .handle_action(
                OrderAction::Advance {
                    from: OrderStatus::PreparingFood,
                },
                &schedule,
            )
            .await
            .unwrap();
        assert_eq!(
            stale,
            OrderActionResult::Advance {
                status: OrderStatus::OrderConfirmed,
                applied: false
            }
        );

        let applied = order
            .handle_action(
                OrderAction::Advance {
                    from: OrderStatus::OrderConfirmed,
                },
                &schedule,
            )
            .await
            .unwrap();
        assert_eq!(applied.status(), OrderStatus::PreparingFood);
    }

    #[tokio::test]
    async fn test_cancel_is_idempotent() {
        let schedule = DeliverySchedule::default();
        let mut order = pizza();

        let first = order.handle_action(OrderAction::Cancel, &schedule).await.unwrap();
        let second = order.handle_action(OrderAction::Cancel, &schedule).await.unwrap();
        assert_eq!(
            first,
            OrderActionResult::Cancel {
                status: OrderStatus::Cancelled,
                changed: true
            }
        );
        assert_eq!(
            second,
            OrderActionResult::Cancel {
                status: OrderStatus::Cancelled,
                changed: false
            }
        );
        assert!(order.next_timer(&schedule).is_none());
    }

    #[test]
    fn test_timer_offsets_count_from_creation() {
        let schedule = DeliverySchedule::default();
        let mut order = pizza();

        let timer = order.next_timer(&schedule).unwrap();
        assert_eq!(timer.after, Duration::from_secs(5));

        order.status = OrderStatus::PreparingFood;
        let timer = order.next_timer(&schedule).unwrap();
        assert_eq!(timer.after, Duration::from_secs(10));
        assert_eq!(
            timer.action,
            OrderAction::Advance {
                from: OrderStatus::PreparingFood
            }
        );

        order.status = OrderStatus::Delivered;
        assert!(order.next_timer(&schedule).is_none());
    }

    #[test]
    fn test_rejects_non_finite_total() {
        let params = OrderCreate::new(vec![], f64::NAN, "The Pizza Place", None);
        let err = Order::from_create_params(OrderId::from(1), params).unwrap_err();
        assert!(matches!(err, OrderError::ValidationError(_)));
    }
}
