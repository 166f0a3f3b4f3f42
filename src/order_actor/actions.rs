//! Custom actions for the Order actor.
//!
//! `Advance` is what the order's own timer fires; `Cancel` is the external event.
//! Both are handled by [`ActorEntity::handle_action`](crate::framework::ActorEntity::handle_action).

use crate::model::OrderStatus;

#[derive(Debug, Clone, PartialEq)]
pub enum OrderAction {
    /// Move to the next lifecycle state, but only if the order is still in `from`.
    ///
    /// An advance whose `from` no longer matches is stale and leaves the order untouched.
    Advance { from: OrderStatus },
    /// Move to `Cancelled`. No-op on terminal orders.
    Cancel,
}

/// Results from OrderActions - variants match 1:1 with OrderAction
#[derive(Debug, Clone, PartialEq)]
pub enum OrderActionResult {
    /// `applied` is false when the advance was stale.
    Advance { status: OrderStatus, applied: bool },
    /// `changed` is false when the order was already terminal.
    Cancel { status: OrderStatus, changed: bool },
}

impl OrderActionResult {
    /// Status of the order after the action.
    pub fn status(&self) -> OrderStatus {
        match self {
            OrderActionResult::Advance { status, .. } | OrderActionResult::Cancel { status, .. } => {
                *status
            }
        }
    }
}
