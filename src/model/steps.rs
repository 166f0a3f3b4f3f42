//! Step-indicator projection of an [`OrderStatus`].
//!
//! The four checkpoints are derived from the status alone and hold no state of their own,
//! so a display can call [`steps`] whenever it re-renders.

use crate::model::OrderStatus;
use serde::Serialize;

/// The four checkpoints shown by the step indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StepId {
    Confirmed,
    Preparing,
    Delivery,
    Delivered,
}

impl StepId {
    pub const ALL: [StepId; 4] = [
        StepId::Confirmed,
        StepId::Preparing,
        StepId::Delivery,
        StepId::Delivered,
    ];

    pub fn name(self) -> &'static str {
        match self {
            StepId::Confirmed => "Order Confirmed",
            StepId::Preparing => "Preparing Food",
            StepId::Delivery => "Out for Delivery",
            StepId::Delivered => "Delivered",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            StepId::Confirmed => "We have received your order.",
            StepId::Preparing => "The restaurant is preparing your meal.",
            StepId::Delivery => "Your order is on its way!",
            StepId::Delivered => "Enjoy your meal!",
        }
    }
}

/// One checkpoint of the step indicator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderStep {
    pub id: StepId,
    pub name: &'static str,
    pub description: &'static str,
    pub is_completed: bool,
    pub is_active: bool,
    /// Only ever set on the `confirmed` step of a cancelled order.
    pub is_cancelled: bool,
}

/// Projects `status` onto the four checkpoints.
///
/// Steps before the active one are completed, steps after it are neither. A delivered order
/// has every step completed with `delivered` still active. A cancelled order shows only the
/// `confirmed` step, active, renamed and marked cancelled instead of completed.
pub fn steps(status: OrderStatus) -> [OrderStep; 4] {
    StepId::ALL.map(|id| project(id, status))
}

fn project(id: StepId, status: OrderStatus) -> OrderStep {
    let mut step = OrderStep {
        id,
        name: id.name(),
        description: id.description(),
        is_completed: false,
        is_active: false,
        is_cancelled: false,
    };

    let Some(current) = status.position() else {
        if id == StepId::Confirmed {
            step.name = "Order Cancelled";
            step.is_active = true;
            step.is_cancelled = true;
        }
        return step;
    };

    let index = id as usize;
    step.is_active = index == current;
    step.is_completed = index < current || status == OrderStatus::Delivered;
    step
}
