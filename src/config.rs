//! Runtime configuration, read from the environment.
//!
//! | Variable | Default |
//! |---|---|
//! | `ORDER_PREPARING_AFTER_SECS` | `5` |
//! | `ORDER_OUT_FOR_DELIVERY_AFTER_SECS` | `10` |
//! | `ORDER_DELIVERED_AFTER_SECS` | `15` |
//! | `ORDER_CHANNEL_CAPACITY` | `32` |
//! | `ORDER_ESTIMATED_DELIVERY` | `30-45 minutes` |
//!
//! The three delays are measured from order creation and must increase.

use crate::model::OrderCreate;
use crate::order_actor::DeliverySchedule;
use std::{env, fmt::Display, str::FromStr, time::Duration};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid {key} value {value:?}: {reason}")]
    Invalid {
        key: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrackerConfig {
    pub schedule: DeliverySchedule,
    pub channel_capacity: usize,
    pub estimated_delivery: String,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            schedule: DeliverySchedule::default(),
            channel_capacity: 32,
            estimated_delivery: OrderCreate::DEFAULT_ESTIMATED_DELIVERY.to_string(),
        }
    }
}

impl TrackerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup. Missing keys fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let preparing: u64 = try_load(&lookup, "ORDER_PREPARING_AFTER_SECS", "5")?;
        let out_for_delivery: u64 = try_load(&lookup, "ORDER_OUT_FOR_DELIVERY_AFTER_SECS", "10")?;
        let delivered: u64 = try_load(&lookup, "ORDER_DELIVERED_AFTER_SECS", "15")?;

        let schedule = DeliverySchedule::new(
            Duration::from_secs(preparing),
            Duration::from_secs(out_for_delivery),
            Duration::from_secs(delivered),
        )
        .map_err(|e| ConfigError::Invalid {
            key: "ORDER_*_AFTER_SECS".to_string(),
            value: format!("{preparing}/{out_for_delivery}/{delivered}"),
            reason: e.to_string(),
        })?;

        let channel_capacity: usize = try_load(&lookup, "ORDER_CHANNEL_CAPACITY", "32")?;
        if channel_capacity == 0 {
            return Err(ConfigError::Invalid {
                key: "ORDER_CHANNEL_CAPACITY".to_string(),
                value: "0".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        let estimated_delivery: String = try_load(
            &lookup,
            "ORDER_ESTIMATED_DELIVERY",
            OrderCreate::DEFAULT_ESTIMATED_DELIVERY,
        )?;

        Ok(Self {
            schedule,
            channel_capacity,
            estimated_delivery,
        })
    }
}

fn try_load<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: &str,
) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    let value = lookup(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });
    value.trim().parse().map_err(|e: T::Err| {
        warn!("Invalid {key} value: {e}");
        ConfigError::Invalid {
            key: key.to_string(),
            value: value.clone(),
            reason: e.to_string(),
        }
    })
}
