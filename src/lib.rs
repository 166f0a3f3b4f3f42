//! # Order Tracker
//!
//! > **An order lifecycle simulator built on resource-oriented actors.**
//!
//! A placed order walks `OrderConfirmed → PreparingFood → OutForDelivery → Delivered` on
//! timers, can be cancelled at any point before it is delivered, and projects its status
//! onto a four-step indicator for display.
//!
//! ## Core Concepts
//!
//! ### One actor, one timer per order
//! All orders live inside a single [`ResourceActor`](framework::ResourceActor). Requests and
//! fired timers are applied one at a time inside its loop, so order state never needs a lock.
//! While an order is not terminal it has exactly one pending timer. The timer carries the
//! state it was scheduled from, and an advance whose source state no longer matches is a
//! no-op. That is what makes cancel race-free.
//!
//! ### Delays from creation
//! The [`DeliverySchedule`](order_actor::DeliverySchedule) gives each automatic transition an
//! offset measured from when the order was placed (5 s, 10 s, 15 s by default). It is
//! injected as the actor context and can be overridden through [`config`].
//!
//! ### Mocking
//! Client logic is tested against [`framework::mock`] instead of a running actor.
//! Lifecycle tests run the real actor on a paused Tokio clock.
//!
//! ## Module Tour
//!
//! ### 1. The Engine ([`framework`])
//! The generic `ResourceActor<T>` with CRUD, actions, per-entity timers and a change feed.
//! - **Key items**: [`ActorEntity`](framework::ActorEntity), [`ResourceActor`](framework::ResourceActor), [`Timer`](framework::Timer).
//!
//! ### 2. The Domain ([`model`], [`order_actor`])
//! - [`model`]: [`Order`](model::Order), [`OrderStatus`](model::OrderStatus) and the pure
//!   [`steps`](fn@model::steps) projection.
//! - [`order_actor`]: the lifecycle state machine as an `ActorEntity`.
//!
//! ### 3. The Interface ([`clients`])
//! [`OrderClient`](clients::OrderClient) wraps the generic client: `create_order`, `steps`,
//! `cancel`, `discard`, `watch`.
//!
//! ### 4. The Storefront Edges ([`checkout`], [`history`], [`fixtures`])
//! Cart totals and checkout validation on the way in, newest-first order history on the
//! way out.
//!
//! ### 5. The Orchestrator ([`lifecycle`], [`config`])
//! [`DeliverySystem`](lifecycle::DeliverySystem) starts and stops the actor and ties the
//! edges together.
//!
//! ## Quick Start
//!
//! ```bash
//! # Watch one order run to completion with short delays
//! RUST_LOG=info ORDER_PREPARING_AFTER_SECS=1 ORDER_OUT_FOR_DELIVERY_AFTER_SECS=2 \
//!     ORDER_DELIVERED_AFTER_SECS=3 cargo run
//! ```

pub mod checkout;
pub mod clients;
pub mod config;
pub mod fixtures;
pub mod framework;
pub mod history;
pub mod lifecycle;
pub mod model;
pub mod order_actor;
