//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing-subscriber` formatter filtered by
//! `RUST_LOG`. Module paths are hidden (`with_target(false)`); the actor logs an
//! `entity_type` field instead.
//!
//! ## What Gets Traced
//!
//! - **Actor lifecycle**: startup, and shutdown with the number of orders held and the
//!   number of timers aborted
//! - **Requests**: Create, Get, Delete and Actions, with the order id as a structured field
//! - **Timers**: armed (`debug`), fired, and stale timers dropped
//! - **Rejections**: invalid orders and checkout forms at `warn`
//!
//! ```bash
//! RUST_LOG=info cargo run      # transitions only
//! RUST_LOG=debug cargo run     # payloads and timer bookkeeping
//! RUST_LOG=order_tracker::framework=debug cargo run
//! ```
//!
//! ## Lifecycle Trace
//!
//! With `RUST_LOG=info`, one order running to completion looks like:
//!
//! ```text
//! INFO Actor started entity_type="Order"
//! INFO place_order: Created entity_type="Order" id=ORD-000001 size=1
//! INFO place_order: Order Placed Successfully order_id=ORD-000001 total=12.99
//! INFO Timer action ok entity_type="Order" id=ORD-000001 result=Advance { status: PreparingFood, applied: true }
//! INFO Timer action ok entity_type="Order" id=ORD-000001 result=Advance { status: OutForDelivery, applied: true }
//! INFO Timer action ok entity_type="Order" id=ORD-000001 result=Advance { status: Delivered, applied: true }
//! ```
//!
//! With `RUST_LOG=debug` the payload is logged once at the entry point, for example
//! `debug!(?params, "create_order called")`, and every later line stays short.

pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // entity_type stands in for the module path
        .compact()
        .init();
}
