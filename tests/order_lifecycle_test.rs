//! Real Order actor on a paused Tokio clock.
//!
//! Sleeping in the test auto-advances virtual time, and the runtime only advances once every
//! task is idle, so each timer that falls due before the test wakes has been applied by the
//! actor by then.

use order_tracker::clients::OrderClient;
use order_tracker::framework::{ActorClient, ResourceActor};
use order_tracker::model::{LineItem, Order, OrderCreate, OrderId, OrderStatus, StepId};
use order_tracker::order_actor::{self, DeliverySchedule, OrderError};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, timeout, Instant};

fn pizza() -> OrderCreate {
    OrderCreate::new(
        vec![LineItem::new("Margherita Pizza", 12.99, 1)],
        12.99,
        "The Pizza Place",
        None,
    )
}

fn start(schedule: DeliverySchedule) -> (OrderClient, JoinHandle<()>) {
    let (actor, client): (ResourceActor<Order>, OrderClient) = order_actor::new(32);
    let handle = tokio::spawn(actor.run(schedule));
    (client, handle)
}

async fn status_at(client: &OrderClient, id: &OrderId, at: Instant) -> Option<OrderStatus> {
    sleep_until(at).await;
    client.status(id.clone()).await.unwrap()
}

fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

#[tokio::test(start_paused = true)]
async fn test_pizza_order_walks_the_lifecycle() {
    let (client, handle) = start(DeliverySchedule::default());
    let t0 = Instant::now();

    let order = client.create_order(pizza()).await.unwrap();
    let id = order.order_id.clone();
    assert_eq!(order.status, OrderStatus::OrderConfirmed);
    assert_eq!(order.total_amount, 12.99);
    assert_eq!(order.restaurant_name, "The Pizza Place");

    let steps = client.steps(id.clone()).await.unwrap().unwrap();
    assert_eq!(steps.iter().filter(|s| s.is_active).count(), 1);
    assert!(steps[0].is_active);
    assert!(steps.iter().all(|s| !s.is_completed));

    let expectations = [
        (4_900, OrderStatus::OrderConfirmed),
        (5_100, OrderStatus::PreparingFood),
        (9_900, OrderStatus::PreparingFood),
        (10_100, OrderStatus::OutForDelivery),
        (14_900, OrderStatus::OutForDelivery),
        (15_100, OrderStatus::Delivered),
        (60_000, OrderStatus::Delivered),
    ];
    for (offset, expected) in expectations {
        assert_eq!(
            status_at(&client, &id, t0 + ms(offset)).await,
            Some(expected),
            "at {offset} ms"
        );
    }

    let steps = client.steps(id).await.unwrap().unwrap();
    assert!(steps.iter().all(|s| s.is_completed));
    let active: Vec<_> = steps.iter().filter(|s| s.is_active).map(|s| s.id).collect();
    assert_eq!(active, [StepId::Delivered]);

    drop(client);
    handle.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_cancel_right_after_create_sticks() {
    let (client, handle) = start(DeliverySchedule::default());
    let t0 = Instant::now();

    let order = client.create_order(pizza()).await.unwrap();
    let id = order.order_id;
    assert_eq!(
        client.cancel(id.clone()).await.unwrap(),
        Some(OrderStatus::Cancelled)
    );

    assert_eq!(
        status_at(&client, &id, t0 + ms(20_000)).await,
        Some(OrderStatus::Cancelled)
    );
    let steps = client.steps(id).await.unwrap().unwrap();
    assert_eq!(steps[0].name, "Order Cancelled");
    assert!(steps[0].is_active && steps[0].is_cancelled && !steps[0].is_completed);
    assert!(steps[1..].iter().all(|s| !s.is_active && !s.is_completed));

    drop(client);
    handle.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_cancel_mid_delivery_stops_the_chain() {
    let (client, handle) = start(DeliverySchedule::default());
    let t0 = Instant::now();
    let id = client.create_order(pizza()).await.unwrap().order_id;

    assert_eq!(
        status_at(&client, &id, t0 + ms(7_000)).await,
        Some(OrderStatus::PreparingFood)
    );
    let mut watch = client.watch(id.clone());
    client.cancel(id.clone()).await.unwrap();

    let seen = watch.next().await.unwrap();
    assert_eq!(seen.status, OrderStatus::Cancelled);
    assert!(
        timeout(ms(30_000), watch.next()).await.is_err(),
        "no change may follow a cancel"
    );
    assert_eq!(client.status(id).await.unwrap(), Some(OrderStatus::Cancelled));

    drop(client);
    handle.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_cancel_is_idempotent_and_respects_terminal_states() {
    let (client, handle) = start(DeliverySchedule::default());
    let t0 = Instant::now();

    let cancelled = client.create_order(pizza()).await.unwrap().order_id;
    let delivered = client.create_order(pizza()).await.unwrap().order_id;

    let once = client.cancel(cancelled.clone()).await.unwrap();
    let twice = client.cancel(cancelled.clone()).await.unwrap();
    assert_eq!(once, twice);
    assert_eq!(
        client.get(cancelled).await.unwrap().unwrap().status,
        OrderStatus::Cancelled
    );

    assert_eq!(
        status_at(&client, &delivered, t0 + ms(16_000)).await,
        Some(OrderStatus::Delivered)
    );
    assert_eq!(
        client.cancel(delivered).await.unwrap(),
        Some(OrderStatus::Delivered)
    );

    assert_eq!(client.cancel(OrderId::from("ORD-UNKNOWN")).await.unwrap(), None);

    drop(client);
    handle.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_watch_sees_strictly_increasing_statuses() {
    let (client, handle) = start(DeliverySchedule::default());
    let order = client.create_order(pizza()).await.unwrap();
    let mut watch = client.watch(order.order_id.clone());

    let mut seen = vec![order.status];
    while let Some(update) = watch.next().await {
        seen.push(update.status);
        if update.status.is_terminal() {
            break;
        }
    }

    assert_eq!(seen, OrderStatus::LIFECYCLE);
    assert!(seen
        .windows(2)
        .all(|pair| pair[0].position() < pair[1].position()));

    drop(client);
    handle.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_zero_first_delay_still_reports_confirmed() {
    let schedule = DeliverySchedule::new(Duration::ZERO, ms(10_000), ms(15_000)).unwrap();
    let (client, handle) = start(schedule);
    let mut watch = client.watch(OrderId::from(1));

    let order = client.create_order(pizza()).await.unwrap();
    assert_eq!(order.order_id, OrderId::from(1));
    assert_eq!(order.status, OrderStatus::OrderConfirmed);

    assert_eq!(watch.next().await.unwrap().status, OrderStatus::OrderConfirmed);
    assert_eq!(watch.next().await.unwrap().status, OrderStatus::PreparingFood);
    assert_eq!(
        client.status(order.order_id).await.unwrap(),
        Some(OrderStatus::PreparingFood)
    );

    drop(client);
    handle.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_offsets_count_from_each_orders_creation() {
    let (client, handle) = start(DeliverySchedule::default());
    let t0 = Instant::now();

    let first = client.create_order(pizza()).await.unwrap().order_id;
    sleep_until(t0 + ms(3_000)).await;
    let second = client.create_order(pizza()).await.unwrap().order_id;
    assert_ne!(first, second);

    assert_eq!(
        status_at(&client, &first, t0 + ms(5_500)).await,
        Some(OrderStatus::PreparingFood)
    );
    assert_eq!(
        client.status(second.clone()).await.unwrap(),
        Some(OrderStatus::OrderConfirmed)
    );
    assert_eq!(
        status_at(&client, &second, t0 + ms(8_500)).await,
        Some(OrderStatus::PreparingFood)
    );

    drop(client);
    handle.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_custom_schedule() {
    let schedule = DeliverySchedule::new(ms(1_000), ms(2_000), ms(3_000)).unwrap();
    let (client, handle) = start(schedule);
    let t0 = Instant::now();
    let id = client.create_order(pizza()).await.unwrap().order_id;

    assert_eq!(
        status_at(&client, &id, t0 + ms(2_500)).await,
        Some(OrderStatus::OutForDelivery)
    );
    assert_eq!(
        status_at(&client, &id, t0 + ms(3_100)).await,
        Some(OrderStatus::Delivered)
    );

    drop(client);
    handle.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_discard_aborts_timer() {
    let (client, handle) = start(DeliverySchedule::default());
    let id = client.create_order(pizza()).await.unwrap().order_id;
    let mut watch = client.watch(id.clone());

    assert!(client.discard(id.clone()).await.unwrap());
    assert!(!client.discard(id.clone()).await.unwrap());
    assert_eq!(client.get(id.clone()).await.unwrap(), None);

    assert!(timeout(ms(30_000), watch.next()).await.is_err());
    assert_eq!(client.cancel(id).await.unwrap(), None);

    drop(client);
    handle.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_shutdown_with_pending_timers_completes() {
    let (client, handle) = start(DeliverySchedule::default());
    let id = client.create_order(pizza()).await.unwrap().order_id;
    client.create_order(pizza()).await.unwrap();
    let mut watch = client.watch(id);

    drop(client);
    timeout(ms(1_000), handle)
        .await
        .expect("actor must stop without waiting for deliveries")
        .unwrap();

    assert!(watch.next().await.is_none());
}

#[tokio::test]
async fn test_invalid_total_rejected() {
    let (client, handle) = start(DeliverySchedule::default());

    let params = OrderCreate::new(
        vec![LineItem::new("Margherita Pizza", 12.99, 1)],
        -1.0,
        "The Pizza Place",
        None,
    );
    let err = client.create_order(params).await.unwrap_err();
    assert!(matches!(err, OrderError::ValidationError(_)));

    drop(client);
    handle.await.unwrap();
}
