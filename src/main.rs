use order_tracker::checkout::{Cart, CheckoutForm, PaymentMethod};
use order_tracker::config::TrackerConfig;
use order_tracker::lifecycle::{setup_tracing, DeliverySystem};
use order_tracker::model::{steps, DeliveryAddress, LineItem};
use tracing::{info, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let config = TrackerConfig::from_env().map_err(|e| e.to_string())?;
    info!(schedule = ?config.schedule, "Starting delivery tracker");

    let mut system = DeliverySystem::new(config);

    let mut cart = Cart::new();
    cart.add(LineItem::new("Margherita Pizza", 12.99, 1));

    let form = CheckoutForm {
        delivery_address: DeliveryAddress {
            street: "123 Main St".to_string(),
            city: "Springfield".to_string(),
            state: "IL".to_string(),
            zip: "62701".to_string(),
            country: "USA".to_string(),
        },
        payment_method: Some(PaymentMethod::Card),
        notes: None,
        agree_terms: true,
    };

    let span = tracing::info_span!("checkout");
    let order = system
        .place_order(&cart, "The Pizza Place", &form)
        .instrument(span)
        .await
        .map_err(|e| e.to_string())?;

    let mut watch = system.order_client.watch(order.order_id.clone());
    while let Some(update) = watch.next().await {
        let active = steps(update.status)
            .into_iter()
            .find(|step| step.is_active)
            .map(|step| step.name)
            .unwrap_or("-");
        info!(order_id = %update.order_id, status = %update.status, active, "Status changed");
        if update.status.is_terminal() {
            break;
        }
    }
    drop(watch);

    let refreshed = system.refresh_history().await.map_err(|e| e.to_string())?;
    for past in system.history().iter() {
        info!(
            order_id = %past.order_id,
            restaurant = %past.restaurant_name,
            items = %past.item_summary(),
            status = %past.status,
            refreshed,
            "History"
        );
    }

    system.shutdown().await?;

    info!("Application completed successfully");
    Ok(())
}
