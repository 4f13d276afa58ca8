//! Storefront demo binary
//!
//! Walks one shopper through browsing, cart and checkout against a live
//! store, then prints the resulting state as JSON.

use anyhow::Context;
use std::time::Duration;
use storefront::cart::CartAction;
use storefront::checkout::CheckoutAction;
use storefront::favorites::FavoritesAction;
use storefront::types::ProductCategory;
use storefront::validation::ShippingField;
use storefront::{AppAction, AppReducer, AppState, Route, StorefrontConfig, StorefrontEnvironment};
use storefront_runtime::Store;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "storefront=info,storefront_runtime=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = StorefrontConfig::from_env().context("invalid storefront configuration")?;
    let env = StorefrontEnvironment::production(config);
    let store = Store::new(AppState::default(), AppReducer::new(), env);

    println!("=== Storefront demo ===\n");

    let browse = Route::for_category(ProductCategory::Painting);
    store.send(AppAction::Navigate(browse.clone())).await?;
    let painting = store
        .state(|s| s.catalog.featured(ProductCategory::Painting).first().map(|p| p.snapshot()))
        .await
        .context("sample catalog has no paintings")?;
    println!("Browsing {browse}: {} (₹{})", painting.title, painting.price);

    store
        .send(AppAction::Favorites(FavoritesAction::Toggle(painting.id.clone())))
        .await?;
    store.send(AppAction::Cart(CartAction::AddItem(painting.clone()))).await?;
    store.send(AppAction::Cart(CartAction::AddItem(painting))).await?;

    let (count, total) = store.state(|s| (s.cart.item_count, s.cart.total)).await;
    println!("Cart: {count} items, ₹{total}");

    store.send(AppAction::Checkout(CheckoutAction::Enter)).await?;
    for (field, value) in [
        (ShippingField::Name, "Asha Menon"),
        (ShippingField::Email, "asha@example.com"),
        (ShippingField::Phone, "98765 43210"),
        (ShippingField::Address, "12 Lake View Road, Indiranagar"),
        (ShippingField::City, "Bengaluru"),
        (ShippingField::PostalCode, "560038"),
    ] {
        store
            .send(AppAction::Checkout(CheckoutAction::EditField {
                field,
                value: value.to_string(),
            }))
            .await?;
    }

    println!("\n>>> Placing order");
    let mut handle = store.send(AppAction::Checkout(CheckoutAction::Submit)).await?;
    handle.wait().await;

    let state = store.state(Clone::clone).await;
    println!("Now at {}", state.route);
    if let Some(note) = state.notifications.latest() {
        println!("[{:?}] {}: {}", note.severity, note.title, note.message);
    }
    for order in state.catalog.transactions_for("asha@example.com") {
        println!("Order {}: ₹{} ({:?})", order.id, order.total, order.status);
    }

    println!("\nFinal state:");
    println!("{}", serde_json::to_string_pretty(&state)?);

    store.shutdown(Duration::from_secs(1)).await?;
    Ok(())
}
