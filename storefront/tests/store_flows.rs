//! End-to-end flows through a live [`Store`] on paused tokio time.

use rust_decimal::Decimal;
use std::time::Duration;
use storefront::cart::CartAction;
use storefront::catalog::{CatalogAction, CustomOrderKind, CustomOrderStatus, TransactionStatus};
use storefront::checkout::{CheckoutAction, CheckoutPhase};
use storefront::custom_order::{CustomOrderAction, SubmissionPhase};
use storefront::notifications::{expiry_id, NotificationAction, Severity};
use storefront::session::{Role, SessionAction};
use storefront::types::{NotificationId, ProductId};
use storefront::validation::{CustomOrderField, LoginField, ShippingField};
use storefront::{AppAction, AppReducer, AppState, Route, StorefrontConfig, StorefrontEnvironment};
use storefront_runtime::{Store, StoreError};
use storefront_testing::{init_test_tracing, test_clock, SequentialIds};

type AppStore = Store<AppState, AppAction, StorefrontEnvironment, AppReducer>;

fn store() -> AppStore {
    init_test_tracing();
    let env = StorefrontEnvironment::new(test_clock(), SequentialIds::new("id-"), StorefrontConfig::default());
    Store::new(AppState::default(), AppReducer::new(), env)
}

async fn add_to_cart(store: &AppStore, id: &str) -> Result<(), StoreError> {
    let id = ProductId::new(id);
    let snapshot = store
        .state(|s| s.catalog.product(&id).map(storefront::types::Product::snapshot))
        .await;
    if let Some(snapshot) = snapshot {
        let _ = store.send(AppAction::Cart(CartAction::AddItem(snapshot))).await?;
        assert!(store.state(|s| s.cart.contains(&id)).await);
    }
    Ok(())
}

async fn fill_shipping(store: &AppStore, phone: &str) -> Result<(), StoreError> {
    for (field, value) in [
        (ShippingField::Name, "Asha Menon"),
        (ShippingField::Email, "asha@example.com"),
        (ShippingField::Phone, phone),
        (ShippingField::Address, "12 Lake View Road, Indiranagar"),
        (ShippingField::City, "Bengaluru"),
        (ShippingField::PostalCode, "560038"),
    ] {
        let _ = store
            .send(AppAction::Checkout(CheckoutAction::EditField {
                field,
                value: value.to_string(),
            }))
            .await?;
    }
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn checkout_rejects_bad_phone_then_places_order() -> Result<(), StoreError> {
    let store = store();
    add_to_cart(&store, "1").await?;
    add_to_cart(&store, "1").await?;
    add_to_cart(&store, "3").await?;
    let _ = store.send(AppAction::Checkout(CheckoutAction::Enter)).await?;

    fill_shipping(&store, "12345").await?;
    let _ = store.send(AppAction::Checkout(CheckoutAction::Submit)).await?;

    let (phase, banner, items) = store
        .state(|s| {
            let banner = s.notifications.latest().map(|n| (n.severity, n.title.clone()));
            (s.checkout.phase, banner, s.cart.item_count)
        })
        .await;
    assert_eq!(phase, CheckoutPhase::Editing);
    assert_eq!(banner, Some((Severity::Error, "Phone".to_string())));
    assert_eq!(items, 3);

    let _ = store
        .send(AppAction::Checkout(CheckoutAction::EditField {
            field: ShippingField::Phone,
            value: "9876543210".to_string(),
        }))
        .await?;
    let mut handle = store.send(AppAction::Checkout(CheckoutAction::Submit)).await?;
    assert_eq!(store.state(|s| s.checkout.phase).await, CheckoutPhase::Submitting);
    assert_eq!(handle.pending(), 1);

    assert!(matches!(
        handle.wait_with_timeout(Duration::from_millis(100)).await,
        Err(StoreError::Timeout)
    ));
    assert_eq!(store.state(|s| s.checkout.phase).await, CheckoutPhase::Submitting);

    handle.wait_with_timeout(Duration::from_secs(5)).await?;
    assert_eq!(handle.pending(), 0);

    let state = store.state(Clone::clone).await;
    assert_eq!(state.checkout.phase, CheckoutPhase::Succeeded);
    assert_eq!(state.route, Route::OrderSuccess);
    assert!(state.cart.is_empty());
    assert_eq!(state.cart.total, Decimal::ZERO);

    let order = &state.catalog.transactions[0];
    assert_eq!(state.checkout.last_order.as_ref(), Some(&order.id));
    assert_eq!(order.status, TransactionStatus::Pending);
    assert_eq!(order.total, Decimal::from(32_100));
    assert_eq!(order.customer.phone, "9876543210");
    assert_eq!(
        state.notifications.latest().map(|n| n.severity),
        Some(Severity::Success)
    );
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn deleting_a_product_keeps_placed_orders() -> Result<(), StoreError> {
    let store = store();
    add_to_cart(&store, "2").await?;
    fill_shipping(&store, "9876543210").await?;
    let mut handle = store.send(AppAction::Checkout(CheckoutAction::Submit)).await?;
    handle.wait().await;

    let _ = store
        .send(AppAction::Catalog(CatalogAction::DeleteProduct(ProductId::new("2"))))
        .await?;

    let (products, line) = store
        .state(|s| {
            let line = s.catalog.transactions[0].items.first().map(|l| (l.title.clone(), l.price));
            (s.catalog.products.len(), line)
        })
        .await;
    assert_eq!(products, 2);
    assert_eq!(line, Some(("Handmade Ceramic Bowl".to_string(), Decimal::from(3_750))));
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn notification_expires_on_its_own() -> Result<(), StoreError> {
    let store = store();
    let mut handle = store
        .send(AppAction::Notifications(NotificationAction::success("Saved", "All good")))
        .await?;

    let id = NotificationId::new("id-1");
    assert!(store.is_scheduled(&expiry_id(&id)));
    assert_eq!(store.state(|s| s.notifications.len()).await, 1);

    handle.wait().await;

    assert!(store.state(|s| s.notifications.is_empty()).await);
    assert!(!store.is_scheduled(&expiry_id(&id)));
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn expiry_is_visible_to_action_observers() -> Result<(), StoreError> {
    let store = store();
    let mut actions = store.subscribe_actions();
    let mut handle = store
        .send(AppAction::Notifications(NotificationAction::success("Welcome", "Browse away")))
        .await?;

    let observed = tokio::time::timeout(Duration::from_secs(10), actions.recv())
        .await
        .map_err(|_| StoreError::Timeout)?
        .map_err(|_| StoreError::ChannelClosed)?;

    assert_eq!(
        observed,
        AppAction::Notifications(NotificationAction::Expire(NotificationId::new("id-1")))
    );
    handle.wait().await;
    assert!(store.state(|s| s.notifications.is_empty()).await);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn dismiss_cancels_only_its_own_timer() -> Result<(), StoreError> {
    let store = store();
    let _ = store
        .send(AppAction::Notifications(NotificationAction::error("First", "one")))
        .await?;
    let mut second = store
        .send(AppAction::Notifications(
            NotificationAction::warning("Second", "two").lasting(Duration::from_secs(8)),
        ))
        .await?;
    let first_id = NotificationId::new("id-1");
    let second_id = NotificationId::new("id-2");

    let _ = store
        .send(AppAction::Notifications(NotificationAction::Dismiss(first_id.clone())))
        .await?;
    assert!(!store.is_scheduled(&expiry_id(&first_id)));
    assert!(store.is_scheduled(&expiry_id(&second_id)));

    let titles = store
        .state(|s| s.notifications.items.iter().map(|n| n.title.clone()).collect::<Vec<_>>())
        .await;
    assert_eq!(titles, vec!["Second".to_string()]);

    second.wait().await;
    assert!(store.state(|s| s.notifications.is_empty()).await);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn persistent_notification_stays_until_dismissed() -> Result<(), StoreError> {
    let store = store();
    let mut handle = store
        .send(AppAction::Notifications(
            NotificationAction::warning("Heads up", "Read me").lasting(Duration::ZERO),
        ))
        .await?;
    handle.wait().await;
    tokio::time::sleep(Duration::from_secs(60)).await;

    assert_eq!(store.state(|s| s.notifications.len()).await, 1);
    assert_eq!(store.scheduled_count(), 0);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn custom_order_is_recorded_after_delay() -> Result<(), StoreError> {
    let store = store();
    let _ = store
        .send(AppAction::CustomOrder(CustomOrderAction::SetKind(CustomOrderKind::Painting)))
        .await?;
    for (field, value) in [
        (CustomOrderField::Description, "A monsoon landscape in blues and greens"),
        (CustomOrderField::Budget, "12000"),
        (CustomOrderField::Name, "Ravi"),
        (CustomOrderField::Email, "ravi@example.com"),
        (CustomOrderField::Phone, "9123456789"),
    ] {
        let _ = store
            .send(AppAction::CustomOrder(CustomOrderAction::EditField {
                field,
                value: value.to_string(),
            }))
            .await?;
    }

    let mut handle = store.send(AppAction::CustomOrder(CustomOrderAction::Submit)).await?;
    assert_eq!(store.state(|s| s.custom_order.phase).await, SubmissionPhase::Submitting);
    handle.wait().await;

    let state = store.state(Clone::clone).await;
    assert_eq!(state.route, Route::CustomOrderSuccess);
    assert_eq!(state.custom_order.phase, SubmissionPhase::Submitted);
    let request = &state.catalog.custom_orders[0];
    assert_eq!(request.status, CustomOrderStatus::Pending);
    assert_eq!(request.budget, Decimal::from(12_000));
    assert_eq!(request.size, None);
    assert!(state.custom_order.form.description.is_empty());
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn admin_login_unlocks_admin_panel() -> Result<(), StoreError> {
    let store = store();
    let _ = store.send(AppAction::Navigate(Route::Admin)).await?;
    assert_eq!(store.state(|s| s.route.clone()).await, Route::Login);

    for (field, value) in [
        (LoginField::Email, "admin@exotikacreation.com"),
        (LoginField::Password, "admin123"),
    ] {
        let _ = store
            .send(AppAction::Session(SessionAction::EditLogin {
                field,
                value: value.to_string(),
            }))
            .await?;
    }
    let mut handle = store.send(AppAction::Session(SessionAction::SubmitLogin)).await?;
    handle.wait().await;

    let (role, is_admin, route) = store
        .state(|s| (s.session.user.as_ref().map(|u| u.role), s.catalog.is_admin, s.route.clone()))
        .await;
    assert_eq!(role, Some(Role::Admin));
    assert!(is_admin);
    assert_eq!(route, Route::Admin);

    let _ = store.send(AppAction::Session(SessionAction::Logout)).await?;
    let _ = store.send(AppAction::Navigate(Route::Admin)).await?;
    assert_eq!(store.state(|s| s.route.clone()).await, Route::Login);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn shutdown_cancels_pending_banners() -> Result<(), StoreError> {
    let store = store();
    let _ = store
        .send(AppAction::Notifications(NotificationAction::success("Saved", "All good")))
        .await?;
    assert_eq!(store.scheduled_count(), 1);

    store.shutdown(Duration::from_secs(1)).await?;

    assert_eq!(store.scheduled_count(), 0);
    assert_eq!(store.state(|s| s.notifications.len()).await, 1);
    Ok(())
}
