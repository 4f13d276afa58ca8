//! Application state and the composed reducer.
//!
//! The leaf stores (catalog, cart, favorites, notifications) are independent
//! reducers scoped onto their field of [`AppState`]. The flows that span
//! stores (checkout, custom order intake, session) run on the whole state and
//! re-enter [`AppReducer`] for the leaf updates they make, so a flow's writes
//! to several stores land within one dispatch.

use crate::cart::{CartAction, CartReducer, CartState};
use crate::catalog::{CatalogAction, CatalogReducer, CatalogState};
use crate::checkout::{CheckoutAction, CheckoutState};
use crate::custom_order::{CustomOrderAction, CustomOrderState};
use crate::environment::StorefrontEnvironment;
use crate::favorites::{FavoritesAction, FavoritesReducer, FavoritesState};
use crate::notifications::{NotificationAction, NotificationsReducer, NotificationsState};
use crate::routes::Route;
use crate::session::{SessionAction, SessionState};
use serde::{Deserialize, Serialize};
use storefront_core::composition::{scope_reducer, ScopedReducer};
use storefront_core::effect::Effect;
use storefront_core::reducer::Reducer;
use storefront_core::SmallVec;

/// Effects returned by the app reducer
pub type AppEffects = SmallVec<[Effect<AppAction>; 4]>;

/// Whole-application state
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppState {
    /// Current view
    pub route: Route,
    /// Products, orders, custom orders, admin flag
    pub catalog: CatalogState,
    /// Shopping cart
    pub cart: CartState,
    /// Starred products
    pub favorites: FavoritesState,
    /// Banners on screen
    pub notifications: NotificationsState,
    /// Checkout form and phase
    pub checkout: CheckoutState,
    /// Custom order form and phase
    pub custom_order: CustomOrderState,
    /// Signed-in user and auth forms
    pub session: SessionState,
}

/// Every action the application accepts
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppAction {
    /// Show another view
    Navigate(Route),
    /// Catalog/admin store
    Catalog(CatalogAction),
    /// Cart store
    Cart(CartAction),
    /// Favorites store
    Favorites(FavoritesAction),
    /// Notification store
    Notifications(NotificationAction),
    /// Checkout flow
    Checkout(CheckoutAction),
    /// Custom order flow
    CustomOrder(CustomOrderAction),
    /// Login, signup and logout
    Session(SessionAction),
}

fn catalog_state(app: &mut AppState) -> &mut CatalogState {
    &mut app.catalog
}

fn catalog_action(action: AppAction) -> Option<CatalogAction> {
    match action {
        AppAction::Catalog(action) => Some(action),
        _ => None,
    }
}

fn cart_state(app: &mut AppState) -> &mut CartState {
    &mut app.cart
}

fn cart_action(action: AppAction) -> Option<CartAction> {
    match action {
        AppAction::Cart(action) => Some(action),
        _ => None,
    }
}

fn favorites_state(app: &mut AppState) -> &mut FavoritesState {
    &mut app.favorites
}

fn favorites_action(action: AppAction) -> Option<FavoritesAction> {
    match action {
        AppAction::Favorites(action) => Some(action),
        _ => None,
    }
}

fn notifications_state(app: &mut AppState) -> &mut NotificationsState {
    &mut app.notifications
}

fn notifications_action(action: AppAction) -> Option<NotificationAction> {
    match action {
        AppAction::Notifications(action) => Some(action),
        _ => None,
    }
}

/// The storefront reducer
pub struct AppReducer {
    catalog: ScopedReducer<CatalogReducer, AppState, AppAction>,
    cart: ScopedReducer<CartReducer, AppState, AppAction>,
    favorites: ScopedReducer<FavoritesReducer, AppState, AppAction>,
    notifications: ScopedReducer<NotificationsReducer, AppState, AppAction>,
}

impl AppReducer {
    /// Compose the leaf reducers
    #[must_use]
    pub fn new() -> Self {
        Self {
            catalog: scope_reducer(CatalogReducer, catalog_state, catalog_action, AppAction::Catalog),
            cart: scope_reducer(CartReducer, cart_state, cart_action, AppAction::Cart),
            favorites: scope_reducer(
                FavoritesReducer,
                favorites_state,
                favorites_action,
                AppAction::Favorites,
            ),
            notifications: scope_reducer(
                NotificationsReducer,
                notifications_state,
                notifications_action,
                AppAction::Notifications,
            ),
        }
    }

    /// Show a banner from inside a flow
    pub(crate) fn notify(
        &self,
        state: &mut AppState,
        notification: NotificationAction,
        env: &StorefrontEnvironment,
    ) -> AppEffects {
        self.notifications
            .reduce(state, AppAction::Notifications(notification), env)
    }

    /// Change the current view; the admin panel needs an admin session
    pub(crate) fn navigate(state: &mut AppState, route: Route) {
        let route = match route {
            Route::Admin if !state.catalog.is_admin => {
                tracing::debug!("Admin panel requested without admin session");
                Route::Login
            },
            route => route,
        };
        tracing::debug!(route = %route, "Navigate");
        state.route = route;
    }
}

impl Default for AppReducer {
    fn default() -> Self {
        Self::new()
    }
}

impl Reducer for AppReducer {
    type State = AppState;
    type Action = AppAction;
    type Environment = StorefrontEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            AppAction::Navigate(route) => {
                Self::navigate(state, route);
                SmallVec::new()
            },
            action @ AppAction::Catalog(_) => self.catalog.reduce(state, action, env),
            action @ AppAction::Cart(_) => self.cart.reduce(state, action, env),
            action @ AppAction::Favorites(_) => self.favorites.reduce(state, action, env),
            action @ AppAction::Notifications(_) => self.notifications.reduce(state, action, env),
            AppAction::Checkout(action) => self.reduce_checkout(state, action, env),
            AppAction::CustomOrder(action) => self.reduce_custom_order(state, action, env),
            AppAction::Session(action) => self.reduce_session(state, action, env),
        }
    }
}
