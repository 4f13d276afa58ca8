//! # Storefront
//!
//! State containers for a small art storefront: a product catalog with an
//! admin panel, a shopping cart, favorites, transient notifications, a
//! simulated checkout, custom order intake and a demo sign-in.
//!
//! Each store is a [`Reducer`](storefront_core::reducer::Reducer).
//! [`AppReducer`] composes them over [`AppState`] and is run by a
//! [`Store`](storefront_runtime::Store), which executes the delays and
//! notification timers the reducers describe.
//!
//! ## Example
//!
//! ```ignore
//! use storefront::{AppAction, AppReducer, AppState, StorefrontConfig, StorefrontEnvironment};
//! use storefront::cart::CartAction;
//! use storefront_runtime::Store;
//!
//! let env = StorefrontEnvironment::production(StorefrontConfig::from_env()?);
//! let store = Store::new(AppState::default(), AppReducer::new(), env);
//!
//! let product = store.state(|s| s.catalog.products[0].snapshot()).await;
//! store.send(AppAction::Cart(CartAction::AddItem(product))).await?;
//! ```

pub mod app;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod custom_order;
pub mod environment;
pub mod favorites;
pub mod notifications;
pub mod routes;
pub mod session;
pub mod types;
pub mod validation;

pub use app::{AppAction, AppReducer, AppState};
pub use config::{ConfigError, StorefrontConfig};
pub use environment::StorefrontEnvironment;
pub use routes::Route;
