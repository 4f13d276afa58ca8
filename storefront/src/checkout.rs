//! Checkout: shipping form, validation and order placement.
//!
//! Phases run `Editing → Validating → Submitting → Succeeded`. A failed
//! validation goes back to `Editing` with one error banner per failing rule.
//! After the simulated processing delay the order is recorded, the cart is
//! cleared and a success banner is shown, all within one dispatch.

use crate::app::{AppAction, AppEffects, AppReducer, AppState};
use crate::cart::CartAction;
use crate::catalog::{CatalogAction, NewTransaction};
use crate::environment::StorefrontEnvironment;
use crate::notifications::NotificationAction;
use crate::routes::Route;
use crate::types::{ContactInfo, TransactionId};
use crate::validation::{validate_shipping, FormField, ShippingField, ShippingForm, ShippingValidation};
use serde::{Deserialize, Serialize};
use storefront_core::effect::Effect;
use storefront_core::reducer::Reducer;
use storefront_core::{smallvec, SmallVec};

/// Where the checkout is
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CheckoutPhase {
    /// Form open for edits
    #[default]
    Editing,
    /// Rules running (within the submit dispatch)
    Validating,
    /// Waiting for the simulated payment
    Submitting,
    /// Order placed
    Succeeded,
}

/// Checkout state
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutState {
    /// Shipping details as typed
    pub form: ShippingForm,
    /// Result of the last submit, cleared per field on edit
    pub validation: ShippingValidation,
    /// Current phase
    pub phase: CheckoutPhase,
    /// Order placed by the last successful checkout
    pub last_order: Option<TransactionId>,
}

/// Checkout actions
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckoutAction {
    /// Open the checkout view; an empty cart redirects to `/cart`
    Enter,
    /// User typed into a field
    EditField {
        /// Field edited
        field: ShippingField,
        /// New value
        value: String,
    },
    /// Place the order
    Submit,
    /// Simulated payment finished
    ProcessingFinished,
    /// Start over with an empty form
    Reset,
}

impl AppReducer {
    pub(crate) fn reduce_checkout(
        &self,
        state: &mut AppState,
        action: CheckoutAction,
        env: &StorefrontEnvironment,
    ) -> AppEffects {
        match action {
            CheckoutAction::Enter => {
                if state.cart.is_empty() {
                    tracing::debug!("Checkout entered with an empty cart");
                    Self::navigate(state, Route::Cart);
                    return SmallVec::new();
                }
                if state.checkout.phase == CheckoutPhase::Succeeded {
                    state.checkout = CheckoutState {
                        last_order: state.checkout.last_order.take(),
                        ..CheckoutState::default()
                    };
                }
                Self::navigate(state, Route::Checkout);
                SmallVec::new()
            },

            CheckoutAction::EditField { field, value } => {
                if matches!(state.checkout.phase, CheckoutPhase::Editing) {
                    state.checkout.form.set(field, value);
                    state.checkout.validation.clear(field);
                }
                SmallVec::new()
            },

            CheckoutAction::Submit => self.submit_checkout(state, env),

            CheckoutAction::ProcessingFinished => self.place_order(state, env),

            CheckoutAction::Reset => {
                state.checkout = CheckoutState::default();
                SmallVec::new()
            },
        }
    }

    fn submit_checkout(&self, state: &mut AppState, env: &StorefrontEnvironment) -> AppEffects {
        if state.checkout.phase != CheckoutPhase::Editing {
            tracing::debug!(phase = ?state.checkout.phase, "Submit ignored");
            return SmallVec::new();
        }
        if state.cart.is_empty() {
            tracing::debug!("Submit ignored: cart is empty");
            return SmallVec::new();
        }

        state.checkout.phase = CheckoutPhase::Validating;
        state.checkout.validation = validate_shipping(&state.checkout.form);

        if !state.checkout.validation.is_valid() {
            state.checkout.phase = CheckoutPhase::Editing;
            metrics::counter!("storefront.checkout.rejected").increment(1);

            let failures: Vec<(ShippingField, String)> = state
                .checkout
                .validation
                .failures()
                .map(|(field, reason)| (field, reason.to_string()))
                .collect();
            tracing::debug!(failing = failures.len(), "Shipping form rejected");

            let mut effects = AppEffects::new();
            for (field, reason) in failures {
                effects.extend(self.notify(state, NotificationAction::error(field.label(), reason), env));
            }
            return effects;
        }

        state.checkout.phase = CheckoutPhase::Submitting;
        smallvec![Effect::delay(
            env.config.checkout_delay,
            AppAction::Checkout(CheckoutAction::ProcessingFinished),
        )]
    }

    fn place_order(&self, state: &mut AppState, env: &StorefrontEnvironment) -> AppEffects {
        if state.checkout.phase != CheckoutPhase::Submitting {
            return SmallVec::new();
        }

        if state.cart.is_empty() {
            state.checkout.phase = CheckoutPhase::Editing;
            Self::navigate(state, Route::Cart);
            return self.notify(
                state,
                NotificationAction::error("Cart is empty", "Add something to your cart before checking out."),
                env,
            );
        }

        let form = &state.checkout.form;
        let order = NewTransaction {
            items: state.cart.order_lines(),
            total: state.cart.total,
            customer: ContactInfo {
                name: form.name.trim().to_string(),
                email: form.email.trim().to_string(),
                address: form.full_address(),
                phone: form.phone.trim().to_string(),
            },
        };

        let mut effects = self.reduce(state, AppAction::Catalog(CatalogAction::AddTransaction(order)), env);
        let placed = state.catalog.transactions.last().map(|t| (t.id.clone(), t.total));
        effects.extend(self.reduce(state, AppAction::Cart(CartAction::Clear), env));

        state.checkout.phase = CheckoutPhase::Succeeded;
        state.checkout.last_order = placed.as_ref().map(|(id, _)| id.clone());
        Self::navigate(state, Route::OrderSuccess);

        metrics::counter!("storefront.orders.placed").increment(1);
        if let Some((id, total)) = placed {
            tracing::info!(transaction_id = %id, %total, "Order placed");
            effects.extend(self.notify(
                state,
                NotificationAction::success(
                    "Order placed",
                    format!("Thank you! Your order {id} has been placed."),
                ),
                env,
            ));
        }

        effects
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogState;
    use crate::environment::test_environment;
    use crate::notifications::Severity;
    use crate::types::ProductId;
    use rust_decimal::Decimal;
    use std::time::Duration;
    use storefront_testing::{assertions, ReducerTest};

    fn filled_form() -> ShippingForm {
        ShippingForm {
            name: "Asha Rao".to_string(),
            email: "asha@example.com".to_string(),
            phone: "9876543210".to_string(),
            address: "12 MG Road, Indiranagar".to_string(),
            city: "Bengaluru".to_string(),
            postal_code: "560038".to_string(),
        }
    }

    fn with_cart() -> AppState {
        let mut state = AppState::default();
        let env = test_environment();
        let painting = CatalogState::seeded().products[0].snapshot();
        let _ = AppReducer::new().reduce(&mut state, AppAction::Cart(CartAction::AddItem(painting)), &env);
        state.checkout.form = filled_form();
        state
    }

    #[test]
    fn enter_with_empty_cart_redirects() {
        ReducerTest::new(AppReducer::new())
            .with_env(test_environment())
            .given_state(AppState::default())
            .when_action(AppAction::Checkout(CheckoutAction::Enter))
            .then_state(|state| assert_eq!(state.route, Route::Cart))
            .run();
    }

    #[test]
    fn valid_submit_schedules_processing() {
        ReducerTest::new(AppReducer::new())
            .with_env(test_environment())
            .given_state(with_cart())
            .when_action(AppAction::Checkout(CheckoutAction::Submit))
            .then_state(|state| {
                assert_eq!(state.checkout.phase, CheckoutPhase::Submitting);
                assert!(state.catalog.transactions.is_empty());
            })
            .then_effects(|effects| {
                assertions::assert_has_delay(
                    effects,
                    Duration::from_millis(2000),
                    &AppAction::Checkout(CheckoutAction::ProcessingFinished),
                );
            })
            .run();
    }

    #[test]
    fn invalid_submit_notifies_each_failure() {
        let mut state = with_cart();
        state.checkout.form.phone = "12345".to_string();
        state.checkout.form.postal_code = "abc".to_string();

        ReducerTest::new(AppReducer::new())
            .with_env(test_environment())
            .given_state(state)
            .when_action(AppAction::Checkout(CheckoutAction::Submit))
            .then_state(|state| {
                assert_eq!(state.checkout.phase, CheckoutPhase::Editing);
                assert_eq!(state.notifications.len(), 2);
                assert!(state.notifications.items.iter().all(|n| n.severity == Severity::Error));
                assert_eq!(state.notifications.items[0].title, "Phone");
                assert!(state.checkout.validation.check(ShippingField::Phone).is_invalid());
            })
            .then_effects(|effects| assertions::assert_effects_count(effects, 2))
            .run();
    }

    #[test]
    fn editing_a_field_clears_its_error() {
        let mut state = with_cart();
        state.checkout.form.phone = "12345".to_string();

        ReducerTest::new(AppReducer::new())
            .with_env(test_environment())
            .given_state(state)
            .when_actions([
                AppAction::Checkout(CheckoutAction::Submit),
                AppAction::Checkout(CheckoutAction::EditField {
                    field: ShippingField::Phone,
                    value: "98765".to_string(),
                }),
            ])
            .then_state(|state| {
                assert!(!state.checkout.validation.check(ShippingField::Phone).is_invalid());
                assert_eq!(state.checkout.form.phone, "98765");
            })
            .run();
    }

    #[test]
    fn processing_finished_places_order_and_clears_cart() {
        ReducerTest::new(AppReducer::new())
            .with_env(test_environment())
            .given_state(with_cart())
            .when_actions([
                AppAction::Checkout(CheckoutAction::Submit),
                AppAction::Checkout(CheckoutAction::Submit),
                AppAction::Checkout(CheckoutAction::ProcessingFinished),
            ])
            .then_state(|state| {
                assert_eq!(state.checkout.phase, CheckoutPhase::Succeeded);
                assert_eq!(state.route, Route::OrderSuccess);
                assert!(state.cart.is_empty());
                assert_eq!(state.catalog.transactions.len(), 1);

                let order = &state.catalog.transactions[0];
                assert_eq!(state.checkout.last_order.as_ref(), Some(&order.id));
                assert_eq!(order.total, Decimal::from(15_000));
                assert_eq!(order.items[0].product_id, ProductId::new("1"));
                assert_eq!(order.customer.address, "12 MG Road, Indiranagar, Bengaluru, 560038");

                assert_eq!(state.notifications.latest().map(|n| n.severity), Some(Severity::Success));
            })
            .then_effects(|effects| {
                // one processing delay (second submit ignored) and the banner timer
                assertions::assert_effects_count(effects, 2);
            })
            .run();
    }

    #[test]
    fn submit_with_empty_cart_creates_nothing() {
        let mut state = AppState::default();
        state.checkout.form = filled_form();

        ReducerTest::new(AppReducer::new())
            .with_env(test_environment())
            .given_state(state)
            .when_actions([
                AppAction::Checkout(CheckoutAction::Submit),
                AppAction::Checkout(CheckoutAction::ProcessingFinished),
            ])
            .then_state(|state| {
                assert!(state.catalog.transactions.is_empty());
                assert_eq!(state.checkout.phase, CheckoutPhase::Editing);
            })
            .then_effects(|effects| assertions::assert_no_effects(effects))
            .run();
    }

    #[test]
    fn cart_emptied_during_processing_aborts_order() {
        ReducerTest::new(AppReducer::new())
            .with_env(test_environment())
            .given_state(with_cart())
            .when_actions([
                AppAction::Checkout(CheckoutAction::Submit),
                AppAction::Cart(CartAction::Clear),
                AppAction::Checkout(CheckoutAction::ProcessingFinished),
            ])
            .then_state(|state| {
                assert!(state.catalog.transactions.is_empty());
                assert_eq!(state.checkout.phase, CheckoutPhase::Editing);
                assert_eq!(state.route, Route::Cart);
            })
            .run();
    }
}
