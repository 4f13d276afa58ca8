//! Custom order intake.

use crate::app::{AppAction, AppEffects, AppReducer, AppState};
use crate::catalog::{CatalogAction, CustomOrderKind, NewCustomOrder};
use crate::environment::StorefrontEnvironment;
use crate::notifications::NotificationAction;
use crate::routes::Route;
use crate::types::{CustomOrderId, CustomerContact};
use crate::validation::{
    validate_custom_order, CustomOrderField, CustomOrderForm, CustomOrderLimits,
    CustomOrderValidation, FormField,
};
use serde::{Deserialize, Serialize};
use storefront_core::effect::Effect;
use storefront_core::reducer::Reducer;
use storefront_core::{smallvec, SmallVec};

/// Where a request is
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SubmissionPhase {
    /// Form open for edits
    #[default]
    Editing,
    /// Waiting for the simulated submission
    Submitting,
    /// Request recorded
    Submitted,
}

/// Custom order form state
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomOrderState {
    /// Painting or craft
    pub kind: CustomOrderKind,
    /// Text fields and images
    pub form: CustomOrderForm,
    /// Result of the last submit, cleared per field on edit
    pub validation: CustomOrderValidation,
    /// Current phase
    pub phase: SubmissionPhase,
    /// Request recorded by the last successful submit
    pub last_request: Option<CustomOrderId>,
}

impl Default for CustomOrderState {
    fn default() -> Self {
        Self {
            kind: CustomOrderKind::Painting,
            form: CustomOrderForm::default(),
            validation: CustomOrderValidation::default(),
            phase: SubmissionPhase::default(),
            last_request: None,
        }
    }
}

/// Custom order actions
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CustomOrderAction {
    /// Choose painting or craft
    SetKind(CustomOrderKind),
    /// User typed into a field
    EditField {
        /// Field edited
        field: CustomOrderField,
        /// New value
        value: String,
    },
    /// Attach a reference image (data URL or path)
    AttachImage(String),
    /// Remove the image at this position
    RemoveImage(usize),
    /// Send the request
    Submit,
    /// Simulated submission finished
    ProcessingFinished,
    /// Start a new request
    Reset,
}

impl AppReducer {
    pub(crate) fn reduce_custom_order(
        &self,
        state: &mut AppState,
        action: CustomOrderAction,
        env: &StorefrontEnvironment,
    ) -> AppEffects {
        let editing = state.custom_order.phase == SubmissionPhase::Editing;

        match action {
            CustomOrderAction::SetKind(kind) if editing => {
                state.custom_order.kind = kind;
                SmallVec::new()
            },
            CustomOrderAction::EditField { field, value } if editing => {
                state.custom_order.form.set(field, value);
                state.custom_order.validation.clear(field);
                SmallVec::new()
            },
            CustomOrderAction::AttachImage(image) if editing => {
                let limit = env.config.max_reference_images;
                if state.custom_order.form.reference_images.len() >= limit {
                    return self.notify(
                        state,
                        NotificationAction::warning(
                            "Maximum images reached",
                            format!("You can attach up to {limit} reference images."),
                        ),
                        env,
                    );
                }
                state.custom_order.form.reference_images.push(image);
                state.custom_order.validation.clear(CustomOrderField::ReferenceImages);
                SmallVec::new()
            },
            CustomOrderAction::RemoveImage(index) if editing => {
                let images = &mut state.custom_order.form.reference_images;
                if index < images.len() {
                    images.remove(index);
                }
                SmallVec::new()
            },
            CustomOrderAction::Submit if editing => self.submit_custom_order(state, env),
            CustomOrderAction::ProcessingFinished => self.record_custom_order(state, env),
            CustomOrderAction::Reset => {
                state.custom_order = CustomOrderState {
                    last_request: state.custom_order.last_request.take(),
                    ..CustomOrderState::default()
                };
                SmallVec::new()
            },
            action => {
                tracing::debug!(?action, phase = ?state.custom_order.phase, "Custom order action ignored");
                SmallVec::new()
            },
        }
    }

    fn submit_custom_order(&self, state: &mut AppState, env: &StorefrontEnvironment) -> AppEffects {
        let limits = CustomOrderLimits {
            budget_min: env.config.budget_min,
            budget_max: env.config.budget_max,
            max_reference_images: env.config.max_reference_images,
        };
        state.custom_order.validation = validate_custom_order(&state.custom_order.form, &limits);

        if !state.custom_order.validation.is_valid() {
            let failures: Vec<(CustomOrderField, String)> = state
                .custom_order
                .validation
                .failures()
                .map(|(field, reason)| (field, reason.to_string()))
                .collect();

            let mut effects = AppEffects::new();
            for (field, reason) in failures {
                effects.extend(self.notify(state, NotificationAction::error(field.label(), reason), env));
            }
            return effects;
        }

        state.custom_order.phase = SubmissionPhase::Submitting;
        smallvec![Effect::delay(
            env.config.custom_order_delay,
            AppAction::CustomOrder(CustomOrderAction::ProcessingFinished),
        )]
    }

    fn record_custom_order(&self, state: &mut AppState, env: &StorefrontEnvironment) -> AppEffects {
        if state.custom_order.phase != SubmissionPhase::Submitting {
            return SmallVec::new();
        }

        let custom = &state.custom_order;
        let Some(budget) = custom.form.parsed_budget() else {
            state.custom_order.phase = SubmissionPhase::Editing;
            return SmallVec::new();
        };
        let size = custom.form.size.trim();
        let request = NewCustomOrder {
            kind: custom.kind,
            description: custom.form.description.trim().to_string(),
            size: (!size.is_empty()).then(|| size.to_string()),
            budget,
            customer: CustomerContact {
                name: custom.form.name.trim().to_string(),
                email: custom.form.email.trim().to_string(),
                phone: custom.form.phone.trim().to_string(),
            },
            reference_images: custom.form.reference_images.clone(),
        };

        let mut effects = self.reduce(state, AppAction::Catalog(CatalogAction::AddCustomOrder(request)), env);
        let recorded = state.catalog.custom_orders.last().map(|o| o.id.clone());

        state.custom_order = CustomOrderState {
            phase: SubmissionPhase::Submitted,
            last_request: recorded,
            ..CustomOrderState::default()
        };
        Self::navigate(state, Route::CustomOrderSuccess);
        metrics::counter!("storefront.custom_orders.submitted").increment(1);

        effects.extend(self.notify(
            state,
            NotificationAction::success(
                "Request received",
                "Thanks! We'll get back to you about your custom order within 48 hours.",
            ),
            env,
        ));
        effects
    }
}
