//! Demo sign-in.
//!
//! Login compares against one configured credential pair and nothing is
//! stored; any other well-formed pair signs in a customer. Both login and
//! signup wait a fixed delay before completing. A signed-in user can edit
//! their profile through a draft that is only applied on save.

use crate::app::{AppAction, AppEffects, AppReducer, AppState};
use crate::catalog::CatalogAction;
use crate::environment::StorefrontEnvironment;
use crate::notifications::NotificationAction;
use crate::routes::Route;
use crate::validation::{
    validate_login, validate_profile, validate_signup, FormField, LoginField, LoginForm,
    LoginValidation, ProfileField, ProfileForm, ProfileValidation, SignupField, SignupForm,
    SignupValidation, Validation,
};
use serde::{Deserialize, Serialize};
use storefront_core::effect::Effect;
use storefront_core::reducer::Reducer;
use storefront_core::{smallvec, SmallVec};

/// Role of the signed-in user
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Shopper
    Customer,
    /// Shop owner; unlocks `/admin`
    Admin,
}

/// The signed-in user
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    /// Login email
    pub email: String,
    /// Display name
    pub name: String,
    /// Customer or admin
    pub role: Role,
    /// Mobile number, empty until set on the profile page
    #[serde(default)]
    pub phone: String,
    /// Saved address, empty until set on the profile page
    #[serde(default)]
    pub address: String,
}

impl SessionUser {
    fn profile(&self) -> ProfileForm {
        ProfileForm {
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            address: self.address.clone(),
        }
    }
}

/// Session and auth form state
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    /// Who is signed in
    pub user: Option<SessionUser>,
    /// Login form
    pub login: LoginForm,
    /// Login validation
    pub login_validation: LoginValidation,
    /// Waiting on the login delay
    pub logging_in: bool,
    /// Signup form
    pub signup: SignupForm,
    /// Signup validation
    pub signup_validation: SignupValidation,
    /// Waiting on the signup delay
    pub signing_up: bool,
    /// Profile draft; `Some` while the editor is open
    pub profile: Option<ProfileForm>,
    /// Profile validation
    pub profile_validation: ProfileValidation,
}

impl SessionState {
    /// Whether an admin is signed in
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(|u| u.role == Role::Admin)
    }
}

/// Session actions
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionAction {
    /// Edit a login field
    EditLogin {
        /// Field edited
        field: LoginField,
        /// New value
        value: String,
    },
    /// Sign in with the login form
    SubmitLogin,
    /// Login delay elapsed
    LoginFinished,
    /// Edit a signup text field
    EditSignup {
        /// Field edited
        field: SignupField,
        /// New value
        value: String,
    },
    /// Tick or untick the terms checkbox
    SetAcceptTerms(bool),
    /// Create the account
    SubmitSignup,
    /// Signup delay elapsed
    SignupFinished,
    /// Open the profile editor with the current user's details
    EditProfile,
    /// Edit a profile field
    EditProfileField {
        /// Field edited
        field: ProfileField,
        /// New value
        value: String,
    },
    /// Validate the draft and apply it to the signed-in user
    SaveProfile,
    /// Close the editor, discarding the draft
    CancelProfileEdit,
    /// Sign out
    Logout,
}

fn display_name(email: &str) -> String {
    email.split('@').next().unwrap_or(email).to_string()
}

impl AppReducer {
    pub(crate) fn reduce_session(
        &self,
        state: &mut AppState,
        action: SessionAction,
        env: &StorefrontEnvironment,
    ) -> AppEffects {
        let session = &mut state.session;
        match action {
            SessionAction::EditLogin { field, value } if !session.logging_in => {
                session.login.set(field, value);
                session.login_validation.clear(field);
                SmallVec::new()
            },
            SessionAction::SubmitLogin if !session.logging_in => {
                session.login_validation = validate_login(&session.login);
                if !session.login_validation.is_valid() {
                    let failures = collect(&session.login_validation);
                    return self.report_failures(state, failures, env);
                }
                session.logging_in = true;
                smallvec![Effect::delay(
                    env.config.login_delay,
                    AppAction::Session(SessionAction::LoginFinished),
                )]
            },
            SessionAction::LoginFinished if session.logging_in => self.complete_login(state, env),
            SessionAction::EditSignup { field, value } if !session.signing_up => {
                session.signup.set(field, value);
                session.signup_validation.clear(field);
                SmallVec::new()
            },
            SessionAction::SetAcceptTerms(accepted) if !session.signing_up => {
                session.signup.accept_terms = accepted;
                session.signup_validation.clear(SignupField::Terms);
                SmallVec::new()
            },
            SessionAction::SubmitSignup if !session.signing_up => {
                session.signup_validation = validate_signup(&session.signup);
                if !session.signup_validation.is_valid() {
                    let failures = collect(&session.signup_validation);
                    return self.report_failures(state, failures, env);
                }
                session.signing_up = true;
                smallvec![Effect::delay(
                    env.config.signup_delay,
                    AppAction::Session(SessionAction::SignupFinished),
                )]
            },
            SessionAction::SignupFinished if session.signing_up => self.complete_signup(state, env),
            SessionAction::EditProfile => {
                if let Some(user) = &session.user {
                    session.profile = Some(user.profile());
                    session.profile_validation = ProfileValidation::default();
                }
                SmallVec::new()
            },
            SessionAction::EditProfileField { field, value } => {
                if let Some(draft) = session.profile.as_mut() {
                    draft.set(field, value);
                    session.profile_validation.clear(field);
                }
                SmallVec::new()
            },
            SessionAction::SaveProfile => self.save_profile(state, env),
            SessionAction::CancelProfileEdit => {
                session.profile = None;
                session.profile_validation = ProfileValidation::default();
                SmallVec::new()
            },
            SessionAction::Logout => {
                if let Some(user) = session.user.take() {
                    tracing::info!(email = %user.email, "Signed out");
                }
                session.profile = None;
                session.profile_validation = ProfileValidation::default();
                let mut effects = self.reduce(state, AppAction::Catalog(CatalogAction::SetAdminStatus(false)), env);
                Self::navigate(state, Route::Home);
                effects.extend(self.notify(
                    state,
                    NotificationAction::success("Signed out", "You have been signed out."),
                    env,
                ));
                effects
            },
            action => {
                tracing::debug!(?action, "Session action ignored");
                SmallVec::new()
            },
        }
    }

    fn report_failures(
        &self,
        state: &mut AppState,
        failures: Vec<(&'static str, String)>,
        env: &StorefrontEnvironment,
    ) -> AppEffects {
        let mut effects = AppEffects::new();
        for (label, reason) in failures {
            effects.extend(self.notify(state, NotificationAction::error(label, reason), env));
        }
        effects
    }

    fn complete_login(&self, state: &mut AppState, env: &StorefrontEnvironment) -> AppEffects {
        let session = &mut state.session;
        session.logging_in = false;

        let email = session.login.email.trim().to_string();
        let role = if email == env.config.admin_email && session.login.password == env.config.admin_password {
            Role::Admin
        } else {
            Role::Customer
        };
        session.login.password.clear();
        session.user = Some(SessionUser {
            name: display_name(&email),
            email: email.clone(),
            role,
            phone: String::new(),
            address: String::new(),
        });
        tracing::info!(%email, ?role, "Signed in");
        metrics::counter!("storefront.logins.total").increment(1);

        let admin = role == Role::Admin;
        let mut effects = self.reduce(state, AppAction::Catalog(CatalogAction::SetAdminStatus(admin)), env);
        Self::navigate(state, if admin { Route::Admin } else { Route::Home });
        effects.extend(self.notify(
            state,
            NotificationAction::success("Welcome back", format!("Signed in as {email}.")),
            env,
        ));
        effects
    }

    fn save_profile(&self, state: &mut AppState, env: &StorefrontEnvironment) -> AppEffects {
        let session = &mut state.session;
        let (Some(user), Some(draft)) = (session.user.as_mut(), session.profile.as_ref()) else {
            tracing::debug!("Profile save without an open editor ignored");
            return SmallVec::new();
        };

        session.profile_validation = validate_profile(draft);
        if !session.profile_validation.is_valid() {
            let failures = collect(&session.profile_validation);
            return self.report_failures(state, failures, env);
        }

        user.name = draft.name.trim().to_string();
        user.email = draft.email.trim().to_string();
        user.phone = draft.phone.trim().to_string();
        user.address = draft.address.trim().to_string();
        tracing::info!(email = %user.email, "Profile updated");
        session.profile = None;
        session.profile_validation = ProfileValidation::default();

        self.notify(
            state,
            NotificationAction::success("Profile updated", "Your details have been saved."),
            env,
        )
    }

    fn complete_signup(&self, state: &mut AppState, env: &StorefrontEnvironment) -> AppEffects {
        let session = &mut state.session;
        let email = session.signup.email.trim().to_string();
        session.signing_up = false;
        session.signup = SignupForm::default();
        session.signup_validation = SignupValidation::default();
        session.login = LoginForm {
            email: email.clone(),
            password: String::new(),
        };
        session.login_validation = LoginValidation::default();
        tracing::info!(%email, "Account created");

        Self::navigate(state, Route::Login);
        self.notify(
            state,
            NotificationAction::success("Account created", "Your account is ready. Please sign in."),
            env,
        )
    }
}

fn collect<F: FormField>(validation: &Validation<F>) -> Vec<(&'static str, String)> {
    validation
        .failures()
        .map(|(field, reason)| (field.label(), reason.to_string()))
        .collect()
}
