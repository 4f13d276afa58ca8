//! Notification store: transient banners with per-notification expiry timers.
//!
//! Each timed notification schedules one cancellable delay keyed by its own
//! id, so adding or dismissing one notification never touches another's
//! timer. Dismissal cancels the timer; expiry and dismissal are both no-ops
//! once the entry is gone.

use crate::environment::StorefrontEnvironment;
use crate::types::NotificationId;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use storefront_core::effect::{Effect, EffectId};
use storefront_core::reducer::Reducer;
use storefront_core::{smallvec, SmallVec};

/// Banner severity
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Something worked
    Success,
    /// Something failed
    Error,
    /// Neutral information
    Info,
    /// Needs attention
    Warning,
}

/// A banner on screen
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Unique id
    pub id: NotificationId,
    /// Severity
    pub severity: Severity,
    /// Short heading
    pub title: String,
    /// Body text
    pub message: String,
    /// Time until expiry; `None` for persistent banners
    pub duration: Option<Duration>,
}

/// Notifications currently shown, oldest first
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationsState {
    /// Active banners
    pub items: Vec<Notification>,
}

impl NotificationsState {
    /// The most recently added banner
    #[must_use]
    pub fn latest(&self) -> Option<&Notification> {
        self.items.last()
    }

    /// Look up a banner
    #[must_use]
    pub fn get(&self, id: &NotificationId) -> Option<&Notification> {
        self.items.iter().find(|n| &n.id == id)
    }

    /// Number of active banners
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when nothing is shown
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn remove(&mut self, id: &NotificationId) -> bool {
        let before = self.items.len();
        self.items.retain(|n| &n.id != id);
        self.items.len() < before
    }
}

/// Notification actions
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationAction {
    /// Show a banner
    Add {
        /// Severity
        severity: Severity,
        /// Heading
        title: String,
        /// Body
        message: String,
        /// `None` uses the configured default; `Some(ZERO)` is persistent
        duration: Option<Duration>,
    },
    /// Closed by the user
    Dismiss(NotificationId),
    /// Expiry timer fired
    Expire(NotificationId),
}

impl NotificationAction {
    /// Banner with the default lifetime
    #[must_use]
    pub fn new(severity: Severity, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Add {
            severity,
            title: title.into(),
            message: message.into(),
            duration: None,
        }
    }

    /// Success banner with the default lifetime
    #[must_use]
    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Success, title, message)
    }

    /// Error banner with the default lifetime
    #[must_use]
    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, title, message)
    }

    /// Warning banner with the default lifetime
    #[must_use]
    pub fn warning(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, title, message)
    }

    /// Override the lifetime (`Duration::ZERO` keeps the banner until dismissed)
    #[must_use]
    pub fn lasting(self, lifetime: Duration) -> Self {
        match self {
            Self::Add {
                severity,
                title,
                message,
                ..
            } => Self::Add {
                severity,
                title,
                message,
                duration: Some(lifetime),
            },
            other => other,
        }
    }
}

/// Cancellation key of a notification's expiry timer
#[must_use]
pub fn expiry_id(id: &NotificationId) -> EffectId {
    EffectId::new(format!("notification/{id}"))
}

/// Reducer for [`NotificationsState`]
#[derive(Clone, Copy, Debug, Default)]
pub struct NotificationsReducer;

impl Reducer for NotificationsReducer {
    type State = NotificationsState;
    type Action = NotificationAction;
    type Environment = StorefrontEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            NotificationAction::Add {
                severity,
                title,
                message,
                duration,
            } => {
                let id = NotificationId::new(env.next_id());
                let lifetime = duration.unwrap_or(env.config.notification_duration);
                let duration = (!lifetime.is_zero()).then_some(lifetime);

                state.items.push(Notification {
                    id: id.clone(),
                    severity,
                    title,
                    message,
                    duration,
                });

                match duration {
                    Some(lifetime) => smallvec![
                        Effect::delay(lifetime, NotificationAction::Expire(id.clone()))
                            .cancellable(expiry_id(&id))
                    ],
                    None => SmallVec::new(),
                }
            },
            NotificationAction::Dismiss(id) => {
                if state.remove(&id) {
                    smallvec![Effect::Cancel(expiry_id(&id))]
                } else {
                    SmallVec::new()
                }
            },
            NotificationAction::Expire(id) => {
                if !state.remove(&id) {
                    tracing::trace!(notification_id = %id, "Expired notification already dismissed");
                }
                SmallVec::new()
            },
        }
    }
}
