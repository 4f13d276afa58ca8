//! Configuration management for the storefront.
//!
//! Loads configuration from environment variables with sensible defaults.
//! Every knob has a default that matches the shipped storefront behaviour,
//! so an empty environment is a valid configuration.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Errors raised while reading configuration
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable is set but cannot be parsed
    #[error("invalid value {value:?} for {key}: {reason}")]
    Invalid {
        /// Environment variable name
        key: &'static str,
        /// Raw value found
        value: String,
        /// Parser message
        reason: String,
    },

    /// The custom-order budget bounds are inverted or not positive
    #[error("budget range {min}..={max} is empty or not positive")]
    BudgetRange {
        /// Configured minimum
        min: Decimal,
        /// Configured maximum
        max: Decimal,
    },
}

/// Storefront configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorefrontConfig {
    /// Simulated payment processing time (`STOREFRONT_CHECKOUT_DELAY_MS`)
    pub checkout_delay: Duration,
    /// Simulated custom order submission time (`STOREFRONT_CUSTOM_ORDER_DELAY_MS`)
    pub custom_order_delay: Duration,
    /// Simulated sign-in time (`STOREFRONT_LOGIN_DELAY_MS`)
    pub login_delay: Duration,
    /// Simulated account creation time (`STOREFRONT_SIGNUP_DELAY_MS`)
    pub signup_delay: Duration,
    /// Lifetime of a notification when none is given (`STOREFRONT_NOTIFICATION_MS`)
    pub notification_duration: Duration,
    /// Smallest accepted custom order budget (`STOREFRONT_BUDGET_MIN`)
    pub budget_min: Decimal,
    /// Largest accepted custom order budget (`STOREFRONT_BUDGET_MAX`)
    pub budget_max: Decimal,
    /// Reference images allowed per custom order (`STOREFRONT_MAX_REFERENCE_IMAGES`)
    pub max_reference_images: usize,
    /// Demo admin login (`STOREFRONT_ADMIN_EMAIL`)
    pub admin_email: String,
    /// Demo admin password (`STOREFRONT_ADMIN_PASSWORD`)
    pub admin_password: String,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            checkout_delay: Duration::from_millis(2000),
            custom_order_delay: Duration::from_millis(1000),
            login_delay: Duration::from_millis(1500),
            signup_delay: Duration::from_millis(2000),
            notification_duration: Duration::from_millis(5000),
            budget_min: Decimal::from(4000),
            budget_max: Decimal::from(1_000_000),
            max_reference_images: 5,
            admin_email: "admin@exotikacreation.com".to_string(),
            admin_password: "admin123".to_string(),
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from the process environment
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a variable is set to an unparsable value or
    /// the budget bounds are inconsistent.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through `lookup`, falling back to defaults for
    /// unset variables
    ///
    /// # Errors
    ///
    /// Same as [`StorefrontConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let config = Self {
            checkout_delay: millis(&lookup, "STOREFRONT_CHECKOUT_DELAY_MS", defaults.checkout_delay)?,
            custom_order_delay: millis(
                &lookup,
                "STOREFRONT_CUSTOM_ORDER_DELAY_MS",
                defaults.custom_order_delay,
            )?,
            login_delay: millis(&lookup, "STOREFRONT_LOGIN_DELAY_MS", defaults.login_delay)?,
            signup_delay: millis(&lookup, "STOREFRONT_SIGNUP_DELAY_MS", defaults.signup_delay)?,
            notification_duration: millis(
                &lookup,
                "STOREFRONT_NOTIFICATION_MS",
                defaults.notification_duration,
            )?,
            budget_min: parsed(&lookup, "STOREFRONT_BUDGET_MIN", defaults.budget_min)?,
            budget_max: parsed(&lookup, "STOREFRONT_BUDGET_MAX", defaults.budget_max)?,
            max_reference_images: parsed(
                &lookup,
                "STOREFRONT_MAX_REFERENCE_IMAGES",
                defaults.max_reference_images,
            )?,
            admin_email: lookup("STOREFRONT_ADMIN_EMAIL").unwrap_or(defaults.admin_email),
            admin_password: lookup("STOREFRONT_ADMIN_PASSWORD").unwrap_or(defaults.admin_password),
        };

        if config.budget_min <= Decimal::ZERO || config.budget_min > config.budget_max {
            return Err(ConfigError::BudgetRange {
                min: config.budget_min,
                max: config.budget_max,
            });
        }

        Ok(config)
    }
}

fn parsed<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            value: raw.clone(),
            reason: e.to_string(),
        }),
    }
}

fn millis<F>(lookup: &F, key: &'static str, default: Duration) -> Result<Duration, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let default_ms = u64::try_from(default.as_millis()).unwrap_or(u64::MAX);
    parsed(lookup, key, default_ms).map(Duration::from_millis)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn empty_environment_yields_defaults() {
        let config = StorefrontConfig::from_lookup(|_| None);
        assert_eq!(config, Ok(StorefrontConfig::default()));
    }

    #[test]
    fn overrides_are_applied() {
        let config = StorefrontConfig::from_lookup(lookup_from(&[
            ("STOREFRONT_CHECKOUT_DELAY_MS", "250"),
            ("STOREFRONT_BUDGET_MIN", "5000.50"),
            ("STOREFRONT_MAX_REFERENCE_IMAGES", " 3 "),
            ("STOREFRONT_ADMIN_EMAIL", "owner@example.com"),
        ]));

        let Ok(config) = config else {
            unreachable!("valid overrides must load: {config:?}");
        };
        assert_eq!(config.checkout_delay, Duration::from_millis(250));
        assert_eq!(config.budget_min, Decimal::new(500_050, 2));
        assert_eq!(config.max_reference_images, 3);
        assert_eq!(config.admin_email, "owner@example.com");
        assert_eq!(config.login_delay, Duration::from_millis(1500));
    }

    #[test]
    fn malformed_value_is_an_error() {
        let result = StorefrontConfig::from_lookup(lookup_from(&[(
            "STOREFRONT_NOTIFICATION_MS",
            "five seconds",
        )]));
        assert!(matches!(
            result,
            Err(ConfigError::Invalid { key: "STOREFRONT_NOTIFICATION_MS", .. })
        ));
    }

    #[test]
    fn inverted_budget_range_is_rejected() {
        let result = StorefrontConfig::from_lookup(lookup_from(&[
            ("STOREFRONT_BUDGET_MIN", "9000"),
            ("STOREFRONT_BUDGET_MAX", "100"),
        ]));
        assert!(matches!(result, Err(ConfigError::BudgetRange { .. })));
    }
}
