//! Typed form validation.
//!
//! Each form has a field enum and is checked by a pure `validate_*` function
//! that returns a [`Validation`] with one [`FieldCheck`] per field. Field
//! errors are data, never `Err` values: the flows turn each failure into a
//! notification and keep the form editable.

use crate::types::{PaintingDetails, ProductCategory, ProductDraft};
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::LazyLock;

#[allow(clippy::expect_used)]
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid regex"));

#[allow(clippy::expect_used)]
static MOBILE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[6-9][0-9]{9}$").expect("Invalid regex"));

#[allow(clippy::expect_used)]
static POSTAL_CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{6}$").expect("Invalid regex"));

/// Largest price the admin form accepts (₹10^12)
pub const MAX_PRICE: Decimal = Decimal::from_parts(3_567_587_328, 232, 0, false, 0);

/// Minimum trimmed length of a shipping address
pub const MIN_ADDRESS_LEN: usize = 10;

/// Minimum password length for login and signup
pub const MIN_PASSWORD_LEN: usize = 6;

/// Result of checking one field
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldCheck {
    /// Not checked since the form opened or the field was last edited
    #[default]
    Unchecked,
    /// Passed
    Valid,
    /// Failed, with a message for the user
    Invalid(String),
}

impl FieldCheck {
    fn from_error(error: Option<&str>) -> Self {
        error.map_or(Self::Valid, |reason| Self::Invalid(reason.to_string()))
    }

    /// True for [`FieldCheck::Invalid`]
    #[must_use]
    pub const fn is_invalid(&self) -> bool {
        matches!(self, Self::Invalid(_))
    }

    /// Failure message, if any
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Invalid(reason) => Some(reason),
            Self::Unchecked | Self::Valid => None,
        }
    }
}

/// A form's field enum
pub trait FormField: Copy + Eq + 'static {
    /// Every field, in display order
    const ALL: &'static [Self];

    /// Human-readable field name
    fn label(self) -> &'static str;
}

/// One [`FieldCheck`] per field of `F`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Validation<F> {
    checks: Vec<(F, FieldCheck)>,
}

impl<F: FormField> Default for Validation<F> {
    fn default() -> Self {
        Self {
            checks: F::ALL.iter().map(|&f| (f, FieldCheck::Unchecked)).collect(),
        }
    }
}

impl<F: FormField> Validation<F> {
    fn from_rules(rule: impl Fn(F) -> Option<&'static str>) -> Self {
        Self {
            checks: F::ALL
                .iter()
                .map(|&f| (f, FieldCheck::from_error(rule(f))))
                .collect(),
        }
    }

    fn from_messages(rule: impl Fn(F) -> Option<String>) -> Self {
        Self {
            checks: F::ALL
                .iter()
                .map(|&f| (f, rule(f).map_or(FieldCheck::Valid, FieldCheck::Invalid)))
                .collect(),
        }
    }

    /// The check for `field`
    #[must_use]
    pub fn check(&self, field: F) -> &FieldCheck {
        self.checks
            .iter()
            .find(|(f, _)| *f == field)
            .map_or(&FieldCheck::Unchecked, |(_, check)| check)
    }

    /// Reset a field to unchecked (called when the user edits it)
    pub fn clear(&mut self, field: F) {
        if let Some((_, check)) = self.checks.iter_mut().find(|(f, _)| *f == field) {
            *check = FieldCheck::Unchecked;
        }
    }

    /// True when no field is invalid
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.checks.iter().any(|(_, check)| check.is_invalid())
    }

    /// Failing fields and their messages, in display order
    pub fn failures(&self) -> impl Iterator<Item = (F, &str)> {
        self.checks
            .iter()
            .filter_map(|(field, check)| check.reason().map(|reason| (*field, reason)))
    }
}

/// Whether `email` looks like `local@domain.tld`
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Strip spaces, dashes, dots and parentheses from a phone number
#[must_use]
pub fn normalize_phone(phone: &str) -> String {
    phone
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '.' | '(' | ')'))
        .collect()
}

/// Ten-digit mobile number starting with 6-9, after normalization
#[must_use]
pub fn is_valid_mobile(phone: &str) -> bool {
    MOBILE_RE.is_match(&normalize_phone(phone))
}

fn email_error(email: &str) -> Option<&'static str> {
    if email.trim().is_empty() {
        Some("Email is required")
    } else if !is_valid_email(email.trim()) {
        Some("Please enter a valid email address")
    } else {
        None
    }
}

fn phone_error(phone: &str) -> Option<&'static str> {
    if phone.trim().is_empty() {
        Some("Phone number is required")
    } else if !is_valid_mobile(phone) {
        Some("Please enter a valid 10-digit mobile number")
    } else {
        None
    }
}

fn required(value: &str, message: &'static str) -> Option<&'static str> {
    value.trim().is_empty().then_some(message)
}

// ---------------------------------------------------------------------------
// Shipping (checkout)
// ---------------------------------------------------------------------------

/// Checkout shipping form fields
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShippingField {
    /// Full name
    Name,
    /// Email address
    Email,
    /// Mobile number
    Phone,
    /// Street address
    Address,
    /// City
    City,
    /// Postal code
    PostalCode,
}

impl FormField for ShippingField {
    const ALL: &'static [Self] = &[
        Self::Name,
        Self::Email,
        Self::Phone,
        Self::Address,
        Self::City,
        Self::PostalCode,
    ];

    fn label(self) -> &'static str {
        match self {
            Self::Name => "Full name",
            Self::Email => "Email",
            Self::Phone => "Phone",
            Self::Address => "Address",
            Self::City => "City",
            Self::PostalCode => "Postal code",
        }
    }
}

/// Checkout shipping form
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingForm {
    /// Full name
    pub name: String,
    /// Email address
    pub email: String,
    /// Mobile number
    pub phone: String,
    /// Street address
    pub address: String,
    /// City
    pub city: String,
    /// Postal code
    pub postal_code: String,
}

impl ShippingForm {
    /// Current value of a field
    #[must_use]
    pub fn value(&self, field: ShippingField) -> &str {
        match field {
            ShippingField::Name => &self.name,
            ShippingField::Email => &self.email,
            ShippingField::Phone => &self.phone,
            ShippingField::Address => &self.address,
            ShippingField::City => &self.city,
            ShippingField::PostalCode => &self.postal_code,
        }
    }

    /// Replace a field's value
    pub fn set(&mut self, field: ShippingField, value: String) {
        let slot = match field {
            ShippingField::Name => &mut self.name,
            ShippingField::Email => &mut self.email,
            ShippingField::Phone => &mut self.phone,
            ShippingField::Address => &mut self.address,
            ShippingField::City => &mut self.city,
            ShippingField::PostalCode => &mut self.postal_code,
        };
        *slot = value;
    }

    /// `"<address>, <city>, <postal code>"`
    #[must_use]
    pub fn full_address(&self) -> String {
        format!(
            "{}, {}, {}",
            self.address.trim(),
            self.city.trim(),
            self.postal_code.trim()
        )
    }
}

/// Per-field result of [`validate_shipping`]
pub type ShippingValidation = Validation<ShippingField>;

/// Run every shipping rule
#[must_use]
pub fn validate_shipping(form: &ShippingForm) -> ShippingValidation {
    Validation::from_rules(|field| {
        let value = form.value(field);
        match field {
            ShippingField::Name => required(value, "Full name is required"),
            ShippingField::Email => email_error(value),
            ShippingField::Phone => phone_error(value),
            ShippingField::Address => {
                let address = value.trim();
                if address.is_empty() {
                    Some("Address is required")
                } else if address.chars().count() < MIN_ADDRESS_LEN {
                    Some("Address must be at least 10 characters long")
                } else {
                    None
                }
            },
            ShippingField::City => {
                let city = value.trim();
                if city.is_empty() {
                    Some("City is required")
                } else if !city.chars().all(|c| c.is_alphabetic() || c == ' ') {
                    Some("City may only contain letters and spaces")
                } else {
                    None
                }
            },
            ShippingField::PostalCode => {
                let code = value.trim();
                if code.is_empty() {
                    Some("Postal code is required")
                } else if !POSTAL_CODE_RE.is_match(code) {
                    Some("Please enter a valid 6-digit postal code")
                } else {
                    None
                }
            },
        }
    })
}

// ---------------------------------------------------------------------------
// Custom order
// ---------------------------------------------------------------------------

/// Custom order form fields
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CustomOrderField {
    /// What to make
    Description,
    /// Free-text size
    Size,
    /// Budget in rupees
    Budget,
    /// Customer name
    Name,
    /// Customer email
    Email,
    /// Customer phone
    Phone,
    /// Attached images
    ReferenceImages,
}

impl FormField for CustomOrderField {
    const ALL: &'static [Self] = &[
        Self::Description,
        Self::Size,
        Self::Budget,
        Self::Name,
        Self::Email,
        Self::Phone,
        Self::ReferenceImages,
    ];

    fn label(self) -> &'static str {
        match self {
            Self::Description => "Description",
            Self::Size => "Size",
            Self::Budget => "Budget",
            Self::Name => "Name",
            Self::Email => "Email",
            Self::Phone => "Phone",
            Self::ReferenceImages => "Reference images",
        }
    }
}

/// Limits applied to custom orders
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CustomOrderLimits {
    /// Smallest budget accepted
    pub budget_min: Decimal,
    /// Largest budget accepted
    pub budget_max: Decimal,
    /// Most reference images accepted
    pub max_reference_images: usize,
}

/// Custom order form (text fields as typed)
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomOrderForm {
    /// Free-text description
    pub description: String,
    /// Free-text size
    pub size: String,
    /// Budget as typed
    pub budget: String,
    /// Customer name
    pub name: String,
    /// Customer email
    pub email: String,
    /// Customer phone
    pub phone: String,
    /// Attached images
    pub reference_images: Vec<String>,
}

impl CustomOrderForm {
    /// Replace a text field's value (reference images are managed separately)
    pub fn set(&mut self, field: CustomOrderField, value: String) {
        match field {
            CustomOrderField::Description => self.description = value,
            CustomOrderField::Size => self.size = value,
            CustomOrderField::Budget => self.budget = value,
            CustomOrderField::Name => self.name = value,
            CustomOrderField::Email => self.email = value,
            CustomOrderField::Phone => self.phone = value,
            CustomOrderField::ReferenceImages => {},
        }
    }

    /// Parsed budget, if the text is a decimal number
    #[must_use]
    pub fn parsed_budget(&self) -> Option<Decimal> {
        Decimal::from_str(self.budget.trim()).ok()
    }
}

/// Per-field result of [`validate_custom_order`]
pub type CustomOrderValidation = Validation<CustomOrderField>;

/// Run every custom order rule
#[must_use]
pub fn validate_custom_order(form: &CustomOrderForm, limits: &CustomOrderLimits) -> CustomOrderValidation {
    Validation::from_messages(|field| match field {
        CustomOrderField::Description => {
            required(&form.description, "Please describe what you would like made").map(str::to_string)
        },
        CustomOrderField::Size => None,
        CustomOrderField::Budget => {
            if form.budget.trim().is_empty() {
                return Some("Budget is required".to_string());
            }
            match form.parsed_budget() {
                None => Some("Please enter a valid amount".to_string()),
                Some(budget) if budget < limits.budget_min => {
                    Some(format!("Budget must be at least ₹{}", limits.budget_min))
                },
                Some(budget) if budget > limits.budget_max => {
                    Some(format!("Budget must not exceed ₹{}", limits.budget_max))
                },
                Some(_) => None,
            }
        },
        CustomOrderField::Name => required(&form.name, "Full name is required").map(str::to_string),
        CustomOrderField::Email => email_error(&form.email).map(str::to_string),
        CustomOrderField::Phone => phone_error(&form.phone).map(str::to_string),
        CustomOrderField::ReferenceImages => (form.reference_images.len()
            > limits.max_reference_images)
            .then(|| format!("At most {} reference images", limits.max_reference_images)),
    })
}

// ---------------------------------------------------------------------------
// Login and signup
// ---------------------------------------------------------------------------

/// Login form fields
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LoginField {
    /// Email address
    Email,
    /// Password
    Password,
}

impl FormField for LoginField {
    const ALL: &'static [Self] = &[Self::Email, Self::Password];

    fn label(self) -> &'static str {
        match self {
            Self::Email => "Email",
            Self::Password => "Password",
        }
    }
}

/// Login form
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginForm {
    /// Email address
    pub email: String,
    /// Password
    pub password: String,
}

impl LoginForm {
    /// Replace a field's value
    pub fn set(&mut self, field: LoginField, value: String) {
        match field {
            LoginField::Email => self.email = value,
            LoginField::Password => self.password = value,
        }
    }
}

/// Per-field result of [`validate_login`]
pub type LoginValidation = Validation<LoginField>;

fn password_length_error(password: &str) -> Option<&'static str> {
    if password.is_empty() {
        Some("Password is required")
    } else if password.chars().count() < MIN_PASSWORD_LEN {
        Some("Password must be at least 6 characters long")
    } else {
        None
    }
}

/// Check email format and password length
#[must_use]
pub fn validate_login(form: &LoginForm) -> LoginValidation {
    Validation::from_rules(|field| match field {
        LoginField::Email => email_error(&form.email),
        LoginField::Password => password_length_error(&form.password),
    })
}

/// Signup form fields
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignupField {
    /// Full name
    Name,
    /// Email address
    Email,
    /// Mobile number
    Phone,
    /// Password
    Password,
    /// Password again
    ConfirmPassword,
    /// Terms and conditions checkbox
    Terms,
}

impl FormField for SignupField {
    const ALL: &'static [Self] = &[
        Self::Name,
        Self::Email,
        Self::Phone,
        Self::Password,
        Self::ConfirmPassword,
        Self::Terms,
    ];

    fn label(self) -> &'static str {
        match self {
            Self::Name => "Full name",
            Self::Email => "Email",
            Self::Phone => "Phone",
            Self::Password => "Password",
            Self::ConfirmPassword => "Confirm password",
            Self::Terms => "Terms",
        }
    }
}

/// Signup form
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupForm {
    /// Full name
    pub name: String,
    /// Email address
    pub email: String,
    /// Mobile number
    pub phone: String,
    /// Password
    pub password: String,
    /// Password again
    pub confirm_password: String,
    /// Terms accepted
    pub accept_terms: bool,
}

impl SignupForm {
    /// Replace a text field's value (the terms checkbox is set directly)
    pub fn set(&mut self, field: SignupField, value: String) {
        match field {
            SignupField::Name => self.name = value,
            SignupField::Email => self.email = value,
            SignupField::Phone => self.phone = value,
            SignupField::Password => self.password = value,
            SignupField::ConfirmPassword => self.confirm_password = value,
            SignupField::Terms => {},
        }
    }
}

/// Per-field result of [`validate_signup`]
pub type SignupValidation = Validation<SignupField>;

/// Run every signup rule
#[must_use]
pub fn validate_signup(form: &SignupForm) -> SignupValidation {
    Validation::from_rules(|field| match field {
        SignupField::Name => {
            let name = form.name.trim();
            if name.is_empty() {
                Some("Full name is required")
            } else if name.chars().count() < 2 {
                Some("Name must be at least 2 characters long")
            } else {
                None
            }
        },
        SignupField::Email => email_error(&form.email),
        SignupField::Phone => phone_error(&form.phone),
        SignupField::Password => password_length_error(&form.password).or_else(|| {
            let has_upper = form.password.chars().any(char::is_uppercase);
            let has_lower = form.password.chars().any(char::is_lowercase);
            let has_digit = form.password.chars().any(|c| c.is_ascii_digit());
            (!(has_upper && has_lower && has_digit)).then_some(
                "Password must contain at least one uppercase letter, one lowercase letter, and one number",
            )
        }),
        SignupField::ConfirmPassword => {
            if form.confirm_password.is_empty() {
                Some("Please confirm your password")
            } else if form.confirm_password != form.password {
                Some("Passwords don't match")
            } else {
                None
            }
        },
        SignupField::Terms => {
            (!form.accept_terms).then_some("You must agree to the terms and conditions")
        },
    })
}

// ---------------------------------------------------------------------------
// Profile
// ---------------------------------------------------------------------------

/// Profile editor fields
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProfileField {
    /// Display name
    Name,
    /// Email address
    Email,
    /// Mobile number (optional)
    Phone,
    /// Saved address (optional)
    Address,
}

impl FormField for ProfileField {
    const ALL: &'static [Self] = &[Self::Name, Self::Email, Self::Phone, Self::Address];

    fn label(self) -> &'static str {
        match self {
            Self::Name => "Full name",
            Self::Email => "Email",
            Self::Phone => "Phone",
            Self::Address => "Address",
        }
    }
}

/// Profile editor draft
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileForm {
    /// Display name
    pub name: String,
    /// Email address
    pub email: String,
    /// Mobile number
    pub phone: String,
    /// Saved address
    pub address: String,
}

impl ProfileForm {
    /// Replace a field's value
    pub fn set(&mut self, field: ProfileField, value: String) {
        match field {
            ProfileField::Name => self.name = value,
            ProfileField::Email => self.email = value,
            ProfileField::Phone => self.phone = value,
            ProfileField::Address => self.address = value,
        }
    }
}

/// Per-field result of [`validate_profile`]
pub type ProfileValidation = Validation<ProfileField>;

/// Name and email required; phone checked only when given
#[must_use]
pub fn validate_profile(form: &ProfileForm) -> ProfileValidation {
    Validation::from_rules(|field| match field {
        ProfileField::Name => required(&form.name, "Full name is required"),
        ProfileField::Email => email_error(&form.email),
        ProfileField::Phone if form.phone.trim().is_empty() => None,
        ProfileField::Phone => phone_error(&form.phone),
        ProfileField::Address => None,
    })
}

// ---------------------------------------------------------------------------
// Admin product form
// ---------------------------------------------------------------------------

/// Admin product form fields that carry rules
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProductField {
    /// Title
    Title,
    /// Price
    Price,
    /// Image reference
    Image,
}

impl FormField for ProductField {
    const ALL: &'static [Self] = &[Self::Title, Self::Price, Self::Image];

    fn label(self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::Price => "Price",
            Self::Image => "Image",
        }
    }
}

/// Admin product form (text fields as typed)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductForm {
    /// Title
    pub title: String,
    /// Price as typed
    pub price: String,
    /// Image reference
    pub image: String,
    /// Optional description
    pub description: String,
    /// Category
    pub category: ProductCategory,
    /// Availability
    pub in_stock: bool,
    /// Painting height
    pub height: String,
    /// Painting width
    pub width: String,
    /// Painting medium
    pub medium: String,
}

impl Default for ProductForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            price: String::new(),
            image: String::new(),
            description: String::new(),
            category: ProductCategory::Painting,
            in_stock: true,
            height: String::new(),
            width: String::new(),
            medium: String::new(),
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

impl ProductForm {
    /// Build a catalog draft when every rule passes
    #[must_use]
    pub fn to_draft(&self) -> Option<ProductDraft> {
        if !validate_product(self).is_valid() {
            return None;
        }
        let price = Decimal::from_str(self.price.trim()).ok()?;
        let painting = (self.category == ProductCategory::Painting).then(|| PaintingDetails {
            height: non_empty(&self.height),
            width: non_empty(&self.width),
            medium: non_empty(&self.medium),
        });

        Some(ProductDraft {
            title: self.title.trim().to_string(),
            price,
            image: self.image.trim().to_string(),
            description: non_empty(&self.description),
            category: self.category,
            in_stock: self.in_stock,
            painting,
        })
    }
}

/// Per-field result of [`validate_product`]
pub type ProductValidation = Validation<ProductField>;

/// Title and image present, price a positive decimal no larger than [`MAX_PRICE`]
#[must_use]
pub fn validate_product(form: &ProductForm) -> ProductValidation {
    Validation::from_rules(|field| match field {
        ProductField::Title => required(&form.title, "Title is required"),
        ProductField::Image => required(&form.image, "Image is required"),
        ProductField::Price => match Decimal::from_str(form.price.trim()) {
            Ok(price) if price <= Decimal::ZERO => Some("Price must be greater than zero"),
            Ok(price) if price > MAX_PRICE => Some("Price is too large"),
            Ok(_) => None,
            Err(_) => Some("Please enter a valid price"),
        },
    })
}
