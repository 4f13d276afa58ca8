//! Domain types shared by the storefront stores.
//!
//! Orders and cart lines hold value-typed snapshots of products rather than
//! references into the catalog, so editing or deleting a product never changes
//! an order that was already placed.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wraps an existing identifier
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Returns the identifier as a string slice
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }
    };
}

string_id!(
    /// Unique identifier for a catalog product
    ProductId
);
string_id!(
    /// Unique identifier for a placed order
    TransactionId
);
string_id!(
    /// Unique identifier for a custom commission request
    CustomOrderId
);
string_id!(
    /// Unique identifier for a notification banner
    NotificationId
);

/// Product category
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProductCategory {
    /// Original paintings (carry dimensions and medium)
    Painting,
    /// Handmade crafts
    Craft,
    /// Printed tote bags
    ToteBag,
}

impl ProductCategory {
    /// Every category, in menu order
    pub const ALL: [Self; 3] = [Self::Painting, Self::Craft, Self::ToteBag];

    /// Wire name (`painting`, `craft`, `tote-bag`)
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Painting => "painting",
            Self::Craft => "craft",
            Self::ToteBag => "tote-bag",
        }
    }
}

impl fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// Painting-only attributes
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaintingDetails {
    /// Height, as entered (inches)
    pub height: Option<String>,
    /// Width, as entered (inches)
    pub width: Option<String>,
    /// e.g. "Acrylic on Canvas"
    pub medium: Option<String>,
}

/// A catalog product
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier, assigned at creation
    pub id: ProductId,
    /// Display title
    pub title: String,
    /// Price in rupees
    pub price: Decimal,
    /// Image reference (URL or asset path)
    pub image: String,
    /// Optional long description
    pub description: Option<String>,
    /// Category
    pub category: ProductCategory,
    /// Whether the product can currently be bought
    pub in_stock: bool,
    /// When the product was added
    pub created_at: DateTime<Utc>,
    /// Dimensions and medium (paintings only)
    pub painting: Option<PaintingDetails>,
}

impl Product {
    /// Copies the fields a cart line needs
    #[must_use]
    pub fn snapshot(&self) -> ProductSnapshot {
        ProductSnapshot {
            id: self.id.clone(),
            title: self.title.clone(),
            price: self.price,
            image: self.image.clone(),
            category: self.category,
        }
    }
}

/// Fields of a product that does not exist yet
///
/// The catalog assigns the id and creation timestamp.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    /// Display title
    pub title: String,
    /// Price in rupees
    pub price: Decimal,
    /// Image reference
    pub image: String,
    /// Optional long description
    pub description: Option<String>,
    /// Category
    pub category: ProductCategory,
    /// Availability
    pub in_stock: bool,
    /// Painting attributes; dropped for other categories
    pub painting: Option<PaintingDetails>,
}

/// Denormalized copy of a product taken when it is added to the cart
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSnapshot {
    /// Product the snapshot was taken from
    pub id: ProductId,
    /// Title at snapshot time
    pub title: String,
    /// Price at snapshot time
    pub price: Decimal,
    /// Image at snapshot time
    pub image: String,
    /// Category at snapshot time
    pub category: ProductCategory,
}

/// Customer contact block stored on a placed order
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    /// Full name
    pub name: String,
    /// Email address
    pub email: String,
    /// Single-line shipping address (`address, city, postal code`)
    pub address: String,
    /// Phone number as entered
    pub phone: String,
}

/// Customer contact block stored on a custom order request
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerContact {
    /// Full name
    pub name: String,
    /// Email address
    pub email: String,
    /// Phone number as entered
    pub phone: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_serialize_as_kebab_case() {
        let json = serde_json::to_string(&ProductCategory::ToteBag).unwrap_or_default();
        assert_eq!(json, "\"tote-bag\"");
        assert_eq!(ProductCategory::ToteBag.to_string(), "tote-bag");
    }

    #[test]
    fn ids_serialize_transparently() {
        let id = ProductId::new("42");
        assert_eq!(serde_json::to_string(&id).unwrap_or_default(), "\"42\"");
        assert_eq!(ProductId::from("42"), id);
    }
}
