//! Routing table.

use crate::catalog::CatalogState;
use crate::types::{Product, ProductCategory, ProductId};
use serde::{Deserialize, Serialize};

/// A storefront view
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Route {
    /// `/`
    #[default]
    Home,
    /// `/paintings`
    Paintings,
    /// `/crafts`
    Crafts,
    /// `/tote-bags`
    ToteBags,
    /// `/cart`
    Cart,
    /// `/checkout`
    Checkout,
    /// `/order-success`
    OrderSuccess,
    /// `/custom-order`
    CustomOrder,
    /// `/custom-order-success`
    CustomOrderSuccess,
    /// `/profile`
    Profile,
    /// `/product/{id}`
    Product(ProductId),
    /// `/admin`
    Admin,
    /// `/login`
    Login,
    /// `/signup`
    Signup,
    /// Anything else; keeps the requested path
    NotFound(String),
}

impl Route {
    /// Resolve a path. Query strings, fragments and a trailing slash are ignored.
    #[must_use]
    pub fn parse(path: &str) -> Self {
        let path = path
            .split(['?', '#'])
            .next()
            .unwrap_or_default();
        let trimmed = path.trim_end_matches('/');

        match trimmed {
            "" => Self::Home,
            "/paintings" => Self::Paintings,
            "/crafts" => Self::Crafts,
            "/tote-bags" => Self::ToteBags,
            "/cart" => Self::Cart,
            "/checkout" => Self::Checkout,
            "/order-success" => Self::OrderSuccess,
            "/custom-order" => Self::CustomOrder,
            "/custom-order-success" => Self::CustomOrderSuccess,
            "/profile" => Self::Profile,
            "/admin" => Self::Admin,
            "/login" => Self::Login,
            "/signup" => Self::Signup,
            other => match other.strip_prefix("/product/") {
                Some(id) if !id.is_empty() && !id.contains('/') => Self::Product(ProductId::new(id)),
                _ => Self::NotFound(path.to_string()),
            },
        }
    }

    /// Canonical path of the route
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Home => "/".to_string(),
            Self::Paintings => "/paintings".to_string(),
            Self::Crafts => "/crafts".to_string(),
            Self::ToteBags => "/tote-bags".to_string(),
            Self::Cart => "/cart".to_string(),
            Self::Checkout => "/checkout".to_string(),
            Self::OrderSuccess => "/order-success".to_string(),
            Self::CustomOrder => "/custom-order".to_string(),
            Self::CustomOrderSuccess => "/custom-order-success".to_string(),
            Self::Profile => "/profile".to_string(),
            Self::Product(id) => format!("/product/{id}"),
            Self::Admin => "/admin".to_string(),
            Self::Login => "/login".to_string(),
            Self::Signup => "/signup".to_string(),
            Self::NotFound(path) => path.clone(),
        }
    }

    /// Listing page for a category
    #[must_use]
    pub const fn for_category(category: ProductCategory) -> Self {
        match category {
            ProductCategory::Painting => Self::Paintings,
            ProductCategory::Craft => Self::Crafts,
            ProductCategory::ToteBag => Self::ToteBags,
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.path())
    }
}

/// What a `/product/{id}` page renders
#[derive(Debug, PartialEq, Eq)]
pub enum ProductPage<'a> {
    /// The product and up to four related products
    Found {
        /// Requested product
        product: &'a Product,
        /// Same category, excluding the product itself
        related: Vec<&'a Product>,
    },
    /// Unknown id: the not-found view
    NotFound,
}

impl<'a> ProductPage<'a> {
    /// Look up a product page
    #[must_use]
    pub fn resolve(catalog: &'a CatalogState, id: &ProductId) -> Self {
        match catalog.product(id) {
            Some(product) => Self::Found {
                product,
                related: catalog.related(id),
            },
            None => Self::NotFound,
        }
    }
}
