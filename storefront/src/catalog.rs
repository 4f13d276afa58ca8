//! Catalog and admin store.
//!
//! Holds the product list, placed orders ("transactions") and custom
//! commission requests. The store accepts any well-typed payload; field
//! validation belongs to the forms in [`crate::validation`].

use crate::environment::StorefrontEnvironment;
use crate::favorites::FavoritesState;
use crate::types::{
    ContactInfo, CustomOrderId, CustomerContact, PaintingDetails, Product, ProductCategory,
    ProductDraft, ProductId, TransactionId,
};
use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use storefront_core::effect::Effect;
use storefront_core::reducer::Reducer;
use storefront_core::SmallVec;

/// Placed order lifecycle
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransactionStatus {
    /// Just placed
    Pending,
    /// Being prepared
    Processing,
    /// Handed to the courier
    Shipped,
    /// Received by the customer
    Delivered,
}

impl TransactionStatus {
    const fn rank(self) -> u8 {
        match self {
            Self::Pending => 0,
            Self::Processing => 1,
            Self::Shipped => 2,
            Self::Delivered => 3,
        }
    }

    /// Whether moving to `next` follows the lifecycle (or stays put)
    #[must_use]
    pub const fn is_forward_to(self, next: Self) -> bool {
        next.rank() >= self.rank()
    }
}

/// Custom order lifecycle
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CustomOrderStatus {
    /// Awaiting review
    Pending,
    /// Accepted and being made
    InProgress,
    /// Delivered to the customer
    Completed,
    /// Withdrawn or declined
    Cancelled,
}

impl CustomOrderStatus {
    /// `Completed` and `Cancelled` end the lifecycle
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// Whether `next` is reachable from `self`
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        match (self, next) {
            (Self::Pending, _) => true,
            (Self::InProgress, next) => !matches!(next, Self::Pending),
            (current, next) => current as u8 == next as u8,
        }
    }
}

/// Work requested by a custom order
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CustomOrderKind {
    /// A commissioned painting
    Painting,
    /// A commissioned craft piece
    Craft,
}

/// One line of a placed order
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    /// Product the line was bought from
    pub product_id: ProductId,
    /// Title at purchase time
    pub title: String,
    /// Unit price at purchase time
    pub price: Decimal,
    /// Units bought
    pub quantity: u32,
}

impl OrderLine {
    /// `price × quantity`
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.price.saturating_mul(Decimal::from(self.quantity))
    }
}

/// A placed order, immutable apart from its status
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Assigned when the order is recorded
    pub id: TransactionId,
    /// Product snapshots, in cart order
    pub items: Vec<OrderLine>,
    /// Sum of line subtotals
    pub total: Decimal,
    /// Who to ship to
    pub customer: ContactInfo,
    /// Lifecycle status
    pub status: TransactionStatus,
    /// When the order was recorded
    pub created_at: DateTime<Utc>,
}

/// Payload for [`CatalogAction::AddTransaction`]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTransaction {
    /// Order lines
    pub items: Vec<OrderLine>,
    /// Order total
    pub total: Decimal,
    /// Shipping contact
    pub customer: ContactInfo,
}

/// A bespoke commission request
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomOrder {
    /// Assigned when the request is recorded
    pub id: CustomOrderId,
    /// Painting or craft
    pub kind: CustomOrderKind,
    /// What the customer wants
    pub description: String,
    /// Free-text size, if given
    pub size: Option<String>,
    /// Budget in rupees
    pub budget: Decimal,
    /// How to reach the customer
    pub customer: CustomerContact,
    /// Lifecycle status
    pub status: CustomOrderStatus,
    /// When the request was recorded
    pub created_at: DateTime<Utc>,
    /// Inspiration images (data URLs or paths)
    pub reference_images: Vec<String>,
}

/// Payload for [`CatalogAction::AddCustomOrder`]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCustomOrder {
    /// Painting or craft
    pub kind: CustomOrderKind,
    /// What the customer wants
    pub description: String,
    /// Free-text size
    pub size: Option<String>,
    /// Budget in rupees
    pub budget: Decimal,
    /// How to reach the customer
    pub customer: CustomerContact,
    /// Inspiration images
    pub reference_images: Vec<String>,
}

/// Catalog state
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogState {
    /// Products in insertion order
    pub products: Vec<Product>,
    /// Placed orders in insertion order
    pub transactions: Vec<Transaction>,
    /// Commission requests in insertion order
    pub custom_orders: Vec<CustomOrder>,
    /// Whether the admin panel is unlocked
    pub is_admin: bool,
}

impl Default for CatalogState {
    /// The shipped sample catalog
    fn default() -> Self {
        Self::seeded()
    }
}

/// Numbers shown on the admin dashboard
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    /// Products in the catalog
    pub total_products: usize,
    /// Sum of all transaction totals
    pub total_revenue: Decimal,
    /// Transactions still pending
    pub pending_transactions: usize,
    /// Custom order requests, any status
    pub custom_orders: usize,
}

fn seed_date(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

impl CatalogState {
    /// A catalog with no products, orders or requests
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            products: Vec::new(),
            transactions: Vec::new(),
            custom_orders: Vec::new(),
            is_admin: false,
        }
    }

    /// One sample product per category
    #[must_use]
    pub fn seeded() -> Self {
        let products = vec![
            Product {
                id: ProductId::new("1"),
                title: "Vibrant Sunset".to_string(),
                price: Decimal::from(15_000),
                image: "/images/products/vibrant-sunset.jpg".to_string(),
                description: None,
                category: ProductCategory::Painting,
                in_stock: true,
                created_at: seed_date(2024, 1, 15),
                painting: Some(PaintingDetails {
                    height: Some("20".to_string()),
                    width: Some("16".to_string()),
                    medium: Some("Acrylic on Canvas".to_string()),
                }),
            },
            Product {
                id: ProductId::new("2"),
                title: "Handmade Ceramic Bowl".to_string(),
                price: Decimal::from(3_750),
                image: "/images/products/ceramic-bowl.jpg".to_string(),
                description: None,
                category: ProductCategory::Craft,
                in_stock: true,
                created_at: seed_date(2024, 1, 20),
                painting: None,
            },
            Product {
                id: ProductId::new("3"),
                title: "Floral Symphony Tote".to_string(),
                price: Decimal::from(2_100),
                image: "/images/products/floral-symphony-tote.jpg".to_string(),
                description: None,
                category: ProductCategory::ToteBag,
                in_stock: true,
                created_at: seed_date(2024, 1, 25),
                painting: None,
            },
        ];

        Self {
            products,
            ..Self::empty()
        }
    }

    /// Look up a product by id
    #[must_use]
    pub fn product(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    /// Products of one category, in catalog order
    pub fn products_in(&self, category: ProductCategory) -> impl Iterator<Item = &Product> {
        self.products.iter().filter(move |p| p.category == category)
    }

    /// First three products of a category (home page rows)
    #[must_use]
    pub fn featured(&self, category: ProductCategory) -> Vec<&Product> {
        self.products_in(category).take(3).collect()
    }

    /// Up to four other products from the same category
    #[must_use]
    pub fn related(&self, id: &ProductId) -> Vec<&Product> {
        let Some(product) = self.product(id) else {
            return Vec::new();
        };
        self.products_in(product.category)
            .filter(|p| &p.id != id)
            .take(4)
            .collect()
    }

    /// Catalog products that are in the favorites set
    ///
    /// Favorites pointing at deleted products are skipped.
    #[must_use]
    pub fn favorite_products(&self, favorites: &FavoritesState) -> Vec<&Product> {
        favorites
            .ids()
            .iter()
            .filter_map(|id| self.product(id))
            .collect()
    }

    /// Look up a placed order
    #[must_use]
    pub fn transaction(&self, id: &TransactionId) -> Option<&Transaction> {
        self.transactions.iter().find(|t| &t.id == id)
    }

    /// Orders placed with `email`, oldest first (case-insensitive match)
    pub fn transactions_for<'a>(
        &'a self,
        email: &'a str,
    ) -> impl Iterator<Item = &'a Transaction> + 'a {
        let email = email.trim();
        self.transactions
            .iter()
            .filter(move |t| t.customer.email.trim().eq_ignore_ascii_case(email))
    }

    /// Look up a commission request
    #[must_use]
    pub fn custom_order(&self, id: &CustomOrderId) -> Option<&CustomOrder> {
        self.custom_orders.iter().find(|o| &o.id == id)
    }

    /// Admin dashboard figures
    #[must_use]
    pub fn stats(&self) -> DashboardStats {
        DashboardStats {
            total_products: self.products.len(),
            total_revenue: self
                .transactions
                .iter()
                .fold(Decimal::ZERO, |sum, t| sum.saturating_add(t.total)),
            pending_transactions: self
                .transactions
                .iter()
                .filter(|t| t.status == TransactionStatus::Pending)
                .count(),
            custom_orders: self.custom_orders.len(),
        }
    }
}

/// Catalog actions
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CatalogAction {
    /// Create a product; id and timestamp are assigned here
    AddProduct(ProductDraft),
    /// Replace the product with the same id (no-op if unknown)
    UpdateProduct(Product),
    /// Remove a product (no-op if unknown); orders and cart lines keep their snapshots
    DeleteProduct(ProductId),
    /// Record a placed order with status `pending`
    AddTransaction(NewTransaction),
    /// Replace an order's status
    UpdateTransactionStatus {
        /// Order to update
        id: TransactionId,
        /// New status
        status: TransactionStatus,
    },
    /// Record a commission request with status `pending`
    AddCustomOrder(NewCustomOrder),
    /// Replace a commission request's status
    UpdateCustomOrderStatus {
        /// Request to update
        id: CustomOrderId,
        /// New status
        status: CustomOrderStatus,
    },
    /// Lock or unlock the admin panel
    SetAdminStatus(bool),
}

/// Reducer for [`CatalogState`]
#[derive(Clone, Copy, Debug, Default)]
pub struct CatalogReducer;

impl Reducer for CatalogReducer {
    type State = CatalogState;
    type Action = CatalogAction;
    type Environment = StorefrontEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            CatalogAction::AddProduct(draft) => {
                let painting = match draft.category {
                    ProductCategory::Painting => draft.painting,
                    ProductCategory::Craft | ProductCategory::ToteBag => None,
                };
                let product = Product {
                    id: ProductId::new(env.next_id()),
                    title: draft.title,
                    price: draft.price,
                    image: draft.image,
                    description: draft.description,
                    category: draft.category,
                    in_stock: draft.in_stock,
                    created_at: env.now(),
                    painting,
                };
                tracing::debug!(product_id = %product.id, category = %product.category, "Product added");
                state.products.push(product);
            },

            CatalogAction::UpdateProduct(product) => {
                match state.products.iter_mut().find(|p| p.id == product.id) {
                    Some(existing) => *existing = product,
                    None => tracing::debug!(product_id = %product.id, "Update for unknown product ignored"),
                }
            },

            CatalogAction::DeleteProduct(id) => {
                let before = state.products.len();
                state.products.retain(|p| p.id != id);
                if state.products.len() < before {
                    tracing::debug!(product_id = %id, "Product deleted");
                }
            },

            CatalogAction::AddTransaction(new) => {
                let transaction = Transaction {
                    id: TransactionId::new(env.next_id()),
                    items: new.items,
                    total: new.total,
                    customer: new.customer,
                    status: TransactionStatus::Pending,
                    created_at: env.now(),
                };
                tracing::info!(
                    transaction_id = %transaction.id,
                    total = %transaction.total,
                    lines = transaction.items.len(),
                    "Transaction recorded"
                );
                state.transactions.push(transaction);
            },

            CatalogAction::UpdateTransactionStatus { id, status } => {
                if let Some(transaction) = state.transactions.iter_mut().find(|t| t.id == id) {
                    if !transaction.status.is_forward_to(status) {
                        tracing::warn!(
                            transaction_id = %id,
                            from = ?transaction.status,
                            to = ?status,
                            "Transaction status moved backwards"
                        );
                    }
                    transaction.status = status;
                }
            },

            CatalogAction::AddCustomOrder(new) => {
                let order = CustomOrder {
                    id: CustomOrderId::new(env.next_id()),
                    kind: new.kind,
                    description: new.description,
                    size: new.size,
                    budget: new.budget,
                    customer: new.customer,
                    status: CustomOrderStatus::Pending,
                    created_at: env.now(),
                    reference_images: new.reference_images,
                };
                tracing::info!(custom_order_id = %order.id, budget = %order.budget, "Custom order recorded");
                state.custom_orders.push(order);
            },

            CatalogAction::UpdateCustomOrderStatus { id, status } => {
                if let Some(order) = state.custom_orders.iter_mut().find(|o| o.id == id) {
                    if !order.status.can_transition_to(status) {
                        tracing::warn!(
                            custom_order_id = %id,
                            from = ?order.status,
                            to = ?status,
                            "Custom order status left a terminal state"
                        );
                    }
                    order.status = status;
                }
            },

            CatalogAction::SetAdminStatus(is_admin) => {
                state.is_admin = is_admin;
            },
        }

        SmallVec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::test_environment;
    use storefront_testing::{assertions, test_clock, ReducerTest};
    use storefront_core::environment::Clock;

    fn draft(title: &str, category: ProductCategory) -> ProductDraft {
        ProductDraft {
            title: title.to_string(),
            price: Decimal::from(1200),
            image: "/images/new.jpg".to_string(),
            description: Some("Fresh off the easel".to_string()),
            category,
            in_stock: true,
            painting: Some(PaintingDetails {
                height: Some("10".to_string()),
                width: Some("8".to_string()),
                medium: Some("Oil".to_string()),
            }),
        }
    }

    fn transaction(total: i64) -> NewTransaction {
        NewTransaction {
            items: vec![OrderLine {
                product_id: ProductId::new("1"),
                title: "Vibrant Sunset".to_string(),
                price: Decimal::from(total),
                quantity: 1,
            }],
            total: Decimal::from(total),
            customer: ContactInfo::default(),
        }
    }

    #[test]
    fn seed_has_one_product_per_category() {
        let catalog = CatalogState::seeded();
        for category in ProductCategory::ALL {
            assert_eq!(catalog.products_in(category).count(), 1);
        }
        assert!(!catalog.is_admin);
    }

    #[test]
    fn add_product_assigns_id_and_timestamp() {
        ReducerTest::new(CatalogReducer)
            .with_env(test_environment())
            .given_state(CatalogState::empty())
            .when_action(CatalogAction::AddProduct(draft("Monsoon", ProductCategory::Painting)))
            .then_state(|state| {
                assert_eq!(state.products.len(), 1);
                let product = &state.products[0];
                assert_eq!(product.id, ProductId::new("id-1"));
                assert_eq!(product.created_at, test_clock().now());
                assert!(product.painting.is_some());
            })
            .then_effects(|effects| assertions::assert_no_effects(effects))
            .run();
    }

    #[test]
    fn painting_details_are_dropped_for_other_categories() {
        ReducerTest::new(CatalogReducer)
            .with_env(test_environment())
            .given_state(CatalogState::empty())
            .when_action(CatalogAction::AddProduct(draft("Jute Tote", ProductCategory::ToteBag)))
            .then_state(|state| assert_eq!(state.products[0].painting, None))
            .run();
    }

    #[test]
    fn update_replaces_matching_product_only() {
        let mut updated = CatalogState::seeded().products[1].clone();
        updated.price = Decimal::from(4_000);
        updated.in_stock = false;

        ReducerTest::new(CatalogReducer)
            .with_env(test_environment())
            .given_state(CatalogState::seeded())
            .when_action(CatalogAction::UpdateProduct(updated.clone()))
            .then_state(move |state| {
                assert_eq!(state.products[1], updated);
                assert_eq!(state.products[0], CatalogState::seeded().products[0]);
            })
            .run();
    }

    #[test]
    fn update_of_unknown_product_is_a_no_op() {
        let mut ghost = CatalogState::seeded().products[0].clone();
        ghost.id = ProductId::new("missing");

        ReducerTest::new(CatalogReducer)
            .with_env(test_environment())
            .given_state(CatalogState::seeded())
            .when_action(CatalogAction::UpdateProduct(ghost))
            .then_state(|state| assert_eq!(*state, CatalogState::seeded()))
            .run();
    }

    #[test]
    fn delete_does_not_touch_recorded_transactions() {
        ReducerTest::new(CatalogReducer)
            .with_env(test_environment())
            .given_state(CatalogState::seeded())
            .when_actions([
                CatalogAction::AddTransaction(transaction(15_000)),
                CatalogAction::DeleteProduct(ProductId::new("1")),
                CatalogAction::DeleteProduct(ProductId::new("1")),
            ])
            .then_state(|state| {
                assert_eq!(state.products.len(), 2);
                assert_eq!(state.transactions.len(), 1);
                assert_eq!(state.transactions[0].items[0].title, "Vibrant Sunset");
                assert_eq!(state.transactions[0].status, TransactionStatus::Pending);
            })
            .run();
    }

    #[test]
    fn added_product_can_be_deleted_by_its_generated_id() {
        let env = test_environment();
        let mut state = CatalogState::seeded();
        let _ = CatalogReducer.reduce(&mut state, CatalogAction::AddTransaction(transaction(15_000)), &env);
        let before = state.clone();

        let _ = CatalogReducer.reduce(
            &mut state,
            CatalogAction::AddProduct(draft("Monsoon", ProductCategory::Painting)),
            &env,
        );
        let added = state.products.last().map(|p| p.id.clone());
        assert_eq!(added, Some(ProductId::new("id-2")));
        assert_eq!(state.products.len(), before.products.len() + 1);

        if let Some(id) = added {
            let effects = CatalogReducer.reduce(&mut state, CatalogAction::DeleteProduct(id.clone()), &env);
            assertions::assert_no_effects(&effects);
            assert!(state.product(&id).is_none());
        }
        assert_eq!(state.products, before.products);
        assert_eq!(state.transactions, before.transactions);
    }

    #[test]
    fn revenue_saturates_on_huge_orders() {
        let huge = NewTransaction {
            total: Decimal::MAX,
            ..transaction(1)
        };
        let env = test_environment();
        let mut state = CatalogState::empty();
        for new in [huge.clone(), huge, transaction(10)] {
            let _ = CatalogReducer.reduce(&mut state, CatalogAction::AddTransaction(new), &env);
        }
        assert_eq!(state.stats().total_revenue, Decimal::MAX);

        let line = OrderLine {
            price: Decimal::MAX,
            quantity: 3,
            ..transaction(1).items[0].clone()
        };
        assert_eq!(line.subtotal(), Decimal::MAX);
    }

    #[test]
    fn orders_are_listed_per_customer() {
        let placed_by = |email: &str, total| NewTransaction {
            customer: ContactInfo {
                email: email.to_string(),
                ..ContactInfo::default()
            },
            ..transaction(total)
        };
        let env = test_environment();
        let mut state = CatalogState::empty();
        for new in [
            placed_by("asha@example.com", 100),
            placed_by("ravi@example.com", 200),
            placed_by("Asha@Example.com", 300),
        ] {
            let _ = CatalogReducer.reduce(&mut state, CatalogAction::AddTransaction(new), &env);
        }

        let totals: Vec<Decimal> = state.transactions_for("asha@example.com").map(|t| t.total).collect();
        assert_eq!(totals, vec![Decimal::from(100), Decimal::from(300)]);
        assert_eq!(state.transactions_for("nobody@example.com").count(), 0);
    }

    #[test]
    fn status_updates_are_unchecked() {
        ReducerTest::new(CatalogReducer)
            .with_env(test_environment())
            .given_state(CatalogState::empty())
            .when_actions([
                CatalogAction::AddTransaction(transaction(500)),
                CatalogAction::UpdateTransactionStatus {
                    id: TransactionId::new("id-1"),
                    status: TransactionStatus::Delivered,
                },
                CatalogAction::UpdateTransactionStatus {
                    id: TransactionId::new("id-1"),
                    status: TransactionStatus::Pending,
                },
            ])
            .then_state(|state| {
                assert_eq!(state.transactions[0].status, TransactionStatus::Pending);
            })
            .run();
    }

    #[test]
    fn custom_orders_start_pending() {
        let request = NewCustomOrder {
            kind: CustomOrderKind::Craft,
            description: "A set of four mugs".to_string(),
            size: None,
            budget: Decimal::from(6_000),
            customer: CustomerContact::default(),
            reference_images: Vec::new(),
        };

        ReducerTest::new(CatalogReducer)
            .with_env(test_environment())
            .given_state(CatalogState::empty())
            .when_actions([
                CatalogAction::AddCustomOrder(request),
                CatalogAction::UpdateCustomOrderStatus {
                    id: CustomOrderId::new("id-1"),
                    status: CustomOrderStatus::InProgress,
                },
            ])
            .then_state(|state| {
                assert_eq!(state.custom_orders.len(), 1);
                assert_eq!(state.custom_orders[0].status, CustomOrderStatus::InProgress);
            })
            .run();
    }

    #[test]
    fn lifecycle_graphs() {
        assert!(TransactionStatus::Pending.is_forward_to(TransactionStatus::Shipped));
        assert!(TransactionStatus::Shipped.is_forward_to(TransactionStatus::Shipped));
        assert!(!TransactionStatus::Delivered.is_forward_to(TransactionStatus::Pending));

        assert!(CustomOrderStatus::Pending.can_transition_to(CustomOrderStatus::Cancelled));
        assert!(CustomOrderStatus::InProgress.can_transition_to(CustomOrderStatus::Completed));
        assert!(!CustomOrderStatus::InProgress.can_transition_to(CustomOrderStatus::Pending));
        assert!(!CustomOrderStatus::Completed.can_transition_to(CustomOrderStatus::InProgress));
        assert!(CustomOrderStatus::Cancelled.is_terminal());
    }

    #[test]
    fn queries() {
        let mut catalog = CatalogState::seeded();
        for n in 0..5 {
            let mut extra = catalog.products[0].clone();
            extra.id = ProductId::new(format!("p{n}"));
            catalog.products.push(extra);
        }

        assert_eq!(catalog.featured(ProductCategory::Painting).len(), 3);
        let related = catalog.related(&ProductId::new("1"));
        assert_eq!(related.len(), 4);
        assert!(related.iter().all(|p| p.id != ProductId::new("1")));
        assert!(catalog.related(&ProductId::new("nope")).is_empty());
        assert!(catalog.related(&ProductId::new("2")).is_empty());
    }

    #[test]
    fn dashboard_stats() {
        let mut catalog = CatalogState::seeded();
        let env = test_environment();
        let _ = CatalogReducer.reduce(&mut catalog, CatalogAction::AddTransaction(transaction(1000)), &env);
        let _ = CatalogReducer.reduce(&mut catalog, CatalogAction::AddTransaction(transaction(2500)), &env);
        let _ = CatalogReducer.reduce(
            &mut catalog,
            CatalogAction::UpdateTransactionStatus {
                id: TransactionId::new("id-2"),
                status: TransactionStatus::Processing,
            },
            &env,
        );

        let stats = catalog.stats();
        assert_eq!(stats.total_products, 3);
        assert_eq!(stats.total_revenue, Decimal::from(3500));
        assert_eq!(stats.pending_transactions, 1);
        assert_eq!(stats.custom_orders, 0);
    }
}
