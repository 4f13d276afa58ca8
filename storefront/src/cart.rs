//! Cart store: line items and derived totals.
//!
//! Every operation is total. Lines reference products by id only; the cart
//! never checks them against the catalog.

use crate::catalog::OrderLine;
use crate::environment::StorefrontEnvironment;
use crate::types::{ProductCategory, ProductId, ProductSnapshot};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use storefront_core::effect::Effect;
use storefront_core::reducer::Reducer;
use storefront_core::SmallVec;

/// One product in the cart
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// Product the line refers to
    pub id: ProductId,
    /// Title when added
    pub title: String,
    /// Unit price when added
    pub price: Decimal,
    /// Image when added
    pub image: String,
    /// Category when added
    pub category: ProductCategory,
    /// Always at least 1
    pub quantity: u32,
}

impl CartLine {
    fn new(snapshot: ProductSnapshot) -> Self {
        Self {
            id: snapshot.id,
            title: snapshot.title,
            price: snapshot.price,
            image: snapshot.image,
            category: snapshot.category,
            quantity: 1,
        }
    }

    /// `price × quantity`, saturating at `Decimal::MAX`
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.price.saturating_mul(Decimal::from(self.quantity))
    }
}

/// Cart state
///
/// `total` and `item_count` are recomputed after every mutation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartState {
    /// At most one line per product id
    pub lines: Vec<CartLine>,
    /// Sum of line subtotals
    pub total: Decimal,
    /// Sum of quantities
    pub item_count: u32,
}

impl CartState {
    /// True when the cart has no lines
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Whether a line exists for `id`
    #[must_use]
    pub fn contains(&self, id: &ProductId) -> bool {
        self.line(id).is_some()
    }

    /// The line for `id`, if any
    #[must_use]
    pub fn line(&self, id: &ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| &line.id == id)
    }

    /// Quantity of `id` in the cart (0 if absent)
    #[must_use]
    pub fn quantity_of(&self, id: &ProductId) -> u32 {
        self.line(id).map_or(0, |line| line.quantity)
    }

    /// Snapshot the lines for an order
    #[must_use]
    pub fn order_lines(&self) -> Vec<OrderLine> {
        self.lines
            .iter()
            .map(|line| OrderLine {
                product_id: line.id.clone(),
                title: line.title.clone(),
                price: line.price,
                quantity: line.quantity,
            })
            .collect()
    }

    fn recompute(&mut self) {
        self.total = self
            .lines
            .iter()
            .fold(Decimal::ZERO, |total, line| total.saturating_add(line.subtotal()));
        self.item_count = self
            .lines
            .iter()
            .fold(0, |count, line| count.saturating_add(line.quantity));
    }
}

/// Cart actions
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CartAction {
    /// Add one unit of a product
    AddItem(ProductSnapshot),
    /// Set a line's quantity; zero or less removes the line
    UpdateQuantity {
        /// Product line to change
        id: ProductId,
        /// New quantity, clamped to `u32::MAX`
        quantity: i64,
    },
    /// Remove a line (no-op if absent)
    RemoveItem(ProductId),
    /// Empty the cart
    Clear,
}

/// Reducer for [`CartState`]
#[derive(Clone, Copy, Debug, Default)]
pub struct CartReducer;

impl Reducer for CartReducer {
    type State = CartState;
    type Action = CartAction;
    type Environment = StorefrontEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        _env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            CartAction::AddItem(snapshot) => {
                match state.lines.iter_mut().find(|line| line.id == snapshot.id) {
                    Some(line) => line.quantity = line.quantity.saturating_add(1),
                    None => state.lines.push(CartLine::new(snapshot)),
                }
            },
            CartAction::UpdateQuantity { id, quantity } => {
                if quantity <= 0 {
                    state.lines.retain(|line| line.id != id);
                } else if let Some(line) = state.lines.iter_mut().find(|line| line.id == id) {
                    line.quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
                }
            },
            CartAction::RemoveItem(id) => state.lines.retain(|line| line.id != id),
            CartAction::Clear => state.lines.clear(),
        }

        state.recompute();
        SmallVec::new()
    }
}
