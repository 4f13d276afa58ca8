//! Favorites store: the set of product ids a visitor has starred.

use crate::environment::StorefrontEnvironment;
use crate::types::ProductId;
use serde::{Deserialize, Serialize};
use storefront_core::effect::Effect;
use storefront_core::reducer::Reducer;
use storefront_core::SmallVec;

/// Starred products, in the order they were starred
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoritesState {
    ids: Vec<ProductId>,
}

impl FavoritesState {
    /// Starred ids
    #[must_use]
    pub fn ids(&self) -> &[ProductId] {
        &self.ids
    }

    /// Whether `id` is starred
    #[must_use]
    pub fn contains(&self, id: &ProductId) -> bool {
        self.ids.contains(id)
    }

    /// Number of starred products
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// True when nothing is starred
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    fn insert(&mut self, id: ProductId) {
        if !self.contains(&id) {
            self.ids.push(id);
        }
    }

    fn remove(&mut self, id: &ProductId) {
        self.ids.retain(|existing| existing != id);
    }
}

/// Favorites actions
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FavoritesAction {
    /// Star if absent, unstar if present
    Toggle(ProductId),
    /// Star (idempotent)
    Add(ProductId),
    /// Unstar (idempotent)
    Remove(ProductId),
}

/// Reducer for [`FavoritesState`]
#[derive(Clone, Copy, Debug, Default)]
pub struct FavoritesReducer;

impl Reducer for FavoritesReducer {
    type State = FavoritesState;
    type Action = FavoritesAction;
    type Environment = StorefrontEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        _env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            FavoritesAction::Toggle(id) => {
                if state.contains(&id) {
                    state.remove(&id);
                } else {
                    state.insert(id);
                }
            },
            FavoritesAction::Add(id) => state.insert(id),
            FavoritesAction::Remove(id) => state.remove(&id),
        }
        SmallVec::new()
    }
}
