//! Reducer composition utilities
//!
//! A storefront is made of several independent stores (cart, favorites,
//! catalog, notifications). Each is written against its own state and action
//! types; [`scope_reducer`] runs such a reducer inside a larger application
//! state, routing the matching actions to it and lifting its effects back into
//! the application action type.
//!
//! # Example
//!
//! ```
//! use storefront_core::composition::scope_reducer;
//! use storefront_core::{effect::Effect, reducer::Reducer, SmallVec};
//!
//! #[derive(Clone, Debug, Default)]
//! struct CounterState {
//!     count: i32,
//! }
//!
//! #[derive(Clone, Debug)]
//! enum CounterAction {
//!     Increment,
//! }
//!
//! struct CounterReducer;
//!
//! impl Reducer for CounterReducer {
//!     type State = CounterState;
//!     type Action = CounterAction;
//!     type Environment = ();
//!
//!     fn reduce(&self, state: &mut CounterState, action: CounterAction, _env: &()) -> SmallVec<[Effect<CounterAction>; 4]> {
//!         match action {
//!             CounterAction::Increment => state.count += 1,
//!         }
//!         SmallVec::new()
//!     }
//! }
//!
//! #[derive(Clone, Debug, Default)]
//! struct AppState {
//!     counter: CounterState,
//!     title: String,
//! }
//!
//! #[derive(Clone, Debug)]
//! enum AppAction {
//!     Counter(CounterAction),
//!     Rename(String),
//! }
//!
//! let scoped = scope_reducer(
//!     CounterReducer,
//!     |app: &mut AppState| &mut app.counter,
//!     |action| match action {
//!         AppAction::Counter(action) => Some(action),
//!         AppAction::Rename(_) => None,
//!     },
//!     AppAction::Counter,
//! );
//!
//! let mut state = AppState::default();
//! let _ = scoped.reduce(&mut state, AppAction::Counter(CounterAction::Increment), &());
//! assert_eq!(state.counter.count, 1);
//! ```

use crate::effect::Effect;
use crate::reducer::Reducer;
use smallvec::SmallVec;

/// Scopes a reducer to a field of a larger state.
///
/// - `state`: lens from the parent state to the child state
/// - `extract`: picks the child action out of a parent action (`None` = not ours)
/// - `embed`: wraps child actions produced by effects back into parent actions
pub fn scope_reducer<R, S, A>(
    reducer: R,
    state: fn(&mut S) -> &mut R::State,
    extract: fn(A) -> Option<R::Action>,
    embed: fn(R::Action) -> A,
) -> ScopedReducer<R, S, A>
where
    R: Reducer,
{
    ScopedReducer {
        reducer,
        state,
        extract,
        embed,
    }
}

/// A reducer running on a sub-state of a parent state.
///
/// Created by [`scope_reducer`].
pub struct ScopedReducer<R, S, A>
where
    R: Reducer,
{
    reducer: R,
    state: fn(&mut S) -> &mut R::State,
    extract: fn(A) -> Option<R::Action>,
    embed: fn(R::Action) -> A,
}

impl<R, S, A> Reducer for ScopedReducer<R, S, A>
where
    R: Reducer,
    R::Action: Send + 'static,
    A: Send + 'static,
{
    type State = S;
    type Action = A;
    type Environment = R::Environment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        let Some(child_action) = (self.extract)(action) else {
            return SmallVec::new();
        };

        let embed = self.embed;
        self.reducer
            .reduce((self.state)(state), child_action, env)
            .into_iter()
            .map(|effect| effect.map(embed))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::smallvec;
    use std::time::Duration;

    #[derive(Clone, Default)]
    struct SubState {
        value: i32,
    }

    #[derive(Clone, Debug, PartialEq)]
    enum SubAction {
        Add(i32),
        AddLater(i32),
    }

    struct SubReducer;

    impl Reducer for SubReducer {
        type State = SubState;
        type Action = SubAction;
        type Environment = ();

        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            _env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]> {
            match action {
                SubAction::Add(n) => {
                    state.value += n;
                    SmallVec::new()
                },
                SubAction::AddLater(n) => {
                    smallvec![Effect::delay(Duration::from_millis(5), SubAction::Add(n))]
                },
            }
        }
    }

    #[derive(Clone, Default)]
    struct ParentState {
        sub: SubState,
        other: String,
    }

    #[derive(Clone, Debug, PartialEq)]
    enum ParentAction {
        Sub(SubAction),
        Other,
    }

    fn scoped() -> ScopedReducer<SubReducer, ParentState, ParentAction> {
        scope_reducer(
            SubReducer,
            |parent: &mut ParentState| &mut parent.sub,
            |action| match action {
                ParentAction::Sub(action) => Some(action),
                ParentAction::Other => None,
            },
            ParentAction::Sub,
        )
    }

    #[test]
    fn test_scope_reducer_updates_sub_state_only() {
        let reducer = scoped();
        let mut state = ParentState {
            sub: SubState { value: 5 },
            other: "test".to_string(),
        };

        let _ = reducer.reduce(&mut state, ParentAction::Sub(SubAction::Add(3)), &());
        assert_eq!(state.sub.value, 8);
        assert_eq!(state.other, "test");
    }

    #[test]
    fn test_scope_reducer_ignores_foreign_actions() {
        let reducer = scoped();
        let mut state = ParentState::default();

        let effects = reducer.reduce(&mut state, ParentAction::Other, &());
        assert!(effects.is_empty());
        assert_eq!(state.sub.value, 0);
    }

    #[test]
    fn test_scope_reducer_lifts_effects() {
        let reducer = scoped();
        let mut state = ParentState::default();

        let effects = reducer.reduce(&mut state, ParentAction::Sub(SubAction::AddLater(2)), &());
        assert_eq!(effects.len(), 1);
        match effects.into_iter().next() {
            Some(Effect::Delay { action, .. }) => {
                assert_eq!(*action, ParentAction::Sub(SubAction::Add(2)));
            },
            other => unreachable!("expected a delay, got {other:?}"),
        }
    }
}
