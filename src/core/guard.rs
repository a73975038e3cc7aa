//! Guard predicates over session states.
//!
//! Guards are pure boolean functions that decide whether the session may
//! act while it is in a given state.

use super::state::State;
use std::marker::PhantomData;

/// Pure predicate over a state.
///
/// # Example
///
/// ```rust
/// use abacus::core::{Guard, State};
/// use abacus::repl::ReplState;
///
/// let open = Guard::new(|s: &ReplState| s.accepts_input());
///
/// assert!(open.check(&ReplState::AwaitingInput));
/// assert!(!open.check(&ReplState::Terminated));
/// ```
pub struct Guard<S: State> {
    predicate: Box<dyn Fn(&S) -> bool + Send + Sync>,
    _phantom: PhantomData<S>,
}

impl<S: State> Guard<S> {
    /// Create a guard from a pure predicate function.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&S) -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Box::new(predicate),
            _phantom: PhantomData,
        }
    }

    /// Guard that passes exactly when the state still accepts input.
    pub fn accepting_input() -> Self {
        Self::new(|state: &S| state.accepts_input())
    }

    /// Check if the guard allows acting in this state.
    pub fn check(&self, state: &S) -> bool {
        (self.predicate)(state)
    }
}

impl<S: State> std::fmt::Debug for Guard<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Guard").finish_non_exhaustive()
    }
}
