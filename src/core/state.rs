//! Lifecycle states for the interactive session.
//!
//! The session moves between a small set of states. Each state implements
//! the `State` trait so the rest of the crate can inspect it without
//! matching on concrete variants.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Trait for session lifecycle states.
///
/// All methods are pure. States are plain values describing where the
/// session currently is.
///
/// # Example
///
/// ```rust
/// use abacus::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
/// enum Lamp {
///     On,
///     Off,
///     Broken,
/// }
///
/// impl State for Lamp {
///     fn name(&self) -> &str {
///         match self {
///             Self::On => "On",
///             Self::Off => "Off",
///             Self::Broken => "Broken",
///         }
///     }
///
///     fn is_final(&self) -> bool {
///         matches!(self, Self::Broken)
///     }
/// }
///
/// assert!(Lamp::On.accepts_input());
/// assert!(!Lamp::Broken.accepts_input());
/// ```
pub trait State:
    Clone + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// Get the state's name for display and logging.
    fn name(&self) -> &str;

    /// Check if this is a terminal state.
    ///
    /// Default implementation returns `false`.
    fn is_final(&self) -> bool {
        false
    }

    /// Check if the session may still read and process input.
    ///
    /// Default implementation accepts input in every non-final state.
    fn accepts_input(&self) -> bool {
        !self.is_final()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repl::ReplState;

    /// A mode switch that ignores input while muted.
    #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
    enum Mode {
        Live,
        Muted,
        Off,
    }

    impl State for Mode {
        fn name(&self) -> &str {
            match self {
                Self::Live => "Live",
                Self::Muted => "Muted",
                Self::Off => "Off",
            }
        }

        fn is_final(&self) -> bool {
            matches!(self, Self::Off)
        }

        fn accepts_input(&self) -> bool {
            matches!(self, Self::Live)
        }
    }

    #[test]
    fn repl_states_have_stable_names() {
        assert_eq!(ReplState::AwaitingInput.name(), "AwaitingInput");
        assert_eq!(ReplState::Running.name(), "Running");
        assert_eq!(ReplState::Terminated.name(), "Terminated");
    }

    #[test]
    fn only_terminated_is_final() {
        assert!(!ReplState::AwaitingInput.is_final());
        assert!(!ReplState::Running.is_final());
        assert!(ReplState::Terminated.is_final());
        assert!(!ReplState::Terminated.accepts_input());
    }

    #[test]
    fn accepts_input_can_be_overridden() {
        assert!(Mode::Live.accepts_input());
        assert!(!Mode::Muted.accepts_input());
        assert!(!Mode::Muted.is_final());
        assert!(!Mode::Off.accepts_input());
    }

    #[test]
    fn state_serializes_by_variant_name() {
        let json = serde_json::to_string(&ReplState::AwaitingInput).unwrap();
        assert_eq!(json, "\"AwaitingInput\"");

        let back: ReplState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ReplState::AwaitingInput);
    }
}
