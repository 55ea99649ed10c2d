use thiserror::Error;

/// Errors that can occur when building a [`Table`](crate::Table) or reading
/// events from text.
///
/// Dispatching an event never fails: an undefined transition is reported to
/// the action sink and surfaces as [`Outcome::Unexpected`](crate::Outcome).
#[derive(Debug, Clone, Eq, Hash, PartialEq, Error)]
pub enum MachineError {
    /// Two rows of a table share the same `(state, event)` pair.
    #[error("transition ({state}, {event}) is defined more than once")]
    DuplicateTransition {
        /// Name of the source state.
        state: &'static str,
        /// Name of the triggering event.
        event: &'static str,
    },
    /// The text does not name any known event.
    #[error("unknown event `{0}`, expected one of: coin, pass, reset")]
    UnknownEvent(String),
}
