//! A table-driven finite state machine for a coin-operated turnstile.
//!
//! The crate is split in two layers:
//!
//! - A generic engine: an immutable [`Table`] mapping `(state, event)` to a
//!   list of actions and a next state, and a [`Machine`] that dispatches
//!   events against it, handing every action to a caller-supplied
//!   [`ActionSink`]. Events without a row are reported to the sink instead of
//!   failing.
//! - The [`turnstile`] itself: its states, events and actions, the
//!   [`TurnstileActions`] capability, and the static [`TWO_COIN`] and
//!   [`ONE_COIN`] tables.
//!
//! ```
//! use turnstile_fsm::{ActionLog, State, Turnstile};
//!
//! let mut log = ActionLog::new();
//! let mut gate = Turnstile::new(&mut log);
//! gate.pass();
//! gate.pass();
//! gate.reset();
//! assert_eq!(gate.state(), State::Locked);
//! drop(gate);
//! assert_eq!(log.as_str(), "AX(Alarming,Pass)OL");
//! ```
#![warn(clippy::perf, clippy::pedantic, missing_docs)]

mod error;
mod machine;
mod recorder;
mod table;
pub mod turnstile;

pub use error::MachineError;
pub use machine::{ActionSink, Machine, Outcome};
pub use recorder::ActionLog;
pub use table::{Row, Table};
pub use turnstile::{
    Action, Event, ONE_COIN, State, TWO_COIN, Turnstile, TurnstileActions, TurnstileTable,
};

/// A stable, human-readable name.
///
/// States and events are reported to [`ActionSink::unexpected_transition`]
/// by name, and tables render with these names.
pub trait Named {
    /// The name, e.g. `"Alarming"` or `"Pass"`.
    fn name(&self) -> &'static str;
}
