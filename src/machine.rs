//! Event dispatch over a [`Table`].

use std::hash::Hash;

use tracing::{debug, warn};

use crate::{Named, Table};

/// The receiver of a machine's side effects.
///
/// A machine only ever calls these two methods, synchronously and in table
/// order. Whatever happens inside them is the sink's own business.
pub trait ActionSink<A> {
    /// Carry out one action from a transition's action list.
    fn perform(&mut self, action: A);

    /// Called once when `event` has no transition defined in `state`.
    fn unexpected_transition(&mut self, state: &str, event: &str);
}

/// Result of dispatching a single event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome<S> {
    /// A row matched; its actions ran and the machine is now in `to`.
    ///
    /// `from` and `to` may be equal, and the row may have had no actions.
    Transitioned {
        /// State before the event.
        from: S,
        /// State after the event.
        to: S,
    },
    /// No row matched. The sink was told and the state did not change.
    Unexpected,
}

impl<S> Outcome<S> {
    /// Returns `true` if the event matched a row of the table.
    #[inline]
    pub fn is_defined(&self) -> bool {
        matches!(self, Outcome::Transitioned { .. })
    }
}

/// A table-driven finite state machine.
///
/// The machine owns its current state and nothing else: the table is shared
/// and read-only, the sink is borrowed from the caller for the machine's
/// whole lifetime. The state can only change through [`Machine::trigger`].
///
/// # Type Parameters
/// - `S`: The state type.
/// - `E`: The event type.
/// - `A`: The action type handed to the sink.
pub struct Machine<'a, S, E, A: 'static> {
    state: S,
    table: &'a Table<S, E, A>,
    sink: &'a mut dyn ActionSink<A>,
}

impl<'a, S, E, A> Machine<'a, S, E, A>
where
    S: Copy + Eq + Hash + Named,
    E: Copy + Eq + Hash + Named,
    A: Copy + 'static,
{
    /// Create a machine in the table's initial state.
    pub fn new(table: &'a Table<S, E, A>, sink: &'a mut dyn ActionSink<A>) -> Self {
        Machine {
            state: table.initial(),
            table,
            sink,
        }
    }

    /// The current state of the machine.
    #[inline]
    pub fn state(&self) -> S {
        self.state
    }

    /// The table driving this machine.
    #[inline]
    pub fn table(&self) -> &'a Table<S, E, A> {
        self.table
    }

    /// Returns an iterator over events valid from the current state.
    pub fn triggerable_events(&self) -> impl Iterator<Item = E> + 'a {
        self.table.events_from(self.state)
    }

    /// Dispatch `event`.
    ///
    /// If the table defines `(state, event)`, each action of the row is
    /// performed in order and the machine moves to the row's next state.
    /// Otherwise the sink's [`unexpected_transition`] is called with the names
    /// of the current state and the event, and the state is left as is.
    ///
    /// [`unexpected_transition`]: ActionSink::unexpected_transition
    pub fn trigger(&mut self, event: E) -> Outcome<S> {
        let table = self.table;
        let from = self.state;

        let Some(row) = table.get(from, event) else {
            warn!(
                fsm = table.name(),
                state = from.name(),
                event = event.name(),
                "unexpected transition"
            );
            self.sink.unexpected_transition(from.name(), event.name());
            return Outcome::Unexpected;
        };

        debug!(
            fsm = table.name(),
            state = from.name(),
            event = event.name(),
            next = row.next.name(),
            actions = row.actions.len(),
            "transition"
        );
        for &action in row.actions {
            self.sink.perform(action);
        }
        self.state = row.next;

        Outcome::Transitioned { from, to: row.next }
    }
}
