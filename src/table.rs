//! Immutable transition tables.
//!
//! A [`Table`] maps `(state, event)` pairs to a [`Row`] holding the actions to
//! run and the state to move to. Rows keep their declaration order so a table
//! can be audited or rendered exactly as it was written; lookups go through a
//! hash index.

use hashbrown::{HashMap, HashSet, hash_map::Entry};
use std::{fmt, hash::Hash};

use crate::{MachineError, Named};

/// A single transition: when `event` occurs in `state`, run `actions` in
/// order and move to `next`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Row<S, E, A: 'static> {
    /// The state this row applies to.
    pub state: S,
    /// The event that triggers it.
    pub event: E,
    /// The state entered once the actions have run.
    pub next: S,
    /// Actions invoked on the sink, in order. May be empty.
    pub actions: &'static [A],
}

impl<S, E, A: 'static> Row<S, E, A> {
    /// Shorthand usable in `const` row lists.
    pub const fn new(state: S, event: E, next: S, actions: &'static [A]) -> Self {
        Row {
            state,
            event,
            next,
            actions,
        }
    }
}

/// A named, immutable transition table with an initial state.
#[derive(Debug, Clone)]
pub struct Table<S, E, A: 'static> {
    name: &'static str,
    initial: S,
    rows: Vec<Row<S, E, A>>,
    index: HashMap<(S, E), usize>,
}

impl<S, E, A> Table<S, E, A>
where
    S: Copy + Eq + Hash + Named,
    E: Copy + Eq + Hash + Named,
    A: 'static,
{
    /// Build a table from `rows`.
    ///
    /// A later row for an already defined `(state, event)` pair replaces the
    /// earlier one in place. Use [`Table::try_new`] to reject such duplicates.
    pub fn new<I>(name: &'static str, initial: S, rows: I) -> Self
    where
        I: IntoIterator<Item = Row<S, E, A>>,
    {
        let mut table = Self::empty(name, initial);
        for row in rows {
            match table.index.entry((row.state, row.event)) {
                Entry::Occupied(slot) => table.rows[*slot.get()] = row,
                Entry::Vacant(slot) => {
                    slot.insert(table.rows.len());
                    table.rows.push(row);
                }
            }
        }
        table
    }

    /// Build a table from `rows`, failing if any `(state, event)` pair is
    /// defined twice.
    ///
    /// # Errors
    ///
    /// Returns [`MachineError::DuplicateTransition`] naming the first
    /// repeated pair.
    pub fn try_new<I>(name: &'static str, initial: S, rows: I) -> Result<Self, MachineError>
    where
        I: IntoIterator<Item = Row<S, E, A>>,
    {
        let mut table = Self::empty(name, initial);
        for row in rows {
            match table.index.entry((row.state, row.event)) {
                Entry::Occupied(_) => {
                    return Err(MachineError::DuplicateTransition {
                        state: row.state.name(),
                        event: row.event.name(),
                    });
                }
                Entry::Vacant(slot) => {
                    slot.insert(table.rows.len());
                    table.rows.push(row);
                }
            }
        }
        Ok(table)
    }

    fn empty(name: &'static str, initial: S) -> Self {
        Table {
            name,
            initial,
            rows: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// The row defined for `event` in `state`, if any.
    #[inline]
    pub fn get(&self, state: S, event: E) -> Option<&Row<S, E, A>> {
        self.index.get(&(state, event)).map(|&i| &self.rows[i])
    }

    /// Returns an iterator over every state mentioned by the table, in order
    /// of first appearance.
    pub fn states(&self) -> impl Iterator<Item = S> + '_ {
        let mut seen = HashSet::new();
        std::iter::once(self.initial)
            .chain(self.rows.iter().flat_map(|r| [r.state, r.next]))
            .filter(move |s| seen.insert(*s))
    }

    /// Returns an iterator over every event the table reacts to, in order of
    /// first appearance.
    pub fn events(&self) -> impl Iterator<Item = E> + '_ {
        let mut seen = HashSet::new();
        self.rows
            .iter()
            .map(|r| r.event)
            .filter(move |e| seen.insert(*e))
    }

    /// Returns an iterator over the events with a defined transition from
    /// `state`.
    pub fn events_from(&self, state: S) -> impl Iterator<Item = E> + '_ {
        self.rows
            .iter()
            .filter(move |r| r.state == state)
            .map(|r| r.event)
    }
}

impl<S: Copy, E, A: 'static> Table<S, E, A> {
    /// The table's name.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The state every machine built on this table starts in.
    #[inline]
    pub fn initial(&self) -> S {
        self.initial
    }

    /// The rows, in declaration order.
    #[inline]
    pub fn rows(&self) -> &[Row<S, E, A>] {
        &self.rows
    }
}

impl<S: Named, E: Named, A: Named + 'static> fmt::Display for Table<S, E, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "FSM: {}", self.name)?;
        writeln!(f, "Initial: {}", self.initial.name())?;
        writeln!(f, "{{")?;
        for row in &self.rows {
            write!(
                f,
                "  {} {} {} ",
                row.state.name(),
                row.event.name(),
                row.next.name()
            )?;
            match row.actions {
                [single] => writeln!(f, "{}", single.name())?,
                actions => {
                    write!(f, "{{")?;
                    for (i, action) in actions.iter().enumerate() {
                        if i > 0 {
                            write!(f, " ")?;
                        }
                        write!(f, "{}", action.name())?;
                    }
                    writeln!(f, "}}")?;
                }
            }
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum TestState {
        Idle,
        Running,
        Paused,
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum TestEvent {
        Start,
        Pause,
        Stop,
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum TestAction {
        Spin,
        Beep,
    }

    use TestAction::{Beep, Spin};
    use TestEvent::{Pause, Start, Stop};
    use TestState::{Idle, Paused, Running};

    impl Named for TestState {
        fn name(&self) -> &'static str {
            match self {
                Idle => "Idle",
                Running => "Running",
                Paused => "Paused",
            }
        }
    }

    impl Named for TestEvent {
        fn name(&self) -> &'static str {
            match self {
                Start => "Start",
                Pause => "Pause",
                Stop => "Stop",
            }
        }
    }

    impl Named for TestAction {
        fn name(&self) -> &'static str {
            match self {
                Spin => "Spin",
                Beep => "Beep",
            }
        }
    }

    type TestRow = Row<TestState, TestEvent, TestAction>;

    fn rows() -> Vec<TestRow> {
        vec![
            Row::new(Idle, Start, Running, &[Spin]),
            Row::new(Running, Pause, Paused, &[]),
            Row::new(Running, Stop, Idle, &[Beep, Spin]),
        ]
    }

    #[test]
    fn lookup() {
        let t = Table::new("Test", Idle, rows());
        let row = t.get(Idle, Start).unwrap();
        assert_eq!(row.next, Running);
        assert_eq!(row.actions, &[Spin]);
        assert!(t.get(Idle, Pause).is_none());
    }

    #[test]
    fn empty_actions_are_still_defined() {
        let t = Table::new("Test", Idle, rows());
        let row = t.get(Running, Pause).unwrap();
        assert!(row.actions.is_empty());
    }

    #[test]
    fn overwrite_keeps_position() {
        let mut r = rows();
        r.push(Row::new(Idle, Start, Paused, &[]));
        let t = Table::new("Test", Idle, r);

        assert_eq!(t.rows().len(), 3);
        assert_eq!(t.rows()[0].next, Paused);
        assert_eq!(t.get(Idle, Start).unwrap().next, Paused);
    }

    #[test]
    fn try_new_rejects_duplicates() {
        let mut r = rows();
        r.push(Row::new(Running, Stop, Paused, &[]));
        let err = Table::try_new("Test", Idle, r).unwrap_err();
        assert_eq!(
            err,
            MachineError::DuplicateTransition {
                state: "Running",
                event: "Stop"
            }
        );
        assert_eq!(
            err.to_string(),
            "transition (Running, Stop) is defined more than once"
        );
    }

    #[test]
    fn try_new_accepts_unique_rows() {
        let t = Table::try_new("Test", Idle, rows()).unwrap();
        assert_eq!(t.rows(), rows().as_slice());
    }

    #[test]
    fn actions_need_no_names_to_dispatch() {
        #[derive(Debug, Clone, Copy, PartialEq)]
        struct Pulse(u8);

        let t = Table::new("Raw", Idle, [Row::new(Idle, Start, Running, &[Pulse(3)])]);
        assert_eq!(t.get(Idle, Start).unwrap().actions, &[Pulse(3)]);
        assert_eq!(t.events_from(Idle).collect::<Vec<_>>(), [Start]);
    }

    #[test]
    fn state_enumeration() {
        let t = Table::new("Test", Idle, rows());
        let states: Vec<_> = t.states().collect();
        assert_eq!(states, vec![Idle, Running, Paused]);
    }

    #[test]
    fn event_enumeration() {
        let t = Table::new("Test", Idle, rows());
        let events: Vec<_> = t.events().collect();
        assert_eq!(events, vec![Start, Pause, Stop]);
    }

    #[test]
    fn events_from_state() {
        let t = Table::new("Test", Idle, rows());
        let events: Vec<_> = t.events_from(Running).collect();
        assert_eq!(events, vec![Pause, Stop]);
        assert_eq!(t.events_from(Paused).count(), 0);
    }

    #[test]
    fn display_layout() {
        let t = Table::new("Test", Idle, rows());
        assert_eq!(
            t.to_string(),
            "FSM: Test\n\
             Initial: Idle\n\
             {\n  \
             Idle Start Running Spin\n  \
             Running Pause Paused {}\n  \
             Running Stop Idle {Beep Spin}\n\
             }"
        );
    }
}
