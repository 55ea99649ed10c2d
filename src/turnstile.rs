//! The coin-operated turnstile.
//!
//! Two tables drive the same [`State`], [`Event`] and [`Action`] types:
//!
//! - [`TWO_COIN`] asks for two coins before unlocking and thanks for any
//!   extra coin. [`Turnstile::new`] uses it.
//! - [`ONE_COIN`] unlocks on the first coin and relocks with a thank-you on
//!   the next one.
//!
//! In both, passing without paying raises the alarm, a coin while alarming is
//! ignored, passing while alarming is undefined, and `Reset` always ends in
//! [`State::Locked`].

use std::{fmt, str::FromStr, sync::LazyLock};

use crate::{ActionSink, Machine, MachineError, Named, Outcome, Row, Table};

/// Turnstile states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum State {
    /// Closed, waiting for payment.
    #[default]
    Locked,
    /// One coin paid, one more needed. Only used by [`TWO_COIN`].
    FirstCoin,
    /// Open for a single passage.
    Unlocked,
    /// Someone went through without paying.
    Alarming,
}

/// Inputs from the coin slot, the rotor and the service key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Event {
    /// A coin was inserted.
    Coin,
    /// Someone went through.
    Pass,
    /// The service key was turned.
    Reset,
}

/// Side effects a transition can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Engage the lock.
    Lock,
    /// Release the lock.
    Unlock,
    /// Start the alarm.
    AlarmOn,
    /// Silence the alarm.
    AlarmOff,
    /// Show a thank-you message.
    Thankyou,
}

impl State {
    /// Every state, in declaration order.
    pub const ALL: [State; 4] = [
        State::Locked,
        State::FirstCoin,
        State::Unlocked,
        State::Alarming,
    ];
}

impl Event {
    /// Every event, in declaration order.
    pub const ALL: [Event; 3] = [Event::Coin, Event::Pass, Event::Reset];
}

impl Action {
    /// One-letter code used in action logs.
    pub fn code(self) -> char {
        match self {
            Action::Lock => 'L',
            Action::Unlock => 'U',
            Action::AlarmOn => 'A',
            Action::AlarmOff => 'O',
            Action::Thankyou => 'T',
        }
    }
}

impl Named for State {
    fn name(&self) -> &'static str {
        match self {
            State::Locked => "Locked",
            State::FirstCoin => "FirstCoin",
            State::Unlocked => "Unlocked",
            State::Alarming => "Alarming",
        }
    }
}

impl Named for Event {
    fn name(&self) -> &'static str {
        match self {
            Event::Coin => "Coin",
            Event::Pass => "Pass",
            Event::Reset => "Reset",
        }
    }
}

impl Named for Action {
    fn name(&self) -> &'static str {
        match self {
            Action::Lock => "Lock",
            Action::Unlock => "Unlock",
            Action::AlarmOn => "AlarmOn",
            Action::AlarmOff => "AlarmOff",
            Action::Thankyou => "Thankyou",
        }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Event {
    type Err = MachineError;

    /// Parses an event name, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Event::ALL
            .into_iter()
            .find(|e| e.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| MachineError::UnknownEvent(s.into()))
    }
}

/// The capabilities a turnstile needs from its hardware.
///
/// Every `TurnstileActions` is an [`ActionSink<Action>`], so any
/// implementation can be handed straight to a [`Turnstile`].
pub trait TurnstileActions {
    /// Engage the lock.
    fn lock(&mut self);
    /// Release the lock.
    fn unlock(&mut self);
    /// Start the alarm.
    fn alarm_on(&mut self);
    /// Silence the alarm.
    fn alarm_off(&mut self);
    /// Thank the customer for an extra coin.
    fn thankyou(&mut self);
    /// `event` has no transition in `state`. Both are given by name.
    fn unexpected_transition(&mut self, state: &str, event: &str);
}

impl<T: TurnstileActions + ?Sized> ActionSink<Action> for T {
    fn perform(&mut self, action: Action) {
        match action {
            Action::Lock => self.lock(),
            Action::Unlock => self.unlock(),
            Action::AlarmOn => self.alarm_on(),
            Action::AlarmOff => self.alarm_off(),
            Action::Thankyou => self.thankyou(),
        }
    }

    fn unexpected_transition(&mut self, state: &str, event: &str) {
        TurnstileActions::unexpected_transition(self, state, event);
    }
}

/// A transition table over turnstile types.
pub type TurnstileTable = Table<State, Event, Action>;

type TurnstileRow = Row<State, Event, Action>;

#[rustfmt::skip]
const TWO_COIN_ROWS: [TurnstileRow; 11] = [
    Row::new(State::Locked,    Event::Coin,  State::FirstCoin, &[]),
    Row::new(State::Locked,    Event::Pass,  State::Alarming,  &[Action::AlarmOn]),
    Row::new(State::Locked,    Event::Reset, State::Locked,    &[Action::Lock]),
    Row::new(State::FirstCoin, Event::Coin,  State::Unlocked,  &[Action::Unlock]),
    Row::new(State::FirstCoin, Event::Pass,  State::Alarming,  &[Action::AlarmOn]),
    Row::new(State::FirstCoin, Event::Reset, State::Locked,    &[Action::Lock]),
    Row::new(State::Unlocked,  Event::Coin,  State::Unlocked,  &[Action::Thankyou]),
    Row::new(State::Unlocked,  Event::Pass,  State::Locked,    &[Action::Lock]),
    Row::new(State::Unlocked,  Event::Reset, State::Locked,    &[Action::Lock]),
    Row::new(State::Alarming,  Event::Coin,  State::Alarming,  &[]),
    Row::new(State::Alarming,  Event::Reset, State::Locked,    &[Action::AlarmOff, Action::Lock]),
];

#[rustfmt::skip]
const ONE_COIN_ROWS: [TurnstileRow; 8] = [
    Row::new(State::Locked,   Event::Coin,  State::Unlocked, &[Action::Unlock]),
    Row::new(State::Locked,   Event::Pass,  State::Alarming, &[Action::AlarmOn]),
    Row::new(State::Locked,   Event::Reset, State::Locked,   &[Action::Lock]),
    Row::new(State::Unlocked, Event::Coin,  State::Locked,   &[Action::Lock, Action::Thankyou]),
    Row::new(State::Unlocked, Event::Pass,  State::Locked,   &[Action::Lock]),
    Row::new(State::Unlocked, Event::Reset, State::Locked,   &[Action::Lock]),
    Row::new(State::Alarming, Event::Coin,  State::Alarming, &[]),
    Row::new(State::Alarming, Event::Reset, State::Locked,   &[Action::AlarmOff, Action::Lock]),
];

/// The two-coin turnstile.
pub static TWO_COIN: LazyLock<TurnstileTable> =
    LazyLock::new(|| Table::new("TwoCoinTurnstile", State::Locked, TWO_COIN_ROWS));

/// The one-coin turnstile.
pub static ONE_COIN: LazyLock<TurnstileTable> =
    LazyLock::new(|| Table::new("OneCoinTurnstile", State::Locked, ONE_COIN_ROWS));

/// A turnstile wired to its action sink.
///
/// ```
/// use turnstile_fsm::{ActionLog, State, Turnstile};
///
/// let mut log = ActionLog::new();
/// let mut gate = Turnstile::new(&mut log);
/// gate.coin();
/// gate.coin();
/// gate.pass();
/// assert_eq!(gate.state(), State::Locked);
/// drop(gate);
/// assert_eq!(log.as_str(), "UL");
/// ```
pub struct Turnstile<'a> {
    machine: Machine<'a, State, Event, Action>,
}

impl<'a> Turnstile<'a> {
    /// A two-coin turnstile, starting [`State::Locked`].
    pub fn new(actions: &'a mut dyn ActionSink<Action>) -> Self {
        Self::with_table(&TWO_COIN, actions)
    }

    /// A one-coin turnstile, starting [`State::Locked`].
    pub fn one_coin(actions: &'a mut dyn ActionSink<Action>) -> Self {
        Self::with_table(&ONE_COIN, actions)
    }

    /// A turnstile driven by an arbitrary table.
    pub fn with_table(table: &'a TurnstileTable, actions: &'a mut dyn ActionSink<Action>) -> Self {
        Turnstile {
            machine: Machine::new(table, actions),
        }
    }

    /// A coin was inserted.
    pub fn coin(&mut self) -> Outcome<State> {
        self.handle(Event::Coin)
    }

    /// Someone went through.
    pub fn pass(&mut self) -> Outcome<State> {
        self.handle(Event::Pass)
    }

    /// The service key was turned.
    pub fn reset(&mut self) -> Outcome<State> {
        self.handle(Event::Reset)
    }

    /// Dispatch any event.
    #[inline]
    pub fn handle(&mut self, event: Event) -> Outcome<State> {
        self.machine.trigger(event)
    }

    /// The current state.
    #[inline]
    pub fn state(&self) -> State {
        self.machine.state()
    }

    /// The table driving this turnstile.
    #[inline]
    pub fn table(&self) -> &'a TurnstileTable {
        self.machine.table()
    }

    /// Returns an iterator over events with a defined transition from the
    /// current state.
    pub fn triggerable_events(&self) -> impl Iterator<Item = Event> + 'a {
        self.machine.triggerable_events()
    }
}
