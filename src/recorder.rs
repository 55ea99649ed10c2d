use std::fmt::Write;

use crate::turnstile::{Action, TurnstileActions};

/// A [`TurnstileActions`] that writes down what it was asked to do.
///
/// Each action appends its [`Action::code`]; an unexpected transition
/// appends `X(state,event)`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionLog {
    output: String,
}

impl ActionLog {
    /// An empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything recorded so far.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.output
    }

    /// Forget everything recorded so far.
    pub fn clear(&mut self) {
        self.output.clear();
    }

    /// Consume the log, returning its contents.
    pub fn into_string(self) -> String {
        self.output
    }

    fn record(&mut self, action: Action) {
        self.output.push(action.code());
    }
}

impl TurnstileActions for ActionLog {
    fn lock(&mut self) {
        self.record(Action::Lock);
    }

    fn unlock(&mut self) {
        self.record(Action::Unlock);
    }

    fn alarm_on(&mut self) {
        self.record(Action::AlarmOn);
    }

    fn alarm_off(&mut self) {
        self.record(Action::AlarmOff);
    }

    fn thankyou(&mut self) {
        self.record(Action::Thankyou);
    }

    fn unexpected_transition(&mut self, state: &str, event: &str) {
        // Writing into a String cannot fail.
        let _ = write!(self.output, "X({state},{event})");
    }
}
