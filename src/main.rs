use std::io::{self, Read};

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;
use turnstile_fsm::{ActionLog, Event, Outcome, Turnstile, TurnstileActions};

const USAGE: &str = "usage: turnstile [--one-coin] [--table] [coin|pass|reset]...";

/// Prints every action as it happens and keeps the action codes.
#[derive(Default)]
struct Console {
    log: ActionLog,
}

impl Console {
    fn say(&self, what: &str) {
        println!("    {what}");
    }
}

impl TurnstileActions for Console {
    fn lock(&mut self) {
        self.say("lock");
        self.log.lock();
    }

    fn unlock(&mut self) {
        self.say("unlock");
        self.log.unlock();
    }

    fn alarm_on(&mut self) {
        self.say("alarm on");
        self.log.alarm_on();
    }

    fn alarm_off(&mut self) {
        self.say("alarm off");
        self.log.alarm_off();
    }

    fn thankyou(&mut self) {
        self.say("thank you");
        self.log.thankyou();
    }

    fn unexpected_transition(&mut self, state: &str, event: &str) {
        self.say(&format!("unexpected {event} while {state}"));
        TurnstileActions::unexpected_transition(&mut self.log, state, event);
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let mut one_coin = false;
    let mut show_table = false;
    let mut words = Vec::new();
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--one-coin" => one_coin = true,
            "--table" => show_table = true,
            "-h" | "--help" => {
                println!("{USAGE}");
                return Ok(());
            }
            _ => words.push(arg),
        }
    }

    let mut console = Console::default();
    let mut gate = if one_coin {
        Turnstile::one_coin(&mut console)
    } else {
        Turnstile::new(&mut console)
    };

    if show_table {
        println!("{}", gate.table());
        return Ok(());
    }

    if words.is_empty() {
        let mut input = String::new();
        io::stdin()
            .read_to_string(&mut input)
            .context("failed to read events from stdin")?;
        words.extend(input.split_whitespace().map(String::from));
    }

    let events = words
        .iter()
        .map(|w| w.parse::<Event>())
        .collect::<Result<Vec<_>, _>>()
        .context(USAGE)?;

    info!(fsm = gate.table().name(), events = events.len(), "running");
    for event in events {
        println!("{event}");
        if let Outcome::Transitioned { from, to } = gate.handle(event) {
            println!("  {from} -> {to}");
        }
    }
    drop(gate);

    println!("{}", console.log.as_str());
    Ok(())
}
