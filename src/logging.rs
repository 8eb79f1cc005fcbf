#![cfg(feature = "std")]

use std::env;
use log::{self, LevelFilter, Metadata, Record};

/// Log targets of this crate's library and binaries.
const OWN_TARGETS: [&str; 2] = ["grid_games", "sim"];

/// Keeps dependency chatter out of `GRID_GAMES_LOG=debug` output.
fn is_own_target(target: &str) -> bool {
    OWN_TARGETS.iter().any(|own| {
        target == *own || target.strip_prefix(own).is_some_and(|rest| rest.starts_with("::"))
    })
}

/// Writes records to stderr so they never interleave with the game board.
struct SimpleLogger;

impl log::Log for SimpleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level() && is_own_target(metadata.target())
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("{} [{}] {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: SimpleLogger = SimpleLogger;

/// Initialize logging with a level taken from the `GRID_GAMES_LOG` environment variable.
/// Defaults to `warn` if the variable is not set or invalid.
pub fn init_logging() {
    let level = env::var("GRID_GAMES_LOG")
        .ok()
        .and_then(|lvl| lvl.parse().ok())
        .unwrap_or(LevelFilter::Warn);
    let _ = log::set_logger(&LOGGER).map(|()| log::set_max_level(level));
}
