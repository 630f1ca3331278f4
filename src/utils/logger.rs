//! Console backend for the `log` facade
//!
//! The library only emits records; binaries call [`init`] once at startup
//! so the controller and simulation logs (decisions, encounters, rejected
//! moves) reach the terminal. Records go to stderr, keeping stdout for
//! reports.
//!
//! ```ignore
//! use footbot_diffusion::utils::logger;
//!
//! logger::init(logger::level_from_env()).expect("logger already set");
//! log::info!("started");
//! ```

use std::env;
use std::io::{self, Write};

use log::{LevelFilter, Metadata, Record, SetLoggerError};

/// Environment variable holding the maximum level (`off`, `error` .. `trace`)
pub const LOG_LEVEL_ENV: &str = "FOOTBOT_LOG";

/// Writes every enabled record to stderr as `LEVEL target - message`.
pub struct ConsoleLogger;

impl log::Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let mut stderr = io::stderr().lock();
            let _ = writeln!(stderr, "{}", format_record(record));
        }
    }

    fn flush(&self) {
        let _ = io::stderr().flush();
    }
}

static LOGGER: ConsoleLogger = ConsoleLogger;

/// Install the console logger with the given maximum level.
///
/// # Errors
///
/// Returns [`SetLoggerError`] if a logger has already been set.
pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
    log::set_logger(&LOGGER).map(|()| log::set_max_level(level))
}

/// Level from `$FOOTBOT_LOG`, `Info` when unset or unparsable
pub fn level_from_env() -> LevelFilter {
    parse_level(env::var(LOG_LEVEL_ENV).ok().as_deref())
}

fn parse_level(value: Option<&str>) -> LevelFilter {
    value
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(LevelFilter::Info)
}

fn format_record(record: &Record) -> String {
    format!("{:<5} {} - {}", record.level(), record.target(), record.args())
}
