//! Log output for the server.
//!
//! Two targets are filtered: `userapi` (store and handler events) and
//! `tower_http` (one span per request from the trace layer). `RUST_LOG`
//! replaces the computed filter entirely when set.

use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Targets the default filter applies the chosen level to.
const TARGETS: [&str; 2] = ["userapi", "tower_http"];

/// How much the server logs, chosen with `-q` / `-v` on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Errors only, such as failed binds or 5xx responses.
    Quiet,
    /// Startup, shutdown and every create, update and delete.
    #[default]
    Normal,
    /// Adds rejected requests (4xx) and per-request trace events.
    Verbose,
    /// Everything either target emits.
    Trace,
}

impl Verbosity {
    /// Pick a verbosity from the `-q` flag and the number of `-v` flags.
    ///
    /// `quiet` wins over any number of `-v`.
    #[must_use]
    pub fn from_flags(quiet: bool, verbose: u8) -> Self {
        match (quiet, verbose) {
            (true, _) => Self::Quiet,
            (false, 0) => Self::Normal,
            (false, 1) => Self::Verbose,
            (false, _) => Self::Trace,
        }
    }

    /// Maximum level emitted at this verbosity.
    #[must_use]
    pub fn to_level_filter(&self) -> Level {
        match self {
            Self::Quiet => Level::ERROR,
            Self::Normal => Level::INFO,
            Self::Verbose => Level::DEBUG,
            Self::Trace => Level::TRACE,
        }
    }

    /// Filter directive used when `RUST_LOG` is unset,
    /// e.g. `userapi=INFO,tower_http=INFO`.
    #[must_use]
    pub fn default_directive(&self) -> String {
        let level = self.to_level_filter();
        TARGETS
            .iter()
            .map(|target| format!("{target}={level}"))
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Install the global subscriber for the `userapi` binary.
///
/// Calling it again is harmless; later calls leave the first subscriber in
/// place.
///
/// ```no_run
/// use userapi::{init_logging, logging::Verbosity};
///
/// init_logging(Verbosity::Verbose);
/// ```
pub fn init_logging(verbosity: Verbosity) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.default_directive()));

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true).with_thread_ids(false))
        .try_init();
}

/// Route log output through the test harness so it shows up only for
/// failing tests.
#[cfg(test)]
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("warn")
        .with_test_writer()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_flags() {
        assert_eq!(Verbosity::from_flags(false, 0), Verbosity::Normal);
        assert_eq!(Verbosity::from_flags(false, 1), Verbosity::Verbose);
        assert_eq!(Verbosity::from_flags(false, 5), Verbosity::Trace);
        assert_eq!(Verbosity::from_flags(true, 3), Verbosity::Quiet);
    }

    #[test]
    fn test_verbosity_to_level() {
        assert_eq!(Verbosity::Quiet.to_level_filter(), Level::ERROR);
        assert_eq!(Verbosity::Normal.to_level_filter(), Level::INFO);
        assert_eq!(Verbosity::Verbose.to_level_filter(), Level::DEBUG);
        assert_eq!(Verbosity::Trace.to_level_filter(), Level::TRACE);
    }

    #[test]
    fn test_default_directive_covers_request_tracing() {
        assert_eq!(
            Verbosity::Normal.default_directive(),
            "userapi=INFO,tower_http=INFO"
        );
        assert_eq!(
            Verbosity::Quiet.default_directive(),
            "userapi=ERROR,tower_http=ERROR"
        );
    }

    #[test]
    fn test_directive_parses_as_filter() {
        for verbosity in [
            Verbosity::Quiet,
            Verbosity::Normal,
            Verbosity::Verbose,
            Verbosity::Trace,
        ] {
            assert!(EnvFilter::try_new(verbosity.default_directive()).is_ok());
        }
    }

    #[test]
    fn test_init_logging_twice_is_harmless() {
        init_logging(Verbosity::Quiet);
        init_logging(Verbosity::Trace);
    }
}
