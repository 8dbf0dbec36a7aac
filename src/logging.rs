//! Structured logging setup
//!
//! The operators only emit `tracing` events; this module wires a subscriber
//! for binaries and tests that want to see them.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize structured logging.
///
/// The `PATHLOOM_LOG` environment variable overrides the computed level
/// (e.g. `PATHLOOM_LOG=pathloom=trace`).
pub fn init_tracing(
    verbose: bool,
    log_level: Option<&str>,
    log_json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let level = match (verbose, log_level) {
        (true, None) => "pathloom=debug",
        (false, None) => "pathloom=warn",
        (_, Some(level)) => return init_with_level(level, log_json),
    };

    init_with_level(level, log_json)
}

fn init_with_level(level: &str, log_json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_from_env("PATHLOOM_LOG"))
        .unwrap_or_else(|_| {
            EnvFilter::new(if level.contains('=') {
                level.to_string()
            } else {
                format!("pathloom={}", level)
            })
        });

    let registry = tracing_subscriber::registry().with(filter);

    if log_json {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_ansi(false)
                    .with_span_events(
                        tracing_subscriber::fmt::format::FmtSpan::NEW
                            | tracing_subscriber::fmt::format::FmtSpan::CLOSE,
                    ),
            )
            .try_init()?;
    } else {
        registry
            .with(
                fmt::layer()
                    .compact()
                    .with_target(false)
                    .with_writer(std::io::stderr)
                    .with_ansi(false),
            )
            .try_init()?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Only one global subscriber may exist; the first init wins and a
    /// second attempt reports an error instead of panicking.
    #[test]
    fn test_init_tracing_is_fallible_not_panicking() {
        let first = init_tracing(true, None, false);
        assert!(first.is_ok());
        let second = init_tracing(false, Some("debug"), true);
        assert!(second.is_err());
    }
}
