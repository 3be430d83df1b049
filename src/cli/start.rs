use crate::cli::{
    actions::Action,
    commands::{self, logging},
    dispatch::handler,
    telemetry::{self, Telemetry},
};
use anyhow::Result;

/// Map verbosity count to tracing level
const fn get_verbosity_level(verbosity: u8) -> tracing::Level {
    match verbosity {
        0 => tracing::Level::ERROR,
        1 => tracing::Level::WARN,
        2 => tracing::Level::INFO,
        3 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    }
}

/// Start the CLI
///
/// # Errors
/// Returns an error if telemetry initialization or action dispatch fails
pub fn start() -> Result<(Action, Telemetry)> {
    let matches = commands::new().get_matches();

    let verbosity_level = get_verbosity_level(
        matches
            .get_one::<u8>(logging::ARG_VERBOSITY)
            .copied()
            .unwrap_or(0),
    );

    let telemetry = telemetry::init(
        verbosity_level,
        matches
            .get_one::<String>(logging::ARG_OTLP_ENDPOINT)
            .map(String::as_str),
    )?;

    let action = handler(&matches)?;

    Ok((action, telemetry))
}
