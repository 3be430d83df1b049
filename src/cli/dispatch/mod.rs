use crate::cli::actions::{Action, OutputFormat};
use crate::cli::commands::{ARG_BASE_URL, ARG_FORMAT, ARG_TIMEOUT};
use anyhow::{anyhow, Context, Result};
use std::time::Duration;

/// Map validated CLI matches to the list action.
///
/// # Errors
/// Returns an error if required arguments are missing or hold an unknown value.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let base_url = matches
        .get_one::<String>(ARG_BASE_URL)
        .cloned()
        .context("missing required argument: --base-url")?;

    let timeout = matches.get_one::<u64>(ARG_TIMEOUT).copied().unwrap_or(10);

    let format = match matches.get_one::<String>(ARG_FORMAT).map(String::as_str) {
        None | Some("text") => OutputFormat::Text,
        Some("html") => OutputFormat::Html,
        Some(other) => return Err(anyhow!("unsupported format: {other}")),
    };

    Ok(Action::List {
        base_url,
        timeout: Duration::from_secs(timeout),
        format,
    })
}
