pub mod logging;

use clap::{
    builder::styling::{AnsiColor, Effects, Styles},
    Arg, ColorChoice, Command,
};

pub const ARG_BASE_URL: &str = "base-url";
pub const ARG_TIMEOUT: &str = "timeout";
pub const ARG_FORMAT: &str = "format";

pub const DEFAULT_BASE_URL: &str = "http://localhost:7171";

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let long_version: &'static str = Box::leak(
        format!("{} - {}", env!("CARGO_PKG_VERSION"), crate::GIT_COMMIT_HASH).into_boxed_str(),
    );

    let command = Command::new("bankapp-users")
        .about("Fetch and render the bank user list")
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .arg(
            Arg::new(ARG_BASE_URL)
                .short('u')
                .long("base-url")
                .help("Base URL of the bank API, users are read from <base-url>/users")
                .default_value(DEFAULT_BASE_URL)
                .env("BANKAPP_USERS_BASE_URL"),
        )
        .arg(
            Arg::new(ARG_TIMEOUT)
                .short('t')
                .long("timeout")
                .help("Request timeout in seconds")
                .default_value("10")
                .env("BANKAPP_USERS_TIMEOUT")
                .value_parser(clap::value_parser!(u64).range(1..)),
        )
        .arg(
            Arg::new(ARG_FORMAT)
                .short('f')
                .long("format")
                .help("Output format")
                .default_value("text")
                .env("BANKAPP_USERS_FORMAT")
                .value_parser(["text", "html"]),
        );

    logging::with_args(command)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let command = new();

        assert_eq!(command.get_name(), "bankapp-users");
        assert_eq!(
            command.get_about().map(ToString::to_string),
            Some("Fetch and render the bank user list".to_string())
        );
        assert_eq!(
            command.get_version().map(ToString::to_string),
            Some(env!("CARGO_PKG_VERSION").to_string())
        );
    }

    #[test]
    fn test_long_version_carries_commit() {
        let command = new();

        assert_eq!(
            command.get_long_version().map(ToString::to_string),
            Some(format!(
                "{} - {}",
                env!("CARGO_PKG_VERSION"),
                crate::GIT_COMMIT_HASH
            ))
        );
    }

    #[test]
    fn test_defaults() {
        temp_env::with_vars(
            [
                ("BANKAPP_USERS_BASE_URL", None::<&str>),
                ("BANKAPP_USERS_TIMEOUT", None::<&str>),
                ("BANKAPP_USERS_FORMAT", None::<&str>),
            ],
            || {
                let matches = new().get_matches_from(vec!["bankapp-users"]);
                assert_eq!(
                    matches.get_one::<String>(ARG_BASE_URL).map(String::as_str),
                    Some(DEFAULT_BASE_URL)
                );
                assert_eq!(matches.get_one::<u64>(ARG_TIMEOUT).copied(), Some(10));
                assert_eq!(
                    matches.get_one::<String>(ARG_FORMAT).map(String::as_str),
                    Some("text")
                );
            },
        );
    }

    #[test]
    fn test_check_args() {
        let matches = new().get_matches_from(vec![
            "bankapp-users",
            "--base-url",
            "https://bank.example.com/api",
            "--timeout",
            "3",
            "--format",
            "html",
        ]);

        assert_eq!(
            matches.get_one::<String>(ARG_BASE_URL).map(String::as_str),
            Some("https://bank.example.com/api")
        );
        assert_eq!(matches.get_one::<u64>(ARG_TIMEOUT).copied(), Some(3));
        assert_eq!(
            matches.get_one::<String>(ARG_FORMAT).map(String::as_str),
            Some("html")
        );
    }

    #[test]
    fn test_check_env() {
        temp_env::with_vars(
            [
                ("BANKAPP_USERS_BASE_URL", Some("http://users.internal:9000")),
                ("BANKAPP_USERS_TIMEOUT", Some("30")),
                ("BANKAPP_USERS_FORMAT", Some("html")),
                ("BANKAPP_USERS_LOG_LEVEL", Some("info")),
            ],
            || {
                let matches = new().get_matches_from(vec!["bankapp-users"]);
                assert_eq!(
                    matches.get_one::<String>(ARG_BASE_URL).map(String::as_str),
                    Some("http://users.internal:9000")
                );
                assert_eq!(matches.get_one::<u64>(ARG_TIMEOUT).copied(), Some(30));
                assert_eq!(
                    matches.get_one::<String>(ARG_FORMAT).map(String::as_str),
                    Some("html")
                );
                assert_eq!(
                    matches.get_one::<u8>(logging::ARG_VERBOSITY).copied(),
                    Some(2)
                );
            },
        );
    }

    #[test]
    fn test_check_log_level_verbosity() {
        for index in 0..5_usize {
            temp_env::with_vars([("BANKAPP_USERS_LOG_LEVEL", None::<String>)], || {
                let mut args = vec!["bankapp-users".to_string()];

                if index > 0 {
                    args.push(format!("-{}", "v".repeat(index)));
                }

                let matches = new().get_matches_from(args);

                assert_eq!(
                    matches.get_one::<u8>(logging::ARG_VERBOSITY).copied(),
                    u8::try_from(index).ok()
                );
            });
        }
    }

    #[test]
    fn test_rejects_zero_timeout_and_unknown_format() {
        assert!(new()
            .try_get_matches_from(vec!["bankapp-users", "--timeout", "0"])
            .is_err());
        assert!(new()
            .try_get_matches_from(vec!["bankapp-users", "--format", "xml"])
            .is_err());
    }
}
