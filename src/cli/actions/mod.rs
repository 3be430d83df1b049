pub mod list;

use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Html,
}

#[derive(Debug)]
pub enum Action {
    List {
        base_url: String,
        timeout: Duration,
        format: OutputFormat,
    },
}
