use std::fmt;

/// Every way a fetch of the user collection can fail. The view recovers from all
/// of them the same way; the variants exist for the diagnostic log.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FetchError {
    Config(String),
    Network(String),
    Status { status: u16, message: String },
    Decode(String),
    ShapeMismatch(String),
}

impl fmt::Display for FetchError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Config(message) => write!(formatter, "Config error: {message}"),
            FetchError::Network(message) => write!(formatter, "Network error: {message}"),
            FetchError::Status { status, message } => {
                write!(formatter, "Request failed ({status}): {message}")
            }
            FetchError::Decode(message) => write!(formatter, "Response error: {message}"),
            FetchError::ShapeMismatch(message) => {
                write!(formatter, "Unexpected response shape: {message}")
            }
        }
    }
}

impl std::error::Error for FetchError {}
