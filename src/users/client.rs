use crate::users::{FetchError, UserCollection, UsersEnvelope};
use reqwest::Client;
use serde_json::Value;
use std::{future::Future, time::Duration};
use tracing::{debug, info_span, instrument, Instrument};
use url::Url;

/// Default request timeout applied by [`UsersClient`].
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
/// Maximum number of error body characters carried into [`FetchError::Status`].
const MAX_ERROR_CHARS: usize = 200;

/// Anything that can produce the user collection. The view only talks to this.
pub trait UsersSource: Send + Sync + 'static {
    fn fetch_users(&self) -> impl Future<Output = Result<UserCollection, FetchError>> + Send;
}

/// Build `<scheme>://<host>:<port><base path><path>` from `base_url`, keeping any
/// path prefix of the base.
///
/// # Errors
/// Returns [`FetchError::Config`] if `base_url` cannot be parsed, has no host, uses
/// an unsupported scheme, or carries credentials, a query or a fragment.
pub fn endpoint_url(base_url: &str, path: &str) -> Result<String, FetchError> {
    let url = Url::parse(base_url)
        .map_err(|err| FetchError::Config(format!("Error parsing URL {base_url}: {err}")))?;

    if !url.username().is_empty() || url.password().is_some() {
        return Err(FetchError::Config(
            "Error parsing URL: credentials are not supported in the base URL".to_string(),
        ));
    }

    if url.query().is_some() || url.fragment().is_some() {
        return Err(FetchError::Config(
            "Error parsing URL: query and fragment are not supported in the base URL".to_string(),
        ));
    }

    let scheme = url.scheme();

    let host = url
        .host()
        .ok_or_else(|| FetchError::Config("Error parsing URL: no host specified".to_string()))?
        .to_owned();

    let port = match url.port() {
        Some(p) => p,
        None => match scheme {
            "http" => 80,
            "https" => 443,
            _ => {
                return Err(FetchError::Config(format!(
                    "Error parsing URL: unsupported scheme {scheme}"
                )))
            }
        },
    };

    let prefix = url.path().trim_end_matches('/');

    let endpoint_url = format!("{scheme}://{host}:{port}{prefix}{path}");

    debug!("endpoint URL: {}", endpoint_url);

    Ok(endpoint_url)
}

/// HTTP source for `GET <base_url>/users`.
#[derive(Clone, Debug)]
pub struct UsersClient {
    client: Client,
    users_url: String,
}

impl UsersClient {
    /// # Errors
    /// Returns [`FetchError::Config`] if the base URL is invalid or the HTTP client
    /// cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, FetchError> {
        let users_url = endpoint_url(base_url, "/users")?;

        let client = Client::builder()
            .user_agent(crate::APP_USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|err| FetchError::Config(format!("Error creating reqwest client: {err}")))?;

        Ok(Self { client, users_url })
    }

    #[must_use]
    pub fn users_url(&self) -> &str {
        &self.users_url
    }

    #[instrument(skip(self), fields(url = %self.users_url))]
    async fn get_users(&self) -> Result<UserCollection, FetchError> {
        let span = info_span!(
            "users.fetch",
            http.method = "GET",
            url = %self.users_url
        );

        let response = self
            .client
            .get(&self.users_url)
            .send()
            .instrument(span)
            .await
            .map_err(|err| FetchError::Network(err.to_string()))?;

        let status = response.status();

        let body = response
            .text()
            .await
            .map_err(|err| FetchError::Network(err.to_string()))?;

        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                message: body.chars().take(MAX_ERROR_CHARS).collect(),
            });
        }

        decode_users(&body)
    }
}

impl UsersSource for UsersClient {
    fn fetch_users(&self) -> impl Future<Output = Result<UserCollection, FetchError>> + Send {
        self.get_users()
    }
}

/// Decode a `/users` response body.
///
/// # Errors
/// [`FetchError::Decode`] if the body is not JSON, [`FetchError::ShapeMismatch`] if it
/// is JSON but not the expected envelope.
pub fn decode_users(body: &str) -> Result<UserCollection, FetchError> {
    let json_response: Value =
        serde_json::from_str(body).map_err(|err| FetchError::Decode(err.to_string()))?;

    debug!("fetched users: {}", json_response);

    let envelope: UsersEnvelope = serde_json::from_value(json_response)
        .map_err(|err| FetchError::ShapeMismatch(err.to_string()))?;

    if let Some(href) = envelope.self_href() {
        debug!("users collection self link: {}", href);
    }

    UserCollection::from_envelope(envelope)
}
