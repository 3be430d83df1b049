use crate::cli::actions::{Action, OutputFormat};
use crate::users::{UserListView, UsersClient};
use anyhow::Result;
use tracing::{debug, info};

/// Mount the user list once, wait for its fetch and return the settled render.
///
/// # Errors
/// Returns an error if the base URL is invalid or the fetch task panicked.
pub async fn render(action: Action) -> Result<String> {
    match action {
        Action::List {
            base_url,
            timeout,
            format,
        } => {
            let client = UsersClient::new(&base_url, timeout)?;

            info!("Fetching users from {}", client.users_url());

            let view = UserListView::new(client);
            let mut mounted = view.mount();
            let rendered = mounted.settled().await;

            let disposition = mounted.unmount().await?;
            debug!("fetch disposition: {:?}", disposition);

            Ok(match format {
                OutputFormat::Text => rendered.to_string(),
                OutputFormat::Html => format!("{}\n", rendered.to_html()),
            })
        }
    }
}

/// Handle the list action, writing the render to stdout
///
/// # Errors
/// See [`render`].
pub async fn handle(action: Action) -> Result<()> {
    let output = render(action).await?;

    print!("{output}");

    Ok(())
}
