use anyhow::Result;
use bankapp_users::cli::{actions, actions::Action, start};

// Main function
#[tokio::main]
async fn main() -> Result<()> {
    // Start the program
    let (action, telemetry) = start()?;

    // Handle the action
    let result = match action {
        Action::List { .. } => actions::list::handle(action).await,
    };

    telemetry.shutdown();

    result
}
