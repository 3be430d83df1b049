pub mod client;
pub use self::client::{endpoint_url, UsersClient, UsersSource};

pub mod error;
pub use self::error::FetchError;

pub mod model;
pub use self::model::{User, UserCollection, UserId, UsersEnvelope};

pub mod render;
pub use self::render::{ListItem, Rendered};

pub mod view;
pub use self::view::{FetchDisposition, MountedView, UserListView, ViewState};
