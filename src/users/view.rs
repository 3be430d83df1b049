//! The user list component. A [`UserListView`] is the component definition holding
//! its injected [`UsersSource`]; each [`UserListView::mount`] produces an independent
//! [`MountedView`] with its own state and exactly one fetch.
//!
//! State lives in a `watch` channel owned by the mount: the fetch task is the only
//! writer and it writes once. Unmounting clears the liveness flag, so a response that
//! arrives afterwards is dropped instead of written.

use crate::users::{Rendered, UserCollection, UsersSource};
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use tokio::{sync::watch, task::JoinHandle};
use tracing::{debug, error, info, Instrument};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewState {
    /// Initial empty sequence, before the fetch resolves.
    Unfetched,
    Loaded(UserCollection),
    /// The fetch failed; holds no users and renders the fallback item.
    Unavailable,
}

impl ViewState {
    #[must_use]
    pub fn is_settled(&self) -> bool {
        !matches!(self, ViewState::Unfetched)
    }

    #[must_use]
    pub fn render(&self) -> Rendered {
        match self {
            ViewState::Unfetched => Rendered::list(&UserCollection::default()),
            ViewState::Loaded(users) => Rendered::list(users),
            ViewState::Unavailable => Rendered::fallback(),
        }
    }
}

/// What the fetch task did with its result.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FetchDisposition {
    Applied,
    Discarded,
}

pub struct UserListView<S> {
    source: Arc<S>,
}

impl<S: UsersSource> UserListView<S> {
    pub fn new(source: S) -> Self {
        Self {
            source: Arc::new(source),
        }
    }

    /// Mount a new instance and start its fetch. Must be called inside a tokio runtime.
    pub fn mount(&self) -> MountedView {
        let (tx, rx) = watch::channel(ViewState::Unfetched);
        let alive = Arc::new(AtomicBool::new(true));

        let source = Arc::clone(&self.source);
        let task_alive = Arc::clone(&alive);

        let fetch = tokio::spawn(
            async move {
                let result = source.fetch_users().await;

                if !task_alive.load(Ordering::Acquire) {
                    debug!("view unmounted before the fetch resolved, discarding result");
                    return FetchDisposition::Discarded;
                }

                let next = match result {
                    Ok(users) => {
                        info!("Fetched {} users", users.len());
                        ViewState::Loaded(users)
                    }
                    Err(e) => {
                        error!("Error fetching users: {}", e);
                        ViewState::Unavailable
                    }
                };

                tx.send_replace(next);

                FetchDisposition::Applied
            }
            .in_current_span(),
        );

        MountedView {
            state: rx,
            alive: Liveness(alive),
            fetch,
        }
    }
}

struct Liveness(Arc<AtomicBool>);

impl Drop for Liveness {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// A mounted instance of [`UserListView`]. Dropping it has the same effect as
/// [`MountedView::unmount`].
pub struct MountedView {
    state: watch::Receiver<ViewState>,
    alive: Liveness,
    fetch: JoinHandle<FetchDisposition>,
}

impl MountedView {
    #[must_use]
    pub fn state(&self) -> ViewState {
        self.state.borrow().clone()
    }

    #[must_use]
    pub fn render(&self) -> Rendered {
        self.state.borrow().render()
    }

    /// Wait for the fetch to resolve and return the re-render it triggered.
    pub async fn settled(&mut self) -> Rendered {
        let settled = self
            .state
            .wait_for(ViewState::is_settled)
            .await
            .map(|state| state.render());

        // the task ended without writing (it panicked); keep what is displayed
        settled.unwrap_or_else(|_| self.render())
    }

    /// Unmount, returning the fetch task so callers can observe a late response
    /// being discarded. The request itself is not cancelled.
    pub fn unmount(self) -> JoinHandle<FetchDisposition> {
        let Self { alive, fetch, .. } = self;
        drop(alive);
        fetch
    }
}
