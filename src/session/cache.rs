//! Single-slot session cache with request deduplication
//!
//! There is exactly one "current session" entry; the client only ever
//! represents one logged-in identity at a time. The cache does not survive
//! a restart and never retries a failed fetch on its own.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use dioxus::prelude::use_context;
use futures::future::{FutureExt, LocalBoxFuture, Shared};

use crate::api::{ApiError, CurrentUserSource};
use crate::types::User;

type FetchResult = Result<Option<User>, ApiError>;
type SharedFetch = Shared<LocalBoxFuture<'static, FetchResult>>;

enum Slot {
    /// Nothing known; the next `read` fetches.
    Empty,
    /// A fetch is in flight; readers join it.
    Pending(SharedFetch),
    /// Last known subject (`None` = known signed out).
    Ready(Option<User>),
}

/// The one piece of shared truth in the app: the current session subject.
///
/// Constructed once by the root component and handed to consumers through
/// context, so the route guards and the login flow read and write the same
/// slot.
#[derive(Clone)]
pub struct SessionCache {
    source: Arc<dyn CurrentUserSource>,
    slot: Arc<Mutex<Slot>>,
}

impl SessionCache {
    pub fn new(source: Arc<dyn CurrentUserSource>) -> Self {
        Self {
            source,
            slot: Arc::new(Mutex::new(Slot::Empty)),
        }
    }

    fn slot(&self) -> MutexGuard<'_, Slot> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Memoized subject, fetching on a cold slot.
    ///
    /// Concurrent reads during an in-flight fetch share the single
    /// underlying request and resolve to the same value. A failed fetch
    /// leaves the slot cold so the next read retries.
    pub async fn read(&self) -> FetchResult {
        let fetch = {
            let mut slot = self.slot();
            match &*slot {
                Slot::Ready(user) => return Ok(user.clone()),
                Slot::Pending(fetch) => fetch.clone(),
                Slot::Empty => {
                    tracing::debug!("session cache cold, fetching current user");
                    let source = Arc::clone(&self.source);
                    let fetch: SharedFetch = async move { source.fetch_current_user().await }
                        .boxed_local()
                        .shared();
                    *slot = Slot::Pending(fetch.clone());
                    fetch
                }
            }
        };

        let result = fetch.clone().await;

        // Only the fetch that is still current may publish its result; a
        // write() that landed in the meantime wins.
        let mut slot = self.slot();
        let still_current = matches!(&*slot, Slot::Pending(current) if current.ptr_eq(&fetch));
        if still_current {
            *slot = match &result {
                Ok(user) => Slot::Ready(user.clone()),
                Err(_) => Slot::Empty,
            };
        }

        result
    }

    /// Unconditional overwrite, used after a successful login. Does not
    /// trigger a network call.
    pub fn write(&self, user: User) {
        tracing::debug!(username = %user.username, "session cache overwritten");
        *self.slot() = Slot::Ready(Some(user));
    }

    /// Drop whatever is memoized; the next `read` fetches again.
    pub fn invalidate(&self) {
        tracing::debug!("session cache invalidated");
        *self.slot() = Slot::Empty;
    }
}

/// Hook to access the cache provided by the root component
pub fn use_session_cache() -> SessionCache {
    use_context()
}
