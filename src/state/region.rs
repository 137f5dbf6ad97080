use super::{Phase, ViewState};
use crate::catalog;
use futures::future::{BoxFuture, FutureExt};
use parking_lot::Mutex;
use serde::Deserialize;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, trace, warn};

/// Re-runnable fetch for a region
pub type FetchFn<T> = Arc<dyn Fn() -> BoxFuture<'static, catalog::Result<Vec<T>>> + Send + Sync>;

/// Which result a region keeps when several of its requests overlap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionPolicy {
    /// Only the most recently issued request may settle the region
    #[default]
    LatestIssued,
    /// Every resolution is applied in arrival order, so a slow stale
    /// response can overwrite a newer one
    LastArrival,
}

/// One UI region: a [`ViewState`] plus the fetch that fills it.
///
/// Each `start`/`retry` spawns an independent task; nothing here waits on
/// another region. Clones share the same state.
pub struct Region<T> {
    name: Arc<str>,
    state: Arc<watch::Sender<ViewState<T>>>,
    fetch: Arc<Mutex<Option<FetchFn<T>>>>,
    issued: Arc<AtomicU64>,
    policy: ResolutionPolicy,
}

impl<T> Clone for Region<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            state: self.state.clone(),
            fetch: self.fetch.clone(),
            issued: self.issued.clone(),
            policy: self.policy,
        }
    }
}

impl<T> Region<T>
where
    T: Send + Sync + 'static,
{
    /// New region in the loading state
    pub fn new(name: impl Into<Arc<str>>, policy: ResolutionPolicy) -> Self {
        let (state, _) = watch::channel(ViewState::loading());
        Self {
            name: name.into(),
            state: Arc::new(state),
            fetch: Arc::new(Mutex::new(None)),
            issued: Arc::new(AtomicU64::new(0)),
            policy,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn policy(&self) -> ResolutionPolicy {
        self.policy
    }

    /// Remember `fetch`, enter loading and run it
    pub fn start<F, Fut>(&self, fetch: F) -> JoinHandle<()>
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = catalog::Result<Vec<T>>> + Send + 'static,
    {
        let fetch: FetchFn<T> = Arc::new(move || fetch().boxed());
        *self.fetch.lock() = Some(fetch.clone());
        self.issue(fetch)
    }

    /// Run the last started fetch again. `None` if nothing was started yet.
    pub fn retry(&self) -> Option<JoinHandle<()>> {
        let fetch = self.fetch.lock().clone()?;
        debug!("Retrying region {}", self.name);
        Some(self.issue(fetch))
    }

    /// Settle in the error state without fetching. Under
    /// [`ResolutionPolicy::LatestIssued`] in-flight results are discarded.
    pub fn fail_now(&self) {
        self.state.send_modify(|state| {
            self.issued.fetch_add(1, Ordering::SeqCst);
            state.fail();
        });
    }

    fn issue(&self, fetch: FetchFn<T>) -> JoinHandle<()> {
        let mut ticket = 0;
        self.state.send_modify(|state| {
            ticket = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
            state.begin();
        });
        trace!(region = %self.name, ticket, "fetch issued");

        let name = self.name.clone();
        let state = self.state.clone();
        let issued = self.issued.clone();
        let policy = self.policy;
        // A fetch function can panic before it hands back a future
        let request = std::panic::catch_unwind(AssertUnwindSafe(|| fetch()));

        tokio::spawn(async move {
            let outcome = match request {
                Ok(request) => AssertUnwindSafe(request).catch_unwind().await,
                Err(panic) => Err(panic),
            };

            state.send_if_modified(|view| {
                if policy == ResolutionPolicy::LatestIssued
                    && issued.load(Ordering::SeqCst) != ticket
                {
                    debug!("Dropping stale result for region {} (ticket {})", name, ticket);
                    return false;
                }

                match outcome {
                    Ok(Ok(payload)) => {
                        trace!(region = %name, ticket, items = payload.len(), "fetch succeeded");
                        view.succeed(payload);
                    }
                    Ok(Err(e)) => {
                        warn!("Region {} failed to load: {}", name, e);
                        view.fail();
                    }
                    Err(_) => {
                        error!("Region {} fetch panicked", name);
                        view.fail();
                    }
                }
                true
            });
        })
    }

    /// Receiver notified on every state change
    pub fn subscribe(&self) -> watch::Receiver<ViewState<T>> {
        self.state.subscribe()
    }

    pub fn phase(&self) -> Phase {
        self.state.borrow().phase()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading
    }

    /// Wait until the region leaves the loading state
    pub async fn settled(&self) {
        let mut rx = self.subscribe();
        // The sender lives in `self`, so the channel cannot close here
        let _ = rx.wait_for(|view| !view.is_loading).await;
    }
}

impl<T> Region<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Copy of the current state
    pub fn snapshot(&self) -> ViewState<T> {
        self.state.borrow().clone()
    }
}
