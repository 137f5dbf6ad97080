use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::trace;

/// Raw and stabilized query text for one search box
#[derive(Debug, Default)]
struct DebounceState {
    raw_query: String,
    stable_query: String,
    pending_timer: Option<JoinHandle<()>>,
    /// Bumped on every edit so a timer that already woke cannot emit stale text
    generation: u64,
}

impl DebounceState {
    fn cancel_timer(&mut self) {
        self.generation += 1;
        if let Some(timer) = self.pending_timer.take() {
            timer.abort();
        }
    }
}

/// Turns keystrokes into a stable query signal.
///
/// Every edit restarts a single timer; when it runs out without further
/// edits the raw text becomes the stable query and is sent to the receiver
/// returned by [`QueryDebouncer::new`]. Unchanged stable values are not
/// re-sent.
pub struct QueryDebouncer {
    delay: Duration,
    state: Arc<Mutex<DebounceState>>,
    tx: mpsc::UnboundedSender<String>,
}

impl QueryDebouncer {
    pub const DEFAULT_DELAY: Duration = Duration::from_millis(500);

    pub fn new(delay: Duration) -> (Self, mpsc::UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let debouncer = Self {
            delay,
            state: Arc::new(Mutex::new(DebounceState::default())),
            tx,
        };
        (debouncer, rx)
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Record an edit and restart the quiet-period timer
    pub fn on_input(&self, text: impl Into<String>) {
        let mut state = self.state.lock();
        state.raw_query = text.into();
        state.cancel_timer();

        let generation = state.generation;
        let delay = self.delay;
        let shared = Arc::clone(&self.state);
        let tx = self.tx.clone();

        state.pending_timer = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;

            let mut state = shared.lock();
            if state.generation != generation {
                return;
            }
            state.pending_timer = None;

            if state.stable_query != state.raw_query {
                state.stable_query = state.raw_query.clone();
                trace!(query = %state.stable_query, "query stabilized");
                // Receiver gone means the owning screen is gone
                let _ = tx.send(state.stable_query.clone());
            }
        }));
    }

    /// Drop any pending edit and reset both queries without emitting
    pub fn clear(&self) {
        let mut state = self.state.lock();
        state.cancel_timer();
        state.raw_query.clear();
        state.stable_query.clear();
    }

    /// Text as typed, updated immediately
    pub fn raw_query(&self) -> String {
        self.state.lock().raw_query.clone()
    }

    /// Last stabilized text
    pub fn stable_query(&self) -> String {
        self.state.lock().stable_query.clone()
    }

    pub fn has_pending(&self) -> bool {
        self.state.lock().pending_timer.is_some()
    }
}

impl Drop for QueryDebouncer {
    fn drop(&mut self) {
        self.state.lock().cancel_timer();
    }
}
