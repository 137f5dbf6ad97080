use serde::Serialize;

/// Loading / success / error state of one fetched region.
///
/// A region is either loading or settled. A settled region has either a
/// payload (possibly empty) or an error, never both from the same attempt.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewState<T> {
    pub payload: Vec<T>,
    pub is_loading: bool,
    pub has_error: bool,
}

/// Coarse phase of a [`ViewState`], handy for matching
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Loading,
    Success,
    Error,
}

impl<T> ViewState<T> {
    /// Fresh state for a region that is about to fetch
    pub fn loading() -> Self {
        Self {
            payload: Vec::new(),
            is_loading: true,
            has_error: false,
        }
    }

    pub fn phase(&self) -> Phase {
        if self.is_loading {
            Phase::Loading
        } else if self.has_error {
            Phase::Error
        } else {
            Phase::Success
        }
    }

    /// Start a new attempt. The previous payload stays visible until it settles.
    pub fn begin(&mut self) {
        self.is_loading = true;
        self.has_error = false;
    }

    /// Settle with a payload; an empty payload is still a success
    pub fn succeed(&mut self, payload: Vec<T>) {
        self.payload = payload;
        self.is_loading = false;
        self.has_error = false;
    }

    /// Settle with an error
    pub fn fail(&mut self) {
        self.payload.clear();
        self.is_loading = false;
        self.has_error = true;
    }

    pub fn is_settled(&self) -> bool {
        !self.is_loading
    }

    pub fn is_success(&self) -> bool {
        self.phase() == Phase::Success
    }

    /// First payload item, for single-record regions
    pub fn first(&self) -> Option<&T> {
        self.payload.first()
    }
}

impl<T> Default for ViewState<T> {
    fn default() -> Self {
        Self::loading()
    }
}
