//! View-state machinery shared by every screen

mod debounce;
mod region;
mod view_state;

pub use debounce::QueryDebouncer;
pub use region::{FetchFn, Region, ResolutionPolicy};
pub use view_state::{Phase, ViewState};
