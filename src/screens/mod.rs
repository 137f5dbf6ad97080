//! Screen-level coordinators built from [`Region`](crate::state::Region)s

mod detail;
mod discover;
mod home;


pub use detail::DetailView;
pub use discover::{Discover, DiscoverOptions, Listing};
pub use home::{HomeFeed, HomeSnapshot};
