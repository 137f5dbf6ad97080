//! Movie catalog client and view-state coordination for the Movie Studio app.
//!
//! [`catalog`] talks to the movie database and never leaves a screen empty;
//! [`state`] holds the per-region loading/success/error machinery;
//! [`screens`] wires both into the home, discover and detail pages;
//! [`auth`] and [`payments`] are the account and subscription boundaries.

pub mod auth;
pub mod catalog;
pub mod config;
pub mod logging;
pub mod payments;
pub mod screens;
pub mod state;
