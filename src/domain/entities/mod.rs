//! Core domain entities.
//!
//! - [`Link`] - A short path mapped to a long URL
//! - [`Follow`] - A visit of a short path
//!
//! `NewLink` and `NewFollow` carry the data for inserts.

pub mod follow;
pub mod link;

pub use follow::{Follow, NewFollow};
pub use link::{Link, NewLink};
