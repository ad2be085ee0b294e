//! Domain layer: entities, repository contracts, and follow recording.
//!
//! - [`entities`] - Core data structures
//! - [`repositories`] - Data access trait definitions
//! - [`follow_event`] - Visit event queued by the lookup handler
//! - [`follow_recorder`] - Bounded queue and single background writer
//!
//! # Follow Processing Flow
//!
//! 1. Lookup handler resolves a short path
//! 2. [`follow_event::FollowEvent`] is queued on [`follow_recorder::FollowRecorder`]
//! 3. The worker appends the row via [`repositories::FollowRepository`]

pub mod entities;
pub mod follow_event;
pub mod follow_recorder;
pub mod repositories;
