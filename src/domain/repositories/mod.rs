//! Repository trait definitions for the domain layer.
//!
//! Implementations live in `crate::infrastructure::persistence`. Mock
//! implementations are generated via `mockall` for unit tests.
//!
//! - [`LinkRepository`] - Short link reservation and lookup
//! - [`FollowRepository`] - Append-only visit log

pub mod follow_repository;
pub mod link_repository;

pub use follow_repository::FollowRepository;
pub use link_repository::LinkRepository;

#[cfg(test)]
pub use follow_repository::MockFollowRepository;
#[cfg(test)]
pub use link_repository::MockLinkRepository;
