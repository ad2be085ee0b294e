//! Data Transfer Objects for request/response serialization.

pub mod create;
