//! # Encore Core
//!
//! The domain layer of the Encore catalog backend.
//! This crate contains pure business logic with zero infrastructure dependencies:
//! the like-counter cache-aside service, the playlist export pipeline, and the
//! ports they depend on.

pub mod domain;
pub mod error;
pub mod ports;
pub mod services;

pub use error::DomainError;
