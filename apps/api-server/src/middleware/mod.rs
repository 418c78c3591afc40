//! Server-level middleware.

pub mod error;
