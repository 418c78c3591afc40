//! # Encore Shared
//!
//! API envelope and request/response types shared by the server binaries.

pub mod dto;
pub mod response;

pub use response::ApiResponse;
