//! Core services - the business logic that reasons about time, partial
//! failure, and bounded resources.

pub mod export;
pub mod likes;

#[cfg(test)]
pub(crate) mod fakes;

pub use export::{ExportProducer, ExportWorker};
pub use likes::{CountSource, LikeCounter};
