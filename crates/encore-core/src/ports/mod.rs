//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod cache;
mod catalog;
mod mailer;
mod queue;

pub use cache::{Cache, CacheError};
pub use catalog::CatalogStore;
pub use mailer::{Attachment, MailError, Mailer};
pub use queue::{Delivery, ExportQueue, QueueError};
