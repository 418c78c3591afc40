//! Database connection management and the SeaORM catalog store.

mod connections;

pub use connections::{DatabaseConfig, DatabaseConnections};

#[cfg(feature = "postgres")]
pub mod entity;

#[cfg(feature = "postgres")]
mod catalog_repo;
#[cfg(feature = "postgres")]
pub use catalog_repo::PostgresCatalog;

#[cfg(feature = "postgres")]
#[cfg(test)]
mod tests;
