//! SQLite storage implementation for ForgeFleet.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the repository traits defined in `forgefleet-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - Repository implementations for the workshop entities
//! - Database-specific model types (with Diesel derives)
//!
//! # Architecture
//!
//! This crate is the only place in the workspace where Diesel dependencies exist.
//! `core` is database-agnostic and works with traits.
//!
//! ```text
//! core (domain)     workshop-api (platform client)
//!       │
//!       ▼
//! storage-sqlite (this crate)
//!       │
//!       ▼
//!   SQLite DB
//! ```
//!
//! All writes are funnelled through a single writer task (see [`WriteHandle`]);
//! reads go straight to the pool.

pub mod db;
pub mod errors;
pub mod schema;
mod utils;

// Repository implementations
pub mod addons;
pub mod installations;
pub mod servers;
pub mod sessions;
pub mod strategies;

#[cfg(test)]
mod test_support;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, get_db_path, init, run_migrations, spawn_writer, DbConnection,
    DbPool, WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

// Re-export repositories
pub use addons::AddonRepository;
pub use installations::InstallationRepository;
pub use servers::{GameConfigRepository, ServerGameConfigRepository};
pub use sessions::SessionRepository;
pub use strategies::ConfigurationStrategyRepository;

// Re-export from forgefleet-core for convenience
pub use forgefleet_core::errors::{DatabaseError, Error, Result};
