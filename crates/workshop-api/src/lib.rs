//! Forgefleet Workshop API Crate
//!
//! This crate fetches user-generated content metadata (maps, mods and
//! collections of them) from an external workshop platform. It is used by
//! `forgefleet-core` when an operator registers a new addon.
//!
//! # Overview
//!
//! ```text
//! +-------------------------+
//! |  forgefleet-core        |  MetadataFetcher
//! +-------------------------+
//!              |
//!              v
//! +-------------------------+
//! | WorkshopPlatformClient  |  (trait, this crate)
//! +-------------------------+
//!              |
//!              v
//! +-------------------------+
//! |  SteamWorkshopClient    |  ISteamRemoteStorage Web API + retry
//! +-------------------------+
//! ```
//!
//! # Core Types
//!
//! - [`WorkshopItemDetails`] - Normalized metadata for one workshop item
//! - [`CollectionDetails`] - Ordered children of a workshop collection
//! - [`WorkshopApiError`] - Error type, classified with [`RetryClass`]
//! - [`SteamWorkshopConfig`] - Client configuration (env driven)

pub mod config;
pub mod errors;
pub mod models;
pub mod provider;

pub use config::SteamWorkshopConfig;
pub use errors::{RetryClass, WorkshopApiError};
pub use models::{CollectionDetails, CollectionItem, WorkshopItemDetails};
pub use provider::retry::RetryPolicy;
pub use provider::steam::SteamWorkshopClient;
pub use provider::WorkshopPlatformClient;
