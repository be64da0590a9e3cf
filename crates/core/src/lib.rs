//! Forgefleet Core - workshop addon control plane.
//!
//! Decides when an addon must be installed on or removed from a server game
//! config (SGC), resolves where it lives on the host, and hands the work to
//! the host agent through a [`commands::CommandPublisherTrait`]. Storage is
//! abstracted behind repository traits implemented by the `storage-sqlite`
//! crate; workshop metadata comes from `forgefleet-workshop-api`.

pub mod addons;
pub mod commands;
pub mod constants;
pub mod errors;
pub mod installations;
pub mod servers;
pub mod sessions;
pub mod strategies;

// Re-export error types
pub use errors::Error;
pub use errors::ErrorContext;
pub use errors::ErrorKind;
pub use errors::Result;
