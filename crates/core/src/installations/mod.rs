//! Installations module - per-SGC addon installs, path resolution and removal gating.

mod installations_model;
mod installations_service;
mod installations_traits;
mod path_resolver;

#[cfg(test)]
mod installations_service_tests;

pub use installations_model::{InstallationStatus, NewInstallation, WorkshopInstallation};
pub use installations_service::InstallationManager;
pub use installations_traits::{InstallationRepositoryTrait, InstallationServiceTrait};
pub use path_resolver::{join_install_path, normalize_path, PathResolver};
