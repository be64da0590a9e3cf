mod model;
mod repository;

pub use model::WorkshopInstallationDB;
pub use repository::InstallationRepository;
