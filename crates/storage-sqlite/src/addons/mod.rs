mod model;
mod repository;

pub use model::WorkshopAddonDB;
pub use repository::AddonRepository;
