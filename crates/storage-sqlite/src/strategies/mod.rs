mod model;
mod repository;

pub use model::ConfigurationStrategyDB;
pub use repository::ConfigurationStrategyRepository;
