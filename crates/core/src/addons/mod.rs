//! Addons module - workshop addon models, repository trait and metadata fetching.

mod addons_model;
mod addons_traits;
mod metadata_fetcher;


pub use addons_model::{
    AddonMetadata, CollectionItemRef, NewWorkshopAddon, PlatformType, WorkshopAddon,
};
pub use addons_traits::{AddonRepositoryTrait, MetadataFetcherTrait};
pub use metadata_fetcher::MetadataFetcher;
