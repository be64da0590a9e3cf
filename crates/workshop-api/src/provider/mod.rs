//! Workshop platform client trait and implementations.

pub mod retry;
pub mod steam;

use async_trait::async_trait;

use crate::errors::WorkshopApiError;
use crate::models::{CollectionDetails, WorkshopItemDetails};

/// Client for a third-party workshop platform.
///
/// Implementations are expected to retry transient failures internally;
/// callers treat any returned error as final.
#[async_trait]
pub trait WorkshopPlatformClient: Send + Sync {
    /// Fetch metadata for a single workshop item. Collections are returned
    /// like any other item with `is_collection` set.
    async fn get_workshop_item_details(
        &self,
        workshop_id: &str,
    ) -> Result<WorkshopItemDetails, WorkshopApiError>;

    /// Fetch the ordered children of a collection, with titles.
    async fn get_collection_details(
        &self,
        collection_id: &str,
    ) -> Result<CollectionDetails, WorkshopApiError>;
}
