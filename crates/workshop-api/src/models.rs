//! Platform-neutral workshop models returned by [`WorkshopPlatformClient`](crate::WorkshopPlatformClient).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Normalized metadata for a single workshop item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkshopItemDetails {
    pub workshop_id: String,
    pub title: String,
    pub description: Option<String>,
    pub file_size_bytes: Option<i64>,
    /// True when the item is a collection of other items.
    pub is_collection: bool,
    pub time_updated: Option<DateTime<Utc>>,
    /// App the content is consumed by (the game's app id).
    pub consumer_app_id: Option<u32>,
    pub preview_url: Option<String>,
    pub tags: Vec<String>,
}

/// One child of a workshop collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionItem {
    pub workshop_id: String,
    pub title: String,
    pub sort_order: i32,
}

/// The ordered children of a workshop collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionDetails {
    pub collection_id: String,
    /// Children in display order.
    pub items: Vec<CollectionItem>,
}
