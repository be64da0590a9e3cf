//! Steam Web API response structures (`ISteamRemoteStorage`).

use chrono::{TimeZone, Utc};
use serde::{Deserialize, Deserializer};

use crate::errors::WorkshopApiError;
use crate::models::WorkshopItemDetails;

/// EResult value for success.
pub(crate) const RESULT_OK: i32 = 1;
/// EResult value for a missing file.
pub(crate) const RESULT_FILE_NOT_FOUND: i32 = 9;
/// `EWorkshopFileType::k_EWorkshopFileTypeCollection`.
const FILE_TYPE_COLLECTION: u32 = 2;
/// Collections are published under the Steam Workshop app itself.
const COLLECTIONS_APP_ID: u32 = 766;

/// Response from `GetPublishedFileDetails`.
#[derive(Debug, Deserialize)]
pub(crate) struct PublishedFileDetailsResponse {
    pub response: PublishedFileDetailsEnvelope,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PublishedFileDetailsEnvelope {
    #[serde(default)]
    pub publishedfiledetails: Vec<PublishedFileDetails>,
}

/// One entry of `publishedfiledetails`. Missing items only carry
/// `publishedfileid` and `result`.
#[derive(Debug, Deserialize)]
pub(crate) struct PublishedFileDetails {
    pub publishedfileid: String,
    pub result: i32,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Sent as a number by some endpoints and as a string by others.
    #[serde(default, deserialize_with = "de_opt_i64")]
    pub file_size: Option<i64>,
    #[serde(default, deserialize_with = "de_opt_i64")]
    pub time_updated: Option<i64>,
    #[serde(default)]
    pub creator_app_id: Option<u32>,
    #[serde(default)]
    pub consumer_app_id: Option<u32>,
    #[serde(default)]
    pub file_type: Option<u32>,
    #[serde(default)]
    pub preview_url: Option<String>,
    #[serde(default)]
    pub tags: Vec<Tag>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Tag {
    pub tag: String,
}

/// Response from `GetCollectionDetails`.
#[derive(Debug, Deserialize)]
pub(crate) struct CollectionDetailsResponse {
    pub response: CollectionDetailsEnvelope,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CollectionDetailsEnvelope {
    #[serde(default)]
    pub collectiondetails: Vec<CollectionEntry>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CollectionEntry {
    pub publishedfileid: String,
    pub result: i32,
    #[serde(default)]
    pub children: Vec<CollectionChild>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CollectionChild {
    pub publishedfileid: String,
    #[serde(default)]
    pub sortorder: i32,
}

impl PublishedFileDetails {
    /// Maps the EResult to an error for anything but success.
    pub fn check_result(&self) -> Result<(), WorkshopApiError> {
        match self.result {
            RESULT_OK => Ok(()),
            RESULT_FILE_NOT_FOUND => Err(WorkshopApiError::NotFound(self.publishedfileid.clone())),
            code => Err(WorkshopApiError::ItemUnavailable {
                workshop_id: self.publishedfileid.clone(),
                result_code: code,
            }),
        }
    }

    pub fn is_collection(&self) -> bool {
        self.file_type == Some(FILE_TYPE_COLLECTION)
            || self.creator_app_id == Some(COLLECTIONS_APP_ID)
    }

    pub fn into_details(self) -> Result<WorkshopItemDetails, WorkshopApiError> {
        self.check_result()?;
        let is_collection = self.is_collection();

        Ok(WorkshopItemDetails {
            title: self.title.unwrap_or_default(),
            description: self.description.filter(|d| !d.is_empty()),
            file_size_bytes: self.file_size,
            is_collection,
            time_updated: self
                .time_updated
                .filter(|ts| *ts > 0)
                .and_then(|ts| Utc.timestamp_opt(ts, 0).single()),
            consumer_app_id: self.consumer_app_id.filter(|id| *id != 0),
            preview_url: self.preview_url.filter(|u| !u.is_empty()),
            tags: self.tags.into_iter().map(|t| t.tag).collect(),
            workshop_id: self.publishedfileid,
        })
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(i64),
    Text(String),
}

fn de_opt_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<NumberOrString>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        NumberOrString::Number(n) => Some(n),
        NumberOrString::Text(s) => s.trim().parse().ok(),
    }))
}
