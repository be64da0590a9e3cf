//! Steam Workshop client.
//!
//! Uses the public `ISteamRemoteStorage` Web API:
//! - `GetPublishedFileDetails` for item metadata (and collection titles)
//! - `GetCollectionDetails` for the children of a collection
//!
//! Both endpoints take form-encoded POST bodies with indexed
//! `publishedfileids[N]` fields.

mod models;

use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::debug;

use self::models::{CollectionDetailsResponse, PublishedFileDetails, PublishedFileDetailsResponse};
use crate::config::SteamWorkshopConfig;
use crate::errors::WorkshopApiError;
use crate::models::{CollectionDetails, CollectionItem, WorkshopItemDetails};
use crate::provider::WorkshopPlatformClient;

const DETAILS_ENDPOINT: &str = "ISteamRemoteStorage/GetPublishedFileDetails/v1/";
const COLLECTION_ENDPOINT: &str = "ISteamRemoteStorage/GetCollectionDetails/v1/";

/// Steam accepts large batches, but keep requests modest.
const MAX_ITEMS_PER_REQUEST: usize = 100;

/// Workshop client backed by the Steam Web API.
pub struct SteamWorkshopClient {
    client: Client,
    config: SteamWorkshopConfig,
}

impl SteamWorkshopClient {
    pub fn new(config: SteamWorkshopConfig) -> Result<Self, WorkshopApiError> {
        let client = Client::builder().timeout(config.request_timeout).build()?;
        Ok(Self { client, config })
    }

    pub fn from_env() -> Result<Self, WorkshopApiError> {
        Self::new(SteamWorkshopConfig::from_env())
    }

    /// POST a form to the API once and return the body text.
    async fn post_form(
        &self,
        endpoint: &str,
        form: &[(String, String)],
    ) -> Result<String, WorkshopApiError> {
        let url = format!("{}/{}", self.config.base_url, endpoint);
        debug!("Steam request: {} with {} fields", endpoint, form.len());

        let response = self
            .client
            .post(&url)
            .form(form)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    WorkshopApiError::Timeout {
                        endpoint: endpoint.to_string(),
                    }
                } else {
                    WorkshopApiError::Network(e)
                }
            })?;

        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(WorkshopApiError::RateLimited);
        }

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(WorkshopApiError::Unauthorized {
                status: status.as_u16(),
            });
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(WorkshopApiError::Http {
                status: status.as_u16(),
                message: body.chars().take(200).collect(),
            });
        }

        Ok(response.text().await?)
    }

    /// Adds the API key (when configured) to a form.
    fn keyed_form(&self, mut form: Vec<(String, String)>) -> Vec<(String, String)> {
        if let Some(key) = &self.config.api_key {
            form.push(("key".to_string(), key.clone()));
        }
        form
    }

    /// Fetch raw details for up to [`MAX_ITEMS_PER_REQUEST`] ids, with retry.
    async fn fetch_published_files(
        &self,
        ids: &[String],
    ) -> Result<Vec<PublishedFileDetails>, WorkshopApiError> {
        let form = self.keyed_form(indexed_ids_form("itemcount", ids));

        let text = self
            .config
            .retry
            .run("GetPublishedFileDetails", || {
                self.post_form(DETAILS_ENDPOINT, &form)
            })
            .await?;

        let parsed: PublishedFileDetailsResponse = serde_json::from_str(&text).map_err(|e| {
            WorkshopApiError::InvalidResponse(format!(
                "Failed to parse published file details: {}",
                e
            ))
        })?;

        Ok(parsed.response.publishedfiledetails)
    }

    /// Titles for every child id, failing if any child is missing.
    async fn fetch_titles(&self, ids: &[String]) -> Result<HashMap<String, String>, WorkshopApiError> {
        let mut titles = HashMap::with_capacity(ids.len());
        for chunk in ids.chunks(MAX_ITEMS_PER_REQUEST) {
            for entry in self.fetch_published_files(chunk).await? {
                entry.check_result()?;
                titles.insert(entry.publishedfileid, entry.title.unwrap_or_default());
            }
        }
        Ok(titles)
    }
}

#[async_trait]
impl WorkshopPlatformClient for SteamWorkshopClient {
    async fn get_workshop_item_details(
        &self,
        workshop_id: &str,
    ) -> Result<WorkshopItemDetails, WorkshopApiError> {
        let entries = self
            .fetch_published_files(&[workshop_id.to_string()])
            .await?;

        let entry = entries
            .into_iter()
            .find(|e| e.publishedfileid == workshop_id)
            .ok_or_else(|| WorkshopApiError::NotFound(workshop_id.to_string()))?;

        let details = entry.into_details()?;
        debug!(
            "Fetched workshop item {} ({}), collection: {}",
            details.workshop_id, details.title, details.is_collection
        );
        Ok(details)
    }

    async fn get_collection_details(
        &self,
        collection_id: &str,
    ) -> Result<CollectionDetails, WorkshopApiError> {
        let form = self.keyed_form(indexed_ids_form(
            "collectioncount",
            &[collection_id.to_string()],
        ));

        let text = self
            .config
            .retry
            .run("GetCollectionDetails", || {
                self.post_form(COLLECTION_ENDPOINT, &form)
            })
            .await?;

        let parsed: CollectionDetailsResponse = serde_json::from_str(&text).map_err(|e| {
            WorkshopApiError::InvalidResponse(format!("Failed to parse collection details: {}", e))
        })?;

        let entry = parsed
            .response
            .collectiondetails
            .into_iter()
            .find(|e| e.publishedfileid == collection_id)
            .ok_or_else(|| WorkshopApiError::NotFound(collection_id.to_string()))?;

        match entry.result {
            models::RESULT_OK => {}
            models::RESULT_FILE_NOT_FOUND => {
                return Err(WorkshopApiError::NotFound(collection_id.to_string()))
            }
            code => {
                return Err(WorkshopApiError::ItemUnavailable {
                    workshop_id: collection_id.to_string(),
                    result_code: code,
                })
            }
        }

        let mut children = entry.children;
        children.sort_by_key(|c| c.sortorder);

        let child_ids: Vec<String> = children.iter().map(|c| c.publishedfileid.clone()).collect();
        let titles = self.fetch_titles(&child_ids).await?;

        let items = children
            .into_iter()
            .map(|child| {
                let title = titles
                    .get(&child.publishedfileid)
                    .cloned()
                    .ok_or_else(|| WorkshopApiError::NotFound(child.publishedfileid.clone()))?;
                Ok(CollectionItem {
                    workshop_id: child.publishedfileid,
                    title,
                    sort_order: child.sortorder,
                })
            })
            .collect::<Result<Vec<_>, WorkshopApiError>>()?;

        debug!(
            "Fetched collection {} with {} items",
            collection_id,
            items.len()
        );

        Ok(CollectionDetails {
            collection_id: collection_id.to_string(),
            items,
        })
    }
}

/// Builds `count_field=N&publishedfileids[0]=..&publishedfileids[N-1]=..`.
fn indexed_ids_form(count_field: &str, ids: &[String]) -> Vec<(String, String)> {
    let mut form = Vec::with_capacity(ids.len() + 1);
    form.push((count_field.to_string(), ids.len().to_string()));
    for (i, id) in ids.iter().enumerate() {
        form.push((format!("publishedfileids[{}]", i), id.clone()));
    }
    form
}
