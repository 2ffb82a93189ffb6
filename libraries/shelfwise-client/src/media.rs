//! Media catalog operations for the Shelfwise server.

use crate::error::{ClientError, Result};
use crate::types::{MediaCreated, MediaInfoEnvelope, MediaItem};
use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

/// The network seam the media editor drives.
///
/// `MediaClientHandle` implements this against a live server; tests swap in
/// a double so editor behavior can be exercised without a socket.
#[async_trait]
pub trait MediaGateway: Send + Sync {
    /// Fetch one catalog record by id.
    async fn get_info(&self, mid: &str) -> Result<MediaItem>;

    /// Create a new catalog record; the server assigns `mid` and `image`.
    async fn create_item(&self, item: &MediaItem) -> Result<MediaCreated>;

    /// Replace an existing catalog record.
    async fn edit_item(&self, item: &MediaItem) -> Result<()>;
}

/// Media client for the Shelfwise server.
pub struct MediaClient<'a> {
    http: &'a Client,
    base_url: &'a str,
    access_token: &'a str,
}

impl<'a> MediaClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str, access_token: &'a str) -> Self {
        Self {
            http,
            base_url,
            access_token,
        }
    }

    /// Fetch a catalog record, unwrapping the `info` envelope.
    pub async fn get_info(&self, mid: &str) -> Result<MediaItem> {
        let url = format!("{}/api/media/info", self.base_url);
        debug!(url = %url, mid = %mid, "Fetching media record");

        let response = self
            .http
            .get(&url)
            .query(&[("mid", mid)])
            .bearer_auth(self.access_token)
            .send()
            .await?;

        let status = response.status();

        if status.is_success() {
            let envelope: MediaInfoEnvelope = response.json().await.map_err(|e| {
                ClientError::Parse(format!("Failed to parse media info response: {}", e))
            })?;
            Ok(envelope.info)
        } else if status.as_u16() == 401 {
            Err(ClientError::AuthRequired)
        } else {
            Err(ClientError::from_response(response).await)
        }
    }

    /// Create a new catalog record.
    ///
    /// The record is posted as-is, unset fields included; the server
    /// responds with the assigned identifier and cover image URL.
    pub async fn create_item(&self, item: &MediaItem) -> Result<MediaCreated> {
        let url = format!("{}/api/location/media/add", self.base_url);
        debug!(url = %url, title = ?item.title, "Creating media record");

        let response = self
            .http
            .post(&url)
            .bearer_auth(self.access_token)
            .json(item)
            .send()
            .await?;

        let status = response.status();

        if status.is_success() {
            let created: MediaCreated = response.json().await.map_err(|e| {
                ClientError::Parse(format!("Failed to parse create response: {}", e))
            })?;

            debug!(mid = %created.mid, "Media record created");
            Ok(created)
        } else if status.as_u16() == 401 {
            Err(ClientError::AuthRequired)
        } else {
            Err(ClientError::from_response(response).await)
        }
    }

    /// Replace an existing catalog record.
    pub async fn edit_item(&self, item: &MediaItem) -> Result<()> {
        let url = format!("{}/api/media/edit", self.base_url);
        debug!(url = %url, mid = ?item.mid, "Editing media record");

        let response = self
            .http
            .post(&url)
            .bearer_auth(self.access_token)
            .json(item)
            .send()
            .await?;

        let status = response.status();

        if status.is_success() {
            debug!(mid = ?item.mid, "Media record edited");
            Ok(())
        } else if status.as_u16() == 401 {
            Err(ClientError::AuthRequired)
        } else {
            Err(ClientError::from_response(response).await)
        }
    }
}
