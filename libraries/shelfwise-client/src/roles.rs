//! Role administration operations for the Shelfwise server.
//!
//! Four fire-and-observe wrappers with no client-side validation or retry;
//! the `seqs` payloads are relayed to the server untouched.

use crate::error::{ClientError, Result};
use crate::types::{
    RoleCreateRequest, RoleCreated, RoleDetail, RoleRemoveRequest, RoleSeqs, RoleUpdateRequest,
};
use reqwest::Client;
use tracing::debug;

/// Role client for the Shelfwise server.
pub struct RoleClient<'a> {
    http: &'a Client,
    base_url: &'a str,
    access_token: &'a str,
}

impl<'a> RoleClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str, access_token: &'a str) -> Self {
        Self {
            http,
            base_url,
            access_token,
        }
    }

    /// Fetch one role by id.
    pub async fn detail(&self, rid: &str) -> Result<RoleDetail> {
        let url = format!("{}/api/roles/detail", self.base_url);
        debug!(url = %url, rid = %rid, "Fetching role detail");

        let response = self
            .http
            .get(&url)
            .query(&[("rid", rid)])
            .bearer_auth(self.access_token)
            .send()
            .await?;

        let status = response.status();

        if status.is_success() {
            let role: RoleDetail = response.json().await.map_err(|e| {
                ClientError::Parse(format!("Failed to parse role detail response: {}", e))
            })?;
            Ok(role)
        } else if status.as_u16() == 401 {
            Err(ClientError::AuthRequired)
        } else {
            Err(ClientError::from_response(response).await)
        }
    }

    /// Replace a role's name and sequences wholesale.
    pub async fn update(&self, rid: &str, name: &str, seqs: RoleSeqs) -> Result<()> {
        let url = format!("{}/api/roles/edit", self.base_url);
        debug!(url = %url, rid = %rid, name = %name, "Updating role");

        let request = RoleUpdateRequest {
            rid: rid.to_string(),
            name: name.to_string(),
            seqs,
        };

        let response = self
            .http
            .post(&url)
            .bearer_auth(self.access_token)
            .json(&request)
            .send()
            .await?;

        let status = response.status();

        if status.is_success() {
            debug!(rid = %rid, "Role updated");
            Ok(())
        } else if status.as_u16() == 401 {
            Err(ClientError::AuthRequired)
        } else {
            Err(ClientError::from_response(response).await)
        }
    }

    /// Create a new role; the server assigns the id.
    pub async fn create(&self, name: &str, seqs: RoleSeqs) -> Result<RoleCreated> {
        let url = format!("{}/api/location/roles/add", self.base_url);
        debug!(url = %url, name = %name, "Creating role");

        let request = RoleCreateRequest {
            name: name.to_string(),
            seqs,
        };

        let response = self
            .http
            .post(&url)
            .bearer_auth(self.access_token)
            .json(&request)
            .send()
            .await?;

        let status = response.status();

        if status.is_success() {
            let created: RoleCreated = response.json().await.map_err(|e| {
                ClientError::Parse(format!("Failed to parse role create response: {}", e))
            })?;

            debug!(rid = %created.rid, "Role created");
            Ok(created)
        } else if status.as_u16() == 401 {
            Err(ClientError::AuthRequired)
        } else {
            Err(ClientError::from_response(response).await)
        }
    }

    /// Delete a role.
    ///
    /// The server routes role deletion on PUT, not DELETE; the verb must be
    /// preserved exactly for it to match.
    pub async fn remove(&self, rid: &str) -> Result<()> {
        let url = format!("{}/api/roles/delete", self.base_url);
        debug!(url = %url, rid = %rid, "Removing role");

        let request = RoleRemoveRequest {
            rid: rid.to_string(),
        };

        let response = self
            .http
            .put(&url)
            .bearer_auth(self.access_token)
            .json(&request)
            .send()
            .await?;

        let status = response.status();

        if status.is_success() {
            debug!(rid = %rid, "Role removed");
            Ok(())
        } else if status.as_u16() == 401 {
            Err(ClientError::AuthRequired)
        } else {
            Err(ClientError::from_response(response).await)
        }
    }
}
