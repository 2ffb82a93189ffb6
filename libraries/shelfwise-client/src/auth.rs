//! Authentication calls for the Shelfwise server.
//!
//! The server mounts its JWT endpoints at `/auth`; every admin endpoint
//! elsewhere in the API expects the resulting token as a bearer header.

use crate::error::{ClientError, Result};
use crate::types::{LoginRequest, LoginResponse, MeEnvelope, RefreshRequest, RefreshResponse, UserInfo};
use reqwest::Client;
use tracing::{debug, info, warn};

/// Authentication client for the Shelfwise server.
pub struct AuthClient<'a> {
    http: &'a Client,
    base_url: &'a str,
}

impl<'a> AuthClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str) -> Self {
        Self { http, base_url }
    }

    /// Login with member id, password, and location.
    ///
    /// Returns tokens on success.
    pub async fn login(&self, user_id: &str, password: &str, lid: i64) -> Result<LoginResponse> {
        let url = format!("{}/auth", self.base_url);
        debug!(url = %url, user_id = %user_id, lid = lid, "Attempting login");

        let request = LoginRequest {
            user_id: user_id.to_string(),
            password: password.to_string(),
            lid,
        };

        let response = self
            .http
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    ClientError::ServerUnreachable(e.to_string())
                } else {
                    ClientError::Request(e)
                }
            })?;

        let status = response.status();

        if status.is_success() {
            let login: LoginResponse = response.json().await.map_err(|e| {
                ClientError::Parse(format!("Failed to parse login response: {}", e))
            })?;

            info!(user_id = %user_id, "Login successful");
            Ok(login)
        } else if status.as_u16() == 401 {
            warn!(status = %status, "Login failed: invalid credentials");
            Err(ClientError::AuthFailed(
                "Invalid username or password".to_string(),
            ))
        } else {
            Err(ClientError::from_response(response).await)
        }
    }

    /// Obtain a fresh access token from a refresh token.
    pub async fn refresh(&self, refresh_token: &str) -> Result<RefreshResponse> {
        let url = format!("{}/auth/refresh", self.base_url);
        debug!(url = %url, "Refreshing access token");

        let request = RefreshRequest {
            refresh_token: refresh_token.to_string(),
        };

        let response = self
            .http
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    ClientError::ServerUnreachable(e.to_string())
                } else {
                    ClientError::Request(e)
                }
            })?;

        let status = response.status();

        if status.is_success() {
            let refreshed: RefreshResponse = response.json().await.map_err(|e| {
                ClientError::Parse(format!("Failed to parse refresh response: {}", e))
            })?;

            debug!("Token refresh successful");
            Ok(refreshed)
        } else if status.as_u16() == 401 {
            warn!("Token refresh failed: refresh token expired or invalid");
            Err(ClientError::AuthRequired)
        } else {
            Err(ClientError::from_response(response).await)
        }
    }

    /// Get the member the access token belongs to.
    pub async fn current_user(&self, access_token: &str) -> Result<UserInfo> {
        let url = format!("{}/auth/me", self.base_url);
        debug!(url = %url, "Getting current member info");

        let response = self
            .http
            .get(&url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    ClientError::ServerUnreachable(e.to_string())
                } else {
                    ClientError::Request(e)
                }
            })?;

        let status = response.status();

        if status.is_success() {
            let envelope: MeEnvelope = response.json().await.map_err(|e| {
                ClientError::Parse(format!("Failed to parse member info: {}", e))
            })?;
            Ok(envelope.me)
        } else if status.as_u16() == 401 {
            Err(ClientError::AuthRequired)
        } else {
            Err(ClientError::from_response(response).await)
        }
    }
}
