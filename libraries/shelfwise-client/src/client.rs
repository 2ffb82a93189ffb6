//! Main Shelfwise server client.

use crate::auth::AuthClient;
use crate::error::{ClientError, Result};
use crate::media::{MediaClient, MediaGateway};
use crate::roles::RoleClient;
use crate::types::{LoginResponse, MediaCreated, MediaItem, RefreshResponse, ServerConfig, UserInfo};
use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{info, warn};

/// Main client for a Shelfwise server.
///
/// The client owns the HTTP connection pool and token state, and hands out
/// per-domain handles for catalog and role administration.
///
/// # Example
///
/// ```ignore
/// use shelfwise_client::{ServerConfig, ShelfwiseClient};
///
/// let config = ServerConfig::new("https://library.example.com");
/// let client = ShelfwiseClient::new(config)?;
///
/// client.login("admin", "password", 1).await?;
///
/// let roles = client.roles().await?;
/// let role = roles.client().detail("r1").await?;
/// println!("{} has perms {:?}", role.name, role.seqs.perms);
/// ```
#[derive(Debug)]
pub struct ShelfwiseClient {
    http: Client,
    config: Arc<RwLock<ServerConfig>>,
}

impl ShelfwiseClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ServerConfig) -> Result<Self> {
        if config.url.is_empty() {
            return Err(ClientError::InvalidUrl("URL cannot be empty".into()));
        }

        let url = config.url.trim_end_matches('/').to_string();
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ClientError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }

        let normalized = ServerConfig {
            url,
            access_token: config.access_token,
            refresh_token: config.refresh_token,
        };

        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("Shelfwise/{} (Admin)", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ClientError::Request)?;

        Ok(Self {
            http,
            config: Arc::new(RwLock::new(normalized)),
        })
    }

    /// Get the server URL.
    pub async fn url(&self) -> String {
        self.config.read().await.url.clone()
    }

    /// Check if the client has an access token.
    pub async fn is_authenticated(&self) -> bool {
        self.config.read().await.access_token.is_some()
    }

    /// Login with member id, password, and location id.
    ///
    /// On success, the tokens are stored for subsequent requests.
    pub async fn login(&self, user_id: &str, password: &str, lid: i64) -> Result<LoginResponse> {
        let url = self.config.read().await.url.clone();

        let auth = AuthClient::new(&self.http, &url);
        let response = auth.login(user_id, password, lid).await?;

        let mut config = self.config.write().await;
        config.access_token = Some(response.access_token.clone());
        config.refresh_token = response.refresh_token.clone();

        Ok(response)
    }

    /// Set tokens directly (e.g., from stored credentials).
    pub async fn set_tokens(&self, access_token: String, refresh_token: Option<String>) {
        let mut config = self.config.write().await;
        config.access_token = Some(access_token);
        config.refresh_token = refresh_token;
    }

    /// Get the current tokens.
    pub async fn get_tokens(&self) -> (Option<String>, Option<String>) {
        let config = self.config.read().await;
        (config.access_token.clone(), config.refresh_token.clone())
    }

    /// Clear stored tokens (logout).
    pub async fn logout(&self) {
        let mut config = self.config.write().await;
        config.access_token = None;
        config.refresh_token = None;
        info!("Logged out");
    }

    /// Obtain a fresh access token using the stored refresh token.
    pub async fn refresh_token(&self) -> Result<RefreshResponse> {
        let config = self.config.read().await;
        let refresh_token = config
            .refresh_token
            .clone()
            .ok_or(ClientError::AuthRequired)?;
        let url = config.url.clone();
        drop(config);

        let auth = AuthClient::new(&self.http, &url);
        let response = auth.refresh(&refresh_token).await?;

        let mut config = self.config.write().await;
        config.access_token = Some(response.access_token.clone());

        Ok(response)
    }

    /// Get the member the stored access token belongs to.
    pub async fn current_user(&self) -> Result<UserInfo> {
        let config = self.config.read().await;
        let access_token = config
            .access_token
            .clone()
            .ok_or(ClientError::AuthRequired)?;
        let url = config.url.clone();
        drop(config);

        let auth = AuthClient::new(&self.http, &url);
        auth.current_user(&access_token).await
    }

    /// Execute an operation with one automatic token refresh on expiry.
    pub async fn with_auto_refresh<T, F, Fut>(&self, operation: F) -> Result<T>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = Result<T>>,
    {
        match operation().await {
            Ok(result) => Ok(result),
            Err(ClientError::AuthRequired) => {
                warn!("Token expired, attempting refresh");
                self.refresh_token().await?;
                operation().await
            }
            Err(e) => Err(e),
        }
    }

    /// Get a media handle for catalog operations.
    ///
    /// Returns an error if not authenticated.
    pub async fn media(&self) -> Result<MediaClientHandle> {
        let config = self.config.read().await;
        let access_token = config
            .access_token
            .clone()
            .ok_or(ClientError::AuthRequired)?;
        let url = config.url.clone();
        drop(config);

        Ok(MediaClientHandle {
            http: self.http.clone(),
            url,
            access_token,
        })
    }

    /// Get a role handle for role administration.
    ///
    /// Returns an error if not authenticated.
    pub async fn roles(&self) -> Result<RoleClientHandle> {
        let config = self.config.read().await;
        let access_token = config
            .access_token
            .clone()
            .ok_or(ClientError::AuthRequired)?;
        let url = config.url.clone();
        drop(config);

        Ok(RoleClientHandle {
            http: self.http.clone(),
            url,
            access_token,
        })
    }
}

/// Handle for media catalog operations.
///
/// Returned by [`ShelfwiseClient::media`]. Owns its token snapshot, so it
/// can outlive the call that produced it and be handed to an editor.
pub struct MediaClientHandle {
    http: Client,
    url: String,
    access_token: String,
}

impl MediaClientHandle {
    /// Get the media client.
    pub fn client(&self) -> MediaClient<'_> {
        MediaClient::new(&self.http, &self.url, &self.access_token)
    }
}

#[async_trait]
impl MediaGateway for MediaClientHandle {
    async fn get_info(&self, mid: &str) -> Result<MediaItem> {
        self.client().get_info(mid).await
    }

    async fn create_item(&self, item: &MediaItem) -> Result<MediaCreated> {
        self.client().create_item(item).await
    }

    async fn edit_item(&self, item: &MediaItem) -> Result<()> {
        self.client().edit_item(item).await
    }
}

/// Handle for role administration.
pub struct RoleClientHandle {
    http: Client,
    url: String,
    access_token: String,
}

impl RoleClientHandle {
    /// Get the role client.
    pub fn client(&self) -> RoleClient<'_> {
        RoleClient::new(&self.http, &self.url, &self.access_token)
    }
}
