//! Shelfwise Server Client
//!
//! HTTP client library for the Shelfwise library-management server API.
//!
//! # Features
//!
//! - **Authentication**: Login with member credentials, token refresh
//! - **Media catalog**: Fetch, create, and edit catalog records
//! - **Role administration**: Read, create, edit, and remove roles
//!
//! # Example
//!
//! ```ignore
//! use shelfwise_client::{MediaGateway, ServerConfig, ShelfwiseClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ServerConfig::new("https://library.example.com");
//!     let client = ShelfwiseClient::new(config)?;
//!
//!     // Login
//!     client.login("admin", "password", 1).await?;
//!
//!     // Fetch a catalog record
//!     let media = client.media().await?;
//!     let item = media.get_info("m42").await?;
//!     println!("{:?} by {:?}", item.title, item.author);
//!
//!     Ok(())
//! }
//! ```

mod auth;
mod client;
mod error;
mod media;
mod roles;
mod types;

// Re-export main types
pub use client::{MediaClientHandle, RoleClientHandle, ShelfwiseClient};
pub use error::{ClientError, Result};
pub use types::{
    ErrorEnvelope, LoginResponse, MediaCreated, MediaItem, RefreshResponse, RoleCreated,
    RoleDetail, RoleSeqs, ServerConfig, UserInfo,
};

// Re-export sub-clients for direct use if needed
pub use auth::AuthClient;
pub use media::{MediaClient, MediaGateway};
pub use roles::RoleClient;
