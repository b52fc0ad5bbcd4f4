//! # dscc-rs: An async Rust client for the HPE Data Services Cloud Console
//!
//! This crate wraps the DSCC REST API. A `Dscc` client authenticates with
//! HPE GreenLake client credentials, keeps the bearer token for its session
//! and hands out domain clients for the different API areas (audit, storage
//! systems, Alletra 6000/9000 arrays, HCI, backup reports, users, dual
//! authorization).
//!
//! ## Key Features
//!
//! - OAuth2 client-credentials authentication with automatic token renewal
//! - Domain clients that return the service's JSON unchanged
//! - Typed errors that distinguish authentication, remote and transport failures
//! - Middleware support for request/response processing
//! - Secrets zeroed on drop and redacted from errors and logs
//! - Per-client TLS configuration
//!
//! ## Basic Usage
//!
//! ```no_run
//! use dscc_rs::{from_env, utils};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Create a client from DSCC_URL, DSCC_CLIENT_ID and DSCC_CLIENT_SECRET
//!     let dscc = from_env()?;
//!
//!     let systems = dscc.storage_systems().storage_systems().await?;
//!     for system in utils::items(&systems) {
//!         println!("{} {}", system["id"], system["name"]);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod types;
pub mod client;
mod builder;
mod middleware;
pub mod domains;
pub mod utils;

// Re-export core components
pub use client::{ClientConfig, Dscc, MockApiHandler, RequestHandlerFuture, TlsConfig, DEFAULT_TOKEN_URL};
pub use types::{
    sanitize_error_message, AccessToken, ApiRequest, ApiResponse, Credentials, DsccError, DsccResult,
    ErrorKind, ListParams, SecureSecret,
};
pub use builder::RequestBuilder;
pub use middleware::{RequestMiddleware, ResponseMiddleware};

pub mod prelude {
    //! Convenient imports for commonly used types and functions
    pub use crate::{from_env, new_client, ClientConfig, Dscc, DsccError, DsccResult, ErrorKind, ListParams, TlsConfig};
    pub use crate::domains::{DomainClient, DomainOperations, ValidationOperations};
    pub use crate::domains::{CheckedStatus, EnclosureComponent, IpType, NodeComponent, AddHypervisorCluster};
}

// Public domain access
pub use domains::{
    // Base traits
    DomainClient,
    DomainOperations,
    ValidationOperations,
    DomainClientRegistry,

    // Domain-specific client types
    PlatformClient,
    AuditClient,
    StorageSystemClient,
    Alletra6kClient,
    Alletra9kClient,
    HciClient,
    BraasClient,
    ApplicationDashboardClient,
    UserClient,
    DualAuthorizationClient,
    FileServerClient,
};

// Entry point functions
pub fn new_client(
    base_url: impl Into<String>,
    client_id: impl Into<String>,
    client_secret: impl Into<String>,
) -> DsccResult<Dscc> {
    Dscc::new(base_url, client_id, client_secret)
}

pub fn from_env() -> Result<Dscc, DsccError> {
    Dscc::with_config(ClientConfig::from_env()?)
}
