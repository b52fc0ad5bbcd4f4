//! DSCC Domain Clients
//!
//! Each area of the DSCC API (audit, storage systems, HCI, users, ...) has its
//! own client. Every client implements the `DomainClient`, `ValidationOperations`
//! and `DomainOperations` traits and returns the service's JSON unchanged.
//!
//! ## Architecture
//!
//! - `DomainClient` trait: domain identification for the registry
//! - `ValidationOperations` trait: parameter checks run before dispatch
//! - `DomainOperations` trait: authenticated GET/POST/PUT/PATCH/DELETE helpers
//! - `BaseDomainClient`: implements all three and serves as a composition base
//!
//! Domain clients contain a `BaseDomainClient` and delegate to it.
//!
//! ## Example: Creating a Custom Domain Client
//!
//! ```rust
//! use dscc_rs::{Dscc, DsccResult};
//! use dscc_rs::domains::{DomainClient, DomainOperations, ValidationOperations, base::BaseDomainClient};
//! use serde_json::Value;
//! use std::sync::Arc;
//!
//! struct ProtectionPolicyClient {
//!     base: BaseDomainClient
//! }
//!
//! impl ProtectionPolicyClient {
//!     pub fn new(dscc: Arc<Dscc>) -> Self {
//!         Self {
//!             base: BaseDomainClient::new(dscc, "protection-policies")
//!         }
//!     }
//!
//!     pub async fn policy(&self, id: &str) -> DsccResult<Value> {
//!         let id = self.validate_id(id, "id")?;
//!         self.get_json(format!("/api/v1/protection-policies/{}", id)).await
//!     }
//! }
//!
//! impl DomainClient for ProtectionPolicyClient {
//!     fn domain_name(&self) -> &str {
//!         self.base.domain_name()
//!     }
//! }
//!
//! impl ValidationOperations for ProtectionPolicyClient {}
//!
//! impl DomainOperations for ProtectionPolicyClient {
//!     fn dscc(&self) -> &Dscc {
//!         self.base.dscc()
//!     }
//! }
//! ```

/// Delegate the domain traits of a client to its `base` field
macro_rules! impl_domain_client {
    ($client:ty) => {
        impl $crate::domains::DomainClient for $client {
            fn domain_name(&self) -> &str {
                $crate::domains::DomainClient::domain_name(&self.base)
            }
        }

        impl $crate::domains::ValidationOperations for $client {}

        impl $crate::domains::DomainOperations for $client {
            fn dscc(&self) -> &$crate::client::Dscc {
                $crate::domains::DomainOperations::dscc(&self.base)
            }
        }
    };
}

pub mod base;
pub mod platform;
pub mod audit;
pub mod storage_system;
pub mod alletra6k;
pub mod alletra9k;
pub mod hci;
pub mod braas;
pub mod application_dashboard;
pub mod user;
pub mod dual_authorization;
pub mod file_server;

// Re-export domain clients
pub use platform::PlatformClient;
pub use audit::AuditClient;
pub use storage_system::StorageSystemClient;
pub use alletra6k::Alletra6kClient;
pub use alletra9k::{Alletra9kClient, EnclosureComponent, IpType, NodeComponent};
pub use hci::{AddHypervisorCluster, HciClient};
pub use braas::BraasClient;
pub use application_dashboard::ApplicationDashboardClient;
pub use user::UserClient;
pub use dual_authorization::{CheckedStatus, DualAuthorizationClient};
pub use file_server::FileServerClient;

use crate::client::Dscc;
use crate::domain_error;
use crate::types::*;
use crate::utils::StringValidator;
use dashmap::DashMap;
use serde::Serialize;
use serde_json::Value;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, OnceLock};

/// Boxed future returned by the `DomainOperations` helpers
pub type JsonFuture<'a> = Pin<Box<dyn Future<Output = DsccResult<Value>> + Send + 'a>>;

/// Common trait for all domain clients
///
/// Provides domain identification for the registry system.
pub trait DomainClient: Send + Sync {
    /// The domain name for this client
    fn domain_name(&self) -> &str;
}

/// Common trait for validation operations
pub trait ValidationOperations: DomainClient {
    /// Creates a domain-specific error
    fn domain_error<T>(&self, message: impl Into<String>) -> DsccResult<T> {
        Err(domain_error!(self.domain_name(), message.into()))
    }

    /// Validate an identifier that becomes part of a URL path
    fn validate_id(&self, value: impl Into<String>, param_name: &str) -> DsccResult<String> {
        StringValidator::path_segment(value, param_name)
    }

    /// Validate a free-form string parameter
    fn validate_string<S: Into<String>>(&self, value: S, param_name: &str) -> DsccResult<String> {
        StringValidator::not_empty(value, param_name)
    }

    /// Serialize a typed request body
    fn to_body<T: Serialize>(&self, body: &T) -> DsccResult<Value> {
        serde_json::to_value(body).or_else(|e| {
            self.domain_error(format!("request body could not be serialized: {}", e))
        })
    }
}

/// Authenticated request helpers shared by all domain clients
pub trait DomainOperations: DomainClient {
    /// Get a reference to the DSCC client
    fn dscc(&self) -> &Dscc;

    fn get_json<'a>(&'a self, path: impl Into<String>) -> JsonFuture<'a> {
        let builder = self.dscc().get(path);
        Box::pin(async move { builder.send().await })
    }

    /// GET with the standard list parameters
    fn get_json_with<'a>(&'a self, path: impl Into<String>, params: &ListParams) -> JsonFuture<'a> {
        let builder = self.dscc().get(path).params(params);
        Box::pin(async move { builder.send().await })
    }

    /// POST, with or without a JSON body
    fn post_json<'a>(&'a self, path: impl Into<String>, body: Option<Value>) -> JsonFuture<'a> {
        let mut builder = self.dscc().post(path);
        if let Some(body) = body {
            builder = builder.body(body);
        }
        Box::pin(async move { builder.send().await })
    }

    fn put_json<'a>(&'a self, path: impl Into<String>, body: Value) -> JsonFuture<'a> {
        let builder = self.dscc().put(path).body(body);
        Box::pin(async move { builder.send().await })
    }

    fn patch_json<'a>(&'a self, path: impl Into<String>, body: Value) -> JsonFuture<'a> {
        let builder = self.dscc().patch(path).body(body);
        Box::pin(async move { builder.send().await })
    }

    fn delete_json<'a>(&'a self, path: impl Into<String>) -> JsonFuture<'a> {
        let builder = self.dscc().delete(path);
        Box::pin(async move { builder.send().await })
    }
}

/// Registry for domain clients that provides a central access point.
pub struct DomainClientRegistry {
    dscc: Arc<Dscc>,
    // DashMap for lock-free concurrent access
    clients: Arc<DashMap<String, Arc<dyn DomainClient>>>,
    // System scoped clients, keyed by system id
    alletra6k_clients: DashMap<String, Arc<Alletra6kClient>>,
    alletra9k_clients: DashMap<String, Arc<Alletra9kClient>>,
    platform_client: OnceLock<Arc<PlatformClient>>,
    audit_client: OnceLock<Arc<AuditClient>>,
    storage_system_client: OnceLock<Arc<StorageSystemClient>>,
    hci_client: OnceLock<Arc<HciClient>>,
    braas_client: OnceLock<Arc<BraasClient>>,
    application_dashboard_client: OnceLock<Arc<ApplicationDashboardClient>>,
    user_client: OnceLock<Arc<UserClient>>,
    dual_authorization_client: OnceLock<Arc<DualAuthorizationClient>>,
    file_server_client: OnceLock<Arc<FileServerClient>>,
}

impl DomainClientRegistry {
    /// Create a new domain client registry associated with a DSCC client
    pub(crate) fn new(dscc: Arc<Dscc>) -> Self {
        Self {
            dscc,
            clients: Arc::new(DashMap::new()),
            alletra6k_clients: DashMap::new(),
            alletra9k_clients: DashMap::new(),
            platform_client: OnceLock::new(),
            audit_client: OnceLock::new(),
            storage_system_client: OnceLock::new(),
            hci_client: OnceLock::new(),
            braas_client: OnceLock::new(),
            application_dashboard_client: OnceLock::new(),
            user_client: OnceLock::new(),
            dual_authorization_client: OnceLock::new(),
            file_server_client: OnceLock::new(),
        }
    }

    pub fn platform(&self) -> Arc<PlatformClient> {
        self.platform_client
            .get_or_init(|| Arc::new(PlatformClient::new(self.dscc.clone())))
            .clone()
    }

    pub fn audit(&self) -> Arc<AuditClient> {
        self.audit_client
            .get_or_init(|| Arc::new(AuditClient::new(self.dscc.clone())))
            .clone()
    }

    pub fn storage_systems(&self) -> Arc<StorageSystemClient> {
        self.storage_system_client
            .get_or_init(|| Arc::new(StorageSystemClient::new(self.dscc.clone())))
            .clone()
    }

    /// Alletra 6000 client for one system, created on first use
    pub fn alletra6k(&self, system_id: &str) -> DsccResult<Arc<Alletra6kClient>> {
        let system_id = StringValidator::path_segment(system_id, "system_id")?;
        let entry = self
            .alletra6k_clients
            .entry(system_id.clone())
            .or_insert_with(|| Arc::new(Alletra6kClient::new(self.dscc.clone(), system_id)));
        Ok(entry.value().clone())
    }

    /// Alletra 9000 client for one system, created on first use
    pub fn alletra9k(&self, system_id: &str) -> DsccResult<Arc<Alletra9kClient>> {
        let system_id = StringValidator::path_segment(system_id, "system_id")?;
        let entry = self
            .alletra9k_clients
            .entry(system_id.clone())
            .or_insert_with(|| Arc::new(Alletra9kClient::new(self.dscc.clone(), system_id)));
        Ok(entry.value().clone())
    }

    pub fn hci(&self) -> Arc<HciClient> {
        self.hci_client
            .get_or_init(|| Arc::new(HciClient::new(self.dscc.clone())))
            .clone()
    }

    pub fn braas(&self) -> Arc<BraasClient> {
        self.braas_client
            .get_or_init(|| Arc::new(BraasClient::new(self.dscc.clone())))
            .clone()
    }

    pub fn application_dashboard(&self) -> Arc<ApplicationDashboardClient> {
        self.application_dashboard_client
            .get_or_init(|| Arc::new(ApplicationDashboardClient::new(self.dscc.clone())))
            .clone()
    }

    pub fn user(&self) -> Arc<UserClient> {
        self.user_client
            .get_or_init(|| Arc::new(UserClient::new(self.dscc.clone())))
            .clone()
    }

    pub fn dual_authorization(&self) -> Arc<DualAuthorizationClient> {
        self.dual_authorization_client
            .get_or_init(|| Arc::new(DualAuthorizationClient::new(self.dscc.clone())))
            .clone()
    }

    pub fn file_server(&self) -> Arc<FileServerClient> {
        self.file_server_client
            .get_or_init(|| Arc::new(FileServerClient::new(self.dscc.clone())))
            .clone()
    }

    /// Register a custom domain client (lock-free)
    pub fn register<T: DomainClient + 'static>(&self, name: &str, client: T) {
        self.clients.insert(name.to_string(), Arc::new(client));
    }

    /// Get a registered custom domain client by name (lock-free)
    pub fn get(&self, name: &str) -> Option<Arc<dyn DomainClient>> {
        self.clients.get(name).map(|r| r.value().clone())
    }

    /// Get all registered domains
    pub fn list_domains(&self) -> Vec<String> {
        self.clients.iter().map(|entry| entry.key().clone()).collect()
    }
}
