// Core Client Implementation

use crate::builder::RequestBuilder;
use crate::domains::*;
use crate::middleware::{RequestMiddleware, ResponseMiddleware};
use crate::types::*;
use crate::utils::error_message_from_body;
use futures::future::BoxFuture;
use reqwest::{header, Client as HttpClient, Method};
use serde_json::Value;
use std::sync::{Arc, Mutex, OnceLock};
use std::time::Duration;
use tokio::sync::Mutex as AsyncMutex;
use tracing::{debug, info, warn};
use url::Url;

/// HPE GreenLake SSO endpoint issuing DSCC access tokens
pub const DEFAULT_TOKEN_URL: &str = "https://sso.common.cloud.hpe.com/as/token.oauth2";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Result of a request operation
pub type RequestHandlerFuture = BoxFuture<'static, DsccResult<ApiResponse>>;

/// Function that processes a request and returns a future
type RequestHandlerFn = dyn Fn(ApiRequest) -> RequestHandlerFuture + Send + Sync + 'static;

/// Trait for replacing the HTTP executor, used by tests
pub trait MockApiHandler: Send + Sync {
    /// Process a request and return a response
    fn process_request(&self, request: ApiRequest) -> RequestHandlerFuture;
}

/// Configuration for TLS
#[derive(Clone, Debug)]
pub struct TlsConfig {
    pub min_tls_version: Option<reqwest::tls::Version>,
    pub cert_verification: bool,
}

impl Default for TlsConfig {
    fn default() -> Self {
        Self {
            min_tls_version: Some(reqwest::tls::Version::TLS_1_2),
            cert_verification: true,
        }
    }
}

/// Connection settings for one client session
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Regional API root, e.g. `https://eu1.data.cloud.hpe.com`
    pub base_url: String,
    pub token_url: String,
    pub credentials: Option<Credentials>,
    pub timeout: Duration,
    pub tls: TlsConfig,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
            credentials: None,
            timeout: DEFAULT_TIMEOUT,
            tls: TlsConfig::default(),
        }
    }

    pub fn with_credentials(
        mut self,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        self.credentials = Some(Credentials::new(client_id, client_secret));
        self
    }

    pub fn with_token_url(mut self, token_url: impl Into<String>) -> Self {
        self.token_url = token_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_tls(mut self, tls: TlsConfig) -> Self {
        self.tls = tls;
        self
    }

    /// Read `DSCC_URL`, `DSCC_CLIENT_ID`, `DSCC_CLIENT_SECRET` and the optional `DSCC_TOKEN_URL`
    pub fn from_env() -> DsccResult<Self> {
        let base_url = std::env::var("DSCC_URL")
            .map_err(|_| DsccError::Validation("DSCC_URL is not set".into()))?;
        let mut config = Self::new(base_url);

        match (
            std::env::var("DSCC_CLIENT_ID"),
            std::env::var("DSCC_CLIENT_SECRET"),
        ) {
            (Ok(id), Ok(secret)) => config = config.with_credentials(id, secret),
            _ => return Err(DsccError::missing_credentials(Some(concat!(file!(), ":", line!())))),
        }

        if let Ok(token_url) = std::env::var("DSCC_TOKEN_URL") {
            config = config.with_token_url(token_url);
        }
        Ok(config)
    }

    fn validate(&self) -> DsccResult<()> {
        for (name, value) in [("base_url", &self.base_url), ("token_url", &self.token_url)] {
            let url = Url::parse(value)
                .map_err(|e| DsccError::Validation(format!("{} is not a valid URL: {}", name, e)))?;
            if url.scheme() != "https" && url.scheme() != "http" {
                return Err(DsccError::Validation(format!(
                    "{} must use http or https, got {}",
                    name,
                    url.scheme()
                )));
            }
        }
        if let Some(credentials) = &self.credentials {
            if credentials.client_id.trim().is_empty() || credentials.client_secret.is_empty() {
                return Err(DsccError::Validation(
                    "client id and client secret cannot be empty".into(),
                ));
            }
        }
        Ok(())
    }
}

#[derive(Clone)]
pub struct Dscc {
    pub(crate) http_client: HttpClient,
    pub base_url: String,
    pub token_url: String,
    pub(crate) credentials: Option<Credentials>,
    pub(crate) token: Arc<AsyncMutex<Option<AccessToken>>>,
    pub(crate) request_middleware: Vec<Arc<dyn RequestMiddleware>>,
    pub(crate) response_middleware: Vec<Arc<dyn ResponseMiddleware>>,
    domain_registry: Arc<OnceLock<Arc<DomainClientRegistry>>>,
    pub(crate) request_handler: Arc<Mutex<Option<Arc<RequestHandlerFn>>>>,
}

impl Dscc {
    /// Create a client that authenticates with GreenLake client credentials
    pub fn new(
        base_url: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> DsccResult<Self> {
        Self::with_config(ClientConfig::new(base_url).with_credentials(client_id, client_secret))
    }

    /// Create a client from a full configuration
    pub fn with_config(config: ClientConfig) -> DsccResult<Self> {
        config.validate()?;

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        let mut builder = HttpClient::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .danger_accept_invalid_certs(!config.tls.cert_verification);

        if let Some(version) = config.tls.min_tls_version {
            builder = builder.min_tls_version(version);
        }

        let http_client = builder
            .build()
            .map_err(|e| crate::request_error!("Failed to create HTTP client", e.to_string(), e))?;

        Ok(Self {
            http_client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token_url: config.token_url,
            credentials: config.credentials,
            token: Arc::new(AsyncMutex::new(None)),
            request_middleware: Vec::new(),
            response_middleware: Vec::new(),
            domain_registry: Arc::new(OnceLock::new()),
            request_handler: Arc::new(Mutex::new(None)),
        })
    }

    /// Use a bearer token obtained elsewhere. Starts a new token session.
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.token = Arc::new(AsyncMutex::new(Some(AccessToken::new(token))));
        self.domain_registry = Arc::new(OnceLock::new());
        self
    }

    /// Add middleware that processes requests before they're sent
    pub fn add_request_middleware(mut self, middleware: impl RequestMiddleware + 'static) -> Self {
        self.request_middleware.push(Arc::new(middleware));
        self.domain_registry = Arc::new(OnceLock::new());
        self
    }

    /// Add middleware that processes responses after they're received
    pub fn add_response_middleware(mut self, middleware: impl ResponseMiddleware + 'static) -> Self {
        self.response_middleware.push(Arc::new(middleware));
        self.domain_registry = Arc::new(OnceLock::new());
        self
    }

    /// Set custom request handler for this client
    pub fn set_request_handler<F>(&self, handler: Box<F>)
    where
        F: Fn(ApiRequest) -> RequestHandlerFuture + Send + Sync + 'static,
    {
        if let Ok(mut guard) = self.request_handler.lock() {
            *guard = Some(Arc::new(move |req| handler(req)));
        }
    }

    /// Create a client whose requests go to `mock_api` instead of the network.
    /// Token checks still run first.
    pub fn with_mock_api<T>(config: ClientConfig, mock_api: T) -> DsccResult<Self>
    where
        T: Into<Arc<dyn MockApiHandler>> + Send + Sync + 'static,
    {
        let client = Self::with_config(config)?;
        let mock_handler = mock_api.into();

        client.set_request_handler(Box::new(move |request: ApiRequest| {
            let mock = mock_handler.clone();
            mock.process_request(request)
        }));

        Ok(client)
    }

    /// Exchange the configured client credentials for a new access token
    pub async fn authenticate(&self) -> DsccResult<AccessToken> {
        let credentials = self
            .credentials
            .as_ref()
            .ok_or_else(|| DsccError::missing_credentials(Some(concat!(file!(), ":", line!()))))?;

        let token = self.fetch_token(credentials).await?;
        *self.token.lock().await = Some(token.clone());
        Ok(token)
    }

    /// Current token, authenticating first when none is held or it has expired
    pub async fn access_token(&self) -> DsccResult<AccessToken> {
        let mut guard = self.token.lock().await;

        if let Some(token) = guard.as_ref() {
            if !token.is_expired() {
                return Ok(token.clone());
            }
            if self.credentials.is_none() {
                warn!("access token expired and no credentials are configured to renew it");
                return Ok(token.clone());
            }
            debug!("access token expired, re-authenticating");
        }

        let credentials = self
            .credentials
            .as_ref()
            .ok_or_else(|| DsccError::missing_credentials(Some(concat!(file!(), ":", line!()))))?;

        let token = self.fetch_token(credentials).await?;
        *guard = Some(token.clone());
        Ok(token)
    }

    /// True when this session currently holds a token
    pub async fn has_token(&self) -> bool {
        self.token.lock().await.is_some()
    }

    /// Drop the token held by this session
    pub async fn revoke_token(&self) {
        *self.token.lock().await = None;
    }

    async fn fetch_token(&self, credentials: &Credentials) -> DsccResult<AccessToken> {
        info!(token_url = %self.token_url, client_id = %credentials.client_id, "requesting access token");

        let response = self
            .http_client
            .post(&self.token_url)
            .basic_auth(&credentials.client_id, Some(credentials.client_secret.as_str()))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .map_err(|e| {
                DsccError::authentication_error(
                    format!("token service unreachable: {}", e),
                    None,
                    Some(e),
                    Some(concat!(file!(), ":", line!())),
                )
            })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = error_message_from_body(&text)
                .or_else(|| status.canonical_reason().map(String::from))
                .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));
            return Err(DsccError::authentication_error(
                sanitize_error_message(&message),
                Some(status.as_u16()),
                None::<std::io::Error>,
                Some(concat!(file!(), ":", line!())),
            ));
        }

        let payload: TokenResponse = response.json().await.map_err(|e| {
            DsccError::parse_error(
                format!("invalid token response: {}", e),
                None,
                Some(e),
                Some(concat!(file!(), ":", line!())),
            )
        })?;

        if payload.access_token.is_empty() {
            return Err(DsccError::authentication_error(
                "token service returned an empty access token",
                Some(status.as_u16()),
                None::<std::io::Error>,
                Some(concat!(file!(), ":", line!())),
            ));
        }

        debug!(expires_in = ?payload.expires_in, "access token issued");
        Ok(AccessToken::from_response(payload))
    }

    /// Start building a request against `path`
    pub fn call(&self, method: Method, path: impl Into<String>) -> RequestBuilder {
        RequestBuilder::from_client(Arc::new(self.clone()), method, path)
    }

    pub fn get(&self, path: impl Into<String>) -> RequestBuilder {
        self.call(Method::GET, path)
    }

    pub fn post(&self, path: impl Into<String>) -> RequestBuilder {
        self.call(Method::POST, path)
    }

    pub fn put(&self, path: impl Into<String>) -> RequestBuilder {
        self.call(Method::PUT, path)
    }

    pub fn patch(&self, path: impl Into<String>) -> RequestBuilder {
        self.call(Method::PATCH, path)
    }

    pub fn delete(&self, path: impl Into<String>) -> RequestBuilder {
        self.call(Method::DELETE, path)
    }

    /// Issue one authenticated call and return the decoded body unchanged
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        query: Option<&[(&str, &str)]>,
        body: Option<Value>,
    ) -> DsccResult<Value> {
        let mut builder = self.call(method, path);
        if let Some(query) = query {
            for (key, value) in query {
                builder = builder.query(*key, *value);
            }
        }
        if let Some(body) = body {
            builder = builder.body(body);
        }
        builder.send().await
    }

    /// Get the domain client registry
    pub fn domains(&self) -> Arc<DomainClientRegistry> {
        self.domain_registry
            .get_or_init(|| {
                // The registry keeps its own handle without a registry of its own
                let mut detached = self.clone();
                detached.domain_registry = Arc::new(OnceLock::new());
                Arc::new(DomainClientRegistry::new(Arc::new(detached)))
            })
            .clone()
    }

    /// Search, tasks and account settings
    pub fn platform(&self) -> Arc<PlatformClient> {
        self.domains().platform()
    }

    /// Issues and audit events
    pub fn audit(&self) -> Arc<AuditClient> {
        self.domains().audit()
    }

    /// Storage system, volume and volume set inventory
    pub fn storage_systems(&self) -> Arc<StorageSystemClient> {
        self.domains().storage_systems()
    }

    /// Alletra 6000 / Nimble commands scoped to one system
    pub fn alletra6k(&self, system_id: &str) -> DsccResult<Arc<Alletra6kClient>> {
        self.domains().alletra6k(system_id)
    }

    /// Alletra 9000 / Primera commands scoped to one system
    pub fn alletra9k(&self, system_id: &str) -> DsccResult<Arc<Alletra9kClient>> {
        self.domains().alletra9k(system_id)
    }

    pub fn hci(&self) -> Arc<HciClient> {
        self.domains().hci()
    }

    /// Backup and recovery reports
    pub fn braas(&self) -> Arc<BraasClient> {
        self.domains().braas()
    }

    pub fn application_dashboard(&self) -> Arc<ApplicationDashboardClient> {
        self.domains().application_dashboard()
    }

    /// Users, groups and devices
    pub fn user(&self) -> Arc<UserClient> {
        self.domains().user()
    }

    pub fn dual_authorization(&self) -> Arc<DualAuthorizationClient> {
        self.domains().dual_authorization()
    }

    pub fn file_server(&self) -> Arc<FileServerClient> {
        self.domains().file_server()
    }

    /// Register a custom domain client
    pub fn register_domain<T: DomainClient + 'static>(&self, name: &str, client: T) -> &Self {
        self.domains().register(name, client);
        self
    }

    /// Get a custom domain client by name
    pub fn get_domain(&self, name: &str) -> Option<Arc<dyn DomainClient>> {
        self.domains().get(name)
    }
}

impl std::fmt::Debug for Dscc {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dscc")
            .field("base_url", &self.base_url)
            .field("token_url", &self.token_url)
            .field("credentials", &self.credentials)
            .finish_non_exhaustive()
    }
}
