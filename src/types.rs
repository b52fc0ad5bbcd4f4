// Core types and errors

use lazy_static::lazy_static;
use regex::Regex;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;

/// The result type used throughout the DSCC client
pub type DsccResult<T> = Result<T, DsccError>;

/// Tokens are treated as expired this long before their advertised lifetime ends
pub const TOKEN_EXPIRY_SKEW: Duration = Duration::from_secs(60);

/// Convert reqwest::Error to our DsccError
impl From<reqwest::Error> for DsccError {
    fn from(err: reqwest::Error) -> Self {
        let message = if err.is_timeout() {
            format!("request timed out: {}", err)
        } else {
            err.to_string()
        };
        DsccError::Transport {
            message,
            details: None,
            location: None,
            source: Some(Arc::new(err) as Arc<dyn std::error::Error + Send + Sync>),
        }
    }
}

/// A secure container for secrets that zeroes memory when dropped
pub struct SecureSecret {
    secret: String,
}

impl SecureSecret {
    pub fn new(secret: impl Into<String>) -> Self {
        Self { secret: secret.into() }
    }

    /// Get a reference to the underlying secret
    pub fn as_str(&self) -> &str {
        &self.secret
    }

    pub fn is_empty(&self) -> bool {
        self.secret.is_empty()
    }
}

impl Deref for SecureSecret {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.secret
    }
}

impl Drop for SecureSecret {
    fn drop(&mut self) {
        // Zero bytes keep the buffer valid UTF-8
        unsafe {
            let bytes = self.secret.as_bytes_mut();
            bytes.iter_mut().for_each(|b| *b = 0);
        }
    }
}

impl fmt::Debug for SecureSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecureSecret([REDACTED])")
    }
}

impl fmt::Display for SecureSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl Clone for SecureSecret {
    fn clone(&self) -> Self {
        Self {
            secret: self.secret.clone(),
        }
    }
}

/// GreenLake API client credentials used for the client-credentials grant
#[derive(Clone, Debug)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: SecureSecret,
}

impl Credentials {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: SecureSecret::new(client_secret),
        }
    }
}

/// Raw token endpoint payload
#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
}

/// A bearer token held by one client session
#[derive(Clone, Debug)]
pub struct AccessToken {
    secret: SecureSecret,
    pub token_type: String,
    pub expires_in: Option<Duration>,
    pub obtained_at: Instant,
}

impl AccessToken {
    /// Wrap a token obtained outside this library. It never expires locally.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            secret: SecureSecret::new(token),
            token_type: "Bearer".to_string(),
            expires_in: None,
            obtained_at: Instant::now(),
        }
    }

    pub(crate) fn from_response(response: TokenResponse) -> Self {
        Self {
            secret: SecureSecret::new(response.access_token),
            token_type: response.token_type.unwrap_or_else(|| "Bearer".to_string()),
            expires_in: response.expires_in.map(Duration::from_secs),
            obtained_at: Instant::now(),
        }
    }

    pub fn as_str(&self) -> &str {
        self.secret.as_str()
    }

    /// True once the token is within `TOKEN_EXPIRY_SKEW` of its lifetime
    pub fn is_expired(&self) -> bool {
        match self.expires_in {
            Some(lifetime) => {
                self.obtained_at.elapsed() + TOKEN_EXPIRY_SKEW >= lifetime
            }
            None => false,
        }
    }

    /// Value for the `Authorization` header
    pub fn authorization_header(&self) -> String {
        format!("Bearer {}", self.secret.as_str())
    }
}

/// Describes one call against the DSCC REST API
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path relative to the client base URL, starting with `/`
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    /// Look up the first query value for `key`
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Status code and decoded JSON body of a successful call
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    /// Shorthand for a 200 response
    pub fn ok(body: Value) -> Self {
        Self::new(200, body)
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn into_body(self) -> Value {
        self.body
    }
}

/// Query parameters accepted by DSCC list endpoints
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub select: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
}

impl ListParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// OData style filter, e.g. `state eq 'CREATED'`
    pub fn filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    pub fn sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }

    /// Comma separated list of attributes to return
    pub fn select(mut self, select: impl Into<String>) -> Self {
        self.select = Some(select.into());
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Non-empty parameters in a fixed order
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        let strings = [
            ("filter", &self.filter),
            ("sort", &self.sort),
            ("select", &self.select),
        ];
        for (key, value) in strings {
            if let Some(value) = value {
                if !value.trim().is_empty() {
                    pairs.push((key.to_string(), value.clone()));
                }
            }
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit".to_string(), limit.to_string()));
        }
        if let Some(offset) = self.offset {
            pairs.push(("offset".to_string(), offset.to_string()));
        }
        pairs
    }
}

/// Coarse error categories callers can branch on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Credentials rejected, token missing or refused
    Authentication,
    /// The service answered with a non-success status
    Remote,
    /// Network failure or timeout
    Transport,
    /// A required parameter was missing or malformed
    Validation,
    /// The response could not be decoded
    Parse,
}

#[derive(Debug, Error, Clone)]
pub enum DsccError {
    #[error("Authentication failed: {message}")]
    Authentication {
        status: Option<u16>,
        message: String,
        location: Option<String>,
        source: Option<Arc<dyn std::error::Error + Send + Sync>>,
    },

    #[error("API returned error: {status} - {message}")]
    Api {
        status: u16,
        message: String,
        response_body: Option<String>,
        location: Option<String>,
    },

    #[error("Rate limited by API: retry after {retry_after:?}")]
    RateLimited {
        retry_after: Option<Duration>,
        details: Option<String>,
        location: Option<String>,
    },

    #[error("Request failed: {message}")]
    Transport {
        message: String,
        details: Option<String>,
        location: Option<String>,
        source: Option<Arc<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Failed to parse API response: {message}")]
    Parse {
        message: String,
        source_text: Option<String>,
        location: Option<String>,
        source: Option<Arc<dyn std::error::Error + Send + Sync>>,
    },

    #[error("No access token or client credentials configured")]
    MissingCredentials { location: Option<String> },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Domain error: {domain}: {message}")]
    Domain {
        domain: String,
        message: String,
        details: Option<String>,
        location: Option<String>,
    },
}

impl DsccError {
    pub fn authentication_error<T: Into<String>>(
        message: T,
        status: Option<u16>,
        source: Option<impl std::error::Error + Send + Sync + 'static>,
        location: Option<&str>,
    ) -> Self {
        let error = Self::Authentication {
            status,
            message: message.into(),
            location: location.map(String::from),
            source: source.map(|e| Arc::new(e) as Arc<dyn std::error::Error + Send + Sync>),
        };
        error.log();
        error
    }

    pub fn api_error<T: Into<String>>(
        message: T,
        status: u16,
        response_body: Option<String>,
        location: Option<&str>,
    ) -> Self {
        let error = Self::Api {
            status,
            message: message.into(),
            response_body,
            location: location.map(String::from),
        };
        error.log();
        error
    }

    pub fn request_error<T: Into<String>>(
        message: T,
        details: Option<String>,
        source: Option<impl std::error::Error + Send + Sync + 'static>,
        location: Option<&str>,
    ) -> Self {
        let error = Self::Transport {
            message: message.into(),
            details,
            location: location.map(String::from),
            source: source.map(|e| Arc::new(e) as Arc<dyn std::error::Error + Send + Sync>),
        };
        error.log();
        error
    }

    pub fn parse_error<T: Into<String>>(
        message: T,
        source_text: Option<String>,
        source: Option<impl std::error::Error + Send + Sync + 'static>,
        location: Option<&str>,
    ) -> Self {
        let error = Self::Parse {
            message: message.into(),
            source_text,
            location: location.map(String::from),
            source: source.map(|e| Arc::new(e) as Arc<dyn std::error::Error + Send + Sync>),
        };
        error.log();
        error
    }

    pub fn domain_error<T: Into<String>>(
        message: T,
        domain: Option<String>,
        details: Option<String>,
        location: Option<&str>,
    ) -> Self {
        let error = Self::Domain {
            message: message.into(),
            domain: domain.unwrap_or_default(),
            details,
            location: location.map(String::from),
        };
        error.log();
        error
    }

    pub fn missing_credentials(location: Option<&str>) -> Self {
        Self::MissingCredentials {
            location: location.map(String::from),
        }
    }

    pub fn rate_limited(retry_after: Option<Duration>, details: Option<String>) -> Self {
        Self::RateLimited {
            retry_after,
            details,
            location: None,
        }
    }

    fn log(&self) {
        if let Some(loc) = self.location() {
            log::error!("{} at {}", self, loc);
        } else {
            log::error!("{}", self);
        }
    }

    /// Category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Authentication { .. } | Self::MissingCredentials { .. } => {
                ErrorKind::Authentication
            }
            Self::Api { status: 401, .. } | Self::Api { status: 403, .. } => {
                ErrorKind::Authentication
            }
            Self::Api { .. } | Self::RateLimited { .. } => ErrorKind::Remote,
            Self::Transport { .. } => ErrorKind::Transport,
            Self::Parse { .. } => ErrorKind::Parse,
            Self::Validation(_) | Self::Domain { .. } => ErrorKind::Validation,
        }
    }

    /// HTTP status attached to the error, if the service produced one
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Authentication { status, .. } => *status,
            Self::RateLimited { .. } => Some(429),
            _ => None,
        }
    }

    pub fn is_authentication(&self) -> bool {
        self.kind() == ErrorKind::Authentication
    }

    pub fn location(&self) -> Option<&str> {
        match self {
            Self::Authentication { location, .. } => location.as_deref(),
            Self::Api { location, .. } => location.as_deref(),
            Self::RateLimited { location, .. } => location.as_deref(),
            Self::Transport { location, .. } => location.as_deref(),
            Self::Parse { location, .. } => location.as_deref(),
            Self::MissingCredentials { location } => location.as_deref(),
            Self::Domain { location, .. } => location.as_deref(),
            Self::Validation(_) => None,
        }
    }

    pub fn source_error(&self) -> Option<&(dyn std::error::Error + Send + Sync)> {
        match self {
            Self::Authentication { source, .. } => source.as_ref().map(|s| s.as_ref()),
            Self::Transport { source, .. } => source.as_ref().map(|s| s.as_ref()),
            Self::Parse { source, .. } => source.as_ref().map(|s| s.as_ref()),
            _ => None,
        }
    }
}

/// Create a transport error carrying the call site
#[macro_export]
macro_rules! request_error {
    ($message:expr) => {
        $crate::DsccError::request_error($message, None, None::<std::io::Error>, Some(concat!(file!(), ":", line!())))
    };
    ($message:expr, $details:expr) => {
        $crate::DsccError::request_error($message, Some($details), None::<std::io::Error>, Some(concat!(file!(), ":", line!())))
    };
    ($message:expr, $details:expr, $source:expr) => {
        $crate::DsccError::request_error($message, Some($details), Some($source), Some(concat!(file!(), ":", line!())))
    };
}

/// Create a domain error carrying the call site
#[macro_export]
macro_rules! domain_error {
    ($domain:expr, $message:expr) => {
        $crate::DsccError::domain_error($message, Some($domain.to_string()), None, Some(concat!(file!(), ":", line!())))
    };
    ($domain:expr, $message:expr, $details:expr) => {
        $crate::DsccError::domain_error($message, Some($domain.to_string()), Some($details), Some(concat!(file!(), ":", line!())))
    };
}

lazy_static! {
    static ref BEARER_PATTERN: Regex =
        Regex::new(r"(?i)bearer\s+[A-Za-z0-9._~+/=-]+").expect("valid bearer pattern");
    static ref JWT_PATTERN: Regex =
        Regex::new(r"eyJ[A-Za-z0-9_-]+\.[A-Za-z0-9_-]+\.[A-Za-z0-9_-]*").expect("valid jwt pattern");
    static ref TOKEN_FIELD_PATTERN: Regex =
        Regex::new(r#""(access_token|client_secret)"\s*:\s*"[^"]*""#).expect("valid token field pattern");
}

/// Remove credentials from text that is about to be stored in an error or log line
pub fn sanitize_error_message(message: &str) -> String {
    let sanitized = TOKEN_FIELD_PATTERN.replace_all(message, "\"$1\":\"[REDACTED]\"");
    let sanitized = BEARER_PATTERN.replace_all(&sanitized, "Bearer [REDACTED]");
    JWT_PATTERN.replace_all(&sanitized, "[REDACTED]").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_params_skip_empty_fields() {
        let params = ListParams::new().filter("  ").sort("name asc").limit(10);
        assert_eq!(
            params.to_query(),
            vec![
                ("sort".to_string(), "name asc".to_string()),
                ("limit".to_string(), "10".to_string()),
            ]
        );
    }

    #[test]
    fn token_without_lifetime_never_expires() {
        let token = AccessToken::new("abc");
        assert!(!token.is_expired());
        assert_eq!(token.authorization_header(), "Bearer abc");
    }

    #[test]
    fn short_lived_token_is_expired_inside_skew() {
        let token = AccessToken::from_response(TokenResponse {
            access_token: "abc".to_string(),
            token_type: None,
            expires_in: Some(30),
        });
        assert!(token.is_expired());
    }

    #[test]
    fn sanitize_redacts_tokens() {
        let text = r#"{"access_token":"s3cr3t","detail":"Bearer abc.def"}"#;
        let cleaned = sanitize_error_message(text);
        assert!(!cleaned.contains("s3cr3t"));
        assert!(!cleaned.contains("abc.def"));
        assert!(cleaned.contains("detail"));
    }

    #[test]
    fn forbidden_maps_to_authentication_kind() {
        let err = DsccError::Api {
            status: 403,
            message: "forbidden".into(),
            response_body: None,
            location: None,
        };
        assert_eq!(err.kind(), ErrorKind::Authentication);
        assert_eq!(err.status(), Some(403));
    }
}
