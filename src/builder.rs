// Request Builder

use crate::client::Dscc;
use crate::types::*;
use crate::utils::error_message_from_body;
use reqwest::{header, Method, StatusCode};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Builds one authenticated call against the DSCC API
pub struct RequestBuilder {
    client_ref: Arc<Dscc>,
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    body: Option<Value>,
}

impl RequestBuilder {
    pub(crate) fn from_client(client: Arc<Dscc>, method: Method, path: impl Into<String>) -> Self {
        Self {
            client_ref: client,
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    /// Append a query parameter
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Append the standard list parameters
    pub fn params(mut self, params: &ListParams) -> Self {
        self.query.extend(params.to_query());
        self
    }

    /// Set a JSON request body
    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Set the request body from any serializable value
    pub fn json<T: Serialize>(self, body: &T) -> DsccResult<Self> {
        let value = serde_json::to_value(body).map_err(|e| {
            DsccError::Validation(format!("request body could not be serialized: {}", e))
        })?;
        Ok(self.body(value))
    }

    async fn prepare_request(&self) -> DsccResult<ApiRequest> {
        if !self.path.starts_with('/') {
            return Err(DsccError::Validation(format!(
                "path must start with '/': {}",
                self.path
            )));
        }

        let mut request = ApiRequest::new(self.method.clone(), self.path.clone());
        request.query = self.query.clone();
        request.body = self.body.clone();

        for middleware in &self.client_ref.request_middleware {
            request = middleware.process_request(request).await?;
        }

        Ok(request)
    }

    async fn handle_error_response(&self, response: reqwest::Response) -> DsccResult<reqwest::Response> {
        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status().as_u16();
        let retry_after = response
            .headers()
            .get(header::RETRY_AFTER)
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.trim().parse::<u64>().ok())
            .map(Duration::from_secs);
        let error_text = response.text().await.unwrap_or_default();

        Err(error_for_status(status, &error_text, retry_after))
    }

    /// Send the request and return the decoded body
    pub async fn send(self) -> DsccResult<Value> {
        Ok(self.send_raw().await?.into_body())
    }

    /// Send the request and return status plus decoded body
    pub async fn send_raw(self) -> DsccResult<ApiResponse> {
        let request = self.prepare_request().await?;
        let token = self.client_ref.access_token().await?;

        let mut response = self.execute_request(request, &token).await?;

        for middleware in &self.client_ref.response_middleware {
            response = middleware.process_response(response).await?;
        }

        Ok(response)
    }

    async fn execute_request(&self, request: ApiRequest, token: &AccessToken) -> DsccResult<ApiResponse> {
        // Get the handler outside of the await
        let handler_opt = {
            if let Ok(guard) = self.client_ref.request_handler.lock() {
                (*guard).as_ref().map(|handler| handler.clone())
            } else {
                None
            }
        };

        if let Some(handler) = handler_opt {
            let response = handler(request).await?;
            if !response.is_success() {
                let text = if response.body.is_null() {
                    String::new()
                } else {
                    response.body.to_string()
                };
                return Err(error_for_status(response.status, &text, None));
            }
            return Ok(response);
        }

        let url = format!("{}{}", self.client_ref.base_url, request.path);
        debug!(method = %request.method, url = %url, "sending DSCC request");

        let mut http = self
            .client_ref
            .http_client
            .request(request.method.clone(), &url)
            .header(header::AUTHORIZATION, token.authorization_header());

        if !request.query.is_empty() {
            http = http.query(&request.query);
        }
        if let Some(body) = &request.body {
            http = http.json(body);
        }

        let response = http.send().await?;
        let response = self.handle_error_response(response).await?;

        let status = response.status().as_u16();
        let text = response.text().await?;
        debug!(status, bytes = text.len(), "DSCC response received");

        Ok(ApiResponse::new(status, decode_body(&text)?))
    }
}

/// Empty bodies decode to `Value::Null`
pub(crate) fn decode_body(text: &str) -> DsccResult<Value> {
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(text).map_err(|e| {
        DsccError::parse_error(
            e.to_string(),
            Some(sanitize_error_message(text)),
            Some(e),
            Some(concat!(file!(), ":", line!())),
        )
    })
}

/// Translate a non-success status into an error
pub(crate) fn error_for_status(status: u16, body: &str, retry_after: Option<Duration>) -> DsccError {
    let sanitized = sanitize_error_message(body);

    if status == 429 {
        let details = (!sanitized.trim().is_empty()).then_some(sanitized);
        return DsccError::rate_limited(retry_after, details);
    }

    let message = error_message_from_body(&sanitized)
        .or_else(|| {
            StatusCode::from_u16(status)
                .ok()
                .and_then(|s| s.canonical_reason())
                .map(String::from)
        })
        .unwrap_or_else(|| format!("HTTP {}", status));

    let response_body = (!sanitized.trim().is_empty()).then_some(sanitized);

    DsccError::api_error(message, status, response_body, Some(concat!(file!(), ":", line!())))
}
