// Middleware and Extension Traits

use crate::types::*;
use async_trait::async_trait;

#[async_trait]
pub trait RequestMiddleware: Send + Sync {
    /// Process and possibly modify the request before sending
    async fn process_request(&self, request: ApiRequest) -> Result<ApiRequest, DsccError>;
}

#[async_trait]
pub trait ResponseMiddleware: Send + Sync {
    /// Process and possibly modify a successful response
    async fn process_response(&self, response: ApiResponse) -> Result<ApiResponse, DsccError>;
}
