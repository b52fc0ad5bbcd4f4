use dscc_rs::client::{MockApiHandler, RequestHandlerFuture};
use dscc_rs::types::*;
use reqwest::Method;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Canned outcome for one route
#[derive(Clone)]
#[allow(dead_code)]
pub enum MockResponse {
    Success(ApiResponse),
    Error(DsccError),
}

impl From<ApiResponse> for MockResponse {
    fn from(resp: ApiResponse) -> Self {
        MockResponse::Success(resp)
    }
}

impl From<Value> for MockResponse {
    fn from(body: Value) -> Self {
        MockResponse::Success(ApiResponse::ok(body))
    }
}

impl From<DsccError> for MockResponse {
    fn from(error: DsccError) -> Self {
        MockResponse::Error(error)
    }
}

/// In-process stand-in for the DSCC service
#[derive(Clone)]
pub struct MockApiClient {
    inner: Arc<Mutex<MockApiClientInner>>,
}

struct MockApiClientInner {
    // Responses keyed by (method, path)
    responses: HashMap<(Method, String), MockResponse>,
    // Request history for verification
    request_history: Vec<ApiRequest>,
    response_delay: Option<Duration>,
}

impl Default for MockApiClient {
    fn default() -> Self {
        Self {
            inner: Arc::new(Mutex::new(MockApiClientInner {
                responses: HashMap::new(),
                request_history: Vec::new(),
                response_delay: None,
            })),
        }
    }
}

#[allow(dead_code)]
impl MockApiClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the outcome for a route
    pub fn add_mock<T: Into<MockResponse>>(&self, method: Method, path: &str, response: T) -> &Self {
        let mut inner = self.inner.lock().unwrap();
        inner
            .responses
            .insert((method, path.to_string()), response.into());
        self
    }

    /// Set a simulated response delay
    pub fn with_delay(&self, delay: Duration) -> &Self {
        let mut inner = self.inner.lock().unwrap();
        inner.response_delay = Some(delay);
        self
    }

    /// Get the captured request history
    pub fn get_request_history(&self) -> Vec<ApiRequest> {
        let inner = self.inner.lock().unwrap();
        inner.request_history.clone()
    }

    pub fn request_count(&self) -> usize {
        self.inner.lock().unwrap().request_history.len()
    }

    /// The most recent request, if any
    pub fn last_request(&self) -> Option<ApiRequest> {
        self.inner.lock().unwrap().request_history.last().cloned()
    }

    pub fn clear_request_history(&self) -> &Self {
        let mut inner = self.inner.lock().unwrap();
        inner.request_history.clear();
        self
    }

    fn record_request(&self, request: ApiRequest) {
        let mut inner = self.inner.lock().unwrap();
        inner.request_history.push(request);
    }

    /// Records the request, waits for any configured delay, then answers.
    /// Unknown routes answer 404 with a JSON message.
    pub async fn handle(&self, request: ApiRequest) -> DsccResult<ApiResponse> {
        self.record_request(request.clone());

        let delay = self.inner.lock().unwrap().response_delay;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let configured = {
            let inner = self.inner.lock().unwrap();
            inner
                .responses
                .get(&(request.method.clone(), request.path.clone()))
                .cloned()
        };

        match configured {
            Some(MockResponse::Success(response)) => Ok(response),
            Some(MockResponse::Error(error)) => Err(error),
            None => Ok(ApiResponse::new(
                404,
                json!({ "message": format!("no mock for {} {}", request.method, request.path) }),
            )),
        }
    }
}

impl MockApiHandler for MockApiClient {
    fn process_request(&self, request: ApiRequest) -> RequestHandlerFuture {
        let this = self.clone();
        Box::pin(async move { this.handle(request).await })
    }
}

/// Convert Arc<MockApiClient> to Arc<dyn MockApiHandler>
#[allow(dead_code)]
pub fn mock_api_to_handler(mock: Arc<MockApiClient>) -> Arc<dyn MockApiHandler> {
    mock
}

/// A typical list response
#[allow(dead_code)]
pub fn create_list_response(items: Vec<Value>) -> Value {
    let count = items.len();
    json!({
        "items": items,
        "count": count,
        "offset": 0,
        "total": count,
    })
}
