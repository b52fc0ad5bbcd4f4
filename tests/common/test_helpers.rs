use super::mock_api_client::{mock_api_to_handler, MockApiClient};
use dscc_rs::{ClientConfig, Dscc};
use std::sync::Arc;

pub const TEST_BASE_URL: &str = "https://dscc.test";
pub const TEST_TOKEN: &str = "test-token";

/// Client holding a preloaded token whose requests go to a fresh mock
#[allow(dead_code)]
pub fn create_mock_dscc() -> (Arc<Dscc>, Arc<MockApiClient>) {
    let mock_api = Arc::new(MockApiClient::new());
    let client = Dscc::with_mock_api(
        ClientConfig::new(TEST_BASE_URL),
        mock_api_to_handler(mock_api.clone()),
    )
    .expect("valid test config")
    .with_access_token(TEST_TOKEN);

    (Arc::new(client), mock_api)
}

/// Client with neither token nor credentials, backed by a mock
#[allow(dead_code)]
pub fn create_unauthenticated_dscc() -> (Arc<Dscc>, Arc<MockApiClient>) {
    let mock_api = Arc::new(MockApiClient::new());
    let client = Dscc::with_mock_api(
        ClientConfig::new(TEST_BASE_URL),
        mock_api_to_handler(mock_api.clone()),
    )
    .expect("valid test config");

    (Arc::new(client), mock_api)
}

/// Client pointed at a mockito server for both API and token calls
#[allow(dead_code)]
pub fn create_http_dscc(server_url: &str) -> Dscc {
    let config = ClientConfig::new(server_url)
        .with_token_url(format!("{}/as/token.oauth2", server_url))
        .with_credentials("client-id", "client-secret");
    Dscc::with_config(config).expect("valid test config")
}
