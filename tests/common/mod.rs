// Shared test support: an in-process mock of the DSCC service and client builders
#![allow(dead_code)]

pub mod mock_api_client;
pub mod test_helpers;

pub use mock_api_client::{create_list_response, mock_api_to_handler, MockApiClient, MockResponse};
pub use test_helpers::*;
