use dscc_rs::{ClientConfig, Dscc, DsccError, ErrorKind, TlsConfig};
use reqwest::Method;
use serde_json::json;
use std::sync::Arc;
use std::time::{Duration, Instant};

mod common;
use common::*;

#[test]
fn rejects_invalid_base_url() {
    let result = Dscc::new("not a url", "id", "secret");
    assert!(matches!(result, Err(DsccError::Validation(_))));

    let result = Dscc::new("ftp://dscc.example.com", "id", "secret");
    assert!(matches!(result, Err(DsccError::Validation(_))));
}

#[test]
fn rejects_blank_credentials() {
    let result = Dscc::new("https://eu1.data.cloud.hpe.com", "  ", "secret");
    assert!(matches!(result, Err(DsccError::Validation(_))));
}

#[test]
fn trims_trailing_slash_from_base_url() {
    let client = Dscc::new("https://eu1.data.cloud.hpe.com/", "id", "secret").unwrap();
    assert_eq!(client.base_url, "https://eu1.data.cloud.hpe.com");
    assert_eq!(client.token_url, dscc_rs::DEFAULT_TOKEN_URL);
}

#[test]
fn custom_config_is_accepted() {
    let config = ClientConfig::new("https://us1.data.cloud.hpe.com")
        .with_credentials("id", "secret")
        .with_timeout(Duration::from_secs(5))
        .with_tls(TlsConfig {
            min_tls_version: None,
            cert_verification: true,
        });
    assert!(Dscc::with_config(config).is_ok());
}

#[test]
fn debug_output_hides_secret() {
    let client = Dscc::new("https://eu1.data.cloud.hpe.com", "my-id", "super-secret").unwrap();
    let rendered = format!("{:?}", client);
    assert!(rendered.contains("my-id"));
    assert!(!rendered.contains("super-secret"));
}

#[tokio::test]
async fn fails_fast_without_token_or_credentials() {
    let (client, mock_api) = create_unauthenticated_dscc();
    mock_api.add_mock(reqwest::Method::GET, "/api/v1/issues", json!({"items": []}));

    let err = client.audit().issues().await.unwrap_err();

    assert!(matches!(err, DsccError::MissingCredentials { .. }));
    assert_eq!(err.kind(), ErrorKind::Authentication);
    assert_eq!(mock_api.request_count(), 0);
}

#[tokio::test]
async fn authenticate_without_credentials_fails() {
    let (client, _) = create_unauthenticated_dscc();
    let err = client.authenticate().await.unwrap_err();
    assert!(err.is_authentication());
}

#[tokio::test]
async fn preloaded_token_is_used() {
    let (client, _) = create_mock_dscc();
    assert!(client.has_token().await);

    let token = client.access_token().await.unwrap();
    assert_eq!(token.as_str(), TEST_TOKEN);
    assert!(!token.is_expired());
}

#[tokio::test]
async fn revoke_token_clears_session() {
    let (client, mock_api) = create_mock_dscc();
    client.revoke_token().await;

    assert!(!client.has_token().await);
    let err = client.storage_systems().volumes().await.unwrap_err();
    assert!(matches!(err, DsccError::MissingCredentials { .. }));
    assert_eq!(mock_api.request_count(), 0);
}

#[test]
fn token_state_from_blocking_context() {
    let (client, _) = create_mock_dscc();

    assert!(tokio_test::block_on(client.has_token()));
    tokio_test::block_on(client.revoke_token());
    assert!(!tokio_test::block_on(client.has_token()));
}

#[tokio::test]
async fn clones_share_one_session() {
    let (client, _) = create_mock_dscc();
    let clone = (*client).clone();

    clone.revoke_token().await;

    assert!(!client.has_token().await);
}

#[tokio::test]
async fn separate_clients_do_not_share_tokens() {
    let (first, _) = create_mock_dscc();
    let (second, _) = create_mock_dscc();
    let second = (*second).clone().with_access_token("second-token");

    first.revoke_token().await;

    assert!(!first.has_token().await);
    assert!(second.has_token().await);
    assert_eq!(second.access_token().await.unwrap().as_str(), "second-token");
}

#[tokio::test]
async fn concurrent_calls_are_not_serialized() {
    let (client, mock_api) = create_mock_dscc();
    mock_api.add_mock(Method::GET, "/api/v1/volumes", json!({"items": []}));
    mock_api.with_delay(Duration::from_millis(300));

    let storage = client.storage_systems();
    let started = Instant::now();
    let (a, b, c) = tokio::join!(storage.volumes(), storage.volumes(), storage.volumes());

    assert!(a.is_ok() && b.is_ok() && c.is_ok());
    assert!(started.elapsed() < Duration::from_millis(800));
    assert_eq!(mock_api.request_count(), 3);
}

#[test]
fn domain_clients_are_cached() {
    let (client, _) = create_mock_dscc();

    assert!(Arc::ptr_eq(&client.audit(), &client.audit()));
    assert!(Arc::ptr_eq(&client.hci(), &client.hci()));
    assert!(Arc::ptr_eq(&client.user(), &client.domains().user()));
}

#[test]
fn system_clients_are_cached_per_system() {
    let (client, _) = create_mock_dscc();

    let a = client.alletra9k("sys-1").unwrap();
    let b = client.alletra9k("sys-1").unwrap();
    let c = client.alletra9k("sys-2").unwrap();

    assert!(Arc::ptr_eq(&a, &b));
    assert!(!Arc::ptr_eq(&a, &c));
    assert_eq!(c.system_id(), "sys-2");
}

#[test]
fn system_client_rejects_bad_id() {
    let (client, _) = create_mock_dscc();

    assert!(matches!(client.alletra6k(""), Err(DsccError::Validation(_))));
    assert!(matches!(client.alletra6k("a/b"), Err(DsccError::Validation(_))));
}

#[test]
fn custom_domain_registration() {
    use dscc_rs::domains::{base::BaseDomainClient, DomainClient};

    struct ProtectionPolicies {
        base: BaseDomainClient,
    }

    impl DomainClient for ProtectionPolicies {
        fn domain_name(&self) -> &str {
            self.base.domain_name()
        }
    }

    let (client, _) = create_mock_dscc();
    client.register_domain(
        "protection-policies",
        ProtectionPolicies {
            base: BaseDomainClient::new(client.clone(), "protection-policies"),
        },
    );

    let domain = client.get_domain("protection-policies").unwrap();
    assert_eq!(domain.domain_name(), "protection-policies");
    assert!(client.get_domain("missing").is_none());
    assert_eq!(client.domains().list_domains(), vec!["protection-policies".to_string()]);
}

#[test]
fn from_env_requires_url() {
    std::env::remove_var("DSCC_URL");
    assert!(matches!(dscc_rs::from_env(), Err(DsccError::Validation(_))));
}

#[test]
fn new_client_validates_like_dscc_new() {
    let client = dscc_rs::new_client("https://us1.data.cloud.hpe.com", "id", "secret").unwrap();
    assert_eq!(client.base_url, "https://us1.data.cloud.hpe.com");

    let err = dscc_rs::new_client("", "id", "secret").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
}
