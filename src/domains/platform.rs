//! Account-wide operations: search, tasks and settings.

use crate::client::Dscc;
use crate::domains::base::BaseDomainClient;
use crate::domains::{DomainOperations, ValidationOperations};
use crate::types::*;
use serde_json::Value;
use std::sync::Arc;

pub struct PlatformClient {
    base: BaseDomainClient,
}

impl PlatformClient {
    pub(crate) fn new(dscc: Arc<Dscc>) -> Self {
        Self {
            base: BaseDomainClient::new(dscc, "platform"),
        }
    }

    /// Full-text search across DSCC objects
    pub async fn search(&self, query: &str) -> DsccResult<Value> {
        let query = self.validate_string(query, "query")?;
        self.dscc().get("/api/v1/search").query("query", query).send().await
    }

    /// Asynchronous operations started by the caller
    pub async fn tasks(&self) -> DsccResult<Value> {
        self.get_json("/api/v1/tasks").await
    }

    pub async fn tasks_with(&self, params: &ListParams) -> DsccResult<Value> {
        self.get_json_with("/api/v1/tasks", params).await
    }

    pub async fn task(&self, id: &str) -> DsccResult<Value> {
        let id = self.validate_id(id, "id")?;
        self.get_json(format!("/api/v1/tasks/{}", id)).await
    }

    pub async fn settings(&self) -> DsccResult<Value> {
        self.get_json("/api/v1/settings").await
    }

    pub async fn setting(&self, id: &str) -> DsccResult<Value> {
        let id = self.validate_id(id, "id")?;
        self.get_json(format!("/api/v1/settings/{}", id)).await
    }

    pub async fn edit_setting(&self, id: &str, body: Value) -> DsccResult<Value> {
        let id = self.validate_id(id, "id")?;
        self.patch_json(format!("/api/v1/settings/{}", id), body).await
    }
}

impl_domain_client!(PlatformClient);
