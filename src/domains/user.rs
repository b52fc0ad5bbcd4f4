//! Users, groups, devices and access rights.

use crate::client::Dscc;
use crate::domains::base::BaseDomainClient;
use crate::domains::{DomainOperations, ValidationOperations};
use crate::types::*;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

#[derive(Serialize)]
struct NewGroup {
    name: String,
    description: String,
}

pub struct UserClient {
    base: BaseDomainClient,
}

impl UserClient {
    pub(crate) fn new(dscc: Arc<Dscc>) -> Self {
        Self {
            base: BaseDomainClient::new(dscc, "user"),
        }
    }

    /// Permissions granted to the calling user
    pub async fn user_permissions(&self) -> DsccResult<Value> {
        self.get_json("/api/v1/group-access").await
    }

    pub async fn resource_types(&self) -> DsccResult<Value> {
        self.get_json("/api/v1/resource-types").await
    }

    pub async fn devices(&self) -> DsccResult<Value> {
        self.get_json("/api/v1/devices").await
    }

    pub async fn device(&self, id: &str) -> DsccResult<Value> {
        let id = self.validate_id(id, "id")?;
        self.get_json(format!("/api/v1/devices/{}", id)).await
    }

    pub async fn setup_progress(&self, id: &str) -> DsccResult<Value> {
        let id = self.validate_id(id, "id")?;
        self.get_json(format!("/api/v1/devices/setup-progress/{}", id))
            .await
    }

    pub async fn groups(&self) -> DsccResult<Value> {
        self.get_json("/api/v1/groups").await
    }

    pub async fn group(&self, id: &str) -> DsccResult<Value> {
        let id = self.validate_id(id, "id")?;
        self.get_json(format!("/api/v1/groups/{}", id)).await
    }

    pub async fn group_associated_resources(&self, id: &str) -> DsccResult<Value> {
        let id = self.validate_id(id, "id")?;
        self.get_json(format!("/api/v1/groups/{}/associated-resources", id))
            .await
    }

    pub async fn create_group(&self, name: &str, description: &str) -> DsccResult<Value> {
        let body = self.to_body(&NewGroup {
            name: self.validate_string(name, "name")?,
            description: description.to_string(),
        })?;
        self.post_json("/api/v1/groups", Some(body)).await
    }

    pub async fn delete_group(&self, id: &str) -> DsccResult<Value> {
        let id = self.validate_id(id, "id")?;
        self.delete_json(format!("/api/v1/groups/{}", id)).await
    }

    pub async fn settings(&self) -> DsccResult<Value> {
        self.get_json("/api/v1/settings").await
    }
}

impl_domain_client!(UserClient);
