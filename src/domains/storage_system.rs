//! Storage system, volume and volume set inventory across all device types.

use crate::client::Dscc;
use crate::domains::base::BaseDomainClient;
use crate::domains::{DomainOperations, ValidationOperations};
use crate::types::*;
use serde_json::Value;
use std::sync::Arc;

pub struct StorageSystemClient {
    base: BaseDomainClient,
}

impl StorageSystemClient {
    pub(crate) fn new(dscc: Arc<Dscc>) -> Self {
        Self {
            base: BaseDomainClient::new(dscc, "storage-systems"),
        }
    }

    pub async fn storage_systems(&self) -> DsccResult<Value> {
        self.get_json("/api/v1/storage-systems").await
    }

    pub async fn storage_systems_with(&self, params: &ListParams) -> DsccResult<Value> {
        self.get_json_with("/api/v1/storage-systems", params).await
    }

    /// Details of one storage system
    pub async fn get(&self, id: &str) -> DsccResult<Value> {
        let id = self.validate_id(id, "id")?;
        self.get_json(format!("/api/v1/storage-systems/{}", id)).await
    }

    /// Primera / Alletra 9000 systems
    pub async fn alletra9k_systems(&self) -> DsccResult<Value> {
        self.get_json("/api/v1/storage-systems/device-type1").await
    }

    /// Nimble / Alletra 6000 systems
    pub async fn alletra6k_systems(&self) -> DsccResult<Value> {
        self.get_json("/api/v1/storage-systems/device-type2").await
    }

    pub async fn storage_pools(&self, system_id: &str) -> DsccResult<Value> {
        let system_id = self.validate_id(system_id, "system_id")?;
        self.get_json(format!("/api/v1/storage-systems/{}/storage-pools", system_id))
            .await
    }

    pub async fn storage_types(&self) -> DsccResult<Value> {
        self.get_json("/api/v1/storage-systems/storage-types").await
    }

    pub async fn volumes(&self) -> DsccResult<Value> {
        self.get_json("/api/v1/volumes").await
    }

    pub async fn volumes_with(&self, params: &ListParams) -> DsccResult<Value> {
        self.get_json_with("/api/v1/volumes", params).await
    }

    pub async fn volume_sets(&self) -> DsccResult<Value> {
        self.get_json("/api/v1/volume-sets").await
    }

    pub async fn volume_set(&self, id: &str) -> DsccResult<Value> {
        let id = self.validate_id(id, "id")?;
        self.get_json(format!("/api/v1/volume-sets/{}", id)).await
    }

    pub async fn volume_set_volumes(&self, id: &str) -> DsccResult<Value> {
        let id = self.validate_id(id, "id")?;
        self.get_json(format!("/api/v1/volume-sets/{}/volumes", id)).await
    }
}

impl_domain_client!(StorageSystemClient);
