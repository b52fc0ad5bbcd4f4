//! Nimble / Alletra 6000 operations, scoped to one storage system.

use crate::client::Dscc;
use crate::domains::base::BaseDomainClient;
use crate::domains::{DomainOperations, ValidationOperations};
use crate::types::*;
use serde_json::Value;
use std::sync::Arc;

pub struct Alletra6kClient {
    base: BaseDomainClient,
    system_id: String,
    system_path: String,
}

impl Alletra6kClient {
    pub(crate) fn new(dscc: Arc<Dscc>, system_id: String) -> Self {
        let system_path = format!("/api/v1/storage-systems/device-type2/{}", system_id);
        Self {
            base: BaseDomainClient::new(dscc, "alletra6k"),
            system_id,
            system_path,
        }
    }

    pub fn system_id(&self) -> &str {
        &self.system_id
    }

    fn path(&self, suffix: &str) -> String {
        format!("{}{}", self.system_path, suffix)
    }

    fn item_path(&self, collection: &str, id: &str, param_name: &str) -> DsccResult<String> {
        let id = self.validate_id(id, param_name)?;
        Ok(format!("{}/{}/{}", self.system_path, collection, id))
    }

    pub async fn events(&self) -> DsccResult<Value> {
        self.get_json(self.path("/events")).await
    }

    pub async fn alarms(&self) -> DsccResult<Value> {
        self.get_json(self.path("/alarms")).await
    }

    pub async fn alarm(&self, alarm_id: &str) -> DsccResult<Value> {
        self.get_json(self.item_path("alarms", alarm_id, "alarm_id")?).await
    }

    pub async fn controllers(&self) -> DsccResult<Value> {
        self.get_json(self.path("/controllers")).await
    }

    pub async fn controller(&self, controller_id: &str) -> DsccResult<Value> {
        self.get_json(self.item_path("controllers", controller_id, "controller_id")?)
            .await
    }

    /// Halt one controller. Sent without a body.
    pub async fn halt_controller(&self, controller_id: &str) -> DsccResult<Value> {
        let path = self.item_path("controllers", controller_id, "controller_id")?;
        self.post_json(format!("{}/actions/halt", path), None).await
    }

    pub async fn disks(&self) -> DsccResult<Value> {
        self.get_json(self.path("/disks")).await
    }

    pub async fn disk(&self, disk_id: &str) -> DsccResult<Value> {
        self.get_json(self.item_path("disks", disk_id, "disk_id")?).await
    }

    pub async fn edit_disk(&self, disk_id: &str, body: Value) -> DsccResult<Value> {
        self.post_json(self.item_path("disks", disk_id, "disk_id")?, Some(body))
            .await
    }

    pub async fn performance_policies(&self) -> DsccResult<Value> {
        self.get_json(self.path("/performance-policies")).await
    }

    pub async fn create_performance_policy(&self, body: Value) -> DsccResult<Value> {
        self.post_json(self.path("/performance-policies"), Some(body))
            .await
    }

    pub async fn performance_policy(&self, policy_id: &str) -> DsccResult<Value> {
        self.get_json(self.item_path("performance-policies", policy_id, "policy_id")?)
            .await
    }

    pub async fn edit_performance_policy(&self, policy_id: &str, body: Value) -> DsccResult<Value> {
        self.put_json(
            self.item_path("performance-policies", policy_id, "policy_id")?,
            body,
        )
        .await
    }

    pub async fn delete_performance_policy(&self, policy_id: &str) -> DsccResult<Value> {
        self.delete_json(self.item_path("performance-policies", policy_id, "policy_id")?)
            .await
    }

    pub async fn fc_sessions(&self) -> DsccResult<Value> {
        self.get_json(self.path("/fibre-channel-sessions")).await
    }

    pub async fn fc_session(&self, session_id: &str) -> DsccResult<Value> {
        self.get_json(self.item_path("fibre-channel-sessions", session_id, "session_id")?)
            .await
    }

    pub async fn network_interfaces(&self) -> DsccResult<Value> {
        self.get_json(self.path("/network-interfaces")).await
    }

    pub async fn network_interface(&self, interface_id: &str) -> DsccResult<Value> {
        self.get_json(self.item_path("network-interfaces", interface_id, "interface_id")?)
            .await
    }

    pub async fn ports(&self) -> DsccResult<Value> {
        self.get_json(self.path("/ports")).await
    }

    pub async fn port(&self, port_id: &str) -> DsccResult<Value> {
        self.get_json(self.item_path("ports", port_id, "port_id")?).await
    }

    /// Edit a Fibre Channel port
    pub async fn edit_fc_port(&self, port_id: &str, body: Value) -> DsccResult<Value> {
        self.put_json(self.item_path("ports", port_id, "port_id")?, body)
            .await
    }

    pub async fn shelves(&self) -> DsccResult<Value> {
        self.get_json(self.path("/shelves")).await
    }

    pub async fn storage_pools(&self) -> DsccResult<Value> {
        self.get_json(self.path("/storage-pools")).await
    }

    pub async fn create_storage_pool(&self, body: Value) -> DsccResult<Value> {
        self.post_json(self.path("/storage-pools"), Some(body)).await
    }

    pub async fn storage_pool(&self, pool_id: &str) -> DsccResult<Value> {
        self.get_json(self.item_path("storage-pools", pool_id, "pool_id")?)
            .await
    }

    pub async fn edit_storage_pool(&self, pool_id: &str, body: Value) -> DsccResult<Value> {
        self.put_json(self.item_path("storage-pools", pool_id, "pool_id")?, body)
            .await
    }

    pub async fn delete_storage_pool(&self, pool_id: &str) -> DsccResult<Value> {
        self.delete_json(self.item_path("storage-pools", pool_id, "pool_id")?)
            .await
    }

    /// Merge a pool into `target_pool_id` given in the body
    pub async fn merge_storage_pool(&self, pool_id: &str, body: Value) -> DsccResult<Value> {
        let path = self.item_path("storage-pools", pool_id, "pool_id")?;
        self.post_json(format!("{}/actions/merge", path), Some(body))
            .await
    }

    pub async fn storage_pool_capacity_history(&self, pool_id: &str) -> DsccResult<Value> {
        let path = self.item_path("storage-pools", pool_id, "pool_id")?;
        self.get_json(format!("{}/capacity-history", path)).await
    }

    pub async fn storage_pool_performance_history(&self, pool_id: &str) -> DsccResult<Value> {
        let path = self.item_path("storage-pools", pool_id, "pool_id")?;
        self.get_json(format!("{}/performance-history", path)).await
    }

    pub async fn storage_pool_performance_statistics(&self, pool_id: &str) -> DsccResult<Value> {
        let path = self.item_path("storage-pools", pool_id, "pool_id")?;
        self.get_json(format!("{}/performance-statistics", path)).await
    }

    /// The system object itself
    pub async fn system(&self) -> DsccResult<Value> {
        self.get_json(self.system_path.clone()).await
    }

    pub async fn edit_system(&self, body: Value) -> DsccResult<Value> {
        self.put_json(self.system_path.clone(), body).await
    }

    pub async fn arrays(&self) -> DsccResult<Value> {
        self.get_json(self.path("/arrays")).await
    }

    pub async fn capacity_history(&self) -> DsccResult<Value> {
        self.get_json(self.path("/capacity-history")).await
    }

    pub async fn performance_history(&self) -> DsccResult<Value> {
        self.get_json(self.path("/performance-history")).await
    }

    /// Volumes of this system, served from the device-independent path
    pub async fn volumes(&self) -> DsccResult<Value> {
        self.get_json(format!("/api/v1/storage-systems/{}/volumes", self.system_id))
            .await
    }
}

impl_domain_client!(Alletra6kClient);
