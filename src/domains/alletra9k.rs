//! Primera / Alletra 9000 operations, scoped to one storage system.

use crate::client::Dscc;
use crate::domains::base::BaseDomainClient;
use crate::domains::{DomainOperations, ValidationOperations};
use crate::types::*;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;
use std::sync::Arc;

/// Hardware components listed under `/nodes/{id}/node-{component}`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeComponent {
    Cards,
    Cpus,
    Drives,
    Mcus,
    Mems,
    Powers,
    Batteries,
}

impl NodeComponent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cards => "cards",
            Self::Cpus => "cpus",
            Self::Drives => "drives",
            Self::Mcus => "mcus",
            Self::Mems => "mems",
            Self::Powers => "powers",
            Self::Batteries => "batteries",
        }
    }
}

impl fmt::Display for NodeComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Hardware components listed under `/enclosures/{id}/enclosure-{component}`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnclosureComponent {
    Cards,
    CardPorts,
    Disks,
    Fans,
    Powers,
    Sleds,
}

impl EnclosureComponent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cards => "cards",
            Self::CardPorts => "card-ports",
            Self::Disks => "disks",
            Self::Fans => "fans",
            Self::Powers => "powers",
            Self::Sleds => "sleds",
        }
    }
}

impl fmt::Display for EnclosureComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Address family cleared by `clear_port`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IpType {
    V4,
    V6,
    Both,
}

pub struct Alletra9kClient {
    base: BaseDomainClient,
    system_id: String,
    system_path: String,
}

impl Alletra9kClient {
    pub(crate) fn new(dscc: Arc<Dscc>, system_id: String) -> Self {
        let system_path = format!("/api/v1/storage-systems/device-type1/{}", system_id);
        Self {
            base: BaseDomainClient::new(dscc, "alletra9k"),
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

    pub async fn certificates(&self) -> DsccResult<Value> {
        self.get_json(self.path("/certificates")).await
    }

    pub async fn application_summary(&self) -> DsccResult<Value> {
        self.get_json(self.path("/application-summary")).await
    }

    pub async fn capacity_summary(&self) -> DsccResult<Value> {
        self.get_json(self.path("/capacity-summary")).await
    }

    pub async fn capacity_history(&self) -> DsccResult<Value> {
        self.get_json(self.path("/capacity-history")).await
    }

    // Storage pools

    pub async fn storage_pools(&self) -> DsccResult<Value> {
        self.get_json(self.path("/storage-pools")).await
    }

    pub async fn storage_pool(&self, pool_id: &str) -> DsccResult<Value> {
        self.get_json(self.item_path("storage-pools", pool_id, "pool_id")?)
            .await
    }

    pub async fn storage_pool_volumes(&self, pool_id: &str) -> DsccResult<Value> {
        let path = self.item_path("storage-pools", pool_id, "pool_id")?;
        self.get_json(format!("{}/volumes", path)).await
    }

    // Volumes

    /// Volumes of this system. The device-type1 volume listing rejects GET, so
    /// this uses the device-independent path.
    pub async fn volumes(&self) -> DsccResult<Value> {
        self.get_json(format!("/api/v1/storage-systems/{}/volumes", self.system_id))
            .await
    }

    /// Create volumes; `name` and `sizeMib` are required in the body
    pub async fn create_volume(&self, body: Value) -> DsccResult<Value> {
        self.post_json(self.path("/volumes"), Some(body)).await
    }

    pub async fn delete_volume(&self, volume_id: &str) -> DsccResult<Value> {
        self.delete_json(self.item_path("volumes", volume_id, "volume_id")?)
            .await
    }

    pub async fn volume(&self, volume_id: &str) -> DsccResult<Value> {
        self.get_json(self.item_path("volumes", volume_id, "volume_id")?)
            .await
    }

    /// Only the fields present in `body` are changed
    pub async fn edit_volume(&self, volume_id: &str, body: Value) -> DsccResult<Value> {
        self.put_json(self.item_path("volumes", volume_id, "volume_id")?, body)
            .await
    }

    pub async fn export_volume(&self, volume_id: &str, body: Value) -> DsccResult<Value> {
        let path = self.item_path("volumes", volume_id, "volume_id")?;
        self.post_json(format!("{}/export", path), Some(body)).await
    }

    pub async fn unexport_volume(&self, volume_id: &str, body: Value) -> DsccResult<Value> {
        let path = self.item_path("volumes", volume_id, "volume_id")?;
        self.post_json(format!("{}/un-export", path), Some(body)).await
    }

    pub async fn volume_capacity_history(&self, volume_id: &str) -> DsccResult<Value> {
        let path = self.item_path("volumes", volume_id, "volume_id")?;
        self.get_json(format!("{}/capacity-history", path)).await
    }

    pub async fn volume_performance_history(&self, volume_id: &str) -> DsccResult<Value> {
        let path = self.item_path("volumes", volume_id, "volume_id")?;
        self.get_json(format!("{}/performance-history", path)).await
    }

    pub async fn volume_performance_statistics(&self, volume_id: &str) -> DsccResult<Value> {
        let path = self.item_path("volumes", volume_id, "volume_id")?;
        self.get_json(format!("{}/performance-statistics", path)).await
    }

    pub async fn volume_sets(&self) -> DsccResult<Value> {
        self.get_json(format!("/api/v1/storage-systems/{}/volume-sets", self.system_id))
            .await
    }

    pub async fn volume_set(&self, set_id: &str) -> DsccResult<Value> {
        self.get_json(self.item_path("volume-sets", set_id, "set_id")?)
            .await
    }

    pub async fn application_sets(&self) -> DsccResult<Value> {
        self.get_json(self.path("/applicationsets")).await
    }

    pub async fn volume_snapshots(&self, volume_id: &str) -> DsccResult<Value> {
        let path = self.item_path("volumes", volume_id, "volume_id")?;
        self.get_json(format!("{}/snapshots", path)).await
    }

    /// Snapshot a volume; `namePattern` is required in the body
    pub async fn create_volume_snapshot(&self, volume_id: &str, body: Value) -> DsccResult<Value> {
        let path = self.item_path("volumes", volume_id, "volume_id")?;
        self.post_json(format!("{}/snapshots", path), Some(body)).await
    }

    // Nodes

    pub async fn nodes(&self) -> DsccResult<Value> {
        self.get_json(self.path("/nodes")).await
    }

    pub async fn node(&self, node_id: &str) -> DsccResult<Value> {
        self.get_json(self.item_path("nodes", node_id, "node_id")?).await
    }

    /// Switch the locate LED, e.g. `{"locate": true}`
    pub async fn locate_node(&self, node_id: &str, body: Value) -> DsccResult<Value> {
        self.post_json(self.item_path("nodes", node_id, "node_id")?, Some(body))
            .await
    }

    pub async fn node_performance(&self, node_id: &str) -> DsccResult<Value> {
        let path = self.item_path("nodes", node_id, "node_id")?;
        self.get_json(format!("{}/component-performance-statistics", path))
            .await
    }

    pub async fn node_components(&self, node_id: &str, component: NodeComponent) -> DsccResult<Value> {
        let path = self.item_path("nodes", node_id, "node_id")?;
        self.get_json(format!("{}/node-{}", path, component)).await
    }

    pub async fn node_component(
        &self,
        node_id: &str,
        component: NodeComponent,
        component_id: &str,
    ) -> DsccResult<Value> {
        let path = self.item_path("nodes", node_id, "node_id")?;
        let component_id = self.validate_id(component_id, "component_id")?;
        self.get_json(format!("{}/node-{}/{}", path, component, component_id))
            .await
    }

    // Enclosures

    pub async fn enclosures(&self) -> DsccResult<Value> {
        self.get_json(self.path("/enclosures")).await
    }

    pub async fn enclosure(&self, enclosure_id: &str) -> DsccResult<Value> {
        self.get_json(self.item_path("enclosures", enclosure_id, "enclosure_id")?)
            .await
    }

    pub async fn enclosure_components(
        &self,
        enclosure_id: &str,
        component: EnclosureComponent,
    ) -> DsccResult<Value> {
        let path = self.item_path("enclosures", enclosure_id, "enclosure_id")?;
        self.get_json(format!("{}/enclosure-{}", path, component)).await
    }

    // Ports

    pub async fn ports(&self) -> DsccResult<Value> {
        self.get_json(self.path("/ports")).await
    }

    pub async fn port(&self, port_id: &str) -> DsccResult<Value> {
        self.get_json(self.item_path("ports", port_id, "port_id")?).await
    }

    /// Enable or disable a port
    pub async fn change_port_status(&self, port_id: &str, body: Value) -> DsccResult<Value> {
        self.post_json(self.item_path("ports", port_id, "port_id")?, Some(body))
            .await
    }

    /// Clear the IP configuration of a port
    pub async fn clear_port(&self, port_id: &str, ip_type: IpType) -> DsccResult<Value> {
        let path = self.item_path("ports", port_id, "port_id")?;
        self.post_json(format!("{}/clear", path), Some(json!({ "ipType": ip_type })))
            .await
    }

    pub async fn edit_iscsi_port(&self, port_id: &str, body: Value) -> DsccResult<Value> {
        let path = self.item_path("ports", port_id, "port_id")?;
        self.put_json(format!("{}/edit-iscsi", path), body).await
    }

    pub async fn edit_rcip_port(&self, port_id: &str, body: Value) -> DsccResult<Value> {
        let path = self.item_path("ports", port_id, "port_id")?;
        self.put_json(format!("{}/edit-rcip", path), body).await
    }

    pub async fn edit_fc_port(&self, port_id: &str, body: Value) -> DsccResult<Value> {
        let path = self.item_path("ports", port_id, "port_id")?;
        self.put_json(format!("{}/fc", path), body).await
    }

    pub async fn initialize_port(&self, port_id: &str) -> DsccResult<Value> {
        let path = self.item_path("ports", port_id, "port_id")?;
        self.post_json(format!("{}/initialize", path), None).await
    }

    pub async fn ping_iscsi_port(&self, port_id: &str, body: Value) -> DsccResult<Value> {
        let path = self.item_path("ports", port_id, "port_id")?;
        self.post_json(format!("{}/ping-iscsi", path), Some(body)).await
    }

    pub async fn ping_rcip_port(&self, port_id: &str, body: Value) -> DsccResult<Value> {
        let path = self.item_path("ports", port_id, "port_id")?;
        self.post_json(format!("{}/ping-rcip", path), Some(body)).await
    }

    // Alert contacts

    pub async fn alert_contacts(&self) -> DsccResult<Value> {
        self.get_json(self.path("/alert-contacts")).await
    }

    /// The service registers new contacts with PUT on the collection
    pub async fn add_alert_contact(&self, body: Value) -> DsccResult<Value> {
        self.put_json(self.path("/alert-contacts"), body).await
    }

    pub async fn delete_alert_contact(&self, contact_id: &str) -> DsccResult<Value> {
        self.delete_json(self.item_path("alert-contacts", contact_id, "contact_id")?)
            .await
    }

    pub async fn edit_alert_contact(&self, contact_id: &str, body: Value) -> DsccResult<Value> {
        self.put_json(
            self.item_path("alert-contacts", contact_id, "contact_id")?,
            body,
        )
        .await
    }
}

impl_domain_client!(Alletra9kClient);
