//! HPE hyperconverged (HCI) systems, clusters and dashboards.

use crate::client::Dscc;
use crate::domains::base::BaseDomainClient;
use crate::domains::{DomainOperations, ValidationOperations};
use crate::types::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

/// Body for adding a hypervisor cluster to an HCI system
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddHypervisorCluster {
    pub configure_vds: bool,
    pub hypervisor_clustername: String,
    pub vsphere_datacenter_name: String,
}

impl AddHypervisorCluster {
    pub fn new(
        hypervisor_clustername: impl Into<String>,
        vsphere_datacenter_name: impl Into<String>,
        configure_vds: bool,
    ) -> Self {
        Self {
            configure_vds,
            hypervisor_clustername: hypervisor_clustername.into(),
            vsphere_datacenter_name: vsphere_datacenter_name.into(),
        }
    }
}

pub struct HciClient {
    base: BaseDomainClient,
}

impl HciClient {
    pub(crate) fn new(dscc: Arc<Dscc>) -> Self {
        Self {
            base: BaseDomainClient::new(dscc, "hci"),
        }
    }

    async fn system_resource(&self, system_id: &str, resource: &str) -> DsccResult<Value> {
        let system_id = self.validate_id(system_id, "system_id")?;
        self.get_json(format!("/hci/v1/systems/{}/{}", system_id, resource))
            .await
    }

    async fn cluster_resource(&self, cluster_id: &str, resource: &str) -> DsccResult<Value> {
        let cluster_id = self.validate_id(cluster_id, "cluster_id")?;
        self.get_json(format!("/hci-clusters/{}/{}", cluster_id, resource))
            .await
    }

    pub async fn limits(&self) -> DsccResult<Value> {
        self.get_json("/hci-limits").await
    }

    // Dashboard

    pub async fn cluster_capacity(&self) -> DsccResult<Value> {
        self.get_json("/hci/v1/dashboard/capacity/clusters").await
    }

    pub async fn vm_capacity(&self) -> DsccResult<Value> {
        self.get_json("/hci/v1/dashboard/capacity/vms").await
    }

    pub async fn vm_performance(&self) -> DsccResult<Value> {
        self.get_json("/hci/v1/dashboard/performance/vms").await
    }

    pub async fn protection(&self) -> DsccResult<Value> {
        self.get_json("/hci/v1/dashboard/protection").await
    }

    pub async fn summary(&self) -> DsccResult<Value> {
        self.get_json("/hci/v1/dashboard/summary").await
    }

    pub async fn systems_utilization(&self) -> DsccResult<Value> {
        self.get_json("/hci/v1/dashboard/utilization").await
    }

    // Systems

    pub async fn systems(&self) -> DsccResult<Value> {
        self.get_json("/hci/v1/systems").await
    }

    pub async fn system_capacity(&self, system_id: &str) -> DsccResult<Value> {
        self.system_resource(system_id, "capacity").await
    }

    pub async fn system_protection(&self, system_id: &str) -> DsccResult<Value> {
        self.system_resource(system_id, "protection").await
    }

    pub async fn system_related_info(&self, system_id: &str) -> DsccResult<Value> {
        self.system_resource(system_id, "related-info").await
    }

    pub async fn system_servers(&self, system_id: &str) -> DsccResult<Value> {
        self.system_resource(system_id, "servers").await
    }

    pub async fn system_storage_arrays(&self, system_id: &str) -> DsccResult<Value> {
        self.system_resource(system_id, "storage-arrays").await
    }

    pub async fn system_storage_pools(&self, system_id: &str) -> DsccResult<Value> {
        self.system_resource(system_id, "storage-pools").await
    }

    pub async fn system_storage_replication_partners(&self, system_id: &str) -> DsccResult<Value> {
        self.system_resource(system_id, "storage-replication-partners")
            .await
    }

    pub async fn system_health(&self, system_id: &str) -> DsccResult<Value> {
        self.system_resource(system_id, "system-health").await
    }

    // Clusters

    pub async fn servers(&self, cluster_id: &str) -> DsccResult<Value> {
        self.cluster_resource(cluster_id, "servers").await
    }

    pub async fn server(&self, cluster_id: &str, server_id: &str) -> DsccResult<Value> {
        let server_id = self.validate_id(server_id, "server_id")?;
        self.cluster_resource(cluster_id, &format!("servers/{}", server_id))
            .await
    }

    /// Top-of-rack switches of a cluster
    pub async fn tor_switches(&self, cluster_id: &str) -> DsccResult<Value> {
        self.cluster_resource(cluster_id, "switches").await
    }

    pub async fn tor_switch(&self, cluster_id: &str, switch_id: &str) -> DsccResult<Value> {
        let switch_id = self.validate_id(switch_id, "switch_id")?;
        self.cluster_resource(cluster_id, &format!("switches/{}", switch_id))
            .await
    }

    pub async fn cluster_configuration_analysis(&self, cluster_id: &str) -> DsccResult<Value> {
        let cluster_id = self.validate_id(cluster_id, "cluster_id")?;
        self.get_json(format!(
            "/api/v1/hci-clusters/{}/configuration-analysis-report",
            cluster_id
        ))
        .await
    }

    /// Start a new configuration analysis for a cluster
    pub async fn initiate_cluster_configuration_analysis(&self, cluster_id: &str) -> DsccResult<Value> {
        let cluster_id = self.validate_id(cluster_id, "cluster_id")?;
        self.post_json(
            format!("/api/v1/hci-clusters/{}/configuration-analysis-report", cluster_id),
            None,
        )
        .await
    }

    pub async fn config_analysis_reports(&self) -> DsccResult<Value> {
        self.get_json("/api/v1/hci-clusters/configuration-analysis-reports")
            .await
    }

    pub async fn config_analysis_report(&self, cluster_id: &str, report_id: &str) -> DsccResult<Value> {
        let cluster_id = self.validate_id(cluster_id, "cluster_id")?;
        let report_id = self.validate_id(report_id, "report_id")?;
        self.get_json(format!(
            "/api/v1/hci-clusters/{}/configuration-analysis-reports/{}",
            cluster_id, report_id
        ))
        .await
    }

    pub async fn clusters(&self) -> DsccResult<Value> {
        self.get_json("/hci-clusters").await
    }

    pub async fn cluster(&self, cluster_id: &str) -> DsccResult<Value> {
        let cluster_id = self.validate_id(cluster_id, "cluster_id")?;
        self.get_json(format!("/hci-clusters/{}", cluster_id)).await
    }

    /// Add a hypervisor cluster to an HCI system
    pub async fn add_cluster(&self, hci_system_id: &str, cluster: &AddHypervisorCluster) -> DsccResult<Value> {
        let hci_system_id = self.validate_id(hci_system_id, "hci_system_id")?;
        self.validate_string(cluster.hypervisor_clustername.as_str(), "hypervisor_clustername")?;
        self.validate_string(cluster.vsphere_datacenter_name.as_str(), "vsphere_datacenter_name")?;
        let body = self.to_body(cluster)?;
        self.post_json(
            format!("/hci-clusters/{}/hypervisor-clusters", hci_system_id),
            Some(body),
        )
        .await
    }
}

impl_domain_client!(HciClient);
