//! Application data management dashboard summaries.

use crate::client::Dscc;
use crate::domains::base::BaseDomainClient;
use crate::domains::DomainOperations;
use crate::types::*;
use serde_json::Value;
use std::sync::Arc;

const DASHBOARD: &str = "/app-data-management/v1/dashboard";

pub struct ApplicationDashboardClient {
    base: BaseDomainClient,
}

impl ApplicationDashboardClient {
    pub(crate) fn new(dscc: Arc<Dscc>) -> Self {
        Self {
            base: BaseDomainClient::new(dscc, "application-dashboard"),
        }
    }

    async fn summary(&self, name: &str) -> DsccResult<Value> {
        self.get_json(format!("{}/{}", DASHBOARD, name)).await
    }

    pub async fn inventory_summary(&self) -> DsccResult<Value> {
        self.summary("inventory-summary").await
    }

    pub async fn job_execution_summary(&self) -> DsccResult<Value> {
        self.summary("job-execution-status-summary").await
    }

    pub async fn protected_resources(&self) -> DsccResult<Value> {
        self.summary("protections-summary").await
    }

    pub async fn subscription_usage(&self) -> DsccResult<Value> {
        self.summary("subscription-and-usage-summary").await
    }

    pub async fn backup_capacity_usage(&self) -> DsccResult<Value> {
        self.summary("backup-capacity-usage-summary").await
    }
}

impl_domain_client!(ApplicationDashboardClient);
