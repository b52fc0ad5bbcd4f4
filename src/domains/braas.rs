//! Backup and recovery reports.

use crate::client::Dscc;
use crate::domains::base::BaseDomainClient;
use crate::domains::DomainOperations;
use crate::types::*;
use serde_json::Value;
use std::sync::Arc;

pub struct BraasClient {
    base: BaseDomainClient,
}

impl BraasClient {
    pub(crate) fn new(dscc: Arc<Dscc>) -> Self {
        Self {
            base: BaseDomainClient::new(dscc, "braas"),
        }
    }

    pub async fn protection_jobs_report(&self) -> DsccResult<Value> {
        self.get_json("/api/v1/backup-recovery-reports/protection-jobs")
            .await
    }

    pub async fn protection_status(&self) -> DsccResult<Value> {
        self.get_json("/api/v1/backup-recovery-reports/protection-status")
            .await
    }
}

impl_domain_client!(BraasClient);
