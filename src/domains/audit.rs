//! Issues and audit events.

use crate::client::Dscc;
use crate::domains::base::BaseDomainClient;
use crate::domains::{DomainOperations, ValidationOperations};
use crate::types::*;
use serde_json::Value;
use std::sync::Arc;

pub struct AuditClient {
    base: BaseDomainClient,
}

impl AuditClient {
    pub(crate) fn new(dscc: Arc<Dscc>) -> Self {
        Self {
            base: BaseDomainClient::new(dscc, "audit"),
        }
    }

    /// Issues in state CREATED that the caller may view
    pub async fn issues(&self) -> DsccResult<Value> {
        self.get_json("/api/v1/issues").await
    }

    pub async fn issues_metadata(&self) -> DsccResult<Value> {
        self.get_json("/api/v1/issues-metadata").await
    }

    pub async fn issue(&self, id: &str) -> DsccResult<Value> {
        let id = self.validate_id(id, "id")?;
        self.get_json(format!("/api/v1/issues/{}", id)).await
    }

    pub async fn audit_events(&self) -> DsccResult<Value> {
        self.get_json("/api/v1/audit-events").await
    }

    /// Audit events narrowed with filter, sort, select and paging
    pub async fn audit_events_with(&self, params: &ListParams) -> DsccResult<Value> {
        self.get_json_with("/api/v1/audit-events", params).await
    }
}

impl_domain_client!(AuditClient);
