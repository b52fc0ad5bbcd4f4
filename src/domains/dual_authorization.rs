//! Dual authorization: operations that wait for a second approver.

use crate::client::Dscc;
use crate::domains::base::BaseDomainClient;
use crate::domains::{DomainOperations, ValidationOperations};
use crate::types::*;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;

/// Decision recorded on a pending operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CheckedStatus {
    Approved,
    Cancelled,
    Deleted,
}

pub struct DualAuthorizationClient {
    base: BaseDomainClient,
}

impl DualAuthorizationClient {
    pub(crate) fn new(dscc: Arc<Dscc>) -> Self {
        Self {
            base: BaseDomainClient::new(dscc, "dual-authorization"),
        }
    }

    pub async fn operations(&self) -> DsccResult<Value> {
        self.get_json("/api/v1/dual-auth-operations").await
    }

    pub async fn operation(&self, id: &str) -> DsccResult<Value> {
        let id = self.validate_id(id, "id")?;
        self.get_json(format!("/api/v1/dual-auth-operations/{}", id))
            .await
    }

    /// Approve, cancel or delete a pending operation
    pub async fn set_operation_status(&self, id: &str, status: CheckedStatus) -> DsccResult<Value> {
        let id = self.validate_id(id, "id")?;
        self.patch_json(
            format!("/api/v1/dual-auth-operations/{}", id),
            json!({ "checkedStatus": status }),
        )
        .await
    }
}

impl_domain_client!(DualAuthorizationClient);
