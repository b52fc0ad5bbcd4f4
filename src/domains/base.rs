//! Base implementation for DSCC domain clients.

use crate::client::Dscc;
use crate::domains::{DomainClient, DomainOperations, ValidationOperations};
use std::sync::Arc;

/// Shared state of every domain client
pub struct BaseDomainClient {
    dscc: Arc<Dscc>,
    domain_name: String,
}

impl BaseDomainClient {
    /// Create a new base domain client
    pub fn new(dscc: Arc<Dscc>, domain_name: impl Into<String>) -> Self {
        Self {
            dscc,
            domain_name: domain_name.into(),
        }
    }
}

impl DomainClient for BaseDomainClient {
    fn domain_name(&self) -> &str {
        &self.domain_name
    }
}

impl ValidationOperations for BaseDomainClient {}

impl DomainOperations for BaseDomainClient {
    fn dscc(&self) -> &Dscc {
        &self.dscc
    }
}
