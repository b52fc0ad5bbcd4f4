//! File server domain.
//!
//! DSCC publishes no file-server endpoints yet; callers use the generic
//! `DomainOperations` helpers with their own paths.

use crate::client::Dscc;
use crate::domains::base::BaseDomainClient;
use std::sync::Arc;

pub struct FileServerClient {
    base: BaseDomainClient,
}

impl FileServerClient {
    pub(crate) fn new(dscc: Arc<Dscc>) -> Self {
        Self {
            base: BaseDomainClient::new(dscc, "file-server"),
        }
    }
}

impl_domain_client!(FileServerClient);
