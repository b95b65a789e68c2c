//! Capsule REST adapter
//!
//! [`CapsuleAdapter`] implements every CRM port from `domain_crm` on top of a
//! [`CapsuleConnection`]. Each port lives in its own module:
//!
//! - `records`: save and destroy for any record
//! - `party`: people and organisations
//! - `sales`: opportunities, milestones and cases
//! - `activity`: tasks and history
//! - `tags`: tags on parties, opportunities and cases
//! - `account`: users and tracks
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_http::{CapsuleAdapter, CapsuleConfig};
//! use domain_crm::{PartyPort, PartyQuery};
//!
//! let adapter = CapsuleAdapter::from_config(&CapsuleConfig::from_env()?)?;
//! let parties = adapter.search_parties(&PartyQuery::search("Eric")).await?;
//! ```

mod account;
mod activity;
mod party;
mod records;
mod sales;
mod tags;

use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;

use core_kernel::payload::{extract_collection, extract_member};
use core_kernel::{DomainPort, PortError};

use crate::config::CapsuleConfig;
use crate::connection::CapsuleConnection;
use crate::error::{into_port_error, HttpError};

/// Capsule-backed implementation of the CRM ports
#[derive(Debug, Clone)]
pub struct CapsuleAdapter {
    connection: CapsuleConnection,
}

impl CapsuleAdapter {
    /// Creates a new adapter over an existing connection
    pub fn new(connection: CapsuleConnection) -> Self {
        Self { connection }
    }

    /// Creates the connection and the adapter in one step
    pub fn from_config(config: &CapsuleConfig) -> Result<Self, HttpError> {
        Ok(Self::new(CapsuleConnection::new(config)?))
    }

    /// Returns the underlying connection
    pub fn connection(&self) -> &CapsuleConnection {
        &self.connection
    }

    /// GETs a `{outer: {inner: [...]}}` listing
    async fn list<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        outer: &str,
        inner: &str,
    ) -> Result<Vec<T>, PortError> {
        let body = self.connection.get(path, query).await?;
        Ok(extract_collection(&body, outer, inner)?)
    }

    /// GETs a `{root: {...}}` record, naming it in the 404 error
    async fn member<T: DeserializeOwned>(
        &self,
        path: &str,
        root: &str,
        entity_type: &str,
        id: impl fmt::Display + Send,
    ) -> Result<T, PortError> {
        let body = self
            .connection
            .get(path, &[])
            .await
            .map_err(|e| into_port_error(e, entity_type, &id))?;
        Ok(extract_member(&body, root)?)
    }

    /// GETs a raw body, naming the record in the 404 error
    async fn raw(
        &self,
        path: &str,
        entity_type: &str,
        id: impl fmt::Display + Send,
    ) -> Result<Value, PortError> {
        self.connection
            .get(path, &[])
            .await
            .map_err(|e| into_port_error(e, entity_type, &id))
    }
}

impl DomainPort for CapsuleAdapter {}
