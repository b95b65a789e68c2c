//! Persistable record behaviour shared by every CRM model
//!
//! A record is *new* until Capsule has assigned it an id and *persisted*
//! afterwards. Saving a new record POSTs its payload to [`Record::create_path`];
//! saving a persisted one PUTs it to [`Record::update_path`].

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::fmt;

use core_kernel::payload::{collection_from_node, merge_attributes, wrap_root};
use core_kernel::PortError;

use crate::validation::Validatable;

/// A model that can be created, updated and destroyed through the API
pub trait Record: Serialize + DeserializeOwned + Validatable + Clone + Send + Sync + 'static {
    /// Typed identifier assigned by Capsule
    type Id: Copy + fmt::Display + From<u64> + Into<u64> + Send + Sync;

    /// Human readable entity name used in error messages
    const ENTITY: &'static str;

    /// JSON root key wrapping the record in requests and responses
    const ROOT: &'static str;

    fn id(&self) -> Option<Self::Id>;

    fn set_id(&mut self, id: Option<Self::Id>);

    /// The record's attributes as sent to Capsule, without the root key
    fn payload(&self) -> Value;

    /// Where a new record is POSTed
    fn create_path(&self) -> Result<String, PortError>;

    /// Where a persisted record is PUT
    fn update_path(id: Self::Id) -> String;

    /// Where a persisted record is DELETEd
    fn destroy_path(id: Self::Id) -> String {
        Self::update_path(id)
    }

    fn is_new_record(&self) -> bool {
        self.id().is_none()
    }

    fn is_persisted(&self) -> bool {
        !self.is_new_record()
    }

    /// Request body: the payload wrapped in [`Record::ROOT`]
    fn to_capsule_json(&self) -> Value {
        wrap_root(Self::ROOT, self.payload())
    }

    /// Builds a record from camelCase attributes
    fn from_attributes(attributes: &Value) -> Result<Self, PortError> {
        Ok(serde_json::from_value(attributes.clone()).map_err(core_kernel::CoreError::from)?)
    }

    /// Assigns camelCase attributes over the current values
    fn assign_attributes(&mut self, patch: &Value) -> Result<(), PortError> {
        *self = merge_attributes(self, patch)?;
        Ok(())
    }

    /// Builds records from a collection node holding an array or one object
    fn init_collection(node: &Value) -> Result<Vec<Self>, PortError> {
        Ok(collection_from_node(node)?)
    }

    /// Fails with `RecordInvalid` when any validation rule fails
    fn ensure_valid(&self) -> Result<(), PortError> {
        self.validation().into_result(Self::ENTITY)
    }

    /// The id, or `NotPersisted` naming the attempted operation
    fn persisted_id(&self, operation: &str) -> Result<Self::Id, PortError> {
        self.id()
            .ok_or_else(|| PortError::not_persisted(Self::ENTITY, operation))
    }
}
