//! Cases, spelled `kase` on the wire

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use core_kernel::payload::{compact, lenient_date, lenient_option};
use core_kernel::{CaseId, PartyId, PortError};

use crate::association::{Parent, ParentRecord};
use crate::record::Record;
use crate::validation::{Validatable, ValidationResult};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CaseStatus {
    #[default]
    Open,
    Closed,
}

/// A case opened against a party
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Case {
    #[serde(default, deserialize_with = "lenient_option", skip_serializing_if = "Option::is_none")]
    pub id: Option<CaseId>,
    #[serde(default)]
    pub status: Option<CaseStatus>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_option")]
    pub party_id: Option<PartyId>,
    /// Username of the owning user
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub close_date: Option<NaiveDate>,
    #[serde(default)]
    pub created_on: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_on: Option<DateTime<Utc>>,
}

impl Case {
    pub fn new(name: impl Into<String>, party_id: PartyId) -> Self {
        Self {
            name: Some(name.into()),
            party_id: Some(party_id),
            status: Some(CaseStatus::Open),
            ..Default::default()
        }
    }

    pub fn is_closed(&self) -> bool {
        self.status == Some(CaseStatus::Closed)
    }
}

impl Validatable for Case {
    fn validation(&self) -> ValidationResult {
        let mut result = ValidationResult::ok();
        result.require("Name", self.name.as_deref());
        result.require_present("Party", self.party_id.is_some());
        result
    }
}

impl Record for Case {
    type Id = CaseId;
    const ENTITY: &'static str = "Case";
    const ROOT: &'static str = "kase";

    fn id(&self) -> Option<CaseId> {
        self.id
    }

    fn set_id(&mut self, id: Option<CaseId>) {
        self.id = id;
    }

    fn payload(&self) -> Value {
        compact(json!({
            "status": self.status,
            "name": self.name,
            "description": self.description,
            "owner": self.owner,
            "closeDate": self.close_date.map(|date| date.to_string()),
        }))
    }

    fn create_path(&self) -> Result<String, PortError> {
        self.party_id
            .map(|party_id| format!("/api/party/{party_id}/kase"))
            .ok_or_else(|| PortError::record_invalid(Self::ENTITY, vec!["Party can't be blank".into()]))
    }

    fn update_path(id: CaseId) -> String {
        format!("/api/kase/{id}")
    }
}

impl ParentRecord for Case {
    fn as_parent(&self) -> Option<Parent> {
        self.id.map(Parent::Case)
    }
}
