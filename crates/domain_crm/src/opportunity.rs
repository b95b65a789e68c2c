//! Sales opportunities
//!
//! An opportunity always belongs to a party and sits at a milestone of the
//! sales pipeline. Milestones are account-wide and listed separately; an
//! opportunity may reference one by id or by name.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use core_kernel::payload::{compact, lenient_date, lenient_option};
use core_kernel::{MilestoneId, OpportunityId, PartyId, PortError};

use crate::association::{Parent, ParentRecord};
use crate::milestone::Milestone;
use crate::record::Record;
use crate::validation::{is_blank, Validatable, ValidationResult};

/// Unit the opportunity value is charged per
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DurationBasis {
    Fixed,
    Hour,
    Day,
    Week,
    Month,
    Quarter,
    Year,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Opportunity {
    #[serde(default, deserialize_with = "lenient_option", skip_serializing_if = "Option::is_none")]
    pub id: Option<OpportunityId>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_option")]
    pub party_id: Option<PartyId>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default, deserialize_with = "lenient_option")]
    pub value: Option<Decimal>,
    #[serde(default)]
    pub duration_basis: Option<DurationBasis>,
    #[serde(default, deserialize_with = "lenient_option")]
    pub duration: Option<u32>,
    #[serde(default, deserialize_with = "lenient_option")]
    pub milestone_id: Option<MilestoneId>,
    /// Milestone name
    #[serde(default)]
    pub milestone: Option<String>,
    #[serde(default, deserialize_with = "lenient_option")]
    pub probability: Option<u8>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub expected_close_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub actual_close_date: Option<NaiveDate>,
    /// Username of the owning user
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub created_on: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_on: Option<DateTime<Utc>>,
}

impl Opportunity {
    pub fn new(name: impl Into<String>, party_id: PartyId) -> Self {
        Self {
            name: Some(name.into()),
            party_id: Some(party_id),
            ..Default::default()
        }
    }

    pub fn with_milestone(mut self, milestone: &Milestone) -> Self {
        self.milestone_id = milestone.id;
        self.milestone = milestone.name.clone();
        self
    }

    pub fn with_value(mut self, value: Decimal, currency: impl Into<String>) -> Self {
        self.value = Some(value);
        self.currency = Some(currency.into());
        self
    }

    /// Picks this opportunity's milestone from the account milestones
    ///
    /// Matches on id first, then on name.
    pub fn find_milestone<'a>(&self, milestones: &'a [Milestone]) -> Option<&'a Milestone> {
        self.milestone_id
            .and_then(|id| milestones.iter().find(|m| m.id == Some(id)))
            .or_else(|| {
                let name = self.milestone.as_deref()?;
                milestones.iter().find(|m| m.name.as_deref() == Some(name))
            })
    }

    fn has_milestone(&self) -> bool {
        self.milestone_id.is_some() || !is_blank(self.milestone.as_deref())
    }
}

impl Validatable for Opportunity {
    fn validation(&self) -> ValidationResult {
        let mut result = ValidationResult::ok();
        result.require("Name", self.name.as_deref());
        result.require_present("Party", self.party_id.is_some());
        result.require_present("Milestone", self.has_milestone());
        result
    }
}

impl Record for Opportunity {
    type Id = OpportunityId;
    const ENTITY: &'static str = "Opportunity";
    const ROOT: &'static str = "opportunity";

    fn id(&self) -> Option<OpportunityId> {
        self.id
    }

    fn set_id(&mut self, id: Option<OpportunityId>) {
        self.id = id;
    }

    fn payload(&self) -> Value {
        compact(json!({
            "name": self.name,
            "description": self.description,
            "currency": self.currency,
            "value": self.value.map(|value| value.to_string()),
            "durationBasis": self.duration_basis,
            "duration": self.duration,
            "milestoneId": self.milestone_id,
            "milestone": self.milestone,
            "probability": self.probability,
            "expectedCloseDate": self.expected_close_date.map(|date| date.to_string()),
            "actualCloseDate": self.actual_close_date.map(|date| date.to_string()),
            "owner": self.owner,
        }))
    }

    fn create_path(&self) -> Result<String, PortError> {
        self.party_id
            .map(|party_id| format!("/api/party/{party_id}/opportunity"))
            .ok_or_else(|| PortError::record_invalid(Self::ENTITY, vec!["Party can't be blank".into()]))
    }

    fn update_path(id: OpportunityId) -> String {
        format!("/api/opportunity/{id}")
    }
}

impl ParentRecord for Opportunity {
    fn as_parent(&self) -> Option<Parent> {
        self.id.map(Parent::Opportunity)
    }
}
