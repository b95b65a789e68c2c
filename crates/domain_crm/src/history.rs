//! History items: notes, emails and other logged interactions
//!
//! Every history item belongs to exactly one party, case or opportunity.
//! New items are POSTed under their parent (`/api/{segment}/{id}/history`);
//! existing ones are updated and deleted through `/api/history/{id}`.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use core_kernel::payload::{lenient_option, unwrap_collection, wrap_root};
use core_kernel::{CaseId, HistoryId, OpportunityId, PartyId, PortError};

use crate::association::Parent;
use crate::attachment::Attachment;
use crate::participant::Participant;
use crate::record::Record;
use crate::user::User;
use crate::validation::{Validatable, ValidationResult};

/// Message reported when a history item has no parent
pub const MISSING_PARENT: &str = "History item must belong to a party, case or opportunity";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "HistoryRecord", into = "HistoryRecord")]
pub struct HistoryItem {
    pub id: Option<HistoryId>,
    /// Note, Email and so on
    pub history_type: Option<String>,
    /// Username of the user who logged the item
    pub creator: Option<String>,
    pub creator_name: Option<String>,
    pub entry_date: Option<DateTime<Utc>>,
    pub subject: Option<String>,
    pub note: Option<String>,
    pub attachments: Vec<Attachment>,
    pub participants: Vec<Participant>,
    pub parent: Option<Parent>,
    /// Further parents Capsule reported alongside `parent`
    pub linked: Vec<Parent>,
}

impl HistoryItem {
    pub fn note(parent: impl Into<Parent>, note: impl Into<String>) -> Self {
        Self {
            note: Some(note.into()),
            parent: Some(parent.into()),
            ..Default::default()
        }
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn with_participant(mut self, participant: Participant) -> Self {
        self.participants.push(participant);
        self
    }

    /// Records `user` as the creator; `None` clears it
    pub fn set_creator(&mut self, user: Option<&User>) {
        self.creator = user.and_then(|user| user.username.clone());
        self.creator_name = user.and_then(|user| user.name.clone());
    }

    pub fn parents(&self) -> impl Iterator<Item = Parent> + '_ {
        self.parent.into_iter().chain(self.linked.iter().copied())
    }

    pub fn party_id(&self) -> Option<PartyId> {
        self.parents().find_map(|parent| parent.party_id())
    }

    pub fn opportunity_id(&self) -> Option<OpportunityId> {
        self.parents().find_map(|parent| parent.opportunity_id())
    }

    pub fn case_id(&self) -> Option<CaseId> {
        self.parents().find_map(|parent| parent.case_id())
    }

    pub fn belongs_to(&self, parent: Parent) -> bool {
        self.parents().any(|candidate| candidate == parent)
    }
}

impl Validatable for HistoryItem {
    fn validation(&self) -> ValidationResult {
        let mut result = ValidationResult::ok();
        result.require("Note", self.note.as_deref());
        if self.parent.is_none() {
            result.add_error(MISSING_PARENT);
        }
        for participant in &self.participants {
            result.merge(participant.validation());
        }
        result
    }
}

impl Record for HistoryItem {
    type Id = HistoryId;
    const ENTITY: &'static str = "History item";
    const ROOT: &'static str = "historyItem";

    fn id(&self) -> Option<HistoryId> {
        self.id
    }

    fn set_id(&mut self, id: Option<HistoryId>) {
        self.id = id;
    }

    // `note` is always sent, even when empty.
    fn payload(&self) -> Value {
        let mut payload = json!({ "note": self.note.clone().unwrap_or_default() });
        let optional = [
            ("entryDate", self.entry_date.map(|at| at.to_rfc3339_opts(SecondsFormat::Secs, true))),
            ("creator", self.creator.clone()),
            ("subject", self.subject.clone()),
        ];
        for (key, value) in optional {
            if let Some(value) = value.filter(|v| !v.is_empty()) {
                payload[key] = Value::String(value);
            }
        }
        if !self.participants.is_empty() {
            payload["participants"] = wrap_root("participant", json!(self.participants));
        }
        payload
    }

    fn create_path(&self) -> Result<String, PortError> {
        self.parent
            .map(|parent| parent.nested_path("history"))
            .ok_or_else(|| PortError::record_invalid(Self::ENTITY, vec![MISSING_PARENT.into()]))
    }

    fn update_path(id: HistoryId) -> String {
        format!("/api/history/{id}")
    }
}

/// History item as Capsule sends it
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HistoryRecord {
    #[serde(default, deserialize_with = "lenient_option", skip_serializing_if = "Option::is_none")]
    id: Option<HistoryId>,
    #[serde(rename = "type", default)]
    history_type: Option<String>,
    #[serde(default)]
    creator: Option<String>,
    #[serde(default)]
    creator_name: Option<String>,
    #[serde(default)]
    entry_date: Option<DateTime<Utc>>,
    #[serde(default)]
    subject: Option<String>,
    #[serde(default)]
    note: Option<String>,
    #[serde(default, deserialize_with = "attachments", serialize_with = "wrapped_attachments")]
    attachments: Vec<Attachment>,
    #[serde(default, deserialize_with = "participants", serialize_with = "wrapped_participants")]
    participants: Vec<Participant>,
    #[serde(default, deserialize_with = "lenient_option", skip_serializing_if = "Option::is_none")]
    party_id: Option<PartyId>,
    #[serde(default, deserialize_with = "lenient_option", skip_serializing_if = "Option::is_none")]
    opportunity_id: Option<OpportunityId>,
    #[serde(default, deserialize_with = "lenient_option", skip_serializing_if = "Option::is_none")]
    case_id: Option<CaseId>,
}

fn attachments<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Attachment>, D::Error> {
    let node = Value::deserialize(deserializer)?;
    unwrap_collection(&node, "attachment").map_err(de::Error::custom)
}

fn participants<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Participant>, D::Error> {
    let node = Value::deserialize(deserializer)?;
    unwrap_collection(&node, "participant").map_err(de::Error::custom)
}

fn wrapped_attachments<S: Serializer>(items: &[Attachment], serializer: S) -> Result<S::Ok, S::Error> {
    wrap_root("attachment", json!(items)).serialize(serializer)
}

fn wrapped_participants<S: Serializer>(items: &[Participant], serializer: S) -> Result<S::Ok, S::Error> {
    wrap_root("participant", json!(items)).serialize(serializer)
}

impl From<HistoryRecord> for HistoryItem {
    fn from(record: HistoryRecord) -> Self {
        let mut linked = Parent::all_from_ids(record.party_id, record.opportunity_id, record.case_id);
        let parent = (!linked.is_empty()).then(|| linked.remove(0));
        Self {
            id: record.id,
            history_type: record.history_type,
            creator: record.creator,
            creator_name: record.creator_name,
            entry_date: record.entry_date,
            subject: record.subject,
            note: record.note,
            attachments: record.attachments,
            participants: record.participants,
            parent,
            linked,
        }
    }
}

impl From<HistoryItem> for HistoryRecord {
    fn from(item: HistoryItem) -> Self {
        let (party_id, opportunity_id, case_id) = (item.party_id(), item.opportunity_id(), item.case_id());
        HistoryRecord {
            id: item.id,
            history_type: item.history_type,
            creator: item.creator,
            creator_name: item.creator_name,
            entry_date: item.entry_date,
            subject: item.subject,
            note: item.note,
            attachments: item.attachments,
            participants: item.participants,
            party_id,
            opportunity_id,
            case_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation() {
        let result = HistoryItem::default().validation();
        assert_eq!(result.errors, vec!["Note can't be blank", MISSING_PARENT]);

        assert!(HistoryItem::note(PartyId::new(1), "Called").is_valid());
    }

    #[test]
    fn test_nested_collections() {
        let item: HistoryItem = serde_json::from_value(json!({
            "id": "100",
            "type": "Note",
            "creator": "a.user",
            "entryDate": "2013-03-31T09:32:00Z",
            "note": "Called about the order",
            "partyId": "1",
            "attachments": {"attachment": {"id": "7", "filename": "latin.doc", "contentType": "application/msword"}},
            "participants": {"participant": [{"name": "Matt Beedle", "emailAddress": "matt@example.com", "role": "TO"}]}
        }))
        .unwrap();

        assert_eq!(item.attachments[0].filename.as_deref(), Some("latin.doc"));
        assert_eq!(item.participants[0].name.as_deref(), Some("Matt Beedle"));
        assert_eq!(item.parent, Some(Parent::Party(PartyId::new(1))));
    }

    #[test]
    fn test_every_parent_id_is_kept() {
        let item: HistoryItem =
            serde_json::from_value(json!({"id": "4", "note": "Quoted", "partyId": "3", "caseId": "5"})).unwrap();

        assert_eq!(item.parent, Some(Parent::Party(PartyId::new(3))));
        assert!(item.belongs_to(Parent::Case(CaseId::new(5))));
        assert_eq!(item.case_id(), Some(CaseId::new(5)));

        let wire = serde_json::to_value(&item).unwrap();
        assert_eq!(wire["partyId"], 3);
        assert_eq!(wire["caseId"], 5);
    }

    #[test]
    fn test_missing_collections_are_empty() {
        let item: HistoryItem = serde_json::from_value(json!({"id": 3, "note": "x", "kaseId": null})).unwrap();
        assert!(item.attachments.is_empty());
        assert!(item.participants.is_empty());
        assert!(item.parent.is_none());
    }

    #[test]
    fn test_payload() {
        let mut item = HistoryItem::note(CaseId::new(5), "Called")
            .with_subject("Order")
            .with_participant(Participant::new("Matt", "matt@example.com").with_role("TO"));
        item.set_creator(Some(&User::new("a.user")));

        let json = item.to_capsule_json();
        let payload = &json["historyItem"];
        assert_eq!(payload["note"], "Called");
        assert_eq!(payload["creator"], "a.user");
        assert_eq!(payload["participants"]["participant"][0]["role"], "TO");
        assert!(payload.get("caseId").is_none());
    }

    #[test]
    fn test_note_always_sent() {
        let json = HistoryItem::default().to_capsule_json();
        assert!(json["historyItem"].get("note").is_some());
    }

    #[test]
    fn test_create_path() {
        let item = HistoryItem::note(OpportunityId::new(2), "Called");
        assert_eq!(item.create_path().unwrap(), "/api/opportunity/2/history");
        assert!(HistoryItem::default().create_path().is_err());
    }

    #[test]
    fn test_attributes_round_trip_through_wire_form() {
        let mut item = HistoryItem::note(PartyId::new(1), "Called");
        item.id = Some(HistoryId::new(2));
        item.assign_attributes(&json!({"note": "changed note text"})).unwrap();

        assert_eq!(item.note.as_deref(), Some("changed note text"));
        assert_eq!(item.party_id(), Some(PartyId::new(1)));
        assert_eq!(item.id, Some(HistoryId::new(2)));
    }
}
