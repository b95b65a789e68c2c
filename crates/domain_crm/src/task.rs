//! Tasks
//!
//! A task may stand alone or belong to a party, an opportunity or a case.
//! Its parent decides the URL it is created under; updates, deletes and the
//! complete/reopen actions always go through `/api/task/{id}`.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use core_kernel::payload::{compact, lenient_date, lenient_option};
use core_kernel::{CaseId, OpportunityId, PartyId, PortError, TaskId};

use crate::association::Parent;
use crate::record::Record;
use crate::user::User;
use crate::validation::{Validatable, ValidationResult};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TaskStatus {
    #[default]
    Open,
    Completed,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "TaskRecord", into = "TaskRecord")]
pub struct Task {
    pub id: Option<TaskId>,
    pub description: Option<String>,
    pub detail: Option<String>,
    pub category: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub due_date_time: Option<DateTime<Utc>>,
    /// Username of the assigned user
    pub owner: Option<String>,
    pub status: Option<TaskStatus>,
    pub parent: Option<Parent>,
    /// Display name of the parent as reported by Capsule
    pub parent_name: Option<String>,
    /// Further parents Capsule reported alongside `parent`
    pub linked: Vec<Parent>,
}

impl Task {
    pub fn new(description: impl Into<String>, due_date: NaiveDate) -> Self {
        Self {
            description: Some(description.into()),
            due_date: Some(due_date),
            ..Default::default()
        }
    }

    pub fn with_parent(mut self, parent: impl Into<Parent>) -> Self {
        self.parent = Some(parent.into());
        self.linked.clear();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Assigns the task to `user`; `None` clears the owner
    pub fn set_owner(&mut self, user: Option<&User>) {
        self.owner = user.and_then(|user| user.username.clone());
    }

    /// `parent` followed by the linked parents
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

    pub fn is_completed(&self) -> bool {
        self.status == Some(TaskStatus::Completed)
    }
}

impl Validatable for Task {
    fn validation(&self) -> ValidationResult {
        let mut result = ValidationResult::ok();
        result.require("Description", self.description.as_deref());
        if self.due_date.is_none() && self.due_date_time.is_none() {
            result.add_error("Due date can't be blank");
            result.add_error("Due date time can't be blank");
        }
        result
    }
}

impl Record for Task {
    type Id = TaskId;
    const ENTITY: &'static str = "Task";
    const ROOT: &'static str = "task";

    fn id(&self) -> Option<TaskId> {
        self.id
    }

    fn set_id(&mut self, id: Option<TaskId>) {
        self.id = id;
    }

    fn payload(&self) -> Value {
        compact(json!({
            "description": self.description,
            "detail": self.detail,
            "category": self.category,
            "dueDate": self.due_date.map(|date| date.to_string()),
            "dueDateTime": self
                .due_date_time
                .map(|at| at.to_rfc3339_opts(SecondsFormat::Secs, true)),
            "owner": self.owner,
        }))
    }

    fn create_path(&self) -> Result<String, PortError> {
        Ok(match self.parent {
            Some(parent) => parent.nested_path("task"),
            None => "/api/task".to_string(),
        })
    }

    fn update_path(id: TaskId) -> String {
        format!("/api/task/{id}")
    }
}

/// Task as Capsule sends it, with one optional id per parent kind
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TaskRecord {
    #[serde(default, deserialize_with = "lenient_option", skip_serializing_if = "Option::is_none")]
    id: Option<TaskId>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    detail: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default, deserialize_with = "lenient_date")]
    due_date: Option<NaiveDate>,
    #[serde(default)]
    due_date_time: Option<DateTime<Utc>>,
    #[serde(default)]
    owner: Option<String>,
    #[serde(default)]
    status: Option<TaskStatus>,
    #[serde(default, deserialize_with = "lenient_option", skip_serializing_if = "Option::is_none")]
    party_id: Option<PartyId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    party_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_option", skip_serializing_if = "Option::is_none")]
    opportunity_id: Option<OpportunityId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    opportunity_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_option", skip_serializing_if = "Option::is_none")]
    case_id: Option<CaseId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    case_name: Option<String>,
}

impl From<TaskRecord> for Task {
    fn from(record: TaskRecord) -> Self {
        let mut linked = Parent::all_from_ids(record.party_id, record.opportunity_id, record.case_id);
        let parent = (!linked.is_empty()).then(|| linked.remove(0));
        let parent_name = match parent {
            Some(Parent::Party(_)) => record.party_name,
            Some(Parent::Opportunity(_)) => record.opportunity_name,
            Some(Parent::Case(_)) => record.case_name,
            None => None,
        };

        Self {
            id: record.id,
            description: record.description,
            detail: record.detail,
            category: record.category,
            due_date: record.due_date,
            due_date_time: record.due_date_time,
            owner: record.owner,
            status: record.status,
            parent,
            parent_name,
            linked,
        }
    }
}

impl From<Task> for TaskRecord {
    fn from(task: Task) -> Self {
        let mut record = TaskRecord {
            id: task.id,
            description: task.description,
            detail: task.detail,
            category: task.category,
            due_date: task.due_date,
            due_date_time: task.due_date_time,
            owner: task.owner,
            status: task.status,
            ..Default::default()
        };
        match task.parent {
            Some(Parent::Party(id)) => {
                record.party_id = Some(id);
                record.party_name = task.parent_name;
            }
            Some(Parent::Opportunity(id)) => {
                record.opportunity_id = Some(id);
                record.opportunity_name = task.parent_name;
            }
            Some(Parent::Case(id)) => {
                record.case_id = Some(id);
                record.case_name = task.parent_name;
            }
            None => {}
        }
        for parent in task.linked {
            match parent {
                Parent::Party(id) => {
                    record.party_id.get_or_insert(id);
                }
                Parent::Opportunity(id) => {
                    record.opportunity_id.get_or_insert(id);
                }
                Parent::Case(id) => {
                    record.case_id.get_or_insert(id);
                }
            }
        }
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn due() -> NaiveDate {
        NaiveDate::from_ymd_opt(2012, 2, 24).unwrap()
    }

    #[test]
    fn test_validation() {
        let result = Task::default().validation();
        assert_eq!(
            result.errors,
            vec![
                "Description can't be blank",
                "Due date can't be blank",
                "Due date time can't be blank"
            ]
        );

        let task = Task {
            description: Some("Call".into()),
            due_date_time: Some(Utc::now()),
            ..Default::default()
        };
        assert!(task.is_valid());
    }

    #[test]
    fn test_create_path_follows_parent() {
        let task = Task::new("Call", due());
        assert_eq!(task.create_path().unwrap(), "/api/task");

        let task = Task::new("Call", due()).with_parent(PartyId::new(1));
        assert_eq!(task.create_path().unwrap(), "/api/party/1/task");

        let task = Task::new("Call", due()).with_parent(OpportunityId::new(2));
        assert_eq!(task.create_path().unwrap(), "/api/opportunity/2/task");

        let task = Task::new("Call", due()).with_parent(CaseId::new(5));
        assert_eq!(task.create_path().unwrap(), "/api/kase/5/task");
    }

    #[test]
    fn test_parent_read_from_flat_ids() {
        let task: Task = serde_json::from_value(json!({
            "id": "100",
            "description": "Meet with customer",
            "dueDateTime": "2012-02-24T06:00:00Z",
            "status": "OPEN",
            "caseId": "5",
            "caseName": "Order #1"
        }))
        .unwrap();

        assert_eq!(task.parent, Some(Parent::Case(CaseId::new(5))));
        assert_eq!(task.parent_name.as_deref(), Some("Order #1"));
        assert_eq!(task.case_id(), Some(CaseId::new(5)));
        assert!(task.party_id().is_none());

        let wire = serde_json::to_value(&task).unwrap();
        assert_eq!(wire["caseId"], 5);
        assert!(wire.get("partyId").is_none());
    }

    #[test]
    fn test_every_parent_id_is_kept() {
        let task: Task = serde_json::from_value(json!({
            "id": "9",
            "description": "Send quote",
            "dueDate": "2012-02-24",
            "partyId": "3",
            "partyName": "Eric Schmidt",
            "opportunityId": "7"
        }))
        .unwrap();

        assert_eq!(task.parent, Some(Parent::Party(PartyId::new(3))));
        assert_eq!(task.parent_name.as_deref(), Some("Eric Schmidt"));
        assert!(task.belongs_to(Parent::Opportunity(OpportunityId::new(7))));
        assert!(task.belongs_to(Parent::Party(PartyId::new(3))));
        assert!(!task.belongs_to(Parent::Case(CaseId::new(7))));
        assert_eq!(task.opportunity_id(), Some(OpportunityId::new(7)));

        let wire = serde_json::to_value(&task).unwrap();
        assert_eq!(wire["partyId"], 3);
        assert_eq!(wire["opportunityId"], 7);

        let moved = task.with_parent(CaseId::new(5));
        assert!(!moved.belongs_to(Parent::Opportunity(OpportunityId::new(7))));
    }

    #[test]
    fn test_payload_leaves_out_parent() {
        let task = Task::new("Call", due()).with_parent(PartyId::new(1));
        let payload = &task.to_capsule_json()["task"];

        assert_eq!(payload["description"], "Call");
        assert_eq!(payload["dueDate"], "2012-02-24");
        assert!(payload.get("partyId").is_none());
    }

    #[test]
    fn test_set_owner() {
        let mut task = Task::new("Call", due());
        task.set_owner(Some(&User::new("a.user")));
        assert_eq!(task.owner.as_deref(), Some("a.user"));

        task.set_owner(None);
        assert!(task.owner.is_none());
    }
}
