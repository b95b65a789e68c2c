//! Pre-built Test Fixtures
//!
//! Canned Capsule API responses and ready-made domain records. The JSON
//! bodies mirror what the service sends, including its quirks: ids as
//! strings, single-element collections sent as a bare object and empty
//! collections reduced to their attributes.

use chrono::NaiveDate;
use serde_json::{json, Value};

use core_kernel::{CaseId, MilestoneId, OpportunityId, PartyId};
use domain_crm::{
    Case, Contacts, Email, HistoryItem, Milestone, Opportunity, Organisation, Person, Task, User,
};

/// Canned response bodies keyed by the endpoint that returns them
pub struct CapsuleFixtures;

impl CapsuleFixtures {
    /// `GET /api/party/{id}` for a person
    pub fn person() -> Value {
        json!({
            "person": {
                "id": "1",
                "title": "Mr",
                "firstName": "Eric",
                "lastName": "Schmidt",
                "jobTitle": "Chairman",
                "organisationId": "2",
                "organisationName": "Google Inc",
                "about": "A comment here",
                "createdOn": "2011-09-14T15:22:01Z",
                "updatedOn": "2011-12-14T10:45:46Z",
                "contacts": {
                    "address": {
                        "id": "12",
                        "type": "Office",
                        "street": "1600 Amphitheatre Parkway",
                        "city": "Mountain View",
                        "state": "CA",
                        "zip": "94043",
                        "country": "United States"
                    },
                    "email": {
                        "id": "13",
                        "type": "Home",
                        "emailAddress": "e.schmidt@google.com"
                    },
                    "phone": [
                        { "id": "14", "type": "Mobile", "phoneNumber": "+1 888 555555" },
                        { "id": "15", "type": "Work", "phoneNumber": "+1 650 2530000" }
                    ],
                    "website": {
                        "id": "16",
                        "webService": "URL",
                        "webAddress": "www.google.com"
                    }
                },
                "pictureURL": "https://capsulecrm.com/theme/default/images/person_avatar_70.png"
            }
        })
    }

    /// `GET /api/party/{id}` for an organisation
    pub fn organisation() -> Value {
        json!({
            "organisation": {
                "id": "2",
                "name": "Google Inc",
                "about": "Search and advertising",
                "createdOn": "2011-09-14T15:22:01Z",
                "contacts": {
                    "website": {
                        "id": "20",
                        "webService": "URL",
                        "webAddress": "www.google.com"
                    }
                }
            }
        })
    }

    /// `GET /api/party`: two people and one organisation
    pub fn all_parties() -> Value {
        json!({
            "parties": {
                "@size": "3",
                "person": [
                    { "id": "1", "firstName": "Eric", "lastName": "Schmidt", "organisationId": "2" },
                    { "id": "3", "firstName": "Larry", "lastName": "Page", "organisationId": "2" }
                ],
                "organisation": { "id": "2", "name": "Google Inc" }
            }
        })
    }

    /// `GET /api/party/2/people`
    pub fn people_of_organisation() -> Value {
        json!({
            "parties": {
                "person": [
                    { "id": "1", "firstName": "Eric", "lastName": "Schmidt", "organisationId": "2" },
                    { "id": "3", "firstName": "Larry", "lastName": "Page", "organisationId": "2" }
                ]
            }
        })
    }

    /// `GET /api/opportunity/{id}`
    pub fn opportunity() -> Value {
        json!({
            "opportunity": {
                "id": "2",
                "name": "Consulting",
                "description": "Scope and design web site shopping cart",
                "partyId": "1",
                "currency": "GBP",
                "value": "500.00",
                "durationBasis": "DAY",
                "duration": "10",
                "expectedCloseDate": "2012-09-30T00:00:00Z",
                "milestoneId": "2",
                "milestone": "Bid",
                "probability": "50",
                "owner": "a.user",
                "createdOn": "2011-09-30T14:59:25Z",
                "updatedOn": "2011-09-30T14:59:25Z"
            }
        })
    }

    /// `GET /api/opportunity`
    pub fn all_opportunities() -> Value {
        json!({
            "opportunities": {
                "opportunity": [
                    { "id": "2", "name": "Consulting", "partyId": "1", "milestoneId": "2" },
                    { "id": "4", "name": "Training", "partyId": "3", "milestoneId": "1" }
                ]
            }
        })
    }

    /// `GET /api/kase/{id}`
    pub fn case() -> Value {
        json!({
            "kase": {
                "id": "5",
                "status": "OPEN",
                "name": "Consulting",
                "description": "Scope and design web site shopping cart",
                "partyId": "1",
                "owner": "a.user",
                "closeDate": "2012-12-31",
                "createdOn": "2011-04-16T13:59:36Z",
                "updatedOn": "2011-04-16T13:59:36Z"
            }
        })
    }

    /// `GET /api/kase`
    pub fn all_cases() -> Value {
        json!({
            "kases": {
                "kase": { "id": "5", "status": "OPEN", "name": "Consulting", "partyId": "1" }
            }
        })
    }

    /// `GET /api/task/{id}`
    pub fn task() -> Value {
        json!({
            "task": {
                "id": "100",
                "description": "Meet with customer",
                "detail": "Meeting at Coffee shop",
                "category": "Meeting",
                "dueDate": "2012-02-24T00:00:00Z",
                "dueDateTime": "2012-02-24T15:00:00Z",
                "owner": "a.user",
                "status": "OPEN",
                "partyId": "1",
                "partyName": "Eric Schmidt"
            }
        })
    }

    /// `GET /api/tasks`
    pub fn all_tasks() -> Value {
        json!({
            "tasks": {
                "task": [
                    { "id": "100", "description": "Meet with customer", "dueDate": "2012-02-24", "partyId": "1" },
                    { "id": "101", "description": "Send proposal", "dueDate": "2012-02-25", "opportunityId": "2" },
                    { "id": "102", "description": "Close out", "dueDate": "2012-02-26", "caseId": "5" }
                ]
            }
        })
    }

    /// `GET /api/task/categories`
    pub fn task_categories() -> Value {
        json!({
            "taskCategories": {
                "taskCategory": ["Call", "Email", "Follow-up", "Meeting"]
            }
        })
    }

    /// `GET /api/history/{id}`
    pub fn history() -> Value {
        json!({
            "historyItem": {
                "id": "100",
                "type": "Note",
                "entryDate": "2013-04-09T12:00:00Z",
                "creator": "a.user",
                "creatorName": "A User",
                "subject": "Latest update",
                "note": "Lorem ipsum dolor sit amet",
                "partyId": "1",
                "caseId": "5",
                "opportunityId": "2",
                "attachments": {
                    "attachment": {
                        "id": "200",
                        "filename": "latin.doc",
                        "contentType": "application/msword"
                    }
                },
                "participants": {
                    "participant": [
                        { "name": "Matt Beedle", "emailAddress": "mattbeedle@gmail.com", "role": "TO" },
                        { "name": "Eric Schmidt", "emailAddress": "e.schmidt@google.com", "role": "FROM" }
                    ]
                }
            }
        })
    }

    /// `GET /api/{parent}/{id}/history` with two entries
    pub fn all_history() -> Value {
        json!({
            "history": {
                "@size": "2",
                "historyItem": [
                    { "id": "100", "type": "Note", "note": "First note", "creator": "a.user" },
                    { "id": "101", "type": "Email", "subject": "Re: proposal", "note": "Second note" }
                ]
            }
        })
    }

    /// `GET /api/{parent}/{id}/history` for a record without entries
    pub fn no_history() -> Value {
        json!({ "history": { "@size": "0" } })
    }

    /// `GET /api/users`
    pub fn users() -> Value {
        json!({
            "users": {
                "user": [
                    {
                        "id": "1",
                        "username": "a.user",
                        "name": "A User",
                        "currency": "GBP",
                        "timezone": "Europe/London",
                        "loggedIn": "true",
                        "partyId": "1"
                    },
                    {
                        "id": "2",
                        "username": "j.joe",
                        "name": "Jane Joe",
                        "currency": "GBP",
                        "timezone": "Europe/London",
                        "loggedIn": "false",
                        "partyId": "3"
                    }
                ]
            }
        })
    }

    /// `GET /api/opportunity/milestones`
    pub fn milestones() -> Value {
        json!({
            "milestones": {
                "milestone": [
                    { "id": "1", "name": "New", "description": "Newly identified", "probability": "10", "complete": "false" },
                    { "id": "2", "name": "Bid", "description": "Bid submitted", "probability": "50", "complete": "false" },
                    { "id": "3", "name": "Won", "description": "Closed and won", "probability": "100", "complete": "true" }
                ]
            }
        })
    }

    /// `GET /api/tracks`
    pub fn tracks() -> Value {
        json!({
            "tracks": {
                "track": [
                    { "id": "1", "description": "Sales follow up", "captureRule": "OPPORTUNITY" },
                    { "id": "2", "description": "Support escalation", "captureRule": "KASE" }
                ]
            }
        })
    }

    /// `GET /api/{parent}/{id}/tag`
    pub fn tags() -> Value {
        json!({
            "tags": {
                "tag": [
                    { "name": "Customer" },
                    { "name": "VIP" }
                ]
            }
        })
    }
}

/// Ready-made domain records matching the canned bodies
pub struct RecordFixtures;

impl RecordFixtures {
    pub fn person() -> Person {
        Person::new("Eric", "Schmidt")
            .with_organisation_name("Google Inc")
            .with_contacts(Contacts::new().with_email(Email::new("Work", "e.schmidt@google.com")))
    }

    pub fn organisation() -> Organisation {
        Organisation::new("Google Inc")
    }

    pub fn opportunity(party_id: PartyId) -> Opportunity {
        Opportunity::new("Consulting", party_id).with_milestone(&Self::bid_milestone())
    }

    pub fn case(party_id: PartyId) -> Case {
        Case::new("Consulting", party_id)
    }

    /// A task due on the first of March 2012
    pub fn task() -> Task {
        Task::new("Meet with customer", Self::due_date()).with_category("Meeting")
    }

    pub fn note(party_id: PartyId) -> HistoryItem {
        HistoryItem::note(party_id, "Called to discuss the proposal").with_subject("Proposal")
    }

    pub fn user() -> User {
        User::new("a.user")
    }

    pub fn bid_milestone() -> Milestone {
        Milestone::new(MilestoneId::new(2), "Bid")
    }

    pub fn milestones() -> Vec<Milestone> {
        vec![
            Milestone::new(MilestoneId::new(1), "New"),
            Self::bid_milestone(),
            Milestone::new(MilestoneId::new(3), "Won"),
        ]
    }

    pub fn due_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2012, 3, 1).unwrap()
    }
}

/// Identifiers used throughout the canned bodies
pub struct IdFixtures;

impl IdFixtures {
    pub fn person_id() -> PartyId {
        PartyId::new(1)
    }

    pub fn organisation_id() -> PartyId {
        PartyId::new(2)
    }

    pub fn opportunity_id() -> OpportunityId {
        OpportunityId::new(2)
    }

    pub fn case_id() -> CaseId {
        CaseId::new(5)
    }
}
