//! Test Data Builders
//!
//! Builders for domain records with randomized but valid defaults. Tests
//! override only the fields they care about.

use chrono::{Duration, NaiveDate, Utc};
use fake::faker::company::en::CompanyName;
use fake::faker::internet::en::SafeEmail;
use fake::faker::lorem::en::Sentence;
use fake::faker::name::en::{FirstName, LastName};
use fake::Fake;

use core_kernel::PartyId;
use domain_crm::{Contacts, Email, HistoryItem, Organisation, Parent, Participant, Person, Task};

/// Builder for constructing test people
pub struct TestPersonBuilder {
    first_name: Option<String>,
    last_name: Option<String>,
    organisation_name: Option<String>,
    email: Option<String>,
    id: Option<PartyId>,
}

impl Default for TestPersonBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestPersonBuilder {
    /// Creates a new builder with a random name and email
    pub fn new() -> Self {
        Self {
            first_name: Some(FirstName().fake()),
            last_name: Some(LastName().fake()),
            organisation_name: None,
            email: Some(SafeEmail().fake()),
            id: None,
        }
    }

    pub fn with_first_name(mut self, name: Option<&str>) -> Self {
        self.first_name = name.map(str::to_string);
        self
    }

    pub fn with_last_name(mut self, name: Option<&str>) -> Self {
        self.last_name = name.map(str::to_string);
        self
    }

    pub fn with_organisation_name(mut self, name: impl Into<String>) -> Self {
        self.organisation_name = Some(name.into());
        self
    }

    pub fn with_email(mut self, email: Option<&str>) -> Self {
        self.email = email.map(str::to_string);
        self
    }

    /// Marks the person as already stored under `id`
    pub fn persisted(mut self, id: u64) -> Self {
        self.id = Some(PartyId::new(id));
        self
    }

    pub fn build(self) -> Person {
        let mut contacts = Contacts::new();
        if let Some(email) = self.email {
            contacts = contacts.with_email(Email::new("Work", email));
        }

        Person {
            id: self.id,
            first_name: self.first_name,
            last_name: self.last_name,
            organisation_name: self.organisation_name,
            contacts,
            ..Person::default()
        }
    }
}

/// Builder for constructing test organisations
pub struct TestOrganisationBuilder {
    name: Option<String>,
    id: Option<PartyId>,
}

impl Default for TestOrganisationBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestOrganisationBuilder {
    pub fn new() -> Self {
        Self {
            name: Some(CompanyName().fake()),
            id: None,
        }
    }

    pub fn with_name(mut self, name: Option<&str>) -> Self {
        self.name = name.map(str::to_string);
        self
    }

    pub fn persisted(mut self, id: u64) -> Self {
        self.id = Some(PartyId::new(id));
        self
    }

    pub fn build(self) -> Organisation {
        Organisation {
            id: self.id,
            name: self.name,
            ..Organisation::default()
        }
    }
}

/// Builder for constructing test tasks
pub struct TestTaskBuilder {
    description: Option<String>,
    due_date: Option<NaiveDate>,
    category: Option<String>,
    parent: Option<Parent>,
}

impl Default for TestTaskBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestTaskBuilder {
    /// Creates a standalone task due in a week
    pub fn new() -> Self {
        Self {
            description: Some(Sentence(2..5).fake()),
            due_date: Some((Utc::now() + Duration::days(7)).date_naive()),
            category: None,
            parent: None,
        }
    }

    pub fn with_description(mut self, description: Option<&str>) -> Self {
        self.description = description.map(str::to_string);
        self
    }

    pub fn with_due_date(mut self, due_date: Option<NaiveDate>) -> Self {
        self.due_date = due_date;
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_parent(mut self, parent: impl Into<Parent>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    pub fn build(self) -> Task {
        Task {
            description: self.description,
            due_date: self.due_date,
            category: self.category,
            parent: self.parent,
            ..Task::default()
        }
    }
}

/// Builder for constructing test history notes
pub struct TestHistoryBuilder {
    note: Option<String>,
    subject: Option<String>,
    parent: Option<Parent>,
    participants: Vec<Participant>,
}

impl TestHistoryBuilder {
    /// Creates a note attached to `parent`
    pub fn new(parent: impl Into<Parent>) -> Self {
        Self {
            note: Some(Sentence(5..12).fake()),
            subject: None,
            parent: Some(parent.into()),
            participants: Vec::new(),
        }
    }

    /// Creates a note with no parent record
    pub fn orphan() -> Self {
        Self {
            note: Some(Sentence(5..12).fake()),
            subject: None,
            parent: None,
            participants: Vec::new(),
        }
    }

    pub fn with_note(mut self, note: Option<&str>) -> Self {
        self.note = note.map(str::to_string);
        self
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Adds a participant with a random name and email
    pub fn with_random_participant(mut self) -> Self {
        let name = format!("{} {}", FirstName().fake::<String>(), LastName().fake::<String>());
        self.participants.push(Participant::new(name, SafeEmail().fake::<String>()));
        self
    }

    pub fn with_participant(mut self, participant: Participant) -> Self {
        self.participants.push(participant);
        self
    }

    pub fn build(self) -> HistoryItem {
        HistoryItem {
            note: self.note,
            subject: self.subject,
            parent: self.parent,
            participants: self.participants,
            ..HistoryItem::default()
        }
    }
}
