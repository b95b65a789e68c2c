//! People and organisations
//!
//! Capsule calls both kinds of contact record a *party*. They share the
//! `/api/party` listing and delete endpoints but are created and updated
//! through their own paths.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use core_kernel::payload::{compact, lenient_option};
use core_kernel::{PartyId, PortError};

use crate::association::{Parent, ParentRecord};
use crate::contacts::Contacts;
use crate::record::Record;
use crate::validation::{is_blank, Validatable, ValidationResult};

/// A person, optionally working for an organisation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    #[serde(default, deserialize_with = "lenient_option", skip_serializing_if = "Option::is_none")]
    pub id: Option<PartyId>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default)]
    pub about: Option<String>,
    #[serde(default, deserialize_with = "lenient_option")]
    pub organisation_id: Option<PartyId>,
    #[serde(default)]
    pub organisation_name: Option<String>,
    #[serde(default)]
    pub contacts: Contacts,
    #[serde(rename = "pictureURL", default)]
    pub picture_url: Option<String>,
    #[serde(default)]
    pub created_on: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_on: Option<DateTime<Utc>>,
}

impl Person {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: Some(first_name.into()),
            last_name: Some(last_name.into()),
            ..Default::default()
        }
    }

    pub fn with_organisation_name(mut self, name: impl Into<String>) -> Self {
        self.organisation_name = Some(name.into());
        self
    }

    pub fn with_contacts(mut self, contacts: Contacts) -> Self {
        self.contacts = contacts;
        self
    }

    /// First and last name joined by a space, skipping blanks
    pub fn full_name(&self) -> String {
        [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .filter(|part| !part.trim().is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Validatable for Person {
    fn validation(&self) -> ValidationResult {
        let mut result = ValidationResult::ok();
        if is_blank(self.last_name.as_deref()) {
            result.require("First name", self.first_name.as_deref());
        }
        if is_blank(self.first_name.as_deref()) {
            result.require("Last name", self.last_name.as_deref());
        }
        result.merge(self.contacts.validation());
        result
    }
}

impl Record for Person {
    type Id = PartyId;
    const ENTITY: &'static str = "Person";
    const ROOT: &'static str = "person";

    fn id(&self) -> Option<PartyId> {
        self.id
    }

    fn set_id(&mut self, id: Option<PartyId>) {
        self.id = id;
    }

    fn payload(&self) -> Value {
        compact(json!({
            "title": self.title,
            "firstName": self.first_name,
            "lastName": self.last_name,
            "jobTitle": self.job_title,
            "about": self.about,
            "organisationName": self.organisation_name,
            "contacts": self.contacts.to_capsule_json(),
        }))
    }

    fn create_path(&self) -> Result<String, PortError> {
        Ok("/api/person".to_string())
    }

    fn update_path(id: PartyId) -> String {
        format!("/api/person/{id}")
    }

    fn destroy_path(id: PartyId) -> String {
        format!("/api/party/{id}")
    }
}

impl ParentRecord for Person {
    fn as_parent(&self) -> Option<Parent> {
        self.id.map(Parent::Party)
    }
}

/// A company or other organisation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organisation {
    #[serde(default, deserialize_with = "lenient_option", skip_serializing_if = "Option::is_none")]
    pub id: Option<PartyId>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub about: Option<String>,
    #[serde(default)]
    pub contacts: Contacts,
    #[serde(rename = "pictureURL", default)]
    pub picture_url: Option<String>,
    #[serde(default)]
    pub created_on: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_on: Option<DateTime<Utc>>,
}

impl Organisation {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn with_contacts(mut self, contacts: Contacts) -> Self {
        self.contacts = contacts;
        self
    }
}

impl Validatable for Organisation {
    fn validation(&self) -> ValidationResult {
        let mut result = ValidationResult::ok();
        result.require("Name", self.name.as_deref());
        result.merge(self.contacts.validation());
        result
    }
}

impl Record for Organisation {
    type Id = PartyId;
    const ENTITY: &'static str = "Organisation";
    const ROOT: &'static str = "organisation";

    fn id(&self) -> Option<PartyId> {
        self.id
    }

    fn set_id(&mut self, id: Option<PartyId>) {
        self.id = id;
    }

    fn payload(&self) -> Value {
        compact(json!({
            "name": self.name,
            "about": self.about,
            "contacts": self.contacts.to_capsule_json(),
        }))
    }

    fn create_path(&self) -> Result<String, PortError> {
        Ok("/api/organisation".to_string())
    }

    fn update_path(id: PartyId) -> String {
        format!("/api/organisation/{id}")
    }

    fn destroy_path(id: PartyId) -> String {
        format!("/api/party/{id}")
    }
}

impl ParentRecord for Organisation {
    fn as_parent(&self) -> Option<Parent> {
        self.id.map(Parent::Party)
    }
}

/// Either kind of party, as returned by `/api/party/{id}`
///
/// Serialized with its kind as the root key, e.g. `{"person": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Party {
    Person(Person),
    Organisation(Organisation),
}

impl Party {
    pub fn id(&self) -> Option<PartyId> {
        match self {
            Party::Person(person) => person.id,
            Party::Organisation(organisation) => organisation.id,
        }
    }

    /// Display name: full name for people, name for organisations
    pub fn name(&self) -> String {
        match self {
            Party::Person(person) => person.full_name(),
            Party::Organisation(organisation) => organisation.name.clone().unwrap_or_default(),
        }
    }

    pub fn contacts(&self) -> &Contacts {
        match self {
            Party::Person(person) => &person.contacts,
            Party::Organisation(organisation) => &organisation.contacts,
        }
    }

    pub fn is_person(&self) -> bool {
        matches!(self, Party::Person(_))
    }

    pub fn is_organisation(&self) -> bool {
        matches!(self, Party::Organisation(_))
    }

    pub fn as_person(&self) -> Option<&Person> {
        match self {
            Party::Person(person) => Some(person),
            Party::Organisation(_) => None,
        }
    }

    pub fn as_organisation(&self) -> Option<&Organisation> {
        match self {
            Party::Organisation(organisation) => Some(organisation),
            Party::Person(_) => None,
        }
    }

    pub fn into_person(self) -> Option<Person> {
        match self {
            Party::Person(person) => Some(person),
            Party::Organisation(_) => None,
        }
    }

    pub fn into_organisation(self) -> Option<Organisation> {
        match self {
            Party::Organisation(organisation) => Some(organisation),
            Party::Person(_) => None,
        }
    }
}

impl From<Person> for Party {
    fn from(person: Person) -> Self {
        Party::Person(person)
    }
}

impl From<Organisation> for Party {
    fn from(organisation: Organisation) -> Self {
        Party::Organisation(organisation)
    }
}

impl ParentRecord for Party {
    fn as_parent(&self) -> Option<Parent> {
        self.id().map(Parent::Party)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contacts::Address;

    #[test]
    fn test_person_requires_a_name() {
        let person = Person::default();
        let result = person.validation();

        assert!(!result.is_valid);
        assert_eq!(result.errors, vec!["First name can't be blank", "Last name can't be blank"]);

        let person = Person {
            first_name: Some("Eric".into()),
            ..Default::default()
        };
        assert!(person.is_valid());

        let person = Person {
            last_name: Some("Schmidt".into()),
            ..Default::default()
        };
        assert!(person.is_valid());
    }

    #[test]
    fn test_person_payload() {
        let person = Person::new("Eric", "Schmidt")
            .with_organisation_name("Google")
            .with_contacts(Contacts::new().with_address(Address::new("Oranienburgerstraße", "Berlin")));

        let json = person.to_capsule_json();
        let payload = &json["person"];

        assert_eq!(payload["firstName"], "Eric");
        assert_eq!(payload["lastName"], "Schmidt");
        assert_eq!(payload["organisationName"], "Google");
        assert_eq!(payload["contacts"]["address"][0]["city"], "Berlin");
        assert!(payload.get("title").is_none());
        assert!(payload.get("id").is_none());
    }

    #[test]
    fn test_person_paths() {
        let id = PartyId::new(100);
        assert_eq!(Person::default().create_path().unwrap(), "/api/person");
        assert_eq!(Person::update_path(id), "/api/person/100");
        assert_eq!(Person::destroy_path(id), "/api/party/100");
    }

    #[test]
    fn test_organisation_requires_name() {
        assert!(!Organisation::default().is_valid());
        assert!(Organisation::new("Google Inc").is_valid());
    }

    #[test]
    fn test_party_tagged_by_kind() {
        let party: Party = serde_json::from_value(json!({
            "organisation": {"id": "50", "name": "Google Inc"}
        }))
        .unwrap();

        assert!(party.is_organisation());
        assert_eq!(party.id(), Some(PartyId::new(50)));
        assert_eq!(party.name(), "Google Inc");
        assert_eq!(party.as_parent(), Some(Parent::Party(PartyId::new(50))));
    }

    #[test]
    fn test_new_person_is_not_a_parent() {
        assert_eq!(Person::new("Eric", "Schmidt").as_parent(), None);
    }

    #[test]
    fn test_assign_attributes() {
        let mut person = Person::default();
        person
            .assign_attributes(&json!({"firstName": "Matt", "lastName": "Beedle"}))
            .unwrap();

        assert_eq!(person.first_name.as_deref(), Some("Matt"));
        assert_eq!(person.last_name.as_deref(), Some("Beedle"));
        assert!(person.is_new_record());
    }

    #[test]
    fn test_assign_snake_case_attributes() {
        let mut person = Person::new("Eric", "Schmidt");
        person
            .assign_attributes(&json!({"first_name": "James", "job_title": "Chairman"}))
            .unwrap();

        assert_eq!(person.first_name.as_deref(), Some("James"));
        assert_eq!(person.job_title.as_deref(), Some("Chairman"));
    }

    #[test]
    fn test_assign_unknown_attribute_fails() {
        let mut person = Person::new("Eric", "Schmidt");
        let error = person.assign_attributes(&json!({"shoe_size": 44})).unwrap_err();

        assert!(error.to_string().contains("shoeSize"));
        assert_eq!(person.first_name.as_deref(), Some("Eric"));
    }
}
