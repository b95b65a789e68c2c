//! Contact details attached to people and organisations
//!
//! Capsule groups addresses, email addresses, phone numbers and websites in a
//! single `contacts` object. Each list may arrive as an array or, when it
//! holds one entry, as a bare object.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

use core_kernel::payload::{compact, one_or_many};
use core_kernel::ContactId;

use crate::validation::{Validatable, ValidationResult};

/// A postal address
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ContactId>,
    /// Office, Home, Postal, Billing or Shipping
    #[serde(rename = "type")]
    pub address_type: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub country: Option<String>,
}

impl Address {
    /// Creates an address from its street and city
    pub fn new(street: impl Into<String>, city: impl Into<String>) -> Self {
        Self {
            street: Some(street.into()),
            city: Some(city.into()),
            ..Default::default()
        }
    }

    /// Formats address for display
    pub fn format(&self) -> String {
        let mut lines: Vec<String> = self.street.iter().cloned().collect();
        let city_line = [self.city.as_deref(), self.state.as_deref(), self.zip.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ");
        if !city_line.is_empty() {
            lines.push(city_line);
        }
        lines.extend(self.country.iter().cloned());
        lines.join("\n")
    }
}

/// An email address
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Email {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ContactId>,
    /// Home or Work
    #[serde(rename = "type")]
    pub email_type: Option<String>,
    #[validate(email)]
    pub email_address: Option<String>,
}

impl Email {
    pub fn new(email_type: impl Into<String>, email_address: impl Into<String>) -> Self {
        Self {
            id: None,
            email_type: Some(email_type.into()),
            email_address: Some(email_address.into()),
        }
    }
}

/// A phone number
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Phone {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ContactId>,
    /// Home, Work, Mobile, Fax or Direct
    #[serde(rename = "type")]
    pub phone_type: Option<String>,
    pub phone_number: Option<String>,
}

impl Phone {
    pub fn new(phone_type: impl Into<String>, phone_number: impl Into<String>) -> Self {
        Self {
            id: None,
            phone_type: Some(phone_type.into()),
            phone_number: Some(phone_number.into()),
        }
    }
}

/// A website or social network handle
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Website {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ContactId>,
    #[serde(rename = "type")]
    pub website_type: Option<String>,
    /// URL, SKYPE, TWITTER, LINKED_IN, FACEBOOK, XING, FEED, GOOGLE_PLUS,
    /// FLICKR, GITHUB or YOUTUBE
    pub web_service: Option<String>,
    pub web_address: Option<String>,
}

impl Website {
    pub fn new(web_service: impl Into<String>, web_address: impl Into<String>) -> Self {
        Self {
            web_service: Some(web_service.into()),
            web_address: Some(web_address.into()),
            ..Default::default()
        }
    }
}

/// Container for every kind of contact detail
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Contacts {
    #[serde(rename = "address", default, deserialize_with = "one_or_many", skip_serializing_if = "Vec::is_empty")]
    pub addresses: Vec<Address>,
    #[serde(rename = "email", default, deserialize_with = "one_or_many", skip_serializing_if = "Vec::is_empty")]
    pub emails: Vec<Email>,
    #[serde(rename = "phone", default, deserialize_with = "one_or_many", skip_serializing_if = "Vec::is_empty")]
    pub phones: Vec<Phone>,
    #[serde(rename = "website", default, deserialize_with = "one_or_many", skip_serializing_if = "Vec::is_empty")]
    pub websites: Vec<Website>,
}

impl Contacts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_address(mut self, address: Address) -> Self {
        self.addresses.push(address);
        self
    }

    pub fn with_email(mut self, email: Email) -> Self {
        self.emails.push(email);
        self
    }

    pub fn with_phone(mut self, phone: Phone) -> Self {
        self.phones.push(phone);
        self
    }

    pub fn with_website(mut self, website: Website) -> Self {
        self.websites.push(website);
        self
    }

    /// Returns true when no contact detail is present
    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
            && self.emails.is_empty()
            && self.phones.is_empty()
            && self.websites.is_empty()
    }

    /// Builds the `contacts` payload; empty lists are left out
    pub fn to_capsule_json(&self) -> Value {
        compact(serde_json::to_value(self).unwrap_or(Value::Null))
    }
}

impl Validatable for Contacts {
    fn validation(&self) -> ValidationResult {
        let mut result = ValidationResult::ok();
        for email in &self.emails {
            result.absorb(email.validate());
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_single_entries_are_accepted() {
        let contacts: Contacts = serde_json::from_value(json!({
            "address": {"type": "Office", "street": "Oranienburgerstraße", "city": "Berlin"},
            "email": [{"type": "Work", "emailAddress": "e.schmidt@google.com"}]
        }))
        .unwrap();

        assert_eq!(contacts.addresses.len(), 1);
        assert_eq!(contacts.emails.len(), 1);
        assert!(contacts.phones.is_empty());
    }

    #[test]
    fn test_payload_omits_empty_lists() {
        let contacts = Contacts::new().with_address(Address {
            street: Some("Oranienburgerstraße".into()),
            city: Some("Berlin".into()),
            state: Some("Berlin".into()),
            zip: Some("10117".into()),
            country: Some("de".into()),
            ..Default::default()
        });

        let payload = contacts.to_capsule_json();
        let address = &payload["address"][0];

        assert!(payload.get("email").is_none());
        for key in ["street", "city", "state", "zip", "country"] {
            assert!(address.get(key).is_some(), "missing {key}");
        }
    }

    #[test]
    fn test_invalid_email_is_reported() {
        let contacts = Contacts::new().with_email(Email::new("Work", "not-an-email"));
        let result = contacts.validation();

        assert!(!result.is_valid);
        assert_eq!(result.errors, vec!["Email address is invalid"]);
    }

    #[test]
    fn test_address_format() {
        let mut address = Address::new("1 Main St", "Springfield");
        address.zip = Some("12345".into());
        address.country = Some("USA".into());

        assert_eq!(address.format(), "1 Main St\nSpringfield 12345\nUSA");
    }
}
