//! Strongly-typed identifiers for CRM records
//!
//! Capsule assigns plain integer identifiers to every record. Wrapping them in
//! newtypes keeps a `TaskId` from being passed where a `PartyId` is expected
//! when building nested URLs.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

macro_rules! define_id {
    ($name:ident, $entity:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Wraps a server-assigned identifier
            pub const fn new(value: u64) -> Self {
                Self(value)
            }

            /// Returns the raw identifier
            pub const fn get(self) -> u64 {
                self.0
            }

            /// Returns the entity name used in error messages
            pub fn entity() -> &'static str {
                $entity
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim()
                    .parse::<u64>()
                    .map(Self)
                    .map_err(|_| CoreError::invalid_identifier($entity, s))
            }
        }

        impl From<u64> for $name {
            fn from(value: u64) -> Self {
                Self(value)
            }
        }

        impl From<$name> for u64 {
            fn from(id: $name) -> u64 {
                id.0
            }
        }

        // Capsule sends ids both as numbers and as quoted strings.
        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                let raw: u64 = crate::payload::lenient(deserializer)?;
                Ok(Self(raw))
            }
        }
    };
}

// Party domain identifiers
define_id!(PartyId, "Party");
define_id!(ContactId, "Contact");

// Sales domain identifiers
define_id!(OpportunityId, "Opportunity");
define_id!(MilestoneId, "Milestone");
define_id!(CaseId, "Case");
define_id!(TrackId, "Track");

// Activity identifiers
define_id!(TaskId, "Task");
define_id!(HistoryId, "History item");
define_id!(AttachmentId, "Attachment");

// Account identifiers
define_id!(UserId, "User");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_party_id_display() {
        let id = PartyId::new(100);
        assert_eq!(id.to_string(), "100");
    }

    #[test]
    fn test_id_parsing() {
        let parsed: TaskId = " 42 ".parse().unwrap();
        assert_eq!(parsed, TaskId::new(42));
        assert!("forty-two".parse::<TaskId>().is_err());
    }

    #[test]
    fn test_deserialize_number_or_string() {
        let from_number: CaseId = serde_json::from_str("5").unwrap();
        let from_string: CaseId = serde_json::from_str("\"5\"").unwrap();
        assert_eq!(from_number, from_string);
    }
}
