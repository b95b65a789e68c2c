//! Unit tests for the Identifiers module
//!
//! Tests cover creation, parsing, conversion and the lenient JSON forms
//! Capsule uses for ids.

use core_kernel::{
    PartyId, ContactId, OpportunityId, MilestoneId, CaseId, TrackId,
    TaskId, HistoryId, AttachmentId, UserId,
};

mod party_id_tests {
    use super::*;

    #[test]
    fn test_new_and_get() {
        let id = PartyId::new(1000);
        assert_eq!(id.get(), 1000);
    }

    #[test]
    fn test_entity_name() {
        assert_eq!(PartyId::entity(), "Party");
        assert_eq!(HistoryId::entity(), "History item");
    }

    #[test]
    fn test_display_is_bare_number() {
        assert_eq!(PartyId::new(7).to_string(), "7");
    }

    #[test]
    fn test_from_str() {
        let parsed: PartyId = "100".parse().unwrap();
        assert_eq!(parsed, PartyId::new(100));
    }

    #[test]
    fn test_from_str_rejects_garbage() {
        let err = "1e5x".parse::<PartyId>().unwrap_err();
        assert!(err.to_string().contains("Party"));
    }

    #[test]
    fn test_u64_round_trip() {
        let id: PartyId = 55u64.into();
        let raw: u64 = id.into();
        assert_eq!(raw, 55);
    }
}

mod serde_tests {
    use super::*;

    #[test]
    fn test_serializes_as_number() {
        let json = serde_json::to_string(&TaskId::new(3)).unwrap();
        assert_eq!(json, "3");
    }

    #[test]
    fn test_deserializes_quoted_ids() {
        let id: OpportunityId = serde_json::from_str("\"2\"").unwrap();
        assert_eq!(id, OpportunityId::new(2));
    }

    #[test]
    fn test_rejects_negative_ids() {
        assert!(serde_json::from_str::<CaseId>("-1").is_err());
    }

    #[test]
    fn test_all_identifier_types_deserialize() {
        assert_eq!(serde_json::from_str::<ContactId>("1").unwrap().get(), 1);
        assert_eq!(serde_json::from_str::<MilestoneId>("\"2\"").unwrap().get(), 2);
        assert_eq!(serde_json::from_str::<TrackId>("3").unwrap().get(), 3);
        assert_eq!(serde_json::from_str::<HistoryId>("\"4\"").unwrap().get(), 4);
        assert_eq!(serde_json::from_str::<AttachmentId>("5").unwrap().get(), 5);
        assert_eq!(serde_json::from_str::<UserId>("\"6\"").unwrap().get(), 6);
    }

    #[test]
    fn test_ordering() {
        assert!(TaskId::new(1) < TaskId::new(2));
    }
}
