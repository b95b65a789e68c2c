//! Tests for the payload helpers

use core_kernel::payload::{
    collection_from_node, extract_collection, extract_member, id_from_location,
    merge_attributes, unwrap_collection, wrap_root,
};
use core_kernel::{CoreError, PartyId};
use proptest::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Tag {
    name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Contact {
    id: Option<PartyId>,
    first_name: Option<String>,
    last_name: Option<String>,
}

mod collection_tests {
    use super::*;

    #[test]
    fn test_extract_collection_array() {
        let body = json!({"tags": {"tag": [{"name": "Customer"}, {"name": "VIP"}]}});
        let tags: Vec<Tag> = extract_collection(&body, "tags", "tag").unwrap();

        assert_eq!(tags.len(), 2);
        assert_eq!(tags[0].name, "Customer");
        assert_eq!(tags[1].name, "VIP");
    }

    #[test]
    fn test_extract_collection_single_object() {
        let body = json!({"tags": {"tag": {"name": "Customer"}}});
        let tags: Vec<Tag> = extract_collection(&body, "tags", "tag").unwrap();

        assert_eq!(tags, vec![Tag { name: "Customer".into() }]);
    }

    #[test]
    fn test_extract_collection_missing_inner_key_is_empty() {
        let body = json!({"history": {"@size": "0"}});
        let items: Vec<Tag> = extract_collection(&body, "history", "historyItem").unwrap();

        assert!(items.is_empty());
    }

    #[test]
    fn test_collection_from_node_strings() {
        let node = json!(["Call", "Email", "Follow-up"]);
        let categories: Vec<String> = collection_from_node(&node).unwrap();

        assert_eq!(categories, vec!["Call", "Email", "Follow-up"]);
    }

    #[test]
    fn test_unwrap_collection_wrapped_and_bare() {
        let wrapped = json!({"tag": [{"name": "A"}]});
        let bare = json!([{"name": "A"}]);
        let empty = json!({});

        assert_eq!(unwrap_collection::<Tag>(&wrapped, "tag").unwrap().len(), 1);
        assert_eq!(unwrap_collection::<Tag>(&bare, "tag").unwrap().len(), 1);
        assert!(unwrap_collection::<Tag>(&empty, "tag").unwrap().is_empty());
    }
}

mod member_tests {
    use super::*;

    #[test]
    fn test_extract_member() {
        let body = json!({"person": {"id": "1", "firstName": "Eric", "lastName": "Schmidt"}});
        let person: Contact = extract_member(&body, "person").unwrap();

        assert_eq!(person.id, Some(PartyId::new(1)));
        assert_eq!(person.first_name.as_deref(), Some("Eric"));
    }

    #[test]
    fn test_extract_member_missing_root() {
        let body = json!({"organisation": {}});
        let result: Result<Contact, _> = extract_member(&body, "person");

        assert!(result.is_err());
    }

    #[test]
    fn test_wrap_root() {
        let wrapped = wrap_root("task", json!({"description": "Call"}));
        assert_eq!(wrapped, json!({"task": {"description": "Call"}}));
    }
}

mod merge_tests {
    use super::*;

    #[test]
    fn test_merge_attributes_assigns_camel_case_keys() {
        let person = Contact {
            id: Some(PartyId::new(1)),
            first_name: None,
            last_name: None,
        };

        let merged = merge_attributes(&person, &json!({"firstName": "Matt", "lastName": "Beedle"})).unwrap();

        assert_eq!(merged.id, Some(PartyId::new(1)));
        assert_eq!(merged.first_name.as_deref(), Some("Matt"));
        assert_eq!(merged.last_name.as_deref(), Some("Beedle"));
    }

    #[test]
    fn test_merge_attributes_accepts_snake_case_keys() {
        let person = Contact {
            id: Some(PartyId::new(1)),
            first_name: Some("Eric".into()),
            last_name: Some("Schmidt".into()),
        };

        let merged = merge_attributes(&person, &json!({"first_name": "James"})).unwrap();

        assert_eq!(merged.first_name.as_deref(), Some("James"));
        assert_eq!(merged.last_name.as_deref(), Some("Schmidt"));
    }

    #[test]
    fn test_merge_attributes_rejects_unknown_keys() {
        let person = Contact {
            id: None,
            first_name: Some("Eric".into()),
            last_name: None,
        };

        let error = merge_attributes(&person, &json!({"firstName": "James", "nickname": "E"})).unwrap_err();

        match error {
            CoreError::UnknownAttributes(keys) => assert_eq!(keys, vec!["nickname".to_string()]),
            other => panic!("expected UnknownAttributes, got {other:?}"),
        }
    }

    #[test]
    fn test_merge_attributes_null_clears() {
        let person = Contact {
            id: None,
            first_name: Some("Matt".into()),
            last_name: None,
        };

        let merged = merge_attributes(&person, &json!({"firstName": null})).unwrap();
        assert_eq!(merged.first_name, None);
    }

    #[test]
    fn test_merge_attributes_rejects_non_object() {
        let person = Contact {
            id: None,
            first_name: None,
            last_name: None,
        };

        assert!(merge_attributes(&person, &json!(["firstName"])).is_err());
    }
}

proptest! {
    #[test]
    fn location_id_is_last_numeric_segment(prefix in "[a-z]{1,10}", id in 1u64..u64::MAX) {
        let location = format!("https://sample.capsulecrm.com/api/{prefix}/{id}");
        prop_assert_eq!(id_from_location(&location), Some(id));
    }

    #[test]
    fn quoted_and_bare_ids_agree(id in 0u64..u64::MAX) {
        let bare: PartyId = serde_json::from_str(&id.to_string()).unwrap();
        let quoted: PartyId = serde_json::from_str(&format!("\"{id}\"")).unwrap();
        prop_assert_eq!(bare, quoted);
    }
}
