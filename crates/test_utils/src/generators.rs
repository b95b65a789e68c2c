//! Property-Based Test Generators
//!
//! Proptest strategies for ids, parents and the loosely typed scalars
//! Capsule sends.

use chrono::NaiveDate;
use proptest::prelude::*;
use serde_json::Value;

use core_kernel::{CaseId, OpportunityId, PartyId};
use domain_crm::Parent;

/// Strategy for generating server-assigned ids
pub fn record_id_strategy() -> impl Strategy<Value = u64> {
    1u64..10_000_000u64
}

/// Strategy for generating a parent of any kind
pub fn parent_strategy() -> impl Strategy<Value = Parent> {
    prop_oneof![
        record_id_strategy().prop_map(|id| Parent::Party(PartyId::new(id))),
        record_id_strategy().prop_map(|id| Parent::Opportunity(OpportunityId::new(id))),
        record_id_strategy().prop_map(|id| Parent::Case(CaseId::new(id))),
    ]
}

/// Strategy for generating an id the way Capsule might send it:
/// as a JSON number or as a quoted string
pub fn wire_id_strategy() -> impl Strategy<Value = (u64, Value)> {
    record_id_strategy().prop_flat_map(|id| {
        prop_oneof![
            Just((id, Value::from(id))),
            Just((id, Value::from(id.to_string()))),
        ]
    })
}

/// Strategy for generating tag names, including spaces
pub fn tag_name_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9 ]{0,20}"
}

/// Strategy for generating dates within a few years of 2012
pub fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    (2010i32..2016i32, 1u32..13u32, 1u32..29u32)
        .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap())
}

/// Strategy for generating blank strings that validation must reject
pub fn blank_strategy() -> impl Strategy<Value = Option<String>> {
    prop_oneof![Just(None), Just(Some(String::new())), Just(Some("   ".to_string()))]
}
