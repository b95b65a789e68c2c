//! Property tests for parent resolution and nested URLs

use proptest::prelude::*;

use core_kernel::{CaseId, OpportunityId, PartyId};
use domain_crm::{HistoryItem, Parent, Record, Task};

proptest! {
    #[test]
    fn party_always_wins(party in 1u64.., opportunity in proptest::option::of(1u64..), case in proptest::option::of(1u64..)) {
        let parent = Parent::from_ids(
            Some(PartyId::new(party)),
            opportunity.map(OpportunityId::new),
            case.map(CaseId::new),
        );
        prop_assert_eq!(parent, Some(Parent::Party(PartyId::new(party))));
    }

    #[test]
    fn task_and_history_share_the_parent_prefix(id in 1u64..1_000_000, kind in 0u8..3) {
        let parent = match kind {
            0 => Parent::Party(PartyId::new(id)),
            1 => Parent::Opportunity(OpportunityId::new(id)),
            _ => Parent::Case(CaseId::new(id)),
        };

        let task_path = Task::default().with_parent(parent).create_path().unwrap();
        let history_path = HistoryItem::note(parent, "x").create_path().unwrap();

        prop_assert_eq!(task_path, format!("/api/{}/{}/task", parent.segment(), id));
        prop_assert_eq!(history_path, format!("/api/{}/{}/history", parent.segment(), id));
    }

    #[test]
    fn flat_ids_survive_the_wire_form(id in 1u64..1_000_000) {
        let task: Task = serde_json::from_value(serde_json::json!({"opportunityId": id.to_string()})).unwrap();
        let wire = serde_json::to_value(&task).unwrap();

        prop_assert_eq!(task.opportunity_id(), Some(OpportunityId::new(id)));
        prop_assert_eq!(wire["opportunityId"].as_u64(), Some(id));
    }
}
