//! Runs CLI commands against the in-memory CRM

use clap::Parser;

use domain_crm::{HistoryPort, MockCrm, Parent, PartyPort, TaskPort};
use interface_cli::{run, Cli, CliError};
use test_utils::{RecordFixtures, TestPersonBuilder};

async fn run_args(crm: &MockCrm, args: &[&str]) -> Result<serde_json::Value, CliError> {
    let cli = Cli::try_parse_from(std::iter::once("capsule").chain(args.iter().copied())).unwrap();
    run(crm, cli.command).await
}

mod party_commands {
    use super::*;

    #[tokio::test]
    async fn test_parties_search_by_name() {
        let crm = MockCrm::new();
        crm.insert(RecordFixtures::person()).await.unwrap();
        crm.insert(TestPersonBuilder::new().with_first_name(Some("Larry")).build())
            .await
            .unwrap();

        let output = run_args(&crm, &["parties", "--query", "schmidt"]).await.unwrap();

        let parties = output.as_array().unwrap();
        assert_eq!(parties.len(), 1);
        assert_eq!(parties[0]["person"]["firstName"], "Eric");
    }

    #[tokio::test]
    async fn test_party_not_found() {
        let crm = MockCrm::new();

        let error = run_args(&crm, &["party", "42"]).await.unwrap_err();

        assert!(matches!(error, CliError::Port(ref e) if e.is_not_found()));
        assert_eq!(error.exit_code(), 1);
    }
}

mod activity_commands {
    use super::*;

    #[tokio::test]
    async fn test_complete_and_reopen_task() {
        let crm = MockCrm::new();
        let task = crm.insert(RecordFixtures::task()).await.unwrap();
        let id = task.id.unwrap();

        let output = run_args(&crm, &["complete-task", &id.to_string()]).await.unwrap();
        assert_eq!(output["status"], "COMPLETED");
        assert!(crm.find_task(id).await.unwrap().is_completed());

        run_args(&crm, &["reopen-task", &id.to_string()]).await.unwrap();
        assert!(!crm.find_task(id).await.unwrap().is_completed());
    }

    #[tokio::test]
    async fn test_tasks_filtered_by_parent() {
        let crm = MockCrm::new();
        let person = crm.insert(RecordFixtures::person()).await.unwrap();
        let party_id = person.id.unwrap();
        crm.insert(RecordFixtures::task().with_parent(party_id)).await.unwrap();
        crm.insert(RecordFixtures::task()).await.unwrap();

        let all = run_args(&crm, &["tasks"]).await.unwrap();
        let of_party = run_args(&crm, &["tasks", "--parent", "party", "--id", &party_id.to_string()])
            .await
            .unwrap();

        assert_eq!(all.as_array().unwrap().len(), 2);
        assert_eq!(of_party.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_note_records_creator() {
        let crm = MockCrm::new().with_users(vec![RecordFixtures::user()]).await;
        let person = crm.insert(RecordFixtures::person()).await.unwrap();
        let id = person.id.unwrap();

        let output = run_args(
            &crm,
            &["note", "party", &id.to_string(), "Called", "--creator", "a.user"],
        )
        .await
        .unwrap();

        assert_eq!(output["creator"], "a.user");
        let history = crm.history_for(Parent::Party(id)).await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].note.as_deref(), Some("Called"));
    }

    #[tokio::test]
    async fn test_blank_note_is_invalid() {
        let crm = MockCrm::new();
        let person = crm.insert(RecordFixtures::person()).await.unwrap();

        let error = run_args(&crm, &["note", "party", &person.id.unwrap().to_string(), ""])
            .await
            .unwrap_err();

        assert_eq!(error.exit_code(), 65);
    }
}

mod tag_commands {
    use super::*;

    #[tokio::test]
    async fn test_tag_then_list_then_remove() {
        let crm = MockCrm::new();
        let person = crm.insert(RecordFixtures::person()).await.unwrap();
        let id = person.id.unwrap().to_string();

        run_args(&crm, &["tag", "party", &id, "VIP"]).await.unwrap();
        let tags = run_args(&crm, &["tags", "party", &id]).await.unwrap();
        assert_eq!(tags, serde_json::json!([{ "name": "VIP" }]));

        let output = run_args(&crm, &["tag", "party", &id, "VIP", "--remove"]).await.unwrap();
        assert_eq!(output["removed"], true);
        let tags = run_args(&crm, &["tags", "party", &id]).await.unwrap();
        assert_eq!(tags, serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_dot_segment_tag_is_invalid() {
        let crm = MockCrm::new();
        let person = crm.insert(RecordFixtures::person()).await.unwrap();
        let id = person.id.unwrap().to_string();

        let error = run_args(&crm, &["tag", "party", &id, "..", "--remove"]).await.unwrap_err();

        assert_eq!(error.exit_code(), 65);
        assert!(crm.find_party(person.id.unwrap()).await.is_ok());
    }
}

mod account_commands {
    use super::*;

    #[tokio::test]
    async fn test_listings() {
        let crm = MockCrm::new()
            .with_milestones(RecordFixtures::milestones())
            .await
            .with_categories(vec!["Call".into(), "Meeting".into()])
            .await;

        let milestones = run_args(&crm, &["milestones"]).await.unwrap();
        let categories = run_args(&crm, &["categories"]).await.unwrap();
        let users = run_args(&crm, &["users"]).await.unwrap();

        assert_eq!(milestones.as_array().unwrap().len(), 3);
        assert_eq!(categories, serde_json::json!(["Call", "Meeting"]));
        assert_eq!(users, serde_json::json!([]));
    }
}

mod properties {
    use super::*;
    use proptest::prelude::*;
    use test_utils::{blank_strategy, date_strategy, TestTaskBuilder};

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        #[test]
        fn blank_notes_are_rejected(text in blank_strategy()) {
            let runtime = tokio::runtime::Runtime::new().unwrap();
            let error = runtime.block_on(async {
                let crm = MockCrm::new();
                let person = crm.insert(RecordFixtures::person()).await.unwrap();
                let id = person.id.unwrap().to_string();
                let text = text.unwrap_or_default();
                run_args(&crm, &["note", "party", &id, &text]).await.unwrap_err()
            });

            prop_assert_eq!(error.exit_code(), 65);
        }

        #[test]
        fn task_due_dates_are_printed_as_calendar_dates(due in date_strategy()) {
            let runtime = tokio::runtime::Runtime::new().unwrap();
            let output = runtime.block_on(async {
                let crm = MockCrm::new();
                crm.insert(TestTaskBuilder::new().with_due_date(Some(due)).build())
                    .await
                    .unwrap();
                run_args(&crm, &["tasks"]).await.unwrap()
            });

            let expected = due.to_string();
            prop_assert_eq!(output[0]["dueDate"].as_str(), Some(expected.as_str()));
        }
    }
}
