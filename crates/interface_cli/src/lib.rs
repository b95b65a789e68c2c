//! Command Line Interface
//!
//! The `capsule` binary drives the CRM ports from a shell. Every command
//! prints its result as pretty JSON on stdout; logs go to stderr.
//!
//! # Example
//!
//! ```bash
//! CAPSULE_ACCOUNT=sample CAPSULE_API_TOKEN=... capsule parties --query Eric
//! capsule note party 1 "Called about the renewal"
//! capsule tag case 5 "Priority"
//! ```

pub mod config;
pub mod error;

use clap::{Parser, Subcommand, ValueEnum};
use serde_json::{json, Value};
use tracing::{info, instrument};

use core_kernel::{CaseId, OpportunityId, PartyId, TaskId};
use domain_crm::{CrmPort, HistoryItem, Parent, PartyQuery, RecordPortExt};

pub use crate::error::CliError;

/// Top-level CLI parser for the `capsule` binary
#[derive(Debug, Parser)]
#[command(name = "capsule", version, about = "Capsule CRM command line client")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,
}

/// Kind of record tasks, history and tags hang off
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ParentKind {
    Party,
    Opportunity,
    Case,
}

impl ParentKind {
    pub fn with_id(self, id: u64) -> Parent {
        match self {
            ParentKind::Party => Parent::Party(PartyId::new(id)),
            ParentKind::Opportunity => Parent::Opportunity(OpportunityId::new(id)),
            ParentKind::Case => Parent::Case(CaseId::new(id)),
        }
    }
}

#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// List or search people and organisations
    Parties {
        /// Free text search
        #[arg(long)]
        query: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        tag: Option<String>,
    },
    /// Show one person or organisation
    Party { id: u64 },
    /// List open tasks
    Tasks {
        /// Only tasks of this parent kind (needs --id)
        #[arg(long, requires = "id")]
        parent: Option<ParentKind>,
        #[arg(long, requires = "parent")]
        id: Option<u64>,
    },
    /// Mark a task as completed
    CompleteTask { id: u64 },
    /// Reopen a completed task
    ReopenTask { id: u64 },
    /// Show the history of a party, case or opportunity
    History { kind: ParentKind, id: u64 },
    /// Add a note to the history of a record
    Note {
        kind: ParentKind,
        id: u64,
        text: String,
        #[arg(long)]
        subject: Option<String>,
        /// Username recorded as the author
        #[arg(long)]
        creator: Option<String>,
    },
    /// List the tags of a record
    Tags { kind: ParentKind, id: u64 },
    /// Add a tag to a record, or remove it with --remove
    Tag {
        kind: ParentKind,
        id: u64,
        name: String,
        #[arg(long)]
        remove: bool,
    },
    /// List task categories
    Categories,
    /// List opportunity milestones
    Milestones,
    /// List tracks
    Tracks,
    /// List users of the account
    Users,
}

/// Runs one command and returns what should be printed
#[instrument(skip(crm))]
pub async fn run<C>(crm: &C, command: Commands) -> Result<Value, CliError>
where
    C: CrmPort + ?Sized,
{
    let output = match command {
        Commands::Parties { query, email, tag } => {
            let mut search = PartyQuery::default();
            search.q = query;
            search.email = email;
            search.tag = tag;
            let parties = if search.is_empty() {
                crm.all_parties().await?
            } else {
                crm.search_parties(&search).await?
            };
            serde_json::to_value(parties)?
        }
        Commands::Party { id } => serde_json::to_value(crm.find_party(PartyId::new(id)).await?)?,
        Commands::Tasks { parent, id } => {
            let tasks = match (parent, id) {
                (Some(kind), Some(id)) => crm.tasks_for(kind.with_id(id)).await?,
                _ => crm.all_tasks().await?,
            };
            serde_json::to_value(tasks)?
        }
        Commands::CompleteTask { id } => {
            crm.complete_task(TaskId::new(id)).await?;
            json!({ "task": id, "status": "COMPLETED" })
        }
        Commands::ReopenTask { id } => {
            crm.reopen_task(TaskId::new(id)).await?;
            json!({ "task": id, "status": "OPEN" })
        }
        Commands::History { kind, id } => serde_json::to_value(crm.history_for(kind.with_id(id)).await?)?,
        Commands::Note {
            kind,
            id,
            text,
            subject,
            creator,
        } => {
            let mut note = HistoryItem::note(kind.with_id(id), text);
            note.subject = subject;
            if let Some(username) = creator {
                let user = crm.find_user_by_username(&username).await?;
                note.set_creator(user.as_ref());
            }
            let note = crm.create(note).await?;
            info!(id = ?note.id, "note added");
            serde_json::to_value(note)?
        }
        Commands::Tags { kind, id } => serde_json::to_value(crm.tags(kind.with_id(id)).await?)?,
        Commands::Tag {
            kind,
            id,
            name,
            remove,
        } => {
            let parent = kind.with_id(id);
            let changed = if remove {
                crm.remove_tag(parent, &name).await?
            } else {
                crm.add_tag(parent, &name).await?
            };
            json!({ "tag": name, "removed": remove, "changed": changed })
        }
        Commands::Categories => serde_json::to_value(crm.task_categories().await?)?,
        Commands::Milestones => serde_json::to_value(crm.milestones().await?)?,
        Commands::Tracks => serde_json::to_value(crm.tracks().await?)?,
        Commands::Users => serde_json::to_value(crm.users().await?)?,
    };
    Ok(output)
}
