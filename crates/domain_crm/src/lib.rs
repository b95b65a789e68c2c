//! Capsule CRM Domain
//!
//! This crate models the records held in a Capsule CRM account and the
//! operations the client performs on them.
//!
//! # Record Model
//!
//! - **Party**: a [`Person`] or an [`Organisation`]
//! - **Opportunity**: a potential sale, owned by a party, at a [`Milestone`]
//! - **Case**: a piece of work for a party (`kase` on the wire)
//! - **Task** and **History item**: belong to at most one party, opportunity
//!   or case, expressed as a [`Parent`]
//! - **Tag**: a label on a party, opportunity or case
//!
//! Persistable models implement [`Record`]; the [`ports`] module defines what
//! the domain needs from the API.
//!
//! # Examples
//!
//! ```rust
//! use chrono::NaiveDate;
//! use core_kernel::PartyId;
//! use domain_crm::{Record, Task, Validatable};
//!
//! let task = Task::new("Call back", NaiveDate::from_ymd_opt(2012, 2, 24).unwrap())
//!     .with_parent(PartyId::new(1));
//!
//! assert!(task.is_valid());
//! assert!(task.is_new_record());
//! assert_eq!(task.create_path().unwrap(), "/api/party/1/task");
//! ```

pub mod association;
pub mod attachment;
pub mod case;
pub mod contacts;
pub mod history;
pub mod milestone;
pub mod opportunity;
pub mod participant;
pub mod party;
pub mod ports;
pub mod record;
pub mod tag;
pub mod task;
pub mod track;
pub mod user;
pub mod validation;

pub use association::{Parent, ParentRecord};
pub use attachment::Attachment;
pub use case::{Case, CaseStatus};
pub use contacts::{Address, Contacts, Email, Phone, Website};
pub use history::HistoryItem;
pub use milestone::Milestone;
pub use opportunity::{DurationBasis, Opportunity};
pub use participant::Participant;
pub use party::{Organisation, Party, Person};
pub use record::Record;
pub use tag::Tag;
pub use task::{Task, TaskStatus};
pub use track::Track;
pub use user::User;
pub use validation::{Validatable, ValidationResult};
pub use ports::{
    AccountPort, CasePort, CrmPort, HistoryPort, HistoryPortExt, OpportunityPort,
    OpportunityPortExt, PartyPort, PartyPortExt, PartyQuery, RecordPort, RecordPortExt,
    TagPort, TagPortExt, TaskPort, TaskPortExt,
};
#[cfg(any(test, feature = "mock"))]
pub use ports::mock::MockCrm;
