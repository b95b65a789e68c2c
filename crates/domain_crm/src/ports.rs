//! CRM Domain Ports
//!
//! This module defines the port interfaces the CRM models need from Capsule.
//! The HTTP adapter in `infra_http` implements them against the REST API;
//! the in-memory [`mock::MockCrm`] implements them for tests.
//!
//! # Architecture
//!
//! Reads are grouped by record kind (`PartyPort`, `TaskPort`, ...). Writes
//! are shared: [`RecordPort`] saves and destroys any [`Record`], using the
//! paths and payload the record itself provides.
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_crm::ports::{RecordPortExt, TaskPort};
//!
//! let task = crm.create(Task::new("Call back", due).with_parent(party_id)).await?;
//! crm.complete_task(task.persisted_id("complete")?).await?;
//! ```

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;

use core_kernel::{
    CaseId, DomainPort, HistoryId, OpportunityId, PartyId, PortError, TaskId,
};

use crate::association::{Parent, ParentRecord};
use crate::case::Case;
use crate::history::HistoryItem;
use crate::milestone::Milestone;
use crate::opportunity::Opportunity;
use crate::party::{Organisation, Party, Person};
use crate::record::Record;
use crate::tag::Tag;
use crate::task::Task;
use crate::track::Track;
use crate::user::{self, User};

/// Query parameters for searching parties
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartyQuery {
    /// Free text search across names, emails and phone numbers
    pub q: Option<String>,
    pub email: Option<String>,
    pub tag: Option<String>,
    /// Only parties modified after this instant
    pub last_modified: Option<DateTime<Utc>>,
    /// Offset of the first result
    pub start: Option<u32>,
    pub limit: Option<u32>,
}

impl PartyQuery {
    /// Creates a free text search
    pub fn search(q: impl Into<String>) -> Self {
        Self {
            q: Some(q.into()),
            ..Default::default()
        }
    }

    /// Creates a query to find by email
    pub fn by_email(email: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            ..Default::default()
        }
    }

    /// Creates a query to find by tag
    pub fn by_tag(tag: impl Into<String>) -> Self {
        Self {
            tag: Some(tag.into()),
            ..Default::default()
        }
    }

    pub fn modified_since(mut self, at: DateTime<Utc>) -> Self {
        self.last_modified = Some(at);
        self
    }

    /// Adds pagination to the query
    pub fn paginate(mut self, start: u32, limit: u32) -> Self {
        self.start = Some(start);
        self.limit = Some(limit);
        self
    }

    /// Query string pairs in the order Capsule documents them
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(q) = &self.q {
            params.push(("q", q.clone()));
        }
        if let Some(email) = &self.email {
            params.push(("email", email.clone()));
        }
        if let Some(tag) = &self.tag {
            params.push(("tag", tag.clone()));
        }
        if let Some(at) = self.last_modified {
            params.push(("lastmodified", at.format("%Y%m%dT%H%M%S").to_string()));
        }
        if let Some(start) = self.start {
            params.push(("start", start.to_string()));
        }
        if let Some(limit) = self.limit {
            params.push(("limit", limit.to_string()));
        }
        params
    }

    pub fn is_empty(&self) -> bool {
        self.to_params().is_empty()
    }
}

/// Saves and destroys any persistable record
///
/// `save` validates first and sends nothing when validation fails. A new
/// record is POSTed and receives the id from the `Location` header; a
/// persisted record is PUT in place.
#[async_trait]
pub trait RecordPort: DomainPort {
    /// Creates or updates the record
    ///
    /// # Returns
    ///
    /// `PortError::RecordInvalid` when validation fails
    async fn save<R: Record>(&self, record: &mut R) -> Result<(), PortError>;

    /// Deletes the record and clears its id
    ///
    /// # Returns
    ///
    /// `PortError::NotPersisted` when the record has no id
    async fn destroy<R: Record>(&self, record: &mut R) -> Result<(), PortError>;
}

/// Extension trait for RecordPort with convenience methods
#[async_trait]
pub trait RecordPortExt: RecordPort {
    /// Validates and saves a new record, returning it with its id
    async fn create<R: Record>(&self, mut record: R) -> Result<R, PortError> {
        self.save(&mut record).await?;
        Ok(record)
    }

    /// Assigns camelCase attributes, then saves
    async fn update_attributes<R: Record>(
        &self,
        record: &mut R,
        attributes: &Value,
    ) -> Result<(), PortError> {
        record.assign_attributes(attributes)?;
        self.save(record).await
    }
}

impl<T: RecordPort + ?Sized> RecordPortExt for T {}

/// Read operations for people and organisations
#[async_trait]
pub trait PartyPort: DomainPort {
    /// Lists every party in the account
    async fn all_parties(&self) -> Result<Vec<Party>, PortError>;

    /// Searches parties
    async fn search_parties(&self, query: &PartyQuery) -> Result<Vec<Party>, PortError>;

    /// Retrieves a party by ID
    ///
    /// # Returns
    ///
    /// The party if found, or `PortError::NotFound`
    async fn find_party(&self, id: PartyId) -> Result<Party, PortError>;

    /// Lists the people working for an organisation
    async fn people_of(&self, organisation_id: PartyId) -> Result<Vec<Person>, PortError>;
}

/// Extension trait for PartyPort with convenience methods
#[async_trait]
pub trait PartyPortExt: PartyPort {
    /// Every party that is a person
    async fn all_people(&self) -> Result<Vec<Person>, PortError> {
        let parties = self.all_parties().await?;
        Ok(parties.into_iter().filter_map(Party::into_person).collect())
    }

    /// Every party that is an organisation
    async fn all_organisations(&self) -> Result<Vec<Organisation>, PortError> {
        let parties = self.all_parties().await?;
        Ok(parties.into_iter().filter_map(Party::into_organisation).collect())
    }

    /// Finds a person; an organisation with this id counts as not found
    async fn find_person(&self, id: PartyId) -> Result<Person, PortError> {
        self.find_party(id)
            .await?
            .into_person()
            .ok_or_else(|| PortError::not_found("Person", id))
    }

    /// Finds an organisation; a person with this id counts as not found
    async fn find_organisation(&self, id: PartyId) -> Result<Organisation, PortError> {
        self.find_party(id)
            .await?
            .into_organisation()
            .ok_or_else(|| PortError::not_found("Organisation", id))
    }

    /// The organisation a person works for, if any
    async fn organisation_of(&self, person: &Person) -> Result<Option<Organisation>, PortError> {
        match person.organisation_id {
            Some(id) => self.find_organisation(id).await.map(Some),
            None => Ok(None),
        }
    }
}

impl<T: PartyPort + ?Sized> PartyPortExt for T {}

/// Read operations for opportunities and milestones
#[async_trait]
pub trait OpportunityPort: DomainPort {
    async fn all_opportunities(&self) -> Result<Vec<Opportunity>, PortError>;

    async fn find_opportunity(&self, id: OpportunityId) -> Result<Opportunity, PortError>;

    async fn opportunities_for(&self, party_id: PartyId) -> Result<Vec<Opportunity>, PortError>;

    /// Lists the account's sales milestones
    async fn milestones(&self) -> Result<Vec<Milestone>, PortError>;
}

/// Extension trait for OpportunityPort with convenience methods
#[async_trait]
pub trait OpportunityPortExt: OpportunityPort {
    /// Resolves an opportunity's milestone by id, then by name
    async fn milestone_of(&self, opportunity: &Opportunity) -> Result<Option<Milestone>, PortError> {
        let milestones = self.milestones().await?;
        Ok(opportunity.find_milestone(&milestones).cloned())
    }

    /// Opportunities of a saved party; empty for a new one
    async fn opportunities_of<P>(&self, party: &P) -> Result<Vec<Opportunity>, PortError>
    where
        P: ParentRecord + Sync,
    {
        match party.as_parent().and_then(|parent| parent.party_id()) {
            Some(id) => self.opportunities_for(id).await,
            None => Ok(Vec::new()),
        }
    }
}

impl<T: OpportunityPort + ?Sized> OpportunityPortExt for T {}

/// Read operations for cases
#[async_trait]
pub trait CasePort: DomainPort {
    async fn all_cases(&self) -> Result<Vec<Case>, PortError>;

    async fn find_case(&self, id: CaseId) -> Result<Case, PortError>;

    async fn cases_for(&self, party_id: PartyId) -> Result<Vec<Case>, PortError>;
}

/// Task operations beyond save and destroy
#[async_trait]
pub trait TaskPort: DomainPort {
    /// Lists every open task in the account
    async fn all_tasks(&self) -> Result<Vec<Task>, PortError>;

    async fn find_task(&self, id: TaskId) -> Result<Task, PortError>;

    /// Marks a task as completed
    async fn complete_task(&self, id: TaskId) -> Result<(), PortError>;

    /// Reopens a completed task
    async fn reopen_task(&self, id: TaskId) -> Result<(), PortError>;

    /// Lists the task categories configured for the account
    async fn task_categories(&self) -> Result<Vec<String>, PortError>;

    /// Tasks belonging to `parent`
    ///
    /// Capsule has no per-parent task listing, so all tasks are fetched and
    /// filtered.
    async fn tasks_for(&self, parent: Parent) -> Result<Vec<Task>, PortError> {
        let tasks = self.all_tasks().await?;
        Ok(tasks.into_iter().filter(|task| task.belongs_to(parent)).collect())
    }
}

/// Extension trait for TaskPort with convenience methods
#[async_trait]
pub trait TaskPortExt: TaskPort {
    async fn complete(&self, task: &Task) -> Result<(), PortError> {
        self.complete_task(task.persisted_id("complete")?).await
    }

    async fn reopen(&self, task: &Task) -> Result<(), PortError> {
        self.reopen_task(task.persisted_id("reopen")?).await
    }

    /// Tasks of a saved record; empty for a new one
    async fn tasks_of<P>(&self, record: &P) -> Result<Vec<Task>, PortError>
    where
        P: ParentRecord + Sync,
    {
        match record.as_parent() {
            Some(parent) => self.tasks_for(parent).await,
            None => Ok(Vec::new()),
        }
    }
}

impl<T: TaskPort + ?Sized> TaskPortExt for T {}

/// Read operations for history items
#[async_trait]
pub trait HistoryPort: DomainPort {
    /// Lists the history of a party, case or opportunity
    async fn history_for(&self, parent: Parent) -> Result<Vec<HistoryItem>, PortError>;

    async fn find_history(&self, id: HistoryId) -> Result<HistoryItem, PortError>;
}

/// Extension trait for HistoryPort with convenience methods
#[async_trait]
pub trait HistoryPortExt: HistoryPort {
    /// History of a saved record; empty for a new one
    async fn history_of<P>(&self, record: &P) -> Result<Vec<HistoryItem>, PortError>
    where
        P: ParentRecord + Sync,
    {
        match record.as_parent() {
            Some(parent) => self.history_for(parent).await,
            None => Ok(Vec::new()),
        }
    }
}

impl<T: HistoryPort + ?Sized> HistoryPortExt for T {}

/// Tags on parties, opportunities and cases
#[async_trait]
pub trait TagPort: DomainPort {
    async fn tags(&self, parent: Parent) -> Result<Vec<Tag>, PortError>;

    /// Adds a tag, returning true once Capsule accepted it
    async fn add_tag(&self, parent: Parent, name: &str) -> Result<bool, PortError>;

    /// Removes a tag, returning true once Capsule accepted it
    async fn remove_tag(&self, parent: Parent, name: &str) -> Result<bool, PortError>;
}

/// Tag operations on records that may not have been saved yet
#[async_trait]
pub trait TagPortExt: TagPort {
    /// Tags of a saved record; empty for a new one
    async fn tags_of<P>(&self, record: &P) -> Result<Vec<Tag>, PortError>
    where
        P: ParentRecord + Sync,
    {
        match record.as_parent() {
            Some(parent) => self.tags(parent).await,
            None => Ok(Vec::new()),
        }
    }

    /// `None` when the record has no id, otherwise the result of [`TagPort::add_tag`]
    async fn tag<P>(&self, record: &P, name: &str) -> Result<Option<bool>, PortError>
    where
        P: ParentRecord + Sync,
    {
        match record.as_parent() {
            Some(parent) => self.add_tag(parent, name).await.map(Some),
            None => Ok(None),
        }
    }

    /// `None` when the record has no id, otherwise the result of [`TagPort::remove_tag`]
    async fn untag<P>(&self, record: &P, name: &str) -> Result<Option<bool>, PortError>
    where
        P: ParentRecord + Sync,
    {
        match record.as_parent() {
            Some(parent) => self.remove_tag(parent, name).await.map(Some),
            None => Ok(None),
        }
    }
}

impl<T: TagPort + ?Sized> TagPortExt for T {}

/// Account-wide listings
#[async_trait]
pub trait AccountPort: DomainPort {
    async fn users(&self) -> Result<Vec<User>, PortError>;

    async fn tracks(&self) -> Result<Vec<Track>, PortError>;

    /// Looks a user up by username; `None` when no user matches
    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, PortError> {
        let users = self.users().await?;
        Ok(user::find_by_username(&users, username).cloned())
    }
}

/// Every CRM port in one bound
pub trait CrmPort:
    RecordPort + PartyPort + OpportunityPort + CasePort + TaskPort + HistoryPort + TagPort + AccountPort
{
}

impl<T> CrmPort for T where
    T: RecordPort
        + PartyPort
        + OpportunityPort
        + CasePort
        + TaskPort
        + HistoryPort
        + TagPort
        + AccountPort
{
}

/// Mock implementation of the CRM ports for testing
///
/// Records are kept in memory in their wire form, keyed by root and id.
/// Ids are handed out from a single counter, so parties, tasks and cases
/// never share one.
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::{BTreeMap, BTreeSet, HashMap};
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Arc;
    use tokio::sync::RwLock;

    use crate::tag::escape_tag;
    use crate::task::TaskStatus;

    type Key = (&'static str, u64);

    /// In-memory mock implementation of every CRM port
    #[derive(Debug)]
    pub struct MockCrm {
        records: Arc<RwLock<BTreeMap<Key, Value>>>,
        tags: Arc<RwLock<HashMap<Parent, BTreeSet<String>>>>,
        users: Arc<RwLock<Vec<User>>>,
        milestones: Arc<RwLock<Vec<Milestone>>>,
        tracks: Arc<RwLock<Vec<Track>>>,
        categories: Arc<RwLock<Vec<String>>>,
        next_id: AtomicU64,
    }

    impl Default for MockCrm {
        fn default() -> Self {
            Self {
                records: Arc::default(),
                tags: Arc::default(),
                users: Arc::default(),
                milestones: Arc::default(),
                tracks: Arc::default(),
                categories: Arc::default(),
                next_id: AtomicU64::new(1),
            }
        }
    }

    impl MockCrm {
        /// Creates an empty mock
        pub fn new() -> Self {
            Self::default()
        }

        /// Pre-populates the account users
        pub async fn with_users(self, users: Vec<User>) -> Self {
            *self.users.write().await = users;
            self
        }

        /// Pre-populates the sales milestones
        pub async fn with_milestones(self, milestones: Vec<Milestone>) -> Self {
            *self.milestones.write().await = milestones;
            self
        }

        pub async fn with_tracks(self, tracks: Vec<Track>) -> Self {
            *self.tracks.write().await = tracks;
            self
        }

        pub async fn with_categories(self, categories: Vec<String>) -> Self {
            *self.categories.write().await = categories;
            self
        }

        /// Stores a record as-is, assigning an id when it has none
        pub async fn insert<R: Record>(&self, mut record: R) -> Result<R, PortError> {
            let id = match record.id() {
                Some(id) => {
                    let raw: u64 = id.into();
                    self.next_id.fetch_max(raw + 1, Ordering::SeqCst);
                    raw
                }
                None => {
                    let raw = self.next_id.fetch_add(1, Ordering::SeqCst);
                    record.set_id(Some(R::Id::from(raw)));
                    raw
                }
            };
            let value = to_wire(&record)?;
            self.records.write().await.insert((R::ROOT, id), value);
            Ok(record)
        }

        /// Number of stored records with the given root key
        pub async fn count(&self, root: &str) -> usize {
            self.records
                .read()
                .await
                .keys()
                .filter(|(stored, _)| *stored == root)
                .count()
        }

        async fn load<R: Record>(&self, id: u64) -> Result<Option<R>, PortError> {
            match self.records.read().await.get(&(R::ROOT, id)) {
                Some(value) => Ok(Some(R::from_attributes(value)?)),
                None => Ok(None),
            }
        }

        async fn find<R: Record>(&self, id: u64) -> Result<R, PortError> {
            self.load(id)
                .await?
                .ok_or_else(|| PortError::not_found(R::ENTITY, id))
        }

        async fn list<R: Record>(&self) -> Result<Vec<R>, PortError> {
            let records = self.records.read().await;
            records
                .iter()
                .filter(|((root, _), _)| *root == R::ROOT)
                .map(|(_, value)| R::from_attributes(value))
                .collect()
        }

        async fn set_task_status(&self, id: TaskId, status: TaskStatus) -> Result<(), PortError> {
            let mut task: Task = self.find(id.get()).await?;
            task.status = Some(status);
            let value = to_wire(&task)?;
            self.records.write().await.insert((Task::ROOT, id.get()), value);
            Ok(())
        }

        async fn ensure_parent_exists(&self, parent: Parent) -> Result<(), PortError> {
            let records = self.records.read().await;
            let exists = match parent {
                Parent::Party(id) => {
                    records.contains_key(&(Person::ROOT, id.get()))
                        || records.contains_key(&(Organisation::ROOT, id.get()))
                }
                Parent::Opportunity(id) => records.contains_key(&(Opportunity::ROOT, id.get())),
                Parent::Case(id) => records.contains_key(&(Case::ROOT, id.get())),
            };
            if exists {
                Ok(())
            } else {
                Err(PortError::not_found(parent.segment(), parent.raw_id()))
            }
        }
    }

    fn to_wire<R: Record>(record: &R) -> Result<Value, PortError> {
        serde_json::to_value(record).map_err(|e| PortError::transformation(e.to_string()))
    }

    impl DomainPort for MockCrm {}

    #[async_trait]
    impl RecordPort for MockCrm {
        async fn save<R: Record>(&self, record: &mut R) -> Result<(), PortError> {
            record.ensure_valid()?;
            record.create_path()?;

            match record.id() {
                None => {
                    let raw = self.next_id.fetch_add(1, Ordering::SeqCst);
                    record.set_id(Some(R::Id::from(raw)));
                    let value = to_wire(&*record)?;
                    self.records.write().await.insert((R::ROOT, raw), value);
                }
                Some(id) => {
                    let raw: u64 = id.into();
                    let value = to_wire(&*record)?;
                    let mut records = self.records.write().await;
                    match records.get_mut(&(R::ROOT, raw)) {
                        Some(stored) => *stored = value,
                        None => return Err(PortError::not_found(R::ENTITY, raw)),
                    }
                }
            }
            Ok(())
        }

        async fn destroy<R: Record>(&self, record: &mut R) -> Result<(), PortError> {
            let raw: u64 = record.persisted_id("destroy")?.into();
            self.records
                .write()
                .await
                .remove(&(R::ROOT, raw))
                .ok_or_else(|| PortError::not_found(R::ENTITY, raw))?;
            record.set_id(None);
            Ok(())
        }
    }

    #[async_trait]
    impl PartyPort for MockCrm {
        async fn all_parties(&self) -> Result<Vec<Party>, PortError> {
            let mut parties: Vec<Party> = self
                .list::<Person>()
                .await?
                .into_iter()
                .map(Party::from)
                .collect();
            parties.extend(self.list::<Organisation>().await?.into_iter().map(Party::from));
            Ok(parties)
        }

        async fn search_parties(&self, query: &PartyQuery) -> Result<Vec<Party>, PortError> {
            let mut matches = Vec::new();
            for party in self.all_parties().await? {
                if let Some(q) = &query.q {
                    if !party.name().to_lowercase().contains(&q.to_lowercase()) {
                        continue;
                    }
                }
                if let Some(email) = &query.email {
                    let found = party
                        .contacts()
                        .emails
                        .iter()
                        .any(|e| e.email_address.as_deref() == Some(email.as_str()));
                    if !found {
                        continue;
                    }
                }
                if let Some(tag) = &query.tag {
                    let tagged = match party.as_parent() {
                        Some(parent) => self
                            .tags
                            .read()
                            .await
                            .get(&parent)
                            .is_some_and(|tags| tags.contains(tag)),
                        None => false,
                    };
                    if !tagged {
                        continue;
                    }
                }
                matches.push(party);
            }

            let start = query.start.unwrap_or(0) as usize;
            let limit = query.limit.map_or(usize::MAX, |limit| limit as usize);
            Ok(matches.into_iter().skip(start).take(limit).collect())
        }

        async fn find_party(&self, id: PartyId) -> Result<Party, PortError> {
            if let Some(person) = self.load::<Person>(id.get()).await? {
                return Ok(Party::Person(person));
            }
            match self.load::<Organisation>(id.get()).await? {
                Some(organisation) => Ok(Party::Organisation(organisation)),
                None => Err(PortError::not_found("Party", id)),
            }
        }

        async fn people_of(&self, organisation_id: PartyId) -> Result<Vec<Person>, PortError> {
            let people = self.list::<Person>().await?;
            Ok(people
                .into_iter()
                .filter(|person| person.organisation_id == Some(organisation_id))
                .collect())
        }
    }

    #[async_trait]
    impl OpportunityPort for MockCrm {
        async fn all_opportunities(&self) -> Result<Vec<Opportunity>, PortError> {
            self.list().await
        }

        async fn find_opportunity(&self, id: OpportunityId) -> Result<Opportunity, PortError> {
            self.find(id.get()).await
        }

        async fn opportunities_for(&self, party_id: PartyId) -> Result<Vec<Opportunity>, PortError> {
            let opportunities: Vec<Opportunity> = self.list().await?;
            Ok(opportunities
                .into_iter()
                .filter(|opportunity| opportunity.party_id == Some(party_id))
                .collect())
        }

        async fn milestones(&self) -> Result<Vec<Milestone>, PortError> {
            Ok(self.milestones.read().await.clone())
        }
    }

    #[async_trait]
    impl CasePort for MockCrm {
        async fn all_cases(&self) -> Result<Vec<Case>, PortError> {
            self.list().await
        }

        async fn find_case(&self, id: CaseId) -> Result<Case, PortError> {
            self.find(id.get()).await
        }

        async fn cases_for(&self, party_id: PartyId) -> Result<Vec<Case>, PortError> {
            let cases: Vec<Case> = self.list().await?;
            Ok(cases
                .into_iter()
                .filter(|case| case.party_id == Some(party_id))
                .collect())
        }
    }

    #[async_trait]
    impl TaskPort for MockCrm {
        async fn all_tasks(&self) -> Result<Vec<Task>, PortError> {
            self.list().await
        }

        async fn find_task(&self, id: TaskId) -> Result<Task, PortError> {
            self.find(id.get()).await
        }

        async fn complete_task(&self, id: TaskId) -> Result<(), PortError> {
            self.set_task_status(id, TaskStatus::Completed).await
        }

        async fn reopen_task(&self, id: TaskId) -> Result<(), PortError> {
            self.set_task_status(id, TaskStatus::Open).await
        }

        async fn task_categories(&self) -> Result<Vec<String>, PortError> {
            Ok(self.categories.read().await.clone())
        }
    }

    #[async_trait]
    impl HistoryPort for MockCrm {
        async fn history_for(&self, parent: Parent) -> Result<Vec<HistoryItem>, PortError> {
            self.ensure_parent_exists(parent).await?;
            let items: Vec<HistoryItem> = self.list().await?;
            Ok(items
                .into_iter()
                .filter(|item| item.belongs_to(parent))
                .collect())
        }

        async fn find_history(&self, id: HistoryId) -> Result<HistoryItem, PortError> {
            self.find(id.get()).await
        }
    }

    #[async_trait]
    impl TagPort for MockCrm {
        async fn tags(&self, parent: Parent) -> Result<Vec<Tag>, PortError> {
            self.ensure_parent_exists(parent).await?;
            Ok(self
                .tags
                .read()
                .await
                .get(&parent)
                .map(|names| names.iter().map(Tag::new).collect())
                .unwrap_or_default())
        }

        async fn add_tag(&self, parent: Parent, name: &str) -> Result<bool, PortError> {
            escape_tag(name)?;
            self.ensure_parent_exists(parent).await?;
            self.tags
                .write()
                .await
                .entry(parent)
                .or_default()
                .insert(name.to_string());
            Ok(true)
        }

        async fn remove_tag(&self, parent: Parent, name: &str) -> Result<bool, PortError> {
            escape_tag(name)?;
            self.ensure_parent_exists(parent).await?;
            if let Some(names) = self.tags.write().await.get_mut(&parent) {
                names.remove(name);
            }
            Ok(true)
        }
    }

    #[async_trait]
    impl AccountPort for MockCrm {
        async fn users(&self) -> Result<Vec<User>, PortError> {
            Ok(self.users.read().await.clone())
        }

        async fn tracks(&self) -> Result<Vec<Track>, PortError> {
            Ok(self.tracks.read().await.clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_party_query_params() {
        let query = PartyQuery::search("Eric")
            .modified_since(Utc.with_ymd_and_hms(2012, 1, 1, 8, 30, 0).unwrap())
            .paginate(10, 5);

        assert_eq!(
            query.to_params(),
            vec![
                ("q", "Eric".to_string()),
                ("lastmodified", "20120101T083000".to_string()),
                ("start", "10".to_string()),
                ("limit", "5".to_string()),
            ]
        );
        assert!(PartyQuery::default().is_empty());
    }
}
