//! Polymorphic parent references
//!
//! Tasks and history items belong to at most one of a party, an opportunity
//! or a case. Capsule expresses this with three optional id fields; here it
//! is a single [`Parent`] value so "belongs to two parents" cannot be
//! represented. The same three kinds of record are the ones that carry tags.
//!
//! The parent decides the nested URL a child is created under:
//!
//! ```text
//! Parent::Party(1)        -> /api/party/1/{child}
//! Parent::Opportunity(2)  -> /api/opportunity/2/{child}
//! Parent::Case(5)         -> /api/kase/5/{child}
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use core_kernel::{CaseId, OpportunityId, PartyId, PortError};

use crate::case::Case;
use crate::opportunity::Opportunity;
use crate::party::Party;
use crate::ports::{CasePort, OpportunityPort, PartyPort};

/// The record a task or history item belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum Parent {
    Party(PartyId),
    Opportunity(OpportunityId),
    #[serde(rename = "kase")]
    Case(CaseId),
}

impl Parent {
    /// Resolves the parent from the flat id fields Capsule sends
    ///
    /// When several ids are present the party wins, then the opportunity,
    /// then the case.
    pub fn from_ids(
        party_id: Option<PartyId>,
        opportunity_id: Option<OpportunityId>,
        case_id: Option<CaseId>,
    ) -> Option<Self> {
        party_id
            .map(Parent::Party)
            .or(opportunity_id.map(Parent::Opportunity))
            .or(case_id.map(Parent::Case))
    }

    /// Every parent present in the flat id fields, in [`Parent::from_ids`] order
    pub fn all_from_ids(
        party_id: Option<PartyId>,
        opportunity_id: Option<OpportunityId>,
        case_id: Option<CaseId>,
    ) -> Vec<Self> {
        party_id
            .map(Parent::Party)
            .into_iter()
            .chain(opportunity_id.map(Parent::Opportunity))
            .chain(case_id.map(Parent::Case))
            .collect()
    }

    /// The URL segment Capsule uses for this kind of record
    pub fn segment(&self) -> &'static str {
        match self {
            Parent::Party(_) => "party",
            Parent::Opportunity(_) => "opportunity",
            Parent::Case(_) => "kase",
        }
    }

    /// The raw server id of the parent
    pub fn raw_id(&self) -> u64 {
        match self {
            Parent::Party(id) => id.get(),
            Parent::Opportunity(id) => id.get(),
            Parent::Case(id) => id.get(),
        }
    }

    /// `/api/{segment}/{id}`
    pub fn path(&self) -> String {
        format!("/api/{}/{}", self.segment(), self.raw_id())
    }

    /// `/api/{segment}/{id}/{child}`
    pub fn nested_path(&self, child: &str) -> String {
        format!("{}/{}", self.path(), child)
    }

    pub fn party_id(&self) -> Option<PartyId> {
        match self {
            Parent::Party(id) => Some(*id),
            _ => None,
        }
    }

    pub fn opportunity_id(&self) -> Option<OpportunityId> {
        match self {
            Parent::Opportunity(id) => Some(*id),
            _ => None,
        }
    }

    pub fn case_id(&self) -> Option<CaseId> {
        match self {
            Parent::Case(id) => Some(*id),
            _ => None,
        }
    }
}

impl fmt::Display for Parent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.segment(), self.raw_id())
    }
}

impl From<PartyId> for Parent {
    fn from(id: PartyId) -> Self {
        Parent::Party(id)
    }
}

impl From<OpportunityId> for Parent {
    fn from(id: OpportunityId) -> Self {
        Parent::Opportunity(id)
    }
}

impl From<CaseId> for Parent {
    fn from(id: CaseId) -> Self {
        Parent::Case(id)
    }
}

/// Records that can own tasks and history and carry tags
///
/// Returns `None` while the record has not been saved.
pub trait ParentRecord {
    fn as_parent(&self) -> Option<Parent>;
}

/// Loads the party a child belongs to, if its parent is a party
pub async fn resolve_party<P>(parent: Option<Parent>, port: &P) -> Result<Option<Party>, PortError>
where
    P: PartyPort + ?Sized,
{
    match parent.and_then(|p| p.party_id()) {
        Some(id) => port.find_party(id).await.map(Some),
        None => Ok(None),
    }
}

/// Loads the opportunity a child belongs to, if its parent is an opportunity
pub async fn resolve_opportunity<P>(
    parent: Option<Parent>,
    port: &P,
) -> Result<Option<Opportunity>, PortError>
where
    P: OpportunityPort + ?Sized,
{
    match parent.and_then(|p| p.opportunity_id()) {
        Some(id) => port.find_opportunity(id).await.map(Some),
        None => Ok(None),
    }
}

/// Loads the case a child belongs to, if its parent is a case
pub async fn resolve_case<P>(parent: Option<Parent>, port: &P) -> Result<Option<Case>, PortError>
where
    P: CasePort + ?Sized,
{
    match parent.and_then(|p| p.case_id()) {
        Some(id) => port.find_case(id).await.map(Some),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_ids_priority() {
        let parent = Parent::from_ids(
            Some(PartyId::new(1)),
            Some(OpportunityId::new(2)),
            Some(CaseId::new(3)),
        );
        assert_eq!(parent, Some(Parent::Party(PartyId::new(1))));

        let parent = Parent::from_ids(None, Some(OpportunityId::new(2)), Some(CaseId::new(3)));
        assert_eq!(parent, Some(Parent::Opportunity(OpportunityId::new(2))));

        assert_eq!(Parent::from_ids(None, None, None), None);
    }

    #[test]
    fn test_all_from_ids_keeps_every_parent() {
        let parents = Parent::all_from_ids(Some(PartyId::new(3)), Some(OpportunityId::new(7)), None);
        assert_eq!(
            parents,
            vec![
                Parent::Party(PartyId::new(3)),
                Parent::Opportunity(OpportunityId::new(7))
            ]
        );
        assert!(Parent::all_from_ids(None, None, None).is_empty());
    }

    #[test]
    fn test_nested_paths() {
        assert_eq!(Parent::Party(PartyId::new(1)).nested_path("task"), "/api/party/1/task");
        assert_eq!(
            Parent::Opportunity(OpportunityId::new(2)).nested_path("history"),
            "/api/opportunity/2/history"
        );
        assert_eq!(Parent::Case(CaseId::new(5)).nested_path("tag"), "/api/kase/5/tag");
    }

    #[test]
    fn test_display() {
        assert_eq!(Parent::Case(CaseId::new(5)).to_string(), "kase 5");
    }
}
