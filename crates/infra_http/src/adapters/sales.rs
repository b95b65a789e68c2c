use async_trait::async_trait;
use tracing::instrument;

use core_kernel::{CaseId, OpportunityId, PartyId, PortError};
use domain_crm::{Case, CasePort, Milestone, Opportunity, OpportunityPort};

use super::CapsuleAdapter;

#[async_trait]
impl OpportunityPort for CapsuleAdapter {
    #[instrument(skip(self))]
    async fn all_opportunities(&self) -> Result<Vec<Opportunity>, PortError> {
        self.list("/api/opportunity", &[], "opportunities", "opportunity").await
    }

    #[instrument(skip(self), fields(opportunity_id = %id))]
    async fn find_opportunity(&self, id: OpportunityId) -> Result<Opportunity, PortError> {
        self.member(&format!("/api/opportunity/{id}"), "opportunity", "Opportunity", id)
            .await
    }

    #[instrument(skip(self), fields(party_id = %party_id))]
    async fn opportunities_for(&self, party_id: PartyId) -> Result<Vec<Opportunity>, PortError> {
        self.list(
            &format!("/api/party/{party_id}/opportunity"),
            &[],
            "opportunities",
            "opportunity",
        )
        .await
    }

    #[instrument(skip(self))]
    async fn milestones(&self) -> Result<Vec<Milestone>, PortError> {
        self.list("/api/opportunity/milestones", &[], "milestones", "milestone")
            .await
    }
}

#[async_trait]
impl CasePort for CapsuleAdapter {
    #[instrument(skip(self))]
    async fn all_cases(&self) -> Result<Vec<Case>, PortError> {
        self.list("/api/kase", &[], "kases", "kase").await
    }

    #[instrument(skip(self), fields(case_id = %id))]
    async fn find_case(&self, id: CaseId) -> Result<Case, PortError> {
        self.member(&format!("/api/kase/{id}"), "kase", "Case", id).await
    }

    #[instrument(skip(self), fields(party_id = %party_id))]
    async fn cases_for(&self, party_id: PartyId) -> Result<Vec<Case>, PortError> {
        self.list(&format!("/api/party/{party_id}/kase"), &[], "kases", "kase")
            .await
    }
}
