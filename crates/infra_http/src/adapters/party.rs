use async_trait::async_trait;
use tracing::{debug, instrument};

use core_kernel::payload::extract_collection;
use core_kernel::{PartyId, PortError};
use domain_crm::{Organisation, Party, PartyPort, PartyQuery, Person};

use super::CapsuleAdapter;

impl CapsuleAdapter {
    /// Reads both kinds of party from a `{"parties": {...}}` body
    async fn parties(&self, query: &[(&str, String)]) -> Result<Vec<Party>, PortError> {
        let body = self.connection.get("/api/party", query).await?;

        let people: Vec<Person> = extract_collection(&body, "parties", "person")?;
        let organisations: Vec<Organisation> = extract_collection(&body, "parties", "organisation")?;
        debug!(people = people.len(), organisations = organisations.len(), "parties loaded");

        Ok(people
            .into_iter()
            .map(Party::from)
            .chain(organisations.into_iter().map(Party::from))
            .collect())
    }
}

#[async_trait]
impl PartyPort for CapsuleAdapter {
    #[instrument(skip(self))]
    async fn all_parties(&self) -> Result<Vec<Party>, PortError> {
        self.parties(&[]).await
    }

    #[instrument(skip(self))]
    async fn search_parties(&self, query: &PartyQuery) -> Result<Vec<Party>, PortError> {
        self.parties(&query.to_params()).await
    }

    #[instrument(skip(self), fields(party_id = %id))]
    async fn find_party(&self, id: PartyId) -> Result<Party, PortError> {
        let body = self.raw(&format!("/api/party/{id}"), "Party", id).await?;
        serde_json::from_value(body).map_err(|e| PortError::transformation(e.to_string()))
    }

    #[instrument(skip(self), fields(party_id = %organisation_id))]
    async fn people_of(&self, organisation_id: PartyId) -> Result<Vec<Person>, PortError> {
        self.list(
            &format!("/api/party/{organisation_id}/people"),
            &[],
            "parties",
            "person",
        )
        .await
    }
}
