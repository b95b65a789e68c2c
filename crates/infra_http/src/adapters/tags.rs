use async_trait::async_trait;
use tracing::instrument;

use core_kernel::PortError;
use domain_crm::tag::escape_tag;
use domain_crm::{Parent, Tag, TagPort};

use super::CapsuleAdapter;
use crate::error::into_port_error;

fn tag_path(parent: Parent, name: &str) -> Result<String, PortError> {
    Ok(format!("{}/{}", parent.nested_path("tag"), escape_tag(name)?))
}

#[async_trait]
impl TagPort for CapsuleAdapter {
    #[instrument(skip(self), fields(parent = %parent))]
    async fn tags(&self, parent: Parent) -> Result<Vec<Tag>, PortError> {
        let body = self
            .raw(&parent.nested_path("tag"), parent.segment(), parent.raw_id())
            .await?;
        Ok(core_kernel::payload::extract_collection(&body, "tags", "tag")?)
    }

    #[instrument(skip(self), fields(parent = %parent))]
    async fn add_tag(&self, parent: Parent, name: &str) -> Result<bool, PortError> {
        self.connection
            .post(&tag_path(parent, name)?, None)
            .await
            .map_err(|e| into_port_error(e, parent.segment(), parent.raw_id()))?;
        Ok(true)
    }

    #[instrument(skip(self), fields(parent = %parent))]
    async fn remove_tag(&self, parent: Parent, name: &str) -> Result<bool, PortError> {
        self.connection
            .delete(&tag_path(parent, name)?)
            .await
            .map_err(|e| into_port_error(e, parent.segment(), parent.raw_id()))?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::{CaseId, PartyId};

    #[test]
    fn test_tag_path_escapes_name() {
        assert_eq!(
            tag_path(Parent::Party(PartyId::new(1)), "Big Customer").unwrap(),
            "/api/party/1/tag/Big%20Customer"
        );
        assert_eq!(
            tag_path(Parent::Case(CaseId::new(5)), "Open").unwrap(),
            "/api/kase/5/tag/Open"
        );
        assert!(tag_path(Parent::Party(PartyId::new(1)), "..").is_err());
    }
}
