use async_trait::async_trait;
use tracing::{debug, instrument};

use core_kernel::PortError;
use domain_crm::{Record, RecordPort};

use super::CapsuleAdapter;
use crate::error::into_port_error;

#[async_trait]
impl RecordPort for CapsuleAdapter {
    #[instrument(skip(self, record), fields(entity = R::ENTITY))]
    async fn save<R: Record>(&self, record: &mut R) -> Result<(), PortError> {
        record.ensure_valid()?;
        let body = record.to_capsule_json();

        match record.id() {
            None => {
                let path = record.create_path()?;
                let id = self.connection.post(&path, Some(&body)).await?.ok_or_else(|| {
                    PortError::transformation(format!(
                        "{} was created but Capsule returned no id",
                        R::ENTITY
                    ))
                })?;
                debug!(id, "record created");
                record.set_id(Some(R::Id::from(id)));
            }
            Some(id) => {
                self.connection
                    .put(&R::update_path(id), &body)
                    .await
                    .map_err(|e| into_port_error(e, R::ENTITY, id))?;
                debug!(%id, "record updated");
            }
        }
        Ok(())
    }

    #[instrument(skip(self, record), fields(entity = R::ENTITY))]
    async fn destroy<R: Record>(&self, record: &mut R) -> Result<(), PortError> {
        let id = record.persisted_id("destroy")?;
        self.connection
            .delete(&R::destroy_path(id))
            .await
            .map_err(|e| into_port_error(e, R::ENTITY, id))?;
        record.set_id(None);
        Ok(())
    }
}
