use async_trait::async_trait;
use tracing::instrument;

use core_kernel::PortError;
use domain_crm::{AccountPort, Track, User};

use super::CapsuleAdapter;

#[async_trait]
impl AccountPort for CapsuleAdapter {
    #[instrument(skip(self))]
    async fn users(&self) -> Result<Vec<User>, PortError> {
        self.list("/api/users", &[], "users", "user").await
    }

    #[instrument(skip(self))]
    async fn tracks(&self) -> Result<Vec<Track>, PortError> {
        self.list("/api/tracks", &[], "tracks", "track").await
    }
}
