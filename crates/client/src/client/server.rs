//! Server information API methods for [`SplunkClient`].

use crate::client::SplunkClient;
use crate::endpoints;
use crate::error::Result;
use crate::models::ServerInfo;

impl SplunkClient {
    /// Get server information.
    pub async fn get_server_info(&self) -> Result<ServerInfo> {
        crate::retry_call!(
            self,
            __auth,
            endpoints::get_server_info(&self.http, &self.base_url, &__auth, self.max_retries).await
        )
    }
}
