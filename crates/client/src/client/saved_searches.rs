//! Saved search metadata methods for [`SplunkClient`].
//!
//! # What this module handles:
//! - Listing saved searches in a namespace
//! - Getting a single saved search
//!
//! # What this module does NOT handle:
//! - Running saved searches (see [`super::search`])

use crate::client::SplunkClient;
use crate::endpoints::{self, Namespace};
use crate::error::Result;
use crate::models::SavedSearch;

impl SplunkClient {
    /// List saved searches visible in the namespace.
    pub async fn list_saved_searches(&self, namespace: Namespace<'_>) -> Result<Vec<SavedSearch>> {
        crate::retry_call!(
            self,
            __auth,
            endpoints::list_saved_searches(
                &self.http,
                &self.base_url,
                &__auth,
                namespace,
                self.max_retries,
            )
            .await
        )
    }

    /// Get a saved search by name.
    pub async fn get_saved_search(
        &self,
        namespace: Namespace<'_>,
        name: &str,
    ) -> Result<SavedSearch> {
        crate::retry_call!(
            self,
            __auth,
            endpoints::get_saved_search(
                &self.http,
                &self.base_url,
                &__auth,
                namespace,
                name,
                self.max_retries,
            )
            .await
        )
    }
}
