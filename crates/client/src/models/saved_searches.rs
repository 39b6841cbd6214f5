//! Saved search models.

use serde::{Deserialize, Serialize};

use crate::models::common::Entry;

/// `content` block of a saved search entry.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct SavedSearchContent {
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(
        default,
        deserialize_with = "crate::serde_helpers::bool_from_string_or_bool"
    )]
    pub disabled: bool,
    #[serde(
        default,
        deserialize_with = "crate::serde_helpers::bool_from_string_or_bool"
    )]
    pub is_scheduled: bool,
    #[serde(default)]
    pub cron_schedule: Option<String>,
}

/// Saved search information, flattened from its Atom entry.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct SavedSearch {
    pub name: String,
    /// The SPL query.
    pub search: String,
    pub description: Option<String>,
    pub disabled: bool,
    pub owner: Option<String>,
    pub app: Option<String>,
    pub updated: Option<String>,
    pub is_scheduled: bool,
    pub cron_schedule: Option<String>,
}

impl From<Entry<SavedSearchContent>> for SavedSearch {
    fn from(entry: Entry<SavedSearchContent>) -> Self {
        let (owner, app) = entry
            .acl
            .map(|acl| (Some(acl.owner), Some(acl.app)))
            .unwrap_or((None, None));
        Self {
            name: entry.name,
            search: entry.content.search,
            description: entry.content.description.filter(|d| !d.is_empty()),
            disabled: entry.content.disabled,
            owner,
            app,
            updated: entry.updated,
            is_scheduled: entry.content.is_scheduled,
            cron_schedule: entry.content.cron_schedule.filter(|c| !c.is_empty()),
        }
    }
}
