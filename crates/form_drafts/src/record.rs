use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Default key prefix for per-window draft records.
pub const DEFAULT_DRAFT_KEY_PREFIX: &str = "crm.form_draft.";
/// Default key of the draft id index.
pub const DEFAULT_DRAFT_INDEX_KEY: &str = "crm.form_draft.index";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Persisted snapshot of an in-progress form, keyed by its window id.
pub struct DraftRecord {
    /// Arbitrary form snapshot.
    pub form_data: Value,
    /// Unix milliseconds of the last write. Informational; drafts never expire.
    pub timestamp: u64,
    /// Window id the draft belongs to.
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Storage keys used by a [`crate::DraftStore`].
pub struct DraftKeys {
    /// Prefix prepended to a window id to form the record key.
    pub prefix: String,
    /// Key holding the JSON array of draft ids.
    pub index_key: String,
}

impl Default for DraftKeys {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_DRAFT_KEY_PREFIX.to_string(),
            index_key: DEFAULT_DRAFT_INDEX_KEY.to_string(),
        }
    }
}

impl DraftKeys {
    /// Builds a key set from explicit values.
    pub fn new(prefix: impl Into<String>, index_key: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            index_key: index_key.into(),
        }
    }

    /// Record key for `id`.
    pub fn record_key(&self, id: &str) -> String {
        format!("{}{id}", self.prefix)
    }
}
