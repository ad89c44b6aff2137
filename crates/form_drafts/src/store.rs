//! Draft persistence over the host key/value port.
//!
//! Public operations never fail: storage and codec errors are logged and degraded to a no-op
//! or an empty result so a broken backend can never take a form window down with it.

use std::rc::Rc;

use leptos::logging::warn;
use platform_host::{next_monotonic_timestamp_ms, KeyValueStore};
use serde::Serialize;
use thiserror::Error;

use crate::record::{DraftKeys, DraftRecord};

#[derive(Debug, Error)]
pub(crate) enum DraftStoreError {
    #[error("storage {op} failed for `{key}`: {message}")]
    Storage {
        op: &'static str,
        key: String,
        message: String,
    },
    #[error("malformed JSON under `{key}`: {source}")]
    Codec {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

impl DraftStoreError {
    fn storage(op: &'static str, key: &str, message: String) -> Self {
        Self::Storage {
            op,
            key: key.to_string(),
            message,
        }
    }

    fn codec(key: &str, source: serde_json::Error) -> Self {
        Self::Codec {
            key: key.to_string(),
            source,
        }
    }
}

#[derive(Clone)]
/// Debounce-friendly draft store shared by every form window.
///
/// Records live under `<prefix><id>`; the ordered id index lives under a separate key and is
/// maintained with a second, independent write.
pub struct DraftStore {
    kv: Rc<dyn KeyValueStore>,
    keys: DraftKeys,
}

impl std::fmt::Debug for DraftStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DraftStore")
            .field("keys", &self.keys)
            .finish_non_exhaustive()
    }
}

impl DraftStore {
    /// Creates a store over `kv` using `keys`.
    pub fn new(kv: Rc<dyn KeyValueStore>, keys: DraftKeys) -> Self {
        Self { kv, keys }
    }

    /// Storage keys in use.
    pub fn keys(&self) -> &DraftKeys {
        &self.keys
    }

    /// Writes (or overwrites) the draft for `id` and records `id` in the index.
    ///
    /// Returns `true` once both the record and the index are written. Failures are logged, never
    /// raised.
    pub async fn save_draft<T: Serialize + ?Sized>(&self, id: &str, form_data: &T) -> bool {
        match self.try_save_draft(id, form_data).await {
            Ok(()) => true,
            Err(err) => {
                warn!("[form_drafts] failed to save draft `{id}`: {err}");
                false
            }
        }
    }

    /// Loads the draft for `id`. Absent or unreadable drafts yield `None`.
    pub async fn get_draft(&self, id: &str) -> Option<DraftRecord> {
        match self.try_get_draft(id).await {
            Ok(record) => record,
            Err(err) => {
                warn!("[form_drafts] failed to load draft `{id}`: {err}");
                None
            }
        }
    }

    /// Removes the draft for `id` and drops it from the index.
    pub async fn delete_draft(&self, id: &str) {
        if let Err(err) = self.try_delete_draft(id).await {
            warn!("[form_drafts] failed to delete draft `{id}`: {err}");
        }
    }

    /// Ids currently listed in the index, in insertion order.
    pub async fn get_all_draft_ids(&self) -> Vec<String> {
        match self.read_index().await {
            Ok(ids) => ids,
            Err(err) => {
                warn!("[form_drafts] failed to read draft index: {err}");
                Vec::new()
            }
        }
    }

    /// Every indexed draft that can still be loaded. Index entries without a readable record
    /// are skipped.
    pub async fn get_all_drafts(&self) -> Vec<DraftRecord> {
        let mut drafts = Vec::new();
        for id in self.get_all_draft_ids().await {
            if let Some(record) = self.get_draft(&id).await {
                drafts.push(record);
            }
        }
        drafts
    }

    /// Deletes every indexed draft and then the index itself.
    pub async fn clear_all_drafts(&self) {
        for id in self.get_all_draft_ids().await {
            self.delete_draft(&id).await;
        }
        let index_key = &self.keys.index_key;
        if let Err(message) = self.kv.remove_item(index_key).await {
            let err = DraftStoreError::storage("remove", index_key, message);
            warn!("[form_drafts] failed to clear draft index: {err}");
        }
    }

    async fn try_save_draft<T: Serialize + ?Sized>(
        &self,
        id: &str,
        form_data: &T,
    ) -> Result<(), DraftStoreError> {
        let key = self.keys.record_key(id);
        let record = DraftRecord {
            form_data: serde_json::to_value(form_data)
                .map_err(|e| DraftStoreError::codec(&key, e))?,
            timestamp: next_monotonic_timestamp_ms(),
            id: id.to_string(),
        };
        let raw = serde_json::to_string(&record).map_err(|e| DraftStoreError::codec(&key, e))?;
        self.kv
            .set_item(&key, &raw)
            .await
            .map_err(|message| DraftStoreError::storage("set", &key, message))?;

        let mut ids = self.read_index_for_update().await?;
        if !ids.iter().any(|existing| existing == id) {
            ids.push(id.to_string());
            self.write_index(&ids).await?;
        }
        Ok(())
    }

    async fn try_get_draft(&self, id: &str) -> Result<Option<DraftRecord>, DraftStoreError> {
        let key = self.keys.record_key(id);
        let Some(raw) = self
            .kv
            .get_item(&key)
            .await
            .map_err(|message| DraftStoreError::storage("get", &key, message))?
        else {
            return Ok(None);
        };
        let record = serde_json::from_str(&raw).map_err(|e| DraftStoreError::codec(&key, e))?;
        Ok(Some(record))
    }

    async fn try_delete_draft(&self, id: &str) -> Result<(), DraftStoreError> {
        let key = self.keys.record_key(id);
        self.kv
            .remove_item(&key)
            .await
            .map_err(|message| DraftStoreError::storage("remove", &key, message))?;

        let ids = self.read_index_for_update().await?;
        let before = ids.len();
        let ids: Vec<String> = ids.into_iter().filter(|existing| existing != id).collect();
        if ids.len() != before {
            self.write_index(&ids).await?;
        }
        Ok(())
    }

    async fn read_index(&self) -> Result<Vec<String>, DraftStoreError> {
        let key = &self.keys.index_key;
        let Some(raw) = self
            .kv
            .get_item(key)
            .await
            .map_err(|message| DraftStoreError::storage("get", key, message))?
        else {
            return Ok(Vec::new());
        };
        serde_json::from_str(&raw).map_err(|e| DraftStoreError::codec(key, e))
    }

    /// Index read used by writers. A corrupt index is replaced rather than blocking the write.
    async fn read_index_for_update(&self) -> Result<Vec<String>, DraftStoreError> {
        match self.read_index().await {
            Err(err @ DraftStoreError::Codec { .. }) => {
                warn!("[form_drafts] discarding unreadable draft index: {err}");
                Ok(Vec::new())
            }
            other => other,
        }
    }

    async fn write_index(&self, ids: &[String]) -> Result<(), DraftStoreError> {
        let key = &self.keys.index_key;
        let raw = serde_json::to_string(ids).map_err(|e| DraftStoreError::codec(key, e))?;
        self.kv
            .set_item(key, &raw)
            .await
            .map_err(|message| DraftStoreError::storage("set", key, message))
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use platform_host::{KeyValueStoreFuture, MemoryKeyValueStore};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn store_with_memory() -> (DraftStore, MemoryKeyValueStore) {
        let memory = MemoryKeyValueStore::default();
        let store = DraftStore::new(Rc::new(memory.clone()), DraftKeys::default());
        (store, memory)
    }

    /// Store double whose reads and/or writes always fail.
    struct FailingStore {
        fail_reads: bool,
        fail_writes: bool,
        inner: MemoryKeyValueStore,
    }

    impl KeyValueStore for FailingStore {
        fn get_item<'a>(
            &'a self,
            key: &'a str,
        ) -> KeyValueStoreFuture<'a, Result<Option<String>, String>> {
            if self.fail_reads {
                return Box::pin(async { Err("read denied".to_string()) });
            }
            self.inner.get_item(key)
        }

        fn set_item<'a>(
            &'a self,
            key: &'a str,
            value: &'a str,
        ) -> KeyValueStoreFuture<'a, Result<(), String>> {
            if self.fail_writes {
                return Box::pin(async { Err("quota exceeded".to_string()) });
            }
            self.inner.set_item(key, value)
        }

        fn remove_item<'a>(&'a self, key: &'a str) -> KeyValueStoreFuture<'a, Result<(), String>> {
            if self.fail_writes {
                return Box::pin(async { Err("write denied".to_string()) });
            }
            self.inner.remove_item(key)
        }
    }

    #[test]
    fn saved_draft_round_trips_and_is_indexed() {
        let (store, memory) = store_with_memory();
        let data = json!({"name": "Ann", "phone": "123"});

        assert!(block_on(store.save_draft("w1", &data)));

        let record = block_on(store.get_draft("w1")).expect("draft present");
        assert_eq!(record.id, "w1");
        assert_eq!(record.form_data, data);
        assert_eq!(block_on(store.get_all_draft_ids()), vec!["w1".to_string()]);
        assert!(memory.raw("crm.form_draft.w1").is_some());
    }

    #[test]
    fn record_uses_camel_case_wire_shape() {
        let (store, memory) = store_with_memory();
        block_on(store.save_draft("w1", &json!({"name": "Ann"})));

        let raw = memory.raw("crm.form_draft.w1").expect("raw record");
        let value: serde_json::Value = serde_json::from_str(&raw).expect("json");
        assert_eq!(value["formData"], json!({"name": "Ann"}));
        assert_eq!(value["id"], json!("w1"));
        assert!(value["timestamp"].is_u64());
        assert_eq!(memory.raw("crm.form_draft.index"), Some("[\"w1\"]".to_string()));
    }

    #[test]
    fn overwrite_replaces_record_without_duplicating_index_entry() {
        let (store, _) = store_with_memory();
        block_on(store.save_draft("w1", &json!({"name": "A"})));
        block_on(store.save_draft("w2", &json!({"name": "B"})));
        block_on(store.save_draft("w1", &json!({"name": "A2"})));

        assert_eq!(
            block_on(store.get_all_draft_ids()),
            vec!["w1".to_string(), "w2".to_string()]
        );
        let record = block_on(store.get_draft("w1")).expect("draft");
        assert_eq!(record.form_data, json!({"name": "A2"}));
    }

    #[test]
    fn delete_removes_record_and_index_entry() {
        let (store, memory) = store_with_memory();
        block_on(store.save_draft("w1", &json!({})));
        block_on(store.save_draft("w2", &json!({})));

        block_on(store.delete_draft("w1"));

        assert_eq!(block_on(store.get_draft("w1")), None);
        assert_eq!(block_on(store.get_all_draft_ids()), vec!["w2".to_string()]);
        assert!(memory.raw("crm.form_draft.w1").is_none());
        block_on(store.delete_draft("missing"));
        assert_eq!(block_on(store.get_all_draft_ids()), vec!["w2".to_string()]);
    }

    #[test]
    fn all_drafts_skips_index_entries_without_records() {
        let (store, memory) = store_with_memory();
        block_on(store.save_draft("w1", &json!({"n": 1})));
        memory.insert_raw("crm.form_draft.index", "[\"ghost\",\"w1\"]");

        let drafts = block_on(store.get_all_drafts());
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].id, "w1");
    }

    #[test]
    fn malformed_values_degrade_to_empty_results() {
        let (store, memory) = store_with_memory();
        memory.insert_raw("crm.form_draft.w1", "{not json");
        memory.insert_raw("crm.form_draft.index", "oops");

        assert_eq!(block_on(store.get_draft("w1")), None);
        assert!(block_on(store.get_all_draft_ids()).is_empty());
        assert!(block_on(store.get_all_drafts()).is_empty());
    }

    #[test]
    fn save_replaces_corrupt_index() {
        let (store, memory) = store_with_memory();
        memory.insert_raw("crm.form_draft.index", "oops");

        block_on(store.save_draft("w1", &json!({})));

        assert_eq!(block_on(store.get_all_draft_ids()), vec!["w1".to_string()]);
    }

    #[test]
    fn clear_all_removes_records_and_index() {
        let (store, memory) = store_with_memory();
        memory.insert_raw("unrelated", "keep");
        block_on(store.save_draft("w1", &json!({})));
        block_on(store.save_draft("w2", &json!({})));

        block_on(store.clear_all_drafts());

        assert!(block_on(store.get_all_drafts()).is_empty());
        assert_eq!(memory.keys(), vec!["unrelated".to_string()]);
    }

    #[test]
    fn custom_keys_are_honored() {
        let memory = MemoryKeyValueStore::default();
        let store = DraftStore::new(
            Rc::new(memory.clone()),
            DraftKeys::new("school.draft/", "school.draft/all"),
        );
        block_on(store.save_draft("x", &json!(1)));

        assert_eq!(
            memory.keys(),
            vec!["school.draft/all".to_string(), "school.draft/x".to_string()]
        );
    }

    #[test]
    fn failing_writes_are_swallowed() {
        let store = DraftStore::new(
            Rc::new(FailingStore {
                fail_reads: false,
                fail_writes: true,
                inner: MemoryKeyValueStore::default(),
            }),
            DraftKeys::default(),
        );

        assert!(!block_on(store.save_draft("w1", &json!({"name": "A"}))));
        block_on(store.delete_draft("w1"));
        block_on(store.clear_all_drafts());

        assert_eq!(block_on(store.get_draft("w1")), None);
        assert!(block_on(store.get_all_draft_ids()).is_empty());
    }

    #[test]
    fn failing_reads_yield_no_drafts() {
        let inner = MemoryKeyValueStore::default();
        inner.insert_raw(
            "crm.form_draft.w1",
            "{\"formData\":{},\"timestamp\":1,\"id\":\"w1\"}",
        );
        inner.insert_raw("crm.form_draft.index", "[\"w1\"]");
        let store = DraftStore::new(
            Rc::new(FailingStore {
                fail_reads: true,
                fail_writes: false,
                inner,
            }),
            DraftKeys::default(),
        );

        assert_eq!(block_on(store.get_draft("w1")), None);
        assert!(block_on(store.get_all_drafts()).is_empty());
    }
}
