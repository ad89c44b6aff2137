//! Window manager configuration.
//!
//! Defaults come from `window_manager.toml`, validated and baked in by the build script. The
//! entry layer may override any field before handing the config to
//! [`crate::WindowManagerProvider`].

use std::time::Duration;

use form_drafts::DraftKeys;
use platform_host::StorageBackend;
use serde::{Deserialize, Serialize};

use crate::layout::FrameSizing;

mod generated {
    include!(concat!(env!("OUT_DIR"), "/window_manager_generated.rs"));
}

pub use generated::*;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
/// Tunables for window layout, id generation, and draft autosave.
pub struct WindowManagerConfig {
    /// Storage keys for draft records and the draft index.
    pub draft_keys: DraftKeys,
    /// Quiet period after the last edit before a draft is written.
    pub autosave_debounce_ms: u64,
    /// How long the "Draft saved" notice stays visible.
    pub draft_saved_notice_ms: u64,
    /// Prefix for generated window ids.
    pub window_id_prefix: String,
    /// Normal window width as a fraction of the viewport.
    pub normal_width_ratio: f64,
    /// Normal window height as a fraction of the viewport.
    pub normal_height_ratio: f64,
    /// Minimum normal window width in CSS pixels.
    pub min_window_width: i32,
    /// Minimum normal window height in CSS pixels.
    pub min_window_height: i32,
    /// Key/value backend used for drafts.
    pub storage_backend: StorageBackend,
}

impl Default for WindowManagerConfig {
    fn default() -> Self {
        Self {
            draft_keys: DraftKeys::new(DEFAULT_DRAFT_KEY_PREFIX, DEFAULT_DRAFT_INDEX_KEY),
            autosave_debounce_ms: DEFAULT_AUTOSAVE_DEBOUNCE_MS,
            draft_saved_notice_ms: DEFAULT_DRAFT_SAVED_NOTICE_MS,
            window_id_prefix: DEFAULT_WINDOW_ID_PREFIX.to_string(),
            normal_width_ratio: DEFAULT_NORMAL_WIDTH_RATIO,
            normal_height_ratio: DEFAULT_NORMAL_HEIGHT_RATIO,
            min_window_width: DEFAULT_MIN_WINDOW_WIDTH,
            min_window_height: DEFAULT_MIN_WINDOW_HEIGHT,
            storage_backend: DEFAULT_STORAGE_BACKEND,
        }
    }
}

impl WindowManagerConfig {
    /// Autosave debounce as a [`Duration`].
    pub fn autosave_debounce(&self) -> Duration {
        Duration::from_millis(self.autosave_debounce_ms)
    }

    /// "Draft saved" notice lifetime as a [`Duration`].
    pub fn draft_saved_notice(&self) -> Duration {
        Duration::from_millis(self.draft_saved_notice_ms)
    }

    /// Sizing rules for normal windows.
    pub fn frame_sizing(&self) -> FrameSizing {
        FrameSizing {
            width_ratio: self.normal_width_ratio,
            height_ratio: self.normal_height_ratio,
            min_width: self.min_window_width,
            min_height: self.min_window_height,
        }
    }
}
