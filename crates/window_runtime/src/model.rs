//! Window registry data model.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
/// Opaque window identifier, unique among open windows.
///
/// Callers may supply their own (for example `customer-edit-42`) so reopening the same entity
/// brings back the same window and draft.
pub struct WindowId(pub String);

impl WindowId {
    /// Wraps `id`.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrowed string form.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for WindowId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for WindowId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
/// Display state of an open window.
pub enum WindowState {
    /// Centered panel.
    #[default]
    Normal,
    /// Collapsed into the tray.
    Minimized,
    /// Fills the viewport.
    Maximized,
}

#[derive(Debug, Clone, PartialEq)]
/// Registry entry for one open window.
///
/// `minimized_order` is `Some` exactly when `state` is [`WindowState::Minimized`].
pub struct WindowRecord<C> {
    /// Window id.
    pub id: WindowId,
    /// Header/tray label.
    pub title: String,
    /// Caller-owned payload rendered in the window body.
    pub content: C,
    /// Current display state.
    pub state: WindowState,
    /// Tray ordering stamp; larger means more recently minimized.
    pub minimized_order: Option<u64>,
}

impl<C> WindowRecord<C> {
    /// Builds a fresh record in [`WindowState::Normal`].
    pub fn new(id: WindowId, title: impl Into<String>, content: C) -> Self {
        Self {
            id,
            title: title.into(),
            content,
            state: WindowState::Normal,
            minimized_order: None,
        }
    }

    /// Whether the window sits in the tray.
    pub fn is_minimized(&self) -> bool {
        self.state == WindowState::Minimized
    }

    /// Whether the window fills the viewport.
    pub fn is_maximized(&self) -> bool {
        self.state == WindowState::Maximized
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Caller request to open (or bring back) a window.
pub struct OpenWindowRequest<C> {
    /// Explicit id. When absent an id is generated from `id_prefix`.
    pub id: Option<WindowId>,
    /// Prefix for a generated id. Falls back to the configured default.
    pub id_prefix: Option<String>,
    /// Title shown in the header and tray.
    pub title: String,
    /// Payload rendered in the body.
    pub content: C,
}

impl<C> OpenWindowRequest<C> {
    /// Creates a request with a generated id.
    pub fn new(title: impl Into<String>, content: C) -> Self {
        Self {
            id: None,
            id_prefix: None,
            title: title.into(),
            content,
        }
    }

    /// Uses an explicit window id.
    pub fn with_id(mut self, id: impl Into<WindowId>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Uses `prefix` when generating the window id.
    pub fn with_id_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.id_prefix = Some(prefix.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Full in-memory registry state. Never persisted.
pub struct WindowRegistryState<C> {
    /// Open windows in opening order.
    pub windows: Vec<WindowRecord<C>>,
    /// Next tray stamp handed out by a minimize.
    pub next_minimized_order: u64,
}

impl<C> Default for WindowRegistryState<C> {
    fn default() -> Self {
        Self {
            windows: Vec::new(),
            next_minimized_order: 0,
        }
    }
}

impl<C> WindowRegistryState<C> {
    /// Looks up a window by id.
    pub fn window(&self, id: &WindowId) -> Option<&WindowRecord<C>> {
        self.windows.iter().find(|w| &w.id == id)
    }

    /// Whether `id` names an open window.
    pub fn contains(&self, id: &WindowId) -> bool {
        self.window(id).is_some()
    }

    /// Minimized windows, most recently minimized first.
    pub fn minimized_windows(&self) -> Vec<&WindowRecord<C>> {
        tray_order(&self.windows)
    }
}

/// Minimized records from `windows` in tray order (descending `minimized_order`).
pub fn tray_order<C>(windows: &[WindowRecord<C>]) -> Vec<&WindowRecord<C>> {
    let mut minimized: Vec<_> = windows.iter().filter(|w| w.is_minimized()).collect();
    minimized.sort_by(|a, b| b.minimized_order.cmp(&a.minimized_order));
    minimized
}
