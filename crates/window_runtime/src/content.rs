use std::rc::Rc;

use leptos::View;

use crate::model::WindowId;

/// Caller-owned window body: a view factory invoked once when the window mounts.
///
/// The factory receives the id the window ended up with, which form content uses as its draft
/// key. Equality is identity of the factory.
#[derive(Clone)]
pub struct WindowContent(Rc<dyn Fn(WindowId) -> View>);

impl WindowContent {
    /// Wraps a view factory.
    pub fn new(render: impl Fn(WindowId) -> View + 'static) -> Self {
        Self(Rc::new(render))
    }

    /// Builds the body view for `window_id`.
    pub fn render(&self, window_id: WindowId) -> View {
        (self.0)(window_id)
    }
}

impl std::fmt::Debug for WindowContent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("WindowContent(..)")
    }
}

impl PartialEq for WindowContent {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}
