//! Host-owned text panels

use parking_lot::RwLock;
use std::sync::Arc;

#[derive(Debug)]
struct PanelState {
    title: String,
    text: String,
    visible: bool,
    /// Bumped on every text change so the host can tell what to redraw
    revision: u64,
}

/// Shared handle to a text panel.
///
/// The host keeps one clone for display; the plugin keeps another to write
/// into. Panels start visible.
#[derive(Debug, Clone)]
pub struct Panel {
    inner: Arc<RwLock<PanelState>>,
}

impl Panel {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(PanelState {
                title: title.into(),
                text: String::new(),
                visible: true,
                revision: 0,
            })),
        }
    }

    /// Whether both handles point at the same panel
    pub fn same(&self, other: &Panel) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    pub fn title(&self) -> String {
        self.inner.read().title.clone()
    }

    pub fn text(&self) -> String {
        self.inner.read().text.clone()
    }

    /// Replace the panel text
    pub fn set_text(&self, text: impl Into<String>) {
        let mut state = self.inner.write();
        state.text = text.into();
        state.revision += 1;
    }

    pub fn is_visible(&self) -> bool {
        self.inner.read().visible
    }

    pub fn set_visible(&self, visible: bool) {
        self.inner.write().visible = visible;
    }

    /// Flip visibility, returning the new state
    pub fn toggle(&self) -> bool {
        let mut state = self.inner.write();
        state.visible = !state.visible;
        state.visible
    }

    pub fn revision(&self) -> u64 {
        self.inner.read().revision
    }
}
