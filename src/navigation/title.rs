//! Visible document title.

use std::sync::Arc;

use arc_swap::ArcSwapOption;

/// The page title a session shows. Shared, lock-free reads.
#[derive(Debug, Default)]
pub struct DocumentTitle {
    current: ArcSwapOption<String>,
}

impl DocumentTitle {
    pub fn new(initial: Option<String>) -> Self {
        Self {
            current: ArcSwapOption::new(initial.map(Arc::new)),
        }
    }

    /// Apply a route title. `None` keeps whatever is shown now.
    pub fn apply(&self, title: Option<&str>) {
        if let Some(title) = title {
            self.current.store(Some(Arc::new(title.to_string())));
        }
    }

    pub fn get(&self) -> Option<String> {
        self.current.load_full().map(|t| t.as_ref().clone())
    }
}
