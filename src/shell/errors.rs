//! Page error event filtering.

/// Benign layout warning browsers report as an error event.
pub const RESIZE_OBSERVER_LOOP: &str =
    "ResizeObserver loop completed with undelivered notifications.";

/// What to do with a reported page error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorDisposition {
    /// Swallowed: neither propagated nor shown.
    Suppressed,
    Propagate,
}

/// Drops known-benign error events before they reach the user.
#[derive(Debug, Clone)]
pub struct ErrorFilter {
    suppressed: Vec<String>,
}

impl Default for ErrorFilter {
    fn default() -> Self {
        Self {
            suppressed: vec![RESIZE_OBSERVER_LOOP.to_string()],
        }
    }
}

impl ErrorFilter {
    /// Classify an error event by its exact message.
    pub fn check(&self, message: &str) -> ErrorDisposition {
        if self.suppressed.iter().any(|m| m == message) {
            tracing::debug!(error = %message, "Benign page error suppressed");
            ErrorDisposition::Suppressed
        } else {
            tracing::warn!(error = %message, "Page error reported");
            ErrorDisposition::Propagate
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resize_observer_suppressed() {
        let filter = ErrorFilter::default();
        assert_eq!(filter.check(RESIZE_OBSERVER_LOOP), ErrorDisposition::Suppressed);
    }

    #[test]
    fn test_other_errors_propagate() {
        let filter = ErrorFilter::default();
        assert_eq!(filter.check("TypeError: x is undefined"), ErrorDisposition::Propagate);
        assert_eq!(filter.check("ResizeObserver loop limit exceeded"), ErrorDisposition::Propagate);
    }
}
