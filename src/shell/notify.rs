//! Toast notification plugin.
//!
//! The shell only installs the capability; views raise the notifications.

use std::sync::Arc;

use serde::Serialize;

use crate::config::{NotificationConfig, ToastPosition};

/// Options every toast is raised with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToastOptions {
    pub transition: String,
    pub max_toasts: usize,
    pub newest_on_top: bool,
    pub position: ToastPosition,
    pub timeout: u64,
    pub close_on_click: bool,
    pub pause_on_hover: bool,
}

impl From<&NotificationConfig> for ToastOptions {
    fn from(config: &NotificationConfig) -> Self {
        Self {
            transition: config.transition.clone(),
            max_toasts: config.max_toasts,
            newest_on_top: config.newest_on_top,
            position: config.position,
            timeout: config.timeout_ms,
            close_on_click: config.close_on_click,
            pause_on_hover: config.pause_on_hover,
        }
    }
}

/// The `notify(message, options)` capability.
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str, options: &ToastOptions);
}

/// Notifier that writes toasts to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, message: &str, options: &ToastOptions) {
        tracing::info!(position = ?options.position, timeout_ms = options.timeout, "{}", message);
    }
}

/// Installed plugin: a notifier bound to its configured options.
#[derive(Clone)]
pub struct ToastPlugin {
    options: ToastOptions,
    notifier: Arc<dyn Notifier>,
}

impl ToastPlugin {
    pub fn install(config: &NotificationConfig, notifier: Arc<dyn Notifier>) -> Self {
        let options = ToastOptions::from(config);
        tracing::debug!(max_toasts = options.max_toasts, position = ?options.position, "Toast plugin installed");
        Self { options, notifier }
    }

    pub fn options(&self) -> &ToastOptions {
        &self.options
    }

    pub fn notify(&self, message: &str) {
        self.notifier.notify(message, &self.options);
    }
}

impl std::fmt::Debug for ToastPlugin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToastPlugin")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder(Mutex<Vec<(String, ToastOptions)>>);

    impl Notifier for Recorder {
        fn notify(&self, message: &str, options: &ToastOptions) {
            self.0.lock().unwrap().push((message.to_string(), options.clone()));
        }
    }

    #[test]
    fn test_default_options() {
        let options = ToastOptions::from(&NotificationConfig::default());
        assert_eq!(options.transition, "Vue-Toastification__bounce");
        assert_eq!(options.max_toasts, 3);
        assert!(options.newest_on_top);
        assert_eq!(options.position, ToastPosition::TopRight);
        assert_eq!(options.timeout, 3000);
        assert!(options.close_on_click);
        assert!(options.pause_on_hover);
    }

    #[test]
    fn test_plugin_passes_configured_options() {
        let recorder = Arc::new(Recorder::default());
        let plugin = ToastPlugin::install(&NotificationConfig::default(), recorder.clone());

        plugin.notify("Decision saved");

        let sent = recorder.0.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, "Decision saved");
        assert_eq!(&sent[0].1, plugin.options());
    }

    #[test]
    fn test_options_serialize_camel_case() {
        let json = serde_json::to_value(ToastOptions::from(&NotificationConfig::default())).unwrap();
        assert_eq!(json["maxToasts"], 3);
        assert_eq!(json["position"], "top-right");
        assert_eq!(json["closeOnClick"], true);
    }
}
