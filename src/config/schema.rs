//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the viewer shell.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the viewer shell.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ShellConfig {
    /// Listener configuration (bind address, public host name).
    pub listener: ListenerConfig,

    /// Backend endpoint inputs (port, protocol, cluster host).
    pub endpoint: EndpointSettings,

    /// Navigation settings.
    pub routing: RoutingConfig,

    /// Theme handed to the rendering engine.
    pub theme: ThemeConfig,

    /// Toast plugin configuration.
    pub notifications: NotificationConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Host name the viewer is served under.
    /// Decides which endpoint branch the resolver takes.
    pub public_host: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            public_host: "localhost".to_string(),
        }
    }
}

/// Inputs of the endpoint resolver.
///
/// Every field has a fallback so the resolver stays total.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct EndpointSettings {
    /// Backend port (env `BACKEND_PORT`).
    pub backend_port: String,

    /// Protocol scheme used off-localhost (env `PROTOCOL`).
    pub protocol: String,

    /// Externally reachable cluster address (env `K8S_HOST`).
    pub cluster_host: String,
}

pub const DEFAULT_BACKEND_PORT: &str = "30267";
pub const DEFAULT_PROTOCOL: &str = "http";
pub const DEFAULT_CLUSTER_HOST: &str = "172.22.141.90";

impl Default for EndpointSettings {
    fn default() -> Self {
        Self {
            backend_port: DEFAULT_BACKEND_PORT.to_string(),
            protocol: DEFAULT_PROTOCOL.to_string(),
            cluster_host: DEFAULT_CLUSTER_HOST.to_string(),
        }
    }
}

/// Navigation settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RoutingConfig {
    /// Redirect hops allowed before a navigation is declared cyclic.
    pub max_redirect_hops: usize,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self { max_redirect_hops: 4 }
    }
}

/// Theme configuration: a closed set of color roles plus the dark flag.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct ThemeConfig {
    /// Name of the theme selected at mount time.
    pub name: String,
    pub dark: bool,
    pub primary: String,
    pub secondary: String,
    pub accent: String,
    pub error: String,
    pub warning: String,
    pub info: String,
    pub success: String,
    pub background: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            name: "light".to_string(),
            dark: false,
            primary: "#1976d2".to_string(),
            secondary: "#0288d1".to_string(),
            accent: "#03a9f4".to_string(),
            error: "#f44336".to_string(),
            warning: "#ff9800".to_string(),
            info: "#00bcd4".to_string(),
            success: "#4caf50".to_string(),
            background: "#f0f4f8".to_string(),
        }
    }
}

/// Screen corner the toasts stack in.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ToastPosition {
    TopLeft,
    TopCenter,
    TopRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

/// Toast plugin configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct NotificationConfig {
    /// Animation name.
    pub transition: String,

    /// Maximum toasts visible at once.
    pub max_toasts: usize,

    /// Stack newest toast on top.
    pub newest_on_top: bool,

    pub position: ToastPosition,

    /// Auto-dismiss timeout in milliseconds.
    pub timeout_ms: u64,

    pub close_on_click: bool,
    pub pause_on_hover: bool,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            transition: "Vue-Toastification__bounce".to_string(),
            max_toasts: 3,
            newest_on_top: true,
            position: ToastPosition::TopRight,
            timeout_ms: 3000,
            close_on_click: true,
            pause_on_hover: true,
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Path the Prometheus exposition is served on.
    pub metrics_path: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: true,
            metrics_path: "/metrics".to_string(),
        }
    }
}
