//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (ports, hop ceiling, timeouts)
//! - Check theme colors are well-formed
//! - Keep the metrics path clear of the shell's own routes
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ShellConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system
//! - Backend port and protocol are never rejected: endpoint resolution takes
//!   them as configured, unusual values are only logged

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::{EndpointSettings, ShellConfig};

/// Paths the shell server routes itself. `/{*path}` covers everything else
/// under `/`, so only exact collisions are listed.
pub const RESERVED_PATHS: [&str; 4] = ["/", "/healthz", "/shell/config", "/shell/resolve"];
const RESERVED_PREFIX: &str = "/shell/";

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.bind_address {0:?} is not a socket address")]
    BindAddress(String),

    #[error("listener.public_host must not be empty")]
    EmptyPublicHost,

    #[error("endpoint.cluster_host must not be empty")]
    EmptyClusterHost,

    #[error("routing.max_redirect_hops must be at least 1")]
    RedirectHops,

    #[error("theme.{role} {value:?} is not a #rrggbb color")]
    ThemeColor { role: &'static str, value: String },

    #[error("notifications.max_toasts must be at least 1")]
    MaxToasts,

    #[error("timeouts.request_secs must be greater than 0")]
    RequestTimeout,

    #[error("observability.metrics_path {0:?} must start with '/'")]
    MetricsPath(String),

    #[error("observability.metrics_path {0:?} collides with a shell route")]
    ReservedMetricsPath(String),
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &ShellConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(
            config.listener.bind_address.clone(),
        ));
    }
    if config.listener.public_host.trim().is_empty() {
        errors.push(ValidationError::EmptyPublicHost);
    }

    let endpoint = &config.endpoint;
    if endpoint.cluster_host.trim().is_empty() {
        errors.push(ValidationError::EmptyClusterHost);
    }

    if config.routing.max_redirect_hops == 0 {
        errors.push(ValidationError::RedirectHops);
    }

    let theme = &config.theme;
    let roles: [(&'static str, &str); 8] = [
        ("primary", &theme.primary),
        ("secondary", &theme.secondary),
        ("accent", &theme.accent),
        ("error", &theme.error),
        ("warning", &theme.warning),
        ("info", &theme.info),
        ("success", &theme.success),
        ("background", &theme.background),
    ];
    for (role, value) in roles {
        if !is_hex_color(value) {
            errors.push(ValidationError::ThemeColor {
                role,
                value: value.to_string(),
            });
        }
    }

    if config.notifications.max_toasts == 0 {
        errors.push(ValidationError::MaxToasts);
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::RequestTimeout);
    }
    let metrics_path = &config.observability.metrics_path;
    if !metrics_path.starts_with('/') {
        errors.push(ValidationError::MetricsPath(metrics_path.clone()));
    } else if config.observability.metrics_enabled && is_reserved_path(metrics_path) {
        errors.push(ValidationError::ReservedMetricsPath(metrics_path.clone()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// True if serving `path` would clash with a route the shell registers.
pub fn is_reserved_path(path: &str) -> bool {
    let trimmed = match path.strip_suffix('/') {
        Some(rest) if !rest.is_empty() => rest,
        _ => path,
    };
    RESERVED_PATHS.contains(&trimmed) || path.starts_with(RESERVED_PREFIX) || path.contains('{')
}

/// Log endpoint values that resolve but are unlikely to reach a backend.
pub fn warn_unusual_endpoint(endpoint: &EndpointSettings) {
    if !matches!(endpoint.backend_port.parse::<u16>(), Ok(port) if port > 0) {
        tracing::warn!(backend_port = %endpoint.backend_port, "Backend port is not a usable port number");
    }
    if !matches!(endpoint.protocol.as_str(), "http" | "https") {
        tracing::warn!(protocol = %endpoint.protocol, "Backend protocol is neither http nor https");
    }
}

/// True for `#rrggbb`.
pub fn is_hex_color(value: &str) -> bool {
    value.len() == 7
        && value.starts_with('#')
        && value[1..].chars().all(|c| c.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(validate_config(&ShellConfig::default()), Ok(()));
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = ShellConfig::default();
        config.listener.bind_address = "nowhere".into();
        config.theme.accent = "blue".into();
        config.routing.max_redirect_hops = 0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.contains(&ValidationError::BindAddress("nowhere".into())));
        assert!(errors.contains(&ValidationError::ThemeColor {
            role: "accent",
            value: "blue".into()
        }));
    }

    #[test]
    fn test_unusual_endpoint_is_accepted() {
        let mut config = ShellConfig::default();
        config.endpoint.protocol = "ws".into();
        config.endpoint.backend_port = "0".into();
        assert_eq!(validate_config(&config), Ok(()));
    }

    #[test]
    fn test_metrics_path_must_not_shadow_shell_routes() {
        for path in ["/", "/healthz", "/healthz/", "/shell/config", "/shell/metrics", "/{*rest}"] {
            let mut config = ShellConfig::default();
            config.observability.metrics_path = path.into();
            assert_eq!(
                validate_config(&config),
                Err(vec![ValidationError::ReservedMetricsPath(path.into())]),
                "{path}"
            );
        }

        let mut config = ShellConfig::default();
        config.observability.metrics_path = "/healthz".into();
        config.observability.metrics_enabled = false;
        assert_eq!(validate_config(&config), Ok(()));

        config.observability.metrics_path = "/internal/metrics".into();
        config.observability.metrics_enabled = true;
        assert_eq!(validate_config(&config), Ok(()));
    }

    #[test]
    fn test_hex_color() {
        assert!(is_hex_color("#1976d2"));
        assert!(is_hex_color("#F0F4F8"));
        assert!(!is_hex_color("1976d2"));
        assert!(!is_hex_color("#1976d"));
        assert!(!is_hex_color("#19760g"));
    }
}
