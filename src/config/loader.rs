//! Configuration loading from disk and the process environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::{EndpointSettings, ShellConfig};
use crate::config::validation::{validate_config, warn_unusual_endpoint, ValidationError};

pub const ENV_BACKEND_PORT: &str = "BACKEND_PORT";
pub const ENV_PROTOCOL: &str = "PROTOCOL";
pub const ENV_CLUSTER_HOST: &str = "K8S_HOST";
pub const ENV_PUBLIC_HOST: &str = "DOCUSPOTLIGHT_HOST";
pub const ENV_CONFIG_PATH: &str = "DOCUSPOTLIGHT_CONFIG";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<ShellConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: ShellConfig = toml::from_str(&content)?;

    validate_config(&config).map_err(ConfigError::Validation)?;
    warn_unusual_endpoint(&config.endpoint);

    Ok(config)
}

/// Load the configuration the binary starts with.
///
/// Reads the file named by `DOCUSPOTLIGHT_CONFIG` when set, otherwise starts
/// from defaults, then overlays the environment and validates the result.
pub fn load_from_env() -> Result<ShellConfig, ConfigError> {
    let mut config = match std::env::var(ENV_CONFIG_PATH) {
        Ok(path) if !path.is_empty() => {
            let content = fs::read_to_string(&path)?;
            toml::from_str(&content)?
        }
        _ => ShellConfig::default(),
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    validate_config(&config).map_err(ConfigError::Validation)?;
    warn_unusual_endpoint(&config.endpoint);

    Ok(config)
}

/// Overlay environment values onto a configuration.
///
/// Empty values count as absent so the configured fallback survives.
pub fn apply_env_overrides<F>(config: &mut ShellConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let lookup = |key: &str| lookup(key).filter(|v| !v.is_empty());

    let EndpointSettings {
        backend_port,
        protocol,
        cluster_host,
    } = &mut config.endpoint;

    if let Some(port) = lookup(ENV_BACKEND_PORT) {
        *backend_port = port;
    }
    if let Some(scheme) = lookup(ENV_PROTOCOL) {
        *protocol = scheme;
    }
    if let Some(host) = lookup(ENV_CLUSTER_HOST) {
        *cluster_host = host;
    }
    if let Some(host) = lookup(ENV_PUBLIC_HOST) {
        config.listener.public_host = host;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_env_overrides_endpoint() {
        let vars = env(&[
            ("BACKEND_PORT", "9000"),
            ("PROTOCOL", "https"),
            ("K8S_HOST", "10.0.0.7"),
        ]);
        let mut config = ShellConfig::default();
        apply_env_overrides(&mut config, |k| vars.get(k).cloned());

        assert_eq!(config.endpoint.backend_port, "9000");
        assert_eq!(config.endpoint.protocol, "https");
        assert_eq!(config.endpoint.cluster_host, "10.0.0.7");
        assert_eq!(config.listener.public_host, "localhost");
    }

    #[test]
    fn test_missing_env_keeps_defaults() {
        let vars = env(&[("PROTOCOL", "")]);
        let mut config = ShellConfig::default();
        apply_env_overrides(&mut config, |k| vars.get(k).cloned());

        assert_eq!(config.endpoint, EndpointSettings::default());
    }

    #[test]
    fn test_load_config_from_toml() {
        let path = std::env::temp_dir().join(format!("docuspotlight-{}.toml", uuid::Uuid::new_v4()));
        let mut file = fs::File::create(&path).unwrap();
        writeln!(
            file,
            "[listener]\npublic_host = \"viewer.internal\"\n\n[endpoint]\nbackend_port = \"31000\"\n\n[notifications]\nposition = \"bottom-left\""
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        let _ = fs::remove_file(&path);

        assert_eq!(config.listener.public_host, "viewer.internal");
        assert_eq!(config.endpoint.backend_port, "31000");
        assert_eq!(config.endpoint.protocol, "http");
        assert_eq!(
            config.notifications.position,
            crate::config::schema::ToastPosition::BottomLeft
        );
        assert_eq!(config.notifications.max_toasts, 3);
    }

    #[test]
    fn test_unusual_protocol_loads() {
        let path = std::env::temp_dir().join(format!("docuspotlight-{}.toml", uuid::Uuid::new_v4()));
        fs::write(&path, "[endpoint]\nprotocol = \"ws\"\nbackend_port = \"0\"\n").unwrap();

        let config = load_config(&path).unwrap();
        let _ = fs::remove_file(&path);

        assert_eq!(config.endpoint.protocol, "ws");
        assert_eq!(config.endpoint.backend_port, "0");
    }

    #[test]
    fn test_load_config_rejects_invalid() {
        let path = std::env::temp_dir().join(format!("docuspotlight-{}.toml", uuid::Uuid::new_v4()));
        fs::write(&path, "[routing]\nmax_redirect_hops = 0\n").unwrap();

        let err = load_config(&path).unwrap_err();
        let _ = fs::remove_file(&path);

        assert!(matches!(err, ConfigError::Validation(_)));
    }
}
