//! Backend base URL resolution.
//!
//! # Responsibilities
//! - Pick the local or the cluster branch from the observed host name
//! - Compose the base URL from the configured port, protocol and cluster host
//! - Compute once per session and hand out the same value afterwards
//!
//! # Design Decisions
//! - `resolve_endpoint` is pure and total: every input has a default
//! - `EndpointResolver` memoizes with `OnceLock`; consumers receive an `Arc`
//!   instead of reaching for a global

use std::fmt;
use std::sync::{Arc, OnceLock};

use serde::Serialize;

use crate::config::EndpointSettings;

/// Host name that selects the local branch. Compared exactly.
pub const LOCALHOST: &str = "localhost";

/// Which resolution branch produced an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EndpointBranch {
    /// Viewer served from `localhost`, backend on the same machine.
    Local,
    /// Viewer served from anywhere else, backend addressed through the cluster.
    Cluster,
}

/// Resolved backend endpoint. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EndpointConfig {
    base_url: String,
    branch: EndpointBranch,
}

impl EndpointConfig {
    /// The `scheme://host:port` string every backend call starts from.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn branch(&self) -> EndpointBranch {
        self.branch
    }
}

impl fmt::Display for EndpointConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.base_url)
    }
}

/// Compute the endpoint for an observed host name.
pub fn resolve_endpoint(host: &str, settings: &EndpointSettings) -> EndpointConfig {
    if host == LOCALHOST {
        EndpointConfig {
            base_url: format!("http://{}:{}", LOCALHOST, settings.backend_port),
            branch: EndpointBranch::Local,
        }
    } else {
        EndpointConfig {
            base_url: format!(
                "{}://{}:{}",
                settings.protocol, settings.cluster_host, settings.backend_port
            ),
            branch: EndpointBranch::Cluster,
        }
    }
}

/// Session-scoped memoizing resolver.
///
/// The first call to [`EndpointResolver::resolve`] fixes the endpoint; later
/// calls return the same `Arc` whatever host they pass.
#[derive(Debug)]
pub struct EndpointResolver {
    settings: EndpointSettings,
    resolved: OnceLock<Arc<EndpointConfig>>,
}

impl EndpointResolver {
    pub fn new(settings: EndpointSettings) -> Self {
        Self {
            settings,
            resolved: OnceLock::new(),
        }
    }

    /// Resolve against `host`, or return the value fixed by an earlier call.
    pub fn resolve(&self, host: &str) -> Arc<EndpointConfig> {
        self.resolved
            .get_or_init(|| {
                let endpoint = resolve_endpoint(host, &self.settings);
                tracing::info!(
                    host = %host,
                    branch = ?endpoint.branch(),
                    base_url = %endpoint.base_url(),
                    "Backend endpoint resolved"
                );
                Arc::new(endpoint)
            })
            .clone()
    }

    /// The endpoint, if it has been resolved already.
    pub fn get(&self) -> Option<Arc<EndpointConfig>> {
        self.resolved.get().cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(port: &str, protocol: &str, cluster: &str) -> EndpointSettings {
        EndpointSettings {
            backend_port: port.into(),
            protocol: protocol.into(),
            cluster_host: cluster.into(),
        }
    }

    #[test]
    fn test_localhost_uses_local_branch() {
        let endpoint = resolve_endpoint("localhost", &EndpointSettings::default());
        assert_eq!(endpoint.base_url(), "http://localhost:30267");
        assert_eq!(endpoint.branch(), EndpointBranch::Local);
    }

    #[test]
    fn test_localhost_ignores_protocol_and_cluster() {
        let endpoint = resolve_endpoint("localhost", &settings("8000", "https", "10.1.1.1"));
        assert_eq!(endpoint.base_url(), "http://localhost:8000");
    }

    #[test]
    fn test_other_hosts_use_cluster_branch() {
        let endpoint = resolve_endpoint("viewer.example.com", &EndpointSettings::default());
        assert_eq!(endpoint.base_url(), "http://172.22.141.90:30267");
        assert_eq!(endpoint.branch(), EndpointBranch::Cluster);

        let endpoint = resolve_endpoint("127.0.0.1", &settings("443", "https", "docs.internal"));
        assert_eq!(endpoint.base_url(), "https://docs.internal:443");
    }

    #[test]
    fn test_host_comparison_is_exact() {
        let s = EndpointSettings::default();
        assert_eq!(resolve_endpoint("LOCALHOST", &s).branch(), EndpointBranch::Cluster);
        assert_eq!(resolve_endpoint("localhost.localdomain", &s).branch(), EndpointBranch::Cluster);
        assert_eq!(resolve_endpoint("", &s).branch(), EndpointBranch::Cluster);
    }

    #[test]
    fn test_resolver_memoizes_first_result() {
        let resolver = EndpointResolver::new(EndpointSettings::default());
        assert!(resolver.get().is_none());

        let first = resolver.resolve("localhost");
        let second = resolver.resolve("viewer.example.com");

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.base_url(), "http://localhost:30267");
        assert_eq!(resolver.get().unwrap().base_url(), first.base_url());
    }
}
