//! Typed URLs for the backend API the comparison view talks to.

use thiserror::Error;
use url::Url;

use crate::endpoint::resolver::EndpointConfig;

#[derive(Debug, Error)]
pub enum ApiUrlError {
    #[error("invalid backend base URL: {0}")]
    InvalidBase(#[from] url::ParseError),

    #[error("backend base URL {0} cannot carry a path")]
    CannotBeABase(String),
}

/// Builder for backend API URLs rooted at the resolved endpoint.
#[derive(Debug, Clone)]
pub struct BackendApi {
    base: Url,
}

impl BackendApi {
    pub fn new(endpoint: &EndpointConfig) -> Result<Self, ApiUrlError> {
        let base = Url::parse(endpoint.base_url())?;
        if base.cannot_be_a_base() {
            return Err(ApiUrlError::CannotBeABase(endpoint.base_url().to_string()));
        }
        Ok(Self { base })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// `GET /api/tasks`
    pub fn tasks(&self) -> Url {
        self.join(&["api", "tasks"])
    }

    /// `GET /api/tasks/<task_id>/comparison`
    pub fn task_comparison(&self, task_id: &str) -> Url {
        self.join(&["api", "tasks", task_id, "comparison"])
    }

    /// `GET /api/documents/<task_id>`
    pub fn documents(&self, task_id: &str) -> Url {
        self.join(&["api", "documents", task_id])
    }

    /// `GET|POST /api/schema/<task_id>`
    pub fn schema(&self, task_id: &str) -> Url {
        self.join(&["api", "schema", task_id])
    }

    /// `GET /api/multi-channel-results/<task_id>`
    pub fn multi_channel_results(&self, task_id: &str) -> Url {
        self.join(&["api", "multi-channel-results", task_id])
    }

    /// `GET /api/files/<path>`; `path` keeps its directory structure.
    pub fn file(&self, path: &str) -> Url {
        let mut segments = vec!["api", "files"];
        segments.extend(path.split('/').filter(|s| !s.is_empty()));
        self.join(&segments)
    }

    /// `POST /api/save-decision`
    pub fn save_decision(&self) -> Url {
        self.join(&["api", "save-decision"])
    }

    fn join(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        // `new` rejected cannot-be-a-base URLs, so segments are always available.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EndpointSettings;
    use crate::endpoint::resolver::resolve_endpoint;

    fn api(host: &str) -> BackendApi {
        BackendApi::new(&resolve_endpoint(host, &EndpointSettings::default())).unwrap()
    }

    #[test]
    fn test_task_urls() {
        let api = api("localhost");
        assert_eq!(api.tasks().as_str(), "http://localhost:30267/api/tasks");
        assert_eq!(
            api.task_comparison("sztaxi").as_str(),
            "http://localhost:30267/api/tasks/sztaxi/comparison"
        );
        assert_eq!(
            api.multi_channel_results("idd").as_str(),
            "http://localhost:30267/api/multi-channel-results/idd"
        );
    }

    #[test]
    fn test_segments_are_encoded() {
        let api = api("viewer.example.com");
        assert_eq!(
            api.documents("a b").as_str(),
            "http://172.22.141.90:30267/api/documents/a%20b"
        );
        assert_eq!(
            api.file("idd/page 1.png").as_str(),
            "http://172.22.141.90:30267/api/files/idd/page%201.png"
        );
    }

    #[test]
    fn test_routed_task_id_is_encoded_once() {
        let router = crate::routing::TaskRouter::with_default_routes(4).unwrap();
        let resolution = router.navigate("/comparison/task/%E6%BC%94%E7%A4%BA").unwrap();
        assert_eq!(
            api("localhost").task_comparison(&resolution.target.task_id).as_str(),
            "http://localhost:30267/api/tasks/%E6%BC%94%E7%A4%BA/comparison"
        );
    }

    #[test]
    fn test_save_decision() {
        assert_eq!(
            api("localhost").save_decision().as_str(),
            "http://localhost:30267/api/save-decision"
        );
    }
}
