//! DocuSpotlight viewer shell library.

pub mod config;
pub mod endpoint;
pub mod http;
pub mod navigation;
pub mod observability;
pub mod routing;
pub mod shell;

pub use config::schema::ShellConfig;
pub use endpoint::EndpointConfig;
pub use http::HttpServer;
pub use routing::TaskRouter;
pub use shell::App;
