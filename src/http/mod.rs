//! HTTP shell subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request ID, tracing, timeout)
//!     → routing guard (Resolution | NavigationError)
//!     → render.rs (shell page, error page) or 307 redirect
//!     → Send to client
//! ```

pub mod render;
pub mod server;

pub use server::{AppState, HttpServer};
