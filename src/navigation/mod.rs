//! Navigation session subsystem.
//!
//! # Data Flow
//! ```text
//! navigate(path)
//!     → routing guard (Resolution | NavigationError)
//!     → ViewLoader (await lazily loaded view)
//!     → supersession check (newest generation only)
//!     → title.rs (apply title) → publish RenderedView
//! ```

pub mod navigator;
pub mod title;

pub use navigator::{
    EagerLoader, NavigateError, NavigationOutcome, Navigator, RenderedView, ViewLoadError, ViewLoader,
};
pub use title::DocumentTitle;
