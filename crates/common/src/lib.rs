//! Shared utilities for the learngl examples.
//!
//! Programs load their assets from a `resource/` directory that sits next to
//! the executable, regardless of the working directory they were started from.

pub mod resource;

pub use resource::{RESOURCE_DIR, ResourceError, resource_path, resource_path_in};
