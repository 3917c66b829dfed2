//! Shader build diagnostics.
//!
//! Compilation and link failures are logged, not propagated: a broken shader
//! shows up as a missing or wrong image, and the program keeps running.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

/// A failed shader build step, carrying the backend's info log.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ShaderError {
    #[error("{stage} shader compilation failed: {log}")]
    Compilation { stage: ShaderStage, log: String },
    #[error("shader program linking failed: {log}")]
    Link { log: String },
}

/// Log a failed build step. Returns the built object on success.
pub fn check_and_log<T>(result: Result<T, ShaderError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::error!("{e}");
            None
        }
    }
}
