//! Error types for Canopy operations.
//!
//! This module provides the main error type [`CanopyError`] which wraps
//! the error conditions that can occur while declaring and rendering a
//! diagram.

use std::io;

use thiserror::Error;

/// The main error type for Canopy operations.
///
/// Failures reported by the Graphviz binary are carried unmodified in the
/// `Export` variant.
#[derive(Debug, Error)]
pub enum CanopyError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Graph error: {0}")]
    Graph(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error>),
}

impl CanopyError {
    /// Wrap an error reported by an external rendering backend.
    pub fn export(err: impl std::error::Error + 'static) -> Self {
        Self::Export(Box::new(err))
    }
}
