//! Semantic diagram model types.
//!
//! This module contains the declared representation of an architecture
//! diagram: what nodes exist, how they are grouped into clusters, and which
//! relationships connect them. It says nothing about positions; layout is
//! delegated to a rendering engine.
//!
//! # Pipeline Position
//!
//! ```text
//! Declaration (DiagramBuilder + Scope)
//!     ↓
//! Semantic Model (these types)
//!     ↓ structure
//! Validated Graph (DiagramGraph)
//!     ↓ export
//! DOT / SVG / PNG
//! ```
//!
//! # Organization
//!
//! - [`diagram`] - The root [`Diagram`] and its output options
//! - [`element`] - Diagram elements: [`Node`], [`Cluster`], [`Edge`]
//! - [`service`] - The icon catalog: [`Service`], [`Provider`], [`Category`]
//! - [`attributes`] - Ordered attribute overrides: [`Attributes`]

pub mod attributes;
pub mod diagram;
pub mod element;
pub mod service;

pub use attributes::*;
pub use diagram::*;
pub use element::*;
pub use service::*;

use thiserror::Error;

/// Error returned when a textual option does not name a known variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} `{value}`, expected one of: {expected}")]
pub struct UnknownVariant {
    kind: &'static str,
    value: String,
    expected: &'static str,
}

impl UnknownVariant {
    pub fn new(kind: &'static str, value: &str, expected: &'static str) -> Self {
        Self {
            kind,
            value: value.to_string(),
            expected,
        }
    }
}
