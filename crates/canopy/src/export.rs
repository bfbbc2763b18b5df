//! Rendering engines.
//!
//! A diagram is rendered either by the Graphviz `dot` binary (feature
//! `graphviz`) or by the pure-Rust native engine. Both share the attribute
//! defaults in [`theme`].

#[cfg(feature = "graphviz")]
mod dot;
#[cfg(feature = "graphviz")]
mod graphviz;
mod native;
pub(crate) mod theme;

use std::{fmt, str::FromStr};

use serde::Deserialize;

use canopy_core::semantic::{Diagram, OutputFormat, UnknownVariant};

use crate::{config::AppConfig, error::CanopyError};
use theme::Theme;

/// Layout and drawing backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Engine {
    /// The system Graphviz `dot` binary.
    Graphviz,
    /// Built-in layout, no external tools required.
    Native,
}

impl Default for Engine {
    fn default() -> Self {
        if cfg!(feature = "graphviz") {
            Self::Graphviz
        } else {
            Self::Native
        }
    }
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Graphviz => f.write_str("graphviz"),
            Self::Native => f.write_str("native"),
        }
    }
}

impl FromStr for Engine {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "graphviz" | "dot" => Ok(Self::Graphviz),
            "native" => Ok(Self::Native),
            _ => Err(UnknownVariant::new("engine", s, "graphviz, native")),
        }
    }
}

/// An encoded diagram image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    format: OutputFormat,
    bytes: Vec<u8>,
}

impl Rendered {
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

/// Render `diagram` with the configured engine.
pub(crate) fn render(
    diagram: &Diagram,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<Rendered, CanopyError> {
    let theme = Theme::new(config.style())?;

    let bytes = match config.render().engine() {
        Engine::Native => native::render(diagram, &theme, format)?,
        Engine::Graphviz => render_graphviz(diagram, config, &theme, format)?,
    };

    Ok(Rendered { format, bytes })
}

/// DOT source the configured engine lays out.
pub(crate) fn dot_source(diagram: &Diagram, config: &AppConfig) -> Result<String, CanopyError> {
    let theme = Theme::new(config.style())?;
    match config.render().engine() {
        Engine::Native => Ok(native::layout_dot(diagram)),
        Engine::Graphviz => graphviz_source(diagram, config, &theme),
    }
}

#[cfg(feature = "graphviz")]
fn render_graphviz(
    diagram: &Diagram,
    config: &AppConfig,
    theme: &Theme,
    format: OutputFormat,
) -> Result<Vec<u8>, CanopyError> {
    let graph = dot::DotBuilder::new(theme, config.icons()).build(diagram);
    graphviz::render(graph, format)
}

#[cfg(feature = "graphviz")]
fn graphviz_source(
    diagram: &Diagram,
    config: &AppConfig,
    theme: &Theme,
) -> Result<String, CanopyError> {
    Ok(dot::DotBuilder::new(theme, config.icons()).print(diagram))
}

#[cfg(not(feature = "graphviz"))]
fn render_graphviz(
    _diagram: &Diagram,
    _config: &AppConfig,
    _theme: &Theme,
    _format: OutputFormat,
) -> Result<Vec<u8>, CanopyError> {
    Err(graphviz_unavailable())
}

#[cfg(not(feature = "graphviz"))]
fn graphviz_source(
    _diagram: &Diagram,
    _config: &AppConfig,
    _theme: &Theme,
) -> Result<String, CanopyError> {
    Err(graphviz_unavailable())
}

#[cfg(not(feature = "graphviz"))]
fn graphviz_unavailable() -> CanopyError {
    CanopyError::Render(
        "built without the `graphviz` feature; use the native engine".to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_from_str() {
        assert_eq!("Graphviz".parse::<Engine>(), Ok(Engine::Graphviz));
        assert_eq!("dot".parse::<Engine>(), Ok(Engine::Graphviz));
        assert_eq!("native".parse::<Engine>(), Ok(Engine::Native));
        assert!("cairo".parse::<Engine>().is_err());
    }

    #[test]
    fn test_engine_display_round_trips() {
        for engine in [Engine::Graphviz, Engine::Native] {
            assert_eq!(engine.to_string().parse::<Engine>(), Ok(engine));
        }
    }

    #[test]
    fn test_default_engine_matches_features() {
        let expected = if cfg!(feature = "graphviz") {
            Engine::Graphviz
        } else {
            Engine::Native
        };
        assert_eq!(Engine::default(), expected);
    }
}
