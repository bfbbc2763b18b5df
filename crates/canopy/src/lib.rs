//! Canopy - declare architecture diagrams in Rust and render them to images.
//!
//! A diagram is declared with [`DiagramBuilder`]: nodes are cloud or
//! on-premises services, clusters group them, and edges connect them. The
//! declared [`semantic::Diagram`] is then rendered by a [`Renderer`], either
//! through the Graphviz `dot` binary or with the built-in native engine.

pub mod config;

mod declare;
mod error;
mod export;
mod structure;

pub use canopy_core::{color, identifier, semantic};

pub use declare::{DiagramBuilder, EdgeMut, NodeRef, Scope};
pub use error::CanopyError;
pub use export::{Engine, Rendered};
pub use structure::DiagramGraph;

use std::{
    fs,
    path::{Path, PathBuf},
};

use log::{debug, info};

use config::AppConfig;

/// Renders declared diagrams to image files.
///
/// # Examples
///
/// ```rust,no_run
/// use canopy::{DiagramBuilder, Renderer, semantic::Service};
///
/// let (diagram, ()) = DiagramBuilder::new("Pipeline")
///     .build(|scope| {
///         let repo = scope.node(Service::Github, "repo");
///         let func = scope.node(Service::FunctionApps, "func");
///         scope.forward(repo, func);
///     })
///     .expect("valid diagram");
///
/// let path = Renderer::default()
///     .render_to_file(&diagram, ".")
///     .expect("Failed to render");
/// println!("wrote {}", path.display());
/// ```
#[derive(Debug, Default)]
pub struct Renderer {
    config: AppConfig,
}

impl Renderer {
    /// Create a new renderer with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Render `diagram` to an encoded image.
    ///
    /// The format configured in [`config::RenderConfig`] takes precedence
    /// over the one declared by the diagram.
    ///
    /// # Errors
    ///
    /// Returns `CanopyError` for invalid diagrams or configuration, for
    /// format/engine combinations the engine cannot produce, and for
    /// failures reported by the rendering backend.
    pub fn render(&self, diagram: &semantic::Diagram) -> Result<Rendered, CanopyError> {
        let graph = DiagramGraph::from_diagram(diagram)?;
        info!(
            title = diagram.title(),
            nodes = graph.nodes_count(),
            clusters = graph.clusters_count(),
            edges = graph.edges_count();
            "Rendering diagram"
        );

        let format = self
            .config
            .render()
            .format()
            .unwrap_or_else(|| diagram.outformat());
        let engine = self.config.render().engine();
        debug!(engine:% = engine, format:% = format; "Selected backend");

        let rendered = export::render(diagram, &self.config, format)?;
        info!(bytes = rendered.bytes().len(); "Diagram rendered");

        Ok(rendered)
    }

    /// Render `diagram` and write it to `<dir>/<filename>.<ext>`.
    ///
    /// An existing file at that path is overwritten.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`Renderer::render`] and `CanopyError::Io` if the
    /// file cannot be written.
    pub fn render_to_file(
        &self,
        diagram: &semantic::Diagram,
        dir: impl AsRef<Path>,
    ) -> Result<PathBuf, CanopyError> {
        let rendered = self.render(diagram)?;
        let path = dir.as_ref().join(format!(
            "{}.{}",
            diagram.filename(),
            rendered.format().extension()
        ));

        fs::write(&path, rendered.bytes())?;
        info!(output_file = path.display().to_string(); "Diagram written");

        Ok(path)
    }

    /// The DOT source the configured engine lays out.
    ///
    /// # Errors
    ///
    /// Returns `CanopyError` for invalid diagrams or configuration.
    pub fn dot_source(&self, diagram: &semantic::Diagram) -> Result<String, CanopyError> {
        DiagramGraph::from_diagram(diagram)?;
        export::dot_source(diagram, &self.config)
    }
}
