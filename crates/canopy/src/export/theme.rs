//! Default attribute sets shared by the exporters.
//!
//! Attributes are layered: built-in defaults, then values from
//! [`StyleConfig`], then the diagram's own overrides.

use canopy_core::{
    color::Color,
    semantic::{Attributes, Cluster, Diagram},
};

use crate::{config::StyleConfig, error::CanopyError};

const FONT_NAME: &str = "Sans-Serif";
const FONT_COLOR: &str = "#2D3436";
const EDGE_COLOR: &str = "#7B8894";
const CLUSTER_PEN_COLOR: &str = "#AEB6BE";

/// Cluster backgrounds, cycled by nesting depth.
const CLUSTER_BACKGROUNDS: [&str; 4] = ["#E5F5FD", "#EBF3E7", "#ECE8F6", "#FDF7E3"];

/// Resolved attribute defaults for one render.
#[derive(Debug, Clone)]
pub(crate) struct Theme {
    graph: Attributes,
    node: Attributes,
    edge: Attributes,
    cluster: Attributes,
}

impl Theme {
    /// Build the theme, applying `style` on top of the built-in defaults.
    ///
    /// # Errors
    ///
    /// Returns [`CanopyError::Config`] for an invalid background color or pad.
    pub(crate) fn new(style: &StyleConfig) -> Result<Self, CanopyError> {
        let font = style.font_name().unwrap_or(FONT_NAME);

        let mut graph: Attributes = [
            ("pad", "2.0"),
            ("splines", "ortho"),
            ("nodesep", "0.60"),
            ("ranksep", "0.75"),
            ("fontname", font),
            ("fontsize", "15"),
            ("fontcolor", FONT_COLOR),
        ]
        .into_iter()
        .collect();

        if let Some(color) = style.background_color().map_err(CanopyError::Config)? {
            graph.set("bgcolor", color.to_hex());
        }
        if let Some(pad) = style.pad().map_err(CanopyError::Config)? {
            graph.set("pad", pad.to_string());
        }

        let node = [
            ("shape", "box"),
            ("style", "rounded"),
            ("fixedsize", "true"),
            ("width", "1.4"),
            ("height", "1.4"),
            ("labelloc", "b"),
            ("imagescale", "true"),
            ("fontname", font),
            ("fontsize", "13"),
            ("fontcolor", FONT_COLOR),
        ]
        .into_iter()
        .collect();

        let edge = [("color", EDGE_COLOR)].into_iter().collect();

        let cluster = [
            ("shape", "box"),
            ("style", "rounded"),
            ("labeljust", "l"),
            ("pencolor", CLUSTER_PEN_COLOR),
            ("fontname", font),
            ("fontsize", "12"),
        ]
        .into_iter()
        .collect();

        Ok(Self {
            graph,
            node,
            edge,
            cluster,
        })
    }

    /// Graph attributes: defaults, rank direction and title, then the
    /// diagram's overrides.
    pub(crate) fn graph_attributes(&self, diagram: &Diagram) -> Attributes {
        let mut attrs = self.graph.clone();
        attrs.set("rankdir", diagram.direction().as_rankdir());
        attrs.set("label", diagram.title());
        attrs.merge(diagram.graph_attributes());
        attrs
    }

    pub(crate) fn node_attributes(&self, diagram: &Diagram) -> Attributes {
        let mut attrs = self.node.clone();
        attrs.merge(diagram.node_attributes());
        attrs
    }

    pub(crate) fn edge_attributes(&self, diagram: &Diagram) -> Attributes {
        let mut attrs = self.edge.clone();
        attrs.merge(diagram.edge_attributes());
        attrs
    }

    pub(crate) fn cluster_attributes(&self, cluster: &Cluster) -> Attributes {
        let mut attrs = self.cluster.clone();
        attrs.set("label", cluster.label());
        attrs.set("bgcolor", cluster_background(cluster.depth()));
        attrs.merge(cluster.attributes());
        attrs
    }

    /// Background color of the whole drawing, white when unset or not a CSS color.
    pub(crate) fn background(&self, diagram: &Diagram) -> Color {
        let graph = self.graph_attributes(diagram);
        graph
            .get("bgcolor")
            .and_then(|value| Color::new(value).ok())
            .unwrap_or_else(|| Color::new("white").unwrap_or_default())
    }
}

/// Background for a cluster at `depth` (1 for top-level clusters).
pub(crate) fn cluster_background(depth: usize) -> &'static str {
    CLUSTER_BACKGROUNDS[depth.saturating_sub(1) % CLUSTER_BACKGROUNDS.len()]
}
