//! The root diagram and its output options.

use std::{fmt, str::FromStr};

use serde::Deserialize;

use super::{Attributes, Cluster, Edge, Node, UnknownVariant};
use crate::identifier::Id;

/// File format of the rendered diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Png,
    Jpg,
    Svg,
    Pdf,
    /// The Graphviz source itself.
    Dot,
}

impl OutputFormat {
    /// File extension, without the leading dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpg => "jpg",
            Self::Svg => "svg",
            Self::Pdf => "pdf",
            Self::Dot => "dot",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for OutputFormat {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(Self::Png),
            "jpg" | "jpeg" => Ok(Self::Jpg),
            "svg" => Ok(Self::Svg),
            "pdf" => Ok(Self::Pdf),
            "dot" | "gv" => Ok(Self::Dot),
            _ => Err(UnknownVariant::new(
                "output format",
                s,
                "png, jpg, svg, pdf, dot",
            )),
        }
    }
}

/// Rank direction of the laid out graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LayoutDirection {
    #[default]
    LR,
    RL,
    TB,
    BT,
}

impl LayoutDirection {
    /// Value of the Graphviz `rankdir` attribute.
    pub fn as_rankdir(self) -> &'static str {
        match self {
            Self::LR => "LR",
            Self::RL => "RL",
            Self::TB => "TB",
            Self::BT => "BT",
        }
    }
}

impl FromStr for LayoutDirection {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "LR" => Ok(Self::LR),
            "RL" => Ok(Self::RL),
            "TB" => Ok(Self::TB),
            "BT" => Ok(Self::BT),
            _ => Err(UnknownVariant::new("layout direction", s, "LR, RL, TB, BT")),
        }
    }
}

/// Derive an output base name from a diagram title.
///
/// # Examples
///
/// ```
/// use canopy_core::semantic::default_filename;
///
/// assert_eq!(default_filename("  Event Pipeline "), "event_pipeline");
/// ```
pub fn default_filename(title: &str) -> String {
    title.trim().replace(' ', "_").to_lowercase()
}

/// A fully declared diagram.
///
/// Nodes, clusters and edges are kept in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagram {
    title: String,
    filename: String,
    outformat: OutputFormat,
    direction: LayoutDirection,
    graph_attributes: Attributes,
    node_attributes: Attributes,
    edge_attributes: Attributes,
    nodes: Vec<Node>,
    clusters: Vec<Cluster>,
    edges: Vec<Edge>,
}

impl Diagram {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        title: String,
        filename: String,
        outformat: OutputFormat,
        direction: LayoutDirection,
        graph_attributes: Attributes,
        node_attributes: Attributes,
        edge_attributes: Attributes,
        nodes: Vec<Node>,
        clusters: Vec<Cluster>,
        edges: Vec<Edge>,
    ) -> Self {
        Self {
            title,
            filename,
            outformat,
            direction,
            graph_attributes,
            node_attributes,
            edge_attributes,
            nodes,
            clusters,
            edges,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Output base name, without extension.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn outformat(&self) -> OutputFormat {
        self.outformat
    }

    pub fn direction(&self) -> LayoutDirection {
        self.direction
    }

    /// Graph-level attribute overrides declared on the diagram.
    pub fn graph_attributes(&self) -> &Attributes {
        &self.graph_attributes
    }

    pub fn node_attributes(&self) -> &Attributes {
        &self.node_attributes
    }

    pub fn edge_attributes(&self) -> &Attributes {
        &self.edge_attributes
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn clusters(&self) -> &[Cluster] {
        &self.clusters
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node(&self, id: Id) -> Option<&Node> {
        self.nodes.iter().find(|node| node.id() == id)
    }

    pub fn cluster(&self, id: Id) -> Option<&Cluster> {
        self.clusters.iter().find(|cluster| cluster.id() == id)
    }

    /// Nodes declared outside any cluster.
    pub fn top_level_nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(|node| node.cluster().is_none())
    }

    /// Nodes declared directly inside `cluster`.
    pub fn nodes_in(&self, cluster: Id) -> impl Iterator<Item = &Node> {
        self.nodes
            .iter()
            .filter(move |node| node.cluster() == Some(cluster))
    }

    /// Clusters nested directly inside `parent`, or top-level clusters for `None`.
    pub fn child_clusters(&self, parent: Option<Id>) -> impl Iterator<Item = &Cluster> {
        self.clusters
            .iter()
            .filter(move |cluster| cluster.parent() == parent)
    }
}
