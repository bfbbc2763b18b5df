//! Diagram element types for the semantic model.

use std::{fmt, str::FromStr};

use serde::Deserialize;

use super::{Attributes, Service, UnknownVariant};
use crate::{color::Color, identifier::Id};

/// A diagram node: one labeled, icon-decorated service.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    id: Id,
    label: String,
    service: Service,
    cluster: Option<Id>,
}

impl Node {
    /// Create a new Node owned by `cluster`, or ungrouped when `None`.
    pub fn new(id: Id, label: impl Into<String>, service: Service, cluster: Option<Id>) -> Self {
        Self {
            id,
            label: label.into(),
            service,
            cluster,
        }
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn service(&self) -> Service {
        self.service
    }

    /// The cluster directly containing this node.
    pub fn cluster(&self) -> Option<Id> {
        self.cluster
    }

    /// Number of text lines in the label.
    pub fn label_lines(&self) -> usize {
        self.label.lines().count().max(1)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({:?})", self.service, self.label)
    }
}

/// A visual grouping of nodes and nested clusters.
#[derive(Debug, Clone, PartialEq)]
pub struct Cluster {
    id: Id,
    label: String,
    parent: Option<Id>,
    depth: usize,
    attributes: Attributes,
}

impl Cluster {
    /// Create a new cluster. Top-level clusters have depth 1.
    pub fn new(id: Id, label: impl Into<String>, parent: Option<Id>, depth: usize) -> Self {
        Self {
            id,
            label: label.into(),
            parent,
            depth,
            attributes: Attributes::new(),
        }
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn parent(&self) -> Option<Id> {
        self.parent
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Attribute overrides applied to this cluster only.
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn attributes_mut(&mut self) -> &mut Attributes {
        &mut self.attributes
    }
}

/// Which ends of an edge carry an arrowhead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EdgeDirection {
    /// `source -> target`
    #[default]
    Forward,
    /// `source <- target`
    Back,
    /// `source <-> target`
    Both,
    /// `source -- target`, a plain association.
    None,
}

impl EdgeDirection {
    /// Value of the Graphviz `dir` attribute.
    pub fn as_dot(self) -> &'static str {
        match self {
            Self::Forward => "forward",
            Self::Back => "back",
            Self::Both => "both",
            Self::None => "none",
        }
    }

    /// Returns `true` unless this is a plain association.
    pub fn is_directed(self) -> bool {
        self != Self::None
    }
}

/// Line style of an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
    Bold,
}

impl EdgeStyle {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Solid => "solid",
            Self::Dashed => "dashed",
            Self::Dotted => "dotted",
            Self::Bold => "bold",
        }
    }
}

impl FromStr for EdgeStyle {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "solid" => Ok(Self::Solid),
            "dashed" => Ok(Self::Dashed),
            "dotted" => Ok(Self::Dotted),
            "bold" => Ok(Self::Bold),
            _ => Err(UnknownVariant::new(
                "edge style",
                s,
                "solid, dashed, dotted, bold",
            )),
        }
    }
}

/// A relationship between two nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    source: Id,
    target: Id,
    direction: EdgeDirection,
    label: Option<String>,
    color: Option<Color>,
    style: Option<EdgeStyle>,
}

impl Edge {
    pub fn new(source: Id, target: Id, direction: EdgeDirection) -> Self {
        Self {
            source,
            target,
            direction,
            label: None,
            color: None,
            style: None,
        }
    }

    pub fn source(&self) -> Id {
        self.source
    }

    pub fn target(&self) -> Id {
        self.target
    }

    pub fn direction(&self) -> EdgeDirection {
        self.direction
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn color(&self) -> Option<Color> {
        self.color
    }

    pub fn style(&self) -> Option<EdgeStyle> {
        self.style
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = Some(label.into());
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = Some(color);
    }

    pub fn set_style(&mut self, style: EdgeStyle) {
        self.style = Some(style);
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let arrow = match self.direction {
            EdgeDirection::Forward => "->",
            EdgeDirection::Back => "<-",
            EdgeDirection::Both => "<->",
            EdgeDirection::None => "--",
        };
        write!(f, "{} {arrow} {}", self.source, self.target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_label_lines() {
        let node = Node::new(Id::new("n0"), "rss/feed.xml", Service::BlobStorage, None);
        assert_eq!(node.label_lines(), 1);

        let node = Node::new(Id::new("n1"), "Storage\nAccount", Service::StorageAccounts, None);
        assert_eq!(node.label_lines(), 2);

        let node = Node::new(Id::new("n2"), "", Service::Github, None);
        assert_eq!(node.label_lines(), 1);
    }

    #[test]
    fn test_edge_direction_dot_values() {
        assert_eq!(EdgeDirection::Forward.as_dot(), "forward");
        assert_eq!(EdgeDirection::Back.as_dot(), "back");
        assert_eq!(EdgeDirection::Both.as_dot(), "both");
        assert_eq!(EdgeDirection::None.as_dot(), "none");
        assert!(!EdgeDirection::None.is_directed());
        assert!(EdgeDirection::Both.is_directed());
    }

    #[test]
    fn test_edge_style_from_str() {
        assert_eq!("dashed".parse::<EdgeStyle>(), Ok(EdgeStyle::Dashed));
        let err = "wavy".parse::<EdgeStyle>().unwrap_err();
        assert!(err.to_string().contains("wavy"));
    }

    #[test]
    fn test_edge_display_and_decorations() {
        let a = Id::new("a");
        let b = Id::new("b");
        let mut edge = Edge::new(a, b, EdgeDirection::Both);
        edge.set_label("secrets");
        edge.set_style(EdgeStyle::Dotted);

        assert_eq!(edge.to_string(), "a <-> b");
        assert_eq!(edge.label(), Some("secrets"));
        assert_eq!(edge.style(), Some(EdgeStyle::Dotted));
        assert_eq!((edge.source(), edge.target()), (a, b));
    }
}
