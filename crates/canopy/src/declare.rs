//! Declaring diagrams.
//!
//! A diagram is declared inside a closure that receives a root [`Scope`].
//! Clusters open nested scopes, so containment follows the lexical nesting of
//! the declaration and nothing can be declared outside the diagram.
//!
//! # Examples
//!
//! ```
//! use canopy::{DiagramBuilder, semantic::Service};
//!
//! let (diagram, ()) = DiagramBuilder::new("Pipeline")
//!     .graph_attr("bgcolor", "white")
//!     .build(|scope| {
//!         let repo = scope.node(Service::Github, "repo");
//!         let func = scope.cluster("Cloud", |cloud| cloud.node(Service::FunctionApps, "func"));
//!         scope.forward(repo, func);
//!     })
//!     .expect("valid diagram");
//!
//! assert_eq!(diagram.nodes().len(), 2);
//! assert_eq!(diagram.filename(), "pipeline");
//! ```

use std::sync::atomic::{AtomicU64, Ordering};

use log::{debug, info};

use canopy_core::{
    color::Color,
    identifier::Id,
    semantic::{
        Attributes, Cluster, Diagram, Edge, EdgeDirection, EdgeStyle, LayoutDirection, Node,
        OutputFormat, Service, default_filename,
    },
};

use crate::{error::CanopyError, structure::DiagramGraph};

static NEXT_DECLARATION: AtomicU64 = AtomicU64::new(0);

/// A node declared through a [`Scope`].
///
/// Node identifiers restart at `n0` in every diagram, so the handle also
/// remembers which declaration produced it. Edges may only join nodes of
/// the diagram being declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeRef {
    id: Id,
    declaration: u64,
}

impl NodeRef {
    pub fn id(self) -> Id {
        self.id
    }
}

impl From<NodeRef> for Id {
    fn from(node: NodeRef) -> Self {
        node.id
    }
}

/// Root of a diagram declaration.
///
/// Holds the diagram-wide options; [`DiagramBuilder::build`] opens the root
/// [`Scope`] in which the graph itself is declared.
#[derive(Debug, Clone)]
pub struct DiagramBuilder {
    title: String,
    filename: Option<String>,
    outformat: OutputFormat,
    direction: LayoutDirection,
    graph_attributes: Attributes,
    node_attributes: Attributes,
    edge_attributes: Attributes,
}

impl DiagramBuilder {
    /// Start a diagram with the given title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            filename: None,
            outformat: OutputFormat::default(),
            direction: LayoutDirection::default(),
            graph_attributes: Attributes::new(),
            node_attributes: Attributes::new(),
            edge_attributes: Attributes::new(),
        }
    }

    /// Output base name, without extension. Defaults to the snake-cased title.
    pub fn filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    pub fn outformat(mut self, outformat: OutputFormat) -> Self {
        self.outformat = outformat;
        self
    }

    pub fn direction(mut self, direction: LayoutDirection) -> Self {
        self.direction = direction;
        self
    }

    /// Override a graph-level attribute, e.g. `bgcolor` or `pad`.
    pub fn graph_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.graph_attributes.set(key, value);
        self
    }

    /// Override an attribute applied to every node.
    pub fn node_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.node_attributes.set(key, value);
        self
    }

    /// Override an attribute applied to every edge.
    pub fn edge_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.edge_attributes.set(key, value);
        self
    }

    /// Declare the diagram's contents and finalize it.
    ///
    /// Returns the diagram together with whatever `declare` returned.
    ///
    /// # Errors
    ///
    /// Returns [`CanopyError::Graph`] if an edge references a node that was
    /// declared by another diagram.
    pub fn build<R>(
        self,
        declare: impl FnOnce(&mut Scope<'_>) -> R,
    ) -> Result<(Diagram, R), CanopyError> {
        info!(title = self.title; "Declaring diagram");

        let mut draft = Draft {
            declaration: NEXT_DECLARATION.fetch_add(1, Ordering::Relaxed),
            graph_attributes: self.graph_attributes,
            ..Draft::default()
        };
        let output = {
            let mut root = Scope {
                draft: &mut draft,
                cluster: None,
                depth: 0,
            };
            declare(&mut root)
        };

        if let Some(id) = draft.foreign.first() {
            return Err(CanopyError::Graph(format!(
                "edge endpoint `{id}` was declared by another diagram"
            )));
        }

        let filename = self
            .filename
            .unwrap_or_else(|| default_filename(&self.title));

        let diagram = Diagram::new(
            self.title,
            filename,
            self.outformat,
            self.direction,
            draft.graph_attributes,
            self.node_attributes,
            self.edge_attributes,
            draft.nodes,
            draft.clusters,
            draft.edges,
        );

        DiagramGraph::from_diagram(&diagram)?;

        debug!(
            nodes = diagram.nodes().len(),
            clusters = diagram.clusters().len(),
            edges = diagram.edges().len();
            "Diagram declared"
        );

        Ok((diagram, output))
    }
}

#[derive(Debug, Default)]
struct Draft {
    declaration: u64,
    foreign: Vec<Id>,
    graph_attributes: Attributes,
    nodes: Vec<Node>,
    clusters: Vec<Cluster>,
    edges: Vec<Edge>,
}

/// A declaration context: the diagram root or one cluster.
///
/// Nodes declared through a scope belong to its cluster. Edges may be
/// declared from any scope and may cross cluster boundaries.
#[derive(Debug)]
pub struct Scope<'d> {
    draft: &'d mut Draft,
    cluster: Option<Id>,
    depth: usize,
}

impl Scope<'_> {
    /// The cluster this scope declares into, `None` for the diagram root.
    pub fn cluster_id(&self) -> Option<Id> {
        self.cluster
    }

    /// Nesting depth: 0 for the root, 1 for top-level clusters.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Declare a node and return its handle.
    pub fn node(&mut self, service: Service, label: impl Into<String>) -> NodeRef {
        let id = Id::indexed("n", self.draft.nodes.len());
        self.draft
            .nodes
            .push(Node::new(id, label, service, self.cluster));
        NodeRef {
            id,
            declaration: self.draft.declaration,
        }
    }

    /// Declare a nested cluster and its contents.
    pub fn cluster<R>(
        &mut self,
        label: impl Into<String>,
        declare: impl FnOnce(&mut Scope<'_>) -> R,
    ) -> R {
        let id = Id::indexed("cluster_", self.draft.clusters.len());
        let depth = self.depth + 1;
        self.draft
            .clusters
            .push(Cluster::new(id, label, self.cluster, depth));

        let mut child = Scope {
            draft: &mut *self.draft,
            cluster: Some(id),
            depth,
        };
        declare(&mut child)
    }

    /// Set an attribute on this scope's cluster, or on the graph for the root scope.
    pub fn attr(&mut self, key: impl Into<String>, value: impl Into<String>) {
        match self.cluster {
            Some(id) => {
                if let Some(cluster) = self.draft.clusters.iter_mut().find(|c| c.id() == id) {
                    cluster.attributes_mut().set(key, value);
                }
            }
            None => self.draft.graph_attributes.set(key, value),
        }
    }

    /// Declare a relationship between two nodes.
    ///
    /// Endpoints declared by another diagram fail the enclosing
    /// [`DiagramBuilder::build`].
    pub fn connect(
        &mut self,
        source: NodeRef,
        target: NodeRef,
        direction: EdgeDirection,
    ) -> EdgeMut<'_> {
        for endpoint in [source, target] {
            if endpoint.declaration != self.draft.declaration {
                self.draft.foreign.push(endpoint.id);
            }
        }

        let edges = &mut self.draft.edges;
        edges.push(Edge::new(source.id, target.id, direction));
        let index = edges.len() - 1;
        EdgeMut {
            edge: &mut edges[index],
        }
    }

    /// `source -> target`
    pub fn forward(&mut self, source: NodeRef, target: NodeRef) -> EdgeMut<'_> {
        self.connect(source, target, EdgeDirection::Forward)
    }

    /// `source <- target`
    pub fn back(&mut self, source: NodeRef, target: NodeRef) -> EdgeMut<'_> {
        self.connect(source, target, EdgeDirection::Back)
    }

    /// `source <-> target`
    pub fn both(&mut self, source: NodeRef, target: NodeRef) -> EdgeMut<'_> {
        self.connect(source, target, EdgeDirection::Both)
    }

    /// `source -- target`, a plain association without arrowheads.
    pub fn link(&mut self, source: NodeRef, target: NodeRef) -> EdgeMut<'_> {
        self.connect(source, target, EdgeDirection::None)
    }

    /// Connect consecutive nodes: `a >> b >> c` becomes `a -> b`, `b -> c`.
    pub fn chain(&mut self, nodes: &[NodeRef], direction: EdgeDirection) {
        for pair in nodes.windows(2) {
            self.connect(pair[0], pair[1], direction);
        }
    }

    /// Connect one source to several targets.
    pub fn fan_out(&mut self, source: NodeRef, targets: &[NodeRef], direction: EdgeDirection) {
        for &target in targets {
            self.connect(source, target, direction);
        }
    }
}

/// Handle to a just-declared edge for setting its optional decorations.
#[derive(Debug)]
pub struct EdgeMut<'a> {
    edge: &'a mut Edge,
}

impl EdgeMut<'_> {
    pub fn label(self, label: impl Into<String>) -> Self {
        self.edge.set_label(label);
        self
    }

    pub fn color(self, color: Color) -> Self {
        self.edge.set_color(color);
        self
    }

    pub fn style(self, style: EdgeStyle) -> Self {
        self.edge.set_style(style);
        self
    }
}
