//! Validated graph view of a declared diagram.
//!
//! [`DiagramGraph`] indexes a [`Diagram`] by identifier, checks that every
//! reference resolves, and answers the adjacency and containment questions
//! the exporters and tests ask.

mod graph_base;

use indexmap::IndexMap;
use log::trace;

use canopy_core::{
    identifier::Id,
    semantic::{Cluster, Diagram, Edge, Node},
};

use crate::error::CanopyError;
use graph_base::GraphInternal;

/// Indexed, validated view of a [`Diagram`].
#[derive(Debug)]
pub struct DiagramGraph<'a> {
    graph: GraphInternal<'a, &'a Node, &'a Edge>,
    clusters: IndexMap<Id, &'a Cluster>,
}

impl<'a> DiagramGraph<'a> {
    /// Build the graph for `diagram`.
    ///
    /// # Errors
    ///
    /// Returns [`CanopyError::Graph`] when a node or cluster identifier is
    /// declared twice, when a node or cluster refers to an unknown parent
    /// cluster, or when an edge endpoint is not a node of this diagram.
    pub fn from_diagram(diagram: &'a Diagram) -> Result<Self, CanopyError> {
        let mut clusters = IndexMap::new();
        for cluster in diagram.clusters() {
            if clusters.insert(cluster.id(), cluster).is_some() {
                return Err(CanopyError::Graph(format!(
                    "cluster `{}` is declared more than once",
                    cluster.id()
                )));
            }
        }
        for cluster in diagram.clusters() {
            if let Some(parent) = cluster.parent().filter(|p| !clusters.contains_key(p)) {
                return Err(CanopyError::Graph(format!(
                    "cluster `{}` is nested in unknown cluster `{parent}`",
                    cluster.label()
                )));
            }
        }

        let mut graph = GraphInternal::new();
        for node in diagram.nodes() {
            if graph.contains_node(node.id()) {
                return Err(CanopyError::Graph(format!(
                    "node `{}` is declared more than once",
                    node.id()
                )));
            }
            if let Some(cluster) = node.cluster().filter(|c| !clusters.contains_key(c)) {
                return Err(CanopyError::Graph(format!(
                    "node {node} belongs to unknown cluster `{cluster}`"
                )));
            }
            graph.add_node(node.id(), node);
        }

        for edge in diagram.edges() {
            for endpoint in [edge.source(), edge.target()] {
                if !graph.contains_node(endpoint) {
                    return Err(CanopyError::Graph(format!(
                        "edge {edge} references unknown node `{endpoint}`"
                    )));
                }
            }
            graph.add_edge(edge.source(), edge.target(), edge);
        }

        trace!(graph:?; "Diagram graph built");

        Ok(Self { graph, clusters })
    }

    pub fn nodes_count(&self) -> usize {
        self.graph.nodes_count()
    }

    pub fn edges_count(&self) -> usize {
        self.graph.edges_count()
    }

    pub fn clusters_count(&self) -> usize {
        self.clusters.len()
    }

    pub fn node(&self, id: Id) -> Option<&'a Node> {
        self.graph.node(id)
    }

    /// Nodes in declaration order.
    pub fn nodes(&self) -> impl Iterator<Item = &'a Node> {
        self.graph.nodes()
    }

    /// Edges in declaration order.
    pub fn edges(&self) -> impl Iterator<Item = &'a Edge> {
        self.graph.edges()
    }

    pub fn cluster(&self, id: Id) -> Option<&'a Cluster> {
        self.clusters.get(&id).copied()
    }

    /// Nodes without incoming edges.
    pub fn roots(&self) -> impl Iterator<Item = &'a Node> {
        self.graph.roots()
    }

    /// Targets of edges declared from `id`.
    pub fn successors(&self, id: Id) -> impl Iterator<Item = &'a Node> {
        self.graph.outgoing_nodes(id)
    }

    /// Sources of edges declared into `id`.
    pub fn predecessors(&self, id: Id) -> impl Iterator<Item = &'a Node> {
        self.graph.incoming_nodes(id)
    }

    /// Nodes declared directly inside `cluster`.
    pub fn members(&self, cluster: Id) -> impl Iterator<Item = &'a Node> {
        self.graph
            .nodes()
            .filter(move |node| node.cluster() == Some(cluster))
    }

    /// Nodes declared inside `cluster` or any cluster nested in it.
    pub fn members_transitive(&self, cluster: Id) -> Vec<&'a Node> {
        self.graph
            .nodes()
            .filter(|node| {
                node.cluster()
                    .is_some_and(|owner| self.is_within(owner, cluster))
            })
            .collect()
    }

    /// Returns `true` if `cluster` is `ancestor` or nested somewhere inside it.
    pub fn is_within(&self, cluster: Id, ancestor: Id) -> bool {
        let mut current = Some(cluster);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.cluster(id).and_then(Cluster::parent);
        }
        false
    }
}
