//! Low-level graph data structures and primitives.
//!
//! This module provides the adjacency storage behind
//! [`DiagramGraph`](super::DiagramGraph). Nodes are kept in an insertion
//! ordered map so that every traversal follows declaration order.
//!
//! Capabilities:
//! - Node and edge storage via `IndexMap` and `Vec`
//! - Tracking of both incoming and outgoing edges per node
//! - Root detection (nodes with no incoming edges)

use std::marker::PhantomData;

use indexmap::IndexMap;

use canopy_core::identifier::Id;

/// Type-safe index for edges in the graph.
///
/// The lifetime parameter ties an index to the graph that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(super) struct EdgeIndex<'idx>(usize, PhantomData<&'idx ()>);

impl EdgeIndex<'_> {
    fn new(index: usize) -> Self {
        EdgeIndex(index, PhantomData)
    }
}

#[derive(Debug)]
struct EdgeEntry<E>
where
    E: Copy + std::fmt::Debug,
{
    source: Id,
    target: Id,
    value: E,
}

/// Directed multigraph keyed by [`Id`].
///
/// Allows self-loops and multiple edges between the same pair of nodes.
///
/// Type parameters:
/// - `'idx`: Lifetime for edge indices
/// - `N`: Node data type (must be Copy and Debug)
/// - `E`: Edge data type (must be Copy and Debug)
#[derive(Debug)]
pub(super) struct GraphInternal<'idx, N, E>
where
    N: Copy + std::fmt::Debug,
    E: Copy + std::fmt::Debug,
{
    nodes: IndexMap<Id, N>,
    edges: Vec<EdgeEntry<E>>,
    incoming_edges: IndexMap<Id, Vec<EdgeIndex<'idx>>>,
    outgoing_edges: IndexMap<Id, Vec<EdgeIndex<'idx>>>,
}

impl<'idx, N, E> GraphInternal<'idx, N, E>
where
    N: Copy + std::fmt::Debug,
    E: Copy + std::fmt::Debug,
{
    pub(super) fn new() -> Self {
        GraphInternal {
            nodes: IndexMap::new(),
            edges: Vec::new(),
            incoming_edges: IndexMap::new(),
            outgoing_edges: IndexMap::new(),
        }
    }

    pub(super) fn node(&self, id: Id) -> Option<N> {
        self.nodes.get(&id).copied()
    }

    /// Returns an iterator over all node data in insertion order.
    pub(super) fn nodes(&self) -> impl Iterator<Item = N> {
        self.nodes.values().copied()
    }

    pub(super) fn nodes_count(&self) -> usize {
        self.nodes.len()
    }

    pub(super) fn contains_node(&self, id: Id) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Returns an iterator over all edge data in insertion order.
    pub(super) fn edges(&self) -> impl Iterator<Item = E> {
        self.edges.iter().map(|edge| edge.value)
    }

    pub(super) fn edges_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns an iterator over root nodes (nodes with no incoming edges).
    pub(super) fn roots(&self) -> impl Iterator<Item = N> {
        self.nodes
            .iter()
            .filter(|(node_id, _)| !self.incoming_edges.contains_key(*node_id))
            .map(|(_, node)| *node)
    }

    /// Returns the targets of all edges leaving `source_id`.
    pub(super) fn outgoing_nodes(&self, source_id: Id) -> impl Iterator<Item = N> {
        self.outgoing_edges
            .get(&source_id)
            .into_iter()
            .flatten()
            .filter_map(|idx| self.node(self.edges[idx.0].target))
    }

    /// Returns the sources of all edges entering `target_id`.
    pub(super) fn incoming_nodes(&self, target_id: Id) -> impl Iterator<Item = N> {
        self.incoming_edges
            .get(&target_id)
            .into_iter()
            .flatten()
            .filter_map(|idx| self.node(self.edges[idx.0].source))
    }

    /// Adds a node, replacing any node with the same ID.
    pub(super) fn add_node(&mut self, id: Id, node: N) {
        self.nodes.insert(id, node);
    }

    /// Adds a directed edge between two nodes.
    ///
    /// # Panics
    /// Panics in debug builds if either endpoint is missing. Callers validate
    /// endpoints before inserting.
    pub(super) fn add_edge(&mut self, source_id: Id, target_id: Id, edge: E) {
        debug_assert!(
            self.nodes.contains_key(&source_id),
            "Adding edge: Source node {source_id} does not exist for {edge:?}",
        );
        debug_assert!(
            self.nodes.contains_key(&target_id),
            "Adding edge: Target node {target_id} does not exist for {edge:?}",
        );

        self.edges.push(EdgeEntry {
            source: source_id,
            target: target_id,
            value: edge,
        });

        let idx = EdgeIndex::new(self.edges.len() - 1);
        self.outgoing_edges.entry(source_id).or_default().push(idx);
        self.incoming_edges.entry(target_id).or_default().push(idx);
    }
}
