//! Graphviz DOT generation.
//!
//! Translates a [`Diagram`] into a [`dot_structures::Graph`]. Clusters become
//! `subgraph "cluster_<n>"` blocks nested the same way they were declared;
//! every statement is emitted in declaration order so the printed DOT is
//! identical across runs.

use dot_structures::{
    Attribute, Edge as DotEdge, EdgeTy, Graph, GraphAttributes, Id as DotId, Node as DotNode,
    NodeId, Stmt, Subgraph, Vertex,
};
use graphviz_rust::printer::{DotPrinter, PrinterContext};
use log::debug;

use canopy_core::{
    identifier::Id,
    semantic::{Attributes, Diagram, Edge, Node},
};

use super::theme::Theme;
use crate::config::IconConfig;

/// Quote a value as a DOT string literal.
pub(crate) fn quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for ch in value.chars() {
        match ch {
            '\\' => quoted.push_str("\\\\"),
            '"' => quoted.push_str("\\\""),
            '\n' => quoted.push_str("\\n"),
            '\r' => {}
            _ => quoted.push(ch),
        }
    }
    quoted.push('"');
    quoted
}

fn escaped(value: &str) -> DotId {
    DotId::Escaped(quote(value))
}

fn node_id(id: Id) -> NodeId {
    NodeId(escaped(&id.to_string()), None)
}

fn to_attributes(attrs: &Attributes) -> Vec<Attribute> {
    attrs
        .iter()
        .map(|(key, value)| Attribute(DotId::Plain(key.to_string()), escaped(value)))
        .collect()
}

/// Builds DOT graphs for one theme and icon configuration.
pub(crate) struct DotBuilder<'a> {
    theme: &'a Theme,
    icons: &'a IconConfig,
}

impl<'a> DotBuilder<'a> {
    pub(crate) fn new(theme: &'a Theme, icons: &'a IconConfig) -> Self {
        Self { theme, icons }
    }

    /// Build the DOT graph for `diagram`.
    pub(crate) fn build(&self, diagram: &Diagram) -> Graph {
        let mut stmts = vec![
            Stmt::GAttribute(GraphAttributes::Graph(to_attributes(
                &self.theme.graph_attributes(diagram),
            ))),
            Stmt::GAttribute(GraphAttributes::Node(to_attributes(
                &self.theme.node_attributes(diagram),
            ))),
            Stmt::GAttribute(GraphAttributes::Edge(to_attributes(
                &self.theme.edge_attributes(diagram),
            ))),
        ];

        stmts.extend(diagram.top_level_nodes().map(|node| self.node_stmt(node)));
        for cluster in diagram.child_clusters(None) {
            stmts.push(self.cluster_stmt(diagram, cluster.id()));
        }
        stmts.extend(diagram.edges().iter().map(edge_stmt));

        debug!(statements = stmts.len(); "DOT graph built");

        Graph::DiGraph {
            id: escaped(diagram.title()),
            strict: false,
            stmts,
        }
    }

    /// Build and print the DOT source for `diagram`.
    pub(crate) fn print(&self, diagram: &Diagram) -> String {
        self.build(diagram).print(&mut PrinterContext::default())
    }

    fn cluster_stmt(&self, diagram: &Diagram, id: Id) -> Stmt {
        let mut stmts = Vec::new();
        if let Some(cluster) = diagram.cluster(id) {
            stmts.push(Stmt::GAttribute(GraphAttributes::Graph(to_attributes(
                &self.theme.cluster_attributes(cluster),
            ))));
        }
        stmts.extend(diagram.nodes_in(id).map(|node| self.node_stmt(node)));
        for child in diagram.child_clusters(Some(id)) {
            stmts.push(self.cluster_stmt(diagram, child.id()));
        }

        Stmt::Subgraph(Subgraph {
            id: escaped(&id.to_string()),
            stmts,
        })
    }

    fn node_stmt(&self, node: &Node) -> Stmt {
        let service = node.service();
        let mut attrs = Attributes::new();
        attrs.set("label", node.label());

        match self.icons.resolve(service) {
            Some(icon) => {
                let extra_lines = node.label_lines() - 1;
                attrs.set("image", icon.display().to_string());
                attrs.set("shape", "none");
                attrs.set("height", format!("{:.1}", 1.9 + 0.4 * extra_lines as f32));
            }
            None => {
                attrs.set("style", "rounded,filled");
                attrs.set("fillcolor", service.fallback_fill());
                attrs.set("fontcolor", service.fallback_font_color());
                attrs.set("labelloc", "c");
            }
        }
        attrs.set("tooltip", service.to_string());

        Stmt::Node(DotNode {
            id: node_id(node.id()),
            attributes: to_attributes(&attrs),
        })
    }
}

fn edge_stmt(edge: &Edge) -> Stmt {
    let mut attrs = Attributes::new();
    attrs.set("dir", edge.direction().as_dot());
    if let Some(label) = edge.label() {
        attrs.set("label", label);
    }
    if let Some(color) = edge.color() {
        attrs.set("color", color.to_hex());
    }
    if let Some(style) = edge.style() {
        attrs.set("style", style.as_str());
    }

    Stmt::Edge(DotEdge {
        ty: EdgeTy::Pair(
            Vertex::N(node_id(edge.source())),
            Vertex::N(node_id(edge.target())),
        ),
        attributes: to_attributes(&attrs),
    })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use canopy_core::{
        color::Color,
        semantic::{EdgeStyle, Service},
    };
    use proptest::prelude::*;

    use super::*;
    use crate::{DiagramBuilder, config::StyleConfig};

    fn sample() -> Diagram {
        DiagramBuilder::new("Sample \"Pipeline\"")
            .filename("sample")
            .graph_attr("bgcolor", "white")
            .build(|root| {
                let src = root.node(Service::Github, "Changelog");
                let (func, acct, blob) = root.cluster("Cloud", |cloud| {
                    let func = cloud.node(Service::FunctionApps, "Func");
                    let (acct, blob) = cloud.cluster("Storage", |storage| {
                        (
                            storage.node(Service::StorageAccounts, "Account"),
                            storage.node(Service::BlobStorage, "rss/feed.xml"),
                        )
                    });
                    (func, acct, blob)
                });
                root.forward(src, func)
                    .label("poll")
                    .style(EdgeStyle::Dashed)
                    .color(Color::new("#ff0000").unwrap());
                root.forward(func, acct);
                root.link(acct, blob);
            })
            .unwrap()
            .0
    }

    fn print(diagram: &Diagram, icons: &IconConfig) -> String {
        let theme = Theme::new(&StyleConfig::default()).unwrap();
        DotBuilder::new(&theme, icons).print(diagram)
    }

    #[test]
    fn test_graph_structure() {
        let theme = Theme::new(&StyleConfig::default()).unwrap();
        let icons = IconConfig::default();
        let graph = DotBuilder::new(&theme, &icons).build(&sample());

        let Graph::DiGraph { stmts, strict, .. } = graph else {
            panic!("expected a digraph");
        };
        assert!(!strict);

        let nodes = stmts.iter().filter(|s| matches!(s, Stmt::Node(_))).count();
        let subgraphs = stmts.iter().filter(|s| matches!(s, Stmt::Subgraph(_))).count();
        let edges = stmts.iter().filter(|s| matches!(s, Stmt::Edge(_))).count();
        assert_eq!(nodes, 1, "only the ungrouped node is top level");
        assert_eq!(subgraphs, 1, "storage is nested inside cloud");
        assert_eq!(edges, 3);
    }

    #[test]
    fn test_printed_dot() {
        let dot = print(&sample(), &IconConfig::default());

        assert!(dot.starts_with("digraph"), "{dot}");
        assert!(dot.contains(r#""Sample \"Pipeline\"""#), "{dot}");
        assert!(dot.contains(r#""cluster_0""#), "{dot}");
        assert!(dot.contains(r#""cluster_1""#), "{dot}");
        assert!(dot.contains(r#"bgcolor="white""#), "{dot}");
        assert!(dot.contains(r##"bgcolor="#EBF3E7""##), "{dot}");
        assert!(dot.contains(r#"dir="none""#), "{dot}");
        assert!(dot.contains(r#"style="dashed""#), "{dot}");
        assert!(dot.contains(r##"color="#ff0000""##), "{dot}");
        assert!(dot.contains(r#"label="rss/feed.xml""#), "{dot}");
        assert!(dot.contains(r#""n0" -> "n1""#), "{dot}");
    }

    #[test]
    fn test_printed_dot_is_deterministic() {
        let icons = IconConfig::default();
        assert_eq!(print(&sample(), &icons), print(&sample(), &icons));
    }

    #[test]
    fn test_icon_nodes() {
        let dir = tempfile::tempdir().unwrap();
        let icon = dir.path().join(Service::Github.icon_path());
        fs::create_dir_all(icon.parent().unwrap()).unwrap();
        fs::write(&icon, b"png").unwrap();

        let icons = IconConfig::new(Some(dir.path().to_path_buf()));
        let dot = print(&sample(), &icons);

        assert!(dot.contains("github.png"), "{dot}");
        assert!(dot.contains(r#"shape="none""#), "{dot}");
        assert!(dot.contains(r#"height="1.9""#), "{dot}");
        // Services without art fall back to filled boxes.
        assert!(dot.contains(r#"style="rounded,filled""#), "{dot}");
    }

    #[test]
    fn test_quote() {
        assert_eq!(quote("plain"), "\"plain\"");
        assert_eq!(quote("a \"b\""), "\"a \\\"b\\\"\"");
        assert_eq!(quote("two\nlines"), "\"two\\nlines\"");
        assert_eq!(quote("C:\\"), r#""C:\\""#);
    }

    /// Reads a quoted DOT string back, or `None` if it is malformed.
    fn unquote(quoted: &str) -> Option<String> {
        let inner = quoted.strip_prefix('"')?.strip_suffix('"')?;
        let mut value = String::new();
        let mut chars = inner.chars();
        while let Some(ch) = chars.next() {
            match ch {
                '\\' => match chars.next()? {
                    '\\' => value.push('\\'),
                    '"' => value.push('"'),
                    'n' => value.push('\n'),
                    _ => return None,
                },
                '"' | '\n' => return None,
                _ => value.push(ch),
            }
        }
        Some(value)
    }

    proptest! {
        #[test]
        fn quoted_values_read_back(value in "(\\PC|[\\\\\"\n]){0,32}") {
            let quoted = quote(&value);
            prop_assert_eq!(unquote(&quoted), Some(value.replace('\r', "")));
        }
    }
}
