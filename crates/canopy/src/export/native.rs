//! Pure-Rust rendering with `layout-rs`.
//!
//! The native engine needs no external binary. It draws every node as a
//! labeled box and every relationship as an arrow; clusters are flattened.
//! PNG output is rasterized from the SVG with `resvg`.

use std::fmt::Write as _;

use layout::{
    backends::svg::SVGWriter,
    gv::{DotParser, GraphBuilder},
};
use log::{debug, info, trace};
use resvg::{tiny_skia, usvg};

use canopy_core::{
    color::Color,
    semantic::{Diagram, EdgeDirection, OutputFormat},
};

use super::theme::Theme;
use crate::error::CanopyError;

const EMPTY_SVG: &str =
    r#"<svg xmlns="http://www.w3.org/2000/svg" width="1" height="1" viewBox="0 0 1 1"></svg>"#;

fn native_label(label: &str) -> String {
    label
        .replace('\\', "\\\\")
        .replace('"', "'")
        .replace(['\n', '\r'], " ")
}

/// The restricted DOT dialect understood by `layout-rs`.
pub(crate) fn layout_dot(diagram: &Diagram) -> String {
    let mut dot = String::from("digraph G {\n");
    for node in diagram.nodes() {
        writeln!(
            dot,
            "    {} [label=\"{}\"];",
            node.id(),
            native_label(node.label())
        )
        .expect("Writing to String buffer is infallible");
    }
    for edge in diagram.edges() {
        let (from, to) = match edge.direction() {
            EdgeDirection::Back => (edge.target(), edge.source()),
            _ => (edge.source(), edge.target()),
        };
        let written = match edge.label() {
            Some(label) => writeln!(dot, "    {from} -> {to} [label=\"{}\"];", native_label(label)),
            None => writeln!(dot, "    {from} -> {to};"),
        };
        written.expect("Writing to String buffer is infallible");
    }
    dot.push_str("}\n");
    dot
}

/// Insert a full-size background rectangle right after the root `<svg>` tag.
fn with_background(svg: String, background: Color) -> String {
    let Some(start) = svg.find("<svg") else {
        return svg;
    };
    let Some(end) = svg[start..].find('>').map(|offset| start + offset + 1) else {
        return svg;
    };
    let rect = format!(
        r#"<rect x="0" y="0" width="100%" height="100%" fill="{}"/>"#,
        background.to_hex()
    );
    let mut out = String::with_capacity(svg.len() + rect.len());
    out.push_str(&svg[..end]);
    out.push_str(&rect);
    out.push_str(&svg[end..]);
    out
}

/// Lay out `diagram` and draw it as SVG.
///
/// # Errors
///
/// Returns [`CanopyError::Render`] if `layout-rs` rejects the generated graph.
pub(crate) fn render_svg(diagram: &Diagram, theme: &Theme) -> Result<String, CanopyError> {
    let background = theme.background(diagram);
    if diagram.nodes().is_empty() {
        return Ok(with_background(EMPTY_SVG.to_string(), background));
    }

    let dot = layout_dot(diagram);
    trace!(dot = dot.as_str(); "Native layout source");

    let mut parser = DotParser::new(&dot);
    let graph = parser
        .process()
        .map_err(|err| CanopyError::Render(format!("native layout rejected graph: {err}")))?;

    let mut builder = GraphBuilder::new();
    builder.visit_graph(&graph);
    let mut visual_graph = builder.get();

    let mut writer = SVGWriter::new();
    visual_graph.do_it(false, false, false, &mut writer);
    debug!("Native layout finished");

    Ok(with_background(writer.finalize(), background))
}

/// Rasterize an SVG document to PNG.
///
/// # Errors
///
/// Returns [`CanopyError::Render`] if the SVG cannot be parsed or the PNG
/// cannot be encoded.
pub(crate) fn rasterize_png(svg: &str, background: Color) -> Result<Vec<u8>, CanopyError> {
    let mut opt = usvg::Options::default();
    opt.fontdb_mut().load_system_fonts();

    let tree = usvg::Tree::from_str(svg, &opt)
        .map_err(|err| CanopyError::Render(format!("failed to parse SVG: {err}")))?;

    let size = tree.size().to_int_size();
    let mut pixmap = tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| CanopyError::Render("failed to allocate pixmap".to_string()))?;

    let [r, g, b, a] = background.to_rgba8();
    pixmap.fill(tiny_skia::Color::from_rgba8(r, g, b, a));
    resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

    pixmap
        .encode_png()
        .map_err(|err| CanopyError::Render(format!("failed to encode PNG: {err}")))
}

/// Render `diagram` in `format` with the native engine.
///
/// # Errors
///
/// Returns [`CanopyError::Render`] for `jpg` and `pdf`, which the native
/// engine cannot produce, and for layout or rasterization failures.
pub(crate) fn render(
    diagram: &Diagram,
    theme: &Theme,
    format: OutputFormat,
) -> Result<Vec<u8>, CanopyError> {
    info!(format:% = format; "Rendering with the native engine");
    match format {
        OutputFormat::Svg => Ok(render_svg(diagram, theme)?.into_bytes()),
        OutputFormat::Png => {
            let svg = render_svg(diagram, theme)?;
            rasterize_png(&svg, theme.background(diagram))
        }
        OutputFormat::Dot => Ok(layout_dot(diagram).into_bytes()),
        OutputFormat::Jpg | OutputFormat::Pdf => Err(CanopyError::Render(format!(
            "the native engine cannot produce `{format}` output; use svg, png or dot"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use canopy_core::semantic::Service;

    use super::*;
    use crate::{DiagramBuilder, config::StyleConfig};

    fn sample() -> Diagram {
        DiagramBuilder::new("Native")
            .graph_attr("bgcolor", "white")
            .build(|root| {
                let a = root.node(Service::Github, "Say \"hi\"");
                let b = root.cluster("Cloud", |c| c.node(Service::FunctionApps, "two\nlines"));
                root.forward(a, b).label("push");
                root.back(a, b);
                root.link(a, b);
            })
            .unwrap()
            .0
    }

    fn acyclic() -> Diagram {
        DiagramBuilder::new("Acyclic")
            .build(|root| {
                let a = root.node(Service::Github, "source");
                let (b, c) = root.cluster("Cloud", |cloud| {
                    (
                        cloud.node(Service::FunctionApps, "func"),
                        cloud.node(Service::StorageAccounts, "account"),
                    )
                });
                root.chain(&[a, b, c], EdgeDirection::Forward);
            })
            .unwrap()
            .0
    }

    #[test]
    fn test_layout_dot() {
        let dot = layout_dot(&sample());

        assert!(dot.starts_with("digraph G {"));
        assert!(dot.contains("n0 [label=\"Say 'hi'\"];"), "{dot}");
        assert!(dot.contains("n1 [label=\"two lines\"];"), "{dot}");
        assert!(dot.contains("n0 -> n1 [label=\"push\"];"), "{dot}");
        assert!(dot.contains("n1 -> n0;"), "back edges point at the source: {dot}");
        assert!(dot.trim_end().ends_with('}'));
    }

    #[test]
    fn test_layout_dot_escapes_backslashes() {
        let (diagram, ()) = DiagramBuilder::new("Paths")
            .build(|root| {
                let share = root.node(Service::StorageAccounts, "C:\\");
                let feed = root.node(Service::BlobStorage, "feeds\\rss");
                root.forward(share, feed).label("copy \\");
            })
            .unwrap();

        let dot = layout_dot(&diagram);
        assert!(dot.contains(r#"n0 [label="C:\\"];"#), "{dot}");
        assert!(dot.contains(r#"n1 [label="feeds\\rss"];"#), "{dot}");
        assert!(dot.contains(r#"n0 -> n1 [label="copy \\"];"#), "{dot}");
    }

    #[test]
    fn test_with_background() {
        let svg = r#"<?xml version="1.0"?><svg width="10" height="10"><g/></svg>"#.to_string();
        let out = with_background(svg, Color::new("white").unwrap());
        assert!(
            out.contains(r##"<svg width="10" height="10"><rect x="0" y="0" width="100%" height="100%" fill="#ffffff"/><g/>"##),
            "{out}"
        );

        let untouched = with_background("no svg here".to_string(), Color::default());
        assert_eq!(untouched, "no svg here");
    }

    #[test]
    fn test_render_svg() {
        let theme = Theme::new(&StyleConfig::default()).unwrap();
        let svg = render_svg(&acyclic(), &theme).unwrap();
        assert!(svg.contains("<svg"), "{svg}");
        assert!(svg.contains("</svg>"), "{svg}");
        assert!(svg.contains("#ffffff"), "default background is white: {svg}");
    }

    #[test]
    fn test_empty_diagram_renders() {
        let theme = Theme::new(&StyleConfig::default()).unwrap();
        let (diagram, ()) = DiagramBuilder::new("Empty").build(|_| {}).unwrap();
        let svg = render_svg(&diagram, &theme).unwrap();
        assert!(svg.starts_with("<svg"));
    }

    #[test]
    fn test_png_signature() {
        let theme = Theme::new(&StyleConfig::default()).unwrap();
        let png = render(&acyclic(), &theme, OutputFormat::Png).unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn test_unsupported_formats() {
        let theme = Theme::new(&StyleConfig::default()).unwrap();
        for format in [OutputFormat::Jpg, OutputFormat::Pdf] {
            let err = render(&sample(), &theme, format).unwrap_err();
            assert!(matches!(err, CanopyError::Render(_)));
        }
    }
}
