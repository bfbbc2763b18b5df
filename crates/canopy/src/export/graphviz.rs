//! Rendering through the system Graphviz `dot` binary.

use dot_structures::Graph;
use graphviz_rust::{
    cmd::{CommandArg, Format},
    exec,
    printer::{DotPrinter, PrinterContext},
};
use log::{debug, info};

use canopy_core::semantic::OutputFormat;

use crate::error::CanopyError;

fn command_format(format: OutputFormat) -> Option<Format> {
    match format {
        OutputFormat::Png => Some(Format::Png),
        OutputFormat::Jpg => Some(Format::Jpg),
        OutputFormat::Svg => Some(Format::Svg),
        OutputFormat::Pdf => Some(Format::Pdf),
        OutputFormat::Dot => None,
    }
}

/// Lay out `graph` with Graphviz and return the encoded image.
///
/// The `dot` format returns the printed source without running Graphviz.
///
/// # Errors
///
/// Returns [`CanopyError::Export`] with the error reported by the Graphviz
/// invocation, e.g. when the `dot` binary is not installed.
pub(crate) fn render(graph: Graph, format: OutputFormat) -> Result<Vec<u8>, CanopyError> {
    let mut ctx = PrinterContext::default();

    let Some(command_format) = command_format(format) else {
        debug!("Emitting DOT source without running Graphviz");
        return Ok(graph.print(&mut ctx).into_bytes());
    };

    info!(format:% = format; "Running Graphviz");
    let bytes = exec(graph, &mut ctx, vec![CommandArg::Format(command_format)])
        .map_err(CanopyError::export)?;
    debug!(bytes = bytes.len(); "Graphviz finished");

    Ok(bytes)
}
