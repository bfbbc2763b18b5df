//! CLI logic for the Canopy diagram renderer.
//!
//! The binary takes no required input: it declares the RSS feed
//! architecture and writes it to `architecture.<ext>`.

pub mod architecture;
pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::path::PathBuf;

use log::info;

use canopy::{CanopyError, Renderer};

/// Run the Canopy CLI application
///
/// Declares the architecture diagram, renders it with the configured engine
/// and writes it into the output directory.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `CanopyError` for:
/// - Configuration loading errors
/// - Rendering errors, including failures of the Graphviz binary
/// - File I/O errors
pub fn run(args: &Args) -> Result<PathBuf, CanopyError> {
    info!(output_dir = args.output_dir; "Rendering architecture diagram");

    let mut app_config = config::load_config(args.config.as_ref())?;
    if let Some(engine) = args.engine {
        app_config.render_mut().set_engine(engine);
    }
    if let Some(format) = args.format {
        app_config.render_mut().set_format(format);
    }

    let diagram = architecture::diagram()?;

    let renderer = Renderer::new(app_config);
    let path = renderer.render_to_file(&diagram, &args.output_dir)?;

    info!(output_file = path.display().to_string(); "Diagram exported successfully");

    Ok(path)
}
