//! Command-line argument definitions for the Canopy CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. No argument is required: without any, the diagram is
//! written to `./architecture.png` with the default engine.

use clap::Parser;

use canopy::{Engine, semantic::OutputFormat};

/// Command-line arguments for the Canopy diagram renderer
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Directory the diagram image is written to
    #[arg(short, long, default_value = ".")]
    pub output_dir: String,

    /// Output format (png, jpg, svg, pdf, dot)
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// Rendering engine (graphviz, native)
    #[arg(short, long)]
    pub engine: Option<Engine>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            output_dir: ".".to_string(),
            format: None,
            engine: None,
            config: None,
            log_level: "info".to_string(),
        }
    }
}
