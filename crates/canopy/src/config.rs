//! Configuration types for Canopy diagram rendering.
//!
//! This module provides configuration structures that control how diagrams
//! are rendered. All types implement [`serde::Deserialize`] for loading from
//! TOML files. None of them can change the declared graph itself.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining the sections below.
//! - [`StyleConfig`] - Default visual styling such as background color and padding.
//! - [`RenderConfig`] - Which [`Engine`] and [`OutputFormat`] to use.
//! - [`IconConfig`] - Where service icon art is looked up.
//!
//! # Example
//!
//! ```
//! # use canopy::config::AppConfig;
//! let config = AppConfig::default();
//! assert!(config.style().background_color().is_ok());
//! assert!(config.render().format().is_none());
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use canopy_core::{
    color::Color,
    semantic::{OutputFormat, Service},
};

use crate::export::Engine;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,

    /// Render configuration section.
    #[serde(default)]
    render: RenderConfig,

    /// Icon lookup configuration section.
    #[serde(default)]
    icons: IconConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(style: StyleConfig, render: RenderConfig, icons: IconConfig) -> Self {
        Self {
            style,
            render,
            icons,
        }
    }

    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    pub fn render(&self) -> &RenderConfig {
        &self.render
    }

    pub fn render_mut(&mut self) -> &mut RenderConfig {
        &mut self.render
    }

    pub fn icons(&self) -> &IconConfig {
        &self.icons
    }
}

/// Visual styling defaults.
///
/// These values only fill in graph attributes the diagram does not set
/// itself; a diagram declaring `bgcolor` keeps its own background.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct StyleConfig {
    /// Default background color, as a CSS color string.
    #[serde(default)]
    background_color: Option<String>,

    /// Default padding around the drawing, in inches.
    #[serde(default)]
    pad: Option<f32>,

    /// Font family for titles, labels and cluster names.
    #[serde(default)]
    font_name: Option<String>,
}

impl StyleConfig {
    pub fn new(background_color: Option<String>, pad: Option<f32>, font_name: Option<String>) -> Self {
        Self {
            background_color,
            pad,
            font_name,
        }
    }

    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed
    /// into a valid [`Color`].
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        self.background_color
            .as_deref()
            .map(Color::new)
            .transpose()
            .map_err(|err| format!("Invalid background color in config: {err}"))
    }

    /// Returns the configured padding.
    ///
    /// # Errors
    ///
    /// Returns an error for negative or non-finite values.
    pub fn pad(&self) -> Result<Option<f32>, String> {
        match self.pad {
            Some(pad) if !pad.is_finite() || pad < 0.0 => {
                Err(format!("Invalid pad in config: {pad}"))
            }
            pad => Ok(pad),
        }
    }

    pub fn font_name(&self) -> Option<&str> {
        self.font_name.as_deref()
    }
}

/// Rendering backend selection.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct RenderConfig {
    /// Engine used to lay out and draw the diagram.
    #[serde(default)]
    engine: Option<Engine>,

    /// Output format, overriding the one declared by the diagram.
    #[serde(default)]
    format: Option<OutputFormat>,
}

impl RenderConfig {
    pub fn new(engine: Option<Engine>, format: Option<OutputFormat>) -> Self {
        Self { engine, format }
    }

    /// The configured engine, or the build's default engine.
    pub fn engine(&self) -> Engine {
        self.engine.unwrap_or_default()
    }

    pub fn format(&self) -> Option<OutputFormat> {
        self.format
    }

    pub fn set_engine(&mut self, engine: Engine) {
        self.engine = Some(engine);
    }

    pub fn set_format(&mut self, format: OutputFormat) {
        self.format = Some(format);
    }
}

/// Service icon lookup.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct IconConfig {
    /// Root of the icon tree (`<provider>/<category>/<icon>.png`).
    #[serde(default)]
    directory: Option<PathBuf>,
}

impl IconConfig {
    pub fn new(directory: Option<PathBuf>) -> Self {
        Self { directory }
    }

    pub fn directory(&self) -> Option<&Path> {
        self.directory.as_deref()
    }

    /// Returns the icon file for `service` if one exists on disk.
    pub fn resolve(&self, service: Service) -> Option<PathBuf> {
        let path = self.directory.as_ref()?.join(service.icon_path());
        path.is_file().then_some(path)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn test_deserialize_full_config() {
        let config: AppConfig = toml::from_str(
            r##"
            [style]
            background_color = "#fafafa"
            pad = 1.0
            font_name = "Helvetica"

            [render]
            engine = "native"
            format = "svg"

            [icons]
            directory = "/opt/icons"
            "##,
        )
        .expect("valid config");

        assert_eq!(
            config.style().background_color().unwrap().unwrap().to_hex(),
            "#fafafa"
        );
        assert_eq!(config.style().pad(), Ok(Some(1.0)));
        assert_eq!(config.style().font_name(), Some("Helvetica"));
        assert_eq!(config.render().engine(), Engine::Native);
        assert_eq!(config.render().format(), Some(OutputFormat::Svg));
        assert_eq!(config.icons().directory(), Some(Path::new("/opt/icons")));
    }

    #[test]
    fn test_deserialize_empty_config() {
        let config: AppConfig = toml::from_str("").expect("empty config is valid");
        assert_eq!(config.style().background_color(), Ok(None));
        assert_eq!(config.render().engine(), Engine::default());
        assert!(config.icons().directory().is_none());
    }

    #[test]
    fn test_invalid_values() {
        let style = StyleConfig::new(Some("no-such-color".to_string()), Some(-1.0), None);
        assert!(style.background_color().is_err());
        assert!(style.pad().is_err());
    }

    #[test]
    fn test_render_overrides() {
        let mut render = RenderConfig::default();
        render.set_engine(Engine::Native);
        render.set_format(OutputFormat::Dot);
        assert_eq!(render.engine(), Engine::Native);
        assert_eq!(render.format(), Some(OutputFormat::Dot));
    }

    #[test]
    fn test_icon_resolution() {
        let dir = tempfile::tempdir().unwrap();
        let icons = IconConfig::new(Some(dir.path().to_path_buf()));
        assert!(icons.resolve(Service::KeyVaults).is_none());

        let icon = dir.path().join(Service::KeyVaults.icon_path());
        fs::create_dir_all(icon.parent().unwrap()).unwrap();
        fs::write(&icon, b"png").unwrap();

        assert_eq!(icons.resolve(Service::KeyVaults), Some(icon));
        assert!(IconConfig::default().resolve(Service::KeyVaults).is_none());
    }
}
