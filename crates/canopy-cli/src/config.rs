//! Locating and reading the CLI configuration file.
//!
//! An explicit `--config` path always wins. Otherwise the first existing file
//! among `canopy/config.toml` and `<platform config dir>/config.toml` is used,
//! and without either the defaults apply.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use canopy::{CanopyError, config::AppConfig};

const LOCAL_CONFIG: &str = "canopy/config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration file {0} does not exist")]
    MissingFile(PathBuf),

    #[error("cannot read configuration file {path}: {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("invalid configuration in {path}: {message}")]
    Parse { path: PathBuf, message: String },
}

impl From<ConfigError> for CanopyError {
    fn from(err: ConfigError) -> Self {
        CanopyError::Config(err.to_string())
    }
}

/// Where a configuration file was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Origin {
    Explicit,
    Local,
    System,
}

/// Load the configuration for this run.
///
/// # Errors
///
/// Returns `CanopyError::Config` if the explicit path does not exist or the
/// selected file is unreadable or not a valid configuration.
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, CanopyError> {
    if let Some(path) = explicit_path {
        return read_config(Origin::Explicit, path.as_ref());
    }

    match discover() {
        Some((origin, path)) => read_config(origin, &path),
        None => {
            debug!("No configuration file found, using default configuration");
            Ok(AppConfig::default())
        }
    }
}

fn discover() -> Option<(Origin, PathBuf)> {
    let system = ProjectDirs::from("com", "canopy", "canopy")
        .map(|dirs| dirs.config_dir().join("config.toml"));
    if system.is_none() {
        debug!("Could not determine platform-specific config directory");
    }

    std::iter::once((Origin::Local, PathBuf::from(LOCAL_CONFIG)))
        .chain(system.map(|path| (Origin::System, path)))
        .find(|(origin, path)| {
            let found = path.is_file();
            debug!(origin:?, path = path.display().to_string(), found; "Looking for configuration");
            found
        })
}

fn read_config(origin: Origin, path: &Path) -> Result<AppConfig, CanopyError> {
    info!(origin:?, path = path.display().to_string(); "Loading configuration");

    let content = fs::read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => ConfigError::MissingFile(path.to_path_buf()),
        _ => ConfigError::Read {
            path: path.to_path_buf(),
            source,
        },
    })?;

    let config = toml::from_str(&content).map_err(|err| ConfigError::Parse {
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use canopy::{Engine, semantic::OutputFormat};

    use super::*;

    #[test]
    fn test_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "[render]\nengine = \"native\"\nformat = \"svg\"\n",
        )
        .unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.render().engine(), Engine::Native);
        assert_eq!(config.render().format(), Some(OutputFormat::Svg));
    }

    #[test]
    fn test_missing_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_config(Some(dir.path().join("absent.toml")));
        assert!(matches!(result, Err(CanopyError::Config(msg)) if msg.contains("absent.toml")));
    }

    #[test]
    fn test_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[render]\nengine = \"cairo\"\n").unwrap();

        let result = load_config(Some(&path));
        assert!(
            matches!(&result, Err(CanopyError::Config(msg)) if msg.contains("config.toml")),
            "{result:?}"
        );
    }

    #[test]
    fn test_directory_is_not_a_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_config(Some(dir.path()));
        assert!(matches!(result, Err(CanopyError::Config(_))));
    }
}
