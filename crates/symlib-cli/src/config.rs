//! Configuration discovery for the CLI.
//!
//! A catalog usually lives in the project that renders its artwork, so the
//! settings for a catalog are looked for beside it before falling back to
//! the working directory and the per-user configuration directory.

use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use symlib::{SymlibError, config::AppConfig};

/// File name looked up beside the catalog and in the working directory.
const CONFIG_FILE_NAME: &str = "symlib.toml";

/// Where a configuration file is looked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigLocation {
    /// Named with `--config`
    Explicit,
    /// `symlib.toml` in the catalog's directory
    Catalog,
    /// `symlib.toml` in the working directory
    WorkingDir,
    /// `config.toml` in the platform's per-user configuration directory
    User,
}

/// Errors reading a configuration file.
#[derive(Debug, Error)]
enum ConfigFileError {
    #[error("Configuration file `{0}` does not exist")]
    Missing(PathBuf),

    #[error("Invalid configuration in `{path}`: {source}")]
    Invalid {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl From<ConfigFileError> for SymlibError {
    fn from(err: ConfigFileError) -> Self {
        SymlibError::Config(err.to_string())
    }
}

/// Loads the configuration used to process `catalog`.
///
/// Locations are tried in this order, and the first existing file wins:
/// the explicit path, `symlib.toml` beside the catalog, `symlib.toml` in
/// the working directory, then the per-user configuration directory.
/// Defaults are used when none exists.
///
/// # Errors
///
/// Returns [`SymlibError::Config`] if the explicit path does not exist or
/// the chosen file is not valid configuration TOML.
pub fn load_config(
    explicit_path: Option<impl AsRef<Path>>,
    catalog: &Path,
) -> Result<AppConfig, SymlibError> {
    if let Some(path) = explicit_path {
        return load_config_file(ConfigLocation::Explicit, path.as_ref());
    }

    for (location, path) in candidates(catalog) {
        if path.is_file() {
            return load_config_file(location, &path);
        }
        debug!(location:?, path = path.display().to_string(); "No configuration file");
    }

    debug!("No configuration file found, using default configuration");
    Ok(AppConfig::default())
}

/// Implicit locations, most specific first.
fn candidates(catalog: &Path) -> Vec<(ConfigLocation, PathBuf)> {
    let mut candidates = Vec::new();

    let catalog_dir = catalog
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    candidates.push((ConfigLocation::Catalog, catalog_dir.join(CONFIG_FILE_NAME)));

    if catalog_dir != Path::new(".") {
        candidates.push((ConfigLocation::WorkingDir, PathBuf::from(CONFIG_FILE_NAME)));
    }

    match ProjectDirs::from("com", "symlib", "symlib") {
        Some(dirs) => {
            candidates.push((ConfigLocation::User, dirs.config_dir().join("config.toml")));
        }
        None => debug!("Could not determine the per-user configuration directory"),
    }

    candidates
}

fn load_config_file(location: ConfigLocation, path: &Path) -> Result<AppConfig, SymlibError> {
    if !path.exists() {
        return Err(ConfigFileError::Missing(path.to_path_buf()).into());
    }

    info!(location:?, path = path.display().to_string(); "Loading configuration");
    let content = fs::read_to_string(path)?;
    let config = toml::from_str(&content).map_err(|source| ConfigFileError::Invalid {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(config)
}
