use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigPathError {
    #[error("neither XDG_CONFIG_HOME nor HOME is set")]
    MissingHomeDirectory,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Path(#[from] ConfigPathError),
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

const APP_DIR: &str = "token-studio";
const APP_CONFIG_FILE: &str = "config.json";
const STORE_DIR: &str = "store";
const CACHE_DIR: &str = "local-cache";

/// Application-level settings from `config.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AppConfig {
    /// Root of the file-backed document store.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
    /// Tracing filter used when `RUST_LOG` is unset.
    #[serde(default)]
    pub log_filter: Option<String>,
}

impl AppConfig {
    pub fn resolve_data_dir(
        &self,
        xdg_config_home: Option<&Path>,
        home: Option<&Path>,
    ) -> Result<PathBuf, ConfigPathError> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => app_config_path(APP_DIR, STORE_DIR, xdg_config_home, home),
        }
    }
}

/// Directory the local token cache lives in, beside the document store.
pub fn cache_dir(data_dir: &Path) -> PathBuf {
    data_dir.join(CACHE_DIR)
}

/// Reads `config.json`; a missing file yields defaults.
pub fn read_app_config() -> Result<AppConfig, ConfigError> {
    let (xdg_config_home, home) = config_env_dirs();
    read_app_config_with(xdg_config_home.as_deref(), home.as_deref())
}

fn read_app_config_with(
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> Result<AppConfig, ConfigError> {
    let path = app_config_path(APP_DIR, APP_CONFIG_FILE, xdg_config_home, home)?;
    let contents = match std::fs::read_to_string(&path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(AppConfig::default()),
        Err(source) => return Err(ConfigError::Read { path, source }),
    };
    serde_json::from_str(&contents).map_err(|source| ConfigError::Parse { path, source })
}

pub fn config_env_dirs() -> (Option<PathBuf>, Option<PathBuf>) {
    (
        std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from),
        std::env::var_os("HOME").map(PathBuf::from),
    )
}

pub fn app_config_path(
    app_dir: &str,
    file_name: &str,
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> Result<PathBuf, ConfigPathError> {
    let mut path = config_root(xdg_config_home, home)?;
    path.push(app_dir);
    path.push(file_name);
    Ok(path)
}

fn config_root(
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> Result<PathBuf, ConfigPathError> {
    if let Some(xdg) = xdg_config_home.filter(|path| !path.as_os_str().is_empty()) {
        return Ok(xdg.to_path_buf());
    }

    let home = home.ok_or(ConfigPathError::MissingHomeDirectory)?;
    Ok(home.join(".config"))
}
