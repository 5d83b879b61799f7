use anyhow::{anyhow, Result};
use directories::{BaseDirs, ProjectDirs};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use linear_core::DEFAULT_ENDPOINT;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::CommandError;

/// Endpoint and credential for the Linear API
///
/// Commands receive this explicitly; only [`Config::load`] touches the
/// process environment.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Config {
    /// GraphQL endpoint (`LINEAR_GRAPHQL_ENDPOINT`)
    pub graphql_endpoint: String,
    /// Authorization header value, e.g. `Bearer <token>` (`LINEAR_API_KEY`)
    pub api_key: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            graphql_endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: None,
        }
    }
}

impl Config {
    /// Defaults, then config files, then `LINEAR_*` environment variables
    pub fn load(config_path: Option<PathBuf>) -> Result<Self> {
        let explicit_path = config_path.as_deref();
        if let Some(path) = explicit_path {
            if !path.exists() {
                return Err(anyhow!("Config file not found: {}", path.display()));
            }
        }

        let figment = with_files(base(), explicit_path).merge(Env::prefixed("LINEAR_"));
        extract(figment)
    }

    /// The credential, or an error if none is configured
    pub fn api_key(&self) -> std::result::Result<&str, CommandError> {
        self.api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or(CommandError::MissingApiKey)
    }
}

fn base() -> Figment {
    Figment::new().merge(Serialized::defaults(Config::default()))
}

fn with_files(mut figment: Figment, explicit: Option<&Path>) -> Figment {
    for path in config_paths(explicit) {
        if path.exists() {
            log::debug!("reading config from {}", path.display());
            figment = figment.merge(Toml::file(path));
        }
    }
    figment
}

fn extract(figment: Figment) -> Result<Config> {
    figment
        .extract()
        .map_err(|e| anyhow!("Failed to load config: {}", e))
}

fn config_paths(explicit: Option<&Path>) -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Some(path) = explicit {
        paths.push(path.to_path_buf());
        return paths;
    }

    if let Some(path) = get_project_config_path() {
        push_unique(&mut paths, path);
    }
    if let Some(path) = get_xdg_config_path() {
        push_unique(&mut paths, path);
    }

    paths
}

fn push_unique(paths: &mut Vec<PathBuf>, path: PathBuf) {
    if !paths.contains(&path) {
        paths.push(path);
    }
}

fn get_project_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "linear").map(|d| d.config_dir().join("config.toml"))
}

fn get_xdg_config_path() -> Option<PathBuf> {
    if let Some(dir) = std::env::var_os("XDG_CONFIG_HOME") {
        return Some(PathBuf::from(dir).join("linear").join("config.toml"));
    }

    BaseDirs::new().map(|dirs| {
        dirs.home_dir()
            .join(".config")
            .join("linear")
            .join("config.toml")
    })
}
