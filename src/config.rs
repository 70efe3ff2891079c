//! Process configuration.
//!
//! Precedence: CLI overrides > config files (explicit path, `CSVSIG_CONFIG`, `./csvsig.toml`,
//! `<user config dir>/csvsig.toml`) > environment variables > defaults. The first source that
//! sets a field wins.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::container::ContainerOptions;
use crate::container::DEFAULT_CHUNK_SIZE;
use crate::errors::SignError;

pub const CONFIG_FILE_NAME: &str = "csvsig.toml";
/// Must be identical for signing and verifying; minisign binds it into the signature.
pub const DEFAULT_TRUSTED_COMMENT: &str = "X123";
pub const DEFAULT_UNTRUSTED_COMMENT: &str = "auntrusted";
pub const DEFAULT_MINISIGN: &str = "minisign";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    pub trusted_comment: String,
    pub untrusted_comment: String,
    pub chunk_size: usize,
    pub minisign: PathBuf,
    pub public_key: Option<PathBuf>,
    pub secret_key: Option<PathBuf>,
    pub log_dir: Option<PathBuf>,
    pub log_level: Option<String>,
    pub log_config: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            trusted_comment: DEFAULT_TRUSTED_COMMENT.to_string(),
            untrusted_comment: DEFAULT_UNTRUSTED_COMMENT.to_string(),
            chunk_size: DEFAULT_CHUNK_SIZE,
            minisign: PathBuf::from(DEFAULT_MINISIGN),
            public_key: None,
            secret_key: None,
            log_dir: None,
            log_level: None,
            log_config: None,
        }
    }
}

/// One layer of settings as read from a file or the environment.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConfigLayer {
    pub trusted_comment: Option<String>,
    pub untrusted_comment: Option<String>,
    pub chunk_size: Option<usize>,
    pub minisign: Option<PathBuf>,
    pub public_key: Option<PathBuf>,
    pub secret_key: Option<PathBuf>,
    pub log_dir: Option<PathBuf>,
    pub log_level: Option<String>,
    pub log_config: Option<PathBuf>,
}

impl ConfigLayer {
    /// # Errors
    /// Returns `Config` when the TOML cannot be parsed.
    pub fn from_toml_str(s: &str) -> Result<Self, SignError> {
        toml::from_str(s).map_err(|e| SignError::Config(e.to_string()))
    }

    /// Read the `CSVSIG_*` variables through `get`.
    pub fn from_env_with<F: Fn(&str) -> Option<String>>(get: F) -> Self {
        Self {
            trusted_comment: get("CSVSIG_TRUSTED_COMMENT"),
            untrusted_comment: get("CSVSIG_UNTRUSTED_COMMENT"),
            chunk_size: get("CSVSIG_CHUNK_SIZE").and_then(|s| s.parse().ok()),
            minisign: get("CSVSIG_MINISIGN").map(PathBuf::from),
            public_key: get("CSVSIG_PUBLIC_KEY").map(PathBuf::from),
            secret_key: get("CSVSIG_SECRET_KEY").map(PathBuf::from),
            log_dir: get("CSVSIG_LOG_DIR").map(PathBuf::from),
            log_level: get("CSVSIG_LOG_LEVEL"),
            log_config: get("CSVSIG_LOG_CONFIG").map(PathBuf::from),
        }
    }

    /// Fill fields still unset from `lower`.
    pub fn fill_from(&mut self, lower: ConfigLayer) {
        if self.trusted_comment.is_none() { self.trusted_comment = lower.trusted_comment; }
        if self.untrusted_comment.is_none() { self.untrusted_comment = lower.untrusted_comment; }
        if self.chunk_size.is_none() { self.chunk_size = lower.chunk_size; }
        if self.minisign.is_none() { self.minisign = lower.minisign; }
        if self.public_key.is_none() { self.public_key = lower.public_key; }
        if self.secret_key.is_none() { self.secret_key = lower.secret_key; }
        if self.log_dir.is_none() { self.log_dir = lower.log_dir; }
        if self.log_level.is_none() { self.log_level = lower.log_level; }
        if self.log_config.is_none() { self.log_config = lower.log_config; }
    }

    #[must_use]
    pub fn resolve(self) -> Config {
        let d = Config::default();
        Config {
            trusted_comment: self.trusted_comment.unwrap_or(d.trusted_comment),
            untrusted_comment: self.untrusted_comment.unwrap_or(d.untrusted_comment),
            chunk_size: self.chunk_size.unwrap_or(d.chunk_size),
            minisign: self.minisign.unwrap_or(d.minisign),
            public_key: self.public_key,
            secret_key: self.secret_key,
            log_dir: self.log_dir,
            log_level: self.log_level,
            log_config: self.log_config,
        }
    }
}

/// Candidate config files in precedence order; they need not exist.
#[must_use]
pub fn find_config_paths(explicit: Option<&Path>) -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Some(p) = explicit { paths.push(p.to_path_buf()); }
    if let Ok(p) = std::env::var("CSVSIG_CONFIG") { paths.push(PathBuf::from(p)); }
    if let Ok(cur) = std::env::current_dir() { paths.push(cur.join(CONFIG_FILE_NAME)); }
    if let Some(dir) = dirs_next::config_dir() { paths.push(dir.join(CONFIG_FILE_NAME)); }
    paths
}

impl Config {
    /// Load from the standard locations and the process environment.
    ///
    /// # Errors
    /// See [`Config::load_from`].
    pub fn load(explicit: Option<&Path>) -> Result<Self, SignError> {
        let paths = find_config_paths(explicit);
        Self::load_from(explicit, &paths, |k| std::env::var(k).ok())
    }

    /// Merge `paths` (first wins), then the environment read via `env`, then defaults.
    ///
    /// # Errors
    /// `Config` when the explicit file is missing or unparsable, or when validation fails.
    /// Discovered files that fail to parse are skipped with a warning.
    pub fn load_from<F: Fn(&str) -> Option<String>>(
        explicit: Option<&Path>,
        paths: &[PathBuf],
        env: F,
    ) -> Result<Self, SignError> {
        let mut layer = ConfigLayer::default();
        for p in paths {
            let is_explicit = explicit == Some(p.as_path());
            if !p.exists() {
                if is_explicit {
                    return Err(SignError::Config(format!("config file not found: {}", p.display())));
                }
                continue;
            }
            let parsed = std::fs::read_to_string(p)
                .map_err(|e| SignError::Config(format!("{}: {e}", p.display())))
                .and_then(|s| ConfigLayer::from_toml_str(&s));
            match parsed {
                Ok(file_layer) => {
                    log::debug!("config: loaded {}", p.display());
                    layer.fill_from(file_layer);
                }
                Err(e) if is_explicit => return Err(e),
                Err(e) => log::warn!("config: skipping {}: {e}", p.display()),
            }
        }
        layer.fill_from(ConfigLayer::from_env_with(env));
        let cfg = layer.resolve();
        cfg.validate()?;
        Ok(cfg)
    }

    /// # Errors
    /// `Config` for a blank or multi-line trusted comment or a zero chunk size.
    pub fn validate(&self) -> Result<(), SignError> {
        if self.trusted_comment.trim().is_empty() {
            return Err(SignError::Config("trusted_comment cannot be blank".into()));
        }
        if self.trusted_comment.contains(['\n', '\r']) || self.untrusted_comment.contains(['\n', '\r']) {
            return Err(SignError::Config("comments must fit on a single line".into()));
        }
        if self.chunk_size == 0 {
            return Err(SignError::Config("chunk_size must be at least 1".into()));
        }
        Ok(())
    }

    #[must_use]
    pub fn container_options(&self) -> ContainerOptions {
        ContainerOptions { chunk_size: self.chunk_size }
    }
}
