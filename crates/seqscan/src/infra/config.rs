//! Configuration management utilities.

use std::collections::BTreeSet;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use dirs_next::config_dir;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

static DEFAULT_CONFIG: Lazy<&'static str> =
    Lazy::new(|| include_str!("../../assets/default-config.toml"));
static DEFAULT_WORKSPACE_CONFIG_PATH: &str = ".seqscan/config.toml";

/// Layered configuration loaded from defaults, user, workspace, and env.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub format: Format,
    #[serde(default)]
    pub scan: Scan,
    #[serde(default)]
    pub ignore: Ignore,
}

/// Templates used when the command line does not name one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Format {
    #[serde(default = "Format::default_template")]
    pub default: String,
    #[serde(default = "Format::default_listing")]
    pub listing: String,
}

impl Format {
    fn default_template() -> String {
        "%h%r%t".into()
    }

    fn default_listing() -> String {
        "%4l %h%p%t %R".into()
    }
}

impl Default for Format {
    fn default() -> Self {
        Self {
            default: Self::default_template(),
            listing: Self::default_listing(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Scan {
    #[serde(default)]
    pub show_hidden: bool,
    #[serde(default)]
    pub recursive: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ignore {
    #[serde(default)]
    pub globs: Vec<String>,
}

impl Default for Ignore {
    fn default() -> Self {
        Self {
            globs: vec![".DS_Store".into(), "Thumbs.db".into()],
        }
    }
}

/// Environment overrides for the templates.
#[derive(Debug, Default, Clone)]
pub struct EnvOverrides {
    format: Option<String>,
    listing_format: Option<String>,
}

impl EnvOverrides {
    fn from_env() -> Self {
        Self {
            format: env::var("SEQSCAN_FORMAT").ok(),
            listing_format: env::var("SEQSCAN_LISTING_FORMAT").ok(),
        }
    }

    #[cfg(test)]
    fn for_tests(format: &str, listing_format: &str) -> Self {
        Self {
            format: Some(format.to_owned()),
            listing_format: Some(listing_format.to_owned()),
        }
    }
}

impl Config {
    /// Load configuration from defaults, user/global config, workspace config, and env overrides.
    pub fn load() -> Result<Self> {
        let env = EnvOverrides::from_env();
        let global = global_config_path();
        let workspace = workspace_config_path()?;
        Self::load_with_layers(global, workspace, env)
    }

    fn load_with_layers(
        global: Option<PathBuf>,
        workspace: Option<PathBuf>,
        env_overrides: EnvOverrides,
    ) -> Result<Self> {
        let mut layers: Vec<Config> = Vec::new();

        layers.push(Self::from_str(&DEFAULT_CONFIG)?);

        if let Some(global_path) = global.filter(|path| path.exists()) {
            tracing::debug!(path = %global_path.display(), "loading user config");
            layers.push(Self::from_file(&global_path)?);
        }

        if let Some(workspace_path) = workspace.filter(|path| path.exists()) {
            tracing::debug!(path = %workspace_path.display(), "loading workspace config");
            layers.push(Self::from_file(&workspace_path)?);
        }

        let merged = layers.into_iter().reduce(Config::merge).unwrap_or_default();
        Ok(apply_env_overrides(merged, env_overrides))
    }

    fn from_file(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        Self::from_str(&data)
    }

    fn from_str(contents: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(contents).with_context(|| "failed to parse TOML config".to_string())?;
        Ok(config)
    }

    fn merge(self, other: Self) -> Self {
        Self {
            format: merge_format(self.format, other.format),
            scan: Scan {
                show_hidden: self.scan.show_hidden || other.scan.show_hidden,
                recursive: self.scan.recursive || other.scan.recursive,
            },
            ignore: merge_ignore(self.ignore, other.ignore),
        }
    }
}

fn merge_format(base: Format, overlay: Format) -> Format {
    Format {
        default: choose(base.default, overlay.default, Format::default_template),
        listing: choose(base.listing, overlay.listing, Format::default_listing),
    }
}

fn choose(base: String, overlay: String, default_fn: fn() -> String) -> String {
    if overlay != default_fn() {
        overlay
    } else {
        base
    }
}

fn merge_ignore(base: Ignore, overlay: Ignore) -> Ignore {
    let mut globs: BTreeSet<String> = base.globs.into_iter().collect();
    globs.extend(overlay.globs);

    Ignore {
        globs: globs.into_iter().collect(),
    }
}

fn global_config_path() -> Option<PathBuf> {
    config_dir().map(|base| base.join("seqscan/config.toml"))
}

fn workspace_config_path() -> Result<Option<PathBuf>> {
    let cwd = env::current_dir()?;
    let root = find_repo_root(&cwd).unwrap_or(cwd);
    Ok(Some(root.join(DEFAULT_WORKSPACE_CONFIG_PATH)))
}

fn find_repo_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(".git").exists())
        .map(Path::to_path_buf)
}

fn apply_env_overrides(mut config: Config, env: EnvOverrides) -> Config {
    if let Some(format) = env.format {
        config.format.default = format;
    }
    if let Some(listing) = env.listing_format {
        config.format.listing = listing;
    }
    config
}
