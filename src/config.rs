//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/treelab/treelab.toml`
//! 3. Local config: `./.treelab.toml`
//! 4. Environment variables: `TREELAB_*` prefix (`__` separates nesting,
//!    e.g. `TREELAB_SWEEP__MIN_NODES`)

use std::path::PathBuf;

use config::{Config, Environment, File};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::builder::Shape;
use crate::errors::TreeResult;

pub const LOCAL_CONFIG: &str = ".treelab.toml";

/// Default size range for `sweep` when no flags are given.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SweepSettings {
    pub min_nodes: usize,
    pub max_nodes: usize,
    pub step: usize,
    pub repeats: usize,
}

impl Default for SweepSettings {
    fn default() -> Self {
        Self {
            min_nodes: 1_000,
            max_nodes: 10_000,
            step: 1_000,
            repeats: 3,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Tree shape used when a command does not pass one
    pub shape: Shape,
    /// Seed for random shapes
    pub seed: u64,
    #[serde(default)]
    pub sweep: SweepSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            shape: Shape::Complete,
            seed: 42,
            sweep: SweepSettings::default(),
        }
    }
}

impl Settings {
    /// Loads the merged configuration from the standard layers.
    pub fn load() -> TreeResult<Self> {
        Self::load_layered(global_config_path(), Some(PathBuf::from(LOCAL_CONFIG)))
    }

    /// Same merge with explicit file locations; `load` passes the real ones.
    pub fn load_layered(global: Option<PathBuf>, local: Option<PathBuf>) -> TreeResult<Self> {
        let mut builder = Config::builder().add_source(Config::try_from(&Settings::default())?);

        if let Some(path) = global {
            builder = builder.add_source(File::from(path).required(false));
        }
        if let Some(path) = local {
            builder = builder.add_source(File::from(path).required(false));
        }
        builder = builder.add_source(
            Environment::with_prefix("TREELAB")
                .separator("__")
                .try_parsing(true),
        );

        Ok(builder.build()?.try_deserialize()?)
    }

    /// TOML template written by `config init`.
    pub fn template() -> TreeResult<String> {
        let body = toml::to_string_pretty(&Settings::default())?;
        Ok(format!(
            "# treelab configuration\n\
             # shape: complete | left-skewed | right-skewed | random\n\
             {}",
            body
        ))
    }
}

pub fn global_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "treelab").map(|dirs| dirs.config_dir().join("treelab.toml"))
}
