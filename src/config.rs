use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Name of the optional site configuration file, looked up at the site root.
pub const CONFIG_FILE: &str = "pelikit.toml";

/// Default development settings file; also used as a site root marker when no
/// config file is present.
pub const DEFAULT_SETTINGS: &str = "pelicanconf.py";

/// Site configuration loaded from `pelikit.toml`.
///
/// Every field is optional. A missing file yields the defaults, and a partial
/// file fills in whatever it does not set.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub python: String,
    pub paths: Paths,
    pub generator: Generator,
    pub dev: Dev,
    pub pipeline: Pipeline,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Paths {
    pub content: String,
    pub output: String,
    pub venv: String,
    pub requirements: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Generator {
    pub command: String,
    pub settings: String,
    pub publish_settings: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Dev {
    pub port: u16,
    pub bind: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Pipeline {
    pub script: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            python: "python3".to_string(),
            paths: Paths::default(),
            generator: Generator::default(),
            dev: Dev::default(),
            pipeline: Pipeline::default(),
        }
    }
}

impl Default for Paths {
    fn default() -> Self {
        Self {
            content: "content".to_string(),
            output: "output".to_string(),
            venv: "venv".to_string(),
            requirements: "requirements.txt".to_string(),
        }
    }
}

impl Default for Generator {
    fn default() -> Self {
        Self {
            command: "pelican".to_string(),
            settings: DEFAULT_SETTINGS.to_string(),
            publish_settings: "publishconf.py".to_string(),
        }
    }
}

impl Default for Dev {
    fn default() -> Self {
        Self {
            port: 8000,
            bind: "127.0.0.1".to_string(),
        }
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self {
            script: "scripts/run_pipeline.py".to_string(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        toml::from_str(&contents).with_context(|| format!("Failed to parse config file {:?}", path))
    }
}
