use anyhow::{bail, Context, Result};
use std::env;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::config::{Config, CONFIG_FILE, DEFAULT_SETTINGS};

/// Site path types
#[derive(Debug, Clone, Copy)]
pub enum SitePath {
    /// Site root: nearest ancestor holding pelikit.toml or pelicanconf.py
    Root,
    /// Content directory holding articles and pages
    Content,
    /// Generated output directory
    Output,
    /// Virtual environment directory
    Venv,
    /// Requirements manifest
    Requirements,
    /// Development settings file
    Settings,
    /// Production settings file
    PublishSettings,
    /// Content pipeline script
    PipelineScript,
    /// Provisioning stamp inside the venv
    Stamp,
}

/// Site - a Pelican site rooted at the directory holding its configuration.
///
/// Every delegate process runs with the root as its working directory, so the
/// generator settings and the pipeline script can keep addressing `content/`,
/// `themes/` and friends with relative paths.
#[derive(Debug)]
pub struct Site {
    root: PathBuf,
    config: Config,
}

impl Site {
    /// Discover the site by walking up from `start` until a directory holds
    /// `pelikit.toml` or the default development settings file.
    pub fn discover(start: &Path) -> Result<Self> {
        for dir in start.ancestors() {
            if dir.join(CONFIG_FILE).is_file() || dir.join(DEFAULT_SETTINGS).is_file() {
                debug!("site root at {:?}", dir);
                return Self::open(dir);
            }
        }

        bail!(
            "No Pelican site found in {:?} or any parent directory (looked for {} or {})",
            start,
            CONFIG_FILE,
            DEFAULT_SETTINGS
        );
    }

    /// Discover the site from a directory override or the working directory.
    pub fn locate(dir: Option<&Path>) -> Result<Self> {
        let start = match dir {
            // Canonicalize so relative overrides still walk up through real
            // ancestors.
            Some(dir) => dir
                .canonicalize()
                .with_context(|| format!("Failed to resolve directory {:?}", dir))?,
            None => env::current_dir().context("Failed to determine current directory")?,
        };

        Self::discover(&start)
    }

    /// Open a site rooted at a known directory.
    pub fn open(root: &Path) -> Result<Self> {
        let config = Config::load(&root.join(CONFIG_FILE))?;

        Ok(Self {
            root: root.to_path_buf(),
            config,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get path for a specific site location
    pub fn path(&self, path_type: SitePath) -> PathBuf {
        match path_type {
            SitePath::Root => self.root.clone(),
            SitePath::Content => self.resolve(&self.config.paths.content),
            SitePath::Output => self.resolve(&self.config.paths.output),
            SitePath::Venv => self.resolve(&self.config.paths.venv),
            SitePath::Requirements => self.resolve(&self.config.paths.requirements),
            SitePath::Settings => self.resolve(&self.config.generator.settings),
            SitePath::PublishSettings => self.resolve(&self.config.generator.publish_settings),
            SitePath::PipelineScript => self.resolve(&self.config.pipeline.script),
            SitePath::Stamp => self.path(SitePath::Venv).join(crate::venv::STAMP_FILE),
        }
    }

    /// Path of a tool installed in the venv (the interpreter, pip, pelican).
    pub fn venv_tool(&self, name: &str) -> PathBuf {
        let bin = if cfg!(windows) { "Scripts" } else { "bin" };
        self.path(SitePath::Venv).join(bin).join(name)
    }

    /// Expand `~` and resolve relative values against the site root.
    fn resolve(&self, raw: &str) -> PathBuf {
        let expanded = shellexpand::tilde(raw);
        let path = Path::new(expanded.as_ref());

        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}
