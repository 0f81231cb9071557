use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::process::Command;
use tracing::debug;

use crate::manifest::Manifest;
use crate::process;
use crate::site::{Site, SitePath};
use crate::ui;

/// Name of the provisioning stamp written inside the venv.
pub const STAMP_FILE: &str = ".pelikit-stamp.toml";

/// Provisioning stamp
/// Records which requirements the environment was last installed against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stamp {
    /// Version of the stamp format
    version: u32,
    /// When the environment was last provisioned
    pub provisioned_at: String,
    /// SHA-256 of the requirements file at provisioning time
    pub requirements_digest: String,
    /// Number of requirements installed
    pub requirement_count: usize,
}

impl Stamp {
    pub fn new(manifest: &Manifest) -> Self {
        Self {
            version: 1,
            provisioned_at: chrono::Utc::now().to_rfc3339(),
            requirements_digest: manifest.digest().to_string(),
            requirement_count: manifest.len(),
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read provisioning stamp from {:?}", path))?;

        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse provisioning stamp from {:?}", path))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let contents =
            toml::to_string_pretty(self).context("Failed to serialize provisioning stamp")?;

        fs::write(path, contents)
            .with_context(|| format!("Failed to write provisioning stamp to {:?}", path))?;

        Ok(())
    }
}

/// Whether the environment has been created. The venv module writes
/// `pyvenv.cfg` at the venv root, so its presence is the marker.
pub fn is_provisioned(site: &Site) -> bool {
    site.path(SitePath::Venv).join("pyvenv.cfg").is_file()
}

/// Create the virtualenv if needed and install the manifest into it.
///
/// Safe to re-run: an existing venv is reused, and the install step is pip's
/// to make idempotent.
pub fn provision(site: &Site) -> Result<()> {
    let manifest = Manifest::load(&site.path(SitePath::Requirements))?;

    for name in manifest.duplicates() {
        ui::warn(format!(
            "{} lists {} more than once ({})",
            site.config().paths.requirements,
            name,
            manifest.lines_named(name).join(", ")
        ));
    }

    let venv_dir = site.path(SitePath::Venv);
    if is_provisioned(site) {
        debug!("virtualenv already present at {:?}", venv_dir);
        ui::info(format!("Using existing virtualenv at {}", venv_dir.display()));
    } else {
        create(site, &venv_dir)?;
    }

    install(site, &manifest)?;

    Stamp::new(&manifest).save(&site.path(SitePath::Stamp))?;

    ui::success("Ready", describe(&manifest));
    Ok(())
}

/// Ensure the venv exists before a command that needs its tools, and warn
/// (never fail) when provisioning looks out of date.
pub fn preflight(site: &Site) -> Result<()> {
    if !is_provisioned(site) {
        bail!(
            "No virtualenv at {:?}; run 'pelikit venv' first",
            site.path(SitePath::Venv)
        );
    }

    if let Some(warning) = staleness(site) {
        ui::warn(warning);
    }

    Ok(())
}

/// Compare the stamp against the current requirements file. Returns a warning
/// message when the environment was provisioned against different contents.
pub fn staleness(site: &Site) -> Option<String> {
    let requirements = site.path(SitePath::Requirements);
    if !requirements.is_file() {
        return None;
    }

    let manifest = match Manifest::load(&requirements) {
        Ok(manifest) => manifest,
        Err(err) => {
            debug!("skipping staleness check: {:#}", err);
            return None;
        }
    };

    let stamp_path = site.path(SitePath::Stamp);
    if !stamp_path.is_file() {
        return Some(
            "Virtualenv has no provisioning record; run 'pelikit venv' to refresh it".to_string(),
        );
    }

    match Stamp::load(&stamp_path) {
        Ok(stamp) if stamp.requirements_digest == manifest.digest() => None,
        Ok(stamp) => Some(format!(
            "{} changed since the environment was provisioned at {}; run 'pelikit venv' to refresh it",
            site.config().paths.requirements,
            stamp.provisioned_at
        )),
        Err(err) => {
            debug!("unreadable provisioning stamp: {:#}", err);
            Some("Provisioning record is unreadable; run 'pelikit venv' to refresh it".to_string())
        }
    }
}

fn create(site: &Site, venv_dir: &Path) -> Result<()> {
    let progress = ui::Progress::new(
        "Venv",
        format!("Creating virtualenv at {}", venv_dir.display()),
    );

    let mut command = Command::new(&site.config().python);
    command
        .args(["-m", "venv"])
        .arg(venv_dir)
        .current_dir(site.root());

    process::run(&mut command)?;
    progress.done("Created");
    Ok(())
}

fn install(site: &Site, manifest: &Manifest) -> Result<()> {
    let progress = ui::Progress::new(
        "Venv",
        format!("Installing {} requirements with pip", manifest.len()),
    );

    let mut command = Command::new(site.venv_tool("python"));
    command
        .args(["-m", "pip", "install", "-r"])
        .arg(&manifest.path)
        .current_dir(site.root());

    process::run(&mut command)?;
    progress.done("Installed");
    Ok(())
}

fn describe(manifest: &Manifest) -> String {
    const SHOWN: usize = 3;

    let names: Vec<_> = manifest
        .requirements()
        .iter()
        .map(|r| r.name.as_str())
        .collect();

    if names.is_empty() {
        return "Environment provisioned (no requirements listed)".to_string();
    }

    let mut summary = names[..names.len().min(SHOWN)].join(", ");
    if names.len() > SHOWN {
        summary.push_str(&format!(" (+{} more)", names.len() - SHOWN));
    }

    format!("Environment provisioned with {}", summary)
}
