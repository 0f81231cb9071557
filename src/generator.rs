use anyhow::{bail, Result};
use std::process::Command;

use crate::site::{Site, SitePath};

/// Build the development server command line.
///
/// Regeneration on change and HTTP serving are the generator's own features;
/// the contract here is handing it the right flags: the development settings
/// file, `--autoreload`, and `--listen` on the requested address.
pub fn dev_command(site: &Site, port: u16, bind: &str) -> Result<Command> {
    let mut command = base_command(site, SitePath::Settings)?;
    command
        .arg("--autoreload")
        .arg("--listen")
        .arg("--port")
        .arg(port.to_string())
        .arg("--bind")
        .arg(bind);

    Ok(command)
}

/// Build the one-shot production command line.
///
/// Uses the publish settings file. `--fatal errors` makes the generator exit
/// non-zero when any content item fails to render, so a broken post cannot
/// produce a quietly incomplete site.
pub fn build_command(site: &Site) -> Result<Command> {
    let mut command = base_command(site, SitePath::PublishSettings)?;
    command.arg("--fatal").arg("errors");

    Ok(command)
}

fn base_command(site: &Site, settings: SitePath) -> Result<Command> {
    let content = site.path(SitePath::Content);
    if !content.is_dir() {
        bail!("Content directory {:?} does not exist", content);
    }

    let settings_file = site.path(settings);
    if !settings_file.is_file() {
        bail!("Settings file {:?} does not exist", settings_file);
    }

    let mut command = Command::new(site.venv_tool(&site.config().generator.command));
    command
        .arg(&content)
        .arg("--settings")
        .arg(&settings_file)
        .arg("--output")
        .arg(site.path(SitePath::Output))
        .current_dir(site.root());

    Ok(command)
}
