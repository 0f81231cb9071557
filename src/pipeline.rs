use anyhow::{bail, Result};
use std::process::Command;

use crate::site::{Site, SitePath};

/// Build the content pipeline command line: the venv interpreter running the
/// configured script with no arguments.
///
/// The script is opaque. Whatever it does (prompting, templating, writing
/// into the content tree) is its own business; only its existence is checked
/// before spawning.
pub fn post_command(site: &Site) -> Result<Command> {
    let script = site.path(SitePath::PipelineScript);
    if !script.is_file() {
        bail!("Pipeline script {:?} does not exist", script);
    }

    let mut command = Command::new(site.venv_tool("python"));
    command.arg(&script).current_dir(site.root());

    Ok(command)
}
