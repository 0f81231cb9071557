use anyhow::Result;

use crate::generator;
use crate::process;
use crate::site::{Site, SitePath};
use crate::ui;
use crate::venv;

pub fn execute(site: &Site) -> Result<()> {
    venv::preflight(site)?;

    let mut command = generator::build_command(site)?;
    let output = site.path(SitePath::Output);

    let progress = ui::Progress::new(
        "Build",
        format!("Generating site into {}", output.display()),
    );

    process::run(&mut command)?;
    progress.done("Built");
    Ok(())
}
