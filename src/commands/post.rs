use anyhow::Result;

use crate::pipeline;
use crate::process;
use crate::site::Site;
use crate::ui;
use crate::venv;

pub fn execute(site: &Site) -> Result<()> {
    venv::preflight(site)?;

    let mut command = pipeline::post_command(site)?;
    process::run(&mut command)?;

    ui::success("Post", "Content pipeline finished");
    Ok(())
}
