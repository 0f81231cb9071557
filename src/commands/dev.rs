use anyhow::Result;

use crate::generator;
use crate::process;
use crate::site::Site;
use crate::ui;
use crate::venv;

pub fn execute(site: &Site, port: Option<u16>, bind: Option<String>) -> Result<()> {
    venv::preflight(site)?;

    let config = site.config();
    let port = port.unwrap_or(config.dev.port);
    let bind = bind.unwrap_or_else(|| config.dev.bind.clone());

    let mut command = generator::dev_command(site, port, &bind)?;

    ui::status(
        "Dev",
        format!("Serving at http://{}:{}/ (Ctrl-C stops)", bind, port),
    );

    // Blocks until the server exits; Ctrl-C reaches both processes through
    // the terminal's process group.
    process::run(&mut command)?;
    Ok(())
}
