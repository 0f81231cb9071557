use crate::site::Site;
use crate::venv::provision;
use anyhow::Result;

pub fn execute(site: &Site) -> Result<()> {
    provision(site)
}
