use anyhow::{bail, Context, Result};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use crate::site::{Site, SitePath};
use crate::ui;

pub fn execute(site: &Site) -> Result<()> {
    let output = site.path(SitePath::Output);

    if site.root().starts_with(&output) {
        bail!("Refusing to remove {:?}: it contains the site root", output);
    }

    if !output.exists() {
        ui::info(format!(
            "Nothing to clean: {} does not exist",
            output.display()
        ));
        return Ok(());
    }

    let (files, bytes) = measure(&output);

    fs::remove_dir_all(&output)
        .with_context(|| format!("Failed to remove output directory {:?}", output))?;

    ui::success(
        "Cleaned",
        format!(
            "Removed {} ({} files, {})",
            output.display(),
            files,
            format_size(bytes)
        ),
    );
    Ok(())
}

/// Count files and bytes under the output tree before removing it.
fn measure(dir: &Path) -> (usize, u64) {
    let mut files = 0usize;
    let mut bytes = 0u64;

    for entry in WalkDir::new(dir).into_iter().filter_map(|e| e.ok()) {
        if entry.file_type().is_file() {
            files += 1;
            bytes += entry.metadata().map(|m| m.len()).unwrap_or(0);
        }
    }

    (files, bytes)
}

fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KiB", "MiB", "GiB"];

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    if unit == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.1} {}", value, UNITS[unit])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_measure_counts_nested_files() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("feeds")).unwrap();
        fs::write(temp.path().join("index.html"), "12345").unwrap();
        fs::write(temp.path().join("feeds/all.atom.xml"), "123").unwrap();

        let (files, bytes) = measure(temp.path());
        assert_eq!(files, 2);
        assert_eq!(bytes, 8);
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.0 KiB");
        assert_eq!(format_size(5 * 1024 * 1024), "5.0 MiB");
    }

    #[test]
    fn test_refuses_output_containing_site_root() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("pelikit.toml"), "[paths]\noutput = \"/\"\n").unwrap();

        let site = Site::discover(temp.path()).unwrap();
        let err = execute(&site).unwrap_err();
        assert!(err.to_string().contains("Refusing to remove"));
    }
}
