use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A single requirement parsed from the manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirement {
    /// Normalized distribution name (lowercase, `-`/`_`/`.` runs folded to `-`).
    pub name: String,
    /// The line exactly as written, for display.
    pub raw: String,
}

/// Parsed view of a pip requirements file.
///
/// Parsing stays deliberately shallow: pip is the authority on what the file
/// means, and the installer receives the file itself via `-r`. This view only
/// extracts names for reporting, spots duplicate entries, and hashes the file
/// for staleness tracking.
#[derive(Debug, Clone)]
pub struct Manifest {
    pub path: PathBuf,
    requirements: Vec<Requirement>,
    digest: String,
}

impl Manifest {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read requirements file {:?}", path))?;

        let mut digest = Sha256::new();
        digest.update(contents.as_bytes());

        Ok(Self {
            path: path.to_path_buf(),
            requirements: parse(&contents),
            digest: hex::encode(digest.finalize()),
        })
    }

    /// Requirements in file order, option lines and comments excluded.
    pub fn requirements(&self) -> &[Requirement] {
        &self.requirements
    }

    pub fn len(&self) -> usize {
        self.requirements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requirements.is_empty()
    }

    /// Hex SHA-256 of the raw file contents.
    pub fn digest(&self) -> &str {
        &self.digest
    }

    /// Normalized names that appear more than once.
    pub fn duplicates(&self) -> Vec<&str> {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for requirement in &self.requirements {
            *counts.entry(requirement.name.as_str()).or_default() += 1;
        }

        counts
            .into_iter()
            .filter(|(_, count)| *count > 1)
            .map(|(name, _)| name)
            .collect()
    }

    /// Raw lines whose normalized name matches `name`, in file order.
    pub fn lines_named(&self, name: &str) -> Vec<&str> {
        self.requirements
            .iter()
            .filter(|requirement| requirement.name == name)
            .map(|requirement| requirement.raw.as_str())
            .collect()
    }
}

fn parse(contents: &str) -> Vec<Requirement> {
    let mut requirements = Vec::new();

    for line in contents.lines() {
        let line = strip_comment(line).trim();
        if line.is_empty() {
            continue;
        }

        // Option lines (-r, -e, --index-url, ...) belong to pip, not to us.
        if line.starts_with('-') {
            debug!("skipping pip option line: {}", line);
            continue;
        }

        match requirement_name(line) {
            Some(name) => requirements.push(Requirement {
                name,
                raw: line.to_string(),
            }),
            None => debug!("skipping unnamed requirement line: {}", line),
        }
    }

    requirements
}

/// Drop a `#` comment. A comment starts at the beginning of the line or after
/// whitespace, so URL fragments like `#egg=` survive.
fn strip_comment(line: &str) -> &str {
    let mut previous_was_space = true;

    for (index, ch) in line.char_indices() {
        if ch == '#' && previous_was_space {
            return &line[..index];
        }
        previous_was_space = ch.is_whitespace();
    }

    line
}

/// Extract the distribution name from a PEP 508 style requirement line.
///
/// The name is the leading run of name characters, starting with a letter
/// or digit; everything after it (extras, version specifiers, environment
/// markers, `@ url`) is pip's concern. Bare URLs and local path entries
/// have no name.
fn requirement_name(line: &str) -> Option<String> {
    let end = line
        .find(|ch: char| !is_name_char(ch))
        .unwrap_or(line.len());
    let candidate = &line[..end];

    // PEP 508 names start with a letter or digit; path and URL entries do not.
    if !candidate.starts_with(|ch: char| ch.is_ascii_alphanumeric())
        || line[end..].starts_with("://")
    {
        return None;
    }

    Some(normalize(candidate))
}

fn is_name_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_' | '.')
}

/// PEP 503 name normalization: lowercase with runs of `-`, `_`, `.` as `-`.
fn normalize(name: &str) -> String {
    let mut normalized = String::with_capacity(name.len());
    let mut previous_dash = false;

    for ch in name.chars() {
        if matches!(ch, '-' | '_' | '.') {
            if !previous_dash {
                normalized.push('-');
            }
            previous_dash = true;
        } else {
            normalized.push(ch.to_ascii_lowercase());
            previous_dash = false;
        }
    }

    normalized
}
