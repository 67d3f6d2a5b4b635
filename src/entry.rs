//! Boot loader entry parsing.
//!
//! Deployments are described by BLS-style files under `/boot/loader/entries/`,
//! one file per deployment, each line `key value`. See
//! <https://uapi-group.org/specifications/specs/boot_loader_specification/>.

use anyhow::{bail, Context, Result};
use std::collections::BTreeMap;
use std::path::Path;

/// One parsed loader entry (one staged deployment).
///
/// Keys are case-sensitive and unique; a duplicate key on a later line
/// silently replaces the earlier value, matching what the boot loader itself
/// does. An empty value counts as absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootEntry {
    name: String,
    fields: BTreeMap<String, String>,
}

impl BootEntry {
    /// Parse the raw text of an entry file.
    ///
    /// `name` identifies the source file in error messages. Lines are
    /// trimmed, blank lines skipped, and each remaining line split on the
    /// first space into key and value; the value is the literal remainder of
    /// the line. A non-blank line without a space is fatal: a half-parsed
    /// entry must never turn into a boot menu item.
    pub fn parse(name: &str, raw: &str) -> Result<Self> {
        let mut fields = BTreeMap::new();

        for line in raw.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let Some((key, value)) = line.split_once(' ') else {
                bail!("Malformed line in entry {name:?}: {line:?}");
            };
            fields.insert(key.to_string(), value.to_string());
        }

        Ok(Self {
            name: name.to_string(),
            fields,
        })
    }

    /// Read and parse an entry file from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read entry {}", path.display()))?;
        Self::parse(&name, &raw)
    }

    /// Name of the source file, used as the deployment identifier.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Look up an optional key. Empty values read as absent.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    /// Look up a key that the pipeline cannot proceed without.
    pub fn require(&self, key: &str) -> Result<&str> {
        match self.get(key) {
            Some(value) => Ok(value),
            None => bail!("Missing key {:?} in entry {:?}", key, self.name),
        }
    }

    /// The `version` field, or empty if the entry has none.
    pub fn version(&self) -> &str {
        self.get("version").unwrap_or("")
    }
}
