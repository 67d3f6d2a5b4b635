//! rEFInd menu entry rendering.
//!
//! One `menuentry` block per deployment: the top-level loader boots the
//! default graphics mode, and each remaining mode gets a `submenuentry`.
//! Loader paths come from [`crate::paths`], the same derivation the build
//! driver uses, so the menu only ever references images that were built.

use anyhow::Result;
use std::collections::BTreeMap;

use crate::compose;
use crate::config::Config;
use crate::entry::BootEntry;
use crate::gfx::GraphicsMode;
use crate::paths;

const INDENT: &str = "    ";

/// Format one `key value` line at the given indent depth.
///
/// Any value containing a space is double-quoted; rEFInd would otherwise
/// read only its first word. Applied uniformly so operator-supplied titles
/// and options can never break the generated syntax.
fn field(indent: usize, key: &str, value: &str) -> String {
    let prefix = INDENT.repeat(indent);
    if value.contains(' ') {
        format!("{prefix}{key} \"{value}\"\n")
    } else {
        format!("{prefix}{key} {value}\n")
    }
}

/// Render the complete menu block for one deployment.
pub fn render_entry(config: &Config, entry: &BootEntry) -> Result<String> {
    let title = entry.require("title")?;
    let linux = entry.require("linux")?;
    let options = entry.require("options")?;
    let version = entry.version();

    let loader = |mode: GraphicsMode| paths::loader_path(&config.vendor_dir, linux, version, mode);

    let mut out = String::new();
    out.push_str(&format!("menuentry \"{title}\" {{\n"));
    out.push_str(&field(1, "title", title));
    out.push_str(&field(1, "icon", &config.icon));
    out.push_str(&field(1, "loader", &loader(GraphicsMode::DEFAULT)));
    out.push_str(&field(
        1,
        "options",
        &compose::mode_cmdline(options, GraphicsMode::DEFAULT),
    ));
    out.push_str(&field(1, "graphics", "on"));

    for mode in GraphicsMode::alternates() {
        out.push('\n');
        out.push_str(&format!(
            "{INDENT}submenuentry \"Boot with {}\" {{\n",
            mode.label()
        ));
        out.push_str(&field(2, "loader", &loader(mode)));
        out.push_str(&field(2, "options", &compose::mode_cmdline(options, mode)));
        out.push_str(&field(2, "graphics", "on"));
        out.push_str(INDENT);
        out.push_str("}\n");
    }

    out.push_str("}\n");
    Ok(out)
}

/// Render the full include document: one block per entry, sorted by entry
/// name so regeneration is byte-reproducible, blank line between blocks.
pub fn render_document(config: &Config, entries: &BTreeMap<String, BootEntry>) -> Result<String> {
    let mut doc = String::new();
    for entry in entries.values() {
        doc.push_str(&render_entry(config, entry)?);
        doc.push('\n');
    }
    Ok(doc)
}
