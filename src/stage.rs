//! EFI system partition staging.
//!
//! The vendor directory under the ESP is owned wholesale by this tool: every
//! run wipes and recreates it, then copies each deployment's kernel and
//! initrd over from the boot partition, mirroring the path hierarchy.

use anyhow::{Context, Result};
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;

use crate::config::Config;
use crate::entry::BootEntry;
use crate::paths;

/// Remove and recreate the staging root. Stale artifacts from removed
/// deployments must not linger.
pub fn clean_staging(staging: &Path) -> Result<()> {
    println!("Clearing old EFI artifacts in {}", staging.display());

    if staging.exists() {
        fs::remove_dir_all(staging)
            .with_context(|| format!("Failed to clean {}", staging.display()))?;
    }
    fs::create_dir_all(staging)
        .with_context(|| format!("Failed to recreate {}", staging.display()))?;

    println!("Cleared and recreated {}", staging.display());
    Ok(())
}

/// Copy one boot-partition file into the staging tree, creating parent
/// directories as needed. Staged copies are root-only (0600).
fn copy_staged(config: &Config, boot_path: &str) -> Result<()> {
    let src = config.boot_dir.join(boot_path.trim_start_matches('/'));
    let dst = config
        .esp_dir
        .join(paths::staged_path(&config.vendor_dir, boot_path));

    let data =
        fs::read(&src).with_context(|| format!("Failed reading {}", src.display()))?;

    if let Some(parent) = dst.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed creating directory for {}", dst.display()))?;
    }
    fs::write(&dst, data).with_context(|| format!("Failed writing {}", dst.display()))?;
    fs::set_permissions(&dst, fs::Permissions::from_mode(0o600))
        .with_context(|| format!("Failed setting permissions on {}", dst.display()))?;

    println!("  Copied {} -> {}", src.display(), dst.display());
    Ok(())
}

/// Stage one deployment's kernel and initrd, and create the directory its
/// UKIs will be built into.
pub fn stage_entry(config: &Config, entry: &BootEntry) -> Result<()> {
    let linux = entry.require("linux")?;
    let initrd = entry.require("initrd")?;

    copy_staged(config, linux)?;
    copy_staged(config, initrd)?;

    let uki_dir = config
        .esp_dir
        .join(paths::uki_dir(&config.vendor_dir, linux, entry.version()));
    fs::create_dir_all(&uki_dir)
        .with_context(|| format!("Failed creating {}", uki_dir.display()))?;

    Ok(())
}
