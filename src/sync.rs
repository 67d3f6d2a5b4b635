//! Full-regeneration pipeline for one run.
//!
//! Gate on the rEFInd config, wipe the staging tree, parse every loader
//! entry, build every (entry, mode) UKI concurrently, then render and commit
//! the menu document in one write. Any failure aborts before the commit, so
//! the menu on disk never references an image that failed to build.

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::fs;
use tokio::task::JoinSet;

use crate::compose;
use crate::config::Config;
use crate::entry::BootEntry;
use crate::gfx::GraphicsMode;
use crate::paths;
use crate::refind;
use crate::stage;
use crate::uki;

/// Parse every file in the entries directory, keyed by file name.
fn load_entries(config: &Config) -> Result<BTreeMap<String, BootEntry>> {
    let dir = fs::read_dir(&config.entries_dir).with_context(|| {
        format!(
            "Failed to read entries directory {}",
            config.entries_dir.display()
        )
    })?;

    let mut entries = BTreeMap::new();
    for dirent in dir {
        let dirent = dirent.with_context(|| {
            format!(
                "Failed to enumerate entries in {}",
                config.entries_dir.display()
            )
        })?;
        let path = dirent.path();
        if !path.is_file() {
            continue;
        }
        let entry = BootEntry::load(&path)?;
        entries.insert(entry.name().to_string(), entry);
    }
    Ok(entries)
}

/// Regenerate all boot artifacts and the rEFInd menu.
pub async fn run(config: &Config) -> Result<()> {
    // Host not using rEFInd: nothing to maintain, not an error.
    if !config.refind_config.exists() {
        println!(
            "{} not present; nothing to do.",
            config.refind_config.display()
        );
        return Ok(());
    }

    // Fail before wiping anything if the builder is missing.
    which::which(&config.ukify)
        .with_context(|| format!("UKI builder '{}' not found", config.ukify))?;

    let staging = config.staging_dir();
    stage::clean_staging(&staging)?;

    let entries = load_entries(config)?;

    // Stage kernel/initrd copies first: the builder reads the staged paths.
    for entry in entries.values() {
        println!("Processing entry: {}", entry.name());
        stage::stage_entry(config, entry)?;
    }

    // One build task per (entry, mode). Tasks touch only their own temp
    // config and output path, so the fan-out needs no shared state.
    let mut jobs = JoinSet::new();
    for entry in entries.values() {
        let linux = entry.require("linux")?;
        let version = entry.version();
        for mode in GraphicsMode::ALL {
            let params = compose::compose(entry, mode, config)?;
            let output = config
                .esp_dir
                .join(paths::uki_image(&config.vendor_dir, linux, version, mode));
            let config = config.clone();
            jobs.spawn(async move { uki::build(&config, &params, &output).await });
        }
    }

    // Join everything; keep the first failure but let siblings run to
    // completion. Their outputs are discarded with the rest of the run.
    let mut first_err = None;
    while let Some(joined) = jobs.join_next().await {
        let result = joined.context("UKI build task panicked")?;
        if let Err(err) = result {
            first_err.get_or_insert(err);
        }
    }
    if let Some(err) = first_err {
        return Err(err);
    }

    // All images exist; now (and only now) replace the menu in one write.
    let document = refind::render_document(config, &entries)?;
    fs::write(&config.refind_config, document).with_context(|| {
        format!(
            "Failed writing rEFInd config {}",
            config.refind_config.display()
        )
    })?;

    println!(
        "Updated rEFInd configuration at {}",
        config.refind_config.display()
    );
    Ok(())
}
