//! UKI (Unified Kernel Image) build driver.
//!
//! Each build renders a `ukify` config document, writes it to a temporary
//! file, and invokes the external builder against it. The kernel and initrd
//! paths in the document point at the staged copies under the ESP vendor
//! directory, not at the boot partition originals.

use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

use crate::compose::BuildParams;
use crate::config::Config;
use crate::paths;
use crate::process::Cmd;

/// Render the builder config document for one image.
pub fn render_config(config: &Config, params: &BuildParams) -> String {
    let linux = config.esp_dir.join(paths::staged_path(&config.vendor_dir, &params.linux));
    let initrd = config
        .esp_dir
        .join(paths::staged_path(&config.vendor_dir, &params.initrd));

    format!(
        "[UKI]\n\
         Linux={}\n\
         Initrd={}\n\
         Uname={}\n\
         Cmdline={}\n\
         OSRelease={}\n\
         Splash={}\n",
        linux.display(),
        initrd.display(),
        params.uname,
        params.cmdline,
        params.os_release,
        params.splash.display(),
    )
}

/// Build one UKI at `output`.
///
/// The temporary config file is removed when this returns, success or not.
/// On failure no image is left behind at `output`.
pub async fn build(config: &Config, params: &BuildParams, output: &Path) -> Result<()> {
    let document = render_config(config, params);

    let mut tmp = NamedTempFile::new()
        .with_context(|| format!("Failed to create temp ukify config ({})", params.mode))?;
    tmp.write_all(document.as_bytes())
        .with_context(|| format!("Failed to write ukify config ({})", params.mode))?;

    println!("  Building UKI: {}", output.display());

    let result = Cmd::new(&config.ukify)
        .arg("build")
        .arg("--config")
        .arg_path(tmp.path())
        .arg("--output")
        .arg_path(output)
        .error_msg(format!(
            "ukify build failed for entry {:?} ({})",
            params.entry_name, params.mode
        ))
        .run_streaming()
        .await;

    if result.is_err() {
        let _ = std::fs::remove_file(output);
    }
    result
}
