//! Per-mode build parameter composition.
//!
//! Turns a parsed loader entry plus a graphics mode into everything the UKI
//! build driver needs: source paths, kernel release, command line, branding.

use anyhow::Result;
use std::path::PathBuf;

use crate::config::Config;
use crate::entry::BootEntry;
use crate::gfx::GraphicsMode;

/// Inputs for building one UKI.
#[derive(Debug, Clone)]
pub struct BuildParams {
    /// Deployment identifier (entry file name), carried for error context.
    pub entry_name: String,
    /// Kernel path as written in the entry, rooted at the boot partition.
    pub linux: String,
    /// Initrd path as written in the entry.
    pub initrd: String,
    /// Kernel release identifier: the final segment of `linux`.
    pub uname: String,
    /// Full kernel command line, including the mode argument.
    pub cmdline: String,
    pub mode: GraphicsMode,
    pub os_release: String,
    pub splash: PathBuf,
}

/// Append the mode selector to an entry's base options.
///
/// Also used by the menu renderer, so the `options` lines in sub-entries
/// match the command line baked into each image.
pub fn mode_cmdline(options: &str, mode: GraphicsMode) -> String {
    format!("{} supergfxd.mode={}", options, mode)
}

/// Derive build parameters for one (entry, mode) pair.
///
/// Fails if the entry lacks `linux`, `initrd` or `options`, naming the key
/// and the entry.
pub fn compose(entry: &BootEntry, mode: GraphicsMode, config: &Config) -> Result<BuildParams> {
    let linux = entry.require("linux")?;
    let initrd = entry.require("initrd")?;
    let options = entry.require("options")?;

    let uname = linux.rsplit('/').next().unwrap_or(linux).to_string();

    Ok(BuildParams {
        entry_name: entry.name().to_string(),
        linux: linux.to_string(),
        initrd: initrd.to_string(),
        uname,
        cmdline: mode_cmdline(options, mode),
        mode,
        os_release: config.os_release.clone(),
        splash: config.splash.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config {
            entries_dir: "/boot/loader/entries".into(),
            boot_dir: "/boot".into(),
            esp_dir: "/boot/efi".into(),
            vendor_dir: "fedora-atomic".into(),
            refind_config: "/boot/efi/EFI/refind/fedora-atomic.conf".into(),
            os_release: "43".into(),
            splash: "/usr/share/backgrounds/artistic-landscape.bmp".into(),
            icon: "/EFI/refind/themes/rEFInd-glassy/icons/os_core.png".into(),
            ukify: "ukify".into(),
        }
    }

    fn test_entry() -> BootEntry {
        BootEntry::parse(
            "ostree-1.conf",
            "title Fedora 43\nlinux /5.14/vmlinuz\ninitrd /5.14/initramfs.img\noptions quiet rw",
        )
        .unwrap()
    }

    #[test]
    fn test_compose_derives_uname_and_cmdline() {
        let params = compose(&test_entry(), GraphicsMode::Vfio, &test_config()).unwrap();
        assert_eq!(params.uname, "vmlinuz");
        assert_eq!(params.cmdline, "quiet rw supergfxd.mode=Vfio");
        assert_eq!(params.os_release, "43");
    }

    #[test]
    fn test_compose_missing_options_fails_with_key_and_entry() {
        let entry = BootEntry::parse("ostree-1.conf", "title F\nlinux /v\ninitrd /i").unwrap();
        let msg = compose(&entry, GraphicsMode::Hybrid, &test_config())
            .unwrap_err()
            .to_string();
        assert!(msg.contains("options"), "{msg}");
        assert!(msg.contains("ostree-1.conf"), "{msg}");
    }

    #[test]
    fn test_mode_cmdline_appends_single_spaced_argument() {
        assert_eq!(
            mode_cmdline("quiet", GraphicsMode::Integrated),
            "quiet supergfxd.mode=Integrated"
        );
    }
}
