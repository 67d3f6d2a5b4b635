//! Configuration for refind-updater.
//!
//! All paths and constants live here, built once in `main` and passed down by
//! reference; nothing else reads the environment or holds process-wide state.
//! Defaults match a stock Fedora Atomic layout; environment variables
//! (optionally via a `.env` file) override them for tests and non-standard
//! installs.

use std::path::PathBuf;

fn env_str(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_path(key: &str, default: &str) -> PathBuf {
    PathBuf::from(env_str(key, default))
}

/// Runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory of BLS loader entry files, one per deployment.
    pub entries_dir: PathBuf,
    /// Boot partition mount point; source of kernel/initrd copies.
    pub boot_dir: PathBuf,
    /// EFI system partition mount point.
    pub esp_dir: PathBuf,
    /// Vendor subdirectory under the ESP that this tool owns outright.
    pub vendor_dir: String,
    /// rEFInd include config this tool maintains. Doubles as the gate:
    /// if absent, the host is not using rEFInd and the tool does nothing.
    pub refind_config: PathBuf,
    /// OS version embedded in each UKI.
    /// TODO: read VERSION_ID from /etc/os-release instead of pinning.
    pub os_release: String,
    /// Boot splash image embedded in each UKI.
    pub splash: PathBuf,
    /// Menu icon path, relative to the ESP root.
    pub icon: String,
    /// The external UKI builder. Either a bare program name resolved via
    /// PATH or an absolute path.
    pub ukify: String,
}

impl Config {
    /// Load configuration from the environment, falling back to defaults.
    pub fn load() -> Self {
        Self {
            entries_dir: env_path("REFIND_ENTRIES_DIR", "/boot/loader/entries"),
            boot_dir: env_path("REFIND_BOOT_DIR", "/boot"),
            esp_dir: env_path("REFIND_ESP_DIR", "/boot/efi"),
            vendor_dir: env_str("REFIND_VENDOR_DIR", "fedora-atomic"),
            refind_config: env_path(
                "REFIND_CONFIG",
                "/boot/efi/EFI/refind/fedora-atomic.conf",
            ),
            os_release: env_str("REFIND_OS_RELEASE", "43"),
            splash: env_path(
                "REFIND_SPLASH",
                "/usr/share/backgrounds/artistic-landscape.bmp",
            ),
            icon: env_str(
                "REFIND_ICON",
                "/EFI/refind/themes/rEFInd-glassy/icons/os_core.png",
            ),
            ukify: env_str("UKIFY", "ukify"),
        }
    }

    /// Staging root under the ESP: wiped and repopulated on every run.
    pub fn staging_dir(&self) -> PathBuf {
        self.esp_dir.join(&self.vendor_dir)
    }
}
