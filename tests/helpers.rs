//! Shared test utilities for refind-updater tests.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use refind_updater::config::Config;

/// Sandboxed boot/ESP layout plus a stub `ukify` the pipeline can invoke.
pub struct TestEnv {
    /// Temporary directory (kept alive for lifetime of TestEnv)
    pub _temp_dir: TempDir,
    pub config: Config,
}

impl TestEnv {
    /// Create a fresh sandbox. The rEFInd gate file is NOT created; call
    /// [`TestEnv::touch_gate`] for runs that should proceed.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let base = temp_dir.path();

        let entries_dir = base.join("boot/loader/entries");
        let esp_dir = base.join("esp");
        let refind_dir = esp_dir.join("EFI/refind");
        fs::create_dir_all(&entries_dir).expect("Failed to create entries dir");
        fs::create_dir_all(&refind_dir).expect("Failed to create refind dir");

        let ukify = write_stub_ukify(base);

        let config = Config {
            entries_dir,
            boot_dir: base.join("boot"),
            esp_dir: esp_dir.clone(),
            vendor_dir: "fedora-atomic".to_string(),
            refind_config: refind_dir.join("fedora-atomic.conf"),
            os_release: "43".to_string(),
            splash: base.join("splash.bmp"),
            icon: "/EFI/refind/themes/rEFInd-glassy/icons/os_core.png".to_string(),
            ukify: ukify.to_string_lossy().into_owned(),
        };

        Self {
            _temp_dir: temp_dir,
            config,
        }
    }

    /// Create the rEFInd config (the run gate) with the given contents.
    pub fn touch_gate(&self, contents: &str) {
        fs::write(&self.config.refind_config, contents).expect("Failed to write gate file");
    }

    /// Write one loader entry file.
    pub fn write_entry(&self, name: &str, body: &str) {
        fs::write(self.config.entries_dir.join(name), body).expect("Failed to write entry");
    }

    /// Place a file on the fake boot partition (path rooted at /boot).
    pub fn write_boot_file(&self, boot_path: &str, data: &[u8]) {
        let dst = self.config.boot_dir.join(boot_path.trim_start_matches('/'));
        fs::create_dir_all(dst.parent().unwrap()).expect("Failed to create boot subdir");
        fs::write(dst, data).expect("Failed to write boot file");
    }

    /// Swap the stub builder for one that always fails.
    pub fn use_failing_ukify(&mut self) {
        let script = self._temp_dir.path().join("bin/ukify-fail");
        write_script(
            &script,
            "#!/bin/sh\necho 'stub ukify: simulated failure' >&2\nexit 1\n",
        );
        self.config.ukify = script.to_string_lossy().into_owned();
    }
}

/// Standard loader entry body used across tests.
pub fn fedora_entry() -> &'static str {
    "title Fedora 43\n\
     version 1\n\
     linux /5.14/vmlinuz\n\
     initrd /5.14/initramfs.img\n\
     options quiet rw\n"
}

/// Stub `ukify` that copies the config document to the output path, so
/// tests can both observe what was built and check the image exists.
fn write_stub_ukify(base: &Path) -> PathBuf {
    let script = base.join("bin/ukify");
    write_script(
        &script,
        "#!/bin/sh\n\
         cfg=\"\"; out=\"\"\n\
         while [ \"$#\" -gt 0 ]; do\n\
           case \"$1\" in\n\
             --config) cfg=\"$2\"; shift 2 ;;\n\
             --output) out=\"$2\"; shift 2 ;;\n\
             *) shift ;;\n\
           esac\n\
         done\n\
         cp \"$cfg\" \"$out\"\n",
    );
    script
}

fn write_script(path: &Path, contents: &str) {
    fs::create_dir_all(path.parent().unwrap()).expect("Failed to create script dir");
    fs::write(path, contents).expect("Failed to write script");
    fs::set_permissions(path, fs::Permissions::from_mode(0o755))
        .expect("Failed to chmod script");
}
