//! Path derivation shared by the UKI build driver and the menu renderer.
//!
//! The driver writes images where these functions say; the renderer emits
//! loader lines pointing at the same places. Keeping the derivation in one
//! set of pure functions is what guarantees the menu never references an
//! image that was built somewhere else.

use std::path::{Path, PathBuf};

use crate::gfx::GraphicsMode;

/// Directory holding one deployment's UKIs, relative to the ESP root:
/// `<vendor>/<parent of linux>/<version>`.
///
/// The `linux` value is an absolute path rooted at the boot partition
/// (`/5.14/vmlinuz` puts images under `<vendor>/5.14/<version>`). An empty
/// version contributes no path component.
pub fn uki_dir(vendor: &str, linux: &str, version: &str) -> PathBuf {
    let mut dir = PathBuf::from(vendor);

    let parent = Path::new(linux)
        .parent()
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_default();
    let parent = parent.trim_start_matches('/');
    if !parent.is_empty() {
        dir.push(parent);
    }
    if !version.is_empty() {
        dir.push(version);
    }
    dir
}

/// Image filename for one graphics mode.
pub fn uki_image_name(mode: GraphicsMode) -> String {
    format!("UKI-{}.efi", mode.name())
}

/// Image path for one (deployment, mode), relative to the ESP root.
pub fn uki_image(vendor: &str, linux: &str, version: &str, mode: GraphicsMode) -> PathBuf {
    uki_dir(vendor, linux, version).join(uki_image_name(mode))
}

/// The loader reference rEFInd expects: `/` + the ESP-relative image path.
pub fn loader_path(vendor: &str, linux: &str, version: &str, mode: GraphicsMode) -> String {
    format!("/{}", uki_image(vendor, linux, version, mode).display())
}

/// Where a boot-partition file (`linux`/`initrd` value) lands when staged
/// under the vendor directory, relative to the ESP root. The hierarchy below
/// the boot partition root is mirrored verbatim.
pub fn staged_path(vendor: &str, boot_path: &str) -> PathBuf {
    Path::new(vendor).join(boot_path.trim_start_matches('/'))
}
