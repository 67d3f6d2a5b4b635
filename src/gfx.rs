//! Graphics mode vocabulary.
//!
//! Hybrid-graphics laptops managed by supergfxd boot in one of a fixed set of
//! GPU modes. Each deployment gets one UKI per mode, differing only in the
//! `supergfxd.mode=` kernel argument and the image filename suffix.

use std::fmt;

/// A supergfxd graphics mode.
///
/// The variant name doubles as the `supergfxd.mode=` value and the
/// `UKI-<Mode>.efi` filename suffix, so enumeration order here fixes the
/// order of menu sub-entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphicsMode {
    Hybrid,
    Vfio,
    Integrated,
}

impl GraphicsMode {
    /// All modes, in the order they appear in generated output.
    pub const ALL: [GraphicsMode; 3] = [
        GraphicsMode::Hybrid,
        GraphicsMode::Vfio,
        GraphicsMode::Integrated,
    ];

    /// The mode the top-level menu entry boots.
    pub const DEFAULT: GraphicsMode = GraphicsMode::Hybrid;

    /// The `supergfxd.mode=` value, also used in the image filename.
    pub fn name(self) -> &'static str {
        match self {
            GraphicsMode::Hybrid => "Hybrid",
            GraphicsMode::Vfio => "Vfio",
            GraphicsMode::Integrated => "Integrated",
        }
    }

    /// Human-readable label for the boot menu sub-entry.
    pub fn label(self) -> &'static str {
        match self {
            GraphicsMode::Hybrid => "hybrid graphics",
            GraphicsMode::Vfio => "VFIO",
            GraphicsMode::Integrated => "only integrated GPU",
        }
    }

    /// Modes other than [`GraphicsMode::DEFAULT`], in fixed order.
    pub fn alternates() -> impl Iterator<Item = GraphicsMode> {
        Self::ALL.into_iter().filter(|m| *m != Self::DEFAULT)
    }
}

impl fmt::Display for GraphicsMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
