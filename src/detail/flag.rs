//! Detail flag primitives.
//!
//! A detail mode is assembled from three categories of flags:
//!
//! - [`GlyphFlag`]: width of the glyph id stored per tile (none, 8 or 16 bits)
//! - [`ColorFlag`]: how tile colors are represented (paletted or direct)
//! - [`LayoutFlag`]: how tiles are addressed (full grid, sparse grid, free pixels)
//!
//! Every variant owns exactly one bit of [`DetailFlags`], and the three
//! category masks are disjoint.

use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;

use crate::error::Error;

bitflags! {
    /// Raw detail flag bits.
    ///
    /// A valid detail mode sets exactly one bit from each of the glyph, color
    /// and layout masks.
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
    pub struct DetailFlags: u32 {
        const G0      = 1 << 0;
        const G8      = 1 << 1;
        const G16     = 1 << 2;
        const C0      = 1 << 3;
        const C4      = 1 << 4;
        const C8      = 1 << 5;
        const C8NBG   = 1 << 6;
        const C8NFG   = 1 << 7;
        const C24     = 1 << 8;
        const C24NBG  = 1 << 9;
        const C24NFG  = 1 << 10;
        const C32     = 1 << 11;
        const C32NBG  = 1 << 12;
        const C32NFG  = 1 << 13;
        const FULL    = 1 << 14;
        const SPARSE  = 1 << 15;
        const FREE    = 1 << 16;
    }
}

impl DetailFlags {
    /// All glyph width bits.
    pub const GLYPH_MASK: Self =
        Self::from_bits_retain(Self::G0.bits() | Self::G8.bits() | Self::G16.bits());
    /// All color representation bits.
    pub const COLOR_MASK: Self = Self::from_bits_retain(0x3FF8);
    /// All layout bits.
    pub const LAYOUT_MASK: Self =
        Self::from_bits_retain(Self::FULL.bits() | Self::SPARSE.bits() | Self::FREE.bits());

    /// Glyph bits of these flags.
    #[must_use]
    pub const fn glyph_bits(self) -> Self {
        Self::from_bits_retain(self.bits() & Self::GLYPH_MASK.bits())
    }

    /// Color bits of these flags.
    #[must_use]
    pub const fn color_bits(self) -> Self {
        Self::from_bits_retain(self.bits() & Self::COLOR_MASK.bits())
    }

    /// Layout bits of these flags.
    #[must_use]
    pub const fn layout_bits(self) -> Self {
        Self::from_bits_retain(self.bits() & Self::LAYOUT_MASK.bits())
    }

    /// Canonical name of a single flag, `None` for anything else.
    #[must_use]
    pub fn flag_name(self) -> Option<&'static str> {
        if let Some(glyph) = GlyphFlag::from_flags(self) {
            return Some(glyph.name());
        }
        if let Some(color) = ColorFlag::from_flags(self) {
            return Some(color.name());
        }
        LayoutFlag::from_flags(self).map(LayoutFlag::name)
    }

    /// Parse the canonical name of a single flag.
    #[must_use]
    pub fn from_flag_name(name: &str) -> Option<Self> {
        GlyphFlag::ALL
            .iter()
            .map(|g| (g.name(), g.flag()))
            .chain(ColorFlag::ALL.iter().map(|c| (c.name(), c.flag())))
            .chain(LayoutFlag::ALL.iter().map(|l| (l.name(), l.flag())))
            .find(|(candidate, _)| *candidate == name)
            .map(|(_, flag)| flag)
    }
}

/// Whether `bits` is exactly one known detail flag.
#[must_use]
pub fn detail_flag_is_valid(bits: u32) -> bool {
    bits.count_ones() == 1 && DetailFlags::from_bits(bits).is_some()
}

/// Width of the glyph id stored in each tile record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GlyphFlag {
    /// No glyph; tiles are solid color cells.
    G0,
    /// 8-bit glyph id.
    G8,
    /// 16-bit little-endian glyph id.
    G16,
}

impl GlyphFlag {
    pub const ALL: [Self; 3] = [Self::G0, Self::G8, Self::G16];

    /// The single bit for this flag.
    #[must_use]
    pub const fn flag(self) -> DetailFlags {
        match self {
            Self::G0 => DetailFlags::G0,
            Self::G8 => DetailFlags::G8,
            Self::G16 => DetailFlags::G16,
        }
    }

    /// Convert a single glyph bit back to the flag.
    #[must_use]
    pub fn from_flags(flags: DetailFlags) -> Option<Self> {
        Self::ALL.into_iter().find(|g| g.flag() == flags)
    }

    /// Bytes the glyph id occupies in a record.
    #[must_use]
    pub const fn byte_size(self) -> usize {
        match self {
            Self::G0 => 0,
            Self::G8 => 1,
            Self::G16 => 2,
        }
    }

    /// Largest encodable glyph id.
    #[must_use]
    pub const fn max_glyph(self) -> u16 {
        match self {
            Self::G0 => 0,
            Self::G8 => 0xFF,
            Self::G16 => 0xFFFF,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::G0 => "G0",
            Self::G8 => "G8",
            Self::G16 => "G16",
        }
    }

    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

/// Color representation stored in each tile record.
///
/// `C4` and `C8*` index into a palette; `C24*` and `C32*` store direct RGB or
/// RGBA channels. The `NBG` variants carry only a foreground color and the
/// `NFG` variants only a background color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ColorFlag {
    C0,
    C4,
    C8,
    C8Nbg,
    C8Nfg,
    C24,
    C24Nbg,
    C24Nfg,
    C32,
    C32Nbg,
    C32Nfg,
}

impl ColorFlag {
    pub const ALL: [Self; 11] = [
        Self::C0,
        Self::C4,
        Self::C8,
        Self::C8Nbg,
        Self::C8Nfg,
        Self::C24,
        Self::C24Nbg,
        Self::C24Nfg,
        Self::C32,
        Self::C32Nbg,
        Self::C32Nfg,
    ];

    /// The single bit for this flag.
    #[must_use]
    pub const fn flag(self) -> DetailFlags {
        match self {
            Self::C0 => DetailFlags::C0,
            Self::C4 => DetailFlags::C4,
            Self::C8 => DetailFlags::C8,
            Self::C8Nbg => DetailFlags::C8NBG,
            Self::C8Nfg => DetailFlags::C8NFG,
            Self::C24 => DetailFlags::C24,
            Self::C24Nbg => DetailFlags::C24NBG,
            Self::C24Nfg => DetailFlags::C24NFG,
            Self::C32 => DetailFlags::C32,
            Self::C32Nbg => DetailFlags::C32NBG,
            Self::C32Nfg => DetailFlags::C32NFG,
        }
    }

    /// Convert a single color bit back to the flag.
    #[must_use]
    pub fn from_flags(flags: DetailFlags) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.flag() == flags)
    }

    /// Bytes the color payload occupies in a record.
    ///
    /// `C4` packs both nibbles into one byte.
    #[must_use]
    pub const fn byte_size(self) -> usize {
        match self {
            Self::C0 => 0,
            Self::C4 | Self::C8Nbg | Self::C8Nfg => 1,
            Self::C8 => 2,
            Self::C24Nbg | Self::C24Nfg => 3,
            Self::C24 => 6,
            Self::C32Nbg | Self::C32Nfg => 4,
            Self::C32 => 8,
        }
    }

    /// Whether the payload indexes into a palette.
    #[must_use]
    pub const fn is_paletted(self) -> bool {
        matches!(self, Self::C4 | Self::C8 | Self::C8Nbg | Self::C8Nfg)
    }

    #[must_use]
    pub const fn has_foreground(self) -> bool {
        !matches!(self, Self::C0 | Self::C8Nfg | Self::C24Nfg | Self::C32Nfg)
    }

    #[must_use]
    pub const fn has_background(self) -> bool {
        !matches!(self, Self::C0 | Self::C8Nbg | Self::C24Nbg | Self::C32Nbg)
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::C0 => "C0",
            Self::C4 => "C4",
            Self::C8 => "C8",
            Self::C8Nbg => "C8NBG",
            Self::C8Nfg => "C8NFG",
            Self::C24 => "C24",
            Self::C24Nbg => "C24NBG",
            Self::C24Nfg => "C24NFG",
            Self::C32 => "C32",
            Self::C32Nbg => "C32NBG",
            Self::C32Nfg => "C32NFG",
        }
    }

    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

/// Addressing strategy of a batch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LayoutFlag {
    /// Every grid cell has a record at a fixed offset.
    Full,
    /// Only written cells are stored, each tagged with its grid coordinate.
    Sparse,
    /// Records are tagged with a pixel position; no grid.
    Free,
}

impl LayoutFlag {
    pub const ALL: [Self; 3] = [Self::Full, Self::Sparse, Self::Free];

    /// The single bit for this flag.
    #[must_use]
    pub const fn flag(self) -> DetailFlags {
        match self {
            Self::Full => DetailFlags::FULL,
            Self::Sparse => DetailFlags::SPARSE,
            Self::Free => DetailFlags::FREE,
        }
    }

    /// Convert a single layout bit back to the flag.
    #[must_use]
    pub fn from_flags(flags: DetailFlags) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.flag() == flags)
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Full => "FULL",
            Self::Sparse => "SPARSE",
            Self::Free => "FREE",
        }
    }
}

macro_rules! impl_flag_text {
    ($($ty:ty),*) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.name())
                }
            }

            impl FromStr for $ty {
                type Err = Error;

                fn from_str(s: &str) -> Result<Self, Self::Err> {
                    Self::ALL
                        .into_iter()
                        .find(|flag| flag.name() == s)
                        .ok_or_else(|| Error::UnknownName(s.to_string()))
                }
            }
        )*
    };
}

impl_flag_text!(GlyphFlag, ColorFlag, LayoutFlag);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_masks_disjoint() {
        assert!(
            DetailFlags::GLYPH_MASK
                .intersection(DetailFlags::COLOR_MASK)
                .is_empty()
        );
        assert!(
            DetailFlags::COLOR_MASK
                .intersection(DetailFlags::LAYOUT_MASK)
                .is_empty()
        );
        assert!(
            DetailFlags::GLYPH_MASK
                .intersection(DetailFlags::LAYOUT_MASK)
                .is_empty()
        );
        let union = DetailFlags::GLYPH_MASK | DetailFlags::COLOR_MASK | DetailFlags::LAYOUT_MASK;
        assert_eq!(union, DetailFlags::all());
    }

    #[test]
    fn test_color_mask_covers_every_color() {
        for color in ColorFlag::ALL {
            assert!(DetailFlags::COLOR_MASK.contains(color.flag()), "{color}");
        }
        assert_eq!(DetailFlags::COLOR_MASK.bits().count_ones(), 11);
    }

    #[test]
    fn test_flag_validity() {
        assert!(detail_flag_is_valid(DetailFlags::G8.bits()));
        assert!(detail_flag_is_valid(DetailFlags::FREE.bits()));
        assert!(!detail_flag_is_valid(0));
        assert!(!detail_flag_is_valid(
            (DetailFlags::G8 | DetailFlags::G16).bits()
        ));
        assert!(!detail_flag_is_valid(1 << 20));
    }

    #[test]
    fn test_flag_names_round_trip() {
        for glyph in GlyphFlag::ALL {
            assert_eq!(glyph.name().parse::<GlyphFlag>(), Ok(glyph));
            assert_eq!(glyph.flag().flag_name(), Some(glyph.name()));
        }
        for color in ColorFlag::ALL {
            assert_eq!(color.to_string().parse::<ColorFlag>(), Ok(color));
            assert_eq!(DetailFlags::from_flag_name(color.name()), Some(color.flag()));
        }
        for layout in LayoutFlag::ALL {
            assert_eq!(layout.to_string().parse::<LayoutFlag>(), Ok(layout));
        }
        assert!("C12".parse::<ColorFlag>().is_err());
        assert_eq!((DetailFlags::G8 | DetailFlags::C0).flag_name(), None);
    }

    #[test]
    fn test_color_byte_sizes() {
        let sizes: Vec<usize> = ColorFlag::ALL.iter().map(|c| c.byte_size()).collect();
        assert_eq!(sizes, vec![0, 1, 2, 1, 1, 6, 3, 3, 8, 4, 4]);
    }

    #[test]
    fn test_foreground_background_presence() {
        assert!(ColorFlag::C24.has_foreground() && ColorFlag::C24.has_background());
        assert!(ColorFlag::C8Nbg.has_foreground() && !ColorFlag::C8Nbg.has_background());
        assert!(!ColorFlag::C32Nfg.has_foreground() && ColorFlag::C32Nfg.has_background());
        assert!(!ColorFlag::C0.has_foreground() && !ColorFlag::C0.has_background());
    }
}
