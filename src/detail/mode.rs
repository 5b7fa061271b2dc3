//! Detail modes: valid flag combinations and their derived properties.

use std::fmt;
use std::str::FromStr;

use super::flag::{ColorFlag, DetailFlags, GlyphFlag, LayoutFlag};
use crate::error::Error;

/// Record size in bytes (glyph + color payload) per `[glyph][color]`.
///
/// Zero marks a combination that is not realizable: a glyph-less tile must
/// carry exactly one foreground color.
const TILE_RECORD_SIZES: [[usize; 11]; 3] = [
    // C0 C4 C8 C8NBG C8NFG C24 C24NBG C24NFG C32 C32NBG C32NFG
    [0, 0, 0, 1, 0, 0, 3, 0, 0, 4, 0],
    [1, 2, 3, 2, 2, 7, 4, 4, 9, 5, 5],
    [2, 3, 4, 3, 3, 8, 5, 5, 10, 6, 6],
];

/// Whether a glyph width and color representation can share a record.
#[must_use]
pub const fn pair_is_valid(glyph: GlyphFlag, color: ColorFlag) -> bool {
    TILE_RECORD_SIZES[glyph.index()][color.index()] != 0
}

/// Bytes of glyph and color payload per tile, excluding any position prefix.
///
/// Returns `None` for combinations that are not realizable.
#[must_use]
pub const fn tile_record_size(glyph: GlyphFlag, color: ColorFlag) -> Option<usize> {
    match TILE_RECORD_SIZES[glyph.index()][color.index()] {
        0 => None,
        size => Some(size),
    }
}

/// A valid combination of one glyph, one color and one layout flag.
///
/// Once constructed a `DetailMode` is always valid; raw bits from the outside
/// go through [`DetailMode::from_bits`], which rejects anything that does not
/// set exactly one realizable flag per category.
///
/// # Examples
///
/// ```
/// use tuic_batch::detail::{ColorFlag, DetailMode, GlyphFlag, LayoutFlag};
///
/// let mode = DetailMode::new(GlyphFlag::G8, ColorFlag::C4, LayoutFlag::Full).unwrap();
/// assert_eq!(mode.bytes_per_tile(), 2);
/// assert!(mode.requires_palette());
/// assert_eq!(mode.to_string(), "G8_C4_FULL");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DetailMode {
    glyph: GlyphFlag,
    color: ColorFlag,
    layout: LayoutFlag,
}

impl DetailMode {
    /// Combine three flags, `None` if the glyph/color pair is not realizable.
    #[must_use]
    pub const fn new(glyph: GlyphFlag, color: ColorFlag, layout: LayoutFlag) -> Option<Self> {
        if pair_is_valid(glyph, color) {
            Some(Self {
                glyph,
                color,
                layout,
            })
        } else {
            None
        }
    }

    /// Decode raw flag bits.
    #[must_use]
    pub fn from_bits(bits: u32) -> Option<Self> {
        let flags = DetailFlags::from_bits(bits)?;
        Self::from_flags(flags)
    }

    /// Decode a flag set.
    #[must_use]
    pub fn from_flags(flags: DetailFlags) -> Option<Self> {
        let glyph = GlyphFlag::from_flags(flags.glyph_bits())?;
        let color = ColorFlag::from_flags(flags.color_bits())?;
        let layout = LayoutFlag::from_flags(flags.layout_bits())?;
        Self::new(glyph, color, layout)
    }

    /// Same as [`DetailMode::from_bits`], with an error for invalid bits.
    pub fn try_from_bits(bits: u32) -> Result<Self, Error> {
        Self::from_bits(bits).ok_or(Error::InvalidDetailMode(bits))
    }

    /// Whether raw bits form a valid mode.
    #[must_use]
    pub fn is_valid(bits: u32) -> bool {
        Self::from_bits(bits).is_some()
    }

    /// The flag bits of this mode.
    #[must_use]
    pub const fn flags(self) -> DetailFlags {
        DetailFlags::from_bits_retain(
            self.glyph.flag().bits() | self.color.flag().bits() | self.layout.flag().bits(),
        )
    }

    #[must_use]
    pub const fn bits(self) -> u32 {
        self.flags().bits()
    }

    /// Split into glyph, color and layout flags.
    #[must_use]
    pub const fn decompose(self) -> (GlyphFlag, ColorFlag, LayoutFlag) {
        (self.glyph, self.color, self.layout)
    }

    #[must_use]
    pub const fn glyph(self) -> GlyphFlag {
        self.glyph
    }

    #[must_use]
    pub const fn color(self) -> ColorFlag {
        self.color
    }

    #[must_use]
    pub const fn layout(self) -> LayoutFlag {
        self.layout
    }

    /// Same glyph and color with a different layout.
    #[must_use]
    pub const fn with_layout(self, layout: LayoutFlag) -> Self {
        Self { layout, ..self }
    }

    /// Whether every bit of `flags` is set in this mode.
    #[must_use]
    pub const fn has_flag(self, flags: DetailFlags) -> bool {
        self.bits() & flags.bits() == flags.bits()
    }

    /// Bytes of glyph and color payload per tile (no position prefix).
    #[must_use]
    pub const fn bytes_per_tile(self) -> usize {
        TILE_RECORD_SIZES[self.glyph.index()][self.color.index()]
    }

    /// Whether rendering this mode needs a palette.
    #[must_use]
    pub const fn requires_palette(self) -> bool {
        self.color.is_paletted()
    }

    /// Whether rendering this mode needs a glyph atlas.
    #[must_use]
    pub const fn requires_atlas(self) -> bool {
        !matches!(self.glyph, GlyphFlag::G0)
    }

    /// Iterate over every valid mode, layout-major then glyph then color.
    pub fn all() -> impl Iterator<Item = Self> {
        LayoutFlag::ALL.into_iter().flat_map(|layout| {
            GlyphFlag::ALL.into_iter().flat_map(move |glyph| {
                ColorFlag::ALL
                    .into_iter()
                    .filter_map(move |color| Self::new(glyph, color, layout))
            })
        })
    }
}

impl fmt::Display for DetailMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}_{}_{}",
            self.glyph.name(),
            self.color.name(),
            self.layout.name()
        )
    }
}

impl FromStr for DetailMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || Error::UnknownName(s.to_string());
        let mut parts = s.split('_');
        let (Some(glyph), Some(color), Some(layout), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(unknown());
        };
        let glyph = glyph.parse::<GlyphFlag>().map_err(|_| unknown())?;
        let color = color.parse::<ColorFlag>().map_err(|_| unknown())?;
        let layout = layout.parse::<LayoutFlag>().map_err(|_| unknown())?;
        Self::new(glyph, color, layout).ok_or_else(unknown)
    }
}

impl TryFrom<u32> for DetailMode {
    type Error = Error;

    fn try_from(bits: u32) -> Result<Self, Self::Error> {
        Self::try_from_bits(bits)
    }
}

impl From<DetailMode> for u32 {
    fn from(mode: DetailMode) -> Self {
        mode.bits()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mode(glyph: GlyphFlag, color: ColorFlag, layout: LayoutFlag) -> DetailMode {
        DetailMode::new(glyph, color, layout).unwrap()
    }

    #[test]
    fn test_mode_count() {
        assert_eq!(DetailMode::all().count(), 75);
        let glyph_bearing = DetailMode::all()
            .filter(|m| m.layout() == LayoutFlag::Full && m.requires_atlas())
            .count();
        assert_eq!(glyph_bearing, 22);
    }

    #[test]
    fn test_decompose_reassembles_bits() {
        for m in DetailMode::all() {
            let (glyph, color, layout) = m.decompose();
            let bits = glyph.flag() | color.flag() | layout.flag();
            assert_eq!(bits.bits(), m.bits(), "{m}");
            assert_eq!(DetailMode::from_bits(m.bits()), Some(m));
        }
    }

    #[test]
    fn test_invalid_bits_rejected() {
        // missing layout
        let bits = (DetailFlags::G8 | DetailFlags::C4).bits();
        assert_eq!(DetailMode::from_bits(bits), None);
        // two colors
        let bits = (DetailFlags::G8 | DetailFlags::C4 | DetailFlags::C8 | DetailFlags::FULL).bits();
        assert!(!DetailMode::is_valid(bits));
        // unknown bit
        assert_eq!(
            DetailMode::try_from_bits(1 << 30),
            Err(Error::InvalidDetailMode(1 << 30))
        );
        // glyph-less tile without a foreground
        let bits = (DetailFlags::G0 | DetailFlags::C8 | DetailFlags::SPARSE).bits();
        assert!(!DetailMode::is_valid(bits));
        assert!(!DetailMode::is_valid(0));
    }

    #[test]
    fn test_record_sizes() {
        assert_eq!(tile_record_size(GlyphFlag::G8, ColorFlag::C0), Some(1));
        assert_eq!(tile_record_size(GlyphFlag::G8, ColorFlag::C24), Some(7));
        assert_eq!(tile_record_size(GlyphFlag::G16, ColorFlag::C32), Some(10));
        assert_eq!(tile_record_size(GlyphFlag::G0, ColorFlag::C24Nbg), Some(3));
        assert_eq!(tile_record_size(GlyphFlag::G0, ColorFlag::C4), None);
        for glyph in [GlyphFlag::G8, GlyphFlag::G16] {
            for color in ColorFlag::ALL {
                assert_eq!(
                    tile_record_size(glyph, color),
                    Some(glyph.byte_size() + color.byte_size())
                );
            }
        }
    }

    #[test]
    fn test_palette_and_atlas() {
        assert!(mode(GlyphFlag::G8, ColorFlag::C4, LayoutFlag::Full).requires_palette());
        assert!(mode(GlyphFlag::G16, ColorFlag::C8Nfg, LayoutFlag::Free).requires_palette());
        assert!(!mode(GlyphFlag::G8, ColorFlag::C0, LayoutFlag::Full).requires_palette());
        assert!(!mode(GlyphFlag::G8, ColorFlag::C24, LayoutFlag::Sparse).requires_palette());
        assert!(!mode(GlyphFlag::G8, ColorFlag::C32Nbg, LayoutFlag::Full).requires_palette());

        assert!(!mode(GlyphFlag::G0, ColorFlag::C8Nbg, LayoutFlag::Full).requires_atlas());
        assert!(mode(GlyphFlag::G16, ColorFlag::C0, LayoutFlag::Full).requires_atlas());
    }

    #[test]
    fn test_names_round_trip() {
        for m in DetailMode::all() {
            assert_eq!(m.to_string().parse::<DetailMode>(), Ok(m));
        }
        assert_eq!(
            mode(GlyphFlag::G16, ColorFlag::C32Nfg, LayoutFlag::Free).to_string(),
            "G16_C32NFG_FREE"
        );
        assert!("G8_C4".parse::<DetailMode>().is_err());
        assert!("G8_C4_FULL_X".parse::<DetailMode>().is_err());
        assert!("G0_C4_FULL".parse::<DetailMode>().is_err());
    }

    #[test]
    fn test_has_flag() {
        let m = mode(GlyphFlag::G8, ColorFlag::C24Nbg, LayoutFlag::Sparse);
        assert!(m.has_flag(DetailFlags::SPARSE));
        assert!(m.has_flag(DetailFlags::G8 | DetailFlags::C24NBG));
        assert!(!m.has_flag(DetailFlags::C24));
        assert_eq!(m.with_layout(LayoutFlag::Free).layout(), LayoutFlag::Free);
    }
}
