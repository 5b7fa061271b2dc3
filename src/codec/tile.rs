//! Tile field values.

use crate::detail::ColorFlag;

/// Color payload of one tile, one variant per [`ColorFlag`].
///
/// Paletted variants hold palette indices; direct variants hold RGB or RGBA
/// channels. Values wider than the encoded field are truncated on write
/// unless the checked encoder is used.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TileColors {
    /// `C0`: no color.
    #[default]
    None,
    /// `C4`: 4-bit foreground and background indices sharing one byte.
    Packed4 { fg: u8, bg: u8 },
    /// `C8`: 8-bit foreground and background indices.
    Indexed { fg: u8, bg: u8 },
    /// `C8NBG`: 8-bit foreground index only.
    IndexedFg(u8),
    /// `C8NFG`: 8-bit background index only.
    IndexedBg(u8),
    /// `C24`: RGB foreground and background.
    Rgb { fg: [u8; 3], bg: [u8; 3] },
    /// `C24NBG`: RGB foreground only.
    RgbFg([u8; 3]),
    /// `C24NFG`: RGB background only.
    RgbBg([u8; 3]),
    /// `C32`: RGBA foreground and background.
    Rgba { fg: [u8; 4], bg: [u8; 4] },
    /// `C32NBG`: RGBA foreground only.
    RgbaFg([u8; 4]),
    /// `C32NFG`: RGBA background only.
    RgbaBg([u8; 4]),
}

impl TileColors {
    /// The color flag this payload encodes under.
    #[must_use]
    pub const fn flag(&self) -> ColorFlag {
        match self {
            Self::None => ColorFlag::C0,
            Self::Packed4 { .. } => ColorFlag::C4,
            Self::Indexed { .. } => ColorFlag::C8,
            Self::IndexedFg(_) => ColorFlag::C8Nbg,
            Self::IndexedBg(_) => ColorFlag::C8Nfg,
            Self::Rgb { .. } => ColorFlag::C24,
            Self::RgbFg(_) => ColorFlag::C24Nbg,
            Self::RgbBg(_) => ColorFlag::C24Nfg,
            Self::Rgba { .. } => ColorFlag::C32,
            Self::RgbaFg(_) => ColorFlag::C32Nbg,
            Self::RgbaBg(_) => ColorFlag::C32Nfg,
        }
    }

    /// All-zero payload of the given shape.
    #[must_use]
    pub const fn zeroed(flag: ColorFlag) -> Self {
        match flag {
            ColorFlag::C0 => Self::None,
            ColorFlag::C4 => Self::Packed4 { fg: 0, bg: 0 },
            ColorFlag::C8 => Self::Indexed { fg: 0, bg: 0 },
            ColorFlag::C8Nbg => Self::IndexedFg(0),
            ColorFlag::C8Nfg => Self::IndexedBg(0),
            ColorFlag::C24 => Self::Rgb {
                fg: [0; 3],
                bg: [0; 3],
            },
            ColorFlag::C24Nbg => Self::RgbFg([0; 3]),
            ColorFlag::C24Nfg => Self::RgbBg([0; 3]),
            ColorFlag::C32 => Self::Rgba {
                fg: [0; 4],
                bg: [0; 4],
            },
            ColorFlag::C32Nbg => Self::RgbaFg([0; 4]),
            ColorFlag::C32Nfg => Self::RgbaBg([0; 4]),
        }
    }
}

/// Visual state of one tile: a glyph id and its colors.
///
/// Glyph-less modes ignore `glyph`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Tile {
    pub glyph: u16,
    pub colors: TileColors,
}

impl Tile {
    #[must_use]
    pub const fn new(glyph: u16, colors: TileColors) -> Self {
        Self { glyph, colors }
    }

    /// A colorless tile.
    #[must_use]
    pub const fn glyph(glyph: u16) -> Self {
        Self::new(glyph, TileColors::None)
    }

    /// A glyph-less tile.
    #[must_use]
    pub const fn solid(colors: TileColors) -> Self {
        Self::new(0, colors)
    }

    /// All-zero tile of the given color shape.
    #[must_use]
    pub const fn zeroed(flag: ColorFlag) -> Self {
        Self::new(0, TileColors::zeroed(flag))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zeroed_matches_flag() {
        for flag in ColorFlag::ALL {
            assert_eq!(TileColors::zeroed(flag).flag(), flag);
            assert_eq!(Tile::zeroed(flag).glyph, 0);
        }
    }

    #[test]
    fn test_constructors() {
        assert_eq!(Tile::glyph(7).colors, TileColors::None);
        let solid = Tile::solid(TileColors::RgbFg([1, 2, 3]));
        assert_eq!(solid.glyph, 0);
        assert_eq!(solid.colors.flag(), ColorFlag::C24Nbg);
    }
}
