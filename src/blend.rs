//! Blend modes and their compatibility with detail modes.
//!
//! Channel blend modes write a single color channel of the destination from
//! the tile's foreground or background. They only make sense for tiles that
//! carry both a glyph and colors; glyph-less or colorless tiles can only be
//! drawn with [`BlendMode::Normal`].

use std::fmt;
use std::str::FromStr;

use crate::detail::{ColorFlag, DetailMode, GlyphFlag};
use crate::error::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum BlendMode {
    Normal = 1,
    FgRed = 2,
    FgGreen = 3,
    FgBlue = 4,
    FgAlpha = 5,
    BgRed = 6,
    BgGreen = 7,
    BgBlue = 8,
    BgAlpha = 9,
}

impl BlendMode {
    pub const ALL: [Self; 9] = [
        Self::Normal,
        Self::FgRed,
        Self::FgGreen,
        Self::FgBlue,
        Self::FgAlpha,
        Self::BgRed,
        Self::BgGreen,
        Self::BgBlue,
        Self::BgAlpha,
    ];

    /// Decode a raw blend value. Zero is the invalid sentinel.
    #[must_use]
    pub fn from_u8(value: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|b| *b as u8 == value)
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::FgRed => "FG_RED",
            Self::FgGreen => "FG_GREEN",
            Self::FgBlue => "FG_BLUE",
            Self::FgAlpha => "FG_ALPHA",
            Self::BgRed => "BG_RED",
            Self::BgGreen => "BG_GREEN",
            Self::BgBlue => "BG_BLUE",
            Self::BgAlpha => "BG_ALPHA",
        }
    }
}

impl fmt::Display for BlendMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BlendMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|b| b.name() == s)
            .ok_or_else(|| Error::UnknownName(s.to_string()))
    }
}

/// Whether a batch of `detail_mode` can be drawn with `blend`.
///
/// Colorless and glyph-less modes accept only [`BlendMode::Normal`]; every
/// other mode accepts every blend mode except `Normal`.
#[must_use]
pub fn modes_compatible(detail_mode: DetailMode, blend: BlendMode) -> bool {
    let special = detail_mode.color() == ColorFlag::C0 || detail_mode.glyph() == GlyphFlag::G0;
    special == (blend == BlendMode::Normal)
}

/// Same as [`modes_compatible`] for raw values; invalid input is incompatible.
#[must_use]
pub fn raw_modes_compatible(detail_bits: u32, blend: u8) -> bool {
    match (DetailMode::from_bits(detail_bits), BlendMode::from_u8(blend)) {
        (Some(detail_mode), Some(blend)) => modes_compatible(detail_mode, blend),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detail::LayoutFlag;

    #[test]
    fn test_raw_values() {
        assert_eq!(BlendMode::from_u8(0), None);
        assert_eq!(BlendMode::from_u8(1), Some(BlendMode::Normal));
        assert_eq!(BlendMode::from_u8(9), Some(BlendMode::BgAlpha));
        assert_eq!(BlendMode::from_u8(10), None);
    }

    #[test]
    fn test_names_round_trip() {
        for blend in BlendMode::ALL {
            assert_eq!(blend.to_string().parse::<BlendMode>(), Ok(blend));
        }
        assert!("MULTIPLY".parse::<BlendMode>().is_err());
    }

    #[test]
    fn test_special_modes_only_normal() {
        let colorless = DetailMode::new(GlyphFlag::G8, ColorFlag::C0, LayoutFlag::Full).unwrap();
        let glyphless =
            DetailMode::new(GlyphFlag::G0, ColorFlag::C24Nbg, LayoutFlag::Sparse).unwrap();
        for mode in [colorless, glyphless] {
            assert!(modes_compatible(mode, BlendMode::Normal));
            for blend in &BlendMode::ALL[1..] {
                assert!(!modes_compatible(mode, *blend), "{mode} with {blend}");
            }
        }
    }

    #[test]
    fn test_colored_modes_reject_normal() {
        let mode = DetailMode::new(GlyphFlag::G16, ColorFlag::C32, LayoutFlag::Free).unwrap();
        assert!(!modes_compatible(mode, BlendMode::Normal));
        for blend in &BlendMode::ALL[1..] {
            assert!(modes_compatible(mode, *blend));
        }
    }

    #[test]
    fn test_raw_invalid_is_incompatible() {
        let mode = DetailMode::new(GlyphFlag::G8, ColorFlag::C0, LayoutFlag::Full).unwrap();
        assert!(raw_modes_compatible(mode.bits(), 1));
        assert!(!raw_modes_compatible(mode.bits(), 0));
        assert!(!raw_modes_compatible(0, 1));
    }
}
