//! Record layout, encoder and decoder.
//!
//! # Layout
//!
//! ```text
//! [position prefix][glyph: 0|1|2][color payload: 0..=8]
//! ```
//!
//! - Full records have no prefix; the record offset encodes the position.
//! - Sparse records start with the grid coordinate, one byte per axis, or two
//!   bytes for an axis wider than 255 tiles.
//! - Free records start with a two-byte x and a two-byte y pixel position.
//!
//! Multi-byte integers are little-endian. Colors follow the glyph in the
//! order foreground, background, channels in r, g, b(, a) order. A `C4`
//! payload packs both indices as `fg + bg * 16`.

use super::tile::{Tile, TileColors};
use crate::detail::{ColorFlag, DetailMode, GlyphFlag};
use crate::error::{Error, Result};

/// Largest tile extent whose coordinates fit in one byte per axis.
pub const NARROW_AXIS_LIMIT: u32 = 255;

/// Position bytes leading each record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PositionPrefix {
    /// No prefix (full layout).
    None,
    /// Grid coordinate (sparse layout); a wide axis takes two bytes.
    Grid { wide_x: bool, wide_y: bool },
    /// Two-byte x and y pixel position (free layout).
    Pixel,
}

impl PositionPrefix {
    /// Grid prefix for a batch of the given extent.
    #[must_use]
    pub const fn for_grid(tiles_wide: u32, tiles_tall: u32) -> Self {
        Self::Grid {
            wide_x: tiles_wide > NARROW_AXIS_LIMIT,
            wide_y: tiles_tall > NARROW_AXIS_LIMIT,
        }
    }

    #[must_use]
    pub const fn byte_size(self) -> usize {
        match self {
            Self::None => 0,
            Self::Grid { wide_x, wide_y } => 2 + wide_x as usize + wide_y as usize,
            Self::Pixel => 4,
        }
    }

    const fn axis_max(wide: bool) -> u32 {
        if wide { u16::MAX as u32 } else { u8::MAX as u32 }
    }
}

/// One decoded record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Record {
    /// Stored position; `None` for full-layout records.
    pub position: Option<(u16, u16)>,
    pub tile: Tile,
}

/// Complete byte layout of one record for a detail mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RecordFormat {
    mode: DetailMode,
    prefix: PositionPrefix,
}

impl RecordFormat {
    #[must_use]
    pub const fn new(mode: DetailMode, prefix: PositionPrefix) -> Self {
        Self { mode, prefix }
    }

    #[must_use]
    pub const fn mode(&self) -> DetailMode {
        self.mode
    }

    #[must_use]
    pub const fn prefix(&self) -> PositionPrefix {
        self.prefix
    }

    /// Total record size in bytes.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.prefix.byte_size() + self.mode.bytes_per_tile()
    }

    /// Check that `tile` has the payload shape of this format.
    pub fn validate(&self, tile: &Tile) -> Result<()> {
        let found = tile.colors.flag();
        if found == self.mode.color() {
            Ok(())
        } else {
            Err(Error::ColorMismatch {
                mode: self.mode,
                found,
            })
        }
    }

    /// Check that every field fits its encoded width. The glyph of a
    /// glyph-less format is not stored and not checked.
    pub fn validate_range(&self, position: (u16, u16), tile: &Tile) -> Result<()> {
        if let PositionPrefix::Grid { wide_x, wide_y } = self.prefix {
            check_field("x", u32::from(position.0), PositionPrefix::axis_max(wide_x))?;
            check_field("y", u32::from(position.1), PositionPrefix::axis_max(wide_y))?;
        }
        let glyph = self.mode.glyph();
        if glyph != GlyphFlag::G0 {
            check_field("glyph", u32::from(tile.glyph), u32::from(glyph.max_glyph()))?;
        }
        if let TileColors::Packed4 { fg, bg } = tile.colors {
            check_field("fg", u32::from(fg), 0x0F)?;
            check_field("bg", u32::from(bg), 0x0F)?;
        }
        Ok(())
    }

    /// Write one record at `offset`, truncating oversized fields.
    ///
    /// `position` is ignored for full-layout formats.
    ///
    /// # Panics
    ///
    /// Panics if `out` is shorter than `offset + self.size()`.
    pub fn encode(
        &self,
        out: &mut [u8],
        offset: usize,
        position: (u16, u16),
        tile: &Tile,
    ) -> Result<()> {
        self.validate(tile)?;
        self.write(out, offset, position, tile);
        Ok(())
    }

    /// Like [`RecordFormat::encode`], but rejects values that would be truncated.
    ///
    /// # Panics
    ///
    /// Panics if `out` is shorter than `offset + self.size()`.
    pub fn encode_checked(
        &self,
        out: &mut [u8],
        offset: usize,
        position: (u16, u16),
        tile: &Tile,
    ) -> Result<()> {
        self.validate(tile)?;
        self.validate_range(position, tile)?;
        self.write(out, offset, position, tile);
        Ok(())
    }

    /// Write a record whose shape has already been validated.
    pub(crate) fn write(&self, out: &mut [u8], offset: usize, position: (u16, u16), tile: &Tile) {
        let mut w = Writer {
            out: &mut out[offset..offset + self.size()],
            at: 0,
        };

        match self.prefix {
            PositionPrefix::None => {}
            PositionPrefix::Grid { wide_x, wide_y } => {
                w.axis(position.0, wide_x);
                w.axis(position.1, wide_y);
            }
            PositionPrefix::Pixel => {
                w.u16(position.0);
                w.u16(position.1);
            }
        }

        match self.mode.glyph() {
            GlyphFlag::G0 => {}
            GlyphFlag::G8 => w.u8(tile.glyph as u8),
            GlyphFlag::G16 => w.u16(tile.glyph),
        }

        match tile.colors {
            TileColors::None => {}
            TileColors::Packed4 { fg, bg } => w.u8(fg.wrapping_add(bg.wrapping_mul(16))),
            TileColors::Indexed { fg, bg } => {
                w.u8(fg);
                w.u8(bg);
            }
            TileColors::IndexedFg(c) | TileColors::IndexedBg(c) => w.u8(c),
            TileColors::Rgb { fg, bg } => {
                w.bytes(&fg);
                w.bytes(&bg);
            }
            TileColors::RgbFg(c) | TileColors::RgbBg(c) => w.bytes(&c),
            TileColors::Rgba { fg, bg } => {
                w.bytes(&fg);
                w.bytes(&bg);
            }
            TileColors::RgbaFg(c) | TileColors::RgbaBg(c) => w.bytes(&c),
        }
    }

    /// Decode the record at `offset`, `None` if `bytes` is too short.
    #[must_use]
    pub fn decode(&self, bytes: &[u8], offset: usize) -> Option<Record> {
        let end = offset.checked_add(self.size())?;
        let mut r = Reader {
            bytes: bytes.get(offset..end)?,
            at: 0,
        };

        let position = match self.prefix {
            PositionPrefix::None => None,
            PositionPrefix::Grid { wide_x, wide_y } => Some((r.axis(wide_x), r.axis(wide_y))),
            PositionPrefix::Pixel => Some((r.u16(), r.u16())),
        };

        let glyph = match self.mode.glyph() {
            GlyphFlag::G0 => 0,
            GlyphFlag::G8 => u16::from(r.u8()),
            GlyphFlag::G16 => r.u16(),
        };

        let colors = match self.mode.color() {
            ColorFlag::C0 => TileColors::None,
            ColorFlag::C4 => {
                let packed = r.u8();
                TileColors::Packed4 {
                    fg: packed & 0x0F,
                    bg: packed >> 4,
                }
            }
            ColorFlag::C8 => TileColors::Indexed {
                fg: r.u8(),
                bg: r.u8(),
            },
            ColorFlag::C8Nbg => TileColors::IndexedFg(r.u8()),
            ColorFlag::C8Nfg => TileColors::IndexedBg(r.u8()),
            ColorFlag::C24 => TileColors::Rgb {
                fg: r.array(),
                bg: r.array(),
            },
            ColorFlag::C24Nbg => TileColors::RgbFg(r.array()),
            ColorFlag::C24Nfg => TileColors::RgbBg(r.array()),
            ColorFlag::C32 => TileColors::Rgba {
                fg: r.array(),
                bg: r.array(),
            },
            ColorFlag::C32Nbg => TileColors::RgbaFg(r.array()),
            ColorFlag::C32Nfg => TileColors::RgbaBg(r.array()),
        };

        Some(Record {
            position,
            tile: Tile { glyph, colors },
        })
    }
}

fn check_field(field: &'static str, value: u32, max: u32) -> Result<()> {
    if value > max {
        Err(Error::FieldOutOfRange { field, value, max })
    } else {
        Ok(())
    }
}

struct Writer<'a> {
    out: &'a mut [u8],
    at: usize,
}

impl Writer<'_> {
    #[inline]
    fn u8(&mut self, value: u8) {
        self.out[self.at] = value;
        self.at += 1;
    }

    #[inline]
    fn u16(&mut self, value: u16) {
        self.bytes(&value.to_le_bytes());
    }

    #[inline]
    fn axis(&mut self, value: u16, wide: bool) {
        if wide {
            self.u16(value);
        } else {
            self.u8(value as u8);
        }
    }

    #[inline]
    fn bytes(&mut self, values: &[u8]) {
        self.out[self.at..self.at + values.len()].copy_from_slice(values);
        self.at += values.len();
    }
}

struct Reader<'a> {
    bytes: &'a [u8],
    at: usize,
}

impl Reader<'_> {
    #[inline]
    fn u8(&mut self) -> u8 {
        let value = self.bytes[self.at];
        self.at += 1;
        value
    }

    #[inline]
    fn u16(&mut self) -> u16 {
        u16::from_le_bytes(self.array())
    }

    #[inline]
    fn axis(&mut self, wide: bool) -> u16 {
        if wide { self.u16() } else { u16::from(self.u8()) }
    }

    #[inline]
    fn array<const N: usize>(&mut self) -> [u8; N] {
        let mut out = [0; N];
        out.copy_from_slice(&self.bytes[self.at..self.at + N]);
        self.at += N;
        out
    }
}
