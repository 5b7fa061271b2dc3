//! Tile record codec.
//!
//! Pure functions that write and read one tile record at a byte offset. The
//! record shape is data-driven: the detail mode supplies the glyph width and
//! color payload, and the layout supplies a [`PositionPrefix`] composed in
//! front of it. No field is range-checked on the default path; values wider
//! than their field wrap. [`RecordFormat::encode_checked`] rejects them instead.
//!
//! # Examples
//!
//! ```
//! use tuic_batch::codec::{PositionPrefix, RecordFormat, Tile, TileColors};
//! use tuic_batch::detail::{ColorFlag, DetailMode, GlyphFlag, LayoutFlag};
//!
//! let mode = DetailMode::new(GlyphFlag::G8, ColorFlag::C8, LayoutFlag::Full).unwrap();
//! let format = RecordFormat::new(mode, PositionPrefix::None);
//!
//! let mut buf = vec![0u8; format.size()];
//! let tile = Tile::new(65, TileColors::Indexed { fg: 1, bg: 0 });
//! format.encode(&mut buf, 0, (0, 0), &tile).unwrap();
//! assert_eq!(buf, [65, 1, 0]);
//! assert_eq!(format.decode(&buf, 0).unwrap().tile, tile);
//! ```

mod record;
mod tile;

pub use record::{NARROW_AXIS_LIMIT, PositionPrefix, Record, RecordFormat};
pub use tile::{Tile, TileColors};
