//! Detail flags and detail modes.
//!
//! A [`DetailMode`] selects how each tile of a batch is encoded: the width of
//! its glyph id, the representation of its colors, and how the batch
//! addresses tiles. Everything here is pure and stateless.

mod flag;
mod mode;

pub use flag::{ColorFlag, DetailFlags, GlyphFlag, LayoutFlag, detail_flag_is_valid};
pub use mode::{DetailMode, pair_is_valid, tile_record_size};
