//! `tuic_batch` - Tile batch encoding for grid-based terminal-style rendering
//!
//! A batch is a packed byte buffer of tile records (glyph id plus colors)
//! handed to a renderer in one call. Each batch has a [`DetailMode`]: a glyph
//! width, a color format and a layout (full grid, sparse grid or free pixel
//! positions) which together fix the exact record bytes.
//!
//! # Examples
//!
//! ```
//! use tuic_batch::{Batch, BatchOptions, DebugContext, DetailMode, Tile, TileColors};
//!
//! let ctx = DebugContext::new();
//! let mode: DetailMode = "G8_C8_SPARSE".parse().unwrap();
//! let mut batch = Batch::sparse(&ctx, mode, 80, 25, BatchOptions::default()).unwrap();
//!
//! batch.set_tile(3, 4, Tile::new(b'@'.into(), TileColors::Indexed { fg: 15, bg: 0 })).unwrap();
//! assert_eq!(batch.tile_count(), 1);
//! assert_eq!(batch.tile_data(), &[3, 4, b'@', 15, 0]);
//! ```

// Crate-level lint configuration
#![forbid(unsafe_code)]
#![allow(clippy::cast_possible_truncation)] // Record fields truncate by definition
#![allow(clippy::cast_sign_loss)] // Coordinates are range-checked before casting
#![allow(clippy::cast_possible_wrap)] // Pixel bias fits i32 for u16 positions
#![allow(clippy::module_name_repetitions)] // Allow detail::DetailMode etc
#![allow(clippy::missing_errors_doc)] // Error variants are documented on Error
#![allow(clippy::missing_panics_doc)] // Panicking paths are documented inline
#![allow(clippy::missing_const_for_fn)] // Many functions could be const, not critical
#![allow(clippy::doc_markdown)] // Allow mode names like G8_C4_FULL without backticks
#![allow(clippy::use_self)] // Allow explicit type names in impl blocks
#![allow(clippy::cast_lossless)] // as casts are fine for primitive widening
#![allow(clippy::items_after_statements)] // Common pattern in tests

pub mod batch;
pub mod blend;
pub mod codec;
pub mod config;
pub mod debug;
pub mod detail;
pub mod error;
pub mod render;

// Re-export core types at crate root
pub use batch::{Batch, SparseUsedIndex};
pub use codec::{Tile, TileColors};
pub use config::BatchOptions;
pub use debug::{DebugContext, LogLevel};
pub use detail::{ColorFlag, DetailFlags, DetailMode, GlyphFlag, LayoutFlag};
pub use error::{Error, ErrorCode, Result};

// Re-export blending and render boundary types
pub use blend::{BlendMode, modes_compatible};
pub use render::{BatchExtent, BatchRenderer, BatchView, DestRect};
