//! Tile batches: packed record buffers handed to a renderer.
//!
//! A [`Batch`] owns one contiguous byte buffer of tile records laid out
//! according to its [`DetailMode`]:
//!
//! - **Full**: one record per grid cell at offset `(y * tiles_wide + x) * size`.
//! - **Sparse**: records are appended in write order, each tagged with its
//!   grid coordinate. With the stencil enabled a [`SparseUsedIndex`] keeps at
//!   most one record per coordinate; a second write overwrites in place.
//! - **Free**: records are appended, each tagged with a pixel position, up to
//!   a fixed maximum tile count.
//!
//! Any change to a batch's shape (tile dimensions, max tile count, pixel
//! dimensions) discards its tiles, even if the new shape equals the old one.
//!
//! # Examples
//!
//! ```
//! use tuic_batch::{Batch, BatchOptions, DebugContext};
//! use tuic_batch::codec::{Tile, TileColors};
//! use tuic_batch::detail::{ColorFlag, DetailMode, GlyphFlag, LayoutFlag};
//!
//! let ctx = DebugContext::new();
//! let mode = DetailMode::new(GlyphFlag::G8, ColorFlag::C4, LayoutFlag::Full).unwrap();
//! let mut batch = Batch::full(&ctx, mode, 4, 4, BatchOptions::default()).unwrap();
//!
//! batch
//!     .set_tile(2, 3, Tile::new(7, TileColors::Packed4 { fg: 1, bg: 2 }))
//!     .unwrap();
//! assert_eq!(batch.data()[28], 7);
//! assert_eq!(batch.data()[29], 33);
//! ```

mod sparse_index;

pub use sparse_index::SparseUsedIndex;

use crate::codec::{PositionPrefix, Record, RecordFormat, Tile};
use crate::config::BatchOptions;
use crate::debug::DebugContext;
use crate::detail::{DetailMode, LayoutFlag};
use crate::error::{Error, Result};
use crate::render::{BatchExtent, BatchRenderer, BatchView, DestRect};

/// Largest sparse batch extent per axis; coordinates must fit two bytes.
pub const MAX_SPARSE_AXIS: u32 = u16::MAX as u32;

#[derive(Clone, Debug)]
enum Shape {
    Full {
        tiles_wide: u32,
        tiles_tall: u32,
    },
    Sparse {
        tiles_wide: u32,
        tiles_tall: u32,
        index: Option<SparseUsedIndex>,
    },
    Free {
        tile_pixel_width: u32,
        tile_pixel_height: u32,
        viewport_width: u32,
        viewport_height: u32,
        max_tile_count: u32,
    },
}

/// A packed buffer of tile records for one detail mode.
///
/// A batch is exclusively owned; mutate it from one thread at a time.
#[derive(Clone, Debug)]
pub struct Batch {
    ctx: DebugContext,
    format: RecordFormat,
    /// Allocation; `data.len()` is the reserved size.
    data: Vec<u8>,
    used_size: usize,
    tile_count: usize,
    shape: Shape,
}

impl Batch {
    /// Create a full-layout batch of `tiles_wide` x `tiles_tall` cells.
    pub fn full(
        ctx: &DebugContext,
        mode: DetailMode,
        tiles_wide: u32,
        tiles_tall: u32,
        options: BatchOptions,
    ) -> Result<Self> {
        let result = Self::try_full(ctx, mode, tiles_wide, tiles_tall, options);
        ctx.check(result, "Batch::full")
    }

    fn try_full(
        ctx: &DebugContext,
        mode: DetailMode,
        tiles_wide: u32,
        tiles_tall: u32,
        options: BatchOptions,
    ) -> Result<Self> {
        check_dimensions(tiles_wide, tiles_tall, u32::MAX)?;
        expect_layout(mode, LayoutFlag::Full)?;
        let format = RecordFormat::new(mode, PositionPrefix::None);
        let used_size = grid_bytes(format.size(), tiles_wide, tiles_tall)?;
        Self::allocate(
            ctx,
            format,
            used_size,
            options,
            cell_count(tiles_wide, tiles_tall),
            Shape::Full {
                tiles_wide,
                tiles_tall,
            },
        )
    }

    /// Create a sparse-layout batch over a `tiles_wide` x `tiles_tall` grid.
    ///
    /// Axes wider than 255 tiles store two-byte coordinates.
    pub fn sparse(
        ctx: &DebugContext,
        mode: DetailMode,
        tiles_wide: u32,
        tiles_tall: u32,
        options: BatchOptions,
    ) -> Result<Self> {
        let result = Self::try_sparse(ctx, mode, tiles_wide, tiles_tall, options);
        ctx.check(result, "Batch::sparse")
    }

    fn try_sparse(
        ctx: &DebugContext,
        mode: DetailMode,
        tiles_wide: u32,
        tiles_tall: u32,
        options: BatchOptions,
    ) -> Result<Self> {
        check_dimensions(tiles_wide, tiles_tall, MAX_SPARSE_AXIS)?;
        expect_layout(mode, LayoutFlag::Sparse)?;
        let format = RecordFormat::new(mode, PositionPrefix::for_grid(tiles_wide, tiles_tall));
        let used_size = grid_bytes(format.size(), tiles_wide, tiles_tall)?;
        let index = if options.use_stencil {
            Some(SparseUsedIndex::new(tiles_wide, tiles_tall)?)
        } else {
            None
        };
        Self::allocate(
            ctx,
            format,
            used_size,
            options,
            0,
            Shape::Sparse {
                tiles_wide,
                tiles_tall,
                index,
            },
        )
    }

    /// Create a free-layout batch.
    ///
    /// `tile_pixel_size` is the glyph size and `viewport_pixel_size` the drawable
    /// area, both in pixels. At most `max_tile_count` tiles can be set.
    pub fn free(
        ctx: &DebugContext,
        mode: DetailMode,
        tile_pixel_size: (u32, u32),
        viewport_pixel_size: (u32, u32),
        max_tile_count: u32,
        options: BatchOptions,
    ) -> Result<Self> {
        let result = Self::try_free(
            ctx,
            mode,
            tile_pixel_size,
            viewport_pixel_size,
            max_tile_count,
            options,
        );
        ctx.check(result, "Batch::free")
    }

    fn try_free(
        ctx: &DebugContext,
        mode: DetailMode,
        (tile_pixel_width, tile_pixel_height): (u32, u32),
        (viewport_width, viewport_height): (u32, u32),
        max_tile_count: u32,
        options: BatchOptions,
    ) -> Result<Self> {
        check_tile_pixel_dimensions(tile_pixel_width, tile_pixel_height)?;
        check_viewport_dimensions(viewport_width, viewport_height)?;
        expect_layout(mode, LayoutFlag::Free)?;
        let format = RecordFormat::new(mode, PositionPrefix::Pixel);
        let used_size = free_bytes(format.size(), max_tile_count)?;
        Self::allocate(
            ctx,
            format,
            used_size,
            options,
            0,
            Shape::Free {
                tile_pixel_width,
                tile_pixel_height,
                viewport_width,
                viewport_height,
                max_tile_count,
            },
        )
    }

    fn allocate(
        ctx: &DebugContext,
        format: RecordFormat,
        used_size: usize,
        options: BatchOptions,
        tile_count: usize,
        shape: Shape,
    ) -> Result<Self> {
        let reserved_size = used_size.max(options.min_reserved_size);
        tracing::debug!(
            mode = %format.mode(),
            used_size,
            reserved_size,
            "allocating batch"
        );
        Ok(Self {
            ctx: ctx.clone(),
            format,
            data: zeroed_buffer(reserved_size)?,
            used_size,
            tile_count,
            shape,
        })
    }

    /// Allocate a new buffer of `used_size` bytes if the reservation policy
    /// asks for one. `None` means the current allocation is reused.
    ///
    /// Nothing is modified, so a failed allocation leaves the batch intact.
    fn plan_storage(
        &self,
        used_size: usize,
        reserve_extra: bool,
        force_exact: bool,
    ) -> Result<Option<Vec<u8>>> {
        if force_exact || !reserve_extra || used_size > self.data.len() {
            tracing::debug!(
                mode = %self.format.mode(),
                old_reserved = self.data.len(),
                reserved_size = used_size,
                "reallocating batch"
            );
            zeroed_buffer(used_size).map(Some)
        } else {
            Ok(None)
        }
    }

    /// Install a planned buffer and zero the used region.
    fn commit_storage(&mut self, used_size: usize, buffer: Option<Vec<u8>>) {
        match buffer {
            Some(buffer) => self.data = buffer,
            None => self.data[..used_size].fill(0),
        }
        self.used_size = used_size;
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    #[must_use]
    pub fn detail_mode(&self) -> DetailMode {
        self.format.mode()
    }

    #[must_use]
    pub fn layout(&self) -> LayoutFlag {
        self.format.mode().layout()
    }

    /// Layout of one record, including its position prefix.
    #[must_use]
    pub fn record_format(&self) -> RecordFormat {
        self.format
    }

    /// Bytes per record, including any position prefix.
    #[must_use]
    pub fn bytes_per_tile(&self) -> usize {
        self.format.size()
    }

    /// Grid extent; `None` for free batches.
    #[must_use]
    pub fn tile_dimensions(&self) -> Option<(u32, u32)> {
        match self.shape {
            Shape::Full {
                tiles_wide,
                tiles_tall,
            }
            | Shape::Sparse {
                tiles_wide,
                tiles_tall,
                ..
            } => Some((tiles_wide, tiles_tall)),
            Shape::Free { .. } => None,
        }
    }

    /// Grid width in tiles; 0 for free batches.
    #[must_use]
    pub fn tiles_wide(&self) -> u32 {
        self.tile_dimensions().map_or(0, |(w, _)| w)
    }

    /// Grid height in tiles; 0 for free batches.
    #[must_use]
    pub fn tiles_tall(&self) -> u32 {
        self.tile_dimensions().map_or(0, |(_, h)| h)
    }

    /// Glyph size in pixels; `None` for grid batches.
    #[must_use]
    pub fn tile_pixel_dimensions(&self) -> Option<(u32, u32)> {
        match self.shape {
            Shape::Free {
                tile_pixel_width,
                tile_pixel_height,
                ..
            } => Some((tile_pixel_width, tile_pixel_height)),
            _ => None,
        }
    }

    /// Viewport size in pixels; `None` for grid batches.
    #[must_use]
    pub fn viewport_pixel_dimensions(&self) -> Option<(u32, u32)> {
        match self.shape {
            Shape::Free {
                viewport_width,
                viewport_height,
                ..
            } => Some((viewport_width, viewport_height)),
            _ => None,
        }
    }

    /// Most records the batch can hold at its current shape.
    #[must_use]
    pub fn max_tile_count(&self) -> usize {
        match self.shape {
            Shape::Full {
                tiles_wide,
                tiles_tall,
            }
            | Shape::Sparse {
                tiles_wide,
                tiles_tall,
                ..
            } => cell_count(tiles_wide, tiles_tall),
            Shape::Free { max_tile_count, .. } => max_tile_count as usize,
        }
    }

    /// Whether sparse writes are deduplicated per coordinate.
    #[must_use]
    pub fn uses_stencil(&self) -> bool {
        matches!(self.shape, Shape::Sparse { index: Some(_), .. })
    }

    /// Tiles currently held. Full batches always hold every cell.
    #[must_use]
    pub fn tile_count(&self) -> usize {
        self.tile_count
    }

    /// Bytes sized for the current shape.
    #[must_use]
    pub fn data_size(&self) -> usize {
        self.used_size
    }

    /// Bytes allocated, at least [`Batch::data_size`].
    #[must_use]
    pub fn reserved_size(&self) -> usize {
        self.data.len()
    }

    /// The region sized for the current shape.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data[..self.used_size]
    }

    /// Exactly [`Batch::tile_count`] records.
    #[must_use]
    pub fn tile_data(&self) -> &[u8] {
        &self.data[..self.tile_count * self.format.size()]
    }

    // ------------------------------------------------------------------
    // Mutation
    // ------------------------------------------------------------------

    /// Discard every tile without releasing memory.
    ///
    /// Full batches are zeroed; sparse and free batches drop their records
    /// and start a new generation.
    pub fn clear(&mut self) {
        match &mut self.shape {
            Shape::Full { .. } => self.data[..self.used_size].fill(0),
            Shape::Sparse { index, .. } => {
                self.tile_count = 0;
                if let Some(index) = index {
                    index.reset();
                }
            }
            Shape::Free { .. } => self.tile_count = 0,
        }
    }

    /// Resize a full or sparse batch. All tiles are discarded.
    ///
    /// Grows the allocation to exactly the new need when required. With
    /// `reserve_extra` a larger existing allocation is kept, otherwise it
    /// shrinks to fit. A sparse batch whose coordinate width changes always
    /// reallocates.
    pub fn set_tile_dimensions(
        &mut self,
        tiles_wide: u32,
        tiles_tall: u32,
        reserve_extra: bool,
    ) -> Result<()> {
        let result = self.try_set_tile_dimensions(tiles_wide, tiles_tall, reserve_extra);
        self.ctx.check(result, "Batch::set_tile_dimensions")
    }

    fn try_set_tile_dimensions(
        &mut self,
        tiles_wide: u32,
        tiles_tall: u32,
        reserve_extra: bool,
    ) -> Result<()> {
        let mode = self.format.mode();
        match self.shape {
            Shape::Full { .. } => {
                check_dimensions(tiles_wide, tiles_tall, u32::MAX)?;
                let used_size = grid_bytes(self.format.size(), tiles_wide, tiles_tall)?;
                let buffer = self.plan_storage(used_size, reserve_extra, false)?;
                self.commit_storage(used_size, buffer);
                self.tile_count = cell_count(tiles_wide, tiles_tall);
                self.shape = Shape::Full {
                    tiles_wide,
                    tiles_tall,
                };
            }
            Shape::Sparse { ref index, .. } => {
                check_dimensions(tiles_wide, tiles_tall, MAX_SPARSE_AXIS)?;
                let format = RecordFormat::new(mode, PositionPrefix::for_grid(tiles_wide, tiles_tall));
                let used_size = grid_bytes(format.size(), tiles_wide, tiles_tall)?;
                let index = match index {
                    Some(_) => Some(SparseUsedIndex::new(tiles_wide, tiles_tall)?),
                    None => None,
                };
                let record_size_changed = format.size() != self.format.size();
                let buffer = self.plan_storage(used_size, reserve_extra, record_size_changed)?;

                self.format = format;
                self.commit_storage(used_size, buffer);
                self.tile_count = 0;
                self.shape = Shape::Sparse {
                    tiles_wide,
                    tiles_tall,
                    index,
                };
            }
            Shape::Free { .. } => {
                return Err(Error::LayoutMismatch {
                    mode,
                    expected: LayoutFlag::Full,
                });
            }
        }
        Ok(())
    }

    /// Change the tile capacity of a free batch. All tiles are discarded.
    pub fn set_max_tile_count(&mut self, max_tile_count: u32, reserve_extra: bool) -> Result<()> {
        let result = self.try_set_max_tile_count(max_tile_count, reserve_extra);
        self.ctx.check(result, "Batch::set_max_tile_count")
    }

    fn try_set_max_tile_count(&mut self, count: u32, reserve_extra: bool) -> Result<()> {
        self.expect_free()?;
        let used_size = free_bytes(self.format.size(), count)?;
        let buffer = self.plan_storage(used_size, reserve_extra, false)?;
        self.commit_storage(used_size, buffer);
        self.tile_count = 0;
        if let Shape::Free { max_tile_count, .. } = &mut self.shape {
            *max_tile_count = count;
        }
        Ok(())
    }

    /// Change the glyph size of a free batch. All tiles are discarded.
    pub fn set_tile_pixel_dimensions(&mut self, width: u32, height: u32) -> Result<()> {
        let result = self
            .expect_free()
            .and_then(|()| check_tile_pixel_dimensions(width, height));
        if result.is_ok() {
            self.tile_count = 0;
            if let Shape::Free {
                tile_pixel_width,
                tile_pixel_height,
                ..
            } = &mut self.shape
            {
                *tile_pixel_width = width;
                *tile_pixel_height = height;
            }
        }
        self.ctx.check(result, "Batch::set_tile_pixel_dimensions")
    }

    /// Change the viewport of a free batch. All tiles are discarded.
    pub fn set_viewport_pixel_dimensions(&mut self, width: u32, height: u32) -> Result<()> {
        let result = self
            .expect_free()
            .and_then(|()| check_viewport_dimensions(width, height));
        if result.is_ok() {
            self.tile_count = 0;
            if let Shape::Free {
                viewport_width,
                viewport_height,
                ..
            } = &mut self.shape
            {
                *viewport_width = width;
                *viewport_height = height;
            }
        }
        self.ctx.check(result, "Batch::set_viewport_pixel_dimensions")
    }

    fn expect_free(&self) -> Result<()> {
        expect_layout(self.format.mode(), LayoutFlag::Free)
    }

    /// Write one tile.
    ///
    /// For full and sparse batches `(x, y)` is a grid coordinate and
    /// out-of-range coordinates are rejected. For free batches it is a pixel
    /// position; tiles entirely outside the viewport are skipped without
    /// error.
    ///
    /// Field values wider than their encoded width are truncated silently.
    pub fn set_tile(&mut self, x: i32, y: i32, tile: Tile) -> Result<()> {
        let result = self
            .format
            .validate(&tile)
            .and_then(|()| self.place(x, y, tile, false));
        self.ctx.check(result, "Batch::set_tile")
    }

    /// Like [`Batch::set_tile`], but rejects field values that would be
    /// truncated.
    pub fn set_tile_checked(&mut self, x: i32, y: i32, tile: Tile) -> Result<()> {
        let result = self
            .format
            .validate(&tile)
            .and_then(|()| self.place(x, y, tile, true));
        self.ctx.check(result, "Batch::set_tile_checked")
    }

    fn place(&mut self, x: i32, y: i32, tile: Tile, checked: bool) -> Result<()> {
        let Self {
            format,
            data,
            tile_count,
            shape,
            ..
        } = self;
        let record_size = format.size();

        match shape {
            Shape::Full {
                tiles_wide,
                tiles_tall,
            } => {
                let (col, row) = grid_cell(x, y, *tiles_wide, *tiles_tall)?;
                if checked {
                    format.validate_range((0, 0), &tile)?;
                }
                let offset = (row as usize * *tiles_wide as usize + col as usize) * record_size;
                format.write(data, offset, (0, 0), &tile);
            }
            Shape::Sparse {
                tiles_wide,
                tiles_tall,
                index,
            } => {
                let (col, row) = grid_cell(x, y, *tiles_wide, *tiles_tall)?;
                // Extents are capped at MAX_SPARSE_AXIS, so coordinates fit.
                let position = (col as u16, row as u16);
                if checked {
                    format.validate_range(position, &tile)?;
                }
                let slot = match index {
                    Some(index) => match index.slot(col, row) {
                        Some(slot) => slot,
                        None => {
                            let slot = *tile_count;
                            index.assign(col, row, slot);
                            *tile_count += 1;
                            slot
                        }
                    },
                    None => {
                        let capacity = cell_count(*tiles_wide, *tiles_tall);
                        if *tile_count >= capacity {
                            return Err(Error::TileOverflow {
                                max_tile_count: capacity,
                            });
                        }
                        *tile_count += 1;
                        *tile_count - 1
                    }
                };
                format.write(data, slot * record_size, position, &tile);
            }
            Shape::Free {
                tile_pixel_width,
                tile_pixel_height,
                viewport_width,
                viewport_height,
                max_tile_count,
            } => {
                if *tile_count >= *max_tile_count as usize {
                    return Err(Error::TileOverflow {
                        max_tile_count: *max_tile_count as usize,
                    });
                }
                let bias_x = i64::from(*tile_pixel_width);
                let bias_y = i64::from(*tile_pixel_height);
                let (px, py) = (i64::from(x), i64::from(y));
                if px < -bias_x
                    || py < -bias_y
                    || px >= i64::from(*viewport_width)
                    || py >= i64::from(*viewport_height)
                {
                    return Ok(());
                }
                let (stored_x, stored_y) = (px + bias_x, py + bias_y);
                if checked {
                    check_pixel("x", stored_x)?;
                    check_pixel("y", stored_y)?;
                    format.validate_range((0, 0), &tile)?;
                }
                let slot = *tile_count;
                *tile_count += 1;
                format.write(
                    data,
                    slot * record_size,
                    (stored_x as u16, stored_y as u16),
                    &tile,
                );
            }
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Read-back
    // ------------------------------------------------------------------

    /// Decode the tile stored for grid cell `(x, y)`.
    ///
    /// Returns `None` outside the grid, for sparse cells never written in
    /// this generation, and for free batches.
    #[must_use]
    pub fn tile(&self, x: u32, y: u32) -> Option<Tile> {
        match &self.shape {
            Shape::Full {
                tiles_wide,
                tiles_tall,
            } => {
                if x >= *tiles_wide || y >= *tiles_tall {
                    return None;
                }
                let offset = (y as usize * *tiles_wide as usize + x as usize) * self.format.size();
                self.format.decode(&self.data, offset).map(|r| r.tile)
            }
            Shape::Sparse {
                tiles_wide,
                tiles_tall,
                index,
            } => {
                if x >= *tiles_wide || y >= *tiles_tall {
                    return None;
                }
                let position = Some((x as u16, y as u16));
                let record = match index {
                    Some(index) => index.slot(x, y).and_then(|slot| self.record(slot)),
                    None => (0..self.tile_count)
                        .rev()
                        .filter_map(|slot| self.record(slot))
                        .find(|record| record.position == position),
                };
                record.map(|record| record.tile)
            }
            Shape::Free { .. } => None,
        }
    }

    /// Decode the record in `slot`, `None` past [`Batch::tile_count`].
    #[must_use]
    pub fn record(&self, slot: usize) -> Option<Record> {
        if slot >= self.tile_count {
            return None;
        }
        self.format.decode(&self.data, slot * self.format.size())
    }

    /// Decode every held record in storage order.
    pub fn records(&self) -> impl Iterator<Item = Record> + '_ {
        (0..self.tile_count).filter_map(move |slot| self.record(slot))
    }

    /// Decode free-batch records with their pixel positions.
    ///
    /// Empty for grid batches.
    pub fn free_tiles(&self) -> impl Iterator<Item = (i32, i32, Tile)> + '_ {
        let bias = self.tile_pixel_dimensions();
        self.records().filter_map(move |record| {
            let (bias_x, bias_y) = bias?;
            let (stored_x, stored_y) = record.position?;
            let x = i64::from(stored_x) - i64::from(bias_x);
            let y = i64::from(stored_y) - i64::from(bias_y);
            Some((i32::try_from(x).ok()?, i32::try_from(y).ok()?, record.tile))
        })
    }

    // ------------------------------------------------------------------
    // Rendering
    // ------------------------------------------------------------------

    /// The render-boundary description of this batch.
    #[must_use]
    pub fn view(&self) -> BatchView<'_> {
        let extent = match self.shape {
            Shape::Full {
                tiles_wide,
                tiles_tall,
            }
            | Shape::Sparse {
                tiles_wide,
                tiles_tall,
                ..
            } => BatchExtent::Tiles {
                tiles_wide,
                tiles_tall,
            },
            Shape::Free {
                tile_pixel_width,
                tile_pixel_height,
                viewport_width,
                viewport_height,
                ..
            } => BatchExtent::Pixels {
                viewport_width,
                viewport_height,
                tile_pixel_width,
                tile_pixel_height,
            },
        };
        BatchView {
            detail_mode: self.format.mode(),
            extent,
            tile_count: self.tile_count,
            data: self.tile_data(),
        }
    }

    /// Hand this batch to a renderer.
    pub fn draw_to<R: BatchRenderer + ?Sized>(&self, renderer: &mut R, dest: DestRect) {
        renderer.draw_batch(self.view(), dest);
    }
}

fn expect_layout(mode: DetailMode, expected: LayoutFlag) -> Result<()> {
    if mode.layout() == expected {
        Ok(())
    } else {
        Err(Error::LayoutMismatch { mode, expected })
    }
}

fn check_dimensions(tiles_wide: u32, tiles_tall: u32, max_axis: u32) -> Result<()> {
    if tiles_wide == 0 || tiles_tall == 0 || tiles_wide > max_axis || tiles_tall > max_axis {
        Err(Error::InvalidDimensions {
            width: tiles_wide,
            height: tiles_tall,
        })
    } else {
        Ok(())
    }
}

/// Glyph sizes are capped so the position bias fits a stored coordinate.
fn check_tile_pixel_dimensions(width: u32, height: u32) -> Result<()> {
    let max = u32::from(u16::MAX);
    if width == 0 || height == 0 || width > max || height > max {
        Err(Error::InvalidTilePixelDimensions { width, height })
    } else {
        Ok(())
    }
}

fn check_viewport_dimensions(width: u32, height: u32) -> Result<()> {
    if width == 0 || height == 0 {
        Err(Error::InvalidViewportDimensions { width, height })
    } else {
        Ok(())
    }
}

fn check_pixel(field: &'static str, stored: i64) -> Result<()> {
    if stored > i64::from(u16::MAX) {
        Err(Error::FieldOutOfRange {
            field,
            value: u32::try_from(stored).unwrap_or(u32::MAX),
            max: u32::from(u16::MAX),
        })
    } else {
        Ok(())
    }
}

fn cell_count(tiles_wide: u32, tiles_tall: u32) -> usize {
    tiles_wide as usize * tiles_tall as usize
}

/// A zero-filled buffer, or an error if it cannot be allocated.
fn zeroed_buffer(len: usize) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    buffer
        .try_reserve_exact(len)
        .map_err(|_| Error::AllocationFailed { bytes: len })?;
    buffer.resize(len, 0);
    Ok(buffer)
}

fn grid_bytes(record_size: usize, tiles_wide: u32, tiles_tall: u32) -> Result<usize> {
    (tiles_wide as usize)
        .checked_mul(tiles_tall as usize)
        .and_then(|cells| cells.checked_mul(record_size))
        .ok_or(Error::InvalidDimensions {
            width: tiles_wide,
            height: tiles_tall,
        })
}

fn free_bytes(record_size: usize, max_tile_count: u32) -> Result<usize> {
    if max_tile_count == 0 {
        return Err(Error::InvalidMaxTileCount(max_tile_count));
    }
    (max_tile_count as usize)
        .checked_mul(record_size)
        .ok_or(Error::InvalidMaxTileCount(max_tile_count))
}

fn grid_cell(x: i32, y: i32, tiles_wide: u32, tiles_tall: u32) -> Result<(u32, u32)> {
    match (u32::try_from(x), u32::try_from(y)) {
        (Ok(col), Ok(row)) if col < tiles_wide && row < tiles_tall => Ok((col, row)),
        _ => Err(Error::OutOfBounds {
            x,
            y,
            width: tiles_wide,
            height: tiles_tall,
        }),
    }
}
