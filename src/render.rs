//! Renderer boundary.
//!
//! Backends never see a [`Batch`](crate::Batch) directly. They receive a
//! [`BatchView`]: the detail mode, the batch extent, the number of records to
//! read and the raw record bytes, together with a destination rectangle.

use crate::detail::DetailMode;

/// Destination rectangle in target pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DestRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl DestRect {
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Extent of a batch as seen by a renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BatchExtent {
    /// Grid batches (full and sparse layouts).
    Tiles { tiles_wide: u32, tiles_tall: u32 },
    /// Free batches: viewport and glyph size in pixels.
    Pixels {
        viewport_width: u32,
        viewport_height: u32,
        tile_pixel_width: u32,
        tile_pixel_height: u32,
    },
}

/// Read-only description of a batch handed to a renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BatchView<'a> {
    pub detail_mode: DetailMode,
    pub extent: BatchExtent,
    /// Records to read from `data`. Equals the cell count for full batches.
    pub tile_count: usize,
    /// Exactly `tile_count` records.
    pub data: &'a [u8],
}

/// A backend that can draw batches.
pub trait BatchRenderer {
    fn draw_batch(&mut self, view: BatchView<'_>, dest: DestRect);
}

impl<R: BatchRenderer + ?Sized> BatchRenderer for &mut R {
    fn draw_batch(&mut self, view: BatchView<'_>, dest: DestRect) {
        (**self).draw_batch(view, dest);
    }
}
