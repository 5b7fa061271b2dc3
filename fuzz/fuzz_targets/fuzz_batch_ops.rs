//! Fuzz target for batch mutation sequences.
//!
//! Applies arbitrary operations to a batch and checks the size invariants
//! after each one. No sequence may panic.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use tuic_batch::{Batch, BatchOptions, DebugContext, DetailMode, Tile};

#[derive(Arbitrary, Debug)]
enum Op {
    SetTile { x: i32, y: i32, glyph: u16 },
    SetTileChecked { x: i32, y: i32, glyph: u16 },
    Clear,
    Resize { w: u16, h: u16, reserve_extra: bool },
    SetMaxTileCount { count: u16, reserve_extra: bool },
    SetTilePixels { w: u8, h: u8 },
    SetViewport { w: u16, h: u16 },
}

#[derive(Arbitrary, Debug)]
struct Input {
    mode_index: u8,
    width: u8,
    height: u8,
    use_stencil: bool,
    ops: Vec<Op>,
}

fuzz_target!(|input: Input| {
    let modes: Vec<_> = DetailMode::all().collect();
    let mode = modes[usize::from(input.mode_index) % modes.len()];
    let ctx = DebugContext::new();
    let options = BatchOptions::default().with_stencil(input.use_stencil);
    let (w, h) = (u32::from(input.width).max(1), u32::from(input.height).max(1));

    let batch = match mode.layout() {
        tuic_batch::LayoutFlag::Full => Batch::full(&ctx, mode, w, h, options),
        tuic_batch::LayoutFlag::Sparse => Batch::sparse(&ctx, mode, w, h, options),
        tuic_batch::LayoutFlag::Free => Batch::free(&ctx, mode, (8, 16), (w * 8, h * 16), w, options),
    };
    let Ok(mut batch) = batch else {
        return;
    };

    for op in input.ops.into_iter().take(256) {
        let tile = |glyph| Tile::new(glyph, tuic_batch::TileColors::zeroed(mode.color()));
        let _ = match op {
            Op::SetTile { x, y, glyph } => batch.set_tile(x, y, tile(glyph)),
            Op::SetTileChecked { x, y, glyph } => batch.set_tile_checked(x, y, tile(glyph)),
            Op::Clear => {
                batch.clear();
                Ok(())
            }
            Op::Resize { w, h, reserve_extra } => {
                batch.set_tile_dimensions(u32::from(w % 512), u32::from(h % 512), reserve_extra)
            }
            Op::SetMaxTileCount { count, reserve_extra } => {
                batch.set_max_tile_count(u32::from(count % 4096), reserve_extra)
            }
            Op::SetTilePixels { w, h } => batch.set_tile_pixel_dimensions(w.into(), h.into()),
            Op::SetViewport { w, h } => batch.set_viewport_pixel_dimensions(w.into(), h.into()),
        };

        assert!(batch.data_size() <= batch.reserved_size());
        assert!(batch.tile_count() <= batch.max_tile_count());
        assert_eq!(batch.tile_data().len(), batch.tile_count() * batch.bytes_per_tile());
        assert_eq!(batch.records().count(), batch.tile_count());
    }
});
