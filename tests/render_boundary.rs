//! Batches handed to a renderer through the `BatchRenderer` trait.

use tuic_batch::{
    Batch, BatchExtent, BatchOptions, BatchRenderer, BatchView, DebugContext, DestRect,
    DetailMode, Tile, TileColors,
};

/// Records every draw call it receives.
#[derive(Default)]
struct RecordingRenderer {
    draws: Vec<(DetailMode, BatchExtent, usize, Vec<u8>, DestRect)>,
}

impl BatchRenderer for RecordingRenderer {
    fn draw_batch(&mut self, view: BatchView<'_>, dest: DestRect) {
        self.draws.push((
            view.detail_mode,
            view.extent,
            view.tile_count,
            view.data.to_vec(),
            dest,
        ));
    }
}

#[test]
fn sparse_batch_view() {
    let ctx = DebugContext::new();
    let mode: DetailMode = "G8_C8NBG_SPARSE".parse().unwrap();
    let mut batch = Batch::sparse(&ctx, mode, 40, 20, BatchOptions::default()).unwrap();
    batch
        .set_tile(1, 2, Tile::new(3, TileColors::IndexedFg(4)))
        .unwrap();

    let mut renderer = RecordingRenderer::default();
    let dest = DestRect::new(0.0, 0.0, 320.0, 320.0);
    batch.draw_to(&mut renderer, dest);

    assert_eq!(renderer.draws.len(), 1);
    let (drawn_mode, extent, count, data, drawn_dest) = &renderer.draws[0];
    assert_eq!(*drawn_mode, mode);
    assert_eq!(
        *extent,
        BatchExtent::Tiles {
            tiles_wide: 40,
            tiles_tall: 20
        }
    );
    assert_eq!(*count, 1);
    assert_eq!(data, &[1, 2, 3, 4]);
    assert_eq!(*drawn_dest, dest);
}

#[test]
fn free_batch_view() {
    let ctx = DebugContext::new();
    let mode: DetailMode = "G16_C0_FREE".parse().unwrap();
    let mut batch = Batch::free(&ctx, mode, (8, 8), (64, 64), 4, BatchOptions::default()).unwrap();
    batch.set_tile(0, 0, Tile::glyph(0x0102)).unwrap();

    let view = batch.view();
    assert_eq!(
        view.extent,
        BatchExtent::Pixels {
            viewport_width: 64,
            viewport_height: 64,
            tile_pixel_width: 8,
            tile_pixel_height: 8
        }
    );
    assert_eq!(view.data, &[8, 0, 8, 0, 2, 1]);

    let mut renderer = RecordingRenderer::default();
    let mut by_ref = &mut renderer;
    batch.draw_to(&mut by_ref, DestRect::default());
    batch.clear();
    batch.draw_to(&mut renderer, DestRect::default());
    assert_eq!(renderer.draws.len(), 2);
    assert_eq!(renderer.draws[1].2, 0);
    assert!(renderer.draws[1].3.is_empty());
}

#[test]
fn full_batch_view_covers_grid() {
    let ctx = DebugContext::new();
    let mode: DetailMode = "G8_C4_FULL".parse().unwrap();
    let batch = Batch::full(&ctx, mode, 3, 2, BatchOptions::default()).unwrap();
    let view = batch.view();
    assert_eq!(view.tile_count, 6);
    assert_eq!(view.data.len(), 12);
    assert_eq!(view.data, batch.data());
}
