//! Fuzz target for record decoding.
//!
//! Decodes arbitrary bytes under every detail mode and checks that whatever
//! decodes re-encodes to the same bytes.

#![no_main]

use libfuzzer_sys::fuzz_target;
use tuic_batch::DetailMode;
use tuic_batch::codec::{PositionPrefix, RecordFormat};

fuzz_target!(|data: &[u8]| {
    for mode in DetailMode::all() {
        let prefixes = match mode.layout() {
            tuic_batch::LayoutFlag::Full => vec![PositionPrefix::None],
            tuic_batch::LayoutFlag::Sparse => vec![
                PositionPrefix::for_grid(10, 10),
                PositionPrefix::for_grid(300, 10),
                PositionPrefix::for_grid(300, 300),
            ],
            tuic_batch::LayoutFlag::Free => vec![PositionPrefix::Pixel],
        };
        for prefix in prefixes {
            let format = RecordFormat::new(mode, prefix);
            let Some(record) = format.decode(data, 0) else {
                continue;
            };
            let mut out = vec![0u8; format.size()];
            format
                .encode(&mut out, 0, record.position.unwrap_or((0, 0)), &record.tile)
                .expect("decoded tile matches its format");
            assert_eq!(&out[..], &data[..format.size()]);
        }
    }

    // Raw mode bits must never panic
    if data.len() >= 4 {
        let bits = u32::from_le_bytes([data[0], data[1], data[2], data[3]]);
        let _ = DetailMode::from_bits(bits);
    }
});
