//! Detail mode catalogue: validity, names, raw bits and record sizes.

use tuic_batch::blend::raw_modes_compatible;
use tuic_batch::detail::{detail_flag_is_valid, tile_record_size};
use tuic_batch::{
    BlendMode, ColorFlag, DetailFlags, DetailMode, Error, GlyphFlag, LayoutFlag, modes_compatible,
};

// ============================================================================
// Catalogue
// ============================================================================

#[test]
fn catalogue_has_75_modes() {
    let modes: Vec<_> = DetailMode::all().collect();
    assert_eq!(modes.len(), 75);
    for layout in LayoutFlag::ALL {
        assert_eq!(modes.iter().filter(|m| m.layout() == layout).count(), 25);
    }
}

#[test]
fn record_sizes() {
    let table = GlyphFlag::ALL
        .into_iter()
        .flat_map(|glyph| {
            ColorFlag::ALL.into_iter().filter_map(move |color| {
                tile_record_size(glyph, color).map(|size| format!("{glyph}_{color} {size}"))
            })
        })
        .collect::<Vec<_>>()
        .join("\n");

    insta::assert_snapshot!(table, @r"
    G0_C8NBG 1
    G0_C24NBG 3
    G0_C32NBG 4
    G8_C0 1
    G8_C4 2
    G8_C8 3
    G8_C8NBG 2
    G8_C8NFG 2
    G8_C24 7
    G8_C24NBG 4
    G8_C24NFG 4
    G8_C32 9
    G8_C32NBG 5
    G8_C32NFG 5
    G16_C0 2
    G16_C4 3
    G16_C8 4
    G16_C8NBG 3
    G16_C8NFG 3
    G16_C24 8
    G16_C24NBG 5
    G16_C24NFG 5
    G16_C32 10
    G16_C32NBG 6
    G16_C32NFG 6
    ");
}

#[test]
fn glyphless_needs_single_color() {
    assert!(DetailMode::new(GlyphFlag::G0, ColorFlag::C0, LayoutFlag::Full).is_none());
    assert!(DetailMode::new(GlyphFlag::G0, ColorFlag::C8, LayoutFlag::Full).is_none());
    assert!(DetailMode::new(GlyphFlag::G0, ColorFlag::C8Nfg, LayoutFlag::Full).is_none());
    assert!(DetailMode::new(GlyphFlag::G0, ColorFlag::C24Nbg, LayoutFlag::Free).is_some());
}

// ============================================================================
// Names and bits
// ============================================================================

#[test]
fn names_round_trip() {
    for mode in DetailMode::all() {
        let name = mode.to_string();
        assert_eq!(name.parse::<DetailMode>(), Ok(mode), "{name}");
    }
    assert_eq!(
        DetailMode::new(GlyphFlag::G8, ColorFlag::C4, LayoutFlag::Full)
            .unwrap()
            .to_string(),
        "G8_C4_FULL"
    );
}

#[test]
fn bad_names_are_rejected() {
    for name in ["", "G8_C4", "G8_C4_FULL_X", "G9_C4_FULL", "G0_C0_FULL", "g8_c4_full"] {
        assert_eq!(
            name.parse::<DetailMode>(),
            Err(Error::UnknownName(name.to_string())),
            "{name:?}"
        );
    }
}

#[test]
fn raw_bits() {
    let mode = DetailMode::new(GlyphFlag::G8, ColorFlag::C4, LayoutFlag::Full).unwrap();
    assert_eq!(mode.bits(), 2 | 16 | 16384);
    assert_eq!(u32::from(mode), mode.bits());
    assert_eq!(DetailMode::try_from(mode.bits()), Ok(mode));
    assert!(DetailMode::is_valid(mode.bits()));

    let both_glyphs = mode.bits() | DetailFlags::G16.bits();
    assert!(!DetailMode::is_valid(both_glyphs));
    assert_eq!(
        DetailMode::try_from(both_glyphs),
        Err(Error::InvalidDetailMode(both_glyphs))
    );
    assert!(!DetailMode::is_valid(1 << 20 | mode.bits()));
    assert!(!DetailMode::is_valid(0));
}

#[test]
fn single_flags() {
    assert!(detail_flag_is_valid(DetailFlags::C24NFG.bits()));
    assert!(detail_flag_is_valid(DetailFlags::SPARSE.bits()));
    assert!(!detail_flag_is_valid(0));
    assert!(!detail_flag_is_valid(
        (DetailFlags::G8 | DetailFlags::G16).bits()
    ));
    assert_eq!(DetailFlags::C8NBG.flag_name(), Some("C8NBG"));
    assert_eq!(DetailFlags::from_flag_name("FREE"), Some(DetailFlags::FREE));
}

#[test]
fn decompose_matches_parts() {
    for mode in DetailMode::all() {
        let (glyph, color, layout) = mode.decompose();
        assert_eq!(DetailMode::new(glyph, color, layout), Some(mode));
        assert!(mode.has_flag(glyph.flag() | layout.flag()));
        assert_eq!(mode.requires_atlas(), glyph != GlyphFlag::G0);
    }
}

// ============================================================================
// Blend compatibility
// ============================================================================

#[test]
fn special_modes_only_blend_normally() {
    let glyphless: DetailMode = "G0_C32NBG_FREE".parse().unwrap();
    let colorless: DetailMode = "G16_C0_SPARSE".parse().unwrap();
    let regular: DetailMode = "G8_C24_FULL".parse().unwrap();

    for blend in BlendMode::ALL {
        let normal = blend == BlendMode::Normal;
        assert_eq!(modes_compatible(glyphless, blend), normal, "{blend}");
        assert_eq!(modes_compatible(colorless, blend), normal, "{blend}");
        assert_eq!(modes_compatible(regular, blend), !normal, "{blend}");
    }
}

#[test]
fn raw_blend_values() {
    let regular: DetailMode = "G8_C8_FULL".parse().unwrap();
    assert!(raw_modes_compatible(regular.bits(), BlendMode::FgRed as u8));
    assert!(!raw_modes_compatible(regular.bits(), 0));
    assert!(!raw_modes_compatible(regular.bits(), 10));
    assert!(!raw_modes_compatible(0, BlendMode::Normal as u8));
}
