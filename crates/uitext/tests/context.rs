//! The facade against whatever fonts the machine has

use uitext::prelude::*;
use uitext::{library, Bitmap, PixelMode};

#[test]
fn renders_a_title_with_system_fonts() {
    let ctx = TextContext::new(&Config::default());
    if ctx.families().is_empty() {
        eprintln!("Skipping test: no system fonts");
        return;
    }
    let Some(family) = ctx.families().into_iter().find(|family| {
        ctx.information_for_font_family(Some(family), FaceStyle::REGULAR)
            .ok()
            .and_then(|d| ctx.native_face_from_path(&d.path, d.index).ok())
            .is_some_and(|face| face.has_glyph('T'))
    }) else {
        eprintln!("Skipping test: no installed font draws 'T'");
        return;
    };
    ctx.set_main_face_family(&family, FaceStyle::REGULAR);

    let bg = Color::rgba(40, 42, 54, 255);
    let (width, height) = (200, 30);
    let mut pixels = vec![0u32; width * height];
    let mut canvas = Canvas::new(&mut pixels, width, height).unwrap();
    ctx.render_single_line("Tab 1", &LineParams::new(15, Color::white(), bg), &mut canvas)
        .unwrap();
    assert!(pixels.iter().any(|&p| p != bg.argb()));
}

#[test]
fn family_lookup_agrees_with_families() {
    let ctx = TextContext::new(&Config::default());
    let Some(family) = ctx.families().into_iter().next() else {
        eprintln!("Skipping test: no system fonts");
        return;
    };
    let descriptor = ctx
        .information_for_font_family(Some(&family), FaceStyle::REGULAR)
        .unwrap();
    assert!(descriptor.path.exists());
    let face = ctx
        .native_face_from_path(&descriptor.path, descriptor.index)
        .unwrap();
    assert!(face.units_per_em() > 0);
}

#[test]
fn mono_conversion_through_the_facade() {
    let ctx = TextContext::isolated(&Config::isolated([]));
    // 0b1010_0000: pixels 0 and 2 set, width 3
    let src = Bitmap::mono(3, 2, vec![0b1010_0000, 0b0100_0000]);
    let gray = ctx.convert_mono_bitmap(&src).unwrap();
    assert_eq!(gray.pixel_mode, PixelMode::Gray);
    assert_eq!(gray.row(0).unwrap()[..3], [255, 0, 255]);
    assert_eq!(gray.row(1).unwrap()[..3], [0, 255, 0]);
}

#[test]
fn library_is_process_wide() {
    assert!(std::sync::Arc::ptr_eq(&library(), &library()));
    let ctx = TextContext::new(&Config::isolated([]));
    assert!(std::sync::Arc::ptr_eq(ctx.engine(), &library()));
}
