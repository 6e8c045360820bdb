//! Resolver behavior against the fonts installed on this machine
//!
//! Each test skips when the machine has no fonts at all.

use std::path::PathBuf;

use uitext_core::{error::ResolveError, Config, FaceStyle, FontResolver, UitextError};
use uitext_fontdb::SystemFontResolver;

fn system() -> Option<SystemFontResolver> {
    let resolver = SystemFontResolver::new(&Config {
        font_dirs: Vec::new(),
        ..Config::default()
    });
    if resolver.face_count() == 0 {
        eprintln!("Skipping test: no system fonts installed");
        return None;
    }
    Some(resolver)
}

#[test]
fn unknown_family_is_not_found() {
    let Some(resolver) = system() else { return };
    let err = resolver
        .information_for_font_family(Some("No Such Family 7f3a9"), FaceStyle::REGULAR)
        .unwrap_err();
    match err {
        UitextError::Resolve(ResolveError::FamilyNotFound(name)) => {
            assert_eq!(name, "No Such Family 7f3a9")
        },
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn family_match_ignores_case() {
    let Some(resolver) = system() else { return };
    let families = resolver.families();
    let family = &families[0];
    let shouted = family.to_ascii_uppercase();
    let descriptor = resolver
        .information_for_font_family(Some(&shouted), FaceStyle::REGULAR)
        .unwrap();
    assert!(descriptor.family.eq_ignore_ascii_case(family));
    assert!(descriptor.path.is_file());
}

#[test]
fn families_are_sorted_and_unique() {
    let Some(resolver) = system() else { return };
    let families = resolver.families();
    assert!(!families.is_empty());
    assert!(families.windows(2).all(|pair| pair[0] < pair[1]));
}

#[test]
fn descriptors_carry_configured_hinting() {
    let config = Config {
        hinting: false,
        hintstyle: uitext_core::HintStyle::Full,
        ..Config::default()
    };
    let resolver = SystemFontResolver::new(&config);
    let Some(family) = resolver.families().into_iter().next() else {
        eprintln!("Skipping test: no system fonts installed");
        return;
    };
    let descriptor = resolver
        .information_for_font_family(Some(&family), FaceStyle::BOLD)
        .unwrap();
    assert!(!descriptor.hinting);
    assert_eq!(descriptor.hintstyle, uitext_core::HintStyle::Full);
}

#[test]
fn main_face_is_used_when_family_is_omitted() {
    let Some(resolver) = system() else { return };
    let family = resolver.families().remove(0);
    resolver.set_main_face_family(&family, FaceStyle::REGULAR);
    let descriptor = resolver
        .information_for_font_family(None, FaceStyle::REGULAR)
        .unwrap();
    assert!(descriptor.family.eq_ignore_ascii_case(&family));
}

#[test]
fn fallback_finds_basic_latin() {
    let Some(resolver) = system() else { return };
    match resolver.fallback_font('a', None, FaceStyle::REGULAR, false) {
        Ok(descriptor) => assert!(descriptor.path.is_file()),
        Err(err) => eprintln!("Skipping assertion: {err}"),
    }
}

#[test]
fn fallback_prefers_color_when_asked() {
    let Some(resolver) = system() else { return };
    let emoji = '\u{1F600}';
    let Ok(plain) = resolver.fallback_font(emoji, None, FaceStyle::REGULAR, false) else {
        eprintln!("Skipping test: nothing covers U+1F600");
        return;
    };
    let colorful = resolver
        .fallback_font(emoji, None, FaceStyle::REGULAR, true)
        .unwrap();
    // A monochrome face only wins the color ranking when no color face covers it
    if !colorful.is_color {
        assert!(!plain.is_color);
    }
    // And color faces only win the plain ranking when nothing else covers it
    if plain.is_color {
        assert!(colorful.is_color);
    }
}

#[test]
fn isolated_directory_only_sees_its_fonts() {
    let Some(system) = system() else { return };
    let Some(source) = system.database().faces().find_map(|face| match &face.source {
        fontdb::Source::File(path) if path.extension().is_some_and(|e| e == "ttf") => {
            Some(path.clone())
        },
        _ => None,
    }) else {
        eprintln!("Skipping test: no .ttf file installed");
        return;
    };

    let dir: PathBuf = std::env::temp_dir().join(format!("uitext-fontdb-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::copy(&source, dir.join("only.ttf")).unwrap();

    let resolver = SystemFontResolver::new(&Config::isolated([dir.clone()]));
    assert!(resolver.face_count() >= 1);
    assert!(resolver.face_count() < system.face_count() || system.face_count() == 1);
    let _ = std::fs::remove_dir_all(&dir);
}
