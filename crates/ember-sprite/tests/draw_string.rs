//! Text submission tests: pen advance, line handling, block mirroring,
//! and the per-glyph affine transform.

use ember_render::{CapturingTarget, RectI, Texture2D};
use ember_sprite::{
    DrawParams, Glyph, SpriteBatch, SpriteBatchError, SpriteEffects, SpriteFont, SpriteSortMode,
};
use glam::Vec2;

fn glyph(
    character: char,
    bounds: RectI,
    cropping: RectI,
    left_side_bearing: f32,
    right_side_bearing: f32,
    width: f32,
) -> Glyph {
    Glyph {
        character,
        bounds,
        cropping,
        left_side_bearing,
        right_side_bearing,
        width,
    }
}

/// A tiny three-glyph font on a 16x8 atlas: line spacing 10, spacing 1.
fn test_font() -> SpriteFont {
    let atlas = Texture2D::with_label(16, 8, "test_atlas");
    let glyphs = vec![
        glyph('a', RectI::new(0, 0, 4, 5), RectI::new(1, 2, 6, 8), 1.0, 1.0, 4.0),
        glyph('b', RectI::new(4, 0, 4, 5), RectI::new(0, 1, 6, 8), 0.0, 0.0, 5.0),
        glyph('j', RectI::new(8, 0, 3, 6), RectI::new(0, 0, 4, 8), -2.0, 0.0, 3.0),
    ];
    SpriteFont::new(atlas, glyphs, 10.0, 1.0, None).unwrap()
}

fn new_batch() -> SpriteBatch<CapturingTarget> {
    SpriteBatch::new(CapturingTarget::new())
}

fn quad_tls(batch: &SpriteBatch<CapturingTarget>) -> Vec<[f32; 2]> {
    batch
        .target()
        .draws
        .iter()
        .flat_map(|d| {
            d.vertices
                .chunks(4)
                .map(|q| [q[0].position[0], q[0].position[1]])
        })
        .collect()
}

#[test]
fn pen_advances_by_bearings_and_spacing() {
    let font = test_font();
    let mut batch = new_batch();
    batch.begin(SpriteSortMode::Deferred).unwrap();
    batch
        .draw_string(&font, "ab", Vec2::new(100.0, 50.0), Vec2::ONE, &DrawParams::default())
        .unwrap();
    batch.end().unwrap();

    // 'a': pen starts at lsb 1, quad offset by cropping (1,2).
    // 'b': pen 1+4+1, then spacing 1 + lsb 0 = 7, cropping (0,1).
    assert_eq!(quad_tls(&batch), vec![[102.0, 52.0], [107.0, 51.0]]);
}

#[test]
fn glyph_uvs_come_from_atlas_bounds() {
    let font = test_font();
    let mut batch = new_batch();
    batch.begin(SpriteSortMode::Deferred).unwrap();
    batch
        .draw_string(&font, "b", Vec2::ZERO, Vec2::ONE, &DrawParams::default())
        .unwrap();
    batch.end().unwrap();

    let v = &batch.target().draws[0].vertices;
    // bounds (4,0,4,5) on a 16x8 atlas.
    assert_eq!(v[0].uv, [0.25, 0.0]);
    assert_eq!(v[3].uv, [0.5, 0.625]);
}

#[test]
fn newline_resets_pen_and_advances_line() {
    let font = test_font();
    let mut batch = new_batch();
    batch.begin(SpriteSortMode::Deferred).unwrap();
    batch
        .draw_string(&font, "a\nb", Vec2::new(100.0, 50.0), Vec2::ONE, &DrawParams::default())
        .unwrap();
    batch.end().unwrap();

    assert_eq!(quad_tls(&batch), vec![[102.0, 52.0], [100.0, 61.0]]);
}

#[test]
fn carriage_returns_are_ignored() {
    let font = test_font();
    let mut with_cr = new_batch();
    let mut without_cr = new_batch();
    with_cr.begin(SpriteSortMode::Deferred).unwrap();
    without_cr.begin(SpriteSortMode::Deferred).unwrap();
    with_cr
        .draw_string(&font, "a\r\nb\r", Vec2::ZERO, Vec2::ONE, &DrawParams::default())
        .unwrap();
    without_cr
        .draw_string(&font, "a\nb", Vec2::ZERO, Vec2::ONE, &DrawParams::default())
        .unwrap();
    with_cr.end().unwrap();
    without_cr.end().unwrap();

    assert_eq!(quad_tls(&with_cr), quad_tls(&without_cr));
}

#[test]
fn first_glyph_clamps_negative_left_bearing() {
    let font = test_font();
    let mut batch = new_batch();
    batch.begin(SpriteSortMode::Deferred).unwrap();
    // 'j' has lsb -2: clamped at line start, applied mid-line.
    batch
        .draw_string(&font, "jj\nj", Vec2::ZERO, Vec2::ONE, &DrawParams::default())
        .unwrap();
    batch.end().unwrap();

    let tls = quad_tls(&batch);
    // Line 1: first 'j' at pen 0 (clamped), second at 0+3+0 +1-2 = 2.
    assert_eq!(tls[0], [0.0, 0.0]);
    assert_eq!(tls[1], [2.0, 0.0]);
    // Line 2 starts clamped again.
    assert_eq!(tls[2], [0.0, 10.0]);
}

#[test]
fn one_item_per_visible_glyph() {
    let font = test_font();
    let mut batch = new_batch();
    batch.begin(SpriteSortMode::Deferred).unwrap();
    batch
        .draw_string(&font, "ab\r\nja", Vec2::ZERO, Vec2::ONE, &DrawParams::default())
        .unwrap();
    let stats = batch.end().unwrap();
    assert_eq!(stats.items, 4);
    // One atlas texture: everything coalesces into one submission.
    assert_eq!(stats.draw_calls, 1);
}

#[test]
fn missing_glyph_without_default_fails() {
    let font = test_font();
    let mut batch = new_batch();
    batch.begin(SpriteSortMode::Deferred).unwrap();
    assert_eq!(
        batch
            .draw_string(&font, "az", Vec2::ZERO, Vec2::ONE, &DrawParams::default())
            .unwrap_err(),
        SpriteBatchError::MissingGlyph('z')
    );
}

#[test]
fn immediate_mode_flushes_once_per_string() {
    let font = test_font();
    let mut batch = new_batch();
    batch.begin(SpriteSortMode::Immediate).unwrap();
    batch
        .draw_string(&font, "ab", Vec2::ZERO, Vec2::ONE, &DrawParams::default())
        .unwrap();
    batch
        .draw_string(&font, "a", Vec2::ZERO, Vec2::ONE, &DrawParams::default())
        .unwrap();
    let stats = batch.end().unwrap();

    // Two submissions, two instant flushes; glyphs within one string still
    // share a draw because they share the atlas.
    assert_eq!(batch.target().draws.len(), 2);
    assert_eq!(batch.target().draws[0].sprite_count(), 2);
    assert_eq!(stats.items, 3);
}

#[test]
fn horizontal_flip_mirrors_the_block() {
    let font = test_font();
    let mut batch = new_batch();
    batch.begin(SpriteSortMode::Deferred).unwrap();
    batch
        .draw_string(
            &font,
            "a",
            Vec2::new(100.0, 50.0),
            Vec2::ONE,
            &DrawParams {
                effects: SpriteEffects::FLIP_HORIZONTALLY,
                ..DrawParams::default()
            },
        )
        .unwrap();
    batch.end().unwrap();

    let v = &batch.target().draws[0].vertices;
    // measure("a") is 6 wide; the unflipped quad spans x 102..106, the
    // mirrored one 100..104 at the same height.
    assert_eq!(v[0].position[0], 100.0);
    assert_eq!(v[1].position[0], 104.0);
    assert_eq!(v[0].position[1], 52.0);
    // Per-glyph mirroring happens in UV space.
    assert_eq!(v[0].uv[0], 0.25);
    assert_eq!(v[1].uv[0], 0.0);
}

#[test]
fn vertical_flip_mirrors_the_block() {
    let font = test_font();
    let mut batch = new_batch();
    batch.begin(SpriteSortMode::Deferred).unwrap();
    batch
        .draw_string(
            &font,
            "a",
            Vec2::new(100.0, 50.0),
            Vec2::ONE,
            &DrawParams {
                effects: SpriteEffects::FLIP_VERTICALLY,
                ..DrawParams::default()
            },
        )
        .unwrap();
    batch.end().unwrap();

    let v = &batch.target().draws[0].vertices;
    // Unflipped quad spans y 52..57 in a 10-tall line; mirrored 53..58.
    assert_eq!(v[0].position[1], 53.0);
    assert_eq!(v[2].position[1], 58.0);
    assert_eq!(v[0].position[0], 102.0);
}

#[test]
fn rotated_text_transforms_each_glyph_offset() {
    let font = test_font();
    let mut batch = new_batch();
    batch.begin(SpriteSortMode::Deferred).unwrap();
    batch
        .draw_string(
            &font,
            "b",
            Vec2::new(100.0, 50.0),
            Vec2::ONE,
            &DrawParams {
                rotation: std::f32::consts::FRAC_PI_2,
                ..DrawParams::default()
            },
        )
        .unwrap();
    batch.end().unwrap();

    let v = &batch.target().draws[0].vertices;
    let tol = 1.0e-4;
    // Quarter turn: the glyph offset (0,1) lands at (-1,0) from the anchor,
    // the glyph width extends along +y, the height along -x.
    assert!((v[0].position[0] - 99.0).abs() < tol);
    assert!((v[0].position[1] - 50.0).abs() < tol);
    assert!((v[1].position[0] - 99.0).abs() < tol);
    assert!((v[1].position[1] - 54.0).abs() < tol);
    assert!((v[2].position[0] - 94.0).abs() < tol);
    assert!((v[2].position[1] - 50.0).abs() < tol);
}

#[test]
fn scaled_text_scales_offsets_and_quads() {
    let font = test_font();
    let mut batch = new_batch();
    batch.begin(SpriteSortMode::Deferred).unwrap();
    batch
        .draw_string(
            &font,
            "a",
            Vec2::new(10.0, 10.0),
            Vec2::splat(2.0),
            &DrawParams::default(),
        )
        .unwrap();
    batch.end().unwrap();

    let v = &batch.target().draws[0].vertices;
    // Offset (2,2) and quad (4x5) both double.
    assert_eq!(v[0].position[0], 14.0);
    assert_eq!(v[0].position[1], 14.0);
    assert_eq!(v[3].position[0], 22.0);
    assert_eq!(v[3].position[1], 24.0);
}
