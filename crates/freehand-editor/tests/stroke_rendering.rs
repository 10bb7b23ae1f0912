//! Integration tests: stroke renderer over the raster surface (freehand-editor).
//!
//! Drives `StrokeRenderer` the way the browser bridge does and inspects the
//! resulting pixels and PNG exports.

use freehand_core::*;
use freehand_editor::{InputEvent, PointerButton, StrokeRenderer};

fn make_renderer(css_width: f64, css_height: f64, dpr: f64) -> StrokeRenderer<RasterSurface> {
    let _ = env_logger::builder().is_test(true).try_init();
    let config = SketchConfig {
        presets: vec!["#ff0000".into(), "#0000ff".into()],
        ..SketchConfig::default()
    };
    let mut renderer = StrokeRenderer::new(RasterSurface::new(), &config);
    renderer.resize(SurfaceLayout::new(css_width, css_height, dpr));
    renderer
}

fn alpha(renderer: &StrokeRenderer<RasterSurface>, x: u32, y: u32) -> u8 {
    renderer.surface().pixel(x, y).map_or(0, |p| p[3])
}

/// Sum of coverage down one pixel column, in pixels.
fn column_coverage(renderer: &StrokeRenderer<RasterSurface>, x: u32) -> f64 {
    let (_, height) = renderer.surface().size();
    (0..height)
        .map(|y| f64::from(alpha(renderer, x, y)) / 255.0)
        .sum()
}

fn decode_rgba(png_bytes: &[u8]) -> (u32, u32, Vec<u8>) {
    let decoder = png::Decoder::new(std::io::Cursor::new(png_bytes));
    let mut reader = decoder.read_info().unwrap();
    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf).unwrap();
    buf.truncate(info.buffer_size());
    (info.width, info.height, buf)
}

// ─── Stroke geometry ────────────────────────────────────────────────────

#[test]
fn red_segment_scenario() {
    let mut r = make_renderer(100.0, 20.0, 1.0);
    r.set_brush_size("5");
    r.set_brush_color("red").unwrap();

    r.begin_stroke(10.0, 10.0);
    assert!(r.extend_stroke(50.0, 10.0));

    // Solid red along the segment, ≈5px tall.
    for x in [12, 30, 48] {
        assert_eq!(r.surface().pixel(x, 10), Some([255, 0, 0, 255]), "x={x}");
    }
    assert_eq!(alpha(&r, 30, 8), 255);
    assert_eq!(alpha(&r, 30, 11), 255);
    assert_eq!(alpha(&r, 30, 6), 0);
    assert_eq!(alpha(&r, 30, 13), 0);
    assert!((column_coverage(&r, 30) - 5.0).abs() < 0.5);

    // Nothing past the round caps.
    assert_eq!(alpha(&r, 5, 10), 0);
    assert_eq!(alpha(&r, 55, 10), 0);

    r.end_stroke();
    assert!(!r.extend_stroke(90.0, 10.0));
    assert_eq!(alpha(&r, 70, 10), 0);
    assert_eq!(alpha(&r, 89, 10), 0);
}

#[test]
fn stroke_width_matches_brush_size() {
    for n in 1..=16u32 {
        let mut r = make_renderer(100.0, 40.0, 1.0);
        r.set_brush_size(&n.to_string());
        r.begin_stroke(10.0, 20.0);
        r.extend_stroke(90.0, 20.0);
        let coverage = column_coverage(&r, 50);
        assert!(
            (coverage - f64::from(n)).abs() < 0.5,
            "brush {n}: coverage {coverage}"
        );
    }
}

#[test]
fn stroke_width_scales_with_pixel_ratio() {
    let mut r = make_renderer(50.0, 20.0, 2.0);
    r.set_brush_size("4");
    r.begin_stroke(5.0, 10.0);
    r.extend_stroke(45.0, 10.0);
    // 4 CSS px on a 2x display = 8 physical rows.
    let coverage = column_coverage(&r, 50);
    assert!((coverage - 8.0).abs() < 0.5, "coverage {coverage}");
}

#[test]
fn largest_brush_covers_whole_surface() {
    let mut r = make_renderer(40.0, 40.0, 1.0);
    assert_eq!(r.set_brush_size("99999999999"), BrushSize::MAX);
    r.begin_stroke(5.0, 5.0);
    assert!(r.extend_stroke(30.0, 30.0));
    for (x, y) in [(0, 0), (39, 0), (0, 39), (39, 39), (20, 20)] {
        assert_eq!(alpha(&r, x, y), 255, "({x}, {y})");
    }
}

#[test]
fn extend_without_begin_leaves_surface_blank() {
    let mut r = make_renderer(60.0, 60.0, 1.0);
    r.set_brush_size("20");
    for (x, y) in [(10.0, 10.0), (50.0, 50.0), (10.0, 50.0)] {
        assert!(!r.extend_stroke(x, y));
    }
    assert!(r.surface().is_blank());
}

#[test]
fn consecutive_segments_join() {
    let mut r = make_renderer(60.0, 60.0, 1.0);
    r.set_brush_size("6");
    r.begin_stroke(10.0, 10.0);
    r.extend_stroke(50.0, 10.0);
    r.extend_stroke(50.0, 50.0);
    assert_eq!(alpha(&r, 30, 10), 255);
    assert_eq!(alpha(&r, 50, 30), 255);
    // Outside of the corner is filled round, not beveled.
    assert_eq!(alpha(&r, 51, 9), 255);
}

// ─── Input mapping ──────────────────────────────────────────────────────

#[test]
fn mouse_and_touch_sequences() {
    let mut r = make_renderer(100.0, 100.0, 1.0);
    r.set_brush_size("4");

    let mouse = [
        InputEvent::from_pointer_down(10.0, 10.0, PointerButton::Primary),
        InputEvent::from_pointer_move(40.0, 10.0),
        InputEvent::PointerUp,
        InputEvent::from_pointer_move(90.0, 10.0),
    ];
    let drawn: Vec<bool> = mouse.iter().map(|e| r.handle(e)).collect();
    assert_eq!(drawn, vec![false, true, false, false]);

    let touch = [
        InputEvent::TouchStart { touch: Some((10.0, 60.0)) },
        InputEvent::TouchMove { touch: Some((40.0, 60.0)) },
        InputEvent::TouchEnd,
        InputEvent::TouchMove { touch: Some((90.0, 60.0)) },
    ];
    assert!(touch.iter().all(InputEvent::suppresses_default));
    let drawn: Vec<bool> = touch.iter().map(|e| r.handle(e)).collect();
    assert_eq!(drawn, vec![false, true, false, false]);

    assert_eq!(alpha(&r, 25, 10), 255);
    assert_eq!(alpha(&r, 25, 60), 255);
    assert_eq!(alpha(&r, 70, 10), 0);
    assert_eq!(alpha(&r, 70, 60), 0);
}

// ─── Surface lifecycle ──────────────────────────────────────────────────

#[test]
fn clear_then_export_is_fully_transparent() {
    let mut r = make_renderer(30.0, 20.0, 2.0);
    r.set_brush_size("8");
    r.begin_stroke(0.0, 0.0);
    r.extend_stroke(30.0, 20.0);
    r.clear();

    let export = r.export_png().unwrap();
    assert_eq!(export.filename, "my-drawing.png");
    let (w, h, pixels) = decode_rgba(&export.png_bytes().unwrap());
    assert_eq!((w, h), (60, 40));
    assert!(pixels.chunks_exact(4).all(|px| px[3] == 0));
}

#[test]
fn clear_preserves_brush() {
    let mut r = make_renderer(30.0, 30.0, 1.0);
    r.set_brush_size("9");
    r.set_brush_color("#123456").unwrap();
    r.clear();
    assert_eq!(r.brush().size.get(), 9);
    assert_eq!(r.brush().color.to_hex(), "#123456");
}

#[test]
fn resize_resets_to_blank_buffer_of_new_size() {
    let mut r = make_renderer(50.0, 50.0, 1.0);
    r.begin_stroke(5.0, 5.0);
    r.extend_stroke(45.0, 45.0);
    assert!(!r.surface().is_blank());

    r.resize(SurfaceLayout::new(120.0, 80.0, 1.5));
    assert_eq!(r.surface().size(), (180, 120));
    assert!(r.surface().is_blank());

    let (w, h, _) = decode_rgba(&r.export_png().unwrap().png_bytes().unwrap());
    assert_eq!((w, h), (180, 120));
}

#[test]
fn zero_size_surface_degrades_silently() {
    let mut r = make_renderer(0.0, 0.0, 1.0);
    r.begin_stroke(1.0, 1.0);
    // The segment is accepted, the surface just has no pixels.
    assert!(r.extend_stroke(5.0, 5.0));
    r.clear();
    assert!(matches!(
        r.export_png(),
        Err(SketchError::EmptySurface { .. })
    ));
}

// ─── Colors ─────────────────────────────────────────────────────────────

#[test]
fn preset_then_custom_color() {
    let mut r = make_renderer(100.0, 60.0, 1.0);
    r.set_brush_size("6");

    assert_eq!(r.select_preset(0).map(|c| c.to_hex()), Some("#FF0000".into()));
    assert_eq!(r.palette().active(), Some(0));
    r.begin_stroke(10.0, 10.0);
    r.extend_stroke(90.0, 10.0);
    r.end_stroke();

    assert_eq!(r.set_brush_color("#00ff00").unwrap().to_hex(), "#00FF00");
    assert_eq!(r.palette().active(), None);
    r.begin_stroke(10.0, 30.0);
    r.extend_stroke(90.0, 30.0);
    r.end_stroke();

    r.select_preset(1);
    assert!(r.palette().is_active(1));
    assert!(!r.palette().is_active(0));
    r.begin_stroke(10.0, 50.0);
    r.extend_stroke(90.0, 50.0);

    assert_eq!(r.surface().pixel(50, 10), Some([255, 0, 0, 255]));
    assert_eq!(r.surface().pixel(50, 30), Some([0, 255, 0, 255]));
    assert_eq!(r.surface().pixel(50, 50), Some([0, 0, 255, 255]));
}

#[test]
fn brush_change_mid_stroke_applies_to_next_segment() {
    let mut r = make_renderer(100.0, 40.0, 1.0);
    r.set_brush_size("6");
    r.set_brush_color("#000000").unwrap();
    r.begin_stroke(10.0, 20.0);
    r.extend_stroke(40.0, 20.0);
    r.set_brush_color("#ffffff").unwrap();
    r.extend_stroke(90.0, 20.0);

    assert_eq!(r.surface().pixel(20, 20), Some([0, 0, 0, 255]));
    assert_eq!(r.surface().pixel(70, 20), Some([255, 255, 255, 255]));
}
