use std::time::Duration;

use super::*;
use crate::assets::decode::solid_image;
use crate::assets::loader::MemoryLoader;
use crate::foundation::core::Rgba8;

const RED: Rgba8 = Rgba8::new(255, 0, 0, 255);
const GREEN: Rgba8 = Rgba8::new(0, 255, 0, 255);
const BLUE: Rgba8 = Rgba8::new(0, 0, 255, 255);
const YELLOW: Rgba8 = Rgba8::new(255, 255, 0, 255);

fn rgby_store() -> ImageSlotStore {
    let mut store = ImageSlotStore::new();
    for c in [RED, GREEN, BLUE, YELLOW] {
        store.push(RasterSource::decoded(solid_image(8, 8, c))).unwrap();
    }
    store
}

fn editor() -> CollageEditor {
    let opts = EditorOpts::default().with_decode_timeout(Duration::from_secs(10));
    CollageEditor::new(opts, Box::new(MemoryLoader::new()))
}

fn assert_rgb(px: Option<[u8; 4]>, c: Rgba8) {
    let px = px.unwrap();
    for (got, want) in px.iter().zip([c.r, c.g, c.b, c.a]) {
        assert!(got.abs_diff(want) <= 2, "got {px:?}, want {c:?}");
    }
}

#[test]
fn export_draws_grid_over_white() {
    let mut ed = editor();
    ed.open(rgby_store());
    ed.layout_invalidated(Rect::new(0.0, 0.0, 200.9, 200.9));
    assert_eq!(ed.canvas_size(), 200);

    let frame = ed.export_frame().unwrap();
    assert_eq!((frame.width, frame.height), (200, 200));
    assert_rgb(frame.pixel(50, 50), RED);
    assert_rgb(frame.pixel(150, 50), GREEN);
    assert_rgb(frame.pixel(50, 150), BLUE);
    assert_rgb(frame.pixel(150, 150), YELLOW);
    assert_rgb(frame.pixel(100, 100), Rgba8::WHITE);
    assert_rgb(frame.pixel(2, 2), Rgba8::WHITE);
}

#[test]
fn open_pads_missing_slots_with_placeholder() {
    let mut ed = editor();
    let mut store = ImageSlotStore::new();
    store.push(RasterSource::decoded(solid_image(4, 4, RED))).unwrap();
    ed.open(store);
    assert!(ed.slots().is_full());
    ed.layout_invalidated(Rect::new(0.0, 0.0, 100.0, 100.0));
    let frame = ed.export_frame().unwrap();
    assert_rgb(frame.pixel(75, 75), Rgba8::opaque_hex(0xcccccc));
}

#[test]
fn circular_frame_leaves_cell_corners_to_background() {
    let mut ed = editor();
    ed.open(rgby_store());
    ed.layout_invalidated(Rect::new(0.0, 0.0, 200.0, 200.0));
    ed.set_frame_style(FrameStyle::CircularMask);
    assert_eq!(ed.frame_style(), FrameStyle::CircularMask);
    let frame = ed.export_frame().unwrap();
    // Cell 0 spans 6..97; its corner is outside the inscribed circle.
    assert_rgb(frame.pixel(8, 8), Rgba8::WHITE);
    assert_rgb(frame.pixel(51, 51), RED);
}

#[test]
fn resize_reclamps_stickers_and_keeps_them() {
    let mut ed = editor();
    ed.open(rgby_store());
    ed.layout_invalidated(Rect::new(0.0, 0.0, 400.0, 400.0));
    let s = ed.add_sticker("⭐");
    assert_eq!(s.position, Point::new(177.0, 177.0));

    assert!(ed.start_drag(s.id, PointerId(1), Point::new(200.0, 200.0)));
    assert_eq!(
        ed.drag(PointerId(1), Point::new(900.0, 900.0)),
        Some(Point::new(354.0, 354.0))
    );
    ed.end_drag(PointerId(1));

    ed.layout_invalidated(Rect::new(0.0, 0.0, 100.0, 100.0));
    assert_eq!(ed.stickers()[0].position, Point::new(54.0, 54.0));
    assert_eq!(ed.overlay_bounds(), Rect::new(0.0, 0.0, 100.0, 100.0));
}

#[test]
fn reset_remove_and_exit() {
    let mut ed = editor();
    ed.open(rgby_store());
    ed.layout_invalidated(Rect::new(0.0, 0.0, 200.0, 200.0));
    let a = ed.add_sticker("🎉");
    ed.add_sticker("✨");
    assert!(ed.remove_sticker(a.id));
    assert!(!ed.remove_sticker(a.id));
    assert_eq!(ed.stickers().len(), 1);

    ed.reset_requested();
    assert!(ed.stickers().is_empty());
    assert!(ed.slots().is_full());

    ed.add_sticker("✨");
    let before = ed.export_frame().unwrap();
    assert_rgb(before.pixel(50, 50), RED);

    ed.exit();
    assert!(ed.stickers().is_empty());
    assert_eq!(ed.slots().filled_count(), 0);
    assert_eq!(ed.canvas_size(), 0);
    assert_eq!(ed.overlay_bounds(), Rect::ZERO);

    // Nothing of the previous session survives into an export.
    let after = ed.export_frame().unwrap();
    assert_eq!((after.width, after.height), (0, 0));
    assert!(after.data.is_empty());
    assert!(ed.preview().unwrap().data.is_empty());

    // Reopening with fresh photos never shows the old ones.
    let mut store = ImageSlotStore::new();
    for _ in 0..4 {
        store.push(RasterSource::decoded(solid_image(8, 8, GREEN))).unwrap();
    }
    ed.open(store);
    ed.layout_invalidated(Rect::new(0.0, 0.0, 200.0, 200.0));
    let reopened = ed.export_frame().unwrap();
    assert_rgb(reopened.pixel(50, 50), GREEN);
}

#[test]
fn missing_background_exports_without_base() {
    let mut ed = editor();
    ed.open(rgby_store());
    ed.layout_invalidated(Rect::new(0.0, 0.0, 100.0, 100.0));
    ed.set_background(Some("  ".to_string()));
    assert_eq!(ed.background(), None);
    ed.set_background(Some("missing.png".to_string()));
    let frame = ed.export_frame().unwrap();
    assert_eq!(frame.pixel(1, 1), Some([0, 0, 0, 0]));
}

#[test]
fn download_writes_collage_png() {
    let dir = std::env::temp_dir().join(format!("photobooth_session_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let mut ed = editor();
    ed.open(rgby_store());
    ed.layout_invalidated(Rect::new(0.0, 0.0, 64.0, 64.0));
    let path = ed.download_requested(&dir).unwrap();
    assert_eq!(path.file_name().unwrap(), "collage.png");
    let img = image::open(&path).unwrap();
    assert_eq!((img.width(), img.height()), (64, 64));
    std::fs::remove_dir_all(dir).ok();
}

#[test]
fn from_project_reads_relative_slots() {
    let dir = std::env::temp_dir().join(format!("photobooth_project_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let mut png = std::io::Cursor::new(Vec::new());
    image::RgbaImage::from_pixel(4, 4, image::Rgba([0, 0, 255, 255]))
        .write_to(&mut png, image::ImageFormat::Png)
        .unwrap();
    std::fs::write(dir.join("blue.png"), png.into_inner()).unwrap();

    let config = ProjectConfig::from_reader(
        r#"{"canvas_size": 100, "slots": ["blue.png"],
            "stickers": [{"content": "x", "x": 500, "y": 0}]}"#
            .as_bytes(),
    )
    .unwrap();
    let mut ed = CollageEditor::from_project(&config, &dir, EditorOpts::default()).unwrap();
    assert_eq!(ed.canvas_size(), 100);
    assert_eq!(ed.stickers()[0].position, Point::new(54.0, 0.0));

    ed.reset_requested();
    let frame = ed.export_frame().unwrap();
    assert_rgb(frame.pixel(25, 25), BLUE);
    assert_rgb(frame.pixel(75, 75), Rgba8::opaque_hex(0xcccccc));
    std::fs::remove_dir_all(dir).ok();
}

#[test]
fn from_project_missing_slot_is_acquisition_error() {
    let config = ProjectConfig::from_reader(
        r#"{"canvas_size": 100, "slots": ["nope.png"]}"#.as_bytes(),
    )
    .unwrap();
    let err = CollageEditor::from_project(&config, Path::new("/nonexistent"), EditorOpts::default())
        .err()
        .unwrap();
    assert!(matches!(err, BoothError::Acquisition(_)));
}
