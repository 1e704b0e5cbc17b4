use super::*;

#[test]
fn identity_when_overlay_matches_export() {
    let overlay = Rect::new(0.0, 0.0, 600.0, 600.0);
    let item = Rect::new(10.0, 20.0, 56.0, 66.0);
    assert_eq!(
        overlay_to_export(item, overlay, Size::new(600.0, 600.0)),
        Some(item)
    );
}

#[test]
fn offset_and_scale_are_removed() {
    // Overlay shown at (100, 50), 300x300 on screen; export is 600x600.
    let overlay = Rect::new(100.0, 50.0, 400.0, 350.0);
    let item = Rect::new(354.0, 304.0, 400.0, 350.0);
    let mapped = overlay_to_export(item, overlay, Size::new(600.0, 600.0)).unwrap();
    assert_eq!(mapped, Rect::new(508.0, 508.0, 600.0, 600.0));
}

#[test]
fn axes_scale_independently() {
    let overlay = Rect::new(0.0, 0.0, 200.0, 100.0);
    let item = Rect::new(50.0, 50.0, 100.0, 100.0);
    let mapped = overlay_to_export(item, overlay, Size::new(400.0, 400.0)).unwrap();
    assert_eq!(mapped, Rect::new(100.0, 200.0, 200.0, 400.0));
}

#[test]
fn degenerate_overlay_maps_to_none() {
    let item = Rect::new(0.0, 0.0, 1.0, 1.0);
    let export = Size::new(10.0, 10.0);
    assert!(overlay_to_export(item, Rect::new(0.0, 0.0, 0.0, 10.0), export).is_none());
    assert!(overlay_to_export(item, Rect::new(5.0, 5.0, 5.0, 5.0), export).is_none());
    assert!(overlay_to_export(item, Rect::new(0.0, 0.0, f64::NAN, 1.0), export).is_none());
}

#[test]
fn mapping_is_linear() {
    let overlay = Rect::new(13.0, 7.0, 333.0, 247.0);
    let export = Size::new(800.0, 600.0);
    for i in 0..20 {
        let t = f64::from(i) / 19.0;
        let x = overlay.x0 + t * overlay.width();
        let y = overlay.y0 + t * overlay.height();
        let m = overlay_to_export(Rect::new(x, y, x, y), overlay, export).unwrap();
        assert!((m.x0 - t * 800.0).abs() < 1e-9);
        assert!((m.y0 - t * 600.0).abs() < 1e-9);
    }
}
