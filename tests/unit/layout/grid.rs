use super::*;

#[test]
fn layout_600_matches_reference_numbers() {
    let g = compute_layout(600);
    assert_eq!(g.padding, 18);
    assert_eq!(g.cell, 273);
    assert_eq!(g.cells[0], PixelRect::new(18, 18, 273, 273));
    assert_eq!(g.cells[1], PixelRect::new(309, 18, 273, 273));
    assert_eq!(g.cells[2], PixelRect::new(18, 309, 273, 273));
    assert_eq!(g.cells[3], PixelRect::new(309, 309, 273, 273));
}

#[test]
fn cells_never_overlap_and_stay_inside_canvas() {
    for size in 0..=1200u32 {
        let g = compute_layout(size);
        for (i, a) in g.cells.iter().enumerate() {
            if size > 0 {
                assert!(a.right() <= size, "size {size} cell {i} right {}", a.right());
                assert!(a.bottom() <= size, "size {size} cell {i} bottom {}", a.bottom());
            }
            for b in &g.cells[i + 1..] {
                assert!(!a.overlaps(*b), "size {size}: {a:?} overlaps {b:?}");
            }
        }
    }
}

#[test]
fn cells_are_square_and_in_reading_order() {
    let g = compute_layout(333);
    for c in g.cells {
        assert_eq!(c.width, c.height);
    }
    assert!(g.cells[0].x < g.cells[1].x);
    assert_eq!(g.cells[0].y, g.cells[1].y);
    assert!(g.cells[0].y < g.cells[2].y);
    assert_eq!(g.cells[2].x, g.cells[0].x);
    assert_eq!(g.cells[3].x, g.cells[1].x);
    assert_eq!(g.cells[3].y, g.cells[2].y);
}

#[test]
fn layout_is_idempotent() {
    for size in [0, 1, 7, 33, 100, 512, 1080] {
        assert_eq!(compute_layout(size), compute_layout(size));
    }
}

#[test]
fn degenerate_sizes_do_not_panic() {
    let zero = compute_layout(0);
    assert!(zero.cells.iter().all(|c| c.is_empty()));
    let one = compute_layout(1);
    assert_eq!(one.padding, 0);
    assert!(one.cells.iter().all(|c| c.is_empty()));
    let tiny = compute_layout(2);
    assert_eq!(tiny.cell, 1);
}

#[test]
fn container_width_is_floored() {
    assert_eq!(canvas_size_for_container(640.9), 640);
    assert_eq!(canvas_size_for_container(0.4), 0);
    assert_eq!(canvas_size_for_container(-5.0), 0);
    assert_eq!(canvas_size_for_container(f64::NAN), 0);
    assert_eq!(canvas_size_for_container(1.0e9), u32::from(u16::MAX));
}
