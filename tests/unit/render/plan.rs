use super::*;
use crate::assets::decode::solid_image;

#[test]
fn kinds_follow_push_order() {
    let img = Arc::new(solid_image(2, 2, Rgba8::WHITE));
    let mut plan = RenderPlan::new(10, 10);
    plan.push(DrawOp::Fill {
        color: Rgba8::WHITE,
    });
    plan.push(DrawOp::Image {
        image: img,
        crop: CoverCrop::full(2, 2),
        dest: Rect::new(0.0, 0.0, 5.0, 5.0),
        clip: None,
    });
    plan.push(DrawOp::Layer {
        frame: Arc::new(FrameRGBA::new_transparent(10, 10)),
    });
    plan.push(DrawOp::Text {
        text: "x".to_string(),
        origin: Point::ZERO,
        size_px: 8.0,
        color: Rgba8::WHITE,
    });
    assert_eq!(
        plan.kinds(),
        vec![
            DrawKind::Fill,
            DrawKind::Image,
            DrawKind::Layer,
            DrawKind::Text
        ]
    );
}

#[test]
fn vector_ops_exclude_byte_ops() {
    assert!(
        !DrawOp::Fill {
            color: Rgba8::WHITE
        }
        .is_vector()
    );
    assert!(
        DrawOp::StrokeRect {
            rect: Rect::ZERO,
            width: 1.0,
            color: Rgba8::WHITE
        }
        .is_vector()
    );
}
