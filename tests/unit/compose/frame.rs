use super::*;

#[test]
fn parses_config_values_and_legacy_names() {
    assert_eq!("none".parse::<FrameStyle>().unwrap(), FrameStyle::None);
    assert_eq!("".parse::<FrameStyle>().unwrap(), FrameStyle::None);
    assert_eq!(
        "bordered-frame".parse::<FrameStyle>().unwrap(),
        FrameStyle::Bordered
    );
    assert_eq!("frame1".parse::<FrameStyle>().unwrap(), FrameStyle::Bordered);
    assert_eq!(
        "circular-mask".parse::<FrameStyle>().unwrap(),
        FrameStyle::CircularMask
    );
    assert_eq!(
        "frame2".parse::<FrameStyle>().unwrap(),
        FrameStyle::CircularMask
    );
    let err = "sepia".parse::<FrameStyle>().unwrap_err();
    assert!(err.to_string().starts_with("validation error:"));
}

#[test]
fn serde_uses_config_names() {
    assert_eq!(
        serde_json::to_string(&FrameStyle::CircularMask).unwrap(),
        "\"circular-mask\""
    );
    let f: FrameStyle = serde_json::from_str("\"frame1\"").unwrap();
    assert_eq!(f, FrameStyle::Bordered);
    for style in [FrameStyle::None, FrameStyle::Bordered, FrameStyle::CircularMask] {
        assert_eq!(style.to_string().parse::<FrameStyle>().unwrap(), style);
    }
}

#[test]
fn border_width_has_floor() {
    assert_eq!(border_width(0), 6.0);
    assert_eq!(border_width(600), 6.0);
    assert_eq!(border_width(1200), 12.0);
    assert_eq!(FrameStyle::Bordered.border_width(2000), Some(20.0));
    assert_eq!(FrameStyle::None.border_width(2000), None);
    assert_eq!(FrameStyle::CircularMask.border_width(2000), None);
}

#[test]
fn clip_circle_is_inscribed() {
    let dest = Rect::new(10.0, 20.0, 110.0, 80.0);
    let c = FrameStyle::CircularMask.clip_for(dest).unwrap();
    assert_eq!(c.center, kurbo::Point::new(60.0, 50.0));
    assert_eq!(c.radius, 30.0);
    assert!(FrameStyle::Bordered.clip_for(dest).is_none());
    assert!(FrameStyle::None.clip_for(dest).is_none());
}
