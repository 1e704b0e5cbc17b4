use super::*;

#[test]
fn defaults_and_builders() {
    let opts = EditorOpts::default();
    assert_eq!(opts.sticker_size(), 46.0);
    assert_eq!(opts.decode_timeout(), Duration::from_secs(30));
    assert!(opts.sticker_font().is_none());

    let opts = opts
        .with_sticker_size(60.0)
        .with_sticker_size(f64::NAN)
        .with_decode_timeout(Duration::from_millis(5))
        .with_sticker_font(Some(PathBuf::from("emoji.ttf")))
        .with_sticker_font(None);
    assert_eq!(opts.sticker_size(), 60.0);
    assert_eq!(opts.decode_timeout(), Duration::from_millis(5));
    assert_eq!(opts.sticker_font(), Some(Path::new("emoji.ttf")));
}

#[test]
fn minimal_project_parses_with_defaults() {
    let p: ProjectConfig = serde_json::from_str(r#"{"canvas_size": 600}"#).unwrap();
    p.validate().unwrap();
    assert_eq!(p.frame, FrameStyle::None);
    assert!(p.slots.is_empty());
    assert_eq!(p.overlay_rect(), Rect::new(0.0, 0.0, 600.0, 600.0));
}

#[test]
fn full_project_parses() {
    let json = r#"{
        "canvas_size": 400,
        "frame": "frame2",
        "background": "url('bg.svg')",
        "slots": ["a.png", "b.png"],
        "overlay": {"x": 10, "y": 20, "width": 200, "height": 200},
        "stickers": [{"content": "⭐", "x": 5, "y": 6, "width": 30}],
        "sticker_font": "fonts/emoji.ttf"
    }"#;
    let p = ProjectConfig::from_reader(json.as_bytes()).unwrap();
    p.validate().unwrap();
    assert_eq!(p.frame, FrameStyle::CircularMask);
    assert_eq!(p.overlay_rect(), Rect::new(10.0, 20.0, 210.0, 220.0));
    assert_eq!(p.stickers[0].width, Some(30.0));
    assert_eq!(p.stickers[0].height, None);
}

#[test]
fn validation_failures() {
    let base: ProjectConfig = serde_json::from_str(r#"{"canvas_size": 100}"#).unwrap();

    let mut p = base.clone();
    p.canvas_size = 0;
    assert!(matches!(p.validate(), Err(BoothError::Validation(_))));

    let mut p = base.clone();
    p.slots = vec!["x".to_string(); 5];
    assert!(p.validate().is_err());

    let mut p = base.clone();
    p.overlay = Some(OverlayConfig {
        x: 0.0,
        y: 0.0,
        width: 0.0,
        height: 10.0,
    });
    assert!(p.validate().is_err());

    let mut p = base.clone();
    p.stickers = vec![StickerConfig {
        content: "⭐".to_string(),
        x: f64::INFINITY,
        y: 0.0,
        width: None,
        height: None,
    }];
    assert!(p.validate().is_err());

    let mut p = base;
    p.stickers = vec![StickerConfig {
        content: "⭐".to_string(),
        x: 0.0,
        y: 0.0,
        width: Some(-1.0),
        height: None,
    }];
    assert!(p.validate().is_err());
}

#[test]
fn unknown_fields_and_bad_json_are_rejected() {
    assert!(ProjectConfig::from_reader(r#"{"canvas_size": 1, "zoom": 2}"#.as_bytes()).is_err());
    assert!(ProjectConfig::from_reader("{".as_bytes()).is_err());
    let err = ProjectConfig::from_path("/definitely/missing/project.json").unwrap_err();
    assert!(err.to_string().starts_with("validation error:"));
}
