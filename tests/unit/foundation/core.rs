use super::*;

#[test]
fn parses_hex_rgb_and_rgba() {
    assert_eq!(Rgba8::from_hex("#1E1E1E").unwrap(), palette::BACKGROUND);
    assert_eq!(Rgba8::from_hex("ff862f").unwrap(), palette::ORANGE);

    let c = Rgba8::from_hex("#0000ff80").unwrap();
    assert_eq!(c.b, 255);
    assert_eq!(c.a, 128);
}

#[test]
fn rejects_malformed_hex() {
    assert!(Rgba8::from_hex("#12345").is_err());
    assert!(Rgba8::from_hex("#gg0000").is_err());
    assert!(Rgba8::from_hex("#ééé").is_err());
}

#[test]
fn color_serde_uses_hex_strings() {
    let v = serde_json::to_value(palette::YELLOW).unwrap();
    assert_eq!(v, serde_json::json!("#ffff00"));

    let c: Rgba8 = serde_json::from_value(serde_json::json!("#FC6255")).unwrap();
    assert_eq!(c, palette::RED);
}

#[test]
fn fps_frame_at_rounds_to_nearest() {
    let fps = Fps::new(15, 1).unwrap();
    assert_eq!(fps.frame_at(0.0), FrameIndex(0));
    assert_eq!(fps.frame_at(2.5), FrameIndex(38));
    assert_eq!(fps.frame_at(22.0), FrameIndex(330));
    assert!(Fps::new(0, 1).is_err());
    assert!(Fps::new(30, 0).is_err());
}

#[test]
fn scene_to_pixels_maps_origin_to_center_and_flips_y() {
    let canvas = Canvas {
        width: 1920,
        height: 1080,
    };
    let m = canvas.scene_to_pixels();
    assert_eq!(m * Point::ORIGIN, Point::new(960.0, 540.0));

    let top = m * Point::new(0.0, FRAME_HEIGHT / 2.0);
    assert!(top.y.abs() < 1e-9);
}
