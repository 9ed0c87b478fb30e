use super::*;
use crate::foundation::core::palette;

#[test]
fn checked_constructors_reject_bad_parameters() {
    assert!(Animation::indicate(palette::YELLOW, 0.0).is_err());
    assert!(Animation::indicate(palette::YELLOW, f64::NAN).is_err());
    assert!(Animation::flash(palette::ORANGE, -0.5).is_err());
    assert!(Animation::passing_flash(0.0).is_err());
    assert!(Animation::passing_flash(1.5).is_err());
    assert!(Animation::move_camera(0.0, 0.0, 0.0).is_err());
    assert!(Animation::fade_out_scaled(0.0).is_err());

    assert!(Animation::indicate(palette::YELLOW, 1.2).is_ok());
    assert!(Animation::passing_flash(0.4).is_ok());
}

#[test]
fn validate_catches_hand_built_values() {
    let bad = Animation::Indicate {
        color: palette::YELLOW,
        scale_factor: -1.0,
    };
    assert!(bad.validate().is_err());

    let bad = Animation::MoveBy {
        delta: Vec2::new(f64::INFINITY, 0.0),
    };
    assert!(bad.validate().is_err());

    assert!(Animation::Write.validate().is_ok());
}

#[test]
fn write_default_depends_on_stroke_count() {
    assert_eq!(Animation::Write.default_run_time(13), 1.0);
    assert_eq!(Animation::Write.default_run_time(LONG_WRITE_STROKES), 2.0);
    assert_eq!(Animation::fade_in().default_run_time(500), DEFAULT_RUN_TIME);
}

#[test]
fn target_rules_and_lifecycle_flags() {
    assert_eq!(Animation::GrowArrow.target_rule(), TargetRule::Arrows);
    assert_eq!(
        Animation::passing_flash(0.4).unwrap().target_rule(),
        TargetRule::Strokes
    );
    assert_eq!(
        Animation::ambient_rotation(0.1).target_rule(),
        TargetRule::Camera
    );
    assert!(Animation::fade_out().destroys_targets());
    assert!(Animation::transform(ObjectId(3)).destroys_targets());
    assert!(!Animation::indicate(palette::YELLOW, 1.2).unwrap().destroys_targets());
    assert!(Animation::Write.reveals());
}

#[test]
fn serializes_with_kind_tag() {
    let v = serde_json::to_value(Animation::flash(palette::ORANGE, 0.5).unwrap()).unwrap();
    assert_eq!(v["kind"], "flash");
    assert_eq!(v["color"], "#ff862f");
    assert_eq!(v["radius"], 0.5);
}
