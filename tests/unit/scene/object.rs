use super::*;

#[test]
fn strokes_skip_whitespace_and_count_tex_parts() {
    assert_eq!(ObjectKind::text("Meaning = Math?", 48.0).strokes(), 13);
    let eq = ObjectKind::math_tex([r"\vec{King}", "-", r"\vec{Man}", "+", r"\vec{Woman}", "=", "?"]);
    assert_eq!(eq.strokes(), 19);
    assert_eq!(ObjectKind::arrow(Point::ORIGIN, Point::new(1.0, 0.0)).strokes(), 2);
}

#[test]
fn shapes_are_posed_at_their_geometric_center() {
    let line = VisualObject::new(
        ObjectId(0),
        ObjectKind::line(Point::new(-1.0, 0.0), Point::new(3.0, 2.0)),
        Style::default(),
    );
    assert_eq!(line.pose.position, Point::new(1.0, 1.0));
    assert_eq!(line.transform(), Affine::IDENTITY);
}

#[test]
fn bounds_follow_pose_scale_and_shift() {
    let mut obj = VisualObject::new(ObjectId(0), ObjectKind::text("King", 32.0), Style::default());
    let base = obj.bounds();
    obj.pose.scale = 2.0;
    obj.shift(Vec2::new(1.0, -1.0));
    let b = obj.bounds();
    assert!((b.width() - 2.0 * base.width()).abs() < 1e-9);
    assert!((b.center().x - 1.0).abs() < 1e-9);
    assert!((b.center().y + 1.0).abs() < 1e-9);
}

#[test]
fn degenerate_geometry_is_rejected() {
    assert!(ObjectKind::text("x", 0.0).validate().is_err());
    let axes = ObjectKind::Axes {
        x_range: [8.0, -8.0, 1.0],
        y_range: [-4.0, 4.0, 1.0],
        x_length: 7.0,
        y_length: 4.9,
    };
    assert!(axes.validate().is_err());
    let slice = ObjectKind::Slice {
        of: ObjectId(0),
        start: 3,
        end: 3,
    };
    assert!(slice.validate().is_err());
}

#[test]
fn label_prefers_semantic_key() {
    let mut obj = VisualObject::new(ObjectId(4), ObjectKind::dot(Point::ORIGIN), Style::default());
    assert_eq!(obj.label(), "#4 (dot)");
    obj.key = Some("Queen".into());
    assert_eq!(obj.label(), "'Queen'");
}
