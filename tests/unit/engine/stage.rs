use super::*;
use crate::{
    engine::BatchStep,
    foundation::core::{Point, Vec2, palette},
    scene::object::{ObjectId, Style},
};
use smallvec::smallvec;

fn obj(i: u32, kind: ObjectKind) -> VisualObject {
    VisualObject::new(ObjectId(i), kind, Style::default())
}

fn batch(steps: Vec<BatchStep>) -> Batch {
    Batch {
        cue: 0,
        start_secs: 0.0,
        duration: 1.0,
        steps,
    }
}

fn step(animation: Animation, targets: &[u32]) -> BatchStep {
    BatchStep {
        targets: targets.iter().map(|&t| EngineHandle(t)).collect(),
        morph_into: None,
        animation,
        offset: 0.0,
        duration: 1.0,
    }
}

fn stage_with_pair() -> Stage {
    let mut stage = Stage::new(Camera::default());
    stage.insert(&obj(0, ObjectKind::text("King", 32.0)), &[]).unwrap();
    stage.insert(&obj(1, ObjectKind::text("Queen", 32.0)), &[]).unwrap();
    stage
        .insert(
            &obj(2, ObjectKind::Group {
                children: vec![ObjectId(0), ObjectId(1)],
            }),
            &[EngineHandle(0), EngineHandle(1)],
        )
        .unwrap();
    stage.insert(&obj(3, ObjectKind::text("?", 144.0)), &[]).unwrap();
    stage
}

#[test]
fn reveals_and_fades_apply_to_group_members() {
    let mut stage = stage_with_pair();
    stage.apply(&batch(vec![step(Animation::Write, &[2])])).unwrap();
    assert_eq!(stage.visible().count(), 2);

    stage.apply(&batch(vec![step(Animation::fade_out(), &[2])])).unwrap();
    assert_eq!(stage.visible().count(), 0);
    assert!(stage.entry(EngineHandle(0)).unwrap().retired);
}

#[test]
fn morph_swaps_identity() {
    let mut stage = stage_with_pair();
    stage.apply(&batch(vec![step(Animation::fade_in(), &[2])])).unwrap();
    let mut morph = step(Animation::transform(ObjectId(3)), &[2]);
    morph.morph_into = Some(EngineHandle(3));
    stage.apply(&batch(vec![morph])).unwrap();
    let visible: Vec<_> = stage.visible().map(|(h, _)| h).collect();
    assert_eq!(visible, vec![EngineHandle(3)]);

    let mut broken = step(Animation::transform(ObjectId(3)), &[0]);
    broken.morph_into = None;
    assert!(stage.apply(&batch(vec![broken])).is_err());
}

#[test]
fn moves_accumulate_as_offsets() {
    let mut stage = Stage::new(Camera::default());
    let h = stage
        .insert(&obj(0, ObjectKind::arrow(Point::ORIGIN, Point::new(1.0, 0.0))), &[])
        .unwrap();
    stage
        .apply(&batch(vec![step(
            Animation::rotate_about(std::f64::consts::PI, Point::ORIGIN),
            &[0],
        )]))
        .unwrap();
    stage
        .apply(&batch(vec![step(Animation::move_by(Vec2::new(0.0, 2.0)), &[0])]))
        .unwrap();
    let tip = stage.entry(h).unwrap().transform() * Point::new(1.0, 0.0);
    assert!((tip.x + 1.0).abs() < 1e-9);
    assert!((tip.y - 2.0).abs() < 1e-9);
}

#[test]
fn highlights_last_one_batch() {
    let mut stage = stage_with_pair();
    stage
        .apply(&batch(vec![
            step(Animation::indicate(palette::YELLOW, 1.2).unwrap(), &[2]),
            step(Animation::flash(palette::ORANGE, 0.5).unwrap(), &[3]),
        ]))
        .unwrap();
    assert_eq!(stage.highlights().len(), 3);
    stage.settle();
    assert!(stage.highlights().is_empty());
}

#[test]
fn camera_moves_and_rotates() {
    let mut stage = Stage::new(Camera::default());
    stage
        .apply(&batch(vec![BatchStep {
            targets: smallvec![],
            morph_into: None,
            animation: Animation::move_camera(1.2, -0.8, 0.8).unwrap(),
            offset: 0.0,
            duration: 3.0,
        }]))
        .unwrap();
    let mut spin = step(Animation::ambient_rotation(0.1), &[]);
    spin.duration = 2.0;
    stage.apply(&batch(vec![spin])).unwrap();
    let cam = stage.camera();
    assert_eq!(cam.zoom, 0.8);
    assert!((cam.theta - (-0.6)).abs() < 1e-12);
}

#[test]
fn unknown_dependencies_are_rejected() {
    let mut stage = Stage::new(Camera::default());
    let group = obj(0, ObjectKind::Group {
        children: vec![ObjectId(5)],
    });
    assert!(stage.insert(&group, &[EngineHandle(5)]).is_err());
    assert!(stage.entry(EngineHandle(0)).is_err());
}

#[test]
fn indicating_a_slice_pulses_only_its_parts() {
    let mut stage = Stage::new(Camera::default());
    let eq = stage
        .insert(&obj(0, ObjectKind::math_tex(["a", "+", "b", "=", "c"])), &[])
        .unwrap();
    stage
        .insert(
            &obj(1, ObjectKind::Slice {
                of: ObjectId(0),
                start: 2,
                end: 3,
            }),
            &[eq],
        )
        .unwrap();
    stage
        .insert(
            &obj(2, ObjectKind::Group {
                children: vec![ObjectId(0)],
            }),
            &[eq],
        )
        .unwrap();
    stage.apply(&batch(vec![step(Animation::Write, &[0])])).unwrap();

    stage
        .apply(&batch(vec![step(
            Animation::indicate(palette::YELLOW, 1.2).unwrap(),
            &[1],
        )]))
        .unwrap();
    assert_eq!(
        stage.highlights(),
        &[Highlight::Recolor {
            handle: eq,
            color: palette::YELLOW,
            parts: Some((2, 3)),
        }]
    );

    stage
        .apply(&batch(vec![step(
            Animation::indicate(palette::YELLOW, 1.2).unwrap(),
            &[2],
        )]))
        .unwrap();
    assert_eq!(
        stage.highlights(),
        &[Highlight::Recolor {
            handle: eq,
            color: palette::YELLOW,
            parts: None,
        }]
    );
}
