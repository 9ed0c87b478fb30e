use super::*;
use crate::{
    animation::kind::Animation,
    foundation::core::{Point, palette},
    scene::object::Style,
    timeline::{Group, Stagger},
};

fn table(kinds: Vec<ObjectKind>) -> Vec<VisualObject> {
    kinds
        .into_iter()
        .enumerate()
        .map(|(i, k)| VisualObject::new(ObjectId(i as u32), k, Style::default()))
        .collect()
}

fn words() -> Vec<VisualObject> {
    table(vec![
        ObjectKind::text("King", 32.0),
        ObjectKind::text("Queen", 32.0),
        ObjectKind::Group {
            children: vec![ObjectId(0), ObjectId(1)],
        },
        ObjectKind::text("?", 144.0),
        ObjectKind::arrow(Point::ORIGIN, Point::new(1.0, 1.0)),
    ])
}

fn play(step: Step) -> Cue {
    Cue::Play(Group::new().with(step))
}

#[test]
fn valid_lifecycle_passes() {
    let objects = words();
    let t = Timeline::from_cues(vec![
        play(Step::new(Animation::Write, [ObjectId(2)])),
        Cue::Hold { secs: 1.0 },
        play(Step::new(Animation::transform(ObjectId(3)), [ObjectId(2)])),
        play(Step::new(Animation::fade_out(), [ObjectId(3)])),
    ]);
    validate_scene(&objects, &t).unwrap();
}

#[test]
fn reference_after_fade_out_is_rejected() {
    let objects = words();
    let t = Timeline::from_cues(vec![
        play(Step::new(Animation::fade_out(), [ObjectId(0)])),
        play(Step::new(
            Animation::indicate(palette::YELLOW, 1.2).unwrap(),
            [ObjectId(0)],
        )),
    ]);
    let err = validate_scene(&objects, &t).unwrap_err();
    assert!(err.is_script());
    assert!(err.to_string().contains("destroyed at cue 0"));
}

#[test]
fn morph_source_and_its_members_die() {
    let objects = words();
    let t = Timeline::from_cues(vec![
        play(Step::new(Animation::transform(ObjectId(3)), [ObjectId(2)])),
        play(Step::new(Animation::fade_out(), [ObjectId(1)])),
    ]);
    assert!(validate_scene(&objects, &t).unwrap_err().is_script());
}

#[test]
fn group_with_a_dead_member_is_dead() {
    let objects = words();
    let t = Timeline::from_cues(vec![
        play(Step::new(Animation::fade_out(), [ObjectId(0)])),
        play(Step::new(Animation::fade_out(), [ObjectId(2)])),
    ]);
    let err = validate_scene(&objects, &t).unwrap_err();
    assert!(err.to_string().contains("through 'King'") || err.to_string().contains("through #0"));
}

#[test]
fn members_of_one_group_see_the_state_before_it() {
    let objects = words();
    let t = Timeline::from_cues(vec![Cue::Play(
        Group::new()
            .with(Step::new(Animation::fade_out(), [ObjectId(0)]))
            .with(Step::new(
                Animation::indicate(palette::YELLOW, 1.2).unwrap(),
                [ObjectId(0)],
            )),
    )]);
    validate_scene(&objects, &t).unwrap();
}

#[test]
fn unknown_object_is_rejected() {
    let objects = words();
    let t = Timeline::from_cues(vec![play(Step::new(Animation::Write, [ObjectId(42)]))]);
    assert!(validate_scene(&objects, &t).unwrap_err().is_script());
}

#[test]
fn kind_mismatches_are_rejected() {
    let objects = words();
    let grow_text = Timeline::from_cues(vec![play(Step::new(Animation::GrowArrow, [ObjectId(0)]))]);
    assert!(validate_scene(&objects, &grow_text).is_err());

    let grow_arrow = Timeline::from_cues(vec![play(Step::new(Animation::GrowArrow, [ObjectId(4)]))]);
    validate_scene(&objects, &grow_arrow).unwrap();

    let camera_with_target = Timeline::from_cues(vec![play(Step::new(
        Animation::ambient_rotation(0.1),
        [ObjectId(4)],
    ))]);
    assert!(validate_scene(&objects, &camera_with_target).is_err());

    let no_targets = Timeline::from_cues(vec![play(Step::new(Animation::Write, []))]);
    assert!(validate_scene(&objects, &no_targets).is_err());

    let self_morph = Timeline::from_cues(vec![play(Step::new(
        Animation::transform(ObjectId(3)),
        [ObjectId(3)],
    ))]);
    assert!(validate_scene(&objects, &self_morph).is_err());
}

#[test]
fn empty_groups_and_bad_holds_are_rejected() {
    let objects = words();
    let empty = Timeline::from_cues(vec![Cue::Play(Group::timed(1.0))]);
    assert!(validate_scene(&objects, &empty).is_err());

    let hold = Timeline::from_cues(vec![Cue::Hold { secs: 0.0 }]);
    assert!(validate_scene(&objects, &hold).is_err());
}

#[test]
fn staggered_items_are_checked_too() {
    let objects = words();
    let stagger = Stagger::new(
        vec![
            Step::new(Animation::fade_in(), [ObjectId(0)]),
            Step::new(Animation::fade_in(), [ObjectId(7)]),
        ],
        1.0,
        0.1,
    )
    .unwrap();
    let t = Timeline::from_cues(vec![Cue::Play(Group::new().with_stagger(stagger))]);
    assert!(validate_scene(&objects, &t).is_err());
}

#[test]
fn slices_must_fit_their_equation() {
    let objects = table(vec![
        ObjectKind::math_tex(["a", "+", "b"]),
        ObjectKind::Slice {
            of: ObjectId(0),
            start: 1,
            end: 4,
        },
    ]);
    assert!(validate_scene(&objects, &Timeline::default()).is_err());
}
