use super::*;
use crate::{foundation::core::palette, scene::layout::{DOWN, UP}};

fn builder() -> SceneBuilder {
    SceneBuilder::new("test", &SceneConfig::default())
}

fn jittered_scene(seed: u64) -> Scene {
    let cfg = SceneConfig::default().with_seed(seed);
    let mut b = SceneBuilder::new("jitter", &cfg);
    let policy = JitterPolicy {
        max_shift: 0.75,
        scale_range: (0.9, 1.3),
        max_rotation: 0.26,
    };
    let a = b.add_named("A", ObjectKind::text("Apple", 32.0), Style::default()).unwrap();
    b.jitter(a, &policy).unwrap();
    b.play_step(Step::new(Animation::fade_in(), [a])).unwrap();
    b.build().unwrap()
}

#[test]
fn write_defaults_depend_on_stroke_count() {
    let mut b = builder();
    let short = b.add(ObjectKind::text("Meaning = Math?", 48.0), Style::default()).unwrap();
    let long = b
        .add(ObjectKind::text("Languages as Vectors", 60.0), Style::default())
        .unwrap();
    assert_eq!(b.play_step(Step::new(Animation::Write, [short])).unwrap(), 1.0);
    assert_eq!(b.play_step(Step::new(Animation::Write, [long])).unwrap(), 2.0);

    // An explicit group run time always wins.
    let other = b.add(ObjectKind::text("Turning Meaning into Math", 36.0), Style::default()).unwrap();
    assert_eq!(
        b.play(Group::timed(2.5).with(Step::new(Animation::Write, [other])))
            .unwrap(),
        2.5
    );
    assert_eq!(b.elapsed(), 5.5);
}

#[test]
fn group_strokes_sum_their_members() {
    let mut b = builder();
    let t = b.add(ObjectKind::text("Languages as Vectors", 60.0), Style::default()).unwrap();
    let s = b
        .add(ObjectKind::text("Turning Meaning into Math", 36.0), Style::default())
        .unwrap();
    let card = b.group([t, s]).unwrap();
    assert_eq!(b.strokes(card).unwrap(), 18 + 22);
}

#[test]
fn groups_move_their_members() {
    let mut b = builder();
    let a = b.add(ObjectKind::text("King", 32.0), Style::default()).unwrap();
    let q = b.add(ObjectKind::text("Queen", 32.0), Style::default()).unwrap();
    b.move_to(q, Point::new(2.0, 0.0)).unwrap();
    let g = b.group([a, q]).unwrap();
    let before = b.bounds(g).unwrap();
    b.shift(g, Vec2::new(0.0, 1.0)).unwrap();
    let after = b.bounds(g).unwrap();
    assert!((after.y0 - before.y0 - 1.0).abs() < 1e-12);
    assert!((b.object(q).unwrap().pose.position.y - 1.0).abs() < 1e-12);
    assert!((b.object(g).unwrap().pose.position.y - after.center().y).abs() < 1e-12);
}

#[test]
fn next_to_leaves_the_requested_gap() {
    let mut b = builder();
    let q = b.add(ObjectKind::text("?", 144.0), Style::colored(palette::YELLOW)).unwrap();
    let caption = b.add(ObjectKind::text("Meaning = Math?", 48.0), Style::default()).unwrap();
    b.next_to(caption, q, DOWN, 0.5).unwrap();
    let (qb, cb) = (b.bounds(q).unwrap(), b.bounds(caption).unwrap());
    assert!((qb.y0 - cb.y1 - 0.5).abs() < 1e-9);
    assert!((qb.center().x - cb.center().x).abs() < 1e-9);

    b.to_edge(caption, UP, 0.5).unwrap();
    assert!((b.bounds(caption).unwrap().y1 - 3.5).abs() < 1e-9);
}

#[test]
fn slices_cover_their_share_of_the_equation() {
    let mut b = builder();
    let eq = b
        .add(
            ObjectKind::math_tex([r"\vec{King}", "+", "(", r"\vec{Woman}", "-", r"\vec{Man}", ")", "=", "?"]),
            Style::default(),
        )
        .unwrap();
    let mid = b.slice(eq, 2, 7).unwrap();
    let (whole, part) = (b.bounds(eq).unwrap(), b.bounds(mid).unwrap());
    assert!(part.x0 > whole.x0 && part.x1 < whole.x1);
    assert_eq!(part.y0, whole.y0);
    assert!(b.slice(eq, 3, 12).is_err());
    assert_eq!(b.strokes(mid).unwrap(), 1 + 6 + 1 + 4 + 1);
}

#[test]
fn copies_are_independent_objects() {
    let mut b = builder();
    let arrow = b
        .add(
            ObjectKind::arrow(Point::ORIGIN, Point::new(2.0, -1.75)),
            Style::colored(palette::YELLOW),
        )
        .unwrap();
    let copy = b.copy_of(arrow, Style::colored(palette::RED)).unwrap();
    assert_ne!(copy, arrow);
    assert_eq!(b.object(copy).unwrap().style.color, palette::RED);
    assert_eq!(b.object(copy).unwrap().pose, b.object(arrow).unwrap().pose);

    let g = b.group([arrow]).unwrap();
    assert!(b.copy_of(g, Style::default()).is_err());
}

#[test]
fn names_are_unique_and_resolvable() {
    let mut b = builder();
    let k = b.add_named("King", ObjectKind::text("King", 32.0), Style::default()).unwrap();
    assert_eq!(b.named("King").unwrap(), k);
    assert!(b.named("Prince").unwrap_err().is_script());
    assert!(b.add_named("King", ObjectKind::text("King", 32.0), Style::default()).is_err());

    b.play_step(Step::new(Animation::fade_in(), [k])).unwrap();
    let scene = b.build().unwrap();
    assert_eq!(scene.lookup("King").unwrap().id, k);
    assert_eq!(scene.lookup("King").unwrap().key.as_deref(), Some("King"));
    assert!(scene.lookup("Prince").is_err());
}

#[test]
fn camera_is_fixed_before_the_first_cue() {
    let mut b = builder();
    b.set_camera(0.0, -FRAC_PI_2, 1.0).unwrap();
    assert!(b.set_camera(0.0, 0.0, 0.0).is_err());
    b.wait(1.0).unwrap();
    assert!(b.set_camera(1.0, 0.0, 1.0).unwrap_err().is_script());
}

#[test]
fn waits_must_be_positive() {
    let mut b = builder();
    assert!(b.wait(0.0).is_err());
    assert!(b.wait(f64::NAN).is_err());
    b.mark("(3s) narration");
    assert_eq!(b.elapsed(), 0.0);
}

#[test]
fn build_rejects_use_after_fade_out() {
    let mut b = builder();
    let k = b.add(ObjectKind::text("King", 32.0), Style::default()).unwrap();
    b.play_step(Step::new(Animation::fade_out(), [k])).unwrap();
    b.play_step(Step::new(Animation::Write, [k])).unwrap();
    assert!(b.build().unwrap_err().is_script());
}

#[test]
fn fingerprint_is_seed_deterministic() {
    let a = jittered_scene(42);
    let b = jittered_scene(42);
    let c = jittered_scene(43);
    assert_eq!(a.fingerprint().unwrap(), b.fingerprint().unwrap());
    assert_ne!(a.fingerprint().unwrap(), c.fingerprint().unwrap());
    assert_eq!(
        a.lookup("A").unwrap().pose.scale.to_bits(),
        b.lookup("A").unwrap().pose.scale.to_bits()
    );
}
