use std::f64::consts::FRAC_PI_2;

use crate::{
    animation::kind::Animation,
    config::SceneConfig,
    foundation::core::{Point3, palette},
    foundation::error::ReelResult,
    scene::{
        layout::DOWN,
        object::{ObjectKind, Style},
        script::{Scene, SceneBuilder},
    },
    scenes::SceneId,
    timeline::{Group, Stagger, Step},
};

const POINTS: usize = 300;

#[tracing::instrument(skip_all)]
pub(super) fn build(config: &SceneConfig) -> ReelResult<Scene> {
    let mut b = SceneBuilder::new(SceneId::Part3.name(), config);
    b.set_camera(0.0, -FRAC_PI_2, 1.0)?;

    let axes = b.add_named(
        "axes",
        ObjectKind::Axes3 {
            x_range: [-7.0, 7.0, 1.0],
            y_range: [-5.0, 5.0, 1.0],
            z_range: [-5.0, 5.0, 1.0],
            x_length: 14.0,
            y_length: 10.0,
            z_length: 8.0,
        },
        Style::colored(palette::BLUE_C)
            .with_stroke_width(2.0)
            .with_opacity(0.5),
    )?;
    b.play_step(Step::new(Animation::fade_in(), [axes]))?;
    b.wait(1.0)?;

    let mut points = Vec::with_capacity(POINTS);
    for _ in 0..POINTS {
        let rng = b.rng();
        let center = Point3::new(
            rng.uniform(-7.0, 7.0),
            rng.uniform(-5.0, 5.0),
            rng.uniform(-4.0, 4.0),
        );
        points.push(b.add(
            ObjectKind::Dot3 {
                center,
                radius: 0.04,
            },
            Style::colored(palette::WHITE).with_opacity(0.6),
        )?);
    }
    let cloud = b.group(points.iter().copied())?;
    b.name("points", cloud)?;

    let tilt = Animation::move_camera(70f64.to_radians(), -45f64.to_radians(), 0.8)?;
    b.play_step(Step::camera(tilt).with_run_time(3.0))?;

    let reveal = points
        .iter()
        .map(|&p| Animation::fade_in_scaled(0.5).map(|a| Step::new(a, [p])))
        .collect::<ReelResult<Vec<_>>>()?;
    b.play(Group::new().with_stagger(Stagger::within(1.0, reveal, 0.01)?))?;

    // Ambient rotation while the cloud sits.
    b.play(Group::timed(1.0).with(Step::camera(Animation::ambient_rotation(0.1))))?;

    b.play(
        Group::new()
            .with(Step::new(Animation::fade_out(), [cloud]))
            .with(Step::new(Animation::fade_out(), [axes])),
    )?;
    let level = Animation::move_camera(0.0, -FRAC_PI_2, 1.0)?;
    b.play_step(Step::camera(level).with_run_time(1.0))?;

    let title = b.add_named(
        "title",
        ObjectKind::text("Languages as Vectors", 60.0),
        Style::default(),
    )?;
    let subtitle = b.add_named(
        "subtitle",
        ObjectKind::text("Turning Meaning into Math", 36.0),
        Style::default(),
    )?;
    b.next_to(subtitle, title, DOWN, 0.4)?;
    let card = b.group([title, subtitle])?;
    b.name("card", card)?;
    b.play_step(Step::new(Animation::Write, [card]))?;
    b.wait(3.0)?;
    b.build()
}
