//! Earlier takes of Part 1 and Part 2, kept with their own timing.

use std::f64::consts::PI;

use crate::{
    animation::kind::Animation,
    config::SceneConfig,
    foundation::core::{Point, palette},
    foundation::error::ReelResult,
    scene::{
        jitter::JitterPolicy,
        object::{ObjectKind, Style},
        script::{Scene, SceneBuilder},
    },
    scenes::{
        SceneId,
        part1::{CLOUD_JITTER, binary_block, cloud_reveal, pulse, question, word_cloud},
        part2::{ArithmeticTake, arithmetic, equations, plane, words, write_labels},
    },
    timeline::{Group, Step},
};

#[tracing::instrument(skip_all)]
pub(super) fn part1_the_problem(config: &SceneConfig) -> ReelResult<Scene> {
    let mut b = SceneBuilder::new(SceneId::Part1TheProblem.name(), config);

    // [0:00 - 0:05] Binary code flows rapidly across the screen.
    let binary = binary_block(&mut b, 70, 40, 16.0, Style::default().with_opacity(0.4))?;
    b.play(Group::timed(2.5).with(Step::new(Animation::Write, [binary])))?;
    b.wait(1.0)?;

    // [0:05 - 0:12] The binary code morphs into a cloud of words.
    let words = word_cloud(&mut b, 2.0, &CLOUD_JITTER)?;
    b.play(
        Group::timed(3.0)
            .with_stagger(cloud_reveal(&words, 3.0)?)
            .with(Step::new(Animation::fade_out_scaled(0.8)?, [binary])),
    )?;
    b.wait(1.0)?;

    // [0:12 - 0:20] "King" and "Queen" glow, connect, and pose the question.
    let king = b.named("King")?;
    let queen = b.named("Queen")?;
    let (kr, qr) = (b.bounds(king)?, b.bounds(queen)?);
    let link = b.add_named(
        "link",
        ObjectKind::dashed_line(
            Point::new(kr.center().x, kr.y0),
            Point::new(qr.center().x, qr.y1),
        ),
        Style::colored(palette::BLUE_C).with_stroke_width(5.0),
    )?;
    let [pulse_king, pulse_queen] = pulse(king, queen)?;
    b.play(
        Group::timed(2.0)
            .with(pulse_king)
            .with(pulse_queen)
            .with(Step::new(Animation::Create, [link])),
    )?;
    b.wait(1.0)?;

    let (q, caption) = question(&mut b)?;
    let others = words
        .iter()
        .copied()
        .filter(|&w| w != king && w != queen)
        .collect::<Vec<_>>();
    let others = b.group(others)?;
    b.play(
        Group::new()
            .with(Step::new(Animation::fade_out(), [others]))
            .with(Step::new(Animation::fade_out(), [king]))
            .with(Step::new(Animation::fade_out(), [queen])),
    )?;

    b.play(Group::timed(1.5).with(Step::new(Animation::transform(q), [link])))?;
    b.play_step(Step::new(Animation::Write, [caption]))?;
    b.wait(2.0)?;
    b.build()
}

#[tracing::instrument(skip_all)]
pub(super) fn part1_languages_as_vectors(config: &SceneConfig) -> ReelResult<Scene> {
    let mut b = SceneBuilder::new(SceneId::Part1LanguagesAsVectors.name(), config);

    // [0:00 - 0:05] Binary code flows rapidly across the screen.
    let binary = binary_block(&mut b, 60, 30, 14.0, Style::default())?;
    b.play(Group::timed(2.5).with(Step::new(Animation::Write, [binary])))?;
    b.wait(1.0)?;

    // [0:05 - 0:12] The binary code morphs into a cloud of words.
    let jitter = JitterPolicy {
        max_shift: 0.5,
        scale_range: (0.8, 1.2),
        max_rotation: PI / 12.0,
    };
    let words = word_cloud(&mut b, 1.5, &jitter)?;
    let cloud = b.group(words)?;
    b.name("cloud", cloud)?;
    b.play(Group::timed(3.0).with(Step::new(Animation::transform(cloud), [binary])))?;
    b.wait(1.0)?;

    // [0:12 - 0:20] "King" and "Queen" glow and connect, then the line turns into a question
    // mark.
    let king = b.named("King")?;
    let queen = b.named("Queen")?;
    let (from, to) = (b.bounds(king)?.center(), b.bounds(queen)?.center());
    let link = b.add_named(
        "link",
        ObjectKind::dashed_line(from, to),
        Style::colored(palette::BLUE),
    )?;
    let [pulse_king, pulse_queen] = pulse(king, queen)?;
    b.play(
        Group::timed(2.0)
            .with(pulse_king)
            .with(pulse_queen)
            .with(Step::new(Animation::Create, [link])),
    )?;
    b.wait(1.0)?;

    let q = b.add_named(
        "question",
        ObjectKind::text("?", 144.0),
        Style::colored(palette::YELLOW),
    )?;
    b.move_to(q, Point::ORIGIN)?;
    b.play_step(Step::new(Animation::fade_out(), [cloud]))?;
    b.play(Group::timed(1.5).with(Step::new(Animation::transform(q), [link])))?;
    b.wait(2.0)?;
    b.build()
}

#[tracing::instrument(skip_all)]
pub(super) fn part2_the_solution(config: &SceneConfig) -> ReelResult<Scene> {
    let mut b = SceneBuilder::new(SceneId::Part2TheSolution.name(), config);

    let plane = plane(&mut b)?;
    b.play(Group::timed(2.0).with(Step::new(Animation::Create, [plane.axes])))?;
    b.play(write_labels(&plane))?;
    b.wait(3.0)?;

    let words = words(&mut b, plane.origin)?;
    b.play(words.queen.reveal().into_iter().fold(Group::timed(1.5), Group::with))?;
    b.wait(1.0)?;
    b.play(words.king.reveal().into_iter().fold(Group::timed(1.5), Group::with))?;
    b.wait(1.0)?;
    b.play(
        words
            .woman
            .reveal()
            .into_iter()
            .chain(words.man.reveal())
            .fold(Group::timed(1.5), Group::with),
    )?;
    b.wait(3.0)?;

    let eq = equations(&mut b)?;
    b.play_step(Step::new(Animation::Write, [eq.first]))?;
    b.wait(3.0)?;
    b.play_step(Step::new(Animation::transform(eq.rewritten), [eq.first]))?;
    b.wait(3.0)?;

    arithmetic(
        &mut b,
        &plane,
        &words,
        &eq,
        &ArithmeticTake {
            narrated: false,
            pulse_queen: true,
        },
    )?;
    b.wait(3.0)?;
    b.build()
}
