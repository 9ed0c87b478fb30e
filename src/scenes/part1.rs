use std::f64::consts::PI;

use crate::{
    animation::kind::Animation,
    config::SceneConfig,
    foundation::core::{Point, palette},
    foundation::error::ReelResult,
    scene::{
        jitter::JitterPolicy,
        layout::{DOWN, UP},
        object::{ObjectId, ObjectKind, Style},
        script::{Scene, SceneBuilder},
    },
    scenes::SceneId,
    timeline::{Group, Stagger, Step},
};

/// The word cloud, row-major.
pub(super) const WORDS: [&str; 12] = [
    "King", "Queen", "Walks", "Running", "France", "Paris", "Apple", "Software", "Cat", "Dog",
    "Piano", "Violin",
];

pub(super) const CLOUD_JITTER: JitterPolicy = JitterPolicy {
    max_shift: 0.75,
    scale_range: (0.9, 1.3),
    max_rotation: PI / 12.0,
};

/// A block of random binary digits, `rows` lines of `cols` digits, drawn from the scene
/// generator.
pub(super) fn binary_block(
    b: &mut SceneBuilder,
    cols: usize,
    rows: usize,
    font_size: f64,
    style: Style,
) -> ReelResult<ObjectId> {
    const DIGITS: [char; 2] = ['0', '1'];
    let mut lines = Vec::with_capacity(rows);
    for _ in 0..rows {
        let line: String = (0..cols)
            .map(|_| b.rng().choose(&DIGITS).copied().unwrap_or('0'))
            .collect();
        lines.push(line);
    }
    b.add_named(
        "binary",
        ObjectKind::text_in(lines.join("\n"), "Monospace", font_size),
        style,
    )
}

/// The twelve words on a 3×4 grid, each registered under its own text and then jittered.
pub(super) fn word_cloud(
    b: &mut SceneBuilder,
    grid_buff: f64,
    jitter: &JitterPolicy,
) -> ReelResult<Vec<ObjectId>> {
    let ids = WORDS
        .iter()
        .map(|&w| b.add_named(w, ObjectKind::text(w, 32.0), Style::default()))
        .collect::<ReelResult<Vec<_>>>()?;
    b.arrange_in_grid(&ids, 3, 4, grid_buff)?;
    for &id in &ids {
        b.jitter(id, jitter)?;
    }
    Ok(ids)
}

/// Words fading in one after another while drifting up.
pub(super) fn cloud_reveal(words: &[ObjectId], total: f64) -> ReelResult<Stagger> {
    let steps = words
        .iter()
        .map(|&w| Step::new(Animation::fade_in_shifted(UP * 0.2), [w]))
        .collect();
    Stagger::within(total, steps, 0.1)
}

/// "?" at the center with "Meaning = Math?" under it.
pub(super) fn question(b: &mut SceneBuilder) -> ReelResult<(ObjectId, ObjectId)> {
    let q = b.add_named(
        "question",
        ObjectKind::text("?", 144.0),
        Style::colored(palette::YELLOW),
    )?;
    let caption = b.add_named(
        "caption",
        ObjectKind::text("Meaning = Math?", 48.0),
        Style::default(),
    )?;
    b.next_to(caption, q, DOWN, 0.5)?;
    Ok((q, caption))
}

/// The same pulse on both words.
pub(super) fn pulse(king: ObjectId, queen: ObjectId) -> ReelResult<[Step; 2]> {
    let pulse = Animation::indicate(palette::YELLOW, 1.2)?;
    Ok([
        Step::new(pulse.clone(), [king]),
        Step::new(pulse, [queen]),
    ])
}

#[tracing::instrument(skip_all)]
pub(super) fn build(config: &SceneConfig) -> ReelResult<Scene> {
    let mut b = SceneBuilder::new(SceneId::Part1.name(), config);

    // (2.5s)
    b.mark("Computers understand numbers perfectly.");
    let binary = binary_block(&mut b, 70, 40, 16.0, Style::default().with_opacity(0.4))?;
    b.play(Group::timed(2.5).with(Step::new(Animation::Write, [binary])))?;
    b.wait(1.0)?;

    // (4s)
    b.mark("But language? It's messy, subjective, and full of context.");
    let words = word_cloud(&mut b, 2.0, &CLOUD_JITTER)?;
    b.play(
        Group::timed(3.0)
            .with_stagger(cloud_reveal(&words, 3.0)?)
            .with(Step::new(Animation::fade_out_scaled(0.8)?, [binary])),
    )?;
    b.wait(1.0)?;

    // (7s)
    b.mark(
        "How can we teach a machine that words like 'King' and 'Queen' are related, \
         but also different?",
    );
    let king = b.named("King")?;
    let queen = b.named("Queen")?;
    let (kr, qr) = (b.bounds(king)?, b.bounds(queen)?);
    // The Q is wider, so the gap on its side is larger.
    let link = b.add_named(
        "link",
        ObjectKind::line(
            Point::new(kr.x1 + 0.1, kr.center().y),
            Point::new(qr.x0 - 0.2, qr.center().y),
        ),
        Style::colored(palette::YELLOW).with_stroke_width(5.0),
    )?;
    let [pulse_king, pulse_queen] = pulse(king, queen)?;
    b.play(
        Group::timed(2.0)
            .with(pulse_king)
            .with(pulse_queen)
            .with(Step::new(Animation::passing_flash(0.4)?, [link])),
    )?;
    b.wait(2.0)?;

    let (q, caption) = question(&mut b)?;
    let pair = b.group([king, queen])?;
    b.name("pair", pair)?;
    let others = words
        .iter()
        .copied()
        .filter(|&w| w != king && w != queen)
        .collect::<Vec<_>>();
    let others = b.group(others)?;
    b.play_step(Step::new(Animation::fade_out(), [others]))?;

    // (3s)
    b.mark("What if we could turn meaning into math?");
    b.play(Group::timed(1.5).with(Step::new(Animation::transform(q), [pair])))?;
    b.wait(3.0)?;
    b.play_step(Step::new(Animation::Write, [caption]))?;
    b.wait(3.0)?;

    b.play(
        Group::new()
            .with(Step::new(Animation::fade_out(), [q]))
            .with(Step::new(Animation::fade_out(), [caption])),
    )?;
    b.build()
}
