use std::f64::consts::PI;

use crate::{
    animation::kind::Animation,
    config::SceneConfig,
    foundation::core::{Point, Vec2, palette},
    foundation::error::ReelResult,
    scene::{
        layout::{DOWN, MED_LARGE_BUFF, UL, UP, UR},
        object::{ObjectId, ObjectKind, Style},
        script::{Scene, SceneBuilder},
    },
    scenes::SceneId,
    timeline::{Group, Step},
};

/// Every size and coordinate of the embedding plane is scaled by this.
const SCALE: f64 = 0.7;
/// The plane sits below the equations.
const GRAPH_SHIFT: Vec2 = Vec2::new(0.0, -1.2);

/// Plane coordinates → scene space.
fn at(x: f64, y: f64) -> Point {
    Point::new(x * SCALE, y * SCALE) + GRAPH_SHIFT
}

/// The axes with their three labels.
pub(super) struct Plane {
    pub(super) axes: ObjectId,
    pub(super) origin: Point,
    pub(super) labels: [ObjectId; 3],
}

pub(super) fn plane(b: &mut SceneBuilder) -> ReelResult<Plane> {
    let (x_length, y_length) = (10.0 * SCALE, 7.0 * SCALE);
    let axes = b.add_named(
        "axes",
        ObjectKind::Axes {
            x_range: [-8.0, 8.0, 1.0],
            y_range: [-4.0, 4.0, 1.0],
            x_length,
            y_length,
        },
        Style::colored(palette::BLUE),
    )?;
    b.shift(axes, GRAPH_SHIFT)?;
    let origin = Point::ORIGIN + GRAPH_SHIFT;

    let label_size = 36.0 * SCALE;
    let royalty = b.add_named(
        "Royalty",
        ObjectKind::text("Royalty", label_size),
        Style::colored(palette::WHITE),
    )?;
    b.next_to_point(
        royalty,
        origin + Vec2::new(0.0, y_length / 2.0),
        UP,
        0.1 * SCALE,
    )?;
    let masculine = b.add_named(
        "Masculine",
        ObjectKind::text("Masculine", label_size),
        Style::colored(palette::WHITE),
    )?;
    b.next_to_point(
        masculine,
        origin + Vec2::new(x_length / 2.0, 0.0),
        DOWN,
        0.3 * SCALE,
    )?;
    let feminine = b.add_named(
        "Feminine",
        ObjectKind::text("Feminine", label_size),
        Style::colored(palette::WHITE),
    )?;
    b.next_to_point(
        feminine,
        origin - Vec2::new(x_length / 2.0, 0.0),
        DOWN,
        0.3 * SCALE,
    )?;

    Ok(Plane {
        axes,
        origin,
        labels: [royalty, masculine, feminine],
    })
}

/// The three axis labels written together.
pub(super) fn write_labels(plane: &Plane) -> Group {
    plane
        .labels
        .iter()
        .fold(Group::new(), |g, &l| g.with(Step::new(Animation::Write, [l])))
}

/// One word on the plane: arrow from the origin, a dot at the tip and the word beside it.
#[derive(Clone, Copy, Debug)]
pub(super) struct WordVector {
    pub(super) group: ObjectId,
    pub(super) arrow: ObjectId,
    pub(super) dot: ObjectId,
    pub(super) label: ObjectId,
    pub(super) tip: Point,
}

impl WordVector {
    /// Grow the arrow, fade in the dot, write the word.
    pub(super) fn reveal(&self) -> [Step; 3] {
        [
            Step::new(Animation::GrowArrow, [self.arrow]),
            Step::new(Animation::fade_in(), [self.dot]),
            Step::new(Animation::Write, [self.label]),
        ]
    }
}

/// The four words of the analogy.
#[derive(Clone, Copy, Debug)]
pub(super) struct Words {
    pub(super) queen: WordVector,
    pub(super) king: WordVector,
    pub(super) woman: WordVector,
    pub(super) man: WordVector,
}

impl Words {
    pub(super) fn groups(&self) -> [ObjectId; 4] {
        [
            self.queen.group,
            self.king.group,
            self.woman.group,
            self.man.group,
        ]
    }
}

fn word_vector(
    b: &mut SceneBuilder,
    word: &str,
    origin: Point,
    tip: Point,
    label_dir: Vec2,
) -> ReelResult<WordVector> {
    let arrow = b.add_named(
        format!("{word}.arrow"),
        ObjectKind::arrow(origin, tip),
        Style::colored(palette::YELLOW),
    )?;
    let dot = b.add_named(
        format!("{word}.dot"),
        ObjectKind::dot(tip),
        Style::colored(palette::YELLOW),
    )?;
    let label = b.add_named(
        format!("{word}.label"),
        ObjectKind::text(word, 32.0 * SCALE),
        Style::default(),
    )?;
    b.next_to_point(label, tip, label_dir, 0.1)?;
    let group = b.group([arrow, dot, label])?;
    b.name(word, group)?;
    Ok(WordVector {
        group,
        arrow,
        dot,
        label,
        tip,
    })
}

pub(super) fn words(b: &mut SceneBuilder, origin: Point) -> ReelResult<Words> {
    Ok(Words {
        queen: word_vector(b, "Queen", origin, at(-3.0, 2.5), UL)?,
        king: word_vector(b, "King", origin, at(3.0, 2.5), UR)?,
        woman: word_vector(b, "Woman", origin, at(-3.0, -2.5), UL)?,
        man: word_vector(b, "Man", origin, at(3.0, -2.5), UR)?,
    })
}

/// The three forms of the equation, and the parts of the rewritten one that get pointed at.
pub(super) struct Equations {
    pub(super) first: ObjectId,
    pub(super) rewritten: ObjectId,
    pub(super) solved: ObjectId,
    pub(super) difference: ObjectId,
    pub(super) king: ObjectId,
}

pub(super) fn equations(b: &mut SceneBuilder) -> ReelResult<Equations> {
    let first = b.add_named(
        "equation",
        ObjectKind::math_tex([
            r"\vec{King}",
            "-",
            r"\vec{Man}",
            "+",
            r"\vec{Woman}",
            "=",
            "?",
        ]),
        Style::default(),
    )?;
    let rewritten = b.add_named(
        "equation.rewritten",
        ObjectKind::math_tex([
            r"\vec{King}",
            "+",
            "(",
            r"\vec{Woman}",
            "-",
            r"\vec{Man}",
            ")",
            "=",
            "?",
        ]),
        Style::default(),
    )?;
    let solved = b.add_named(
        "equation.solved",
        ObjectKind::math_tex([
            r"\vec{King}",
            "+",
            "(",
            r"\vec{Woman}",
            "-",
            r"\vec{Man}",
            ")",
            r"\approx",
            r"\vec{Queen}",
        ]),
        Style::default(),
    )?;
    for eq in [first, rewritten, solved] {
        b.to_edge(eq, UP, MED_LARGE_BUFF)?;
    }
    let difference = b.slice(rewritten, 2, 7)?;
    b.name("equation.difference", difference)?;
    let king = b.slice(rewritten, 0, 1)?;
    b.name("equation.king", king)?;
    Ok(Equations {
        first,
        rewritten,
        solved,
        difference,
        king,
    })
}

/// Pacing of the arithmetic that differs between takes.
pub(super) struct ArithmeticTake {
    /// Narration marks are dropped at their lines.
    pub(super) narrated: bool,
    /// Pulse the Queen arrow along with the flash on its dot.
    pub(super) pulse_queen: bool,
}

impl ArithmeticTake {
    fn narrate(&self, b: &mut SceneBuilder, line: &str) {
        if self.narrated {
            b.mark(line);
        }
    }
}

/// Woman − Man built from copies, carried onto King, landing on Queen; the equation is solved
/// and the helper vectors removed.
pub(super) fn arithmetic(
    b: &mut SceneBuilder,
    plane: &Plane,
    words: &Words,
    eq: &Equations,
    take: &ArithmeticTake,
) -> ReelResult<()> {
    let o = plane.origin;

    // Focus on (Woman - Man).
    b.play_step(Step::new(Animation::indicate(palette::YELLOW, 1.2)?, [eq.difference]))?;
    b.wait(1.0)?;
    b.play(
        Group::new()
            .with(Step::new(Animation::indicate(palette::YELLOW, 1.2)?, [words.woman.arrow]))
            .with(Step::new(Animation::indicate(palette::YELLOW, 1.2)?, [words.man.arrow])),
    )?;
    b.wait(1.0)?;

    // Flip a copy of Man and put it at the tip of a copy of Woman.
    let woman_copy = b.copy_of(words.woman.arrow, Style::colored(palette::GREEN))?;
    let man_copy = b.copy_of(words.man.arrow, Style::colored(palette::RED))?;
    b.play_step(Step::new(Animation::rotate_about(PI, o), [man_copy]))?;
    b.play_step(Step::new(Animation::move_by(words.woman.tip - o), [man_copy]))?;
    b.wait(1.0)?;

    let offset = words.woman.tip - words.man.tip;
    let difference = b.add_named(
        "difference",
        ObjectKind::arrow(o, o + offset),
        Style::colored(palette::BLUE),
    )?;
    take.narrate(
        b,
        "This vector, 'Woman - Man', is now a transformation that when applied to King...",
    );
    b.play_step(Step::new(Animation::GrowArrow, [difference]))?;
    b.wait(2.0)?;
    b.play_step(Step::new(Animation::fade_out(), [woman_copy, man_copy]))?;

    // Carry the difference onto King.
    b.play_step(Step::new(Animation::indicate(palette::YELLOW, 1.2)?, [eq.king]))?;
    b.play_step(Step::new(Animation::indicate(palette::YELLOW, 1.2)?, [words.king.arrow]))?;
    b.wait(1.0)?;
    b.play_step(Step::new(Animation::move_by(words.king.tip - o), [difference]))?;
    b.wait(2.0)?;

    let result = b.add_named(
        "result",
        ObjectKind::arrow(o, words.king.tip + offset),
        Style::colored(palette::ORANGE),
    )?;
    b.play_step(Step::new(Animation::GrowArrow, [result]))?;
    b.wait(1.0)?;

    take.narrate(b, "...lands almost exactly where 'Queen' is located.");
    take.narrate(b, "This is how a model can learn the relationship between these concepts.");
    let mut landing = Group::new().with(Step::new(
        Animation::flash(palette::ORANGE, 0.5)?,
        [words.queen.dot],
    ));
    if take.pulse_queen {
        landing = landing.with(Step::new(
            Animation::indicate(palette::ORANGE, 1.2)?,
            [words.queen.arrow],
        ));
    }
    b.play(landing)?;

    b.play_step(Step::new(Animation::transform(eq.solved), [eq.rewritten]))?;
    b.wait(3.0)?;
    b.play_step(Step::new(Animation::fade_out(), [difference, result]))?;
    Ok(())
}

#[tracing::instrument(skip_all)]
pub(super) fn build(config: &SceneConfig) -> ReelResult<Scene> {
    let mut b = SceneBuilder::new(SceneId::Part2.name(), config);

    // (7s)
    b.mark(
        "The solution is to represent words as vectors in a multi-dimensional space, \
         a concept called word embedding.",
    );
    let plane = plane(&mut b)?;
    b.play(Group::timed(2.0).with(Step::new(Animation::Create, [plane.axes])))?;

    // Illustration vectors, grown together and cleared together.
    let mut scatter = Vec::new();
    for (x, y) in [(-2.0, 2.0), (3.0, -1.0), (-4.0, -2.0), (1.0, 3.0), (5.0, 1.0)] {
        scatter.push(b.add(
            ObjectKind::arrow(plane.origin, at(x, y)),
            Style::colored(palette::WHITE),
        )?);
    }
    // (8s)
    b.mark(
        "Think of it like giving every single word a coordinate. In this space, words with \
         similar meanings are placed close together.",
    );
    b.play(
        scatter
            .iter()
            .fold(Group::timed(1.5), |g, &v| g.with(Step::new(Animation::GrowArrow, [v]))),
    )?;
    b.wait(8.0)?;
    b.play(
        scatter
            .iter()
            .fold(Group::timed(1.0), |g, &v| g.with(Step::new(Animation::fade_out(), [v]))),
    )?;
    b.wait(1.0)?;

    // (6s)
    b.mark(
        "Let's simplify this. Let's label the vertical axis 'Royalty' and the horizontal axis \
         'Gender'.",
    );
    b.play(write_labels(&plane))?;
    b.wait(2.0)?;

    let words = words(&mut b, plane.origin)?;
    // (5s)
    b.mark("A word like 'King' would have a high Royalty score and a masculine Gender score.");
    b.play(words.queen.reveal().into_iter().fold(Group::timed(0.5), Group::with))?;
    b.wait(5.0)?;
    // (5s)
    b.mark("'Queen' would be similar in Royalty, but with a feminine score.");
    b.play(words.king.reveal().into_iter().fold(Group::timed(0.5), Group::with))?;
    b.wait(5.0)?;
    b.play(
        words
            .woman
            .reveal()
            .into_iter()
            .chain(words.man.reveal())
            .fold(Group::timed(1.5), Group::with),
    )?;
    b.wait(3.0)?;

    // (8s)
    b.mark(
        "This is where it gets amazing. Because words are now vectors, we can perform \
         arithmetic on them. Watch this.",
    );
    let eq = equations(&mut b)?;
    b.play_step(Step::new(Animation::Write, [eq.first]))?;
    b.wait(7.0)?;
    // (4s)
    b.mark("Let's rewrite the equation to make what we're doing clearer.");
    b.wait(4.0)?;
    b.play_step(Step::new(Animation::transform(eq.rewritten), [eq.first]))?;
    b.wait(3.0)?;

    arithmetic(
        &mut b,
        &plane,
        &words,
        &eq,
        &ArithmeticTake {
            narrated: true,
            pulse_queen: false,
        },
    )?;
    b.wait(3.0)?;

    // Clean slate for the next part.
    let mut remaining = vec![plane.axes];
    remaining.extend(plane.labels);
    remaining.push(eq.solved);
    remaining.extend(words.groups());
    let remaining = b.group(remaining)?;
    b.play_step(Step::new(Animation::fade_out(), [remaining]))?;
    b.build()
}
