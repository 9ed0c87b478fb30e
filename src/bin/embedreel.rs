use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::Level;

use embedreel::{
    Cue, Engine, ManifestEngine, Quality, Scene, SceneConfig, SceneId, Sequencer,
    StoryboardEngine, StoryboardOpts,
};

#[derive(Parser, Debug)]
#[command(name = "embedreel", version, about = "Word-embeddings explainer scenes")]
struct Cli {
    /// More logging on stderr (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every scene with its documented runtime.
    List,
    /// Build and validate scenes, and compare their runtimes to the documented ones.
    Check(CheckArgs),
    /// Print the cues of one scene on the scene clock.
    Timeline(TimelineArgs),
    /// Play scenes into an output engine.
    Render(RenderArgs),
}

#[derive(Parser, Debug)]
struct CheckArgs {
    /// Scenes to check (default: all).
    #[arg(long, value_parser = parse_scene)]
    scene: Vec<SceneId>,

    /// Seed for cosmetic jitter.
    #[arg(long, default_value_t = embedreel::DEFAULT_SEED)]
    seed: u64,
}

#[derive(Parser, Debug)]
struct TimelineArgs {
    /// Scene to print.
    #[arg(long, value_parser = parse_scene)]
    scene: SceneId,

    /// Seed for cosmetic jitter.
    #[arg(long, default_value_t = embedreel::DEFAULT_SEED)]
    seed: u64,

    /// Print JSON instead of a table.
    #[arg(long)]
    json: bool,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Scenes to render (default: the canonical three).
    #[arg(long, value_parser = parse_scene)]
    scene: Vec<SceneId>,

    /// Output quality preset.
    #[arg(long, value_enum, default_value_t = Quality::High)]
    quality: Quality,

    /// Seed for cosmetic jitter.
    #[arg(long, default_value_t = embedreel::DEFAULT_SEED)]
    seed: u64,

    /// Output directory.
    #[arg(long, default_value = "out")]
    out: PathBuf,

    /// What to produce.
    #[arg(long, value_enum, default_value_t = FormatChoice::Storyboard)]
    format: FormatChoice,

    /// Also encode an animatic MP4 per scene (storyboard only; requires `ffmpeg` on PATH).
    #[arg(long)]
    animatic: bool,

    /// Keep the SVG source of every storyboard panel.
    #[arg(long)]
    keep_svg: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatChoice {
    /// PNG poster frame per cue plus an index of narration.
    Storyboard,
    /// JSON timeline manifest.
    Manifest,
}

fn parse_scene(s: &str) -> Result<SceneId, String> {
    s.parse().map_err(|e: embedreel::ReelError| e.to_string())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = match cli.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.cmd {
        Command::List => cmd_list(),
        Command::Check(args) => cmd_check(args),
        Command::Timeline(args) => cmd_timeline(args),
        Command::Render(args) => cmd_render(args),
    }
}

fn cmd_list() -> anyhow::Result<()> {
    for id in SceneId::ALL {
        let cut = if id.is_canonical() { "canonical" } else { "take" };
        println!(
            "{:<28} {:>6.1}s  {:<9}  {}",
            id.name(),
            id.documented_runtime(),
            cut,
            id.title()
        );
    }
    Ok(())
}

fn cmd_check(args: CheckArgs) -> anyhow::Result<()> {
    let ids = if args.scene.is_empty() {
        SceneId::ALL.to_vec()
    } else {
        args.scene
    };
    let config = SceneConfig::default().with_seed(args.seed);
    let mut mismatched = Vec::new();
    for id in ids {
        let scene = id
            .build(&config)
            .with_context(|| format!("scene '{id}' is malformed"))?;
        let total = scene.total_secs();
        let expected = id.documented_runtime();
        let ok = (total - expected).abs() < 1e-9;
        println!(
            "{:<28} {:>6.1}s / {:>6.1}s  {:>4} objects  {:>3} cues  {}",
            id.name(),
            total,
            expected,
            scene.objects().len(),
            scene.timeline().cues().len(),
            if ok { "ok" } else { "MISMATCH" }
        );
        if !ok {
            mismatched.push(id.name());
        }
    }
    if !mismatched.is_empty() {
        anyhow::bail!(
            "runtime differs from the narration timing for: {}",
            mismatched.join(", ")
        );
    }
    Ok(())
}

#[derive(serde::Serialize)]
struct CueRow {
    index: usize,
    kind: &'static str,
    start_secs: f64,
    end_secs: f64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    steps: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

fn cue_rows(scene: &Scene) -> Vec<CueRow> {
    scene
        .timeline()
        .spans()
        .into_iter()
        .map(|span| {
            let (kind, steps, text) = match span.cue {
                Cue::Play(group) => {
                    let steps = group
                        .steps()
                        .map(|s| {
                            let targets: Vec<String> = s
                                .targets
                                .iter()
                                .map(|&t| {
                                    scene
                                        .object(t)
                                        .map_or_else(|_| format!("#{}", t.0), |o| o.label())
                                })
                                .collect();
                            format!("{}({})", s.animation.name(), targets.join(", "))
                        })
                        .collect();
                    ("play", steps, None)
                }
                Cue::Hold { .. } => ("hold", Vec::new(), None),
                Cue::Mark { text } => ("mark", Vec::new(), Some(text.clone())),
            };
            CueRow {
                index: span.index,
                kind,
                start_secs: span.start,
                end_secs: span.end,
                steps,
                text,
            }
        })
        .collect()
}

fn cmd_timeline(args: TimelineArgs) -> anyhow::Result<()> {
    let config = SceneConfig::default().with_seed(args.seed);
    let scene = args.scene.build(&config)?;
    let rows = cue_rows(&scene);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }
    for row in &rows {
        let what = match (&row.text, row.steps.is_empty()) {
            (Some(text), _) => format!("\"{text}\""),
            (None, false) => summarize(&row.steps),
            (None, true) => String::new(),
        };
        println!(
            "{:>3}  {:>7.2}s - {:>7.2}s  {:<4}  {}",
            row.index, row.start_secs, row.end_secs, row.kind, what
        );
    }
    println!("total {:.2}s", scene.total_secs());
    Ok(())
}

// Long staggered reveals print as one entry.
fn summarize(steps: &[String]) -> String {
    const SHOWN: usize = 6;
    if steps.len() <= SHOWN {
        return steps.join(", ");
    }
    format!(
        "{}, … ({} more)",
        steps[..SHOWN].join(", "),
        steps.len() - SHOWN
    )
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let config = SceneConfig::default()
        .with_seed(args.seed)
        .with_quality(args.quality);
    let ids = if args.scene.is_empty() {
        SceneId::CANONICAL.to_vec()
    } else {
        args.scene
    };

    for id in ids {
        let scene = id.build(&config)?;
        let mut engine: Box<dyn Engine> = match args.format {
            FormatChoice::Storyboard => Box::new(StoryboardEngine::new(StoryboardOpts {
                out_dir: args.out.clone(),
                animatic: args
                    .animatic
                    .then(|| args.out.join(format!("{}.mp4", id.name()))),
                keep_svg: args.keep_svg,
            })),
            FormatChoice::Manifest => Box::new(ManifestEngine::new(Some(
                args.out.join(format!("{}.json", id.name())),
            ))),
        };
        let report = Sequencer::new(&scene)
            .run(engine.as_mut())
            .with_context(|| format!("render scene '{id}'"))?;
        eprintln!(
            "{}: {} cues, {:.2}s, {} frames, {} files under {}",
            report.scene,
            report.cues,
            report.total_secs,
            report.output.frame_count,
            report.output.files.len(),
            args.out.display()
        );
    }
    Ok(())
}
