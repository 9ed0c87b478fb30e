//! embedreel sequences the scenes of a short explainer video on word embeddings
//! (King − Man + Woman ≈ Queen).
//!
//! A scene is declared once with a [`SceneBuilder`]: visual objects, semantic names and a
//! totally ordered timeline of concurrent groups, holds and narration marks. `build` validates
//! it statically, so a malformed script never reaches an engine. The [`Sequencer`] then plays
//! it against any [`Engine`]:
//!
//! - [`RecordingEngine`] keeps every call in memory
//! - [`ManifestEngine`] writes a JSON timeline manifest
//! - [`StoryboardEngine`] draws one poster frame per cue and, optionally, an animatic MP4
//!
//! ```no_run
//! use embedreel::{ManifestEngine, SceneConfig, SceneId, Sequencer};
//!
//! let scene = SceneId::Part2.build(&SceneConfig::default())?;
//! let mut engine = ManifestEngine::new(Some("out/part2.json".into()));
//! let report = Sequencer::new(&scene).run(&mut engine)?;
//! assert_eq!(report.total_secs, SceneId::Part2.documented_runtime());
//! # Ok::<(), embedreel::ReelError>(())
//! ```
#![forbid(unsafe_code)]
#![deny(missing_docs)]

/// Animation kinds and rate functions.
pub mod animation;
pub mod config;
pub mod engine;
/// Geometry, colors, errors and the cosmetic random generator.
pub mod foundation;
/// Objects, names, layout and scene declaration.
pub mod scene;
pub mod scenes;
pub mod sequencer;
pub mod timeline;

pub use crate::animation::{ease::RateFunc, kind::Animation};
pub use crate::config::{DEFAULT_SEED, Quality, SceneConfig};
pub use crate::engine::{
    Batch, BatchStep, Engine, EngineHandle, RenderOutput,
    manifest::{Manifest, ManifestEngine},
    recording::{EngineCall, RecordingEngine},
    storyboard::{StoryboardEngine, StoryboardOpts},
};
pub use crate::foundation::core::{Canvas, Fps, FrameIndex, Point, Point3, Rect, Rgba8, Vec2};
pub use crate::foundation::error::{ReelError, ReelResult};
pub use crate::scene::{
    object::{ObjectId, ObjectKind, Style, VisualObject},
    script::{Camera, Scene, SceneBuilder, SceneHeader},
};
pub use crate::scenes::SceneId;
pub use crate::sequencer::{RunReport, Sequencer};
pub use crate::timeline::{Cue, Group, Stagger, Step, Timeline};
