//! Rendering engine boundary.
//!
//! The sequencer owns ordering and timing; an [`Engine`] owns everything visual. Adapters:
//!
//! - [`recording::RecordingEngine`]: remembers every call (tests, dry runs)
//! - [`manifest::ManifestEngine`]: composes a JSON timeline manifest
//! - [`storyboard::StoryboardEngine`]: one poster frame per cue, optionally an animatic MP4

use std::path::PathBuf;

use smallvec::SmallVec;

use crate::{
    animation::kind::Animation,
    foundation::error::ReelResult,
    scene::{object::VisualObject, script::SceneHeader},
};

/// Animatic MP4 encoding through the system `ffmpeg`.
pub mod ffmpeg;
/// JSON manifest adapter.
pub mod manifest;
/// In-memory adapter.
pub mod recording;
/// End-state bookkeeping shared by the drawing adapters.
pub mod stage;
/// Poster-frame adapter.
pub mod storyboard;
pub(crate) mod svg;

/// Handle issued by an engine for an object it created.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct EngineHandle(pub u32);

impl EngineHandle {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// One animation of a batch, with its targets resolved to engine handles.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct BatchStep {
    /// Objects animated.
    pub targets: SmallVec<[EngineHandle; 4]>,
    /// Replacement identity for morphs.
    pub morph_into: Option<EngineHandle>,
    /// What happens.
    pub animation: Animation,
    /// Seconds after the batch starts.
    pub offset: f64,
    /// Seconds the step lasts.
    pub duration: f64,
}

/// Animations that start together. The engine drives every step to completion before the
/// sequencer moves on.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Batch {
    /// Index of the cue in the scene timeline.
    pub cue: usize,
    /// Scene clock at the start of the batch.
    pub start_secs: f64,
    /// Seconds until the last step finishes.
    pub duration: f64,
    /// Steps, in declaration order.
    pub steps: Vec<BatchStep>,
}

impl Batch {
    /// Scene clock once the batch has finished.
    pub fn end_secs(&self) -> f64 {
        self.start_secs + self.duration
    }
}

/// What an engine produced.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RenderOutput {
    /// Files written, in creation order.
    pub files: Vec<PathBuf>,
    /// Frames covered at the scene frame rate.
    pub frame_count: u64,
}

/// Engine contract.
///
/// Ordering: `begin` once, then `create`/`animate`/`hold`/`mark` in program order, then
/// `compose` once. An object is created before the first batch that references it, and its
/// dependencies (group members, the equation of a slice) are created before it.
pub trait Engine {
    /// Start a scene.
    fn begin(&mut self, header: &SceneHeader) -> ReelResult<()>;

    /// Instantiate `object`. `deps` are the handles of its dependencies, in declaration order.
    fn create(&mut self, object: &VisualObject, deps: &[EngineHandle]) -> ReelResult<EngineHandle>;

    /// Play one batch.
    fn animate(&mut self, batch: &Batch) -> ReelResult<()>;

    /// Hold the current frame for `secs`, starting at `start_secs`.
    fn hold(&mut self, cue: usize, start_secs: f64, secs: f64) -> ReelResult<()>;

    /// Narration marker at `at_secs`.
    fn mark(&mut self, _cue: usize, _at_secs: f64, _text: &str) -> ReelResult<()> {
        Ok(())
    }

    /// Finalize the output.
    fn compose(&mut self) -> ReelResult<RenderOutput>;
}
