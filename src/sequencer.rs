//! Plays a [`Scene`] against an [`Engine`], one cue at a time.

use crate::{
    animation::kind::Animation,
    engine::{Batch, BatchStep, Engine, EngineHandle, RenderOutput},
    foundation::error::{ReelError, ReelResult},
    scene::{object::ObjectId, script::Scene},
    timeline::{Cue, validate::validate_scene},
};

/// Summary of one run.
#[derive(Clone, Debug, PartialEq)]
pub struct RunReport {
    /// Scene id.
    pub scene: String,
    /// Cues processed.
    pub cues: usize,
    /// Batches handed to `animate`.
    pub batches: usize,
    /// Objects created.
    pub created: usize,
    /// Scene clock at the end.
    pub total_secs: f64,
    /// What the engine composed.
    pub output: RenderOutput,
}

/// Drives an engine through a scene.
///
/// The scene is validated before the engine sees anything. Objects are created lazily, the
/// first time a batch references them, dependencies first; each exactly once. Every engine
/// error aborts the run as is.
#[derive(Debug)]
pub struct Sequencer<'a> {
    scene: &'a Scene,
    handles: Vec<Option<EngineHandle>>,
    created: usize,
}

impl<'a> Sequencer<'a> {
    /// Sequencer for `scene`.
    pub fn new(scene: &'a Scene) -> Self {
        Self {
            scene,
            handles: vec![None; scene.objects().len()],
            created: 0,
        }
    }

    /// Play every cue in order, then compose.
    #[tracing::instrument(skip_all, fields(scene = %self.scene.header().name))]
    pub fn run(mut self, engine: &mut dyn Engine) -> ReelResult<RunReport> {
        let scene = self.scene;
        validate_scene(scene.objects(), scene.timeline())?;
        engine.begin(scene.header())?;

        let mut batches = 0usize;
        let spans = scene.timeline().spans();
        for span in &spans {
            match span.cue {
                Cue::Play(group) => {
                    let mut steps = Vec::new();
                    for s in group.schedule() {
                        let targets = s
                            .step
                            .targets
                            .iter()
                            .map(|&t| self.ensure(engine, t))
                            .collect::<ReelResult<_>>()?;
                        let morph_into = match s.step.animation {
                            Animation::Transform { into } => Some(self.ensure(engine, into)?),
                            _ => None,
                        };
                        steps.push(BatchStep {
                            targets,
                            morph_into,
                            animation: s.step.animation.clone(),
                            offset: s.offset,
                            duration: s.duration,
                        });
                    }
                    let batch = Batch {
                        cue: span.index,
                        start_secs: span.start,
                        duration: span.end - span.start,
                        steps,
                    };
                    tracing::debug!(
                        cue = span.index,
                        start = span.start,
                        secs = batch.duration,
                        steps = batch.steps.len(),
                        "animate"
                    );
                    engine.animate(&batch)?;
                    batches += 1;
                }
                Cue::Hold { secs } => {
                    tracing::debug!(cue = span.index, start = span.start, secs, "hold");
                    engine.hold(span.index, span.start, *secs)?;
                }
                Cue::Mark { text } => engine.mark(span.index, span.start, text)?,
            }
        }

        let output = engine.compose()?;
        let total_secs = spans.last().map_or(0.0, |s| s.end);
        tracing::info!(
            cues = spans.len(),
            batches,
            created = self.created,
            total_secs,
            frames = output.frame_count,
            "scene played"
        );
        Ok(RunReport {
            scene: scene.header().name.clone(),
            cues: spans.len(),
            batches,
            created: self.created,
            total_secs,
            output,
        })
    }

    fn ensure(&mut self, engine: &mut dyn Engine, id: ObjectId) -> ReelResult<EngineHandle> {
        let slot = self
            .handles
            .get(id.index())
            .copied()
            .ok_or_else(|| ReelError::script(format!("unknown object #{}", id.0)))?;
        if let Some(handle) = slot {
            return Ok(handle);
        }
        let object = self.scene.object(id)?;
        let deps = object
            .kind
            .dependencies()
            .into_iter()
            .map(|d| self.ensure(engine, d))
            .collect::<ReelResult<Vec<_>>>()?;
        let handle = engine.create(object, &deps)?;
        tracing::debug!(object = %object.label(), handle = handle.0, "create");
        self.handles[id.index()] = Some(handle);
        self.created += 1;
        Ok(handle)
    }
}

#[cfg(test)]
#[path = "../tests/unit/sequencer.rs"]
mod tests;
