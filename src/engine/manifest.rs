use std::path::PathBuf;

use anyhow::Context as _;

use crate::{
    animation::{ease::RateFunc, kind::Animation},
    engine::{Batch, Engine, EngineHandle, RenderOutput, ffmpeg::ensure_parent_dir},
    foundation::core::{Canvas, Fps, Rect, Rgba8},
    foundation::error::{ReelError, ReelResult},
    scene::{
        object::{ObjectId, VisualObject, kind_name},
        script::{Camera, SceneHeader},
    },
};

/// A created object as listed in the manifest.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ManifestObject {
    /// Engine handle.
    pub handle: EngineHandle,
    /// Scene object id.
    pub id: ObjectId,
    /// Semantic key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Kind name.
    pub kind: &'static str,
    /// Declared scene-space bounds.
    pub bounds: Rect,
    /// Stroke/fill color.
    pub color: Rgba8,
    /// Opacity.
    pub opacity: f64,
    /// Dependency handles.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub deps: Vec<EngineHandle>,
}

/// One step of a played cue.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ManifestStep {
    /// The animation with its parameters.
    pub animation: Animation,
    /// Target handles.
    pub targets: Vec<EngineHandle>,
    /// Replacement identity of a morph.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub morph_into: Option<EngineHandle>,
    /// Seconds after the cue starts.
    pub offset: f64,
    /// Seconds the step lasts.
    pub duration: f64,
    /// Easing.
    pub rate_func: RateFunc,
}

/// Kind of a timed cue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ManifestCueKind {
    /// A played group.
    Play,
    /// A held frame.
    Hold,
}

/// A timed cue on the scene clock.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ManifestCue {
    /// Index in the scene timeline.
    pub index: usize,
    /// Play or hold.
    pub kind: ManifestCueKind,
    /// Start in seconds.
    pub start_secs: f64,
    /// End in seconds.
    pub end_secs: f64,
    /// First frame.
    pub start_frame: u64,
    /// Frame after the last.
    pub end_frame: u64,
    /// Steps of a play cue.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub steps: Vec<ManifestStep>,
}

/// A narration marker.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ManifestMark {
    /// Scene clock.
    pub at_secs: f64,
    /// Frame at which the line starts.
    pub frame: u64,
    /// Narration line.
    pub text: String,
}

/// Everything a downstream renderer (or an editor syncing narration) needs, as JSON.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Manifest {
    /// Scene id.
    pub scene: String,
    /// Frame rate.
    pub fps: Fps,
    /// Output canvas.
    pub canvas: Canvas,
    /// Background color.
    pub background: Rgba8,
    /// Initial camera.
    pub camera: Camera,
    /// Seed of the cosmetic generator.
    pub seed: u64,
    /// End of the last cue.
    pub total_secs: f64,
    /// Frames at the scene rate.
    pub total_frames: u64,
    /// Created objects, in creation order.
    pub objects: Vec<ManifestObject>,
    /// Plays and holds, in order.
    pub cues: Vec<ManifestCue>,
    /// Narration markers, in order.
    pub marks: Vec<ManifestMark>,
}

/// Composes a [`Manifest`] and, given a path, writes it as pretty JSON.
#[derive(Debug, Default)]
pub struct ManifestEngine {
    out: Option<PathBuf>,
    manifest: Option<Manifest>,
}

impl ManifestEngine {
    /// Engine writing to `out` on compose; `None` keeps the manifest in memory only.
    pub fn new(out: Option<PathBuf>) -> Self {
        Self {
            out,
            manifest: None,
        }
    }

    /// The manifest composed so far.
    pub fn manifest(&self) -> Option<&Manifest> {
        self.manifest.as_ref()
    }

    fn current(&mut self) -> ReelResult<&mut Manifest> {
        self.manifest
            .as_mut()
            .ok_or_else(|| ReelError::engine("manifest not started"))
    }
}

impl Engine for ManifestEngine {
    fn begin(&mut self, header: &SceneHeader) -> ReelResult<()> {
        self.manifest = Some(Manifest {
            scene: header.name.clone(),
            fps: header.fps,
            canvas: header.canvas,
            background: header.background,
            camera: header.camera,
            seed: header.seed,
            total_secs: 0.0,
            total_frames: 0,
            objects: Vec::new(),
            cues: Vec::new(),
            marks: Vec::new(),
        });
        Ok(())
    }

    fn create(&mut self, object: &VisualObject, deps: &[EngineHandle]) -> ReelResult<EngineHandle> {
        let m = self.current()?;
        let handle = u32::try_from(m.objects.len())
            .map(EngineHandle)
            .map_err(|_| ReelError::engine("too many objects in manifest"))?;
        if let Some(bad) = deps.iter().find(|d| d.index() >= m.objects.len()) {
            return Err(ReelError::engine(format!(
                "{} depends on unknown handle {}",
                object.label(),
                bad.0
            )));
        }
        m.objects.push(ManifestObject {
            handle,
            id: object.id,
            key: object.key.clone(),
            kind: kind_name(&object.kind),
            bounds: object.bounds(),
            color: object.style.color,
            opacity: object.style.opacity,
            deps: deps.to_vec(),
        });
        Ok(handle)
    }

    fn animate(&mut self, batch: &Batch) -> ReelResult<()> {
        let m = self.current()?;
        let fps = m.fps;
        let steps = batch
            .steps
            .iter()
            .map(|s| ManifestStep {
                animation: s.animation.clone(),
                targets: s.targets.to_vec(),
                morph_into: s.morph_into,
                offset: s.offset,
                duration: s.duration,
                rate_func: s.animation.rate_func(),
            })
            .collect();
        m.cues.push(ManifestCue {
            index: batch.cue,
            kind: ManifestCueKind::Play,
            start_secs: batch.start_secs,
            end_secs: batch.end_secs(),
            start_frame: fps.frame_at(batch.start_secs).0,
            end_frame: fps.frame_at(batch.end_secs()).0,
            steps,
        });
        m.total_secs = batch.end_secs();
        Ok(())
    }

    fn hold(&mut self, cue: usize, start_secs: f64, secs: f64) -> ReelResult<()> {
        let m = self.current()?;
        let fps = m.fps;
        let end = start_secs + secs;
        m.cues.push(ManifestCue {
            index: cue,
            kind: ManifestCueKind::Hold,
            start_secs,
            end_secs: end,
            start_frame: fps.frame_at(start_secs).0,
            end_frame: fps.frame_at(end).0,
            steps: Vec::new(),
        });
        m.total_secs = end;
        Ok(())
    }

    fn mark(&mut self, _cue: usize, at_secs: f64, text: &str) -> ReelResult<()> {
        let m = self.current()?;
        let frame = m.fps.frame_at(at_secs).0;
        m.marks.push(ManifestMark {
            at_secs,
            frame,
            text: text.to_owned(),
        });
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    fn compose(&mut self) -> ReelResult<RenderOutput> {
        let m = self.current()?;
        m.total_frames = m.fps.frame_at(m.total_secs).0;
        let frame_count = m.total_frames;

        let mut files = Vec::new();
        if let Some(path) = &self.out {
            let m = self
                .manifest
                .as_ref()
                .ok_or_else(|| ReelError::engine("manifest not started"))?;
            let json =
                serde_json::to_string_pretty(m).map_err(|e| ReelError::serde(e.to_string()))?;
            ensure_parent_dir(path)?;
            std::fs::write(path, json)
                .with_context(|| format!("write manifest '{}'", path.display()))?;
            tracing::info!(path = %path.display(), cues = m.cues.len(), "manifest written");
            files.push(path.clone());
        }
        Ok(RenderOutput { files, frame_count })
    }
}
