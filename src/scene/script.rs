//! Scene declaration. A [`SceneBuilder`] collects objects, semantic names and cues; `build`
//! validates the whole thing and freezes it into a [`Scene`].

use std::f64::consts::FRAC_PI_2;

use xxhash_rust::xxh3::xxh3_64_with_seed;

use crate::{
    animation::kind::Animation,
    config::SceneConfig,
    foundation::core::{Canvas, Fps, Point, Rect, Rgba8, Size, Vec2},
    foundation::error::{ReelError, ReelResult},
    foundation::rng::Rng64,
    scene::{
        jitter::{Jitter, JitterPolicy},
        layout,
        object::{ObjectId, ObjectKind, Style, VisualObject},
        registry::ObjectRegistry,
    },
    timeline::{Cue, Group, Member, Step, Timeline, check_duration, validate::validate_scene},
};

const FINGERPRINT_SEED: u64 = 0x3c6e_f372_fe94_f82b;

/// Orientation of the 3D camera. Flat scenes keep the default, which looks straight down the
/// depth axis.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Camera {
    /// Polar angle in radians.
    pub phi: f64,
    /// Azimuth in radians.
    pub theta: f64,
    /// Zoom factor.
    pub zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            phi: 0.0,
            theta: -FRAC_PI_2,
            zoom: 1.0,
        }
    }
}

/// Per-scene settings handed to the engine before any object exists.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SceneHeader {
    /// Scene id.
    pub name: String,
    /// Background color.
    pub background: Rgba8,
    /// Camera orientation at the first frame.
    pub camera: Camera,
    /// Output frame rate.
    pub fps: Fps,
    /// Output canvas.
    pub canvas: Canvas,
    /// Seed the cosmetic generator started from.
    pub seed: u64,
}

/// A fully declared, validated scene.
#[derive(Clone, Debug, serde::Serialize)]
pub struct Scene {
    header: SceneHeader,
    objects: Vec<VisualObject>,
    registry: ObjectRegistry,
    timeline: Timeline,
}

impl Scene {
    /// Settings for the engine.
    pub fn header(&self) -> &SceneHeader {
        &self.header
    }

    /// Every object, indexed by [`ObjectId`].
    pub fn objects(&self) -> &[VisualObject] {
        &self.objects
    }

    /// Object by id.
    pub fn object(&self, id: ObjectId) -> ReelResult<&VisualObject> {
        self.objects
            .get(id.index())
            .ok_or_else(|| ReelError::script(format!("unknown object #{}", id.0)))
    }

    /// Object by semantic key.
    pub fn lookup(&self, key: &str) -> ReelResult<&VisualObject> {
        self.object(self.registry.get(key)?)
    }

    /// Semantic names.
    pub fn registry(&self) -> &ObjectRegistry {
        &self.registry
    }

    /// The timeline.
    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Displayed duration: every group and hold, summed.
    pub fn total_secs(&self) -> f64 {
        self.timeline.total_secs()
    }

    /// Stable hash of the whole scene (header, poses, timeline).
    ///
    /// Two builds with the same config produce the same fingerprint.
    pub fn fingerprint(&self) -> ReelResult<u64> {
        let bytes = serde_json::to_vec(self).map_err(|e| ReelError::serde(e.to_string()))?;
        Ok(xxh3_64_with_seed(&bytes, FINGERPRINT_SEED))
    }
}

/// Mutable scene under construction.
#[derive(Debug)]
pub struct SceneBuilder {
    header: SceneHeader,
    objects: Vec<VisualObject>,
    registry: ObjectRegistry,
    cues: Vec<Cue>,
    rng: Rng64,
}

impl SceneBuilder {
    /// Start a scene. The cosmetic generator is seeded from `config.seed`.
    pub fn new(name: impl Into<String>, config: &SceneConfig) -> Self {
        Self {
            header: SceneHeader {
                name: name.into(),
                background: config.background,
                camera: Camera::default(),
                fps: config.quality.fps(),
                canvas: config.quality.canvas(),
                seed: config.seed,
            },
            objects: Vec::new(),
            registry: ObjectRegistry::new(),
            cues: Vec::new(),
            rng: Rng64::new(config.seed),
        }
    }

    /// The cosmetic random generator.
    pub fn rng(&mut self) -> &mut Rng64 {
        &mut self.rng
    }

    /// Set the camera orientation of the first frame. Only allowed before the first cue.
    pub fn set_camera(&mut self, phi: f64, theta: f64, zoom: f64) -> ReelResult<()> {
        if !self.cues.is_empty() {
            return Err(ReelError::script(
                "initial camera must be set before the first cue; animate it afterwards",
            ));
        }
        Animation::move_camera(phi, theta, zoom)?;
        self.header.camera = Camera { phi, theta, zoom };
        Ok(())
    }

    /// Declare an object.
    pub fn add(&mut self, kind: ObjectKind, style: Style) -> ReelResult<ObjectId> {
        kind.validate()?;
        for dep in kind.dependencies() {
            self.object(dep)?;
        }
        let id = u32::try_from(self.objects.len())
            .map(ObjectId)
            .map_err(|_| ReelError::script("too many objects in one scene"))?;
        let is_container = kind.is_container();
        self.objects.push(VisualObject::new(id, kind, style));
        if is_container {
            let center = self.bounds(id)?.center();
            self.objects[id.index()].pose.position = center;
        }
        Ok(id)
    }

    /// Declare an object and register it under `key`.
    pub fn add_named(
        &mut self,
        key: impl Into<String>,
        kind: ObjectKind,
        style: Style,
    ) -> ReelResult<ObjectId> {
        let id = self.add(kind, style)?;
        self.name(key, id)?;
        Ok(id)
    }

    /// Register an existing object under `key`.
    pub fn name(&mut self, key: impl Into<String>, id: ObjectId) -> ReelResult<()> {
        let key = key.into();
        self.object(id)?;
        self.registry.insert(key.clone(), id)?;
        self.objects[id.index()].key = Some(key);
        Ok(())
    }

    /// Resolve a semantic key.
    pub fn named(&self, key: &str) -> ReelResult<ObjectId> {
        self.registry.get(key)
    }

    /// Object by id.
    pub fn object(&self, id: ObjectId) -> ReelResult<&VisualObject> {
        self.objects
            .get(id.index())
            .ok_or_else(|| ReelError::script(format!("unknown object #{}", id.0)))
    }

    fn object_mut(&mut self, id: ObjectId) -> ReelResult<&mut VisualObject> {
        self.objects
            .get_mut(id.index())
            .ok_or_else(|| ReelError::script(format!("unknown object #{}", id.0)))
    }

    /// Group `children` so they can be animated as one.
    pub fn group(&mut self, children: impl IntoIterator<Item = ObjectId>) -> ReelResult<ObjectId> {
        let children: Vec<_> = children.into_iter().collect();
        if children.is_empty() {
            return Err(ReelError::script("group must have at least one member"));
        }
        self.add(ObjectKind::Group { children }, Style::default())
    }

    /// Parts `[start, end)` of the equation `of`.
    pub fn slice(&mut self, of: ObjectId, start: usize, end: usize) -> ReelResult<ObjectId> {
        match &self.object(of)?.kind {
            ObjectKind::MathTex { parts, .. } if end <= parts.len() => {}
            _ => {
                return Err(ReelError::script(format!(
                    "cannot take parts {start}..{end} of {}",
                    self.object(of)?.label()
                )));
            }
        }
        self.add(ObjectKind::Slice { of, start, end }, Style::default())
    }

    /// New object with the geometry and pose of `id`, drawn in `style`.
    pub fn copy_of(&mut self, id: ObjectId, style: Style) -> ReelResult<ObjectId> {
        let src = self.object(id)?;
        if src.kind.is_container() {
            return Err(ReelError::script(format!(
                "only drawable objects can be copied, not {}",
                src.label()
            )));
        }
        let (kind, pose) = (src.kind.clone(), src.pose);
        let copy = self.add(kind, style)?;
        self.objects[copy.index()].pose = pose;
        Ok(copy)
    }

    /// Scene-space bounds. Groups cover their members; slices cover their share of the
    /// equation's width.
    pub fn bounds(&self, id: ObjectId) -> ReelResult<Rect> {
        let obj = self.object(id)?;
        match &obj.kind {
            ObjectKind::Group { children } => {
                let mut out: Option<Rect> = None;
                for &child in children {
                    let r = self.bounds(child)?;
                    out = Some(out.map_or(r, |acc| acc.union(r)));
                }
                Ok(out.unwrap_or_else(|| obj.bounds()))
            }
            ObjectKind::Slice { of, start, end } => {
                let parent = self.bounds(*of)?;
                let ObjectKind::MathTex { parts, .. } = &self.object(*of)?.kind else {
                    return Err(ReelError::script(format!(
                        "slice {} must select parts of an equation",
                        obj.label()
                    )));
                };
                let widths: Vec<f64> = parts
                    .iter()
                    .map(|p| layout::tex_display(p).chars().count() as f64)
                    .collect();
                let (Some(before), Some(inside)) = (widths.get(..*start), widths.get(*start..*end))
                else {
                    return Err(ReelError::script(format!(
                        "slice {} is out of range",
                        obj.label()
                    )));
                };
                let total: f64 = widths.iter().sum::<f64>().max(1.0);
                let before: f64 = before.iter().sum();
                let inside: f64 = inside.iter().sum();
                let x0 = parent.x0 + parent.width() * before / total;
                let x1 = x0 + parent.width() * inside / total;
                Ok(Rect::new(x0, parent.y0, x1, parent.y1))
            }
            _ => Ok(obj.bounds()),
        }
    }

    /// Move by `delta`. Groups move their members.
    pub fn shift(&mut self, id: ObjectId, delta: Vec2) -> ReelResult<()> {
        let kind = self.object(id)?.kind.clone();
        match kind {
            ObjectKind::Group { children } => {
                for child in children {
                    self.shift(child, delta)?;
                }
                self.object_mut(id)?.shift(delta);
                Ok(())
            }
            ObjectKind::Slice { .. } => Err(ReelError::script(
                "a slice cannot be moved apart from its equation",
            )),
            _ => {
                self.object_mut(id)?.shift(delta);
                Ok(())
            }
        }
    }

    /// Move so the bounds are centered on `target`.
    pub fn move_to(&mut self, id: ObjectId, target: Point) -> ReelResult<()> {
        let center = self.bounds(id)?.center();
        self.shift(id, target - center)
    }

    /// Place beside `anchor` in direction `dir`.
    pub fn next_to(&mut self, id: ObjectId, anchor: ObjectId, dir: Vec2, buff: f64) -> ReelResult<()> {
        let anchor = self.bounds(anchor)?;
        self.place_beside(id, anchor, dir, buff)
    }

    /// Place beside a bare point in direction `dir`.
    pub fn next_to_point(&mut self, id: ObjectId, point: Point, dir: Vec2, buff: f64) -> ReelResult<()> {
        self.place_beside(id, Rect::from_center_size(point, Size::ZERO), dir, buff)
    }

    fn place_beside(&mut self, id: ObjectId, anchor: Rect, dir: Vec2, buff: f64) -> ReelResult<()> {
        let size = self.bounds(id)?.size();
        self.move_to(id, layout::next_to(anchor, size, dir, buff))
    }

    /// Push against the frame edge in direction `dir`.
    pub fn to_edge(&mut self, id: ObjectId, dir: Vec2, buff: f64) -> ReelResult<()> {
        let r = self.bounds(id)?;
        self.move_to(id, layout::to_edge(r.center(), r.size(), dir, buff))
    }

    /// Arrange `ids` row-major on a centered grid.
    pub fn arrange_in_grid(
        &mut self,
        ids: &[ObjectId],
        rows: usize,
        cols: usize,
        buff: f64,
    ) -> ReelResult<()> {
        let sizes = ids
            .iter()
            .map(|&id| self.bounds(id).map(|r| r.size()))
            .collect::<ReelResult<Vec<_>>>()?;
        let centers = layout::grid_positions(&sizes, rows, cols, buff)?;
        for (&id, c) in ids.iter().zip(centers) {
            self.move_to(id, c)?;
        }
        Ok(())
    }

    /// Draw one jitter from the scene generator and apply it to `id`.
    pub fn jitter(&mut self, id: ObjectId, policy: &JitterPolicy) -> ReelResult<Jitter> {
        policy.validate()?;
        if self.object(id)?.kind.is_container() {
            return Err(ReelError::script("jitter applies to drawable objects only"));
        }
        let j = policy.sample(&mut self.rng);
        j.apply(&mut self.object_mut(id)?.pose);
        Ok(j)
    }

    /// Strokes a draw-on animation of `id` traces.
    pub fn strokes(&self, id: ObjectId) -> ReelResult<usize> {
        match &self.object(id)?.kind {
            ObjectKind::Group { children } => children.iter().map(|&c| self.strokes(c)).sum(),
            ObjectKind::Slice { of, start, end } => match &self.object(*of)?.kind {
                ObjectKind::MathTex { parts, .. } => parts
                    .get(*start..*end)
                    .map(|sel| sel.iter().map(|p| layout::tex_strokes(p)).sum())
                    .ok_or_else(|| ReelError::script("slice is out of range")),
                _ => Err(ReelError::script("slice of a non-equation")),
            },
            kind => Ok(kind.strokes()),
        }
    }

    /// Append a group. Single steps without a run time (in a group without one) get their
    /// kind's default, so a long `Write` lasts longer than a short one.
    pub fn play(&mut self, mut group: Group) -> ReelResult<f64> {
        if group.run_time.is_none() {
            for member in &mut group.members {
                if let Member::Single(step) = member
                    && step.run_time.is_none()
                {
                    let strokes = step
                        .targets
                        .iter()
                        .map(|&t| self.strokes(t))
                        .sum::<ReelResult<usize>>()?;
                    step.run_time = Some(step.animation.default_run_time(strokes));
                }
            }
        }
        let secs = group.duration();
        tracing::debug!(
            scene = %self.header.name,
            cue = self.cues.len(),
            steps = group.steps().count(),
            secs,
            "play"
        );
        self.cues.push(Cue::Play(group));
        Ok(secs)
    }

    /// Append a group holding a single step.
    pub fn play_step(&mut self, step: Step) -> ReelResult<f64> {
        self.play(Group::new().with(step))
    }

    /// Hold the current frame for `secs`.
    pub fn wait(&mut self, secs: f64) -> ReelResult<()> {
        check_duration("wait", secs)?;
        self.cues.push(Cue::Hold { secs });
        Ok(())
    }

    /// Drop a narration marker at the current point of the timeline.
    pub fn mark(&mut self, text: impl Into<String>) {
        self.cues.push(Cue::Mark { text: text.into() });
    }

    /// Seconds declared so far.
    pub fn elapsed(&self) -> f64 {
        self.cues.iter().map(Cue::duration).sum()
    }

    /// Validate and freeze.
    pub fn build(self) -> ReelResult<Scene> {
        let timeline = Timeline::from_cues(self.cues);
        validate_scene(&self.objects, &timeline)?;
        tracing::info!(
            scene = %self.header.name,
            objects = self.objects.len(),
            cues = timeline.cues().len(),
            groups = timeline.group_count(),
            secs = timeline.total_secs(),
            "scene built"
        );
        Ok(Scene {
            header: self.header,
            objects: self.objects,
            registry: self.registry,
            timeline,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/script.rs"]
mod tests;
