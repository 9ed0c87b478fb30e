use crate::{
    animation::kind::Animation,
    engine::{Batch, EngineHandle},
    foundation::core::{Affine, Rect, Rgba8},
    foundation::error::{ReelError, ReelResult},
    scene::{
        object::{ObjectKind, VisualObject},
        script::Camera,
    },
};

/// State of one created object.
#[derive(Clone, Debug, PartialEq)]
pub struct StageEntry {
    /// The object as declared.
    pub object: VisualObject,
    /// Handles of its dependencies.
    pub deps: Vec<EngineHandle>,
    /// On screen.
    pub visible: bool,
    /// Faded out or morphed away.
    pub retired: bool,
    /// Movement accumulated by animations, applied after the declared pose.
    pub offset: Affine,
}

impl StageEntry {
    /// Local geometry → scene space, including animated movement.
    pub fn transform(&self) -> Affine {
        self.offset * self.object.transform()
    }

    /// Scene-space bounds including animated movement.
    pub fn bounds(&self) -> Rect {
        self.offset.transform_rect_bbox(self.object.bounds())
    }
}

/// Transient effect of the last batch, drawn only on that batch's frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Highlight {
    /// Pulse in another color.
    Recolor {
        /// Object pulsed.
        handle: EngineHandle,
        /// Pulse color.
        color: Rgba8,
        /// Equation parts `[start, end)` pulsed, or the whole object.
        parts: Option<(usize, usize)>,
    },
    /// Burst of rays.
    Rays {
        /// Object at the center of the burst.
        handle: EngineHandle,
        /// Ray color.
        color: Rgba8,
        /// Ray distance in scene units.
        radius: f64,
    },
    /// A stroke shown only while the highlight travels along it.
    Trace {
        /// The stroke.
        handle: EngineHandle,
    },
}

/// What the screen looks like once every batch so far has finished.
#[derive(Clone, Debug, Default)]
pub struct Stage {
    entries: Vec<StageEntry>,
    camera: Camera,
    highlights: Vec<Highlight>,
}

impl Stage {
    /// Empty stage with the camera at `camera`.
    pub fn new(camera: Camera) -> Self {
        Self {
            camera,
            ..Self::default()
        }
    }

    /// Current camera orientation.
    pub fn camera(&self) -> Camera {
        self.camera
    }

    /// Register a created object and issue its handle.
    pub fn insert(&mut self, object: &VisualObject, deps: &[EngineHandle]) -> ReelResult<EngineHandle> {
        let handle = u32::try_from(self.entries.len())
            .map(EngineHandle)
            .map_err(|_| ReelError::engine("too many objects on stage"))?;
        if let Some(bad) = deps.iter().find(|d| d.index() >= self.entries.len()) {
            return Err(ReelError::engine(format!(
                "{} depends on unknown handle {}",
                object.label(),
                bad.0
            )));
        }
        self.entries.push(StageEntry {
            object: object.clone(),
            deps: deps.to_vec(),
            visible: false,
            retired: false,
            offset: Affine::IDENTITY,
        });
        Ok(handle)
    }

    /// Entry by handle.
    pub fn entry(&self, handle: EngineHandle) -> ReelResult<&StageEntry> {
        self.entries
            .get(handle.index())
            .ok_or_else(|| ReelError::engine(format!("unknown handle {}", handle.0)))
    }

    /// Drawable handles `handle` stands for: itself, the members of a group (recursively) or the
    /// equation of a slice.
    pub fn leaves(&self, handle: EngineHandle) -> ReelResult<Vec<EngineHandle>> {
        let entry = self.entry(handle)?;
        match entry.object.kind {
            ObjectKind::Group { .. } | ObjectKind::Slice { .. } => {
                let mut out = Vec::new();
                for &dep in &entry.deps {
                    out.extend(self.leaves(dep)?);
                }
                Ok(out)
            }
            _ => Ok(vec![handle]),
        }
    }

    // Like `leaves`, but a slice stays a part range of its equation.
    fn pulsed(
        &self,
        handle: EngineHandle,
        out: &mut Vec<(EngineHandle, Option<(usize, usize)>)>,
    ) -> ReelResult<()> {
        let entry = self.entry(handle)?;
        match entry.object.kind {
            ObjectKind::Slice { start, end, .. } => {
                for &dep in &entry.deps {
                    out.extend(self.leaves(dep)?.into_iter().map(|l| (l, Some((start, end)))));
                }
            }
            ObjectKind::Group { .. } => {
                for &dep in &entry.deps {
                    self.pulsed(dep, out)?;
                }
            }
            _ => out.push((handle, None)),
        }
        Ok(())
    }

    /// Union of the bounds of every leaf of `handle`.
    pub fn bounds(&self, handle: EngineHandle) -> ReelResult<Rect> {
        let mut out: Option<Rect> = None;
        for leaf in self.leaves(handle)? {
            let r = self.entry(leaf)?.bounds();
            out = Some(out.map_or(r, |acc| acc.union(r)));
        }
        Ok(out.unwrap_or(Rect::ZERO))
    }

    /// Apply the end state of `batch`.
    pub fn apply(&mut self, batch: &Batch) -> ReelResult<()> {
        self.highlights.clear();
        for step in &batch.steps {
            let mut leaves = Vec::new();
            for &t in &step.targets {
                leaves.extend(self.leaves(t)?);
            }
            match step.animation {
                ref a if a.reveals() => self.each(&leaves, |e| e.visible = true),
                Animation::FadeOut { .. } => self.each(&leaves, retire),
                Animation::Transform { .. } => {
                    self.each(&leaves, retire);
                    let into = step.morph_into.ok_or_else(|| {
                        ReelError::engine(format!("cue {}: morph without a destination", batch.cue))
                    })?;
                    let revealed = self.leaves(into)?;
                    self.each(&revealed, |e| {
                        e.visible = true;
                        e.retired = false;
                    });
                }
                Animation::Indicate { color, .. } => {
                    let mut pulsed = Vec::new();
                    for &t in &step.targets {
                        self.pulsed(t, &mut pulsed)?;
                    }
                    self.highlights.extend(
                        pulsed
                            .into_iter()
                            .map(|(handle, parts)| Highlight::Recolor { handle, color, parts }),
                    );
                }
                Animation::Flash { color, radius } => {
                    self.highlights
                        .extend(step.targets.iter().map(|&handle| Highlight::Rays {
                            handle,
                            color,
                            radius,
                        }))
                }
                Animation::PassingFlash { .. } => self
                    .highlights
                    .extend(leaves.iter().map(|&handle| Highlight::Trace { handle })),
                Animation::MoveBy { delta } => {
                    let m = Affine::translate(delta);
                    self.each(&leaves, |e| moved(e, m));
                }
                Animation::RotateAbout { angle, about } => {
                    let m = Affine::translate(about.to_vec2())
                        * Affine::rotate(angle)
                        * Affine::translate(-about.to_vec2());
                    self.each(&leaves, |e| moved(e, m));
                }
                Animation::MoveCamera { phi, theta, zoom } => {
                    self.camera = Camera { phi, theta, zoom };
                }
                Animation::AmbientRotation { rate } => {
                    self.camera.theta += rate * step.duration;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Forget the highlights of the last batch, as a hold shows the settled frame.
    pub fn settle(&mut self) {
        self.highlights.clear();
    }

    /// Highlights of the last batch.
    pub fn highlights(&self) -> &[Highlight] {
        &self.highlights
    }

    /// Visible drawable objects in creation order (later ones on top).
    pub fn visible(&self) -> impl Iterator<Item = (EngineHandle, &StageEntry)> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.visible && !e.object.kind.is_container())
            .map(|(i, e)| (EngineHandle(i as u32), e))
    }

    fn each(&mut self, handles: &[EngineHandle], mut f: impl FnMut(&mut StageEntry)) {
        for h in handles {
            if let Some(e) = self.entries.get_mut(h.index()) {
                f(e);
            }
        }
    }
}

// A moved object is on screen afterwards, even if it was never revealed.
fn moved(e: &mut StageEntry, m: Affine) {
    e.offset = m * e.offset;
    if !e.retired {
        e.visible = true;
    }
}

fn retire(e: &mut StageEntry) {
    e.visible = false;
    e.retired = true;
}

#[cfg(test)]
#[path = "../../tests/unit/engine/stage.rs"]
mod tests;
