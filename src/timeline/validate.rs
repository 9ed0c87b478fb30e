//! Static validation of a scene before anything is sent to an engine.
//!
//! Checks, in timeline order:
//! - every referenced object exists and its dependencies were declared before it
//! - no object is referenced after it was faded out or morphed away
//! - animations match their targets (arrows for `GrowArrow`, strokes for passing flashes,
//!   nothing for camera moves)
//! - groups are non-empty and durations are positive

use crate::{
    animation::kind::{Animation, TargetRule},
    foundation::error::{ReelError, ReelResult},
    scene::object::{ObjectId, ObjectKind, VisualObject},
    timeline::{Cue, Group, Step, Timeline, check_duration},
};

/// Validate `timeline` against the objects of its scene.
pub fn validate_scene(objects: &[VisualObject], timeline: &Timeline) -> ReelResult<()> {
    for (i, obj) in objects.iter().enumerate() {
        if obj.id.index() != i {
            return Err(ReelError::script(format!(
                "object {} stored at index {i}",
                obj.label()
            )));
        }
        obj.kind.validate()?;
        for dep in obj.kind.dependencies() {
            if dep.index() >= i {
                return Err(ReelError::script(format!(
                    "object {} depends on #{} which is not declared before it",
                    obj.label(),
                    dep.0
                )));
            }
        }
        if let ObjectKind::Slice { of, end, .. } = &obj.kind {
            match &objects[of.index()].kind {
                ObjectKind::MathTex { parts, .. } if *end <= parts.len() => {}
                ObjectKind::MathTex { parts, .. } => {
                    return Err(ReelError::script(format!(
                        "slice {} ends at part {end} but the equation has {}",
                        obj.label(),
                        parts.len()
                    )));
                }
                _ => {
                    return Err(ReelError::script(format!(
                        "slice {} must select parts of an equation",
                        obj.label()
                    )));
                }
            }
        }
    }

    let mut life = Lifecycle::new(objects);
    for (index, cue) in timeline.cues().iter().enumerate() {
        match cue {
            Cue::Play(group) => life.play(index, group)?,
            Cue::Hold { secs } => check_duration("hold", *secs)?,
            Cue::Mark { .. } => {}
        }
    }
    Ok(())
}

struct Lifecycle<'a> {
    objects: &'a [VisualObject],
    destroyed_at: Vec<Option<usize>>,
}

impl<'a> Lifecycle<'a> {
    fn new(objects: &'a [VisualObject]) -> Self {
        Self {
            objects,
            destroyed_at: vec![None; objects.len()],
        }
    }

    fn play(&mut self, cue: usize, group: &Group) -> ReelResult<()> {
        if group.members.is_empty() {
            return Err(ReelError::script(format!("cue {cue} plays an empty group")));
        }
        if let Some(rt) = group.run_time {
            check_duration("group run_time", rt)?;
        }

        // Members start together, so every reference is checked against the state before the
        // group; destruction takes effect once the whole group has played.
        let mut doomed = Vec::new();
        for step in group.steps() {
            if let Some(rt) = step.run_time {
                check_duration("step run_time", rt)?;
            }
            step.animation.validate()?;
            self.check_targets(cue, step)?;
            for id in step.referenced() {
                self.check_alive(cue, id)?;
            }
            if step.animation.destroys_targets() {
                doomed.extend(step.targets.iter().copied());
            }
        }
        for id in doomed {
            self.destroy(id, cue);
        }
        Ok(())
    }

    fn check_targets(&self, cue: usize, step: &Step) -> ReelResult<()> {
        let name = step.animation.name();
        let rule = step.animation.target_rule();
        if rule == TargetRule::Camera {
            if !step.targets.is_empty() {
                return Err(ReelError::script(format!(
                    "cue {cue}: {name} acts on the camera and takes no objects"
                )));
            }
            return Ok(());
        }
        if step.targets.is_empty() {
            return Err(ReelError::script(format!("cue {cue}: {name} has no targets")));
        }
        for &id in &step.targets {
            let obj = self.get(cue, id)?;
            let ok = match rule {
                TargetRule::Arrows => obj.kind.is_arrow(),
                TargetRule::Strokes => obj.kind.is_stroke(),
                TargetRule::AnyObject | TargetRule::Camera => true,
            };
            if !ok {
                return Err(ReelError::script(format!(
                    "cue {cue}: {name} cannot act on {}",
                    obj.label()
                )));
            }
        }
        if let Animation::Transform { into } = step.animation
            && step.targets.contains(&into)
        {
            return Err(ReelError::script(format!(
                "cue {cue}: {} cannot be morphed into itself",
                self.get(cue, into)?.label()
            )));
        }
        Ok(())
    }

    fn get(&self, cue: usize, id: ObjectId) -> ReelResult<&'a VisualObject> {
        self.objects.get(id.index()).ok_or_else(|| {
            ReelError::script(format!("cue {cue} references unknown object #{}", id.0))
        })
    }

    fn check_alive(&self, cue: usize, id: ObjectId) -> ReelResult<()> {
        let obj = self.get(cue, id)?;
        if let Some((dead, at)) = self.dead_member(id) {
            let dead_label = self.objects[dead.index()].label();
            let detail = if dead == id {
                String::new()
            } else {
                format!(" (through {dead_label})")
            };
            return Err(ReelError::script(format!(
                "cue {cue} references {}{detail}, destroyed at cue {at}",
                obj.label()
            )));
        }
        Ok(())
    }

    /// First destroyed object among `id` and everything it is built from.
    fn dead_member(&self, id: ObjectId) -> Option<(ObjectId, usize)> {
        if let Some(at) = self.destroyed_at[id.index()] {
            return Some((id, at));
        }
        self.objects[id.index()]
            .kind
            .dependencies()
            .into_iter()
            .find_map(|dep| self.dead_member(dep))
    }

    fn destroy(&mut self, id: ObjectId, cue: usize) {
        if self.destroyed_at[id.index()].is_none() {
            self.destroyed_at[id.index()] = Some(cue);
        }
        let objects = self.objects;
        if let ObjectKind::Group { children } = &objects[id.index()].kind {
            for &child in children {
                self.destroy(child, cue);
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/validate.rs"]
mod tests;
