//! Timeline model: groups of concurrent steps played strictly in sequence, with holds and
//! narration marks in between.

pub mod validate;

use smallvec::SmallVec;

use crate::{
    animation::kind::{Animation, DEFAULT_RUN_TIME},
    foundation::error::{ReelError, ReelResult},
    scene::object::ObjectId,
};

/// One animation applied to a set of objects.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Step {
    /// Objects the animation acts on. Empty for camera animations.
    pub targets: SmallVec<[ObjectId; 4]>,
    /// What happens to them.
    pub animation: Animation,
    /// Own run time, used only when the group sets none.
    pub run_time: Option<f64>,
}

impl Step {
    /// Step with the group's run time.
    pub fn new(animation: Animation, targets: impl IntoIterator<Item = ObjectId>) -> Self {
        Self {
            targets: targets.into_iter().collect(),
            animation,
            run_time: None,
        }
    }

    /// Step acting on the camera only.
    pub fn camera(animation: Animation) -> Self {
        Self::new(animation, [])
    }

    /// Set this step's own run time. A timed group overrides it.
    pub fn with_run_time(mut self, secs: f64) -> Self {
        self.run_time = Some(secs);
        self
    }

    /// Targets plus the morph destination, if any.
    pub fn referenced(&self) -> impl Iterator<Item = ObjectId> + '_ {
        let into = match self.animation {
            Animation::Transform { into } => Some(into),
            _ => None,
        };
        self.targets.iter().copied().chain(into)
    }
}

/// A staggered reveal: item `i` starts `i × lag_ratio × item_duration` after the first.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Stagger {
    /// Items, in start order.
    pub steps: Vec<Step>,
    /// Duration of each item.
    pub item_duration: f64,
    /// Fraction of `item_duration` between consecutive starts.
    pub lag_ratio: f64,
}

impl Stagger {
    /// Stagger with an explicit per-item duration.
    pub fn new(steps: Vec<Step>, item_duration: f64, lag_ratio: f64) -> ReelResult<Self> {
        if steps.is_empty() {
            return Err(ReelError::script("staggered reveal needs at least one item"));
        }
        check_duration("stagger item_duration", item_duration)?;
        if !(0.0..=1.0).contains(&lag_ratio) {
            return Err(ReelError::validation(format!(
                "lag_ratio must be in [0, 1], got {lag_ratio}"
            )));
        }
        Ok(Self {
            steps,
            item_duration,
            lag_ratio,
        })
    }

    /// Stagger whose last item ends exactly at `total`.
    pub fn within(total: f64, steps: Vec<Step>, lag_ratio: f64) -> ReelResult<Self> {
        check_duration("stagger total", total)?;
        let n = steps.len().max(1) as f64;
        let item = total / (1.0 + lag_ratio * (n - 1.0));
        Self::new(steps, item, lag_ratio)
    }

    /// `item_duration × (1 + lag_ratio × (n − 1))`.
    pub fn duration(&self) -> f64 {
        let n = self.steps.len() as f64;
        self.item_duration * (1.0 + self.lag_ratio * (n - 1.0))
    }

    /// Start offset of item `i`.
    pub fn offset_of(&self, i: usize) -> f64 {
        i as f64 * self.lag_ratio * self.item_duration
    }
}

/// Member of a group.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "member", rename_all = "snake_case")]
pub enum Member {
    /// Starts with the group.
    Single(Step),
    /// Starts with the group, items spread by the lag ratio.
    Staggered(Stagger),
}

/// Steps that start together. The next cue starts once every member has finished.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct Group {
    /// Members.
    pub members: Vec<Member>,
    /// Run time imposed on every single step, overriding their own.
    pub run_time: Option<f64>,
}

/// A step placed in time relative to its group's start.
#[derive(Clone, Copy, Debug)]
pub struct ScheduledStep<'a> {
    /// The step.
    pub step: &'a Step,
    /// Seconds after the group starts.
    pub offset: f64,
    /// Seconds the step lasts.
    pub duration: f64,
}

impl Group {
    /// Empty group; the run time is derived from its members' defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty group with an explicit run time.
    pub fn timed(secs: f64) -> Self {
        Self {
            members: Vec::new(),
            run_time: Some(secs),
        }
    }

    /// Add a single step.
    pub fn with(mut self, step: Step) -> Self {
        self.members.push(Member::Single(step));
        self
    }

    /// Add a staggered reveal.
    pub fn with_stagger(mut self, stagger: Stagger) -> Self {
        self.members.push(Member::Staggered(stagger));
        self
    }

    /// Every step, with its offset and duration.
    pub fn schedule(&self) -> Vec<ScheduledStep<'_>> {
        let mut out = Vec::new();
        for m in &self.members {
            match m {
                Member::Single(step) => out.push(ScheduledStep {
                    step,
                    offset: 0.0,
                    duration: self.single_duration(step),
                }),
                Member::Staggered(s) => {
                    for (i, step) in s.steps.iter().enumerate() {
                        out.push(ScheduledStep {
                            step,
                            offset: s.offset_of(i),
                            duration: s.item_duration,
                        });
                    }
                }
            }
        }
        out
    }

    /// Every step, in declaration order.
    pub fn steps(&self) -> impl Iterator<Item = &Step> {
        self.members.iter().flat_map(|m| match m {
            Member::Single(step) => std::slice::from_ref(step).iter(),
            Member::Staggered(s) => s.steps.iter(),
        })
    }

    /// Time from the group's start until its last member finishes.
    pub fn duration(&self) -> f64 {
        self.members
            .iter()
            .map(|m| match m {
                Member::Single(step) => self.single_duration(step),
                Member::Staggered(s) => s.duration(),
            })
            .fold(0.0, f64::max)
    }

    fn single_duration(&self, step: &Step) -> f64 {
        self.run_time.or(step.run_time).unwrap_or(DEFAULT_RUN_TIME)
    }
}

/// One entry of a timeline.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "cue", rename_all = "snake_case")]
pub enum Cue {
    /// Play a group of concurrent animations.
    Play(Group),
    /// Hold the current frame.
    Hold {
        /// Seconds held.
        secs: f64,
    },
    /// Zero-duration narration marker.
    Mark {
        /// Narration line.
        text: String,
    },
}

impl Cue {
    /// Seconds this cue occupies.
    pub fn duration(&self) -> f64 {
        match self {
            Self::Play(g) => g.duration(),
            Self::Hold { secs } => *secs,
            Self::Mark { .. } => 0.0,
        }
    }
}

/// A cue placed on the scene clock.
#[derive(Clone, Copy, Debug)]
pub struct CueSpan<'a> {
    /// Position in the timeline.
    pub index: usize,
    /// The cue.
    pub cue: &'a Cue,
    /// Start in seconds.
    pub start: f64,
    /// End in seconds.
    pub end: f64,
}

/// Totally ordered list of cues.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct Timeline {
    cues: Vec<Cue>,
}

impl Timeline {
    /// Timeline from cues.
    pub fn from_cues(cues: Vec<Cue>) -> Self {
        Self { cues }
    }

    /// Borrow the cues.
    pub fn cues(&self) -> &[Cue] {
        &self.cues
    }

    /// Sum of all group durations and holds.
    pub fn total_secs(&self) -> f64 {
        self.cues.iter().map(Cue::duration).sum()
    }

    /// Cues with their start and end on the scene clock.
    pub fn spans(&self) -> Vec<CueSpan<'_>> {
        let mut t = 0.0;
        self.cues
            .iter()
            .enumerate()
            .map(|(index, cue)| {
                let start = t;
                t += cue.duration();
                CueSpan {
                    index,
                    cue,
                    start,
                    end: t,
                }
            })
            .collect()
    }

    /// Number of play cues.
    pub fn group_count(&self) -> usize {
        self.cues
            .iter()
            .filter(|c| matches!(c, Cue::Play(_)))
            .count()
    }
}

pub(crate) fn check_duration(what: &str, secs: f64) -> ReelResult<()> {
    if secs.is_finite() && secs > 0.0 {
        Ok(())
    } else {
        Err(ReelError::validation(format!(
            "{what} must be finite and > 0, got {secs}"
        )))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/model.rs"]
mod tests;
