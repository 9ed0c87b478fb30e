use crate::{
    engine::{Batch, Engine, EngineHandle, RenderOutput},
    foundation::error::{ReelError, ReelResult},
    scene::{object::VisualObject, script::SceneHeader},
};

/// One engine call, as received.
#[derive(Clone, Debug, PartialEq)]
pub enum EngineCall {
    /// `begin`.
    Begin {
        /// Scene name.
        scene: String,
    },
    /// `create`.
    Create {
        /// Issued handle.
        handle: EngineHandle,
        /// The object.
        object: VisualObject,
        /// Dependency handles.
        deps: Vec<EngineHandle>,
    },
    /// `animate`.
    Animate(Batch),
    /// `hold`.
    Hold {
        /// Cue index.
        cue: usize,
        /// Scene clock at the start.
        start_secs: f64,
        /// Seconds held.
        secs: f64,
    },
    /// `mark`.
    Mark {
        /// Cue index.
        cue: usize,
        /// Scene clock.
        at_secs: f64,
        /// Narration line.
        text: String,
    },
    /// `compose`.
    Compose,
}

/// In-memory engine for tests and dry runs.
#[derive(Debug, Default)]
pub struct RecordingEngine {
    header: Option<SceneHeader>,
    calls: Vec<EngineCall>,
    created: u32,
    fail_on_cue: Option<usize>,
}

impl RecordingEngine {
    /// Create a new recording engine.
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine whose `animate` fails on the batch of cue `cue`.
    pub fn failing_at(cue: usize) -> Self {
        Self {
            fail_on_cue: Some(cue),
            ..Self::default()
        }
    }

    /// Header captured in `begin`, if any.
    pub fn header(&self) -> Option<&SceneHeader> {
        self.header.as_ref()
    }

    /// Borrow the captured calls.
    pub fn calls(&self) -> &[EngineCall] {
        &self.calls
    }

    /// Batches, in order.
    pub fn batches(&self) -> impl Iterator<Item = &Batch> {
        self.calls.iter().filter_map(|c| match c {
            EngineCall::Animate(b) => Some(b),
            _ => None,
        })
    }

    /// Created objects with their handles, in creation order.
    pub fn created(&self) -> impl Iterator<Item = (EngineHandle, &VisualObject)> {
        self.calls.iter().filter_map(|c| match c {
            EngineCall::Create { handle, object, .. } => Some((*handle, object)),
            _ => None,
        })
    }

    /// Sum of batch durations and holds received.
    pub fn elapsed_secs(&self) -> f64 {
        self.calls
            .iter()
            .map(|c| match c {
                EngineCall::Animate(b) => b.duration,
                EngineCall::Hold { secs, .. } => *secs,
                _ => 0.0,
            })
            .sum()
    }
}

impl Engine for RecordingEngine {
    fn begin(&mut self, header: &SceneHeader) -> ReelResult<()> {
        self.header = Some(header.clone());
        self.calls.clear();
        self.created = 0;
        self.calls.push(EngineCall::Begin {
            scene: header.name.clone(),
        });
        Ok(())
    }

    fn create(&mut self, object: &VisualObject, deps: &[EngineHandle]) -> ReelResult<EngineHandle> {
        let handle = EngineHandle(self.created);
        self.created += 1;
        self.calls.push(EngineCall::Create {
            handle,
            object: object.clone(),
            deps: deps.to_vec(),
        });
        Ok(handle)
    }

    fn animate(&mut self, batch: &Batch) -> ReelResult<()> {
        if self.fail_on_cue == Some(batch.cue) {
            return Err(ReelError::engine(format!(
                "refusing batch of cue {}",
                batch.cue
            )));
        }
        self.calls.push(EngineCall::Animate(batch.clone()));
        Ok(())
    }

    fn hold(&mut self, cue: usize, start_secs: f64, secs: f64) -> ReelResult<()> {
        self.calls.push(EngineCall::Hold {
            cue,
            start_secs,
            secs,
        });
        Ok(())
    }

    fn mark(&mut self, cue: usize, at_secs: f64, text: &str) -> ReelResult<()> {
        self.calls.push(EngineCall::Mark {
            cue,
            at_secs,
            text: text.to_owned(),
        });
        Ok(())
    }

    fn compose(&mut self) -> ReelResult<RenderOutput> {
        if self.header.is_none() {
            return Err(ReelError::engine("compose called before begin"));
        }
        self.calls.push(EngineCall::Compose);
        let frame_count = self
            .header
            .as_ref()
            .map(|h| h.fps.frame_at(self.elapsed_secs()).0)
            .unwrap_or(0);
        Ok(RenderOutput {
            files: Vec::new(),
            frame_count,
        })
    }
}
