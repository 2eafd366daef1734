/// Fire-and-forget sound cues.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cue {
    /// The creature was shot.
    Shot,
    /// A shot went wide.
    Miss,
}

impl Cue {
    pub fn name(&self) -> &'static str {
        match self {
            Cue::Shot => "reptile_shot",
            Cue::Miss => "gunshot",
        }
    }
}

pub trait AudioCue {
    fn play(&mut self, cue: Cue);
}

/// Collects cues until the presenter drains them at the end of the frame.
#[derive(Debug, Default)]
pub struct CueQueue {
    pending: Vec<Cue>,
}

impl CueQueue {
    pub fn drain(&mut self) -> std::vec::Drain<'_, Cue> {
        self.pending.drain(..)
    }

    pub fn pending(&self) -> &[Cue] {
        &self.pending
    }
}

impl AudioCue for CueQueue {
    fn play(&mut self, cue: Cue) {
        tracing::debug!(cue = cue.name(), "cue");
        self.pending.push(cue);
    }
}
