//! Sound cues and the audio collaborator seam
//!
//! Playback itself is owned by the hosting shell; the simulation only names
//! which cue to play.

/// Sound cue types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    /// Item caught by the player
    Collect,
    /// Item reached the ground line
    Fail,
    /// UI/scene start feedback
    Btn,
}

impl Cue {
    /// Cue name in the audio sprite
    pub fn as_str(&self) -> &'static str {
        match self {
            Cue::Collect => "collect",
            Cue::Fail => "fail",
            Cue::Btn => "btn",
        }
    }
}

/// Audio playback collaborator
pub trait AudioSink {
    /// Play a cue; implementations must not block
    fn play(&mut self, cue: Cue);
}

/// Sink that discards every cue (headless runs, tests)
#[derive(Debug, Default, Clone, Copy)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, _cue: Cue) {}
}

/// Sink that logs cues instead of playing them
#[derive(Debug, Default, Clone, Copy)]
pub struct LogAudio;

impl AudioSink for LogAudio {
    fn play(&mut self, cue: Cue) {
        log::debug!("audio cue: {}", cue.as_str());
    }
}

impl<A: AudioSink> AudioSink for std::rc::Rc<std::cell::RefCell<A>> {
    fn play(&mut self, cue: Cue) {
        self.borrow_mut().play(cue);
    }
}

/// Recording sink for asserting on played cues
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct CueLog {
    pub cues: Vec<Cue>,
}

#[cfg(test)]
impl AudioSink for CueLog {
    fn play(&mut self, cue: Cue) {
        self.cues.push(cue);
    }
}
