//! Audio Collaborator
//!
//! The simulation only names sounds. Playing them is up to an injected
//! [`AudioSink`]; a sink that fails is logged and otherwise ignored.

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Serialize, Deserialize};
use thiserror::Error;

/// Sound cues the game can request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AudioCue {
    /// The plane fired a bullet.
    PlaneFire,
    /// The ground player picked up an ammo box.
    PickupAmmo,
}

impl AudioCue {
    /// Every cue, in a stable order.
    pub const ALL: [AudioCue; 2] = [AudioCue::PlaneFire, AudioCue::PickupAmmo];

    /// Conventional asset name for this cue.
    pub fn asset_name(self) -> &'static str {
        match self {
            AudioCue::PlaneFire => "PLANE_FIRE.wav",
            AudioCue::PickupAmmo => "PICKUP_AMMO.wav",
        }
    }
}

/// Audio playback errors.
#[derive(Debug, Error)]
pub enum AudioError {
    /// No sound was loaded for the cue.
    #[error("no sound loaded for {0:?}")]
    Missing(AudioCue),

    /// The backend refused to play.
    #[error("audio backend failed: {0}")]
    Backend(String),
}

/// Something that can play cues.
pub trait AudioSink {
    /// Play a cue. Errors are reported, never fatal.
    fn play(&mut self, cue: AudioCue) -> Result<(), AudioError>;
}

/// Silent sink.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, _cue: AudioCue) -> Result<(), AudioError> {
        Ok(())
    }
}

/// Sink that records every cue it receives.
///
/// Used by the headless driver to report what would have been heard.
#[derive(Clone, Debug, Default)]
pub struct RecordingAudio {
    /// Cues in the order they were played.
    pub played: Vec<AudioCue>,
}

impl RecordingAudio {
    /// How many times `cue` was played.
    pub fn count(&self, cue: AudioCue) -> usize {
        self.played.iter().filter(|c| **c == cue).count()
    }
}

impl AudioSink for RecordingAudio {
    fn play(&mut self, cue: AudioCue) -> Result<(), AudioError> {
        self.played.push(cue);
        Ok(())
    }
}

/// A sink shared with the driver, so it can be inspected after handing it to a session.
impl<S: AudioSink> AudioSink for Rc<RefCell<S>> {
    fn play(&mut self, cue: AudioCue) -> Result<(), AudioError> {
        self.borrow_mut().play(cue)
    }
}
