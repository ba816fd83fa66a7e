//! Game Session
//!
//! One running game: the world, its config and the injected audio sink.
//! The frame driver feeds it one input frame per tick and reads snapshots back.

use tracing::{info, warn};

use crate::game::audio::{AudioSink, NullAudio};
use crate::game::config::GameConfig;
use crate::game::input::{apply_input, InputFrame, InputOutcome};
use crate::game::render::RenderSnapshot;
use crate::game::state::WorldState;
use crate::game::tick::{tick, TickResult};

/// What a frame did, from the driver's point of view.
#[derive(Debug)]
pub enum FrameOutcome {
    /// The frame ran a tick.
    Ticked(TickResult),
    /// The player asked to quit; no tick was run.
    Quit,
}

/// A game instance.
pub struct GameSession {
    world: WorldState,
    config: GameConfig,
    audio: Box<dyn AudioSink>,
    games_played: u32,
}

impl GameSession {
    /// Start a game with the given seed and audio sink.
    pub fn new(seed: u64, config: GameConfig, audio: Box<dyn AudioSink>) -> Self {
        info!(seed, blocks = config.initial_block_count, "Game started");
        Self {
            world: WorldState::new(seed, &config),
            config,
            audio,
            games_played: 1,
        }
    }

    /// Start a silent game.
    pub fn silent(seed: u64, config: GameConfig) -> Self {
        Self::new(seed, config, Box::new(NullAudio))
    }

    /// Process one frame: input, then one tick, then audio cues.
    pub fn handle_frame(&mut self, frame: &InputFrame) -> FrameOutcome {
        match apply_input(&mut self.world, frame, &self.config) {
            InputOutcome::Quit => {
                info!(tick = self.world.tick, "Quit requested");
                return FrameOutcome::Quit;
            }
            InputOutcome::Reset(seed) => {
                self.games_played += 1;
                info!(seed, game = self.games_played, "Game restarted");
            }
            InputOutcome::Continue => {}
        }

        let result = tick(&mut self.world, &self.config);
        self.play_cues(&result);
        FrameOutcome::Ticked(result)
    }

    /// Restart immediately, whatever the phase. Returns the new seed.
    pub fn reset(&mut self) -> u64 {
        let seed = self.world.reset(&self.config);
        self.games_played += 1;
        info!(seed, game = self.games_played, "Game restarted");
        seed
    }

    /// Snapshot for rendering.
    pub fn snapshot(&self) -> RenderSnapshot {
        RenderSnapshot::capture(&self.world, &self.config)
    }

    /// The world.
    pub fn world(&self) -> &WorldState {
        &self.world
    }

    /// The config.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Games started in this session, including the current one.
    pub fn games_played(&self) -> u32 {
        self.games_played
    }

    fn play_cues(&mut self, result: &TickResult) {
        for cue in result.events.iter().filter_map(|event| event.audio_cue()) {
            if let Err(error) = self.audio.play(cue) {
                warn!(?cue, %error, "Audio cue failed, continuing silently");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use crate::core::fixed::from_int;
    use crate::core::vec2::FixedVec2;
    use crate::game::audio::{AudioCue, AudioError, RecordingAudio};
    use crate::game::input::InputEvent;
    use crate::game::state::GamePhase;

    struct BrokenAudio;

    impl AudioSink for BrokenAudio {
        fn play(&mut self, cue: AudioCue) -> Result<(), AudioError> {
            Err(AudioError::Missing(cue))
        }
    }

    /// Aim far above the field so the plane never rams anything.
    fn fire_frame() -> InputFrame {
        InputFrame::with_events(FixedVec2::from_ints(-100, -500), [InputEvent::FireReleased])
    }

    #[test]
    fn test_fire_plays_cue() {
        let log = Rc::new(RefCell::new(RecordingAudio::default()));
        let mut session = GameSession::new(3, GameConfig::classic(), Box::new(Rc::clone(&log)));

        let outcome = session.handle_frame(&fire_frame());

        assert!(matches!(outcome, FrameOutcome::Ticked(_)));
        assert_eq!(log.borrow().played, vec![AudioCue::PlaneFire]);
        assert_eq!(session.world().plane.ammo, 19);
    }

    #[test]
    fn test_broken_audio_does_not_stop_the_game() {
        let mut session = GameSession::new(3, GameConfig::classic(), Box::new(BrokenAudio));
        // keep the ground player clear of every block
        session.world.ground.rect.x = from_int(1000);
        for _ in 0..5 {
            session.handle_frame(&fire_frame());
        }
        assert_eq!(session.world().plane.ammo, 15);
    }

    #[test]
    fn test_quit() {
        let mut session = GameSession::silent(3, GameConfig::classic());
        let frame = InputFrame::with_events(FixedVec2::ZERO, [InputEvent::Quit]);
        assert!(matches!(session.handle_frame(&frame), FrameOutcome::Quit));
        assert_eq!(session.world().tick, 0);
    }

    #[test]
    fn test_restart_after_game_over() {
        let mut session = GameSession::silent(3, GameConfig::classic());
        session.world.phase = GamePhase::GameOver;
        session.world.score = 3;

        session.handle_frame(&fire_frame());

        assert_eq!(session.games_played(), 2);
        assert_eq!(session.world().score, 0);
        assert_eq!(session.world().tick, 1);
        assert_eq!(session.world().plane.ammo, 20);
    }

    #[test]
    fn test_explicit_reset_and_snapshot() {
        let mut session = GameSession::silent(3, GameConfig::storm());
        session.handle_frame(&InputFrame::new(FixedVec2::from_ints(400, 300)));
        session.reset();

        let snapshot = session.snapshot();
        assert_eq!(snapshot.tick, 0);
        assert_eq!(snapshot.score, 0);
        assert_eq!(session.games_played(), 2);
        assert_eq!(session.config(), &GameConfig::storm());
    }
}
