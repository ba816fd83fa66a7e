//! Game Events
//!
//! What happened during a tick, for audio cues, logging and replay checks.

use serde::{Serialize, Deserialize};

use crate::core::vec2::FixedVec2;
use crate::game::audio::AudioCue;
use crate::game::entity::Payload;

/// Why a game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverCause {
    /// A block landed on the ground player.
    GroundPlayerHit,
    /// Every block is gone.
    NoBlocksLeft,
}

/// Game event data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEventData {
    /// The plane fired.
    BulletFired {
        bullet_id: u32,
        position: FixedVec2,
        ammo_left: u32,
    },

    /// Fire was released with an empty magazine.
    OutOfAmmo,

    /// A block was destroyed by bullets.
    BlockShot {
        block_id: u32,
        payload: Payload,
        bullets: u32,
    },

    /// A fuel block left an ammo box behind.
    AmmoDropped {
        ammo_id: u32,
        position: FixedVec2,
    },

    /// The ground player picked up an ammo box.
    AmmoCollected {
        ammo_id: u32,
        new_ammo: u32,
    },

    /// The plane flew into a block.
    BlockRammed {
        block_id: u32,
        new_score: u32,
    },

    /// A block hit the floor and was removed.
    BlockCrashed {
        block_id: u32,
    },

    /// A floor tile was knocked out by a block.
    PlatformEroded {
        position: FixedVec2,
    },

    /// A block touched the ground player.
    GroundPlayerHit {
        block_id: u32,
    },

    /// The game ended.
    GameOver {
        cause: GameOverCause,
        score: u32,
    },

    /// The world was rebuilt from a new seed.
    WorldReset {
        seed: u64,
    },
}

/// A game event stamped with the tick it happened on.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameEvent {
    /// Tick when event occurred
    pub tick: u32,

    /// Event data
    pub data: GameEventData,
}

impl GameEvent {
    /// Create a new event.
    pub fn new(tick: u32, data: GameEventData) -> Self {
        Self { tick, data }
    }

    /// Sound this event should trigger, if any.
    pub fn audio_cue(&self) -> Option<AudioCue> {
        match self.data {
            GameEventData::BulletFired { .. } => Some(AudioCue::PlaneFire),
            GameEventData::AmmoCollected { .. } => Some(AudioCue::PickupAmmo),
            _ => None,
        }
    }

    /// Create bullet fired event.
    pub fn bullet_fired(tick: u32, bullet_id: u32, position: FixedVec2, ammo_left: u32) -> Self {
        Self::new(
            tick,
            GameEventData::BulletFired {
                bullet_id,
                position,
                ammo_left,
            },
        )
    }

    /// Create block shot event.
    pub fn block_shot(tick: u32, block_id: u32, payload: Payload, bullets: u32) -> Self {
        Self::new(
            tick,
            GameEventData::BlockShot {
                block_id,
                payload,
                bullets,
            },
        )
    }

    /// Create ammo collected event.
    pub fn ammo_collected(tick: u32, ammo_id: u32, new_ammo: u32) -> Self {
        Self::new(tick, GameEventData::AmmoCollected { ammo_id, new_ammo })
    }

    /// Create block rammed event.
    pub fn block_rammed(tick: u32, block_id: u32, new_score: u32) -> Self {
        Self::new(tick, GameEventData::BlockRammed { block_id, new_score })
    }

    /// Create game over event.
    pub fn game_over(tick: u32, cause: GameOverCause, score: u32) -> Self {
        Self::new(tick, GameEventData::GameOver { cause, score })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audio_cues() {
        let fired = GameEvent::bullet_fired(3, 0, FixedVec2::from_ints(10, 10), 19);
        let collected = GameEvent::ammo_collected(3, 0, 29);
        let rammed = GameEvent::block_rammed(3, 0, 1);

        assert_eq!(fired.audio_cue(), Some(AudioCue::PlaneFire));
        assert_eq!(collected.audio_cue(), Some(AudioCue::PickupAmmo));
        assert_eq!(rammed.audio_cue(), None);
        assert_eq!(GameEvent::new(0, GameEventData::OutOfAmmo).audio_cue(), None);
    }

    #[test]
    fn test_event_serialization() {
        let event = GameEvent::game_over(42, GameOverCause::NoBlocksLeft, 7);
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("NoBlocksLeft"));
        let back: GameEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }
}
