//! World State
//!
//! Everything one game owns. Collections are keyed by id in `BTreeMap`s so
//! iteration order, and with it every collision sweep, is deterministic.

use std::collections::BTreeMap;
use serde::{Serialize, Deserialize};
use tracing::debug;

use crate::core::hash::{StateHash, compute_state_hash};
use crate::core::rng::DeterministicRng;
use crate::core::vec2::FixedVec2;
use crate::game::config::GameConfig;
use crate::game::entity::{AmmoBox, Block, Bullet, GroundPlayer, PlanePlayer};
use crate::game::events::{GameEvent, GameEventData};
use crate::game::level::Level;
use crate::game::spawn::spawn_initial_blocks;

// =============================================================================
// GAME PHASE
// =============================================================================

/// Current phase of the game.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Simulation running.
    #[default]
    Playing,
    /// Frozen until a reset.
    GameOver,
}

// =============================================================================
// WORLD STATE
// =============================================================================

/// Complete state of a game.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WorldState {
    /// Ticks simulated while playing
    pub tick: u32,

    /// Current phase
    pub phase: GamePhase,

    /// RNG seed the world was built from
    pub rng_seed: u64,

    /// Deterministic RNG state
    #[serde(skip)]
    pub rng: DeterministicRng,

    /// Falling blocks by id
    pub blocks: BTreeMap<u32, Block>,

    /// Live bullets by id
    pub bullets: BTreeMap<u32, Bullet>,

    /// Ammo boxes by id
    pub pickups: BTreeMap<u32, AmmoBox>,

    /// The shooter
    pub plane: PlanePlayer,

    /// The dodger
    pub ground: GroundPlayer,

    /// Floor platforms
    pub level: Level,

    /// Blocks rammed by the plane
    pub score: u32,

    /// Latest aim sample for the plane
    pub aim: FixedVec2,

    /// Next block id (monotonic)
    pub next_block_id: u32,

    /// Next bullet id (monotonic)
    pub next_bullet_id: u32,

    /// Next ammo box id (monotonic)
    pub next_pickup_id: u32,

    /// Events generated since the last tick
    #[serde(skip)]
    pub pending_events: Vec<GameEvent>,
}

impl WorldState {
    /// Build a fresh world: blocks, both players, then the floor.
    pub fn new(rng_seed: u64, config: &GameConfig) -> Self {
        let mut rng = DeterministicRng::new(rng_seed);

        let blocks: BTreeMap<u32, Block> = spawn_initial_blocks(&mut rng, config)
            .into_iter()
            .map(|block| (block.id, block))
            .collect();
        let next_block_id = config.initial_block_count;
        let plane = PlanePlayer::new(config.plane_starting_ammo);
        let ground = GroundPlayer::new(&config.ground_player);
        let level = Level::floor(&mut rng, config);

        debug!(seed = rng_seed, blocks = blocks.len(), "World built");

        Self {
            tick: 0,
            phase: GamePhase::Playing,
            rng_seed,
            rng,
            blocks,
            bullets: BTreeMap::new(),
            pickups: BTreeMap::new(),
            plane,
            ground,
            level,
            score: 0,
            aim: FixedVec2::ZERO,
            next_block_id,
            next_bullet_id: 0,
            next_pickup_id: 0,
            pending_events: Vec::new(),
        }
    }

    /// Rebuild from scratch with a seed drawn from the current RNG.
    ///
    /// Returns the new seed. The aim sample survives the reset.
    pub fn reset(&mut self, config: &GameConfig) -> u64 {
        let seed = self.rng.next_u64();
        let aim = self.aim;
        *self = Self::new(seed, config);
        self.aim = aim;
        self.push_event(GameEvent::new(0, GameEventData::WorldReset { seed }));
        seed
    }

    /// Is the game over?
    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Number of live blocks.
    #[inline]
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Add a block, keeping the id counter ahead of it.
    pub fn insert_block(&mut self, block: Block) {
        self.next_block_id = self.next_block_id.max(block.id + 1);
        self.blocks.insert(block.id, block);
    }

    /// Spawn a bullet centered on `center`. Returns its id.
    pub fn spawn_bullet(&mut self, center: FixedVec2) -> u32 {
        let id = self.next_bullet_id;
        self.next_bullet_id += 1;
        self.bullets.insert(id, Bullet::at_center(id, center));
        id
    }

    /// Add an ammo box, keeping the id counter ahead of it.
    pub fn insert_pickup(&mut self, ammo: AmmoBox) {
        self.next_pickup_id = self.next_pickup_id.max(ammo.id + 1);
        self.pickups.insert(ammo.id, ammo);
    }

    /// Compute hash of current state for verification.
    pub fn compute_hash(&self) -> StateHash {
        compute_state_hash(self.tick, self.rng_seed, |hasher| {
            hasher.update_u8(self.phase as u8);
            hasher.update_u32(self.score);

            hasher.update_u32(self.blocks.len() as u32);
            for block in self.blocks.values() {
                block.hash_into(hasher);
            }

            hasher.update_u32(self.bullets.len() as u32);
            for bullet in self.bullets.values() {
                hasher.update_u32(bullet.id);
                hasher.update_rect(&bullet.rect);
            }

            hasher.update_u32(self.pickups.len() as u32);
            for ammo in self.pickups.values() {
                ammo.hash_into(hasher);
            }

            hasher.update_rect(&self.plane.rect);
            hasher.update_u32(self.plane.ammo);
            hasher.update_fixed(self.plane.recoil);

            self.ground.hash_into(hasher);
            self.level.hash_into(hasher);

            // RNG position catches divergent roll counts that left no trace yet
            let [s0, s1] = self.rng.state();
            hasher.update_u64(s0);
            hasher.update_u64(s1);
        })
    }

    /// Take pending events (consumes them).
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Push a game event.
    pub fn push_event(&mut self, event: GameEvent) {
        self.pending_events.push(event);
    }
}

// =============================================================================
// TESTS
// =============================================================================
