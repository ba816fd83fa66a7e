//! Block Spawning and Recycling
//!
//! Deterministic spawn rolls. All randomness comes from the world RNG, and
//! the roll order below is part of the replay format: changing it changes
//! every recorded game.

use tracing::debug;

use crate::core::rng::DeterministicRng;
use crate::core::vec2::FixedVec2;
use crate::game::config::GameConfig;
use crate::game::entity::{AmmoBox, Block, FallBehavior, Payload};

/// Roll a payload: Bomb or Fuel (evenly) with the configured chance, else None.
pub fn roll_payload(rng: &mut DeterministicRng, config: &GameConfig) -> Payload {
    if rng.roll_percent(config.payload_chance_percent) {
        if rng.next_int(2) == 0 {
            Payload::Bomb
        } else {
            Payload::Fuel
        }
    } else {
        Payload::None
    }
}

/// Roll a fall strategy. Done once per block, never on respawn.
pub fn roll_fall_behavior(rng: &mut DeterministicRng, config: &GameConfig) -> FallBehavior {
    if rng.roll_percent(config.gravity_fall_chance_percent) {
        FallBehavior::Gravity
    } else {
        FallBehavior::Linear
    }
}

/// Create one of the blocks present at game start.
///
/// Start positions span from above the field down to its bottom edge, so some
/// blocks are already visible on the first frame.
pub fn spawn_initial_block(id: u32, rng: &mut DeterministicRng, config: &GameConfig) -> Block {
    let payload = roll_payload(rng, config);
    let fall = roll_fall_behavior(rng, config);
    let x = rng.next_pixel(0, config.field_width);
    let y = rng.next_pixel(config.spawn_min_y, config.field_height);

    debug!(id, ?payload, ?fall, "Block spawned");
    Block::new(id, FixedVec2::new(x, y), payload, fall)
}

/// Create the whole starting population.
pub fn spawn_initial_blocks(rng: &mut DeterministicRng, config: &GameConfig) -> Vec<Block> {
    (0..config.initial_block_count)
        .map(|id| spawn_initial_block(id, rng, config))
        .collect()
}

/// Send a block back above the field with a fresh payload.
///
/// Position and payload change; id and fall strategy do not.
pub fn respawn_block(block: &mut Block, rng: &mut DeterministicRng, config: &GameConfig) {
    block.rect.y = rng.next_pixel(config.spawn_min_y, config.respawn_max_y);
    block.rect.x = rng.next_pixel(0, config.field_width);
    block.payload = roll_payload(rng, config);

    debug!(id = block.id, payload = ?block.payload, "Block respawned");
}

/// Ammo box a shot block leaves behind, if it carried fuel.
pub fn drop_ammo(block: &Block, ammo_id: u32) -> Option<AmmoBox> {
    match block.payload {
        Payload::Fuel => {
            debug!(block = block.id, ammo_id, "Ammo dropped");
            Some(AmmoBox::at_center(ammo_id, block.rect.center()))
        }
        Payload::Bomb | Payload::None => None,
    }
}
