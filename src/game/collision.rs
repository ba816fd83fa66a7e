//! Collision Detection
//!
//! Cross-collection overlap sweeps. Each sweep reads the world and returns
//! what collided, in deterministic order; applying the outcome is left to
//! the tick so the rules stay independent of one another.

use std::collections::BTreeSet;

use crate::game::state::WorldState;

/// A block destroyed by one or more bullets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulletHit {
    /// The block that was hit.
    pub block_id: u32,
    /// Every bullet consumed by this block.
    pub bullet_ids: Vec<u32>,
}

/// Ammo boxes touching the ground player.
pub fn check_pickup_collisions(state: &WorldState) -> Vec<u32> {
    state
        .pickups
        .values()
        .filter(|ammo| ammo.rect.overlaps(&state.ground.rect))
        .map(|ammo| ammo.id)
        .collect()
}

/// Blocks hit by bullets.
///
/// Blocks are visited in id order; a bullet consumed by one block cannot hit
/// another later in the same sweep.
pub fn check_bullet_block_collisions(state: &WorldState) -> Vec<BulletHit> {
    let mut consumed: BTreeSet<u32> = BTreeSet::new();
    let mut hits = Vec::new();

    for block in state.blocks.values() {
        let bullet_ids: Vec<u32> = state
            .bullets
            .values()
            .filter(|bullet| !consumed.contains(&bullet.id) && bullet.rect.overlaps(&block.rect))
            .map(|bullet| bullet.id)
            .collect();

        if bullet_ids.is_empty() {
            continue;
        }
        consumed.extend(bullet_ids.iter().copied());
        hits.push(BulletHit {
            block_id: block.id,
            bullet_ids,
        });
    }

    hits
}

/// Blocks touching the ground player.
pub fn check_ground_player_collisions(state: &WorldState) -> Vec<u32> {
    state
        .blocks
        .values()
        .filter(|block| block.rect.overlaps(&state.ground.rect))
        .map(|block| block.id)
        .collect()
}

/// Blocks rammed by the plane.
pub fn check_plane_collisions(state: &WorldState) -> Vec<u32> {
    state
        .blocks
        .values()
        .filter(|block| block.rect.overlaps(&state.plane.rect))
        .map(|block| block.id)
        .collect()
}

/// Blocks touching any floor platform.
pub fn check_block_platform_collisions(state: &WorldState) -> Vec<u32> {
    state
        .blocks
        .values()
        .filter(|block| state.level.any_overlap(&block.rect))
        .map(|block| block.id)
        .collect()
}

/// Indices of platforms touching any block, highest first so they can be
/// removed one by one without shifting the rest.
pub fn check_platforms_under_blocks(state: &WorldState) -> Vec<usize> {
    let mut indices: Vec<usize> = state
        .level
        .platforms
        .iter()
        .enumerate()
        .filter(|(_, platform)| state.blocks.values().any(|b| b.rect.overlaps(&platform.rect)))
        .map(|(index, _)| index)
        .collect();
    indices.reverse();
    indices
}
