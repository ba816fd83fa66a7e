//! Simulation Tick
//!
//! One fixed step of the game. The tick is total: it cannot fail, and with
//! the same seed, config and inputs it always produces the same world.

use tracing::{info, trace};

use crate::game::collision::{
    check_block_platform_collisions,
    check_bullet_block_collisions,
    check_ground_player_collisions,
    check_pickup_collisions,
    check_plane_collisions,
    check_platforms_under_blocks,
};
use crate::game::config::{CrashPolicy, GameConfig};
use crate::game::events::{GameEvent, GameEventData, GameOverCause};
use crate::game::input::{apply_input, InputFrame, InputOutcome};
use crate::game::physics::{fall_block, move_ammo_box, move_bullet, update_ground_player, update_plane};
use crate::game::spawn::{drop_ammo, respawn_block};
use crate::game::state::{GamePhase, WorldState};

/// Result of a tick.
#[derive(Debug, Default)]
pub struct TickResult {
    /// Events generated since the previous tick
    pub events: Vec<GameEvent>,
    /// Whether the game is over after this tick
    pub game_over: bool,
    /// Set on the tick the game ended
    pub cause: Option<GameOverCause>,
}

/// Run one simulation tick.
///
/// While playing, the steps run in a fixed order and each collision rule
/// sees the positions left by the previous one:
///
/// 1. motion: plane, ground player, blocks, bullets, ammo boxes
/// 2. ammo boxes touching the ground player
/// 3. bullets vs blocks
/// 4. blocks vs ground player
/// 5. blocks vs plane
/// 6. blocks vs floor
/// 7. empty sky
///
/// After game over nothing moves and nothing scores.
pub fn tick(state: &mut WorldState, config: &GameConfig) -> TickResult {
    let mut result = TickResult::default();

    if state.phase == GamePhase::GameOver {
        result.game_over = true;
        result.events = state.take_events();
        return result;
    }

    // 0. Advance tick counter
    state.tick += 1;

    // 1. Integrate motion
    integrate_motion(state, config);

    // 2. Ground player collects ammo boxes
    process_pickups(state, config);

    // 3. Bullets destroy blocks
    process_bullet_hits(state, config);

    // 4. Blocks crush the ground player
    process_ground_player_hits(state, &mut result);

    // 5. The plane rams blocks
    process_plane_rams(state);

    // 6. Blocks crash into the floor
    process_platform_crashes(state, config);

    // 7. Check end conditions
    check_end_conditions(state, &mut result);

    trace!(
        tick = state.tick,
        blocks = state.blocks.len(),
        bullets = state.bullets.len(),
        pickups = state.pickups.len(),
        score = state.score,
        "Tick"
    );

    result.game_over = state.is_game_over();
    result.events = state.take_events();
    result
}

/// Move every entity by its own rule.
fn integrate_motion(state: &mut WorldState, config: &GameConfig) {
    update_plane(&mut state.plane, state.aim);
    update_ground_player(&mut state.ground, &state.level, config);

    // Respawns draw from the RNG in block id order
    for block in state.blocks.values_mut() {
        fall_block(block, &mut state.rng, config);
    }

    state.bullets.retain(|_, bullet| move_bullet(bullet));

    let level = &state.level;
    state.pickups.retain(|_, ammo| move_ammo_box(ammo, level, config));
}

/// Apply ammo boxes the ground player is touching.
fn process_pickups(state: &mut WorldState, config: &GameConfig) {
    for ammo_id in check_pickup_collisions(state) {
        if state.pickups.remove(&ammo_id).is_none() {
            continue;
        }
        state.plane.add_ammo(config.ammo_box_bonus);
        let event = GameEvent::ammo_collected(state.tick, ammo_id, state.plane.ammo);
        state.push_event(event);
    }
}

/// Destroy shot blocks and their bullets; fuel blocks drop ammo.
fn process_bullet_hits(state: &mut WorldState, config: &GameConfig) {
    for hit in check_bullet_block_collisions(state) {
        for bullet_id in &hit.bullet_ids {
            state.bullets.remove(bullet_id);
        }

        let block = if config.respawn_shot_blocks {
            state.blocks.get(&hit.block_id).cloned()
        } else {
            state.blocks.remove(&hit.block_id)
        };
        let Some(block) = block else {
            continue;
        };

        state.push_event(GameEvent::block_shot(
            state.tick,
            block.id,
            block.payload,
            hit.bullet_ids.len() as u32,
        ));

        if let Some(ammo) = drop_ammo(&block, state.next_pickup_id) {
            let event = GameEvent::new(
                state.tick,
                GameEventData::AmmoDropped {
                    ammo_id: ammo.id,
                    position: ammo.rect.center(),
                },
            );
            state.insert_pickup(ammo);
            state.push_event(event);
        }

        if config.respawn_shot_blocks {
            if let Some(block) = state.blocks.get_mut(&hit.block_id) {
                respawn_block(block, &mut state.rng, config);
            }
        }
    }
}

/// Any block touching the ground player ends the game. Blocks stay put.
fn process_ground_player_hits(state: &mut WorldState, result: &mut TickResult) {
    let hits = check_ground_player_collisions(state);
    if hits.is_empty() {
        return;
    }
    for block_id in hits {
        state.push_event(GameEvent::new(state.tick, GameEventData::GroundPlayerHit { block_id }));
    }
    end_game(state, GameOverCause::GroundPlayerHit, result);
}

/// The plane destroys every block it touches, one point each.
fn process_plane_rams(state: &mut WorldState) {
    for block_id in check_plane_collisions(state) {
        if state.blocks.remove(&block_id).is_none() {
            continue;
        }
        state.score += 1;
        state.push_event(GameEvent::block_rammed(state.tick, block_id, state.score));
    }
}

/// Blocks meeting the floor: remove the block, or erode the floor.
fn process_platform_crashes(state: &mut WorldState, config: &GameConfig) {
    match config.crash_policy {
        CrashPolicy::RemoveBlock => {
            for block_id in check_block_platform_collisions(state) {
                state.blocks.remove(&block_id);
                state.push_event(GameEvent::new(state.tick, GameEventData::BlockCrashed { block_id }));
            }
        }
        CrashPolicy::ErodePlatform => {
            for index in check_platforms_under_blocks(state) {
                if let Some(platform) = state.level.remove_platform(index) {
                    let position = platform.rect.position();
                    state.push_event(GameEvent::new(state.tick, GameEventData::PlatformEroded { position }));
                }
            }
        }
    }
}

/// End the game once the sky is empty.
fn check_end_conditions(state: &mut WorldState, result: &mut TickResult) {
    if state.blocks.is_empty() {
        end_game(state, GameOverCause::NoBlocksLeft, result);
    }
}

/// Enter game over. Later causes in the same tick are ignored.
fn end_game(state: &mut WorldState, cause: GameOverCause, result: &mut TickResult) {
    if state.is_game_over() {
        return;
    }
    state.phase = GamePhase::GameOver;
    result.cause = Some(cause);

    info!(tick = state.tick, score = state.score, ?cause, "Game over");
    state.push_event(GameEvent::game_over(state.tick, cause, state.score));
}

/// Replay a game from recorded input frames.
///
/// Missing frames repeat the last aim sample with no events. A `Quit` stops
/// the replay; restarts after game over are replayed like any other input.
pub fn replay(
    seed: u64,
    config: &GameConfig,
    frames: &[InputFrame],
    tick_count: u32,
) -> (WorldState, Vec<GameEvent>) {
    let mut state = WorldState::new(seed, config);
    let mut all_events = Vec::new();

    for t in 0..tick_count {
        let idle;
        let frame = match frames.get(t as usize) {
            Some(frame) => frame,
            None => {
                idle = InputFrame::new(state.aim);
                &idle
            }
        };

        if apply_input(&mut state, frame, config) == InputOutcome::Quit {
            break;
        }

        let result = tick(&mut state, config);
        all_events.extend(result.events);
    }

    (state, all_events)
}

// =============================================================================
// TESTS
// =============================================================================
