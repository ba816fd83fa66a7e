//! Input Events and Player Intent
//!
//! Discrete input events turn into player intent between ticks: horizontal
//! speed and jumps for the ground player, shots for the plane. The aim sample
//! is stored and consumed by the plane's next update.

use serde::{Serialize, Deserialize};
use tracing::{debug, trace};

use crate::core::fixed::RECOIL_DISTANCE;
use crate::core::vec2::FixedVec2;
use crate::game::config::GameConfig;
use crate::game::events::{GameEvent, GameEventData};
use crate::game::physics::try_jump;
use crate::game::state::WorldState;

// =============================================================================
// INPUT TYPES
// =============================================================================

/// Keys the ground player uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    /// Run left.
    Left,
    /// Run right.
    Right,
    /// Jump.
    Up,
}

/// One discrete input event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Close the game.
    Quit,
    /// Primary button pressed. Ignored.
    FirePressed,
    /// Primary button released: fire, or restart after game over.
    FireReleased,
    /// Key pressed.
    KeyDown(Key),
    /// Key released.
    KeyUp(Key),
}

/// Everything the input source reports for one tick.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputFrame {
    /// Pointer position for the plane.
    pub aim: FixedVec2,
    /// Events in arrival order.
    pub events: Vec<InputEvent>,
}

impl InputFrame {
    /// Frame with an aim sample and no events.
    pub fn new(aim: FixedVec2) -> Self {
        Self {
            aim,
            events: Vec::new(),
        }
    }

    /// Frame with an aim sample and events.
    pub fn with_events(aim: FixedVec2, events: impl IntoIterator<Item = InputEvent>) -> Self {
        Self {
            aim,
            events: events.into_iter().collect(),
        }
    }

    /// Append an event.
    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// No events this frame.
    #[inline]
    pub fn is_idle(&self) -> bool {
        self.events.is_empty()
    }
}

/// What the driver should do after a frame's input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputOutcome {
    /// Keep running.
    Continue,
    /// The player asked to quit.
    Quit,
    /// The world was rebuilt; carries the new seed.
    Reset(u64),
}

// =============================================================================
// APPLYING INPUT
// =============================================================================

/// Apply one frame of input to the world.
///
/// Events are handled in order. `Quit` and a post-game-over reset end the
/// frame; later events in the same frame are dropped.
pub fn apply_input(state: &mut WorldState, frame: &InputFrame, config: &GameConfig) -> InputOutcome {
    state.aim = frame.aim;

    for event in &frame.events {
        trace!(?event, tick = state.tick, "Input");
        match *event {
            InputEvent::Quit => return InputOutcome::Quit,
            InputEvent::FirePressed => {}
            InputEvent::FireReleased => {
                if state.is_game_over() {
                    let seed = state.reset(config);
                    debug!(seed, "Restart requested");
                    return InputOutcome::Reset(seed);
                }
                fire(state);
            }
            InputEvent::KeyDown(Key::Left) => {
                state.ground.vx = -config.ground_player.speed_fixed();
            }
            InputEvent::KeyDown(Key::Right) => {
                state.ground.vx = config.ground_player.speed_fixed();
            }
            InputEvent::KeyDown(Key::Up) => {
                try_jump(&mut state.ground, &state.level, config);
            }
            // Only stop if still moving the released way
            InputEvent::KeyUp(Key::Left) => {
                if state.ground.vx < 0 {
                    state.ground.vx = 0;
                }
            }
            InputEvent::KeyUp(Key::Right) => {
                if state.ground.vx > 0 {
                    state.ground.vx = 0;
                }
            }
            InputEvent::KeyUp(Key::Up) => {}
        }
    }

    InputOutcome::Continue
}

/// Fire one bullet from the aim point, if the plane has ammo.
///
/// Returns the new bullet's id.
pub fn fire(state: &mut WorldState) -> Option<u32> {
    if !state.plane.try_spend_round() {
        state.push_event(GameEvent::new(state.tick, GameEventData::OutOfAmmo));
        debug!("Out of ammo");
        return None;
    }

    let aim = state.aim;
    let bullet_id = state.spawn_bullet(aim);
    state.plane.recoil = state.plane.recoil.wrapping_add(RECOIL_DISTANCE);
    state.push_event(GameEvent::bullet_fired(state.tick, bullet_id, aim, state.plane.ammo));
    Some(bullet_id)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fixed::{from_int, FIXED_ONE};
    use crate::game::state::GamePhase;

    fn world() -> (WorldState, GameConfig) {
        let config = GameConfig::classic();
        (WorldState::new(42, &config), config)
    }

    fn frame(events: impl IntoIterator<Item = InputEvent>) -> InputFrame {
        InputFrame::with_events(FixedVec2::from_ints(400, 300), events)
    }

    #[test]
    fn test_key_up_only_stops_matching_direction() {
        let (mut state, config) = world();

        // right down, left down, right up: still running left
        apply_input(
            &mut state,
            &frame([
                InputEvent::KeyDown(Key::Right),
                InputEvent::KeyDown(Key::Left),
                InputEvent::KeyUp(Key::Right),
            ]),
            &config,
        );
        assert_eq!(state.ground.vx, -3 * FIXED_ONE);

        apply_input(&mut state, &frame([InputEvent::KeyUp(Key::Left)]), &config);
        assert_eq!(state.ground.vx, 0);
    }

    #[test]
    fn test_fire_release_spawns_bullet_and_recoil() {
        let (mut state, config) = world();
        let outcome = apply_input(&mut state, &frame([InputEvent::FireReleased]), &config);

        assert_eq!(outcome, InputOutcome::Continue);
        assert_eq!(state.plane.ammo, 19);
        assert_eq!(state.plane.recoil, from_int(10));
        assert_eq!(state.bullets.len(), 1);
        assert_eq!(state.bullets[&0].rect.center(), FixedVec2::from_ints(400, 300));

        let events = state.take_events();
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0].data, GameEventData::BulletFired { ammo_left: 19, .. }));
    }

    #[test]
    fn test_fire_press_is_ignored() {
        let (mut state, config) = world();
        apply_input(&mut state, &frame([InputEvent::FirePressed]), &config);
        assert!(state.bullets.is_empty());
        assert_eq!(state.plane.ammo, 20);
    }

    #[test]
    fn test_fire_without_ammo() {
        let (mut state, config) = world();
        state.plane.ammo = 0;
        apply_input(&mut state, &frame([InputEvent::FireReleased]), &config);

        assert!(state.bullets.is_empty());
        assert_eq!(state.plane.recoil, 0);
        let events = state.take_events();
        assert!(matches!(events.as_slice(), [GameEvent { data: GameEventData::OutOfAmmo, .. }]));
    }

    #[test]
    fn test_release_after_game_over_resets_instead_of_firing() {
        let (mut state, config) = world();
        state.phase = GamePhase::GameOver;
        state.score = 4;

        let outcome = apply_input(
            &mut state,
            &frame([InputEvent::FireReleased, InputEvent::KeyDown(Key::Left)]),
            &config,
        );

        assert!(matches!(outcome, InputOutcome::Reset(_)));
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.plane.ammo, 20);
        assert!(state.bullets.is_empty());
        // events after the reset are dropped
        assert_eq!(state.ground.vx, 0);
    }

    #[test]
    fn test_quit_stops_processing() {
        let (mut state, config) = world();
        let outcome = apply_input(
            &mut state,
            &frame([InputEvent::Quit, InputEvent::FireReleased]),
            &config,
        );
        assert_eq!(outcome, InputOutcome::Quit);
        assert!(state.bullets.is_empty());
    }

    #[test]
    fn test_jump_only_from_ground() {
        let (mut state, config) = world();
        state.ground.rect.y = from_int(100);
        apply_input(&mut state, &frame([InputEvent::KeyDown(Key::Up)]), &config);
        assert_eq!(state.ground.vy(), 0);

        state.ground.rect.set_bottom(from_int(600));
        apply_input(&mut state, &frame([InputEvent::KeyDown(Key::Up)]), &config);
        assert_eq!(state.ground.vy(), from_int(-6));
    }

    #[test]
    fn test_aim_is_stored() {
        let (mut state, config) = world();
        apply_input(&mut state, &InputFrame::new(FixedVec2::from_ints(12, 34)), &config);
        assert_eq!(state.aim, FixedVec2::from_ints(12, 34));
    }
}
