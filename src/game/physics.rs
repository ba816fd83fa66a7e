//! Motion and Platform Resolution
//!
//! Per-entity update rules. Dynamic bodies resolve against the level's
//! platforms one axis at a time: horizontal first, then vertical. Fast bodies
//! can still clip corners; nothing here sweeps.

use crate::core::fixed::{
    Fixed, fixed_max,
    BULLET_SPEED, JUMP_PROBE, LINEAR_FALL_SPEED, RECOIL_DECAY,
};
use crate::core::rect::FixedRect;
use crate::core::rng::DeterministicRng;
use crate::core::vec2::FixedVec2;
use crate::game::config::GameConfig;
use crate::game::entity::{AmmoBox, Block, Bullet, FallBehavior, GroundPlayer, PlanePlayer};
use crate::game::gravity::{Fallable, GravityState};
use crate::game::level::Level;
use crate::game::spawn::respawn_block;

// =============================================================================
// AXIS-SEPARATED RESOLUTION
// =============================================================================

/// Push `rect` out of every overlapping platform along X.
///
/// Moving right puts the right edge on the platform's left edge; moving left
/// the reverse. A body with no horizontal speed is left where it is.
pub fn resolve_horizontal(rect: &mut FixedRect, vx: Fixed, level: &Level) {
    for platform in level.overlapping(rect) {
        if vx > 0 {
            rect.set_right(platform.left());
        } else if vx < 0 {
            rect.x = platform.right();
        }
    }
}

/// Push `rect` out of every overlapping platform along Y and stop it.
///
/// Returns true if any platform was hit.
pub fn resolve_vertical(rect: &mut FixedRect, gravity: &mut GravityState, level: &Level) -> bool {
    let hits = level.overlapping(rect);
    for platform in &hits {
        if gravity.speed > 0 {
            rect.set_bottom(platform.top());
        } else if gravity.speed < 0 {
            rect.y = platform.bottom();
        }
        gravity.reset();
    }
    !hits.is_empty()
}

// =============================================================================
// BLOCKS
// =============================================================================

/// Advance a block by its fall strategy. Returns true if it was recycled.
///
/// A block respawns once its top edge is more than one block height below the
/// field.
pub fn fall_block(block: &mut Block, rng: &mut DeterministicRng, config: &GameConfig) -> bool {
    let limit = config.height_fixed().wrapping_add(block.rect.h);
    match block.fall_behavior() {
        FallBehavior::Linear => {
            block.rect.y = block.rect.y.wrapping_add(LINEAR_FALL_SPEED);
            if block.rect.y > limit {
                respawn_block(block, rng, config);
                return true;
            }
            false
        }
        FallBehavior::Gravity => {
            block.apply_gravity();
            let mut respawned = false;
            if block.rect.y > limit {
                block.gravity.reset();
                respawn_block(block, rng, config);
                respawned = true;
            }
            block.rect.y = block.rect.y.wrapping_add(block.gravity.speed);
            respawned
        }
    }
}

// =============================================================================
// PROJECTILES AND PICKUPS
// =============================================================================

/// Move a bullet up. Returns false once it has left the top of the field.
pub fn move_bullet(bullet: &mut Bullet) -> bool {
    if bullet.rect.bottom() < 0 {
        return false;
    }
    bullet.rect.y = bullet.rect.y.wrapping_sub(BULLET_SPEED);
    true
}

/// Drop an ammo box onto the floor. Returns false once it is below the field.
pub fn move_ammo_box(ammo: &mut AmmoBox, level: &Level, config: &GameConfig) -> bool {
    if ammo.rect.top() > config.height_fixed() {
        return false;
    }
    ammo.apply_gravity();
    ammo.rect.y = ammo.rect.y.wrapping_add(ammo.gravity.speed);
    resolve_vertical(&mut ammo.rect, &mut ammo.gravity, level);
    true
}

// =============================================================================
// PLAYERS
// =============================================================================

/// Place the plane on the aim point, pushed down by recoil, then decay recoil.
pub fn update_plane(plane: &mut PlanePlayer, aim: FixedVec2) {
    let center = FixedVec2::new(aim.x, aim.y.wrapping_add(plane.recoil));
    plane.rect.set_center(center);
    plane.recoil = fixed_max(plane.recoil.wrapping_sub(RECOIL_DECAY), 0);
}

/// Stop a descending or resting player at the bottom of the field.
///
/// Returns true when the clamp applied.
pub fn boundary_check(player: &mut GroundPlayer, config: &GameConfig) -> bool {
    let floor = config.height_fixed();
    if player.rect.bottom() >= floor && player.gravity.is_descending_or_resting() {
        player.gravity.reset();
        player.rect.set_bottom(floor);
        return true;
    }
    false
}

/// Full ground player step: gravity, boundary, then X and Y resolution.
pub fn update_ground_player(player: &mut GroundPlayer, level: &Level, config: &GameConfig) {
    player.apply_gravity();
    boundary_check(player, config);

    player.rect.x = player.rect.x.wrapping_add(player.vx);
    resolve_horizontal(&mut player.rect, player.vx, level);

    player.rect.y = player.rect.y.wrapping_add(player.gravity.speed);
    resolve_vertical(&mut player.rect, &mut player.gravity, level);

    player.update_facing();
}

/// Is there something under the player to jump from?
///
/// Probes two pixels down for a platform; the bottom of the field also counts.
pub fn can_jump(player: &GroundPlayer, level: &Level, config: &GameConfig) -> bool {
    let probe = player.rect.offset(FixedVec2::new(0, JUMP_PROBE));
    level.any_overlap(&probe) || player.rect.bottom() >= config.height_fixed()
}

/// Start a jump if grounded. Returns true if the jump happened.
pub fn try_jump(player: &mut GroundPlayer, level: &Level, config: &GameConfig) -> bool {
    if can_jump(player, level, config) {
        player.gravity.speed = -config.ground_player.jump_fixed();
        true
    } else {
        false
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fixed::{from_int, FIXED_ONE, GRAVITY_KICK, GRAVITY_STEP, RECOIL_DISTANCE};
    use crate::game::config::GroundPlayerConfig;
    use crate::game::entity::{Payload, Platform};

    fn floor_level() -> Level {
        Level {
            platforms: (0..80).map(|i| Platform::from_pixels(i * 10, 590, 10, 10)).collect(),
            ..Level::default()
        }
    }

    fn ground_player_at(x: i32, y: i32) -> GroundPlayer {
        let mut player = GroundPlayer::new(&GroundPlayerConfig::default());
        player.rect.x = from_int(x);
        player.rect.y = from_int(y);
        player
    }

    #[test]
    fn test_linear_block_falls_one_pixel() {
        let config = GameConfig::classic();
        let mut rng = DeterministicRng::new(1);
        let mut block = Block::new(0, FixedVec2::from_ints(100, 100), Payload::None, FallBehavior::Linear);
        assert!(!fall_block(&mut block, &mut rng, &config));
        assert_eq!(block.rect.y, from_int(101));
        assert_eq!(block.gravity.speed, 0);
    }

    #[test]
    fn test_linear_block_respawns_past_bottom() {
        let config = GameConfig::classic();
        let mut rng = DeterministicRng::new(1);
        let mut block = Block::new(0, FixedVec2::from_ints(100, 620), Payload::None, FallBehavior::Linear);

        // 621 > 620 is past the limit
        assert!(fall_block(&mut block, &mut rng, &config));
        assert!(block.rect.y < from_int(-20));
        assert_eq!(block.fall_behavior(), FallBehavior::Linear);
    }

    #[test]
    fn test_gravity_block_accelerates() {
        let config = GameConfig::classic();
        let mut rng = DeterministicRng::new(1);
        let mut block = Block::new(0, FixedVec2::from_ints(100, 0), Payload::None, FallBehavior::Gravity);

        fall_block(&mut block, &mut rng, &config);
        assert_eq!(block.rect.y, GRAVITY_KICK);
        fall_block(&mut block, &mut rng, &config);
        assert_eq!(block.rect.y, GRAVITY_KICK * 2 + GRAVITY_STEP);
    }

    #[test]
    fn test_gravity_block_respawn_resets_speed() {
        let config = GameConfig::classic();
        let mut rng = DeterministicRng::new(1);
        let mut block = Block::new(0, FixedVec2::from_ints(100, 700), Payload::None, FallBehavior::Gravity);
        block.gravity.speed = from_int(9);

        assert!(fall_block(&mut block, &mut rng, &config));
        assert_eq!(block.gravity.speed, 0);
        assert!(block.rect.y < from_int(-20));
        assert_eq!(block.fall_behavior(), FallBehavior::Gravity);
    }

    #[test]
    fn test_bullet_moves_up_then_expires() {
        let mut bullet = Bullet::at_center(0, FixedVec2::from_ints(50, 10));
        // spans 5..15
        assert!(move_bullet(&mut bullet));
        assert_eq!(bullet.rect.y, from_int(-3));
        assert!(move_bullet(&mut bullet));
        assert_eq!(bullet.rect.bottom(), from_int(-1));
        assert!(!move_bullet(&mut bullet));
    }

    #[test]
    fn test_ammo_box_lands_on_floor() {
        let config = GameConfig::classic();
        let level = floor_level();
        let mut ammo = AmmoBox::at_center(0, FixedVec2::from_ints(100, 500));

        for _ in 0..200 {
            assert!(move_ammo_box(&mut ammo, &level, &config));
        }
        assert_eq!(ammo.rect.bottom(), from_int(590));
        assert_eq!(ammo.vx, 0);
    }

    #[test]
    fn test_ammo_box_lost_through_gap() {
        let config = GameConfig::classic();
        let mut ammo = AmmoBox::at_center(0, FixedVec2::from_ints(100, 500));
        let empty = Level::default();

        let mut ticks = 0;
        while move_ammo_box(&mut ammo, &empty, &config) {
            ticks += 1;
            assert!(ticks < 1000);
        }
        assert!(ammo.rect.top() > from_int(600));
    }

    #[test]
    fn test_plane_follows_aim_with_recoil() {
        let mut plane = PlanePlayer::new(20);
        update_plane(&mut plane, FixedVec2::from_ints(400, 300));
        assert_eq!(plane.rect.center(), FixedVec2::from_ints(400, 300));

        plane.recoil = RECOIL_DISTANCE;
        update_plane(&mut plane, FixedVec2::from_ints(400, 300));
        assert_eq!(plane.rect.center(), FixedVec2::from_ints(400, 310));
        assert_eq!(plane.recoil, from_int(9));

        for _ in 0..20 {
            update_plane(&mut plane, FixedVec2::from_ints(400, 300));
        }
        assert_eq!(plane.recoil, 0);
        assert_eq!(plane.rect.center(), FixedVec2::from_ints(400, 300));
    }

    #[test]
    fn test_boundary_check_zeroes_speed() {
        let config = GameConfig::classic();
        let mut player = ground_player_at(100, 570);
        player.gravity.speed = from_int(4);

        assert!(boundary_check(&mut player, &config));
        assert_eq!(player.gravity.speed, 0);
        assert_eq!(player.rect.bottom(), from_int(600));

        // rising players are left alone
        let mut rising = ground_player_at(100, 570);
        rising.gravity.speed = from_int(-6);
        assert!(!boundary_check(&mut rising, &config));
        assert_eq!(rising.gravity.speed, from_int(-6));
    }

    #[test]
    fn test_boundary_holds_through_update() {
        let config = GameConfig::classic();
        let level = Level::default();
        let mut player = ground_player_at(100, 568);

        update_ground_player(&mut player, &level, &config);
        assert_eq!(player.vy(), 0);
        assert_eq!(player.rect.bottom(), from_int(600));
    }

    #[test]
    fn test_ground_player_settles_on_floor() {
        let config = GameConfig::classic();
        let level = floor_level();
        let mut player = ground_player_at(100, 0);

        for _ in 0..120 {
            update_ground_player(&mut player, &level, &config);
        }
        assert_eq!(player.rect.bottom(), from_int(590));
        assert_eq!(player.vy(), 0);
    }

    #[test]
    fn test_horizontal_resolution_against_wall() {
        let config = GameConfig::classic();
        let level = Level {
            platforms: vec![Platform::from_pixels(140, 500, 10, 100)],
            ..Level::default()
        };
        let mut player = ground_player_at(100, 560);
        player.vx = config.ground_player.speed_fixed();

        for _ in 0..10 {
            update_ground_player(&mut player, &level, &config);
        }
        assert_eq!(player.rect.right(), from_int(140));
        assert_eq!(player.vx, 3 * FIXED_ONE);
    }

    #[test]
    fn test_jump_needs_ground() {
        let config = GameConfig::classic();
        let level = floor_level();

        let mut grounded = ground_player_at(100, 558);
        assert!(try_jump(&mut grounded, &level, &config));
        assert_eq!(grounded.vy(), from_int(-6));

        let mut airborne = ground_player_at(100, 300);
        assert!(!try_jump(&mut airborne, &level, &config));
        assert_eq!(airborne.vy(), 0);

        // the bottom of the field counts as ground
        let mut at_bottom = ground_player_at(100, 568);
        assert!(try_jump(&mut at_bottom, &Level::default(), &config));
    }

    #[test]
    fn test_jump_rises_then_lands() {
        let config = GameConfig::classic();
        let level = floor_level();
        let mut player = ground_player_at(100, 558);

        assert!(try_jump(&mut player, &level, &config));
        update_ground_player(&mut player, &level, &config);
        assert!(player.rect.bottom() < from_int(590));

        for _ in 0..120 {
            update_ground_player(&mut player, &level, &config);
        }
        assert_eq!(player.rect.bottom(), from_int(590));
        assert_eq!(player.vy(), 0);
    }
}
