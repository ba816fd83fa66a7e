//! Entity Definitions
//!
//! Falling blocks, ammo boxes, bullets, both players and floor platforms.
//! Every entity is a rectangle in screen space; there is no separate hitbox.

use serde::{Serialize, Deserialize};

use crate::core::fixed::{Fixed, from_int};
use crate::core::hash::StateHasher;
use crate::core::rect::FixedRect;
use crate::core::vec2::FixedVec2;
use crate::game::config::GroundPlayerConfig;
use crate::game::gravity::{Fallable, GravityState};

// =============================================================================
// BLOCK
// =============================================================================

/// Hidden contents of a falling block.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Payload {
    /// Plain ore.
    #[default]
    None = 0,
    /// Explosive. Currently cosmetic.
    Bomb = 1,
    /// Drops an ammo box when shot.
    Fuel = 2,
}

/// Vertical motion rule of a block, fixed when the block is created.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum FallBehavior {
    /// One pixel per tick.
    #[default]
    Linear = 0,
    /// Accelerates under gravity.
    Gravity = 1,
}

/// A falling block.
///
/// `fall` is private: it is chosen at construction and there is no way to
/// change it afterwards. Respawns only move the block and re-roll `payload`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// Stable identifier, kept across respawns.
    pub id: u32,
    /// Bounds.
    pub rect: FixedRect,
    /// Contents.
    pub payload: Payload,
    fall: FallBehavior,
    /// Fall speed (only used by [`FallBehavior::Gravity`]).
    pub gravity: GravityState,
}

impl Block {
    /// Block width in pixels.
    pub const WIDTH: i32 = 20;
    /// Block height in pixels.
    pub const HEIGHT: i32 = 20;

    /// Create a block with its top-left corner at `position`.
    pub fn new(id: u32, position: FixedVec2, payload: Payload, fall: FallBehavior) -> Self {
        Self {
            id,
            rect: FixedRect::new(position.x, position.y, from_int(Self::WIDTH), from_int(Self::HEIGHT)),
            payload,
            fall,
            gravity: GravityState::REST,
        }
    }

    /// The block's fall strategy.
    #[inline]
    pub fn fall_behavior(&self) -> FallBehavior {
        self.fall
    }

    /// Hash into the world digest.
    pub fn hash_into(&self, hasher: &mut StateHasher) {
        hasher.update_u32(self.id);
        hasher.update_rect(&self.rect);
        hasher.update_u8(self.payload as u8);
        hasher.update_u8(self.fall as u8);
        hasher.update_fixed(self.gravity.speed);
    }
}

impl Fallable for Block {
    fn gravity_mut(&mut self) -> &mut GravityState {
        &mut self.gravity
    }
}

// =============================================================================
// AMMO BOX
// =============================================================================

/// Pickup dropped by a shot fuel block.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmmoBox {
    /// Identifier.
    pub id: u32,
    /// Bounds.
    pub rect: FixedRect,
    /// Fall speed.
    pub gravity: GravityState,
    /// Horizontal speed. Always zero; boxes only fall.
    pub vx: Fixed,
}

impl AmmoBox {
    /// Box width in pixels.
    pub const WIDTH: i32 = 20;
    /// Box height in pixels.
    pub const HEIGHT: i32 = 8;

    /// Create a box centered on `center`.
    pub fn at_center(id: u32, center: FixedVec2) -> Self {
        Self {
            id,
            rect: FixedRect::centered(center, from_int(Self::WIDTH), from_int(Self::HEIGHT)),
            gravity: GravityState::REST,
            vx: 0,
        }
    }

    /// Hash into the world digest.
    pub fn hash_into(&self, hasher: &mut StateHasher) {
        hasher.update_u32(self.id);
        hasher.update_rect(&self.rect);
        hasher.update_fixed(self.gravity.speed);
    }
}

impl Fallable for AmmoBox {
    fn gravity_mut(&mut self) -> &mut GravityState {
        &mut self.gravity
    }
}

// =============================================================================
// BULLET
// =============================================================================

/// Projectile fired straight up by the plane.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bullet {
    /// Identifier.
    pub id: u32,
    /// Bounds.
    pub rect: FixedRect,
}

impl Bullet {
    /// Bullet width in pixels.
    pub const WIDTH: i32 = 5;
    /// Bullet height in pixels.
    pub const HEIGHT: i32 = 10;

    /// Create a bullet centered on the aim point.
    pub fn at_center(id: u32, center: FixedVec2) -> Self {
        Self {
            id,
            rect: FixedRect::centered(center, from_int(Self::WIDTH), from_int(Self::HEIGHT)),
        }
    }
}

// =============================================================================
// PLANE PLAYER
// =============================================================================

/// The airborne shooter. Its position follows the aim sample.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanePlayer {
    /// Bounds.
    pub rect: FixedRect,
    /// Remaining shots. Only bounded by additions.
    pub ammo: u32,
    /// Downward offset from the aim point, added per shot.
    pub recoil: Fixed,
}

impl PlanePlayer {
    /// Plane width in pixels.
    pub const WIDTH: i32 = 20;
    /// Plane height in pixels.
    pub const HEIGHT: i32 = 20;

    /// Create a plane at the origin.
    pub fn new(ammo: u32) -> Self {
        Self {
            rect: FixedRect::new(0, 0, from_int(Self::WIDTH), from_int(Self::HEIGHT)),
            ammo,
            recoil: 0,
        }
    }

    /// Add ammo from a pickup.
    #[inline]
    pub fn add_ammo(&mut self, amount: u32) {
        self.ammo = self.ammo.saturating_add(amount);
    }

    /// Spend one round if any are left.
    #[inline]
    pub fn try_spend_round(&mut self) -> bool {
        if self.ammo > 0 {
            self.ammo -= 1;
            true
        } else {
            false
        }
    }
}

// =============================================================================
// GROUND PLAYER
// =============================================================================

/// Direction the ground player last moved in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Facing {
    /// Moving or last moved left.
    Left = 0,
    /// Moving or last moved right.
    #[default]
    Right = 1,
}

/// Presentation state of the ground player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnimationState {
    /// Running along the floor.
    OnGround,
    /// Rising.
    Jumping,
    /// Descending.
    Falling,
    /// Not moving at all.
    Standing,
}

/// The platformer character dodging blocks.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundPlayer {
    /// Bounds.
    pub rect: FixedRect,
    /// Horizontal speed: `-speed`, `0` or `+speed`.
    pub vx: Fixed,
    /// Vertical speed.
    pub gravity: GravityState,
    /// Last movement direction.
    pub facing: Facing,
}

impl GroundPlayer {
    /// Create the player at the top-left corner of the field.
    pub fn new(config: &GroundPlayerConfig) -> Self {
        Self {
            rect: FixedRect::new(0, 0, from_int(config.width), from_int(config.height)),
            vx: 0,
            gravity: GravityState::REST,
            facing: Facing::default(),
        }
    }

    /// Vertical speed.
    #[inline]
    pub fn vy(&self) -> Fixed {
        self.gravity.speed
    }

    /// Derive the animation state from the current velocities.
    pub fn animation(&self) -> AnimationState {
        let vertical = match self.vy() {
            vy if vy > 0 => AnimationState::Falling,
            vy if vy < 0 => AnimationState::Jumping,
            _ => AnimationState::OnGround,
        };
        if self.vx == 0 && vertical == AnimationState::OnGround {
            AnimationState::Standing
        } else {
            vertical
        }
    }

    /// Update facing from horizontal speed. Zero keeps the last facing.
    #[inline]
    pub fn update_facing(&mut self) {
        if self.vx > 0 {
            self.facing = Facing::Right;
        } else if self.vx < 0 {
            self.facing = Facing::Left;
        }
    }

    /// Hash into the world digest.
    pub fn hash_into(&self, hasher: &mut StateHasher) {
        hasher.update_rect(&self.rect);
        hasher.update_fixed(self.vx);
        hasher.update_fixed(self.gravity.speed);
        hasher.update_u8(self.facing as u8);
    }
}

impl Fallable for GroundPlayer {
    fn gravity_mut(&mut self) -> &mut GravityState {
        &mut self.gravity
    }
}

// =============================================================================
// PLATFORM
// =============================================================================

/// Static floor tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Platform {
    /// Bounds.
    pub rect: FixedRect,
}

impl Platform {
    /// Create a platform from pixel coordinates.
    pub fn from_pixels(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self {
            rect: FixedRect::new(from_int(x), from_int(y), from_int(w), from_int(h)),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fixed::FIXED_ONE;

    #[test]
    fn test_block_geometry_and_fall_behavior() {
        let block = Block::new(3, FixedVec2::from_ints(100, 100), Payload::Fuel, FallBehavior::Gravity);
        assert_eq!(block.rect.w, from_int(20));
        assert_eq!(block.rect.h, from_int(20));
        assert_eq!(block.rect.center(), FixedVec2::from_ints(110, 110));
        assert_eq!(block.fall_behavior(), FallBehavior::Gravity);
        assert_eq!(block.gravity, GravityState::REST);
    }

    #[test]
    fn test_ammo_box_centered_on_drop_point() {
        let ammo = AmmoBox::at_center(0, FixedVec2::from_ints(110, 110));
        assert_eq!(ammo.rect.center(), FixedVec2::from_ints(110, 110));
        assert_eq!(ammo.rect.x, from_int(100));
        assert_eq!(ammo.rect.y, from_int(106));
        assert_eq!(ammo.vx, 0);
    }

    #[test]
    fn test_plane_ammo() {
        let mut plane = PlanePlayer::new(1);
        assert!(plane.try_spend_round());
        assert!(!plane.try_spend_round());
        assert_eq!(plane.ammo, 0);
        plane.add_ammo(10);
        assert_eq!(plane.ammo, 10);
    }

    #[test]
    fn test_animation_states() {
        let mut player = GroundPlayer::new(&GroundPlayerConfig::default());
        assert_eq!(player.animation(), AnimationState::Standing);

        player.vx = 3 * FIXED_ONE;
        assert_eq!(player.animation(), AnimationState::OnGround);

        player.gravity.speed = FIXED_ONE;
        assert_eq!(player.animation(), AnimationState::Falling);

        player.gravity.speed = -6 * FIXED_ONE;
        player.vx = 0;
        assert_eq!(player.animation(), AnimationState::Jumping);
    }

    #[test]
    fn test_facing_sticks_when_stopped() {
        let mut player = GroundPlayer::new(&GroundPlayerConfig::default());
        player.vx = -3 * FIXED_ONE;
        player.update_facing();
        assert_eq!(player.facing, Facing::Left);
        player.vx = 0;
        player.update_facing();
        assert_eq!(player.facing, Facing::Left);
        player.vx = 3 * FIXED_ONE;
        player.update_facing();
        assert_eq!(player.facing, Facing::Right);
    }
}
