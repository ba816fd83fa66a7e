//! Q16.16 Fixed-Point Arithmetic
//!
//! Deterministic fixed-point math for the simulation.
//! Positions, sizes and speeds are all stored as `Fixed`; floats only appear
//! when converting for display.
//!
//! ## Format: Q16.16
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Bit Layout: Q16.16 (32-bit signed integer)                 │
//! ├─────────────────────────────────────────────────────────────┤
//! │  [S][IIIIIIIIIIIIIIII][FFFFFFFFFFFFFFFF]                    │
//! │   │  └──── 16 bits ────┘└──── 16 bits ────┘                 │
//! │   └─ Sign bit                                               │
//! │                                                             │
//! │  Range: -32768.0 to +32767.99998 (approx)                   │
//! │  Precision: 1/65536 ≈ 0.000015 units                        │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! One unit is one screen pixel. An 800×600 field uses a small slice of the
//! range, leaving room for blocks spawned far above the screen and for the
//! unbounded growth of fall speeds.

/// Q16.16 fixed-point number stored as i32.
/// 16 bits integer, 16 bits fractional.
pub type Fixed = i32;

/// Number of fractional bits (16)
pub const FIXED_SCALE: i32 = 16;

/// 1.0 in fixed-point (65536)
pub const FIXED_ONE: Fixed = 1 << FIXED_SCALE; // 65536

/// 0.5 in fixed-point (32768)
pub const FIXED_HALF: Fixed = FIXED_ONE >> 1; // 32768

// =============================================================================
// GAME CONSTANTS (All as integer literals - NO float conversion!)
// =============================================================================

/// Default field width: 800 px = 800 * 65536 = 52428800
pub const FIELD_WIDTH: Fixed = 52428800;

/// Default field height: 600 px = 600 * 65536 = 39321600
pub const FIELD_HEIGHT: Fixed = 39321600;

/// Initial fall speed when a body starts falling: 1.0 = 65536
pub const GRAVITY_KICK: Fixed = FIXED_ONE;

/// Fall speed added every tick after the kick: round(0.35 * 65536) = 22938
pub const GRAVITY_STEP: Fixed = 22938;

/// Linear block fall speed: 1.0 px/tick
pub const LINEAR_FALL_SPEED: Fixed = FIXED_ONE;

/// Bullet speed: 8 px/tick = 8 * 65536 = 524288
pub const BULLET_SPEED: Fixed = 524288;

/// Recoil added per shot: 10 px = 655360
pub const RECOIL_DISTANCE: Fixed = 655360;

/// Recoil decay per tick: 1 px
pub const RECOIL_DECAY: Fixed = FIXED_ONE;

/// Downward probe used to detect ground under the player before a jump: 2 px
pub const JUMP_PROBE: Fixed = 131072;

// =============================================================================
// CORE OPERATIONS (All deterministic, wrapping semantics)
// =============================================================================

/// Convert a compile-time float to fixed-point.
///
/// # Warning
/// Only use at compile-time or initialization. NEVER in tick loop.
///
/// # Example
/// ```
/// use ore_storm::core::fixed::{to_fixed, FIXED_ONE};
/// const MY_VALUE: i32 = to_fixed(2.5);
/// assert_eq!(MY_VALUE, FIXED_ONE * 2 + FIXED_ONE / 2);
/// ```
#[inline]
pub const fn to_fixed(f: f64) -> Fixed {
    (f * (FIXED_ONE as f64)) as Fixed
}

/// Convert a whole number of pixels to fixed-point.
#[inline]
pub const fn from_int(i: i32) -> Fixed {
    i << FIXED_SCALE
}

/// Whole pixels, rounding toward negative infinity.
#[inline]
pub const fn to_pixel(f: Fixed) -> i32 {
    f >> FIXED_SCALE
}

/// Convert fixed-point to float for display/rendering.
///
/// # Warning
/// Only use for visual output. NEVER use result in game logic.
#[inline]
pub fn to_float(f: Fixed) -> f32 {
    f as f32 / FIXED_ONE as f32
}

/// Halve a fixed-point number (used for centering rectangles).
#[inline]
pub fn fixed_half(x: Fixed) -> Fixed {
    x >> 1
}

/// Maximum of two fixed-point numbers.
#[inline]
pub fn fixed_max(a: Fixed, b: Fixed) -> Fixed {
    if a > b { a } else { b }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_constants() {
        assert_eq!(FIXED_ONE, 65536);
        assert_eq!(FIXED_HALF, 32768);
        assert_eq!(FIXED_SCALE, 16);
    }

    #[test]
    fn test_to_fixed() {
        assert_eq!(to_fixed(1.0), FIXED_ONE);
        assert_eq!(to_fixed(0.5), FIXED_HALF);
        assert_eq!(to_fixed(-1.0), -FIXED_ONE);
        assert_eq!(from_int(3), 3 * FIXED_ONE);
        assert_eq!(from_int(-300), -300 * FIXED_ONE);
        assert_eq!(to_pixel(to_fixed(97.5)), 97);
        assert_eq!(to_pixel(to_fixed(-0.5)), -1);
    }

    #[test]
    fn test_game_constants() {
        assert_eq!(FIELD_WIDTH, from_int(800));
        assert_eq!(FIELD_HEIGHT, from_int(600));
        assert_eq!(BULLET_SPEED, from_int(8));
        assert_eq!(RECOIL_DISTANCE, from_int(10));
        assert_eq!(JUMP_PROBE, from_int(2));
        // 0.35 within one ulp
        assert!((GRAVITY_STEP - to_fixed(0.35)).abs() <= 1);
    }

    #[test]
    fn test_fixed_half_and_bounds() {
        assert_eq!(fixed_half(from_int(5)), to_fixed(2.5));
        assert_eq!(fixed_max(1, 2), 2);
        assert_eq!(fixed_max(from_int(-1), 0), 0);
    }
}
