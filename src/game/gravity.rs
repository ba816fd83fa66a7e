//! Gravity Integration
//!
//! Shared fall behaviour for blocks, ammo boxes and the ground player.
//! Speeds grow without a cap until a contact resets them.

use serde::{Serialize, Deserialize};

use crate::core::fixed::{Fixed, GRAVITY_KICK, GRAVITY_STEP};

/// Fall speed of a gravity-affected body (pixels/tick, +Y is down).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GravityState {
    /// Current vertical speed. Negative while rising after a jump.
    pub speed: Fixed,
}

impl GravityState {
    /// A body at rest.
    pub const REST: Self = Self { speed: 0 };

    /// Advance one tick: a resting body gets the initial kick, anything else
    /// accelerates by the fixed step.
    #[inline]
    pub fn integrate(&mut self) {
        if self.speed == 0 {
            self.speed = GRAVITY_KICK;
        } else {
            self.speed = self.speed.wrapping_add(GRAVITY_STEP);
        }
    }

    /// Stop falling.
    #[inline]
    pub fn reset(&mut self) {
        self.speed = 0;
    }

    /// True when moving down or at rest.
    #[inline]
    pub fn is_descending_or_resting(&self) -> bool {
        self.speed >= 0
    }
}

/// Capability of anything that falls.
pub trait Fallable {
    /// The body's gravity state.
    fn gravity_mut(&mut self) -> &mut GravityState;

    /// Integrate gravity for one tick, before the body moves.
    fn apply_gravity(&mut self) {
        self.gravity_mut().integrate();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fixed::{to_float, FIXED_ONE};
    use proptest::prelude::*;

    #[test]
    fn test_kick_then_step_sequence() {
        let mut g = GravityState::REST;
        let mut seen = Vec::new();
        for _ in 0..4 {
            g.integrate();
            seen.push(to_float(g.speed));
        }
        let expected = [1.0f32, 1.35, 1.70, 2.05];
        for (got, want) in seen.iter().zip(expected) {
            assert!((got - want).abs() < 1e-3, "got {} want {}", got, want);
        }
    }

    #[test]
    fn test_reset_restarts_with_kick() {
        let mut g = GravityState::REST;
        g.integrate();
        g.integrate();
        g.reset();
        assert_eq!(g.speed, 0);
        g.integrate();
        assert_eq!(g.speed, FIXED_ONE);
    }

    #[test]
    fn test_rising_body_decelerates_through_zero() {
        // A jump sets a negative speed; it steps toward zero and past it.
        let mut g = GravityState { speed: -6 * FIXED_ONE };
        let mut previous = g.speed;
        for _ in 0..30 {
            g.integrate();
            assert!(g.speed > previous);
            previous = g.speed;
        }
        assert!(g.speed > 0);
    }

    struct Probe(GravityState);

    impl Fallable for Probe {
        fn gravity_mut(&mut self) -> &mut GravityState {
            &mut self.0
        }
    }

    #[test]
    fn test_fallable_default_method() {
        let mut probe = Probe(GravityState::REST);
        probe.apply_gravity();
        assert_eq!(probe.0.speed, GRAVITY_KICK);
    }

    proptest! {
        #[test]
        fn prop_speed_is_kick_plus_steps(n in 1usize..500) {
            let mut g = GravityState::REST;
            for _ in 0..n {
                g.integrate();
            }
            prop_assert_eq!(g.speed, GRAVITY_KICK + GRAVITY_STEP * (n as i32 - 1));
        }

        #[test]
        fn prop_speed_strictly_increases(n in 2usize..500) {
            let mut g = GravityState::REST;
            let mut last = g.speed;
            for _ in 0..n {
                g.integrate();
                prop_assert!(g.speed > last);
                last = g.speed;
            }
        }
    }
}
