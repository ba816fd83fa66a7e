//! Core deterministic primitives.
//!
//! Fixed-point scalars, vectors and rectangles, the seeded RNG, and state
//! hashing. Nothing in here knows about the game itself.

pub mod fixed;
pub mod vec2;
pub mod rect;
pub mod rng;
pub mod hash;

// Re-export core types
pub use fixed::{Fixed, FIXED_ONE, FIXED_HALF, FIXED_SCALE};
pub use vec2::FixedVec2;
pub use rect::FixedRect;
pub use rng::DeterministicRng;
pub use hash::{compute_state_hash, StateHash};
