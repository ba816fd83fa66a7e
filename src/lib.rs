//! # Ore Storm
//!
//! Deterministic simulation core for Ore Storm, a two-player arcade game: one
//! player flies a plane and shoots falling ore blocks, the other runs along
//! the floor dodging them and collecting the ammo they drop.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         ORE STORM                            │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/           - Deterministic primitives                  │
//! │  ├── fixed.rs    - Q16.16 fixed-point arithmetic             │
//! │  ├── vec2.rs     - 2D vector with fixed-point                │
//! │  ├── rect.rs     - Axis-aligned rectangles                   │
//! │  ├── rng.rs      - Deterministic Xorshift128+ PRNG           │
//! │  └── hash.rs     - State hashing for verification            │
//! │                                                              │
//! │  game/           - Game logic (deterministic)                │
//! │  ├── entity.rs   - Blocks, pickups, bullets, players         │
//! │  ├── physics.rs  - Gravity, motion, platform resolution      │
//! │  ├── collision.rs- Cross-entity overlap sweeps               │
//! │  ├── state.rs    - World state                               │
//! │  ├── tick.rs     - Simulation step and replay                │
//! │  └── session.rs  - Running game + injected audio             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Determinism Guarantee
//!
//! The `core/` and `game/` modules are deterministic:
//! - No floating-point arithmetic in game logic
//! - No HashMap (uses BTreeMap for sorted iteration)
//! - No system time dependencies
//! - All randomness from seeded Xorshift128+
//!
//! Given the same seed, config and input frames, a game produces the same
//! state hash on every run.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod core;
pub mod game;

// Re-export commonly used types
pub use self::core::fixed::{Fixed, FIXED_ONE, FIXED_HALF, FIXED_SCALE};
pub use self::core::vec2::FixedVec2;
pub use self::core::rect::FixedRect;
pub use self::core::rng::DeterministicRng;
pub use self::game::config::GameConfig;
pub use self::game::input::{InputEvent, InputFrame};
pub use self::game::session::GameSession;
pub use self::game::state::WorldState;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Simulation tick rate (Hz)
pub const TICK_RATE: u32 = 60;
