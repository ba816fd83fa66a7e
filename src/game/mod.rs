//! Game Logic Module
//!
//! All game simulation code. Deterministic given a seed and input frames.
//!
//! ## Module Structure
//!
//! - `config`: Tunable constants and presets
//! - `gravity`: Shared fall behaviour
//! - `entity`: Blocks, pickups, bullets, players, platforms
//! - `level`: Floor layout and platform queries
//! - `spawn`: Spawn, respawn and drop rolls
//! - `physics`: Motion rules and platform resolution
//! - `collision`: Cross-collection overlap sweeps
//! - `state`: World state
//! - `tick`: Simulation step and replay
//! - `input`: Input events to player intent
//! - `events`: Game events
//! - `audio`, `render`: Collaborator interfaces
//! - `session`: A running game with its audio sink

pub mod config;
pub mod gravity;
pub mod entity;
pub mod level;
pub mod spawn;
pub mod physics;
pub mod collision;
pub mod state;
pub mod tick;
pub mod input;
pub mod events;
pub mod audio;
pub mod render;
pub mod session;

// Re-export key types
pub use config::{CrashPolicy, GameConfig, ConfigError};
pub use entity::{Block, AmmoBox, Bullet, PlanePlayer, GroundPlayer, Platform, Payload, FallBehavior};
pub use state::{WorldState, GamePhase};
pub use tick::TickResult;
pub use input::{InputEvent, InputFrame, Key};
pub use events::{GameEvent, GameEventData, GameOverCause};
pub use audio::{AudioCue, AudioSink, AudioError, NullAudio};
pub use render::{RenderSnapshot, RenderSink, GAME_OVER_MESSAGE};
pub use session::GameSession;
