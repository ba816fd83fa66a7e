//! Ore Storm Headless Runner
//!
//! Plays a scripted game through the simulation core, reports what happened
//! and checks that replaying the recorded input reproduces the same world.

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use ore_storm::{
    TICK_RATE, VERSION,
    core::vec2::FixedVec2,
    game::{
        audio::{AudioCue, RecordingAudio},
        config::GameConfig,
        events::GameEventData,
        input::{InputEvent, InputFrame, Key},
        session::{FrameOutcome, GameSession},
        state::WorldState,
        tick::replay,
    },
};

const DEFAULT_SEED: u64 = 12345;
const DEFAULT_TICKS: u32 = 60 * TICK_RATE;

/// Ticks between plane shots.
const FIRE_INTERVAL: u32 = 12;

fn main() -> Result<()> {
    let default_level = if cfg!(feature = "debug-tracing") { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    info!("Ore Storm v{}", VERSION);
    info!("Tick Rate: {} Hz", TICK_RATE);

    let config = GameConfig::from_env().context("loading game config")?;
    let seed = env_or("ORE_STORM_SEED", DEFAULT_SEED)?;
    let ticks = env_or("ORE_STORM_TICKS", DEFAULT_TICKS)?;

    demo_game(seed, ticks, config);
    Ok(())
}

fn env_or<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(name) {
        Ok(raw) => raw.parse().with_context(|| format!("parsing {name}={raw}")),
        Err(_) => Ok(default),
    }
}

/// Run a scripted game, then replay it.
fn demo_game(seed: u64, ticks: u32, config: GameConfig) {
    info!("=== Starting Demo Game ===");
    info!("RNG Seed: {}", seed);
    info!("Field: {}x{}, {} blocks", config.field_width, config.field_height, config.initial_block_count);

    let audio = Rc::new(RefCell::new(RecordingAudio::default()));
    let mut session = GameSession::new(seed, config.clone(), Box::new(Rc::clone(&audio)));
    let mut pilot = Autopilot::default();
    let mut frames = Vec::with_capacity(ticks as usize);

    let mut total_events = 0;
    let mut best_score = 0;

    info!("Running {} ticks...", ticks);

    for t in 0..ticks {
        let frame = pilot.next_frame(session.world(), t);
        frames.push(frame.clone());

        let result = match session.handle_frame(&frame) {
            FrameOutcome::Ticked(result) => result,
            FrameOutcome::Quit => break,
        };
        total_events += result.events.len();

        for event in &result.events {
            match &event.data {
                GameEventData::BlockRammed { block_id, new_score } => {
                    info!("Block {} rammed, score {}", block_id, new_score);
                }
                GameEventData::GameOver { cause, score } => {
                    info!("Game {} over ({:?}), score {}", session.games_played(), cause, score);
                    best_score = best_score.max(*score);
                }
                _ => {}
            }
        }

        // Report every 10 seconds
        if t % (10 * TICK_RATE) == 0 {
            let world = session.world();
            info!(
                "Tick {}: {} blocks, {} bullets, {} ammo boxes, ammo {}, {} events so far",
                t,
                world.block_count(),
                world.bullets.len(),
                world.pickups.len(),
                world.plane.ammo,
                total_events,
            );
        }
    }

    // Print final results
    info!("=== Results ===");
    let hash = session.world().compute_hash();
    info!("Final State Hash: {}", hex::encode(hash));
    info!("Games played: {}", session.games_played());
    info!("Best score: {}", best_score.max(session.world().score));
    info!("Total events: {}", total_events);
    {
        let audio = audio.borrow();
        for cue in AudioCue::ALL {
            info!("Played {}: {} times", cue.asset_name(), audio.count(cue));
        }
    }

    // Verify determinism by replaying
    info!("=== Verifying Determinism ===");
    let (replayed, _) = replay(seed, &config, &frames, frames.len() as u32);
    let replay_hash = replayed.compute_hash();
    info!("Replay State Hash: {}", hex::encode(replay_hash));

    if hash == replay_hash {
        info!("DETERMINISM VERIFIED: Hashes match!");
    } else {
        warn!("DETERMINISM FAILURE: Hashes differ!");
    }
}

/// Scripted input for both players.
///
/// The plane hovers over the lowest block and fires on a timer; the ground
/// player chases ammo boxes and otherwise steps away from the nearest block.
/// Decisions read only the world, so replaying the frames is exact.
#[derive(Default)]
struct Autopilot {
    moving: Option<Key>,
}

impl Autopilot {
    fn next_frame(&mut self, world: &WorldState, t: u32) -> InputFrame {
        let mut frame = InputFrame::new(self.aim(world));

        if world.is_game_over() {
            // the reset world starts at rest
            self.moving = None;
            frame.push(InputEvent::FireReleased);
            return frame;
        }

        if t % FIRE_INTERVAL == 0 {
            frame.push(InputEvent::FirePressed);
            frame.push(InputEvent::FireReleased);
        }

        let wanted = self.direction(world);
        if wanted != self.moving {
            if let Some(old) = self.moving {
                frame.push(InputEvent::KeyUp(old));
            }
            if let Some(new) = wanted {
                frame.push(InputEvent::KeyDown(new));
            }
            self.moving = wanted;
        }

        if t % (2 * TICK_RATE) == TICK_RATE {
            frame.push(InputEvent::KeyDown(Key::Up));
        }

        frame
    }

    /// Just above the lowest block, or parked in the corner.
    fn aim(&self, world: &WorldState) -> FixedVec2 {
        world
            .blocks
            .values()
            .filter(|b| b.rect.bottom() > 0)
            .max_by_key(|b| b.rect.bottom())
            .map(|b| {
                let center = b.rect.center();
                FixedVec2::new(center.x, b.rect.top() - b.rect.h)
            })
            .unwrap_or(FixedVec2::from_ints(20, 20))
    }

    fn direction(&self, world: &WorldState) -> Option<Key> {
        let me = world.ground.rect.center().x;

        if let Some(ammo) = world.pickups.values().min_by_key(|a| (a.rect.center().x - me).abs()) {
            return Some(if ammo.rect.center().x < me { Key::Left } else { Key::Right });
        }

        let threat = world
            .blocks
            .values()
            .filter(|b| b.rect.bottom() > 0)
            .min_by_key(|b| (b.rect.center().x - me).abs())?;
        let gap = threat.rect.center().x - me;
        if gap.abs() > 2 * threat.rect.w + world.ground.rect.w {
            None
        } else if gap < 0 {
            Some(Key::Right)
        } else {
            Some(Key::Left)
        }
    }
}
