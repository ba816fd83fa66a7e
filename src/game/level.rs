//! Level Layout
//!
//! The single stage: a row of floor tiles along the bottom of the field with
//! a few tiles knocked out at random.

use serde::{Serialize, Deserialize};
use tracing::debug;

use crate::core::fixed::Fixed;
use crate::core::hash::StateHasher;
use crate::core::rect::FixedRect;
use crate::core::rng::DeterministicRng;
use crate::core::vec2::FixedVec2;
use crate::game::config::GameConfig;
use crate::game::entity::Platform;

/// Static colliders for one stage.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Level {
    /// Floor tiles in left-to-right order (gaps excluded).
    pub platforms: Vec<Platform>,
    /// Scrolling hazards. No stage populates this yet.
    pub enemies: Vec<FixedRect>,
    /// Total horizontal scroll applied so far.
    pub world_shift: Fixed,
}

impl Level {
    /// Build the floor row and cut `1..=max_floor_gaps` random tiles out of it.
    pub fn floor(rng: &mut DeterministicRng, config: &GameConfig) -> Self {
        let tile = config.floor_tile_size;
        let columns = config.field_width / tile;
        let y = config.field_height - tile;

        let mut platforms: Vec<Platform> = (0..columns)
            .map(|i| Platform::from_pixels(i * tile, y, tile, tile))
            .collect();

        let removals = rng.next_int_range(1, config.max_floor_gaps as i32);
        for _ in 0..removals {
            match rng.choose_index(platforms.len()) {
                Some(index) => {
                    platforms.remove(index);
                }
                None => break,
            }
        }

        debug!(
            tiles = platforms.len(),
            gaps = columns as usize - platforms.len(),
            "Floor built"
        );

        Self {
            platforms,
            enemies: Vec::new(),
            world_shift: 0,
        }
    }

    /// Does `rect` overlap any platform?
    pub fn any_overlap(&self, rect: &FixedRect) -> bool {
        self.platforms.iter().any(|p| p.rect.overlaps(rect))
    }

    /// Bounds of every platform overlapping `rect`, in layout order.
    pub fn overlapping(&self, rect: &FixedRect) -> Vec<FixedRect> {
        self.platforms
            .iter()
            .filter(|p| p.rect.overlaps(rect))
            .map(|p| p.rect)
            .collect()
    }

    /// Index of the first platform overlapping `rect`.
    pub fn first_overlap(&self, rect: &FixedRect) -> Option<usize> {
        self.platforms.iter().position(|p| p.rect.overlaps(rect))
    }

    /// Remove and return a platform.
    pub fn remove_platform(&mut self, index: usize) -> Option<Platform> {
        if index < self.platforms.len() {
            Some(self.platforms.remove(index))
        } else {
            None
        }
    }

    /// Scroll every owned collider horizontally by `dx`.
    pub fn shift_world(&mut self, dx: Fixed) {
        self.world_shift = self.world_shift.wrapping_add(dx);
        let delta = FixedVec2::new(dx, 0);
        for platform in &mut self.platforms {
            platform.rect.translate(delta);
        }
        for enemy in &mut self.enemies {
            enemy.translate(delta);
        }
    }

    /// Hash into the world digest.
    pub fn hash_into(&self, hasher: &mut StateHasher) {
        hasher.update_u32(self.platforms.len() as u32);
        for platform in &self.platforms {
            hasher.update_rect(&platform.rect);
        }
        hasher.update_fixed(self.world_shift);
    }
}
