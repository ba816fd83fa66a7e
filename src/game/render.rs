//! Render Snapshot
//!
//! Read-only view of the world for whatever draws it. Coordinates are whole
//! pixels, origin top-left.

use serde::{Serialize, Deserialize};

use crate::core::fixed::to_pixel;
use crate::core::rect::FixedRect;
use crate::game::config::GameConfig;
use crate::game::entity::{AnimationState, Facing, Payload};
use crate::game::state::WorldState;

/// Overlay text shown after game over.
pub const GAME_OVER_MESSAGE: &str = "Game Over, click to restart";

/// What an entity should be drawn as.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EntityKind {
    /// Falling block, colored by payload.
    Block {
        /// Block contents.
        payload: Payload,
    },
    /// Ammo pickup.
    AmmoBox,
    /// Plane bullet.
    Bullet,
    /// The plane.
    Plane,
    /// The ground player.
    GroundPlayer,
    /// Floor tile.
    Platform,
}

/// One drawable rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderEntity {
    /// Kind tag.
    #[serde(flatten)]
    pub kind: EntityKind,
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Width.
    pub w: i32,
    /// Height.
    pub h: i32,
}

impl RenderEntity {
    fn new(kind: EntityKind, rect: &FixedRect) -> Self {
        Self {
            kind,
            x: to_pixel(rect.x),
            y: to_pixel(rect.y),
            w: to_pixel(rect.w),
            h: to_pixel(rect.h),
        }
    }
}

/// Ground player sprite selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundAnimation {
    /// Motion state.
    pub state: AnimationState,
    /// Direction.
    pub facing: Facing,
}

/// Text to draw centered on the field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Overlay {
    /// The message.
    pub text: String,
    /// Field center x.
    pub center_x: i32,
    /// Field center y.
    pub center_y: i32,
}

impl Overlay {
    /// Top-left corner for text of the given rendered size.
    pub fn origin_for(&self, text_width: i32, text_height: i32) -> (i32, i32) {
        (self.center_x - text_width / 2, self.center_y - text_height / 2)
    }
}

/// Everything needed to draw one frame.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderSnapshot {
    /// Tick this snapshot was taken after.
    pub tick: u32,
    /// Field width.
    pub field_width: i32,
    /// Field height.
    pub field_height: i32,
    /// Platforms, blocks, pickups, bullets, then the two players.
    pub entities: Vec<RenderEntity>,
    /// Blocks rammed.
    pub score: u32,
    /// Plane ammo.
    pub ammo: u32,
    /// Game over flag.
    pub game_over: bool,
    /// Set while the game is over.
    pub overlay: Option<Overlay>,
    /// Present when animation is enabled.
    pub ground_animation: Option<GroundAnimation>,
}

impl RenderSnapshot {
    /// Capture the world.
    pub fn capture(state: &WorldState, config: &GameConfig) -> Self {
        let mut entities = Vec::with_capacity(
            state.level.platforms.len() + state.blocks.len() + state.pickups.len() + state.bullets.len() + 2,
        );

        entities.extend(
            state.level.platforms.iter().map(|p| RenderEntity::new(EntityKind::Platform, &p.rect)),
        );
        entities.extend(state.blocks.values().map(|b| {
            RenderEntity::new(EntityKind::Block { payload: b.payload }, &b.rect)
        }));
        entities.extend(state.pickups.values().map(|a| RenderEntity::new(EntityKind::AmmoBox, &a.rect)));
        entities.extend(state.bullets.values().map(|b| RenderEntity::new(EntityKind::Bullet, &b.rect)));
        entities.push(RenderEntity::new(EntityKind::Plane, &state.plane.rect));
        entities.push(RenderEntity::new(EntityKind::GroundPlayer, &state.ground.rect));

        let game_over = state.is_game_over();
        let overlay = game_over.then(|| Overlay {
            text: GAME_OVER_MESSAGE.to_string(),
            center_x: config.field_width / 2,
            center_y: config.field_height / 2,
        });
        let ground_animation = config.animate_ground_player.then(|| GroundAnimation {
            state: state.ground.animation(),
            facing: state.ground.facing,
        });

        Self {
            tick: state.tick,
            field_width: config.field_width,
            field_height: config.field_height,
            entities,
            score: state.score,
            ammo: state.plane.ammo,
            game_over,
            overlay,
            ground_animation,
        }
    }

    /// Entities of one kind.
    pub fn count(&self, kind: EntityKind) -> usize {
        self.entities.iter().filter(|e| e.kind == kind).count()
    }
}

/// Something that draws snapshots.
pub trait RenderSink {
    /// Draw one frame.
    fn present(&mut self, snapshot: &RenderSnapshot);
}
