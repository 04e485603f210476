//! Logical sprite identifiers and the collision-size table
//!
//! The simulation never touches pixels. It only needs to know how large each
//! sprite is so entity rectangles match what the renderer draws. The table is
//! built once from the asset source and passed by reference into constructors.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::rotated_bounds;
use crate::consts::{BEAM_SCALE, BOSS_SCALE};

/// Number of alien art variants shared by enemies and bosses
pub const ALIEN_VARIANTS: u8 = 3;

/// Player art is drawn at twice its source size
pub const PLAYER_SCALE: f32 = 2.0;

/// Player expression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PlayerPose {
    #[default]
    Normal,
    /// Shown after destroying a hostile, until the player moves again
    Happy,
    /// Shown when the round is lost
    Sad,
}

/// A logical sprite an asset source knows how to load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpriteId {
    Player(PlayerPose),
    Alien(u8),
    Beam,
    Explosion,
}

impl SpriteId {
    /// Every sprite the game uses, in load order
    pub fn all() -> Vec<SpriteId> {
        let mut ids = vec![
            SpriteId::Player(PlayerPose::Normal),
            SpriteId::Player(PlayerPose::Happy),
            SpriteId::Player(PlayerPose::Sad),
        ];
        ids.extend((0..ALIEN_VARIANTS).map(SpriteId::Alien));
        ids.push(SpriteId::Beam);
        ids.push(SpriteId::Explosion);
        ids
    }

    /// Source-art size used when no asset source is available (headless runs, tests)
    pub fn default_size(&self) -> Vec2 {
        match self {
            SpriteId::Player(_) => Vec2::new(50.0, 48.0),
            SpriteId::Alien(_) => Vec2::new(71.0, 60.0),
            SpriteId::Beam => Vec2::new(40.0, 13.0),
            SpriteId::Explosion => Vec2::new(96.0, 96.0),
        }
    }
}

/// Collision sizes for every entity kind, already scaled as drawn
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpriteTable {
    player: Vec2,
    aliens: [Vec2; ALIEN_VARIANTS as usize],
    beam: Vec2,
    explosion: Vec2,
}

impl Default for SpriteTable {
    fn default() -> Self {
        Self::from_sizes(|id| id.default_size())
    }
}

impl SpriteTable {
    /// Build the table from source-art sizes (e.g. queried from loaded images)
    pub fn from_sizes(size_of: impl Fn(SpriteId) -> Vec2) -> Self {
        let mut aliens = [Vec2::ZERO; ALIEN_VARIANTS as usize];
        for (variant, slot) in aliens.iter_mut().enumerate() {
            *slot = size_of(SpriteId::Alien(variant as u8));
        }
        Self {
            player: size_of(SpriteId::Player(PlayerPose::Normal)) * PLAYER_SCALE,
            aliens,
            beam: size_of(SpriteId::Beam) * BEAM_SCALE,
            explosion: size_of(SpriteId::Explosion),
        }
    }

    pub fn player(&self) -> Vec2 {
        self.player
    }

    pub fn enemy(&self, variant: u8) -> Vec2 {
        self.aliens[variant as usize % self.aliens.len()]
    }

    pub fn boss(&self, variant: u8) -> Vec2 {
        self.enemy(variant) * BOSS_SCALE
    }

    /// Beam bounding box at the given heading (degrees)
    pub fn beam(&self, heading: f32) -> Vec2 {
        rotated_bounds(self.beam, heading)
    }

    pub fn explosion(&self) -> Vec2 {
        self.explosion
    }
}
