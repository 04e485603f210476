//! Barrage - a fixed-tick arcade shoot-'em-up
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, scoring, difficulty)
//! - `renderer`: Rendering boundary (asset source, renderer trait, draw order)
//! - `platform`: Input and clock boundary
//! - `session`: Loop that drives the simulation through the boundaries
//! - `settings`: Runtime configuration

pub mod platform;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;

pub use session::{Outcome, RoundSummary, Session};
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Target simulation rate (ticks per second)
    pub const TICK_RATE: u32 = 50;

    /// Play field dimensions
    pub const FIELD_WIDTH: f32 = 1000.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Player defaults
    pub const PLAYER_START: (f32, f32) = (900.0, 400.0);
    pub const PLAYER_SPEED: f32 = 10.0;
    pub const PLAYER_BOOST_SPEED: f32 = 20.0;

    /// Hostiles descend at this many pixels per tick until they reach their stop line
    pub const HOSTILE_DESCENT_SPEED: f32 = 6.0;
    /// Smallest stop line; the largest is half the field height
    pub const STOP_LINE_MIN: f32 = 50.0;
    /// Enemy bomb-drop interval range (ticks)
    pub const ENEMY_INTERVAL_MIN: u32 = 50;
    pub const ENEMY_INTERVAL_MAX: u32 = 300;
    /// Boss fire interval (milliseconds of simulation clock)
    pub const BOSS_FIRE_INTERVAL_MS: u64 = 50;
    pub const BOSS_HP: u8 = 5;
    /// Boss art is the enemy art scaled up
    pub const BOSS_SCALE: f32 = 3.0;

    /// Projectiles
    pub const BEAM_SPEED: f32 = 10.0;
    pub const BEAM_SCALE: f32 = 2.0;
    pub const BOMB_SPEED: f32 = 6.0;
    pub const BOMB_RADIUS_MIN: u32 = 10;
    pub const BOMB_RADIUS_MAX: u32 = 50;
    /// Number of beams in a multi-beam spray and its half-arc (degrees)
    pub const MULTI_BEAM_COUNT: u32 = 5;
    pub const MULTI_BEAM_HALF_ARC: f32 = 50.0;
    /// Ticks during which a reflecting beam may still bounce
    pub const REFLECT_WINDOW: u32 = 100;

    /// Effects
    pub const HOSTILE_EXPLOSION_LIFE: i32 = 100;
    pub const BOMB_EXPLOSION_LIFE: i32 = 50;
    pub const EXPLOSION_FRAME_TICKS: i32 = 10;
    pub const GRAVITY_LIFE: i32 = 100;
    pub const EMP_TICKS: u32 = 3;

    /// Scoring
    pub const ENEMY_SCORE: u64 = 10;
    pub const BOSS_SCORE: u64 = 100;
    pub const WIN_SCORE: u64 = 1000;

    /// Enemy spawn cadence (ticks) before any ratchet step
    pub const INITIAL_SPAWN_FRAME: u64 = 200;
}

/// Unit vector for a heading in degrees, measured counter-clockwise from +x
/// with screen y pointing down.
#[inline]
pub fn heading_to_vec(degrees: f32) -> Vec2 {
    let rad = degrees.to_radians();
    Vec2::new(rad.cos(), -rad.sin())
}

/// Heading in degrees of a screen-space vector (inverse of [`heading_to_vec`])
#[inline]
pub fn vec_to_heading(v: Vec2) -> f32 {
    (-v.y).atan2(v.x).to_degrees()
}
