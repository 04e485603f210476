//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod director;
pub mod ledger;
pub mod motion;
pub mod rect;
pub mod sprites;
pub mod state;
pub mod tick;

pub use collision::{Resolution, resolve};
pub use director::SpawnDirector;
pub use ledger::{Ability, ScoreLedger};
pub use motion::{Motion, Projectile, advance_all};
pub use rect::{Rect, direction, fully_in_bounds, in_bounds};
pub use sprites::{PlayerPose, SpriteId, SpriteTable};
pub use state::{
    Beam, Bomb, BombState, Descent, Emp, Explosion, Facing, FireCadence, GameEvent, GamePhase,
    GameState, GravityField, Hostile, HostileKind, Player, ReflectBeam, RoundStats,
};
pub use tick::{TickInput, tick};
