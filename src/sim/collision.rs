//! Per-tick collision resolution between populations
//!
//! Runs after all motion, in a fixed order:
//! 1. enemies vs beams
//! 2. bosses vs beams
//! 3. bombs vs beams
//! 4. bombs vs player (an active bomb ends the round and stops the pass)
//! 5. gravity fields vs enemies
//!
//! Targets are visited in spawn order. Each target consumes every live beam
//! overlapping it, so a beam can never be credited to two targets, and an
//! entity removed by one rule is gone before the next rule runs.

use glam::Vec2;

use super::motion::Projectile;
use super::rect::Rect;
use super::sprites::PlayerPose;
use super::state::{Beam, Explosion, GameEvent, GamePhase, GameState, ReflectBeam};
use crate::consts::*;

/// Outcome of the collision pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Continue,
    /// An active bomb reached the player
    PlayerKilled,
}

/// Remove every beam (straight or reflecting) overlapping `target`.
/// Returns how many were removed.
fn take_beams_hitting(
    target: &Rect,
    beams: &mut Vec<Beam>,
    reflect: &mut Vec<ReflectBeam>,
) -> usize {
    let before = beams.len() + reflect.len();
    beams.retain(|b| !b.rect.overlaps(target));
    reflect.retain(|b| !b.rect().overlaps(target));
    before - (beams.len() + reflect.len())
}

fn explode(state: &mut GameState, at: Vec2, life: i32) {
    let explosion = Explosion::new(at, life, &state.sprites);
    state.explosions.push(explosion);
}

/// Run the whole pass
pub fn resolve(state: &mut GameState) -> Resolution {
    enemies_vs_beams(state);
    bosses_vs_beams(state);
    bombs_vs_beams(state);
    if bombs_vs_player(state) == Resolution::PlayerKilled {
        return Resolution::PlayerKilled;
    }
    gravity_vs_enemies(state);
    Resolution::Continue
}

pub fn enemies_vs_beams(state: &mut GameState) {
    let enemies = std::mem::take(&mut state.enemies);
    let mut survivors = Vec::with_capacity(enemies.len());
    for enemy in enemies {
        if take_beams_hitting(&enemy.rect, &mut state.beams, &mut state.reflect_beams) == 0 {
            survivors.push(enemy);
            continue;
        }
        let at = enemy.rect.center();
        explode(state, at, HOSTILE_EXPLOSION_LIFE);
        state.ledger.credit(ENEMY_SCORE);
        state.player.pose = PlayerPose::Happy;
        state.stats.enemies_destroyed += 1;
        state.events.push(GameEvent::EnemyDestroyed { at });
    }
    state.enemies = survivors;
}

pub fn bosses_vs_beams(state: &mut GameState) {
    let bosses = std::mem::take(&mut state.bosses);
    let mut survivors = Vec::with_capacity(bosses.len());
    for mut boss in bosses {
        // One hit point per tick no matter how many beams connect
        if take_beams_hitting(&boss.rect, &mut state.beams, &mut state.reflect_beams) == 0 {
            survivors.push(boss);
            continue;
        }
        boss.hp = boss.hp.saturating_sub(1);
        state.events.push(GameEvent::BossHit { hp_left: boss.hp });
        if boss.hp > 0 {
            survivors.push(boss);
            continue;
        }
        let at = boss.rect.center();
        explode(state, at, HOSTILE_EXPLOSION_LIFE);
        state.ledger.credit(BOSS_SCORE);
        state.player.pose = PlayerPose::Happy;
        state.stats.bosses_destroyed += 1;
        state.events.push(GameEvent::BossDestroyed { at });
        log::info!("Boss destroyed, score {}", state.score());
    }
    state.bosses = survivors;
}

pub fn bombs_vs_beams(state: &mut GameState) {
    let bombs = std::mem::take(&mut state.bombs);
    let mut survivors = Vec::with_capacity(bombs.len());
    for bomb in bombs {
        if take_beams_hitting(&bomb.rect, &mut state.beams, &mut state.reflect_beams) == 0 {
            survivors.push(bomb);
            continue;
        }
        let at = bomb.rect.center();
        explode(state, at, BOMB_EXPLOSION_LIFE);
        state.stats.bombs_shot += 1;
        state.events.push(GameEvent::BombShot { at });
    }
    state.bombs = survivors;
}

/// Every bomb touching the player is removed; any active one ends the round
pub fn bombs_vs_player(state: &mut GameState) -> Resolution {
    let player = state.player.rect;
    let (hits, misses): (Vec<_>, Vec<_>) = std::mem::take(&mut state.bombs)
        .into_iter()
        .partition(|bomb| bomb.rect.overlaps(&player));
    state.bombs = misses;

    if hits.iter().any(|bomb| bomb.is_active()) {
        state.player.pose = PlayerPose::Sad;
        state.phase = GamePhase::Lost;
        state.events.push(GameEvent::Lost {
            score: state.score(),
        });
        log::info!(
            "Player hit on tick {}, final score {}",
            state.time_ticks,
            state.score()
        );
        return Resolution::PlayerKilled;
    }
    Resolution::Continue
}

pub fn gravity_vs_enemies(state: &mut GameState) {
    if state.gravity_fields.is_empty() {
        return;
    }
    let enemies = std::mem::take(&mut state.enemies);
    let mut survivors = Vec::with_capacity(enemies.len());
    for enemy in enemies {
        let caught = state
            .gravity_fields
            .iter()
            .any(|g| g.rect.overlaps(&enemy.rect));
        if !caught {
            survivors.push(enemy);
            continue;
        }
        let at = enemy.rect.center();
        explode(state, at, HOSTILE_EXPLOSION_LIFE);
        state.stats.gravity_kills += 1;
        state.events.push(GameEvent::GravityKill { at });
    }
    state.enemies = survivors;
}
