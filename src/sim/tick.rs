//! Fixed timestep simulation tick
//!
//! One call advances the round by exactly one tick:
//! input actions -> spawn director -> motion -> collisions -> termination.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::collision::{Resolution, resolve};
use super::ledger::Ability;
use super::motion::advance_all;
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::WIN_SCORE;

/// Demo pilot fires once every this many ticks
const DEMO_FIRE_PERIOD: u64 = 8;
/// Active bombs closer than this make the demo pilot react
const DEMO_THREAT_RADIUS: f32 = 160.0;
/// Score the demo pilot keeps in reserve before spending on abilities
const DEMO_RESERVE: u64 = 100;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    /// Held movement keys
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Held speed modifier (also turns fire into a multi-beam once unlocked)
    pub boost: bool,
    /// Key pressed this tick: fire a beam
    pub fire: bool,
    /// Key pressed this tick: reflecting beam
    pub reflect: bool,
    /// Key pressed this tick: electromagnetic pulse
    pub emp: bool,
    /// Key pressed this tick: gravity field
    pub gravity: bool,
    /// Demo mode - the pilot plays the game
    pub demo: bool,
}

impl TickInput {
    /// Summed movement of the held direction keys; opposites cancel
    pub fn movement(&self) -> IVec2 {
        let mut mv = IVec2::ZERO;
        if self.up {
            mv.y -= 1;
        }
        if self.down {
            mv.y += 1;
        }
        if self.left {
            mv.x -= 1;
        }
        if self.right {
            mv.x += 1;
        }
        mv
    }
}

/// Advance the game state by one tick. `dt` is the real time (seconds)
/// elapsed since the previous tick.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    // No simulation after a terminal outcome
    if state.phase.is_terminal() {
        return;
    }

    state.events.clear();
    state.clock_ms += (dt.max(0.0) * 1000.0).round() as u64;
    state.emp.update();

    let input = if input.demo {
        demo_input(state)
    } else {
        input.clone()
    };

    apply_actions(state, &input);
    run_director(state, dt);
    advance_entities(state, &input);

    if resolve(state) == Resolution::PlayerKilled {
        return;
    }

    if state.score() >= WIN_SCORE {
        state.phase = GamePhase::Won;
        state.events.push(GameEvent::Won {
            score: state.score(),
        });
        log::info!(
            "Round won on tick {} with score {}",
            state.time_ticks,
            state.score()
        );
        return;
    }

    if let Some(spawn_frame) = state.director.ratchet(state.score()) {
        state.events.push(GameEvent::DifficultyRaised { spawn_frame });
    }

    state.time_ticks += 1;
}

/// Key-press actions: primary fire and the score-gated abilities
fn apply_actions(state: &mut GameState, input: &TickInput) {
    if input.fire {
        let spray_unlocked = state.score() >= Ability::MultiBeam.min_score();
        if !(input.boost && spray_unlocked && state.fire_spray()) {
            state.fire_beam();
        }
    }
    if input.reflect {
        state.fire_reflect_beam();
    }
    if input.emp {
        state.trigger_emp();
    }
    if input.gravity {
        state.summon_gravity();
    }
}

fn run_director(state: &mut GameState, dt: f32) {
    if state.director.enemy_due(state.time_ticks) {
        state.spawn_enemy();
    }
    if state.director.advance_boss_timer(dt, state.score()) {
        state.spawn_boss();
    }
}

fn advance_entities(state: &mut GameState, input: &TickInput) {
    let field = state.field;

    state.player.steer(input.movement(), input.boost, &field);

    advance_all(&mut state.beams, &field);
    advance_all(&mut state.reflect_beams, &field);

    // Hostiles report when they want to drop a bomb; aim happens afterwards
    // so every bomb this tick targets the player's post-move position.
    let (tick, clock_ms) = (state.time_ticks, state.clock_ms);
    let mut launchers = Vec::new();
    for hostile in state.enemies.iter_mut().chain(state.bosses.iter_mut()) {
        if hostile.update(tick, clock_ms) {
            launchers.push(hostile.rect);
        }
    }
    for origin in &launchers {
        state.drop_bomb(origin);
    }

    advance_all(&mut state.bombs, &field);
    state.explosions.retain_mut(|e| e.update());
    state.gravity_fields.retain_mut(|g| g.update());
}

/// Synthesise input for demo mode
fn demo_input(state: &GameState) -> TickInput {
    let mut input = TickInput {
        demo: true,
        ..Default::default()
    };
    let me = state.player.rect.center();
    let score = state.score();

    // React to the closest live bomb first
    let threat = state
        .bombs
        .iter()
        .filter(|b| b.is_active())
        .map(|b| b.rect.center())
        .filter(|c| c.distance(me) < DEMO_THREAT_RADIUS)
        .min_by(|a, b| {
            a.distance(me)
                .partial_cmp(&b.distance(me))
                .unwrap_or(std::cmp::Ordering::Equal)
        });
    if let Some(bomb) = threat {
        if score >= DEMO_RESERVE + Ability::Emp.cost() {
            input.emp = true;
        } else {
            input.boost = true;
            input.left = bomb.x >= me.x;
            input.right = !input.left;
        }
        return input;
    }

    if state.enemies.len() >= 6 && score >= DEMO_RESERVE + Ability::GravityField.cost() {
        input.gravity = true;
    }

    match state.time_ticks % DEMO_FIRE_PERIOD {
        // Face up, fire, then step back down
        p if p == DEMO_FIRE_PERIOD - 1 => input.up = true,
        0 => {
            input.fire = true;
            input.boost = score >= Ability::MultiBeam.min_score();
        }
        1 => input.down = true,
        _ => {
            let target = state
                .enemies
                .iter()
                .chain(state.bosses.iter())
                .map(|h| h.rect.center().x)
                .min_by(|a, b| {
                    (a - me.x)
                        .abs()
                        .partial_cmp(&(b - me.x).abs())
                        .unwrap_or(std::cmp::Ordering::Equal)
                });
            if let Some(x) = target {
                input.left = x < me.x - 10.0;
                input.right = x > me.x + 10.0;
            }
        }
    }
    input
}
