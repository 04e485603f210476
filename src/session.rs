//! Round driver
//!
//! Owns the game state and its collaborators and runs the loop:
//! poll input, wait for the clock, step the simulation, draw.

use serde::{Deserialize, Serialize};

use crate::platform::{Clock, InputSource};
use crate::renderer::{Atlas, Renderer, draw_frame};
use crate::settings::Settings;
use crate::sim::state::{GameEvent, GamePhase, GameState, RoundStats};
use crate::sim::tick::tick;

/// Why a round stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Won,
    Lost,
    /// The input source asked to quit
    Quit,
    /// The configured tick cap was reached
    TickLimit,
}

/// Result of a finished round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundSummary {
    pub outcome: Outcome,
    pub seed: u64,
    pub score: u64,
    pub ticks: u64,
    pub stats: RoundStats,
}

/// One round with its input, clock and renderer
pub struct Session<I, C, R: Renderer> {
    state: GameState,
    atlas: Atlas<R::Image>,
    input: I,
    clock: C,
    renderer: R,
    demo: bool,
    max_ticks: Option<u64>,
    /// Events from the most recent tick
    events: Vec<GameEvent>,
}

impl<I, C, R> Session<I, C, R>
where
    I: InputSource,
    C: Clock,
    R: Renderer,
    R::Image: Clone,
{
    pub fn new(
        settings: &Settings,
        atlas: Atlas<R::Image>,
        input: I,
        clock: C,
        renderer: R,
    ) -> Self {
        let state = GameState::new(
            settings.seed,
            settings.field_width,
            settings.field_height,
            atlas.sprite_table(),
        );
        Self {
            state,
            atlas,
            input,
            clock,
            renderer,
            demo: settings.demo,
            max_ticks: settings.tick_limit(),
            events: Vec::new(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Run a single tick and draw it. Returns the outcome once the round is over.
    pub fn step(&mut self) -> Option<Outcome> {
        let frame = self.input.poll();
        if frame.quit {
            log::info!("Quit requested on tick {}", self.state.time_ticks);
            return Some(Outcome::Quit);
        }

        let dt = self.clock.tick();
        tick(&mut self.state, &frame.to_tick_input(self.demo), dt);
        self.events = self.state.drain_events();

        let calls = draw_frame(&mut self.renderer, &self.atlas, &self.state);
        log::trace!("Tick {}: {} draw calls", self.state.time_ticks, calls);

        match self.state.phase {
            GamePhase::Won => Some(Outcome::Won),
            GamePhase::Lost => Some(Outcome::Lost),
            GamePhase::Playing => match self.max_ticks {
                Some(limit) if self.state.time_ticks >= limit => Some(Outcome::TickLimit),
                _ => None,
            },
        }
    }

    /// Play until the round ends
    pub fn run(&mut self) -> RoundSummary {
        let outcome = loop {
            if let Some(outcome) = self.step() {
                break outcome;
            }
        };
        let summary = self.summary(outcome);
        log::info!(
            "Round over: {:?}, score {} after {} ticks",
            summary.outcome,
            summary.score,
            summary.ticks
        );
        summary
    }

    pub fn summary(&self, outcome: Outcome) -> RoundSummary {
        RoundSummary {
            outcome,
            seed: self.state.seed,
            score: self.state.score(),
            ticks: self.state.time_ticks,
            stats: self.state.stats,
        }
    }
}
