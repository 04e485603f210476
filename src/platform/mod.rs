//! Platform abstraction layer
//!
//! Handles the outside world for the session loop:
//! - Keyboard snapshots (held keys plus key-down events)
//! - Tick pacing and elapsed real time

use std::collections::{HashSet, VecDeque};
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::sim::tick::TickInput;

/// Keys the game recognises
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    /// Speed modifier; with `Fire` it sprays once unlocked
    Boost,
    Fire,
    Reflect,
    Emp,
    Gravity,
}

/// Keyboard state for one tick
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputFrame {
    /// Keys currently held down
    pub held: HashSet<Key>,
    /// Keys that went down since the previous frame
    pub pressed: Vec<Key>,
    /// Window closed / quit requested
    pub quit: bool,
}

impl InputFrame {
    pub fn holding(keys: &[Key]) -> Self {
        Self {
            held: keys.iter().copied().collect(),
            ..Default::default()
        }
    }

    pub fn pressing(keys: &[Key]) -> Self {
        Self {
            pressed: keys.to_vec(),
            ..Default::default()
        }
    }

    pub fn quit() -> Self {
        Self {
            quit: true,
            ..Default::default()
        }
    }

    fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    fn was_pressed(&self, key: Key) -> bool {
        self.pressed.contains(&key)
    }

    /// Translate the key snapshot into simulation input
    pub fn to_tick_input(&self, demo: bool) -> TickInput {
        TickInput {
            up: self.is_held(Key::Up),
            down: self.is_held(Key::Down),
            left: self.is_held(Key::Left),
            right: self.is_held(Key::Right),
            boost: self.is_held(Key::Boost),
            fire: self.was_pressed(Key::Fire),
            reflect: self.was_pressed(Key::Reflect),
            emp: self.was_pressed(Key::Emp),
            gravity: self.was_pressed(Key::Gravity),
            demo,
        }
    }
}

/// Polled once per tick
pub trait InputSource {
    fn poll(&mut self) -> InputFrame;
}

/// Plays back a fixed list of frames, then idles
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    frames: VecDeque<InputFrame>,
}

impl ScriptedInput {
    pub fn new(frames: impl IntoIterator<Item = InputFrame>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> InputFrame {
        self.frames.pop_front().unwrap_or_default()
    }
}

/// Paces the loop and reports elapsed time
pub trait Clock {
    /// Wait for the next tick; returns seconds since the previous one
    fn tick(&mut self) -> f32;
}

impl<C: Clock + ?Sized> Clock for Box<C> {
    fn tick(&mut self) -> f32 {
        (**self).tick()
    }
}

/// Reports a constant step without waiting (headless, tests)
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    pub dt: f32,
}

impl FixedClock {
    pub fn from_rate(ticks_per_second: u32) -> Self {
        Self {
            dt: 1.0 / ticks_per_second.max(1) as f32,
        }
    }
}

impl Clock for FixedClock {
    fn tick(&mut self) -> f32 {
        self.dt
    }
}

/// Sleeps to hold a target tick rate and measures real elapsed time
#[derive(Debug, Clone)]
pub struct PacedClock {
    period: Duration,
    last: Instant,
}

impl PacedClock {
    pub fn new(ticks_per_second: u32) -> Self {
        Self {
            period: Duration::from_secs_f64(1.0 / ticks_per_second.max(1) as f64),
            last: Instant::now(),
        }
    }
}

impl Clock for PacedClock {
    fn tick(&mut self) -> f32 {
        let target = self.last + self.period;
        let now = Instant::now();
        if target > now {
            std::thread::sleep(target - now);
        }
        let now = Instant::now();
        let dt = now.duration_since(self.last).as_secs_f32();
        self.last = now;
        dt
    }
}
