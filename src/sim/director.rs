//! Difficulty and spawn director
//!
//! Two independent clocks drive spawning: enemies arrive on a tick cadence
//! that tightens as the score climbs, bosses arrive on a real-time timer
//! whose threshold is picked from the current score band.

use serde::{Deserialize, Serialize};

use crate::consts::INITIAL_SPAWN_FRAME;

/// Score thresholds and the enemy spawn cadence (ticks) they unlock.
/// Checked in order; later entries win.
const SPAWN_RATCHET: [(u64, u64); 3] = [(100, 60), (300, 40), (600, 20)];

/// Boss spawn bands: (lowest score, highest score, seconds between bosses).
/// Bands share their boundaries; the first match wins.
const BOSS_BANDS: [(u64, u64, f32); 4] = [
    (0, 200, 15.0),
    (200, 500, 7.0),
    (500, 900, 3.0),
    (900, u64::MAX, 1.0),
];

/// Spawn timers and the one-way difficulty ratchet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnDirector {
    /// An enemy spawns whenever the tick counter is a multiple of this
    pub spawn_frame: u64,
    /// Seconds accumulated toward the next boss
    pub boss_timer: f32,
}

impl Default for SpawnDirector {
    fn default() -> Self {
        Self::new()
    }
}

impl SpawnDirector {
    pub fn new() -> Self {
        Self {
            spawn_frame: INITIAL_SPAWN_FRAME,
            boss_timer: 0.0,
        }
    }

    /// Whether an enemy spawns on this tick
    pub fn enemy_due(&self, tick: u64) -> bool {
        tick % self.spawn_frame == 0
    }

    /// Seconds between bosses for the given score
    pub fn boss_threshold(score: u64) -> f32 {
        BOSS_BANDS
            .iter()
            .find(|(lo, hi, _)| score >= *lo && score <= *hi)
            .map(|(_, _, secs)| *secs)
            .unwrap_or(1.0)
    }

    /// Accumulate elapsed real time. Returns `true` (and resets) when a boss is due.
    pub fn advance_boss_timer(&mut self, dt: f32, score: u64) -> bool {
        self.boss_timer += dt;
        if self.boss_timer >= Self::boss_threshold(score) {
            self.boss_timer = 0.0;
            return true;
        }
        false
    }

    /// Tighten the enemy cadence for the current score. Never loosens it.
    ///
    /// Returns the new cadence when it changed.
    pub fn ratchet(&mut self, score: u64) -> Option<u64> {
        let target = SPAWN_RATCHET
            .iter()
            .filter(|(threshold, _)| score >= *threshold)
            .map(|(_, frame)| *frame)
            .min()?;
        if target < self.spawn_frame {
            self.spawn_frame = target;
            log::info!("Difficulty up: enemy every {} ticks", target);
            return Some(target);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boss_threshold_bands() {
        assert_eq!(SpawnDirector::boss_threshold(0), 15.0);
        assert_eq!(SpawnDirector::boss_threshold(200), 15.0);
        assert_eq!(SpawnDirector::boss_threshold(201), 7.0);
        assert_eq!(SpawnDirector::boss_threshold(500), 7.0);
        assert_eq!(SpawnDirector::boss_threshold(700), 3.0);
        assert_eq!(SpawnDirector::boss_threshold(900), 3.0);
        assert_eq!(SpawnDirector::boss_threshold(901), 1.0);
    }

    #[test]
    fn test_boss_timer_resets_on_spawn() {
        let mut director = SpawnDirector::new();
        let mut spawned = 0;
        // 16 seconds at 50 ticks per second
        for _ in 0..800 {
            if director.advance_boss_timer(0.02, 0) {
                spawned += 1;
                assert_eq!(director.boss_timer, 0.0);
            }
        }
        assert_eq!(spawned, 1);
    }

    #[test]
    fn test_ratchet_is_one_way() {
        let mut director = SpawnDirector::new();
        assert_eq!(director.ratchet(50), None);
        assert_eq!(director.spawn_frame, 200);

        assert_eq!(director.ratchet(100), Some(60));
        assert_eq!(director.ratchet(650), Some(20));
        assert_eq!(director.ratchet(650), None);

        // Score falling (abilities spent) does not relax the cadence
        assert_eq!(director.ratchet(10), None);
        assert_eq!(director.spawn_frame, 20);
    }

    #[test]
    fn test_enemy_due_on_multiples() {
        let director = SpawnDirector::new();
        assert!(director.enemy_due(0));
        assert!(!director.enemy_due(199));
        assert!(director.enemy_due(400));
    }
}
