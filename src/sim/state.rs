//! Game state and entity types
//!
//! Each entity kind lives in its own population (a `Vec` in spawn order).
//! Entities only ever hold their own data; cross-entity information such as
//! a bomb's aim is captured as a snapshot when the entity is created.

use glam::{IVec2, Vec2};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::director::SpawnDirector;
use super::ledger::{Ability, ScoreLedger};
use super::motion::{Motion, Projectile};
use super::rect::{Rect, direction, fully_in_bounds, in_bounds};
use super::sprites::{ALIEN_VARIANTS, PlayerPose, SpriteTable};
use crate::consts::*;
use crate::{heading_to_vec, vec_to_heading};

/// Number of colours a bomb may be drawn with
pub const BOMB_COLORS: u8 = 6;

/// Current phase of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Playing,
    /// Score reached the win threshold
    Won,
    /// An active bomb hit the player
    Lost,
}

impl GamePhase {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GamePhase::Playing)
    }
}

/// One of the eight directions the player can face
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Facing {
    pub dx: i8,
    pub dy: i8,
}

impl Facing {
    pub const RIGHT: Facing = Facing { dx: 1, dy: 0 };

    /// Facing for a movement vector. `None` when the vector is zero.
    pub fn from_movement(mv: IVec2) -> Option<Self> {
        if mv == IVec2::ZERO {
            return None;
        }
        Some(Self {
            dx: mv.x.signum() as i8,
            dy: mv.y.signum() as i8,
        })
    }

    /// Heading in degrees (0 = right, 90 = up)
    pub fn heading(&self) -> f32 {
        vec_to_heading(Vec2::new(self.dx as f32, self.dy as f32))
    }
}

impl Default for Facing {
    fn default() -> Self {
        Self::RIGHT
    }
}

/// The player-controlled sprite
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub rect: Rect,
    pub facing: Facing,
    /// Speed used on the most recent tick
    pub speed: f32,
    pub boosted: bool,
    pub pose: PlayerPose,
}

impl Player {
    pub fn new(center: Vec2, sprites: &SpriteTable) -> Self {
        Self {
            rect: Rect::from_center(center, sprites.player()),
            facing: Facing::RIGHT,
            speed: PLAYER_SPEED,
            boosted: false,
            pose: PlayerPose::Normal,
        }
    }

    /// Apply one tick of movement input.
    ///
    /// `mv` is the summed held-direction vector (each component in -1..=1).
    /// A move that would leave the field on either axis is discarded whole.
    pub fn steer(&mut self, mv: IVec2, boost: bool, field: &Rect) {
        self.boosted = boost;
        self.speed = if boost {
            PLAYER_BOOST_SPEED
        } else {
            PLAYER_SPEED
        };

        let mut moved = self.rect;
        moved.translate(mv.as_vec2() * self.speed);
        if fully_in_bounds(&moved, field) {
            self.rect = moved;
        }

        if let Some(facing) = Facing::from_movement(mv) {
            self.facing = facing;
            self.pose = PlayerPose::Normal;
        }
    }
}

/// Enemy or boss
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HostileKind {
    Enemy,
    Boss,
}

/// Hostile lifecycle. `Descending -> Stopped` is one-way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Descent {
    Descending,
    Stopped,
}

/// When a stopped hostile releases a bomb
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FireCadence {
    /// Whenever the tick counter is a multiple of the interval
    EveryTicks(u64),
    /// Whenever the simulation clock (ms) is a multiple of the interval
    EveryClockMs(u64),
    /// Disabled by an EMP
    Never,
}

impl FireCadence {
    fn fires(&self, tick: u64, clock_ms: u64) -> bool {
        match *self {
            FireCadence::EveryTicks(interval) => interval > 0 && tick % interval == 0,
            FireCadence::EveryClockMs(interval) => interval > 0 && clock_ms % interval == 0,
            FireCadence::Never => false,
        }
    }
}

/// A descending enemy or boss
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hostile {
    pub kind: HostileKind,
    /// Alien art variant
    pub variant: u8,
    pub rect: Rect,
    /// Vertical velocity (pixels per tick)
    pub vy: f32,
    /// Centre y past which the hostile stops
    pub stop_line: f32,
    pub descent: Descent,
    pub cadence: FireCadence,
    pub hp: u8,
    /// Hit by an EMP (drawn with the disabled effect)
    pub jammed: bool,
}

impl Hostile {
    pub fn spawn_enemy(rng: &mut impl Rng, field: &Rect, sprites: &SpriteTable) -> Self {
        let variant = rng.random_range(0..ALIEN_VARIANTS);
        let interval = rng.random_range(ENEMY_INTERVAL_MIN..=ENEMY_INTERVAL_MAX) as u64;
        Self::spawn(
            HostileKind::Enemy,
            variant,
            sprites.enemy(variant),
            FireCadence::EveryTicks(interval),
            1,
            rng,
            field,
        )
    }

    pub fn spawn_boss(rng: &mut impl Rng, field: &Rect, sprites: &SpriteTable) -> Self {
        let variant = rng.random_range(0..ALIEN_VARIANTS);
        Self::spawn(
            HostileKind::Boss,
            variant,
            sprites.boss(variant),
            FireCadence::EveryClockMs(BOSS_FIRE_INTERVAL_MS),
            BOSS_HP,
            rng,
            field,
        )
    }

    fn spawn(
        kind: HostileKind,
        variant: u8,
        size: Vec2,
        cadence: FireCadence,
        hp: u8,
        rng: &mut impl Rng,
        field: &Rect,
    ) -> Self {
        let x = rng.random_range(0..=field.size.x as u32) as f32;
        let max_stop = (field.size.y / 2.0).max(STOP_LINE_MIN) as u32;
        let stop_line = rng.random_range(STOP_LINE_MIN as u32..=max_stop) as f32;
        Self {
            kind,
            variant,
            rect: Rect::from_center(Vec2::new(field.left() + x, field.top()), size),
            vy: HOSTILE_DESCENT_SPEED,
            stop_line,
            descent: Descent::Descending,
            cadence,
            hp,
            jammed: false,
        }
    }

    /// Advance one tick. Returns `true` when the hostile wants to drop a bomb now.
    pub fn update(&mut self, tick: u64, clock_ms: u64) -> bool {
        if self.rect.center().y > self.stop_line {
            self.vy = 0.0;
            self.descent = Descent::Stopped;
        }
        self.rect.translate(Vec2::new(0.0, self.vy));
        self.descent == Descent::Stopped && self.cadence.fires(tick, clock_ms)
    }

    /// EMP hit: never drop another bomb
    pub fn jam(&mut self) {
        self.cadence = FireCadence::Never;
        self.jammed = true;
    }
}

/// Whether a bomb can still hurt the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BombState {
    Active,
    /// Neutralised by an EMP; harmless on contact
    Inactive,
}

/// A round bomb flying toward where the player was when it was released
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bomb {
    pub rect: Rect,
    pub motion: Motion,
    pub radius: f32,
    /// Index into the renderer's bomb palette
    pub palette_index: u8,
    pub state: BombState,
}

impl Bomb {
    /// Release a bomb from `origin` aimed at `target`.
    ///
    /// Returns `None` when the two centres coincide and no aim exists.
    pub fn aimed(origin: &Rect, target: &Rect, rng: &mut impl Rng) -> Option<Self> {
        let dir = direction(origin, target)?;
        let radius = rng.random_range(BOMB_RADIUS_MIN..=BOMB_RADIUS_MAX) as f32;
        let palette_index = rng.random_range(0..BOMB_COLORS);
        let center = Vec2::new(
            origin.center().x,
            origin.center().y + origin.size.y / 2.0,
        );
        Some(Self {
            rect: Rect::from_center(center, Vec2::splat(radius * 2.0)),
            motion: Motion::new(dir, BOMB_SPEED),
            radius,
            palette_index,
            state: BombState::Active,
        })
    }

    /// EMP hit: slow down and stop being dangerous
    pub fn neutralize(&mut self) {
        self.motion.speed /= 2.0;
        self.state = BombState::Inactive;
    }

    pub fn is_active(&self) -> bool {
        self.state == BombState::Active
    }
}

impl Projectile for Bomb {
    fn rect(&self) -> &Rect {
        &self.rect
    }
    fn rect_mut(&mut self) -> &mut Rect {
        &mut self.rect
    }
    fn motion(&self) -> &Motion {
        &self.motion
    }
}

/// The player's straight beam
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Beam {
    pub rect: Rect,
    pub motion: Motion,
    /// Sprite heading in degrees
    pub heading: f32,
}

impl Beam {
    /// Fire along the player's facing, rotated by `offset` degrees
    pub fn fire(player: &Player, offset: f32, sprites: &SpriteTable) -> Self {
        let heading = player.facing.heading() + offset;
        let dir = heading_to_vec(heading);
        let center = player.rect.center() + player.rect.size * dir;
        Self {
            rect: Rect::from_center(center, sprites.beam(heading)),
            motion: Motion::new(dir, BEAM_SPEED),
            heading,
        }
    }

    /// `count` beams spread evenly across the multi-beam arc
    pub fn spray(player: &Player, count: u32, sprites: &SpriteTable) -> Vec<Self> {
        if count <= 1 {
            return vec![Self::fire(player, 0.0, sprites)];
        }
        let step = 2.0 * MULTI_BEAM_HALF_ARC / (count - 1) as f32;
        (0..count)
            .map(|i| Self::fire(player, -MULTI_BEAM_HALF_ARC + step * i as f32, sprites))
            .collect()
    }
}

impl Projectile for Beam {
    fn rect(&self) -> &Rect {
        &self.rect
    }
    fn rect_mut(&mut self) -> &mut Rect {
        &mut self.rect
    }
    fn motion(&self) -> &Motion {
        &self.motion
    }
}

/// A beam that bounces off the field edge once before expiring
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReflectBeam {
    pub beam: Beam,
    /// Cleared after the first bounce
    pub reflectable: bool,
    /// Ticks alive, saturating just past the reflect window
    pub elapsed: u32,
    /// Sprite mirrored horizontally / vertically by bounces
    pub flip_x: bool,
    pub flip_y: bool,
}

impl ReflectBeam {
    pub fn fire(player: &Player, sprites: &SpriteTable) -> Self {
        Self {
            beam: Beam::fire(player, 0.0, sprites),
            reflectable: true,
            elapsed: 0,
            flip_x: false,
            flip_y: false,
        }
    }

    fn count_tick(&mut self) {
        if self.elapsed <= REFLECT_WINDOW {
            self.elapsed += 1;
        }
    }
}

impl Projectile for ReflectBeam {
    fn rect(&self) -> &Rect {
        &self.beam.rect
    }
    fn rect_mut(&mut self) -> &mut Rect {
        &mut self.beam.rect
    }
    fn motion(&self) -> &Motion {
        &self.beam.motion
    }

    fn advance(&mut self, field: &Rect) -> bool {
        let delta = self.beam.motion.delta();
        self.beam.rect.translate(delta);

        let (horizontal, vertical) = in_bounds(&self.beam.rect, field);
        if horizontal && vertical {
            self.count_tick();
            return true;
        }

        if self.reflectable && self.elapsed <= REFLECT_WINDOW {
            if !horizontal {
                self.beam.motion.dir.x = -self.beam.motion.dir.x;
                self.flip_x = !self.flip_x;
            }
            if !vertical {
                // Half-turn of the sprite
                self.beam.motion.dir.y = -self.beam.motion.dir.y;
                self.flip_x = !self.flip_x;
                self.flip_y = !self.flip_y;
            }
            self.reflectable = false;
            self.count_tick();
            return true;
        }

        false
    }
}

/// Short-lived blast marker left where something was destroyed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Explosion {
    pub rect: Rect,
    pub life: i32,
}

impl Explosion {
    pub fn new(center: Vec2, life: i32, sprites: &SpriteTable) -> Self {
        Self {
            rect: Rect::from_center(center, sprites.explosion()),
            life,
        }
    }

    /// Count down one tick. Returns `false` once expired.
    pub fn update(&mut self) -> bool {
        self.life -= 1;
        self.life >= 0
    }

    /// Which of the two animation frames to show
    pub fn frame(&self) -> usize {
        (self.life.div_euclid(EXPLOSION_FRAME_TICKS) % 2) as usize
    }
}

/// Field-wide hazard that destroys every enemy it touches while alive
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GravityField {
    pub rect: Rect,
    pub life: i32,
}

impl GravityField {
    pub fn new(field: &Rect, life: i32) -> Self {
        Self { rect: *field, life }
    }

    pub fn update(&mut self) -> bool {
        self.life -= 1;
        self.life >= 0
    }
}

/// Electromagnetic pulse: jams current enemies and defuses current bombs
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Emp {
    /// Ticks the overlay remains visible
    pub remaining: u32,
}

impl Emp {
    pub fn is_active(&self) -> bool {
        self.remaining > 0
    }

    /// Affects only the entities present right now
    pub fn activate(&mut self, enemies: &mut [Hostile], bombs: &mut [Bomb]) {
        self.remaining = EMP_TICKS;
        for enemy in enemies.iter_mut() {
            enemy.jam();
        }
        for bomb in bombs.iter_mut() {
            bomb.neutralize();
        }
    }

    pub fn update(&mut self) {
        self.remaining = self.remaining.saturating_sub(1);
    }
}

/// Something that happened during a tick, for audio/UI collaborators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    HostileSpawned { kind: HostileKind },
    BeamsFired { count: u32 },
    EnemyDestroyed { at: Vec2 },
    BossHit { hp_left: u8 },
    BossDestroyed { at: Vec2 },
    BombShot { at: Vec2 },
    GravityKill { at: Vec2 },
    AbilityUsed(Ability),
    AbilityRejected(Ability),
    DifficultyRaised { spawn_frame: u64 },
    Won { score: u64 },
    Lost { score: u64 },
}

/// Running totals for the round summary
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundStats {
    pub enemies_destroyed: u32,
    pub bosses_destroyed: u32,
    pub bombs_shot: u32,
    pub gravity_kills: u32,
    pub beams_fired: u32,
    pub abilities_used: u32,
}

/// Complete simulation state for one round
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    /// Play field (origin at 0,0)
    pub field: Rect,
    /// Collision sizes, read-only after construction
    pub sprites: SpriteTable,
    pub phase: GamePhase,
    /// Simulation tick counter (index of the tick being processed)
    pub time_ticks: u64,
    /// Simulation clock in milliseconds, accumulated from per-tick elapsed time
    pub clock_ms: u64,
    pub ledger: ScoreLedger,
    pub director: SpawnDirector,
    pub player: Player,
    pub enemies: Vec<Hostile>,
    pub bosses: Vec<Hostile>,
    pub bombs: Vec<Bomb>,
    pub beams: Vec<Beam>,
    pub reflect_beams: Vec<ReflectBeam>,
    pub explosions: Vec<Explosion>,
    pub gravity_fields: Vec<GravityField>,
    pub emp: Emp,
    /// Events from the most recent tick
    pub events: Vec<GameEvent>,
    pub stats: RoundStats,
}

impl GameState {
    /// Create a new round on a `width` x `height` field with the given seed
    pub fn new(seed: u64, width: f32, height: f32, sprites: SpriteTable) -> Self {
        Self::with_rng(
            seed,
            Pcg32::seed_from_u64(seed),
            Rect::new(0.0, 0.0, width, height),
            sprites,
        )
    }

    /// Create a round with an explicit random source
    pub fn with_rng(seed: u64, rng: Pcg32, field: Rect, sprites: SpriteTable) -> Self {
        // Keep the whole sprite on the field, whatever its size
        let half = sprites.player() / 2.0;
        let start = Vec2::from(PLAYER_START)
            .min(field.pos + field.size - half)
            .max(field.pos + half);
        log::info!(
            "New round: seed={}, field={}x{}",
            seed,
            field.size.x,
            field.size.y
        );
        Self {
            seed,
            rng,
            field,
            player: Player::new(start, &sprites),
            sprites,
            phase: GamePhase::Playing,
            time_ticks: 0,
            clock_ms: 0,
            ledger: ScoreLedger::new(),
            director: SpawnDirector::new(),
            enemies: Vec::new(),
            bosses: Vec::new(),
            bombs: Vec::new(),
            beams: Vec::new(),
            reflect_beams: Vec::new(),
            explosions: Vec::new(),
            gravity_fields: Vec::new(),
            emp: Emp::default(),
            events: Vec::new(),
            stats: RoundStats::default(),
        }
    }

    pub fn score(&self) -> u64 {
        self.ledger.balance()
    }

    /// Take the events recorded so far
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn spawn_enemy(&mut self) {
        let enemy = Hostile::spawn_enemy(&mut self.rng, &self.field, &self.sprites);
        self.enemies.push(enemy);
        self.events.push(GameEvent::HostileSpawned {
            kind: HostileKind::Enemy,
        });
    }

    pub fn spawn_boss(&mut self) {
        let boss = Hostile::spawn_boss(&mut self.rng, &self.field, &self.sprites);
        log::info!(
            "Boss spawned at x={:.0} (score {})",
            boss.rect.center().x,
            self.score()
        );
        self.bosses.push(boss);
        self.events.push(GameEvent::HostileSpawned {
            kind: HostileKind::Boss,
        });
    }

    /// Release a bomb from `origin` toward the player's current position
    pub fn drop_bomb(&mut self, origin: &Rect) {
        match Bomb::aimed(origin, &self.player.rect, &mut self.rng) {
            Some(bomb) => self.bombs.push(bomb),
            None => log::debug!("Bomb skipped: hostile centred on player"),
        }
    }

    /// Primary fire: one beam along the player's facing
    pub fn fire_beam(&mut self) {
        self.beams.push(Beam::fire(&self.player, 0.0, &self.sprites));
        self.stats.beams_fired += 1;
        self.events.push(GameEvent::BeamsFired { count: 1 });
    }

    /// Multi-beam spray. Returns `false` if the score gate is not met.
    pub fn fire_spray(&mut self) -> bool {
        if !self.use_ability(Ability::MultiBeam) {
            return false;
        }
        let spray = Beam::spray(&self.player, MULTI_BEAM_COUNT, &self.sprites);
        let count = spray.len() as u32;
        self.beams.extend(spray);
        self.stats.beams_fired += count;
        self.events.push(GameEvent::BeamsFired { count });
        true
    }

    pub fn fire_reflect_beam(&mut self) -> bool {
        if !self.use_ability(Ability::ReflectBeam) {
            return false;
        }
        self.reflect_beams.push(ReflectBeam::fire(&self.player, &self.sprites));
        self.stats.beams_fired += 1;
        self.events.push(GameEvent::BeamsFired { count: 1 });
        true
    }

    pub fn trigger_emp(&mut self) -> bool {
        if !self.use_ability(Ability::Emp) {
            return false;
        }
        self.emp.activate(&mut self.enemies, &mut self.bombs);
        true
    }

    pub fn summon_gravity(&mut self) -> bool {
        if !self.use_ability(Ability::GravityField) {
            return false;
        }
        self.gravity_fields
            .push(GravityField::new(&self.field, GRAVITY_LIFE));
        true
    }

    /// Pay for an ability through the ledger, recording the outcome
    fn use_ability(&mut self, ability: Ability) -> bool {
        if self.ledger.try_activate(ability) {
            log::debug!(
                "{:?} activated, score now {}",
                ability,
                self.ledger.balance()
            );
            self.stats.abilities_used += 1;
            self.events.push(GameEvent::AbilityUsed(ability));
            true
        } else {
            log::debug!(
                "{:?} rejected: score {} < {}",
                ability,
                self.ledger.balance(),
                ability.min_score()
            );
            self.events.push(GameEvent::AbilityRejected(ability));
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn field() -> Rect {
        Rect::new(0.0, 0.0, FIELD_WIDTH, FIELD_HEIGHT)
    }

    fn state() -> GameState {
        GameState::new(7, FIELD_WIDTH, FIELD_HEIGHT, SpriteTable::default())
    }

    #[test]
    fn test_player_blocked_move_is_reverted_whole() {
        let sprites = SpriteTable::default();
        let mut player = Player::new(Vec2::new(500.0, 300.0), &sprites);
        // Push the player against the right edge
        player.rect.pos.x = FIELD_WIDTH - player.rect.size.x - 5.0;
        let before = player.rect;

        // Diagonal move: x would exit, y alone would be fine
        player.steer(IVec2::new(1, -1), false, &field());
        assert_eq!(player.rect, before);
        // Facing still follows the input
        assert_eq!(player.facing, Facing { dx: 1, dy: -1 });
    }

    #[test]
    fn test_player_boost_and_facing_persistence() {
        let sprites = SpriteTable::default();
        let mut player = Player::new(Vec2::new(500.0, 300.0), &sprites);
        let start = player.rect.pos;

        player.steer(IVec2::new(0, -1), true, &field());
        assert_eq!(player.rect.pos, start + Vec2::new(0.0, -20.0));
        assert!(player.boosted);

        player.steer(IVec2::ZERO, false, &field());
        assert_eq!(player.facing, Facing { dx: 0, dy: -1 });
        assert_eq!(player.speed, PLAYER_SPEED);
    }

    #[test]
    fn test_happy_pose_cleared_by_movement() {
        let sprites = SpriteTable::default();
        let mut player = Player::new(Vec2::new(500.0, 300.0), &sprites);
        player.pose = PlayerPose::Happy;
        player.steer(IVec2::ZERO, false, &field());
        assert_eq!(player.pose, PlayerPose::Happy);
        player.steer(IVec2::new(-1, 0), false, &field());
        assert_eq!(player.pose, PlayerPose::Normal);
    }

    #[test]
    fn test_hostile_stops_past_stop_line() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut enemy = Hostile::spawn_enemy(&mut rng, &field(), &SpriteTable::default());
        assert!(enemy.stop_line >= STOP_LINE_MIN && enemy.stop_line <= FIELD_HEIGHT / 2.0);

        let mut ticks = 0;
        while enemy.descent == Descent::Descending {
            enemy.update(1, 1);
            ticks += 1;
            assert!(ticks < 1000);
        }
        assert_eq!(enemy.vy, 0.0);
        assert!(enemy.rect.center().y > enemy.stop_line);

        let resting = enemy.rect;
        for t in 0..200 {
            enemy.update(t, t);
            assert_eq!(enemy.descent, Descent::Stopped);
            assert_eq!(enemy.vy, 0.0);
        }
        assert_eq!(enemy.rect, resting);
    }

    #[test]
    fn test_enemy_fires_on_interval_only_when_stopped() {
        let mut rng = Pcg32::seed_from_u64(11);
        let mut enemy = Hostile::spawn_enemy(&mut rng, &field(), &SpriteTable::default());
        enemy.cadence = FireCadence::EveryTicks(50);
        enemy.stop_line = 10_000.0;
        assert!(!enemy.update(100, 0));

        enemy.stop_line = -1.0;
        assert!(enemy.update(1000, 0));
        assert!(!enemy.update(1001, 0));

        enemy.jam();
        assert!(!enemy.update(1000, 0));
        assert!(enemy.jammed);
    }

    #[test]
    fn test_boss_fires_on_clock() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut boss = Hostile::spawn_boss(&mut rng, &field(), &SpriteTable::default());
        assert_eq!(boss.hp, BOSS_HP);
        boss.stop_line = -1.0;
        assert!(boss.update(7, 100));
        assert!(!boss.update(7, 120));
    }

    #[test]
    fn test_bomb_aims_at_target_center() {
        let mut rng = Pcg32::seed_from_u64(1);
        let origin = Rect::from_center(Vec2::new(100.0, 100.0), Vec2::splat(60.0));
        let target = Rect::from_center(Vec2::new(400.0, 500.0), Vec2::splat(80.0));
        let bomb = Bomb::aimed(&origin, &target, &mut rng).unwrap();

        assert!((bomb.motion.dir - Vec2::new(0.6, 0.8)).length() < 1e-5);
        assert_eq!(bomb.motion.speed, BOMB_SPEED);
        assert_eq!(bomb.rect.center(), Vec2::new(100.0, 130.0));
        assert!(bomb.radius >= 10.0 && bomb.radius <= 50.0);
        assert!(bomb.palette_index < BOMB_COLORS);
        assert!(bomb.is_active());
    }

    #[test]
    fn test_bomb_leaves_field_and_is_removed() {
        let mut rng = Pcg32::seed_from_u64(1);
        let origin = Rect::from_center(Vec2::new(500.0, 540.0), Vec2::splat(60.0));
        let target = Rect::from_center(Vec2::new(500.0, 900.0), Vec2::splat(10.0));
        let mut bomb = Bomb::aimed(&origin, &target, &mut rng).unwrap();
        let mut alive = true;
        for _ in 0..100 {
            alive = bomb.advance(&field());
            if !alive {
                break;
            }
        }
        assert!(!alive);
        assert!(!fully_in_bounds(&bomb.rect, &field()));
    }

    #[test]
    fn test_spray_spans_arc() {
        let sprites = SpriteTable::default();
        let player = Player::new(Vec2::new(500.0, 300.0), &sprites);
        let beams = Beam::spray(&player, 5, &sprites);
        let headings: Vec<f32> = beams.iter().map(|b| b.heading).collect();
        assert_eq!(headings, vec![-50.0, -25.0, 0.0, 25.0, 50.0]);
        for beam in &beams {
            assert!((beam.motion.dir.length() - 1.0).abs() < 1e-5);
            assert_eq!(beam.motion.speed, BEAM_SPEED);
        }
    }

    #[test]
    fn test_beam_spawns_ahead_of_player() {
        let sprites = SpriteTable::default();
        let player = Player::new(Vec2::new(500.0, 300.0), &sprites);
        let beam = Beam::fire(&player, 0.0, &sprites);
        let expected = player.rect.center() + Vec2::new(player.rect.size.x, 0.0);
        assert!((beam.rect.center() - expected).length() < 1e-3);
    }

    fn reflect_beam_at(center: Vec2, dir: Vec2) -> ReflectBeam {
        ReflectBeam {
            beam: Beam {
                rect: Rect::from_center(center, Vec2::new(20.0, 20.0)),
                motion: Motion::new(dir, BEAM_SPEED),
                heading: vec_to_heading(dir),
            },
            reflectable: true,
            elapsed: 0,
            flip_x: false,
            flip_y: false,
        }
    }

    #[test]
    fn test_reflect_beam_bounces_once() {
        let mut rb = reflect_beam_at(Vec2::new(985.0, 300.0), Vec2::X);

        // Exits right: bounce
        assert!(rb.advance(&field()));
        assert_eq!(rb.beam.motion.dir, Vec2::new(-1.0, 0.0));
        assert!(rb.flip_x && !rb.flip_y);
        assert!(!rb.reflectable);

        // Back inside
        assert!(rb.advance(&field()));

        // Send it out again: no second bounce
        rb.beam.rect.pos.x = 2.0;
        assert!(!rb.advance(&field()));
    }

    #[test]
    fn test_reflect_beam_vertical_bounce_turns_sprite() {
        let mut rb = reflect_beam_at(Vec2::new(500.0, 15.0), Vec2::new(0.0, -1.0));
        assert!(rb.advance(&field()));
        assert_eq!(rb.beam.motion.dir, Vec2::new(0.0, 1.0));
        assert!(rb.flip_x && rb.flip_y);
    }

    #[test]
    fn test_reflect_beam_expires_after_window() {
        let mut rb = reflect_beam_at(Vec2::new(500.0, 300.0), Vec2::X);
        rb.elapsed = REFLECT_WINDOW + 1;
        rb.beam.rect.pos.x = FIELD_WIDTH - 5.0;
        assert!(!rb.advance(&field()));
    }

    #[test]
    fn test_explosion_frames_and_expiry() {
        let mut exp = Explosion::new(Vec2::new(50.0, 50.0), 21, &SpriteTable::default());
        assert!(exp.update());
        assert_eq!(exp.life, 20);
        assert_eq!(exp.frame(), 0);
        exp.life = 11;
        assert!(exp.update());
        assert_eq!(exp.frame(), 1);
        exp.life = 0;
        assert!(!exp.update());
    }

    #[test]
    fn test_emp_jams_present_entities_only() {
        let mut s = state();
        s.ledger.credit(100);
        for _ in 0..3 {
            s.spawn_enemy();
        }
        let player_rect = s.player.rect;
        for i in 0..2 {
            let center = Vec2::new(100.0 + 200.0 * i as f32, 50.0);
            let origin = Rect::from_center(center, Vec2::splat(40.0));
            let bomb = Bomb::aimed(&origin, &player_rect, &mut Pcg32::seed_from_u64(i)).unwrap();
            s.bombs.push(bomb);
        }

        assert!(s.trigger_emp());
        assert_eq!(s.score(), 80);
        assert!(s.emp.is_active());
        assert!(s.enemies.iter().all(|e| e.cadence == FireCadence::Never && e.jammed));
        assert!(s.bombs.iter().all(|b| !b.is_active() && b.motion.speed == BOMB_SPEED / 2.0));

        // Newcomers are unaffected
        s.spawn_enemy();
        assert!(!s.enemies[3].jammed);

        for _ in 0..EMP_TICKS {
            s.emp.update();
        }
        assert!(!s.emp.is_active());
    }

    #[test]
    fn test_insufficient_score_leaves_populations() {
        let mut s = state();
        s.ledger.credit(4);
        assert!(!s.fire_reflect_beam());
        assert!(!s.trigger_emp());
        assert!(!s.summon_gravity());
        assert!(!s.fire_spray());
        assert_eq!(s.score(), 4);
        assert!(s.reflect_beams.is_empty());
        assert!(s.gravity_fields.is_empty());
        assert!(s.beams.is_empty());
        assert!(!s.emp.is_active());
    }

    #[test]
    fn test_player_starts_inside_small_field() {
        let mut s = GameState::new(1, 800.0, 400.0, SpriteTable::default());
        assert!(fully_in_bounds(&s.player.rect, &s.field));
        assert_eq!(s.player.rect.right(), 800.0);

        let before = s.player.rect;
        let field = s.field;
        s.player.steer(IVec2::new(-1, 0), false, &field);
        assert_eq!(s.player.rect.pos, before.pos - Vec2::new(PLAYER_SPEED, 0.0));
    }

    #[test]
    fn test_default_start_is_unchanged() {
        assert_eq!(state().player.rect.center(), Vec2::from(PLAYER_START));
    }

    #[test]
    fn test_degenerate_aim_drops_no_bomb() {
        let mut s = state();
        let origin = s.player.rect;
        s.drop_bomb(&origin);
        assert!(s.bombs.is_empty());

        let above = Rect::from_center(origin.center() - Vec2::new(0.0, 200.0), origin.size);
        s.drop_bomb(&above);
        assert_eq!(s.bombs.len(), 1);
    }

    #[test]
    fn test_reflect_beam_reports_fired_event() {
        let mut s = state();
        s.ledger.credit(5);
        assert!(s.fire_reflect_beam());
        assert_eq!(s.stats.beams_fired, 1);
        assert!(s.events.contains(&GameEvent::BeamsFired { count: 1 }));
    }

    proptest! {
        #[test]
        fn prop_blocked_move_leaves_rect_unchanged(
            x in 0.0f32..1000.0, y in 0.0f32..600.0,
            dx in -1i32..=1, dy in -1i32..=1, boost in any::<bool>(),
        ) {
            let sprites = SpriteTable::default();
            let mut player = Player::new(Vec2::new(x, y), &sprites);
            let before = player.rect;
            player.steer(IVec2::new(dx, dy), boost, &field());
            let mut candidate = before;
            let speed = if boost { PLAYER_BOOST_SPEED } else { PLAYER_SPEED };
            candidate.translate(Vec2::new(dx as f32, dy as f32) * speed);
            if fully_in_bounds(&candidate, &field()) {
                prop_assert_eq!(player.rect, candidate);
            } else {
                prop_assert_eq!(player.rect, before);
            }
        }

        #[test]
        fn prop_stopped_hostile_never_moves_again(seed in any::<u64>(), ticks in 1u64..400) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut hostile = Hostile::spawn_enemy(&mut rng, &field(), &SpriteTable::default());
            let mut stopped = false;
            for t in 0..ticks {
                hostile.update(t, t * 20);
                if stopped {
                    prop_assert_eq!(hostile.vy, 0.0);
                    prop_assert_eq!(hostile.descent, Descent::Stopped);
                }
                stopped |= hostile.descent == Descent::Stopped;
            }
        }
    }
}
