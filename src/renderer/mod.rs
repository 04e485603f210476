//! Rendering boundary
//!
//! The simulation never draws. Each frame `draw_frame` walks the populations
//! in a fixed order and hands sprites, circles and text to a `Renderer`.
//! Image handles come from an `AssetSource` and are cached in an `Atlas`,
//! which also yields the collision sizes the simulation is built with.

pub mod colors;
pub mod draw_list;

use std::collections::HashMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::rect::Rect;
use crate::sim::sprites::{PlayerPose, SpriteId, SpriteTable};
use crate::sim::state::{Facing, GamePhase, GameState};
use crate::vec_to_heading;
use colors::Color;

pub use draw_list::{DrawCmd, DrawList, PlaceholderAssets};

/// Text size of the score readout
const SCORE_TEXT_SIZE: f32 = 50.0;
const WIN_TEXT_SIZE: f32 = 80.0;

/// Loads images for logical sprite identifiers
pub trait AssetSource {
    type Image: Clone;

    fn load(&self, id: SpriteId) -> Self::Image;

    /// Unscaled size of a loaded image
    fn size(&self, image: &Self::Image) -> Vec2;
}

/// Every sprite image, loaded once up front
#[derive(Debug, Clone)]
pub struct Atlas<I> {
    images: HashMap<SpriteId, I>,
    sprites: SpriteTable,
}

impl<I: Clone> Atlas<I> {
    pub fn load<A: AssetSource<Image = I>>(source: &A) -> Self {
        let images: HashMap<SpriteId, I> = SpriteId::all()
            .into_iter()
            .map(|id| (id, source.load(id)))
            .collect();
        let sprites = SpriteTable::from_sizes(|id| {
            images
                .get(&id)
                .map(|image| source.size(image))
                .unwrap_or_else(|| id.default_size())
        });
        log::debug!("Atlas loaded with {} images", images.len());
        Self { images, sprites }
    }

    pub fn image(&self, id: SpriteId) -> Option<&I> {
        self.images.get(&id)
    }

    /// Collision sizes derived from the loaded art
    pub fn sprite_table(&self) -> SpriteTable {
        self.sprites
    }
}

/// How an image is placed into its destination rect
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// Counter-clockwise rotation in degrees, applied after flipping
    pub rotation: f32,
    pub flip_x: bool,
    pub flip_y: bool,
    /// Edge-detect filter (EMP-jammed hostiles)
    pub edge_detect: bool,
}

impl Transform {
    pub fn rotated(degrees: f32) -> Self {
        Self {
            rotation: degrees,
            ..Default::default()
        }
    }
}

/// Drawing backend
pub trait Renderer {
    type Image;

    /// Called once before each frame is drawn
    fn begin_frame(&mut self) {}

    /// Draw `image` scaled into `dest`
    fn blit(&mut self, image: &Self::Image, dest: &Rect, transform: Transform);
    fn circle(&mut self, center: Vec2, radius: f32, color: Color);
    fn fill(&mut self, rect: &Rect, color: Color);
    fn text(&mut self, text: &str, center: Vec2, size: f32, color: Color);
}

/// Player art faces left; right-facing headings mirror it first
fn player_transform(facing: Facing, pose: PlayerPose) -> Transform {
    if pose != PlayerPose::Normal {
        return Transform::default();
    }
    if facing.dx < 0 {
        Transform::rotated(vec_to_heading(Vec2::new(
            -facing.dx as f32,
            -facing.dy as f32,
        )))
    } else {
        Transform {
            rotation: facing.heading(),
            flip_x: true,
            ..Default::default()
        }
    }
}

/// Draw one frame. Returns the number of draw calls issued.
pub fn draw_frame<R: Renderer>(
    renderer: &mut R,
    atlas: &Atlas<R::Image>,
    state: &GameState,
) -> usize
where
    R::Image: Clone,
{
    renderer.begin_frame();

    let mut calls = 0;
    let mut blit = |renderer: &mut R, id: SpriteId, dest: &Rect, transform: Transform| {
        if let Some(image) = atlas.image(id) {
            renderer.blit(image, dest, transform);
            calls += 1;
        }
    };

    for gravity in &state.gravity_fields {
        renderer.fill(&gravity.rect, colors::GRAVITY);
    }

    let player = &state.player;
    blit(
        renderer,
        SpriteId::Player(player.pose),
        &player.rect,
        player_transform(player.facing, player.pose),
    );

    for beam in &state.beams {
        blit(renderer, SpriteId::Beam, &beam.rect, Transform::rotated(beam.heading));
    }
    for reflect in &state.reflect_beams {
        let transform = Transform {
            rotation: reflect.beam.heading,
            flip_x: reflect.flip_x,
            flip_y: reflect.flip_y,
            ..Default::default()
        };
        blit(renderer, SpriteId::Beam, &reflect.beam.rect, transform);
    }

    for hostile in state.enemies.iter().chain(state.bosses.iter()) {
        let transform = Transform {
            edge_detect: hostile.jammed,
            ..Default::default()
        };
        blit(renderer, SpriteId::Alien(hostile.variant), &hostile.rect, transform);
    }

    for bomb in &state.bombs {
        renderer.circle(bomb.rect.center(), bomb.radius, colors::bomb_color(bomb.palette_index));
    }

    for explosion in &state.explosions {
        let flipped = explosion.frame() == 1;
        let transform = Transform {
            flip_x: flipped,
            flip_y: flipped,
            ..Default::default()
        };
        blit(renderer, SpriteId::Explosion, &explosion.rect, transform);
    }

    let mut extra = state.gravity_fields.len() + state.bombs.len();

    if state.emp.is_active() {
        renderer.fill(&state.field, colors::EMP_OVERLAY);
        extra += 1;
    }

    renderer.text(
        &format!("Score: {}", state.score()),
        Vec2::new(100.0, state.field.bottom() - 50.0),
        SCORE_TEXT_SIZE,
        colors::SCORE_TEXT,
    );
    extra += 1;

    if state.phase == GamePhase::Won {
        renderer.text(
            "GameClear",
            state.field.center() - Vec2::new(0.0, 100.0),
            WIN_TEXT_SIZE,
            colors::WIN_TEXT,
        );
        extra += 1;
    }

    calls + extra
}
