//! Recording renderer for headless runs and tests

use glam::Vec2;
use serde::Serialize;

use super::colors::Color;
use super::{AssetSource, Renderer, Transform};
use crate::sim::rect::Rect;
use crate::sim::sprites::SpriteId;

/// Asset source with no pixel data: the image handle is the sprite id itself
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderAssets;

impl AssetSource for PlaceholderAssets {
    type Image = SpriteId;

    fn load(&self, id: SpriteId) -> SpriteId {
        id
    }

    fn size(&self, image: &SpriteId) -> Vec2 {
        image.default_size()
    }
}

/// One recorded draw call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DrawCmd {
    Blit {
        sprite: SpriteId,
        dest: Rect,
        transform: Transform,
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: Color,
    },
    Fill {
        rect: Rect,
        color: Color,
    },
    Text {
        text: String,
        center: Vec2,
        size: f32,
        color: Color,
    },
}

impl DrawCmd {
    /// Short name for logs and assertions
    pub fn label(&self) -> &'static str {
        match self {
            DrawCmd::Blit { sprite, .. } => match sprite {
                SpriteId::Player(_) => "player",
                SpriteId::Alien(_) => "alien",
                SpriteId::Beam => "beam",
                SpriteId::Explosion => "explosion",
            },
            DrawCmd::Circle { .. } => "circle",
            DrawCmd::Fill { .. } => "fill",
            DrawCmd::Text { .. } => "text",
        }
    }
}

/// Renderer that keeps the commands of the current frame
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    commands: Vec<DrawCmd>,
}

impl DrawList {
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn commands(&self) -> &[DrawCmd] {
        &self.commands
    }

    /// Every text string drawn, in order
    pub fn texts(&self) -> Vec<String> {
        self.commands
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCmd::Text { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }
}

impl Renderer for DrawList {
    type Image = SpriteId;

    fn begin_frame(&mut self) {
        self.clear();
    }

    fn blit(&mut self, image: &SpriteId, dest: &Rect, transform: Transform) {
        self.commands.push(DrawCmd::Blit {
            sprite: *image,
            dest: *dest,
            transform,
        });
    }

    fn circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.commands.push(DrawCmd::Circle {
            center,
            radius,
            color,
        });
    }

    fn fill(&mut self, rect: &Rect, color: Color) {
        self.commands.push(DrawCmd::Fill { rect: *rect, color });
    }

    fn text(&mut self, text: &str, center: Vec2, size: f32, color: Color) {
        self.commands.push(DrawCmd::Text {
            text: text.to_string(),
            center,
            size,
            color,
        });
    }
}
