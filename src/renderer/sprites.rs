//! Sprite atlas layout
//!
//! Every sprite is a sub-rectangle of one atlas image. Hosts load each region once at
//! startup; a region that fails to load is fatal.

use glam::Vec2;

/// Atlas image every sprite is cut from
pub const ATLAS_PATH: &str = "resources/rhinoceros.png";

/// Pixel rectangle inside the atlas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl Region {
    const fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.w as f32, self.h as f32)
    }
}

pub const RHINO_FRAMES: u8 = 4;
pub const ENEMY_FRAMES: u8 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sprite {
    /// Run cycle: frames 0-1 idle, 2-3 charged
    Rhino(u8),
    RhinoHit,
    Enemy(u8),
    Tree,
    Weed,
    Cloud,
    /// Vertical strip tiled across the screen
    Background,
}

impl Sprite {
    /// Every region the host has to load
    pub fn all() -> Vec<Sprite> {
        let mut sprites: Vec<Sprite> = (0..RHINO_FRAMES).map(Sprite::Rhino).collect();
        sprites.push(Sprite::RhinoHit);
        sprites.extend((0..ENEMY_FRAMES).map(Sprite::Enemy));
        sprites.extend([Sprite::Tree, Sprite::Weed, Sprite::Cloud, Sprite::Background]);
        sprites
    }

    pub fn region(&self) -> Region {
        match *self {
            Sprite::Rhino(frame) => Region::new(0, 60 * (frame % RHINO_FRAMES) as u32, 110, 60),
            Sprite::RhinoHit => Region::new(0, 240, 110, 70),
            Sprite::Enemy(frame) => Region::new(150, 70 * (frame % ENEMY_FRAMES) as u32, 120, 70),
            Sprite::Tree => Region::new(290, 0, 150, 120),
            Sprite::Weed => Region::new(290, 130, 70, 40),
            Sprite::Cloud => Region::new(290, 240, 130, 60),
            Sprite::Background => Region::new(560, 0, 60, 480),
        }
    }

    pub fn size(&self) -> Vec2 {
        self.region().size()
    }
}
