//! Display list construction
//!
//! Turns simulation state into an ordered list of draw commands. Commands are
//! painted in list order by whatever backend the host provides.

use std::f32::consts::{FRAC_PI_2, TAU};

use glam::{Affine2, Vec2};

use super::shapes::stroke_arc;
use super::sprites::{ENEMY_FRAMES, Sprite};
use super::vertex::{Vertex, colors};
use crate::consts::*;
use crate::sim::{BackgroundObject, Effect, Enemy, GameRunner, ObjectKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Start,
    Center,
    End,
}

/// The three faces cut from the game font
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontSize {
    Large,
    Medium,
    Small,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Atlas sprite; `transform` maps sprite pixels (origin top-left) to the screen
    Sprite {
        sprite: Sprite,
        transform: Affine2,
        alpha: f32,
    },
    /// Untextured triangle list
    Triangles { vertices: Vec<Vertex> },
    /// Filled square rotated about its centre
    Rect {
        center: Vec2,
        size: f32,
        angle: f32,
        color: [f32; 4],
    },
    /// Text anchored at `pos` (top of the first line); `line_spacing` 0 = font default
    Text {
        text: String,
        pos: Vec2,
        align: TextAlign,
        font: FontSize,
        color: [f32; 4],
        line_spacing: f32,
    },
}

/// Ordered draw commands for one frame
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    fn sprite(&mut self, sprite: Sprite, transform: Affine2, alpha: f32) {
        self.push(DrawCommand::Sprite {
            sprite,
            transform,
            alpha,
        });
    }

    fn text(
        &mut self,
        text: impl Into<String>,
        pos: Vec2,
        align: TextAlign,
        font: FontSize,
        line_spacing: f32,
    ) {
        self.push(DrawCommand::Text {
            text: text.into(),
            pos,
            align,
            font,
            color: colors::TEXT,
            line_spacing,
        });
    }
}

/// Gauge ring around the player
const GAUGE_RADIUS: f32 = 80.0;
const GAUGE_STROKE_WIDTH: f32 = 5.0;
const ENEMY_SCALE: f32 = 0.7;
/// Scenery between the camera and the player is see-through
const FOREGROUND_ALPHA: f32 = 0.7;
/// Vertical bob of odd animation frames
const BOB_OFFSET: f32 = 5.0;

/// Sprite anchored at its bottom centre, scaled then rotated about that anchor
fn anchored(sprite: Sprite, pos: Vec2, scale: f32, angle: f32) -> Affine2 {
    let size = sprite.size();
    Affine2::from_translation(pos)
        * Affine2::from_angle(angle)
        * Affine2::from_scale(Vec2::splat(scale))
        * Affine2::from_translation(Vec2::new(-size.x / 2.0, -size.y))
}

/// Compose a runner's frame: sky strip, scenery behind the player, player, gauge,
/// enemies, scenery in front of the player, effects.
pub fn draw_runner(runner: &GameRunner, list: &mut DrawList) {
    draw_background(list);

    for object in runner.objects.iter().filter(|o| !o.in_front_of_player()) {
        draw_object(object, list);
    }

    draw_rhino(runner, list);
    draw_gauge(runner.gauge, list);

    for enemy in &runner.enemies {
        draw_enemy(enemy, list);
    }

    for object in runner.objects.iter().filter(|o| o.in_front_of_player()) {
        draw_object(object, list);
    }

    for effect in &runner.effects {
        draw_effect(effect, list);
    }
}

fn draw_background(list: &mut DrawList) {
    let tile = Sprite::Background.size().x;
    let mut x = 0.0;
    while x < SCREEN_WIDTH {
        list.sprite(Sprite::Background, Affine2::from_translation(Vec2::new(x, 0.0)), 1.0);
        x += tile;
    }
}

fn draw_object(object: &BackgroundObject, list: &mut DrawList) {
    let (sprite, base_scale) = match object.kind {
        ObjectKind::Tree => (Sprite::Tree, 1.0),
        ObjectKind::Weed => (Sprite::Weed, 0.4),
        ObjectKind::Cloud => (Sprite::Cloud, 200.0),
    };
    let scale = base_scale * SCREEN_Z / object.pos.z;
    let alpha = if object.pos.z < RHINO_Z { FOREGROUND_ALPHA } else { 1.0 };
    list.sprite(sprite, anchored(sprite, object.screen_pos(), scale, 0.0), alpha);
}

/// Which player sprite shows this tick, and its bob offset
pub fn rhino_sprite(runner: &GameRunner) -> (Sprite, f32) {
    if runner.in_hit_pose() {
        return (Sprite::RhinoHit, 0.0);
    }

    let period = if runner.rush { 5 } else { 10 };
    let periodic = (runner.ticks / period % 2) as u8;
    let charged = if runner.gauge > 0 { 2 } else { 0 };
    (Sprite::Rhino(periodic + charged), periodic as f32 * BOB_OFFSET)
}

fn draw_rhino(runner: &GameRunner, list: &mut DrawList) {
    let (sprite, bob) = rhino_sprite(runner);
    let pos = Vec2::new(RHINO_X, RHINO_Y - bob);
    list.sprite(sprite, anchored(sprite, pos, 1.0, 0.0), 1.0);
}

/// Clockwise ring from 12 o'clock, full circle at a full gauge
fn draw_gauge(gauge: u32, list: &mut DrawList) {
    let body_height = Sprite::Rhino(0).size().y;
    let center = Vec2::new(RHINO_X, RHINO_Y - body_height / 2.0);
    let sweep = TAU * gauge as f32 / GAUGE_MAX as f32;
    let vertices = stroke_arc(
        center,
        GAUGE_RADIUS,
        -FRAC_PI_2,
        sweep,
        GAUGE_STROKE_WIDTH,
        colors::GAUGE,
    );
    if !vertices.is_empty() {
        list.push(DrawCommand::Triangles { vertices });
    }
}

fn draw_enemy(enemy: &Enemy, list: &mut DrawList) {
    let frame = (enemy.ticks / 10 % ENEMY_FRAMES as u64) as u8;
    let sprite = Sprite::Enemy(frame);
    // Tumble once knocked away
    let angle = if enemy.is_hit() {
        TAU / 30.0 * (enemy.ticks % 30) as f32
    } else {
        0.0
    };
    let pos = enemy.pos - Vec2::new(0.0, frame as f32 * BOB_OFFSET);
    list.sprite(sprite, anchored(sprite, pos, ENEMY_SCALE, angle), 1.0);
}

fn draw_effect(effect: &Effect, list: &mut DrawList) {
    match effect {
        Effect::Splash(splash) => {
            for p in &splash.particles {
                list.push(DrawCommand::Rect {
                    center: p.pos,
                    size: splash.options.size,
                    angle: p.angle,
                    color: splash.options.color,
                });
            }
        }
        Effect::Gain(gain) => {
            let mut color = colors::WHITE;
            color[3] = gain.alpha();
            list.push(DrawCommand::Text {
                text: gain.text(),
                pos: gain.pos,
                align: TextAlign::Center,
                font: FontSize::Medium,
                color,
                line_spacing: 0.0,
            });
        }
    }
}

pub fn draw_title(list: &mut DrawList) {
    let x = SCREEN_WIDTH / 2.0;
    list.text("RHINOCEROS", Vec2::new(x, 120.0), TextAlign::Center, FontSize::Large, 0.0);
    list.text(
        "[HOLD] Charge\n[RELEASE] Rush",
        Vec2::new(x, 260.0),
        TextAlign::Center,
        FontSize::Small,
        2.4,
    );
    list.text(
        "CREATOR: NAOKI TSUJIO\nFONT: Press Start 2P by CodeMan38\nSOUND EFFECT: MaouDamashii",
        Vec2::new(x, 410.0),
        TextAlign::Center,
        FontSize::Small,
        1.8,
    );
}

pub fn draw_score(score: u64, high_score: u64, list: &mut DrawList) {
    list.push(DrawCommand::Text {
        text: format!("SCORE {} HI {}", score, high_score),
        pos: Vec2::new(SCREEN_WIDTH - 10.0, 10.0),
        align: TextAlign::End,
        font: FontSize::Small,
        color: colors::WHITE,
        line_spacing: 0.0,
    });
}

pub fn draw_game_over(score: u64, list: &mut DrawList) {
    let x = SCREEN_WIDTH / 2.0;
    list.text("GAME OVER", Vec2::new(x, 175.0), TextAlign::Center, FontSize::Large, 0.0);
    list.text(
        format!("YOUR SCORE IS\n{}!", score),
        Vec2::new(x, 260.0),
        TextAlign::Center,
        FontSize::Medium,
        1.8,
    );
}
