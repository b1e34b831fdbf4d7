//! Short-lived visual effects (not gameplay-affecting)

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use crate::consts::SCREEN_HEIGHT;

/// Tuning for a burst of spinning square particles
#[derive(Debug, Clone, Copy)]
pub struct SplashOptions {
    pub count: u32,
    pub color: [f32; 4],
    /// Particle edge length
    pub size: f32,
    /// Spin per tick (radians)
    pub angular_velocity: f32,
    /// Launch direction range (radians, screen space with y down)
    pub angle_min: f32,
    pub angle_max: f32,
    /// Launch speed (pixels per tick)
    pub speed: f32,
    /// Downward acceleration (pixels per tick²)
    pub ay: f32,
}

#[derive(Debug, Clone, Copy)]
pub struct SplashParticle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub angle: f32,
}

#[derive(Debug, Clone)]
pub struct SplashEffect {
    pub ticks: u32,
    pub lifetime: u32,
    pub particles: Vec<SplashParticle>,
    pub options: SplashOptions,
}

impl SplashEffect {
    pub fn new(origin: Vec2, lifetime: u32, options: SplashOptions, rng: &mut Pcg32) -> Self {
        let particles = (0..options.count)
            .map(|_| {
                let spread = options.angle_max - options.angle_min;
                let theta = options.angle_min + spread * rng.random::<f32>();
                SplashParticle {
                    pos: origin,
                    vel: Vec2::from_angle(theta) * options.speed,
                    angle: theta,
                }
            })
            .collect();

        Self {
            ticks: 0,
            lifetime,
            particles,
            options,
        }
    }

    pub fn update(&mut self) {
        self.ticks += 1;
        for p in &mut self.particles {
            p.pos += p.vel;
            p.vel.y += self.options.ay;
            p.angle += self.options.angular_velocity;
        }
    }

    /// Done when its time is up or every particle has dropped out of view
    pub fn finished(&self) -> bool {
        self.ticks >= self.lifetime
            || self
                .particles
                .iter()
                .all(|p| p.pos.y > SCREEN_HEIGHT + self.options.size)
    }
}

/// Floating "+N" score text
#[derive(Debug, Clone)]
pub struct GainEffect {
    pub ticks: u32,
    pub lifetime: u32,
    pub pos: Vec2,
    pub gain: u64,
}

/// Upward drift of gain text (pixels per tick)
const GAIN_RISE_SPEED: f32 = 0.5;

impl GainEffect {
    pub fn new(pos: Vec2, lifetime: u32, gain: u64) -> Self {
        Self {
            ticks: 0,
            lifetime,
            pos,
            gain,
        }
    }

    pub fn update(&mut self) {
        self.ticks += 1;
        self.pos.y -= GAIN_RISE_SPEED;
    }

    pub fn finished(&self) -> bool {
        self.ticks >= self.lifetime
    }

    /// Opaque for the first two thirds of its life, then fades out linearly
    pub fn alpha(&self) -> f32 {
        let fade_start = self.lifetime * 2 / 3;
        if self.ticks <= fade_start {
            return 1.0;
        }
        let span = (self.lifetime - fade_start).max(1) as f32;
        (1.0 - (self.ticks - fade_start) as f32 / span).clamp(0.0, 1.0)
    }

    pub fn text(&self) -> String {
        format!("+{}", self.gain)
    }
}

/// Closed set of effect kinds
#[derive(Debug, Clone)]
pub enum Effect {
    Splash(SplashEffect),
    Gain(GainEffect),
}

impl Effect {
    pub fn update(&mut self) {
        match self {
            Effect::Splash(e) => e.update(),
            Effect::Gain(e) => e.update(),
        }
    }

    pub fn finished(&self) -> bool {
        match self {
            Effect::Splash(e) => e.finished(),
            Effect::Gain(e) => e.finished(),
        }
    }
}
