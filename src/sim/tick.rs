//! Fixed timestep simulation tick
//!
//! Advances one playthrough by a single tick. The result depends only on the runner,
//! the touch snapshot and the RNG state.

use std::f32::consts::PI;

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::collision::capsules_collide;
use super::effect::{Effect, GainEffect, SplashEffect, SplashOptions};
use super::state::{Enemy, GameRunner, ObjectKind, RunnerEvent, create_background_object};
use crate::audio::SoundEffect;
use crate::consts::*;
use crate::input::{Touch, all_just_released, any_active, any_just_touched};

/// Footstep sound volume and cadence (ticks)
const RUN_SOUND_VOLUME: f32 = 0.1;
const RUN_SOUND_PERIOD: u64 = 20;
const RUN_SOUND_PERIOD_RUSH: u64 = 10;
/// Dust kicks up every N gauge units while rushing
const DUST_PERIOD: u32 = 10;
const DUST_LIFETIME: u32 = 15;
const HIT_SPLASH_LIFETIME: u32 = 999;
const GAIN_LIFETIME: u32 = 60;
/// Points per hit, multiplied by the current streak
const HIT_SCORE: u64 = 10;

const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
const YELLOW: [f32; 4] = [1.0, 1.0, 0.0, 1.0];

fn dust_options() -> SplashOptions {
    SplashOptions {
        count: 3,
        color: WHITE,
        size: 10.0,
        angular_velocity: PI / 20.0,
        angle_min: PI,
        angle_max: PI * 4.0 / 3.0,
        speed: 8.0,
        ay: 0.3,
    }
}

fn hit_splash_options() -> SplashOptions {
    SplashOptions {
        count: 5,
        color: YELLOW,
        size: 10.0,
        angular_velocity: PI / 20.0,
        angle_min: -PI / 2.0,
        angle_max: PI / 4.0,
        speed: 10.0,
        ay: 0.2,
    }
}

/// Advance the runner by one tick. Does nothing once the run is over.
pub fn tick(runner: &mut GameRunner, touches: &[Touch], rng: &mut Pcg32) {
    if runner.game_over {
        return;
    }

    runner.ticks += 1;

    update_gauge(runner, touches, rng);
    spawn_enemies(runner, rng);
    spawn_scenery(runner, rng);
    resolve_collisions(runner, rng);

    let params = runner.params();
    for enemy in &mut runner.enemies {
        enemy.update(params);
    }
    for object in &mut runner.objects {
        object.update(params);
    }
    for effect in &mut runner.effects {
        effect.update();
    }

    runner.enemies.retain(|e| !e.is_gone());
    runner.objects.retain(|o| !o.is_gone());
    runner.effects.retain(|e| !e.finished());

    runner.sort_objects();
}

/// Charge while held, rush on release, drain while rushing
fn update_gauge(runner: &mut GameRunner, touches: &[Touch], rng: &mut Pcg32) {
    if !runner.rush {
        if any_just_touched(touches) || (runner.gauge > 0 && any_active(touches)) {
            if runner.gauge == 0 {
                runner.play(SoundEffect::Charge, 1.0);
            }
            runner.gauge = (runner.gauge + 1).min(GAUGE_MAX);
        }

        if runner.gauge > 0 && all_just_released(touches) {
            runner.rush = true;
            runner.events.push(RunnerEvent::RushStarted {
                gauge: runner.gauge,
            });
        }

        if runner.ticks % RUN_SOUND_PERIOD == 0 {
            runner.play(SoundEffect::Run, RUN_SOUND_VOLUME);
        }
    } else {
        runner.gauge = runner.gauge.saturating_sub(1);

        if runner.gauge > 0 && runner.gauge % DUST_PERIOD == 0 {
            let dust = SplashEffect::new(
                Vec2::new(RHINO_X - 20.0, RHINO_Y),
                DUST_LIFETIME,
                dust_options(),
                rng,
            );
            runner.effects.push(Effect::Splash(dust));
        }

        if runner.gauge == 0 {
            runner.rush = false;
            runner.hit_count_in_rush = 0;
            runner.events.push(RunnerEvent::RushEnded);
        }

        if runner.ticks % RUN_SOUND_PERIOD_RUSH == 0 {
            runner.play(SoundEffect::Run, RUN_SOUND_VOLUME);
        }
    }
}

fn spawn_enemies(runner: &mut GameRunner, rng: &mut Pcg32) {
    if runner.ticks > ENEMY_SPAWN_DELAY_TICKS && rng.random_range(0..SPAWN_ONE_IN) == 0 {
        runner
            .enemies
            .push(Enemy::new(Vec2::new(SCREEN_WIDTH + 50.0, RHINO_Y)));
    }
}

fn spawn_scenery(runner: &mut GameRunner, rng: &mut Pcg32) {
    let spawn_x = SCREEN_WIDTH + 100.0;

    if rng.random_range(0..SPAWN_ONE_IN) == 0 {
        let tree = create_background_object(ObjectKind::Tree, spawn_x, rng);
        runner.objects.push(tree);
    }

    // Ground cover is dense: one weed every tick
    let weed = create_background_object(ObjectKind::Weed, spawn_x, rng);
    runner.objects.push(weed);

    if rng.random_range(0..SPAWN_ONE_IN) == 0 {
        let cloud = create_background_object(ObjectKind::Cloud, spawn_x, rng);
        runner.objects.push(cloud);
    }
}

/// Test every approaching enemy's last move against the player
fn resolve_collisions(runner: &mut GameRunner, rng: &mut Pcg32) {
    let rhino = Vec2::new(RHINO_X, RHINO_Y);

    for i in 0..runner.enemies.len() {
        let enemy = &runner.enemies[i];
        if enemy.is_hit()
            || !capsules_collide(
                rhino,
                Vec2::ZERO,
                RHINO_R,
                enemy.prev_pos,
                enemy.displacement(),
                ENEMY_R,
            )
        {
            continue;
        }

        if runner.rush {
            let velocity = Vec2::new(
                5.0 + 10.0 * rng.random::<f32>(),
                -(10.0 + 20.0 * rng.random::<f32>()),
            );
            runner.enemies[i].knock(velocity);
            register_hit(runner, rng);
        } else if !runner.game_over {
            runner.game_over = true;
            runner.events.push(RunnerEvent::Crashed);
        }
    }
}

fn register_hit(runner: &mut GameRunner, rng: &mut Pcg32) {
    runner.ticks_at_hit = runner.ticks;
    runner.hit_count_in_rush += 1;
    let gain = HIT_SCORE * runner.hit_count_in_rush as u64;
    runner.score += gain;

    let burst_origin = Vec2::new(RHINO_X + 50.0, RHINO_Y - 30.0);
    let jitter = Vec2::new(rng.random::<f32>() - 0.5, rng.random::<f32>() - 0.5) * 100.0;
    runner.effects.push(Effect::Gain(GainEffect::new(
        burst_origin + jitter,
        GAIN_LIFETIME,
        gain,
    )));
    let splash = SplashEffect::new(burst_origin, HIT_SPLASH_LIFETIME, hit_splash_options(), rng);
    runner.effects.push(Effect::Splash(splash));

    runner.play(SoundEffect::Hit, 1.0);
    runner.events.push(RunnerEvent::Hit {
        gain,
        streak: runner.hit_count_in_rush,
    });
}
