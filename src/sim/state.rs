//! Runner state and core simulation types
//!
//! One `GameRunner` holds a single playthrough (or title-screen demo run).

use glam::{Vec2, Vec3};
use rand::Rng;
use rand_pcg::Pcg32;

use super::effect::Effect;
use super::projection::Camera;
use crate::audio::SoundEffect;
use crate::consts::*;

/// Read-only view of session state that entities need while updating
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionParams {
    pub rush: bool,
}

impl SessionParams {
    /// World scroll speed (pixels per tick)
    pub fn scroll_speed(&self) -> f32 {
        if self.rush { RHINO_RUSH_SPEED } else { RHINO_SPEED }
    }
}

/// Enemy lifecycle (removal happens once it falls off the bottom)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EnemyState {
    /// Walking toward the player
    Approaching,
    /// Knocked away, flying on a ballistic arc
    Hit { velocity: Vec2 },
}

/// An oncoming obstacle, in screen space
#[derive(Debug, Clone)]
pub struct Enemy {
    /// Age in ticks (drives animation)
    pub ticks: u64,
    pub pos: Vec2,
    /// Position one tick ago while approaching (sweep start for collisions)
    pub prev_pos: Vec2,
    pub state: EnemyState,
}

impl Enemy {
    pub fn new(pos: Vec2) -> Self {
        Self {
            ticks: 0,
            pos,
            prev_pos: pos,
            state: EnemyState::Approaching,
        }
    }

    pub fn is_hit(&self) -> bool {
        matches!(self.state, EnemyState::Hit { .. })
    }

    /// Knock the enemy away with the given impulse
    pub fn knock(&mut self, velocity: Vec2) {
        self.state = EnemyState::Hit { velocity };
    }

    pub fn update(&mut self, params: SessionParams) {
        self.ticks += 1;

        match &mut self.state {
            EnemyState::Approaching => {
                self.prev_pos = self.pos;
                let speed = ENEMY_BASE_SPEED + params.scroll_speed();
                self.pos.x -= speed;
            }
            EnemyState::Hit { velocity } => {
                self.pos += *velocity;
                // Gravity
                velocity.y += 1.0;
            }
        }
    }

    /// Sweep covered during the last tick (zero once hit)
    pub fn displacement(&self) -> Vec2 {
        self.pos - self.prev_pos
    }

    /// Fell past the bottom of the screen
    pub fn is_gone(&self) -> bool {
        self.pos.y >= SCREEN_HEIGHT + 100.0
    }
}

/// Scenery kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    Tree,
    Weed,
    Cloud,
}

impl ObjectKind {
    /// World height of the plane this kind lives on
    pub fn world_y(&self) -> f32 {
        match self {
            ObjectKind::Tree | ObjectKind::Weed => 0.0,
            ObjectKind::Cloud => -50000.0,
        }
    }

    /// Depth range `[offset, offset + range)` objects are spawned in
    pub fn depth_range(&self) -> (f32, f32) {
        match self {
            ObjectKind::Tree | ObjectKind::Weed => (20.0, 700.0),
            ObjectKind::Cloud => (9999.0, 99999.0),
        }
    }
}

/// A scenery object placed in world space
#[derive(Debug, Clone)]
pub struct BackgroundObject {
    pub kind: ObjectKind,
    pub pos: Vec3,
}

impl BackgroundObject {
    pub fn update(&mut self, params: SessionParams) {
        self.pos.x -= params.scroll_speed();
    }

    /// Projected position on screen
    pub fn screen_pos(&self) -> Vec2 {
        Camera::GAME.world_to_screen(self.pos)
    }

    /// Scrolled past the left margin
    pub fn is_gone(&self) -> bool {
        self.screen_pos().x <= -100.0
    }

    /// Nearer than the player's depth plane (drawn over the player)
    pub fn in_front_of_player(&self) -> bool {
        self.pos.z <= RHINO_Z
    }
}

/// Notable things that happened during a tick, for the host to react to
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RunnerEvent {
    Sound { effect: SoundEffect, volume: f32 },
    RushStarted { gauge: u32 },
    RushEnded,
    Hit { gain: u64, streak: u32 },
    Crashed,
}

/// Initial scenery population
const INITIAL_TREES: usize = 99;
const INITIAL_WEEDS: usize = 99;
const INITIAL_CLOUDS: usize = 20;

/// State of one playthrough
#[derive(Debug, Clone)]
pub struct GameRunner {
    pub ticks: u64,
    /// Suppress sound events (title demo)
    pub muted: bool,
    pub game_over: bool,
    /// Charge gauge, `0..=GAUGE_MAX`
    pub gauge: u32,
    pub rush: bool,
    pub hit_count_in_rush: u32,
    /// Tick of the latest successful hit (0 = never)
    pub ticks_at_hit: u64,
    pub score: u64,
    pub enemies: Vec<Enemy>,
    /// Sorted far-to-near after every tick
    pub objects: Vec<BackgroundObject>,
    pub effects: Vec<Effect>,
    pub(crate) events: Vec<RunnerEvent>,
}

impl GameRunner {
    /// Create a runner with scenery already spread across the screen
    pub fn new(muted: bool, rng: &mut Pcg32) -> Self {
        let mut runner = Self {
            ticks: 0,
            muted,
            game_over: false,
            gauge: 0,
            rush: false,
            hit_count_in_rush: 0,
            ticks_at_hit: 0,
            score: 0,
            enemies: Vec::new(),
            objects: Vec::with_capacity(INITIAL_TREES + INITIAL_WEEDS + INITIAL_CLOUDS),
            effects: Vec::new(),
            events: Vec::new(),
        };

        for (kind, count) in [
            (ObjectKind::Tree, INITIAL_TREES),
            (ObjectKind::Weed, INITIAL_WEEDS),
            (ObjectKind::Cloud, INITIAL_CLOUDS),
        ] {
            for _ in 0..count {
                let x = rng.random::<f32>() * SCREEN_WIDTH;
                let object = create_background_object(kind, x, rng);
                runner.objects.push(object);
            }
        }
        runner.sort_objects();

        runner
    }

    pub fn params(&self) -> SessionParams {
        SessionParams { rush: self.rush }
    }

    /// Whether the hit pose is showing
    pub fn in_hit_pose(&self) -> bool {
        self.ticks_at_hit > 0 && self.ticks - self.ticks_at_hit < HIT_POSE_TICKS
    }

    /// Take the events recorded since the last call
    pub fn drain_events(&mut self) -> Vec<RunnerEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn play(&mut self, effect: SoundEffect, volume: f32) {
        if !self.muted {
            self.events.push(RunnerEvent::Sound { effect, volume });
        }
    }

    /// Far-to-near, for painter's-order drawing
    pub(crate) fn sort_objects(&mut self) {
        self.objects.sort_by(|a, b| b.pos.z.total_cmp(&a.pos.z));
    }
}

/// Place a scenery object at a random depth so that it projects to `screen_x`
pub fn create_background_object(
    kind: ObjectKind,
    screen_x: f32,
    rng: &mut Pcg32,
) -> BackgroundObject {
    let camera = Camera::GAME;
    let (z_offset, z_range) = kind.depth_range();
    let z = z_offset + rng.random::<f32>() * z_range;

    let mut screen = camera.world_to_screen(Vec3::new(0.0, kind.world_y(), z));
    screen.x = screen_x;

    BackgroundObject {
        kind,
        pos: camera.screen_to_world_at_depth(screen, z),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_enemy_approach_speed() {
        let mut enemy = Enemy::new(Vec2::new(SCREEN_WIDTH + 50.0, RHINO_Y));
        enemy.update(SessionParams { rush: false });
        assert!((enemy.pos.x - (690.0 - 4.0)).abs() < 1e-4);
        assert!((enemy.displacement().x + 4.0).abs() < 1e-4);

        enemy.update(SessionParams { rush: true });
        assert!((enemy.pos.x - (686.0 - 7.5)).abs() < 1e-4);
        assert_eq!(enemy.prev_pos.x, 686.0);
        assert_eq!(enemy.ticks, 2);
    }

    #[test]
    fn test_hit_enemy_falls_off_bottom() {
        let mut enemy = Enemy::new(Vec2::new(690.0, 370.0));
        enemy.knock(Vec2::new(10.0, -20.0));

        let mut peak = enemy.pos.y;
        let mut ticks = 0;
        while !enemy.is_gone() {
            assert!(enemy.pos.y < 580.0);
            enemy.update(SessionParams { rush: true });
            peak = peak.min(enemy.pos.y);
            ticks += 1;
            assert!(ticks < 1000);
        }
        assert!(enemy.pos.y >= 580.0);
        // Went up before coming down
        assert!(peak < 370.0 - 100.0);
        // Horizontal motion unaffected by the scroll once hit
        assert!(enemy.pos.x > 690.0);
    }

    #[test]
    fn test_spawned_objects_project_to_requested_x() {
        let mut rng = Pcg32::seed_from_u64(42);
        for kind in [ObjectKind::Tree, ObjectKind::Weed, ObjectKind::Cloud] {
            let (offset, range) = kind.depth_range();
            for _ in 0..50 {
                let o = create_background_object(kind, SCREEN_WIDTH + 100.0, &mut rng);
                assert!(o.pos.z >= offset && o.pos.z < offset + range);
                assert!((o.pos.y - kind.world_y()).abs() < 0.5);
                assert!((o.screen_pos().x - (SCREEN_WIDTH + 100.0)).abs() < 0.05);
            }
        }
    }

    #[test]
    fn test_far_objects_scroll_slower() {
        let at_depth = |z| BackgroundObject {
            kind: ObjectKind::Tree,
            pos: Camera::GAME.screen_to_world_at_depth(Vec2::new(300.0, 400.0), z),
        };
        let mut near = at_depth(25.0);
        let mut far = at_depth(600.0);

        let params = SessionParams { rush: false };
        near.update(params);
        far.update(params);
        assert!(300.0 - near.screen_pos().x > 300.0 - far.screen_pos().x);
        assert!(near.in_front_of_player());
        assert!(!far.in_front_of_player());
    }

    #[test]
    fn test_new_runner_scenery_sorted() {
        let mut rng = Pcg32::seed_from_u64(5);
        let runner = GameRunner::new(true, &mut rng);
        assert_eq!(runner.objects.len(), 218);
        assert!(runner.objects.windows(2).all(|w| w[0].pos.z >= w[1].pos.z));
        assert_eq!(runner.gauge, 0);
        assert!(!runner.rush);
    }

    #[test]
    fn test_muted_runner_records_no_sounds() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut runner = GameRunner::new(true, &mut rng);
        runner.play(SoundEffect::Hit, 1.0);
        assert!(runner.drain_events().is_empty());
        runner.muted = false;
        runner.play(SoundEffect::Hit, 1.0);
        assert_eq!(runner.drain_events().len(), 1);
        assert!(runner.drain_events().is_empty());
    }
}
