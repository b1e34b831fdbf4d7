//! Top-level mode machine
//!
//! `Game` owns the RNG, the active runner and the outer collaborators (audio,
//! telemetry, leaderboard). The host calls `update` then `draw` once per tick.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::audio::{AudioManager, SoundBackend, SoundEffect};
use crate::consts::GAME_OVER_GRACE_TICKS;
use crate::highscores::HighScores;
use crate::input::{Touch, TouchSimulation, any_just_touched};
use crate::renderer::scene::{self, DrawList};
use crate::settings::Settings;
use crate::sim::{GameRunner, RunnerEvent, tick};
use crate::telemetry::{Payload, Telemetry, TelemetrySink};

/// Current top-level mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    /// Attract screen with a scripted demo run behind it
    Title,
    /// A player-driven run
    Playing,
    /// Run ended, final score on screen
    GameOver,
}

/// Touch/release cycles in the title demo script
const DEMO_CYCLES: usize = 3;

pub struct Game {
    settings: Settings,
    play_id: u64,
    seed: u64,
    rng: Pcg32,
    mode: GameMode,
    /// Ticks since the last mode change
    mode_ticks: u64,
    simulation: TouchSimulation,
    runner: GameRunner,
    high_scores: HighScores,
    audio: AudioManager,
    telemetry: Telemetry,
}

fn wall_clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Games created so far by this process
static SESSIONS: AtomicU64 = AtomicU64::new(0);

/// Identifier unique to this game instance, independent of the RNG seed
fn new_session_id() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0);
    let serial = SESSIONS.fetch_add(1, Ordering::Relaxed);
    format!("{:016x}-{:08x}-{:04x}", nanos, std::process::id(), serial)
}

/// Scripted presses for the attract-mode runner
fn demo_script(rng: &mut Pcg32) -> TouchSimulation {
    let mut simulation = TouchSimulation::new();
    for _ in 0..DEMO_CYCLES {
        simulation = simulation
            .wait(30 + rng.random_range(0..60))
            .touch()
            .wait(30 + rng.random_range(0..30))
            .release();
    }
    simulation
}

impl Game {
    /// Create a game already initialized to the title screen.
    ///
    /// `sink` is ignored unless telemetry is enabled in `settings`.
    pub fn new(
        settings: Settings,
        backend: Box<dyn SoundBackend>,
        sink: Option<Box<dyn TelemetrySink>>,
    ) -> Self {
        let mut audio = AudioManager::new(backend);
        audio.set_master_volume(settings.master_volume);
        audio.set_sfx_volume(settings.sfx_volume);
        audio.set_muted(settings.muted);

        let sink = if settings.telemetry { sink } else { None };
        let telemetry = Telemetry::new(sink, settings.player_id.clone(), new_session_id());

        let seed = settings.seed.unwrap_or_else(wall_clock_seed);
        let mut rng = Pcg32::seed_from_u64(seed);
        let simulation = demo_script(&mut rng);
        let runner = GameRunner::new(true, &mut rng);

        let mut game = Self {
            settings,
            play_id: 0,
            seed,
            rng,
            mode: GameMode::Title,
            mode_ticks: 0,
            simulation,
            runner,
            high_scores: HighScores::new(),
            audio,
            telemetry,
        };
        game.begin_play();
        game
    }

    /// Start over from the title screen with a new play id and a fresh seed
    pub fn initialize(&mut self) {
        self.seed = self.settings.seed.unwrap_or_else(wall_clock_seed);
        self.rng = Pcg32::seed_from_u64(self.seed);
        self.start_demo();
        self.set_mode(GameMode::Title);
        self.begin_play();
    }

    fn begin_play(&mut self) {
        self.play_id += 1;
        self.telemetry.send(
            self.play_id,
            Payload::Initialize {
                random_seed: self.seed,
            },
        );
        log::info!("Initialize play {} (seed {})", self.play_id, self.seed);
    }

    /// Advance one tick with the player's touches for this tick
    pub fn update(&mut self, touches: &[Touch]) {
        self.mode_ticks += 1;
        self.telemetry
            .send_touches(self.play_id, self.mode_ticks, touches);

        match self.mode {
            GameMode::Title => self.update_title(touches),
            GameMode::Playing => self.update_playing(touches),
            GameMode::GameOver => {
                if self.mode_ticks > GAME_OVER_GRACE_TICKS && any_just_touched(touches) {
                    self.initialize();
                }
            }
        }
    }

    fn update_title(&mut self, touches: &[Touch]) {
        let demo_touches = self.simulation.next();
        tick(&mut self.runner, &demo_touches, &mut self.rng);
        // Demo runners are muted; nothing else in their events matters
        self.runner.drain_events();

        if self.runner.game_over {
            self.start_demo();
        }

        if any_just_touched(touches) {
            self.start_game();
        }
    }

    fn update_playing(&mut self, touches: &[Touch]) {
        tick(&mut self.runner, touches, &mut self.rng);

        for event in self.runner.drain_events() {
            match event {
                RunnerEvent::Sound { effect, volume } => self.audio.play(effect, volume),
                RunnerEvent::RushStarted { gauge } => log::debug!("Rush for {} ticks", gauge),
                RunnerEvent::RushEnded => log::debug!("Rush ended"),
                RunnerEvent::Hit { gain, streak } => {
                    log::debug!("Hit x{} for {} (score {})", streak, gain, self.runner.score)
                }
                RunnerEvent::Crashed => log::debug!("Crashed at tick {}", self.runner.ticks),
            }
        }

        if self.runner.game_over {
            self.end_game();
        }
    }

    fn start_demo(&mut self) {
        self.simulation = demo_script(&mut self.rng);
        self.runner = GameRunner::new(true, &mut self.rng);
    }

    fn start_game(&mut self) {
        self.telemetry.send(self.play_id, Payload::StartGame);
        log::info!("Start play {}", self.play_id);

        self.runner = GameRunner::new(false, &mut self.rng);
        self.set_mode(GameMode::Playing);
        self.audio.play(SoundEffect::GameStart, 1.0);
    }

    fn end_game(&mut self) {
        let score = self.runner.score;
        self.telemetry.send(self.play_id, Payload::GameOver { score });

        match self.high_scores.add_score(score, self.play_id, self.runner.ticks) {
            Some(rank) => log::info!("Game over: score {} (rank {})", score, rank),
            None => log::info!("Game over: score {}", score),
        }

        self.set_mode(GameMode::GameOver);
        self.audio.play(SoundEffect::GameOver, 1.0);
    }

    fn set_mode(&mut self, mode: GameMode) {
        if self.mode != mode {
            log::debug!("Mode {:?} -> {:?}", self.mode, mode);
        }
        self.mode = mode;
        self.mode_ticks = 0;
    }

    /// Replace the frame's display list
    pub fn draw(&self, list: &mut DrawList) {
        list.clear();
        scene::draw_runner(&self.runner, list);

        match self.mode {
            GameMode::Title => scene::draw_title(list),
            GameMode::Playing => scene::draw_score(self.runner.score, self.high_score(), list),
            GameMode::GameOver => {
                scene::draw_score(self.runner.score, self.high_score(), list);
                scene::draw_game_over(self.runner.score, list);
            }
        }
    }

    /// Best finished run, or the live score if the current run is ahead of it
    pub fn high_score(&self) -> u64 {
        let best = self.high_scores.top_score().unwrap_or(0);
        if self.mode == GameMode::Playing {
            best.max(self.runner.score)
        } else {
            best
        }
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn mode_ticks(&self) -> u64 {
        self.mode_ticks
    }

    pub fn play_id(&self) -> u64 {
        self.play_id
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn session_id(&self) -> &str {
        self.telemetry.session_id()
    }

    pub fn runner(&self) -> &GameRunner {
        &self.runner
    }

    pub fn high_scores(&self) -> &HighScores {
        &self.high_scores
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::tests::RecordingBackend;
    use crate::consts::{RHINO_X, RHINO_Y};
    use crate::renderer::scene::DrawCommand;
    use crate::sim::Enemy;
    use crate::telemetry::tests::RecordingSink;
    use glam::Vec2;

    struct Harness {
        game: Game,
        sounds: RecordingBackend,
        records: RecordingSink,
    }

    fn harness(seed: u64) -> Harness {
        let settings = Settings {
            seed: Some(seed),
            telemetry: true,
            player_id: "tester".into(),
            ..Default::default()
        };
        let sounds = RecordingBackend::default();
        let records = RecordingSink::default();
        let game = Game::new(
            settings,
            Box::new(sounds.clone()),
            Some(Box::new(records.clone())),
        );
        Harness {
            game,
            sounds,
            records,
        }
    }

    fn press() -> Vec<Touch> {
        vec![Touch {
            id: 1,
            pos: Vec2::new(320.0, 240.0),
            just_touched: true,
            just_released: false,
        }]
    }

    fn payload_types(records: &RecordingSink) -> Vec<String> {
        records
            .records
            .borrow()
            .iter()
            .map(|r| r["payload"]["type"].as_str().unwrap_or_default().to_string())
            .collect()
    }

    fn crash(game: &mut Game) {
        game.runner
            .enemies
            .push(Enemy::new(Vec2::new(RHINO_X + 5.0, RHINO_Y)));
        game.update(&[]);
    }

    #[test]
    fn test_new_game_starts_on_title() {
        let h = harness(11);
        assert_eq!(h.game.mode(), GameMode::Title);
        assert_eq!(h.game.play_id(), 1);
        assert_eq!(h.game.seed(), 11);
        assert!(h.game.runner().muted);

        let records = h.records.records.borrow();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["payload"]["type"], "initialize");
        assert_eq!(records[0]["payload"]["random_seed"], 11);
        assert_eq!(records[0]["player_id"], "tester");
    }

    #[test]
    fn test_demo_plays_silently() {
        let mut h = harness(12);
        for _ in 0..2000 {
            h.game.update(&[]);
            assert_eq!(h.game.mode(), GameMode::Title);
        }
        assert!(h.sounds.played.borrow().is_empty());
        // Demo touches are never logged as player input
        assert_eq!(payload_types(&h.records), vec!["initialize"]);
    }

    #[test]
    fn test_touch_starts_game() {
        let mut h = harness(13);
        for _ in 0..30 {
            h.game.update(&[]);
        }
        h.game.update(&press());

        assert_eq!(h.game.mode(), GameMode::Playing);
        assert_eq!(h.game.mode_ticks(), 0);
        assert!(!h.game.runner().muted);
        assert_eq!(h.game.runner().ticks, 0);
        assert_eq!(
            h.sounds.played.borrow().first(),
            Some(&(SoundEffect::GameStart, 1.0))
        );
        assert_eq!(payload_types(&h.records), vec!["initialize", "touch", "start_game"]);
    }

    #[test]
    fn test_crash_ends_game_and_records_score() {
        let mut h = harness(14);
        h.game.update(&press());
        h.game.runner.score = 70;
        assert_eq!(h.game.high_score(), 70);

        crash(&mut h.game);

        assert_eq!(h.game.mode(), GameMode::GameOver);
        assert_eq!(h.game.high_scores().top_score(), Some(70));
        assert_eq!(h.game.high_score(), 70);
        assert!(h
            .sounds
            .played
            .borrow()
            .contains(&(SoundEffect::GameOver, 1.0)));

        let records = h.records.records.borrow();
        let last = &records[records.len() - 1];
        assert_eq!(last["payload"]["type"], "game_over");
        assert_eq!(last["payload"]["score"], 70);
    }

    #[test]
    fn test_game_over_grace_period() {
        let mut h = harness(15);
        h.game.update(&press());
        crash(&mut h.game);
        assert_eq!(h.game.mode(), GameMode::GameOver);

        for _ in 0..GAME_OVER_GRACE_TICKS - 1 {
            h.game.update(&[]);
        }
        // Tick 60 of game over: still inside the grace period
        h.game.update(&press());
        assert_eq!(h.game.mode(), GameMode::GameOver);

        h.game.update(&press());
        assert_eq!(h.game.mode(), GameMode::Title);
        assert_eq!(h.game.play_id(), 2);
        assert!(h.game.runner().muted);
        assert_eq!(payload_types(&h.records).last().map(String::as_str), Some("initialize"));
    }

    #[test]
    fn test_high_scores_survive_reinitialize() {
        let mut h = harness(16);
        h.game.update(&press());
        h.game.runner.score = 30;
        crash(&mut h.game);
        for _ in 0..GAME_OVER_GRACE_TICKS {
            h.game.update(&[]);
        }
        h.game.update(&press());
        assert_eq!(h.game.mode(), GameMode::Title);
        assert_eq!(h.game.high_score(), 30);

        h.game.update(&press());
        assert_eq!(h.game.mode(), GameMode::Playing);
        assert_eq!(h.game.high_score(), 30);
    }

    #[test]
    fn test_same_seed_same_run() {
        let mut a = harness(77);
        let mut b = harness(77);
        let script = |t: u64| if t == 10 || t % 200 == 50 { press() } else { Vec::new() };

        for t in 0..1500 {
            a.game.update(&script(t));
            b.game.update(&script(t));
        }
        assert_eq!(a.game.mode(), b.game.mode());
        assert_eq!(a.game.runner().ticks, b.game.runner().ticks);
        assert_eq!(a.game.runner().score, b.game.runner().score);
        assert_eq!(a.game.runner().enemies.len(), b.game.runner().enemies.len());
        assert_eq!(*a.sounds.played.borrow(), *b.sounds.played.borrow());
    }

    #[test]
    fn test_touch_log_orders_game_over_touches() {
        let mut h = harness(19);
        h.game.update(&press());
        crash(&mut h.game);
        let logged_before = h.records.records.borrow().len();

        // Inside the grace period, so none of these restart the game
        for _ in 0..5 {
            h.game.update(&press());
            h.game.update(&[]);
        }
        assert_eq!(h.game.mode(), GameMode::GameOver);

        let records = h.records.records.borrow();
        let ticks: Vec<u64> = records[logged_before..]
            .iter()
            .filter(|r| r["payload"]["type"] == "touch")
            .filter_map(|r| r["payload"]["ticks"].as_u64())
            .collect();
        assert_eq!(ticks, vec![1, 3, 5, 7, 9]);
    }

    #[test]
    fn test_fixed_seed_still_gets_distinct_sessions() {
        let a = harness(42);
        let b = harness(42);
        assert_eq!(a.game.seed(), b.game.seed());
        assert_ne!(a.game.session_id(), b.game.session_id());

        let session = |h: &Harness| h.records.records.borrow()[0]["session_id"].clone();
        assert_eq!(session(&a), a.game.session_id());
        assert_ne!(session(&a), session(&b));
    }

    #[test]
    fn test_new_game_matches_reinitialized_game() {
        let mut h = harness(21);
        let depths: Vec<f32> = h.game.runner().objects.iter().map(|o| o.pos.z).collect();

        h.game.initialize();
        let again: Vec<f32> = h.game.runner().objects.iter().map(|o| o.pos.z).collect();
        assert_eq!(depths, again);
        assert_eq!(h.game.play_id(), 2);
    }

    #[test]
    fn test_dead_demo_is_replaced() {
        let mut h = harness(20);
        let mut restarts = 0;
        let mut last_ticks = h.game.runner().ticks;

        for _ in 0..10_000 {
            h.game.update(&[]);
            assert_eq!(h.game.mode(), GameMode::Title);
            assert!(!h.game.runner().game_over);
            assert!(h.game.runner().muted);
            if h.game.runner().ticks < last_ticks {
                restarts += 1;
            }
            last_ticks = h.game.runner().ticks;
        }
        assert!(restarts > 0);
    }

    #[test]
    fn test_disabled_telemetry_ignores_sink() {
        let records = RecordingSink::default();
        let game = Game::new(
            Settings::default(),
            Box::new(RecordingBackend::default()),
            Some(Box::new(records.clone())),
        );
        assert_eq!(game.mode(), GameMode::Title);
        assert!(records.records.borrow().is_empty());
    }

    #[test]
    fn test_draw_overlays_follow_mode() {
        let mut h = harness(18);
        let mut list = DrawList::new();
        let texts = |list: &DrawList| -> Vec<String> {
            list.commands()
                .iter()
                .filter_map(|c| match c {
                    DrawCommand::Text { text, .. } => Some(text.clone()),
                    _ => None,
                })
                .collect()
        };

        h.game.draw(&mut list);
        assert_eq!(texts(&list)[0], "RHINOCEROS");

        h.game.update(&press());
        h.game.runner.score = 20;
        h.game.draw(&mut list);
        assert_eq!(texts(&list), vec!["SCORE 20 HI 20"]);

        crash(&mut h.game);
        h.game.draw(&mut list);
        let t = texts(&list);
        assert!(t.contains(&"GAME OVER".to_string()));
        assert!(t.contains(&"YOUR SCORE IS\n20!".to_string()));
    }
}
