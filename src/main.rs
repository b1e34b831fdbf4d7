//! Rhinoceros entry point
//!
//! Native headless host: runs the game with a scripted player for a fixed number
//! of ticks and reports the result.
//!
//! Usage: `rhinoceros [settings.json] [ticks]`

use std::path::Path;

use anyhow::Context;
use glam::Vec2;

use rhinoceros::audio::SilentBackend;
use rhinoceros::consts::*;
use rhinoceros::input::TouchTracker;
use rhinoceros::renderer::{DrawCommand, DrawList, Vertex};
use rhinoceros::telemetry::{LogSink, TelemetrySink};
use rhinoceros::{Game, GameMode, Settings};

/// One minute of play
const DEFAULT_TICKS: u64 = 60 * TICKS_PER_SECOND as u64;
/// Scripted player: hold for `HOLD_TICKS`, then let go until the cycle ends
const CYCLE_TICKS: u64 = 150;
const HOLD_TICKS: u64 = 90;

fn main() -> anyhow::Result<()> {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => Settings::load(Path::new(&path))?,
        None => Settings::from_env(),
    };
    let ticks = match args.next() {
        Some(arg) => arg
            .parse::<u64>()
            .with_context(|| format!("invalid tick count {:?}", arg))?,
        None => DEFAULT_TICKS,
    };

    let sink: Option<Box<dyn TelemetrySink>> = Some(Box::new(LogSink));
    let mut game = Game::new(settings, Box::new(SilentBackend), sink);
    log::info!("Running {} ticks headless", ticks);

    let center = Vec2::new(SCREEN_WIDTH / 2.0, SCREEN_HEIGHT / 2.0);
    let mut tracker = TouchTracker::new();
    let mut list = DrawList::new();
    let mut runs = 0;

    for t in 0..ticks {
        let pressed = if t % CYCLE_TICKS < HOLD_TICKS {
            vec![(0, center)]
        } else {
            Vec::new()
        };
        let touches = tracker.update(&pressed).to_vec();

        let before = game.mode();
        game.update(&touches);
        if before == GameMode::Playing && game.mode() == GameMode::GameOver {
            runs += 1;
        }
        game.draw(&mut list);
    }

    // Size of the last frame's triangle upload, as a host would buffer it
    let vertex_bytes: usize = list
        .commands()
        .iter()
        .filter_map(|c| match c {
            DrawCommand::Triangles { vertices } => {
                Some(bytemuck::cast_slice::<Vertex, u8>(vertices).len())
            }
            _ => None,
        })
        .sum();
    let stride = Vertex::desc().array_stride as usize;
    log::info!(
        "Finished in {:?} after {} runs ({} draw commands, {} vertices in the last frame)",
        game.mode(),
        runs,
        list.len(),
        vertex_bytes / stride
    );
    println!(
        "score {} high score {} runs {}",
        game.runner().score,
        game.high_score(),
        runs
    );

    Ok(())
}
