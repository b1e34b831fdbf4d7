//! Best-effort play logging
//!
//! Lifecycle events are wrapped in a `LogRecord` and handed to a `TelemetrySink`.
//! Sink failures are logged and dropped; they never reach the game loop.

use serde::Serialize;

use crate::input::Touch;

/// Name every record is tagged with
pub const GAME_NAME: &str = "rhinoceros";

/// Event-specific part of a record
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Payload {
    Initialize { random_seed: u64 },
    StartGame,
    GameOver { score: u64 },
    Touch { ticks: u64, touches: Vec<Touch> },
}

/// One telemetry record
#[derive(Debug, Clone, Serialize)]
pub struct LogRecord<'a> {
    pub game_name: &'static str,
    pub player_id: &'a str,
    pub session_id: &'a str,
    pub play_id: u64,
    pub payload: Payload,
}

/// Where records go. Implementations must not block.
pub trait TelemetrySink {
    fn send(&mut self, record: &LogRecord<'_>) -> anyhow::Result<()>;
}

/// Sink that writes each record as a JSON line to the `telemetry` log target
#[derive(Debug, Default)]
pub struct LogSink;

impl TelemetrySink for LogSink {
    fn send(&mut self, record: &LogRecord<'_>) -> anyhow::Result<()> {
        let line = serde_json::to_string(record)?;
        log::info!(target: "telemetry", "{}", line);
        Ok(())
    }
}

/// Telemetry front end; disabled when it has no sink
pub struct Telemetry {
    sink: Option<Box<dyn TelemetrySink>>,
    player_id: String,
    session_id: String,
}

impl Telemetry {
    pub fn new(
        sink: Option<Box<dyn TelemetrySink>>,
        player_id: String,
        session_id: String,
    ) -> Self {
        Self {
            sink,
            player_id,
            session_id,
        }
    }

    pub fn disabled() -> Self {
        Self::new(None, String::new(), String::new())
    }

    pub fn is_enabled(&self) -> bool {
        self.sink.is_some()
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn send(&mut self, play_id: u64, payload: Payload) {
        let Some(sink) = self.sink.as_mut() else {
            return;
        };
        let record = LogRecord {
            game_name: GAME_NAME,
            player_id: &self.player_id,
            session_id: &self.session_id,
            play_id,
            payload,
        };
        if let Err(e) = sink.send(&record) {
            log::warn!("Dropped telemetry record: {:#}", e);
        }
    }

    /// Log the tick's touches; quiet ticks are skipped
    pub fn send_touches(&mut self, play_id: u64, ticks: u64, touches: &[Touch]) {
        if touches.is_empty() || !self.is_enabled() {
            return;
        }
        self.send(
            play_id,
            Payload::Touch {
                ticks,
                touches: touches.to_vec(),
            },
        );
    }
}
