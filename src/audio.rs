//! Sound cues
//!
//! The game only decides *which* cue plays and how loud; decoding and output belong
//! to a `SoundBackend` supplied by the host.

use serde::{Deserialize, Serialize};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundEffect {
    /// Leaving the title screen
    GameStart,
    /// Run ended
    GameOver,
    /// Enemy knocked away during a rush
    Hit,
    /// Footsteps
    Run,
    /// Gauge starts filling
    Charge,
}

impl SoundEffect {
    pub const ALL: [SoundEffect; 5] = [
        SoundEffect::GameStart,
        SoundEffect::GameOver,
        SoundEffect::Hit,
        SoundEffect::Run,
        SoundEffect::Charge,
    ];

    /// Resource the backend should decode for this cue
    pub fn resource_name(&self) -> &'static str {
        match self {
            SoundEffect::GameStart => "game_start.dat",
            SoundEffect::GameOver => "game_over.dat",
            SoundEffect::Hit => "hit.dat",
            SoundEffect::Run => "run.dat",
            SoundEffect::Charge => "charge.dat",
        }
    }
}

/// Fire-and-forget playback provided by the host
pub trait SoundBackend {
    fn play(&mut self, effect: SoundEffect, volume: f32);
}

/// Backend that only traces what would have played
#[derive(Debug, Default)]
pub struct SilentBackend;

impl SoundBackend for SilentBackend {
    fn play(&mut self, effect: SoundEffect, volume: f32) {
        log::trace!("sound {:?} at {:.2}", effect, volume);
    }
}

/// Audio manager for the game
pub struct AudioManager {
    backend: Box<dyn SoundBackend>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new(Box::new(SilentBackend))
    }
}

impl AudioManager {
    pub fn new(backend: Box<dyn SoundBackend>) -> Self {
        Self {
            backend,
            master_volume: 1.0,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Get effective volume
    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a sound effect at a cue-relative volume (1.0 = full)
    pub fn play(&mut self, effect: SoundEffect, volume: f32) {
        let vol = self.effective_volume() * volume;
        if vol <= 0.0 {
            return;
        }
        self.backend.play(effect, vol);
    }
}
