//! Audio system using the Web Audio API
//!
//! Procedurally generated sound effects - no external files needed! The
//! simulation never talks to this module directly; the shell forwards the
//! discrete events a step reports.

#[cfg(target_arch = "wasm32")]
use web_sys::{AudioContext, OscillatorType};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Player left the ground
    Jump,
    /// Player landed on ground
    Land,
    /// Hazard contact or a fall out of the world
    Death,
}

/// Audio manager for the game
pub struct AudioManager {
    #[cfg(target_arch = "wasm32")]
    ctx: Option<AudioContext>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    #[cfg(target_arch = "wasm32")]
    pub fn new() -> Self {
        // May fail outside a secure context
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn new() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    /// Resume the audio context (required after a user gesture)
    #[cfg(target_arch = "wasm32")]
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn resume(&self) {}

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

    /// Flip the mute state, returning the new value
    pub fn toggle_muted(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }

    pub fn muted(&self) -> bool {
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

    /// Play a sound effect
    #[cfg(target_arch = "wasm32")]
    pub fn play(&self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }

        let Some(ctx) = &self.ctx else { return };

        // Browsers suspend fresh contexts until a user gesture
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match effect {
            // Quick rising square blip
            SoundEffect::Jump => self.beep(ctx, OscillatorType::Square, 220.0, 440.0, 0.12, vol * 0.4),
            // Soft low thud
            SoundEffect::Land => self.beep(ctx, OscillatorType::Sine, 150.0, 90.0, 0.08, vol * 0.3),
            // Long falling sawtooth
            SoundEffect::Death => self.beep(ctx, OscillatorType::Sawtooth, 330.0, 55.0, 0.5, vol * 0.5),
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn play(&self, effect: SoundEffect) {
        if self.effective_volume() > 0.0 {
            log::debug!("sfx: {effect:?}");
        }
    }

    /// One oscillator sweeping `freq_start` to `freq_end` over `duration`
    /// seconds with an exponential fade-out
    #[cfg(target_arch = "wasm32")]
    fn beep(
        &self,
        ctx: &AudioContext,
        shape: OscillatorType,
        freq_start: f32,
        freq_end: f32,
        duration: f64,
        volume: f32,
    ) {
        let Ok(osc) = ctx.create_oscillator() else {
            return;
        };
        let Ok(gain) = ctx.create_gain() else { return };

        let now = ctx.current_time();
        osc.set_type(shape);
        osc.frequency().set_value(freq_start);
        let _ = osc
            .frequency()
            .exponential_ramp_to_value_at_time(freq_end.max(1.0), now + duration);

        gain.gain().set_value(volume);
        let _ = gain
            .gain()
            .exponential_ramp_to_value_at_time(0.0001, now + duration);

        let _ = osc.connect_with_audio_node(&gain);
        let _ = gain.connect_with_audio_node(&ctx.destination());
        let _ = osc.start();
        let _ = osc.stop_with_when(now + duration);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mute_silences_effective_volume() {
        let mut audio = AudioManager::new();
        assert!(audio.effective_volume() > 0.0);
        assert!(audio.toggle_muted());
        assert_eq!(audio.effective_volume(), 0.0);
        assert!(!audio.toggle_muted());
        assert!(audio.effective_volume() > 0.0);
    }

    #[test]
    fn test_volumes_clamp() {
        let mut audio = AudioManager::new();
        audio.set_master_volume(4.0);
        audio.set_sfx_volume(-1.0);
        assert_eq!(audio.effective_volume(), 0.0);
        audio.set_sfx_volume(0.5);
        assert_eq!(audio.effective_volume(), 0.5);
    }
}
