//! Audio sink using the Web Audio API
//!
//! The simulation emits named cues; everything audible is synthesized here
//! from short sine beeps - no sound files. Native builds carry the same
//! interface with silent playback.

use crate::sim::GameEvent;

#[cfg(target_arch = "wasm32")]
use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

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

    /// Get effective volume
    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play the cue for a simulation event
    #[cfg(target_arch = "wasm32")]
    pub fn play(&self, event: GameEvent) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }

        let Some(ctx) = &self.ctx else { return };

        // Resume context if suspended (browsers require a user gesture)
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        let t = ctx.current_time();
        match event {
            // Rising two-note chirp
            GameEvent::Collect => {
                self.beep(ctx, vol, 800.0, 0.1, t);
                self.beep(ctx, vol, 1000.0, 0.1, t + 0.1);
            }
            // Low descending thud
            GameEvent::Crash => {
                self.beep(ctx, vol, 200.0, 0.2, t);
                self.beep(ctx, vol, 150.0, 0.2, t + 0.1);
            }
            // Three-note fanfare
            GameEvent::PowerUp => {
                self.beep(ctx, vol, 600.0, 0.1, t);
                self.beep(ctx, vol, 800.0, 0.1, t + 0.1);
                self.beep(ctx, vol, 1000.0, 0.1, t + 0.2);
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn play(&self, event: GameEvent) {
        if self.effective_volume() <= 0.0 {
            return;
        }
        log::trace!("audio cue: {event:?}");
    }

    /// One sine beep with an exponential decay envelope
    #[cfg(target_arch = "wasm32")]
    fn beep(&self, ctx: &AudioContext, vol: f32, freq: f32, duration: f64, start: f64) {
        let Some((osc, gain)) = self.create_osc(ctx, freq, OscillatorType::Sine) else {
            return;
        };

        gain.gain().set_value_at_time(vol * 0.1, start).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, start + duration)
            .ok();

        osc.start_with_when(start).ok();
        osc.stop_with_when(start + duration).ok();
    }

    /// Create an oscillator with gain envelope
    #[cfg(target_arch = "wasm32")]
    fn create_osc(
        &self,
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }
}
