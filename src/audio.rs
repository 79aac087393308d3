//! Sound effects as simple synthesized beeps
//!
//! The simulation only asks for tones; how (or whether) they are played is up
//! to the [`ToneSink`]. In the browser that is the Web Audio API, everywhere
//! else a silent sink.

/// Oscillator shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Sawtooth,
    Triangle,
}

/// A single fire-and-forget beep
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    /// Hz
    pub frequency: f32,
    /// Seconds
    pub duration: f32,
    pub waveform: Waveform,
    /// 0.0 - 1.0
    pub volume: f32,
}

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Player left the ground
    Jump,
    /// Coin picked up
    Coin,
    /// Player hit an obstacle
    Crash,
}

impl SoundEffect {
    pub fn tone(self) -> Tone {
        match self {
            SoundEffect::Jump => Tone {
                frequency: 600.0,
                duration: 0.06,
                waveform: Waveform::Triangle,
                volume: 0.25,
            },
            SoundEffect::Coin => Tone {
                frequency: 880.0,
                duration: 0.06,
                waveform: Waveform::Square,
                volume: 0.18,
            },
            SoundEffect::Crash => Tone {
                frequency: 220.0,
                duration: 0.15,
                waveform: Waveform::Sawtooth,
                volume: 0.25,
            },
        }
    }
}

/// Receiver of tone requests. Implementations must never fail loudly.
pub trait ToneSink {
    fn play_tone(&mut self, tone: Tone);

    /// Unlock playback after a user gesture
    fn resume(&mut self) {}
}

/// Sink that drops every request
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentAudio;

impl ToneSink for SilentAudio {
    fn play_tone(&mut self, _tone: Tone) {}
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{Tone, ToneSink, Waveform};

    /// Web Audio beeper
    pub struct AudioManager {
        ctx: Option<AudioContext>,
    }

    impl Default for AudioManager {
        fn default() -> Self {
            Self::new()
        }
    }

    impl AudioManager {
        pub fn new() -> Self {
            // May fail outside a secure context; audio is then silently off
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self { ctx }
        }

        /// Create an oscillator routed through a gain node
        fn create_osc(
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

    fn oscillator_type(waveform: Waveform) -> OscillatorType {
        match waveform {
            Waveform::Sine => OscillatorType::Sine,
            Waveform::Square => OscillatorType::Square,
            Waveform::Sawtooth => OscillatorType::Sawtooth,
            Waveform::Triangle => OscillatorType::Triangle,
        }
    }

    impl ToneSink for AudioManager {
        fn play_tone(&mut self, tone: Tone) {
            let vol = tone.volume.clamp(0.0, 1.0);
            if vol <= 0.0 {
                return;
            }
            let Some(ctx) = &self.ctx else { return };

            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            let Some((osc, gain)) =
                Self::create_osc(ctx, tone.frequency, oscillator_type(tone.waveform))
            else {
                return;
            };
            let t = ctx.current_time();
            let end = t + f64::from(tone.duration);

            gain.gain().set_value_at_time(vol, t).ok();
            gain.gain().exponential_ramp_to_value_at_time(0.0001, end).ok();

            osc.start().ok();
            osc.stop_with_when(end + 0.01).ok();
        }

        fn resume(&mut self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }
    }
}
