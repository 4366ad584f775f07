//! Synthesized cues: a drone that follows the spin velocity and a short
//! chime when the wheel stops.

use crate::error::AudioError;

pub const DRONE_MIN_FREQUENCY: f64 = 80.0;
pub const DRONE_MAX_CUTOFF: f64 = 12_000.0;
pub const DRONE_INITIAL_CUTOFF: f64 = 800.0;
/// Gain used for "silent" envelope endpoints; exponential ramps cannot reach 0.
pub const SILENT_GAIN: f32 = 0.0001;
pub const DRONE_GAIN: f32 = 0.18;
pub const DRONE_FADE_IN: f64 = 0.08;
pub const DRONE_FADE_OUT: f64 = 0.35;
/// Delay before the drained drone's nodes are stopped and disconnected.
pub const DRONE_RELEASE_MS: u32 = 500;
/// Time constant for frequency/cutoff glides.
pub const RETUNE_TIME_CONSTANT: f64 = 0.02;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Triangle,
    Sawtooth,
}

/// Oscillator frequency and lowpass cutoff for the drone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DroneTuning {
    pub frequency: f64,
    pub cutoff: f64,
}

impl DroneTuning {
    pub fn for_velocity(velocity: f64) -> Self {
        let speed = velocity.abs();
        Self {
            frequency: (180.0 + speed * 2000.0).max(DRONE_MIN_FREQUENCY),
            cutoff: (600.0 + speed * 1800.0).min(DRONE_MAX_CUTOFF),
        }
    }
}

/// One layer of the win chime. Times are seconds relative to the chime start.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChimeTone {
    pub waveform: Waveform,
    pub start: f64,
    pub frequency: f64,
    /// Optional exponential sweep target and the time it is reached.
    pub sweep_to: Option<(f64, f64)>,
    pub peak_gain: f32,
    pub attack_end: f64,
    pub decay_end: f64,
    pub stop: f64,
}

pub const CHIME: [ChimeTone; 2] = [
    ChimeTone {
        waveform: Waveform::Sine,
        start: 0.0,
        frequency: 880.0,
        sweep_to: Some((660.0, 0.35)),
        peak_gain: 0.12,
        attack_end: 0.02,
        decay_end: 1.1,
        stop: 1.15,
    },
    ChimeTone {
        waveform: Waveform::Triangle,
        start: 0.04,
        frequency: 1320.0,
        sweep_to: None,
        peak_gain: 0.08,
        attack_end: 0.08,
        decay_end: 0.6,
        stop: 0.65,
    },
];

/// What the wheel needs from a sound system.
pub trait ToneSource {
    fn start(&mut self) -> Result<(), AudioError>;
    fn retune(&mut self, tuning: DroneTuning) -> Result<(), AudioError>;
    fn fade_out_and_stop(&mut self) -> Result<(), AudioError>;
    fn fire_chime(&mut self) -> Result<(), AudioError>;
}

/// Host synthesis API. `Voice` owns the nodes of one drone.
pub trait SynthBackend {
    type Voice;

    /// Creates the context on first use and resumes it when suspended.
    fn ensure_running(&mut self) -> Result<(), AudioError>;
    fn open_drone(&mut self) -> Result<Self::Voice, AudioError>;
    fn retune_drone(&mut self, voice: &Self::Voice, tuning: DroneTuning) -> Result<(), AudioError>;
    /// Starts the fade and hands the voice over for delayed teardown.
    fn release_drone(&mut self, voice: Self::Voice) -> Result<(), AudioError>;
    fn play_chime(&mut self, tones: &[ChimeTone]) -> Result<(), AudioError>;
}

/// Keeps at most one live drone on top of a [`SynthBackend`].
///
/// A released drone is moved out before its fade finishes, so a restart
/// during the fade opens a fresh voice while the old one drains.
pub struct AudioEngine<B: SynthBackend> {
    backend: B,
    drone: Option<B::Voice>,
}

impl<B: SynthBackend> AudioEngine<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            drone: None,
        }
    }

    pub fn has_drone(&self) -> bool {
        self.drone.is_some()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

impl<B: SynthBackend> ToneSource for AudioEngine<B> {
    fn start(&mut self) -> Result<(), AudioError> {
        self.backend.ensure_running()?;
        if self.drone.is_some() {
            return Ok(());
        }
        self.drone = Some(self.backend.open_drone()?);
        log::debug!("drone started");
        Ok(())
    }

    fn retune(&mut self, tuning: DroneTuning) -> Result<(), AudioError> {
        match &self.drone {
            Some(voice) => self.backend.retune_drone(voice, tuning),
            None => Ok(()),
        }
    }

    fn fade_out_and_stop(&mut self) -> Result<(), AudioError> {
        match self.drone.take() {
            Some(voice) => {
                log::debug!("drone fading out");
                self.backend.release_drone(voice)
            }
            None => Ok(()),
        }
    }

    fn fire_chime(&mut self) -> Result<(), AudioError> {
        self.backend.ensure_running()?;
        self.backend.play_chime(&CHIME)
    }
}

/// Silent tone source for hosts without audio output.
#[derive(Debug, Default, Clone, Copy)]
pub struct Mute;

impl ToneSource for Mute {
    fn start(&mut self) -> Result<(), AudioError> {
        Ok(())
    }

    fn retune(&mut self, _tuning: DroneTuning) -> Result<(), AudioError> {
        Ok(())
    }

    fn fade_out_and_stop(&mut self) -> Result<(), AudioError> {
        Ok(())
    }

    fn fire_chime(&mut self) -> Result<(), AudioError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct FakeBackend {
        next_voice: u32,
        opened: Vec<u32>,
        released: Vec<u32>,
        retuned: Vec<(u32, DroneTuning)>,
        chimes: usize,
        fail_context: bool,
    }

    impl FakeBackend {
        fn live(&self) -> usize {
            self.opened.len() - self.released.len()
        }
    }

    impl SynthBackend for FakeBackend {
        type Voice = u32;

        fn ensure_running(&mut self) -> Result<(), AudioError> {
            if self.fail_context {
                return Err(AudioError::ContextUnavailable("no user gesture".into()));
            }
            Ok(())
        }

        fn open_drone(&mut self) -> Result<u32, AudioError> {
            self.next_voice += 1;
            self.opened.push(self.next_voice);
            Ok(self.next_voice)
        }

        fn retune_drone(&mut self, voice: &u32, tuning: DroneTuning) -> Result<(), AudioError> {
            self.retuned.push((*voice, tuning));
            Ok(())
        }

        fn release_drone(&mut self, voice: u32) -> Result<(), AudioError> {
            assert!(!self.released.contains(&voice), "voice {voice} released twice");
            self.released.push(voice);
            Ok(())
        }

        fn play_chime(&mut self, tones: &[ChimeTone]) -> Result<(), AudioError> {
            assert_eq!(tones.len(), 2);
            self.chimes += 1;
            Ok(())
        }
    }

    #[test]
    fn test_tuning_follows_velocity() {
        let still = DroneTuning::for_velocity(0.0);
        assert_eq!(still.frequency, 180.0);
        assert_eq!(still.cutoff, 600.0);

        let fast = DroneTuning::for_velocity(-0.5);
        assert_eq!(fast.frequency, 1180.0);
        assert_eq!(fast.cutoff, 1500.0);

        let wild = DroneTuning::for_velocity(10.0);
        assert_eq!(wild.cutoff, DRONE_MAX_CUTOFF);
    }

    #[test]
    fn test_start_twice_keeps_single_drone() {
        let mut engine = AudioEngine::new(FakeBackend::default());
        engine.start().unwrap();
        engine.start().unwrap();
        assert_eq!(engine.backend().opened, vec![1]);
        assert!(engine.has_drone());
    }

    #[test]
    fn test_stop_without_drone_and_double_stop_are_harmless() {
        let mut engine = AudioEngine::new(FakeBackend::default());
        assert!(engine.fade_out_and_stop().is_ok());

        engine.start().unwrap();
        assert!(engine.fade_out_and_stop().is_ok());
        assert!(engine.fade_out_and_stop().is_ok());
        assert!(!engine.has_drone());
        assert_eq!(engine.backend().live(), 0);
        assert_eq!(engine.backend().released, vec![1]);
    }

    #[test]
    fn test_restart_while_draining_opens_fresh_voice() {
        let mut engine = AudioEngine::new(FakeBackend::default());
        engine.start().unwrap();
        engine.fade_out_and_stop().unwrap();
        engine.fire_chime().unwrap();
        engine.start().unwrap();
        engine.retune(DroneTuning::for_velocity(0.3)).unwrap();

        assert_eq!(engine.backend().opened, vec![1, 2]);
        assert_eq!(engine.backend().retuned[0].0, 2);
        assert_eq!(engine.backend().chimes, 1);
    }

    #[test]
    fn test_retune_without_drone_is_ignored() {
        let mut engine = AudioEngine::new(FakeBackend::default());
        engine.retune(DroneTuning::for_velocity(0.3)).unwrap();
        assert!(engine.backend().retuned.is_empty());
    }

    #[test]
    fn test_context_failure_surfaces_as_error() {
        let mut engine = AudioEngine::new(FakeBackend {
            fail_context: true,
            ..FakeBackend::default()
        });
        assert!(matches!(engine.start(), Err(AudioError::ContextUnavailable(_))));
        assert!(engine.fire_chime().is_err());
        assert!(!engine.has_drone());
    }
}
