use gloo_timers::callback::Timeout;
use shared::audio::{
    ChimeTone, Waveform, DRONE_FADE_IN, DRONE_FADE_OUT, DRONE_GAIN, DRONE_INITIAL_CUTOFF,
    DRONE_RELEASE_MS, RETUNE_TIME_CONSTANT, SILENT_GAIN,
};
use shared::{AudioError, DroneTuning, SynthBackend};
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{
    AudioContext, AudioContextState, BiquadFilterNode, BiquadFilterType, GainNode,
    OscillatorNode, OscillatorType,
};

fn node_error(e: JsValue) -> AudioError {
    AudioError::NodeCreation(format!("{:?}", e))
}

fn schedule_error(e: JsValue) -> AudioError {
    AudioError::Scheduling(format!("{:?}", e))
}

fn oscillator_type(waveform: Waveform) -> OscillatorType {
    match waveform {
        Waveform::Sine => OscillatorType::Sine,
        Waveform::Triangle => OscillatorType::Triangle,
        Waveform::Sawtooth => OscillatorType::Sawtooth,
    }
}

/// Oscillator → lowpass → gain chain of one drone.
pub struct DroneVoice {
    oscillator: OscillatorNode,
    filter: BiquadFilterNode,
    gain: GainNode,
}

impl DroneVoice {
    /// Stops and disconnects every node. Already-stopped or already
    /// disconnected nodes are ignored.
    fn teardown(self) {
        let _ = self.oscillator.stop();
        let _ = self.oscillator.disconnect();
        let _ = self.filter.disconnect();
        let _ = self.gain.disconnect();
    }
}

/// Web Audio backend. The context is created lazily because browsers only
/// allow it after a user gesture.
#[derive(Default)]
pub struct WebSynth {
    context: Option<AudioContext>,
}

impl WebSynth {
    fn context(&self) -> Result<&AudioContext, AudioError> {
        self.context
            .as_ref()
            .ok_or_else(|| AudioError::ContextUnavailable("not initialised".to_string()))
    }
}

impl SynthBackend for WebSynth {
    type Voice = DroneVoice;

    fn ensure_running(&mut self) -> Result<(), AudioError> {
        if self.context.is_none() {
            let context = AudioContext::new()
                .map_err(|e| AudioError::ContextUnavailable(format!("{:?}", e)))?;
            log::debug!("Audio context created");
            self.context = Some(context);
        }

        let context = self.context()?;
        if context.state() == AudioContextState::Suspended {
            match context.resume() {
                Ok(promise) => spawn_local(async move {
                    if let Err(e) = JsFuture::from(promise).await {
                        log::warn!("Audio context resume rejected: {:?}", e);
                    }
                }),
                Err(e) => log::warn!("Audio context resume failed: {:?}", e),
            }
        }
        Ok(())
    }

    fn open_drone(&mut self) -> Result<DroneVoice, AudioError> {
        let context = self.context()?;

        let oscillator = context.create_oscillator().map_err(node_error)?;
        oscillator.set_type(OscillatorType::Sawtooth);
        let filter = context.create_biquad_filter().map_err(node_error)?;
        filter.set_type(BiquadFilterType::Lowpass);
        filter.frequency().set_value(DRONE_INITIAL_CUTOFF as f32);
        let gain = context.create_gain().map_err(node_error)?;
        gain.gain().set_value(SILENT_GAIN);

        let voice = DroneVoice { oscillator, filter, gain };
        let wired = voice
            .oscillator
            .connect_with_audio_node(&voice.filter)
            .and_then(|_| voice.filter.connect_with_audio_node(&voice.gain))
            .and_then(|_| voice.gain.connect_with_audio_node(&context.destination()))
            .and_then(|_| voice.oscillator.start());
        if let Err(e) = wired {
            voice.teardown();
            return Err(node_error(e));
        }

        // Fade in from near-silence to avoid a click
        let now = context.current_time();
        let level = voice.gain.gain();
        level
            .cancel_scheduled_values(now)
            .and_then(|_| level.set_value_at_time(SILENT_GAIN, now))
            .and_then(|_| level.exponential_ramp_to_value_at_time(DRONE_GAIN, now + DRONE_FADE_IN))
            .map_err(schedule_error)?;

        Ok(voice)
    }

    fn retune_drone(&mut self, voice: &DroneVoice, tuning: DroneTuning) -> Result<(), AudioError> {
        let now = self.context()?.current_time();
        voice
            .oscillator
            .frequency()
            .set_target_at_time(tuning.frequency as f32, now, RETUNE_TIME_CONSTANT)
            .map_err(schedule_error)?;
        voice
            .filter
            .frequency()
            .set_target_at_time(tuning.cutoff as f32, now, RETUNE_TIME_CONSTANT)
            .map_err(schedule_error)?;
        Ok(())
    }

    fn release_drone(&mut self, voice: DroneVoice) -> Result<(), AudioError> {
        let faded = match self.context() {
            Ok(context) => {
                let now = context.current_time();
                let level = voice.gain.gain();
                level
                    .cancel_scheduled_values(now)
                    .and_then(|_| level.set_value_at_time(level.value(), now))
                    .and_then(|_| level.exponential_ramp_to_value_at_time(SILENT_GAIN, now + DRONE_FADE_OUT))
                    .map(|_| ())
                    .map_err(schedule_error)
            }
            Err(e) => Err(e),
        };

        // Nodes are released even when the fade could not be scheduled
        Timeout::new(DRONE_RELEASE_MS, move || {
            voice.teardown();
            log::debug!("Drone released");
        })
        .forget();

        faded
    }

    fn play_chime(&mut self, tones: &[ChimeTone]) -> Result<(), AudioError> {
        let context = self.context()?;
        let now = context.current_time();
        let destination = context.destination();

        for tone in tones {
            let oscillator = context.create_oscillator().map_err(node_error)?;
            let gain = context.create_gain().map_err(node_error)?;
            oscillator.set_type(oscillator_type(tone.waveform));

            let start = now + tone.start;
            let pitch = oscillator.frequency();
            let level = gain.gain();

            pitch
                .set_value_at_time(tone.frequency as f32, start)
                .and_then(|_| level.set_value_at_time(SILENT_GAIN, start))
                .map_err(schedule_error)?;
            oscillator
                .connect_with_audio_node(&gain)
                .and_then(|_| gain.connect_with_audio_node(&destination))
                .map_err(node_error)?;
            oscillator.start_with_when(start).map_err(node_error)?;

            level
                .exponential_ramp_to_value_at_time(tone.peak_gain, now + tone.attack_end)
                .map_err(schedule_error)?;
            if let Some((target, at)) = tone.sweep_to {
                pitch
                    .exponential_ramp_to_value_at_time(target as f32, now + at)
                    .map_err(schedule_error)?;
            }
            level
                .exponential_ramp_to_value_at_time(SILENT_GAIN, now + tone.decay_end)
                .map_err(schedule_error)?;
            oscillator.stop_with_when(now + tone.stop).map_err(schedule_error)?;
        }

        log::debug!("Win chime scheduled");
        Ok(())
    }
}
