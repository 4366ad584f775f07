#![cfg(target_arch = "wasm32")]

use gloo_timers::future::TimeoutFuture;
use shared::audio::CHIME;
use shared::{AudioEngine, DroneTuning, SynthBackend, ToneSource, WheelConfig};
use wasm_bindgen_test::*;
use wheel_frontend::config::{load_wheel_config, parse_wheel_config};
use wheel_frontend::wheel::WebSynth;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn missing_config_element_uses_defaults() {
    assert_eq!(load_wheel_config(), WheelConfig::default());
}

#[wasm_bindgen_test]
fn blank_or_broken_config_falls_back() {
    assert_eq!(parse_wheel_config(Some("   ")), WheelConfig::default());
    assert_eq!(parse_wheel_config(Some("{\"colors\": []}")), WheelConfig::default());
    assert_eq!(parse_wheel_config(Some("not json")), WheelConfig::default());
}

#[wasm_bindgen_test]
fn overrides_are_applied() {
    let config = parse_wheel_config(Some(r##"{"colors": ["#000"], "canvas_size": 320}"##));
    assert_eq!(config.colors, vec!["#000".to_string()]);
    assert_eq!(config.canvas_size, 320);
    assert_eq!(config.slice_set().len(), 8);
}

#[wasm_bindgen_test]
async fn web_synth_drone_lifecycle() {
    let mut synth = WebSynth::default();
    synth.ensure_running().expect("audio context");

    let voice = synth.open_drone().expect("drone opens");
    synth
        .retune_drone(&voice, DroneTuning::for_velocity(0.3))
        .expect("drone retunes");
    synth.release_drone(voice).expect("drone releases");
    synth.play_chime(&CHIME).expect("chime plays");

    // Let the delayed teardown run against the stopped nodes.
    TimeoutFuture::new(600).await;
}

#[wasm_bindgen_test]
fn engine_fade_is_idempotent_on_web_audio() {
    let mut engine = AudioEngine::new(WebSynth::default());
    engine.start().expect("drone starts");
    engine.retune(DroneTuning::for_velocity(0.5)).expect("drone retunes");
    engine.fade_out_and_stop().expect("first fade");
    engine.fade_out_and_stop().expect("second fade is a no-op");
    assert!(!engine.has_drone());
}
