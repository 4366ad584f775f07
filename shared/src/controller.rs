use rand::rngs::SmallRng;

use crate::audio::{DroneTuning, ToneSource};
use crate::physics::{SpinPhysics, SpinTuning, Tick, WheelState};
use crate::render::WheelSurface;
use crate::selection::selected_index;
use crate::slices::{Slice, SliceSet};

/// Panel announcing the winning label.
pub trait ResultPanel {
    fn show(&mut self, label: &str);
    fn hide(&mut self);
}

/// Host display-refresh primitive. After `request_frame` the host calls
/// [`WheelController::frame`] exactly once on its next refresh.
pub trait FrameScheduler {
    fn request_frame(&mut self);
}

/// Scheduler for driving the loop by hand.
#[derive(Debug, Default, Clone)]
pub struct ManualFrames {
    pending: bool,
    requested: u32,
}

impl ManualFrames {
    /// Consumes the pending request, if any.
    pub fn take_pending(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn requested(&self) -> u32 {
        self.requested
    }
}

impl FrameScheduler for ManualFrames {
    fn request_frame(&mut self) {
        self.pending = true;
        self.requested += 1;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    Idle,
    Continue,
    /// The wheel stopped on this frame with the given slice under the pointer.
    Finished(usize),
}

/// One wheel: physics, audio session, drawing surface, result panel and the
/// frame loop that ties them together.
pub struct WheelController<T, P, S, F> {
    slices: SliceSet,
    physics: SpinPhysics,
    tones: T,
    panel: P,
    surface: S,
    frames: F,
    rng: SmallRng,
    last_result: Option<usize>,
}

impl<T, P, S, F> WheelController<T, P, S, F>
where
    T: ToneSource,
    P: ResultPanel,
    S: WheelSurface,
    F: FrameScheduler,
{
    /// Builds an idle wheel. A `tuning` that fails [`SpinTuning::validate`]
    /// does not panic, but spins then start at `min_velocity` (or not at all
    /// when it is not finite).
    pub fn new(
        slices: SliceSet,
        tuning: SpinTuning,
        tones: T,
        panel: P,
        surface: S,
        frames: F,
        rng: SmallRng,
    ) -> Self {
        Self {
            slices,
            physics: SpinPhysics::new(tuning),
            tones,
            panel,
            surface,
            frames,
            rng,
            last_result: None,
        }
    }

    pub fn slices(&self) -> &SliceSet {
        &self.slices
    }

    pub fn state(&self) -> WheelState {
        self.physics.state()
    }

    pub fn is_spinning(&self) -> bool {
        self.physics.is_spinning()
    }

    pub fn last_result(&self) -> Option<&Slice> {
        self.last_result.and_then(|index| self.slices.get(index))
    }

    pub fn panel(&self) -> &P {
        &self.panel
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn frames(&self) -> &F {
        &self.frames
    }

    pub fn frames_mut(&mut self) -> &mut F {
        &mut self.frames
    }

    /// Paints the wheel at its current angle.
    pub fn redraw(&mut self) {
        self.surface.draw(&self.slices, self.physics.angle());
    }

    /// Spin trigger. Ignored while the wheel is moving.
    pub fn spin(&mut self) -> bool {
        if self.physics.is_spinning() {
            return false;
        }
        self.panel.hide();

        let Some(velocity) = self.physics.start_spin(&mut self.rng) else {
            return false;
        };
        self.begin(velocity);
        true
    }

    /// Like [`spin`](Self::spin) but with a fixed initial velocity.
    pub fn spin_with_velocity(&mut self, velocity: f64) -> bool {
        if self.physics.is_spinning() {
            return false;
        }
        self.panel.hide();

        let Some(velocity) = self.physics.start_spin_with_velocity(velocity) else {
            return false;
        };
        self.begin(velocity);
        true
    }

    /// "Spin again" trigger: always dismisses the panel, spins if idle.
    pub fn spin_again(&mut self) -> bool {
        self.panel.hide();
        self.spin()
    }

    /// "Close" trigger.
    pub fn close(&mut self) {
        self.panel.hide();
    }

    /// Fades out any live drone, e.g. before the wheel is torn down mid-spin.
    pub fn release_audio(&mut self) {
        if let Err(e) = self.tones.fade_out_and_stop() {
            log::warn!("Failed to stop spin sound: {}", e);
        }
    }

    fn begin(&mut self, velocity: f64) {
        log::info!("Spin started with velocity {:.3} rad/frame", velocity);
        if let Err(e) = self.tones.start() {
            log::warn!("Spin sound unavailable: {}", e);
        }
        self.frames.request_frame();
    }

    /// Runs one animation frame: physics, audio, drawing, and on the final
    /// frame the result. Reschedules itself while the wheel is moving.
    pub fn frame(&mut self) -> FrameStatus {
        match self.physics.tick() {
            Tick::Idle => FrameStatus::Idle,
            Tick::Moving { velocity } => {
                if let Err(e) = self.tones.retune(DroneTuning::for_velocity(velocity)) {
                    log::warn!("Failed to retune spin sound: {}", e);
                }
                self.redraw();
                self.frames.request_frame();
                FrameStatus::Continue
            }
            Tick::Stopped { angle } => {
                // Let the drone glide to its resting pitch while it fades
                if let Err(e) = self.tones.retune(DroneTuning::for_velocity(0.0)) {
                    log::warn!("Failed to retune spin sound: {}", e);
                }
                if let Err(e) = self.tones.fade_out_and_stop() {
                    log::warn!("Failed to stop spin sound: {}", e);
                }
                if let Err(e) = self.tones.fire_chime() {
                    log::warn!("Failed to play win sound: {}", e);
                }

                let index = selected_index(angle, self.slices.len());
                self.last_result = Some(index);
                if let Some(slice) = self.slices.get(index) {
                    log::info!(
                        "Wheel stopped after {} frames on slice {} ({})",
                        self.physics.ticks(),
                        index,
                        slice.label
                    );
                    self.panel.show(&slice.label);
                }

                self.redraw();
                FrameStatus::Finished(index)
            }
        }
    }
}
