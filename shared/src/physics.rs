use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Per-frame deceleration parameters.
///
/// Friction is applied once per rendered frame, so the spin duration follows
/// the display refresh rate rather than wall-clock time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpinTuning {
    pub friction: f64,
    pub stop_velocity: f64,
    pub min_velocity: f64,
    pub max_velocity: f64,
}

impl Default for SpinTuning {
    fn default() -> Self {
        Self {
            friction: 0.985,
            stop_velocity: 0.01,
            min_velocity: 0.35,
            max_velocity: 0.65,
        }
    }
}

impl SpinTuning {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.friction > 0.0 && self.friction < 1.0) {
            return Err(ConfigError::Friction(self.friction));
        }
        if !(self.stop_velocity > 0.0 && self.stop_velocity.is_finite()) {
            return Err(ConfigError::StopVelocity(self.stop_velocity));
        }
        // A start velocity at or below the stop threshold would end on the first frame.
        if !(self.min_velocity < self.max_velocity
            && self.min_velocity > self.stop_velocity
            && self.max_velocity.is_finite())
        {
            return Err(ConfigError::VelocityRange {
                min: self.min_velocity,
                max: self.max_velocity,
            });
        }
        Ok(())
    }
}

/// Angular position (radians, unbounded) and velocity (radians per frame).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WheelState {
    pub angle: f64,
    pub velocity: f64,
    pub spinning: bool,
}

/// Outcome of advancing the wheel by one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tick {
    /// Nothing to do, the wheel is at rest.
    Idle,
    Moving { velocity: f64 },
    /// The wheel came to rest on this frame.
    Stopped { angle: f64 },
}

#[derive(Debug, Clone)]
pub struct SpinPhysics {
    state: WheelState,
    tuning: SpinTuning,
    ticks: u32,
}

impl SpinPhysics {
    pub fn new(tuning: SpinTuning) -> Self {
        Self {
            state: WheelState::default(),
            tuning,
            ticks: 0,
        }
    }

    pub fn state(&self) -> WheelState {
        self.state
    }

    pub fn angle(&self) -> f64 {
        self.state.angle
    }

    pub fn velocity(&self) -> f64 {
        self.state.velocity
    }

    pub fn is_spinning(&self) -> bool {
        self.state.spinning
    }

    /// Frames elapsed since the current (or last) spin started.
    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    /// Kicks the wheel with a random velocity. Returns `None` if a spin is
    /// already running.
    pub fn start_spin<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<f64> {
        if self.state.spinning {
            return None;
        }
        let (min, max) = (self.tuning.min_velocity, self.tuning.max_velocity);
        let velocity = if min.is_finite() && max.is_finite() && min < max {
            rng.gen_range(min..max)
        } else {
            // Degenerate range: spin at the lower bound instead of panicking
            min
        };
        self.start_spin_with_velocity(velocity)
    }

    /// Starts a spin at a fixed velocity. Non-finite velocities are rejected
    /// since friction could never bring them under the stop threshold.
    pub fn start_spin_with_velocity(&mut self, velocity: f64) -> Option<f64> {
        if self.state.spinning || !velocity.is_finite() {
            return None;
        }
        self.state.velocity = velocity.abs();
        self.state.spinning = true;
        self.ticks = 0;
        Some(self.state.velocity)
    }

    /// Advances one frame: move by the current velocity, then apply friction.
    pub fn tick(&mut self) -> Tick {
        if !self.state.spinning {
            return Tick::Idle;
        }

        self.state.angle += self.state.velocity;
        self.state.velocity *= self.tuning.friction;
        self.ticks += 1;

        if self.state.velocity < self.tuning.stop_velocity {
            self.state.velocity = 0.0;
            self.state.spinning = false;
            return Tick::Stopped {
                angle: self.state.angle,
            };
        }

        Tick::Moving {
            velocity: self.state.velocity,
        }
    }
}

impl Default for SpinPhysics {
    fn default() -> Self {
        Self::new(SpinTuning::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_start_spin_draws_velocity_in_range() {
        let mut rng = SmallRng::seed_from_u64(42);
        for _ in 0..200 {
            let mut physics = SpinPhysics::default();
            let velocity = physics.start_spin(&mut rng).unwrap();
            assert!((0.35..0.65).contains(&velocity));
            assert!(physics.is_spinning());
        }
    }

    #[test]
    fn test_second_start_is_ignored() {
        let mut rng = SmallRng::seed_from_u64(1);
        let mut physics = SpinPhysics::default();
        physics.start_spin_with_velocity(0.5);
        physics.tick();
        let before = physics.state();

        assert_eq!(physics.start_spin(&mut rng), None);
        assert_eq!(physics.start_spin_with_velocity(0.9), None);
        assert_eq!(physics.state(), before);
    }

    #[test]
    fn test_non_finite_velocity_is_rejected() {
        for velocity in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let mut physics = SpinPhysics::default();
            assert_eq!(physics.start_spin_with_velocity(velocity), None);
            assert!(!physics.is_spinning());
            assert_eq!(physics.tick(), Tick::Idle);
            assert_eq!(physics.state(), WheelState::default());
        }
    }

    #[test]
    fn test_degenerate_velocity_range_does_not_panic() {
        let mut rng = SmallRng::seed_from_u64(3);
        let mut physics = SpinPhysics::new(SpinTuning {
            min_velocity: 0.5,
            max_velocity: 0.5,
            ..SpinTuning::default()
        });
        assert_eq!(physics.start_spin(&mut rng), Some(0.5));

        let mut physics = SpinPhysics::new(SpinTuning {
            min_velocity: 0.6,
            max_velocity: 0.2,
            ..SpinTuning::default()
        });
        assert_eq!(physics.start_spin(&mut rng), Some(0.6));

        let mut physics = SpinPhysics::new(SpinTuning {
            min_velocity: f64::NAN,
            ..SpinTuning::default()
        });
        assert_eq!(physics.start_spin(&mut rng), None);
        assert!(!physics.is_spinning());
    }

    #[test]
    fn test_velocity_decays_strictly_until_stop() {
        let mut physics = SpinPhysics::default();
        physics.start_spin_with_velocity(0.4);

        let mut previous = physics.velocity();
        loop {
            match physics.tick() {
                Tick::Moving { velocity } => {
                    assert!(velocity < previous);
                    assert!(velocity >= 0.01);
                    previous = velocity;
                }
                Tick::Stopped { .. } => break,
                Tick::Idle => panic!("wheel went idle without stopping"),
            }
        }

        assert!(!physics.is_spinning());
        assert_eq!(physics.velocity(), 0.0);
    }

    #[test]
    fn test_tuning_validation() {
        assert!(SpinTuning::default().validate().is_ok());

        let tuning = SpinTuning { max_velocity: f64::INFINITY, ..SpinTuning::default() };
        assert!(matches!(tuning.validate(), Err(ConfigError::VelocityRange { .. })));

        let tuning = SpinTuning { min_velocity: 0.005, ..SpinTuning::default() };
        assert!(matches!(tuning.validate(), Err(ConfigError::VelocityRange { .. })));

        let tuning = SpinTuning { stop_velocity: f64::NAN, ..SpinTuning::default() };
        assert!(matches!(tuning.validate(), Err(ConfigError::StopVelocity(_))));
    }

    #[test]
    fn test_tick_when_idle_is_noop() {
        let mut physics = SpinPhysics::default();
        assert_eq!(physics.tick(), Tick::Idle);
        assert_eq!(physics.state(), WheelState::default());
    }

    #[test]
    fn test_angle_accumulates_across_spins() {
        let mut physics = SpinPhysics::default();
        physics.start_spin_with_velocity(0.2);
        while physics.tick() != Tick::Idle && physics.is_spinning() {}
        let first = physics.angle();
        assert!(first > 0.0);

        physics.start_spin_with_velocity(0.2);
        assert_eq!(physics.ticks(), 0);
        while physics.is_spinning() {
            physics.tick();
        }
        assert!((physics.angle() - 2.0 * first).abs() < 1e-9);
    }
}
