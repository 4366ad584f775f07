pub mod audio;
pub mod config;
pub mod controller;
pub mod error;
pub mod physics;
pub mod render;
pub mod selection;
pub mod slices;

pub use audio::{AudioEngine, DroneTuning, Mute, SynthBackend, ToneSource};
pub use config::WheelConfig;
pub use controller::{FrameScheduler, FrameStatus, ManualFrames, ResultPanel, WheelController};
pub use error::{AudioError, ConfigError};
pub use physics::{SpinPhysics, SpinTuning, Tick, WheelState};
pub use render::{WheelLayout, WheelSurface};
pub use selection::selected_index;
pub use slices::{Slice, SliceSet};
