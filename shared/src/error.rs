use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AudioError {
    #[error("audio context unavailable: {0}")]
    ContextUnavailable(String),

    #[error("failed to create audio node: {0}")]
    NodeCreation(String),

    #[error("failed to schedule audio parameter: {0}")]
    Scheduling(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("color palette is empty")]
    NoColors,

    #[error("friction must be in (0, 1), got {0}")]
    Friction(f64),

    #[error("stop velocity must be positive, got {0}")]
    StopVelocity(f64),

    #[error("velocity range {min}..{max} is invalid")]
    VelocityRange { min: f64, max: f64 },

    #[error("canvas size {0}px is too small")]
    CanvasSize(u32),

    #[error("invalid config document: {0}")]
    Parse(String),
}
