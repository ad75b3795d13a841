use thiserror::Error;

/// Errors surfaced by the segmentation pipeline.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Classifier error: {0}")]
    Classifier(String),

    #[error("Session inlet closed")]
    SessionClosed,

    #[error("Fatal error, cannot recover: {0}")]
    Fatal(String),
}

/// Construction-time configuration failures. Fatal, never recoverable at
/// runtime.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Sample rate must be positive, got {0}")]
    SampleRate(u32),

    #[error("Frame size must be positive, got {0}")]
    FrameSize(usize),

    #[error("{name} must be positive, got {value} ms")]
    NonPositiveDuration { name: &'static str, value: u32 },

    #[error("Max clip duration ({max_clip_ms} ms) must exceed pad duration ({pad_ms} ms)")]
    MaxClipTooShort { max_clip_ms: u32, pad_ms: u32 },

    #[error("Engine frame size ({engine}) does not match classifier frame size ({classifier})")]
    FrameSizeMismatch { engine: usize, classifier: usize },

    #[error("Engine sample rate ({engine}) does not match classifier sample rate ({classifier})")]
    SampleRateMismatch { engine: u32, classifier: u32 },
}
