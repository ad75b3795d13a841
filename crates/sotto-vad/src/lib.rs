pub mod classifier;
pub mod config;
pub mod constants;
pub mod energy;
pub mod threshold;

pub use classifier::EnergyClassifier;
pub use config::EnergyClassifierConfig;
pub use constants::{FRAME_DURATION_MS, FRAME_SIZE_SAMPLES, SAMPLE_RATE_HZ};

/// A trait for per-frame speech classifiers.
///
/// The classifier decides whether a single fixed-size frame is speech. The
/// `was_speech` hint carries the caller's current state so the classifier can
/// apply asymmetric enter/exit thresholds (hysteresis) — the segmenter never
/// re-implements thresholding. Implementations must be callable once per
/// frame, in frame order, and must not retain the frame past the call.
pub trait FrameClassifier: Send {
    fn classify(&mut self, frame: &[f32], was_speech: bool) -> Result<bool, String>;
    fn reset(&mut self);
    fn required_sample_rate(&self) -> u32;
    fn required_frame_size(&self) -> usize;
}
