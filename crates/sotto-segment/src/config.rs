use std::time::Duration;

use serde::{Deserialize, Serialize};
use sotto_foundation::ConfigError;
use sotto_vad::constants::{FRAME_SIZE_SAMPLES, SAMPLE_RATE_HZ};

/// Segmentation engine configuration, fixed for the lifetime of an engine
/// instance. All duration arithmetic is done in samples at `sample_rate_hz`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmenterConfig {
    pub sample_rate_hz: u32,
    pub frame_size_samples: usize,
    /// Audio retained on each side of a detected speech span.
    pub pad_ms: u32,
    /// Silence required after speech before a clip closes.
    pub min_silence_ms: u32,
    /// Finalized runs shorter than this are discarded.
    pub min_speech_ms: u32,
    /// Hard ceiling on a single clip; longer speech is split.
    pub max_clip_ms: u32,
    /// Cadence of partial `SpeechActive` snapshots.
    pub active_interval_ms: u32,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            sample_rate_hz: SAMPLE_RATE_HZ,
            frame_size_samples: FRAME_SIZE_SAMPLES,
            pad_ms: 800,
            min_silence_ms: 1000,
            min_speech_ms: 250,
            max_clip_ms: 30_000,
            active_interval_ms: 1000,
        }
    }
}

impl SegmenterConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sample_rate_hz == 0 {
            return Err(ConfigError::SampleRate(self.sample_rate_hz));
        }
        if self.frame_size_samples == 0 {
            return Err(ConfigError::FrameSize(self.frame_size_samples));
        }
        for (name, value) in [
            ("min_silence_ms", self.min_silence_ms),
            ("min_speech_ms", self.min_speech_ms),
            ("max_clip_ms", self.max_clip_ms),
            ("active_interval_ms", self.active_interval_ms),
        ] {
            if value == 0 {
                return Err(ConfigError::NonPositiveDuration { name, value });
            }
        }
        if self.max_clip_ms <= self.pad_ms {
            return Err(ConfigError::MaxClipTooShort {
                max_clip_ms: self.max_clip_ms,
                pad_ms: self.pad_ms,
            });
        }
        Ok(())
    }

    fn ms_to_samples(&self, ms: u32) -> usize {
        (ms as u64 * self.sample_rate_hz as u64 / 1000) as usize
    }

    pub fn pad_samples(&self) -> usize {
        self.ms_to_samples(self.pad_ms)
    }

    pub fn min_silence_samples(&self) -> usize {
        self.ms_to_samples(self.min_silence_ms)
    }

    pub fn min_speech_samples(&self) -> usize {
        self.ms_to_samples(self.min_speech_ms)
    }

    pub fn max_clip_samples(&self) -> usize {
        self.ms_to_samples(self.max_clip_ms)
    }

    pub fn active_interval(&self) -> Duration {
        Duration::from_millis(self.active_interval_ms as u64)
    }

    pub fn samples_per_ms(&self) -> f64 {
        self.sample_rate_hz as f64 / 1000.0
    }

    pub fn frame_duration_ms(&self) -> f32 {
        (self.frame_size_samples as f32 * 1000.0) / self.sample_rate_hz as f32
    }
}
