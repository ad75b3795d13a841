use serde::{Deserialize, Serialize};

use super::constants::{FRAME_SIZE_SAMPLES, SAMPLE_RATE_HZ};

/// Configuration for the energy-based classifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnergyClassifierConfig {
    /// dB above the tracked noise floor required to enter speech.
    pub onset_threshold_db: f32,
    /// dB above the tracked noise floor below which speech exits.
    /// Kept lower than the onset offset so the boundary does not flap.
    pub offset_threshold_db: f32,
    /// EMA coefficient for noise floor tracking.
    pub ema_alpha: f32,
    /// Noise floor assumed before any audio has been observed.
    pub initial_floor_db: f32,
    pub frame_size_samples: usize,
    pub sample_rate_hz: u32,
}

impl Default for EnergyClassifierConfig {
    fn default() -> Self {
        Self {
            onset_threshold_db: 9.0,
            offset_threshold_db: 6.0,
            ema_alpha: 0.02,
            initial_floor_db: -50.0,
            frame_size_samples: FRAME_SIZE_SAMPLES,
            sample_rate_hz: SAMPLE_RATE_HZ,
        }
    }
}

impl EnergyClassifierConfig {
    /// Tuned for quiet rooms: trigger earlier, release sooner.
    pub fn clean_speech() -> Self {
        Self {
            onset_threshold_db: 6.0,
            offset_threshold_db: 4.0,
            initial_floor_db: -60.0,
            ..Default::default()
        }
    }

    /// Tuned for noisy environments: demand a larger margin over the floor.
    pub fn noisy_environment() -> Self {
        Self {
            onset_threshold_db: 12.0,
            offset_threshold_db: 8.0,
            ema_alpha: 0.05,
            initial_floor_db: -45.0,
            ..Default::default()
        }
    }

    pub fn frame_duration_ms(&self) -> f32 {
        (self.frame_size_samples as f32 * 1000.0) / self.sample_rate_hz as f32
    }
}
