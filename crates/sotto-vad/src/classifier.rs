use crate::{
    config::EnergyClassifierConfig, energy::EnergyMeter, threshold::AdaptiveThreshold,
    FrameClassifier,
};

/// Energy-based speech classifier with hysteresis.
///
/// Each frame's RMS energy is compared against an adaptive noise floor. The
/// `was_speech` hint selects which of the two thresholds applies: entering
/// speech requires clearing the onset threshold, staying in speech only
/// requires holding above the lower offset threshold.
pub struct EnergyClassifier {
    config: EnergyClassifierConfig,
    meter: EnergyMeter,
    threshold: AdaptiveThreshold,
}

impl EnergyClassifier {
    pub fn new(config: EnergyClassifierConfig) -> Self {
        Self {
            threshold: AdaptiveThreshold::new(&config),
            meter: EnergyMeter::new(),
            config,
        }
    }

    pub fn current_floor_db(&self) -> f32 {
        self.threshold.current_floor()
    }
}

impl FrameClassifier for EnergyClassifier {
    fn classify(&mut self, frame: &[f32], was_speech: bool) -> Result<bool, String> {
        if frame.len() != self.config.frame_size_samples {
            return Err(format!(
                "Expected {} samples, got {}",
                self.config.frame_size_samples,
                frame.len()
            ));
        }

        let energy_db = self.meter.calculate_dbfs(frame);

        let is_speech = if was_speech {
            !self.threshold.should_deactivate(energy_db)
        } else {
            self.threshold.should_activate(energy_db)
        };

        self.threshold.update(energy_db, is_speech);

        Ok(is_speech)
    }

    fn reset(&mut self) {
        self.threshold.reset(self.config.initial_floor_db);
    }

    fn required_sample_rate(&self) -> u32 {
        self.config.sample_rate_hz
    }

    fn required_frame_size(&self) -> usize {
        self.config.frame_size_samples
    }
}
