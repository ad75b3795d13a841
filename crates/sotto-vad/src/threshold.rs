use crate::config::EnergyClassifierConfig;

/// Noise-floor tracker with asymmetric onset/offset thresholds.
///
/// The floor follows an EMA of energy during non-speech frames only, clamped
/// to a sane range so a burst of line noise cannot run the floor away.
pub struct AdaptiveThreshold {
    noise_floor_db: f32,
    ema_alpha: f32,
    onset_offset_db: f32,
    offset_offset_db: f32,
    min_floor_db: f32,
    max_floor_db: f32,
}

impl AdaptiveThreshold {
    pub fn new(config: &EnergyClassifierConfig) -> Self {
        Self {
            noise_floor_db: config.initial_floor_db,
            ema_alpha: config.ema_alpha,
            onset_offset_db: config.onset_threshold_db,
            offset_offset_db: config.offset_threshold_db,
            min_floor_db: -80.0,
            max_floor_db: -20.0,
        }
    }

    pub fn update(&mut self, energy_db: f32, is_speech: bool) {
        if !is_speech && energy_db > self.min_floor_db && energy_db < self.max_floor_db {
            self.noise_floor_db =
                (1.0 - self.ema_alpha) * self.noise_floor_db + self.ema_alpha * energy_db;

            self.noise_floor_db = self
                .noise_floor_db
                .clamp(self.min_floor_db, self.max_floor_db);
        }
    }

    pub fn onset_threshold(&self) -> f32 {
        self.noise_floor_db + self.onset_offset_db
    }

    pub fn offset_threshold(&self) -> f32 {
        self.noise_floor_db + self.offset_offset_db
    }

    pub fn current_floor(&self) -> f32 {
        self.noise_floor_db
    }

    pub fn should_activate(&self, energy_db: f32) -> bool {
        energy_db >= self.onset_threshold()
    }

    pub fn should_deactivate(&self, energy_db: f32) -> bool {
        energy_db < self.offset_threshold()
    }

    pub fn reset(&mut self, initial_floor_db: f32) {
        self.noise_floor_db = initial_floor_db.clamp(self.min_floor_db, self.max_floor_db);
    }
}
