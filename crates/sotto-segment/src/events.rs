/// One timestamped span of speech samples.
///
/// The payload is an independent copy; the engine retains no reference to it
/// after emission. Timestamps are fractional milliseconds relative to engine
/// construction and always satisfy `end_time_ms >= start_time_ms`.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeechClip {
    pub start_time_ms: f64,
    pub end_time_ms: f64,
    pub samples: Vec<f32>,
    pub sample_rate: u32,
}

impl SpeechClip {
    pub fn duration_ms(&self) -> f64 {
        self.end_time_ms - self.start_time_ms
    }
}

/// Events emitted by the segmentation engine.
#[derive(Debug, Clone, PartialEq)]
pub enum SpeechEvent {
    /// A silence-to-speech transition was detected.
    SpeechStart,
    /// A speech-to-silence transition was detected. The clip is not closed
    /// until the silence outlasts the close threshold.
    SpeechEnd,
    /// Periodic non-destructive snapshot of an in-progress clip.
    SpeechActive(SpeechClip),
    /// A finalized clip, padded and trimmed.
    SpeechAvailable(SpeechClip),
}
