use std::time::Instant;

use sotto_audio::{FrameChunker, SampleBuffer};
use sotto_foundation::{real_clock, ConfigError, PipelineError, SharedClock};
use sotto_vad::FrameClassifier;

use crate::config::SegmenterConfig;
use crate::events::{SpeechClip, SpeechEvent};

/// Streaming speech segmentation engine.
///
/// Consumes sample chunks of arbitrary size, runs each completed frame
/// through the classifier in arrival order, and turns the per-frame
/// decisions into `SpeechEvent`s: transition markers, periodic snapshots of
/// an in-progress clip, and finalized padded clips.
///
/// The engine is single-threaded; callers must serialize `process`/`stop`
/// on one instance. Independent instances share nothing.
pub struct SpeechSegmenter {
    config: SegmenterConfig,
    classifier: Box<dyn FrameClassifier>,
    buffer: SampleBuffer,
    chunker: FrameChunker,

    was_speech: bool,
    speech_samples: usize,
    pre_speech_samples: usize,
    post_speech_samples: usize,

    clock: SharedClock,
    epoch: Instant,
    last_snapshot: Instant,
    stopped: bool,
}

impl std::fmt::Debug for SpeechSegmenter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpeechSegmenter")
            .field("config", &self.config)
            .field("was_speech", &self.was_speech)
            .field("speech_samples", &self.speech_samples)
            .field("pre_speech_samples", &self.pre_speech_samples)
            .field("post_speech_samples", &self.post_speech_samples)
            .field("stopped", &self.stopped)
            .finish_non_exhaustive()
    }
}

impl SpeechSegmenter {
    pub fn new(
        config: SegmenterConfig,
        classifier: Box<dyn FrameClassifier>,
    ) -> Result<Self, ConfigError> {
        Self::with_clock(config, classifier, real_clock())
    }

    /// Construct with an injected clock; snapshot cadence and clip
    /// timestamps are derived from it.
    pub fn with_clock(
        config: SegmenterConfig,
        classifier: Box<dyn FrameClassifier>,
        clock: SharedClock,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        if classifier.required_frame_size() != config.frame_size_samples {
            return Err(ConfigError::FrameSizeMismatch {
                engine: config.frame_size_samples,
                classifier: classifier.required_frame_size(),
            });
        }
        if classifier.required_sample_rate() != config.sample_rate_hz {
            return Err(ConfigError::SampleRateMismatch {
                engine: config.sample_rate_hz,
                classifier: classifier.required_sample_rate(),
            });
        }

        let now = clock.now();
        Ok(Self {
            buffer: SampleBuffer::new(config.max_clip_samples()),
            chunker: FrameChunker::new(config.frame_size_samples),
            classifier,
            was_speech: false,
            speech_samples: 0,
            pre_speech_samples: 0,
            post_speech_samples: 0,
            clock,
            epoch: now,
            last_snapshot: now,
            stopped: false,
            config,
        })
    }

    /// Feed a chunk of samples of any length. Returns the events produced by
    /// every frame the chunk completed, in order.
    ///
    /// A classifier failure aborts the call; the failing frame is not
    /// committed to any counter or to the buffer.
    pub fn process(&mut self, chunk: &[f32]) -> Result<Vec<SpeechEvent>, PipelineError> {
        if self.stopped {
            return Err(PipelineError::Fatal(
                "segmenter already stopped".to_string(),
            ));
        }

        self.chunker.enqueue(chunk);

        let mut events = Vec::new();
        while let Some(frame) = self.chunker.dequeue() {
            self.process_frame(&frame, &mut events)?;
        }
        Ok(events)
    }

    /// Flush accumulated state, finalizing any pending clip even though the
    /// silence threshold was not met. Idempotent; the engine accepts no
    /// further input afterwards.
    pub fn stop(&mut self) -> Vec<SpeechEvent> {
        let mut events = Vec::new();
        if self.stopped {
            return events;
        }
        self.stopped = true;

        if self.chunker.partial_len() > 0 {
            tracing::debug!(
                "Discarding {} unclassified samples at stop",
                self.chunker.partial_len()
            );
        }
        self.chunker.clear();

        if self.was_speech {
            events.push(SpeechEvent::SpeechEnd);
            self.was_speech = false;
        }
        self.finalize(&mut events);
        events
    }

    /// Whether the engine currently considers the stream to be in speech.
    pub fn in_speech(&self) -> bool {
        self.was_speech
    }

    fn process_frame(
        &mut self,
        frame: &[f32],
        events: &mut Vec<SpeechEvent>,
    ) -> Result<(), PipelineError> {
        let is_speech = self
            .classifier
            .classify(frame, self.was_speech)
            .map_err(PipelineError::Classifier)?;

        // Idle silence: only the pre-speech pad allowance accumulates.
        if !self.was_speech && !is_speech && self.speech_samples == 0 {
            self.buffer.write(frame);
            self.pre_speech_samples += frame.len();
            return Ok(());
        }

        // No clip may exceed the ceiling once leading pad is included; split
        // before this frame is written so the invariant holds.
        if self.config.pad_samples() + self.speech_samples + frame.len()
            > self.config.max_clip_samples()
        {
            self.finalize(events);
        }

        self.buffer.write(frame);

        if is_speech {
            if !self.was_speech {
                events.push(SpeechEvent::SpeechStart);
                self.was_speech = true;
            }
            // A pause shorter than the close threshold just ended; it
            // belongs to the clip.
            self.speech_samples += self.post_speech_samples + frame.len();
            self.post_speech_samples = 0;

            self.maybe_snapshot(events);
            return Ok(());
        }

        // Silence after speech.
        if self.was_speech {
            events.push(SpeechEvent::SpeechEnd);
            self.was_speech = false;
        }
        self.post_speech_samples += frame.len();

        if self.post_speech_samples >= self.config.min_silence_samples() {
            self.finalize(events);
        }
        Ok(())
    }

    /// Emit a non-destructive `SpeechActive` window over the in-progress
    /// clip when the snapshot interval has elapsed. Counters are untouched.
    fn maybe_snapshot(&mut self, events: &mut Vec<SpeechEvent>) {
        if self.speech_samples < self.config.min_speech_samples() {
            return;
        }

        let now = self.clock.now();
        if now.duration_since(self.last_snapshot) < self.config.active_interval() {
            return;
        }

        // Post-speech is always zero here: snapshots are only taken on
        // speech frames, after any pause has been folded back in.
        let lead = self.pre_speech_samples.min(self.config.pad_samples());
        let pick = (lead + self.speech_samples).min(self.buffer.len());

        let samples = self
            .buffer
            .read_range(self.buffer.len() - pick, self.buffer.len());
        let end_time_ms = self.now_ms(now);
        let start_time_ms = end_time_ms - samples.len() as f64 / self.config.samples_per_ms();

        events.push(SpeechEvent::SpeechActive(SpeechClip {
            start_time_ms,
            end_time_ms,
            samples,
            sample_rate: self.config.sample_rate_hz,
        }));
        self.last_snapshot = now;
    }

    /// Close the current clip: discard it if too short, otherwise trim the
    /// tail silence beyond the pad allowance, slice the padded window out of
    /// the buffer, and emit `SpeechAvailable`. Resets the run state either
    /// way. `was_speech` is deliberately left alone so a ceiling-forced
    /// split mid-speech continues the utterance without a second
    /// `SpeechStart`.
    fn finalize(&mut self, events: &mut Vec<SpeechEvent>) {
        if self.speech_samples < self.config.min_speech_samples() {
            if self.speech_samples > 0 {
                tracing::debug!(
                    "Discarding speech run of {} samples (below minimum {})",
                    self.speech_samples,
                    self.config.min_speech_samples()
                );
            }
            self.reset();
            return;
        }

        let pad = self.config.pad_samples();
        let drop_samples = self.post_speech_samples.saturating_sub(pad);
        let pick = (self.pre_speech_samples.min(pad)
            + self.speech_samples
            + self.post_speech_samples.min(pad))
        .min(self.buffer.len());

        let end_index = self.buffer.len() - drop_samples;
        let start_index = end_index.saturating_sub(pick);
        let samples = self.buffer.read_range(start_index, end_index);

        // Walk back from now by sample arithmetic so the timestamps bracket
        // exactly the picked window.
        let now_ms = self.now_ms(self.clock.now());
        let end_time_ms = now_ms - drop_samples as f64 / self.config.samples_per_ms();
        let start_time_ms = end_time_ms - samples.len() as f64 / self.config.samples_per_ms();

        tracing::trace!(
            "Finalized clip: {} samples, {:.1}..{:.1} ms",
            samples.len(),
            start_time_ms,
            end_time_ms
        );

        events.push(SpeechEvent::SpeechAvailable(SpeechClip {
            start_time_ms,
            end_time_ms,
            samples,
            sample_rate: self.config.sample_rate_hz,
        }));
        self.reset();
    }

    fn reset(&mut self) {
        self.buffer.clear();
        self.speech_samples = 0;
        self.pre_speech_samples = 0;
        self.post_speech_samples = 0;
        self.last_snapshot = self.clock.now();
    }

    fn now_ms(&self, now: Instant) -> f64 {
        now.duration_since(self.epoch).as_secs_f64() * 1000.0
    }
}
