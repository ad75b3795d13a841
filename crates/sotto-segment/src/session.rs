use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use sotto_foundation::{real_clock, PipelineError, SharedClock};
use sotto_vad::FrameClassifier;

use crate::config::SegmenterConfig;
use crate::events::SpeechEvent;
use crate::segmenter::SpeechSegmenter;

/// Chunk inlet depth. One chunk may queue while another is being processed;
/// anything more would let a fast producer run ahead of classification.
const INLET_DEPTH: usize = 1;

const EVENT_CHANNEL_DEPTH: usize = 32;

enum SessionCommand {
    Process(Vec<f32>),
    Stop,
}

/// A running segmentation session.
///
/// Each session owns one engine inside a dedicated worker task; the bounded
/// command inlet serializes `process`/`stop` per instance. Independent
/// sessions may run concurrently.
pub struct SegmentSession;

impl SegmentSession {
    pub fn start(
        config: SegmenterConfig,
        classifier: Box<dyn FrameClassifier>,
    ) -> Result<(SessionHandle, mpsc::Receiver<SpeechEvent>), PipelineError> {
        Self::start_with_clock(config, classifier, real_clock())
    }

    pub fn start_with_clock(
        config: SegmenterConfig,
        classifier: Box<dyn FrameClassifier>,
        clock: SharedClock,
    ) -> Result<(SessionHandle, mpsc::Receiver<SpeechEvent>), PipelineError> {
        let mut segmenter = SpeechSegmenter::with_clock(config, classifier, clock)?;

        let (cmd_tx, mut cmd_rx) = mpsc::channel::<SessionCommand>(INLET_DEPTH);
        let (event_tx, event_rx) = mpsc::channel::<SpeechEvent>(EVENT_CHANNEL_DEPTH);

        let join = tokio::spawn(async move {
            info!("Segment session started");

            let mut chunks_processed = 0u64;
            let mut events_forwarded = 0u64;

            while let Some(cmd) = cmd_rx.recv().await {
                match cmd {
                    SessionCommand::Process(chunk) => {
                        match segmenter.process(&chunk) {
                            Ok(events) => {
                                events_forwarded += events.len() as u64;
                                forward(&event_tx, events).await;
                            }
                            Err(e) => {
                                // The failed frame was never committed; the
                                // stream itself can continue.
                                error!("Segmenter error: {}", e);
                            }
                        }
                        chunks_processed += 1;

                        if chunks_processed % 1000 == 0 {
                            debug!(
                                "Session: {} chunks processed, {} events forwarded, in_speech: {}",
                                chunks_processed,
                                events_forwarded,
                                segmenter.in_speech()
                            );
                        }
                    }
                    SessionCommand::Stop => break,
                }
            }

            // Stop requested or every handle dropped: flush pending state.
            let events = segmenter.stop();
            forward(&event_tx, events).await;

            info!(
                "Segment session stopped. Chunks processed: {}, events forwarded: {}",
                chunks_processed, events_forwarded
            );
        });

        Ok((SessionHandle { cmd_tx, join }, event_rx))
    }
}

async fn forward(event_tx: &mpsc::Sender<SpeechEvent>, events: Vec<SpeechEvent>) {
    for event in events {
        if event_tx.send(event).await.is_err() {
            warn!("No active listener for speech events");
            return;
        }
    }
}

/// Control surface for one session. Dropping the handle without calling
/// `stop` still flushes: the worker finalizes when the inlet closes.
pub struct SessionHandle {
    cmd_tx: mpsc::Sender<SessionCommand>,
    join: JoinHandle<()>,
}

impl SessionHandle {
    /// Submit a chunk of samples. Applies backpressure once the inlet is
    /// full; errors only if the session is gone.
    pub async fn process(&self, chunk: Vec<f32>) -> Result<(), PipelineError> {
        self.cmd_tx
            .send(SessionCommand::Process(chunk))
            .await
            .map_err(|_| PipelineError::SessionClosed)
    }

    /// Flush and finalize the session, waiting for the worker to drain.
    pub async fn stop(self) -> Result<(), PipelineError> {
        let _ = self.cmd_tx.send(SessionCommand::Stop).await;
        self.join
            .await
            .map_err(|e| PipelineError::Fatal(format!("session task failed: {e}")))
    }
}
