pub mod config;
pub mod events;
pub mod segmenter;
pub mod session;

pub use config::SegmenterConfig;
pub use events::{SpeechClip, SpeechEvent};
pub use segmenter::SpeechSegmenter;
pub use session::{SegmentSession, SessionHandle};
