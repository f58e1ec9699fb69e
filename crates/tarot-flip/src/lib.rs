//! Daily card video renderer.
//!
//! `CardFlipAnimator` plays the flip timeline as an engine `Game`;
//! `record` steps it at a fixed frame rate and hands every frame to a
//! `FrameSink`.

pub mod animator;
pub mod config;
pub mod record;
pub mod sink;

pub use animator::{daily_card, face_for_angle, CardFlipAnimator, FlipAssets, Phase, Side};
pub use config::{ConfigError, FlipConfig};
pub use record::{record, RecordError, RecordSummary};
pub use sink::{Frame, FrameSink, JsonLinesSink, MemorySink, RawFrameSink, SinkError};
