use tarot_engine::GameRunner;

use crate::animator::CardFlipAnimator;
use crate::sink::{Frame, FrameSink, SinkError};

#[derive(thiserror::Error, Debug)]
pub enum RecordError {
    #[error(transparent)]
    Sink(#[from] SinkError),
    #[error("animation still running after {0} frames")]
    FrameLimit(u64),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecordSummary {
    pub frames: u64,
    pub seconds: f32,
}

/// Run the animation to completion at its fixed frame rate, handing every
/// frame to `sink`. Frame 0 is the scene `init` drew. A sink error stops
/// the run.
pub fn record(
    runner: &mut GameRunner<CardFlipAnimator>,
    sink: &mut dyn FrameSink,
    max_frames: u64,
) -> Result<RecordSummary, RecordError> {
    let dt = runner.config().fixed_dt;
    log::info!("Recording at {:.0} fps (limit {} frames)", 1.0 / dt, max_frames);

    if max_frames == 0 {
        return Err(RecordError::FrameLimit(max_frames));
    }
    sink.submit_frame(&current_frame(runner, 0, dt))?;

    let mut index = 1;
    while !runner.game().is_done() {
        if index >= max_frames {
            return Err(RecordError::FrameLimit(max_frames));
        }
        runner.tick(dt);
        sink.submit_frame(&current_frame(runner, index, dt))?;
        index += 1;
    }
    sink.finish()?;

    let summary = RecordSummary {
        frames: index,
        seconds: index as f32 * dt,
    };
    log::info!("Recorded {} frames ({:.1}s)", summary.frames, summary.seconds);
    Ok(summary)
}

fn current_frame(runner: &GameRunner<CardFlipAnimator>, index: u64, dt: f32) -> Frame {
    Frame {
        index,
        time: index as f32 * dt,
        buffer: runner.render_buffer().clone(),
        sounds: runner.sounds().to_vec(),
    }
}
