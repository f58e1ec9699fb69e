//! Destinations for recorded frames.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use tarot_engine::{RenderBuffer, RenderInstance, SoundEvent};

#[derive(thiserror::Error, Debug)]
pub enum SinkError {
    #[error("frame sink I/O: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode frame: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Everything drawn and heard in one frame.
#[derive(Debug, Clone, Serialize)]
pub struct Frame {
    pub index: u64,
    /// Seconds since the start of the recording.
    pub time: f32,
    pub buffer: RenderBuffer,
    pub sounds: Vec<SoundEvent>,
}

pub trait FrameSink {
    fn submit_frame(&mut self, frame: &Frame) -> Result<(), SinkError>;

    /// Flush anything buffered. Called once after the last frame.
    fn finish(&mut self) -> Result<(), SinkError> {
        Ok(())
    }
}

/// One JSON object per line.
pub struct JsonLinesSink<W: Write> {
    writer: BufWriter<W>,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: BufWriter::new(writer),
        }
    }
}

impl JsonLinesSink<File> {
    pub fn create(path: impl AsRef<Path>) -> Result<Self, SinkError> {
        Ok(Self::new(File::create(path)?))
    }
}

impl<W: Write> FrameSink for JsonLinesSink<W> {
    fn submit_frame(&mut self, frame: &Frame) -> Result<(), SinkError> {
        serde_json::to_writer(&mut self.writer, frame)?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }

    fn finish(&mut self) -> Result<(), SinkError> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Sprite instances only, as raw bytes: per frame a little-endian `u32`
/// count followed by `count * RenderInstance::STRIDE_BYTES` bytes.
pub struct RawFrameSink<W: Write> {
    writer: BufWriter<W>,
}

impl<W: Write> RawFrameSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: BufWriter::new(writer),
        }
    }
}

impl RawFrameSink<File> {
    pub fn create(path: impl AsRef<Path>) -> Result<Self, SinkError> {
        Ok(Self::new(File::create(path)?))
    }
}

impl<W: Write> FrameSink for RawFrameSink<W> {
    fn submit_frame(&mut self, frame: &Frame) -> Result<(), SinkError> {
        let instances: &[RenderInstance] = &frame.buffer.instances;
        self.writer.write_all(&(instances.len() as u32).to_le_bytes())?;
        self.writer.write_all(bytemuck::cast_slice(instances))?;
        Ok(())
    }

    fn finish(&mut self) -> Result<(), SinkError> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Keeps every frame. For tests and previews.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub frames: Vec<Frame>,
    pub finished: bool,
}

impl FrameSink for MemorySink {
    fn submit_frame(&mut self, frame: &Frame) -> Result<(), SinkError> {
        self.frames.push(frame.clone());
        Ok(())
    }

    fn finish(&mut self) -> Result<(), SinkError> {
        self.finished = true;
        Ok(())
    }
}
