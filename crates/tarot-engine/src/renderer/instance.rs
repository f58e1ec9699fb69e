use bytemuck::{Pod, Zeroable};
use serde::Serialize;

use crate::components::label::TextAlign;

/// Per-instance sprite data handed to the host renderer or a frame sink.
/// Fixed layout: 8 floats = 32 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable, Serialize)]
pub struct RenderInstance {
    /// Center X in canvas space.
    pub x: f32,
    /// Center Y in canvas space.
    pub y: f32,
    /// Rotation in radians.
    pub rotation: f32,
    /// Rendered width in canvas units.
    pub width: f32,
    /// Rendered height in canvas units.
    pub height: f32,
    /// Texture id (from the asset manifest).
    pub texture: f32,
    /// Opacity (0.0 = invisible, 1.0 = opaque).
    pub alpha: f32,
    /// Render layer as a float, for hosts that sort on the GPU side.
    pub layer: f32,
}

impl RenderInstance {
    pub const FLOATS: usize = 8;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// A line of text to be drawn by the host's font renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextInstance {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub alpha: f32,
    pub align: TextAlign,
    pub layer: u8,
    pub text: String,
}

/// Everything drawn in one frame: sprites back-to-front, then text.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RenderBuffer {
    pub instances: Vec<RenderInstance>,
    pub labels: Vec<TextInstance>,
}

impl RenderBuffer {
    pub fn new() -> Self {
        Self::with_capacity(512)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            instances: Vec::with_capacity(capacity),
            labels: Vec::with_capacity(64),
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
        self.labels.clear();
    }

    pub fn push(&mut self, instance: RenderInstance) {
        self.instances.push(instance);
    }

    pub fn push_label(&mut self, label: TextInstance) {
        self.labels.push(label);
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    /// Sprite instances as raw bytes, `STRIDE_BYTES` per instance.
    pub fn instance_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.instances)
    }

    /// Find a label by exact text. Handy for hosts and tests.
    pub fn label(&self, text: &str) -> Option<&TextInstance> {
        self.labels.iter().find(|l| l.text == text)
    }
}
