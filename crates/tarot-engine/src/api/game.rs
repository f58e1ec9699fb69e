use glam::Vec2;
use serde::Deserialize;

use crate::core::scene::Scene;
use crate::api::types::{EntityId, SoundEvent, GameEvent};
use crate::components::entity::Entity;
use crate::components::label::LabelComponent;
use crate::components::layer::RenderLayer;
use crate::components::sprite::SpriteComponent;
use crate::input::queue::InputQueue;
use crate::renderer::instance::RenderBuffer;

/// Configuration for the engine, provided by the game.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Fixed timestep in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// Logical canvas width. Input and layout use this space.
    pub canvas_width: f32,
    /// Logical canvas height.
    pub canvas_height: f32,
    /// Maximum number of fixed steps run for one frame (default: 10).
    pub max_steps: u32,
    /// Maximum number of render instances (default: 512).
    pub max_instances: usize,
    /// Maximum number of sound events per frame (default: 32).
    pub max_sounds: usize,
    /// Maximum number of game events per frame (default: 32).
    pub max_events: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            canvas_width: 1280.0,
            canvas_height: 960.0,
            max_steps: 10,
            max_instances: 512,
            max_sounds: 32,
            max_events: 32,
        }
    }
}

impl GameConfig {
    /// Parse a config from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// The core contract every game must fulfill.
pub trait Game {
    /// Return engine configuration. Called once before init.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Setup initial state, spawn entities, configure the scene.
    fn init(&mut self, ctx: &mut EngineContext);

    /// One fixed tick: handle input, advance timers, rebuild the scene.
    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue);

    /// Optional read-only render pass for custom render commands.
    fn render(&self, _ctx: &mut RenderContext) {}
}

/// Mutable access to engine state, passed to Game::init and Game::update.
pub struct EngineContext {
    pub scene: Scene,
    pub sounds: Vec<SoundEvent>,
    pub events: Vec<GameEvent>,
    /// Fixed step length of the tick currently running.
    pub dt: f32,
    next_id: u32,
}

impl EngineContext {
    pub fn new() -> Self {
        Self {
            scene: Scene::new(),
            sounds: Vec::new(),
            events: Vec::new(),
            dt: 1.0 / 60.0,
            next_id: 1,
        }
    }

    /// Generate the next unique entity ID.
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Emit a sound cue to be forwarded to the host.
    pub fn emit_sound(&mut self, event: SoundEvent) {
        self.sounds.push(event);
    }

    /// Emit a game event to be forwarded to the host.
    pub fn emit_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Spawn a sprite entity centered at `pos` with rendered `size`.
    pub fn spawn_sprite(
        &mut self,
        tag: &str,
        pos: Vec2,
        size: Vec2,
        sprite: SpriteComponent,
        layer: RenderLayer,
    ) -> EntityId {
        let id = self.next_id();
        self.scene.spawn(
            Entity::new(id)
                .with_tag(tag)
                .with_pos(pos)
                .with_scale(size)
                .with_layer(layer)
                .with_sprite(sprite),
        );
        id
    }

    /// Spawn a text entity anchored at `pos`.
    pub fn spawn_label(
        &mut self,
        tag: &str,
        pos: Vec2,
        label: LabelComponent,
        layer: RenderLayer,
    ) -> EntityId {
        let id = self.next_id();
        self.scene.spawn(
            Entity::new(id)
                .with_tag(tag)
                .with_pos(pos)
                .with_layer(layer)
                .with_label(label),
        );
        id
    }

    /// Clear per-frame transient data (sounds, events).
    pub fn clear_frame_data(&mut self) {
        self.sounds.clear();
        self.events.clear();
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Render context for optional custom render commands.
pub struct RenderContext<'a> {
    pub render_buffer: &'a mut RenderBuffer,
}
