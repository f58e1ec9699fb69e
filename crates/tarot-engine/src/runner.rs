use crate::api::game::{EngineContext, Game, GameConfig, RenderContext};
use crate::api::types::{GameEvent, SoundEvent};
use crate::core::time::FixedTimestep;
use crate::input::queue::{InputEvent, InputQueue};
use crate::renderer::instance::RenderBuffer;
use crate::renderer::viewport::Letterbox;
use crate::systems::render::build_render_buffer;

/// Generic game runner that wires up the engine loop.
///
/// The host window calls `resize`, forwards pointer events in window
/// coordinates, and calls `tick` once per displayed frame. After each tick
/// the frame's render buffer, sound cues and game events can be read back.
pub struct GameRunner<G: Game> {
    game: G,
    ctx: EngineContext,
    input: InputQueue,
    render_buffer: RenderBuffer,
    timestep: FixedTimestep,
    config: GameConfig,
    viewport: Letterbox,
    initialized: bool,
}

impl<G: Game> GameRunner<G> {
    pub fn new(game: G) -> Self {
        let config = game.config();
        let timestep = FixedTimestep::with_max_steps(config.fixed_dt, config.max_steps);
        let viewport = Letterbox::new(config.canvas_width, config.canvas_height);
        let render_buffer = RenderBuffer::with_capacity(config.max_instances);

        Self {
            game,
            ctx: EngineContext::new(),
            input: InputQueue::new(),
            render_buffer,
            timestep,
            viewport,
            config,
            initialized: false,
        }
    }

    /// Initialize the game. Call once after construction.
    pub fn init(&mut self) {
        self.ctx.dt = self.config.fixed_dt;
        self.game.init(&mut self.ctx);
        self.rebuild_render_buffer();
        self.initialized = true;
        log::info!(
            "Game initialized ({}x{} canvas, dt {:.4})",
            self.config.canvas_width,
            self.config.canvas_height,
            self.config.fixed_dt
        );
    }

    /// The host window changed size.
    pub fn resize(&mut self, window_width: f32, window_height: f32) {
        self.viewport.resize(window_width, window_height);
    }

    /// Push an event already in canvas coordinates.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// A click at window coordinates. Clicks on the letterbox bars are dropped.
    pub fn pointer_down(&mut self, window_x: f32, window_y: f32) {
        if let Some(p) = self.viewport.to_canvas(window_x, window_y) {
            self.input.push(InputEvent::PointerDown { x: p.x, y: p.y });
        }
    }

    /// Cursor motion at window coordinates.
    pub fn pointer_move(&mut self, window_x: f32, window_y: f32) {
        if let Some(p) = self.viewport.to_canvas(window_x, window_y) {
            self.input.push(InputEvent::PointerMove { x: p.x, y: p.y });
        }
    }

    /// Run one frame: fixed update steps, then rebuild the render buffer.
    pub fn tick(&mut self, dt: f32) {
        if !self.initialized {
            return;
        }

        self.ctx.clear_frame_data();

        let steps = self.timestep.accumulate(dt);
        for step in 0..steps {
            self.ctx.dt = self.timestep.dt();
            if step == 0 {
                self.game.update(&mut self.ctx, &self.input);
            } else {
                // Input is delivered once per frame, not once per step.
                self.game.update(&mut self.ctx, &InputQueue::new());
            }
        }
        if steps > 0 {
            self.input.drain();
        }

        self.rebuild_render_buffer();

        self.ctx.sounds.truncate(self.config.max_sounds);
        self.ctx.events.truncate(self.config.max_events);
    }

    fn rebuild_render_buffer(&mut self) {
        build_render_buffer(self.ctx.scene.iter(), &mut self.render_buffer);
        let mut render_ctx = RenderContext {
            render_buffer: &mut self.render_buffer,
        };
        self.game.render(&mut render_ctx);
        self.render_buffer.instances.truncate(self.config.max_instances);
    }

    pub fn render_buffer(&self) -> &RenderBuffer {
        &self.render_buffer
    }

    pub fn sounds(&self) -> &[SoundEvent] {
        &self.ctx.sounds
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.ctx.events
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut G {
        &mut self.game
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn viewport(&self) -> &Letterbox {
        &self.viewport
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::label::LabelComponent;
    use crate::components::layer::RenderLayer;
    use glam::Vec2;

    /// Counts clicks and shows the count as a label.
    struct Counter {
        clicks: u32,
        updates: u32,
    }

    impl Game for Counter {
        fn init(&mut self, _ctx: &mut EngineContext) {}

        fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
            self.updates += 1;
            for event in input.iter() {
                if let InputEvent::PointerDown { .. } = event {
                    self.clicks += 1;
                    ctx.emit_sound(SoundEvent(1));
                }
            }
            ctx.scene.clear();
            ctx.spawn_label(
                "count",
                Vec2::new(640.0, 480.0),
                LabelComponent::new(self.clicks.to_string(), 32.0),
                RenderLayer::Text,
            );
        }
    }

    fn runner() -> GameRunner<Counter> {
        let mut runner = GameRunner::new(Counter { clicks: 0, updates: 0 });
        runner.init();
        runner
    }

    #[test]
    fn tick_runs_fixed_steps() {
        let mut runner = runner();
        runner.tick(1.0 / 60.0);
        runner.tick(1.0 / 60.0);
        assert_eq!(runner.game().updates, 2);
    }

    #[test]
    fn clicks_are_delivered_once_per_frame() {
        let mut runner = runner();
        runner.pointer_down(640.0, 480.0);
        runner.tick(3.0 / 60.0);
        assert_eq!(runner.game().clicks, 1);
        assert_eq!(runner.sounds(), &[SoundEvent(1)]);
        assert!(runner.render_buffer().label("1").is_some());

        runner.tick(1.0 / 60.0);
        assert_eq!(runner.game().clicks, 1);
        assert!(runner.sounds().is_empty());
    }

    #[test]
    fn clicks_on_letterbox_bars_are_dropped() {
        let mut runner = runner();
        runner.resize(1920.0, 960.0);
        runner.pointer_down(50.0, 480.0);
        runner.tick(1.0 / 60.0);
        assert_eq!(runner.game().clicks, 0);
    }

    #[test]
    fn input_waits_for_a_full_step() {
        let mut runner = runner();
        runner.pointer_down(640.0, 480.0);
        runner.tick(0.001);
        assert_eq!(runner.game().clicks, 0);
        runner.tick(1.0 / 60.0);
        assert_eq!(runner.game().clicks, 1);
    }
}
