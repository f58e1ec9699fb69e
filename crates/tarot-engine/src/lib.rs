pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod input;
pub mod assets;
pub mod extensions;
pub mod runner;

// Re-export key types at crate root for convenience
pub use api::game::{Game, GameConfig, EngineContext, RenderContext};
pub use api::types::{EntityId, SoundEvent, GameEvent};
pub use components::entity::Entity;
pub use components::layer::RenderLayer;
pub use components::sprite::{SpriteComponent, TextureId};
pub use components::label::{LabelComponent, TextAlign};
pub use core::scene::Scene;
pub use core::time::FixedTimestep;
pub use core::rng::Rng;
pub use core::task::BackgroundTask;
pub use renderer::instance::{RenderInstance, RenderBuffer, TextInstance};
pub use renderer::viewport::Letterbox;
pub use input::queue::{InputEvent, InputQueue};
pub use assets::manifest::{AssetManifest, AssetError};
pub use systems::typewriter::{Typewriter, TextMeasure, GlyphMetrics, wrap_paragraphs};
pub use runner::GameRunner;

// Extensions: decoupled optional systems
pub use extensions::{Easing, lerp, ease, PhaseTimer, Fade};
