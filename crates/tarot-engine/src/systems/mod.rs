pub mod render;
pub mod typewriter;
