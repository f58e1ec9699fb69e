// extensions/mod.rs
//
// Time-driven animation helpers. Decoupled from Entity/Scene: callers read
// the values and write them into whatever they draw.

pub mod easing;
pub mod timer;

pub use easing::{Easing, lerp, ease};
pub use timer::{PhaseTimer, Fade};
