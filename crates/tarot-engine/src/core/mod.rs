pub mod rng;
pub mod scene;
pub mod task;
pub mod time;
