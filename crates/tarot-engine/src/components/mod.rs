pub mod entity;
pub mod label;
pub mod layer;
pub mod sprite;
