use glam::Vec2;
use tarot_engine::RenderLayer;

use super::{Painter, FONT_SIZE};
use crate::layout::X_MIDDLE;
use crate::session::Session;
use crate::sound::Sfx;
use crate::stage::Stage;

/// Any click leaves the title screen.
pub fn click(session: &mut Session, _p: Vec2) {
    if session.go_to(Stage::Outside) {
        session.cue(Sfx::Button);
    }
}

pub fn draw(_session: &Session, painter: &mut Painter) {
    painter.backdrop(painter.textures.title);
    painter.text(
        "prompt",
        "Click anywhere to begin",
        Vec2::new(X_MIDDLE, 120.0),
        FONT_SIZE * 1.4,
        RenderLayer::Text,
    );
}
