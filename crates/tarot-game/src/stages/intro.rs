//! Mama Nyah's welcome and the choice of intention.

use glam::Vec2;
use tarot_engine::RenderLayer;

use super::Painter;
use crate::layout::{category_at, HoverTarget, BUTTON_SIZE, CATEGORY_CENTERS, X_MIDDLE};
use crate::session::{Session, CATEGORIES};

const TEXT_TOP: f32 = 900.0;

pub fn click(session: &mut Session, p: Vec2) {
    if let Some(category) = category_at(p) {
        session.set_intention(category);
    }
}

pub fn hover(session: &mut Session, p: Vec2) {
    session.hover = category_at(p).map(HoverTarget::Category);
}

pub fn draw(session: &Session, painter: &mut Painter) {
    painter.backdrop(painter.textures.tablecloth);
    painter.typed_lines(&session.typing, X_MIDDLE, TEXT_TOP, RenderLayer::Text);
    for (i, (center, name)) in CATEGORY_CENTERS.iter().zip(CATEGORIES).enumerate() {
        painter.button_sized(HoverTarget::Category(i), name, *center, BUTTON_SIZE * 0.8, RenderLayer::Objects);
    }
}
