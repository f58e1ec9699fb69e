//! Options and credits panels. While open they take all input.

use glam::Vec2;
use tarot_engine::RenderLayer;

use super::{Painter, FONT_SIZE};
use crate::layout::{
    HoverTarget, Rect, MENU_CLOSE, MENU_MUSIC_DOWN, MENU_MUSIC_TOGGLE, MENU_MUSIC_UP, MENU_SFX_DOWN,
    MENU_SFX_TOGGLE, MENU_SFX_UP, X_MIDDLE,
};
use crate::session::{Overlay, Session};
use crate::sound::Sfx;

const OPTIONS_ROWS: [(Rect, HoverTarget); 7] = [
    (MENU_MUSIC_TOGGLE, HoverTarget::MusicToggle),
    (MENU_MUSIC_DOWN, HoverTarget::MusicDown),
    (MENU_MUSIC_UP, HoverTarget::MusicUp),
    (MENU_SFX_TOGGLE, HoverTarget::SfxToggle),
    (MENU_SFX_DOWN, HoverTarget::SfxDown),
    (MENU_SFX_UP, HoverTarget::SfxUp),
    (MENU_CLOSE, HoverTarget::CloseMenu),
];

pub const CREDITS: [&str; 4] = [
    "Mama Nyah's Tarot",
    "Readings channelled by the spirits of the French Quarter",
    "Art, sound and code by the Mama Nyah team",
    "Thank you for visiting",
];

fn target_at(overlay: Overlay, p: Vec2) -> Option<HoverTarget> {
    match overlay {
        Overlay::Options => OPTIONS_ROWS.iter().find(|(r, _)| r.contains(p)).map(|(_, t)| *t),
        Overlay::Credits => MENU_CLOSE.contains(p).then_some(HoverTarget::CloseMenu),
    }
}

pub fn click(session: &mut Session, overlay: Overlay, p: Vec2) {
    let Some(target) = target_at(overlay, p) else {
        return;
    };
    match target {
        HoverTarget::CloseMenu => {
            session.close_overlay();
            return;
        }
        HoverTarget::MusicToggle => session.sound.toggle_music(),
        HoverTarget::MusicDown => session.sound.step_music(-1.0),
        HoverTarget::MusicUp => session.sound.step_music(1.0),
        HoverTarget::SfxToggle => session.sound.toggle_sfx(),
        HoverTarget::SfxDown => session.sound.step_sfx(-1.0),
        HoverTarget::SfxUp => session.sound.step_sfx(1.0),
        _ => return,
    }
    log::debug!("Audio settings: {:?}", session.sound);
    session.cue(Sfx::Button);
}

pub fn hover(session: &mut Session, overlay: Overlay, p: Vec2) {
    session.hover = target_at(overlay, p);
}

fn on_off(enabled: bool) -> &'static str {
    if enabled {
        "On"
    } else {
        "Off"
    }
}

pub fn draw(session: &Session, overlay: Overlay, painter: &mut Painter) {
    painter.sprite(
        "menu",
        painter.textures.menu,
        Vec2::new(X_MIDDLE, 500.0),
        Vec2::new(560.0, 720.0),
        RenderLayer::Popup,
    );
    match overlay {
        Overlay::Options => {
            let sound = &session.sound;
            let rows = [
                (HoverTarget::MusicToggle, format!("Music: {}", on_off(sound.music_enabled)), MENU_MUSIC_TOGGLE),
                (HoverTarget::MusicDown, "-".to_string(), MENU_MUSIC_DOWN),
                (HoverTarget::MusicUp, "+".to_string(), MENU_MUSIC_UP),
                (HoverTarget::SfxToggle, format!("Sound: {}", on_off(sound.sfx_enabled)), MENU_SFX_TOGGLE),
                (HoverTarget::SfxDown, "-".to_string(), MENU_SFX_DOWN),
                (HoverTarget::SfxUp, "+".to_string(), MENU_SFX_UP),
            ];
            for (target, copy, rect) in rows {
                painter.button_sized(target, &copy, rect.center(), rect.max - rect.min, RenderLayer::Popup);
            }
            let volume = |v: f32| format!("{}%", (v * 100.0).round() as u32);
            painter.text("menu_text", &volume(sound.music_volume), MENU_MUSIC_DOWN.center().with_x(X_MIDDLE), FONT_SIZE, RenderLayer::PopupText);
            painter.text("menu_text", &volume(sound.sfx_volume), MENU_SFX_DOWN.center().with_x(X_MIDDLE), FONT_SIZE, RenderLayer::PopupText);
        }
        Overlay::Credits => {
            for (i, line) in CREDITS.iter().enumerate() {
                let pos = Vec2::new(X_MIDDLE, 720.0 - i as f32 * 80.0);
                painter.text("menu_text", line, pos, FONT_SIZE, RenderLayer::PopupText);
            }
        }
    }
    painter.button_sized(
        HoverTarget::CloseMenu,
        "Close",
        MENU_CLOSE.center(),
        MENU_CLOSE.max - MENU_CLOSE.min,
        RenderLayer::Popup,
    );
}
