use glam::Vec2;
use tarot_engine::RenderLayer;

use super::outside::draw_connection_popup;
use super::{Painter, FONT_SIZE};
use crate::layout::{HoverTarget, EXIT_BUTTON, MIDDLE_BUTTON, X_MIDDLE};
use crate::session::{Command, Session};
use crate::sound::Sfx;

const BAR_LEFT: f32 = 100.0;
const BAR_WIDTH: f32 = 1080.0;
const BAR_Y: f32 = 330.0;
const BAR_HEIGHT: f32 = 60.0;

/// Only the connection popup is interactive while loading.
pub fn click(session: &mut Session, p: Vec2) {
    if !session.connection_popup {
        return;
    }
    if MIDDLE_BUTTON.contains(p) {
        session.cue(Sfx::Button);
        session.start_loading();
    } else if EXIT_BUTTON.contains(p) {
        session.cue(Sfx::Button);
        session.command(Command::Quit);
    }
}

pub fn hover(session: &mut Session, p: Vec2) {
    if !session.connection_popup {
        return;
    }
    if MIDDLE_BUTTON.contains(p) {
        session.hover = Some(HoverTarget::Retry);
    } else if EXIT_BUTTON.contains(p) {
        session.hover = Some(HoverTarget::ExitGame);
    }
}

pub fn draw(session: &Session, painter: &mut Painter) {
    painter.backdrop(painter.textures.tablecloth);
    painter.sprite(
        "loading_frame",
        painter.textures.loading[session.loading_frame % painter.textures.loading.len()],
        Vec2::new(X_MIDDLE, 620.0),
        Vec2::new(400.0, 400.0),
        RenderLayer::Objects,
    );
    painter.text(
        "loading_text",
        "The spirits are stirring...",
        Vec2::new(X_MIDDLE, 420.0),
        FONT_SIZE * 1.4,
        RenderLayer::Text,
    );

    painter.sprite(
        "progress_bar",
        painter.textures.progress_bar,
        Vec2::new(BAR_LEFT + BAR_WIDTH / 2.0, BAR_Y),
        Vec2::new(BAR_WIDTH, BAR_HEIGHT),
        RenderLayer::Objects,
    );
    let fill = BAR_WIDTH * session.loading_progress.clamp(0.0, 1.0);
    if fill > 0.0 {
        painter.sprite(
            "progress_fill",
            painter.textures.progress_fill,
            Vec2::new(BAR_LEFT + fill / 2.0, BAR_Y),
            Vec2::new(fill, BAR_HEIGHT * 0.8),
            RenderLayer::Objects,
        );
    }

    if session.connection_popup {
        draw_connection_popup(painter);
        painter.button_sized(
            HoverTarget::ExitGame,
            "Exit",
            EXIT_BUTTON.center(),
            EXIT_BUTTON.max - EXIT_BUTTON.min,
            RenderLayer::Popup,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::Connectivity;
    use crate::stage::Stage;
    use tarot_engine::Rng;

    fn offline_loading() -> Session {
        let mut s = Session::new(Rng::new(30));
        s.stage = Stage::Intro;
        s.set_intention(2);
        for _ in 0..3 {
            s.select_card(0);
            s.dismiss_reveal();
        }
        assert_eq!(s.stage, Stage::Loading);
        s.take_commands();
        s.connection_lost(Connectivity { internet: false, backend: false });
        s
    }

    #[test]
    fn clicks_ignored_without_popup() {
        let mut s = offline_loading();
        s.connection_popup = false;
        click(&mut s, MIDDLE_BUTTON.center());
        assert!(s.take_commands().is_empty());
    }

    #[test]
    fn retry_refetches_in_place() {
        let mut s = offline_loading();
        s.loading_progress = 0.6;
        click(&mut s, MIDDLE_BUTTON.center());
        assert_eq!(s.stage, Stage::Loading);
        assert!(!s.connection_popup);
        assert_eq!(s.loading_progress, 0.0);
        assert!(matches!(s.take_commands().as_slice(), [Command::FetchReading(_)]));
    }

    #[test]
    fn exit_from_popup_quits() {
        let mut s = offline_loading();
        click(&mut s, EXIT_BUTTON.center());
        assert_eq!(s.take_commands(), vec![Command::Quit]);
    }
}
