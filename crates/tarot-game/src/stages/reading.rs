//! The five reading screens: intro, one per card, and the summary.

use glam::Vec2;
use tarot_engine::RenderLayer;

use super::spread::{face_rotation, SLOT_LABELS};
use super::{Painter, FONT_SIZE};
use crate::layout::{
    HoverTarget, LARGE_CARD_SIZE, LEFT_BUTTON, MIDDLE_BUTTON, RIGHT_BUTTON, SPREAD_CARD_SIZE,
    SUMMARY_OUTSIDE_BUTTON, SUMMARY_PREVIOUS_BUTTON, X_LEFT, X_MIDDLE, X_RIGHT,
};
use crate::session::Session;
use crate::stage::Stage;

const TEXT_TOP: f32 = 560.0;
const CARD_TEXT_X: f32 = 850.0;
const CARD_TEXT_TOP: f32 = 800.0;
const ROW_Y: f32 = 780.0;

pub fn click(session: &mut Session, p: Vec2) {
    match session.stage {
        Stage::ReadingIntro => {
            if MIDDLE_BUTTON.contains(p) {
                session.advance_reading();
            }
        }
        Stage::ReadingSummary => {
            if MIDDLE_BUTTON.contains(p) {
                session.new_reading();
            } else if SUMMARY_PREVIOUS_BUTTON.contains(p) {
                session.previous_reading();
            } else if SUMMARY_OUTSIDE_BUTTON.contains(p) {
                session.go_outside();
            }
        }
        _ => {
            if RIGHT_BUTTON.contains(p) {
                session.advance_reading();
            } else if LEFT_BUTTON.contains(p) {
                session.previous_reading();
            }
        }
    }
}

pub fn hover(session: &mut Session, p: Vec2) {
    session.hover = match session.stage {
        Stage::ReadingIntro if MIDDLE_BUTTON.contains(p) => Some(HoverTarget::NextCard),
        Stage::ReadingSummary if MIDDLE_BUTTON.contains(p) => Some(HoverTarget::NewReading),
        Stage::ReadingSummary if SUMMARY_PREVIOUS_BUTTON.contains(p) => Some(HoverTarget::PreviousCard),
        Stage::ReadingSummary if SUMMARY_OUTSIDE_BUTTON.contains(p) => Some(HoverTarget::GoOutside),
        Stage::ReadingSummary | Stage::ReadingIntro => None,
        stage if RIGHT_BUTTON.contains(p) && stage.next_reading().is_some() => Some(HoverTarget::NextCard),
        stage if LEFT_BUTTON.contains(p) && stage.previous_reading().is_some() => Some(HoverTarget::PreviousCard),
        _ => None,
    };
}

pub fn draw(session: &Session, painter: &mut Painter) {
    painter.backdrop(painter.textures.tablecloth);
    match session.stage {
        Stage::ReadingIntro => {
            draw_card_row(session, painter);
            painter.typed_lines(&session.typing, X_MIDDLE, TEXT_TOP, RenderLayer::Text);
            painter.button(HoverTarget::NextCard, "Next", MIDDLE_BUTTON, RenderLayer::Objects);
        }
        Stage::ReadingSummary => {
            draw_card_row(session, painter);
            painter.typed_lines(&session.typing, X_MIDDLE, TEXT_TOP, RenderLayer::Text);
            painter.button(HoverTarget::PreviousCard, "Previous", SUMMARY_PREVIOUS_BUTTON, RenderLayer::Objects);
            painter.button(HoverTarget::NewReading, "New Reading", MIDDLE_BUTTON, RenderLayer::Objects);
            painter.button(HoverTarget::GoOutside, "Go Outside", SUMMARY_OUTSIDE_BUTTON, RenderLayer::Objects);
        }
        stage => {
            let Some(slot) = stage.card_slot() else {
                return;
            };
            draw_card_focus(session, slot, painter);
            painter.typed_lines(&session.typing, CARD_TEXT_X, CARD_TEXT_TOP, RenderLayer::Text);
            if stage.previous_reading().is_some() {
                painter.button(HoverTarget::PreviousCard, "Previous", LEFT_BUTTON, RenderLayer::Objects);
            }
            let next = if stage == Stage::ReadingCard3 { "Summary" } else { "Next" };
            painter.button(HoverTarget::NextCard, next, RIGHT_BUTTON, RenderLayer::Objects);
        }
    }
}

fn draw_card_row(session: &Session, painter: &mut Painter) {
    for ((card, x), label) in session.drawn.iter().zip([X_LEFT, X_MIDDLE, X_RIGHT]).zip(SLOT_LABELS) {
        let pos = Vec2::new(x, ROW_Y);
        painter.sprite_rotated(
            "drawn_card",
            painter.textures.card_face(card.id),
            pos,
            SPREAD_CARD_SIZE,
            face_rotation(card),
            RenderLayer::Objects,
        );
        painter.text("slot_label", label, pos + Vec2::new(0.0, 95.0), FONT_SIZE, RenderLayer::Text);
    }
}

fn draw_card_focus(session: &Session, slot: usize, painter: &mut Painter) {
    let Some(card) = session.drawn.get(slot) else {
        return;
    };
    let pos = Vec2::new(X_LEFT - 20.0, 540.0);
    painter.text("slot_label", SLOT_LABELS[slot], pos + Vec2::new(0.0, 240.0), FONT_SIZE * 1.4, RenderLayer::Text);
    painter.sprite_rotated(
        "drawn_card",
        painter.textures.card_face(card.id),
        pos,
        LARGE_CARD_SIZE * 0.8,
        face_rotation(card),
        RenderLayer::Objects,
    );
    painter.text("card_title", &card.title(), pos - Vec2::new(0.0, 230.0), FONT_SIZE * 1.2, RenderLayer::Text);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sound::Sfx;
    use tarot_engine::Rng;

    fn reading() -> Session {
        let mut s = Session::new(Rng::new(40));
        s.stage = Stage::Intro;
        s.set_intention(1);
        for _ in 0..3 {
            s.select_card(0);
            s.dismiss_reveal();
        }
        assert!(s.receive_fortune(vec!["a".into(), "b".into(), "c".into(), "d".into(), "e".into()]));
        s.take_cues();
        s
    }

    #[test]
    fn walk_forward_and_back() {
        let mut s = reading();
        assert_eq!(s.stage, Stage::ReadingIntro);
        click(&mut s, MIDDLE_BUTTON.center());
        assert_eq!(s.stage, Stage::ReadingCard1);

        // No previous from the first card.
        click(&mut s, LEFT_BUTTON.center());
        assert_eq!(s.stage, Stage::ReadingCard1);

        click(&mut s, RIGHT_BUTTON.center());
        click(&mut s, RIGHT_BUTTON.center());
        click(&mut s, LEFT_BUTTON.center());
        assert_eq!(s.stage, Stage::ReadingCard2);
        click(&mut s, RIGHT_BUTTON.center());
        click(&mut s, RIGHT_BUTTON.center());
        assert_eq!(s.stage, Stage::ReadingSummary);
        assert_eq!(s.take_cues().last(), Some(&Sfx::CardSpread));

        click(&mut s, SUMMARY_PREVIOUS_BUTTON.center());
        assert_eq!(s.stage, Stage::ReadingCard3);
    }

    #[test]
    fn summary_new_reading_clears_state() {
        let mut s = reading();
        s.stage = Stage::ReadingSummary;
        click(&mut s, MIDDLE_BUTTON.center());
        assert_eq!(s.stage, Stage::Intro);
        assert!(s.drawn.is_empty());
        assert!(s.fortune.is_none());
        assert!(s.visited.none_visited());
    }

    #[test]
    fn summary_go_outside() {
        let mut s = reading();
        s.stage = Stage::ReadingSummary;
        click(&mut s, SUMMARY_OUTSIDE_BUTTON.center());
        assert_eq!(s.stage, Stage::Outside);
        assert_eq!(s.take_cues(), vec![Sfx::Door]);
    }

    #[test]
    fn hover_hides_missing_previous() {
        let mut s = reading();
        s.stage = Stage::ReadingCard1;
        hover(&mut s, LEFT_BUTTON.center());
        assert_eq!(s.hover, None);
        hover(&mut s, RIGHT_BUTTON.center());
        assert_eq!(s.hover, Some(HoverTarget::NextCard));
    }
}
