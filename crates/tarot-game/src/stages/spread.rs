//! The fanned deck. Picks are revealed one at a time in a popup; the
//! third pick goes straight to loading.

use glam::Vec2;
use tarot_engine::RenderLayer;

use super::{Painter, FONT_SIZE};
use crate::deck::{Card, Deck, Orientation};
use crate::layout::{
    spread_position, HoverTarget, Rect, LARGE_CARD_SIZE, MIDDLE_BUTTON, SPREAD_CARD_SIZE, X_LEFT,
    X_MIDDLE, X_RIGHT,
};
use crate::session::Session;

pub const SLOT_LABELS: [&str; 3] = ["Past", "Present", "Future"];
const SLOT_X: [f32; 3] = [X_LEFT, X_MIDDLE, X_RIGHT];
const SLOT_Y: f32 = 780.0;
/// How far a hovered card lifts out of the fan.
const HOVER_LIFT: f32 = 20.0;

fn card_center(deck: &Deck, index: usize) -> Option<Vec2> {
    let card = deck.cards().get(index)?;
    Some(spread_position(index, deck.len()) + Vec2::new(card.jitter.x, card.jitter.y))
}

/// Topmost card under `p`. Later cards are drawn over earlier ones.
pub fn card_at(deck: &Deck, p: Vec2) -> Option<usize> {
    (0..deck.len())
        .rev()
        .find(|&i| card_center(deck, i).is_some_and(|c| Rect::centered(c, SPREAD_CARD_SIZE).contains(p)))
}

pub fn click(session: &mut Session, p: Vec2) {
    if session.revealed.is_some() {
        if MIDDLE_BUTTON.contains(p) {
            session.dismiss_reveal();
        }
        return;
    }
    if let Some(index) = card_at(&session.deck, p) {
        session.select_card(index);
    }
}

pub fn hover(session: &mut Session, p: Vec2) {
    if session.revealed.is_some() {
        if MIDDLE_BUTTON.contains(p) {
            session.hover = Some(HoverTarget::PullNext);
        }
        return;
    }
    session.hovered_card = card_at(&session.deck, p);
}

/// Rotation in radians for a face-up card.
pub fn face_rotation(card: &Card) -> f32 {
    match card.orientation {
        Orientation::Upright => 0.0,
        Orientation::Reversed => std::f32::consts::PI,
    }
}

pub fn draw(session: &Session, painter: &mut Painter) {
    painter.backdrop(painter.textures.tablecloth);

    for (i, card) in session.deck.cards().iter().enumerate() {
        let Some(mut center) = card_center(&session.deck, i) else {
            continue;
        };
        if session.hovered_card == Some(i) {
            center.y += HOVER_LIFT;
        }
        painter.sprite_rotated(
            "deck_card",
            painter.textures.card_back,
            center,
            SPREAD_CARD_SIZE,
            card.jitter.rotation.to_radians(),
            RenderLayer::Objects,
        );
    }

    for (slot, label) in SLOT_LABELS.iter().enumerate() {
        let pos = Vec2::new(SLOT_X[slot], SLOT_Y);
        match session.selected.get(slot) {
            Some(card) => painter.sprite_rotated(
                "selected_card",
                painter.textures.card_face(card.id),
                pos,
                SPREAD_CARD_SIZE,
                face_rotation(card),
                RenderLayer::Objects,
            ),
            None => painter.sprite("empty_slot", painter.textures.card_back, pos, SPREAD_CARD_SIZE * 0.9, RenderLayer::Background),
        }
        painter.text("slot_label", label, pos + Vec2::new(0.0, 95.0), FONT_SIZE, RenderLayer::Text);
    }

    if let Some(card) = session.revealed.and_then(|i| session.selected.get(i)) {
        draw_reveal(card, painter);
    }
}

fn draw_reveal(card: &Card, painter: &mut Painter) {
    painter.sprite("popup", painter.textures.popup, Vec2::new(X_MIDDLE, 500.0), Vec2::new(600.0, 860.0), RenderLayer::Popup);
    painter.sprite_rotated(
        "revealed_card",
        painter.textures.card_face(card.id),
        Vec2::new(X_MIDDLE, 560.0),
        LARGE_CARD_SIZE * 1.1,
        face_rotation(card),
        RenderLayer::Popup,
    );
    painter.text("card_title", &card.title(), Vec2::new(X_MIDDLE, 260.0), FONT_SIZE * 1.3, RenderLayer::PopupText);
    painter.button(HoverTarget::PullNext, "Pull Next Card", MIDDLE_BUTTON, RenderLayer::Popup);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Command;
    use crate::stage::Stage;
    use tarot_engine::Rng;

    fn spread() -> Session {
        let mut s = Session::new(Rng::new(12));
        s.stage = Stage::Intro;
        assert!(s.set_intention(0));
        s
    }

    fn click_card(s: &mut Session, index: usize) {
        let p = card_center(&s.deck, index).unwrap();
        click(s, p);
    }

    #[test]
    fn topmost_card_wins() {
        let s = spread();
        let last = s.deck.len() - 1;
        // The last card overlaps its neighbor's center and is drawn above it.
        let under = card_center(&s.deck, last - 1).unwrap();
        assert_eq!(card_at(&s.deck, under), Some(last));
        assert_eq!(card_at(&s.deck, Vec2::new(5.0, 5.0)), None);
    }

    #[test]
    fn pick_reveal_pull_next() {
        let mut s = spread();
        click_card(&mut s, 5);
        assert_eq!(s.selected.len(), 1);
        assert_eq!(s.revealed, Some(0));
        assert_eq!(s.deck.len(), 77);

        // The deck is inert while the popup is open.
        click_card(&mut s, 5);
        assert_eq!(s.selected.len(), 1);

        click(&mut s, MIDDLE_BUTTON.center());
        assert_eq!(s.revealed, None);
    }

    #[test]
    fn third_pick_starts_loading() {
        let mut s = spread();
        for _ in 0..2 {
            click_card(&mut s, 0);
            click(&mut s, MIDDLE_BUTTON.center());
        }
        s.take_commands();
        click_card(&mut s, 0);
        assert_eq!(s.stage, Stage::Loading);
        assert_eq!(s.drawn.len(), 3);
        let commands = s.take_commands();
        assert!(matches!(commands.as_slice(), [Command::FetchReading(r)] if r.cards.len() == 3));
    }

    #[test]
    fn hover_tracks_card_then_popup_button() {
        let mut s = spread();
        let p = card_center(&s.deck, 20).unwrap();
        hover(&mut s, p);
        assert!(s.hovered_card.is_some());

        click(&mut s, p);
        s.hovered_card = None;
        hover(&mut s, MIDDLE_BUTTON.center());
        assert_eq!(s.hover, Some(HoverTarget::PullNext));
        assert_eq!(s.hovered_card, None);
    }
}
