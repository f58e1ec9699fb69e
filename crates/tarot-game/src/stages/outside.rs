//! The street in front of the shop: an ambient house animation, the door,
//! the exit sign and the credits.

use glam::Vec2;
use tarot_engine::{PhaseTimer, RenderLayer, Rng};

use super::{Painter, FONT_SIZE};
use crate::layout::{HoverTarget, CREDITS_BUTTON, EXIT_BUTTON, MIDDLE_BUTTON, X_MIDDLE};
use crate::session::{Command, Overlay, Session};
use crate::sound::Sfx;

pub const START_SECONDS: f32 = 2.0;
pub const GLANCE_SECONDS: f32 = 1.2;
/// The center frame lingers a whole number of seconds in this range.
pub const CENTER_SECONDS: (u32, u32) = (6, 10);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HouseFrame {
    Start,
    Left,
    Center,
    Right,
}

impl HouseFrame {
    pub fn index(self) -> usize {
        self as usize
    }
}

const SEQUENCE: [HouseFrame; 5] = [
    HouseFrame::Start,
    HouseFrame::Left,
    HouseFrame::Center,
    HouseFrame::Right,
    HouseFrame::Center,
];

/// Cycles start, left, center, right, center, ... forever.
#[derive(Debug, Clone)]
pub struct OutsideAnimation {
    step: usize,
    timer: PhaseTimer,
    center_seconds: f32,
}

impl OutsideAnimation {
    pub fn new(rng: &mut Rng) -> Self {
        let center_seconds = rng.range_inclusive(CENTER_SECONDS.0, CENTER_SECONDS.1) as f32;
        Self {
            step: 0,
            timer: PhaseTimer::new(START_SECONDS),
            center_seconds,
        }
    }

    pub fn frame(&self) -> HouseFrame {
        SEQUENCE[self.step]
    }

    pub fn center_seconds(&self) -> f32 {
        self.center_seconds
    }

    fn hold(&self, frame: HouseFrame) -> f32 {
        match frame {
            HouseFrame::Start => START_SECONDS,
            HouseFrame::Left | HouseFrame::Right => GLANCE_SECONDS,
            HouseFrame::Center => self.center_seconds,
        }
    }

    /// Advance; returns the new frame when it changes.
    pub fn tick(&mut self, dt: f32) -> Option<HouseFrame> {
        self.timer.advance(dt);
        if !self.timer.is_finished() {
            return None;
        }
        // After the first pass the start frame is skipped.
        self.step = if self.step + 1 == SEQUENCE.len() { 1 } else { self.step + 1 };
        let frame = self.frame();
        self.timer = PhaseTimer::new(self.hold(frame));
        Some(frame)
    }
}

pub fn tick(session: &mut Session, dt: f32) {
    if session.outside.tick(dt) == Some(HouseFrame::Left) {
        session.cue(Sfx::Wind);
    }
}

pub fn click(session: &mut Session, p: Vec2) {
    if EXIT_BUTTON.contains(p) {
        session.cue(Sfx::Button);
        session.command(Command::Quit);
    } else if CREDITS_BUTTON.contains(p) {
        session.open_overlay(Overlay::Credits);
    } else if MIDDLE_BUTTON.contains(p) {
        session.step_inside();
    }
}

pub fn hover(session: &mut Session, p: Vec2) {
    session.hover = if EXIT_BUTTON.contains(p) {
        Some(HoverTarget::ExitGame)
    } else if CREDITS_BUTTON.contains(p) {
        Some(HoverTarget::Credits)
    } else if MIDDLE_BUTTON.contains(p) && session.connection_popup {
        Some(HoverTarget::Retry)
    } else if MIDDLE_BUTTON.contains(p) && session.has_tokens {
        Some(HoverTarget::StepInside)
    } else {
        None
    };
}

pub fn draw(session: &Session, painter: &mut Painter) {
    let frame = session.outside.frame();
    painter.backdrop(painter.textures.outside[frame.index()]);

    let corner = EXIT_BUTTON.max - EXIT_BUTTON.min;
    painter.button_sized(HoverTarget::ExitGame, "Exit", EXIT_BUTTON.center(), corner, RenderLayer::Objects);
    painter.button_sized(
        HoverTarget::Credits,
        "Credits",
        CREDITS_BUTTON.center(),
        CREDITS_BUTTON.max - CREDITS_BUTTON.min,
        RenderLayer::Objects,
    );

    if session.connection_popup {
        draw_connection_popup(painter);
    } else if session.has_tokens {
        painter.button(HoverTarget::StepInside, "Step Inside", MIDDLE_BUTTON, RenderLayer::Objects);
    } else {
        painter.text(
            "closed_sign",
            "Mama Nyah is resting. The shop is closed for now.",
            Vec2::new(X_MIDDLE, 100.0),
            FONT_SIZE * 1.2,
            RenderLayer::Text,
        );
    }
}

/// Popup shown when the spirits cannot be reached. Shared with Loading.
pub fn draw_connection_popup(painter: &mut Painter) {
    painter.sprite(
        "popup",
        painter.textures.popup,
        Vec2::new(X_MIDDLE, 480.0),
        Vec2::new(700.0, 400.0),
        RenderLayer::Popup,
    );
    painter.text(
        "popup_text",
        "The spirits cannot be reached.",
        Vec2::new(X_MIDDLE, 540.0),
        FONT_SIZE * 1.4,
        RenderLayer::PopupText,
    );
    painter.text(
        "popup_text",
        "Check your connection and try again.",
        Vec2::new(X_MIDDLE, 480.0),
        FONT_SIZE,
        RenderLayer::PopupText,
    );
    painter.button(HoverTarget::Retry, "Retry", MIDDLE_BUTTON, RenderLayer::Popup);
}
