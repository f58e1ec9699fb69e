//! Canvas geometry: button hit boxes, card slots and hover targets.
//!
//! The canvas is 1280x960 with the origin at the bottom-left.

use glam::Vec2;

pub const CANVAS_WIDTH: f32 = 1280.0;
pub const CANVAS_HEIGHT: f32 = 960.0;

pub const X_LEFT: f32 = 320.0;
pub const X_MIDDLE: f32 = 640.0;
pub const X_RIGHT: f32 = 960.0;
pub const Y_BOTTOM: f32 = 25.0;

/// Half-width and height of the large bottom buttons' click area.
pub const BUTTON_HALF_WIDTH: f32 = 175.0;
pub const BUTTON_HEIGHT: f32 = 150.0;

/// Rendered size of a button sprite.
pub const BUTTON_SIZE: Vec2 = Vec2::new(300.0, 110.0);

/// Card as dealt in the spread.
pub const SPREAD_CARD_SIZE: Vec2 = Vec2::new(90.0, 150.0);
/// Card shown full size (reveal popup, reading stages).
pub const LARGE_CARD_SIZE: Vec2 = Vec2::new(300.0, 500.0);

/// Spread curve: horizontal margin, baseline height and sag of the arc.
const SPREAD_MARGIN: f32 = 150.0;
const SPREAD_BASELINE: f32 = 480.0;
const SPREAD_CURVE: f32 = 50.0;

/// Intention category buttons, top row first.
pub const CATEGORY_CENTERS: [Vec2; 6] = [
    Vec2::new(275.0, 300.0),
    Vec2::new(650.0, 300.0),
    Vec2::new(1025.0, 300.0),
    Vec2::new(275.0, 150.0),
    Vec2::new(650.0, 150.0),
    Vec2::new(1025.0, 150.0),
];

/// Axis-aligned box in canvas space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub const fn new(min_x: f32, min_y: f32, max_x: f32, max_y: f32) -> Self {
        Self {
            min: Vec2::new(min_x, min_y),
            max: Vec2::new(max_x, max_y),
        }
    }

    pub fn centered(center: Vec2, size: Vec2) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }
}

/// Bottom-row buttons: click areas span `x - 175 ..= x + 175`.
pub const MIDDLE_BUTTON: Rect = Rect::new(X_MIDDLE - BUTTON_HALF_WIDTH, Y_BOTTOM, X_MIDDLE + BUTTON_HALF_WIDTH, Y_BOTTOM + BUTTON_HEIGHT);
pub const LEFT_BUTTON: Rect = Rect::new(X_LEFT - BUTTON_HALF_WIDTH, Y_BOTTOM, X_LEFT + BUTTON_HALF_WIDTH, Y_BOTTOM + BUTTON_HEIGHT);
pub const RIGHT_BUTTON: Rect = Rect::new(X_RIGHT - BUTTON_HALF_WIDTH, Y_BOTTOM, X_RIGHT + BUTTON_HALF_WIDTH, Y_BOTTOM + BUTTON_HEIGHT);
/// Summary screen buttons sit further out.
pub const SUMMARY_PREVIOUS_BUTTON: Rect = Rect::new(X_LEFT - 100.0 - BUTTON_HALF_WIDTH, Y_BOTTOM, X_LEFT - 100.0 + BUTTON_HALF_WIDTH, Y_BOTTOM + BUTTON_HEIGHT);
pub const SUMMARY_OUTSIDE_BUTTON: Rect = Rect::new(X_RIGHT + 100.0 - BUTTON_HALF_WIDTH, Y_BOTTOM, X_RIGHT + 100.0 + BUTTON_HALF_WIDTH, Y_BOTTOM + BUTTON_HEIGHT);

/// Small corner buttons on the outside screen and connection popup.
pub const EXIT_BUTTON: Rect = Rect::new(X_RIGHT + 200.0 - 87.0, Y_BOTTOM - 95.0, X_RIGHT + 200.0 + 87.0, Y_BOTTOM + 75.0);
pub const CREDITS_BUTTON: Rect = Rect::new(X_RIGHT + 200.0 - 87.0, Y_BOTTOM + 75.0, X_RIGHT + 200.0 + 87.0, Y_BOTTOM + 175.0);
pub const OPTIONS_BUTTON: Rect = Rect::new(X_RIGHT + 250.0 - 100.0, 880.0, X_RIGHT + 250.0 + 100.0, 950.0);

/// Options menu rows, top to bottom: music toggle, music volume, sfx
/// toggle, sfx volume; then the close button.
pub const MENU_MUSIC_TOGGLE: Rect = Rect::new(X_MIDDLE - 150.0, 640.0, X_MIDDLE + 150.0, 700.0);
pub const MENU_MUSIC_DOWN: Rect = Rect::new(X_MIDDLE - 150.0, 560.0, X_MIDDLE - 50.0, 620.0);
pub const MENU_MUSIC_UP: Rect = Rect::new(X_MIDDLE + 50.0, 560.0, X_MIDDLE + 150.0, 620.0);
pub const MENU_SFX_TOGGLE: Rect = Rect::new(X_MIDDLE - 150.0, 460.0, X_MIDDLE + 150.0, 520.0);
pub const MENU_SFX_DOWN: Rect = Rect::new(X_MIDDLE - 150.0, 380.0, X_MIDDLE - 50.0, 440.0);
pub const MENU_SFX_UP: Rect = Rect::new(X_MIDDLE + 50.0, 380.0, X_MIDDLE + 150.0, 440.0);
pub const MENU_CLOSE: Rect = Rect::new(X_MIDDLE - 97.0, 250.0 - 57.0, X_MIDDLE + 97.0, 250.0 + 57.0);

/// Click area of an intention button: wider than tall, reaching further up
/// than down from its center.
pub fn category_button(index: usize) -> Option<Rect> {
    let c = CATEGORY_CENTERS.get(index)?;
    Some(Rect::new(
        c.x - BUTTON_HALF_WIDTH,
        c.y - BUTTON_HEIGHT / 2.0,
        c.x + BUTTON_HALF_WIDTH,
        c.y + BUTTON_HEIGHT,
    ))
}

/// First category whose button contains `p`. The top row wins where rows overlap.
pub fn category_at(p: Vec2) -> Option<usize> {
    (0..CATEGORY_CENTERS.len()).find(|i| category_button(*i).is_some_and(|r| r.contains(p)))
}

/// Where the `index`th of `count` face-down cards lies in the spread arc,
/// before jitter.
pub fn spread_position(index: usize, count: usize) -> Vec2 {
    if count <= 1 {
        return Vec2::new(X_MIDDLE, SPREAD_BASELINE);
    }
    let spacing = (CANVAS_WIDTH - 2.0 * SPREAD_MARGIN) / count as f32;
    let x = SPREAD_MARGIN + index as f32 * spacing;
    let center = (count - 1) as f32 / 2.0;
    let t = (index as f32 - center) / center;
    let y = SPREAD_BASELINE + SPREAD_CURVE * t * t;
    Vec2::new(x, y)
}

/// Named interactive element under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HoverTarget {
    StepInside,
    Retry,
    ExitGame,
    Credits,
    Category(usize),
    PullNext,
    NextCard,
    PreviousCard,
    NewReading,
    GoOutside,
    Options,
    MusicToggle,
    MusicDown,
    MusicUp,
    SfxToggle,
    SfxDown,
    SfxUp,
    CloseMenu,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn middle_button_bounds() {
        assert!(MIDDLE_BUTTON.contains(Vec2::new(640.0, 100.0)));
        assert!(MIDDLE_BUTTON.contains(Vec2::new(465.0, 25.0)));
        assert!(!MIDDLE_BUTTON.contains(Vec2::new(640.0, 176.0)));
        assert!(!MIDDLE_BUTTON.contains(Vec2::new(816.0, 100.0)));
    }

    #[test]
    fn bottom_buttons_do_not_overlap() {
        assert!(LEFT_BUTTON.max.x < MIDDLE_BUTTON.min.x);
        assert!(MIDDLE_BUTTON.max.x < RIGHT_BUTTON.min.x);
        assert!(SUMMARY_PREVIOUS_BUTTON.max.x < MIDDLE_BUTTON.min.x);
        assert!(MIDDLE_BUTTON.max.x < SUMMARY_OUTSIDE_BUTTON.min.x);
    }

    #[test]
    fn top_row_category_wins_overlap() {
        // y = 260 is inside both the top-row and bottom-row boxes.
        assert_eq!(category_at(Vec2::new(275.0, 260.0)), Some(0));
        assert_eq!(category_at(Vec2::new(650.0, 100.0)), Some(4));
        assert_eq!(category_at(Vec2::new(640.0, 900.0)), None);
    }

    #[test]
    fn spread_is_an_arc() {
        let count = 9;
        let ends = spread_position(0, count);
        let middle = spread_position(4, count);
        assert!(ends.y > middle.y);
        assert!((middle.y - 480.0).abs() < 0.01);
        assert!((ends.x - 150.0).abs() < 0.01);
        let last = spread_position(count - 1, count);
        assert!(last.x < CANVAS_WIDTH);
    }

    #[test]
    fn rect_centered_contains_its_center() {
        let r = Rect::centered(Vec2::new(100.0, 200.0), SPREAD_CARD_SIZE);
        assert!(r.contains(r.center()));
        assert!(!r.contains(Vec2::new(100.0, 276.0)));
    }
}
