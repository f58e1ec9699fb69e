//! The game's state, owned by the main loop and passed to every stage
//! handler. Transition actions live here so that every stage change goes
//! through the stage graph.

use tarot_engine::{Rng, TextMeasure, Typewriter};
use tarot_engine::systems::typewriter::DEFAULT_WRAP_COLUMNS;

use crate::deck::{Card, Deck};
use crate::fetch::StatusReport;
use crate::layout::HoverTarget;
use crate::provider::{placeholder_fortune, Connectivity, ReadingRequest, PLACEHOLDER_PARAGRAPHS};
use crate::sound::{Sfx, SoundSettings};
use crate::stage::{Stage, VisitedStages};
use crate::stages::outside::OutsideAnimation;

/// Intention categories offered on the intro screen.
pub const CATEGORIES: [&str; 6] = [
    "Love Life",
    "Professional Development",
    "Family and Friends",
    "Health",
    "Personal Growth",
    "Gain Clarity",
];

/// Cards in a reading.
pub const MAX_SELECTED: usize = 3;

/// Seconds between typed characters, before per-session jitter.
pub const TYPING_SPEED: f32 = 0.03;

pub const INTRO_TEXT: &str = "Ah, welcome, traveler!\n\n\
    I am Mama Nyah, and the spirits have brought you to me for a reason.\n\n\
    Sit, relax, and let us see what the universe whispers for you.\n\n\
    But first, tell me, what is your intention? What does your heart seek to know, heal, or discover?\n\n\
    Speak it, and we will find the truth together.";

/// Modal panels drawn over the current stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    Options,
    Credits,
}

/// Work the main loop must start on the session's behalf.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    FetchReading(ReadingRequest),
    CheckStatus,
    Quit,
}

pub struct Session {
    pub stage: Stage,
    pub visited: VisitedStages,
    pub deck: Deck,
    /// Cards picked so far, in pick order. Never more than three.
    pub selected: Vec<Card>,
    /// The three cards of the reading, frozen when the third is picked.
    pub drawn: Vec<Card>,
    pub fortune: Option<Vec<String>>,
    /// Index into `CATEGORIES`.
    pub intention: Option<usize>,
    pub typing: Typewriter,
    /// Selected card shown in the reveal popup, if open.
    pub revealed: Option<usize>,
    pub hover: Option<HoverTarget>,
    /// Deck index of the card under the pointer in the spread.
    pub hovered_card: Option<usize>,
    pub connectivity: Connectivity,
    pub has_tokens: bool,
    pub connection_popup: bool,
    pub overlay: Option<Overlay>,
    pub sound: SoundSettings,
    pub outside: OutsideAnimation,
    pub loading_progress: f32,
    pub loading_frame: usize,
    cues: Vec<Sfx>,
    commands: Vec<Command>,
    rng: Rng,
}

impl Session {
    pub fn new(mut rng: Rng) -> Self {
        let typing = Typewriter::with_jitter(TYPING_SPEED, DEFAULT_WRAP_COLUMNS, &mut rng);
        let outside = OutsideAnimation::new(&mut rng);
        Self {
            stage: Stage::Title,
            visited: VisitedStages::default(),
            deck: Deck::empty(),
            selected: Vec::with_capacity(MAX_SELECTED),
            drawn: Vec::with_capacity(MAX_SELECTED),
            fortune: None,
            intention: None,
            typing,
            revealed: None,
            hover: None,
            hovered_card: None,
            connectivity: Connectivity::ONLINE,
            has_tokens: true,
            connection_popup: false,
            overlay: None,
            sound: SoundSettings::default(),
            outside,
            loading_progress: 0.0,
            loading_frame: 0,
            cues: Vec::new(),
            commands: Vec::new(),
            rng,
        }
    }

    /// Move to `to` if the stage graph allows it. Refused moves are logged
    /// and leave the session untouched.
    pub fn go_to(&mut self, to: Stage) -> bool {
        if !self.stage.can_transition_to(to) {
            log::warn!("Refused stage transition {:?} -> {:?}", self.stage, to);
            return false;
        }
        log::info!("Stage {:?} -> {:?}", self.stage, to);
        self.visited.mark(self.stage);
        self.typing.reset();
        self.hover = None;
        self.hovered_card = None;
        self.stage = to;
        true
    }

    pub fn cue(&mut self, sfx: Sfx) {
        self.cues.push(sfx);
    }

    pub fn take_cues(&mut self) -> Vec<Sfx> {
        std::mem::take(&mut self.cues)
    }

    pub fn command(&mut self, command: Command) {
        self.commands.push(command);
    }

    pub fn take_commands(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.commands)
    }

    // -- Outside --

    /// Enter the shop. Needs budget left; with the connection popup open
    /// this retries the status check instead.
    pub fn step_inside(&mut self) -> bool {
        if !self.has_tokens {
            log::info!("Reading budget exhausted; the shop is closed");
            return false;
        }
        if self.connection_popup {
            self.cue(Sfx::Button);
            self.command(Command::CheckStatus);
            return false;
        }
        if self.go_to(Stage::Intro) {
            self.cue(Sfx::Door);
            return true;
        }
        false
    }

    pub fn apply_status(&mut self, report: StatusReport) {
        self.connectivity = report.connectivity;
        self.has_tokens = report.has_tokens;
        self.connection_popup = !report.connectivity.is_online();
    }

    // -- Intro --

    /// Choose an intention: shuffle a fresh deck and deal the spread.
    pub fn set_intention(&mut self, category: usize) -> bool {
        if category >= CATEGORIES.len() || !self.go_to(Stage::Spread) {
            return false;
        }
        log::info!("Intention: {}", CATEGORIES[category]);
        self.intention = Some(category);
        self.deck = Deck::shuffled(&mut self.rng);
        self.selected.clear();
        self.drawn.clear();
        self.revealed = None;
        self.cue(Sfx::CardSpread);
        true
    }

    pub fn intention_name(&self) -> &'static str {
        self.intention.and_then(|i| CATEGORIES.get(i).copied()).unwrap_or("")
    }

    // -- Spread --

    /// Pick the card at `deck_index`. The first two open the reveal popup;
    /// the third freezes the selection and starts loading right away.
    pub fn select_card(&mut self, deck_index: usize) -> bool {
        if self.stage != Stage::Spread || self.revealed.is_some() {
            return false;
        }
        if self.selected.len() >= MAX_SELECTED {
            log::warn!("Refused card selection: {} already chosen", MAX_SELECTED);
            return false;
        }
        let Some(mut card) = self.deck.take(deck_index) else {
            return false;
        };
        card.face_up = true;
        log::info!("Selected {}", card.title());
        self.selected.push(card);
        self.hovered_card = None;
        self.cue(Sfx::CardMove);

        if self.selected.len() == MAX_SELECTED {
            self.drawn = self.selected.clone();
            self.start_loading();
        } else {
            self.revealed = Some(self.selected.len() - 1);
        }
        true
    }

    /// Close the reveal popup ("pull next card").
    pub fn dismiss_reveal(&mut self) -> bool {
        if self.revealed.take().is_some() {
            self.cue(Sfx::Button);
            return true;
        }
        false
    }

    // -- Loading --

    /// Enter Loading (or stay there, on retry) and ask the main loop to
    /// request the reading.
    pub fn start_loading(&mut self) -> bool {
        if self.drawn.len() != MAX_SELECTED {
            log::warn!("Cannot load a reading with {} cards", self.drawn.len());
            return false;
        }
        if self.stage != Stage::Loading && !self.go_to(Stage::Loading) {
            return false;
        }
        self.loading_progress = 0.0;
        self.loading_frame = 0;
        self.connection_popup = false;
        let request = self.reading_request();
        self.command(Command::FetchReading(request));
        self.cue(Sfx::CardSpread);
        true
    }

    pub fn reading_request(&self) -> ReadingRequest {
        ReadingRequest {
            cards: self.drawn.iter().map(Card::reading_name).collect(),
            intention: self.intention_name().to_string(),
        }
    }

    /// The reading arrived: store it and open the reading.
    pub fn receive_fortune(&mut self, paragraphs: Vec<String>) -> bool {
        if self.stage != Stage::Loading {
            return false;
        }
        let paragraphs = if paragraphs.is_empty() {
            placeholder_fortune()
        } else {
            paragraphs
        };
        self.fortune = Some(paragraphs);
        self.go_to(Stage::ReadingIntro)
    }

    pub fn connection_lost(&mut self, connectivity: Connectivity) {
        self.connectivity = connectivity;
        self.connection_popup = true;
    }

    // -- Reading --

    pub fn advance_reading(&mut self) -> bool {
        let Some(next) = self.stage.next_reading() else {
            return false;
        };
        if !self.go_to(next) {
            return false;
        }
        self.cue(if next == Stage::ReadingSummary {
            Sfx::CardSpread
        } else {
            Sfx::CardMove
        });
        true
    }

    pub fn previous_reading(&mut self) -> bool {
        let Some(previous) = self.stage.previous_reading() else {
            return false;
        };
        if !self.go_to(previous) {
            return false;
        }
        self.cue(Sfx::CardMove);
        true
    }

    /// Paragraph `index` of the fortune, or its placeholder.
    pub fn fortune_paragraph(&self, index: usize) -> &str {
        fortune_paragraph(&self.fortune, index)
    }

    /// Summary: start over from the intro.
    pub fn new_reading(&mut self) -> bool {
        if self.stage != Stage::ReadingSummary || !self.go_to(Stage::Intro) {
            return false;
        }
        self.reset_reading();
        self.cue(Sfx::Button);
        true
    }

    /// Summary: leave the shop.
    pub fn go_outside(&mut self) -> bool {
        if self.stage != Stage::ReadingSummary || !self.go_to(Stage::Outside) {
            return false;
        }
        self.reset_reading();
        self.cue(Sfx::Door);
        true
    }

    /// Forget everything about the current reading.
    pub fn reset_reading(&mut self) {
        self.intention = None;
        self.deck = Deck::empty();
        self.selected.clear();
        self.drawn.clear();
        self.fortune = None;
        self.revealed = None;
        self.hover = None;
        self.hovered_card = None;
        self.typing.reset();
        self.visited.clear();
    }

    // -- Typing --

    /// Point the typewriter at the current stage's paragraph. Safe to call
    /// every tick: the same paragraph does not restart typing.
    pub fn sync_typing(&mut self, measure: &dyn TextMeasure) {
        let paragraph = match self.stage {
            Stage::Intro => Some(INTRO_TEXT),
            stage => stage
                .reading_index()
                .map(|i| fortune_paragraph(&self.fortune, i)),
        };
        if let Some(paragraph) = paragraph {
            self.typing.set_text(paragraph, measure);
        }
    }

    /// Advance typing. Every other character clicks, on a first visit only.
    pub fn tick_typing(&mut self, dt: f32) {
        if let Some(stroke) = self.typing.tick(dt) {
            if !self.visited.is_visited(self.stage) && stroke.position % 2 == 0 {
                self.cue(Sfx::Typewriter);
            }
        }
    }

    // -- Menus --

    pub fn open_overlay(&mut self, overlay: Overlay) {
        self.overlay = Some(overlay);
        self.hover = None;
        self.cue(Sfx::Button);
    }

    pub fn close_overlay(&mut self) {
        if self.overlay.take().is_some() {
            self.cue(Sfx::Button);
        }
    }
}

fn fortune_paragraph(fortune: &Option<Vec<String>>, index: usize) -> &str {
    fortune
        .as_ref()
        .and_then(|f| f.get(index))
        .map(String::as_str)
        .unwrap_or_else(|| PLACEHOLDER_PARAGRAPHS[index.min(PLACEHOLDER_PARAGRAPHS.len() - 1)])
}
