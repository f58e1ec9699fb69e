//! The 78-card tarot deck.

use tarot_engine::Rng;

pub const DECK_SIZE: usize = 78;

const MAJOR_ARCANA: [&str; 22] = [
    "The Fool",
    "The Magician",
    "The High Priestess",
    "The Empress",
    "The Emperor",
    "The Hierophant",
    "The Lovers",
    "The Chariot",
    "Strength",
    "The Hermit",
    "Wheel of Fortune",
    "Justice",
    "The Hanged Man",
    "Death",
    "Temperance",
    "The Devil",
    "The Tower",
    "The Star",
    "The Moon",
    "The Sun",
    "Judgement",
    "The World",
];

const SUITS: [&str; 4] = ["Cups", "Pentacles", "Swords", "Wands"];

const RANKS: [&str; 14] = [
    "Ace", "Two", "Three", "Four", "Five", "Six", "Seven", "Eight", "Nine", "Ten", "Page",
    "Knight", "Queen", "King",
];

/// Name of the card at `index` in catalog order (Major Arcana first, then
/// suits in Cups, Pentacles, Swords, Wands order).
pub fn card_name(index: usize) -> Option<String> {
    if index < MAJOR_ARCANA.len() {
        return Some(MAJOR_ARCANA[index].to_string());
    }
    let minor = index - MAJOR_ARCANA.len();
    let suit = SUITS.get(minor / RANKS.len())?;
    let rank = RANKS[minor % RANKS.len()];
    Some(format!("{} of {}", rank, suit))
}

/// File-friendly identifier for a card name ("The Fool" -> "the_fool").
pub fn card_slug(name: &str) -> String {
    name.to_lowercase().replace(' ', "_")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Upright,
    Reversed,
}

impl Orientation {
    pub fn label(self) -> &'static str {
        match self {
            Orientation::Upright => "Upright",
            Orientation::Reversed => "Reversed",
        }
    }

    pub fn random(rng: &mut Rng) -> Self {
        if rng.chance(0.5) {
            Orientation::Upright
        } else {
            Orientation::Reversed
        }
    }
}

/// Small positional noise so the spread looks hand-dealt.
/// Assigned once when the deck is shuffled.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Jitter {
    pub x: f32,
    pub y: f32,
    /// Rotation in degrees.
    pub rotation: f32,
}

impl Jitter {
    pub fn random(rng: &mut Rng) -> Self {
        Self {
            x: rng.range_f32(-5.0, 5.0),
            y: rng.range_f32(-10.0, 10.0),
            rotation: rng.range_f32(-5.0, 5.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    /// Catalog index, 0..78.
    pub id: usize,
    pub name: String,
    pub orientation: Orientation,
    pub jitter: Jitter,
    pub face_up: bool,
}

impl Card {
    /// "The Tower (Reversed)".
    pub fn title(&self) -> String {
        format!("{} ({})", self.name, self.orientation.label())
    }

    /// The name sent to the reading provider, e.g. "The Tower reversed".
    pub fn reading_name(&self) -> String {
        match self.orientation {
            Orientation::Upright => self.name.clone(),
            Orientation::Reversed => format!("{} reversed", self.name),
        }
    }
}

/// Cards still face down on the table, in deal order.
#[derive(Debug, Clone, Default)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// All 78 cards, each with a random orientation and jitter, shuffled.
    pub fn shuffled(rng: &mut Rng) -> Self {
        let mut cards: Vec<Card> = (0..DECK_SIZE)
            .filter_map(|id| {
                card_name(id).map(|name| Card {
                    id,
                    name,
                    orientation: Orientation::random(rng),
                    jitter: Jitter::random(rng),
                    face_up: false,
                })
            })
            .collect();
        rng.shuffle(&mut cards);
        Self { cards }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Take the card at `index` off the table.
    pub fn take(&mut self, index: usize) -> Option<Card> {
        (index < self.cards.len()).then(|| self.cards.remove(index))
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}
