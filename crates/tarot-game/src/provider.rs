//! Collaborators behind the network: the reading generator, the
//! connectivity probe and the token meter.
//!
//! The game only sees these traits. The HTTP implementations live in
//! `http` (behind the `http` feature); tests and offline builds use the
//! in-process ones below.

/// Spent budget at which the shop closes for the day.
pub const TOKEN_COST_LIMIT: f64 = 4.90;

/// Paragraphs shown when no reading could be produced.
pub const PLACEHOLDER_PARAGRAPHS: [&str; 5] = [
    "The spirits whisper of change in the air, child.",
    "Your path is clear, but the road may twist.",
    "Trust in the cards, they never lie.",
    "What was hidden will soon come to light.",
    "Mama Nyah sees blessings coming your way.",
];

/// Reading text for the single-card video when the generator has nothing.
pub const SILENT_CARDS: &str = "The cards are silent today. Try again later.";

#[derive(Debug, Clone, PartialEq)]
pub struct ReadingRequest {
    /// Card names with orientation, in slot order.
    pub cards: Vec<String>,
    pub intention: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    pub paragraphs: Vec<String>,
    pub token_count: u32,
}

#[derive(thiserror::Error, Debug)]
pub enum ProviderError {
    #[error("reading service unreachable: {0}")]
    Unreachable(String),
    #[error("reading service returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("malformed response: {0}")]
    Malformed(String),
    #[error("reading service returned no text")]
    Empty,
    #[error("request refused: {0}")]
    Rejected(String),
}

/// Produces reading text for a set of cards.
pub trait TextProvider: Send + Sync {
    fn generate(&self, request: &ReadingRequest) -> Result<Reading, ProviderError>;
}

/// Reachability of the outside world and of the reading service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Connectivity {
    pub internet: bool,
    pub backend: bool,
}

impl Connectivity {
    pub const ONLINE: Connectivity = Connectivity {
        internet: true,
        backend: true,
    };

    pub fn is_online(&self) -> bool {
        self.internet && self.backend
    }
}

pub trait ConnectivityProbe: Send + Sync {
    /// Check both links. Implementations use a short timeout.
    fn check(&self) -> Connectivity;
}

/// Reports how much of the reading budget has been spent.
pub trait TokenMeter: Send + Sync {
    fn total_cost(&self) -> Result<f64, ProviderError>;

    /// Spend at which readings stop.
    fn cost_limit(&self) -> f64 {
        TOKEN_COST_LIMIT
    }
}

/// Whether the reading budget still has room.
pub fn has_tokens(total_cost: f64, limit: f64) -> bool {
    total_cost < limit
}

/// The placeholder fortune as owned paragraphs.
pub fn placeholder_fortune() -> Vec<String> {
    PLACEHOLDER_PARAGRAPHS.iter().map(|p| p.to_string()).collect()
}

/// Split service text into paragraphs: one per non-blank line.
pub fn split_paragraphs(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

/// A provider that answers from a fixed script. Used offline and in tests.
#[derive(Debug, Clone)]
pub struct StaticProvider {
    paragraphs: Vec<String>,
}

impl StaticProvider {
    pub fn new(paragraphs: Vec<String>) -> Self {
        Self { paragraphs }
    }
}

impl Default for StaticProvider {
    fn default() -> Self {
        Self::new(placeholder_fortune())
    }
}

impl TextProvider for StaticProvider {
    fn generate(&self, request: &ReadingRequest) -> Result<Reading, ProviderError> {
        if self.paragraphs.is_empty() {
            return Err(ProviderError::Empty);
        }
        log::debug!("Static reading for {:?}", request.cards);
        Ok(Reading {
            paragraphs: self.paragraphs.clone(),
            token_count: 0,
        })
    }
}

/// A probe that always reports the same state.
#[derive(Debug, Clone, Copy)]
pub struct FixedProbe(pub Connectivity);

impl ConnectivityProbe for FixedProbe {
    fn check(&self) -> Connectivity {
        self.0
    }
}

/// A meter that always reports the same spend.
#[derive(Debug, Clone, Copy)]
pub struct FixedMeter(pub f64);

impl TokenMeter for FixedMeter {
    fn total_cost(&self) -> Result<f64, ProviderError> {
        Ok(self.0)
    }
}
