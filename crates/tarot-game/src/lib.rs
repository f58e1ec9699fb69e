//! Mama Nyah's tarot shop: the interactive reading game.
//!
//! `TarotGame` implements the engine's `Game` trait. Game state lives in
//! `Session`; the per-stage handlers in `stages` turn input into session
//! actions and rebuild the scene every tick. Network work runs on
//! background tasks behind the `provider` traits.

pub mod deck;
pub mod fetch;
pub mod game;
pub mod layout;
pub mod provider;
pub mod session;
pub mod sound;
pub mod stage;
pub mod stages;
pub mod textures;

#[cfg(feature = "http")]
pub mod http;

pub use deck::{Card, Deck, Orientation, DECK_SIZE};
pub use fetch::{FetchGate, FetchOutcome, Services, StatusReport};
pub use game::{TarotGame, EVENT_AUDIO_SETTINGS, EVENT_QUIT, EVENT_STAGE};
pub use provider::{
    Connectivity, ConnectivityProbe, ProviderError, Reading, ReadingRequest, TextProvider,
    TokenMeter,
};
pub use session::{Command, Overlay, Session};
pub use sound::{Sfx, SoundSettings};
pub use stage::{Stage, StageTable, VisitedStages};
pub use textures::{standard_manifest, Textures};
