//! Render the daily card video to a frame file.
//!
//! Usage: tarot-flip <output.jsonl|output.raw> [config.json]
//!
//! `TAROT_SEED` fixes the card choice. The reading service only answers
//! three-card spreads, so the single daily card has no reading source and
//! the video always tells "The cards are silent today".

use std::sync::Arc;

use tarot_engine::{GameRunner, Rng};
use tarot_flip::{daily_card, record, CardFlipAnimator, FlipAssets, FlipConfig, FrameSink, JsonLinesSink, RawFrameSink};
use tarot_game::provider::{StaticProvider, TextProvider};
use tarot_game::standard_manifest;

fn provider() -> Arc<dyn TextProvider> {
    Arc::new(StaticProvider::new(Vec::new()))
}

fn open_sink(path: &str) -> Result<Box<dyn FrameSink>, tarot_flip::SinkError> {
    if path.ends_with(".raw") {
        Ok(Box::new(RawFrameSink::create(path)?))
    } else {
        Ok(Box::new(JsonLinesSink::create(path)?))
    }
}

fn main() {
    env_logger::init();

    let output = match std::env::args().nth(1) {
        Some(arg) => arg,
        None => {
            log::error!("Usage: tarot-flip <output.jsonl|output.raw> [config.json]");
            std::process::exit(1);
        }
    };

    let config = match std::env::args().nth(2) {
        Some(path) => match FlipConfig::from_file(&path) {
            Ok(config) => config,
            Err(e) => {
                log::error!("{}", e);
                std::process::exit(1);
            }
        },
        None => FlipConfig::default(),
    };

    let mut rng = match std::env::var("TAROT_SEED").ok().and_then(|s| s.parse().ok()) {
        Some(seed) => Rng::new(seed),
        None => Rng::from_entropy(),
    };
    let card = daily_card(&mut rng);

    let assets = match FlipAssets::resolve(&standard_manifest(), &card) {
        Ok(assets) => assets,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };

    let mut sink = match open_sink(&output) {
        Ok(sink) => sink,
        Err(e) => {
            log::error!("Cannot open {}: {}", output, e);
            std::process::exit(1);
        }
    };

    let max_frames = config.max_frames;
    let mut runner = GameRunner::new(CardFlipAnimator::new(config, card, assets, provider()));
    runner.init();

    if let Err(e) = record(&mut runner, sink.as_mut(), max_frames) {
        log::error!("Recording failed: {}", e);
        std::process::exit(1);
    }
    log::info!("Wrote {}", output);
}
