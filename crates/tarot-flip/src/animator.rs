//! The daily card video: a single card flips, shrinks, tells its reading
//! and hands over to a call to action.
//!
//! Phases run strictly forward:
//! Intro -> Flip -> HoldAfterFlip -> Shrink -> Description -> FadeOutAndCta -> Done.
//! The animator is an engine `Game`, so the recorder drives it with the
//! same fixed-step runner as the interactive game.

use std::sync::Arc;

use glam::Vec2;
use tarot_engine::*;
use tarot_game::deck::{card_name, Card, Jitter, Orientation, DECK_SIZE};
use tarot_game::provider::{ReadingRequest, TextProvider, SILENT_CARDS};
use tarot_game::sound::Sfx;
use tarot_game::textures::card_texture_name;

use crate::config::FlipConfig;

pub const TITLE: &str = "Daily Tarot";
pub const CALL_TO_ACTION: [&str; 3] = ["Visit", "Mama Nyah", "Today"];
/// Intention sent with the daily card.
pub const DAILY_INTENTION: &str = "Daily message";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Phase {
    Intro,
    Flip,
    HoldAfterFlip,
    Shrink,
    Description,
    FadeOutAndCta,
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Back,
    Front,
}

/// Which side shows at `angle` degrees into the flip, and its horizontal
/// scale. The card is edge-on (zero width) at exactly 90.
pub fn face_for_angle(angle: f32) -> (Side, f32) {
    if angle < 90.0 {
        (Side::Back, angle.to_radians().cos().max(0.0))
    } else if angle == 90.0 {
        (Side::Front, 0.0)
    } else {
        (Side::Front, (180.0 - angle).to_radians().cos().max(0.0))
    }
}

/// A random card from the full catalog, in a random orientation.
pub fn daily_card(rng: &mut Rng) -> Card {
    let id = rng.next_int(DECK_SIZE as u32) as usize;
    Card {
        id,
        name: card_name(id).unwrap_or_default(),
        orientation: Orientation::random(rng),
        jitter: Jitter::default(),
        face_up: false,
    }
}

/// Texture and sound ids the video draws with.
#[derive(Debug, Clone, Copy)]
pub struct FlipAssets {
    pub background: TextureId,
    pub card_back: TextureId,
    pub card_front: TextureId,
    pub flip_sound: SoundEvent,
    pub type_sound: SoundEvent,
}

impl FlipAssets {
    pub fn resolve(manifest: &AssetManifest, card: &Card) -> Result<Self, AssetError> {
        let face = card_texture_name(card.id).ok_or_else(|| AssetError::MissingTexture(card.name.clone()))?;
        Ok(Self {
            background: manifest.texture("tablecloth")?,
            card_back: manifest.texture("card_back")?,
            card_front: manifest.texture(&face)?,
            flip_sound: manifest.sound(Sfx::CardMove.name())?,
            type_sound: manifest.sound(Sfx::Typewriter.name())?,
        })
    }
}

pub struct CardFlipAnimator {
    config: FlipConfig,
    card: Card,
    assets: FlipAssets,
    phase: Phase,
    timer: PhaseTimer,
    angle: f32,
    scale: f32,
    y_offset: f32,
    title: Fade,
    label: Fade,
    description: Fade,
    content: Fade,
    cta: Fade,
    typing: Typewriter,
    /// Seconds the description has been fully typed.
    quiet: f32,
    reading: BackgroundTask<String>,
    measure: GlyphMetrics,
}

fn fade_rate(seconds: f32) -> f32 {
    if seconds > 0.0 {
        255.0 / seconds
    } else {
        f32::MAX
    }
}

impl CardFlipAnimator {
    /// Start the reading request right away so it has the intro, flip and
    /// shrink to arrive.
    pub fn new(config: FlipConfig, card: Card, assets: FlipAssets, provider: Arc<dyn TextProvider>) -> Self {
        let request = ReadingRequest {
            cards: vec![card.reading_name()],
            intention: DAILY_INTENTION.to_string(),
        };
        let reading = BackgroundTask::spawn(
            "daily-reading",
            move || match provider.generate(&request) {
                Ok(reading) if !reading.paragraphs.is_empty() => reading.paragraphs.join(" "),
                Ok(_) => SILENT_CARDS.to_string(),
                Err(err) => {
                    log::error!("Daily reading failed: {}", err);
                    SILENT_CARDS.to_string()
                }
            },
            |_| SILENT_CARDS.to_string(),
        );
        Self::with_reading(config, card, assets, reading)
    }

    /// Use an already-running (or ready) reading task.
    pub fn with_reading(
        config: FlipConfig,
        card: Card,
        assets: FlipAssets,
        reading: BackgroundTask<String>,
    ) -> Self {
        log::info!("Daily card: {}", card.title());
        Self {
            timer: PhaseTimer::new(config.intro_hold),
            title: Fade::opaque(fade_rate(config.intro_hold - config.title_fade_start)),
            label: Fade::transparent(fade_rate(config.label_fade)),
            description: Fade::transparent(fade_rate(config.description_fade)),
            content: Fade::opaque(fade_rate(config.fade_out)),
            cta: Fade::transparent(fade_rate(config.fade_out)),
            typing: Typewriter::new(config.typing_speed, config.wrap_columns),
            config,
            card,
            assets,
            phase: Phase::Intro,
            angle: 0.0,
            scale: 1.0,
            y_offset: 0.0,
            quiet: 0.0,
            reading,
            measure: GlyphMetrics::default(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_done(&self) -> bool {
        self.phase == Phase::Done
    }

    pub fn card(&self) -> &Card {
        &self.card
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn y_offset(&self) -> f32 {
        self.y_offset
    }

    pub fn typing(&self) -> &Typewriter {
        &self.typing
    }

    fn enter(&mut self, phase: Phase, duration: f32) {
        log::info!("Flip phase {:?} -> {:?}", self.phase, phase);
        self.phase = phase;
        self.timer = PhaseTimer::new(duration);
    }

    /// Advance the timeline by `dt`. Sound cues go to `ctx`.
    pub fn step(&mut self, dt: f32, ctx: &mut EngineContext) {
        match self.phase {
            Phase::Intro => {
                self.timer.advance(dt);
                if self.timer.elapsed() > self.config.title_fade_start {
                    self.title.lower(dt);
                }
                if self.timer.is_finished() {
                    self.title.set(0.0);
                    ctx.emit_sound(self.assets.flip_sound);
                    self.enter(Phase::Flip, self.config.flip_duration);
                }
            }
            Phase::Flip => {
                self.timer.advance(dt);
                self.angle = self.timer.lerp(0.0, 180.0);
                if self.timer.is_finished() {
                    self.angle = 180.0;
                    self.card.face_up = true;
                    self.enter(Phase::HoldAfterFlip, self.config.hold_after_flip);
                }
            }
            Phase::HoldAfterFlip => {
                self.timer.advance(dt);
                self.label.raise(dt);
                if self.timer.is_finished() {
                    self.enter(Phase::Shrink, self.config.shrink_duration);
                    self.timer = self.timer.with_easing(self.config.shrink_easing);
                }
            }
            Phase::Shrink => {
                self.timer.advance(dt);
                self.scale = self.timer.lerp(1.0, self.config.shrink_scale);
                self.y_offset = self.timer.lerp(0.0, self.config.shrink_offset);
                if self.timer.is_finished() {
                    self.start_description();
                }
            }
            Phase::Description => {
                let elapsed = self.timer.accumulate(dt);
                self.description.raise(dt);
                if let Some(stroke) = self.typing.tick(dt) {
                    if stroke.position % 2 == 0 {
                        ctx.emit_sound(self.assets.type_sound);
                    }
                }
                if self.typing.is_complete() {
                    self.quiet += dt.max(0.0);
                }
                if self.quiet >= self.config.description_quiet && elapsed >= self.config.description_min {
                    self.enter(Phase::FadeOutAndCta, self.config.fade_out + self.config.cta_hold);
                }
            }
            Phase::FadeOutAndCta => {
                self.timer.advance(dt);
                if self.timer.elapsed() < self.config.fade_out {
                    self.content.lower(dt);
                } else {
                    self.content.set(0.0);
                    self.cta.raise(dt);
                }
                if self.timer.is_finished() {
                    self.enter(Phase::Done, 0.0);
                }
            }
            Phase::Done => {}
        }
    }

    fn start_description(&mut self) {
        let text = match self.reading.get() {
            Some(text) => text.clone(),
            None => {
                log::warn!("Daily reading not ready; using placeholder");
                SILENT_CARDS.to_string()
            }
        };
        self.typing.set_text(&text, &self.measure);
        self.quiet = 0.0;
        self.enter(Phase::Description, 0.0);
    }

    fn draw(&self, ctx: &mut EngineContext) {
        ctx.scene.clear();
        let size = Vec2::new(self.config.canvas_width, self.config.canvas_height);
        let center = size / 2.0;
        ctx.spawn_sprite(
            "background",
            center,
            size,
            SpriteComponent::new(self.assets.background),
            RenderLayer::Background,
        );

        let content = self.content.unit();
        let card_pos = center + Vec2::new(0.0, self.y_offset);
        let card_height = self.config.card_height * self.scale;
        if content > 0.0 {
            let (side, width) = face_for_angle(self.angle);
            let (texture, rotation) = match side {
                Side::Back => (self.assets.card_back, 0.0),
                Side::Front if self.card.orientation == Orientation::Reversed => {
                    (self.assets.card_front, std::f32::consts::PI)
                }
                Side::Front => (self.assets.card_front, 0.0),
            };
            let id = ctx.next_id();
            ctx.scene.spawn(
                Entity::new(id)
                    .with_tag("card")
                    .with_pos(card_pos)
                    .with_rotation(rotation)
                    .with_scale(Vec2::new(self.config.card_width * width * self.scale, card_height))
                    .with_layer(RenderLayer::Objects)
                    .with_sprite(SpriteComponent::new(texture).with_alpha(content)),
            );
        }

        let top = card_pos.y + card_height / 2.0;
        let title = self.title.unit().min(content);
        if title > 0.0 {
            ctx.spawn_label("title", Vec2::new(center.x, top + 50.0), LabelComponent::new(TITLE, 36.0).with_alpha(title), RenderLayer::Text);
        }

        let label = self.label.unit().min(content);
        if label > 0.0 {
            ctx.spawn_label("card_name", Vec2::new(center.x, top + 90.0), LabelComponent::new(self.card.name.clone(), 32.0).with_alpha(label), RenderLayer::Text);
            ctx.spawn_label(
                "orientation",
                Vec2::new(center.x, top + 40.0),
                LabelComponent::new(self.card.orientation.label(), 28.0).with_alpha(label),
                RenderLayer::Text,
            );
        }

        let description = self.description.unit().min(content);
        if self.phase >= Phase::Description && description > 0.0 {
            let text_top = center.y - 40.0;
            for line in self.typing.visible_lines() {
                ctx.spawn_label(
                    "description",
                    Vec2::new(center.x - line.width / 2.0, text_top - line.index as f32 * 28.0),
                    LabelComponent::new(line.text, 18.0)
                        .with_alpha(description)
                        .with_align(TextAlign::Left),
                    RenderLayer::Text,
                );
            }
        }

        let cta = self.cta.unit();
        if cta > 0.0 {
            for (i, line) in CALL_TO_ACTION.iter().enumerate() {
                let y = center.y + 180.0 - i as f32 * 80.0;
                ctx.spawn_label("cta", Vec2::new(center.x, y), LabelComponent::new(*line, 48.0).with_alpha(cta), RenderLayer::Text);
            }
        }
    }
}

impl Game for CardFlipAnimator {
    fn config(&self) -> GameConfig {
        GameConfig {
            fixed_dt: self.config.frame_dt(),
            canvas_width: self.config.canvas_width,
            canvas_height: self.config.canvas_height,
            max_steps: 1,
            ..GameConfig::default()
        }
    }

    fn init(&mut self, ctx: &mut EngineContext) {
        self.draw(ctx);
    }

    fn update(&mut self, ctx: &mut EngineContext, _input: &InputQueue) {
        self.step(ctx.dt, ctx);
        self.draw(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tarot_game::provider::{ProviderError, StaticProvider};
    use tarot_game::standard_manifest;

    fn card(orientation: Orientation) -> Card {
        Card {
            id: 16,
            name: "The Tower".to_string(),
            orientation,
            jitter: Jitter::default(),
            face_up: false,
        }
    }

    fn animator(config: FlipConfig, orientation: Orientation, reading: &str) -> CardFlipAnimator {
        let card = card(orientation);
        let assets = FlipAssets::resolve(&standard_manifest(), &card).unwrap();
        CardFlipAnimator::with_reading(config, card, assets, BackgroundTask::ready("daily-reading", reading.to_string()))
    }

    fn run(anim: &mut CardFlipAnimator, ctx: &mut EngineContext, steps: usize) {
        for _ in 0..steps {
            anim.update(ctx, &InputQueue::new());
        }
    }

    /// Step until `phase` begins. The entering step does no work in the new phase.
    fn run_until(anim: &mut CardFlipAnimator, ctx: &mut EngineContext, phase: Phase) {
        for _ in 0..10_000 {
            if anim.phase() == phase {
                return;
            }
            anim.update(ctx, &InputQueue::new());
        }
        panic!("never reached {:?}", phase);
    }

    fn context(dt: f32) -> EngineContext {
        let mut ctx = EngineContext::new();
        ctx.dt = dt;
        ctx
    }

    #[test]
    fn face_mapping() {
        assert_eq!(face_for_angle(0.0), (Side::Back, 1.0));
        assert_eq!(face_for_angle(90.0), (Side::Front, 0.0));
        let (side, w) = face_for_angle(60.0);
        assert_eq!(side, Side::Back);
        assert!((w - 0.5).abs() < 1e-4);
        let (side, w) = face_for_angle(120.0);
        assert_eq!(side, Side::Front);
        assert!((w - 0.5).abs() < 1e-4);
        assert_eq!(face_for_angle(180.0), (Side::Front, 1.0));
    }

    #[test]
    #[should_panic]
    fn negative_flip_duration_panics_instead_of_skipping() {
        let config = FlipConfig { flip_duration: -1.0, ..FlipConfig::default() };
        let mut anim = animator(config, Orientation::Upright, "Falling.");
        let mut ctx = context(1.0 / 30.0);
        run_until(&mut anim, &mut ctx, Phase::HoldAfterFlip);
    }

    #[test]
    #[should_panic]
    fn negative_intro_hold_panics_at_construction() {
        let config = FlipConfig { intro_hold: -2.0, ..FlipConfig::default() };
        animator(config, Orientation::Upright, "Falling.");
    }

    #[test]
    fn phases_run_forward_to_done() {
        let dt = 0.05;
        let mut anim = animator(FlipConfig::default(), Orientation::Upright, "Short.");
        let mut ctx = context(dt);
        let mut seen = vec![anim.phase()];
        for _ in 0..2000 {
            anim.update(&mut ctx, &InputQueue::new());
            if *seen.last().unwrap() != anim.phase() {
                assert!(anim.phase() > *seen.last().unwrap(), "phase went backwards");
                seen.push(anim.phase());
            }
            if anim.is_done() {
                break;
            }
        }
        assert_eq!(
            seen,
            vec![
                Phase::Intro,
                Phase::Flip,
                Phase::HoldAfterFlip,
                Phase::Shrink,
                Phase::Description,
                Phase::FadeOutAndCta,
                Phase::Done
            ]
        );
    }

    #[test]
    fn flip_then_shrink_geometry() {
        let config = FlipConfig::default();
        let mut anim = animator(config.clone(), Orientation::Upright, "x");
        let mut ctx = context(0.1);
        run_until(&mut anim, &mut ctx, Phase::Flip);
        run(&mut anim, &mut ctx, 5);
        assert!((anim.angle() - 90.0).abs() < 0.01);

        run_until(&mut anim, &mut ctx, Phase::Description);
        assert_eq!(anim.angle(), 180.0);
        assert_eq!(anim.scale(), config.shrink_scale);
        assert_eq!(anim.y_offset(), config.shrink_offset);
    }

    #[test]
    fn reversed_front_is_upside_down() {
        let mut anim = animator(FlipConfig::default(), Orientation::Reversed, "x");
        let mut ctx = context(0.1);
        run_until(&mut anim, &mut ctx, Phase::HoldAfterFlip);
        run(&mut anim, &mut ctx, 1);
        let card = ctx.scene.find_by_tag("card").unwrap();
        assert!((card.rotation - std::f32::consts::PI).abs() < 1e-6);
        assert!(ctx.scene.find_by_tag("orientation").is_some());
    }

    #[test]
    fn description_waits_for_quiet_and_minimum() {
        let config = FlipConfig {
            description_min: 1.0,
            description_quiet: 3.0,
            ..FlipConfig::default()
        };
        let mut anim = animator(config, Orientation::Upright, "Hi.");
        let mut ctx = context(0.1);
        run_until(&mut anim, &mut ctx, Phase::Description);

        // Typing finishes in well under a second; the quiet period still holds.
        run(&mut anim, &mut ctx, 20);
        assert!(anim.typing().is_complete());
        assert_eq!(anim.phase(), Phase::Description);
        run(&mut anim, &mut ctx, 20);
        assert_eq!(anim.phase(), Phase::FadeOutAndCta);
    }

    #[test]
    fn typing_clicks_on_even_characters() {
        let config = FlipConfig { typing_speed: 0.05, ..FlipConfig::default() };
        let mut anim = animator(config, Orientation::Upright, "abcd");
        let mut ctx = context(0.05);
        run_until(&mut anim, &mut ctx, Phase::Description);
        let mut clicks = 0;
        for _ in 0..10 {
            ctx.clear_frame_data();
            anim.update(&mut ctx, &InputQueue::new());
            clicks += ctx.sounds.len();
        }
        assert_eq!(clicks, 2);
    }

    #[test]
    fn unfinished_reading_uses_placeholder() {
        let card = card(Orientation::Upright);
        let assets = FlipAssets::resolve(&standard_manifest(), &card).unwrap();
        let never = BackgroundTask::spawn(
            "slow",
            || {
                std::thread::sleep(std::time::Duration::from_secs(30));
                String::from("late")
            },
            |_| String::new(),
        );
        let mut anim = CardFlipAnimator::with_reading(FlipConfig::default(), card, assets, never);
        let mut ctx = context(0.1);
        run_until(&mut anim, &mut ctx, Phase::Description);
        assert_eq!(anim.typing().text(), Some(SILENT_CARDS));
    }

    #[test]
    fn failing_provider_falls_back() {
        let card = card(Orientation::Upright);
        let assets = FlipAssets::resolve(&standard_manifest(), &card).unwrap();
        let anim = CardFlipAnimator::new(FlipConfig::default(), card, assets, Arc::new(StaticProvider::new(Vec::new())));
        let deadline = std::time::Instant::now() + std::time::Duration::from_secs(5);
        while !anim.reading.is_ready() {
            assert!(std::time::Instant::now() < deadline);
            std::thread::sleep(std::time::Duration::from_millis(2));
        }
        assert_eq!(anim.reading.get().map(String::as_str), Some(SILENT_CARDS));
    }

    /// Answers only three-card spreads, like the reading service.
    struct SpreadOnlyProvider;

    impl TextProvider for SpreadOnlyProvider {
        fn generate(&self, request: &ReadingRequest) -> Result<tarot_game::Reading, ProviderError> {
            Err(ProviderError::Rejected(format!("{} cards", request.cards.len())))
        }
    }

    #[test]
    fn single_card_refused_by_the_service_reads_silent() {
        let card = card(Orientation::Reversed);
        let assets = FlipAssets::resolve(&standard_manifest(), &card).unwrap();
        let anim = CardFlipAnimator::new(FlipConfig::default(), card, assets, Arc::new(SpreadOnlyProvider));
        let deadline = std::time::Instant::now() + std::time::Duration::from_secs(5);
        while !anim.reading.is_ready() {
            assert!(std::time::Instant::now() < deadline);
            std::thread::sleep(std::time::Duration::from_millis(2));
        }
        assert_eq!(anim.reading.get().map(String::as_str), Some(SILENT_CARDS));
    }

    #[test]
    fn daily_card_is_from_the_catalog() {
        let mut rng = Rng::new(2024);
        for _ in 0..50 {
            let card = daily_card(&mut rng);
            assert!(card.id < DECK_SIZE);
            assert_eq!(Some(card.name.clone()), card_name(card.id));
        }
    }
}
