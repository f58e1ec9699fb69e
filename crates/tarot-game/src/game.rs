use std::collections::HashMap;

use tarot_engine::*;

use crate::fetch::{spawn_status_check, FetchGate, FetchOutcome, Services, StatusReport};
use crate::session::{Command, Session};
use crate::sound::{Sfx, SoundSettings};
use crate::stage::Stage;
use crate::stages;
use crate::textures::Textures;

// Game event kinds (game -> host)
pub const EVENT_STAGE: u32 = 1;
pub const EVENT_AUDIO_SETTINGS: u32 = 2;
pub const EVENT_QUIT: u32 = 3;

pub struct TarotGame {
    session: Session,
    services: Services,
    fetch: FetchGate,
    status: Option<BackgroundTask<StatusReport>>,
    textures: Textures,
    sounds: HashMap<Sfx, SoundEvent>,
    measure: GlyphMetrics,
    quit_requested: bool,
}

impl TarotGame {
    /// Resolve every texture and sound up front; a missing asset is fatal.
    pub fn new(services: Services, manifest: &AssetManifest, seed: u64) -> Result<Self, AssetError> {
        let textures = Textures::resolve(manifest)?;
        let sounds = Sfx::ALL
            .iter()
            .map(|sfx| manifest.sound(sfx.name()).map(|event| (*sfx, event)))
            .collect::<Result<HashMap<_, _>, _>>()?;
        Ok(Self {
            session: Session::new(Rng::new(seed)),
            services,
            fetch: FetchGate::new(),
            status: None,
            textures,
            sounds,
            measure: GlyphMetrics::default(),
            quit_requested: false,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    /// True while a status check or reading request is still running.
    pub fn is_waiting(&self) -> bool {
        self.fetch.in_flight() || self.status.as_ref().is_some_and(|t| !t.is_ready())
    }

    fn check_status(&mut self) {
        if self.status.as_ref().is_some_and(|t| !t.is_ready()) {
            log::debug!("Status check already running");
            return;
        }
        self.status = Some(spawn_status_check(&self.services));
    }

    fn run_commands(&mut self, ctx: &mut EngineContext) {
        for command in self.session.take_commands() {
            match command {
                Command::FetchReading(request) => {
                    self.fetch.start(&self.services, request);
                }
                Command::CheckStatus => self.check_status(),
                Command::Quit => {
                    log::info!("Quit requested");
                    self.quit_requested = true;
                    ctx.emit_event(GameEvent::new(EVENT_QUIT, 0.0, 0.0, 0.0));
                }
            }
        }
    }

    fn poll_workers(&mut self) {
        let report = self.status.as_ref().and_then(|t| t.get().copied());
        if let Some(report) = report {
            self.status = None;
            self.session.apply_status(report);
        }
        match self.fetch.poll() {
            Some(FetchOutcome::Reading(paragraphs)) => {
                self.session.receive_fortune(paragraphs);
            }
            Some(FetchOutcome::Offline(connectivity)) => self.session.connection_lost(connectivity),
            None => {}
        }
    }

    fn tick_loading(&mut self, dt: f32) {
        if self.session.stage != Stage::Loading || self.session.connection_popup {
            return;
        }
        self.fetch.tick(dt);
        self.session.loading_progress = self.fetch.progress();
        self.session.loading_frame = self.fetch.frame();
    }

    fn play_cues(&mut self, ctx: &mut EngineContext) {
        let cues = self.session.take_cues();
        if !self.session.sound.sfx_enabled {
            return;
        }
        for sfx in cues {
            if let Some(event) = self.sounds.get(&sfx) {
                ctx.emit_sound(*event);
            }
        }
    }
}

fn audio_event(sound: &SoundSettings) -> GameEvent {
    let music = if sound.music_enabled { sound.music_volume } else { 0.0 };
    let sfx = if sound.sfx_enabled { sound.sfx_volume } else { 0.0 };
    GameEvent::new(EVENT_AUDIO_SETTINGS, music, sfx, 0.0)
}

impl Game for TarotGame {
    fn init(&mut self, ctx: &mut EngineContext) {
        self.check_status();
        ctx.emit_event(audio_event(&self.session.sound));
        stages::draw(&self.session, ctx, &self.textures);
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        let dt = ctx.dt;
        let stage_before = self.session.stage;
        let sound_before = self.session.sound;

        for event in input.iter() {
            match event {
                InputEvent::PointerDown { x, y } => stages::handle_click(&mut self.session, glam::Vec2::new(*x, *y)),
                InputEvent::PointerMove { x, y } => stages::handle_hover(&mut self.session, glam::Vec2::new(*x, *y)),
                InputEvent::Custom { kind, .. } => log::debug!("Ignoring custom input {}", kind),
            }
        }

        self.run_commands(ctx);
        self.poll_workers();

        stages::tick(&mut self.session, dt, &self.measure);
        self.tick_loading(dt);
        self.play_cues(ctx);

        if self.session.stage != stage_before {
            ctx.emit_event(GameEvent::new(EVENT_STAGE, self.session.stage.index() as f32, 0.0, 0.0));
        }
        if self.session.sound != sound_before {
            ctx.emit_event(audio_event(&self.session.sound));
        }

        stages::draw(&self.session, ctx, &self.textures);
    }
}
