//! Per-stage input handling, timing and drawing.
//!
//! Each stage module exposes `click`, `hover` and `draw` over the shared
//! `Session`. Overlays (options, credits) take all input while open, and
//! the options button is live on every stage after the title.

pub mod intro;
pub mod loading;
pub mod menu;
pub mod outside;
pub mod reading;
pub mod spread;
pub mod title;

use glam::Vec2;
use tarot_engine::{
    EngineContext, Entity, LabelComponent, RenderLayer, SpriteComponent, TextAlign, TextMeasure,
    TextureId, Typewriter,
};

use crate::layout::{HoverTarget, Rect, BUTTON_SIZE, CANVAS_HEIGHT, CANVAS_WIDTH, OPTIONS_BUTTON};
use crate::session::{Overlay, Session};
use crate::stage::Stage;
use crate::textures::Textures;

pub const FONT_SIZE: f32 = 18.0;
pub const LINE_HEIGHT: f32 = 27.0;

pub fn handle_click(session: &mut Session, p: Vec2) {
    if let Some(overlay) = session.overlay {
        menu::click(session, overlay, p);
        return;
    }
    if session.stage != Stage::Title && OPTIONS_BUTTON.contains(p) {
        session.open_overlay(Overlay::Options);
        return;
    }
    match session.stage {
        Stage::Title => title::click(session, p),
        Stage::Outside => outside::click(session, p),
        Stage::Intro => intro::click(session, p),
        Stage::Spread => spread::click(session, p),
        Stage::Loading => loading::click(session, p),
        Stage::ReadingIntro
        | Stage::ReadingCard1
        | Stage::ReadingCard2
        | Stage::ReadingCard3
        | Stage::ReadingSummary => reading::click(session, p),
    }
}

pub fn handle_hover(session: &mut Session, p: Vec2) {
    session.hover = None;
    session.hovered_card = None;
    if let Some(overlay) = session.overlay {
        menu::hover(session, overlay, p);
        return;
    }
    if session.stage != Stage::Title && OPTIONS_BUTTON.contains(p) {
        session.hover = Some(HoverTarget::Options);
        return;
    }
    match session.stage {
        Stage::Title => {}
        Stage::Outside => outside::hover(session, p),
        Stage::Intro => intro::hover(session, p),
        Stage::Spread => spread::hover(session, p),
        Stage::Loading => loading::hover(session, p),
        _ => reading::hover(session, p),
    }
}

/// Per-tick timing: typing on text stages, ambience outside.
pub fn tick(session: &mut Session, dt: f32, measure: &dyn TextMeasure) {
    match session.stage {
        Stage::Outside => outside::tick(session, dt),
        Stage::Intro
        | Stage::ReadingIntro
        | Stage::ReadingCard1
        | Stage::ReadingCard2
        | Stage::ReadingCard3
        | Stage::ReadingSummary => {
            session.sync_typing(measure);
            session.tick_typing(dt);
        }
        _ => {}
    }
}

/// Rebuild the scene for the current stage.
pub fn draw(session: &Session, ctx: &mut EngineContext, textures: &Textures) {
    ctx.scene.clear();
    let mut painter = Painter::new(ctx, textures, session.hover);
    match session.stage {
        Stage::Title => title::draw(session, &mut painter),
        Stage::Outside => outside::draw(session, &mut painter),
        Stage::Intro => intro::draw(session, &mut painter),
        Stage::Spread => spread::draw(session, &mut painter),
        Stage::Loading => loading::draw(session, &mut painter),
        _ => reading::draw(session, &mut painter),
    }
    if session.stage != Stage::Title {
        painter.button_sized(
            HoverTarget::Options,
            "Options",
            OPTIONS_BUTTON.center(),
            OPTIONS_BUTTON.max - OPTIONS_BUTTON.min,
            RenderLayer::Objects,
        );
    }
    if let Some(overlay) = session.overlay {
        menu::draw(session, overlay, &mut painter);
    }
}

/// Scene-building helper shared by the stage modules.
pub struct Painter<'a> {
    ctx: &'a mut EngineContext,
    pub textures: &'a Textures,
    hover: Option<HoverTarget>,
}

impl<'a> Painter<'a> {
    pub fn new(ctx: &'a mut EngineContext, textures: &'a Textures, hover: Option<HoverTarget>) -> Self {
        Self { ctx, textures, hover }
    }

    pub fn sprite(&mut self, tag: &str, texture: TextureId, pos: Vec2, size: Vec2, layer: RenderLayer) {
        self.ctx.spawn_sprite(tag, pos, size, SpriteComponent::new(texture), layer);
    }

    pub fn sprite_rotated(
        &mut self,
        tag: &str,
        texture: TextureId,
        pos: Vec2,
        size: Vec2,
        rotation: f32,
        layer: RenderLayer,
    ) {
        let id = self.ctx.next_id();
        self.ctx.scene.spawn(
            Entity::new(id)
                .with_tag(tag)
                .with_pos(pos)
                .with_scale(size)
                .with_rotation(rotation)
                .with_layer(layer)
                .with_sprite(SpriteComponent::new(texture)),
        );
    }

    /// Full-canvas backdrop.
    pub fn backdrop(&mut self, texture: TextureId) {
        self.sprite(
            "background",
            texture,
            Vec2::new(CANVAS_WIDTH / 2.0, CANVAS_HEIGHT / 2.0),
            Vec2::new(CANVAS_WIDTH, CANVAS_HEIGHT),
            RenderLayer::Background,
        );
    }

    pub fn text(&mut self, tag: &str, text: &str, pos: Vec2, size: f32, layer: RenderLayer) {
        self.ctx.spawn_label(tag, pos, LabelComponent::new(text, size), layer);
    }

    pub fn button(&mut self, target: HoverTarget, copy: &str, area: Rect, layer: RenderLayer) {
        let center = Vec2::new(area.center().x, area.min.y + BUTTON_SIZE.y / 2.0 + 20.0);
        self.button_sized(target, copy, center, BUTTON_SIZE, layer);
    }

    pub fn button_sized(&mut self, target: HoverTarget, copy: &str, center: Vec2, size: Vec2, layer: RenderLayer) {
        let texture = if self.hover == Some(target) {
            self.textures.button_hover
        } else {
            self.textures.button
        };
        let id = self.ctx.next_id();
        self.ctx.scene.spawn(
            Entity::new(id)
                .with_tag("button")
                .with_pos(center)
                .with_scale(size)
                .with_layer(layer)
                .with_sprite(SpriteComponent::new(texture))
                .with_label(LabelComponent::new(copy, FONT_SIZE * 1.2)),
        );
    }

    /// Typed lines, each centered on `center_x` using its measured width.
    pub fn typed_lines(&mut self, typing: &Typewriter, center_x: f32, top_y: f32, layer: RenderLayer) {
        for line in typing.visible_lines() {
            let pos = Vec2::new(
                center_x - line.width / 2.0,
                top_y - line.index as f32 * LINE_HEIGHT,
            );
            self.ctx.spawn_label(
                "typed_line",
                pos,
                LabelComponent::new(line.text, FONT_SIZE).with_align(TextAlign::Left),
                layer,
            );
        }
    }
}
