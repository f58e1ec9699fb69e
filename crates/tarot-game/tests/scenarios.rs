//! Full playthroughs driven through the engine runner, with scripted
//! collaborators standing in for the network.

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use glam::Vec2;
use tarot_engine::{GameRunner, InputEvent};
use tarot_game::deck::DECK_SIZE;
use tarot_game::layout::{
    spread_position, CATEGORY_CENTERS, MIDDLE_BUTTON, RIGHT_BUTTON, SUMMARY_OUTSIDE_BUTTON,
};
use tarot_game::provider::{FixedMeter, FixedProbe, StaticProvider};
use tarot_game::{standard_manifest, Connectivity, Services, Stage, TarotGame, EVENT_STAGE};

const DT: f32 = 1.0 / 60.0;

fn fortune() -> Vec<String> {
    (1..=5).map(|i| format!("Paragraph {}", i)).collect()
}

fn services(connectivity: Connectivity, spent: f64) -> Services {
    Services::new(
        Arc::new(StaticProvider::new(fortune())),
        Arc::new(FixedProbe(connectivity)),
    )
    .with_meter(Arc::new(FixedMeter(spent)))
}

fn runner_with(services: Services) -> GameRunner<TarotGame> {
    let game = TarotGame::new(services, &standard_manifest(), 99).unwrap();
    let mut runner = GameRunner::new(game);
    runner.init();
    settle(&mut runner);
    runner
}

fn runner() -> GameRunner<TarotGame> {
    runner_with(services(Connectivity::ONLINE, 0.0))
}

/// Tick until every background job has reported back.
fn settle(runner: &mut GameRunner<TarotGame>) {
    let deadline = Instant::now() + Duration::from_secs(5);
    while runner.game().is_waiting() {
        assert!(Instant::now() < deadline, "background work never finished");
        thread::sleep(Duration::from_millis(2));
        runner.tick(DT);
    }
    runner.tick(DT);
}

fn click(runner: &mut GameRunner<TarotGame>, p: Vec2) {
    runner.push_input(InputEvent::PointerDown { x: p.x, y: p.y });
    runner.tick(DT);
}

fn stage(runner: &GameRunner<TarotGame>) -> Stage {
    runner.game().session().stage
}

fn to_intro(runner: &mut GameRunner<TarotGame>) {
    click(runner, Vec2::new(640.0, 480.0));
    click(runner, MIDDLE_BUTTON.center());
}

fn first_card(runner: &GameRunner<TarotGame>) -> Vec2 {
    let deck = &runner.game().session().deck;
    let card = &deck.cards()[0];
    spread_position(0, deck.len()) + Vec2::new(card.jitter.x, card.jitter.y)
}

fn pick_three(runner: &mut GameRunner<TarotGame>) {
    for _ in 0..3 {
        let p = first_card(runner);
        click(runner, p);
        if stage(runner) == Stage::Spread {
            click(runner, MIDDLE_BUTTON.center());
        }
    }
}

#[test]
fn scenario_a_title_to_intro() {
    let mut runner = runner();
    assert_eq!(stage(&runner), Stage::Title);
    click(&mut runner, Vec2::new(100.0, 800.0));
    assert_eq!(stage(&runner), Stage::Outside);
    assert!(runner.events().iter().any(|e| e.kind_id() == EVENT_STAGE));

    click(&mut runner, MIDDLE_BUTTON.center());
    assert_eq!(stage(&runner), Stage::Intro);
}

#[test]
fn scenario_b_choose_intention() {
    let mut runner = runner();
    to_intro(&mut runner);
    click(&mut runner, CATEGORY_CENTERS[2]);

    let session = runner.game().session();
    assert_eq!(session.stage, Stage::Spread);
    assert_eq!(session.intention_name(), "Family and Friends");
    assert_eq!(session.deck.len(), DECK_SIZE);
}

#[test]
fn scenario_c_third_card_starts_loading() {
    let mut runner = runner();
    to_intro(&mut runner);
    click(&mut runner, CATEGORY_CENTERS[0]);
    pick_three(&mut runner);

    let session = runner.game().session();
    assert_eq!(session.stage, Stage::Loading);
    assert_eq!(session.drawn.len(), 3);
    assert_eq!(session.selected.len(), 3);
    assert_eq!(session.deck.len(), DECK_SIZE - 3);
}

#[test]
fn scenario_d_reading_arrives() {
    let mut runner = runner();
    to_intro(&mut runner);
    click(&mut runner, CATEGORY_CENTERS[1]);
    pick_three(&mut runner);
    settle(&mut runner);

    let session = runner.game().session();
    assert_eq!(session.stage, Stage::ReadingIntro);
    let fortune = session.fortune.as_ref().unwrap();
    assert_eq!(fortune.len(), 5);
    assert_eq!(fortune[0], "Paragraph 1");
}

#[test]
fn scenario_e_go_outside_forgets_reading() {
    let mut runner = runner();
    to_intro(&mut runner);
    click(&mut runner, CATEGORY_CENTERS[3]);
    pick_three(&mut runner);
    settle(&mut runner);

    click(&mut runner, MIDDLE_BUTTON.center());
    for _ in 0..3 {
        click(&mut runner, RIGHT_BUTTON.center());
    }
    assert_eq!(stage(&runner), Stage::ReadingSummary);

    click(&mut runner, SUMMARY_OUTSIDE_BUTTON.center());
    let session = runner.game().session();
    assert_eq!(session.stage, Stage::Outside);
    assert!(session.visited.none_visited());
    assert!(session.selected.is_empty());
    assert!(session.drawn.is_empty());
    assert!(session.fortune.is_none());
}

#[test]
fn spent_budget_keeps_the_door_shut() {
    let mut runner = runner_with(services(Connectivity::ONLINE, 4.90));
    to_intro(&mut runner);
    assert_eq!(stage(&runner), Stage::Outside);
    assert!(!runner.game().session().has_tokens);
}

#[test]
fn offline_start_shows_popup_and_retry_rechecks() {
    let offline = Connectivity { internet: false, backend: false };
    let mut runner = runner_with(services(offline, 0.0));
    click(&mut runner, Vec2::new(640.0, 480.0));
    assert!(runner.game().session().connection_popup);

    click(&mut runner, MIDDLE_BUTTON.center());
    assert_eq!(stage(&runner), Stage::Outside);
    assert!(runner.game().is_waiting() || runner.game().session().connection_popup);
    settle(&mut runner);
    assert!(runner.game().session().connection_popup);
}

#[test]
fn window_clicks_are_letterboxed() {
    let mut runner = runner();
    // Wide window: 4:3 canvas scaled by 0.5 with 160px bars each side.
    runner.resize(960.0, 480.0);
    runner.pointer_down(50.0, 240.0);
    runner.tick(DT);
    assert_eq!(stage(&runner), Stage::Title);

    runner.pointer_down(480.0, 240.0);
    runner.tick(DT);
    assert_eq!(stage(&runner), Stage::Outside);
}
