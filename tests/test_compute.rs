mod common;

use common::{Call, RecordingSurface};
use unhappy_reptiles::assets::SpriteSet;
use unhappy_reptiles::audio::{Cue, CueQueue};
use unhappy_reptiles::compose::compose_frame;
use unhappy_reptiles::compute::*;
use unhappy_reptiles::config::GameConfig;
use unhappy_reptiles::creature;
use unhappy_reptiles::entities::*;

use rand::rngs::StdRng;
use rand::SeedableRng;

const W: i32 = 640;
const H: i32 = 400;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn make_state_with(config: &GameConfig) -> GameState {
    init_state(SpriteSet::placeholders(), config, W, H, &mut seeded_rng())
}

fn make_state() -> GameState {
    make_state_with(&GameConfig::default())
}

/// Park a shot-down creature in the far right corner, clear of the boxes.
fn park_creature(s: &mut GameState, state: CreatureState) {
    s.creature.move_to(560, 0);
    s.creature.set_x_vel(0.0);
    s.creature.set_state(state);
}

// ── init_state / layout ───────────────────────────────────────────────────────

#[test]
fn init_state_lays_out_the_pyramid() {
    let s = make_state();
    assert_eq!(s.blocks.len(), BOX_COUNT);
    let names: Vec<&str> = s.blocks.iter().map(|b| b.name()).collect();
    assert_eq!(names, BOX_NAMES.to_vec());

    // 64×46 boxes, bottom row on the ground line at 336.
    assert_eq!((s.blocks[TOP_BOX].x(), s.blocks[TOP_BOX].y()), (256, 244));
    assert_eq!((s.blocks[MID_LEFT_BOX].x(), s.blocks[MID_LEFT_BOX].y()), (224, 290));
    assert_eq!((s.blocks[MID_RIGHT_BOX].x(), s.blocks[MID_RIGHT_BOX].y()), (288, 290));
    assert_eq!((s.blocks[BOT_LEFT_BOX].x(), s.blocks[BOT_LEFT_BOX].y()), (192, 336));
    assert_eq!((s.blocks[BOT_CENTER_BOX].x(), s.blocks[BOT_CENTER_BOX].y()), (256, 336));
    assert_eq!((s.blocks[BOT_RIGHT_BOX].x(), s.blocks[BOT_RIGHT_BOX].y()), (320, 336));
}

#[test]
fn init_state_starts_round_one_flying() {
    let s = make_state();
    assert_eq!(s.creature.state(), CreatureState::Flying);
    assert_eq!((s.creature.x(), s.creature.y()), (0, 0));
    assert_eq!(s.creature.x_vel(), creature::INITIAL_X_VEL);
    assert_eq!((s.creature.width(), s.creature.height()), (67, 67));
    assert_eq!(s.scoreboard.round(), 1);
    assert_eq!(s.scoreboard.round_score(), 100);
    assert_eq!((s.width, s.height), (W, H));
    assert_eq!(s.frame, 0);
}

#[test]
fn init_state_uses_configured_tick_limit() {
    let config = GameConfig {
        score_tick_limit: 2,
        ..GameConfig::default()
    };
    let mut s = make_state_with(&config);
    let mut rng = seeded_rng();
    tick(&mut s, &mut rng);
    tick(&mut s, &mut rng);
    assert_eq!(s.scoreboard.round_score(), 90);
}

#[test]
fn box_layout_rows_touch() {
    let (bw, bh, pos) = box_layout(W, H);
    assert_eq!((bw, bh), (64.0, 46.0));
    assert_eq!(pos[MID_LEFT_BOX].1 + bh as i32, pos[BOT_LEFT_BOX].1);
    assert_eq!(pos[TOP_BOX].1 + bh as i32, pos[MID_LEFT_BOX].1);
    assert_eq!(pos[MID_LEFT_BOX].0 + bw as i32, pos[MID_RIGHT_BOX].0);
}

#[test]
fn box_layout_never_degenerates() {
    let (bw, bh, _) = box_layout(1, 1);
    assert!(bw >= 1.0 && bh >= 1.0);
}

// ── resize / pointer_move ─────────────────────────────────────────────────────

#[test]
fn resize_relays_everything_out() {
    let mut s = make_state();
    s.blocks[TOP_BOX].set_x_vel(4.0);
    resize(&mut s, 320, 200);

    assert_eq!((s.width, s.height), (320, 200));
    assert_eq!((s.background.width(), s.background.height()), (320, 200));
    assert_eq!((s.flash.width(), s.flash.height()), (320, 200));
    assert_eq!(s.blocks[BOT_CENTER_BOX].start_position(), (128, 168));
    assert_eq!(s.blocks[TOP_BOX].start_position(), (128, 122));
    assert_eq!(s.blocks[TOP_BOX].x_vel(), 0.0);
}

#[test]
fn slingshot_follows_the_pointer() {
    let mut s = make_state();
    pointer_move(&mut s, 100, 100);
    // 30 px wide placeholder: centred on x, lifted 15 px.
    assert_eq!((s.slingshot.x(), s.slingshot.y()), (85, 85));
}

// ── pointer_press ─────────────────────────────────────────────────────────────

#[test]
fn hitting_the_creature_ends_the_round() {
    let mut s = make_state();
    let mut cues = CueQueue::default();

    assert_eq!(pointer_press(&mut s, 30, 30, &mut cues), ShotOutcome::Hit);
    assert_eq!(s.creature.state(), CreatureState::Falling);
    assert!(!s.scoreboard.is_round_active());
    assert_eq!(s.scoreboard.total_score(), 100);
    assert_eq!(cues.pending(), &[Cue::Shot]);
}

#[test]
fn missing_plays_the_miss_cue() {
    let mut s = make_state();
    let mut cues = CueQueue::default();

    assert_eq!(pointer_press(&mut s, 600, 380, &mut cues), ShotOutcome::Miss);
    assert_eq!(s.creature.state(), CreatureState::Flying);
    assert!(s.scoreboard.is_round_active());
    assert_eq!(cues.pending(), &[Cue::Miss]);
}

#[test]
fn presses_are_ignored_unless_flying() {
    let mut s = make_state();
    let mut cues = CueQueue::default();
    pointer_press(&mut s, 30, 30, &mut cues);
    let _ = cues.drain();

    assert_eq!(pointer_press(&mut s, 30, 30, &mut cues), ShotOutcome::Ignored);
    assert!(cues.pending().is_empty());
    assert_eq!(s.scoreboard.total_score(), 100);
}

// ── tick ──────────────────────────────────────────────────────────────────────

#[test]
fn tick_advances_frame_counter() {
    let mut s = make_state();
    let mut rng = seeded_rng();
    for _ in 0..5 {
        tick(&mut s, &mut rng);
    }
    assert_eq!(s.frame, 5);
}

#[test]
fn flying_creature_leaves_boxes_alone() {
    let mut s = make_state();
    let mut rng = seeded_rng();
    s.blocks[TOP_BOX].move_to(256, 100);
    for _ in 0..10 {
        tick(&mut s, &mut rng);
    }
    assert_eq!(s.blocks[TOP_BOX].y(), 100);
    assert_eq!(s.scoreboard.total_score(), 0);
}

#[test]
fn fresh_stack_is_fully_supported() {
    let mut s = make_state();
    let mut rng = seeded_rng();
    park_creature(&mut s, CreatureState::Falling);

    tick(&mut s, &mut rng);
    for block in &s.blocks {
        assert!(!block.is_knocked_down(), "{} fell", block.name());
        assert_eq!((block.x(), block.y()), block.start_position());
    }
    assert_eq!(s.scoreboard.total_score(), 0);
}

#[test]
fn unsupported_box_falls_and_earns_bonus_once() {
    let mut s = make_state();
    let mut rng = seeded_rng();
    park_creature(&mut s, CreatureState::Falling);
    s.blocks[TOP_BOX].move_to(256, 100);

    for _ in 0..10 {
        tick(&mut s, &mut rng);
    }
    assert!(s.blocks[TOP_BOX].is_knocked_down());
    assert_eq!(s.blocks[TOP_BOX].y(), 150);
    assert_eq!(s.scoreboard.total_score(), KNOCKDOWN_BONUS);
}

#[test]
fn knocked_box_falls_through_to_the_ground() {
    let mut s = make_state();
    let mut rng = seeded_rng();
    park_creature(&mut s, CreatureState::Falling);
    s.blocks[TOP_BOX].move_to(256, 200);

    for _ in 0..40 {
        tick(&mut s, &mut rng);
    }
    // A falling box keeps its vertical speed until the ground stops it.
    assert_eq!(s.blocks[TOP_BOX].y(), 336);
    assert_eq!(s.blocks[TOP_BOX].y_vel(), BOX_FALL_SPEED);
    assert_eq!(s.scoreboard.total_score(), KNOCKDOWN_BONUS);
}

#[test]
fn creature_falling_on_the_stack_lands_on_top() {
    let mut s = make_state();
    let mut rng = seeded_rng();
    let mut cues = CueQueue::default();
    // Right above the top box.
    s.creature.move_to(256, 150);
    s.creature.set_x_vel(0.0);
    assert_eq!(pointer_press(&mut s, 280, 180, &mut cues), ShotOutcome::Hit);

    let mut landed = false;
    for _ in 0..20 {
        tick(&mut s, &mut rng);
        if s.creature.state() == CreatureState::Grounded {
            landed = true;
            break;
        }
    }
    assert!(landed);
    assert!(s.creature.y() < 244);
}

#[test]
fn grounded_timeout_starts_next_round_and_restacks() {
    let mut s = make_state();
    let mut rng = seeded_rng();
    park_creature(&mut s, CreatureState::Grounded);
    s.creature.move_to(560, creature::ground_line(H));
    s.blocks[TOP_BOX].move_to(256, 100);

    for _ in 0..creature::RESET_TIME {
        tick(&mut s, &mut rng);
    }

    assert_eq!(s.creature.state(), CreatureState::Flying);
    assert_eq!(s.scoreboard.round(), 2);
    assert_eq!(s.scoreboard.round_score(), 100);
    assert!(s.scoreboard.is_round_active());
    assert_eq!(s.scoreboard.total_score(), KNOCKDOWN_BONUS);
    let top = &s.blocks[TOP_BOX];
    assert_eq!((top.x(), top.y()), (256, 244));
    assert!(!top.is_knocked_down());
}

#[test]
fn score_timeout_resets_creature_and_starts_next_round() {
    let config = GameConfig {
        score_tick_limit: 1,
        ..GameConfig::default()
    };
    let mut s = make_state_with(&config);
    let mut rng = seeded_rng();

    for _ in 0..9 {
        tick(&mut s, &mut rng);
    }
    assert_eq!(s.scoreboard.round(), 1);
    assert_eq!(s.scoreboard.round_score(), 10);

    tick(&mut s, &mut rng);
    assert_eq!(s.scoreboard.round(), 2);
    assert_eq!(s.scoreboard.round_score(), 100);
    assert_eq!(s.scoreboard.total_score(), 0);
    assert_eq!(s.creature.state(), CreatureState::Flying);
    assert_eq!(s.creature.y(), 0);
}

#[test]
fn shot_round_waits_for_the_creature_to_land() {
    let mut s = make_state();
    let mut rng = seeded_rng();
    let mut cues = CueQueue::default();
    pointer_press(&mut s, 30, 30, &mut cues);

    // Score is frozen while the round is over.
    for _ in 0..30 {
        tick(&mut s, &mut rng);
        assert_eq!(s.scoreboard.round(), 1);
        assert_eq!(s.scoreboard.round_score(), 100);
    }
}

// ── compose_frame ─────────────────────────────────────────────────────────────

fn unkeyed_full_window(s: &RecordingSurface) -> usize {
    s.calls
        .iter()
        .filter(|c| {
            matches!(c, Call::Image { width: 640, height: 400, keyed: false, .. })
        })
        .count()
}

#[test]
fn frame_draws_every_layer() {
    let mut s = make_state();
    let mut surface = RecordingSurface::default();
    compose_frame(&mut s, &mut surface);

    // 3 scenery + 6 boxes + 1 creature frame + 3 slingshot parts.
    assert_eq!(surface.images().len(), 13);
    assert!(matches!(surface.calls[0], Call::Image { keyed: true, .. }));
    assert_eq!(
        surface.texts(),
        vec!["total score : 0", "round score : 100", "round : 1"]
    );
}

#[test]
fn hit_flash_shows_for_one_frame() {
    let mut s = make_state();
    let mut cues = CueQueue::default();
    pointer_press(&mut s, 30, 30, &mut cues);

    let mut first = RecordingSurface::default();
    compose_frame(&mut s, &mut first);
    assert_eq!(unkeyed_full_window(&first), 1);
    assert_eq!(first.images().len(), 14);

    let mut second = RecordingSurface::default();
    compose_frame(&mut s, &mut second);
    assert_eq!(unkeyed_full_window(&second), 0);
}
