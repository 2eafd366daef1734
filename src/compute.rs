/// Game-logic functions.
///
/// Every function takes the `GameState` it advances by mutable reference;
/// the only other inputs are the injected RNG and the audio sink, so tests
/// can drive whole rounds deterministically with a seeded RNG.

use rand::Rng;
use tracing::debug;

use crate::assets::SpriteSet;
use crate::audio::{AudioCue, Cue};
use crate::bitmap::ScaleMode;
use crate::block::{self, pair_mut, Block};
use crate::config::GameConfig;
use crate::creature::{Creature, FALL_SPEED};
use crate::entities::{
    CreatureState, GameState, ShotOutcome, BOT_CENTER_BOX, BOT_LEFT_BOX, BOT_RIGHT_BOX,
    BOX_NAMES, MID_LEFT_BOX, MID_RIGHT_BOX, TOP_BOX,
};
use crate::scoreboard::Scoreboard;

/// Total-score bonus for knocking one of the top three boxes off the stack.
pub const KNOCKDOWN_BONUS: i32 = 10;
/// Vertical speed of an unsupported box.
pub const BOX_FALL_SPEED: f32 = 5.0;
/// The slingshot sits this far above the pointer.
const SLINGSHOT_LIFT: i32 = 15;

/// Boxes whose support is checked each tick, with the boxes that hold each up.
const SUPPORTS: [(usize, &[usize]); 3] = [
    (TOP_BOX, &[MID_LEFT_BOX, MID_RIGHT_BOX]),
    (MID_LEFT_BOX, &[BOT_LEFT_BOX, BOT_CENTER_BOX]),
    (MID_RIGHT_BOX, &[BOT_CENTER_BOX, BOT_RIGHT_BOX]),
];

/// Same-row neighbours that pass horizontal speed to each other.
const NEIGHBOURS: [(usize, usize); 3] = [
    (MID_LEFT_BOX, MID_RIGHT_BOX),
    (BOT_LEFT_BOX, BOT_CENTER_BOX),
    (BOT_CENTER_BOX, BOT_RIGHT_BOX),
];

// ── Layout ───────────────────────────────────────────────────────────────────

/// Size and start positions of the box pyramid for a window.
///
/// Rows touch exactly, so a freshly laid-out stack is fully supported.
pub fn box_layout(width: i32, height: i32) -> (f64, f64, [(i32, i32); 6]) {
    let box_w = (width as f64 / 10.0).round().max(1.0);
    let box_h = (height as f64 * 0.115).round().max(1.0);
    let (bw, bh) = (box_w as i32, box_h as i32);

    let bottom = block::ground_line(height);
    let middle = bottom - bh;
    let top = middle - bh;
    let centre = (width as f64 * 0.4) as i32;

    let positions = [
        (centre, top),
        (centre - bw / 2, middle),
        (centre - bw / 2 + bw, middle),
        (centre - bw, bottom),
        (centre, bottom),
        (centre + bw, bottom),
    ];
    (box_w, box_h, positions)
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the scene from `sprites` and lay it out for a `width`×`height` window.
pub fn init_state(
    sprites: SpriteSet,
    config: &GameConfig,
    width: i32,
    height: i32,
    rng: &mut impl Rng,
) -> GameState {
    let SpriteSet {
        background,
        slingshot,
        creature,
        block,
        flash,
    } = sprites;

    let blocks = BOX_NAMES
        .iter()
        .map(|name| {
            let mut image = block.clone();
            image.set_name(*name);
            Block::new(image, 0, 0)
        })
        .collect();

    let mut state = GameState {
        background,
        slingshot,
        creature: Creature::new(creature, rng),
        blocks,
        flash,
        scoreboard: Scoreboard::new(config.score_tick_limit),
        width,
        height,
        frame: 0,
    };
    resize(&mut state, width, height);
    state
}

// ── Input ────────────────────────────────────────────────────────────────────

/// Re-layout everything for a new window size.
pub fn resize(state: &mut GameState, width: i32, height: i32) {
    let width = width.max(1);
    let height = height.max(1);
    state.width = width;
    state.height = height;

    state.background.resize(width as f64, height as f64, ScaleMode::Exact);
    state.slingshot.resize(1.0, 0.7, ScaleMode::Scaled);
    state
        .creature
        .resize(width as f64 / 9.6, height as f64 / 6.0, ScaleMode::Exact);
    state.flash.resize(width as f64, height as f64, ScaleMode::Exact);

    let (box_w, box_h, positions) = box_layout(width, height);
    for (block, (x, y)) in state.blocks.iter_mut().zip(positions) {
        block.relayout(box_w, box_h, x, y);
    }
}

pub fn pointer_move(state: &mut GameState, x: i32, y: i32) {
    let half = state.slingshot.width() as i32 / 2;
    state.slingshot.move_to(x - half, y - SLINGSHOT_LIFT);
}

/// A click at `(x, y)`.  Hitting the flying creature ends the round with the
/// current round score banked.
pub fn pointer_press(state: &mut GameState, x: i32, y: i32, audio: &mut impl AudioCue) -> ShotOutcome {
    if state.creature.state() != CreatureState::Flying {
        return ShotOutcome::Ignored;
    }
    if state.creature.check_hit(x, y) && state.creature.hit() {
        state.scoreboard.end_round();
        audio.play(Cue::Shot);
        debug!(x, y, round = state.scoreboard.round(), "creature hit");
        ShotOutcome::Hit
    } else {
        audio.play(Cue::Miss);
        ShotOutcome::Miss
    }
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

fn next_round(state: &mut GameState) {
    for block in &mut state.blocks {
        block.reset();
    }
    state.scoreboard.start_next_round();
}

/// Advance the simulation by one tick: creature, collisions, boxes, score.
pub fn tick(state: &mut GameState, rng: &mut impl Rng) {
    state.frame += 1;
    let (width, height) = (state.width, state.height);

    // ── 1. Creature ──────────────────────────────────────────────────────────
    if state.creature.update(width, height, rng) {
        next_round(state);
    }

    // ── 2. Collisions and box motion (only once the creature is down) ────────
    if state.creature.state() != CreatureState::Flying {
        resolve_creature_contacts(state);
        resolve_box_support(state);
        for &(a, b) in &NEIGHBOURS {
            let (left, right) = pair_mut(&mut state.blocks, a, b);
            left.check_collision_with_block(right, true);
        }
        for block in &mut state.blocks {
            block.update(width, height);
        }
    }

    // ── 3. Scoreboard ────────────────────────────────────────────────────────
    if state.scoreboard.tick() {
        state.creature.reset(width, rng);
        next_round(state);
    }
}

fn resolve_creature_contacts(state: &mut GameState) {
    let mut touching = false;
    for block in &mut state.blocks {
        if block.check_collision_with_creature(&mut state.creature) {
            touching = true;
        }
    }
    if !touching {
        state.creature.set_y_vel(FALL_SPEED);
    }
}

/// Unsupported boxes start to fall; the first fall of each box in a round
/// earns the knock-down bonus.
fn resolve_box_support(state: &mut GameState) {
    for &(upper, below) in &SUPPORTS {
        let supported = below.iter().any(|&b| {
            let (top, under) = pair_mut(&mut state.blocks, upper, b);
            top.check_collision_with_block(under, false)
        });
        if supported {
            continue;
        }
        let block = &mut state.blocks[upper];
        block.set_y_vel(BOX_FALL_SPEED);
        if block.knock_down() {
            debug!(name = block.name(), "box knocked down");
            state.scoreboard.add_points(KNOCKDOWN_BONUS);
        }
    }
}
