/// Shared game data types: the master state plus small enums.

use crate::bitmap::BitmapImage;
use crate::block::Block;
use crate::composite::CompositeImage;
use crate::creature::Creature;
use crate::scoreboard::Scoreboard;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CreatureState {
    Flying,
    /// Shot down, spinning toward the ground.
    Falling,
    /// On the ground or on a box, rolling to a stop.
    Grounded,
}

/// Vertical bob direction while flying.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlyState {
    Up,
    Down,
}

impl FlyState {
    pub fn flipped(self) -> Self {
        match self {
            FlyState::Up => FlyState::Down,
            FlyState::Down => FlyState::Up,
        }
    }
}

/// What a pointer press did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShotOutcome {
    Hit,
    Miss,
    /// The creature was not flying; nothing to shoot at.
    Ignored,
}

// ── Box pyramid ───────────────────────────────────────────────────────────────

pub const TOP_BOX: usize = 0;
pub const MID_LEFT_BOX: usize = 1;
pub const MID_RIGHT_BOX: usize = 2;
pub const BOT_LEFT_BOX: usize = 3;
pub const BOT_CENTER_BOX: usize = 4;
pub const BOT_RIGHT_BOX: usize = 5;
pub const BOX_COUNT: usize = 6;

pub const BOX_NAMES: [&str; BOX_COUNT] = [
    "topBox",
    "midLeftBox",
    "midRightBox",
    "botLeftBox",
    "botCenterBox",
    "botRightBox",
];

// ── Master game state ─────────────────────────────────────────────────────────

/// Everything one tick reads and writes.
#[derive(Clone, Debug)]
pub struct GameState {
    /// `back`, `mid` and `fore` layers.
    pub background: CompositeImage,
    /// Pointer sprite: `slingBack`, `slingFore`, `cross`.
    pub slingshot: CompositeImage,
    pub creature: Creature,
    pub blocks: Vec<Block>,
    /// Full-window flash shown for the frame after a hit.
    pub flash: BitmapImage,
    pub scoreboard: Scoreboard,
    pub width: i32,
    pub height: i32,
    pub frame: u64,
}
