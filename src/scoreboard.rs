/// Round and total score bookkeeping.

use tracing::info;

use crate::surface::Surface;

pub const ROUND_START_SCORE: i32 = 100;
pub const ROUND_DECREMENT: i32 = 10;
/// Ticks between round-score decrements (≈1 s at 30 ms per tick).
pub const DEFAULT_TICK_LIMIT: u32 = 33;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Scoreboard {
    total_score: i32,
    round_score: i32,
    round: u32,
    tick_count: u32,
    tick_limit: u32,
    round_active: bool,
}

impl Default for Scoreboard {
    fn default() -> Self {
        Self::new(DEFAULT_TICK_LIMIT)
    }
}

impl Scoreboard {
    pub fn new(tick_limit: u32) -> Self {
        Self {
            total_score: 0,
            round_score: ROUND_START_SCORE,
            round: 1,
            tick_count: 0,
            tick_limit: tick_limit.max(1),
            round_active: true,
        }
    }

    pub fn total_score(&self) -> i32 {
        self.total_score
    }

    pub fn round_score(&self) -> i32 {
        self.round_score
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn is_round_active(&self) -> bool {
        self.round_active
    }

    /// Advance one tick.  Returns `true` when the round score ran out and the
    /// caller should start the next round.
    pub fn tick(&mut self) -> bool {
        self.tick_count += 1;
        if self.tick_count < self.tick_limit || !self.round_active {
            return false;
        }

        self.round_score -= ROUND_DECREMENT;
        self.tick_count = 0;
        if self.round_score <= 0 {
            self.round_score = 0;
            self.end_round();
            return true;
        }
        false
    }

    /// Bank the round score.  No-op if the round already ended.
    pub fn end_round(&mut self) {
        if self.round_active {
            self.round_active = false;
            self.total_score += self.round_score;
            info!(
                round = self.round,
                round_score = self.round_score,
                total = self.total_score,
                "round ended"
            );
        }
    }

    pub fn start_next_round(&mut self) {
        self.round += 1;
        self.round_score = ROUND_START_SCORE;
        self.tick_count = 0;
        self.round_active = true;
        info!(round = self.round, "round started");
    }

    pub fn add_points(&mut self, points: i32) {
        self.total_score += points;
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S, window_width: i32) {
        surface.draw_string(&format!("total score : {}", self.total_score), 0, 0);
        surface.draw_string(&format!("round score : {}", self.round_score), 0, 15);
        surface.draw_string(&format!("round : {}", self.round), window_width / 2, 0);
    }
}
