/// The flying creature and its Flying → Falling → Grounded → (reset) cycle.

use rand::Rng;

use crate::bitmap::ScaleMode;
use crate::composite::CompositeImage;
use crate::entities::{CreatureState, FlyState};
use crate::physics::{apply_friction, Rect};
use crate::surface::Surface;

pub const FRICTION: f32 = 0.05;
/// Grounded ticks before the creature takes off again.
pub const RESET_TIME: u32 = 50;
pub const FLY_TIME_MIN: u32 = 20;
pub const FLY_TIME_MAX: u32 = 40;
pub const FALL_SPEED: f32 = 5.0;
/// Degrees per tick while falling.
pub const FALL_SPIN: i32 = 5;
pub const INITIAL_X_VEL: f32 = 8.0;

/// Frame index showing the dead sprite.
pub const DEAD_FRAME: usize = 10;
const FLAP_CYCLE: usize = 10;
const FRAME_NAMES: [&str; 11] = [
    "flap0", "flap1", "flap2", "flap3", "flap4", "flap5", "flap4", "flap3", "flap2", "flap1",
    "dead",
];

/// Lowest point of the flying zone, as a fraction of window height.
const FLY_FLOOR: f64 = 0.35;
/// Ground line for the creature's top edge, as a fraction of window height.
const GROUND: f64 = 0.82;

pub fn ground_line(window_height: i32) -> i32 {
    (window_height as f64 * GROUND) as i32
}

#[derive(Clone, Debug)]
pub struct Creature {
    sprite: CompositeImage,
    prev_x: i32,
    prev_y: i32,
    x_vel: f32,
    y_vel: f32,
    state: CreatureState,
    fly_state: FlyState,
    reset_time_count: u32,
    fly_time: u32,
    fly_time_count: u32,
    frame: usize,
    just_hit: bool,
}

fn random_fly_time(rng: &mut impl Rng) -> u32 {
    rng.gen_range(FLY_TIME_MIN..=FLY_TIME_MAX)
}

/// 5..=8 pixels per tick, either direction.
fn random_cruise_speed(rng: &mut impl Rng) -> f32 {
    let speed = rng.gen_range(5..=8) as f32;
    if rng.gen_bool(0.5) {
        -speed
    } else {
        speed
    }
}

impl Creature {
    pub fn new(sprite: CompositeImage, rng: &mut impl Rng) -> Self {
        Self {
            prev_x: sprite.x(),
            prev_y: sprite.y(),
            sprite,
            x_vel: INITIAL_X_VEL,
            y_vel: 0.0,
            state: CreatureState::Flying,
            fly_state: FlyState::Down,
            reset_time_count: 0,
            fly_time: random_fly_time(rng),
            fly_time_count: 0,
            frame: 0,
            just_hit: false,
        }
    }

    // ── Queries ───────────────────────────────────────────────────────────────

    pub fn state(&self) -> CreatureState {
        self.state
    }

    pub fn fly_state(&self) -> FlyState {
        self.fly_state
    }

    pub fn x(&self) -> i32 {
        self.sprite.x()
    }

    pub fn y(&self) -> i32 {
        self.sprite.y()
    }

    pub fn width(&self) -> i32 {
        self.sprite.width() as i32
    }

    pub fn height(&self) -> i32 {
        self.sprite.height() as i32
    }

    pub fn bounds(&self) -> Rect {
        self.sprite.bounds()
    }

    /// Bounds at the start of the current tick.
    pub fn previous_bounds(&self) -> Rect {
        Rect::new(self.prev_x, self.prev_y, self.width(), self.height())
    }

    pub fn x_vel(&self) -> f32 {
        self.x_vel
    }

    pub fn y_vel(&self) -> f32 {
        self.y_vel
    }

    pub fn rotation(&self) -> i32 {
        self.sprite.rotation()
    }

    pub fn frame(&self) -> usize {
        self.frame
    }

    pub fn frame_name(&self) -> &'static str {
        FRAME_NAMES.get(self.frame).copied().unwrap_or(FRAME_NAMES[0])
    }

    pub fn sprite(&self) -> &CompositeImage {
        &self.sprite
    }

    // ── Mutators used by collision resolution ─────────────────────────────────

    pub fn set_state(&mut self, state: CreatureState) {
        self.state = state;
    }

    pub fn set_x_vel(&mut self, x_vel: f32) {
        self.x_vel = x_vel;
    }

    pub fn set_y_vel(&mut self, y_vel: f32) {
        self.y_vel = y_vel;
    }

    pub fn set_previous_position(&mut self, x: i32, y: i32) {
        self.prev_x = x;
        self.prev_y = y;
    }

    pub fn move_to(&mut self, x: i32, y: i32) {
        self.sprite.move_to(x, y);
    }

    pub fn resize(&mut self, width: f64, height: f64, mode: ScaleMode) {
        self.sprite.resize(width, height, mode);
    }

    // ── Player interaction ────────────────────────────────────────────────────

    /// Whether `(x, y)` lies strictly inside the creature.
    pub fn check_hit(&self, x: i32, y: i32) -> bool {
        self.bounds().contains_strict(x, y)
    }

    /// Shoot the creature down.  Only a Flying creature can be hit; returns
    /// whether the shot took effect.
    pub fn hit(&mut self) -> bool {
        if self.state != CreatureState::Flying {
            return false;
        }
        self.state = CreatureState::Falling;
        self.just_hit = true;
        true
    }

    pub fn is_just_hit(&self) -> bool {
        self.just_hit
    }

    /// Read and clear the one-frame "just hit" flag.
    pub fn take_just_hit(&mut self) -> bool {
        std::mem::take(&mut self.just_hit)
    }

    // ── Per-tick update ───────────────────────────────────────────────────────

    /// Advance one tick.  Returns `true` when the grounded timer expired and
    /// the creature was reset, i.e. a round boundary was reached.
    pub fn update(&mut self, window_width: i32, window_height: i32, rng: &mut impl Rng) -> bool {
        self.prev_x = self.x();
        self.prev_y = self.y();

        let mut round_over = false;
        match self.state {
            CreatureState::Flying => self.fly(window_height, rng),
            CreatureState::Falling => self.fall(window_height),
            CreatureState::Grounded => {
                if self.roll() {
                    self.reset(window_width, rng);
                    round_over = true;
                }
            }
        }

        if self.x() + self.width() > window_width {
            self.x_vel = -self.x_vel;
        }
        if self.x() < 0 {
            self.x_vel = -self.x_vel;
        }
        let ground = ground_line(window_height);
        if self.y() > ground {
            self.move_to(self.x(), ground);
        }

        round_over
    }

    fn fly(&mut self, window_height: i32, rng: &mut impl Rng) {
        self.frame = (self.frame + 1) % FLAP_CYCLE;

        let bob = rng.gen_range(1..=5) as f32;
        match self.fly_state {
            FlyState::Up => {
                self.y_vel = -bob;
                if self.y() < 0 {
                    self.fly_state = self.fly_state.flipped();
                }
            }
            FlyState::Down => {
                self.y_vel = bob;
                if self.y() as f64 > window_height as f64 * FLY_FLOOR {
                    self.fly_state = self.fly_state.flipped();
                }
            }
        }

        self.fly_time_count += 1;
        self.advance();

        if self.fly_time_count >= self.fly_time {
            self.fly_time = random_fly_time(rng);
            self.fly_time_count = 0;
            self.x_vel = random_cruise_speed(rng);
            if rng.gen_bool(0.5) {
                self.fly_state = self.fly_state.flipped();
            }
        }
    }

    fn fall(&mut self, window_height: i32) {
        self.frame = DEAD_FRAME;

        let spin = if self.x_vel > 0.0 { FALL_SPIN } else { -FALL_SPIN };
        self.x_vel = apply_friction(self.x_vel, FRICTION);
        self.sprite.rotate(self.rotation() + spin);

        self.y_vel = FALL_SPEED;
        self.advance();

        if self.y() > ground_line(window_height) {
            self.state = CreatureState::Grounded;
        }
    }

    /// Rolls to a stop.  Returns `true` once the grounded timer has run out.
    fn roll(&mut self) -> bool {
        self.x_vel = apply_friction(self.x_vel, FRICTION);
        self.sprite.rotate(self.rotation() + self.x_vel as i32);
        self.advance();

        self.reset_time_count += 1;
        self.reset_time_count >= RESET_TIME
    }

    fn advance(&mut self) {
        self.move_to(self.x() + self.x_vel as i32, self.y() + self.y_vel as i32);
    }

    /// Send the creature back to the top of the window, flying.
    pub fn reset(&mut self, window_width: i32, rng: &mut impl Rng) {
        self.x_vel = random_cruise_speed(rng);
        self.y_vel = 0.0;
        self.state = CreatureState::Flying;
        self.reset_time_count = 0;
        self.sprite.rotate(0);
        let column = rng.gen_range(0..9) as f64;
        self.move_to((window_width as f64 * column * 0.1) as i32, 0);
        self.frame = 0;
        self.just_hit = false;
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) -> bool {
        self.sprite.draw_single(surface, self.frame_name(), None)
    }
}
