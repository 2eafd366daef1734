/// Knockable boxes: friction-damped sliding, wall bounce and the pairwise
/// collision rules against the creature and each other.

use crate::bitmap::{BitmapImage, ScaleMode};
use crate::creature::Creature;
use crate::entities::CreatureState;
use crate::physics::{apply_friction, Rect};
use crate::surface::Surface;

pub const FRICTION: f32 = 0.07;
/// Ground line for a box's top edge, as a fraction of window height.
const GROUND: f64 = 0.84;

pub fn ground_line(window_height: i32) -> i32 {
    (window_height as f64 * GROUND) as i32
}

#[derive(Clone, Debug)]
pub struct Block {
    image: BitmapImage,
    start_x: i32,
    start_y: i32,
    prev_x: i32,
    prev_y: i32,
    x_vel: f32,
    y_vel: f32,
    knocked_down: bool,
}

impl Block {
    pub fn new(mut image: BitmapImage, start_x: i32, start_y: i32) -> Self {
        image.move_to(start_x, start_y);
        Self {
            image,
            start_x,
            start_y,
            prev_x: start_x,
            prev_y: start_y,
            x_vel: 0.0,
            y_vel: 0.0,
            knocked_down: false,
        }
    }

    pub fn name(&self) -> &str {
        self.image.name()
    }

    pub fn x(&self) -> i32 {
        self.image.x()
    }

    pub fn y(&self) -> i32 {
        self.image.y()
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.image.x(),
            self.image.y(),
            self.image.width() as i32,
            self.image.height() as i32,
        )
    }

    pub fn start_position(&self) -> (i32, i32) {
        (self.start_x, self.start_y)
    }

    pub fn previous_position(&self) -> (i32, i32) {
        (self.prev_x, self.prev_y)
    }

    pub fn x_vel(&self) -> f32 {
        self.x_vel
    }

    pub fn y_vel(&self) -> f32 {
        self.y_vel
    }

    pub fn set_x_vel(&mut self, x_vel: f32) {
        self.x_vel = x_vel;
    }

    pub fn set_y_vel(&mut self, y_vel: f32) {
        self.y_vel = y_vel;
    }

    pub fn move_to(&mut self, x: i32, y: i32) {
        self.image.move_to(x, y);
    }

    /// Marks the box as knocked off its stack.  Returns `true` only the
    /// first time in a round.
    pub fn knock_down(&mut self) -> bool {
        !std::mem::replace(&mut self.knocked_down, true)
    }

    pub fn is_knocked_down(&self) -> bool {
        self.knocked_down
    }

    // ── Collisions ────────────────────────────────────────────────────────────

    /// Resolve contact with the creature.  Landing on top hands over half the
    /// creature's horizontal speed and grounds it; a side hit hands over all
    /// of it.  Returns whether the two overlap at all.
    pub fn check_collision_with_creature(&mut self, creature: &mut Creature) -> bool {
        let me = self.bounds();
        if !me.overlaps(&creature.bounds()) {
            return false;
        }

        let before = creature.previous_bounds();
        if before.bottom() < me.y {
            self.x_vel = creature.x_vel() / 2.0;
            creature.set_y_vel(0.0);
            creature.set_state(CreatureState::Grounded);
        } else if before.right() < me.x || before.x > me.right() {
            self.x_vel = creature.x_vel();
            creature.set_x_vel(0.0);
        }
        true
    }

    /// Overlap test against another box.  With `sideways` set the two are
    /// neighbours on the same row: the moving one passes its speed to the
    /// resting one and steps back to where it was last tick.
    pub fn check_collision_with_block(&mut self, other: &mut Block, sideways: bool) -> bool {
        if !self.bounds().overlaps(&other.bounds()) {
            return false;
        }

        if sideways {
            if self.x_vel != 0.0 && other.x_vel == 0.0 {
                other.x_vel = self.x_vel;
                self.x_vel = 0.0;
                self.move_to(self.prev_x, self.prev_y);
            } else if other.x_vel != 0.0 && self.x_vel == 0.0 {
                self.x_vel = other.x_vel;
                other.x_vel = 0.0;
                other.move_to(other.prev_x, other.prev_y);
            }
        }
        true
    }

    // ── Motion ────────────────────────────────────────────────────────────────

    pub fn update(&mut self, window_width: i32, window_height: i32) {
        self.prev_x = self.x();
        self.prev_y = self.y();

        self.x_vel = apply_friction(self.x_vel, FRICTION);
        self.move_to(self.x() + self.x_vel as i32, self.y() + self.y_vel as i32);

        if self.x() < 0 {
            self.x_vel = -self.x_vel;
        }
        if self.x() + self.image.width() as i32 > window_width {
            self.x_vel = -self.x_vel;
        }
        let ground = ground_line(window_height);
        if self.y() > ground {
            self.move_to(self.x(), ground);
        }
    }

    /// Back to rest at the start position.
    pub fn reset(&mut self) {
        self.move_to(self.start_x, self.start_y);
        self.prev_x = self.start_x;
        self.prev_y = self.start_y;
        self.x_vel = 0.0;
        self.y_vel = 0.0;
        self.knocked_down = false;
    }

    /// Re-layout after a window resize: new size and start position, at rest.
    pub fn relayout(&mut self, width: f64, height: f64, start_x: i32, start_y: i32) {
        self.image.resize(width, height, ScaleMode::Exact);
        self.start_x = start_x;
        self.start_y = start_y;
        self.reset();
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        self.image.draw(surface, None);
    }
}

/// Mutable access to two distinct boxes of one slice.
pub fn pair_mut(blocks: &mut [Block], a: usize, b: usize) -> (&mut Block, &mut Block) {
    assert_ne!(a, b, "a box cannot collide with itself");
    if a < b {
        let (left, right) = blocks.split_at_mut(b);
        (&mut left[a], &mut right[0])
    } else {
        let (left, right) = blocks.split_at_mut(a);
        (&mut right[0], &mut left[b])
    }
}
