//! Unhappy Reptiles: click to shoot a flying reptile out of the sky, watch it
//! tumble into a pyramid of boxes, and bank whatever is left of the round
//! score.
//!
//! The library holds every piece of game state and logic; the binary only
//! owns the terminal, the input thread and the frame clock.

pub mod assets;
pub mod audio;
pub mod bitmap;
pub mod block;
pub mod canvas;
pub mod compose;
pub mod composite;
pub mod compute;
pub mod config;
pub mod creature;
pub mod entities;
pub mod error;
pub mod physics;
pub mod scoreboard;
pub mod surface;
