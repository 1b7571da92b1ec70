//! Grid snake simulation.
//!
//! Moves a snake across a walled square board at a speed that rises with its
//! length, buffers turns so quick inputs are not lost, decides deaths and
//! wins, and works out for every occupied cell which sprite variant and
//! rotation a renderer should use.

#![deny(unsafe_code)]

pub mod clock;
pub mod config;
pub mod direction;
pub mod error;
pub mod food;
pub mod game;
pub mod grid;
pub mod input;
pub mod mouth;
pub mod snake;
pub mod sprites;

pub use config::{Difficulty, Settings};
pub use direction::{Direction, Turn};
pub use error::{Error, Result};
pub use game::{Command, Event, Game, Phase};
pub use grid::{Cell, CellId, Contents, Grid, Position};
pub use sprites::{Layer, Obstacle, Part, Sprite};
