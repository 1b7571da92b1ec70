//! Per-cell sprite selection.
//!
//! Every drawn cell carries two half-sprites: one for the snake arriving and
//! one for it departing. Each half picks a part (head, body, tail, ...) and a
//! turn variant, found by comparing the cell's direction with the direction
//! of its neighbour towards the tail.

use crate::direction::{Direction, Turn};
use crate::grid::{Cell, CellId, Contents, Grid};
use crate::mouth::Mouth;
use crate::snake::Snake;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum Part {
    /// Nothing drawn: the snake fills or leaves an empty square.
    #[default]
    Empty,
    Head,
    MouthOpen,
    MouthEat,
    MouthClose,
    Body,
    Tail,
    /// Tail held in place for the tick after eating.
    TailGrow,
    DeathWall,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct Sprite {
    pub part: Part,
    pub turn: Turn,
}

impl Sprite {
    pub fn new(part: Part, turn: Turn) -> Self {
        Self { part, turn }
    }

    pub fn straight(part: Part) -> Self {
        Self {
            part,
            turn: Turn::Straight,
        }
    }
}

/// Layers stacked over an eating or closing mouth.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Layer {
    Food,
    Empty,
    MouthTop,
}

/// What the snake ran into.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Obstacle {
    Wall,
    Body,
}

/// Snapshot of the tick that the deriver needs beyond the snake itself.
#[derive(Debug, Copy, Clone)]
pub struct Frame {
    pub mouth: Mouth,
    pub death: Option<Obstacle>,
    /// Leaving direction of the last tail that dropped off.
    pub tail_point: Option<Direction>,
}

fn turn_at(grid: &Grid, snake: &Snake, index: usize) -> Turn {
    let (Some(id), Some(next)) = (snake.segment(index), snake.segment(index + 1)) else {
        return Turn::Straight;
    };
    Turn::classify(grid.cell(id).entering_dir, grid.cell(next).leaving_dir)
}

fn set(grid: &mut Grid, id: Option<CellId>, f: impl FnOnce(&mut Cell)) {
    if let Some(id) = id {
        f(grid.cell_mut(id));
    }
}

/// Marks every body slot on the board and picks its sprites.
pub fn derive(grid: &mut Grid, snake: &Snake, frame: Frame) {
    let current = snake.head().current;
    let t = snake.tail_index();

    if frame.death.is_none() {
        set(grid, snake.front(), |cell| cell.entering_dir = Some(current));
    }
    set(grid, snake.segment(2), |cell| {
        cell.entering_dir = Some(current);
        cell.leaving_dir = Some(current);
    });

    for i in 1..t {
        let turn = turn_at(grid, snake, i);
        set(grid, snake.segment(i), |cell| {
            cell.contents = Contents::Body;
            cell.layers = None;
            cell.entering = Sprite::new(Part::Body, turn);
            cell.leaving = Sprite::new(Part::Body, turn);
        });
    }

    match frame.death {
        None => {
            let mouth = frame.mouth;
            set(grid, snake.front(), |cell| {
                let part = match mouth {
                    Mouth::Opening => Part::MouthOpen,
                    Mouth::Eating => Part::MouthEat,
                    Mouth::Closing => Part::MouthClose,
                    Mouth::Closed => Part::Head,
                };
                cell.entering = Sprite::straight(part);
                cell.leaving = Sprite::straight(Part::Empty);
                cell.layers = match mouth {
                    Mouth::Eating => Some([Layer::Food, Layer::MouthTop]),
                    Mouth::Closing => Some([Layer::Empty, Layer::MouthTop]),
                    _ => None,
                };
            });
            let turn = turn_at(grid, snake, 2);
            set(grid, snake.segment(2), |cell| cell.leaving = Sprite::new(Part::Head, turn));
        }
        Some(obstacle) => {
            let part = match obstacle {
                Obstacle::Body => Part::Empty,
                Obstacle::Wall => Part::DeathWall,
            };
            set(grid, snake.segment(2), |cell| cell.leaving = Sprite::straight(part));
        }
    }

    if frame.mouth == Mouth::Eating {
        let tail_point = frame.tail_point;
        set(grid, snake.segment(t - 2), |cell| {
            let turn = Turn::classify(cell.entering_dir, tail_point);
            cell.entering = Sprite::new(Part::TailGrow, turn);
            cell.leaving = Sprite::straight(Part::Empty);
        });
    } else {
        let turn = turn_at(grid, snake, t - 2);
        set(grid, snake.segment(t - 2), |cell| cell.entering = Sprite::new(Part::Tail, turn));
    }

    if let Some(last) = snake.segment(t - 1) {
        if snake.front() == Some(last) {
            // Front is moving into the square the tail is still leaving.
            let turn = turn_at(grid, snake, t - 1);
            grid.cell_mut(last).leaving = Sprite::new(Part::Tail, turn);
        } else {
            let cell = grid.cell_mut(last);
            cell.entering = Sprite::straight(Part::Empty);
            cell.leaving = Sprite::straight(Part::Tail);
        }
    }
}
