//! Snake occupancy: an ordered list of grid handles behind a virtual head.
//!
//! Slot `0` is the virtual head, the cell the front moves into on the next
//! tick. Slots `1..tail_index` are the drawn body with slot `1` as the front.
//! A slot may be empty right after the snake eats; the shift fills it on the
//! following tick, which is what lengthens the body.

use crate::direction::Direction;
use crate::grid::{CellId, Contents, Grid, Position};
use crate::input::TurnQueue;

pub const SPAWN_TAIL_INDEX: usize = 4;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct HeadState {
    /// Direction of the last committed move.
    pub current: Direction,
    pub turns: TurnQueue,
    pub front: Position,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    segments: Vec<Option<CellId>>,
    tail_index: usize,
    head: HeadState,
}

impl Snake {
    /// Lays a three-cell snake heading left across the middle of `grid`.
    pub fn spawn(grid: &mut Grid) -> Snake {
        let c = (grid.side() / 2) as i32;
        let front = Position::new(c, c);
        let body = [front, Position::new(c + 1, c), Position::new(c + 2, c)];

        let mut segments = vec![None; grid.interior_area() + 3];
        segments[0] = grid.id_of(front.step(Direction::Left));
        for (slot, pos) in body.iter().enumerate() {
            let Some(id) = grid.id_of(*pos) else { continue };
            let cell = grid.cell_mut(id);
            cell.contents = Contents::Body;
            cell.entering_dir = Some(Direction::Left);
            if slot > 0 {
                cell.leaving_dir = Some(Direction::Left);
            }
            segments[slot + 1] = Some(id);
        }

        Snake {
            segments,
            tail_index: SPAWN_TAIL_INDEX,
            head: HeadState {
                current: Direction::Left,
                turns: TurnQueue::default(),
                front,
            },
        }
    }

    #[cfg(test)]
    pub(crate) fn from_slots(
        grid: &mut Grid,
        slots: &[Option<Position>],
        current: Direction,
    ) -> Snake {
        let mut segments = vec![None; grid.interior_area() + 3];
        for (i, pos) in slots.iter().enumerate().skip(1) {
            segments[i] = pos.and_then(|p| grid.id_of(p));
            if let Some(id) = segments[i] {
                grid.cell_mut(id).contents = Contents::Body;
            }
        }
        let front = slots[1].unwrap_or(Position::new(0, 0));
        segments[0] = grid.id_of(front.step(current));
        Snake {
            segments,
            tail_index: slots.len(),
            head: HeadState {
                current,
                turns: TurnQueue::default(),
                front,
            },
        }
    }

    pub fn head(&self) -> &HeadState {
        &self.head
    }

    pub fn tail_index(&self) -> usize {
        self.tail_index
    }

    /// Drawn length, which is also the score.
    pub fn score(&self) -> usize {
        self.tail_index - 2
    }

    pub fn segment(&self, index: usize) -> Option<CellId> {
        self.segments.get(index).copied().flatten()
    }

    pub fn virtual_head(&self) -> Option<CellId> {
        self.segment(0)
    }

    pub fn front(&self) -> Option<CellId> {
        self.segment(1)
    }

    /// Occupied body slots, front first.
    pub fn body(&self) -> impl Iterator<Item = CellId> + '_ {
        self.segments[1..self.tail_index].iter().flatten().copied()
    }

    /// Buffers a turn and, when one is pending, moves the virtual head to
    /// the cell beside the front in that direction.
    pub fn steer(&mut self, dir: Direction, grid: &Grid) -> bool {
        let accepted = self.head.turns.push(self.head.current, dir);
        if accepted {
            self.aim(grid);
        }
        accepted
    }

    fn aim(&mut self, grid: &Grid) {
        if let Some(pending) = self.head.turns.pending() {
            self.segments[0] = grid.id_of(self.head.front.step(pending));
        }
    }

    /// Commits the pending turn, returning the direction of this move.
    pub(crate) fn commit_turn(&mut self) -> Direction {
        self.head.current = self.head.turns.commit(self.head.current);
        self.head.current
    }

    /// Whether `id` is one of the two cells the coming shift moves the tail
    /// out of, so running into it is not a collision.
    pub fn is_vacating(&self, id: CellId) -> bool {
        let t = self.tail_index;
        self.segment(t - 2) == Some(id) || self.segment(t - 1) == Some(id)
    }

    /// Moves every handle one slot towards the tail and returns the cell
    /// that fell off the end, if any.
    pub(crate) fn shift(&mut self) -> Option<CellId> {
        for i in (1..=self.tail_index).rev() {
            self.segments[i] = self.segments[i - 1];
        }
        self.segments[self.tail_index].take()
    }

    pub(crate) fn grow(&mut self) {
        self.tail_index += 1;
    }

    pub(crate) fn clear_front(&mut self) {
        self.segments[1] = None;
    }

    /// Re-reads the front from slot `1` and points the virtual head one step
    /// ahead of it, then promotes any buffered turn.
    pub(crate) fn retarget(&mut self, grid: &Grid) {
        if let Some(front) = self.front() {
            self.head.front = grid.cell(front).position;
        }
        self.segments[0] = grid.id_of(self.head.front.step(self.head.current));
        self.head.turns.advance();
        self.aim(grid);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos_of(grid: &Grid, id: Option<CellId>) -> Option<Position> {
        id.map(|id| grid.cell(id).position)
    }

    #[test]
    fn spawn_lays_three_cells_heading_left() {
        let mut grid = Grid::new(6);
        let snake = Snake::spawn(&mut grid);

        assert_eq!(snake.tail_index(), 4);
        assert_eq!(snake.score(), 2);
        assert_eq!(snake.head().current, Direction::Left);
        assert_eq!(snake.head().front, Position::new(4, 4));
        assert_eq!(pos_of(&grid, snake.virtual_head()), Some(Position::new(3, 4)));
        assert_eq!(pos_of(&grid, snake.segment(3)), Some(Position::new(6, 4)));
        assert_eq!(grid.count(Contents::Body), 3);
        assert!(grid.cell_at(Position::new(3, 4)).unwrap().is_empty());
    }

    #[test]
    fn steering_moves_virtual_head_beside_front() {
        let mut grid = Grid::new(6);
        let mut snake = Snake::spawn(&mut grid);

        assert!(snake.steer(Direction::Down, &grid));
        assert_eq!(pos_of(&grid, snake.virtual_head()), Some(Position::new(4, 5)));

        // Reversing the pending turn is rejected and leaves the aim alone.
        assert!(!snake.steer(Direction::Up, &grid));
        assert_eq!(pos_of(&grid, snake.virtual_head()), Some(Position::new(4, 5)));
    }

    #[test]
    fn shift_drops_the_old_tail() {
        let mut grid = Grid::new(6);
        let mut snake = Snake::spawn(&mut grid);
        let old_tail = snake.segment(3);

        let vacated = snake.shift();
        assert_eq!(vacated, old_tail);
        assert_eq!(pos_of(&grid, snake.front()), Some(Position::new(3, 4)));
        assert_eq!(pos_of(&grid, snake.segment(3)), Some(Position::new(5, 4)));
        assert_eq!(snake.segment(4), None);
    }

    #[test]
    fn growing_leaves_an_empty_slot_for_one_shift() {
        let mut grid = Grid::new(6);
        let mut snake = Snake::spawn(&mut grid);
        snake.shift();
        snake.grow();
        assert_eq!(snake.body().count(), 3);

        snake.retarget(&grid);
        assert_eq!(snake.shift(), None);
        assert_eq!(snake.body().count(), 4);
    }

    #[test]
    fn retarget_promotes_buffered_turn_and_reaims() {
        let mut grid = Grid::new(6);
        let mut snake = Snake::spawn(&mut grid);
        snake.steer(Direction::Up, &grid);
        snake.steer(Direction::Right, &grid);

        assert_eq!(snake.commit_turn(), Direction::Up);
        snake.shift();
        snake.retarget(&grid);

        assert_eq!(snake.head().front, Position::new(4, 3));
        assert_eq!(snake.head().turns.pending(), Some(Direction::Right));
        assert_eq!(pos_of(&grid, snake.virtual_head()), Some(Position::new(5, 3)));
    }

    #[test]
    fn tail_cells_count_as_vacating() {
        let mut grid = Grid::new(6);
        let snake = Snake::spawn(&mut grid);
        let tail = snake.segment(3).unwrap();
        let neck = snake.segment(2).unwrap();
        let front = snake.front().unwrap();
        assert!(snake.is_vacating(tail));
        assert!(snake.is_vacating(neck));
        assert!(!snake.is_vacating(front));
    }
}
