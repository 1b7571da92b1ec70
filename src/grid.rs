use crate::direction::Direction;
use crate::sprites::{Layer, Sprite};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn step(self, dir: Direction) -> Position {
        let (dx, dy) = dir.offset();
        Position {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Handle to a cell owned by a [`Grid`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct CellId(usize);

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Contents {
    Empty,
    Wall,
    Body,
    Food,
}

/// One board square plus what the renderer needs to draw the snake in it.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub contents: Contents,
    pub position: Position,
    /// Sprite for the snake arriving in this cell.
    pub entering: Sprite,
    /// Sprite for the snake departing this cell.
    pub leaving: Sprite,
    pub entering_dir: Option<Direction>,
    pub leaving_dir: Option<Direction>,
    /// Extra mouth layers drawn over the front while eating or closing.
    pub layers: Option<[Layer; 2]>,
}

impl Cell {
    fn new(position: Position, contents: Contents) -> Self {
        Self {
            contents,
            position,
            entering: Sprite::default(),
            leaving: Sprite::default(),
            entering_dir: None,
            leaving_dir: None,
            layers: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.contents == Contents::Empty
    }

    pub(crate) fn clear_sprites(&mut self) {
        self.entering = Sprite::default();
        self.leaving = Sprite::default();
        self.entering_dir = None;
        self.leaving_dir = None;
        self.layers = None;
    }
}

/// Square board with a one-cell wall border.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    side: usize,
    cells: Vec<Cell>,
}

impl Grid {
    pub fn new(interior: usize) -> Self {
        let side = interior + 2;
        let mut grid = Self {
            side,
            cells: Vec::with_capacity(side * side),
        };
        grid.reset();
        grid
    }

    /// Rebuilds the border and clears the interior.
    pub fn reset(&mut self) {
        let side = self.side as i32;
        self.cells.clear();
        for y in 0..side {
            for x in 0..side {
                let border = x == 0 || y == 0 || x == side - 1 || y == side - 1;
                let contents = if border { Contents::Wall } else { Contents::Empty };
                self.cells.push(Cell::new(Position { x, y }, contents));
            }
        }
    }

    pub fn side(&self) -> usize {
        self.side
    }

    pub fn interior(&self) -> usize {
        self.side - 2
    }

    pub fn interior_area(&self) -> usize {
        self.interior() * self.interior()
    }

    pub fn id_of(&self, pos: Position) -> Option<CellId> {
        let side = self.side as i32;
        if pos.x < 0 || pos.y < 0 || pos.x >= side || pos.y >= side {
            return None;
        }
        Some(CellId(pos.y as usize * self.side + pos.x as usize))
    }

    pub fn cell_at(&self, pos: Position) -> Option<&Cell> {
        self.id_of(pos).map(|id| self.cell(id))
    }

    pub fn cell(&self, id: CellId) -> &Cell {
        &self.cells[id.0]
    }

    pub(crate) fn cell_mut(&mut self, id: CellId) -> &mut Cell {
        &mut self.cells[id.0]
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub fn count(&self, contents: Contents) -> usize {
        self.cells.iter().filter(|c| c.contents == contents).count()
    }

    /// Whether any 4-neighbour of `pos` holds food.
    pub fn next_to_food(&self, pos: Position) -> bool {
        Direction::ALL.iter().any(|dir| {
            self.cell_at(pos.step(*dir))
                .is_some_and(|cell| cell.contents == Contents::Food)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_builds_wall_border_and_empty_interior() {
        let grid = Grid::new(6);
        assert_eq!(grid.side(), 8);
        assert_eq!(grid.count(Contents::Wall), 8 * 8 - 36);
        assert_eq!(grid.count(Contents::Empty), 36);

        for cell in grid.cells() {
            let Position { x, y } = cell.position;
            let border = x == 0 || y == 0 || x == 7 || y == 7;
            assert_eq!(cell.contents == Contents::Wall, border, "cell {x},{y}");
        }
    }

    #[test]
    fn cells_know_their_position() {
        let grid = Grid::new(4);
        let pos = Position::new(3, 2);
        assert_eq!(grid.cell_at(pos).map(|c| c.position), Some(pos));
        assert!(grid.cell_at(Position::new(-1, 0)).is_none());
        assert!(grid.cell_at(Position::new(0, 6)).is_none());
    }

    #[test]
    fn reset_clears_previous_contents() {
        let mut grid = Grid::new(4);
        let id = grid.id_of(Position::new(2, 2)).unwrap();
        grid.cell_mut(id).contents = Contents::Food;
        grid.cell_mut(id).entering_dir = Some(Direction::Up);
        grid.reset();
        assert!(grid.cell(id).is_empty());
        assert_eq!(grid.cell(id).entering_dir, None);
    }

    #[test]
    fn food_adjacency_ignores_diagonals() {
        let mut grid = Grid::new(6);
        let food = grid.id_of(Position::new(3, 3)).unwrap();
        grid.cell_mut(food).contents = Contents::Food;
        assert!(grid.next_to_food(Position::new(3, 4)));
        assert!(grid.next_to_food(Position::new(2, 3)));
        assert!(!grid.next_to_food(Position::new(4, 4)));
        assert!(!grid.next_to_food(Position::new(3, 3)));
    }
}
