use log::debug;
use rand::Rng;

use crate::grid::{CellId, Contents, Grid, Position};
use crate::snake::Snake;

/// Cells the snake still has to cover before the board counts as won.
pub fn cells_to_fill(grid: &Grid, snake: &Snake) -> usize {
    grid.interior_area().saturating_sub(snake.score())
}

/// Drops one food item on a random empty cell other than the virtual head.
///
/// Does nothing once the board is won. Coordinates are drawn from the
/// interior only since the border is never empty.
pub fn place_food<R: Rng>(grid: &mut Grid, snake: &Snake, rng: &mut R) -> Option<CellId> {
    if cells_to_fill(grid, snake) == 0 {
        return None;
    }

    let head = snake.virtual_head();
    let open = |grid: &Grid, id: CellId| grid.cell(id).is_empty() && Some(id) != head;
    let any_open = grid
        .cells()
        .filter_map(|cell| grid.id_of(cell.position))
        .any(|id| open(grid, id));
    if !any_open {
        return None;
    }

    let hi = grid.side() as i32 - 1;
    loop {
        let pos = Position::new(rng.gen_range(1..hi), rng.gen_range(1..hi));
        let Some(id) = grid.id_of(pos) else { continue };
        if open(grid, id) {
            grid.cell_mut(id).contents = Contents::Food;
            debug!("food placed at {},{}", pos.x, pos.y);
            return Some(id);
        }
    }
}
