use std::fmt;

use thiserror::Error;

use crate::snake::Heading;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Coordinate {
    pub x: u16,
    pub y: u16,
}

impl Coordinate {
    pub const fn new(x: u16, y: u16) -> Self {
        Coordinate { x, y }
    }

    pub fn is_adjacent(&self, other: &Coordinate) -> bool {
        let dx = (i32::from(self.x) - i32::from(other.x)).abs();
        let dy = (i32::from(self.y) - i32::from(other.y)).abs();
        dx + dy == 1
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u16,
    pub height: u16,
}

impl Dimensions {
    pub const fn new(width: u16, height: u16) -> Self {
        Dimensions { width, height }
    }

    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn contains(&self, pos: Coordinate) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    /// The cell one step from `pos` towards `heading`, or `None` if that
    /// step leaves the grid.
    pub fn neighbour(&self, pos: Coordinate, heading: Heading) -> Option<Coordinate> {
        let (dx, dy) = heading.delta();
        let x = i32::from(pos.x) + dx;
        let y = i32::from(pos.y) + dy;

        if x < 0 || y < 0 || x >= i32::from(self.width) || y >= i32::from(self.height) {
            return None;
        }

        Some(Coordinate::new(x as u16, y as u16))
    }

    /// Every coordinate, row by row.
    pub fn coordinates(&self) -> impl Iterator<Item = Coordinate> {
        let width = self.width;
        (0..self.height).flat_map(move |y| (0..width).map(move |x| Coordinate::new(x, y)))
    }

    fn index(&self, pos: Coordinate) -> usize {
        debug_assert!(self.contains(pos), "{} outside of {}x{}", pos, self.width, self.height);
        pos.y as usize * self.width as usize + pos.x as usize
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CellState {
    Empty,
    Body,
    Food,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("cell {0} is outside the grid")]
    OutOfBounds(Coordinate),
    #[error("cell {0} is occupied more than once")]
    Overlap(Coordinate),
    #[error("cells {0} and {1} are not adjacent")]
    NotAdjacent(Coordinate, Coordinate),
    #[error("a snake needs at least two segments, got {0}")]
    TooShort(usize),
    #[error("no empty cell left for food")]
    GridFull,
    #[error("food is already placed at {0}")]
    FoodAlreadyPlaced(Coordinate),
}

/// Occupancy array, `height` rows of `width` columns.
#[derive(Clone, Debug)]
pub struct Grid {
    dims: Dimensions,
    cells: Vec<CellState>,
}

impl Grid {
    pub fn new(dims: Dimensions) -> Self {
        Grid { dims, cells: vec![CellState::Empty; dims.cell_count()] }
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dims
    }

    pub fn get(&self, pos: Coordinate) -> CellState {
        self.cells[self.dims.index(pos)]
    }

    pub fn set(&mut self, pos: Coordinate, state: CellState) {
        let idx = self.dims.index(pos);
        self.cells[idx] = state;
    }

    pub fn empty_cells(&self) -> Vec<Coordinate> {
        self.dims.coordinates().filter(|pos| self.get(*pos) == CellState::Empty).collect()
    }

    #[cfg(test)]
    pub fn count(&self, state: CellState) -> usize {
        self.cells.iter().filter(|cell| **cell == state).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neighbour_stops_at_every_edge() {
        let dims = Dimensions::new(4, 3);

        assert_eq!(dims.neighbour(Coordinate::new(0, 1), Heading::Left), None);
        assert_eq!(dims.neighbour(Coordinate::new(3, 1), Heading::Right), None);
        assert_eq!(dims.neighbour(Coordinate::new(2, 0), Heading::Up), None);
        assert_eq!(dims.neighbour(Coordinate::new(2, 2), Heading::Down), None);

        assert_eq!(dims.neighbour(Coordinate::new(1, 1), Heading::Up), Some(Coordinate::new(1, 0)));
        assert_eq!(
            dims.neighbour(Coordinate::new(1, 1), Heading::Right),
            Some(Coordinate::new(2, 1))
        );
    }

    #[test]
    fn cells_are_stored_row_major() {
        let dims = Dimensions::new(3, 2);
        let mut grid = Grid::new(dims);

        grid.set(Coordinate::new(2, 0), CellState::Food);
        grid.set(Coordinate::new(0, 1), CellState::Body);

        assert_eq!(grid.cells[2], CellState::Food);
        assert_eq!(grid.cells[3], CellState::Body);
        assert_eq!(grid.count(CellState::Empty), 4);
    }

    #[test]
    fn empty_cells_skip_occupied_ones() {
        let mut grid = Grid::new(Dimensions::new(2, 2));
        grid.set(Coordinate::new(1, 0), CellState::Body);
        grid.set(Coordinate::new(0, 1), CellState::Food);

        assert_eq!(grid.empty_cells(), vec![Coordinate::new(0, 0), Coordinate::new(1, 1)]);
    }

    #[test]
    fn adjacency_is_orthogonal_only() {
        let a = Coordinate::new(5, 5);

        assert!(a.is_adjacent(&Coordinate::new(5, 4)));
        assert!(a.is_adjacent(&Coordinate::new(6, 5)));
        assert!(!a.is_adjacent(&Coordinate::new(6, 6)));
        assert!(!a.is_adjacent(&a));
    }
}
