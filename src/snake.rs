use std::collections::VecDeque;

use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::grid::{CellState, Coordinate, Dimensions, Grid, GridError};
use Heading::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Heading {
    Up,
    Right,
    Down,
    Left,
}

impl Heading {
    pub fn opposite(self) -> Heading {
        match self {
            Up => Down,
            Right => Left,
            Down => Up,
            Left => Right,
        }
    }

    /// Unit step in grid coordinates, y grows downwards.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Up => (0, -1),
            Right => (1, 0),
            Down => (0, 1),
            Left => (-1, 0),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Death {
    OutOfBounds,
    SelfCollision,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Moved { head: Coordinate, vacated: Coordinate },
    /// `food` is `None` when the snake filled the last free cell.
    Grew { head: Coordinate, food: Option<Coordinate> },
    Died(Death),
}

impl Outcome {
    /// Cells whose visual state changed during the step.
    pub fn changed_cells(&self) -> Vec<Coordinate> {
        match *self {
            Outcome::Moved { head, vacated } => vec![head, vacated],
            Outcome::Grew { head, food: Some(food) } => vec![head, food],
            Outcome::Grew { head, food: None } => vec![head],
            Outcome::Died(_) => vec![],
        }
    }
}

/// The snake, the food and the occupancy array they live on.
///
/// The body is stored tail first: index 0 is the tail, the last element is
/// the head. Every coordinate in the body is a `Body` cell in the grid and
/// vice versa.
pub struct GridSimulation {
    grid: Grid,
    body: VecDeque<Coordinate>,
    heading: Heading,
    food: Option<Coordinate>,
}

impl GridSimulation {
    /// Two segment snake heading up, with the tail directly below the head.
    pub fn new(
        dims: Dimensions,
        start_head: Coordinate,
        start_tail: Coordinate,
    ) -> Result<Self, GridError> {
        Self::with_body(dims, &[start_tail, start_head], Up)
    }

    /// Head in the middle of the grid, tail one cell south of it.
    pub fn centered(dims: Dimensions) -> Result<Self, GridError> {
        let head = Coordinate::new(dims.width / 2, dims.height / 2);
        let tail = Coordinate::new(head.x, head.y + 1);
        Self::new(dims, head, tail)
    }

    /// Builds a snake from its segments, tail first.
    pub fn with_body(
        dims: Dimensions,
        body: &[Coordinate],
        heading: Heading,
    ) -> Result<Self, GridError> {
        if body.len() < 2 {
            return Err(GridError::TooShort(body.len()));
        }

        let mut grid = Grid::new(dims);

        for (i, pos) in body.iter().enumerate() {
            if !dims.contains(*pos) {
                return Err(GridError::OutOfBounds(*pos));
            }
            if grid.get(*pos) == CellState::Body {
                return Err(GridError::Overlap(*pos));
            }
            if i > 0 && !body[i - 1].is_adjacent(pos) {
                return Err(GridError::NotAdjacent(body[i - 1], *pos));
            }
            grid.set(*pos, CellState::Body);
        }

        Ok(GridSimulation { grid, body: body.iter().copied().collect(), heading, food: None })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn dimensions(&self) -> Dimensions {
        self.grid.dimensions()
    }

    #[cfg(test)]
    pub fn body(&self) -> &VecDeque<Coordinate> {
        &self.body
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn head(&self) -> Coordinate {
        // Never empty: construction requires two segments and step only
        // pops after pushing.
        self.body[self.body.len() - 1]
    }

    pub fn heading(&self) -> Heading {
        self.heading
    }

    pub fn food(&self) -> Option<Coordinate> {
        self.food
    }

    /// Puts food on a uniformly chosen empty cell.
    pub fn place_food<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<Coordinate, GridError> {
        if let Some(food) = self.food {
            return Err(GridError::FoodAlreadyPlaced(food));
        }

        let free = self.grid.empty_cells();
        let pos = *free.choose(rng).ok_or(GridError::GridFull)?;
        self.put_food(pos);

        debug!("food placed at {} ({} free cells)", pos, free.len());
        Ok(pos)
    }

    pub(crate) fn put_food(&mut self, pos: Coordinate) {
        debug_assert_eq!(self.grid.get(pos), CellState::Empty);
        self.grid.set(pos, CellState::Food);
        self.food = Some(pos);
    }

    /// Applies `requested` unless it would turn the snake back onto itself.
    /// Returns whether the snake now travels towards `requested`.
    pub fn set_heading(&mut self, requested: Heading) -> bool {
        if requested == self.heading.opposite() {
            return false;
        }

        self.heading = requested;
        true
    }

    /// Advances the snake one cell. Fatal moves leave the state untouched.
    pub fn step<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Outcome {
        let next = match self.dimensions().neighbour(self.head(), self.heading) {
            Some(pos) => pos,
            None => return Outcome::Died(Death::OutOfBounds),
        };

        match self.grid.get(next) {
            CellState::Body => Outcome::Died(Death::SelfCollision),
            CellState::Food => {
                self.body.push_back(next);
                self.grid.set(next, CellState::Body);
                self.food = None;

                let food = match self.place_food(rng) {
                    Ok(pos) => Some(pos),
                    Err(_) => {
                        debug!("no room left for food, snake length {}", self.len());
                        None
                    }
                };
                Outcome::Grew { head: next, food }
            }
            CellState::Empty => {
                self.body.push_back(next);
                self.grid.set(next, CellState::Body);

                let vacated = match self.body.pop_front() {
                    Some(tail) => tail,
                    None => unreachable!("body holds at least the new head"),
                };
                self.grid.set(vacated, CellState::Empty);

                Outcome::Moved { head: next, vacated }
            }
        }
    }
}
