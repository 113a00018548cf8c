use anyhow::Result;
use thiserror::Error;

use crate::grid::{CellState, Coordinate, Dimensions, Grid};

/// Terminal columns and rows covered by one grid cell.
const CELL_WIDTH: u16 = 2;
const CELL_HEIGHT: u16 = 1;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CellColor {
    EmptyDark,
    EmptyLight,
    Body,
    Food,
}

impl CellColor {
    pub fn of(pos: Coordinate, state: CellState) -> Self {
        match state {
            CellState::Body => CellColor::Body,
            CellState::Food => CellColor::Food,
            CellState::Empty if (pos.x as u32 + pos.y as u32) % 2 == 0 => CellColor::EmptyDark,
            CellState::Empty => CellColor::EmptyLight,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    #[error(
        "a {grid_w}x{grid_h} grid needs a {need_w}x{need_h} terminal, this one is {have_w}x{have_h}"
    )]
    TooSmall { grid_w: u16, grid_h: u16, need_w: u16, need_h: u16, have_w: u16, have_h: u16 },
}

/// Where every grid cell lands on the surface.
///
/// The board is centered, framed by a one cell border and followed by a
/// single status row.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Layout {
    origin: (u16, u16),
    dims: Dimensions,
    surface_width: u16,
}

impl Layout {
    pub fn new(dims: Dimensions, surface: (u16, u16)) -> Result<Self, LayoutError> {
        let board_w = dims.width as u32 * CELL_WIDTH as u32;
        let board_h = dims.height as u32 * CELL_HEIGHT as u32;
        let need_w = board_w + 2;
        let need_h = board_h + 3;
        let (have_w, have_h) = surface;

        if need_w > have_w as u32 || need_h > have_h as u32 {
            return Err(LayoutError::TooSmall {
                grid_w: dims.width,
                grid_h: dims.height,
                need_w: need_w.min(u16::MAX as u32) as u16,
                need_h: need_h.min(u16::MAX as u32) as u16,
                have_w,
                have_h,
            });
        }

        let x = (have_w as u32 - board_w) / 2;
        let y = (have_h as u32 - board_h - 1) / 2;
        Ok(Layout { origin: (x as u16, y as u16), dims, surface_width: have_w })
    }

    pub fn rect(&self, pos: Coordinate) -> Rect {
        Rect {
            x: self.origin.0 + pos.x * CELL_WIDTH,
            y: self.origin.1 + pos.y * CELL_HEIGHT,
            width: CELL_WIDTH,
            height: CELL_HEIGHT,
        }
    }

    pub fn frame(&self) -> Rect {
        Rect {
            x: self.origin.0 - 1,
            y: self.origin.1 - 1,
            width: self.dims.width * CELL_WIDTH + 2,
            height: self.dims.height * CELL_HEIGHT + 2,
        }
    }

    pub fn status_row(&self) -> u16 {
        let frame = self.frame();
        frame.y + frame.height
    }
}

/// A surface that can be painted in character-cell rectangles.
pub trait Canvas {
    fn size(&self) -> (u16, u16);
    fn clear(&mut self) -> Result<()>;
    fn fill_rect(&mut self, rect: Rect, color: CellColor) -> Result<()>;
    fn outline(&mut self, rect: Rect) -> Result<()>;
    fn print_at(&mut self, x: u16, y: u16, text: &str) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
}

pub struct RenderAdapter<C> {
    canvas: C,
    layout: Layout,
}

impl<C: Canvas> RenderAdapter<C> {
    pub fn new(canvas: C, dims: Dimensions) -> Result<Self> {
        let layout = Layout::new(dims, canvas.size())?;
        Ok(RenderAdapter { canvas, layout })
    }

    #[cfg(test)]
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    #[cfg(test)]
    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    /// Repaints everything: backdrop, frame and every cell.
    pub fn draw_board(&mut self, grid: &Grid) -> Result<()> {
        self.canvas.clear()?;
        self.canvas.outline(self.layout.frame())?;

        for pos in grid.dimensions().coordinates() {
            self.draw_cell(pos, CellColor::of(pos, grid.get(pos)))?;
        }

        Ok(())
    }

    pub fn draw_cell(&mut self, pos: Coordinate, color: CellColor) -> Result<()> {
        self.canvas.fill_rect(self.layout.rect(pos), color)
    }

    pub fn draw_changes(&mut self, grid: &Grid, cells: &[Coordinate]) -> Result<()> {
        for pos in cells {
            self.draw_cell(*pos, CellColor::of(*pos, grid.get(*pos)))?;
        }
        Ok(())
    }

    /// Writes `text` centered in the row below the board, clipped to the
    /// surface width.
    pub fn status(&mut self, text: &str) -> Result<()> {
        let width = self.layout.surface_width as usize;
        let text: String = text.chars().take(width).collect();
        let line = format!("{text: ^width$}", text = text, width = width);

        self.canvas.print_at(0, self.layout.status_row(), &line)
    }

    pub fn present(&mut self) -> Result<()> {
        self.canvas.flush()
    }
}
