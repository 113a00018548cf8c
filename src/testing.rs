//! Test doubles for the terminal collaborators.

use std::collections::VecDeque;

use anyhow::Result;

use crate::input::{InputEvent, InputSource};
use crate::render::{Canvas, CellColor, Rect};

pub struct RecordingCanvas {
    size: (u16, u16),
    pub clears: usize,
    pub flushes: usize,
    pub fills: Vec<(Rect, CellColor)>,
    pub outlines: Vec<Rect>,
    pub lines: Vec<(u16, u16, String)>,
}

impl RecordingCanvas {
    pub fn new(width: u16, height: u16) -> Self {
        RecordingCanvas {
            size: (width, height),
            clears: 0,
            flushes: 0,
            fills: vec![],
            outlines: vec![],
            lines: vec![],
        }
    }

    /// Most recent color painted on `rect`.
    pub fn color_at(&self, rect: Rect) -> Option<CellColor> {
        self.fills.iter().rev().find(|(r, _)| *r == rect).map(|(_, color)| *color)
    }

    pub fn last_status(&self) -> Option<&str> {
        self.lines.last().map(|(_, _, text)| text.trim())
    }
}

impl Canvas for RecordingCanvas {
    fn size(&self) -> (u16, u16) {
        self.size
    }

    fn clear(&mut self) -> Result<()> {
        self.clears += 1;
        Ok(())
    }

    fn fill_rect(&mut self, rect: Rect, color: CellColor) -> Result<()> {
        self.fills.push((rect, color));
        Ok(())
    }

    fn outline(&mut self, rect: Rect) -> Result<()> {
        self.outlines.push(rect);
        Ok(())
    }

    fn print_at(&mut self, x: u16, y: u16, text: &str) -> Result<()> {
        self.lines.push((x, y, text.to_string()));
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.flushes += 1;
        Ok(())
    }
}

/// Hands out one scripted batch per poll, then keeps asking to quit.
pub struct ScriptedInput {
    batches: VecDeque<Vec<InputEvent>>,
}

impl ScriptedInput {
    pub fn new(batches: Vec<Vec<InputEvent>>) -> Self {
        ScriptedInput { batches: batches.into() }
    }
}

impl InputSource for ScriptedInput {
    fn poll_events(&mut self) -> Result<Vec<InputEvent>> {
        Ok(self.batches.pop_front().unwrap_or_else(|| vec![InputEvent::Quit]))
    }
}
