use std::{io::{Stdout, Write, stdout}, time::Duration};

use anyhow::Result;
use crossterm::{cursor, execute, queue, style, terminal};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers, poll, read};
use crossterm::style::Color;
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use log::warn;

use crate::input::{InputEvent, InputSource};
use crate::render::{Canvas, CellColor, Rect};
use crate::snake::Heading;

const TITLE: &str = "Game of Snakes";

const BACKDROP: Color = Color::Rgb { r: 50, g: 50, b: 50 };
const FRAME: Color = Color::Rgb { r: 255, g: 255, b: 255 };

fn cell_color(color: CellColor) -> Color {
    match color {
        CellColor::EmptyDark => Color::Rgb { r: 0, g: 25, b: 52 },
        CellColor::EmptyLight => Color::Rgb { r: 0, g: 51, b: 102 },
        CellColor::Body => Color::Rgb { r: 0, g: 153, b: 0 },
        CellColor::Food => Color::Rgb { r: 255, g: 255, b: 255 },
    }
}

/// Owns the terminal while the game runs and restores it when dropped.
pub struct TermManager {
    width: u16,
    height: u16,
    stdout: Stdout,
    active: bool,
}

impl TermManager {
    pub fn new() -> Result<Self> {
        let (width, height) = terminal::size()?;
        Ok(TermManager { width, height, stdout: stdout(), active: false })
    }

    pub fn setup(&mut self) -> Result<()> {
        execute!(self.stdout, EnterAlternateScreen, terminal::SetTitle(TITLE))?;
        self.active = true;
        terminal::enable_raw_mode()?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking)?;
        Ok(())
    }

    pub fn restore(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;

        terminal::disable_raw_mode()?;
        execute!(
            self.stdout,
            style::ResetColor,
            cursor::Show,
            cursor::EnableBlinking,
            LeaveAlternateScreen
        )?;
        Ok(())
    }
}

impl Drop for TermManager {
    fn drop(&mut self) {
        if let Err(err) = self.restore() {
            warn!("could not restore the terminal: {}", err);
        }
    }
}

impl Canvas for TermManager {
    fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    fn clear(&mut self) -> Result<()> {
        queue!(self.stdout, style::SetBackgroundColor(BACKDROP), terminal::Clear(ClearType::All))?;
        Ok(())
    }

    fn fill_rect(&mut self, rect: Rect, color: CellColor) -> Result<()> {
        let blank = " ".repeat(rect.width as usize);

        queue!(self.stdout, style::SetBackgroundColor(cell_color(color)))?;
        for y in rect.y..rect.y + rect.height {
            queue!(self.stdout, cursor::MoveTo(rect.x, y), style::Print(&blank))?;
        }
        Ok(())
    }

    fn outline(&mut self, rect: Rect) -> Result<()> {
        let (left, top) = (rect.x, rect.y);
        let right = rect.x + rect.width - 1;
        let bottom = rect.y + rect.height - 1;
        let horizontal = "─".repeat(rect.width as usize - 2);

        queue!(
            self.stdout,
            style::SetBackgroundColor(BACKDROP),
            style::SetForegroundColor(FRAME),
            cursor::MoveTo(left, top),
            style::Print(format!("┌{}┐", horizontal)),
            cursor::MoveTo(left, bottom),
            style::Print(format!("└{}┘", horizontal))
        )?;

        for y in top + 1..bottom {
            queue!(
                self.stdout,
                cursor::MoveTo(left, y),
                style::Print('│'),
                cursor::MoveTo(right, y),
                style::Print('│')
            )?;
        }
        Ok(())
    }

    fn print_at(&mut self, x: u16, y: u16, text: &str) -> Result<()> {
        queue!(
            self.stdout,
            style::SetBackgroundColor(BACKDROP),
            style::SetForegroundColor(FRAME),
            cursor::MoveTo(x, y),
            style::Print(text)
        )?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.stdout.flush()?;
        Ok(())
    }
}

/// Keyboard events read straight from the terminal.
pub struct KeyboardInput;

impl InputSource for KeyboardInput {
    fn poll_events(&mut self) -> Result<Vec<InputEvent>> {
        let mut events = vec![];

        while poll(Duration::from_millis(1))? {
            if let Event::Key(ev) = read()? {
                events.push(map_key(&ev));
            }
        }

        Ok(events)
    }
}

/// Every key press maps to something: a press that neither steers nor
/// quits still counts as a key, so it starts the game.
fn map_key(ev: &KeyEvent) -> InputEvent {
    if is_ctrl_c(ev) {
        return InputEvent::Quit;
    }
    // Ctrl and Alt chords never steer or quit.
    if ev.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
        return InputEvent::Key;
    }

    match ev.code {
        KeyCode::Char('w') | KeyCode::Up => InputEvent::Steer(Heading::Up),
        KeyCode::Char('a') | KeyCode::Left => InputEvent::Steer(Heading::Left),
        KeyCode::Char('s') | KeyCode::Down => InputEvent::Steer(Heading::Down),
        KeyCode::Char('d') | KeyCode::Right => InputEvent::Steer(Heading::Right),
        KeyCode::Char('q') | KeyCode::Esc => InputEvent::Quit,
        _ => InputEvent::Key,
    }
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    matches!(ev, KeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL })
}
