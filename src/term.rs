use std::io::{stdout, Stdout, Write};
use std::process::exit;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{poll, read, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{self, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue, style};

use crate::game::{Dimensions, InputSource, Renderer};
use crate::snake::{Direction, Position};
use crate::BoardInt;

/// Puts the terminal into game mode: alternate screen, raw input, no cursor.
pub fn setup() -> Result<()> {
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;
    terminal::enable_raw_mode().context("enabling raw mode")?;
    execute!(stdout, cursor::Hide).context("hiding cursor")?;
    Ok(())
}

pub fn restore() -> Result<()> {
    let mut stdout = stdout();
    terminal::disable_raw_mode().context("disabling raw mode")?;
    execute!(stdout, cursor::Show).context("showing cursor")?;
    execute!(stdout, LeaveAlternateScreen).context("leaving alternate screen")?;
    Ok(())
}

pub struct TermRenderer {
    stdout: Stdout,
}

impl TermRenderer {
    pub fn new() -> Self {
        TermRenderer { stdout: stdout() }
    }
}

impl Renderer for TermRenderer {
    fn dimensions(&self) -> Result<Dimensions> {
        // Queried on every call rather than cached, so the board follows a
        // resized terminal.
        let (width, height) = terminal::size().context("reading terminal size")?;
        Ok(Dimensions {
            height: height as BoardInt,
            width: width as BoardInt,
        })
    }

    fn clear_and_draw_border(&mut self, dims: Dimensions) -> Result<()> {
        queue!(self.stdout, terminal::Clear(ClearType::All)).context("clearing screen")?;

        let (end_row, end_col) = (dims.height - 1, dims.width - 1);

        for col in 0..dims.width {
            let ch = if col == 0 || col == end_col { '+' } else { '-' };
            self.draw_cell(Position::new(0, col), ch)?;
            self.draw_cell(Position::new(end_row, col), ch)?;
        }

        for row in 1..end_row {
            self.draw_cell(Position::new(row, 0), '|')?;
            self.draw_cell(Position::new(row, end_col), '|')?;
        }

        Ok(())
    }

    fn draw_cell(&mut self, pos: Position, glyph: char) -> Result<()> {
        queue!(
            self.stdout,
            cursor::MoveTo(pos.col as u16, pos.row as u16),
            style::Print(glyph)
        )
        .context("drawing cell")?;
        Ok(())
    }

    fn show_message(&mut self, text: &str) -> Result<()> {
        let dims = self.dimensions()?;
        let row = dims.height / 2;
        let col = (dims.width - text.chars().count() as BoardInt) / 2;

        queue!(
            self.stdout,
            cursor::MoveTo(col.max(0) as u16, row as u16),
            style::Print(text)
        )
        .context("printing message")?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.stdout.flush().context("flushing terminal output")?;
        Ok(())
    }
}

pub struct TermInput;

impl InputSource for TermInput {
    fn poll_direction(&mut self, timeout: Duration) -> Result<Option<Direction>> {
        // A single event ends the wait; the poll timeout is the tick clock.
        if !poll(timeout).context("polling for input")? {
            return Ok(None);
        }

        if let Event::Key(key) = read().context("reading input event")? {
            if is_ctrl_c(&key) {
                // The only exit besides losing. Leave the terminal usable.
                let _ = restore();
                exit(0);
            }
            return Ok(direction_for(&key));
        }

        Ok(None)
    }
}

fn direction_for(event: &KeyEvent) -> Option<Direction> {
    match event.code {
        KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Up => Some(Direction::Up),
        KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => Some(Direction::Left),
        KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Down => Some(Direction::Down),
        KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => Some(Direction::Right),
        _ => None,
    }
}

fn is_ctrl_c(event: &KeyEvent) -> bool {
    matches!(
        event,
        KeyEvent {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL
        }
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn arrow_keys_map_to_directions() {
        assert_eq!(direction_for(&key(KeyCode::Up)), Some(Direction::Up));
        assert_eq!(direction_for(&key(KeyCode::Down)), Some(Direction::Down));
        assert_eq!(direction_for(&key(KeyCode::Left)), Some(Direction::Left));
        assert_eq!(direction_for(&key(KeyCode::Right)), Some(Direction::Right));
    }

    #[test]
    fn wasd_maps_to_directions() {
        assert_eq!(direction_for(&key(KeyCode::Char('w'))), Some(Direction::Up));
        assert_eq!(direction_for(&key(KeyCode::Char('s'))), Some(Direction::Down));
        assert_eq!(direction_for(&key(KeyCode::Char('a'))), Some(Direction::Left));
        assert_eq!(direction_for(&key(KeyCode::Char('d'))), Some(Direction::Right));
        assert_eq!(direction_for(&key(KeyCode::Char('W'))), Some(Direction::Up));
    }

    #[test]
    fn other_keys_map_to_none() {
        assert_eq!(direction_for(&key(KeyCode::Char('x'))), None);
        assert_eq!(direction_for(&key(KeyCode::Esc)), None);
        assert_eq!(direction_for(&key(KeyCode::Enter)), None);
    }

    #[test]
    fn recognizes_ctrl_c() {
        let ctrl_c = KeyEvent {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
        };
        assert!(is_ctrl_c(&ctrl_c));
        assert!(!is_ctrl_c(&key(KeyCode::Char('c'))));
    }
}
