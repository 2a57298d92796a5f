//! Minimal terminal control surface.
//!
//! The renderer needs four cursor/screen operations plus line output, so
//! they live behind a small trait: the production implementation drives
//! stdout through `crossterm`, and tests substitute an in-memory surface to
//! observe what would have been drawn.
use std::io::{self, Stdout, Write};

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute,
    terminal::{Clear, ClearType},
};

/// Cursor and screen operations the renderer depends on.
pub trait TerminalSurface {
    /// Erase the whole screen and park the cursor at home. Called once at
    /// startup.
    fn clear_all(&mut self) -> io::Result<()>;
    /// Move the cursor to the top-left home position.
    fn cursor_home(&mut self) -> io::Result<()>;
    /// Hide the cursor to reduce refresh flicker.
    fn hide_cursor(&mut self) -> io::Result<()>;
    /// Restore cursor visibility.
    fn show_cursor(&mut self) -> io::Result<()>;
    /// Print one line of output.
    fn print_line(&mut self, line: &str) -> io::Result<()>;
    /// Flush pending output to the device.
    fn flush(&mut self) -> io::Result<()>;
}

/// Production surface writing to the process stdout.
pub struct AnsiTerminal {
    out: Stdout,
}

impl AnsiTerminal {
    /// Create a surface over stdout.
    pub fn new() -> Self {
        AnsiTerminal { out: io::stdout() }
    }
}

impl Default for AnsiTerminal {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalSurface for AnsiTerminal {
    fn clear_all(&mut self) -> io::Result<()> {
        execute!(self.out, Clear(ClearType::All), MoveTo(0, 0))
    }

    fn cursor_home(&mut self) -> io::Result<()> {
        execute!(self.out, MoveTo(0, 0))
    }

    fn hide_cursor(&mut self) -> io::Result<()> {
        execute!(self.out, Hide)
    }

    fn show_cursor(&mut self) -> io::Result<()> {
        execute!(self.out, Show)
    }

    fn print_line(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.out, "{}", line)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

/// In-memory surface recording every operation, for renderer tests.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct CaptureSurface {
    /// Lines printed, in order.
    pub lines: Vec<String>,
    /// Number of cursor-home repositions.
    pub homes: usize,
    /// Number of full-screen clears.
    pub clears: usize,
    /// Current cursor visibility.
    pub cursor_hidden: bool,
}

#[cfg(test)]
impl TerminalSurface for CaptureSurface {
    fn clear_all(&mut self) -> io::Result<()> {
        self.clears += 1;
        Ok(())
    }

    fn cursor_home(&mut self) -> io::Result<()> {
        self.homes += 1;
        Ok(())
    }

    fn hide_cursor(&mut self) -> io::Result<()> {
        self.cursor_hidden = true;
        Ok(())
    }

    fn show_cursor(&mut self) -> io::Result<()> {
        self.cursor_hidden = false;
        Ok(())
    }

    fn print_line(&mut self, line: &str) -> io::Result<()> {
        self.lines.push(line.to_string());
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
