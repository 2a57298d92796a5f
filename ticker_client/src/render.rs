//! In-place table rendering.
//!
//! Instead of clearing the screen every second, the renderer repositions the
//! cursor to the terminal's home position and overprints the previous
//! frame. Every emitted line is padded to a fixed width so shorter content
//! fully overwrites whatever the last cycle left on that row, and a few
//! blank rows are appended to erase leftovers from a cycle that had more
//! instruments than the current one.
use chrono::Local;
use ticker_common::Result;
use ticker_common::quote::{QuoteRecord, Trend};

use crate::palette::{Palette, Role};
use crate::term::TerminalSurface;

/// Total width every emitted line is padded to. Longer content is never
/// truncated; only shorter content is padded.
const LINE_WIDTH: usize = 120;
/// Width of the `=` separator under the column header.
const SEPARATOR_WIDTH: usize = 100;
/// Rows blanked below the table to erase leftovers from a larger cycle.
const TRAILING_BLANK_LINES: usize = 3;
/// Display names longer than this are cut.
const NAME_CHARS: usize = 8;
/// Timestamp layout: date, weekday, AM/PM, time.
const TIME_FORMAT: &str = "%Y-%m-%d %A %p %X";

/// Draws the quote table in place over a [`TerminalSurface`].
pub struct Renderer<T: TerminalSurface> {
    term: T,
    palette: Palette,
    first_run: bool,
}

impl<T: TerminalSurface> Renderer<T> {
    /// Create a renderer over `term` painting with `palette`.
    pub fn new(term: T, palette: Palette) -> Self {
        Renderer {
            term,
            palette,
            first_run: true,
        }
    }

    /// Clear the screen and hide the cursor. Called once at startup.
    pub fn startup(&mut self) -> Result<()> {
        self.term.clear_all()?;
        self.term.hide_cursor()?;
        self.term.flush()?;
        Ok(())
    }

    /// Restore cursor visibility on the way out.
    pub fn restore(&mut self) -> Result<()> {
        self.term.show_cursor()?;
        self.term.flush()?;
        Ok(())
    }

    /// Draw one full table refresh for `records`, in response order.
    ///
    /// The very first frame prints at the current cursor position; every
    /// later frame homes the cursor first so the table refreshes in place.
    pub fn render(&mut self, records: &[QuoteRecord]) -> Result<()> {
        if !self.first_run {
            self.term.cursor_home()?;
        }

        let timestamp = Local::now().format(TIME_FORMAT).to_string();
        let header = format!(
            "{:<12} {:<12} {:>10} {:>10}",
            "CODE", "NAME", "LATEST", "CHANGE"
        );
        let rows: Vec<String> = records.iter().map(|r| self.format_row(r)).collect();

        let time_line = self.palette.paint(Role::Notice, &timestamp);
        self.print_padded(&time_line)?;
        let header_line = self.palette.paint(Role::Header, &header);
        self.print_padded(&header_line)?;
        let separator = self.palette.paint(Role::Header, &"=".repeat(SEPARATOR_WIDTH));
        self.print_padded(&separator)?;

        for row in &rows {
            self.print_padded(row)?;
        }

        if !self.first_run {
            for _ in 0..TRAILING_BLANK_LINES {
                self.print_padded("")?;
            }
        }

        self.term.flush()?;
        self.first_run = false;
        Ok(())
    }

    /// Print one colored inline error line in place of the table.
    ///
    /// Error frames never reposition the cursor and do not count as a first
    /// render; only a successful table draw does.
    pub fn render_error(&mut self, message: &str) -> Result<()> {
        let line = self.palette.paint(Role::Error, message);
        self.print_padded(&line)?;
        self.term.flush()?;
        Ok(())
    }

    fn format_row(&self, record: &QuoteRecord) -> String {
        let name: String = record.name.chars().take(NAME_CHARS).collect();
        let price_role = match record.trend() {
            Trend::Up => Role::Up,
            Trend::Down => Role::Down,
        };

        format!(
            "{} {} {} {}",
            self.palette
                .paint(Role::Neutral, &format!("{:<12}", record.code)),
            self.palette.paint(Role::Neutral, &format!("{:<12}", name)),
            self.palette
                .paint(price_role, &format!("{:>10.2}", record.display_price())),
            self.palette
                .paint(price_role, &format!("{:>10}", record.change_label())),
        )
    }

    fn print_padded(&mut self, line: &str) -> Result<()> {
        let padded = format!("{:<width$}", line, width = LINE_WIDTH);
        self.term.print_line(&padded)?;
        Ok(())
    }

    #[cfg(test)]
    fn surface(&self) -> &T {
        &self.term
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::term::CaptureSurface;
    use ticker_common::quote::SUSPENDED_LABEL;

    fn record(code: &str, name: &str, latest: f64, prev: f64, change: &str) -> QuoteRecord {
        QuoteRecord {
            code: code.to_string(),
            name: name.to_string(),
            contract_id: "000001".to_string(),
            latest_price: latest,
            prev_close: prev,
            open_price: prev,
            change_pct: change.to_string(),
            high_price: latest,
            low_price: prev,
        }
    }

    fn plain_renderer() -> Renderer<CaptureSurface> {
        Renderer::new(CaptureSurface::default(), Palette::disabled())
    }

    #[test]
    fn startup_clears_once_and_hides_the_cursor() {
        let mut renderer = plain_renderer();
        renderer.startup().unwrap();
        assert_eq!(renderer.surface().clears, 1);
        assert!(renderer.surface().cursor_hidden);

        renderer.restore().unwrap();
        assert!(!renderer.surface().cursor_hidden);
    }

    #[test]
    fn every_line_is_padded_to_full_width() {
        let mut renderer = plain_renderer();
        let records = vec![
            record("sh000001", "上证指数", 3310.50, 3300.00, "0.32"),
            record("sz399001", "深证成指", 10000.00, 10100.00, "-0.99"),
        ];
        renderer.render(&records).unwrap();

        assert_eq!(renderer.surface().lines.len(), 3 + records.len());
        for line in &renderer.surface().lines {
            assert!(line.chars().count() >= LINE_WIDTH, "short line: {:?}", line);
        }
    }

    #[test]
    fn long_content_is_not_truncated() {
        let mut renderer = plain_renderer();
        let long_code = "x".repeat(LINE_WIDTH + 10);
        renderer
            .render(&[record(&long_code, "name", 1.0, 1.0, "0.00")])
            .unwrap();

        let row = renderer.surface().lines.last().unwrap();
        assert!(row.contains(&long_code));
        assert!(row.chars().count() > LINE_WIDTH);
    }

    #[test]
    fn first_frame_prints_in_place_and_later_frames_home() {
        let mut renderer = plain_renderer();
        let records = [record("sh000001", "上证指数", 3310.50, 3300.00, "0.32")];

        renderer.render(&records).unwrap();
        assert_eq!(renderer.surface().homes, 0);
        assert_eq!(renderer.surface().lines.len(), 4);

        renderer.render(&records).unwrap();
        assert_eq!(renderer.surface().homes, 1);
        // Second frame appends the trailing eraser rows.
        assert_eq!(renderer.surface().lines.len(), 4 + 4 + TRAILING_BLANK_LINES);
    }

    #[test]
    fn error_frames_do_not_reposition_or_consume_the_first_run() {
        let mut renderer = plain_renderer();
        renderer.render_error("Network error: timed out").unwrap();
        assert_eq!(renderer.surface().homes, 0);
        assert!(renderer.surface().lines[0].starts_with("Network error"));
        assert!(renderer.surface().lines[0].chars().count() >= LINE_WIDTH);

        // The next successful frame is still the first one.
        renderer.render(&[]).unwrap();
        assert_eq!(renderer.surface().homes, 0);
    }

    #[test]
    fn suspended_instrument_renders_prev_close_and_label() {
        let mut renderer = plain_renderer();
        renderer
            .render(&[record("sh600000", "浦发银行", 0.0, 10.50, "0.00")])
            .unwrap();

        let row = renderer.surface().lines.last().unwrap();
        assert!(row.contains("10.50"));
        assert!(row.contains(SUSPENDED_LABEL));
    }

    #[test]
    fn names_are_cut_to_eight_chars() {
        let mut renderer = plain_renderer();
        renderer
            .render(&[record("sh000001", "ABCDEFGHIJKL", 1.0, 1.0, "0.00")])
            .unwrap();

        let row = renderer.surface().lines.last().unwrap();
        assert!(row.contains("ABCDEFGH"));
        assert!(!row.contains("ABCDEFGHI"));
    }

    #[test]
    fn colors_follow_the_trend_against_prev_close() {
        let mut renderer = Renderer::new(CaptureSurface::default(), Palette::enabled());
        renderer
            .render(&[
                record("sh000001", "up", 3310.50, 3300.00, "0.32"),
                record("sz399001", "down", 9900.00, 10000.00, "-1.00"),
                record("sh600000", "flat", 10.50, 10.50, "0.00"),
            ])
            .unwrap();

        let lines = &renderer.surface().lines;
        let up_row = &lines[3];
        let down_row = &lines[4];
        let flat_row = &lines[5];
        assert!(up_row.contains("\x1b[91m"));
        assert!(!up_row.contains("\x1b[92m"));
        assert!(down_row.contains("\x1b[92m"));
        // Equality counts as up.
        assert!(flat_row.contains("\x1b[91m"));
    }

    #[test]
    fn disabled_palette_emits_no_escapes() {
        let mut renderer = plain_renderer();
        renderer
            .render(&[record("sh000001", "上证指数", 3310.50, 3300.00, "0.32")])
            .unwrap();

        for line in &renderer.surface().lines {
            assert!(!line.contains('\x1b'));
        }
    }
}
