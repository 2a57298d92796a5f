//! Driver session tying the pieces together.
//!
//! A `Session` owns the watch-list, the HTTP fetcher, and the renderer for
//! the lifetime of the process — the state that would otherwise end up as
//! process-wide globals. The main loop calls [`Session::run_cycle`] once per
//! second.
use log::{debug, warn};
use ticker_common::quote::parse_response;
use ticker_common::watchlist::Watchlist;
use ticker_common::{Result, TickerError};

use crate::fetcher::QuoteFetcher;
use crate::render::Renderer;
use crate::term::TerminalSurface;

/// One running ticker session.
pub struct Session<T: TerminalSurface> {
    watchlist: Watchlist,
    fetcher: QuoteFetcher,
    renderer: Renderer<T>,
}

impl<T: TerminalSurface> Session<T> {
    /// Wire a session from its parts.
    pub fn new(watchlist: Watchlist, fetcher: QuoteFetcher, renderer: Renderer<T>) -> Self {
        Session {
            watchlist,
            fetcher,
            renderer,
        }
    }

    /// Clear the screen and hide the cursor before the first cycle.
    pub fn startup(&mut self) -> Result<()> {
        self.renderer.startup()
    }

    /// One fetch → decode → render pass.
    ///
    /// A network failure is rendered inline and is not an error from the
    /// caller's point of view; anything else propagates so the driver can
    /// report it without leaving the loop.
    pub fn run_cycle(&mut self) -> Result<()> {
        let body = match self.fetcher.fetch(&self.watchlist.query()) {
            Ok(body) => body,
            Err(TickerError::Network(reason)) => {
                warn!("Quote fetch failed: {}", reason);
                return self
                    .renderer
                    .render_error(&format!("Network error: {}", reason));
            }
            Err(e) => return Err(e),
        };

        let records = parse_response(&body);
        debug!(
            "Decoded {} of {} watched instruments",
            records.len(),
            self.watchlist.len()
        );
        self.renderer.render(&records)
    }

    /// Report a fault that escaped [`Session::run_cycle`] without stopping
    /// the loop.
    pub fn report_unexpected(&mut self, error: &TickerError) -> Result<()> {
        warn!("Cycle failed: {}", error);
        self.renderer
            .render_error(&format!("Unexpected error: {}", error))
    }

    /// Restore the cursor on the way out.
    pub fn restore_terminal(&mut self) -> Result<()> {
        self.renderer.restore()
    }
}
