//! Stock Ticker — a terminal client that polls the gtimg quote endpoint for
//! a watch-list of instruments and redraws a color-coded table in place,
//! once per second, until interrupted.
//!
//! The watch-list is a plain text file (default `my_stock.dat`), one
//! instrument per line:
//!
//! ```text
//! sh000001
//! sh600519 cost 1580.00
//! ```
//!
//! Usage example (CLI):
//! ```bash
//! ticker_client --path ./my_stock.dat --color auto
//! ```
//!
//! Exit status is 0 after a Ctrl+C interrupt and 1 on a fatal error (for
//! example, an unreadable watch-list file). Either way the cursor is made
//! visible again before the process ends.
#![warn(missing_docs)]
mod args;
mod fetcher;
mod palette;
mod render;
mod session;
mod term;

use std::fs::File;
use std::io::BufReader;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use crossbeam_channel::{Receiver, RecvTimeoutError, bounded};
use log::{debug, error, info};
use ticker_common::Result;
use ticker_common::watchlist::Watchlist;

use crate::args::Args;
use crate::fetcher::QuoteFetcher;
use crate::palette::{Palette, Role};
use crate::render::Renderer;
use crate::session::Session;
use crate::term::{AnsiTerminal, TerminalSurface};

/// Delay between render cycles; doubles as the interrupt wait.
const CYCLE_INTERVAL: Duration = Duration::from_secs(1);

fn main() -> ExitCode {
    init_logger();
    let args = Args::parse();
    let palette = args.color.palette();
    debug!("Color mode: {}", args.color);

    match run(&args, palette) {
        Ok(()) => {
            println!("\n{}", palette.paint(Role::Notice, "程序已退出"));
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Fatal: {}", e);
            restore_cursor();
            eprintln!("\n{}", palette.paint(Role::Error, &format!("程序错误: {}", e)));
            ExitCode::FAILURE
        }
    }
}

/// Load the watch-list, then drive fetch → decode → render cycles until an
/// interrupt arrives.
///
/// Returns `Ok(())` on a user interrupt. Faults inside a cycle are reported
/// inline and the loop keeps running; only an error that escapes even the
/// reporting path (or startup itself) bubbles up into the failure exit.
fn run(args: &Args, palette: Palette) -> Result<()> {
    let interrupt_rx = install_interrupt_handler();

    let file = File::open(&args.path)?;
    let watchlist = Watchlist::parse_from_file(BufReader::new(file))?;
    info!(
        "Watching {} instruments from {}",
        watchlist.len(),
        args.path
    );

    let fetcher = QuoteFetcher::new()?;
    let renderer = Renderer::new(AnsiTerminal::new(), palette);
    let mut session = Session::new(watchlist, fetcher, renderer);

    session.startup()?;
    loop {
        if let Err(e) = session.run_cycle() {
            session.report_unexpected(&e)?;
        }
        match interrupt_rx.recv_timeout(CYCLE_INTERVAL) {
            Ok(()) => break,
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    info!("Interrupt received. Shutting down...");
    session.restore_terminal()?;
    Ok(())
}

/// Install the Ctrl+C handler.
///
/// The handler only pushes a unit message, so an interrupt arriving while
/// the driver sleeps in `recv_timeout` wakes it immediately.
fn install_interrupt_handler() -> Receiver<()> {
    let (tx, rx) = bounded(1);
    ctrlc::set_handler(move || {
        let _ = tx.try_send(());
    })
    .expect("Error setting Ctrl+C handler");
    rx
}

/// Make the cursor visible again on the failure path, even when the fault
/// happened before it was ever hidden.
fn restore_cursor() {
    let mut term = AnsiTerminal::new();
    let _ = term.show_cursor();
    let _ = term.flush();
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}
