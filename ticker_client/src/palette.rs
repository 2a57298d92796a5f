//! Semantic color palette for the table.
//!
//! The fixed set of ANSI SGR codes lives behind semantic roles so the
//! renderer never mentions raw escapes, and so the whole palette can be
//! switched off for non-color environments. Up is red and down is green,
//! the mainland-market convention used by the quote endpoint's own sites.
use std::io::IsTerminal;

use clap::ValueEnum;
use strum_macros::{Display, EnumString};

const WHITE: &str = "\x1b[97m";
const YELLOW: &str = "\x1b[93m";
const RED: &str = "\x1b[91m";
const GREEN: &str = "\x1b[92m";
const RESET: &str = "\x1b[0m";

/// Semantic display roles the renderer paints with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Column header and separator lines.
    Header,
    /// The clock line and user-facing notices.
    Notice,
    /// Values at or above the previous close.
    Up,
    /// Values below the previous close.
    Down,
    /// Code and name columns.
    Neutral,
    /// Inline error lines.
    Error,
}

impl Role {
    fn escape(self) -> &'static str {
        match self {
            Role::Header | Role::Neutral => WHITE,
            Role::Notice => YELLOW,
            Role::Up | Role::Error => RED,
            Role::Down => GREEN,
        }
    }
}

/// When the client should emit color escapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Display, EnumString)]
#[clap(rename_all = "lower")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ColorMode {
    /// Colorize only when stdout is a terminal.
    Auto,
    /// Always emit color escapes.
    Always,
    /// Never emit color escapes.
    Never,
}

impl ColorMode {
    /// Resolve the mode into a concrete palette.
    pub fn palette(self) -> Palette {
        match self {
            ColorMode::Always => Palette::enabled(),
            ColorMode::Never => Palette::disabled(),
            ColorMode::Auto => {
                if std::io::stdout().is_terminal() {
                    Palette::enabled()
                } else {
                    Palette::disabled()
                }
            }
        }
    }
}

/// Maps semantic roles to escape sequences; a disabled palette paints
/// nothing.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    /// Palette that emits ANSI color escapes.
    pub fn enabled() -> Self {
        Palette { enabled: true }
    }

    /// No-op palette for non-color environments.
    pub fn disabled() -> Self {
        Palette { enabled: false }
    }

    /// Wrap `text` in the escape sequence for `role`, or pass it through
    /// unchanged when the palette is disabled.
    pub fn paint(&self, role: Role, text: &str) -> String {
        if self.enabled {
            format!("{}{}{}", role.escape(), text, RESET)
        } else {
            text.to_string()
        }
    }
}
