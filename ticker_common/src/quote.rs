//! Quote records and the gtimg wire-format decoder.
//!
//! The quote endpoint answers one record per instrument, shaped
//! `v_<code>="field0~field1~...~fieldN";`. Fields are positional; the
//! indices consumed here are name (1), contract id (2), latest price (3),
//! previous close (4), open (5), change percent (32), high (33) and low
//! (34). A record carrying fewer than [`MIN_FIELDS`] fields is unusable and
//! is reported as a [`RecordError`] instead of being guessed at.
//!
//! Decoding a whole response batch never fails: bad records are logged and
//! skipped so the remaining instruments still render.
use log::warn;
use serde::{Deserialize, Serialize};
use strum_macros::Display;
use thiserror::Error;

/// Minimum number of `~`-separated fields a record must carry before any
/// positional extraction is attempted.
pub const MIN_FIELDS: usize = 36;

/// Prefix marking a quote record line in the response body.
const RECORD_PREFIX: &str = "v_";

/// Change-column label for an instrument with suspended trading.
pub const SUSPENDED_LABEL: &str = "停牌";

/// Change-column label when the raw change field is not a number.
pub const UNAVAILABLE_LABEL: &str = "N/A";

/// Reason a single response line could not be decoded.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    /// The line has no `=` between tag and payload.
    #[error("record has no '=' separator")]
    MissingPayload,

    /// The payload has fewer fields than positional extraction needs.
    #[error("record has {count} fields, expected at least 36")]
    TooFewFields {
        /// Number of `~`-separated fields actually present.
        count: usize,
    },

    /// A price field did not parse as a number.
    #[error("field '{field}' is not a number: {value:?}")]
    InvalidNumber {
        /// Which price field was malformed.
        field: &'static str,
        /// The raw field content.
        value: String,
    },
}

/// Price direction relative to the previous close.
///
/// `Up` covers equality: an unchanged price renders in the up color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Trend {
    /// At or above the previous close.
    Up,
    /// Below the previous close.
    Down,
}

/// One decoded instrument quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteRecord {
    /// Instrument code, taken from the record tag (e.g., `sh000001`).
    pub code: String,
    /// Instrument display name.
    pub name: String,
    /// Contract identifier.
    pub contract_id: String,
    /// Latest traded price. Exactly `0.0` means trading is suspended.
    pub latest_price: f64,
    /// Previous session's closing price.
    pub prev_close: f64,
    /// Today's opening price.
    pub open_price: f64,
    /// Raw change-percent field, kept verbatim for display formatting.
    pub change_pct: String,
    /// Today's highest price.
    pub high_price: f64,
    /// Today's lowest price.
    pub low_price: f64,
}

impl QuoteRecord {
    /// `true` when the endpoint reports a zero latest price, its marker for
    /// suspended trading.
    pub fn is_suspended(&self) -> bool {
        self.latest_price == 0.0
    }

    /// Price shown in the table: the previous close while suspended, the
    /// latest price otherwise.
    pub fn display_price(&self) -> f64 {
        if self.is_suspended() {
            self.prev_close
        } else {
            self.latest_price
        }
    }

    /// Change-column text: [`SUSPENDED_LABEL`] while suspended, a signed
    /// two-decimal percent when the raw field is numeric, and
    /// [`UNAVAILABLE_LABEL`] otherwise.
    pub fn change_label(&self) -> String {
        if self.is_suspended() {
            return SUSPENDED_LABEL.to_string();
        }
        match self.change_pct.trim().parse::<f64>() {
            Ok(value) => format!("{:+.2}%", value),
            Err(_) => UNAVAILABLE_LABEL.to_string(),
        }
    }

    /// Direction of an arbitrary price field against the previous close.
    ///
    /// The same rule holds for every column that could be colorized
    /// (latest, open, high, low).
    pub fn trend_of(&self, value: f64) -> Trend {
        if value >= self.prev_close {
            Trend::Up
        } else {
            Trend::Down
        }
    }

    /// Direction used for both the price and the change columns. Based on
    /// the displayed price, so a suspended instrument compares its previous
    /// close against itself and lands on `Up`.
    pub fn trend(&self) -> Trend {
        self.trend_of(self.display_price())
    }
}

/// Decodes one `v_<code>="..."` line into a [`QuoteRecord`].
pub fn parse_record(line: &str) -> Result<QuoteRecord, RecordError> {
    let (tag, payload) = line.split_once('=').ok_or(RecordError::MissingPayload)?;
    let payload = payload.trim().trim_end_matches(';').trim_matches('"');

    let fields: Vec<&str> = payload.split('~').collect();
    if fields.len() < MIN_FIELDS {
        return Err(RecordError::TooFewFields {
            count: fields.len(),
        });
    }

    let tag = tag.trim();
    let code = tag.strip_prefix(RECORD_PREFIX).unwrap_or(tag).to_string();

    Ok(QuoteRecord {
        code,
        name: fields[1].to_string(),
        contract_id: fields[2].to_string(),
        latest_price: parse_price("latest price", fields[3])?,
        prev_close: parse_price("previous close", fields[4])?,
        open_price: parse_price("open price", fields[5])?,
        change_pct: fields[32].to_string(),
        high_price: parse_price("high price", fields[33])?,
        low_price: parse_price("low price", fields[34])?,
    })
}

fn parse_price(field: &'static str, raw: &str) -> Result<f64, RecordError> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| RecordError::InvalidNumber {
            field,
            value: raw.to_string(),
        })
}

/// Decodes a whole response body into the records it carries, in response
/// order.
///
/// Records are separated by `;`. Blank lines and lines without the `v_`
/// prefix are ignored; a line that fails to decode is logged and skipped,
/// never fatal to the batch.
pub fn parse_response(text: &str) -> Vec<QuoteRecord> {
    let mut records = Vec::new();

    for line in text.replace(';', "\n").lines() {
        let line = line.trim();
        if line.is_empty() || !line.starts_with(RECORD_PREFIX) {
            continue;
        }
        match parse_record(line) {
            Ok(record) => records.push(record),
            Err(e) => warn!("Skipping quote record: {}", e),
        }
    }
    records
}
