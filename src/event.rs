//! Parses the line-delimited text event feed into `Event`s the driver can
//! hand to the matching kernel.
//!
//! Grammar: `<action>,<id>,<side>,<qty>,<price>` where `action ∈ {A, X}`,
//! `side ∈ {B, S}`, and `id`/`qty`/`price` are unsigned integers. Blank
//! lines are skipped. Everything else is a `ParseError`.

use std::fmt;

use thiserror::Error;

use crate::order::Side;

/// One parsed line of the input feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Place {
        id: u64,
        side: Side,
        qty: u64,
        price: u64,
    },
    Cancel {
        id: u64,
    },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("line {line}: expected 5 comma-separated fields, found {found}")]
    WrongFieldCount { line: usize, found: usize },
    #[error("line {line}: unknown action '{found}', expected 'A' or 'X'")]
    UnknownAction { line: usize, found: String },
    #[error("line {line}: unknown side '{found}', expected 'B' or 'S'")]
    UnknownSide { line: usize, found: String },
    #[error("line {line}: field '{field}' is not a valid unsigned integer: '{found}'")]
    NotAnInteger {
        line: usize,
        field: &'static str,
        found: String,
    },
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::Place { id, side, qty, price } => {
                write!(f, "place id={id} side={side:?} qty={qty} price={price}")
            }
            Event::Cancel { id } => write!(f, "cancel id={id}"),
        }
    }
}

/// Parses a single non-empty line. Callers are expected to skip blank lines
/// before calling this (see [`parse_lines`]), so `line_number` is purely for
/// error messages.
pub fn parse_line(line: &str, line_number: usize) -> Result<Event, ParseError> {
    let fields: Vec<&str> = line.split(',').collect();
    if fields.len() != 5 {
        return Err(ParseError::WrongFieldCount {
            line: line_number,
            found: fields.len(),
        });
    }

    let action = fields[0];
    let id = parse_u64(fields[1], "id", line_number)?;
    let side = match fields[2] {
        "B" => Side::Buy,
        "S" => Side::Sell,
        other => {
            return Err(ParseError::UnknownSide {
                line: line_number,
                found: other.to_string(),
            });
        }
    };
    let qty = parse_u64(fields[3], "qty", line_number)?;
    let price = parse_u64(fields[4], "price", line_number)?;

    match action {
        "A" => Ok(Event::Place { id, side, qty, price }),
        "X" => Ok(Event::Cancel { id }),
        other => Err(ParseError::UnknownAction {
            line: line_number,
            found: other.to_string(),
        }),
    }
}

fn parse_u64(field: &str, name: &'static str, line_number: usize) -> Result<u64, ParseError> {
    field.parse::<u64>().map_err(|_| ParseError::NotAnInteger {
        line: line_number,
        field: name,
        found: field.to_string(),
    })
}

/// Lazily parses every non-blank line of `text`, yielding one `Result` per
/// line in order. Blank lines are skipped entirely (not even counted toward
/// an error).
pub fn parse_lines(text: &str) -> impl Iterator<Item = Result<Event, ParseError>> + '_ {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| parse_line(line.trim_end_matches('\r'), idx + 1))
}
