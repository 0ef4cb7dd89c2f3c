//! Feeds a parsed event stream into an [`OrderBook`], one line at a time,
//! without buffering the whole file into memory.

use std::io::BufRead;

use thiserror::Error;
use tracing::{debug, warn};

use crate::engine::{OrderBook, OrderFields};
use crate::event::{self, ParseError};

#[derive(Error, Debug)]
pub enum DriverError {
    #[error("I/O error reading input: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Engine(#[from] crate::error::EngineError),
}

/// Reads every non-blank line from `reader`, parses it, and applies it to
/// `book`. Stops at the first malformed line or engine rejection (duplicate
/// id, zero qty/price) and reports it as a fatal [`DriverError`].
pub fn run<R: BufRead>(reader: R, book: &mut OrderBook) -> Result<(), DriverError> {
    for (line_number, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let ev = event::parse_line(&line, line_number + 1)?;
        debug!(%ev, "applying event");
        apply(book, ev)?;
    }
    Ok(())
}

fn apply(book: &mut OrderBook, ev: event::Event) -> Result<(), DriverError> {
    match ev {
        event::Event::Place { id, side, qty, price } => {
            book.place(OrderFields {
                id: Some(id),
                side,
                price,
                qty,
            })?;
        }
        event::Event::Cancel { id } => {
            if !book.cancel(id) {
                warn!(id, "cancel requested for an order that is not resting");
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book_with(input: &str) -> OrderBook {
        let mut book = OrderBook::new();
        run(input.as_bytes(), &mut book).unwrap();
        book
    }

    #[test]
    fn single_resting_order() {
        let book = book_with("A,1,B,1000,100\n");
        let bids: Vec<_> = book.bids().collect();
        assert_eq!(bids.len(), 1);
        assert_eq!(bids[0].id, 1);
        assert_eq!(bids[0].qty, 1000);
        assert!(book.asks().next().is_none());
    }

    #[test]
    fn non_crossing_pair_both_rest() {
        let book = book_with("A,1,B,1000,100\nA,2,S,100,1000\n");
        assert_eq!(book.bids().count(), 1);
        assert_eq!(book.asks().count(), 1);
    }

    #[test]
    fn cancel_resting_order() {
        let book = book_with("A,1,B,1000,100\nX,1,B,0,0\n");
        assert!(book.bids().next().is_none());
        assert!(book.asks().next().is_none());
    }

    #[test]
    fn cancel_unknown_does_not_fail_the_run() {
        let book = book_with("X,999,B,0,0\n");
        assert!(book.bids().next().is_none());
    }

    #[test]
    fn malformed_line_is_a_fatal_error() {
        let mut book = OrderBook::new();
        let err = run("A,not-a-number,B,10,100\n".as_bytes(), &mut book);
        assert!(err.is_err());
    }

    #[test]
    fn duplicate_place_id_is_a_fatal_error() {
        let mut book = OrderBook::new();
        let err = run("A,1,B,10,100\nA,1,S,10,100\n".as_bytes(), &mut book);
        assert!(matches!(err, Err(DriverError::Engine(_))));
    }

    #[test]
    fn trailing_newline_optional() {
        let book = book_with("A,1,B,10,100");
        assert_eq!(book.bids().count(), 1);
    }
}
