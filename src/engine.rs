//! The public `OrderBook` facade: owns both side books, the cancel index,
//! the sequence/id counters, and the trade observer slot.

use std::collections::HashMap;

use tracing::{info, warn};

use crate::book::SideBook;
use crate::error::EngineError;
use crate::matching;
use crate::order::{Order, Side};
use crate::trade::Trade;

/// The caller-supplied fields of a new order. `id` is optional: when omitted
/// the engine assigns one from its own counter.
#[derive(Debug, Clone, Copy)]
pub struct OrderFields {
    pub id: Option<u64>,
    pub side: Side,
    pub price: u64,
    pub qty: u64,
}

/// Where a resting order's id can be found: which side, and at which price
/// level. Stable across insertion/removal of every *other* order.
#[derive(Debug, Clone, Copy)]
struct Locator {
    side: Side,
    price: u64,
}

/// A single-instrument, single-threaded continuous-auction limit order book.
pub struct OrderBook {
    bids: SideBook,
    asks: SideBook,
    index: HashMap<u64, Locator>,
    next_sequence: u64,
    next_auto_id: u64,
    observer: Box<dyn FnMut(&Trade)>,
}

impl OrderBook {
    pub fn new() -> Self {
        Self {
            bids: SideBook::new(Side::Buy),
            asks: SideBook::new(Side::Sell),
            index: HashMap::new(),
            next_sequence: 0,
            next_auto_id: 0,
            observer: Box::new(|_| {}),
        }
    }

    /// Replaces the trade observer. Idempotent: may be called any number of
    /// times, including with an identical closure.
    pub fn set_trade_observer<F>(&mut self, observer: F)
    where
        F: FnMut(&Trade) + 'static,
    {
        self.observer = Box::new(observer);
    }

    fn next_sequence(&mut self) -> u64 {
        let seq = self.next_sequence;
        self.next_sequence += 1;
        seq
    }

    fn next_auto_id(&mut self) -> u64 {
        // Skip over any id a caller might plausibly have already used; in
        // practice this loop runs once, since engine-assigned ids are never
        // handed back out to callers.
        loop {
            let id = self.next_auto_id;
            self.next_auto_id += 1;
            if !self.index.contains_key(&id) {
                return id;
            }
        }
    }

    fn side_book(&mut self, side: Side) -> &mut SideBook {
        match side {
            Side::Buy => &mut self.bids,
            Side::Sell => &mut self.asks,
        }
    }

    /// Accepts a new order. Crosses it against the opposite side immediately;
    /// whatever quantity remains afterward rests in the book.
    ///
    /// Returns the order's id (caller-supplied or engine-assigned) on
    /// success. Rejects zero quantity/price and duplicate caller-supplied
    /// ids without mutating any state.
    pub fn place(&mut self, fields: OrderFields) -> Result<u64, EngineError> {
        if fields.qty == 0 || fields.price == 0 {
            return Err(EngineError::InvalidOrder);
        }
        let id = match fields.id {
            Some(id) => {
                if self.index.contains_key(&id) {
                    return Err(EngineError::DuplicateId(id));
                }
                id
            }
            None => self.next_auto_id(),
        };

        let mut order = Order {
            id,
            side: fields.side,
            price: fields.price,
            qty: fields.qty,
            sequence: self.next_sequence(),
        };
        info!(id, side = ?order.side, price = order.price, qty = order.qty, "order accepted");

        let opposite = match order.side {
            Side::Buy => &mut self.asks,
            Side::Sell => &mut self.bids,
        };
        let index = &mut self.index;
        matching::cross(&mut order, opposite, |trade, resting_exhausted| {
            (self.observer)(trade);
            if resting_exhausted {
                index.remove(&trade.resting_id);
            }
        });

        if order.qty > 0 {
            let locator = Locator {
                side: order.side,
                price: order.price,
            };
            self.index.insert(order.id, locator);
            self.side_book(order.side).insert(order);
        }

        Ok(id)
    }

    /// Cancels a resting order by id. Returns `true` iff it was resting.
    /// Never produces trades or triggers matching.
    pub fn cancel(&mut self, id: u64) -> bool {
        let Some(locator) = self.index.remove(&id) else {
            warn!(id, "cancel: unknown order id");
            return false;
        };
        let removed = self.side_book(locator.side).remove(locator.price, id);
        debug_assert!(removed.is_some(), "index and book disagreed about order {id}");
        info!(id, "order cancelled");
        true
    }

    /// Read-only traversal of resting bids, best first.
    pub fn bids(&self) -> impl Iterator<Item = &Order> {
        self.bids.iter()
    }

    /// Read-only traversal of resting asks, best first.
    pub fn asks(&self) -> impl Iterator<Item = &Order> {
        self.asks.iter()
    }

    /// The best resting bid price, if any.
    pub fn best_bid(&self) -> Option<u64> {
        self.bids.front_price()
    }

    /// The best resting ask price, if any.
    pub fn best_ask(&self) -> Option<u64> {
        self.asks.front_price()
    }

    /// Number of ids currently tracked by the cancel index. Exposed for
    /// invariant testing (index completeness).
    pub fn index_len(&self) -> usize {
        self.index.len()
    }

    pub fn index_contains(&self, id: u64) -> bool {
        self.index.contains_key(&id)
    }
}

impl Default for OrderBook {
    fn default() -> Self {
        Self::new()
    }
}
