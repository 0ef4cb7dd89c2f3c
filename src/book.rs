//! One side of the book: a price-time ordered collection of resting orders.

use std::collections::{BTreeMap, VecDeque};

use crate::order::{Order, Side};

/// Price-time ordered collection of resting orders for one side of the book.
///
/// Backed by a [`BTreeMap`] from price to a FIFO [`VecDeque`] of the orders
/// resting at that price. `side` decides which end of the map is "best":
/// the highest key for bids, the lowest for asks.
#[derive(Debug)]
pub struct SideBook {
    side: Side,
    levels: BTreeMap<u64, VecDeque<Order>>,
}

impl SideBook {
    pub fn new(side: Side) -> Self {
        Self {
            side,
            levels: BTreeMap::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// The best (highest bid / lowest ask) price currently resting, if any.
    pub fn front_price(&self) -> Option<u64> {
        match self.side {
            Side::Buy => self.levels.keys().next_back().copied(),
            Side::Sell => self.levels.keys().next().copied(),
        }
    }

    fn front_key(&self) -> Option<u64> {
        self.front_price()
    }

    /// A reference to the best order (earliest at the best price), if any.
    pub fn front(&self) -> Option<&Order> {
        let key = self.front_key()?;
        self.levels.get(&key).and_then(|q| q.front())
    }

    /// A mutable reference to the best order, for in-place quantity decrement.
    pub fn front_mut(&mut self) -> Option<&mut Order> {
        let key = self.front_key()?;
        self.levels.get_mut(&key).and_then(|q| q.front_mut())
    }

    /// Removes and returns the best order once it has been fully filled.
    ///
    /// Prunes the price level if it becomes empty.
    pub fn pop_front(&mut self) -> Option<Order> {
        let key = self.front_key()?;
        let level = self.levels.get_mut(&key)?;
        let order = level.pop_front();
        if level.is_empty() {
            self.levels.remove(&key);
        }
        order
    }

    /// Inserts a new resting order at its price, at the back of the FIFO queue.
    pub fn insert(&mut self, order: Order) {
        self.levels.entry(order.price).or_default().push_back(order);
    }

    /// Removes a specific order by id from a known price level.
    ///
    /// Returns `None` if the level or the id within it does not exist; this
    /// should not happen as long as the cancel index and the book are kept
    /// in lockstep by the caller.
    pub fn remove(&mut self, price: u64, id: u64) -> Option<Order> {
        let level = self.levels.get_mut(&price)?;
        let pos = level.iter().position(|o| o.id == id)?;
        let order = level.remove(pos);
        if level.is_empty() {
            self.levels.remove(&price);
        }
        order
    }

    /// Yields resting orders in strict (price, sequence) order, front to back.
    pub fn iter(&self) -> impl Iterator<Item = &Order> {
        let levels: Box<dyn Iterator<Item = &VecDeque<Order>>> = match self.side {
            Side::Buy => Box::new(self.levels.values().rev()),
            Side::Sell => Box::new(self.levels.values()),
        };
        levels.flat_map(|q| q.iter())
    }

    /// Number of distinct price levels currently resting.
    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    /// Sum of resting quantity across every order on this side.
    pub fn total_quantity(&self) -> u64 {
        self.levels.values().flat_map(|q| q.iter()).map(|o| o.qty).sum()
    }
}
