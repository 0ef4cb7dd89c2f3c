//! The crossing algorithm: walks the opposite side's book in price-time
//! order against a not-yet-resting incoming order, emitting trades.

use tracing::{info, warn};

use crate::book::SideBook;
use crate::order::{Order, Side};
use crate::trade::Trade;

fn crosses(incoming: &Order, resting_price: u64) -> bool {
    match incoming.side {
        Side::Buy => incoming.price >= resting_price,
        Side::Sell => incoming.price <= resting_price,
    }
}

/// Crosses `incoming` against `opposite` until either side runs dry or the
/// book no longer crosses, invoking `on_trade` once per fill.
///
/// `incoming` is mutated in place (its `qty` decremented); it is never
/// inserted into any book by this function. The caller inserts whatever
/// quantity remains once this returns. Orders on `opposite` that are fully
/// consumed are popped from `opposite` here; `on_trade` is given a
/// `resting_exhausted` flag so the caller can remove the resting order's id
/// from the cancel index exactly when it stops resting, and not otherwise —
/// a partially filled resting order keeps its place in both the book and
/// the index.
pub fn cross<F>(incoming: &mut Order, opposite: &mut SideBook, mut on_trade: F)
where
    F: FnMut(&Trade, bool),
{
    info!(id = incoming.id, qty = incoming.qty, price = incoming.price, "matching incoming order");

    while incoming.qty > 0 {
        let Some(best_price) = opposite.front_price() else {
            break;
        };
        if !crosses(incoming, best_price) {
            break;
        }

        let resting = opposite.front_mut().expect("front_price implies front exists");
        let fill_qty = incoming.qty.min(resting.qty);

        incoming.qty -= fill_qty;
        resting.qty -= fill_qty;

        let trade = Trade {
            initiator_id: incoming.id,
            resting_id: resting.id,
            qty: fill_qty,
            price: resting.price,
        };
        let resting_exhausted = resting.is_filled();
        warn!(?trade, "emitting trade");
        on_trade(&trade, resting_exhausted);

        if resting_exhausted {
            opposite.pop_front();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(id: u64, side: Side, price: u64, qty: u64, sequence: u64) -> Order {
        Order {
            id,
            side,
            price,
            qty,
            sequence,
        }
    }

    #[test]
    fn stops_when_opposite_book_is_empty() {
        let mut opposite = SideBook::new(Side::Sell);
        let mut incoming = order(1, Side::Buy, 100, 10, 1);
        let mut trades = Vec::new();
        cross(&mut incoming, &mut opposite, |t, _exhausted| trades.push(*t));

        assert!(trades.is_empty());
        assert_eq!(incoming.qty, 10);
    }

    #[test]
    fn stops_when_top_does_not_cross() {
        let mut opposite = SideBook::new(Side::Sell);
        opposite.insert(order(2, Side::Sell, 200, 5, 1));
        let mut incoming = order(1, Side::Buy, 100, 10, 2);
        let mut trades = Vec::new();
        cross(&mut incoming, &mut opposite, |t, _exhausted| trades.push(*t));

        assert!(trades.is_empty());
        assert_eq!(incoming.qty, 10);
        assert_eq!(opposite.front_price(), Some(200));
    }

    #[test]
    fn partial_fill_leaves_resting_remainder() {
        let mut opposite = SideBook::new(Side::Sell);
        opposite.insert(order(2, Side::Sell, 100, 5, 1));
        let mut incoming = order(1, Side::Buy, 100, 10, 2);
        let mut trades = Vec::new();
        cross(&mut incoming, &mut opposite, |t, _exhausted| trades.push(*t));

        assert_eq!(trades.len(), 1);
        assert_eq!(trades[0].qty, 5);
        assert_eq!(trades[0].price, 100);
        assert_eq!(incoming.qty, 5);
        assert!(opposite.is_empty());
    }

    #[test]
    fn sweeps_multiple_levels_in_price_time_order() {
        let mut opposite = SideBook::new(Side::Sell);
        opposite.insert(order(1, Side::Sell, 100, 4, 1));
        opposite.insert(order(2, Side::Sell, 100, 6, 2));
        opposite.insert(order(3, Side::Sell, 110, 100, 3));

        let mut incoming = order(4, Side::Buy, 120, 9, 4);
        let mut trades = Vec::new();
        cross(&mut incoming, &mut opposite, |t, _exhausted| trades.push(*t));

        assert_eq!(trades.len(), 2);
        assert_eq!((trades[0].resting_id, trades[0].qty), (1, 4));
        assert_eq!((trades[1].resting_id, trades[1].qty), (2, 5));
        assert_eq!(incoming.qty, 0);
        assert_eq!(opposite.front().unwrap().qty, 1);
    }
}
