/// A single fill produced by the matching kernel.
///
/// - `price` comes from the *resting* order: the resting side advertised that
///   price and was in queue first, so price improvement accrues to the
///   aggressor.
/// - `qty` is the amount filled between the two orders at this step.
/// - `initiator_id` is the newly submitted order that triggered the match.
/// - `resting_id` is the order that was already sitting in the book.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trade {
    pub initiator_id: u64,
    pub resting_id: u64,
    pub qty: u64,
    pub price: u64,
}
