use thiserror::Error;

/// Errors the matching kernel can return from `place`.
///
/// Cancelling an unknown id is not represented here: `cancel` reports that
/// non-fatal condition through its `bool` return value instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("order quantity and price must both be greater than zero")]
    InvalidOrder,
    #[error("order id {0} is already resting in the book")]
    DuplicateId(u64),
}
