
mod classify;
mod matches;

pub use classify::{ClassKind, Classify};
pub use matches::{Match, MatchError, Negated};
