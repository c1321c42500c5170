//! Vote aggregation for proposal display.

pub mod tally;

#[cfg(test)]
mod proptests;

pub use tally::{has_voted, voters, VoteTally};
