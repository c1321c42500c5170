//! Vote Tally
//!
//! Aggregates a proposal's vote map (voter → choice) into per-choice counts
//! and percentages for display.
//!
//! Percentages are `count / total * 100`. An empty vote map yields 0% for
//! every choice rather than NaN.

use crate::api::types::{AccountId, VoteChoice};
use std::collections::BTreeMap;

/// Per-choice counts for one proposal
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VoteTally {
    counts: BTreeMap<VoteChoice, usize>,
    total: usize,
}

impl VoteTally {
    /// Count every entry of `votes` under its choice.
    pub fn from_votes(votes: &BTreeMap<AccountId, VoteChoice>) -> Self {
        let mut counts = BTreeMap::new();
        for choice in votes.values() {
            *counts.entry(choice.clone()).or_insert(0) += 1;
        }

        Self {
            counts,
            total: votes.len(),
        }
    }

    /// Number of votes cast (size of the vote map)
    pub fn total(&self) -> usize {
        self.total
    }

    pub fn count(&self, choice: &VoteChoice) -> usize {
        self.counts.get(choice).copied().unwrap_or(0)
    }

    /// Distinct choices with their counts, in choice order
    pub fn counts(&self) -> &BTreeMap<VoteChoice, usize> {
        &self.counts
    }

    /// Share of the vote for `choice`, 0.0..=100.0
    pub fn percentage(&self, choice: &VoteChoice) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.count(choice) as f64 / self.total as f64 * 100.0
    }

    pub fn approve_percentage(&self) -> f64 {
        self.percentage(&VoteChoice::Approve)
    }

    pub fn reject_percentage(&self) -> f64 {
        self.percentage(&VoteChoice::Reject)
    }
}

/// The choice `voter` recorded, or `None` if they have not voted.
pub fn has_voted(
    votes: &BTreeMap<AccountId, VoteChoice>,
    voter: &AccountId,
) -> Option<VoteChoice> {
    votes.get(voter).cloned()
}

/// Voter table rows, ordered by voter id.
pub fn voters(votes: &BTreeMap<AccountId, VoteChoice>) -> Vec<(&AccountId, &VoteChoice)> {
    votes.iter().collect()
}
