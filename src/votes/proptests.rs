//! Property-based tests for vote tallies
//!
//! Tests for:
//! - Conservation: per-choice counts add up to the number of voters
//! - Empty maps never divide by zero
//! - `has_voted` returns exactly what was stored

use super::tally::{has_voted, VoteTally};
use crate::api::types::{AccountId, VoteChoice};
use proptest::prelude::*;
use std::collections::BTreeMap;

fn choice_strategy() -> impl Strategy<Value = VoteChoice> {
    prop_oneof![
        Just(VoteChoice::Approve),
        Just(VoteChoice::Reject),
        Just(VoteChoice::Remove),
        "[A-Z][a-z]{2,8}".prop_map(VoteChoice::from),
    ]
}

fn votes_strategy() -> impl Strategy<Value = BTreeMap<AccountId, VoteChoice>> {
    prop::collection::btree_map("[a-z]{1,12}\\.near".prop_map(AccountId), choice_strategy(), 0..64)
}

proptest! {
    /// Property test: Conservation
    /// Sum of all per-choice counts equals the size of the vote map
    #[test]
    fn prop_counts_sum_to_total(votes in votes_strategy()) {
        let tally = VoteTally::from_votes(&votes);

        let sum: usize = tally.counts().values().sum();
        prop_assert_eq!(sum, votes.len());
        prop_assert_eq!(tally.total(), votes.len());
    }

    /// Property test: Percentages are finite and bounded, and sum to 100 when any vote exists
    #[test]
    fn prop_percentages_bounded(votes in votes_strategy()) {
        let tally = VoteTally::from_votes(&votes);

        let mut sum = 0.0;
        for choice in tally.counts().keys() {
            let pct = tally.percentage(choice);
            prop_assert!(pct.is_finite());
            prop_assert!((0.0..=100.0).contains(&pct));
            sum += pct;
        }
        if !votes.is_empty() {
            prop_assert!((sum - 100.0).abs() < 1e-6);
        }
    }

    /// Property test: has_voted reflects the map exactly
    #[test]
    fn prop_has_voted_matches_map(votes in votes_strategy(), stranger in "[a-z]{1,12}\\.near") {
        for (voter, choice) in &votes {
            prop_assert_eq!(has_voted(&votes, voter), Some(choice.clone()));
        }

        let stranger = AccountId(stranger);
        prop_assert_eq!(has_voted(&votes, &stranger), votes.get(&stranger).cloned());
    }

    /// Property test: no division by zero for empty maps
    #[test]
    fn prop_empty_is_zero_percent(choice in choice_strategy()) {
        let tally = VoteTally::from_votes(&BTreeMap::new());
        prop_assert_eq!(tally.percentage(&choice), 0.0);
    }
}
