//! Proposal Board
//!
//! Page-level controller for one proposal list: holds the active filter and
//! page index, loads pages from the `ProposalStore`, and summarizes each
//! proposal's votes for display.
//!
//! A failed load never panics and never leaves stale rows behind: the board
//! shows an empty list with total 0 and keeps the error for the caller to
//! surface.

use super::pagination::Pagination;
use super::store::ProposalStore;
use crate::api::traits::{ApiError, ApiResult, DaoApi, ProposalFilter};
use crate::api::types::{AccountId, Page, Proposal, ProposalStatus, VoteChoice};
use crate::votes::{has_voted, voters, VoteTally};
use std::time::{Duration, SystemTime};
use tracing::warn;

/// What the board is currently showing
#[derive(Debug, Clone, PartialEq)]
pub enum BoardState {
    Loading,
    Ready(Page),
    Failed { error: ApiError },
}

/// Display-ready view of one proposal
#[derive(Debug, Clone, PartialEq)]
pub struct ProposalSummary {
    pub proposal_id: u64,
    pub dao_id: String,
    pub title: String,
    pub proposal_type: String,
    pub status: ProposalStatus,
    pub proposer: AccountId,
    pub transaction_url: String,
    /// Rich text, verbatim
    pub description: String,
    pub tally: VoteTally,
    /// Voter table rows, ordered by voter id
    pub voters: Vec<(AccountId, VoteChoice)>,
    /// The viewer's recorded vote, if signed in and voted
    pub viewer_vote: Option<VoteChoice>,
    /// Signed in, proposal still open, and no vote recorded yet
    pub can_vote: bool,
    pub time_remaining: Option<Duration>,
}

impl ProposalSummary {
    pub fn from_proposal(proposal: &Proposal, viewer: Option<&AccountId>, now: SystemTime) -> Self {
        let viewer_vote = viewer.and_then(|v| has_voted(&proposal.votes, v));
        let can_vote = viewer.is_some() && proposal.status.is_active() && viewer_vote.is_none();

        Self {
            proposal_id: proposal.proposal_id,
            dao_id: proposal.dao_id.clone(),
            title: proposal.title.clone(),
            proposal_type: proposal.proposal_type.clone(),
            status: proposal.status,
            proposer: proposal.proposer.clone(),
            transaction_url: proposal.transaction_url(),
            description: proposal.description.clone(),
            tally: VoteTally::from_votes(&proposal.votes),
            voters: voters(&proposal.votes)
                .into_iter()
                .map(|(voter, choice)| (voter.clone(), choice.clone()))
                .collect(),
            viewer_vote,
            can_vote,
            time_remaining: proposal
                .status
                .is_active()
                .then(|| proposal.time_remaining(now))
                .flatten(),
        }
    }
}

/// Controller for a filtered, paged proposal list
pub struct ProposalBoard<A: DaoApi> {
    store: ProposalStore<A>,
    filter: ProposalFilter,
    pagination: Pagination,
    state: BoardState,
}

impl<A: DaoApi> ProposalBoard<A> {
    /// Create a board on page 0. Nothing is fetched until `load`.
    pub fn new(store: ProposalStore<A>, filter: ProposalFilter, limit: u64) -> Self {
        Self {
            store,
            filter,
            pagination: Pagination::new(limit),
            state: BoardState::Loading,
        }
    }

    pub fn filter(&self) -> ProposalFilter {
        self.filter
    }

    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    pub fn state(&self) -> &BoardState {
        &self.state
    }

    pub fn store(&self) -> &ProposalStore<A> {
        &self.store
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, BoardState::Loading)
    }

    /// Proposals on the current page (empty unless loaded successfully)
    pub fn proposals(&self) -> &[Proposal] {
        match &self.state {
            BoardState::Ready(page) => &page.proposals,
            _ => &[],
        }
    }

    /// Total across all pages (0 unless loaded successfully)
    pub fn total(&self) -> u64 {
        match &self.state {
            BoardState::Ready(page) => page.total,
            _ => 0,
        }
    }

    pub fn can_go_previous(&self) -> bool {
        !self.is_loading() && self.pagination.has_previous()
    }

    pub fn can_go_next(&self) -> bool {
        !self.is_loading() && self.pagination.has_next()
    }

    /// Fetch the current page.
    ///
    /// If the total shrank so that the current page no longer exists, the
    /// board moves to the new last page and fetches once more.
    pub async fn load(&mut self) -> ApiResult<()> {
        self.state = BoardState::Loading;

        let mut result = self.fetch_current().await;
        if let Ok((total, empty)) = result.as_ref().map(|page| (page.total, page.is_empty())) {
            self.pagination.set_total(total);
            if empty && self.pagination.clamp() {
                result = self.fetch_current().await;
            }
        }

        match result {
            Ok(page) => {
                self.pagination.set_total(page.total);
                self.state = BoardState::Ready(page);
                Ok(())
            }
            Err(error) => {
                warn!(filter = %self.filter, page = self.pagination.page_index(), %error, "failed to load proposals");
                self.pagination.set_total(0);
                self.state = BoardState::Failed {
                    error: error.clone(),
                };
                Err(error)
            }
        }
    }

    /// Reload the current page (e.g. after a vote was submitted).
    pub async fn refresh(&mut self) -> ApiResult<()> {
        self.load().await
    }

    /// Switch filter and load its first page.
    pub async fn set_filter(&mut self, filter: ProposalFilter) -> ApiResult<()> {
        self.filter = filter;
        self.pagination.reset();
        self.load().await
    }

    /// Load the next page. Returns `Ok(false)` without fetching on the last page.
    pub async fn next_page(&mut self) -> ApiResult<bool> {
        if !self.can_go_next() {
            return Ok(false);
        }
        self.pagination.next();
        self.load().await.map(|_| true)
    }

    /// Load the previous page. Returns `Ok(false)` without fetching on page 0.
    pub async fn previous_page(&mut self) -> ApiResult<bool> {
        if !self.can_go_previous() {
            return Ok(false);
        }
        self.pagination.previous();
        self.load().await.map(|_| true)
    }

    /// Jump to a page. The total must be known (i.e. after a `load`) for
    /// anything but page 0.
    pub async fn go_to_page(&mut self, page_index: u64) -> ApiResult<bool> {
        if !self.pagination.go_to(page_index) {
            return Ok(false);
        }
        self.load().await.map(|_| true)
    }

    /// Summaries of the current page for `viewer` (None when signed out).
    pub fn summaries(&self, viewer: Option<&AccountId>, now: SystemTime) -> Vec<ProposalSummary> {
        self.proposals()
            .iter()
            .map(|p| ProposalSummary::from_proposal(p, viewer, now))
            .collect()
    }

    async fn fetch_current(&self) -> ApiResult<Page> {
        self.store
            .fetch_proposals(
                self.filter,
                self.pagination.offset(),
                self.pagination.limit(),
            )
            .await
    }
}
