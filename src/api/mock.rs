//! Mock DAO API for Testing
//!
//! Serves proposals and stats from memory and records every request, so tests
//! can assert both on results and on how many network calls were made.

use super::traits::*;
use super::types::{
    AccountId, DaoStatus, Proposal, ProposalStat, ProposalStatus, ProposalsResponse, Stat,
    VoteChoice,
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// In-memory indexer
#[derive(Clone)]
pub struct MockDaoApi {
    state: Arc<Mutex<MockState>>,
    dao_id: String,
}

#[derive(Default)]
struct MockState {
    proposals: HashMap<ProposalFilter, Vec<Proposal>>,
    voted: HashMap<AccountId, Vec<Proposal>>,
    dao_state: Option<DaoStatus>,
    stats: HashMap<StatKind, Vec<Stat>>,
    failing_stats: Vec<StatKind>,
    proposal_stats: Vec<ProposalStat>,
    failing_proposal_stats: bool,
    /// Error returned by every request until cleared
    fail_with: Option<ApiError>,
    /// Overrides the reported total (indexer totals can lag the data)
    total_override: Option<u64>,
    /// Items returned past the requested limit (misbehaving indexer)
    overflow: usize,
    requests: Vec<ProposalQuery>,
    request_count: usize,
}

impl MockDaoApi {
    /// Create new mock for `dao_id`
    pub fn new(dao_id: impl Into<String>) -> Self {
        Self {
            state: Arc::new(Mutex::new(MockState::default())),
            dao_id: dao_id.into(),
        }
    }

    /// Replace the proposals listed under `filter`
    pub fn set_proposals(&self, filter: ProposalFilter, proposals: Vec<Proposal>) {
        self.state.lock().unwrap().proposals.insert(filter, proposals);
    }

    /// Replace the proposals `account` has voted on
    pub fn set_voted(&self, account: AccountId, proposals: Vec<Proposal>) {
        self.state.lock().unwrap().voted.insert(account, proposals);
    }

    pub fn set_dao_state(&self, status: DaoStatus) {
        self.state.lock().unwrap().dao_state = Some(status);
    }

    pub fn set_stats(&self, kind: StatKind, stats: Vec<Stat>) {
        self.state.lock().unwrap().stats.insert(kind, stats);
    }

    /// Make only the `kind` series fail
    pub fn fail_stats(&self, kind: StatKind) {
        self.state.lock().unwrap().failing_stats.push(kind);
    }

    pub fn set_proposal_stats(&self, stats: Vec<ProposalStat>) {
        self.state.lock().unwrap().proposal_stats = stats;
    }

    /// Make only the proposals history fail
    pub fn fail_proposal_stats(&self) {
        self.state.lock().unwrap().failing_proposal_stats = true;
    }

    /// Fail every subsequent request with `err`
    pub fn fail_with(&self, err: ApiError) {
        self.state.lock().unwrap().fail_with = Some(err);
    }

    pub fn recover(&self) {
        self.state.lock().unwrap().fail_with = None;
    }

    /// Report `total` regardless of the stored proposals
    pub fn set_total_override(&self, total: u64) {
        self.state.lock().unwrap().total_override = Some(total);
    }

    /// Return `extra` proposals beyond the requested limit when available
    pub fn set_overflow(&self, extra: usize) {
        self.state.lock().unwrap().overflow = extra;
    }

    /// Proposals requests seen so far
    pub fn requests(&self) -> Vec<ProposalQuery> {
        self.state.lock().unwrap().requests.clone()
    }

    /// Total requests of any kind
    pub fn request_count(&self) -> usize {
        self.state.lock().unwrap().request_count
    }
}

#[async_trait]
impl DaoApi for MockDaoApi {
    fn dao_id(&self) -> &str {
        &self.dao_id
    }

    async fn proposals(&self, query: &ProposalQuery) -> ApiResult<ProposalsResponse> {
        let mut state = self.state.lock().unwrap();
        state.request_count += 1;
        state.requests.push(query.clone());

        if let Some(err) = &state.fail_with {
            return Err(err.clone());
        }

        let all = match &query.selector {
            ProposalSelector::Filter(filter) => state.proposals.get(filter),
            ProposalSelector::VotedBy(account) => state.voted.get(account),
        };
        let all = all.map(Vec::as_slice).unwrap_or_default();

        let start = (query.offset as usize).min(all.len());
        let end = start
            .saturating_add(query.limit as usize)
            .saturating_add(state.overflow)
            .min(all.len());

        Ok(ProposalsResponse {
            data: all[start..end].to_vec(),
            total: state.total_override.unwrap_or(all.len() as u64),
        })
    }

    async fn dao_state(&self) -> ApiResult<DaoStatus> {
        let mut state = self.state.lock().unwrap();
        state.request_count += 1;

        if let Some(err) = &state.fail_with {
            return Err(err.clone());
        }

        state.dao_state.clone().ok_or_else(|| ApiError::Status {
            status: 404,
            url: format!("/stats/dao/{}/state", self.dao_id),
        })
    }

    async fn stats(&self, kind: StatKind) -> ApiResult<Vec<Stat>> {
        let mut state = self.state.lock().unwrap();
        state.request_count += 1;

        if let Some(err) = &state.fail_with {
            return Err(err.clone());
        }
        if state.failing_stats.contains(&kind) {
            return Err(ApiError::Network(format!("{} series unavailable", kind.path())));
        }

        Ok(state.stats.get(&kind).cloned().unwrap_or_default())
    }

    async fn proposal_stats(&self) -> ApiResult<Vec<ProposalStat>> {
        let mut state = self.state.lock().unwrap();
        state.request_count += 1;

        if let Some(err) = &state.fail_with {
            return Err(err.clone());
        }
        if state.failing_proposal_stats {
            return Err(ApiError::Network(format!(
                "{} series unavailable",
                PROPOSAL_STATS_PATH
            )));
        }

        Ok(state.proposal_stats.clone())
    }
}

/// Build a proposal with the given votes, for tests and demos
pub fn sample_proposal(
    proposal_id: u64,
    status: ProposalStatus,
    votes: &[(&str, VoteChoice)],
) -> Proposal {
    let dao_id = "brave-new-games.sputnik-dao.near";
    Proposal {
        id: format!("{}-{}", dao_id, proposal_id),
        proposal_id,
        dao_id: dao_id.to_string(),
        proposal_type: "Vote".to_string(),
        title: format!("Proposal {}", proposal_id),
        description: String::new(),
        proposer: AccountId::from("proposer.near"),
        transaction_hash: format!("tx{}", proposal_id),
        status,
        vote_period_end: 0,
        votes: votes
            .iter()
            .map(|(voter, choice)| (AccountId::from(*voter), choice.clone()))
            .collect(),
    }
}
