//! DAO API Trait Abstractions
//!
//! `DaoApi` is the seam between the dashboard logic and the remote indexer.
//! `AstroDaoClient` talks HTTP; `MockDaoApi` serves canned data in tests.

use super::types::{AccountId, DaoStatus, ProposalStat, ProposalsResponse, Stat};
use async_trait::async_trait;
use std::fmt;
use std::time::Duration;

/// Result type for indexer reads
pub type ApiResult<T> = Result<T, ApiError>;

/// Indexer read errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    #[error("Invalid response: {0}")]
    Decode(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ApiError {
    /// Remote call failed or timed out (the transient kind).
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            Self::Network(_) | Self::Timeout(_) | Self::Status { .. }
        )
    }
}

/// Proposal list filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ProposalFilter {
    #[default]
    Active,
    Approved,
    Failed,
    /// Past proposals; the indexer serves the approved ones
    Past,
}

impl ProposalFilter {
    /// Query parameter selecting this filter on the indexer.
    pub fn query_param(&self) -> (&'static str, &'static str) {
        match self {
            Self::Active => ("active", "true"),
            Self::Approved => ("status", "Approved"),
            Self::Failed => ("failed", "true"),
            Self::Past => ("status", "Approved"),
        }
    }
}

impl fmt::Display for ProposalFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Active => "active",
            Self::Approved => "approved",
            Self::Failed => "failed",
            Self::Past => "past",
        };
        f.write_str(label)
    }
}

impl std::str::FromStr for ProposalFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "approved" => Ok(Self::Approved),
            "failed" => Ok(Self::Failed),
            "past" => Ok(Self::Past),
            other => Err(format!(
                "unknown filter '{}' (expected active, approved, failed or past)",
                other
            )),
        }
    }
}

/// What a proposals request asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProposalSelector {
    Filter(ProposalFilter),
    /// Proposals the account has voted on
    VotedBy(AccountId),
}

/// One proposals request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProposalQuery {
    pub selector: ProposalSelector,
    pub offset: u64,
    pub limit: u64,
}

impl ProposalQuery {
    pub fn filtered(filter: ProposalFilter, offset: u64, limit: u64) -> Self {
        Self {
            selector: ProposalSelector::Filter(filter),
            offset,
            limit,
        }
    }

    pub fn voted_by(account: AccountId, offset: u64, limit: u64) -> Self {
        Self {
            selector: ProposalSelector::VotedBy(account),
            offset,
            limit,
        }
    }

    /// Query string pairs, excluding the DAO id.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::with_capacity(6);
        match &self.selector {
            ProposalSelector::Filter(filter) => {
                let (key, value) = filter.query_param();
                params.push((key, value.to_string()));
            }
            ProposalSelector::VotedBy(account) => {
                params.push(("accountId", account.to_string()));
                params.push(("voted", "true".to_string()));
            }
        }
        params.push(("limit", self.limit.to_string()));
        params.push(("offset", self.offset.to_string()));
        params.push(("orderBy", "createdAt".to_string()));
        params.push(("order", "DESC".to_string()));
        params
    }
}

/// Single-value history series exposed by the stats endpoints.
///
/// The proposals history has its own shape, see [`DaoApi::proposal_stats`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatKind {
    Funds,
    Bounties,
    Nfts,
}

/// Path segment of the proposals history under `/stats/dao/<dao>/`
pub const PROPOSAL_STATS_PATH: &str = "proposals";

impl StatKind {
    pub const ALL: [StatKind; 3] = [Self::Funds, Self::Bounties, Self::Nfts];

    /// Path segment under `/stats/dao/<dao>/`
    pub fn path(&self) -> &'static str {
        match self {
            Self::Funds => "funds",
            Self::Bounties => "bounties",
            Self::Nfts => "nfts",
        }
    }
}

/// Read access to one DAO on the indexer
#[async_trait]
pub trait DaoApi: Send + Sync {
    /// DAO this client reads from
    fn dao_id(&self) -> &str;

    /// Fetch one page of proposals
    async fn proposals(&self, query: &ProposalQuery) -> ApiResult<ProposalsResponse>;

    /// Fetch the DAO's headline snapshot
    async fn dao_state(&self) -> ApiResult<DaoStatus>;

    /// Fetch a history series (unsorted, as returned)
    async fn stats(&self, kind: StatKind) -> ApiResult<Vec<Stat>>;

    /// Fetch the proposals history (unsorted, as returned)
    async fn proposal_stats(&self) -> ApiResult<Vec<ProposalStat>>;
}
