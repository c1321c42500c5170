//! DAO Overview
//!
//! Headline figures plus the history series (funds, bounties, NFTs, and the
//! proposals history of total and active counts). The snapshot is required;
//! the series are fetched concurrently and a failed series is shown as empty.

use crate::api::traits::{ApiResult, DaoApi, StatKind, PROPOSAL_STATS_PATH};
use crate::api::types::{DaoStatus, ProposalStat, Stat, Status};
use tracing::warn;

/// Everything the info tab shows
#[derive(Debug, Clone, PartialEq)]
pub struct DaoOverview {
    pub state: DaoStatus,
    pub funds: Vec<Stat>,
    pub bounties: Vec<Stat>,
    pub nfts: Vec<Stat>,
    pub proposals: Vec<ProposalStat>,
}

/// A chartable series behind a headline block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Series {
    Funds,
    Bounties,
    Nfts,
    ActiveProposals,
    TotalProposals,
}

/// A labelled headline figure
#[derive(Debug, Clone, PartialEq)]
pub struct StatBlock {
    pub title: &'static str,
    pub status: Status,
    /// Series charted when this block is selected
    pub series: Series,
}

impl DaoOverview {
    pub async fn fetch<A: DaoApi + ?Sized>(api: &A) -> ApiResult<Self> {
        let (state, funds, bounties, nfts, proposals) = tokio::join!(
            api.dao_state(),
            fetch_series(api, StatKind::Funds),
            fetch_series(api, StatKind::Bounties),
            fetch_series(api, StatKind::Nfts),
            fetch_proposal_series(api),
        );

        Ok(Self {
            state: state?,
            funds,
            bounties,
            nfts,
            proposals,
        })
    }

    /// Chart points for `series`, oldest first
    pub fn series(&self, series: Series) -> Vec<Stat> {
        match series {
            Series::Funds => self.funds.clone(),
            Series::Bounties => self.bounties.clone(),
            Series::Nfts => self.nfts.clone(),
            Series::ActiveProposals => {
                self.proposals.iter().map(ProposalStat::active_point).collect()
            }
            Series::TotalProposals => {
                self.proposals.iter().map(ProposalStat::total_point).collect()
            }
        }
    }

    /// Most recent point of a series
    pub fn latest(&self, series: Series) -> Option<Stat> {
        match series {
            Series::Funds => self.funds.last().cloned(),
            Series::Bounties => self.bounties.last().cloned(),
            Series::Nfts => self.nfts.last().cloned(),
            Series::ActiveProposals => self.proposals.last().map(ProposalStat::active_point),
            Series::TotalProposals => self.proposals.last().map(ProposalStat::total_point),
        }
    }

    pub fn blocks(&self) -> Vec<StatBlock> {
        vec![
            StatBlock {
                title: "DAO funds",
                status: self.state.total_dao_funds.clone(),
                series: Series::Funds,
            },
            StatBlock {
                title: "Bounties",
                status: self.state.bounty_count.clone(),
                series: Series::Bounties,
            },
            StatBlock {
                title: "NFTs",
                status: self.state.nft_count.clone(),
                series: Series::Nfts,
            },
            StatBlock {
                title: "Active proposals",
                status: self.state.active_proposal_count.clone(),
                series: Series::ActiveProposals,
            },
            StatBlock {
                title: "Total proposals",
                status: self.state.total_proposal_count.clone(),
                series: Series::TotalProposals,
            },
        ]
    }
}

/// Fetch a series sorted by timestamp; failures degrade to empty.
pub async fn fetch_series<A: DaoApi + ?Sized>(api: &A, kind: StatKind) -> Vec<Stat> {
    match api.stats(kind).await {
        Ok(mut stats) => {
            sort_series(&mut stats);
            stats
        }
        Err(e) => {
            warn!(series = kind.path(), error = %e, "stat series unavailable");
            Vec::new()
        }
    }
}

/// Fetch the proposals history sorted by timestamp; failures degrade to empty.
pub async fn fetch_proposal_series<A: DaoApi + ?Sized>(api: &A) -> Vec<ProposalStat> {
    match api.proposal_stats().await {
        Ok(mut stats) => {
            stats.sort_by_key(|s| s.timestamp);
            stats
        }
        Err(e) => {
            warn!(series = PROPOSAL_STATS_PATH, error = %e, "stat series unavailable");
            Vec::new()
        }
    }
}

/// Order a series for charting (oldest first).
pub fn sort_series(stats: &mut [Stat]) {
    stats.sort_by_key(|s| s.timestamp);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockDaoApi;
    use crate::api::traits::ApiError;
    use std::time::{Duration, UNIX_EPOCH};

    fn stat(ms: u64, value: f64) -> Stat {
        Stat {
            timestamp: UNIX_EPOCH + Duration::from_millis(ms),
            value,
        }
    }

    fn status(value: f64, growth: f64) -> Status {
        Status { value, growth }
    }

    fn dao_state() -> DaoStatus {
        DaoStatus {
            dao_id: "brave-new-games.sputnik-dao.near".into(),
            timestamp: 1_672_531_200_000,
            amount: status(1000.0, 0.0),
            total_dao_funds: status(2500.0, 12.5),
            total_proposal_count: status(40.0, -5.0),
            active_proposal_count: status(3.0, 0.0),
            bounty_count: status(1.0, 0.0),
            nft_count: status(7.0, 100.0),
        }
    }

    #[tokio::test]
    async fn test_overview_sorts_series() {
        let api = MockDaoApi::new("brave-new-games.sputnik-dao.near");
        api.set_dao_state(dao_state());
        api.set_stats(StatKind::Funds, vec![stat(3, 30.0), stat(1, 10.0), stat(2, 20.0)]);

        let overview = DaoOverview::fetch(&api).await.unwrap();

        let values: Vec<f64> = overview.funds.iter().map(|s| s.value).collect();
        assert_eq!(values, vec![10.0, 20.0, 30.0]);
        assert_eq!(overview.latest(Series::Funds).unwrap().value, 30.0);
        assert!(overview.nfts.is_empty());
        assert_eq!(api.request_count(), 5);
    }

    #[tokio::test]
    async fn test_failed_series_is_empty() {
        let api = MockDaoApi::new("brave-new-games.sputnik-dao.near");
        api.set_dao_state(dao_state());
        api.set_stats(StatKind::Bounties, vec![stat(1, 1.0)]);
        api.fail_stats(StatKind::Bounties);

        let overview = DaoOverview::fetch(&api).await.unwrap();
        assert!(overview.bounties.is_empty());
        assert!(overview.latest(Series::Bounties).is_none());
    }

    #[tokio::test]
    async fn test_state_failure_propagates() {
        let api = MockDaoApi::new("brave-new-games.sputnik-dao.near");
        api.fail_with(ApiError::Network("down".into()));

        assert!(DaoOverview::fetch(&api).await.unwrap_err().is_network());
    }

    #[tokio::test]
    async fn test_blocks() {
        let api = MockDaoApi::new("brave-new-games.sputnik-dao.near");
        api.set_dao_state(dao_state());
        let overview = DaoOverview::fetch(&api).await.unwrap();

        let blocks = overview.blocks();
        let titles: Vec<&str> = blocks.iter().map(|b| b.title).collect();
        assert_eq!(
            titles,
            vec!["DAO funds", "Bounties", "NFTs", "Active proposals", "Total proposals"]
        );
        assert_eq!(blocks[0].status.value, 2500.0);
        assert_eq!(blocks[3].series, Series::ActiveProposals);
        assert_eq!(blocks[4].series, Series::TotalProposals);
    }

    fn proposal_stat(ms: u64, total: u64, active: u64) -> ProposalStat {
        ProposalStat {
            timestamp: UNIX_EPOCH + Duration::from_millis(ms),
            total,
            active,
        }
    }

    #[tokio::test]
    async fn test_proposal_history_feeds_both_blocks() {
        let api = MockDaoApi::new("brave-new-games.sputnik-dao.near");
        api.set_dao_state(dao_state());
        api.set_proposal_stats(vec![proposal_stat(2, 40, 3), proposal_stat(1, 38, 5)]);

        let overview = DaoOverview::fetch(&api).await.unwrap();

        let totals: Vec<f64> = overview
            .series(Series::TotalProposals)
            .iter()
            .map(|s| s.value)
            .collect();
        let active: Vec<f64> = overview
            .series(Series::ActiveProposals)
            .iter()
            .map(|s| s.value)
            .collect();
        assert_eq!(totals, vec![38.0, 40.0]);
        assert_eq!(active, vec![5.0, 3.0]);
        assert_eq!(overview.latest(Series::TotalProposals).unwrap().value, 40.0);
        assert_eq!(overview.latest(Series::ActiveProposals).unwrap().value, 3.0);
    }

    #[tokio::test]
    async fn test_failed_proposal_history_is_empty() {
        let api = MockDaoApi::new("brave-new-games.sputnik-dao.near");
        api.set_dao_state(dao_state());
        api.set_proposal_stats(vec![proposal_stat(1, 38, 5)]);
        api.fail_proposal_stats();

        let overview = DaoOverview::fetch(&api).await.unwrap();
        assert!(overview.proposals.is_empty());
        assert!(overview.latest(Series::TotalProposals).is_none());
        assert!(overview.series(Series::ActiveProposals).is_empty());
    }
}
