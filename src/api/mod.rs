//! DAO Indexer Access
//!
//! Typed snapshots of the AstroDAO indexer's proposals and stats, the
//! `DaoApi` trait that reads them, and its HTTP and in-memory implementations.

pub mod client;
pub mod mock;
pub mod traits;
pub mod types;

pub use client::AstroDaoClient;
pub use mock::MockDaoApi;
pub use traits::{
    ApiError, ApiResult, DaoApi, ProposalFilter, ProposalQuery, ProposalSelector, StatKind,
};
pub use types::{
    AccountId, DaoStatus, Page, Proposal, ProposalStat, ProposalStatus, Stat, Status, VoteChoice,
};
