//! Proposal listing: paged fetches, page arithmetic, and the board controller
//! that ties them to vote summaries.

pub mod board;
pub mod pagination;
pub mod store;

pub use board::{BoardState, ProposalBoard, ProposalSummary};
pub use pagination::{Pagination, PAGE_LIMIT};
pub use store::ProposalStore;
