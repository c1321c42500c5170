//! daoboard - DAO Governance Dashboard
//!
//! Reads a Sputnik DAO's proposals and statistics from the AstroDAO indexer,
//! tallies votes for display, and submits votes through an explicit wallet
//! session.
//!
//! Key principles:
//! - Read-only snapshots, nothing persisted
//! - Empty or missing data degrades to empty lists and zero counts
//! - No ambient wallet state: sessions and signers are passed in
//! - Trait seams (`DaoApi`, `TransactionSigner`) with in-memory mocks

pub mod api;
pub mod proposals;
pub mod retry;
pub mod stats;
pub mod votes;
pub mod wallet;
