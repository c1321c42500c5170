//! Wallet session and vote submission.
//!
//! The wallet is an explicit `WalletSession` value handed to each call, and
//! signing is delegated to a `TransactionSigner`.

pub mod mock;
pub mod submit;
pub mod traits;

pub use mock::MockSigner;
pub use submit::{prepare_vote_call, submit_vote, VoteSubmitter, ACT_PROPOSAL_METHOD, DEFAULT_GAS};
pub use traits::{
    FunctionCall, Network, SignerError, TransactionOutcome, TransactionSigner, VoteError,
    VoteResult, WalletSession,
};
