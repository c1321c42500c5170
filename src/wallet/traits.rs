//! Wallet Trait Abstractions
//!
//! Vote submission never reaches for ambient wallet state: callers pass an
//! explicit `WalletSession` and a `TransactionSigner`. Signing itself lives
//! outside this crate; `MockSigner` stands in for it in tests.

use crate::api::types::AccountId;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// NEAR network the session is connected to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    #[default]
    Mainnet,
    Testnet,
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mainnet => f.write_str("mainnet"),
            Self::Testnet => f.write_str("testnet"),
        }
    }
}

/// A wallet connection, signed in or not
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WalletSession {
    network: Network,
    account_id: Option<AccountId>,
}

impl WalletSession {
    pub fn signed_in(network: Network, account_id: AccountId) -> Self {
        Self {
            network,
            account_id: Some(account_id),
        }
    }

    pub fn signed_out(network: Network) -> Self {
        Self {
            network,
            account_id: None,
        }
    }

    pub fn network(&self) -> Network {
        self.network
    }

    pub fn account_id(&self) -> Option<&AccountId> {
        self.account_id.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.account_id.is_some()
    }

    /// True only if signed in as exactly `account`.
    pub fn is_signed_in_as(&self, account: &AccountId) -> bool {
        self.account_id.as_ref() == Some(account)
    }
}

/// A contract function call awaiting signature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionCall {
    pub signer_id: AccountId,
    pub receiver_id: String,
    pub method_name: String,
    pub args: serde_json::Value,
    /// Gas budget in gas units
    pub gas: u64,
    /// Attached deposit in yoctoNEAR
    pub deposit: u128,
}

/// Result of a signed and broadcast transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionOutcome {
    pub transaction_hash: String,
    pub signer_id: AccountId,
    pub receiver_id: String,
}

/// Failures reported by the signer
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SignerError {
    #[error("Signing rejected by user: {0}")]
    Rejected(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Contract rejected transaction: {0}")]
    Contract(String),
}

/// Vote submission errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VoteError {
    #[error("Wallet not connected or signed in as a different account")]
    NotAuthenticated,

    #[error("A vote on proposal {proposal_id} is already pending")]
    AlreadyPending { proposal_id: u64 },

    #[error("Choice '{0}' cannot be cast")]
    UnsupportedChoice(String),

    #[error("Transaction failed: {0}")]
    TransactionFailed(#[source] SignerError),
}

/// Result type for vote submission
pub type VoteResult<T> = Result<T, VoteError>;

/// Signs and broadcasts a function call on behalf of a session
#[async_trait]
pub trait TransactionSigner: Send + Sync {
    async fn sign_and_send(
        &self,
        session: &WalletSession,
        call: &FunctionCall,
    ) -> Result<TransactionOutcome, SignerError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_session_states() {
        let alice = AccountId::from("alice.near");
        let session = WalletSession::signed_in(Network::Mainnet, alice.clone());

        assert!(session.is_authenticated());
        assert!(session.is_signed_in_as(&alice));
        assert!(!session.is_signed_in_as(&AccountId::from("bob.near")));

        let anon = WalletSession::signed_out(Network::Testnet);
        assert!(!anon.is_authenticated());
        assert_eq!(anon.account_id(), None);
        assert_eq!(anon.network().to_string(), "testnet");
    }

    #[test]
    fn test_transaction_failed_keeps_source() {
        let err = VoteError::TransactionFailed(SignerError::Rejected("closed popup".into()));
        let source = err.source().unwrap();
        assert_eq!(source.to_string(), "Signing rejected by user: closed popup");
    }
}
