//! Vote submission via `act_proposal`.
//!
//! The session is checked before anything else: without a signed-in account
//! matching `account_id`, no call is built and the signer is never invoked.
//! Refreshing the affected proposal afterwards is left to the caller.

use super::traits::*;
use crate::api::types::{AccountId, VoteChoice};
use std::collections::HashSet;
use std::sync::Mutex;
use tracing::{info, warn};

/// Sputnik DAO method that records votes
pub const ACT_PROPOSAL_METHOD: &str = "act_proposal";

/// 40 Tgas
pub const DEFAULT_GAS: u64 = 40_000_000_000_000;

/// Build the `act_proposal` call for a vote without sending it.
pub fn prepare_vote_call(
    session: &WalletSession,
    contract_id: &str,
    proposal_id: u64,
    choice: &VoteChoice,
    account_id: &AccountId,
) -> VoteResult<FunctionCall> {
    if !session.is_signed_in_as(account_id) {
        return Err(VoteError::NotAuthenticated);
    }

    let action = choice
        .action()
        .ok_or_else(|| VoteError::UnsupportedChoice(choice.to_string()))?;

    Ok(FunctionCall {
        signer_id: account_id.clone(),
        receiver_id: contract_id.to_string(),
        method_name: ACT_PROPOSAL_METHOD.to_string(),
        args: serde_json::json!({ "id": proposal_id, "action": action }),
        gas: DEFAULT_GAS,
        deposit: 0,
    })
}

/// Submit a vote on `proposal_id` through `signer`.
///
/// Fails with `NotAuthenticated` (no signer call) when the session is not
/// signed in as `account_id`, and with `TransactionFailed` when signing or
/// execution fails.
pub async fn submit_vote<S: TransactionSigner + ?Sized>(
    session: &WalletSession,
    signer: &S,
    contract_id: &str,
    proposal_id: u64,
    choice: &VoteChoice,
    account_id: &AccountId,
) -> VoteResult<TransactionOutcome> {
    let call = prepare_vote_call(session, contract_id, proposal_id, choice, account_id)?;

    match signer.sign_and_send(session, &call).await {
        Ok(outcome) => {
            info!(
                contract = contract_id,
                proposal_id,
                %choice,
                tx = %outcome.transaction_hash,
                "vote submitted"
            );
            Ok(outcome)
        }
        Err(e) => {
            warn!(contract = contract_id, proposal_id, %choice, error = %e, "vote failed");
            Err(VoteError::TransactionFailed(e))
        }
    }
}

/// Submits votes while refusing duplicates for a proposal whose previous vote
/// is still pending.
pub struct VoteSubmitter<S: TransactionSigner> {
    signer: S,
    pending: Mutex<HashSet<(String, u64)>>,
}

/// Frees the pending slot when dropped, however the submission ended.
struct PendingGuard<'a> {
    pending: &'a Mutex<HashSet<(String, u64)>>,
    key: (String, u64),
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        self.pending
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .remove(&self.key);
    }
}

impl<S: TransactionSigner> VoteSubmitter<S> {
    pub fn new(signer: S) -> Self {
        Self {
            signer,
            pending: Mutex::new(HashSet::new()),
        }
    }

    pub fn signer(&self) -> &S {
        &self.signer
    }

    /// Whether the vote trigger for this proposal should be disabled.
    pub fn is_pending(&self, contract_id: &str, proposal_id: u64) -> bool {
        self.pending
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .contains(&(contract_id.to_string(), proposal_id))
    }

    /// Same contract as [`submit_vote`], plus `AlreadyPending` while an
    /// earlier vote on the same proposal has not resolved.
    pub async fn submit(
        &self,
        session: &WalletSession,
        contract_id: &str,
        proposal_id: u64,
        choice: &VoteChoice,
        account_id: &AccountId,
    ) -> VoteResult<TransactionOutcome> {
        let _guard = self.reserve(contract_id, proposal_id)?;
        submit_vote(
            session,
            &self.signer,
            contract_id,
            proposal_id,
            choice,
            account_id,
        )
        .await
    }

    fn reserve(&self, contract_id: &str, proposal_id: u64) -> VoteResult<PendingGuard<'_>> {
        let key = (contract_id.to_string(), proposal_id);
        let mut pending = self
            .pending
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if !pending.insert(key.clone()) {
            return Err(VoteError::AlreadyPending { proposal_id });
        }

        Ok(PendingGuard {
            pending: &self.pending,
            key,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wallet::mock::MockSigner;
    use std::sync::Arc;

    const CONTRACT: &str = "brave-new-games.sputnik-dao.near";

    fn alice() -> AccountId {
        AccountId::from("alice.near")
    }

    fn session() -> WalletSession {
        WalletSession::signed_in(Network::Mainnet, alice())
    }

    #[tokio::test]
    async fn test_not_authenticated_makes_no_call() {
        let signer = MockSigner::new();
        let anon = WalletSession::signed_out(Network::Mainnet);

        let err = submit_vote(&anon, &signer, CONTRACT, 7, &VoteChoice::Approve, &alice())
            .await
            .unwrap_err();

        assert_eq!(err, VoteError::NotAuthenticated);
        assert!(signer.calls().is_empty());
    }

    #[tokio::test]
    async fn test_mismatched_account_is_not_authenticated() {
        let signer = MockSigner::new();

        let err = submit_vote(
            &session(),
            &signer,
            CONTRACT,
            7,
            &VoteChoice::Approve,
            &AccountId::from("bob.near"),
        )
        .await
        .unwrap_err();

        assert_eq!(err, VoteError::NotAuthenticated);
        assert!(signer.calls().is_empty());
    }

    #[tokio::test]
    async fn test_submit_builds_act_proposal_call() {
        let signer = MockSigner::new();

        let outcome = submit_vote(&session(), &signer, CONTRACT, 7, &VoteChoice::Reject, &alice())
            .await
            .unwrap();

        assert_eq!(outcome.signer_id, alice());
        let calls = signer.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].receiver_id, CONTRACT);
        assert_eq!(calls[0].method_name, "act_proposal");
        assert_eq!(
            calls[0].args,
            serde_json::json!({ "id": 7, "action": "VoteReject" })
        );
        assert_eq!(calls[0].gas, DEFAULT_GAS);
        assert_eq!(calls[0].deposit, 0);
    }

    #[tokio::test]
    async fn test_signer_failure_is_transaction_failed() {
        let signer = MockSigner::new();
        signer.fail_next(SignerError::Contract("ERR_ALREADY_VOTED".into()));

        let err = submit_vote(&session(), &signer, CONTRACT, 7, &VoteChoice::Approve, &alice())
            .await
            .unwrap_err();

        assert_eq!(
            err,
            VoteError::TransactionFailed(SignerError::Contract("ERR_ALREADY_VOTED".into()))
        );
    }

    #[test]
    fn test_unsupported_choice() {
        let err = prepare_vote_call(
            &session(),
            CONTRACT,
            1,
            &VoteChoice::Other("Abstain".into()),
            &alice(),
        )
        .unwrap_err();
        assert_eq!(err, VoteError::UnsupportedChoice("Abstain".into()));
    }

    #[tokio::test]
    async fn test_submitter_rejects_duplicate_while_pending() {
        let signer = MockSigner::new();
        let gate = signer.hold();
        let submitter = Arc::new(VoteSubmitter::new(signer));

        let first = {
            let submitter = submitter.clone();
            tokio::spawn(async move {
                submitter
                    .submit(&session(), CONTRACT, 9, &VoteChoice::Approve, &alice())
                    .await
            })
        };

        // Wait until the first submission reached the signer
        while submitter.signer().calls().is_empty() {
            tokio::task::yield_now().await;
        }
        assert!(submitter.is_pending(CONTRACT, 9));

        let second = submitter
            .submit(&session(), CONTRACT, 9, &VoteChoice::Approve, &alice())
            .await;
        assert_eq!(second, Err(VoteError::AlreadyPending { proposal_id: 9 }));

        // A different proposal is not blocked
        assert!(!submitter.is_pending(CONTRACT, 10));

        gate.release();
        assert!(first.await.unwrap().is_ok());
        assert!(!submitter.is_pending(CONTRACT, 9));
        assert_eq!(submitter.signer().calls().len(), 1);
    }

    #[test]
    fn test_poisoned_lock_still_tracks_and_frees_slot() {
        let submitter = VoteSubmitter::new(MockSigner::new());

        let guard = submitter.reserve(CONTRACT, 9).unwrap();
        let poison = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _held = submitter.pending.lock().unwrap();
            panic!("poison the pending set");
        }));
        assert!(poison.is_err());
        assert!(submitter.pending.is_poisoned());

        assert!(submitter.is_pending(CONTRACT, 9));
        assert_eq!(
            submitter.reserve(CONTRACT, 9).err(),
            Some(VoteError::AlreadyPending { proposal_id: 9 })
        );

        drop(guard);
        assert!(!submitter.is_pending(CONTRACT, 9));
        assert!(submitter.reserve(CONTRACT, 9).is_ok());
    }

    #[tokio::test]
    async fn test_submitter_frees_slot_after_failure() {
        let signer = MockSigner::new();
        signer.fail_next(SignerError::Rejected("closed popup".into()));
        let submitter = VoteSubmitter::new(signer);

        assert!(submitter
            .submit(&session(), CONTRACT, 9, &VoteChoice::Approve, &alice())
            .await
            .is_err());
        assert!(!submitter.is_pending(CONTRACT, 9));

        assert!(submitter
            .submit(&session(), CONTRACT, 9, &VoteChoice::Approve, &alice())
            .await
            .is_ok());
    }
}
