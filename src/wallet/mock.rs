//! Mock Transaction Signer for Testing
//!
//! Records every function call it is asked to sign, can be told to fail, and
//! can hold submissions open to exercise the pending-vote path.

use super::traits::*;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

/// Mock signer
#[derive(Clone, Default)]
pub struct MockSigner {
    state: Arc<Mutex<MockState>>,
}

#[derive(Default)]
struct MockState {
    calls: Vec<FunctionCall>,
    failures: VecDeque<SignerError>,
    gate: Option<Arc<Notify>>,
    next_tx: u64,
}

/// Handle that lets held submissions complete
pub struct SignerGate(Arc<Notify>);

impl SignerGate {
    pub fn release(&self) {
        self.0.notify_one();
    }
}

impl MockSigner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Function calls received so far
    pub fn calls(&self) -> Vec<FunctionCall> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Fail the next submission with `err`
    pub fn fail_next(&self, err: SignerError) {
        self.state.lock().unwrap().failures.push_back(err);
    }

    /// Hold the next submission until the returned gate is released
    pub fn hold(&self) -> SignerGate {
        let notify = Arc::new(Notify::new());
        self.state.lock().unwrap().gate = Some(notify.clone());
        SignerGate(notify)
    }
}

#[async_trait]
impl TransactionSigner for MockSigner {
    async fn sign_and_send(
        &self,
        _session: &WalletSession,
        call: &FunctionCall,
    ) -> Result<TransactionOutcome, SignerError> {
        let gate = {
            let mut state = self.state.lock().unwrap();
            state.calls.push(call.clone());
            state.gate.take()
        };

        if let Some(gate) = gate {
            gate.notified().await;
        }

        let mut state = self.state.lock().unwrap();
        if let Some(err) = state.failures.pop_front() {
            return Err(err);
        }

        state.next_tx += 1;
        Ok(TransactionOutcome {
            transaction_hash: format!("mocktx{}", state.next_tx),
            signer_id: call.signer_id.clone(),
            receiver_id: call.receiver_id.clone(),
        })
    }
}
