use super::config::DaoboardConfig;
use daoboard::api::{AccountId, VoteChoice};
use daoboard::wallet::{prepare_vote_call, VoteError, WalletSession};

/// Validate the configured session and print the `act_proposal` call as JSON
///
/// Signing happens outside daoboard: the printed call is meant for the
/// operator's wallet. Afterwards, run `proposals` again to see the new tally.
pub fn execute(
    config: &DaoboardConfig,
    proposal_id: u64,
    choice: &str,
    contract: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let contract = contract.unwrap_or_else(|| config.api.dao_id.clone());
    println!("{}", render(&config.session(), &contract, proposal_id, choice)?);
    Ok(())
}

pub fn render(
    session: &WalletSession,
    contract: &str,
    proposal_id: u64,
    choice: &str,
) -> Result<String, Box<dyn std::error::Error>> {
    let choice: VoteChoice = choice.parse()?;
    let account: AccountId = session
        .account_id()
        .cloned()
        .ok_or(VoteError::NotAuthenticated)?;

    let call = prepare_vote_call(session, contract, proposal_id, &choice, &account)?;
    Ok(serde_json::to_string_pretty(&call)?)
}
