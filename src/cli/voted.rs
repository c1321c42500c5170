use super::config::DaoboardConfig;
use super::display::format_summary;
use daoboard::api::{AccountId, DaoApi};
use daoboard::proposals::{ProposalStore, ProposalSummary};
use std::time::SystemTime;

/// List proposals an account has voted on
pub async fn execute(
    config: &DaoboardConfig,
    account: Option<String>,
    page: u64,
) -> Result<(), Box<dyn std::error::Error>> {
    let account = account
        .or_else(|| config.wallet.account_id.clone())
        .map(AccountId::new)
        .ok_or("No account given and no wallet.account_id configured")?;

    let store = ProposalStore::new(config.client()?).with_retry(config.retry_policy());
    print!("{}", render(&store, &account, page, config.api.page_limit).await?);
    Ok(())
}

pub async fn render<A: DaoApi>(
    store: &ProposalStore<A>,
    account: &AccountId,
    page: u64,
    limit: u64,
) -> Result<String, Box<dyn std::error::Error>> {
    if page == 0 {
        return Err("Pages start at 1".into());
    }

    let page = store.fetch_voted(account, (page - 1) * limit, limit).await?;
    let mut out = format!("🗳️  Proposals voted on by {} ({} total)\n\n", account, page.total);
    if page.is_empty() {
        out.push_str("No votes found\n");
        return Ok(out);
    }

    let now = SystemTime::now();
    for proposal in &page.proposals {
        let summary = ProposalSummary::from_proposal(proposal, Some(account), now);
        out.push_str(&format_summary(&summary));
        out.push_str("\n\n");
    }
    Ok(out)
}
