use super::config::DaoboardConfig;
use super::display::{format_page_footer, format_summary};
use daoboard::api::{DaoApi, ProposalFilter};
use daoboard::proposals::{ProposalBoard, ProposalStore};
use daoboard::wallet::WalletSession;
use std::time::SystemTime;

/// List one page of proposals for `filter`
pub async fn execute(
    config: &DaoboardConfig,
    filter: &str,
    page: u64,
) -> Result<(), Box<dyn std::error::Error>> {
    let filter: ProposalFilter = filter.parse()?;
    let store = ProposalStore::new(config.client()?).with_retry(config.retry_policy());
    let mut board = ProposalBoard::new(store, filter, config.api.page_limit);

    print!("{}", render(&mut board, &config.session(), page).await?);
    Ok(())
}

/// Load page `page` (1-based) of the board and render it
pub async fn render<A: DaoApi>(
    board: &mut ProposalBoard<A>,
    session: &WalletSession,
    page: u64,
) -> Result<String, Box<dyn std::error::Error>> {
    if page == 0 {
        return Err("Pages start at 1".into());
    }

    // The total is unknown until the first page is loaded
    board.load().await?;
    if page > 1 && !board.go_to_page(page - 1).await? {
        return Err(format!(
            "Page {} does not exist ({} pages)",
            page,
            board.pagination().page_count()
        )
        .into());
    }

    let mut out = format!("🗳️  {} proposals ({} total)\n\n", board.filter(), board.total());
    let summaries = board.summaries(session.account_id(), SystemTime::now());
    if summaries.is_empty() {
        out.push_str("There are no proposals at the moment\n");
        return Ok(out);
    }

    for summary in &summaries {
        out.push_str(&format_summary(summary));
        out.push_str("\n\n");
    }
    out.push_str(&format_page_footer(board.pagination()));
    out.push('\n');
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use daoboard::api::mock::sample_proposal;
    use daoboard::api::{AccountId, ApiError, MockDaoApi, ProposalStatus, VoteChoice};
    use daoboard::wallet::Network;

    fn board(n: u64) -> ProposalBoard<MockDaoApi> {
        let api = MockDaoApi::new("brave-new-games.sputnik-dao.near");
        api.set_proposals(
            ProposalFilter::Active,
            (0..n)
                .map(|i| {
                    sample_proposal(i, ProposalStatus::InProgress, &[("alice.near", VoteChoice::Approve)])
                })
                .collect(),
        );
        ProposalBoard::new(ProposalStore::new(api), ProposalFilter::Active, 20)
    }

    #[tokio::test]
    async fn test_render_second_page() {
        let mut board = board(45);
        let session = WalletSession::signed_in(Network::Mainnet, AccountId::from("alice.near"));

        let out = render(&mut board, &session, 2).await.unwrap();

        assert!(out.contains("active proposals (45 total)"));
        assert!(out.contains("#20 Proposal 20"));
        assert!(!out.contains("#40 Proposal 40"));
        assert!(out.contains("You voted: Approve"));
        assert!(out.contains("Page 2 of 3"));
    }

    #[tokio::test]
    async fn test_render_empty_list() {
        let mut board = board(0);
        let out = render(&mut board, &WalletSession::default(), 1).await.unwrap();
        assert!(out.contains("There are no proposals at the moment"));
    }

    #[tokio::test]
    async fn test_render_page_out_of_range() {
        let mut board = board(5);
        let err = render(&mut board, &WalletSession::default(), 4).await.unwrap_err();
        assert!(err.to_string().contains("does not exist"));

        assert!(render(&mut board, &WalletSession::default(), 0).await.is_err());
    }

    #[tokio::test]
    async fn test_render_network_error() {
        let mut board = board(5);
        board.store().api().fail_with(ApiError::Network("down".into()));
        assert!(render(&mut board, &WalletSession::default(), 1).await.is_err());
    }
}
