//! Proposal Store
//!
//! Fetches pages of proposals for a status filter. Read-only: the only side
//! effect is the network call itself.

use crate::api::traits::{ApiError, ApiResult, DaoApi, ProposalFilter, ProposalQuery};
use crate::api::types::{AccountId, Page, ProposalsResponse};
use crate::retry::{retry_with_backoff, RetryPolicy};
use tracing::{debug, warn};

/// Paged access to a DAO's proposals
pub struct ProposalStore<A: DaoApi> {
    api: A,
    retry: RetryPolicy,
}

impl<A: DaoApi> ProposalStore<A> {
    /// Single attempt per fetch
    pub fn new(api: A) -> Self {
        Self {
            api,
            retry: RetryPolicy::none(),
        }
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Fetch the page at `offset` for `filter`.
    ///
    /// Fails with a network-kind `ApiError` when the indexer call fails or
    /// times out.
    pub async fn fetch_proposals(
        &self,
        filter: ProposalFilter,
        offset: u64,
        limit: u64,
    ) -> ApiResult<Page> {
        self.fetch_page(ProposalQuery::filtered(filter, offset, limit))
            .await
    }

    /// Like `fetch_proposals`, but a failure yields an empty page with total 0.
    pub async fn fetch_or_empty(&self, filter: ProposalFilter, offset: u64, limit: u64) -> Page {
        match self.fetch_proposals(filter, offset, limit).await {
            Ok(page) => page,
            Err(e) => {
                warn!(%filter, offset, limit, error = %e, "proposal fetch failed, showing empty list");
                Page::empty(offset, limit)
            }
        }
    }

    /// Proposals `account` has voted on.
    pub async fn fetch_voted(&self, account: &AccountId, offset: u64, limit: u64) -> ApiResult<Page> {
        self.fetch_page(ProposalQuery::voted_by(account.clone(), offset, limit))
            .await
    }

    async fn fetch_page(&self, query: ProposalQuery) -> ApiResult<Page> {
        if query.limit == 0 {
            return Err(ApiError::InvalidRequest("limit must be at least 1".into()));
        }

        let response: ProposalsResponse =
            retry_with_backoff(self.retry, || self.api.proposals(&query), ApiError::is_network)
                .await?;

        let mut proposals = response.data;
        if proposals.len() as u64 > query.limit {
            warn!(
                returned = proposals.len(),
                limit = query.limit,
                "indexer returned more proposals than requested, truncating"
            );
            proposals.truncate(query.limit as usize);
        }

        debug!(
            dao = self.api.dao_id(),
            offset = query.offset,
            count = proposals.len(),
            total = response.total,
            "fetched proposals page"
        );

        Ok(Page {
            proposals,
            total: response.total,
            offset: query.offset,
            limit: query.limit,
        })
    }
}
