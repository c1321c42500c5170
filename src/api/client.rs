//! AstroDAO Indexer HTTP Client
//!
//! Minimal reqwest client for the indexer's read endpoints:
//! - `GET /proposals?dao=<dao>&...`
//! - `GET /stats/dao/<dao>/state`
//! - `GET /stats/dao/<dao>/{funds,bounties,nfts}`
//! - `GET /stats/dao/<dao>/proposals`
//!
//! Every request is a single attempt bounded by the client timeout. Retries,
//! if any, belong to the caller (see `crate::retry`).

use super::traits::{ApiError, ApiResult, DaoApi, ProposalQuery, StatKind, PROPOSAL_STATS_PATH};
use super::types::{DaoStatus, ProposalStat, ProposalsResponse, Stat};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// Public AstroDAO indexer
pub const DEFAULT_BASE_URL: &str = "https://api.app.astrodao.com/api/v1";

/// DAO the dashboard was built for
pub const DEFAULT_DAO_ID: &str = "brave-new-games.sputnik-dao.near";

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP implementation of [`DaoApi`]
#[derive(Clone)]
pub struct AstroDaoClient {
    base_url: String,
    dao_id: String,
    timeout: Duration,
    client: reqwest::Client,
}

impl AstroDaoClient {
    /// Create a client for `dao_id` on the indexer at `base_url`.
    pub fn new(
        base_url: impl Into<String>,
        dao_id: impl Into<String>,
        timeout: Duration,
    ) -> ApiResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Network(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            dao_id: dao_id.into(),
            timeout,
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn proposals_url(&self) -> String {
        format!("{}/proposals", self.base_url)
    }

    pub fn state_url(&self) -> String {
        format!("{}/stats/dao/{}/state", self.base_url, self.dao_id)
    }

    pub fn stats_url(&self, kind: StatKind) -> String {
        format!("{}/stats/dao/{}/{}", self.base_url, self.dao_id, kind.path())
    }

    pub fn proposal_stats_url(&self) -> String {
        format!(
            "{}/stats/dao/{}/{}",
            self.base_url, self.dao_id, PROPOSAL_STATS_PATH
        )
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> ApiResult<T> {
        debug!(url, ?query, "indexer GET");

        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        serde_json::from_slice(&body).map_err(|e| ApiError::Decode(format!("{}: {}", url, e)))
    }

    fn map_transport_error(&self, err: reqwest::Error) -> ApiError {
        if err.is_timeout() {
            ApiError::Timeout(self.timeout)
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

#[async_trait]
impl DaoApi for AstroDaoClient {
    fn dao_id(&self) -> &str {
        &self.dao_id
    }

    async fn proposals(&self, query: &ProposalQuery) -> ApiResult<ProposalsResponse> {
        let mut params = vec![("dao", self.dao_id.clone())];
        params.extend(query.params());
        self.get_json(&self.proposals_url(), &params).await
    }

    async fn dao_state(&self) -> ApiResult<DaoStatus> {
        self.get_json(&self.state_url(), &[]).await
    }

    async fn stats(&self, kind: StatKind) -> ApiResult<Vec<Stat>> {
        self.get_json(&self.stats_url(kind), &[]).await
    }

    async fn proposal_stats(&self) -> ApiResult<Vec<ProposalStat>> {
        self.get_json(&self.proposal_stats_url(), &[]).await
    }
}
