//! DAO Indexer Data Model
//!
//! Read-only snapshots returned by the AstroDAO indexer API. Nothing here is
//! persisted; the types only need to survive the current view.
//!
//! The indexer is loose about JSON scalar types (timestamps and values come
//! back as strings or numbers depending on the endpoint), so a few fields go
//! through the lenient deserializers at the bottom of this file.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Explorer prefix for proposal transactions.
pub const MAINNET_TRANSACTION_URL: &str = "https://explorer.mainnet.near.org/transactions/";

/// NEAR account identifier (voter, proposer, or signed-in wallet account)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(pub String);

impl AccountId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AccountId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Proposal lifecycle state as reported by the indexer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProposalStatus {
    #[serde(alias = "Active")]
    InProgress,
    Approved,
    Rejected,
    Removed,
    Expired,
    Moved,
    Failed,
}

impl ProposalStatus {
    /// Only in-progress proposals accept votes.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::InProgress)
    }

    pub fn is_failed(&self) -> bool {
        matches!(
            self,
            Self::Rejected | Self::Removed | Self::Expired | Self::Failed
        )
    }
}

impl fmt::Display for ProposalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::InProgress => "Active",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
            Self::Removed => "Removed",
            Self::Expired => "Expired",
            Self::Moved => "Moved",
            Self::Failed => "Failed",
        };
        f.write_str(label)
    }
}

/// A recorded vote.
///
/// The sputnik contract defines Approve/Reject/Remove; anything else the
/// contract may add later is kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum VoteChoice {
    Approve,
    Reject,
    Remove,
    Other(String),
}

impl VoteChoice {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Approve => "Approve",
            Self::Reject => "Reject",
            Self::Remove => "Remove",
            Self::Other(s) => s,
        }
    }

    /// Contract-side action that records this choice.
    ///
    /// Returns `None` for choices the contract does not let wallets cast.
    pub fn action(&self) -> Option<VoteAction> {
        match self {
            Self::Approve => Some(VoteAction::VoteApprove),
            Self::Reject => Some(VoteAction::VoteReject),
            Self::Remove => Some(VoteAction::VoteRemove),
            Self::Other(_) => None,
        }
    }
}

impl From<String> for VoteChoice {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Approve" => Self::Approve,
            "Reject" => Self::Reject,
            "Remove" => Self::Remove,
            _ => Self::Other(s),
        }
    }
}

impl From<VoteChoice> for String {
    fn from(choice: VoteChoice) -> Self {
        match choice {
            VoteChoice::Other(s) => s,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for VoteChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for VoteChoice {
    type Err = String;

    /// Parses user input (case-insensitive) into a castable choice.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "approve" | "accept" | "yes" => Ok(Self::Approve),
            "reject" | "no" => Ok(Self::Reject),
            "remove" => Ok(Self::Remove),
            other => Err(format!(
                "unknown vote choice '{}' (expected approve, reject or remove)",
                other
            )),
        }
    }
}

/// `act_proposal` action names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VoteAction {
    VoteApprove,
    VoteReject,
    VoteRemove,
}

/// A single governance proposal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Proposal {
    /// Indexer id, `<dao>-<proposal_id>`
    pub id: String,
    pub proposal_id: u64,
    pub dao_id: String,
    #[serde(rename = "type", default)]
    pub proposal_type: String,
    #[serde(default)]
    pub title: String,
    /// Rich text (HTML or markdown), carried verbatim
    #[serde(default)]
    pub description: String,
    pub proposer: AccountId,
    #[serde(default)]
    pub transaction_hash: String,
    pub status: ProposalStatus,
    /// Nanoseconds since the Unix epoch
    #[serde(default, deserialize_with = "u64_from_str_or_num")]
    pub vote_period_end: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub votes: BTreeMap<AccountId, VoteChoice>,
}

impl Proposal {
    pub fn transaction_url(&self) -> String {
        format!("{}{}", MAINNET_TRANSACTION_URL, self.transaction_hash)
    }

    pub fn voting_ends_at(&self) -> SystemTime {
        UNIX_EPOCH + Duration::from_nanos(self.vote_period_end)
    }

    /// Time left to vote, or `None` once the vote period has ended.
    pub fn time_remaining(&self, now: SystemTime) -> Option<Duration> {
        self.voting_ends_at()
            .duration_since(now)
            .ok()
            .filter(|d| !d.is_zero())
    }
}

/// One point of a DAO history series (funds, bounties, NFTs, proposals)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stat {
    #[serde(deserialize_with = "timestamp_from_str_or_millis")]
    #[serde(serialize_with = "timestamp_to_rfc3339")]
    pub timestamp: SystemTime,
    #[serde(deserialize_with = "f64_from_str_or_num")]
    pub value: f64,
}

/// One point of the proposals history: total and still-active counts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProposalStat {
    #[serde(deserialize_with = "timestamp_from_str_or_millis")]
    #[serde(serialize_with = "timestamp_to_rfc3339")]
    pub timestamp: SystemTime,
    #[serde(default, deserialize_with = "u64_from_str_or_num")]
    pub total: u64,
    #[serde(default, deserialize_with = "u64_from_str_or_num")]
    pub active: u64,
}

impl ProposalStat {
    /// The `total` count as a chart point
    pub fn total_point(&self) -> Stat {
        Stat {
            timestamp: self.timestamp,
            value: self.total as f64,
        }
    }

    /// The `active` count as a chart point
    pub fn active_point(&self) -> Stat {
        Stat {
            timestamp: self.timestamp,
            value: self.active as f64,
        }
    }
}

/// Direction of a headline figure since the previous snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Up,
    Down,
    Flat,
}

/// A headline figure with its percent growth
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Status {
    #[serde(deserialize_with = "f64_from_str_or_num")]
    pub value: f64,
    #[serde(default)]
    pub growth: f64,
}

impl Status {
    pub fn trend(&self) -> Trend {
        if self.growth > 0.0 {
            Trend::Up
        } else if self.growth < 0.0 {
            Trend::Down
        } else {
            Trend::Flat
        }
    }
}

/// Snapshot of a DAO's headline figures
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaoStatus {
    pub dao_id: String,
    /// Milliseconds since the Unix epoch
    #[serde(default, deserialize_with = "u64_from_str_or_num")]
    pub timestamp: u64,
    pub amount: Status,
    pub total_dao_funds: Status,
    pub total_proposal_count: Status,
    pub active_proposal_count: Status,
    pub bounty_count: Status,
    pub nft_count: Status,
}

/// Paged proposals response body
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProposalsResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: Vec<Proposal>,
    #[serde(default)]
    pub total: u64,
}

/// One fetched page of proposals
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub proposals: Vec<Proposal>,
    pub total: u64,
    pub offset: u64,
    pub limit: u64,
}

impl Page {
    /// The page shown when a fetch failed: no proposals, total 0.
    pub fn empty(offset: u64, limit: u64) -> Self {
        Self {
            proposals: Vec::new(),
            total: 0,
            offset,
            limit,
        }
    }

    pub fn len(&self) -> usize {
        self.proposals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.proposals.is_empty()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StrOrNum {
    Str(String),
    Int(u64),
    Float(f64),
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn u64_from_str_or_num<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<StrOrNum>::deserialize(deserializer)? {
        None => Ok(0),
        Some(StrOrNum::Int(n)) => Ok(n),
        Some(StrOrNum::Float(f)) if f >= 0.0 => Ok(f as u64),
        Some(StrOrNum::Float(f)) => Err(serde::de::Error::custom(format!(
            "negative timestamp {}",
            f
        ))),
        Some(StrOrNum::Str(s)) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

fn f64_from_str_or_num<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match StrOrNum::deserialize(deserializer)? {
        StrOrNum::Int(n) => Ok(n as f64),
        StrOrNum::Float(f) => Ok(f),
        StrOrNum::Str(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

fn timestamp_from_str_or_millis<'de, D>(deserializer: D) -> Result<SystemTime, D::Error>
where
    D: Deserializer<'de>,
{
    match StrOrNum::deserialize(deserializer)? {
        StrOrNum::Int(ms) => Ok(UNIX_EPOCH + Duration::from_millis(ms)),
        StrOrNum::Float(ms) if ms >= 0.0 => Ok(UNIX_EPOCH + Duration::from_millis(ms as u64)),
        StrOrNum::Float(ms) => Err(serde::de::Error::custom(format!(
            "negative timestamp {}",
            ms
        ))),
        StrOrNum::Str(s) => match s.trim().parse::<u64>() {
            Ok(ms) => Ok(UNIX_EPOCH + Duration::from_millis(ms)),
            Err(_) => humantime::parse_rfc3339_weak(s.trim()).map_err(serde::de::Error::custom),
        },
    }
}

fn timestamp_to_rfc3339<S>(ts: &SystemTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.collect_str(&humantime::format_rfc3339_millis(*ts))
}
