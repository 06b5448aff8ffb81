use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// One entry of the exchange's market universe.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct MarketInfo {
    pub name: String,
    pub sz_decimals: u32,
    pub max_leverage: u32,
    #[serde(default)]
    pub only_isolated: bool,
}

/// Exchange metadata. Fields beyond the universe are carried through
/// untouched so `get_meta` stays a passthrough.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Meta {
    pub universe: Vec<MarketInfo>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A trader's clearinghouse state (margin summary plus open positions).
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ClearinghouseState {
    #[serde(default)]
    pub asset_positions: Vec<AssetPosition>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One position entry. The API has served the coin both nested under
/// `position` and flat on the entry itself; both layouts are modeled as
/// optional fields instead of probing untyped JSON.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AssetPosition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<PositionDetail>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coin: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AssetPosition {
    /// The position's coin, preferring the nested layout.
    pub fn coin(&self) -> Option<&str> {
        self.position
            .as_ref()
            .map(|p| p.coin.as_str())
            .or(self.coin.as_deref())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct PositionDetail {
    pub coin: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Mid prices for every market. The API returns either an object keyed by
/// symbol or a positional array aligned with the universe.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(untagged)]
pub enum AllMids {
    ByCoin(BTreeMap<String, String>),
    ByIndex(Vec<String>),
}

impl AllMids {
    /// Resolves the mid for a market, given its universe index and symbol.
    /// Callers resolve the index first; an unknown market never reaches here.
    pub fn price_for(&self, index: usize, coin: &str) -> Option<&str> {
        match self {
            AllMids::ByCoin(mids) => mids
                .iter()
                .find(|(name, _)| name.eq_ignore_ascii_case(coin))
                .map(|(_, px)| px.as_str()),
            AllMids::ByIndex(mids) => mids.get(index).map(String::as_str),
        }
    }
}

/// Per-market funding context, positionally aligned with the universe.
/// All prices and rates are decimal strings, passed through verbatim.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AssetCtx {
    pub funding: String,
    #[serde(default)]
    pub premium: Option<String>,
    pub mark_px: String,
    pub oracle_px: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The `metaAndAssetCtxs` response: a `[meta, contexts]` pair.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct MetaAndAssetCtxs(pub Meta, pub Vec<AssetCtx>);

/// One `predictedFundings` entry: `[coin, [[venue, data], ...]]`.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct PredictedFunding(pub String, pub Vec<PredictedVenue>);

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct PredictedVenue(pub String, pub Option<VenueFunding>);

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct VenueFunding {
    pub funding_rate: String,
    pub next_funding_time: u64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Funding snapshot for a single market, shaped for callers.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct MarketFundingRate {
    pub coin: String,
    pub current_funding: String,
    pub premium: Option<String>,
    pub mark_price: String,
    pub oracle_price: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NextFunding {
    pub next_funding_time: u64,
    pub funding_rate: String,
}

/// Detailed vault state as served by the `vaultDetails` endpoint.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct VaultDetails {
    pub name: String,
    pub vault_address: String,
    pub leader: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub portfolio: Vec<PortfolioEntry>,
    #[serde(default)]
    pub apr: f64,
    #[serde(default)]
    pub follower_state: Value,
    #[serde(default)]
    pub leader_fraction: f64,
    #[serde(default)]
    pub leader_commission: f64,
    #[serde(default)]
    pub followers: Vec<VaultFollower>,
    #[serde(default)]
    pub max_distributable: f64,
    #[serde(default)]
    pub max_withdrawable: f64,
    #[serde(default)]
    pub is_closed: bool,
    #[serde(default)]
    pub relationship: Option<VaultRelationship>,
    #[serde(default)]
    pub allow_deposits: bool,
    #[serde(default)]
    pub always_close_on_withdraw: bool,
}

/// One `[period, data]` portfolio history pair.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct PortfolioEntry(pub String, pub PortfolioPeriod);

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioPeriod {
    #[serde(default)]
    pub account_value_history: Option<Vec<Value>>,
    #[serde(default)]
    pub pnl_history: Option<Vec<Value>>,
    #[serde(default)]
    pub vlm: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct VaultRelationship {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub data: Option<RelationshipData>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RelationshipData {
    #[serde(default)]
    pub child_addresses: Option<Vec<String>>,
}

/// Equity and pnl stay decimal strings; they are only parsed to floats when
/// aggregated into vault metrics.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct VaultFollower {
    pub user: String,
    pub vault_equity: String,
    pub pnl: String,
    pub all_time_pnl: String,
    pub days_following: u64,
    pub vault_entry_time: u64,
    pub lockup_until: u64,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UserVaultEquity {
    pub vault_address: String,
    pub equity: String,
}

/// Aggregates derived client-side from a fetched [`VaultDetails`].
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct VaultMetrics {
    pub total_followers: usize,
    pub total_equity: f64,
    pub average_days_following: f64,
    pub total_pnl: f64,
    pub total_all_time_pnl: f64,
    pub apr: f64,
    pub leader_commission: f64,
    pub is_accepting_deposits: bool,
    pub is_closed: bool,
}

/// Portfolio history for one period, with missing fields defaulted.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioData {
    pub account_value_history: Vec<Value>,
    pub pnl_history: Vec<Value>,
    pub volume: String,
}
