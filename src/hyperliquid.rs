use crate::address;
use crate::types::{
    AllMids, AssetCtx, AssetPosition, ClearinghouseState, MarketFundingRate, MarketInfo, Meta,
    MetaAndAssetCtxs, NextFunding, PredictedFunding, PredictedVenue, UserVaultEquity, VaultDetails,
};
use anyhow::{anyhow, Result};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::error;
use url::Url;

const MAINNET_API_URL: &str = "https://api.hyperliquid.xyz";
const TESTNET_API_URL: &str = "https://api.hyperliquid-testnet.xyz";

/// The exchange's own perp venue identifier inside `predictedFundings`.
const HL_PERP_VENUE: &str = "HlPerp";

const INFO_TIMEOUT: Duration = Duration::from_secs(10);

/// Read-only query client for the Hyperliquid info API.
///
/// Every query is a single `POST <base>/info` with a `type`-discriminated
/// JSON body. The client is stateless apart from its base URL and is safe
/// to share across concurrent calls. Failures never propagate out of the
/// public operations: they are logged and collapsed into a `None`/empty
/// sentinel, so callers treat "no data" and "fetch failed" identically.
#[derive(Clone)]
pub struct HyperliquidClient {
    http: reqwest::Client,
    info_url: Url,
    testnet: bool,
}

impl HyperliquidClient {
    pub fn new(testnet: bool) -> Result<Self> {
        let base = if testnet {
            TESTNET_API_URL
        } else {
            MAINNET_API_URL
        };
        let info_url = Url::parse(base)?.join("/info")?;
        let http = reqwest::Client::builder().timeout(INFO_TIMEOUT).build()?;

        Ok(Self {
            http,
            info_url,
            testnet,
        })
    }

    pub fn is_testnet(&self) -> bool {
        self.testnet
    }

    /// One round trip to `/info`. Non-2xx statuses are errors; the caller
    /// decides how to surface them.
    async fn info_request<T: DeserializeOwned>(&self, body: Value) -> Result<T> {
        let response = self
            .http
            .post(self.info_url.clone())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(anyhow!("info request failed with status {}", status));
        }

        Ok(response.json::<T>().await?)
    }

    /// All positions (clearinghouse state) for a trader.
    pub async fn get_trader_positions(&self, user: &str) -> Option<ClearinghouseState> {
        match self
            .info_request(json!({ "type": "clearinghouseState", "user": user }))
            .await
        {
            Ok(state) => Some(state),
            Err(e) => {
                error!("Failed to fetch trader positions: {}", e);
                None
            }
        }
    }

    /// A trader's position for one market, filtered locally from the full
    /// position list.
    pub async fn get_trader_position_for_market(
        &self,
        user: &str,
        coin: &str,
    ) -> Option<AssetPosition> {
        let state = self.get_trader_positions(user).await?;
        position_for_market(state, coin)
    }

    /// All tradable markets.
    pub async fn get_markets(&self) -> Vec<MarketInfo> {
        match self.info_request::<Meta>(json!({ "type": "meta" })).await {
            Ok(meta) => meta.universe,
            Err(e) => {
                error!("Failed to fetch markets: {}", e);
                Vec::new()
            }
        }
    }

    /// Current mid price for one market.
    pub async fn get_market_price(&self, coin: &str) -> Option<String> {
        let mids = self.get_all_mids().await?;
        let index = self.get_market_index(coin).await?;
        mids.price_for(index, coin).map(str::to_owned)
    }

    /// Universe index for a coin; `None` when the symbol is unlisted.
    /// Callers must check before indexing positionally aligned arrays.
    pub async fn get_market_index(&self, coin: &str) -> Option<usize> {
        let meta = self.get_meta().await?;
        market_index(&meta.universe, coin)
    }

    pub async fn get_open_orders(&self, user: &str) -> Vec<Value> {
        match self
            .info_request(json!({ "type": "openOrders", "user": user }))
            .await
        {
            Ok(orders) => orders,
            Err(e) => {
                error!("Failed to fetch open orders: {}", e);
                Vec::new()
            }
        }
    }

    pub async fn get_user_fills(&self, user: &str) -> Vec<Value> {
        match self
            .info_request(json!({ "type": "userFills", "user": user }))
            .await
        {
            Ok(fills) => fills,
            Err(e) => {
                error!("Failed to fetch user fills: {}", e);
                Vec::new()
            }
        }
    }

    pub async fn get_meta(&self) -> Option<Meta> {
        match self.info_request(json!({ "type": "meta" })).await {
            Ok(meta) => Some(meta),
            Err(e) => {
                error!("Failed to fetch meta: {}", e);
                None
            }
        }
    }

    pub async fn get_all_mids(&self) -> Option<AllMids> {
        match self.info_request(json!({ "type": "allMids" })).await {
            Ok(mids) => Some(mids),
            Err(e) => {
                error!("Failed to fetch all mids: {}", e);
                None
            }
        }
    }

    /// Funding rates for all markets, as the `[meta, contexts]` pair.
    pub async fn get_funding_rates(&self) -> Option<MetaAndAssetCtxs> {
        match self.info_request(json!({ "type": "metaAndAssetCtxs" })).await {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                error!("Failed to fetch funding rates: {}", e);
                None
            }
        }
    }

    pub async fn get_predicted_fundings(&self) -> Option<Vec<PredictedFunding>> {
        match self.info_request(json!({ "type": "predictedFundings" })).await {
            Ok(fundings) => Some(fundings),
            Err(e) => {
                error!("Failed to fetch predicted fundings: {}", e);
                None
            }
        }
    }

    /// Funding snapshot for one market, filtered locally from the full
    /// funding-rate snapshot.
    pub async fn get_market_funding_rate(&self, coin: &str) -> Option<MarketFundingRate> {
        let MetaAndAssetCtxs(meta, ctxs) = self.get_funding_rates().await?;
        market_funding_rate(&meta.universe, &ctxs, coin)
    }

    /// Next funding time for one market on the exchange's own perp venue.
    pub async fn get_next_funding_time(&self, coin: &str) -> Option<NextFunding> {
        let predicted = self.get_predicted_fundings().await?;
        next_funding_time(&predicted, coin)
    }

    /// Vault details. This endpoint is not part of the typed query surface
    /// above, so the request body is assembled by hand.
    pub async fn get_vault_details(
        &self,
        vault_address: &str,
        user: Option<&str>,
    ) -> Option<VaultDetails> {
        let mut body = json!({ "type": "vaultDetails", "vaultAddress": vault_address });
        if let Some(user) = user {
            body["user"] = json!(user);
        }

        match self.info_request(body).await {
            Ok(details) => Some(details),
            Err(e) => {
                error!("Failed to fetch vault details: {}", e);
                None
            }
        }
    }

    /// A user's deposits across vaults. The endpoint serves `null` for users
    /// with no deposits; that collapses into the empty list.
    pub async fn get_user_vault_equities(&self, user: &str) -> Vec<UserVaultEquity> {
        match self
            .info_request::<Option<Vec<UserVaultEquity>>>(
                json!({ "type": "userVaultEquities", "user": user }),
            )
            .await
        {
            Ok(equities) => equities.unwrap_or_default(),
            Err(e) => {
                error!("Failed to fetch user vault equities: {}", e);
                Vec::new()
            }
        }
    }

    pub async fn get_user_sub_accounts(&self, user: &str) -> Vec<Value> {
        match self
            .info_request::<Option<Vec<Value>>>(json!({ "type": "subAccounts", "user": user }))
            .await
        {
            Ok(accounts) => accounts.unwrap_or_default(),
            Err(e) => {
                error!("Failed to fetch user sub accounts: {}", e);
                Vec::new()
            }
        }
    }

    /// True iff the address is well-formed and the exchange serves vault
    /// details for it.
    pub async fn is_valid_vault_address(&self, addr: &str) -> bool {
        if !address::is_valid_address(addr) {
            return false;
        }
        self.get_vault_details(addr, None).await.is_some()
    }
}

/// Linear case-insensitive scan of the universe for a symbol.
pub fn market_index(universe: &[MarketInfo], coin: &str) -> Option<usize> {
    universe
        .iter()
        .position(|asset| asset.name.eq_ignore_ascii_case(coin))
}

/// Picks the position whose coin matches, trying the nested layout before
/// the flat one.
pub fn position_for_market(state: ClearinghouseState, coin: &str) -> Option<AssetPosition> {
    state.asset_positions.into_iter().find(|pos| {
        pos.coin()
            .map(|name| name.eq_ignore_ascii_case(coin))
            .unwrap_or(false)
    })
}

/// Reads the funding context positionally aligned with the resolved market.
/// The returned coin is upper-cased regardless of the requested case.
pub fn market_funding_rate(
    universe: &[MarketInfo],
    ctxs: &[AssetCtx],
    coin: &str,
) -> Option<MarketFundingRate> {
    let index = market_index(universe, coin)?;
    let ctx = ctxs.get(index)?;

    Some(MarketFundingRate {
        coin: coin.to_uppercase(),
        current_funding: ctx.funding.clone(),
        premium: ctx.premium.clone(),
        mark_price: ctx.mark_px.clone(),
        oracle_price: ctx.oracle_px.clone(),
    })
}

/// Finds the coin, then the `HlPerp` venue within it. Either being absent
/// yields the sentinel.
pub fn next_funding_time(predicted: &[PredictedFunding], coin: &str) -> Option<NextFunding> {
    let PredictedFunding(_, venues) = predicted
        .iter()
        .find(|PredictedFunding(name, _)| name.eq_ignore_ascii_case(coin))?;

    let PredictedVenue(_, data) = venues
        .iter()
        .find(|PredictedVenue(name, _)| name == HL_PERP_VENUE)?;

    let data = data.as_ref()?;
    Some(NextFunding {
        next_funding_time: data.next_funding_time,
        funding_rate: data.funding_rate.clone(),
    })
}
