use super::{require_coin, Tool};
use crate::hyperliquid::HyperliquidClient;
use anyhow::Result;
use serde_json::{json, Value};

pub struct GetFundingRatesTool;

#[async_trait::async_trait]
impl Tool for GetFundingRatesTool {
    fn name(&self) -> &'static str {
        "get_funding_rates"
    }

    fn description(&self) -> &'static str {
        "Get funding rates for all markets on Hyperliquid."
    }

    fn schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {}
        })
    }

    async fn call(&self, client: &HyperliquidClient, _args: Value) -> Result<Value> {
        let rates = client.get_funding_rates().await;
        Ok(serde_json::to_value(rates)?)
    }
}

pub struct GetPredictedFundingsTool;

#[async_trait::async_trait]
impl Tool for GetPredictedFundingsTool {
    fn name(&self) -> &'static str {
        "get_predicted_fundings"
    }

    fn description(&self) -> &'static str {
        "Get predicted funding rates for all markets on Hyperliquid."
    }

    fn schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {}
        })
    }

    async fn call(&self, client: &HyperliquidClient, _args: Value) -> Result<Value> {
        let fundings = client.get_predicted_fundings().await;
        Ok(serde_json::to_value(fundings)?)
    }
}

pub struct GetMarketFundingRateTool;

#[async_trait::async_trait]
impl Tool for GetMarketFundingRateTool {
    fn name(&self) -> &'static str {
        "get_market_funding_rate"
    }

    fn description(&self) -> &'static str {
        "Get funding rate for a specific market on Hyperliquid."
    }

    fn schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "coin": {
                    "type": "string",
                    "description": "The market/coin symbol (e.g., 'BTC', 'ETH')."
                }
            },
            "required": ["coin"]
        })
    }

    async fn call(&self, client: &HyperliquidClient, args: Value) -> Result<Value> {
        let coin = require_coin(&args)?;
        let rate = client.get_market_funding_rate(coin).await;
        Ok(serde_json::to_value(rate)?)
    }
}

pub struct GetNextFundingTimeTool;

#[async_trait::async_trait]
impl Tool for GetNextFundingTimeTool {
    fn name(&self) -> &'static str {
        "get_next_funding_time"
    }

    fn description(&self) -> &'static str {
        "Get next funding time for a specific market on Hyperliquid."
    }

    fn schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "coin": {
                    "type": "string",
                    "description": "The market/coin symbol (e.g., 'BTC', 'ETH')."
                }
            },
            "required": ["coin"]
        })
    }

    async fn call(&self, client: &HyperliquidClient, args: Value) -> Result<Value> {
        let coin = require_coin(&args)?;
        let next = client.get_next_funding_time(coin).await;
        Ok(serde_json::to_value(next)?)
    }
}
