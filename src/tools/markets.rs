use super::{require_coin, Tool};
use crate::hyperliquid::HyperliquidClient;
use anyhow::Result;
use serde_json::{json, Value};

pub struct GetMarketsTool;

#[async_trait::async_trait]
impl Tool for GetMarketsTool {
    fn name(&self) -> &'static str {
        "get_markets"
    }

    fn description(&self) -> &'static str {
        "Get all available markets/assets on Hyperliquid."
    }

    fn schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {}
        })
    }

    async fn call(&self, client: &HyperliquidClient, _args: Value) -> Result<Value> {
        let markets = client.get_markets().await;
        Ok(serde_json::to_value(markets)?)
    }
}

pub struct GetMarketPriceTool;

#[async_trait::async_trait]
impl Tool for GetMarketPriceTool {
    fn name(&self) -> &'static str {
        "get_market_price"
    }

    fn description(&self) -> &'static str {
        "Get current price for a specific market on Hyperliquid."
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
        let price = client.get_market_price(coin).await;
        Ok(json!({ "coin": coin, "price": price }))
    }
}

pub struct GetMetaTool;

#[async_trait::async_trait]
impl Tool for GetMetaTool {
    fn name(&self) -> &'static str {
        "get_meta"
    }

    fn description(&self) -> &'static str {
        "Get meta information about the Hyperliquid exchange."
    }

    fn schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {}
        })
    }

    async fn call(&self, client: &HyperliquidClient, _args: Value) -> Result<Value> {
        let meta = client.get_meta().await;
        Ok(serde_json::to_value(meta)?)
    }
}

pub struct GetAllMidsTool;

#[async_trait::async_trait]
impl Tool for GetAllMidsTool {
    fn name(&self) -> &'static str {
        "get_all_mids"
    }

    fn description(&self) -> &'static str {
        "Get all current mid prices on Hyperliquid."
    }

    fn schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {}
        })
    }

    async fn call(&self, client: &HyperliquidClient, _args: Value) -> Result<Value> {
        let mids = client.get_all_mids().await;
        Ok(serde_json::to_value(mids)?)
    }
}
