use super::{require_address, require_coin, Tool};
use crate::hyperliquid::HyperliquidClient;
use anyhow::Result;
use serde_json::{json, Value};

pub struct GetTraderPositionsTool;

#[async_trait::async_trait]
impl Tool for GetTraderPositionsTool {
    fn name(&self) -> &'static str {
        "get_trader_positions"
    }

    fn description(&self) -> &'static str {
        "Get all positions for a specific trader on Hyperliquid."
    }

    fn schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "user_address": {
                    "type": "string",
                    "description": "The trader's wallet address (0x format)."
                }
            },
            "required": ["user_address"]
        })
    }

    async fn call(&self, client: &HyperliquidClient, args: Value) -> Result<Value> {
        let user = require_address(&args, "user_address")?;
        let positions = client.get_trader_positions(user).await;
        Ok(serde_json::to_value(positions)?)
    }
}

pub struct GetTraderPositionForMarketTool;

#[async_trait::async_trait]
impl Tool for GetTraderPositionForMarketTool {
    fn name(&self) -> &'static str {
        "get_trader_position_for_market"
    }

    fn description(&self) -> &'static str {
        "Get a trader's position for a specific market/coin on Hyperliquid."
    }

    fn schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "user_address": {
                    "type": "string",
                    "description": "The trader's wallet address (0x format)."
                },
                "coin": {
                    "type": "string",
                    "description": "The market/coin symbol (e.g., 'BTC', 'ETH')."
                }
            },
            "required": ["user_address", "coin"]
        })
    }

    async fn call(&self, client: &HyperliquidClient, args: Value) -> Result<Value> {
        let user = require_address(&args, "user_address")?;
        let coin = require_coin(&args)?;
        let position = client.get_trader_position_for_market(user, coin).await;
        Ok(serde_json::to_value(position)?)
    }
}

pub struct GetOpenOrdersTool;

#[async_trait::async_trait]
impl Tool for GetOpenOrdersTool {
    fn name(&self) -> &'static str {
        "get_open_orders"
    }

    fn description(&self) -> &'static str {
        "Get open orders for a trader on Hyperliquid."
    }

    fn schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "user_address": {
                    "type": "string",
                    "description": "The trader's wallet address (0x format)."
                }
            },
            "required": ["user_address"]
        })
    }

    async fn call(&self, client: &HyperliquidClient, args: Value) -> Result<Value> {
        let user = require_address(&args, "user_address")?;
        let orders = client.get_open_orders(user).await;
        Ok(Value::Array(orders))
    }
}

pub struct GetUserFillsTool;

#[async_trait::async_trait]
impl Tool for GetUserFillsTool {
    fn name(&self) -> &'static str {
        "get_user_fills"
    }

    fn description(&self) -> &'static str {
        "Get trading history (fills) for a user on Hyperliquid."
    }

    fn schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "user_address": {
                    "type": "string",
                    "description": "The user's wallet address (0x format)."
                }
            },
            "required": ["user_address"]
        })
    }

    async fn call(&self, client: &HyperliquidClient, args: Value) -> Result<Value> {
        let user = require_address(&args, "user_address")?;
        let fills = client.get_user_fills(user).await;
        Ok(Value::Array(fills))
    }
}
