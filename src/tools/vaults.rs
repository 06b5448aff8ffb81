use super::{optional_address, require_address, Tool};
use crate::hyperliquid::HyperliquidClient;
use crate::vault;
use anyhow::Result;
use serde_json::{json, Value};

pub struct GetVaultDetailsTool;

#[async_trait::async_trait]
impl Tool for GetVaultDetailsTool {
    fn name(&self) -> &'static str {
        "get_vault_details"
    }

    fn description(&self) -> &'static str {
        "Get detailed information about a specific vault on Hyperliquid."
    }

    fn schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "vault_address": {
                    "type": "string",
                    "description": "The vault address (0x format)."
                },
                "user_address": {
                    "type": "string",
                    "description": "Optional user address to get user-specific vault data."
                }
            },
            "required": ["vault_address"]
        })
    }

    async fn call(&self, client: &HyperliquidClient, args: Value) -> Result<Value> {
        let vault_address = require_address(&args, "vault_address")?;
        let user = optional_address(&args, "user_address")?;
        let details = client.get_vault_details(vault_address, user).await;
        Ok(serde_json::to_value(details)?)
    }
}

pub struct GetUserVaultEquitiesTool;

#[async_trait::async_trait]
impl Tool for GetUserVaultEquitiesTool {
    fn name(&self) -> &'static str {
        "get_user_vault_equities"
    }

    fn description(&self) -> &'static str {
        "Get a user's vault equities/deposits on Hyperliquid."
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
        let equities = client.get_user_vault_equities(user).await;
        Ok(serde_json::to_value(equities)?)
    }
}

pub struct GetUserSubAccountsTool;

#[async_trait::async_trait]
impl Tool for GetUserSubAccountsTool {
    fn name(&self) -> &'static str {
        "get_user_sub_accounts"
    }

    fn description(&self) -> &'static str {
        "Get user's subaccounts on Hyperliquid."
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
        let accounts = client.get_user_sub_accounts(user).await;
        Ok(Value::Array(accounts))
    }
}

pub struct CalculateVaultMetricsTool;

#[async_trait::async_trait]
impl Tool for CalculateVaultMetricsTool {
    fn name(&self) -> &'static str {
        "calculate_vault_metrics"
    }

    fn description(&self) -> &'static str {
        "Calculate performance metrics for a vault on Hyperliquid."
    }

    fn schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "vault_address": {
                    "type": "string",
                    "description": "The vault address (0x format)."
                }
            },
            "required": ["vault_address"]
        })
    }

    async fn call(&self, client: &HyperliquidClient, args: Value) -> Result<Value> {
        let vault_address = require_address(&args, "vault_address")?;
        let details = client
            .get_vault_details(vault_address, None)
            .await
            .ok_or_else(|| anyhow::anyhow!("Vault not found or invalid vault address."))?;
        let metrics = vault::calculate_vault_metrics(&details);
        Ok(serde_json::to_value(metrics)?)
    }
}

pub struct GetVaultPortfolioDataTool;

#[async_trait::async_trait]
impl Tool for GetVaultPortfolioDataTool {
    fn name(&self) -> &'static str {
        "get_vault_portfolio_data"
    }

    fn description(&self) -> &'static str {
        "Get portfolio performance data for a vault on Hyperliquid."
    }

    fn schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "vault_address": {
                    "type": "string",
                    "description": "The vault address (0x format)."
                }
            },
            "required": ["vault_address"]
        })
    }

    async fn call(&self, client: &HyperliquidClient, args: Value) -> Result<Value> {
        let vault_address = require_address(&args, "vault_address")?;
        let details = client
            .get_vault_details(vault_address, None)
            .await
            .ok_or_else(|| anyhow::anyhow!("Vault not found or invalid vault address."))?;
        let portfolio = vault::vault_portfolio_data(&details);
        Ok(serde_json::to_value(portfolio)?)
    }
}

pub struct IsValidVaultAddressTool;

#[async_trait::async_trait]
impl Tool for IsValidVaultAddressTool {
    fn name(&self) -> &'static str {
        "is_valid_vault_address"
    }

    fn description(&self) -> &'static str {
        "Check if an address is a valid vault address on Hyperliquid."
    }

    fn schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "address": {
                    "type": "string",
                    "description": "The address to validate as a vault address."
                }
            },
            "required": ["address"]
        })
    }

    async fn call(&self, client: &HyperliquidClient, args: Value) -> Result<Value> {
        let addr = args["address"]
            .as_str()
            .ok_or_else(|| anyhow::anyhow!("Missing address"))?;
        let is_valid = client.is_valid_vault_address(addr).await;
        Ok(json!({ "address": addr, "isValidVault": is_valid }))
    }
}

pub struct GetVaultStrategiesTool;

#[async_trait::async_trait]
impl Tool for GetVaultStrategiesTool {
    fn name(&self) -> &'static str {
        "get_vault_strategies"
    }

    fn description(&self) -> &'static str {
        "Get vault strategies (child addresses) for a vault on Hyperliquid."
    }

    fn schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "vault_address": {
                    "type": "string",
                    "description": "The vault address (0x format)."
                }
            },
            "required": ["vault_address"]
        })
    }

    async fn call(&self, client: &HyperliquidClient, args: Value) -> Result<Value> {
        let vault_address = require_address(&args, "vault_address")?;
        let details = client
            .get_vault_details(vault_address, None)
            .await
            .ok_or_else(|| anyhow::anyhow!("Vault not found or invalid vault address."))?;
        let strategies = vault::vault_strategies(&details);
        let has_strategies = vault::has_vault_strategies(&details);
        let count = strategies.len();
        Ok(json!({
            "vaultAddress": vault_address,
            "strategies": strategies,
            "hasStrategies": has_strategies,
            "strategiesCount": count
        }))
    }
}
