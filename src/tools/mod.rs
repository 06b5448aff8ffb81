pub mod funding;
pub mod markets;
pub mod positions;
pub mod vaults;

use crate::address;
use crate::hyperliquid::HyperliquidClient;
use serde_json::Value;

#[async_trait::async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &'static str;
    fn description(&self) -> &'static str;
    fn schema(&self) -> Value;
    async fn call(&self, client: &HyperliquidClient, args: Value) -> anyhow::Result<Value>;
}

/// Pulls a required address argument, rejecting malformed values before any
/// network call is made.
pub(crate) fn require_address<'a>(args: &'a Value, field: &str) -> anyhow::Result<&'a str> {
    let addr = args[field]
        .as_str()
        .ok_or_else(|| anyhow::anyhow!("Missing {}", field))?;

    if !address::is_valid_address(addr) {
        anyhow::bail!("Invalid address format. Address must be in 0x format.");
    }

    Ok(addr)
}

/// Same as [`require_address`] for an optional argument: absent is fine,
/// present-but-malformed is an error.
pub(crate) fn optional_address<'a>(args: &'a Value, field: &str) -> anyhow::Result<Option<&'a str>> {
    match args.get(field).and_then(Value::as_str) {
        Some(addr) if !address::is_valid_address(addr) => {
            anyhow::bail!("Invalid {} format. Address must be in 0x format.", field)
        }
        other => Ok(other),
    }
}

pub(crate) fn require_coin<'a>(args: &'a Value) -> anyhow::Result<&'a str> {
    args["coin"]
        .as_str()
        .ok_or_else(|| anyhow::anyhow!("Missing coin"))
}
