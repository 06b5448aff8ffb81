use hyperliquid_mcp::{
    address::{format_address, is_valid_address},
    hyperliquid::{
        market_funding_rate, market_index, next_funding_time, position_for_market,
        HyperliquidClient,
    },
    tools::{
        positions::GetTraderPositionsTool,
        vaults::{GetVaultDetailsTool, GetVaultStrategiesTool},
        Tool,
    },
    types::{AllMids, ClearinghouseState, MetaAndAssetCtxs, PredictedFunding, VaultDetails},
    vault::{calculate_vault_metrics, has_vault_strategies, vault_portfolio_data, vault_strategies},
};
use serde_json::json;

fn setup_client() -> HyperliquidClient {
    HyperliquidClient::new(false).expect("Failed to create Hyperliquid client")
}

const VALID_ADDRESS: &str = "0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045";

#[test]
fn test_is_valid_address() {
    assert!(is_valid_address(VALID_ADDRESS));
    assert!(is_valid_address(&VALID_ADDRESS.to_lowercase()));
    assert!(is_valid_address("0x0000000000000000000000000000000000000000"));

    assert!(!is_valid_address("0x123"));
    assert!(!is_valid_address("not-an-address"));
    assert!(!is_valid_address("d8dA6BF26964aF9D7eEd9e03E53415D37aA96045")); // no prefix
    assert!(!is_valid_address("0xd8dA6BF26964aF9D7eEd9e03E53415D37aA9604")); // 39 digits
    assert!(!is_valid_address("0xd8dA6BF26964aF9D7eEd9e03E53415D37aA960455")); // 41 digits
    assert!(!is_valid_address("0xg8dA6BF26964aF9D7eEd9e03E53415D37aA96045")); // non-hex
    assert!(!is_valid_address(""));
}

#[test]
fn test_format_address_preserves_case() {
    // Valid input comes back verbatim, never lower-cased.
    assert_eq!(format_address(VALID_ADDRESS), Some(VALID_ADDRESS));
    assert_eq!(format_address("0x123"), None);
}

fn sample_meta_and_ctxs() -> MetaAndAssetCtxs {
    serde_json::from_value(json!([
        {
            "universe": [
                { "name": "BTC", "szDecimals": 5, "maxLeverage": 50 },
                { "name": "SOL", "szDecimals": 2, "maxLeverage": 20, "onlyIsolated": true },
                { "name": "ETH", "szDecimals": 4, "maxLeverage": 50 }
            ]
        },
        [
            { "funding": "0.0000125", "premium": "0.0001", "markPx": "97000.0", "oraclePx": "96990.0" },
            { "funding": "-0.0000031", "premium": null, "markPx": "140.25", "oraclePx": "140.3" },
            { "funding": "0.0000100", "premium": "0.00005", "markPx": "3200.5", "oraclePx": "3199.9" }
        ]
    ]))
    .expect("Failed to parse metaAndAssetCtxs fixture")
}

#[test]
fn test_market_index_is_case_insensitive() {
    let MetaAndAssetCtxs(meta, _) = sample_meta_and_ctxs();

    assert_eq!(market_index(&meta.universe, "btc"), Some(0));
    assert_eq!(market_index(&meta.universe, "BTC"), Some(0));
    assert_eq!(market_index(&meta.universe, "eTh"), Some(2));
    assert_eq!(market_index(&meta.universe, "DOGE"), None);
}

#[test]
fn test_market_funding_rate_uppercases_coin() {
    let MetaAndAssetCtxs(meta, ctxs) = sample_meta_and_ctxs();

    let rate = market_funding_rate(&meta.universe, &ctxs, "eth").unwrap();
    assert_eq!(rate.coin, "ETH");
    assert_eq!(rate.current_funding, "0.0000100");
    assert_eq!(rate.mark_price, "3200.5");
    assert_eq!(rate.oracle_price, "3199.9");

    // Positional alignment: SOL sits at index 1 with a null premium.
    let rate = market_funding_rate(&meta.universe, &ctxs, "sol").unwrap();
    assert_eq!(rate.coin, "SOL");
    assert_eq!(rate.premium, None);

    assert!(market_funding_rate(&meta.universe, &ctxs, "DOGE").is_none());
}

#[test]
fn test_market_funding_rate_checks_context_bounds() {
    let MetaAndAssetCtxs(meta, ctxs) = sample_meta_and_ctxs();

    // A universe longer than the context array must not panic.
    assert!(market_funding_rate(&meta.universe, &ctxs[..1], "eth").is_none());
}

#[test]
fn test_next_funding_time_finds_hlperp_venue() {
    let predicted: Vec<PredictedFunding> = serde_json::from_value(json!([
        [
            "ETH",
            [
                ["BinPerp", { "fundingRate": "0.00001", "nextFundingTime": 1700000000000u64 }],
                ["HlPerp", { "fundingRate": "0.0000125", "nextFundingTime": 1700003600000u64 }]
            ]
        ],
        ["SOL", [["BinPerp", { "fundingRate": "0.00002", "nextFundingTime": 1700000000000u64 }]]],
        ["ATOM", [["HlPerp", null]]]
    ]))
    .expect("Failed to parse predictedFundings fixture");

    let next = next_funding_time(&predicted, "eth").unwrap();
    assert_eq!(next.next_funding_time, 1700003600000);
    assert_eq!(next.funding_rate, "0.0000125");

    // Coin present but no HlPerp venue.
    assert!(next_funding_time(&predicted, "SOL").is_none());
    // Venue present but its data is null.
    assert!(next_funding_time(&predicted, "ATOM").is_none());
    // Coin absent entirely.
    assert!(next_funding_time(&predicted, "DOGE").is_none());
}

#[test]
fn test_all_mids_object_and_array_shapes() {
    let MetaAndAssetCtxs(meta, _) = sample_meta_and_ctxs();
    let eth = market_index(&meta.universe, "eth").unwrap();

    let by_coin: AllMids =
        serde_json::from_value(json!({ "BTC": "97000.0", "SOL": "140.25", "ETH": "3200.5" }))
            .unwrap();
    assert_eq!(by_coin.price_for(eth, "eth"), Some("3200.5"));
    assert_eq!(by_coin.price_for(eth, "DOGE"), None);

    let by_index: AllMids =
        serde_json::from_value(json!(["97000.0", "140.25", "3200.5"])).unwrap();
    assert_eq!(by_index.price_for(eth, "eth"), Some("3200.5"));
    assert_eq!(by_index.price_for(99, "eth"), None);
}

#[test]
fn test_position_for_market_handles_both_layouts() {
    // Nested layout: coin lives under `position`.
    let nested: ClearinghouseState = serde_json::from_value(json!({
        "assetPositions": [
            { "type": "oneWay", "position": { "coin": "BTC", "szi": "0.5", "entryPx": "95000.0" } },
            { "type": "oneWay", "position": { "coin": "ETH", "szi": "-2.0", "entryPx": "3100.0" } }
        ],
        "marginSummary": { "accountValue": "12345.6" }
    }))
    .unwrap();

    let pos = position_for_market(nested.clone(), "eth").unwrap();
    assert_eq!(pos.coin(), Some("ETH"));

    // No matching coin returns the sentinel rather than failing.
    assert!(position_for_market(nested, "DOGE").is_none());

    // Flat layout: coin sits directly on the entry.
    let flat: ClearinghouseState = serde_json::from_value(json!({
        "assetPositions": [{ "coin": "SOL", "szi": "10.0" }]
    }))
    .unwrap();

    let pos = position_for_market(flat, "sol").unwrap();
    assert_eq!(pos.coin(), Some("SOL"));
}

fn sample_vault(portfolio: serde_json::Value, followers: serde_json::Value) -> VaultDetails {
    serde_json::from_value(json!({
        "name": "Test Vault",
        "vaultAddress": "0x1234567890abcdef1234567890abcdef12345678",
        "leader": "0xabcdefabcdefabcdefabcdefabcdefabcdefabcd",
        "description": "A vault",
        "portfolio": portfolio,
        "apr": 0.42,
        "followerState": null,
        "leaderFraction": 0.05,
        "leaderCommission": 0.1,
        "followers": followers,
        "maxDistributable": 1000.0,
        "maxWithdrawable": 900.0,
        "isClosed": false,
        "relationship": { "type": "normal" },
        "allowDeposits": true,
        "alwaysCloseOnWithdraw": false
    }))
    .expect("Failed to parse vault fixture")
}

fn follower(user: &str, equity: &str, pnl: &str, all_time_pnl: &str, days: u64) -> serde_json::Value {
    json!({
        "user": user,
        "vaultEquity": equity,
        "pnl": pnl,
        "allTimePnl": all_time_pnl,
        "daysFollowing": days,
        "vaultEntryTime": 1690000000000u64,
        "lockupUntil": 1700000000000u64
    })
}

#[test]
fn test_vault_metrics_zero_followers() {
    let vault = sample_vault(
        json!([["day", { "accountValueHistory": [], "pnlHistory": [], "vlm": "0.0" }]]),
        json!([]),
    );

    let metrics = calculate_vault_metrics(&vault).unwrap();
    assert_eq!(metrics.total_followers, 0);
    assert_eq!(metrics.average_days_following, 0.0);
    assert_eq!(metrics.total_equity, 0.0);
    assert_eq!(metrics.total_pnl, 0.0);
    assert_eq!(metrics.total_all_time_pnl, 0.0);
    assert_eq!(metrics.apr, 0.42);
    assert!(metrics.is_accepting_deposits);
    assert!(!metrics.is_closed);
}

#[test]
fn test_vault_metrics_sums_followers() {
    let vault = sample_vault(
        json!([["day", { "accountValueHistory": [], "pnlHistory": [], "vlm": "5.0" }]]),
        json!([
            follower("0x1111111111111111111111111111111111111111", "100.5", "10.0", "25.0", 10),
            follower("0x2222222222222222222222222222222222222222", "200.0", "-5.5", "5.0", 30)
        ]),
    );

    let metrics = calculate_vault_metrics(&vault).unwrap();
    assert_eq!(metrics.total_followers, 2);
    assert_eq!(metrics.total_equity, 300.5);
    assert_eq!(metrics.total_pnl, 4.5);
    assert_eq!(metrics.total_all_time_pnl, 30.0);
    assert_eq!(metrics.average_days_following, 20.0);
}

#[test]
fn test_vault_metrics_empty_portfolio_is_none() {
    let vault = sample_vault(json!([]), json!([]));
    assert!(calculate_vault_metrics(&vault).is_none());
}

#[test]
fn test_vault_metrics_nan_propagates_on_bad_decimal() {
    let vault = sample_vault(
        json!([["day", {}]]),
        json!([follower("0x1111111111111111111111111111111111111111", "not-a-number", "1.0", "1.0", 5)]),
    );

    let metrics = calculate_vault_metrics(&vault).unwrap();
    // An unparseable equity poisons the sum instead of failing the call.
    assert!(metrics.total_equity.is_nan());
    assert_eq!(metrics.total_pnl, 1.0);

    // NaN renders as JSON null, matching the upstream serialization.
    let rendered = serde_json::to_value(&metrics).unwrap();
    assert!(rendered["totalEquity"].is_null());
}

#[test]
fn test_vault_portfolio_data_defaults() {
    let vault = sample_vault(
        json!([
            ["day", { "accountValueHistory": [[1, "100.0"]], "pnlHistory": [[1, "5.0"]], "vlm": "42.0" }],
            ["allTime", {}]
        ]),
        json!([]),
    );

    let data = vault_portfolio_data(&vault).unwrap();
    assert_eq!(data["day"].volume, "42.0");
    assert_eq!(data["day"].account_value_history.len(), 1);

    // Missing histories default to empty, missing volume to "0.0".
    assert_eq!(data["allTime"].volume, "0.0");
    assert!(data["allTime"].account_value_history.is_empty());
    assert!(data["allTime"].pnl_history.is_empty());

    let empty = sample_vault(json!([]), json!([]));
    assert!(vault_portfolio_data(&empty).is_none());
}

#[test]
fn test_vault_strategies_requires_parent_relationship() {
    let non_parent = sample_vault(json!([]), json!([]));
    assert!(vault_strategies(&non_parent).is_empty());
    assert!(!has_vault_strategies(&non_parent));

    let parent: VaultDetails = serde_json::from_value(json!({
        "name": "Parent Vault",
        "vaultAddress": "0x1234567890abcdef1234567890abcdef12345678",
        "leader": "0xabcdefabcdefabcdefabcdefabcdefabcdefabcd",
        "description": "",
        "portfolio": [],
        "followers": [],
        "relationship": {
            "type": "parent",
            "data": { "childAddresses": ["0x3333333333333333333333333333333333333333"] }
        }
    }))
    .unwrap();

    let strategies = vault_strategies(&parent);
    assert_eq!(strategies.len(), 1);
    assert!(has_vault_strategies(&parent));

    // Parent with no child list still yields the empty sentinel.
    let childless: VaultDetails = serde_json::from_value(json!({
        "name": "Parent Vault",
        "vaultAddress": "0x1234567890abcdef1234567890abcdef12345678",
        "leader": "0xabcdefabcdefabcdefabcdefabcdefabcdefabcd",
        "relationship": { "type": "parent" }
    }))
    .unwrap();
    assert!(vault_strategies(&childless).is_empty());
}

#[tokio::test]
async fn test_tool_rejects_invalid_address_before_network() {
    let client = setup_client();
    let tool = GetTraderPositionsTool;

    let args = json!({ "user_address": "invalid-address" });
    let result = tool.call(&client, args).await;

    let err = result.expect_err("Expected error for invalid address");
    assert!(err.to_string().contains("Invalid address format"));
}

#[tokio::test]
async fn test_tool_rejects_missing_address() {
    let client = setup_client();
    let tool = GetTraderPositionsTool;

    let result = tool.call(&client, json!({})).await;
    assert!(result.is_err(), "Expected error for missing address");
}

#[tokio::test]
async fn test_vault_details_rejects_bad_optional_user() {
    let client = setup_client();
    let tool = GetVaultDetailsTool;

    // Valid vault address, malformed optional user address.
    let args = json!({
        "vault_address": "0x1234567890abcdef1234567890abcdef12345678",
        "user_address": "0xnope"
    });
    let result = tool.call(&client, args).await;
    assert!(result.is_err(), "Expected error for malformed user address");
}

#[tokio::test]
async fn test_vault_strategies_tool_validates_address() {
    let client = setup_client();
    let tool = GetVaultStrategiesTool;

    let result = tool.call(&client, json!({ "vault_address": "0x123" })).await;
    let err = result.expect_err("Expected error for short address");
    assert!(err.to_string().contains("Invalid address format"));
}
