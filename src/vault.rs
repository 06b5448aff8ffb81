use crate::types::{PortfolioData, VaultDetails, VaultMetrics};
use std::collections::BTreeMap;

/// Sums decimal strings as floats. A string that fails to parse contributes
/// NaN, which poisons the whole sum (and serializes as JSON null) rather
/// than failing the call.
fn sum_decimal_strings<'a>(values: impl Iterator<Item = &'a str>) -> f64 {
    values.map(|v| v.parse::<f64>().unwrap_or(f64::NAN)).sum()
}

/// Aggregates follower equity and pnl for a vault. Returns `None` when the
/// vault has no portfolio history. Display values stay on the descriptor;
/// only these aggregates are parsed to floats.
pub fn calculate_vault_metrics(details: &VaultDetails) -> Option<VaultMetrics> {
    if details.portfolio.is_empty() {
        return None;
    }

    let followers = &details.followers;
    let average_days_following = if followers.is_empty() {
        0.0
    } else {
        followers.iter().map(|f| f.days_following as f64).sum::<f64>() / followers.len() as f64
    };

    Some(VaultMetrics {
        total_followers: followers.len(),
        total_equity: sum_decimal_strings(followers.iter().map(|f| f.vault_equity.as_str())),
        average_days_following,
        total_pnl: sum_decimal_strings(followers.iter().map(|f| f.pnl.as_str())),
        total_all_time_pnl: sum_decimal_strings(followers.iter().map(|f| f.all_time_pnl.as_str())),
        apr: details.apr,
        leader_commission: details.leader_commission,
        is_accepting_deposits: details.allow_deposits,
        is_closed: details.is_closed,
    })
}

/// Reshapes the `[period, data]` portfolio pairs into a map keyed by period
/// label. Missing history arrays default to empty and missing volume to
/// `"0.0"`. Returns `None` when there is no history at all.
pub fn vault_portfolio_data(details: &VaultDetails) -> Option<BTreeMap<String, PortfolioData>> {
    if details.portfolio.is_empty() {
        return None;
    }

    let data = details
        .portfolio
        .iter()
        .map(|entry| {
            let period = entry.0.clone();
            let history = &entry.1;
            (
                period,
                PortfolioData {
                    account_value_history: history.account_value_history.clone().unwrap_or_default(),
                    pnl_history: history.pnl_history.clone().unwrap_or_default(),
                    volume: history.vlm.clone().unwrap_or_else(|| "0.0".to_string()),
                },
            )
        })
        .collect();

    Some(data)
}

/// Child vault addresses ("strategies") of a parent vault; empty for
/// non-parent vaults or when no children are listed.
pub fn vault_strategies(details: &VaultDetails) -> Vec<String> {
    match &details.relationship {
        Some(rel) if rel.kind == "parent" => rel
            .data
            .as_ref()
            .and_then(|data| data.child_addresses.clone())
            .unwrap_or_default(),
        _ => Vec::new(),
    }
}

pub fn has_vault_strategies(details: &VaultDetails) -> bool {
    !vault_strategies(details).is_empty()
}
