// SPDX-FileCopyrightText: 2026 Zenith Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `zenith campaigns` command implementation.

use zenith_bridge::BridgeClient;
use zenith_config::model::ZenithConfig;
use zenith_core::ZenithError;

/// Run the `zenith campaigns` command.
///
/// Lists recorded campaigns. With `--json`, outputs structured JSON for
/// scripting.
pub async fn run_campaigns(config: &ZenithConfig, json: bool) -> Result<(), ZenithError> {
    let bridge = BridgeClient::new(&config.bridge)?;
    let campaigns = bridge.fetch_campaigns().await;

    if json {
        let rendered = serde_json::to_string_pretty(&campaigns)
            .map_err(|e| ZenithError::Internal(format!("encoding campaigns: {e}")))?;
        println!("{rendered}");
        return Ok(());
    }

    println!();
    println!(
        "  {:<16} {:<30} {:<12} {:>5} {:>7}  {}",
        "Campaign", "Name", "Date", "Sent", "Failed", "Status"
    );
    println!("  {}", "-".repeat(82));

    for campaign in &campaigns {
        println!(
            "  {:<16} {:<30} {:<12} {:>5} {:>7}  {}",
            campaign.campaignid,
            campaign.name,
            campaign.date,
            campaign.sent,
            campaign.failed,
            campaign.status
        );
    }

    println!();
    println!("  {} campaign(s)", campaigns.len());
    println!();
    Ok(())
}
