// SPDX-FileCopyrightText: 2026 Zenith Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `zenith clients` command implementation.

use std::io::IsTerminal;

use zenith_bridge::BridgeClient;
use zenith_config::model::ZenithConfig;
use zenith_core::ZenithError;
use zenith_core::types::OrderStatus;

/// Run the `zenith clients` command.
///
/// Lists decoded client records. With `--json`, outputs structured JSON
/// for scripting.
pub async fn run_clients(config: &ZenithConfig, json: bool) -> Result<(), ZenithError> {
    let bridge = BridgeClient::new(&config.bridge)?;
    let clients = bridge.fetch_clients().await;

    if json {
        let rendered = serde_json::to_string_pretty(&clients)
            .map_err(|e| ZenithError::Internal(format!("encoding clients: {e}")))?;
        println!("{rendered}");
        return Ok(());
    }

    let use_color = std::io::stdout().is_terminal();

    println!();
    println!(
        "  {:<20} {:<15} {:<12} {:>8}  {}",
        "Client", "Phone", "City", "Price", "Status"
    );
    println!("  {}", "-".repeat(66));

    for client in &clients {
        let status = client.status.to_string();
        let status = if use_color {
            use colored::Colorize;
            match client.status {
                OrderStatus::Delivered | OrderStatus::Confirmed => status.green().to_string(),
                OrderStatus::Cancelled => status.red().to_string(),
                OrderStatus::Pending => status.yellow().to_string(),
                OrderStatus::New => status,
            }
        } else {
            status
        };
        println!(
            "  {:<20} {:<15} {:<12} {:>8.2}  {}",
            client.client,
            client.normalized_phone(),
            client.city,
            client.price,
            status
        );
    }

    println!();
    println!("  {} client(s)", clients.len());
    println!();
    Ok(())
}
