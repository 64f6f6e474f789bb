// SPDX-FileCopyrightText: 2026 Zenith Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Table registry, column alias normalization, and typed row decoders.
//!
//! Remote sheets are edited by hand, so column headers drift ("Phone
//! Number", "whatsapp", "Tel" all mean the phone column) and cell values
//! arrive as whatever the sheet holds. Normalization maps headers onto
//! canonical keys per table; decoders coerce values and quarantine rows
//! that are missing required fields.

use std::str::FromStr;

use serde_json::Value;
use tracing::warn;

use zenith_core::phone;
use zenith_core::types::{Campaign, Client, KeyRecord, OrderStatus, Product, TemplateRecord};

/// A raw row as returned by the remote endpoint: one JSON object per sheet row.
pub type Row = serde_json::Map<String, Value>;

/// The remote tables the console reads and writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Clients,
    ProductInfo,
    Campaigns,
    Keys,
    Templates,
}

impl Table {
    /// Sheet name as it appears in the remote workbook.
    pub fn sheet_name(&self) -> &'static str {
        match self {
            Table::Clients => "Clients",
            Table::ProductInfo => "Product Info",
            Table::Campaigns => "Campaigns",
            Table::Keys => "Keys",
            Table::Templates => "WhatsApp Templates",
        }
    }
}

/// Lowercase a header and strip all whitespace.
///
/// "Phone Number" and "phonenumber" normalize to the same key. Idempotent.
pub fn normalize_header(key: &str) -> String {
    key.to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect()
}

const CLIENT_NAME_ALIASES: &[&str] = &["client", "clientname", "customer", "name"];
const CLIENT_PHONE_ALIASES: &[&str] = &["phone", "phonenumber", "whatsapp", "tel", "mobile"];
const CLIENT_PRICE_ALIASES: &[&str] = &["price", "amount", "total"];
const CLIENT_STATUS_ALIASES: &[&str] = &["status", "statuses", "orderstatus"];
const KEY_NAME_ALIASES: &[&str] = &["key", "variable", "name"];
const KEY_VALUE_ALIASES: &[&str] = &["value", "secret", "data"];

/// Normalize one raw row's keys onto the canonical vocabulary for a table.
///
/// Clients and Keys carry alias tables; every other table gets plain header
/// normalization. Key-table key cells are additionally lowercased and
/// trimmed so lookups like `whatsapp_access_token` match regardless of how
/// the operator typed them.
pub fn normalize_row(table: Table, raw: &Row) -> Row {
    let mut out = Row::new();
    for (key, value) in raw {
        let clean = normalize_header(key);
        match table {
            Table::Clients => {
                if CLIENT_NAME_ALIASES.contains(&clean.as_str()) {
                    out.insert("client".to_string(), value.clone());
                } else if CLIENT_PHONE_ALIASES.contains(&clean.as_str()) {
                    out.insert("phone".to_string(), value.clone());
                } else if CLIENT_PRICE_ALIASES.contains(&clean.as_str()) {
                    out.insert("price".to_string(), value.clone());
                } else if CLIENT_STATUS_ALIASES.contains(&clean.as_str()) {
                    out.insert("status".to_string(), value.clone());
                } else {
                    out.insert(clean, value.clone());
                }
            }
            Table::Keys => {
                if KEY_NAME_ALIASES.contains(&clean.as_str()) {
                    let canonical = value
                        .as_str()
                        .map(|s| s.to_lowercase().trim().to_string())
                        .unwrap_or_else(|| coerce_string(value));
                    out.insert("key".to_string(), Value::String(canonical));
                } else if KEY_VALUE_ALIASES.contains(&clean.as_str()) {
                    out.insert("value".to_string(), value.clone());
                } else {
                    out.insert(clean, value.clone());
                }
            }
            _ => {
                out.insert(clean, value.clone());
            }
        }
    }
    out
}

/// Coerce any JSON value to its display string. Numbers keep their
/// canonical rendering; null becomes empty.
fn coerce_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

fn get_string(row: &Row, key: &str) -> String {
    row.get(key).map(coerce_string).unwrap_or_default()
}

fn get_f64(row: &Row, key: &str) -> f64 {
    match row.get(key) {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

fn get_u32(row: &Row, key: &str) -> u32 {
    match row.get(key) {
        Some(Value::Number(n)) => n.as_u64().unwrap_or(0) as u32,
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

/// Decode normalized Clients rows into typed records.
///
/// A row with neither a name nor a phone carries nothing actionable and is
/// quarantined (warn + skip).
pub fn decode_clients(rows: &[Row]) -> Vec<Client> {
    let mut out = Vec::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
        let client = get_string(row, "client");
        let raw_phone = get_string(row, "phone");
        if client.trim().is_empty() && raw_phone.trim().is_empty() {
            warn!(row = i, "quarantined Clients row with no name and no phone");
            continue;
        }
        let status = OrderStatus::from_str(get_string(row, "status").trim()).unwrap_or_default();
        out.push(Client {
            client,
            phone: raw_phone,
            city: get_string(row, "city"),
            address: get_string(row, "address"),
            items: get_string(row, "items"),
            qty: get_u32(row, "qty"),
            price: get_f64(row, "price"),
            status,
            note: get_string(row, "note"),
            date: get_string(row, "date"),
        });
    }
    out
}

/// Decode normalized Keys rows. Rows missing the key name are quarantined.
pub fn decode_keys(rows: &[Row]) -> Vec<KeyRecord> {
    let mut out = Vec::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
        let key = get_string(row, "key");
        if key.trim().is_empty() {
            warn!(row = i, "quarantined Keys row with empty key name");
            continue;
        }
        out.push(KeyRecord {
            key,
            value: get_string(row, "value"),
        });
    }
    out
}

/// Decode normalized Product Info rows. Rows with no id and no name are
/// quarantined.
pub fn decode_products(rows: &[Row]) -> Vec<Product> {
    let mut out = Vec::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
        let productid = get_string(row, "productid");
        let productname = get_string(row, "productname");
        if productid.trim().is_empty() && productname.trim().is_empty() {
            warn!(row = i, "quarantined Product Info row with no id and no name");
            continue;
        }
        out.push(Product {
            productid,
            productname,
            price: get_f64(row, "price"),
            description: get_string(row, "description"),
        });
    }
    out
}

/// Decode normalized Campaigns rows. Rows without a campaign id are
/// quarantined.
pub fn decode_campaigns(rows: &[Row]) -> Vec<Campaign> {
    let mut out = Vec::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
        let campaignid = get_string(row, "campaignid");
        if campaignid.trim().is_empty() {
            warn!(row = i, "quarantined Campaigns row with empty campaignid");
            continue;
        }
        out.push(Campaign {
            campaignid,
            name: get_string(row, "name"),
            date: get_string(row, "date"),
            audience: get_string(row, "audience"),
            template: get_string(row, "template"),
            mediaurl: get_string(row, "mediaurl"),
            sent: get_u32(row, "sent"),
            failed: get_u32(row, "failed"),
            opened: get_u32(row, "opened"),
            replied: get_u32(row, "replied"),
            status: get_string(row, "status"),
            sender: get_string(row, "sender"),
        });
    }
    out
}

/// Decode normalized WhatsApp Templates rows. Language defaults to `en_US`.
pub fn decode_templates(rows: &[Row]) -> Vec<TemplateRecord> {
    let mut out = Vec::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
        let name = get_string(row, "name");
        if name.trim().is_empty() {
            warn!(row = i, "quarantined Templates row with empty name");
            continue;
        }
        let language = get_string(row, "language");
        out.push(TemplateRecord {
            name,
            language: if language.trim().is_empty() {
                "en_US".to_string()
            } else {
                language
            },
        });
    }
    out
}

/// Match two phone numbers the way the remote workbook does.
///
/// Equal after normalization, or equal in their last 9 digits when both
/// sides have at least 9. The suffix rule can collide across country
/// codes for short national numbers; kept for parity with the remote
/// lookup scripts.
pub fn fuzzy_phone_match(a: &str, b: &str) -> bool {
    let a = phone::normalize(a);
    let b = phone::normalize(b);
    if a == b && !a.is_empty() {
        return true;
    }
    if a.len() >= 9 && b.len() >= 9 {
        return a[a.len() - 9..] == b[b.len() - 9..];
    }
    false
}
