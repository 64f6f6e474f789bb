// SPDX-FileCopyrightText: 2026 Zenith Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Built-in demo datasets served when no bridge URL is configured or the
//! remote endpoint is unreachable.

use serde_json::json;

use crate::schema::{Row, Table};

/// Fallback rows for a table, in raw (un-normalized) form.
pub fn rows(table: Table) -> Vec<Row> {
    let values = match table {
        Table::Clients => vec![json!({
            "client": "Demo User",
            "phone": "212600000000",
            "price": 0,
            "status": "New"
        })],
        Table::Templates => vec![json!({
            "name": "hello_world",
            "language": "en_US"
        })],
        Table::ProductInfo | Table::Campaigns | Table::Keys => vec![],
    };
    values
        .into_iter()
        .filter_map(|v| v.as_object().cloned())
        .collect()
}
