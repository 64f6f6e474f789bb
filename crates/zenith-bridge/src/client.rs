// SPDX-FileCopyrightText: 2026 Zenith Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the Apps Script tabular bridge.
//!
//! Reads use `GET <url>?action=read&sheet=<name>`; mutations POST a JSON
//! envelope. The endpoint only accepts `text/plain;charset=utf-8` bodies
//! (Apps Script rejects preflighted content types), so mutations serialize
//! JSON under that content type.
//!
//! Reads never fail: any transport or remote error falls back to the
//! built-in demo datasets so the console stays usable offline.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use zenith_config::model::BridgeConfig;
use zenith_core::ZenithError;
use zenith_core::traits::CampaignRecorder;
use zenith_core::types::{Campaign, Client, KeyRecord, Product, TemplateRecord};

use crate::fallback;
use crate::schema::{self, Row, Table};

/// Result of a bridge mutation (create/update/delete).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub ok: bool,
    pub error: Option<String>,
}

impl Outcome {
    fn success() -> Self {
        Self { ok: true, error: None }
    }

    fn failure(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            error: Some(error.into()),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ReadResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    data: Option<Vec<Row>>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MutationResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Serialize)]
struct MutationRequest<'a> {
    action: &'static str,
    sheet: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<&'a Value>,
    #[serde(rename = "idKey", skip_serializing_if = "Option::is_none")]
    id_key: Option<&'a str>,
    #[serde(rename = "idValue", skip_serializing_if = "Option::is_none")]
    id_value: Option<&'a Value>,
}

/// Client for the tabular data bridge.
///
/// An unconfigured URL (`bridge.url` unset) runs in demo mode: reads serve
/// fallback datasets, create/update report trivial success, delete reports
/// failure.
#[derive(Debug, Clone)]
pub struct BridgeClient {
    http: reqwest::Client,
    url: Option<String>,
}

impl BridgeClient {
    pub fn new(config: &BridgeConfig) -> Result<Self, ZenithError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ZenithError::Bridge {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;
        Ok(Self {
            http,
            url: config.url.clone(),
        })
    }

    /// True when a remote endpoint is configured.
    pub fn is_connected(&self) -> bool {
        self.url.is_some()
    }

    /// Fetch all rows of a table, normalized. Never errors: unconfigured
    /// URL, transport failure, or a remote-side error all serve the
    /// table's fallback dataset.
    pub async fn fetch_rows(&self, table: Table) -> Vec<Row> {
        let raw = match &self.url {
            Some(url) => match self.fetch_remote(url, table).await {
                Ok(rows) => rows,
                Err(e) => {
                    warn!(sheet = table.sheet_name(), error = %e, "bridge read failed, serving fallback data");
                    fallback::rows(table)
                }
            },
            None => {
                debug!(sheet = table.sheet_name(), "no bridge URL configured, serving fallback data");
                fallback::rows(table)
            }
        };
        raw.iter().map(|r| schema::normalize_row(table, r)).collect()
    }

    async fn fetch_remote(&self, url: &str, table: Table) -> Result<Vec<Row>, ZenithError> {
        let response = self
            .http
            .get(url)
            .query(&[("action", "read"), ("sheet", table.sheet_name())])
            .send()
            .await
            .map_err(|e| ZenithError::Bridge {
                message: format!("read request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| ZenithError::Bridge {
            message: format!("failed to read response body: {e}"),
            source: Some(Box::new(e)),
        })?;
        if !status.is_success() {
            return Err(ZenithError::Bridge {
                message: format!("bridge returned {status}: {body}"),
                source: None,
            });
        }

        let parsed: ReadResponse =
            serde_json::from_str(&body).map_err(|e| ZenithError::Bridge {
                message: format!("failed to parse bridge response: {e}"),
                source: Some(Box::new(e)),
            })?;

        if !parsed.success {
            return Err(ZenithError::Bridge {
                message: parsed
                    .error
                    .unwrap_or_else(|| "bridge reported failure".to_string()),
                source: None,
            });
        }

        Ok(parsed.data.unwrap_or_default())
    }

    /// Append a row to a table.
    pub async fn create_row(&self, table: Table, data: &Value) -> Outcome {
        let Some(url) = &self.url else {
            return Outcome::success();
        };
        self.post_mutation(
            url,
            &MutationRequest {
                action: "create",
                sheet: table.sheet_name(),
                data: Some(data),
                id_key: None,
                id_value: None,
            },
        )
        .await
    }

    /// Update the first row where `id_key == id_value`.
    pub async fn update_row(
        &self,
        table: Table,
        data: &Value,
        id_key: &str,
        id_value: &Value,
    ) -> Outcome {
        let Some(url) = &self.url else {
            return Outcome::success();
        };
        self.post_mutation(
            url,
            &MutationRequest {
                action: "update",
                sheet: table.sheet_name(),
                data: Some(data),
                id_key: Some(id_key),
                id_value: Some(id_value),
            },
        )
        .await
    }

    /// Delete the first row where `id_key == id_value`. Demo mode cannot
    /// delete and reports failure.
    pub async fn delete_row(&self, table: Table, id_key: &str, id_value: &Value) -> Outcome {
        let Some(url) = &self.url else {
            return Outcome::failure("no bridge URL configured");
        };
        self.post_mutation(
            url,
            &MutationRequest {
                action: "delete",
                sheet: table.sheet_name(),
                data: None,
                id_key: Some(id_key),
                id_value: Some(id_value),
            },
        )
        .await
    }

    async fn post_mutation(&self, url: &str, request: &MutationRequest<'_>) -> Outcome {
        let body = match serde_json::to_string(request) {
            Ok(b) => b,
            Err(e) => return Outcome::failure(format!("failed to serialize request: {e}")),
        };

        let response = self
            .http
            .post(url)
            .header("content-type", "text/plain;charset=utf-8")
            .body(body)
            .send()
            .await;

        let response = match response {
            Ok(r) => r,
            Err(e) => {
                warn!(sheet = request.sheet, action = request.action, error = %e, "bridge mutation failed");
                return Outcome::failure("Network error.");
            }
        };

        match response.json::<MutationResponse>().await {
            Ok(parsed) if parsed.success => Outcome::success(),
            Ok(parsed) => Outcome::failure(
                parsed
                    .error
                    .or(parsed.message)
                    .unwrap_or_else(|| "bridge reported failure".to_string()),
            ),
            Err(e) => Outcome::failure(format!("failed to parse bridge response: {e}")),
        }
    }

    /// Typed read of the Clients table.
    pub async fn fetch_clients(&self) -> Vec<Client> {
        schema::decode_clients(&self.fetch_rows(Table::Clients).await)
    }

    /// Typed read of the Keys table.
    pub async fn fetch_keys(&self) -> Vec<KeyRecord> {
        schema::decode_keys(&self.fetch_rows(Table::Keys).await)
    }

    /// Typed read of the Product Info table.
    pub async fn fetch_products(&self) -> Vec<Product> {
        schema::decode_products(&self.fetch_rows(Table::ProductInfo).await)
    }

    /// Typed read of the Campaigns table.
    pub async fn fetch_campaigns(&self) -> Vec<Campaign> {
        schema::decode_campaigns(&self.fetch_rows(Table::Campaigns).await)
    }

    /// Typed read of the WhatsApp Templates table.
    pub async fn fetch_templates(&self) -> Vec<TemplateRecord> {
        schema::decode_templates(&self.fetch_rows(Table::Templates).await)
    }
}

#[async_trait]
impl CampaignRecorder for BridgeClient {
    async fn record_campaign(&self, campaign: &Campaign) -> Result<(), ZenithError> {
        let data = serde_json::to_value(campaign).map_err(|e| ZenithError::Bridge {
            message: format!("failed to serialize campaign record: {e}"),
            source: Some(Box::new(e)),
        })?;
        let outcome = self.create_row(Table::Campaigns, &data).await;
        if outcome.ok {
            Ok(())
        } else {
            Err(ZenithError::Bridge {
                message: outcome
                    .error
                    .unwrap_or_else(|| "campaign record rejected".to_string()),
                source: None,
            })
        }
    }
}
