// SPDX-FileCopyrightText: 2026 Zenith Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Asset byte resolution for media upload.
//!
//! Generated assets arrive either as `data:` URIs (inline base64) or as
//! remote URLs that must be fetched before the multipart upload to Meta.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use zenith_core::ZenithError;
use zenith_core::types::AssetRef;

/// Bytes plus MIME type, ready for multipart upload.
#[derive(Debug)]
pub(crate) struct ResolvedAsset {
    pub bytes: Vec<u8>,
    pub mime: String,
}

/// Parse a `data:<mime>;base64,<payload>` URI into bytes and MIME type.
pub(crate) fn decode_data_uri(uri: &str) -> Result<ResolvedAsset, ZenithError> {
    let rest = uri.strip_prefix("data:").ok_or_else(|| ZenithError::MediaUpload {
        message: "asset URI is not a data URI".to_string(),
    })?;
    let (header, payload) = rest.split_once(',').ok_or_else(|| ZenithError::MediaUpload {
        message: "malformed data URI: missing comma separator".to_string(),
    })?;
    let mime = header
        .strip_suffix(";base64")
        .ok_or_else(|| ZenithError::MediaUpload {
            message: "malformed data URI: expected base64 encoding".to_string(),
        })?;
    let bytes = STANDARD
        .decode(payload)
        .map_err(|e| ZenithError::MediaUpload {
            message: format!("failed to decode base64 asset data: {e}"),
        })?;
    Ok(ResolvedAsset {
        bytes,
        mime: mime.to_string(),
    })
}

/// Resolve an asset reference into upload-ready bytes.
pub(crate) async fn resolve(
    http: &reqwest::Client,
    asset: &AssetRef,
) -> Result<ResolvedAsset, ZenithError> {
    match asset {
        AssetRef::DataUri { uri, .. } => decode_data_uri(uri),
        AssetRef::RemoteUrl { kind, url } => {
            let response = http.get(url).send().await.map_err(|e| ZenithError::MediaUpload {
                message: format!("failed to fetch remote asset: {e}"),
            })?;
            if !response.status().is_success() {
                return Err(ZenithError::MediaUpload {
                    message: format!("remote asset fetch returned {}", response.status()),
                });
            }
            let mime = response
                .headers()
                .get(reqwest::header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
                .unwrap_or_else(|| kind.default_mime().to_string());
            let bytes = response
                .bytes()
                .await
                .map_err(|e| ZenithError::MediaUpload {
                    message: format!("failed to read remote asset body: {e}"),
                })?
                .to_vec();
            Ok(ResolvedAsset { bytes, mime })
        }
    }
}
