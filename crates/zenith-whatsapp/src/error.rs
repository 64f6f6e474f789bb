// SPDX-FileCopyrightText: 2026 Zenith Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Graph API error decoding.
//!
//! Meta reports errors as `{"error": {"message", "code", ...}}`. Code 190
//! means the access token is expired or revoked and must surface as its
//! own error kind so the broadcast engine can abort instead of burning
//! through the whole audience.

use serde::Deserialize;

use zenith_core::ZenithError;

/// OAuth error code for an expired or invalidated access token.
const CODE_CREDENTIAL_EXPIRED: i64 = 190;

#[derive(Debug, Deserialize)]
pub(crate) struct GraphErrorResponse {
    pub error: GraphErrorBody,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GraphErrorBody {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub code: i64,
    #[serde(rename = "type", default)]
    pub kind: String,
}

/// What the failing request was doing, for error variant selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RequestContext {
    Upload,
    Send,
}

/// Decode a non-success Graph response body into a `ZenithError`.
pub(crate) fn decode_error(
    status: reqwest::StatusCode,
    body: &str,
    context: RequestContext,
) -> ZenithError {
    if let Ok(parsed) = serde_json::from_str::<GraphErrorResponse>(body) {
        let err = parsed.error;
        if err.code == CODE_CREDENTIAL_EXPIRED {
            return ZenithError::CredentialExpired {
                message: if err.message.is_empty() {
                    "access token expired".to_string()
                } else {
                    err.message
                },
            };
        }
        let message = format!("Graph API error ({} code {}): {}", err.kind, err.code, err.message);
        return match context {
            RequestContext::Upload => ZenithError::MediaUpload { message },
            RequestContext::Send => ZenithError::Send {
                message,
                source: None,
            },
        };
    }

    let message = format!("Graph API returned {status}: {body}");
    match context {
        RequestContext::Upload => ZenithError::MediaUpload { message },
        RequestContext::Send => ZenithError::Send {
            message,
            source: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_190_maps_to_credential_expired() {
        let body = r#"{"error":{"message":"Error validating access token: Session has expired","type":"OAuthException","code":190}}"#;
        let err = decode_error(
            reqwest::StatusCode::UNAUTHORIZED,
            body,
            RequestContext::Send,
        );
        assert!(err.is_credential_expired());
    }

    #[test]
    fn other_codes_map_by_context() {
        let body = r#"{"error":{"message":"(#131030) Recipient phone number not in allowed list","type":"OAuthException","code":131030}}"#;
        let send = decode_error(reqwest::StatusCode::BAD_REQUEST, body, RequestContext::Send);
        assert!(matches!(send, ZenithError::Send { .. }));
        let upload = decode_error(reqwest::StatusCode::BAD_REQUEST, body, RequestContext::Upload);
        assert!(matches!(upload, ZenithError::MediaUpload { .. }));
    }

    #[test]
    fn unparseable_body_keeps_status() {
        let err = decode_error(
            reqwest::StatusCode::BAD_GATEWAY,
            "<html>Bad Gateway</html>",
            RequestContext::Send,
        );
        assert!(err.to_string().contains("502"));
    }
}
