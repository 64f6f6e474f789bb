// SPDX-FileCopyrightText: 2026 Zenith Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Zenith campaign console.

use thiserror::Error;

/// The primary error type used across all Zenith adapters and the
/// broadcast pipeline.
#[derive(Debug, Error)]
pub enum ZenithError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// Tabular bridge transport or remote-side errors.
    #[error("bridge error: {message}")]
    Bridge {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Content generator failures (API error, malformed model output).
    #[error("generation error: {message}")]
    Generation {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A bounded polling loop exhausted its attempt budget.
    #[error("operation timed out after {attempts} polling attempts")]
    Timeout { attempts: u32 },

    /// Media upload to the messaging provider failed for a non-credential reason.
    #[error("media upload failed: {message}")]
    MediaUpload { message: String },

    /// The messaging provider reported an expired or invalid access credential
    /// (Graph API error code 190). Aborts a mission immediately.
    #[error("credential expired or invalid: {message}")]
    CredentialExpired { message: String },

    /// Message transmission failed for a single recipient.
    #[error("send failed: {message}")]
    Send {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// An update/delete found no row matching the identifier, even under
    /// the fuzzy last-9-digit phone rule.
    #[error("no row in `{table}` matches identifier `{key}`")]
    RemoteMatch { table: String, key: String },

    /// Session file persistence failures.
    #[error("session error: {0}")]
    Session(String),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ZenithError {
    /// True when this error means the provider session credential is dead
    /// and further sends in the same mission are pointless.
    pub fn is_credential_expired(&self) -> bool {
        matches!(self, ZenithError::CredentialExpired { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credential_expired_is_distinguished() {
        let err = ZenithError::CredentialExpired {
            message: "Error validating access token".into(),
        };
        assert!(err.is_credential_expired());

        let err = ZenithError::MediaUpload {
            message: "unsupported mime type".into(),
        };
        assert!(!err.is_credential_expired());
    }

    #[test]
    fn display_carries_message() {
        let err = ZenithError::Send {
            message: "recipient not on WhatsApp".into(),
            source: None,
        };
        assert!(err.to_string().contains("recipient not on WhatsApp"));
    }
}
