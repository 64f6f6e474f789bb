// SPDX-FileCopyrightText: 2026 Zenith Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Operator session persistence.
//!
//! A single JSON file holding connection settings and the last mission
//! summary. Missing or unreadable files yield a default session; a
//! corrupt file is logged and replaced on the next save rather than
//! aborting startup.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use zenith_core::ZenithError;
use zenith_core::types::MissionSummary;

/// Everything that survives a restart of the console.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionData {
    /// Apps Script bridge URL override, when the operator set one.
    pub bridge_url: Option<String>,
    /// Logged-in user name, for display only.
    pub user: Option<String>,
    pub language: Option<String>,
    /// Overwritten by each completed mission; there is no history.
    pub last_mission: Option<MissionSummary>,
}

/// File-backed session store.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the session, falling back to defaults when the file is
    /// missing or unreadable.
    pub fn load(&self) -> SessionData {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(_) => return SessionData::default(),
        };
        match serde_json::from_str(&content) {
            Ok(data) => data,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "session file is corrupt, starting fresh");
                SessionData::default()
            }
        }
    }

    /// Persist the session, creating parent directories as needed.
    pub fn save(&self, data: &SessionData) -> Result<(), ZenithError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ZenithError::Session(format!("creating {}: {e}", parent.display())))?;
        }
        let json = serde_json::to_string_pretty(data)
            .map_err(|e| ZenithError::Session(format!("encoding session: {e}")))?;
        fs::write(&self.path, json)
            .map_err(|e| ZenithError::Session(format!("writing {}: {e}", self.path.display())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::Utc;

    #[test]
    fn missing_file_loads_default() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("session.json"));
        assert_eq!(store.load(), SessionData::default());
    }

    #[test]
    fn corrupt_file_loads_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "{not json").unwrap();
        let store = SessionStore::new(path);
        assert_eq!(store.load(), SessionData::default());
    }

    #[test]
    fn save_round_trips_and_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("nested/state/session.json"));
        let now = Utc::now();
        let data = SessionData {
            bridge_url: Some("https://script.google.com/macros/s/abc/exec".into()),
            user: Some("admin".into()),
            language: Some("Moroccan Darija".into()),
            last_mission: Some(MissionSummary {
                sent: 3,
                failed: 1,
                total: 4,
                started_at: now,
                ended_at: now,
                product_name: "Argan Oil".into(),
                angle_title: "High Urgency".into(),
                sender: "default".into(),
            }),
        };
        store.save(&data).unwrap();
        assert_eq!(store.load(), data);
    }

    #[test]
    fn unknown_fields_are_tolerated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, r#"{"user":"ops","legacy_field":true}"#).unwrap();
        let store = SessionStore::new(path);
        assert_eq!(store.load().user.as_deref(), Some("ops"));
    }
}
