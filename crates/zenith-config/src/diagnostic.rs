// SPDX-FileCopyrightText: 2026 Zenith Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Miette diagnostics for configuration failures.
//!
//! Figment reports deserialization problems as a flat error chain; this
//! module lifts each entry into a [`ConfigError`] that miette can render
//! with a source span into the offending TOML file and a Jaro-Winkler
//! "did you mean?" suggestion for misspelled keys.

#![allow(unused_assignments)] // miette's Diagnostic derive generates code triggering this lint

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Minimum Jaro-Winkler similarity score to suggest a correction.
/// 0.75 catches common typos like `urll` -> `url` and
/// `send_dely_ms` -> `send_delay_ms` while filtering noise.
const SUGGESTION_THRESHOLD: f64 = 0.75;

/// A configuration error with rendering context attached.
///
/// All zenith sections are optional with compiled defaults, so the
/// reachable shapes are a misspelled key, a mistyped value, a semantic
/// validation failure, or an unclassified figment error.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    /// A key the section's model does not declare.
    #[error("unknown configuration key `{key}`")]
    #[diagnostic(
        code(zenith::config::unknown_key),
        help("{}", unknown_key_help(suggestion.as_deref(), valid_keys))
    )]
    UnknownKey {
        key: String,
        /// Closest declared key, when one scores above the threshold.
        suggestion: Option<String>,
        /// Comma-joined declared keys for the section.
        valid_keys: String,
        #[label("this key is not recognized")]
        span: Option<SourceSpan>,
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    /// A value whose TOML type does not match the model field.
    #[error("invalid type for key `{key}`: {detail}")]
    #[diagnostic(code(zenith::config::invalid_type), help("expected {expected}"))]
    InvalidType {
        key: String,
        detail: String,
        expected: String,
        #[label("wrong type here")]
        span: Option<SourceSpan>,
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    /// A well-formed value that fails a semantic check.
    #[error("validation error: {message}")]
    #[diagnostic(code(zenith::config::validation))]
    Validation { message: String },

    /// Any figment error the variants above do not classify.
    #[error("configuration error: {0}")]
    #[diagnostic(code(zenith::config::other))]
    Other(String),
}

fn unknown_key_help(suggestion: Option<&str>, valid_keys: &str) -> String {
    match suggestion {
        Some(s) => format!("did you mean `{s}`? Valid keys: {valid_keys}"),
        None => format!("valid keys: {valid_keys}"),
    }
}

/// Convert a `figment::Error` (which may hold several entries) into
/// renderable diagnostics.
///
/// `toml_sources` pairs each merged file path with its raw content so
/// unknown-key errors can carry a span into the file they came from.
pub fn figment_to_config_errors(
    err: figment::Error,
    toml_sources: &[(String, String)],
) -> Vec<ConfigError> {
    err.into_iter()
        .map(|error| classify(error, toml_sources))
        .collect()
}

fn classify(error: figment::error::Error, toml_sources: &[(String, String)]) -> ConfigError {
    use figment::error::Kind;

    match &error.kind {
        Kind::UnknownField(field, declared) => {
            let valid_keys: Vec<&str> = declared.to_vec();
            let (span, src) = locate(&error, field, toml_sources);
            ConfigError::UnknownKey {
                key: field.clone(),
                suggestion: suggest_key(field, &valid_keys),
                valid_keys: valid_keys.join(", "),
                span,
                src,
            }
        }
        Kind::InvalidType(actual, expected) => ConfigError::InvalidType {
            key: dotted_path(&error),
            detail: format!("found {actual}, expected {expected}"),
            expected: expected.to_string(),
            span: None,
            src: None,
        },
        _ => ConfigError::Other(error.to_string()),
    }
}

fn dotted_path(error: &figment::error::Error) -> String {
    error
        .path
        .iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
        .join(".")
}

/// Resolve the span and source attachment for a field error, if the error
/// carries file provenance and the file content was captured.
fn locate(
    error: &figment::error::Error,
    field: &str,
    toml_sources: &[(String, String)],
) -> (Option<SourceSpan>, Option<NamedSource<String>>) {
    let Some(figment::Source::File(path)) = error
        .metadata
        .as_ref()
        .and_then(|m| m.source.as_ref())
    else {
        return (None, None);
    };
    let path = path.display().to_string();

    let Some((_, content)) = toml_sources.iter().find(|(p, _)| *p == path) else {
        return (None, None);
    };

    // error.path names the section, e.g. ["bridge"] for `bridge.urll`.
    let section = error.path.first().map(|s| s.to_string());
    match find_key_offset(content, section.as_deref(), field) {
        Some(offset) => (
            Some(SourceSpan::new(offset.into(), field.len())),
            Some(NamedSource::new(path, content.clone())),
        ),
        None => (None, None),
    }
}

/// Byte offset of `field` within `content`, scoped below the `[section]`
/// header when one is given.
///
/// Matches the key only at the start of a (possibly indented) line and
/// only when followed by `=` or whitespace, so a key that appears inside
/// a string value is not mistaken for the assignment.
pub fn find_key_offset(content: &str, section: Option<&str>, field: &str) -> Option<usize> {
    let search_start = match section {
        None => 0,
        Some(name) => {
            let header = format!("[{name}]");
            content.find(&header)? + header.len()
        }
    };

    let mut line_start = search_start;
    for line in content[search_start..].lines() {
        let indent = line.len() - line.trim_start().len();
        let candidate = &line[indent..];
        if let Some(rest) = candidate.strip_prefix(field) {
            if matches!(rest.chars().next(), Some('=' | ' ' | '\t')) {
                return Some(line_start + indent);
            }
        }
        line_start += line.len() + 1;
    }

    None
}

/// The declared key most similar to `unknown`, when its Jaro-Winkler
/// score clears the threshold.
pub fn suggest_key(unknown: &str, valid_keys: &[&str]) -> Option<String> {
    valid_keys
        .iter()
        .map(|key| (strsim::jaro_winkler(unknown, key), *key))
        .filter(|(score, _)| *score > SUGGESTION_THRESHOLD)
        .max_by(|(a, _), (b, _)| a.total_cmp(b))
        .map(|(_, key)| key.to_string())
}

/// Render diagnostics to stderr with miette's graphical handler, falling
/// back to plain Display if rendering fails.
pub fn render_errors(errors: &[ConfigError]) {
    use miette::GraphicalReportHandler;

    let handler = GraphicalReportHandler::new();
    for error in errors {
        let mut buf = String::new();
        let diagnostic: &dyn Diagnostic = error;
        if handler.render_report(&mut buf, diagnostic).is_ok() {
            eprint!("{buf}");
        } else {
            eprintln!("Error: {error}");
        }
    }
}
