//! Per-source results of a resolve
//!
//! Every candidate file yields one [`SourceOutcome`]. Failures are values,
//! not errors: a resolve always completes and the report says what happened.

use std::path::PathBuf;

use props_fs::NormalizedPath;
use serde::Serialize;

use crate::Error;

/// What happened to one candidate file during a resolve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SourceOutcome {
    /// Parsed and merged into the store.
    Loaded {
        path: NormalizedPath,
        scope: String,
        entries: usize,
    },
    /// Skipped because an earlier resolve already merged it.
    AlreadyLoaded { path: NormalizedPath, scope: String },
    /// Could not be read or parsed. Retried on the next resolve.
    Failed {
        path: NormalizedPath,
        scope: String,
        failure: SourceFailure,
    },
}

impl SourceOutcome {
    pub fn path(&self) -> &NormalizedPath {
        match self {
            Self::Loaded { path, .. } | Self::AlreadyLoaded { path, .. } | Self::Failed { path, .. } => {
                path
            }
        }
    }

    pub fn scope(&self) -> &str {
        match self {
            Self::Loaded { scope, .. }
            | Self::AlreadyLoaded { scope, .. }
            | Self::Failed { scope, .. } => scope,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// Broad category of a source failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Io,
    TooLarge,
    Encoding,
    Syntax,
}

/// Why a source failed to load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceFailure {
    pub kind: FailureKind,
    pub message: String,
}

impl From<&Error> for SourceFailure {
    fn from(err: &Error) -> Self {
        let kind = match err {
            Error::Fs(props_fs::Error::FileTooLarge { .. }) => FailureKind::TooLarge,
            Error::Fs(props_fs::Error::InvalidUtf8 { .. }) => FailureKind::Encoding,
            Error::Parse { .. } => FailureKind::Syntax,
            _ => FailureKind::Io,
        };
        Self {
            kind,
            message: err.to_string(),
        }
    }
}

impl std::fmt::Display for SourceFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// A scope directory that could not be listed. It contributed no files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnreadableScope {
    pub scope: String,
    pub path: String,
    pub message: String,
}

/// Summary of one resolve call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResolveReport {
    /// The store was cleared before this resolve.
    pub rebuilt: bool,
    pub outcomes: Vec<SourceOutcome>,
    pub unreadable_scopes: Vec<UnreadableScope>,
    /// Number of environment variables overlaid on the files.
    pub environment_keys: usize,
}

impl ResolveReport {
    pub fn loaded(&self) -> impl Iterator<Item = &SourceOutcome> {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, SourceOutcome::Loaded { .. }))
    }

    pub fn already_loaded(&self) -> impl Iterator<Item = &SourceOutcome> {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, SourceOutcome::AlreadyLoaded { .. }))
    }

    pub fn failed(&self) -> impl Iterator<Item = &SourceOutcome> {
        self.outcomes.iter().filter(|o| o.is_failed())
    }

    pub fn has_failures(&self) -> bool {
        self.outcomes.iter().any(SourceOutcome::is_failed)
    }
}

/// A source merged into the store, with the checksum of what was read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadedSource {
    pub path: NormalizedPath,
    /// The path as listed on disk, used to re-read the file.
    #[serde(skip)]
    pub native: PathBuf,
    pub scope: String,
    pub entries: usize,
    pub checksum: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_kind_follows_error() {
        let too_large = Error::Fs(props_fs::Error::FileTooLarge {
            path: PathBuf::from("/s/big.properties"),
            size: 10,
            max: 1,
        });
        assert_eq!(SourceFailure::from(&too_large).kind, FailureKind::TooLarge);

        let syntax = Error::Parse {
            path: PathBuf::from("/s/bad.properties"),
            line: 3,
            message: "Malformed \\uxxxx encoding".into(),
        };
        let failure = SourceFailure::from(&syntax);
        assert_eq!(failure.kind, FailureKind::Syntax);
        assert!(failure.message.contains("line 3"));
    }

    #[test]
    fn outcomes_serialize_with_status_tag() {
        let outcome = SourceOutcome::AlreadyLoaded {
            path: NormalizedPath::new("/s/app.properties"),
            scope: "s".into(),
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["status"], "already_loaded");
        assert_eq!(json["path"], "/s/app.properties");
    }

    #[test]
    fn report_filters() {
        let report = ResolveReport {
            outcomes: vec![
                SourceOutcome::Loaded {
                    path: NormalizedPath::new("/s/a.properties"),
                    scope: "s".into(),
                    entries: 2,
                },
                SourceOutcome::Failed {
                    path: NormalizedPath::new("/s/b.properties"),
                    scope: "s".into(),
                    failure: SourceFailure {
                        kind: FailureKind::Io,
                        message: "denied".into(),
                    },
                },
            ],
            ..ResolveReport::default()
        };
        assert_eq!(report.loaded().count(), 1);
        assert_eq!(report.failed().count(), 1);
        assert_eq!(report.already_loaded().count(), 0);
        assert!(report.has_failures());
    }
}
