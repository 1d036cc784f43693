//! # Batch Binder
//!
//! Walks a directory of JSON metadata records and binds each one onto its ARK.
//!
//! ## Per-Record Flow
//!
//! ```text
//! file ──parse──▶ record ──identifier?──▶ normalize ──validate──▶ resolve ──bind_multiple
//!   │                          │                        │            │            │
//!   ▼                          ▼                        ▼            ▼            ▼
//! abort batch              Skipped                  Failed       Failed       Failed / Bound
//! ```
//!
//! ## Failure Policy
//!
//! Only two things stop a run: a file whose top-level JSON does not parse
//! ([`ArkError::MalformedMetadata`]) and a NOID invocation error while validating.
//! Everything else is recorded as a [`RecordOutcome`] and tallied in the
//! [`BatchReport`].

use crate::authority::CommandRunner;
use crate::client::NoidClient;
use crate::error::{ArkError, Result};
use crate::fieldmap::FieldMap;
use crate::model::{normalize_identifier, BindMode};
use crate::record::{self, FailureReason, Record};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, info_span, warn, Span};
use walkdir::WalkDir;

fn default_extensions() -> Vec<String> {
    vec![".json".to_string()]
}

/// Which files under the root count as metadata records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchOptions {
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
        }
    }
}

impl BatchOptions {
    /// Lowercase every extension and give it a leading dot.
    pub fn normalize(&mut self) {
        for ext in &mut self.extensions {
            let lower = ext.trim().to_ascii_lowercase();
            *ext = if lower.starts_with('.') {
                lower
            } else {
                format!(".{}", lower)
            };
        }
        if self.extensions.is_empty() {
            self.extensions = default_extensions();
        }
    }

    pub fn matches(&self, path: &Path) -> bool {
        match path.extension() {
            Some(ext) => {
                let ext = format!(".{}", ext.to_string_lossy().to_ascii_lowercase());
                self.extensions.contains(&ext)
            }
            None => false,
        }
    }
}

/// What happened to one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordOutcome {
    Bound {
        identifier: String,
        warnings: Vec<String>,
    },
    Skipped {
        reason: String,
    },
    Failed {
        identifier: String,
        reason: FailureReason,
        warnings: Vec<String>,
    },
}

impl RecordOutcome {
    pub fn warnings(&self) -> usize {
        match self {
            RecordOutcome::Bound { warnings, .. } | RecordOutcome::Failed { warnings, .. } => {
                warnings.len()
            }
            RecordOutcome::Skipped { .. } => 0,
        }
    }
}

/// Aggregate counts for one run, with the outcome of every file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub success: usize,
    pub failed: usize,
    pub warning: usize,
    pub outcomes: Vec<(PathBuf, RecordOutcome)>,
}

impl BatchReport {
    pub fn record(&mut self, path: PathBuf, outcome: RecordOutcome) {
        match &outcome {
            RecordOutcome::Bound { .. } => self.success += 1,
            RecordOutcome::Failed { .. } => self.failed += 1,
            RecordOutcome::Skipped { .. } => {}
        }
        self.warning += outcome.warnings();
        self.outcomes.push((path, outcome));
    }

    pub fn skipped(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|(_, o)| matches!(o, RecordOutcome::Skipped { .. }))
            .count()
    }

    /// `(success, failed, warning)`
    pub fn counts(&self) -> (usize, usize, usize) {
        (self.success, self.failed, self.warning)
    }
}

pub struct BatchBinder<'a, R: CommandRunner> {
    client: &'a NoidClient<R>,
    fields: &'a FieldMap,
    options: BatchOptions,
    span: Span,
}

impl<'a, R: CommandRunner> BatchBinder<'a, R> {
    pub fn new(client: &'a NoidClient<R>, fields: &'a FieldMap) -> Self {
        let span = info_span!(parent: client.span(), "batch");
        Self {
            client,
            fields,
            options: BatchOptions::default(),
            span,
        }
    }

    pub fn with_options(mut self, mut options: BatchOptions) -> Self {
        options.normalize();
        self.options = options;
        self
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Record files under `root`, recursively, in sorted order.
    pub fn record_files(&self, root: &Path) -> Result<Vec<PathBuf>> {
        if !root.is_dir() {
            return Err(ArkError::NotADirectory(root.to_path_buf()));
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(root) {
            let entry = entry.map_err(|e| {
                ArkError::Io(
                    e.into_io_error()
                        .unwrap_or_else(|| std::io::Error::other("directory walk failed")),
                )
            })?;
            if entry.file_type().is_file() && self.options.matches(entry.path()) {
                files.push(entry.into_path());
            }
        }
        files.sort();
        Ok(files)
    }

    /// Bind every record under `root`.
    pub fn bind_directory<P: AsRef<Path>>(&self, root: P) -> Result<BatchReport> {
        let root = root.as_ref();
        let _enter = self.span.enter();
        let files = self.record_files(root)?;
        info!(root = %root.display(), files = files.len(), "Binding metadata directory");

        let mut report = BatchReport::default();
        for path in files {
            let record = load_record(&path)?;
            let outcome = match record {
                Value::Object(map) => self.bind_record(&map)?,
                other => RecordOutcome::Skipped {
                    reason: format!("top-level JSON is {}, not an object", json_kind(&other)),
                },
            };
            log_outcome(&path, &outcome);
            report.record(path, outcome);
        }

        info!(
            success = report.success,
            failed = report.failed,
            warning = report.warning,
            "Batch complete"
        );
        Ok(report)
    }

    /// Validate, resolve and bind one parsed record.
    ///
    /// Only NOID invocation errors during validation come back as `Err`.
    pub fn bind_record(&self, record: &Record) -> Result<RecordOutcome> {
        let source = match record::source_identifier(record, self.fields) {
            Some(id) => id,
            None => {
                return Ok(RecordOutcome::Skipped {
                    reason: format!("no '{}' field", self.fields.identifier),
                })
            }
        };
        let identifier = normalize_identifier(&source).to_string();

        if !self.client.validate(&identifier)? {
            return Ok(RecordOutcome::Failed {
                identifier,
                reason: FailureReason::InvalidIdentifier,
                warnings: Vec::new(),
            });
        }

        let resolved = match record::resolve(record, self.fields, &source) {
            Ok(resolved) => resolved,
            Err(failure) => {
                return Ok(RecordOutcome::Failed {
                    identifier,
                    reason: failure.reason,
                    warnings: failure.warnings,
                })
            }
        };

        match self
            .client
            .bind_multiple(&identifier, resolved.bindings(), BindMode::Set)
        {
            Ok(_) => Ok(RecordOutcome::Bound {
                identifier,
                warnings: resolved.warnings,
            }),
            Err(e) => Ok(RecordOutcome::Failed {
                identifier,
                reason: FailureReason::BindFailed(e.to_string()),
                warnings: resolved.warnings,
            }),
        }
    }
}

fn load_record(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|source| {
        error!(path = %path.display(), error = %source, "Malformed metadata, aborting batch");
        ArkError::MalformedMetadata {
            path: path.to_path_buf(),
            source,
        }
    })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn log_outcome(path: &Path, outcome: &RecordOutcome) {
    let path = path.display();
    match outcome {
        RecordOutcome::Bound {
            identifier,
            warnings,
        } => {
            for w in warnings {
                warn!(%path, identifier = %identifier, "{}", w);
            }
            info!(%path, identifier = %identifier, "Bound metadata");
        }
        RecordOutcome::Skipped { reason } => debug!(%path, "Skipped: {}", reason),
        RecordOutcome::Failed {
            identifier,
            reason,
            warnings,
        } => {
            for w in warnings {
                warn!(%path, identifier = %identifier, "{}", w);
            }
            match reason {
                FailureReason::InvalidIdentifier => {
                    warn!(%path, identifier = %identifier, "Invalid ARK, skipping")
                }
                other => error!(%path, identifier = %identifier, "{}", other),
            }
        }
    }
}
