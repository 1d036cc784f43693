use crate::batch::BatchReport;

pub mod bind;
pub mod bind_dir;
pub mod lookup;
pub mod mint;
pub mod validate;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// Validation verdict for one identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validation {
    pub identifier: String,
    pub valid: bool,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub minted: Vec<String>,
    /// Raw authority text, for `get` and `fetch`.
    pub output: Option<String>,
    pub validations: Vec<Validation>,
    pub report: Option<BatchReport>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_minted(mut self, ids: Vec<String>) -> Self {
        self.minted = ids;
        self
    }

    pub fn with_output(mut self, output: Option<String>) -> Self {
        self.output = output;
        self
    }

    pub fn with_validations(mut self, validations: Vec<Validation>) -> Self {
        self.validations = validations;
        self
    }

    pub fn with_report(mut self, report: BatchReport) -> Self {
        self.report = Some(report);
        self
    }

    pub fn all_valid(&self) -> bool {
        self.validations.iter().all(|v| v.valid)
    }
}
