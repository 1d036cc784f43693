use crate::authority::CommandRunner;
use crate::batch::{BatchBinder, BatchOptions, RecordOutcome};
use crate::client::NoidClient;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::fieldmap::FieldMap;
use std::path::Path;

pub fn run<R: CommandRunner>(
    client: &NoidClient<R>,
    fields: &FieldMap,
    options: BatchOptions,
    root: &Path,
) -> Result<CmdResult> {
    let report = BatchBinder::new(client, fields)
        .with_options(options)
        .bind_directory(root)?;

    let mut result = CmdResult::default();
    for (path, outcome) in &report.outcomes {
        match outcome {
            RecordOutcome::Failed {
                identifier, reason, ..
            } => result.add_message(CmdMessage::error(format!(
                "{} ({}): {}",
                path.display(),
                identifier,
                reason
            ))),
            RecordOutcome::Bound {
                identifier,
                warnings,
            } if !warnings.is_empty() => result.add_message(CmdMessage::warning(format!(
                "{} ({}): bound with {} default(s)",
                path.display(),
                identifier,
                warnings.len()
            ))),
            _ => {}
        }
    }

    let summary = format!(
        "Bound: {}, Failed: {}, Warnings: {}",
        report.success, report.failed, report.warning
    );
    if report.failed == 0 {
        result.add_message(CmdMessage::success(summary));
    } else {
        result.add_message(CmdMessage::warning(summary));
    }
    Ok(result.with_report(report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::authority::scripted::ScriptedRunner;
    use crate::authority::CommandOutput;
    use crate::commands::MessageLevel;
    use crate::config::NoidSettings;
    use serde_json::json;
    use std::fs;

    #[test]
    fn test_summary_and_failure_messages() {
        let dir = tempfile::tempdir().unwrap();
        let record = json!({
            "id": "uwm-1",
            "dct_identifier_sm": ["ark:/1/bad"],
        });
        fs::write(dir.path().join("a.json"), record.to_string()).unwrap();

        let client = NoidClient::new(
            NoidSettings::default(),
            ScriptedRunner::new().on("validate", CommandOutput::success("iderr")),
        );
        let result = run(&client, &FieldMap::default(), BatchOptions::default(), dir.path()).unwrap();

        assert_eq!(result.report.as_ref().map(|r| r.failed), Some(1));
        assert_eq!(result.messages[0].level, MessageLevel::Error);
        let last = result.messages.last().unwrap();
        assert_eq!(last.content, "Bound: 0, Failed: 1, Warnings: 0");
        assert_eq!(last.level, MessageLevel::Warning);
    }
}
