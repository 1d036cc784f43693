use super::{CommandOutput, CommandRunner, Invocation, StdinMode};
use crate::error::{ArkError, Result};
use std::process::{Command, Stdio};

/// Runs authority commands as real child processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl ProcessRunner {
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for ProcessRunner {
    fn run(&self, invocation: &Invocation) -> Result<CommandOutput> {
        let stdin = match invocation.stdin {
            StdinMode::Closed => Stdio::null(),
            StdinMode::Inherit => Stdio::inherit(),
        };

        let output = Command::new(&invocation.program)
            .args(&invocation.args)
            .stdin(stdin)
            .output()
            .map_err(|e| ArkError::Spawn {
                program: invocation.program.clone(),
                source: e,
            })?;

        Ok(CommandOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn test_captures_stdout_and_exit_code() {
        let inv = Invocation::new("sh", vec!["-c".into(), "echo 'id: 1/x'; exit 0".into()]);
        let out = ProcessRunner::new().run(&inv).unwrap();
        assert!(out.is_success());
        assert_eq!(out.stdout, "id: 1/x\n");
    }

    #[test]
    fn test_reports_non_zero_status_without_error() {
        let inv = Invocation::new("sh", vec!["-c".into(), "echo nope >&2; exit 4".into()]);
        let out = ProcessRunner::new().run(&inv).unwrap();
        assert_eq!(out.code, Some(4));
        assert_eq!(out.stderr.trim(), "nope");
    }

    #[test]
    fn test_missing_program_is_spawn_error() {
        let inv = Invocation::new("/definitely/not/a/noid", vec![]);
        let err = ProcessRunner::new().run(&inv).unwrap_err();
        assert!(matches!(err, ArkError::Spawn { .. }));
    }
}
