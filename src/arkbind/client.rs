//! # Authority Client
//!
//! [`NoidClient`] turns the high-level identifier operations into NOID command lines
//! and interprets what comes back. It holds no state between calls beyond its
//! settings, the runner and a logging span.
//!
//! ## Failure Model
//!
//! - A non-zero exit status is always an [`ArkError::Authority`] error, with the
//!   captured stderr logged first.
//! - Calls that break the argument contract (a value-less `bind` on a normal
//!   element, `mint 0`) fail with [`ArkError::InvalidArguments`] before anything runs.
//! - Responses that ran fine but carry nothing usable (no `id: ` line, blank `get`
//!   output) are soft failures: an error is logged and `Ok(None)` returned so the
//!   caller can tell them apart from invocation errors.

use crate::authority::{CommandRunner, Invocation, StdinMode};
use crate::config::NoidSettings;
use crate::error::{ArkError, Result};
use crate::model::{is_stdin_marker, BindMode};
use crate::response;
use tracing::{debug, error, info, info_span, Span};

pub struct NoidClient<R: CommandRunner> {
    settings: NoidSettings,
    runner: R,
    span: Span,
}

impl<R: CommandRunner> NoidClient<R> {
    pub fn new(settings: NoidSettings, runner: R) -> Self {
        let span = info_span!("noid", db = %settings.db_path);
        Self {
            settings,
            runner,
            span,
        }
    }

    /// Replace the span every operation logs under.
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    pub fn span(&self) -> &Span {
        &self.span
    }

    pub fn settings(&self) -> &NoidSettings {
        &self.settings
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Mint `count` identifiers and return the first one announced.
    pub fn mint(&self, count: u32) -> Result<Option<String>> {
        Ok(self.mint_many(count)?.into_iter().next())
    }

    /// Mint `count` identifiers and return all of them in output order.
    pub fn mint_many(&self, count: u32) -> Result<Vec<String>> {
        let _enter = self.span.enter();
        if count == 0 {
            return Err(ArkError::InvalidArguments(
                "mint count must be at least 1".to_string(),
            ));
        }

        info!(count, "Minting ARKs");
        let stdout = self.execute(self.invocation("mint", vec![count.to_string()]))?;
        let ids = response::minted_ids(&stdout);
        if ids.is_empty() {
            error!(response = %stdout.trim(), "Mint response carried no identifier");
        }
        Ok(ids)
    }

    /// Bind `value` to `element` on `identifier`.
    ///
    /// With `value == None` the element must be a stdin marker (`:` or `:-`); NOID
    /// then reads the binding from this process's standard input.
    pub fn bind(
        &self,
        identifier: &str,
        element: &str,
        value: Option<&str>,
        how: BindMode,
    ) -> Result<String> {
        let _enter = self.span.enter();
        let mut args = vec![
            how.to_string(),
            identifier.to_string(),
            element.to_string(),
        ];

        let stdin = match value {
            Some(value) => {
                args.push(value.to_string());
                StdinMode::Closed
            }
            None if is_stdin_marker(element) => StdinMode::Inherit,
            None => {
                return Err(ArkError::InvalidArguments(format!(
                    "bind of '{}' on {} needs a value or a stdin marker (':' or ':-')",
                    element, identifier
                )))
            }
        };

        info!(identifier, element, how = %how, "Binding element");
        self.execute(self.invocation("bind", args).with_stdin(stdin))
    }

    /// Apply one `bind` per entry, in iteration order. Stops at the first error;
    /// earlier binds stay applied.
    pub fn bind_multiple<I, K, V>(
        &self,
        identifier: &str,
        bindings: I,
        how: BindMode,
    ) -> Result<Vec<String>>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        bindings
            .into_iter()
            .map(|(element, value)| {
                self.bind(identifier, element.as_ref(), Some(value.as_ref()), how)
            })
            .collect()
    }

    /// Terse element listing. Blank output is a soft failure.
    pub fn get(&self, identifier: &str, elements: &[&str]) -> Result<Option<String>> {
        self.lookup("get", identifier, elements)
    }

    /// Verbose element listing. Blank output is a soft failure.
    pub fn fetch(&self, identifier: &str, elements: &[&str]) -> Result<Option<String>> {
        self.lookup("fetch", identifier, elements)
    }

    /// `false` only when NOID's output contains `iderr`.
    pub fn validate(&self, identifier: &str) -> Result<bool> {
        let _enter = self.span.enter();
        debug!(identifier, "Validating ARK");
        let stdout = self.execute(
            self.invocation("validate", vec!["-".to_string(), identifier.to_string()]),
        )?;
        Ok(!response::is_rejected(&stdout))
    }

    fn lookup(
        &self,
        subcommand: &str,
        identifier: &str,
        elements: &[&str],
    ) -> Result<Option<String>> {
        let _enter = self.span.enter();
        let mut args = vec![identifier.to_string()];
        args.extend(elements.iter().map(|e| e.to_string()));

        info!(identifier, subcommand, "Looking up ARK");
        let text = response::non_empty(self.execute(self.invocation(subcommand, args))?);
        if text.is_none() {
            error!(identifier, subcommand, "Empty response from NOID");
        }
        Ok(text)
    }

    fn invocation(&self, subcommand: &str, rest: Vec<String>) -> Invocation {
        let mut args = Vec::with_capacity(rest.len() + 3);
        args.push("-f".to_string());
        args.push(self.settings.db_path.clone());
        args.push(subcommand.to_string());
        args.extend(rest);
        Invocation::new(self.settings.noid_path.clone(), args)
    }

    fn execute(&self, invocation: Invocation) -> Result<String> {
        debug!(command = %invocation, "Running NOID command");
        let output = self.runner.run(&invocation)?;
        if !output.is_success() {
            error!(
                command = %invocation,
                status = %output.status_label(),
                stderr = %output.stderr.trim(),
                "NOID command failed"
            );
            return Err(ArkError::Authority {
                command: invocation.to_string(),
                status: output.status_label(),
                stderr: output.stderr.trim().to_string(),
            });
        }
        Ok(output.stdout)
    }
}
