//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single entry
//! point for every arkbind operation, whatever the UI.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Dispatches** to the appropriate command function
//! - **Normalizes inputs** (bind modes from text, `ELEMENT=VALUE` pairs)
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! It does no printing and makes no exit-code decisions; that is the CLI's job.
//!
//! ## Generic Over CommandRunner
//!
//! `ArkApi<R: CommandRunner>` is generic over how NOID is executed:
//! - Production: `ArkApi<ProcessRunner>`
//! - Testing: `ArkApi<ScriptedRunner>`

use crate::authority::CommandRunner;
use crate::batch::BatchOptions;
use crate::client::NoidClient;
use crate::commands;
use crate::commands::lookup::LookupStyle;
use crate::config::ArkConfig;
use crate::error::Result;
use crate::fieldmap::FieldMap;
use crate::model::BindMode;
use std::path::Path;

pub struct ArkApi<R: CommandRunner> {
    client: NoidClient<R>,
    fields: FieldMap,
    batch: BatchOptions,
}

impl<R: CommandRunner> ArkApi<R> {
    pub fn new(client: NoidClient<R>, fields: FieldMap, batch: BatchOptions) -> Self {
        Self {
            client,
            fields,
            batch,
        }
    }

    pub fn from_config(config: &ArkConfig, runner: R) -> Self {
        let client = NoidClient::new(config.noid.clone(), runner);
        Self::new(client, config.fields.clone(), config.batch.clone())
    }

    pub fn client(&self) -> &NoidClient<R> {
        &self.client
    }

    pub fn mint(&self, count: u32) -> Result<commands::CmdResult> {
        commands::mint::run(&self.client, count)
    }

    pub fn bind(
        &self,
        identifier: &str,
        element: &str,
        value: Option<&str>,
        how: &str,
    ) -> Result<commands::CmdResult> {
        let how: BindMode = how.parse()?;
        commands::bind::run(&self.client, identifier, element, value, how)
    }

    pub fn bind_many<I: AsRef<str>>(
        &self,
        identifier: &str,
        pairs: &[I],
        how: &str,
    ) -> Result<commands::CmdResult> {
        let how: BindMode = how.parse()?;
        let bindings = commands::bind::parse_pairs(pairs)?;
        commands::bind::run_many(&self.client, identifier, &bindings, how)
    }

    pub fn get<E: AsRef<str>>(&self, identifier: &str, elements: &[E]) -> Result<commands::CmdResult> {
        commands::lookup::run(&self.client, LookupStyle::Get, identifier, elements)
    }

    pub fn fetch<E: AsRef<str>>(
        &self,
        identifier: &str,
        elements: &[E],
    ) -> Result<commands::CmdResult> {
        commands::lookup::run(&self.client, LookupStyle::Fetch, identifier, elements)
    }

    pub fn validate<I: AsRef<str>>(&self, identifiers: &[I]) -> Result<commands::CmdResult> {
        commands::validate::run(&self.client, identifiers)
    }

    /// Bind a metadata directory. `extensions` overrides the configured list when
    /// non-empty.
    pub fn bind_directory(
        &self,
        root: &Path,
        extensions: &[String],
    ) -> Result<commands::CmdResult> {
        let options = if extensions.is_empty() {
            self.batch.clone()
        } else {
            BatchOptions {
                extensions: extensions.to_vec(),
            }
        };
        commands::bind_dir::run(&self.client, &self.fields, options, root)
    }
}

pub use commands::{CmdMessage, CmdResult, MessageLevel, Validation};
