//! # arkbind Architecture
//!
//! arkbind drives a NOID minter: it mints ARKs, binds element values onto them,
//! reads them back, validates them, and bulk-binds metadata from a directory of JSON
//! records. NOID itself stays an external program; arkbind composes its command
//! lines and reads its text output.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (main.rs, args.rs)                               │
//! │  - Parses arguments, prints results, owns exit codes        │
//! │  - Installs the tracing subscriber                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Normalizes inputs (bind modes, ELEMENT=VALUE pairs)      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Turns client calls and batch reports into CmdResults     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Core (client.rs, batch.rs, record.rs)                      │
//! │  - NoidClient: mint / bind / get / fetch / validate         │
//! │  - BatchBinder: directory walk, per-record outcomes         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Authority Layer (authority/)                               │
//! │  - CommandRunner trait                                      │
//! │  - ProcessRunner (production), ScriptedRunner (testing)     │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward, code never writes to stdout/stderr and never exits the
//! process. Diagnostics go through `tracing`; the client and the batch binder each
//! carry an explicit span handed to them at construction, and only the binary
//! installs a subscriber.
//!
//! ## Testing Strategy
//!
//! - **Core**: unit tests against `ScriptedRunner`, which records every invocation,
//!   so argument lists and call counts are asserted exactly.
//! - **Commands / API**: dispatch and message tests.
//! - **CLI**: `tests/` drives the binary against a stand-in `noid` script.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade
//! - [`commands`]: One module per user-facing operation
//! - [`client`]: The NOID authority client
//! - [`batch`]: Directory binding and the batch report
//! - [`record`]: Field resolution for one metadata record
//! - [`fieldmap`]: Canonical keys and their source field names
//! - [`authority`]: Process execution seam
//! - [`response`]: NOID output parsing
//! - [`model`]: Identifiers and bind modes
//! - [`config`]: Typed YAML configuration
//! - [`logging`]: Subscriber setup for the binary
//! - [`error`]: Error types

pub mod api;
pub mod authority;
pub mod batch;
pub mod client;
pub mod commands;
pub mod config;
pub mod error;
pub mod fieldmap;
pub mod logging;
pub mod model;
pub mod record;
pub mod response;
