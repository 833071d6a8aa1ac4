//! # Verses CLI Architecture
//!
//! `verses` is an administrative client for the retreat verse store. The binary
//! is intentionally thin: the CLI lives in `src/cli/`, while this file only
//! invokes `cli::run()` and turns the outcome into a process exit code.
//!
//! ## Workspace Structure
//!
//! - `crates/versesapp/` — Core library: storage, unit of work, ledger rules
//! - `crates/verses/` — This CLI tool, depends on the `versesapp` library
//!
//! ## Layering
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (crates/verses/src/cli/)                         │
//! │  - clap argument parsing (setup.rs)                         │
//! │  - Config, logging and dispatch (commands.rs)               │
//! │  - Text or JSON output (render.rs)                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (crates/versesapp/src/api.rs)                    │
//! │  - One unit of work per call                                │
//! │  - Returns entities, counts and `OperationResult` values    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (crates/versesapp/src/commands/*)            │
//! │  - Validation, cascades, registration status rules          │
//! │  - No knowledge of stdout/stderr or process exits           │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Exit Codes
//!
//! - `0`: the command was applied
//! - `1`: an error (bad argument, unreadable store, I/O failure)
//! - `2`: the store refused the change (unknown id, duplicate, rule violation)
//!
//! ## Testing Approach
//!
//! Business rules are tested in the library. The CLI has unit tests for
//! argument parsing and rendering, plus end-to-end tests in `tests/` that run
//! the real binary against a temporary data directory.

mod cli;

use std::process::ExitCode;

fn main() -> ExitCode {
    match cli::run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
