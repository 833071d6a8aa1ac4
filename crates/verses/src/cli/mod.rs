//! # CLI Behavior
//!
//! This is **one possible UI client** for the verse store, not the application
//! itself. The CLI is the only place that knows about terminal I/O, exit codes,
//! and output formatting.
//!
//! For the overall architecture, see the crate-level documentation in [`crate`].
//!
//! ## Choosing the Data Directory
//!
//! 1. `--data-root DIR` wins outright.
//! 2. Otherwise `verses.toml` is loaded (from `--config FILE`, or the OS config
//!    directory) with `VERSES_DATA_ROOT` layered on top.
//! 3. Otherwise the library's host-based default applies, relative to the
//!    current directory: `./App_Data`, or the App Service share.
//!
//! ## Output
//!
//! Plain text lines by default, one record per line. `--json` prints the same
//! data as pretty JSON, suitable for scripts. Group password hashes are never
//! printed.
//!
//! ## Module Structure
//!
//! - `commands`: Context setup and per-command handlers that call the API
//! - `render`: Text and JSON formatting
//! - `setup`: Argument parsing via clap, help text

mod commands;
mod render;
pub mod setup;

pub use commands::run;
