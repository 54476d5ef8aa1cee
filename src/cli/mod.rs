//! # Command-Line Interface
//!
//! User-facing commands over a shell built from the project configuration.
//!
//! ## Commands
//!
//! | Command | Purpose |
//! |---------|---------|
//! | `init` | Create `.tina/config.toml` |
//! | `fields`, `screens`, `forms` | List a well-known plugin collection |
//! | `plugins` | List every collection, or one with `--type` |
//! | `config` | Show the effective sidebar and media settings |
//! | `upload` | Persist files through the media store |
//! | `tui` | Interactive shell |
//!
//! ## Output Formats
//!
//! All commands support `--format`:
//! - `text` (default, or the global config's `default_format`) - Human-readable output
//! - `json` - Machine-parseable JSON
//!
//! ## Logging
//!
//! Diagnostics go to stderr through `tracing`. `TINA_LOG` takes a filter
//! (e.g. `TINA_LOG=tina_shell=debug`); `--verbose` raises the default from
//! `warn` to `debug`. The interactive shell logs nothing to the terminal.
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod config_cmd;
mod output;
mod registry_cmd;
mod tui;
mod upload;

pub use app::{run, Cli, Commands, LOG_ENV};
pub use output::{Output, OutputFormat};
