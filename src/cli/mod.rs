//! Command-line interface.
//!
//! Flags are handled before any terminal setup:
//!
//! ```ignore
//! use gpt_term::cli::{parse_args, CliCommand};
//!
//! match parse_args(std::env::args()) {
//!     CliCommand::Version => gpt_term::cli::version::handle_version_command(),
//!     CliCommand::Help => gpt_term::cli::version::handle_help_command(),
//!     CliCommand::RunTui => {}
//! }
//! ```

pub mod args;
pub mod version;

pub use args::{parse_args, CliCommand};
pub use version::VERSION;
