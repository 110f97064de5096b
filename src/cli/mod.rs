//! CLI module for Blueprint.
//!
//! # Usage
//!
//! ```ignore
//! use blueprint::cli::{parse_args, run_command};
//!
//! let command = parse_args(std::env::args())?;
//! let code = run_command(command, &ctx, &mut std::io::stdout()).await?;
//! std::process::exit(code);
//! ```

pub mod args;
pub mod commands;
pub mod version;

pub use args::{parse_args, ArgsError, CliCommand, USAGE};
pub use commands::{run_command, CliContext, EXIT_FAILURE, EXIT_OK, EXIT_REDIRECT};
pub use version::VERSION;
