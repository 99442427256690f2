//! CLI module
//!
//! Command-line interface for paging through a resource.
//!
//! # Commands
//!
//! - `page` - Stream every item of a resource as JSON lines

mod commands;
mod runner;

pub use commands::{parse_param, Cli, Commands, PageArgs};
pub use runner::Runner;
