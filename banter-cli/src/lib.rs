//! Library surface of the Banter CLI: logging setup and the console loops.
//!
//! The binary wires clap subcommands to these loops; tests drive the loops
//! with in-memory readers instead of stdin.

pub mod logging;
pub mod repl;
