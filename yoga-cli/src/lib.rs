//! # yoga-cli
//!
//! The `yoga` command: a terminal front end for the yoga wellness assistant.
//!
//! ```text
//! yoga                      # interactive chat
//! yoga ask "How do I do downward dog?"
//! yoga add notes/*.pdf
//! yoga rebuild
//! yoga files
//! ```
//!
//! Settings are read from flags, the environment and a `.env` file.

pub mod app;
pub mod cli;
mod repl;

pub use app::{build_assistant, run};
pub use cli::{Cli, Commands, Settings};
