//! Core logic for the whaletui embedded container shell
//!
//! This crate provides:
//! - An append-only output sink with scroll state
//! - Command classification (continuation lines, argv vs `/bin/sh -c`)
//! - Built-in commands and the interactive-command guard
//! - Command history with draft preservation
//! - Tab completion against the remote filesystem
//! - The session that drives all of the above, plus the provider exec bridge

mod builtin;
mod classify;
mod completion;
mod error;
mod exec;
mod guard;
mod history;
mod output;
mod session;

pub use builtin::*;
pub use classify::*;
pub use completion::*;
pub use error::*;
pub use exec::*;
pub use guard::*;
pub use history::*;
pub use output::*;
pub use session::*;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
