//! Configuration for whaletui
//!
//! Handles the global configuration file (`~/.config/whaletui/config.toml`),
//! including provider sockets, logging, shell options and the shell color theme.

mod error;
mod global;
mod theme;

pub use error::*;
pub use global::*;
pub use theme::*;
