//! Terminal interface for itbot

mod command;
mod ui;

pub use command::Command;
pub use ui::{display_banner, print_help, print_stats, read_input};

// Re-export core types
pub use itbot_core::{Error, Result};
