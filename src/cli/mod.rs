pub mod commands;
pub mod generate;
pub mod serve;
pub mod show;

pub use commands::{Cli, Commands};
