//! CLI command implementations.

pub(crate) mod config;
pub(crate) mod process;

pub(crate) use config::ConfigCommand;
pub(crate) use process::ProcessArgs;
