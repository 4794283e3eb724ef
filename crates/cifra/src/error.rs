//! CLI error types.

use cifra_config::ConfigError;
use cifra_dom::DomError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Dom(#[from] DomError),

    #[error("{0}")]
    Io(#[from] std::io::Error),
}
