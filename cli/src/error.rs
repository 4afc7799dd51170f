use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    Message(String),

    #[error("settings file not found: {0}")]
    MissingSettings(PathBuf),

    #[error("no connected account. Run `epic-mint connect` first")]
    NotConnected,

    #[error("no wallet provider configured. Pass --rpc-url or set [provider] url")]
    NoProvider,

    #[error(transparent)]
    Mint(#[from] epic_mint::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}
