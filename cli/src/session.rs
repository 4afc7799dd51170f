use std::{fs, path::Path, time::Duration};

use epic_mint::{HttpProvider, MintConfig, MintController};
use serde::Deserialize;
use tracing::info;

use crate::{
    cli::SessionOptions,
    error::{CliError, Result},
    ui::Terminal,
};

pub type Session = MintController<HttpProvider, Terminal>;

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub provider: ProviderSettings,
    pub mint: MintConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProviderSettings {
    pub url: Option<String>,
    pub timeout_secs: Option<u64>,
}

pub fn load_settings(path: Option<&Path>) -> Result<Settings> {
    let Some(path) = path else {
        return Ok(Settings::default());
    };

    if !path.is_file() {
        return Err(CliError::MissingSettings(path.to_path_buf()));
    }

    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

pub fn open(options: &SessionOptions) -> Result<Session> {
    let settings = load_settings(options.config.as_deref())?;

    let url = options.rpc_url.clone().or(settings.provider.url);
    let provider = url.map(|url| {
        info!(%url, "using wallet endpoint");
        let provider = HttpProvider::new(url);
        match settings.provider.timeout_secs {
            Some(secs) => provider.with_timeout(Duration::from_secs(secs)),
            None => provider,
        }
    });

    Ok(MintController::new(provider, Terminal, settings.mint))
}
