use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

#[derive(Debug, Parser)]
#[command(name = "epic-mint")]
#[command(bin_name = "epic-mint")]
#[command(about = "Connect a wallet and mint Epic NFTs from the terminal")]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub session: SessionOptions,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Look for an authorized wallet and show the page.
    Status,
    /// Ask the wallet for an account.
    Connect,
    /// Mint one NFT with the connected account.
    Mint,
    /// Print how many NFTs were minted so far.
    Count,
    /// Wait for mint notifications and show each one.
    Watch(WatchArgs),
    /// Generate shell completion scripts.
    Completions(CompletionsArgs),
}

#[derive(Debug, Args)]
pub struct SessionOptions {
    /// Settings file (TOML) with `[provider]` and `[mint]` tables.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Wallet JSON-RPC endpoint. Without one, no wallet is available.
    #[arg(long, global = true, env = "EPIC_MINT_RPC_URL")]
    pub rpc_url: Option<String>,

    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Args)]
pub struct WatchArgs {
    /// Stop after this many notifications.
    #[arg(long)]
    pub max_events: Option<usize>,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for.
    #[arg(value_enum)]
    pub shell: Shell,
}
