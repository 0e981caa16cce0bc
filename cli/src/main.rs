//! Command-line entry point for burn-redemption proofs.

mod commands;
mod settings;

use clap::Parser;
use std::path::PathBuf;

use redeem_utils::LogFormat;

#[derive(Parser)]
#[command(name = "redeem", about = "Burn-redemption Merkle proof tool")]
struct Cli {
    /// Campaign identifier; namespaces the local proof cache.
    /// When a config file is provided, defaults to the file's value.
    #[arg(long, env = "REDEEM_CAMPAIGN")]
    campaign: Option<String>,

    /// Proof source URLs, tried in order (comma-separated).
    #[arg(long, env = "REDEEM_CANDIDATES", value_delimiter = ',')]
    candidates: Vec<String>,

    /// Per-candidate fetch timeout in seconds.
    #[arg(long, env = "REDEEM_FETCH_TIMEOUT")]
    fetch_timeout_secs: Option<u64>,

    /// Proof file used when every candidate fails (defaults to the
    /// embedded index).
    #[arg(long, env = "REDEEM_FALLBACK")]
    fallback: Option<PathBuf>,

    /// Directory of the local proof cache.
    #[arg(long, env = "REDEEM_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "REDEEM_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, env = "REDEEM_LOG_FORMAT")]
    log_format: Option<String>,

    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Build a tree from a records file and write its proof index.
    Build {
        /// JSON array of `{ "address": "0x…", "tokenIds": [..] }`.
        #[arg(long)]
        records: PathBuf,

        /// Where to write the proof index (stdout when omitted).
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Print the proof for an address and token ids.
    Lookup {
        #[arg(long)]
        address: String,

        /// Token ids (comma-separated, any order).
        #[arg(long, value_delimiter = ',')]
        ids: Vec<u64>,
    },

    /// Check a proof against a root.
    Verify {
        /// Root published on-chain.
        #[arg(long)]
        root: String,

        #[arg(long)]
        address: String,

        #[arg(long, value_delimiter = ',')]
        ids: Vec<u64>,

        /// Proof as a JSON array of sibling hashes. When omitted, the proof
        /// is looked up in the campaign's index.
        #[arg(long)]
        proof: Option<String>,
    },

    /// Re-fetch the campaign's proof index into the local cache.
    Fetch,

    /// Show what the local cache holds for the campaign.
    Status,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = settings::resolve(&cli)?;

    let format: LogFormat = config
        .log_format
        .parse()
        .map_err(|e: String| anyhow::anyhow!(e))?;
    redeem_utils::init_tracing(format, &config.log_level);

    match cli.command {
        Command::Build { records, out } => commands::build(&records, out.as_deref()),
        Command::Lookup { address, ids } => commands::lookup(&config, &address, &ids).await,
        Command::Verify {
            root,
            address,
            ids,
            proof,
        } => commands::verify(&config, &root, &address, &ids, proof.as_deref()).await,
        Command::Fetch => commands::fetch(&config).await,
        Command::Status => commands::status(&config),
    }
}
