//! prepare-genesis: entry point for computing a network's genesis ledger.

mod config;

use anyhow::Context;
use clap::Parser;
use config::PrepareConfig;
use genesis_ledger::{prepare_from_files, GenesisOutput};
use genesis_types::{GenesisPolicy, NetworkType};
use genesis_utils::{init_logging, LogFormat};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "prepare-genesis",
    about = "Compute genesis balances, claim grants and vesting accounts"
)]
struct Cli {
    /// Path to a TOML run configuration. CLI flags and env vars override it.
    #[arg(long, env = "GENESIS_CONFIG")]
    config: Option<PathBuf>,

    /// Log filter: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "GENESIS_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log output: "human" or "json".
    #[arg(long, env = "GENESIS_LOG_FORMAT")]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand, Debug)]
enum Command {
    /// Run the preparation pipeline and report the result.
    Prepare {
        /// "m"/"mainnet" or "t"/"testnet". Defaults to the config file's network.
        network: Option<NetworkType>,

        /// Airdrop snapshot CSV.
        #[arg(long, env = "GENESIS_AIRDROP_CSV")]
        airdrop_csv: Option<PathBuf>,

        /// Vesting grants CSV.
        #[arg(long, env = "GENESIS_VESTING_CSV")]
        vesting_csv: Option<PathBuf>,

        /// Make no vesting grants, ignoring any vesting CSV setting.
        #[arg(long)]
        no_vesting: bool,
    },

    /// Print a network's preset policy as TOML.
    ShowPolicy {
        network: NetworkType,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let file_config = match &cli.config {
        Some(path) => PrepareConfig::from_toml_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => PrepareConfig::default(),
    };

    let log_format = cli.log_format.unwrap_or(file_config.log_format);
    let log_level = cli.log_level.as_deref().unwrap_or(&file_config.log_level);
    init_logging(log_format, log_level)?;
    if let Some(path) = &cli.config {
        tracing::info!(path = %path.display(), "loaded config");
    }

    match cli.command {
        Command::Prepare {
            network,
            airdrop_csv,
            vesting_csv,
            no_vesting,
        } => {
            let network = network.unwrap_or(file_config.network);
            let policy = file_config.policy_for(network);
            let airdrop_csv = airdrop_csv.unwrap_or_else(|| file_config.airdrop_csv.clone());
            let vesting_csv = if no_vesting {
                None
            } else {
                vesting_csv.or_else(|| file_config.vesting_csv.clone())
            };
            prepare(network, &policy, airdrop_csv, vesting_csv)
        }
        Command::ShowPolicy { network } => {
            let text = toml::to_string_pretty(&GenesisPolicy::for_network(network))?;
            print!("{text}");
            Ok(())
        }
    }
}

fn prepare(
    network: NetworkType,
    policy: &GenesisPolicy,
    airdrop_csv: PathBuf,
    vesting_csv: Option<PathBuf>,
) -> anyhow::Result<()> {
    let _span = tracing::info_span!("prepare", network = network.as_str()).entered();
    tracing::info!(
        genesis_time = %policy.genesis_time,
        denom = %policy.bond_denom,
        airdrop_csv = %airdrop_csv.display(),
        vesting_csv = ?vesting_csv,
        "preparing genesis"
    );

    let output = prepare_from_files(policy, &airdrop_csv, vesting_csv.as_deref()).map_err(|e| {
        tracing::error!(kind = ?e.kind(), error = %e, "genesis preparation aborted");
        anyhow::Error::new(e)
    })?;

    report(&output)
}

fn report(output: &GenesisOutput) -> anyhow::Result<()> {
    let digest = output.digest_hex().context("encoding output for digest")?;
    let c = &output.components;
    tracing::info!(
        dex_drop = %c.dex_drop,
        boost_drop = %c.boost_drop,
        foundation = %c.foundation_residual,
        fixed_allocations = %c.fixed_allocations,
        vesting = %c.vesting_total,
        vesting_accounts = output.vesting_accounts.len(),
        balances = output.balances.len(),
        claim_grants = output.claim_grants.len(),
        total_supply = %output.supply,
        digest = %digest,
        "genesis prepared"
    );
    Ok(())
}
