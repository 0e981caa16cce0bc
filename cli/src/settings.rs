//! Config file + flag/env overlay.

use anyhow::Context;

use redeem_redemption::RedeemConfig;

use crate::Cli;

/// Start from the config file (or defaults) and apply every flag or env var
/// that was given.
pub fn resolve(cli: &Cli) -> anyhow::Result<RedeemConfig> {
    let base = match &cli.config {
        Some(path) => RedeemConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => RedeemConfig::default(),
    };
    Ok(overlay(base, cli))
}

fn overlay(base: RedeemConfig, cli: &Cli) -> RedeemConfig {
    RedeemConfig {
        campaign: cli.campaign.clone().unwrap_or(base.campaign),
        candidates: if cli.candidates.is_empty() {
            base.candidates
        } else {
            cli.candidates.clone()
        },
        fetch_timeout_secs: cli.fetch_timeout_secs.unwrap_or(base.fetch_timeout_secs),
        fallback_path: cli.fallback.clone().or(base.fallback_path),
        data_dir: cli.data_dir.clone().unwrap_or(base.data_dir),
        log_level: cli.log_level.clone().unwrap_or(base.log_level),
        log_format: cli.log_format.clone().unwrap_or(base.log_format),
        ..base
    }
}
