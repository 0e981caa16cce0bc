//! Subcommand implementations.

use std::path::Path;

use anyhow::{bail, Context};

use redeem_merkle::{build as build_tree, verify_hex, ProofIndex};
use redeem_redemption::cache::format_rfc3339;
use redeem_redemption::{
    fallback, CampaignCache, Eligibility, HttpFetcher, ProofSource, RedeemConfig, Redeemer,
    SourceOrigin,
};
use redeem_store_lmdb::{LmdbEnvironment, LmdbKvStore};
use redeem_types::{Address, BurnRecord, Hash32, Timestamp, TokenIds};
use redeem_utils::format_duration;

const MAX_DBS: u32 = 4;

type CliRedeemer = Redeemer<LmdbKvStore, HttpFetcher>;

fn open_cache(config: &RedeemConfig) -> anyhow::Result<CampaignCache<LmdbKvStore>> {
    let env = LmdbEnvironment::open(&config.data_dir, MAX_DBS, config.map_size)
        .with_context(|| format!("opening cache at {}", config.data_dir.display()))?;
    Ok(CampaignCache::new(env.kv_store(), config.campaign.clone()))
}

fn fallback_index(config: &RedeemConfig) -> anyhow::Result<ProofIndex> {
    match &config.fallback_path {
        Some(path) => Ok(fallback::from_file(path)?),
        None => Ok(fallback::embedded()),
    }
}

fn redeemer(config: &RedeemConfig) -> anyhow::Result<CliRedeemer> {
    let fetcher = HttpFetcher::new(config.fetch_timeout())?;
    let source = ProofSource::new(fetcher, config.candidates.clone(), config.fetch_timeout())
        .with_fallback(fallback_index(config)?);
    Ok(Redeemer::new(open_cache(config)?, source))
}

pub fn load_records(path: &Path) -> anyhow::Result<Vec<BurnRecord>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("reading records {}", path.display()))?;
    serde_json::from_str(&contents).with_context(|| format!("parsing records {}", path.display()))
}

pub fn build(records: &Path, out: Option<&Path>) -> anyhow::Result<()> {
    let records = load_records(records)?;
    let output = build_tree(&records);
    tracing::info!(
        records = records.len(),
        proofs = output.proofs.len(),
        root = %output.root,
        "built redemption tree"
    );
    match out {
        Some(path) => {
            output.proofs.save(path)?;
            println!("{}", output.root);
        }
        None => {
            println!("root: {}", output.root);
            println!("{}", output.proofs.to_json_pretty()?);
        }
    }
    Ok(())
}

pub async fn lookup(config: &RedeemConfig, address: &str, ids: &[u64]) -> anyhow::Result<()> {
    let redeemer = redeemer(config)?;
    match redeemer.proof_for_redemption(address, ids).await {
        Some(proof) => {
            println!("{}", serde_json::to_string_pretty(&proof)?);
            Ok(())
        }
        None => bail!("no proof for {address} with ids {ids:?}"),
    }
}

pub async fn verify(
    config: &RedeemConfig,
    root: &str,
    address: &str,
    ids: &[u64],
    proof: Option<&str>,
) -> anyhow::Result<()> {
    if let Some(proof) = proof {
        let siblings: Vec<String> = serde_json::from_str(proof).context("parsing --proof")?;
        if verify_hex(root, &siblings, address, ids) {
            println!("valid");
            return Ok(());
        }
        bail!("proof does not reproduce {root}");
    }

    let root = Hash32::parse(root)?;
    let address = Address::parse(address)?;
    let token_ids = TokenIds::from(ids.to_vec());
    match redeemer(config)?
        .check_eligibility(&root, &address, &token_ids)
        .await
    {
        Eligibility::Eligible { key, proof } => {
            println!("eligible ({key}, {} siblings)", proof.len());
            Ok(())
        }
        Eligibility::NotEligible => bail!("not eligible"),
        Eligibility::Unavailable => bail!("proofs unavailable, try again later"),
    }
}

pub async fn fetch(config: &RedeemConfig) -> anyhow::Result<()> {
    let acquired = redeemer(config)?.refresh().await?;
    match acquired.origin {
        SourceOrigin::Network(source) => println!(
            "cached {} proofs for campaign {} from {source}",
            acquired.index.len(),
            config.campaign
        ),
        SourceOrigin::Fallback => println!(
            "every proof source failed; fallback holds {} proofs (not cached)",
            acquired.index.len()
        ),
    }
    Ok(())
}

pub fn status(config: &RedeemConfig) -> anyhow::Result<()> {
    let status = open_cache(config)?.status();
    println!("campaign: {}", status.campaign);
    match status.entries {
        Some(n) => println!("proofs:   {n}"),
        None => println!("proofs:   none cached"),
    }
    if let Some(at) = status.loaded_at {
        println!(
            "loaded:   {} ({} ago)",
            format_rfc3339(at),
            format_duration(at.elapsed_since(Timestamp::now()))
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(dir: &Path) -> RedeemConfig {
        RedeemConfig {
            data_dir: dir.join("cache"),
            map_size: 4 * 1024 * 1024,
            ..RedeemConfig::default()
        }
    }

    #[test]
    fn records_file_parses_mixed_id_forms() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.json");
        std::fs::write(
            &path,
            r#"[
                {"address": "0x000000000000000000000000000000000000ABC1", "tokenIds": [501, "500"]},
                {"address": "000000000000000000000000000000000000def2", "tokenIds": []}
            ]"#,
        )
        .unwrap();
        let records = load_records(&path).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].token_ids.as_slice(), &[500, 501]);
    }

    #[test]
    fn build_writes_proof_file() {
        let dir = tempfile::tempdir().unwrap();
        let records = dir.path().join("records.json");
        let out = dir.path().join("proofs.json");
        std::fs::write(
            &records,
            r#"[{"address": "0x000000000000000000000000000000000000abc1", "tokenIds": [1]}]"#,
        )
        .unwrap();
        build(&records, Some(&out)).unwrap();
        let index = ProofIndex::load(&out).unwrap();
        assert!(index.contains_key("0x000000000000000000000000000000000000abc1_1"));
    }

    #[tokio::test]
    async fn fetch_without_candidates_leaves_cache_empty() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path());
        fetch(&config).await.unwrap();
        let status = open_cache(&config).unwrap().status();
        assert_eq!(status.entries, None);
        assert!(status.loaded_at.is_none());
    }

    #[tokio::test]
    async fn verify_with_inline_proof() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path());
        let index = fallback::embedded();
        let (key, proof) = index.iter().next().unwrap();
        let mut parts = key.split('_');
        let address = parts.next().unwrap().to_string();
        let ids: Vec<u64> = parts.map(|p| p.parse().unwrap()).collect();
        let inline = serde_json::to_string(proof).unwrap();
        let root = fallback::EMBEDDED_FALLBACK_ROOT;

        verify(&config, root, &address, &ids, Some(&inline))
            .await
            .unwrap();
        assert!(verify(&config, root, &address, &[1], Some(&inline))
            .await
            .is_err());
    }

    #[tokio::test]
    async fn verify_against_fallback_index() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path());
        verify(
            &config,
            fallback::EMBEDDED_FALLBACK_ROOT,
            "0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed",
            &[17],
            None,
        )
        .await
        .unwrap();
    }
}
