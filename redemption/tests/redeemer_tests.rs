//! End-to-end redemption flows: build → serve → cache → lookup → verify.

use std::sync::Arc;
use std::time::Duration;

use redeem_merkle::{build, verify_hex, BuildOutput};
use redeem_nullables::{NullClock, NullFetcher, NullKvStore, NullResponse};
use redeem_redemption::{
    fallback, CampaignCache, Eligibility, ProofLookup, ProofSource, Redeemer, RedemptionError,
    SourceOrigin,
};
use redeem_store::KeyValueStore;
use redeem_store_lmdb::LmdbEnvironment;
use redeem_types::{Address, BurnRecord, Hash32, TokenIds};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const CAMPAIGN: &str = "season-1";
const SOURCE: &str = "https://proofs.example/season-1.json";
const HOLDER: &str = "0x000000000000000000000000000000000000abc1";
const OTHER: &str = "0x000000000000000000000000000000000000def2";
/// 2026-10-19T00:00:00Z
const NOW: u64 = 1_792_368_000;

fn addr(hex: &str) -> Address {
    Address::parse(hex).unwrap()
}

fn campaign() -> BuildOutput {
    build(&[
        BurnRecord::new(addr(HOLDER), [501, 500]),
        BurnRecord::new(addr(OTHER), [7]),
    ])
}

fn root(out: &BuildOutput) -> Hash32 {
    Hash32::parse(&out.root).unwrap()
}

fn serving(out: &BuildOutput) -> NullFetcher {
    NullFetcher::new().with(SOURCE, NullResponse::Ok(out.proofs.to_json().unwrap()))
}

fn redeemer<S: KeyValueStore>(
    store: S,
    fetcher: NullFetcher,
) -> Redeemer<S, NullFetcher, NullClock> {
    let source = ProofSource::new(fetcher, vec![SOURCE.to_string()], Duration::from_secs(1));
    Redeemer::with_clock(
        CampaignCache::new(store, CAMPAIGN),
        source,
        NullClock::new(NOW),
    )
}

// ---------------------------------------------------------------------------
// Lookup and verification
// ---------------------------------------------------------------------------

#[tokio::test]
async fn holder_proof_found_regardless_of_case_and_order() {
    let out = campaign();
    let redeemer = redeemer(NullKvStore::new(), serving(&out));

    let proof = redeemer
        .proof_for_redemption("0x000000000000000000000000000000000000ABC1", &[501, 500])
        .await
        .unwrap();

    assert_eq!(Some(&proof), out.proofs.get(&format!("{HOLDER}_500_501")));
    assert!(verify_hex(&out.root, &proof.to_hex(), HOLDER, &[500, 501]));
}

#[tokio::test]
async fn unknown_holder_has_no_proof() {
    let out = campaign();
    let redeemer = redeemer(NullKvStore::new(), serving(&out));

    assert!(redeemer.proof_for_redemption(HOLDER, &[999]).await.is_none());
    assert!(redeemer.proof_for_redemption("not-an-address", &[500]).await.is_none());
}

#[tokio::test]
async fn eligibility_outcomes() {
    let out = campaign();
    let redeemer = redeemer(NullKvStore::new(), serving(&out));
    let ids = TokenIds::from([500, 501]);

    match redeemer.check_eligibility(&root(&out), &addr(HOLDER), &ids).await {
        Eligibility::Eligible { key, .. } => assert_eq!(key, format!("{HOLDER}_500_501")),
        other => panic!("expected eligible, got {other:?}"),
    }

    let missing = TokenIds::from([500]);
    assert_eq!(
        redeemer.check_eligibility(&root(&out), &addr(HOLDER), &missing).await,
        Eligibility::NotEligible
    );

    // Right proof, wrong root.
    let stale_root = Hash32::new([0x11; 32]);
    assert_eq!(
        redeemer.check_eligibility(&stale_root, &addr(HOLDER), &ids).await,
        Eligibility::NotEligible
    );
}

#[tokio::test]
async fn prove_reports_failure_kinds() {
    let out = campaign();
    let redeemer = redeemer(NullKvStore::new(), serving(&out));

    let err = redeemer
        .prove(&root(&out), &addr(OTHER), &TokenIds::from([8]))
        .await
        .unwrap_err();
    assert!(matches!(err, RedemptionError::ProofNotFound { key } if key == format!("{OTHER}_8")));

    let err = redeemer
        .prove(&Hash32::ZERO, &addr(OTHER), &TokenIds::from([7]))
        .await
        .unwrap_err();
    assert!(matches!(err, RedemptionError::VerificationFailed { .. }));
}

#[tokio::test]
async fn unavailable_when_nothing_can_be_fetched() {
    let redeemer = redeemer(NullKvStore::new(), NullFetcher::new());

    assert!(!redeemer.ensure_proofs().await);
    assert_eq!(
        redeemer
            .check_eligibility(&Hash32::ZERO, &addr(HOLDER), &TokenIds::from([500]))
            .await,
        Eligibility::Unavailable
    );
}

#[tokio::test]
async fn legacy_token_only_keys_still_resolve() {
    let out = build(&[BurnRecord::new(addr(HOLDER), [500, 501])]);
    let proof = out.proofs.get(&format!("{HOLDER}_500_501")).unwrap().clone();
    let legacy_doc = format!(r#"{{"500_501": {}}}"#, serde_json::to_string(&proof).unwrap());
    let fetcher = NullFetcher::new().with(SOURCE, NullResponse::Ok(legacy_doc));

    let legacy = redeemer(NullKvStore::new(), fetcher);
    assert_eq!(
        legacy.proof_for_redemption(HOLDER, &[500, 501]).await,
        Some(proof)
    );
}

#[tokio::test]
async fn canonical_only_lookup_ignores_legacy_keys() {
    let fetcher = NullFetcher::new().with(SOURCE, NullResponse::Ok(r#"{"500_501": []}"#.into()));
    let strict = redeemer(NullKvStore::new(), fetcher).with_lookup(ProofLookup::canonical());

    assert!(strict.proof_for_redemption(HOLDER, &[500, 501]).await.is_none());
}

// ---------------------------------------------------------------------------
// Caching
// ---------------------------------------------------------------------------

#[tokio::test]
async fn fetched_index_is_cached_with_timestamp() {
    let out = campaign();
    let store = Arc::new(NullKvStore::new());
    let redeemer = redeemer(Arc::clone(&store), serving(&out));

    assert!(redeemer.ensure_proofs().await);

    assert_eq!(
        store.get("redeem:season-1:loaded_at").unwrap().as_deref(),
        Some("2026-10-19T00:00:00Z")
    );
    let status = redeemer.cache().status();
    assert!(status.is_present());
    assert_eq!(status.entries, Some(2));
    assert_eq!(status.loaded_at.map(|t| t.as_secs()), Some(NOW));
}

#[tokio::test]
async fn cached_index_is_served_without_fetching() {
    let out = campaign();
    let store = Arc::new(NullKvStore::new());
    redeemer(Arc::clone(&store), serving(&out)).ensure_proofs().await;

    // Same store, source now gone.
    let offline = redeemer(Arc::clone(&store), NullFetcher::new());
    assert!(offline.proof_for_redemption(HOLDER, &[500, 501]).await.is_some());
}

#[tokio::test]
async fn malformed_cache_is_replaced() {
    let out = campaign();
    let store = Arc::new(NullKvStore::new());
    store.seed("redeem:season-1:proofs", "{not json");
    let redeemer = redeemer(Arc::clone(&store), serving(&out));

    assert!(redeemer.proof_for_redemption(HOLDER, &[500, 501]).await.is_some());
    assert_eq!(redeemer.cache().load().unwrap(), Some(out.proofs.clone()));
}

#[tokio::test]
async fn cache_write_failure_is_not_fatal() {
    let out = campaign();
    let store = Arc::new(NullKvStore::new());
    store.fail_writes(true);
    let redeemer = redeemer(Arc::clone(&store), serving(&out));

    assert!(redeemer.ensure_proofs().await);
    assert!(redeemer.proof_for_redemption(HOLDER, &[500, 501]).await.is_some());
    assert!(store.is_empty());
}

#[tokio::test]
async fn refresh_replaces_cached_index() {
    let store = Arc::new(NullKvStore::new());
    let first = campaign();
    redeemer(Arc::clone(&store), serving(&first)).ensure_proofs().await;

    let second = build(&[BurnRecord::new(addr(OTHER), [1, 2, 3])]);
    let redeemer = redeemer(Arc::clone(&store), serving(&second));
    let acquired = redeemer.refresh().await.unwrap();
    assert_eq!(acquired.origin, SourceOrigin::Network(SOURCE.to_string()));
    assert_eq!(acquired.index.len(), 1);
    assert_eq!(redeemer.cache().load().unwrap(), Some(second.proofs));
}

#[tokio::test]
async fn fallback_index_is_served_but_not_cached() {
    let out = campaign();
    let store = Arc::new(NullKvStore::new());
    let fetcher = NullFetcher::new();
    let source = ProofSource::new(&fetcher, vec![SOURCE.into()], Duration::from_secs(1))
        .with_fallback(fallback::embedded());
    let redeemer = Redeemer::with_clock(
        CampaignCache::new(Arc::clone(&store), CAMPAIGN),
        source,
        NullClock::new(NOW),
    );

    assert!(redeemer.ensure_proofs().await);
    assert!(!redeemer.cache().status().is_present());
    assert!(store.is_empty());

    // Source back up: the next lookup goes to the network and caches it.
    fetcher.respond(SOURCE, NullResponse::Ok(out.proofs.to_json().unwrap()));
    assert!(redeemer.proof_for_redemption(HOLDER, &[500, 501]).await.is_some());
    assert_eq!(redeemer.cache().status().entries, Some(2));
    assert_eq!(fetcher.requests().len(), 2);
}

#[tokio::test]
async fn lmdb_backed_cache_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let out = campaign();
    {
        let env = LmdbEnvironment::open(dir.path(), 4, 16 * 1024 * 1024).unwrap();
        assert!(redeemer(env.kv_store(), serving(&out)).ensure_proofs().await);
    }

    let env = LmdbEnvironment::open(dir.path(), 4, 16 * 1024 * 1024).unwrap();
    let offline = redeemer(env.kv_store(), NullFetcher::new());
    let status = offline.cache().status();
    assert_eq!(status.entries, Some(2));
    assert_eq!(status.loaded_at.map(|t| t.as_secs()), Some(NOW));
    assert!(offline.proof_for_redemption(HOLDER, &[501, 500]).await.is_some());
}
