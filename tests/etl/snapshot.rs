use esg_risk_rs::{EtlPipeline, SchemaStore};

use crate::common::{esg_row, fin_row, sample_esg, sample_financials};

#[test]
fn run_publishes_a_loadable_snapshot() {
    let mut store = SchemaStore::open_in_memory().unwrap();
    store.ingest_esg(&sample_esg()).unwrap();
    store.ingest_financials(&sample_financials()).unwrap();
    assert!(store.published_at().unwrap().is_none());

    let merged = EtlPipeline::new().run(&mut store).unwrap();
    let loaded = store.load_merged().unwrap();

    assert_eq!(loaded.len(), merged.len());
    assert_eq!(loaded.get("XOM").unwrap(), merged.get("XOM").unwrap());
    assert!(store.published_at().unwrap().is_some());

    let counts = store.counts().unwrap();
    assert_eq!(counts.esg_data, 6);
    assert_eq!(counts.financial_data, 6);
    assert_eq!(counts.merged, 5);
}

#[test]
fn rerun_fully_overwrites_the_previous_snapshot() {
    let mut store = SchemaStore::open_in_memory().unwrap();
    store.ingest_esg(&sample_esg()).unwrap();
    store.ingest_financials(&sample_financials()).unwrap();
    EtlPipeline::new().run(&mut store).unwrap();

    // A smaller population replaces the raw tables; the rerun must leave
    // nothing of the old snapshot behind.
    let esg = vec![
        esg_row("A", "A Co", None, 10.0, 1.0, 1.0, 1.0),
        esg_row("B", "B Co", None, 20.0, 2.0, 2.0, 2.0),
    ];
    let fin = vec![fin_row("A", 1.0, 0.1), fin_row("B", 1.0, 0.1)];
    store.ingest_esg(&esg).unwrap();
    store.ingest_financials(&fin).unwrap();
    EtlPipeline::new().run(&mut store).unwrap();

    let loaded = store.load_merged().unwrap();
    assert_eq!(loaded.len(), 2);
    assert!(loaded.get("AAPL").is_none());
}

#[test]
fn failed_run_keeps_the_previous_snapshot() {
    let mut store = SchemaStore::open_in_memory().unwrap();
    store.ingest_esg(&sample_esg()).unwrap();
    store.ingest_financials(&sample_financials()).unwrap();
    EtlPipeline::new().run(&mut store).unwrap();

    // Land a corrupt source (duplicate key) and rerun: the run fails and
    // the published snapshot is untouched.
    let bad = vec![
        esg_row("A", "A Co", None, 10.0, 1.0, 1.0, 1.0),
        esg_row("A", "A Co again", None, 12.0, 1.0, 1.0, 1.0),
    ];
    store.ingest_esg(&bad).unwrap();
    assert!(EtlPipeline::new().run(&mut store).is_err());

    let loaded = store.load_merged().unwrap();
    assert_eq!(loaded.len(), 5);
    assert!(loaded.get("XOM").is_some());
}

#[test]
fn snapshot_survives_reopening_the_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("esg_risk.db");

    {
        let mut store = SchemaStore::open(&path).unwrap();
        store.ingest_esg(&sample_esg()).unwrap();
        store.ingest_financials(&sample_financials()).unwrap();
        EtlPipeline::new().run(&mut store).unwrap();
    }

    let store = SchemaStore::open(&path).unwrap();
    let loaded = store.load_merged().unwrap();
    assert_eq!(loaded.len(), 5);
    assert_eq!(loaded.get("NEE").unwrap().esg_score_normalized, 0.0);
    assert!(store.published_at().unwrap().is_some());
}
