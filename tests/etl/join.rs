use esg_risk_rs::{EtlPipeline, RiskLabel};

use crate::common::{esg_row, fin_row, sample_esg, sample_financials};

#[test]
fn inner_join_keeps_only_shared_symbols() {
    // 5 symbols in each source, sharing exactly 3.
    let esg = vec![
        esg_row("A", "A Co", None, 10.0, 1.0, 1.0, 1.0),
        esg_row("B", "B Co", None, 20.0, 2.0, 2.0, 2.0),
        esg_row("C", "C Co", None, 30.0, 3.0, 3.0, 3.0),
        esg_row("D", "D Co", None, 40.0, 4.0, 4.0, 4.0),
        esg_row("E", "E Co", None, 50.0, 5.0, 5.0, 5.0),
    ];
    let fin = vec![
        fin_row("A", 1.0, 0.1),
        fin_row("C", 1.0, 0.1),
        fin_row("E", 1.0, 0.1),
        fin_row("X", 1.0, 0.1),
        fin_row("Y", 1.0, 0.1),
    ];

    let table = EtlPipeline::new().merge(&esg, &fin).unwrap();
    assert_eq!(table.len(), 3);
    assert!(table.get("A").is_some());
    assert!(table.get("C").is_some());
    assert!(table.get("E").is_some());
    assert!(table.get("B").is_none());
    assert!(table.get("X").is_none());
}

#[test]
fn merged_rows_carry_columns_from_both_sources() {
    let table = EtlPipeline::new()
        .merge(&sample_esg(), &sample_financials())
        .unwrap();

    let aapl = table.get("AAPL").unwrap();
    assert_eq!(aapl.name, "Apple Inc.");
    assert_eq!(aapl.sector.as_deref(), Some("Technology"));
    assert_eq!(aapl.esg_score, 18.5);
    assert_eq!(aapl.environment_score, 5.0);
    assert_eq!(aapl.debt_to_equity, Some(1.5));
    assert_eq!(aapl.roe, Some(0.28));
}

#[test]
fn orphans_in_either_source_are_dropped() {
    let table = EtlPipeline::new()
        .merge(&sample_esg(), &sample_financials())
        .unwrap();
    assert_eq!(table.len(), 5);
    assert!(table.get("TSLA").is_none(), "no fundamentals for TSLA");
    assert!(table.get("GE").is_none(), "no ratings for GE");
}

#[test]
fn risk_flag_follows_the_configured_cutoff() {
    let table = EtlPipeline::new()
        .merge(&sample_esg(), &sample_financials())
        .unwrap();

    assert_eq!(table.get("NEE").unwrap().risk_flag, RiskLabel::Low);
    assert_eq!(table.get("MSFT").unwrap().risk_flag, RiskLabel::Low);
    assert_eq!(table.get("JPM").unwrap().risk_flag, RiskLabel::High);
    assert_eq!(table.get("XOM").unwrap().risk_flag, RiskLabel::High);
}

#[test]
fn normalized_scores_span_the_unit_interval() {
    let table = EtlPipeline::new()
        .merge(&sample_esg(), &sample_financials())
        .unwrap();

    for row in &table {
        assert!(
            (0.0..=1.0).contains(&row.esg_score_normalized),
            "{} normalized to {}",
            row.symbol,
            row.esg_score_normalized
        );
    }
    // NEE has the minimum score (5.0), XOM the maximum (41.2).
    assert_eq!(table.get("NEE").unwrap().esg_score_normalized, 0.0);
    assert_eq!(table.get("XOM").unwrap().esg_score_normalized, 1.0);
}
