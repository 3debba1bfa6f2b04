use esg_risk_rs::{
    CutoffClassifier, EsgAnalyzer, FeatureVector, RawFinancialRow, RiskClassifier, RiskLabel,
    ValidatingClassifier,
};

use esg_risk_rs::EtlPipeline;

use crate::common::{esg_row, fin_row, sample_esg, sample_financials};

#[test]
fn adapter_rejects_non_finite_features() {
    let classifier = ValidatingClassifier::new(CutoffClassifier::new(30.0));

    let nan = FeatureVector::new(f64::NAN, 1.0, 1.0, 1.0, 1.0, 1.0);
    assert_eq!(classifier.predict(&nan).unwrap_err().kind(), "feature_validation");

    let inf = FeatureVector::new(20.0, 1.0, 1.0, 1.0, f64::INFINITY, 1.0);
    assert_eq!(classifier.predict(&inf).unwrap_err().kind(), "feature_validation");

    let ok = FeatureVector::new(20.0, 1.0, 1.0, 1.0, 1.0, 1.0);
    assert_eq!(classifier.predict(&ok).unwrap(), RiskLabel::Low);
}

#[test]
fn missing_fundamentals_fail_at_the_boundary_not_silently() {
    // JPM's fundamentals are unknown: the record merges, but any request
    // that needs its feature vector is rejected instead of scoring NaN.
    let esg = vec![
        esg_row("JPM", "JPMorgan Chase & Co.", Some("Financials"), 32.0, 9.5, 13.0, 9.5),
        esg_row("AAPL", "Apple Inc.", Some("Technology"), 18.5, 5.0, 7.0, 6.5),
    ];
    let fin = vec![
        RawFinancialRow {
            symbol: "JPM".into(),
            debt_to_equity: None,
            roe: None,
        },
        fin_row("AAPL", 1.5, 0.28),
    ];
    let table = EtlPipeline::new().merge(&esg, &fin).unwrap();
    let analyzer = EsgAnalyzer::new(table, CutoffClassifier::new(30.0));

    assert_eq!(
        analyzer.predict_current("JPM").unwrap_err().kind(),
        "feature_validation"
    );
    assert_eq!(analyzer.predict_current("AAPL").unwrap(), RiskLabel::Low);
}

#[test]
fn feature_vector_order_matches_the_contract() {
    let features = FeatureVector::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0);
    assert_eq!(features.as_slice(), &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    assert_eq!(features.esg_score(), 1.0);

    // Substituting the ESG score must leave every other component alone.
    let shifted = features.with_esg_score(9.0);
    assert_eq!(shifted.as_slice(), &[9.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
}

#[test]
fn record_features_follow_column_order() {
    let table = EtlPipeline::new()
        .merge(&sample_esg(), &sample_financials())
        .unwrap();
    let msft = table.get("MSFT").unwrap();
    let features = msft.features();
    assert_eq!(features.as_slice(), &[25.0, 8.0, 9.0, 8.0, 0.5, 0.35]);
}
