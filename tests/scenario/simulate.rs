use esg_risk_rs::{RiskDelta, RiskLabel};

use crate::common::analyzer_with_cutoff;

#[test]
fn zero_reduction_reproduces_the_stored_risk_flag() {
    // Classifier cutoff matches the pipeline's labelling cutoff, so a
    // no-op scenario must agree with the flag for every company.
    let analyzer = analyzer_with_cutoff(30.0);

    for record in analyzer.companies() {
        let outcome = analyzer.scenario(&record.symbol).reduction(0.0).simulate().unwrap();
        assert_eq!(
            outcome.new_label, record.risk_flag,
            "zero-reduction scenario disagreed with the flag for {}",
            record.symbol
        );
        assert_eq!(outcome.delta, RiskDelta::NoChange);
        assert_eq!(outcome.new_score, record.esg_score);
    }
}

#[test]
fn sufficient_reduction_flips_a_high_risk_company() {
    let analyzer = analyzer_with_cutoff(30.0);

    // XOM sits at 41.2; a 15-point improvement lands at 26.2, below the
    // cutoff.
    let outcome = analyzer.scenario("XOM").reduction(15.0).simulate().unwrap();
    assert_eq!(outcome.current_label, RiskLabel::High);
    assert_eq!(outcome.new_label, RiskLabel::Low);
    assert_eq!(outcome.delta, RiskDelta::Reduced);
    assert_eq!(outcome.delta.as_str(), "Risk Reduced");
    assert!((outcome.new_score - 26.2).abs() < 1e-9);
}

#[test]
fn insufficient_reduction_reports_no_change() {
    let analyzer = analyzer_with_cutoff(30.0);

    let outcome = analyzer.scenario("XOM").reduction(5.0).simulate().unwrap();
    assert_eq!(outcome.new_label, RiskLabel::High);
    assert_eq!(outcome.delta, RiskDelta::NoChange);
    assert_eq!(outcome.delta.as_str(), "No Change");
}

#[test]
fn negative_reduction_is_rejected() {
    let analyzer = analyzer_with_cutoff(30.0);
    let err = analyzer.scenario("XOM").reduction(-1.0).simulate().unwrap_err();
    assert_eq!(err.kind(), "feature_validation");
}

#[test]
fn unknown_symbol_is_rejected() {
    let analyzer = analyzer_with_cutoff(30.0);
    let err = analyzer.scenario("NOPE").simulate().unwrap_err();
    assert_eq!(err.kind(), "unknown_symbol");
}
