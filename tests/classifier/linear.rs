use esg_risk_rs::{FeatureVector, LinearModel, RiskClassifier, RiskLabel};

#[test]
fn coefficients_round_trip_through_json() {
    let raw = r#"{
        "weights": [0.08, 0.01, 0.01, 0.01, 0.2, -0.5],
        "bias": -2.0,
        "threshold": 0.0
    }"#;

    let model = LinearModel::from_json(raw).unwrap();
    assert_eq!(model.weights[0], 0.08);
    assert_eq!(model.bias, -2.0);

    let rendered = serde_json::to_string(&model).unwrap();
    let reparsed = LinearModel::from_json(&rendered).unwrap();
    assert_eq!(reparsed, model);
}

#[test]
fn scoring_is_a_weighted_sum_in_contract_order() {
    let model = LinearModel {
        weights: [1.0, 0.0, 0.0, 0.0, 0.0, 0.0],
        bias: -20.0,
        threshold: 0.0,
    };

    // With only the first weight set, the score isolates the total ESG
    // component: any reordering of the vector would change the label.
    let high = FeatureVector::new(25.0, 99.0, 99.0, 99.0, 99.0, 99.0);
    assert_eq!(model.predict(&high).unwrap(), RiskLabel::High);

    let low = FeatureVector::new(15.0, 99.0, 99.0, 99.0, 99.0, 99.0);
    assert_eq!(model.predict(&low).unwrap(), RiskLabel::Low);

    assert_eq!(model.score(&low), -5.0);
}

#[test]
fn malformed_coefficient_files_are_rejected() {
    // Wrong arity: the contract is exactly six weights.
    let raw = r#"{"weights": [1.0, 2.0], "bias": 0.0, "threshold": 0.0}"#;
    assert_eq!(LinearModel::from_json(raw).unwrap_err().kind(), "model_format");

    assert!(LinearModel::from_json("not json").is_err());
}

#[test]
fn coefficients_load_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("model.json");
    std::fs::write(
        &path,
        r#"{"weights": [0.1, 0.0, 0.0, 0.0, 0.0, 0.0], "bias": 0.0, "threshold": 2.0}"#,
    )
    .unwrap();

    let model = LinearModel::from_file(&path).unwrap();
    let features = FeatureVector::new(30.0, 0.0, 0.0, 0.0, 0.0, 0.0);
    assert_eq!(model.predict(&features).unwrap(), RiskLabel::High);

    assert_eq!(
        LinearModel::from_file(dir.path().join("missing.json"))
            .unwrap_err()
            .kind(),
        "model_file"
    );
}
