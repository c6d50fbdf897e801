//! Targeted validation-failure tests for JSON artifacts.

use serde_json::Value;

use co2_regression::{ArtifactError, Error, ModelParameters, RegressionModel};

fn fixture_value() -> Value {
    let model = RegressionModel::from_params(ModelParameters::new(vec![10.5, 3.25, -4.0], 20.0))
        .with_feature_names(["ENGINESIZE", "CYLINDERS", "FUELTYPE"])
        .unwrap();
    serde_json::from_str(&model.to_json().unwrap()).expect("parse fixture json")
}

fn load_err(v: Value) -> ArtifactError {
    let json = serde_json::to_string(&v).expect("serialize mutated json");
    match RegressionModel::from_json(&json).expect_err("expected error") {
        Error::CorruptArtifact(inner) => inner,
        other => panic!("expected CorruptArtifact, got {other:?}"),
    }
}

#[test]
fn fixture_is_valid() {
    let json = serde_json::to_string(&fixture_value()).unwrap();
    let model = RegressionModel::from_json(&json).unwrap();
    assert_eq!(model.n_features(), 3);
}

#[test]
fn validation_fails_on_wrong_format_tag() {
    let mut v = fixture_value();
    v["format"] = Value::from("bstr");

    assert!(matches!(load_err(v), ArtifactError::NotAnArtifact));
}

#[test]
fn validation_fails_on_future_version() {
    let mut v = fixture_value();
    v["version"] = Value::from(2u32);

    let err = load_err(v);
    assert!(matches!(err, ArtifactError::UnsupportedVersion { major: 2, .. }), "got: {err:?}");
}

#[test]
fn validation_fails_on_version_zero() {
    let mut v = fixture_value();
    v["version"] = Value::from(0u32);

    let err = load_err(v);
    assert!(matches!(err, ArtifactError::UnsupportedVersion { major: 0, .. }), "got: {err:?}");
}

#[test]
fn validation_fails_on_name_count_mismatch() {
    let mut v = fixture_value();

    let names = v
        .pointer_mut("/model/meta/feature_names")
        .and_then(|x| x.as_array_mut())
        .expect("feature_names array");
    names.pop();

    let err = load_err(v);
    assert!(
        matches!(err, ArtifactError::FeatureCountMismatch { field: "feature_names", declared: 3, actual: 2 }),
        "got: {err:?}"
    );
}

#[test]
fn validation_fails_on_null_coefficient() {
    // serde_json writes NaN as null; it must not come back as a number.
    let mut v = fixture_value();
    v["model"]["coefficients"][1] = Value::Null;

    assert!(matches!(load_err(v), ArtifactError::InvalidJson(_)));
}

#[test]
fn validation_fails_on_missing_intercept() {
    let mut v = fixture_value();
    v["model"]
        .as_object_mut()
        .expect("model object")
        .remove("intercept");

    assert!(matches!(load_err(v), ArtifactError::InvalidJson(_)));
}

#[test]
fn validation_fails_on_malformed_document() {
    let err = RegressionModel::from_json("{\"format\": \"co2-regression\", ").unwrap_err();
    assert!(matches!(err, Error::CorruptArtifact(ArtifactError::InvalidJson(_))));
}

#[test]
fn names_may_be_absent() {
    let mut v = fixture_value();
    v["model"]["meta"]["feature_names"] = Value::Null;

    let json = serde_json::to_string(&v).unwrap();
    let model = RegressionModel::from_json(&json).unwrap();
    assert!(model.feature_names().is_none());
}
