//! Property-based tests for the persist module.
//!
//! These tests use proptest to generate arbitrary finite parameter sets and
//! verify that both artifact formats preserve them bit-exactly.

use proptest::collection::vec as prop_vec;
use proptest::prelude::*;

use co2_regression::{ModelParameters, RegressionModel};

// =============================================================================
// Arbitrary Model Generators
// =============================================================================

/// Any finite f64, including subnormals and extreme magnitudes.
fn arb_finite_f64() -> impl Strategy<Value = f64> {
    prop::num::f64::ANY.prop_filter("must be finite", |x| x.is_finite())
}

fn arb_params() -> impl Strategy<Value = ModelParameters> {
    (prop_vec(arb_finite_f64(), 1..16), arb_finite_f64())
        .prop_map(|(coefficients, intercept)| ModelParameters::new(coefficients, intercept))
}

fn arb_model() -> impl Strategy<Value = RegressionModel> {
    (arb_params(), any::<bool>()).prop_map(|(params, named)| {
        let model = RegressionModel::from_params(params);
        if named {
            let names: Vec<String> = (0..model.n_features()).map(|i| format!("col_{i}")).collect();
            model.with_feature_names(names).unwrap()
        } else {
            model
        }
    })
}

fn assert_bit_exact(a: &ModelParameters, b: &ModelParameters) {
    assert_eq!(a.n_features(), b.n_features());
    assert_eq!(a.intercept().to_bits(), b.intercept().to_bits());
    for (x, y) in a.coefficients().iter().zip(b.coefficients()) {
        assert_eq!(x.to_bits(), y.to_bits());
    }
}

proptest! {
    #[test]
    fn binary_roundtrip(model in arb_model()) {
        let bytes = model.to_bytes().unwrap();
        let loaded = RegressionModel::from_bytes(&bytes).unwrap();

        assert_bit_exact(loaded.params(), model.params());
        prop_assert_eq!(loaded.feature_names(), model.feature_names());
    }

    #[test]
    fn json_roundtrip(model in arb_model()) {
        let json = model.to_json().unwrap();
        let loaded = RegressionModel::from_json(&json).unwrap();

        assert_bit_exact(loaded.params(), model.params());
        prop_assert_eq!(loaded.feature_names(), model.feature_names());
    }

    #[test]
    fn any_single_byte_flip_is_detected(model in arb_model(), index in any::<prop::sample::Index>(), mask in 1u8..=255) {
        let mut bytes = model.to_bytes().unwrap();
        let i = index.index(bytes.len());
        bytes[i] ^= mask;

        // Either rejected, or (for a flip in unused header bytes) decoded unchanged.
        match RegressionModel::from_bytes(&bytes) {
            Err(_) => {}
            Ok(loaded) => assert_bit_exact(loaded.params(), model.params()),
        }
    }
}
