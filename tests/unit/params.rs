//! Validates parameter defaults and range clamping

use texweave::Parameters;

#[test]
fn test_defaults_match_the_documented_values() {
    let params = Parameters::new();
    assert!(!params.h_tile());
    assert!(!params.v_tile());
    assert!((params.outlier_sensitivity() - 32.0 / 256.0).abs() < f64::EPSILON);
    assert_eq!(params.neighbors(), 29);
    assert_eq!(params.tries(), 192);
    assert_eq!(params.magic(), 192);
}

#[test]
fn test_sensitivity_clamps_to_unit_range() {
    let mut params = Parameters::new();
    params.set_outlier_sensitivity(2.5);
    assert!((params.outlier_sensitivity() - 1.0).abs() < f64::EPSILON);
    params.set_outlier_sensitivity(-0.5);
    assert!(params.outlier_sensitivity().abs() < f64::EPSILON);
}

#[test]
fn test_neighbors_clamp_to_largest_disc() {
    let mut params = Parameters::new();
    params.set_neighbors(5000);
    assert_eq!(params.neighbors(), 1093);
    params.set_neighbors(0);
    assert_eq!(params.neighbors(), 0);
}

#[test]
fn test_tries_clamp() {
    let mut params = Parameters::new();
    params.set_tries(1 << 20);
    assert_eq!(params.tries(), 65536);
}

#[test]
fn test_setters_chain() {
    let mut params = Parameters::new();
    params
        .set_h_tile(true)
        .set_v_tile(true)
        .set_magic(0)
        .set_random_seed(123);
    assert!(params.h_tile());
    assert!(params.v_tile());
    assert_eq!(params.magic(), 0);
    assert_eq!(params.random_seed(), 123);
}
