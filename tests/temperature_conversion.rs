//! 단위 기호 기반 온도 환산 회귀 테스트.
use sutherland_viscosity::conversion::{self, ConversionError};
use sutherland_viscosity::units::AbsoluteScale;

#[test]
fn freezing_point_on_both_scales() {
    assert_eq!(conversion::to_kelvin(0.0, "C").unwrap(), 273.15);
    assert_eq!(conversion::to_rankine(0.0, "F").unwrap(), 459.67);
}

#[test]
fn native_scale_is_identity() {
    for x in [-459.67, -40.0, 0.0, 1.5, 288.15, 1.0e4] {
        assert_eq!(conversion::to_kelvin(x, "K").unwrap(), x);
        assert_eq!(conversion::to_rankine(x, "R").unwrap(), x);
    }
}

#[test]
fn rankine_and_kelvin_cross_check() {
    for x in [0.0, 100.0, 273.15, 500.0] {
        let r = conversion::to_rankine(x, "K").unwrap();
        let k = conversion::to_kelvin(x, "K").unwrap();
        assert!((r - k * 9.0 / 5.0).abs() < 1e-12);
    }
    // -40 °C == -40 °F
    let c = conversion::convert(-40.0, "C", AbsoluteScale::Kelvin).unwrap();
    let f = conversion::convert(-40.0, "F", AbsoluteScale::Kelvin).unwrap();
    assert!((c - f).abs() < 1e-9);
}

#[test]
fn unknown_symbol_fails_for_both_targets() {
    let expected = ConversionError::InvalidUnit("X".to_string());
    assert_eq!(conversion::to_kelvin(1.0, "X"), Err(expected.clone()));
    assert_eq!(conversion::to_rankine(1.0, "X"), Err(expected));
}
