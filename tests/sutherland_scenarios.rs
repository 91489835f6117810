//! 계산 흐름 전체(환산 → 점도 → 곡선) 시나리오 테스트.
use sutherland_viscosity::air::SutherlandConstants;
use sutherland_viscosity::calculation::{calculate, CalculationError, CalculationRequest};
use sutherland_viscosity::config::UnitSystem;
use sutherland_viscosity::conversion::ConversionError;
use sutherland_viscosity::units::TemperatureUnit;

#[test]
fn si_sea_level_air() {
    let req = CalculationRequest::new(UnitSystem::SI, TemperatureUnit::Celsius, 15.0);
    let res = calculate(&req).expect("calculation");
    assert!((res.temperature - 288.15).abs() < 1e-9);
    assert_eq!(res.temperature_display(), "288.15 K");

    let c = SutherlandConstants::SI;
    let expected = c.reference_viscosity
        * (288.15_f64 / c.reference_temperature).powf(1.5)
        * ((c.reference_temperature + c.sutherland_constant) / (288.15 + c.sutherland_constant));
    assert!((res.viscosity - expected).abs() < 1e-18);
    assert!((res.viscosity - 1.5725e-5).abs() < 1e-9, "mu={}", res.viscosity);
    assert!(res.viscosity_display().ends_with("kg·m⁻¹·s⁻¹"));

    // 입력이 기준점과 같으면 평탄한 곡선
    assert_eq!(res.curve.len(), 100);
    assert!(res.curve.iter().all(|p| (p.temperature - 288.15).abs() < 1e-9));
}

#[test]
fn usc_reference_point_identity() {
    let req = CalculationRequest::new(UnitSystem::USC, TemperatureUnit::Rankine, 518.67);
    let res = calculate(&req).expect("calculation");
    assert_eq!(res.temperature, 518.67);
    assert_eq!(res.temperature_display(), "518.67 R");
    assert_eq!(res.viscosity, 3.737e-7);
    assert!(res.viscosity_display().starts_with("3.737000e-7"));
}

#[test]
fn si_freezing_curve_runs_downward() {
    let req = CalculationRequest::new(UnitSystem::SI, TemperatureUnit::Fahrenheit, 32.0);
    let res = calculate(&req).expect("calculation");
    assert!((res.temperature - 273.15).abs() < 1e-9);
    assert!((res.reference_temperature - 288.15).abs() < 1e-9);
    assert_eq!(res.curve.len(), 100);
    assert!((res.curve[0].temperature - 288.15).abs() < 1e-9);
    assert_eq!(res.curve[99].temperature, res.temperature);
    for pair in res.curve.windows(2) {
        assert!(pair[1].temperature < pair[0].temperature);
        assert!(pair[1].viscosity < pair[0].viscosity);
    }
}

#[test]
fn usc_curve_starts_at_sea_level_rankine() {
    let req = CalculationRequest::new(UnitSystem::USC, TemperatureUnit::Fahrenheit, 200.0);
    let res = calculate(&req).expect("calculation");
    assert!((res.reference_temperature - 518.67).abs() < 1e-9);
    assert!((res.temperature - 659.67).abs() < 1e-9);
    assert_eq!(res.curve.last().map(|p| p.temperature), Some(res.temperature));
}

#[test]
fn invalid_symbol_aborts_before_any_result() {
    let err = CalculationRequest::from_symbol(UnitSystem::SI, "X", 10.0).unwrap_err();
    assert_eq!(err, ConversionError::InvalidUnit("X".to_string()));
    let wrapped: CalculationError = err.into();
    assert!(wrapped.to_string().contains('X'));
}

#[test]
fn custom_point_count_is_honoured() {
    let mut req = CalculationRequest::new(UnitSystem::SI, TemperatureUnit::Kelvin, 400.0);
    req.curve_points = 7;
    let res = calculate(&req).expect("calculation");
    assert_eq!(res.curve.len(), 7);
}
