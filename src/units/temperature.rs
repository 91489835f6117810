use serde::{Deserialize, Serialize};

/// 온도 단위를 정의한다. 각 단위는 한 글자 기호(C, F, K, R)로 식별된다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TemperatureUnit {
    Celsius,
    Fahrenheit,
    Kelvin,
    Rankine,
}

/// 서덜랜드 식에 넣을 수 있는 절대 온도 눈금.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AbsoluteScale {
    Kelvin,
    Rankine,
}

impl TemperatureUnit {
    /// 선택기에 표시되는 순서(C, F, K, R).
    pub const ALL: [TemperatureUnit; 4] = [
        TemperatureUnit::Celsius,
        TemperatureUnit::Fahrenheit,
        TemperatureUnit::Kelvin,
        TemperatureUnit::Rankine,
    ];

    pub fn symbol(self) -> char {
        match self {
            TemperatureUnit::Celsius => 'C',
            TemperatureUnit::Fahrenheit => 'F',
            TemperatureUnit::Kelvin => 'K',
            TemperatureUnit::Rankine => 'R',
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "°C",
            TemperatureUnit::Fahrenheit => "°F",
            TemperatureUnit::Kelvin => "K",
            TemperatureUnit::Rankine => "R",
        }
    }
}

impl AbsoluteScale {
    pub fn symbol(self) -> &'static str {
        match self {
            AbsoluteScale::Kelvin => "K",
            AbsoluteScale::Rankine => "R",
        }
    }
}

/// 주어진 값을 켈빈으로 변환한다.
pub fn to_kelvin(value: f64, unit: TemperatureUnit) -> f64 {
    match unit {
        TemperatureUnit::Celsius => value + 273.15,
        TemperatureUnit::Fahrenheit => (value - 32.0) * 5.0 / 9.0 + 273.15,
        TemperatureUnit::Kelvin => value,
        TemperatureUnit::Rankine => value * 5.0 / 9.0,
    }
}

/// 주어진 값을 랭킨으로 변환한다.
pub fn to_rankine(value: f64, unit: TemperatureUnit) -> f64 {
    match unit {
        TemperatureUnit::Celsius => value * 9.0 / 5.0 + 491.67,
        TemperatureUnit::Fahrenheit => value + 459.67,
        TemperatureUnit::Kelvin => value * 9.0 / 5.0,
        TemperatureUnit::Rankine => value,
    }
}

/// 온도를 지정한 절대 눈금으로 변환한다.
pub fn convert_temperature(value: f64, unit: TemperatureUnit, target: AbsoluteScale) -> f64 {
    match target {
        AbsoluteScale::Kelvin => to_kelvin(value, unit),
        AbsoluteScale::Rankine => to_rankine(value, unit),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn freezing_point_constants() {
        assert_eq!(to_kelvin(0.0, TemperatureUnit::Celsius), 273.15);
        assert_eq!(to_rankine(0.0, TemperatureUnit::Fahrenheit), 459.67);
        assert!((to_kelvin(32.0, TemperatureUnit::Fahrenheit) - 273.15).abs() < 1e-12);
        assert!((to_rankine(0.0, TemperatureUnit::Celsius) - 491.67).abs() < 1e-12);
    }

    #[test]
    fn symbols_follow_selector_order() {
        let symbols: String = TemperatureUnit::ALL.iter().map(|u| u.symbol()).collect();
        assert_eq!(symbols, "CFKR");
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn identity_on_native_scale(x in -1.0e6_f64..1.0e6_f64) {
            prop_assert_eq!(to_kelvin(x, TemperatureUnit::Kelvin), x);
            prop_assert_eq!(to_rankine(x, TemperatureUnit::Rankine), x);
        }

        #[test]
        fn rankine_is_kelvin_times_nine_fifths(x in -1.0e6_f64..1.0e6_f64) {
            let via_rankine = to_rankine(x, TemperatureUnit::Kelvin);
            let via_kelvin = to_kelvin(x, TemperatureUnit::Kelvin) * 9.0 / 5.0;
            prop_assert!((via_rankine - via_kelvin).abs() <= 1e-9 * x.abs().max(1.0));
        }

        #[test]
        fn scales_agree_for_every_unit(x in -500.0_f64..5000.0_f64) {
            for unit in TemperatureUnit::ALL {
                let k = to_kelvin(x, unit);
                let r = to_rankine(x, unit);
                prop_assert!((r - k * 1.8).abs() < 1e-9 * r.abs().max(1.0));
            }
        }
    }
}
