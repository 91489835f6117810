//! 단위 정의 및 변환 모듈 모음.

pub mod temperature;

pub use temperature::{
    convert_temperature, to_kelvin, to_rankine, AbsoluteScale, TemperatureUnit,
};
