//! 공기의 점성 모델.

pub mod sutherland;
pub mod viscosity_curve;

pub use sutherland::{sutherland_viscosity, SutherlandConstants, ViscosityError};
pub use viscosity_curve::{
    curve_to_csv, linspace, sample, CurvePoint, DEFAULT_CURVE_POINTS,
    MAX_CURVE_POINTS,
};
