use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use super::sutherland::SutherlandConstants;
use crate::units::AbsoluteScale;

/// 그래프 기본 샘플 개수.
pub const DEFAULT_CURVE_POINTS: usize = 100;
/// 곡선 샘플 개수의 상한.
pub const MAX_CURVE_POINTS: usize = 10_000;

/// 온도-점도 한 점.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    pub temperature: f64,
    pub viscosity: f64,
}

/// `from`에서 `to`까지 양 끝을 포함해 `count`개의 등간격 온도를 만든다.
///
/// 방향은 어느 쪽이든 허용하며 마지막 값은 항상 `to`와 정확히 같다.
/// `count == 1`이면 `from` 하나만 돌려준다.
pub fn linspace(from: f64, to: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![from],
        n => {
            let step = (to - from) / (n - 1) as f64;
            (0..n)
                .map(|i| if i == n - 1 { to } else { from + step * i as f64 })
                .collect()
        }
    }
}

/// 구간 [from, to]를 샘플링하여 각 온도의 점도를 계산한다.
pub fn sample(
    from: f64,
    to: f64,
    count: usize,
    constants: &SutherlandConstants,
) -> Vec<CurvePoint> {
    linspace(from, to, count)
        .into_iter()
        .map(|temperature| CurvePoint {
            temperature,
            viscosity: constants.viscosity(temperature),
        })
        .collect()
}

/// 곡선을 CSV 문자열로 만든다. 헤더는 `temperature_K,viscosity` 형식.
pub fn curve_to_csv(points: &[CurvePoint], scale: AbsoluteScale) -> String {
    let mut csv = format!("temperature_{},viscosity\n", scale.symbol());
    for p in points {
        let _ = writeln!(csv, "{},{:e}", p.temperature, p.viscosity);
    }
    csv
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degenerate_interval_is_flat() {
        let pts = sample(300.0, 300.0, 5, &SutherlandConstants::SI);
        assert_eq!(pts.len(), 5);
        assert!(pts.iter().all(|p| p.temperature == 300.0));
        assert!(pts.iter().all(|p| p.viscosity == pts[0].viscosity));
    }

    #[test]
    fn zero_and_one_point() {
        assert!(linspace(1.0, 2.0, 0).is_empty());
        assert_eq!(linspace(1.0, 2.0, 1), vec![1.0]);
        assert_eq!(linspace(1.0, 2.0, 2), vec![1.0, 2.0]);
    }

    #[test]
    fn csv_has_header_and_one_row_per_point() {
        let pts = sample(288.15, 300.0, 3, &SutherlandConstants::SI);
        let csv = curve_to_csv(&pts, AbsoluteScale::Kelvin);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "temperature_K,viscosity");
        assert_eq!(lines.len(), 4);
        assert!(lines[3].starts_with("300,"));
    }
}
