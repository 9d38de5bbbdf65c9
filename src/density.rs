//! 매질 밀도 근사. 증기는 압력 함수, 그 외는 매질명 부분 문자열로 고른 상수.

/// 매질명에 포함되면 증기 상관식을 적용하는 표기.
pub const STEAM_MARKER: &str = "蒸汽";

/// 일치하는 표기가 없을 때의 밀도 (물 기준) [kg/m3].
pub const DEFAULT_DENSITY_KG_PER_M3: f64 = 1000.0;

// 위에서부터 먼저 포함되는 표기가 이긴다.
const DENSITY_MARKERS: &[(&str, f64)] = &[
    ("水", 1000.0),
    (STEAM_MARKER, 1.0),
    ("空气", 1.2),
    ("氧气", 1.43),
    ("天然气", 0.7),
    ("氨", 0.77),
    ("硫酸", 1840.0),
];

/// 매질명이 증기를 가리키는지 판단한다.
pub fn is_steam(medium: &str) -> bool {
    medium.contains(STEAM_MARKER)
}

/// 압력 [MPa]에 대한 증기 밀도 [kg/m3] 구간별 선형 근사.
///
/// 구간 경계값은 윗 구간에 속한다 (0.32 → 두 번째 식, 1.00 → 세 번째 식).
pub fn steam_density(pressure_mpa: f64) -> f64 {
    if pressure_mpa < 0.32 {
        5.2353 * pressure_mpa + 0.0816
    } else if pressure_mpa < 1.00 {
        5.0221 * pressure_mpa + 0.1517
    } else {
        4.9283 * pressure_mpa + 0.2173
    }
}

/// 매질명 부분 문자열로 근사 밀도 [kg/m3]를 고른다.
pub fn approximate_density(medium: &str) -> f64 {
    DENSITY_MARKERS
        .iter()
        .find(|(marker, _)| medium.contains(marker))
        .map(|&(_, rho)| rho)
        .unwrap_or(DEFAULT_DENSITY_KG_PER_M3)
}

/// 매질과 압력으로 밀도 [kg/m3]를 추정한다. 항상 값을 돌려준다.
pub fn density(medium: &str, pressure_mpa: f64) -> f64 {
    if is_steam(medium) {
        steam_density(pressure_mpa)
    } else {
        approximate_density(medium)
    }
}
