//! 원형 단면 기준 체적/질량 유량 계산.

use crate::units::mm_to_m;

/// 관경 [mm]과 유속 [m/s]으로 체적 유량 [m3/h]을 계산한다.
pub fn volume_flow_m3_per_h(diameter_mm: f64, velocity_m_per_s: f64) -> f64 {
    let diameter_m = mm_to_m(diameter_mm);
    let radius_m = diameter_m / 2.0;
    let area = std::f64::consts::PI * radius_m * radius_m;
    area * velocity_m_per_s * 3600.0
}

/// 체적 유량 [m3/h]과 밀도 [kg/m3]로 질량 유량 [t/h]을 계산한다.
pub fn mass_flow_t_per_h(volume_flow_m3_per_h: f64, density_kg_per_m3: f64) -> f64 {
    volume_flow_m3_per_h * density_kg_per_m3 / 1000.0
}
