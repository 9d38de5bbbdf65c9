/// 1 m에 해당하는 mm 수.
const MM_PER_M: f64 = 1000.0;

/// 밀리미터를 미터로 변환한다.
pub fn mm_to_m(value_mm: f64) -> f64 {
    value_mm / MM_PER_M
}
