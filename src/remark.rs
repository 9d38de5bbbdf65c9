//! 비고란 자유 텍스트에서 압력 값을 추출한다.

use crate::units::{to_mpa, PressureUnit};

/// 비고란에 압력 표기가 없을 때 사용하는 기본 압력 [MPa].
pub const DEFAULT_PRESSURE_MPA: f64 = 0.5;

/// 비고란에서 압력 [MPa]을 추출한다.
///
/// "mpa"를 먼저, 없거나 해석되지 않으면 "bar"를 찾는다(대소문자 무시).
/// 각 표기는 가장 왼쪽 한 곳만 보며, 바로 앞에 붙은 숫자(`0-9`, `.`, `-`)를
/// 값으로 읽는다. 둘 다 실패하면 [`DEFAULT_PRESSURE_MPA`]를 돌려준다.
pub fn extract_pressure(remark: &str) -> f64 {
    [PressureUnit::MegaPascal, PressureUnit::Bar]
        .into_iter()
        .find_map(|unit| value_before_marker(remark, unit.marker()).map(|v| to_mpa(v, unit)))
        .unwrap_or(DEFAULT_PRESSURE_MPA)
}

fn value_before_marker(remark: &str, marker: &str) -> Option<f64> {
    // ASCII 소문자화는 바이트 길이를 바꾸지 않으므로 인덱스를 원문에 그대로 쓴다.
    let lower = remark.to_ascii_lowercase();
    let idx = lower.find(marker)?;
    if idx == 0 {
        return None;
    }

    let bytes = lower.as_bytes();
    let mut start = idx;
    while start > 0 && is_number_byte(bytes[start - 1]) {
        start -= 1;
    }
    if start == idx {
        return None;
    }
    remark[start..idx].parse::<f64>().ok()
}

fn is_number_byte(b: u8) -> bool {
    b.is_ascii_digit() || b == b'.' || b == b'-'
}
