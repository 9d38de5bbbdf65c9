/// 비고란에서 인식하는 압력 단위. 내부 기준은 MPa이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressureUnit {
    MegaPascal,
    Bar,
}

const MPA_PER_BAR: f64 = 0.1;

impl PressureUnit {
    /// 비고란에서 찾을 소문자 단위 표기.
    pub fn marker(self) -> &'static str {
        match self {
            PressureUnit::MegaPascal => "mpa",
            PressureUnit::Bar => "bar",
        }
    }
}

/// 주어진 압력을 MPa로 변환한다.
pub fn to_mpa(value: f64, unit: PressureUnit) -> f64 {
    match unit {
        PressureUnit::MegaPascal => value,
        PressureUnit::Bar => value * MPA_PER_BAR,
    }
}
