//! 계산에 쓰이는 단위 정의 모음.

pub mod length;
pub mod pressure;

pub use length::mm_to_m;
pub use pressure::{to_mpa, PressureUnit};
