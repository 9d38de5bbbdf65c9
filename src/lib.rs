//! 관경, 매질, 비고 행을 받아 권장 유속과 체적/질량 유량을 계산하는 라이브러리.
//! 입출력 어댑터와 계산 로직을 분리해 CLI 외의 표 형식도 붙일 수 있게 한다.

pub mod app;
pub mod config;
pub mod density;
pub mod flow;
pub mod i18n;
pub mod media;
pub mod remark;
pub mod report;
pub mod table_io;
pub mod units;
