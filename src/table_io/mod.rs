//! 외부 표 형식과 행 처리기 사이의 입출력 어댑터.

pub mod csv;
pub mod xlsx;

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::report::ResultRecord;

pub use self::csv::{CsvSink, CsvSource};
pub use self::xlsx::{XlsxSink, XlsxSource};

/// 입출력 어댑터 오류. 모두 실행 전체를 중단시키는 치명적 오류다.
#[derive(Debug, Error)]
pub enum TableIoError {
    #[error("파일 입출력 오류 ({}): {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("스트림 입출력 오류: {0}")]
    Stream(#[from] std::io::Error),
    #[error("UTF-8 텍스트가 아닙니다: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
    #[error("엑셀 파일 읽기 오류 ({}): {source}", .path.display())]
    XlsxRead {
        path: PathBuf,
        #[source]
        source: calamine::XlsxError,
    },
    #[error("엑셀 파일 저장 오류 ({}): {source}", .path.display())]
    XlsxWrite {
        path: PathBuf,
        #[source]
        source: rust_xlsxwriter::XlsxError,
    },
    #[error("지원하지 않는 파일 형식입니다: {0} (.csv, .xlsx만 지원)")]
    UnsupportedFormat(String),
}

/// 원시 셀 행을 순서대로 공급하는 입력원.
pub trait RowSource {
    fn read_rows(&mut self) -> Result<Vec<Vec<String>>, TableIoError>;
}

/// 결과 레코드를 받아 기록하는 출력처.
pub trait RecordSink {
    fn write_report(
        &mut self,
        headers: &[&str],
        records: &[ResultRecord],
    ) -> Result<(), TableIoError>;
}

/// 지원하는 표 파일 형식.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Csv,
    Xlsx,
}

impl TableFormat {
    /// 확장자로 형식을 고른다.
    pub fn from_path(path: &Path) -> Result<Self, TableIoError> {
        Self::recognize(path)
            .ok_or_else(|| TableIoError::UnsupportedFormat(path.display().to_string()))
    }

    /// 출력 형식을 고른다. 출력 경로의 확장자가 지원 형식이면 그것을, 아니면 `fallback`을 쓴다.
    pub fn for_output(path: &Path, fallback: TableFormat) -> Self {
        Self::recognize(path).unwrap_or(fallback)
    }

    fn recognize(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "csv" => Some(TableFormat::Csv),
            "xlsx" => Some(TableFormat::Xlsx),
            _ => None,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            TableFormat::Csv => "csv",
            TableFormat::Xlsx => "xlsx",
        }
    }
}

/// 출력 경로에 형식 확장자가 없으면 덧붙인다.
pub fn ensure_extension(path: &Path, format: TableFormat) -> PathBuf {
    let ext = format.extension();
    let has_ext = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(ext));
    if has_ext {
        path.to_path_buf()
    } else {
        let mut name = path.as_os_str().to_owned();
        name.push(".");
        name.push(ext);
        PathBuf::from(name)
    }
}
