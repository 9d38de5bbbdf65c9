use std::path::{Path, PathBuf};

use calamine::{open_workbook, Data, Reader, Xlsx};
use rust_xlsxwriter::{Workbook, XlsxError};

use super::{RecordSink, RowSource, TableIoError};
use crate::report::ResultRecord;

/// 결과 워크시트 이름.
pub const RESULT_SHEET: &str = "流量设计结果";

/// 엑셀 통합 문서의 첫 번째 워크시트에서 행을 읽는다.
#[derive(Debug, Clone)]
pub struct XlsxSource {
    path: PathBuf,
}

impl XlsxSource {
    pub fn open(path: &Path) -> Result<Self, TableIoError> {
        if !path.is_file() {
            return Err(TableIoError::Io {
                path: path.to_path_buf(),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            });
        }
        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    fn read_err(&self, source: calamine::XlsxError) -> TableIoError {
        TableIoError::XlsxRead {
            path: self.path.clone(),
            source,
        }
    }
}

impl RowSource for XlsxSource {
    fn read_rows(&mut self) -> Result<Vec<Vec<String>>, TableIoError> {
        let mut workbook: Xlsx<_> = open_workbook(&self.path).map_err(|e| self.read_err(e))?;
        let range = match workbook.worksheet_range_at(0) {
            Some(range) => range.map_err(|e| self.read_err(e))?,
            // 워크시트가 없는 문서는 빈 입력으로 취급한다.
            None => return Ok(Vec::new()),
        };
        Ok(range.rows().map(row_cells).collect())
    }
}

// 범위는 직사각형이므로 행 끝의 빈 셀은 잘라 실제 입력 셀 수를 유지한다.
fn row_cells(row: &[Data]) -> Vec<String> {
    let len = row
        .iter()
        .rposition(|c| !matches!(c, Data::Empty))
        .map_or(0, |i| i + 1);
    row[..len].iter().map(|c| c.to_string().trim().to_string()).collect()
}

/// 결과를 새 통합 문서의 `流量设计结果` 워크시트로 저장한다.
#[derive(Debug, Clone)]
pub struct XlsxSink {
    path: PathBuf,
}

impl XlsxSink {
    /// 저장 경로를 지정한다. 파일은 `write_report`에서 만들어지며 기존 파일은 덮어쓴다.
    pub fn create(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    fn build(&self, headers: &[&str], records: &[ResultRecord]) -> Result<(), XlsxError> {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.set_name(RESULT_SHEET)?;

        for (col, header) in (0u16..).zip(headers) {
            sheet.write_string(0, col, *header)?;
        }
        for (row, record) in (1u32..).zip(records) {
            // 관경은 숫자 셀, 나머지는 고정 소수 자릿수 문자열로 쓴다.
            sheet.write_number(row, 0, record.pipe_diameter_mm)?;
            for (col, cell) in (1u16..).zip(record.to_cells().into_iter().skip(1)) {
                sheet.write_string(row, col, cell)?;
            }
        }
        workbook.save(&self.path)
    }
}

impl RecordSink for XlsxSink {
    fn write_report(
        &mut self,
        headers: &[&str],
        records: &[ResultRecord],
    ) -> Result<(), TableIoError> {
        self.build(headers, records)
            .map_err(|source| TableIoError::XlsxWrite {
                path: self.path.clone(),
                source,
            })
    }
}
