use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use super::{RecordSink, RowSource, TableIoError};
use crate::report::ResultRecord;

const UTF8_BOM: &str = "\u{feff}";

/// 쉼표(또는 지정 구분자)로 나뉜 텍스트에서 행을 읽는다.
#[derive(Debug)]
pub struct CsvSource<R> {
    reader: R,
    delimiter: char,
    /// 파일에서 연 경우의 경로. 읽기 오류에 함께 담는다.
    path: Option<PathBuf>,
}

impl CsvSource<fs::File> {
    /// 파일을 연다. 열 수 없으면 경로를 포함한 오류를 돌려준다.
    pub fn open(path: &Path, delimiter: char) -> Result<Self, TableIoError> {
        let file = fs::File::open(path).map_err(|source| TableIoError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            path: Some(path.to_path_buf()),
            ..Self::new(file, delimiter)
        })
    }
}

impl<R: Read> CsvSource<R> {
    pub fn new(reader: R, delimiter: char) -> Self {
        Self {
            reader,
            delimiter,
            path: None,
        }
    }

    fn io_err(&self, source: io::Error) -> TableIoError {
        match &self.path {
            Some(path) => TableIoError::Io {
                path: path.clone(),
                source,
            },
            None => TableIoError::Stream(source),
        }
    }

    fn encoding_err(&self, err: std::string::FromUtf8Error) -> TableIoError {
        match &self.path {
            Some(_) => self.io_err(io::Error::new(io::ErrorKind::InvalidData, err)),
            None => TableIoError::Encoding(err),
        }
    }
}

impl<R: Read> RowSource for CsvSource<R> {
    fn read_rows(&mut self) -> Result<Vec<Vec<String>>, TableIoError> {
        let mut buf = Vec::new();
        self.reader
            .read_to_end(&mut buf)
            .map_err(|e| self.io_err(e))?;
        let text = String::from_utf8(buf).map_err(|e| self.encoding_err(e))?;
        let text = text.strip_prefix(UTF8_BOM).unwrap_or(&text);
        Ok(text
            .lines()
            .map(|line| split_line(line, self.delimiter))
            .collect())
    }
}

/// 한 줄을 셀로 나눈다. 큰따옴표로 감싼 셀 안의 구분자와 `""`는 값으로 취급한다.
/// 따옴표 밖의 공백은 잘라내고, 따옴표 안의 내용은 그대로 둔다.
pub fn split_line(line: &str, delimiter: char) -> Vec<String> {
    let mut cells = Vec::new();
    let mut cell = String::new();
    let mut quoted = false;
    let mut was_quoted = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if quoted => {
                if chars.peek() == Some(&'"') {
                    cell.push('"');
                    chars.next();
                } else {
                    quoted = false;
                }
            }
            '"' if !was_quoted && cell.trim().is_empty() => {
                cell.clear();
                quoted = true;
                was_quoted = true;
            }
            c if c == delimiter && !quoted => {
                cells.push(finish_cell(&mut cell, was_quoted));
                was_quoted = false;
            }
            // 닫는 따옴표 뒤의 공백
            c if was_quoted && !quoted && c.is_whitespace() => {}
            c => cell.push(c),
        }
    }
    cells.push(finish_cell(&mut cell, was_quoted));
    cells
}

fn finish_cell(cell: &mut String, was_quoted: bool) -> String {
    let value = if was_quoted {
        cell.clone()
    } else {
        cell.trim().to_string()
    };
    cell.clear();
    value
}

/// 결과를 구분자 텍스트로 기록한다.
#[derive(Debug)]
pub struct CsvSink<W> {
    writer: W,
    delimiter: char,
    bom: bool,
}

impl CsvSink<fs::File> {
    /// 출력 파일을 만든다. 기존 파일은 덮어쓴다.
    pub fn create(path: &Path, delimiter: char, bom: bool) -> Result<Self, TableIoError> {
        let file = fs::File::create(path).map_err(|source| TableIoError::Io {
            path: PathBuf::from(path),
            source,
        })?;
        Ok(Self::new(file, delimiter, bom))
    }
}

impl<W: Write> CsvSink<W> {
    pub fn new(writer: W, delimiter: char, bom: bool) -> Self {
        Self {
            writer,
            delimiter,
            bom,
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_line<S: AsRef<str>>(&mut self, cells: &[S]) -> Result<(), TableIoError> {
        let sep = self.delimiter.to_string();
        let line = cells
            .iter()
            .map(|c| escape_cell(c.as_ref(), self.delimiter))
            .collect::<Vec<_>>()
            .join(sep.as_str());
        writeln!(self.writer, "{line}")?;
        Ok(())
    }
}

impl<W: Write> RecordSink for CsvSink<W> {
    fn write_report(
        &mut self,
        headers: &[&str],
        records: &[ResultRecord],
    ) -> Result<(), TableIoError> {
        if self.bom {
            self.writer.write_all(UTF8_BOM.as_bytes())?;
        }
        self.write_line(headers)?;
        for record in records {
            self.write_line(&record.to_cells())?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

fn escape_cell(cell: &str, delimiter: char) -> String {
    if cell.contains(delimiter) || cell.contains(['"', '\n', '\r']) {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell.to_string()
    }
}
