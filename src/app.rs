use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use crate::config::{Config, ConfigError};
use crate::i18n::{self, Translator};
use crate::media::{TableError, VelocityTable};
use crate::report::{Report, RowProcessor};
use crate::table_io::{
    self, CsvSink, CsvSource, RecordSink, RowSource, TableFormat, TableIoError, XlsxSink,
    XlsxSource,
};

const OUTPUT_SUFFIX: &str = "流量设计结果";

/// 실행 전체를 중단시키는 오류. 행 단위 문제는 여기에 포함되지 않는다.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("설정 오류: {0}")]
    Config(#[from] ConfigError),
    #[error("매질 기준표 오류: {0}")]
    Table(#[from] TableError),
    #[error("표 입출력 오류: {0}")]
    TableIo(#[from] TableIoError),
    #[error("입력 파일이 비어 있습니다: {0}")]
    EmptyInput(PathBuf),
    #[error("입력 파일이 선택되지 않았거나 취소되었습니다.")]
    NoInputSelected,
    #[error("출력 파일이 지정되지 않았거나 취소되었습니다.")]
    NoOutputSelected,
}

/// 한 번의 실행에 필요한 경로 지정.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
}

/// 실행 결과 요약.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub output: PathBuf,
    pub report: Report,
}

/// 입력 표를 읽어 계산하고 결과 표를 저장한다.
pub fn run(config: &Config, tr: &Translator, opts: RunOptions) -> Result<RunSummary, AppError> {
    let table = VelocityTable::with_extra(&config.extra_media)?;
    debug!(
        media = table.len(),
        language = tr.language().as_code(),
        "기준표 준비 완료"
    );

    let input = match opts.input {
        Some(path) => path,
        None => pick_input(tr).ok_or(AppError::NoInputSelected)?,
    };
    let format = TableFormat::from_path(&input)?;
    info!(input = %input.display(), "입력 파일 읽기");
    let rows = read_table(&input, format, config.delimiter)?;
    if rows.is_empty() {
        return Err(AppError::EmptyInput(input));
    }
    info!(rows = rows.len(), "행 읽기 완료");

    let report = RowProcessor::new(&table).process(&rows);
    info!(
        records = report.records.len(),
        skipped = report.skipped.len(),
        header = report.header_detected,
        "유량 계산 완료"
    );

    let output = match opts.output {
        Some(path) => path,
        None => pick_output(tr, &input).ok_or(AppError::NoOutputSelected)?,
    };
    let out_format = TableFormat::for_output(&output, format);
    let output = table_io::ensure_extension(&output, out_format);
    write_table(config, tr, &output, out_format, &report)?;
    info!(output = %output.display(), format = out_format.extension(), "결과 저장 완료");

    Ok(RunSummary { output, report })
}

/// 실행 결과를 콘솔에 출력한다.
pub fn print_summary(tr: &Translator, summary: &RunSummary) {
    if !summary.report.skipped.is_empty() {
        println!(
            "{}",
            tr.t(i18n::keys::SKIPPED_ROWS)
                .replace("{count}", &summary.report.skipped.len().to_string())
        );
    }
    println!(
        "{}",
        tr.t(i18n::keys::DONE_SAVED)
            .replace("{path}", &summary.output.display().to_string())
    );
}

fn read_table(
    path: &Path,
    format: TableFormat,
    delimiter: char,
) -> Result<Vec<Vec<String>>, TableIoError> {
    match format {
        TableFormat::Csv => CsvSource::open(path, delimiter)?.read_rows(),
        TableFormat::Xlsx => XlsxSource::open(path)?.read_rows(),
    }
}

fn write_table(
    config: &Config,
    tr: &Translator,
    path: &Path,
    format: TableFormat,
    report: &Report,
) -> Result<(), TableIoError> {
    let headers = tr.column_headers();
    match format {
        TableFormat::Csv => CsvSink::create(path, config.delimiter, config.utf8_bom)?
            .write_report(&headers, &report.records),
        TableFormat::Xlsx => XlsxSink::create(path).write_report(&headers, &report.records),
    }
}

#[cfg(feature = "dialog")]
fn pick_input(tr: &Translator) -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_title(tr.t(i18n::keys::DIALOG_INPUT_TITLE))
        .add_filter(tr.t(i18n::keys::DIALOG_FILTER_XLSX), &["xlsx"])
        .add_filter(tr.t(i18n::keys::DIALOG_FILTER_CSV), &["csv"])
        .pick_file()
}

#[cfg(feature = "dialog")]
fn pick_output(tr: &Translator, input: &Path) -> Option<PathBuf> {
    let mut dialog = rfd::FileDialog::new()
        .set_title(tr.t(i18n::keys::DIALOG_OUTPUT_TITLE))
        .add_filter(tr.t(i18n::keys::DIALOG_FILTER_XLSX), &["xlsx"])
        .add_filter(tr.t(i18n::keys::DIALOG_FILTER_CSV), &["csv"]);
    if let Some(dir) = input.parent() {
        dialog = dialog.set_directory(dir);
    }
    dialog.save_file()
}

#[cfg(not(feature = "dialog"))]
fn pick_input(_tr: &Translator) -> Option<PathBuf> {
    None
}

#[cfg(not(feature = "dialog"))]
fn pick_output(_tr: &Translator, input: &Path) -> Option<PathBuf> {
    Some(default_output_path(input))
}

/// 입력 파일 옆에 `<이름>_流量设计结果.<입력 확장자>` 경로를 만든다.
/// 확장자를 알 수 없으면 csv로 저장한다.
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let format = TableFormat::for_output(input, TableFormat::Csv);
    input.with_file_name(format!("{stem}_{OUTPUT_SUFFIX}.{}", format.extension()))
}
