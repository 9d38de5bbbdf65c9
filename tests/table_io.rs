//! CSV/XLSX 입출력 어댑터와 실행 흐름.
use std::fs;
use std::path::{Path, PathBuf};

use pipe_flow_report::app::{self, AppError, RunOptions};
use pipe_flow_report::config::Config;
use pipe_flow_report::i18n::{Translator, COLUMN_HEADERS_ZH};
use pipe_flow_report::media::VelocityTable;
use pipe_flow_report::report::RowProcessor;
use pipe_flow_report::table_io::{
    csv::split_line, ensure_extension, xlsx::RESULT_SHEET, CsvSink, CsvSource, RecordSink,
    RowSource, TableFormat, TableIoError, XlsxSource,
};
use rust_xlsxwriter::Workbook;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("pipe_flow_report_{name}_{}", std::process::id()));
    fs::create_dir_all(&dir).expect("create scratch dir");
    dir
}

#[test]
fn csv_source_trims_cells_and_strips_bom() {
    let text = "\u{feff}管径, 介质 ,备注\n100,自来水, 常温常压 \n\n";
    let rows = CsvSource::new(text.as_bytes(), ',').read_rows().expect("read");
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0], ["管径", "介质", "备注"]);
    assert_eq!(rows[1], ["100", "自来水", "常温常压"]);
    assert_eq!(rows[2], [""]);
}

#[test]
fn csv_source_rejects_invalid_utf8() {
    let bytes: &[u8] = &[0xff, 0xfe, b'a'];
    let err = CsvSource::new(bytes, ',').read_rows().unwrap_err();
    assert!(matches!(err, TableIoError::Encoding(_)));
}

#[test]
fn file_read_errors_carry_the_path() {
    let dir = scratch_dir("bad_utf8");
    let input = dir.join("gbk.csv");
    fs::write(&input, [b'1', b'0', b'0', b',', 0xc4, 0xe3, b'\n']).expect("write input");

    let err = CsvSource::open(&input, ',')
        .expect("open")
        .read_rows()
        .unwrap_err();
    match &err {
        TableIoError::Io { path, source } => {
            assert_eq!(path, &input);
            assert_eq!(source.kind(), std::io::ErrorKind::InvalidData);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(err.to_string().contains("gbk.csv"));

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn quoted_cells_keep_delimiters_and_quotes() {
    assert_eq!(
        split_line(r#"100,"盐水, 浓度20%","压力""高"" 1MPa""#, ','),
        ["100", "盐水, 浓度20%", r#"压力"高" 1MPa"#]
    );
    assert_eq!(split_line("a;b;c", ';'), ["a", "b", "c"]);
    assert_eq!(split_line("", ','), [""]);
}

#[test]
fn quoted_cells_keep_inner_whitespace() {
    assert_eq!(split_line(r#"" 盐水 ",x"#, ','), [" 盐水 ", "x"]);
    assert_eq!(split_line(r#"  "a b"  , c "#, ','), ["a b", "c"]);
    assert_eq!(split_line("\"\",1", ','), ["", "1"]);
}

#[test]
fn csv_sink_quotes_carriage_returns() {
    let table = VelocityTable::standard();
    let rows = vec![vec![
        "100".to_string(),
        "自来水".to_string(),
        "第一行\r第二行".to_string(),
    ]];
    let report = RowProcessor::new(&table).process(&rows);
    assert_eq!(report.records[0].remark, "第一行\r第二行");

    let mut sink = CsvSink::new(Vec::new(), ',', false);
    sink.write_report(&["a"], &report.records).expect("write");
    let text = String::from_utf8(sink.into_inner()).expect("utf8");
    assert!(text.contains("\"第一行\r第二行\""));
}

#[test]
fn csv_sink_writes_header_and_formatted_rows() {
    let table = VelocityTable::standard();
    let rows = vec![vec![
        "100".to_string(),
        "自来水".to_string(),
        "常温, 常压".to_string(),
    ]];
    let report = RowProcessor::new(&table).process(&rows);

    let mut sink = CsvSink::new(Vec::new(), ',', false);
    sink.write_report(&COLUMN_HEADERS_ZH, &report.records)
        .expect("write");
    let text = String::from_utf8(sink.into_inner()).expect("utf8");
    let mut lines = text.lines();
    assert_eq!(
        lines.next(),
        Some("管径(mm),介质,备注,压力(MPa),推荐流速(m/s),体积流量(m³/h),质量流量(t/h),介质类别,设计建议")
    );
    assert_eq!(
        lines.next(),
        Some("100,自来水,\"常温, 常压\",0.500,1.25,35.34,35.34,水及水溶液,防噪音要求≤1.2m/s")
    );
    assert_eq!(lines.next(), None);
}

#[test]
fn csv_sink_prepends_bom_when_requested() {
    let mut sink = CsvSink::new(Vec::new(), ',', true);
    sink.write_report(&["a", "b"], &[]).expect("write");
    let bytes = sink.into_inner();
    assert!(bytes.starts_with("\u{feff}".as_bytes()));
}

#[test]
fn format_is_chosen_by_extension() {
    assert_eq!(
        TableFormat::from_path(Path::new("data/管道.CSV")).expect("csv"),
        TableFormat::Csv
    );
    assert_eq!(
        TableFormat::from_path(Path::new("data.XLSX")).expect("xlsx"),
        TableFormat::Xlsx
    );
    assert!(matches!(
        TableFormat::from_path(Path::new("data.xls")),
        Err(TableIoError::UnsupportedFormat(_))
    ));
    assert!(TableFormat::from_path(Path::new("noext")).is_err());
}

#[test]
fn output_format_falls_back_to_input_format() {
    assert_eq!(
        TableFormat::for_output(Path::new("out.xlsx"), TableFormat::Csv),
        TableFormat::Xlsx
    );
    assert_eq!(
        TableFormat::for_output(Path::new("out"), TableFormat::Xlsx),
        TableFormat::Xlsx
    );
    assert_eq!(
        TableFormat::for_output(Path::new("out.txt"), TableFormat::Csv),
        TableFormat::Csv
    );
}

#[test]
fn output_extension_is_appended_once() {
    assert_eq!(
        ensure_extension(Path::new("out/result"), TableFormat::Csv),
        PathBuf::from("out/result.csv")
    );
    assert_eq!(
        ensure_extension(Path::new("out/result.CSV"), TableFormat::Csv),
        PathBuf::from("out/result.CSV")
    );
    assert_eq!(
        ensure_extension(Path::new("out/result"), TableFormat::Xlsx),
        PathBuf::from("out/result.xlsx")
    );
}

#[test]
fn default_output_sits_next_to_input() {
    assert_eq!(
        app::default_output_path(Path::new("data/pipes.csv")),
        PathBuf::from("data/pipes_流量设计结果.csv")
    );
    assert_eq!(
        app::default_output_path(Path::new("data/pipes.xlsx")),
        PathBuf::from("data/pipes_流量设计结果.xlsx")
    );
}

fn write_xlsx_input(path: &Path) {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    for (col, header) in (0u16..).zip(["管径(mm)", "介质", "备注"]) {
        sheet.write_string(0, col, header).expect("header");
    }
    sheet.write_number(1, 0, 150.0).expect("diameter");
    sheet.write_string(1, 1, "饱和蒸汽").expect("medium");
    sheet.write_string(1, 2, " 0.5MPa ").expect("remark");
    sheet.write_number(2, 0, 100.0).expect("diameter");
    sheet.write_string(2, 1, " 自来水").expect("medium");
    sheet.write_string(2, 2, "常温常压").expect("remark");
    // 셀이 모자란 행
    sheet.write_string(3, 0, "200").expect("short row");
    workbook.save(path).expect("save input");
}

#[test]
fn xlsx_source_reads_first_sheet_with_trimmed_cells() {
    let dir = scratch_dir("xlsx_source");
    let input = dir.join("pipes.xlsx");
    write_xlsx_input(&input);

    let rows = XlsxSource::open(&input)
        .expect("open")
        .read_rows()
        .expect("read");
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[0], ["管径(mm)", "介质", "备注"]);
    assert_eq!(rows[1], ["150", "饱和蒸汽", "0.5MPa"]);
    assert_eq!(rows[2], ["100", "自来水", "常温常压"]);
    assert_eq!(rows[3], ["200"]);

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn run_writes_xlsx_result_sheet() {
    let dir = scratch_dir("xlsx_run");
    let input = dir.join("pipes.xlsx");
    write_xlsx_input(&input);

    let opts = RunOptions {
        input: Some(input),
        output: Some(dir.join("result")),
    };
    let summary = app::run(&Config::default(), &Translator::new("zh"), opts).expect("run");
    assert_eq!(summary.output, dir.join("result.xlsx"));
    assert_eq!(summary.report.records.len(), 2);
    assert_eq!(summary.report.skipped.len(), 1);

    let workbook: calamine::Xlsx<_> =
        calamine::open_workbook(&summary.output).expect("open output");
    assert_eq!(
        calamine::Reader::sheet_names(&workbook),
        vec![RESULT_SHEET.to_string()]
    );

    let rows = XlsxSource::open(&summary.output)
        .expect("open output")
        .read_rows()
        .expect("read output");
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0], COLUMN_HEADERS_ZH);
    assert_eq!(rows[1][..5], ["150", "饱和蒸汽", "0.5MPa", "0.500", "25.00"]);
    assert_eq!(rows[1][7], "蒸汽系统");
    assert_eq!(
        rows[2],
        [
            "100",
            "自来水",
            "常温常压",
            "0.500",
            "1.25",
            "35.34",
            "35.34",
            "水及水溶液",
            "防噪音要求≤1.2m/s"
        ]
    );

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn csv_input_can_be_saved_as_xlsx() {
    let dir = scratch_dir("csv_to_xlsx");
    let input = dir.join("pipes.csv");
    fs::write(&input, "100,自来水,常温常压\n").expect("write input");

    let opts = RunOptions {
        input: Some(input),
        output: Some(dir.join("result.xlsx")),
    };
    let summary = app::run(&Config::default(), &Translator::new("en"), opts).expect("run");
    assert_eq!(summary.output, dir.join("result.xlsx"));

    let rows = XlsxSource::open(&summary.output)
        .expect("open output")
        .read_rows()
        .expect("read output");
    assert_eq!(rows[0][0], "Diameter(mm)");
    assert_eq!(rows[1][..4], ["100", "自来水", "常温常压", "0.500"]);

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn run_reads_processes_and_writes() {
    let dir = scratch_dir("run");
    let input = dir.join("pipes.csv");
    fs::write(
        &input,
        "管径(mm),介质,备注\n100,自来水,常温常压\nabc,自来水,\n150,饱和蒸汽,0.5MPa\n",
    )
    .expect("write input");

    let cfg = Config {
        utf8_bom: false,
        ..Config::default()
    };
    let opts = RunOptions {
        input: Some(input),
        output: Some(dir.join("result")),
    };
    let summary = app::run(&cfg, &Translator::new("en"), opts).expect("run");
    assert_eq!(summary.output, dir.join("result.csv"));
    assert!(summary.report.header_detected);
    assert_eq!(summary.report.records.len(), 2);
    assert_eq!(summary.report.skipped.len(), 1);

    let written = fs::read_to_string(&summary.output).expect("read output");
    let lines: Vec<&str> = written.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("Diameter(mm),Medium,Remark"));
    assert!(lines[2].starts_with("150,饱和蒸汽,0.5MPa,0.500,25.00,"));
    assert!(lines[2].ends_with(",蒸汽系统,避免冷凝水携带（≤25m/s）"));

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn run_rejects_empty_and_unsupported_inputs() {
    let dir = scratch_dir("fatal");
    let empty = dir.join("empty.csv");
    fs::write(&empty, "").expect("write empty");
    let tr = Translator::new("zh");
    let cfg = Config::default();

    let err = app::run(
        &cfg,
        &tr,
        RunOptions {
            input: Some(empty),
            output: Some(dir.join("out.csv")),
        },
    )
    .unwrap_err();
    assert!(matches!(err, AppError::EmptyInput(_)));

    let err = app::run(
        &cfg,
        &tr,
        RunOptions {
            input: Some(dir.join("pipes.ods")),
            output: None,
        },
    )
    .unwrap_err();
    assert!(matches!(
        err,
        AppError::TableIo(TableIoError::UnsupportedFormat(_))
    ));

    let err = app::run(
        &cfg,
        &tr,
        RunOptions {
            input: Some(dir.join("missing.csv")),
            output: None,
        },
    )
    .unwrap_err();
    assert!(matches!(err, AppError::TableIo(TableIoError::Io { .. })));

    fs::remove_dir_all(&dir).ok();
}
