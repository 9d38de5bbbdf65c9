use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use pipe_flow_report::{app, config, i18n};
use tracing_subscriber::EnvFilter;

/// 관경/매질/비고 표로부터 유량 설계 결과 표를 만든다.
#[derive(Debug, Parser)]
#[command(name = "pipe_flow_report", version, about)]
struct Args {
    /// 입력 파일 (.csv 또는 .xlsx, 생략 시 파일 선택 창)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// 결과 파일 (확장자가 없으면 입력 형식을 따른다)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// 출력 언어: zh, en, auto
    #[arg(long)]
    lang: Option<String>,

    /// 설정 파일 경로
    #[arg(long, default_value = config::DEFAULT_CONFIG_PATH)]
    config: PathBuf,
}

/// 프로그램의 엔트리 포인트. 치명적 오류는 stderr에 한 번 출력하고 0이 아닌 코드로 종료한다.
fn main() -> ExitCode {
    let args = Args::parse();
    match try_run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            // 설정 오류는 로거 초기화 전에 발생하므로 로그 대신 직접 출력한다.
            eprintln!("오류: {err}");
            ExitCode::FAILURE
        }
    }
}

fn try_run(args: Args) -> Result<(), app::AppError> {
    let cfg = config::load_or_default(&args.config)?;
    init_tracing(&cfg.log_level);

    let lang = i18n::resolve_language(args.lang.as_deref(), Some(cfg.language.as_str()));
    let tr = i18n::Translator::new(&lang);
    let opts = app::RunOptions {
        input: args.input,
        output: args.output,
    };
    let summary = app::run(&cfg, &tr, opts)?;
    app::print_summary(&tr, &summary);
    Ok(())
}

fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    // 로그는 stderr로 보내 stdout에는 결과 안내만 남긴다.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
