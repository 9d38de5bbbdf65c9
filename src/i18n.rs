use sys_locale::get_locale;

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const DONE_SAVED: &str = "general.done_saved";
    pub const SKIPPED_ROWS: &str = "general.skipped_rows";
    pub const DIALOG_INPUT_TITLE: &str = "dialog.input_title";
    pub const DIALOG_OUTPUT_TITLE: &str = "dialog.output_title";
    pub const DIALOG_FILTER_CSV: &str = "dialog.filter_csv";
    pub const DIALOG_FILTER_XLSX: &str = "dialog.filter_xlsx";
}

/// 결과 표의 열 제목 (기본: 중국어 원문).
pub const COLUMN_HEADERS_ZH: [&str; 9] = [
    "管径(mm)",
    "介质",
    "备注",
    "压力(MPa)",
    "推荐流速(m/s)",
    "体积流量(m³/h)",
    "质量流量(t/h)",
    "介质类别",
    "设计建议",
];

pub const COLUMN_HEADERS_EN: [&str; 9] = [
    "Diameter(mm)",
    "Medium",
    "Remark",
    "Pressure(MPa)",
    "Recommended velocity(m/s)",
    "Volume flow(m³/h)",
    "Mass flow(t/h)",
    "Category",
    "Recommendation",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Zh,
    En,
}

impl Language {
    fn from_code(code: &str) -> Self {
        let c = code.to_lowercase();
        if c.starts_with("en") {
            Language::En
        } else {
            Language::Zh
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Language::Zh => "zh",
            Language::En => "en",
        }
    }
}

/// 출력 열 제목과 콘솔 메시지를 제공한다.
#[derive(Debug, Clone)]
pub struct Translator {
    lang: Language,
}

impl Translator {
    /// 언어 코드(zh/en)에 따라 번역기를 생성한다. 알 수 없는 코드는 zh로 폴백한다.
    pub fn new(lang_code: &str) -> Self {
        Self {
            lang: Language::from_code(lang_code),
        }
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    /// 결과 표 열 제목. 매질 분류와 권고 문구는 번역하지 않는다.
    pub fn column_headers(&self) -> [&'static str; 9] {
        match self.lang {
            Language::Zh => COLUMN_HEADERS_ZH,
            Language::En => COLUMN_HEADERS_EN,
        }
    }

    /// 번역을 가져온다. 영어 번역이 없으면 중국어 문자열을 폴백한다.
    pub fn t(&self, key: &str) -> &'static str {
        match self.lang {
            Language::En => en(key).unwrap_or_else(|| zh(key)),
            Language::Zh => zh(key),
        }
    }
}

/// CLI 플래그/설정/시스템 순으로 언어 코드를 결정한다.
pub fn resolve_language(cli_arg: Option<&str>, config_lang: Option<&str>) -> String {
    cli_arg
        .and_then(normalize_lang)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "zh".to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "auto" | "" => None,
        other if other.starts_with("zh") || other.starts_with("cn") => Some("zh".into()),
        other if other.starts_with("en") => Some("en".into()),
        _ => None,
    }
}

fn normalize_locale_string(loc: &str) -> Option<String> {
    let lang = loc
        .split(['.', '_', '-'])
        .next()
        .unwrap_or_default()
        .to_lowercase();
    match lang.as_str() {
        "zh" => Some("zh".into()),
        "en" => Some("en".into()),
        _ => None,
    }
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<String> {
    if let Some(code) = get_locale().as_deref().and_then(normalize_locale_string) {
        return Some(code);
    }
    ["LANG", "LC_ALL"]
        .into_iter()
        .filter_map(|var| std::env::var(var).ok())
        .find_map(|v| normalize_locale_string(&v))
}

fn zh(key: &str) -> &'static str {
    use keys::*;
    match key {
        DONE_SAVED => "处理完成，结果已保存到: {path}",
        SKIPPED_ROWS => "已跳过无效行: {count}",
        DIALOG_INPUT_TITLE => "选择输入文件",
        DIALOG_OUTPUT_TITLE => "保存结果文件",
        DIALOG_FILTER_CSV => "CSV文件",
        DIALOG_FILTER_XLSX => "Excel文件",
        _ => "",
    }
}

fn en(key: &str) -> Option<&'static str> {
    use keys::*;
    let s = match key {
        DONE_SAVED => "Done. Results saved to: {path}",
        SKIPPED_ROWS => "Skipped invalid rows: {count}",
        DIALOG_INPUT_TITLE => "Select input file",
        DIALOG_OUTPUT_TITLE => "Save result file",
        DIALOG_FILTER_CSV => "CSV file",
        DIALOG_FILTER_XLSX => "Excel file",
        _ => return None,
    };
    Some(s)
}
