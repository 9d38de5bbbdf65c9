use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::media::MediumConfig;

/// 기본 설정 파일 이름.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// 애플리케이션 설정을 표현한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 출력 언어 (zh, en, auto)
    pub language: String,
    /// RUST_LOG가 없을 때 쓰는 로그 필터
    pub log_level: String,
    /// 입력/출력 표의 셀 구분자
    pub delimiter: char,
    /// 출력 파일 앞에 UTF-8 BOM을 붙일지 여부 (스프레드시트 인코딩 인식용)
    pub utf8_bom: bool,
    /// 내장 기준표 뒤에 덧붙일 매질
    pub extra_media: Vec<MediumConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: "auto".to_string(),
            log_level: "info".to_string(),
            delimiter: ',',
            utf8_bom: true,
            extra_media: Vec::new(),
        }
    }
}

/// 설정 로드/저장 시 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("파일 입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    #[error("설정 파싱 오류: {0}")]
    Serde(#[from] toml::de::Error),
    #[error("설정 직렬화 오류: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("구분자로 큰따옴표나 줄바꿈은 쓸 수 없습니다: {0:?}")]
    InvalidDelimiter(char),
}

impl Config {
    /// TOML 문자열에서 설정을 읽고 검증한다.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let cfg: Config = toml::from_str(content)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// 설정을 지정 경로에 저장한다.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if matches!(self.delimiter, '"' | '\n' | '\r') {
            return Err(ConfigError::InvalidDelimiter(self.delimiter));
        }
        Ok(())
    }
}

/// 설정 파일을 로드하거나 없으면 기본 설정을 생성한다.
pub fn load_or_default(path: &Path) -> Result<Config, ConfigError> {
    if path.exists() {
        let content = fs::read_to_string(path)?;
        Config::from_toml_str(&content)
    } else {
        let cfg = Config::default();
        cfg.save_to(path)?;
        Ok(cfg)
    }
}
