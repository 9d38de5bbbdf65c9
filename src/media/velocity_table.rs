//! 매질별 권장 유속 범위와 분류, 설계 권고를 담는 기준표.
//! 값은 배관 사이징용 경험치이며 실제 설계 시 현장 조건으로 검증해야 한다.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 매질 하나의 권장 유속 범위 [m/s]와 분류 정보.
#[derive(Debug, Clone, PartialEq)]
pub struct VelocityEntry {
    pub min_velocity: f64,
    pub max_velocity: f64,
    pub category: String,
    pub recommendation: String,
}

impl VelocityEntry {
    /// 범위의 중간값을 권장 유속으로 사용한다.
    pub fn midpoint(&self) -> f64 {
        (self.min_velocity + self.max_velocity) / 2.0
    }
}

/// 기준표의 한 행. `name`이 정확 일치 키다.
#[derive(Debug, Clone, PartialEq)]
pub struct MediumEntry {
    pub name: String,
    pub velocity: VelocityEntry,
}

/// 설정 파일(`[[extra_media]]`)로 추가하는 매질 정의.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediumConfig {
    pub name: String,
    pub min_velocity: f64,
    pub max_velocity: f64,
    pub category: String,
    pub recommendation: String,
}

/// 기준표 항목이 불변조건을 어길 때의 오류.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TableError {
    #[error("매질 이름이 비어 있습니다.")]
    EmptyName,
    #[error("{name}: 유속은 0보다 커야 합니다 (min={min}, max={max})")]
    NonPositiveVelocity { name: String, min: f64, max: f64 },
    #[error("{name}: 최소 유속이 최대 유속보다 큽니다 (min={min}, max={max})")]
    InvertedRange { name: String, min: f64, max: f64 },
}

struct StandardMedium {
    name: &'static str,
    min: f64,
    max: f64,
    category: &'static str,
    recommendation: &'static str,
}

impl StandardMedium {
    const fn new(
        name: &'static str,
        min: f64,
        max: f64,
        category: &'static str,
        recommendation: &'static str,
    ) -> Self {
        Self {
            name,
            min,
            max,
            category,
            recommendation,
        }
    }
}

const AQUEOUS: &str = "水及水溶液";
const STEAM: &str = "蒸汽系统";
const GAS: &str = "气体介质";
const SPECIALTY: &str = "特殊流体";
const HVAC: &str = "暖通专用";

static STANDARD_MEDIA: &[StandardMedium] = &[
    // 수계
    StandardMedium::new("自来水", 1.0, 1.5, AQUEOUS, "防噪音要求≤1.2m/s"),
    StandardMedium::new("循环冷却水", 2.0, 2.5, AQUEOUS, "防腐蚀需≤2.2m/s"),
    StandardMedium::new(
        "盐水",
        1.2,
        1.8,
        AQUEOUS,
        "制冷系统/化工流程，需考虑沸点升高效应",
    ),
    // 증기
    StandardMedium::new("饱和蒸汽", 20.0, 30.0, STEAM, "避免冷凝水携带（≤25m/s）"),
    StandardMedium::new("过热蒸汽", 35.0, 50.0, STEAM, "管道振动控制"),
    StandardMedium::new("冷凝水回水", 0.5, 1.2, STEAM, "防气蚀设计"),
    // 기체
    StandardMedium::new("压缩空气", 10.0, 15.0, GAS, "气动工具管网，需设油水分离器"),
    StandardMedium::new("天然气", 8.0, 12.0, GAS, "城市输配管网，含硫气体需降速20%"),
    StandardMedium::new("氧气", 5.0, 8.0, GAS, "钢铁冶炼供气，禁油设计+流速下限控制"),
    // 특수 유체
    StandardMedium::new("液氨", 0.8, 1.5, SPECIALTY, "保冷管道+防震支架"),
    StandardMedium::new("硫酸", 0.6, 1.2, SPECIALTY, "衬塑管道+低流速防结晶"),
    StandardMedium::new("泥浆", 1.5, 2.0, SPECIALTY, "流速需＞沉降临界值"),
    // 공조
    StandardMedium::new("乙二醇溶液", 1.0, 2.5, HVAC, "ASHRAE标准"),
    StandardMedium::new("热水", 0.3, 0.5, HVAC, "防气阻设计"),
    StandardMedium::new("高温烟气", 8.0, 12.0, HVAC, "耐火材料内衬"),
];

/// 선언 순서를 보존하는 읽기 전용 기준표.
///
/// 프로세스 시작 시 한 번 만들고 참조로 넘겨 쓴다. 생성 후에는 변경할 수 없다.
#[derive(Debug, Clone)]
pub struct VelocityTable {
    entries: Vec<MediumEntry>,
}

impl VelocityTable {
    /// 내장 기준표(수계, 증기, 기체, 특수 유체, 공조 순)를 만든다.
    pub fn standard() -> Self {
        let entries = STANDARD_MEDIA
            .iter()
            .map(|m| MediumEntry {
                name: m.name.to_string(),
                velocity: VelocityEntry {
                    min_velocity: m.min,
                    max_velocity: m.max,
                    category: m.category.to_string(),
                    recommendation: m.recommendation.to_string(),
                },
            })
            .collect();
        Self { entries }
    }

    /// 내장 기준표 뒤에 설정 파일의 매질을 덧붙인다.
    /// 같은 이름이 이미 있으면 정확 일치에서는 앞선 항목이 우선한다.
    pub fn with_extra(extra: &[MediumConfig]) -> Result<Self, TableError> {
        let mut table = Self::standard();
        for cfg in extra {
            table.entries.push(validate(cfg)?);
        }
        Ok(table)
    }

    /// 정확히 일치하는 키의 항목을 찾는다.
    pub fn get(&self, name: &str) -> Option<&VelocityEntry> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| &e.velocity)
    }

    /// 선언 순서대로 모든 항목을 돌려준다.
    pub fn entries(&self) -> &[MediumEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for VelocityTable {
    fn default() -> Self {
        Self::standard()
    }
}

fn validate(cfg: &MediumConfig) -> Result<MediumEntry, TableError> {
    let name = cfg.name.trim();
    if name.is_empty() {
        return Err(TableError::EmptyName);
    }
    let (min, max) = (cfg.min_velocity, cfg.max_velocity);
    if !(min > 0.0 && max > 0.0) {
        return Err(TableError::NonPositiveVelocity {
            name: name.to_string(),
            min,
            max,
        });
    }
    if min > max {
        return Err(TableError::InvertedRange {
            name: name.to_string(),
            min,
            max,
        });
    }
    Ok(MediumEntry {
        name: name.to_string(),
        velocity: VelocityEntry {
            min_velocity: min,
            max_velocity: max,
            category: cfg.category.clone(),
            recommendation: cfg.recommendation.clone(),
        },
    })
}
