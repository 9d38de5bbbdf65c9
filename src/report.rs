//! 입력 행을 순서대로 처리해 유량 설계 결과를 만든다.

use crate::density;
use crate::flow;
use crate::media::{MediumResolver, VelocityTable};
use crate::remark;

/// 첫 행을 제목 행으로 판단하는 표기 (대소문자 무시 부분 일치).
const HEADER_MARKERS: [&str; 2] = ["管径", "diameter"];

/// 한 행에 필요한 최소 셀 수 (관경, 매질, 비고).
pub const MIN_CELLS: usize = 3;

/// 검증을 통과한 입력 행.
#[derive(Debug, Clone, PartialEq)]
pub struct InputRow {
    pub pipe_diameter_mm: f64,
    pub medium: String,
    pub remark: String,
}

/// 입력 행 하나에 대한 계산 결과.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultRecord {
    pub pipe_diameter_mm: f64,
    pub medium: String,
    pub remark: String,
    pub pressure_mpa: f64,
    pub recommended_velocity_m_per_s: f64,
    /// 체적 유량 [m3/h]
    pub volume_flow_m3_per_h: f64,
    /// 질량 유량 [t/h]
    pub mass_flow_t_per_h: f64,
    pub category: String,
    pub recommendation: String,
}

impl ResultRecord {
    /// 출력 열 순서(관경, 매질, 비고, 압력, 유속, 체적 유량, 질량 유량, 분류, 권고)대로 셀을 만든다.
    pub fn to_cells(&self) -> [String; 9] {
        [
            self.pipe_diameter_mm.to_string(),
            self.medium.clone(),
            self.remark.clone(),
            format!("{:.3}", self.pressure_mpa),
            format!("{:.2}", self.recommended_velocity_m_per_s),
            format!("{:.2}", self.volume_flow_m3_per_h),
            format!("{:.2}", self.mass_flow_t_per_h),
            self.category.clone(),
            self.recommendation.clone(),
        ]
    }
}

/// 행을 건너뛴 이유.
#[derive(Debug, Clone, PartialEq)]
pub enum RowIssueKind {
    /// 셀이 3개 미만
    TooFewCells(usize),
    /// 관경을 양수로 해석할 수 없음. 원문을 담는다.
    InvalidDiameter(String),
    /// 매질 칸이 비어 있음
    EmptyMedium,
}

/// 건너뛴 행 정보. `row_index`는 입력 전체(제목 행 포함) 기준 0부터 센다.
#[derive(Debug, Clone, PartialEq)]
pub struct RowIssue {
    pub row_index: usize,
    pub kind: RowIssueKind,
}

/// 일괄 처리 결과. 결과 행은 입력 순서를 따른다.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Report {
    pub records: Vec<ResultRecord>,
    pub skipped: Vec<RowIssue>,
    /// 제목 행을 건너뛰었는지 여부
    pub header_detected: bool,
}

/// 관경 문자열을 mm 값으로 해석한다. "mm"/"MM" 표기는 제거한다.
pub fn parse_diameter_mm(text: &str) -> Option<f64> {
    let cleaned = text.trim().replace("mm", "").replace("MM", "");
    let value = cleaned.trim().parse::<f64>().ok()?;
    (value.is_finite() && value > 0.0).then_some(value)
}

/// 첫 행이 제목 행인지 판단한다.
pub fn is_header_row<S: AsRef<str>>(row: &[S]) -> bool {
    if row.len() < MIN_CELLS {
        return false;
    }
    let first = row[0].as_ref().to_lowercase();
    HEADER_MARKERS.iter().any(|m| first.contains(m))
}

/// 원시 셀 목록을 입력 행으로 검증한다.
pub fn parse_row<S: AsRef<str>>(cells: &[S]) -> Result<InputRow, RowIssueKind> {
    if cells.len() < MIN_CELLS {
        return Err(RowIssueKind::TooFewCells(cells.len()));
    }
    let diameter_text = cells[0].as_ref().trim();
    let pipe_diameter_mm = parse_diameter_mm(diameter_text)
        .ok_or_else(|| RowIssueKind::InvalidDiameter(diameter_text.to_string()))?;
    let medium = cells[1].as_ref().trim();
    if medium.is_empty() {
        return Err(RowIssueKind::EmptyMedium);
    }
    Ok(InputRow {
        pipe_diameter_mm,
        medium: medium.to_string(),
        remark: cells[2].as_ref().trim().to_string(),
    })
}

/// 기준표를 주입받아 행 단위 계산을 수행한다.
#[derive(Debug, Clone, Copy)]
pub struct RowProcessor<'a> {
    resolver: MediumResolver<'a>,
}

impl<'a> RowProcessor<'a> {
    pub fn new(table: &'a VelocityTable) -> Self {
        Self {
            resolver: MediumResolver::new(table),
        }
    }

    /// 검증된 입력 행 하나를 계산한다.
    pub fn compute(&self, row: &InputRow) -> ResultRecord {
        let pressure_mpa = remark::extract_pressure(&row.remark);
        let resolution = self.resolver.resolve(&row.medium);
        let velocity = resolution.velocity_m_per_s;
        let volume_flow = flow::volume_flow_m3_per_h(row.pipe_diameter_mm, velocity);
        let rho = density::density(&row.medium, pressure_mpa);

        ResultRecord {
            pipe_diameter_mm: row.pipe_diameter_mm,
            medium: row.medium.clone(),
            remark: row.remark.clone(),
            pressure_mpa,
            recommended_velocity_m_per_s: velocity,
            volume_flow_m3_per_h: volume_flow,
            mass_flow_t_per_h: flow::mass_flow_t_per_h(volume_flow, rho),
            category: resolution.category.to_string(),
            recommendation: resolution.recommendation.to_string(),
        }
    }

    /// 전체 입력을 한 번에 처리한다. 잘못된 행은 건너뛰고 `skipped`에 기록한다.
    pub fn process<S: AsRef<str>>(&self, rows: &[Vec<S>]) -> Report {
        let header_detected = rows.first().is_some_and(|r| is_header_row(r));
        let start = usize::from(header_detected);

        let mut report = Report {
            header_detected,
            ..Report::default()
        };
        for (row_index, cells) in rows.iter().enumerate().skip(start) {
            match parse_row(cells) {
                Ok(input) => report.records.push(self.compute(&input)),
                Err(kind) => report.skipped.push(RowIssue { row_index, kind }),
            }
        }
        report
    }
}
