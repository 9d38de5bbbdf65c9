use super::velocity_table::VelocityTable;

/// 기준표에서 찾지 못했을 때의 권장 유속 [m/s].
pub const FALLBACK_VELOCITY: f64 = 1.5;
pub const FALLBACK_CATEGORY: &str = "未知";
pub const FALLBACK_RECOMMENDATION: &str = "请根据实际情况确定流速";

/// 매질명이 기준표와 어떻게 일치했는지 나타낸다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind<'a> {
    /// 키와 정확히 일치
    Exact,
    /// 입력이 키를 포함하거나 키가 입력을 포함. 일치한 키를 담는다.
    Fuzzy(&'a str),
    /// 일치 항목 없음. 기본값을 사용했다.
    Fallback,
}

/// 매질 해석 결과.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution<'a> {
    pub velocity_m_per_s: f64,
    pub category: &'a str,
    pub recommendation: &'a str,
    pub matched: MatchKind<'a>,
}

impl Resolution<'_> {
    fn fallback() -> Self {
        Self {
            velocity_m_per_s: FALLBACK_VELOCITY,
            category: FALLBACK_CATEGORY,
            recommendation: FALLBACK_RECOMMENDATION,
            matched: MatchKind::Fallback,
        }
    }
}

/// 자유 입력된 매질명을 기준표 항목으로 해석한다.
#[derive(Debug, Clone, Copy)]
pub struct MediumResolver<'a> {
    table: &'a VelocityTable,
}

impl<'a> MediumResolver<'a> {
    pub fn new(table: &'a VelocityTable) -> Self {
        Self { table }
    }

    /// 정확 일치 → 부분 문자열 일치 → 기본값 순으로 해석한다.
    ///
    /// 부분 일치가 여러 키에 걸리면 기준표 선언 순서상 첫 번째 키를 쓴다.
    /// 공백뿐인 입력은 모든 키에 포함되므로 부분 일치를 시도하지 않는다.
    pub fn resolve(&self, medium: &str) -> Resolution<'a> {
        let medium = medium.trim();
        if medium.is_empty() {
            return Resolution::fallback();
        }

        if let Some(entry) = self.table.get(medium) {
            return Resolution {
                velocity_m_per_s: entry.midpoint(),
                category: &entry.category,
                recommendation: &entry.recommendation,
                matched: MatchKind::Exact,
            };
        }

        self.table
            .entries()
            .iter()
            .find(|e| medium.contains(e.name.as_str()) || e.name.contains(medium))
            .map(|e| Resolution {
                velocity_m_per_s: e.velocity.midpoint(),
                category: &e.velocity.category,
                recommendation: &e.velocity.recommendation,
                matched: MatchKind::Fuzzy(&e.name),
            })
            .unwrap_or_else(Resolution::fallback)
    }
}
